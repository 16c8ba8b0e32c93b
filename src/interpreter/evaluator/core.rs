use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{BinaryOp, Block, Expr, Stat},
    error::RuntimeError,
    interpreter::{
        evaluator::{binary, call, scope::Scope, statement, unary},
        value::core::{LuaFunction, Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of evaluating a statement or block.
///
/// Anything other than `Normal` is a control signal travelling to the
/// construct that consumes it: loops absorb `Break`, call frames absorb
/// `Return`, and blocks holding the target label absorb `Goto`. A signal
/// that escapes the whole program becomes the corresponding runtime error.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `break` looking for the innermost enclosing loop.
    Break,
    /// A `return` carrying its (possibly multi-) value to the call frame.
    Return(Value),
    /// A `goto` looking for a visible label of the given name.
    Goto(String),
}

/// Evaluates an expression to its raw value.
///
/// The result may be a [`Value::Multi`] when the expression is a call or a
/// vararg; callers at single-value positions use [`eval_expr_single`]
/// instead, and list positions expand the last element.
///
/// # Parameters
/// - `expr`: The expression to evaluate.
/// - `scope`: The scope names are resolved against.
///
/// # Returns
/// The expression's value.
pub fn eval_expr(expr: &Expr, scope: &Rc<Scope>) -> EvalResult<Value> {
    match expr {
        Expr::Nil => Ok(Value::Nil),
        Expr::True => Ok(Value::Bool(true)),
        Expr::False => Ok(Value::Bool(false)),
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Str(s) => Ok(Value::string(s)),
        Expr::VarArg => scope.lookup("...")
                             .ok_or(RuntimeError::VarArgOutsideFunction),
        Expr::Name(name) => Ok(scope.get(name)),
        Expr::Index { prefix, key } => {
            let table = eval_expr_single(prefix, scope)?;
            let key = eval_expr_single(key, scope)?;
            match table {
                Value::Table(table) => Ok(table.borrow().get(&key)),
                other => Err(RuntimeError::IndexNonTable { found: other.type_name(), }),
            }
        },
        Expr::Member { prefix, name } => {
            let table = eval_expr_single(prefix, scope)?;
            match table {
                Value::Table(table) => Ok(table.borrow().get_named(name)),
                other => Err(RuntimeError::IndexNonTable { found: other.type_name(), }),
            }
        },
        Expr::Unary { op, operand } => {
            let operand = eval_expr_single(operand, scope)?;
            unary::apply(*op, &operand)
        },
        Expr::Binary { op: BinaryOp::And,
                       left,
                       right, } => {
            let left = eval_expr_single(left, scope)?;
            if left.is_truthy() {
                eval_expr_single(right, scope)
            } else {
                Ok(left)
            }
        },
        Expr::Binary { op: BinaryOp::Or,
                       left,
                       right, } => {
            let left = eval_expr_single(left, scope)?;
            if left.is_truthy() {
                Ok(left)
            } else {
                eval_expr_single(right, scope)
            }
        },
        Expr::Binary { op, left, right } => {
            let left = eval_expr_single(left, scope)?;
            let right = eval_expr_single(right, scope)?;
            binary::apply(*op, &left, &right)
        },
        Expr::Function(body) => {
            Ok(Value::Function(Rc::new(LuaFunction { params:    body.params.clone(),
                                                     is_vararg: body.is_vararg,
                                                     body:      Rc::clone(body),
                                                     scope:     Rc::clone(scope), })))
        },
        Expr::Table(fields) => call::eval_table_constructor(fields, scope),
        Expr::Call(call) => call::eval_call(call, scope),
    }
}

/// Evaluates an expression and adjusts the result to a single value.
pub fn eval_expr_single(expr: &Expr, scope: &Rc<Scope>) -> EvalResult<Value> {
    Ok(eval_expr(expr, scope)?.single())
}

/// Evaluates an expression list with multi-value flattening.
///
/// Every expression but the last is adjusted to one value; the last is
/// expanded, so a trailing call or vararg contributes all of its results.
/// This is the shape shared by argument lists, return lists, and the
/// right-hand side of (multi-)assignments.
pub fn eval_expr_list(exprs: &[Expr], scope: &Rc<Scope>) -> EvalResult<Vec<Value>> {
    let mut values = Vec::with_capacity(exprs.len());
    for (index, expr) in exprs.iter().enumerate() {
        let value = eval_expr(expr, scope)?;
        if index + 1 == exprs.len() {
            values.extend(value.into_values());
        } else {
            values.push(value.single());
        }
    }
    Ok(values)
}

/// Evaluates a block of statements in the given scope.
///
/// Labels are collected up front; when a statement produces a
/// [`Flow::Goto`] whose label lives in this block, execution rewinds to the
/// statement after the label. Every other non-normal flow is handed to the
/// caller. A trailing `return` evaluates its expression list (flattening
/// the last expression) and produces [`Flow::Return`].
///
/// # Parameters
/// - `block`: The block to run.
/// - `scope`: The scope the block's statements execute in. Callers that
///   need a fresh scope create the child themselves; `repeat` relies on
///   this to evaluate its condition in the body's scope.
pub fn eval_block(block: &Block, scope: &Rc<Scope>) -> EvalResult<Flow> {
    let mut labels = HashMap::new();
    for (index, stat) in block.statements.iter().enumerate() {
        if let Stat::Label(name) = stat {
            labels.insert(name.as_str(), index);
        }
    }

    let mut index = 0;
    while index < block.statements.len() {
        match statement::exec(&block.statements[index], scope)? {
            Flow::Normal => index += 1,
            Flow::Goto(label) => match labels.get(label.as_str()) {
                Some(&target) => index = target + 1,
                None => return Ok(Flow::Goto(label)),
            },
            flow => return Ok(flow),
        }
    }

    if let Some(exprs) = &block.return_exprs {
        let values = eval_expr_list(exprs, scope)?;
        return Ok(Flow::Return(Value::pack(values)));
    }
    Ok(Flow::Normal)
}

/// Runs a parsed program against a fresh root scope.
///
/// # Parameters
/// - `block`: The program's top-level block.
///
/// # Returns
/// The value of the program's top-level `return`, or `nil` when execution
/// falls off the end.
///
/// # Errors
/// Any runtime error the program raises. A `break` or `goto` escaping the
/// top level becomes the matching error.
pub fn eval_program(block: &Block) -> EvalResult<Value> {
    let root = Scope::root();
    match eval_block(block, &root)? {
        Flow::Normal => Ok(Value::Nil),
        Flow::Return(value) => Ok(value),
        Flow::Break => Err(RuntimeError::BreakOutsideLoop),
        Flow::Goto(label) => Err(RuntimeError::NoVisibleLabel { label }),
    }
}
