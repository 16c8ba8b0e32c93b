use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionBody, FunctionName, Stat},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            call,
            core::{self, EvalResult, Flow},
            scope::Scope,
        },
        value::core::{LuaFunction, Value},
    },
};

/// Executes a single statement.
///
/// # Parameters
/// - `stat`: The statement to run.
/// - `scope`: The scope the statement executes in.
///
/// # Returns
/// The control flow outcome: [`Flow::Normal`] to continue with the next
/// statement, or a signal for an enclosing construct.
pub fn exec(stat: &Stat, scope: &Rc<Scope>) -> EvalResult<Flow> {
    match stat {
        Stat::Empty | Stat::Label(_) => Ok(Flow::Normal),
        Stat::Break => Ok(Flow::Break),
        Stat::Goto(label) => Ok(Flow::Goto(label.clone())),
        Stat::Do(block) => core::eval_block(block, &Scope::child(scope)),
        Stat::Call(call) => {
            call::eval_call(call, scope)?;
            Ok(Flow::Normal)
        },
        Stat::Local { names, exprs } => {
            let values = core::eval_expr_list(exprs, scope)?;
            for (index, name) in names.iter().enumerate() {
                scope.set_local(name, values.get(index).cloned().unwrap_or(Value::Nil));
            }
            Ok(Flow::Normal)
        },
        Stat::Assign { targets, exprs } => {
            let values = core::eval_expr_list(exprs, scope)?;
            for (index, target) in targets.iter().enumerate() {
                let value = values.get(index).cloned().unwrap_or(Value::Nil);
                assign(target, value, scope)?;
            }
            Ok(Flow::Normal)
        },
        Stat::While { cond, body } => exec_while(cond, body, scope),
        Stat::Repeat { body, cond } => exec_repeat(body, cond, scope),
        Stat::If { conds, blocks } => {
            for (index, cond) in conds.iter().enumerate() {
                if core::eval_expr_single(cond, scope)?.is_truthy() {
                    return core::eval_block(&blocks[index], &Scope::child(scope));
                }
            }
            if blocks.len() > conds.len() {
                return core::eval_block(&blocks[blocks.len() - 1], &Scope::child(scope));
            }
            Ok(Flow::Normal)
        },
        Stat::NumericFor { name,
                           init,
                           limit,
                           step,
                           body, } => exec_numeric_for(name, init, limit, step.as_ref(), body, scope),
        Stat::GenericFor { names, exprs, body } => exec_generic_for(names, exprs, body, scope),
        Stat::LocalFunction { name, body } => {
            scope.set_local(name, make_function(body, false, scope));
            Ok(Flow::Normal)
        },
        Stat::FunctionDecl { name, body } => exec_function_decl(name, body, scope),
    }
}

/// Stores `value` into an assignment target.
///
/// The parser guarantees every target is a name, an indexed access, or a
/// member access.
fn assign(target: &Expr, value: Value, scope: &Rc<Scope>) -> EvalResult<()> {
    match target {
        Expr::Name(name) => {
            scope.set(name, value);
            Ok(())
        },
        Expr::Index { prefix, key } => {
            let table = core::eval_expr_single(prefix, scope)?;
            let key = core::eval_expr_single(key, scope)?;
            match table {
                Value::Table(table) => table.borrow_mut().set(&key, value),
                other => Err(RuntimeError::IndexNonTable { found: other.type_name(), }),
            }
        },
        Expr::Member { prefix, name } => {
            let table = core::eval_expr_single(prefix, scope)?;
            match table {
                Value::Table(table) => {
                    table.borrow_mut().set_named(name, value);
                    Ok(())
                },
                other => Err(RuntimeError::IndexNonTable { found: other.type_name(), }),
            }
        },
        _ => unreachable!("the parser only accepts assignable targets"),
    }
}

/// Builds a function value capturing the current scope. A method receives
/// `self` as an implicit first parameter.
fn make_function(body: &Rc<FunctionBody>, is_method: bool, scope: &Rc<Scope>) -> Value {
    let mut params = body.params.clone();
    if is_method {
        params.insert(0, "self".to_string());
    }
    Value::Function(Rc::new(LuaFunction { params,
                                          is_vararg: body.is_vararg,
                                          body: Rc::clone(body),
                                          scope: Rc::clone(scope), }))
}

/// Executes a `function name ... end` declaration.
///
/// An unqualified name is assigned like any variable. A qualified name
/// walks the table chain from the first segment; every intermediate
/// segment must already hold a table, and the function lands in the last
/// one.
fn exec_function_decl(name: &FunctionName,
                      body: &Rc<FunctionBody>,
                      scope: &Rc<Scope>)
                      -> EvalResult<Flow> {
    let function = make_function(body, name.is_method, scope);

    let Some(first) = name.prefix.first() else {
        scope.set(&name.name, function);
        return Ok(Flow::Normal);
    };

    let mut table = match scope.get(first) {
        Value::Table(table) => table,
        _ => return Err(RuntimeError::UndefinedTableName { name: first.clone(), }),
    };
    for segment in &name.prefix[1..] {
        let next = table.borrow().get_named(segment);
        match next {
            Value::Table(inner) => table = inner,
            _ => return Err(RuntimeError::UndefinedTableName { name: segment.clone(), }),
        }
    }
    table.borrow_mut().set_named(&name.name, function);
    Ok(Flow::Normal)
}

/// Runs a `while` loop. The condition is evaluated in the surrounding
/// scope; each iteration of the body gets a fresh child scope.
fn exec_while(cond: &Expr, body: &crate::ast::Block, scope: &Rc<Scope>) -> EvalResult<Flow> {
    loop {
        if !core::eval_expr_single(cond, scope)?.is_truthy() {
            break;
        }
        match core::eval_block(body, &Scope::child(scope))? {
            Flow::Normal => {},
            Flow::Break => break,
            flow => return Ok(flow),
        }
    }
    Ok(Flow::Normal)
}

/// Runs a `repeat ... until` loop.
///
/// The condition is evaluated in the same scope as the body, so locals
/// declared inside the body are visible to it.
fn exec_repeat(body: &crate::ast::Block, cond: &Expr, scope: &Rc<Scope>) -> EvalResult<Flow> {
    loop {
        let frame = Scope::child(scope);
        match core::eval_block(body, &frame)? {
            Flow::Normal => {},
            Flow::Break => break,
            flow => return Ok(flow),
        }
        if core::eval_expr_single(cond, &frame)?.is_truthy() {
            break;
        }
    }
    Ok(Flow::Normal)
}

/// Runs a numeric `for` loop.
///
/// All three bounds must be numbers; the step defaults to `1.0` and must
/// not be zero. The induction variable is a fresh local in every
/// iteration's scope.
fn exec_numeric_for(name: &str,
                    init: &Expr,
                    limit: &Expr,
                    step: Option<&Expr>,
                    body: &crate::ast::Block,
                    scope: &Rc<Scope>)
                    -> EvalResult<Flow> {
    let init = for_bound(init, "initial value", scope)?;
    let limit = for_bound(limit, "limit", scope)?;
    let step = match step {
        Some(expr) => for_bound(expr, "step", scope)?,
        None => 1.0,
    };
    if step == 0.0 {
        return Err(RuntimeError::ZeroForStep);
    }

    let mut i = init;
    while (step > 0.0 && i <= limit) || (step < 0.0 && i >= limit) {
        let frame = Scope::child(scope);
        frame.set_local(name, Value::Number(i));
        match core::eval_block(body, &frame)? {
            Flow::Normal => {},
            Flow::Break => break,
            flow => return Ok(flow),
        }
        i += step;
    }
    Ok(Flow::Normal)
}

/// Evaluates one bound of a numeric `for` header.
fn for_bound(expr: &Expr, bound: &'static str, scope: &Rc<Scope>) -> EvalResult<f64> {
    match core::eval_expr_single(expr, scope)? {
        Value::Number(n) => Ok(n),
        _ => Err(RuntimeError::ForBoundNotNumber { bound }),
    }
}

/// Runs a generic `for` loop.
///
/// The expression list is adjusted to the triple `(iterator, state,
/// control)`. Each round calls `iterator(state, control)`; a `nil` first
/// result ends the loop, otherwise the results bind to the name list (the
/// first also becoming the new control value) and the body runs in a fresh
/// scope.
fn exec_generic_for(names: &[String],
                    exprs: &[Expr],
                    body: &crate::ast::Block,
                    scope: &Rc<Scope>)
                    -> EvalResult<Flow> {
    let mut values = core::eval_expr_list(exprs, scope)?;
    values.resize(3, Value::Nil);
    let iterator = values[0].clone();
    let state = values[1].clone();
    let mut control = values[2].clone();

    loop {
        let results = call::call_value(&iterator, vec![state.clone(), control.clone()])?
            .into_values();
        let first = results.first().cloned().unwrap_or(Value::Nil);
        if matches!(first, Value::Nil) {
            break;
        }

        let frame = Scope::child(scope);
        for (index, name) in names.iter().enumerate() {
            frame.set_local(name, results.get(index).cloned().unwrap_or(Value::Nil));
        }
        control = first;

        match core::eval_block(body, &frame)? {
            Flow::Normal => {},
            Flow::Break => break,
            flow => return Ok(flow),
        }
    }
    Ok(Flow::Normal)
}
