use std::rc::Rc;

use crate::{
    ast::{Args, CallExpr, Field},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{self, EvalResult, Flow},
            scope::Scope,
        },
        value::core::Value,
    },
};

/// Evaluates a function or method call expression.
///
/// For the method form `prefix:name(args)`, the prefix must be a table, the
/// method is looked up as a string key, and the receiver is prepended to
/// the argument list. The result is whatever the callee returned, possibly
/// a [`Value::Multi`]; the caller's context decides how much of it to keep.
///
/// # Parameters
/// - `call`: The call to evaluate.
/// - `scope`: The caller's scope, used for the prefix and the arguments.
///
/// # Errors
/// - `IndexNonTable` when a method call's receiver is not a table.
/// - `UndefinedMethod` when the method name is not bound in the receiver.
/// - `CallNonFunction` when the callee is not callable.
pub fn eval_call(call: &CallExpr, scope: &Rc<Scope>) -> EvalResult<Value> {
    let prefix = core::eval_expr_single(&call.prefix, scope)?;

    let (callee, mut args) = match &call.method {
        Some(name) => {
            let Value::Table(table) = &prefix else {
                return Err(RuntimeError::IndexNonTable { found: prefix.type_name(), });
            };
            let method = table.borrow().get_named(name);
            if matches!(method, Value::Nil) {
                return Err(RuntimeError::UndefinedMethod { name: name.clone(), });
            }
            (method, vec![prefix.clone()])
        },
        None => (prefix, Vec::new()),
    };

    args.extend(eval_args(&call.args, scope)?);
    call_value(&callee, args)
}

/// Evaluates a call's arguments to a value list.
///
/// A parenthesized list flattens a trailing multi-value; the table and
/// string forms each contribute exactly one argument.
fn eval_args(args: &Args, scope: &Rc<Scope>) -> EvalResult<Vec<Value>> {
    match args {
        Args::List(exprs) => core::eval_expr_list(exprs, scope),
        Args::Table(fields) => Ok(vec![eval_table_constructor(fields, scope)?]),
        Args::Str(s) => Ok(vec![Value::string(s)]),
    }
}

/// Invokes a callable value with already-evaluated arguments.
///
/// A language-level function runs its body in a fresh child of its
/// *captured* scope: parameters bind positionally, missing arguments bind
/// `nil`, and when the function is vararg the surplus arguments become the
/// `...` binding. A native function receives the argument slice directly.
///
/// # Parameters
/// - `callee`: The value being called.
/// - `args`: The evaluated arguments.
///
/// # Returns
/// The call's result; `nil` when the body never returns.
pub fn call_value(callee: &Value, args: Vec<Value>) -> EvalResult<Value> {
    match callee {
        Value::Native(function) => function(&args),
        Value::Function(function) => {
            let frame = Scope::child(&function.scope);
            for (index, name) in function.params.iter().enumerate() {
                frame.set_local(name, args.get(index).cloned().unwrap_or(Value::Nil));
            }
            if function.is_vararg {
                let extra = if args.len() > function.params.len() {
                    args[function.params.len()..].to_vec()
                } else {
                    Vec::new()
                };
                frame.set_local("...", Value::Multi(extra.into()));
            }

            match core::eval_block(&function.body.block, &frame)? {
                Flow::Return(value) => Ok(value),
                Flow::Normal => Ok(Value::Nil),
                Flow::Break => Err(RuntimeError::BreakOutsideLoop),
                Flow::Goto(label) => Err(RuntimeError::NoVisibleLabel { label }),
            }
        },
        other => Err(RuntimeError::CallNonFunction { found: other.type_name(), }),
    }
}

/// Evaluates a table constructor.
///
/// Fields are evaluated in source order. Positional fields take 1-based
/// numeric keys from a running counter; when the last field is positional
/// and evaluates to a multi-value, all of its elements are spread at
/// consecutive positions. Keyed fields reject `nil` and NaN keys.
pub fn eval_table_constructor(fields: &[Field], scope: &Rc<Scope>) -> EvalResult<Value> {
    let value = Value::new_table();
    let Value::Table(table) = &value else {
        unreachable!()
    };

    let mut position = 1.0;
    for (index, field) in fields.iter().enumerate() {
        match field {
            Field::Keyed { key, value: expr } => {
                let key = core::eval_expr_single(key, scope)?;
                let field_value = core::eval_expr_single(expr, scope)?;
                table.borrow_mut().set(&key, field_value)?;
            },
            Field::Named { name, value: expr } => {
                let field_value = core::eval_expr_single(expr, scope)?;
                table.borrow_mut().set_named(name, field_value);
            },
            Field::Positional(expr) => {
                let field_value = core::eval_expr(expr, scope)?;
                if index + 1 == fields.len() {
                    for element in field_value.into_values() {
                        table.borrow_mut().set(&Value::Number(position), element)?;
                        position += 1.0;
                    }
                } else {
                    table.borrow_mut()
                         .set(&Value::Number(position), field_value.single())?;
                    position += 1.0;
                }
            },
        }
    }
    Ok(value)
}
