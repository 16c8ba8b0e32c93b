use crate::{
    ast::UnaryOp,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::f64_to_i64_exact,
};

/// Applies a unary operator to an evaluated operand.
///
/// # Parameters
/// - `op`: The operator to apply.
/// - `operand`: The evaluated operand, already adjusted to a single value.
///
/// # Returns
/// The resulting value.
///
/// # Errors
/// - `NegateNonNumber` for `-` on anything but a number.
/// - `ComplementOnNonInteger` for `~` on a non-integer value.
/// - `LengthOperand` for `#` on anything but a string or table.
#[allow(clippy::cast_precision_loss)]
pub fn apply(op: UnaryOp, operand: &Value) -> EvalResult<Value> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(RuntimeError::NegateNonNumber),
        },
        UnaryOp::BitNot => match operand {
            Value::Number(n) => {
                let n = f64_to_i64_exact(*n, RuntimeError::ComplementOnNonInteger)?;
                Ok(Value::Number(!n as f64))
            },
            _ => Err(RuntimeError::ComplementOnNonInteger),
        },
        UnaryOp::Len => match operand {
            // Byte count, not character count.
            Value::Str(s) => Ok(Value::Number(s.len() as f64)),
            // Entry count of the mapping, not the Lua border.
            Value::Table(table) => Ok(Value::Number(table.borrow().len() as f64)),
            other => Err(RuntimeError::LengthOperand { found: other.type_name(), }),
        },
    }
}
