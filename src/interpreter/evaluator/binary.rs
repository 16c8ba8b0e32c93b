use crate::{
    ast::BinaryOp,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::f64_to_i64_exact,
};

/// Applies a binary operator to two evaluated operands.
///
/// The short-circuiting `and`/`or` operators never reach this function;
/// they are handled during expression evaluation so that the right operand
/// is only evaluated when needed.
///
/// # Parameters
/// - `op`: The operator to apply.
/// - `left`: Evaluated left operand, already adjusted to a single value.
/// - `right`: Evaluated right operand, already adjusted to a single value.
///
/// # Returns
/// The resulting value.
///
/// # Errors
/// - `BinaryOperandType` when an arithmetic operator sees a non-number or
///   `..` sees a non-string.
/// - `IncomparableTypes` when a relational operator sees mixed or
///   unordered types.
/// - `BitwiseOnNonInteger` when a bitwise operator sees a value without an
///   integer mantissa.
/// - `DivisionByZero` for `//` and `%` with a zero divisor.
pub fn apply(op: BinaryOp, left: &Value, right: &Value) -> EvalResult<Value> {
    match op {
        BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::IntDiv
        | BinaryOp::Mod
        | BinaryOp::Pow => apply_arithmetic(op, left, right),
        BinaryOp::Concat => match (left, right) {
            (Value::Str(l), Value::Str(r)) => {
                Ok(Value::string(format!("{l}{r}")))
            },
            _ => Err(RuntimeError::BinaryOperandType { op,
                                                       expected: "strings", }),
        },
        BinaryOp::Equal => Ok(Value::Bool(left == right)),
        BinaryOp::NotEqual => Ok(Value::Bool(left != right)),
        BinaryOp::Less
        | BinaryOp::LessEqual
        | BinaryOp::Greater
        | BinaryOp::GreaterEqual => apply_relational(op, left, right),
        BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::ShiftLeft
        | BinaryOp::ShiftRight => apply_bitwise(op, left, right),
        BinaryOp::And | BinaryOp::Or => {
            unreachable!("short-circuit operators are evaluated in core")
        },
    }
}

/// Applies an arithmetic operator to two numbers.
///
/// `/` follows IEEE semantics, so dividing by zero yields an infinity or
/// NaN. `//` floors the quotient and `%` is `a - floor(a/b)*b`; both raise
/// an error on a zero divisor.
fn apply_arithmetic(op: BinaryOp, left: &Value, right: &Value) -> EvalResult<Value> {
    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(RuntimeError::BinaryOperandType { op,
                                                     expected: "numbers", });
    };
    let (a, b) = (*a, *b);

    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::IntDiv => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { op });
            }
            (a / b).floor()
        },
        BinaryOp::Mod => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { op });
            }
            a - (a / b).floor() * b
        },
        BinaryOp::Pow => a.powf(b),
        _ => unreachable!(),
    };
    Ok(Value::Number(result))
}

/// Applies an ordering operator. Numbers compare numerically and strings
/// lexicographically by bytes; anything else is incomparable.
fn apply_relational(op: BinaryOp, left: &Value, right: &Value) -> EvalResult<Value> {
    let result = match (left, right) {
        (Value::Number(a), Value::Number(b)) => match op {
            BinaryOp::Less => a < b,
            BinaryOp::LessEqual => a <= b,
            BinaryOp::Greater => a > b,
            BinaryOp::GreaterEqual => a >= b,
            _ => unreachable!(),
        },
        (Value::Str(a), Value::Str(b)) => match op {
            BinaryOp::Less => a < b,
            BinaryOp::LessEqual => a <= b,
            BinaryOp::Greater => a > b,
            BinaryOp::GreaterEqual => a >= b,
            _ => unreachable!(),
        },
        _ => {
            return Err(RuntimeError::IncomparableTypes { left:  left.type_name(),
                                                         right: right.type_name(), });
        },
    };
    Ok(Value::Bool(result))
}

/// Applies a bitwise operator.
///
/// Both operands must be numbers with an integer mantissa. Shifting by a
/// negative count shifts in the opposite direction, and shift counts of 64
/// or more produce zero.
#[allow(clippy::cast_precision_loss)]
fn apply_bitwise(op: BinaryOp, left: &Value, right: &Value) -> EvalResult<Value> {
    let error = RuntimeError::BitwiseOnNonInteger { op };
    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(error);
    };
    let a = f64_to_i64_exact(*a, error.clone())?;
    let b = f64_to_i64_exact(*b, error)?;

    let result = match op {
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::ShiftLeft => shift_left(a, b),
        BinaryOp::ShiftRight => shift_left(a, -b),
        _ => unreachable!(),
    };
    Ok(Value::Number(result as f64))
}

/// Shifts `a` left by `count` bits, shifting right for negative counts.
/// Counts beyond the 64-bit width produce zero. Right shifts are logical:
/// they shift the bit pattern, not the sign.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub(crate) const fn shift_left(a: i64, count: i64) -> i64 {
    if count >= 64 || count <= -64 {
        0
    } else if count >= 0 {
        a << count
    } else {
        ((a as u64) >> -count) as i64
    }
}
