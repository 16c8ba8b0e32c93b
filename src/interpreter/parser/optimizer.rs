use crate::{
    ast::{BinaryOp, Expr, UnaryOp},
    interpreter::evaluator::binary::shift_left,
    util::num::f64_to_i64_exact,
};

/// Builds a binary operator node, folding it to a literal when both
/// operands are literals and the operator's result is fully determined.
///
/// Folding follows the evaluator's semantics exactly, with two deliberate
/// exceptions: `//` and `%` with a literal zero divisor are left unfolded
/// so the runtime error survives, and bitwise operators with a non-integer
/// literal operand are left unfolded for the same reason. With the
/// `constant-folding` feature disabled this always builds the plain node.
///
/// # Parameters
/// - `op`: The operator being constructed.
/// - `left`: The already-parsed left operand.
/// - `right`: The already-parsed right operand.
///
/// # Returns
/// Either a literal expression or the unfolded `Expr::Binary` node.
pub fn fold_binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    if cfg!(feature = "constant-folding")
       && let Some(folded) = try_fold_binary(op, &left, &right)
    {
        return folded;
    }
    Expr::Binary { op,
                   left: Box::new(left),
                   right: Box::new(right), }
}

/// Builds a unary operator node, folding it when the operand is a suitable
/// literal.
///
/// # Parameters
/// - `op`: The operator being constructed.
/// - `operand`: The already-parsed operand.
///
/// # Returns
/// Either a literal expression or the unfolded `Expr::Unary` node.
pub fn fold_unary(op: UnaryOp, operand: Expr) -> Expr {
    if cfg!(feature = "constant-folding")
       && let Some(folded) = try_fold_unary(op, &operand)
    {
        return folded;
    }
    Expr::Unary { op,
                  operand: Box::new(operand), }
}

#[allow(clippy::cast_precision_loss)]
fn try_fold_binary(op: BinaryOp, left: &Expr, right: &Expr) -> Option<Expr> {
    match op {
        BinaryOp::And => {
            if is_false_literal(left) {
                Some(left.clone())
            } else if is_true_literal(left) {
                Some(right.clone())
            } else {
                None
            }
        },
        BinaryOp::Or => {
            if is_true_literal(left) {
                Some(left.clone())
            } else if is_false_literal(left) {
                Some(right.clone())
            } else {
                None
            }
        },
        BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::IntDiv
        | BinaryOp::Mod
        | BinaryOp::Pow => {
            let (Expr::Number(a), Expr::Number(b)) = (left, right) else {
                return None;
            };
            let (a, b) = (*a, *b);
            let value = match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                // IEEE division: a literal zero divisor folds to an
                // infinity or NaN, matching the evaluator.
                BinaryOp::Div => a / b,
                BinaryOp::IntDiv if b != 0.0 => (a / b).floor(),
                BinaryOp::Mod if b != 0.0 => a - (a / b).floor() * b,
                BinaryOp::Pow => a.powf(b),
                _ => return None,
            };
            Some(Expr::Number(value))
        },
        BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::ShiftLeft
        | BinaryOp::ShiftRight => {
            let (Expr::Number(a), Expr::Number(b)) = (left, right) else {
                return None;
            };
            let a = f64_to_i64_exact(*a, ()).ok()?;
            let b = f64_to_i64_exact(*b, ()).ok()?;
            let value = match op {
                BinaryOp::BitAnd => a & b,
                BinaryOp::BitOr => a | b,
                BinaryOp::BitXor => a ^ b,
                BinaryOp::ShiftLeft => shift_left(a, b),
                BinaryOp::ShiftRight => shift_left(a, -b),
                _ => return None,
            };
            Some(Expr::Number(value as f64))
        },
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn try_fold_unary(op: UnaryOp, operand: &Expr) -> Option<Expr> {
    match op {
        UnaryOp::Neg => match operand {
            Expr::Number(n) => Some(Expr::Number(-n)),
            _ => None,
        },
        UnaryOp::Not => {
            if is_true_literal(operand) {
                Some(Expr::False)
            } else if is_false_literal(operand) {
                Some(Expr::True)
            } else {
                None
            }
        },
        UnaryOp::BitNot => match operand {
            Expr::Number(n) => {
                let n = f64_to_i64_exact(*n, ()).ok()?;
                Some(Expr::Number(!n as f64))
            },
            _ => None,
        },
        UnaryOp::Len => None,
    }
}

/// A literal whose truthiness is known to be true: numbers, strings, and
/// `true`.
const fn is_true_literal(expr: &Expr) -> bool {
    matches!(expr, Expr::Number(_) | Expr::Str(_) | Expr::True)
}

/// A literal whose truthiness is known to be false: `nil` and `false`.
const fn is_false_literal(expr: &Expr) -> bool {
    matches!(expr, Expr::Nil | Expr::False)
}
