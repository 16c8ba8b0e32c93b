use crate::ast::BinaryOp;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can be raised while evaluating a program.
pub enum RuntimeError {
    /// An arithmetic or concatenation operator was applied to operands of
    /// the wrong type.
    BinaryOperandType {
        /// The operator in question.
        op:       BinaryOp,
        /// What the operator requires, e.g. `numbers`.
        expected: &'static str,
    },
    /// A relational operator compared two values of incomparable types.
    IncomparableTypes {
        /// Type name of the left operand.
        left:  &'static str,
        /// Type name of the right operand.
        right: &'static str,
    },
    /// A bitwise operator received a non-number or a number with a
    /// fractional part.
    BitwiseOnNonInteger {
        /// The operator in question.
        op: BinaryOp,
    },
    /// Unary bitwise complement of a non-integer value.
    ComplementOnNonInteger,
    /// Unary minus applied to a non-number.
    NegateNonNumber,
    /// The `#` operator applied to a value with no length.
    LengthOperand {
        /// Type name of the operand.
        found: &'static str,
    },
    /// Floor division or modulo by zero.
    DivisionByZero {
        /// The operator in question (`//` or `%`).
        op: BinaryOp,
    },
    /// Indexed into a value that is not a table.
    IndexNonTable {
        /// Type name of the indexed value.
        found: &'static str,
    },
    /// Called a value that is not a function.
    CallNonFunction {
        /// Type name of the called value.
        found: &'static str,
    },
    /// A method call did not resolve to a function.
    UndefinedMethod {
        /// The method name after `:`.
        name: String,
    },
    /// A table key was `nil`.
    NilTableKey,
    /// A table key was NaN.
    NanTableKey,
    /// A table key was of a type tables cannot hold.
    InvalidTableKey {
        /// Type name of the rejected key.
        found: &'static str,
    },
    /// A `for` loop bound did not evaluate to a number.
    ForBoundNotNumber {
        /// Which bound: `initial value`, `limit`, or `step`.
        bound: &'static str,
    },
    /// A numeric `for` loop had a step of zero.
    ZeroForStep,
    /// `...` was used outside a vararg function.
    VarArgOutsideFunction,
    /// A `goto` escaped every block without finding its label.
    NoVisibleLabel {
        /// The unresolved label name.
        label: String,
    },
    /// A `break` escaped every enclosing loop.
    BreakOutsideLoop,
    /// A name qualified with `.` in a function declaration did not resolve
    /// to a table.
    UndefinedTableName {
        /// The unresolved name segment.
        name: String,
    },
    /// `assert` received a falsy condition.
    AssertionFailed {
        /// The assertion message.
        message: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BinaryOperandType { op, expected } => {
                write!(f, "'{op}' expects {expected}")
            },
            Self::IncomparableTypes { left, right } => {
                write!(f, "attempt to compare {left} with {right}")
            },
            Self::BitwiseOnNonInteger { op } => {
                write!(f, "bitwise '{op}' can only be applied to integers")
            },
            Self::ComplementOnNonInteger => {
                write!(f, "bitwise '~' can only be applied to integers")
            },
            Self::NegateNonNumber => write!(f, "unary '-' can only be applied to numbers"),
            Self::LengthOperand { found } => {
                write!(f, "attempt to get length of a {found} value")
            },
            Self::DivisionByZero { op } => write!(f, "'{op}' by zero"),
            Self::IndexNonTable { found } => {
                write!(f, "attempt to index a {found} value")
            },
            Self::CallNonFunction { found } => {
                write!(f, "attempt to call a {found} value")
            },
            Self::UndefinedMethod { name } => {
                write!(f, "undefined method '{name}' for table")
            },
            Self::NilTableKey => write!(f, "table index is nil"),
            Self::NanTableKey => write!(f, "table index is NaN"),
            Self::InvalidTableKey { found } => {
                write!(f, "cannot use a {found} value as a table index")
            },
            Self::ForBoundNotNumber { bound } => {
                write!(f, "'for' {bound} must be a number")
            },
            Self::ZeroForStep => write!(f, "'for' step is zero"),
            Self::VarArgOutsideFunction => {
                write!(f, "cannot use '...' outside a vararg function")
            },
            Self::NoVisibleLabel { label } => {
                write!(f, "no visible label '{label}' for goto")
            },
            Self::BreakOutsideLoop => write!(f, "break statement outside of loop"),
            Self::UndefinedTableName { name } => {
                write!(f, "undefined table name '{name}' in function declaration")
            },
            Self::AssertionFailed { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
