/// Core evaluation logic.
///
/// Contains the expression dispatcher, block evaluation with label
/// handling, and the control-flow result type that coordinates `break`,
/// `return`, and `goto`.
pub mod core;

/// Scope contexts.
///
/// Implements the chain of lexical scopes, the shared globals map, and the
/// root scope with its built-in functions.
pub mod scope;

/// Binary operator evaluation.
///
/// Applies arithmetic, concatenation, comparison, and bitwise operators to
/// evaluated operand values.
pub mod binary;

/// Unary operator evaluation.
///
/// Applies negation, logical not, bitwise complement, and the length
/// operator.
pub mod unary;

/// Function calls and table constructors.
///
/// Handles call dispatch (including method calls), argument adjustment,
/// parameter and vararg binding, and table construction.
pub mod call;

/// Statement execution.
///
/// Implements assignments, declarations, conditionals, the three loop
/// forms, and function declarations.
pub mod statement;

/// Built-in native functions.
///
/// Provides `print` and `assert` and installs them into the root globals.
pub mod native;
