/// Core parser state.
///
/// Defines the `Parser` with its one-token lookahead, the block grammar,
/// expression lists, and the shared token helpers.
pub mod core;

/// Expression parsing.
///
/// Implements the operator precedence ladder, atomic expressions, and
/// table constructors.
pub mod expression;

/// Constant folding.
///
/// Replaces operator applications on literal operands with their computed
/// literal at node construction time.
pub mod optimizer;

/// Prefix expressions.
///
/// Parses names, parenthesized expressions, and their chains of indexing,
/// member access, and call postfixes, including the assignment-vs-call
/// disambiguation for statements.
pub mod prefix;

/// Statement parsing.
///
/// Dispatches on the leading token to parse declarations, control
/// structures, loops, labels, and function definitions.
pub mod statement;
