/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST against a chain of lexical scopes,
/// implementing variable lookup, function calls, table construction and
/// indexing, loops, conditionals, and the non-local control flow of
/// `break`, `return`, and `goto`.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements.
/// - Manages the scope chain, the shared globals, and closures.
/// - Coordinates control signals and reports runtime errors.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens:
/// keywords, identifiers, numeric and string literals, and every operator
/// and punctuator of the language. Whitespace and comments are consumed
/// internally.
///
/// # Responsibilities
/// - Converts the input character stream into tokens.
/// - Processes string escapes, hexadecimal numbers, and long comments.
/// - Surfaces lexical problems as in-band error tokens.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser consumes the token stream through a one-token lookahead and
/// constructs the AST, folding constant subexpressions as operator nodes
/// are built.
///
/// # Responsibilities
/// - Implements the statement grammar and the operator precedence ladder.
/// - Disambiguates assignments from statement calls.
/// - Reports syntax errors carrying the offending lexeme.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value types used during execution: nil,
/// booleans, numbers, strings, tables, functions, and the internal
/// multi-value list, together with tables' key handling.
///
/// # Responsibilities
/// - Defines the `Value` enum and its equality and truthiness rules.
/// - Implements tables and their key restrictions.
/// - Provides display formatting for `print`.
pub mod value;
