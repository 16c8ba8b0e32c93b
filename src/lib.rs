//! # luna
//!
//! luna is a tree-walking interpreter for a substantial subset of Lua 5.3,
//! written in Rust. Given a source text it produces tokens, parses them
//! into an abstract syntax tree, and evaluates that tree against a chain
//! of lexical scopes, with `print` and `assert` available as built-ins.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::parser::core::Parser;

/// Defines the structure of parsed code.
///
/// This module declares the expression and statement types that represent
/// the syntactic structure of source code as a tree. The AST is built by
/// the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression, statement, and block types for every construct.
/// - Defines the operator enums shared by the parser and evaluator.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// or evaluating code, and a single wrapper type for end-to-end callers.
///
/// # Responsibilities
/// - Defines error enums for the parse and runtime phases.
/// - Carries the offending lexeme or the failing operation in each kind.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, and error handling to provide a complete runtime for
/// executing scripts.
///
/// # Responsibilities
/// - Coordinates the core components: lexer, parser, evaluator, values.
/// - Provides the crate's entry points for interpreting user code.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Converts between `f64` and `i64` without silent data loss.
pub mod util;

pub use crate::{
    ast::Block,
    error::{Error, ParseError, RuntimeError},
    interpreter::{lexer::Token, value::core::Value},
};

/// Tokenizes a source string.
///
/// The iterator yields tokens until the input is exhausted and never fails
/// mid-stream; lexical problems come out as in-band [`Token::Error`]
/// values. See [`interpreter::lexer::lex`].
pub fn lex(source: &str) -> impl Iterator<Item = Token> + '_ {
    interpreter::lexer::lex(source)
}

/// Parses a source string into its top-level block.
///
/// # Errors
/// Returns a [`ParseError`] when the source fails to lex or parse.
///
/// # Example
/// ```
/// use luna::parse;
///
/// assert!(parse("local x = 1 return x").is_ok());
/// assert!(parse("while true do").is_err());
/// ```
pub fn parse(source: &str) -> Result<Block, ParseError> {
    Parser::new(interpreter::lexer::lex(source)).parse()
}

/// Evaluates a source string end to end: lex, parse, and run against a
/// fresh root scope with the built-ins installed.
///
/// # Returns
/// The value of the program's top-level `return`, or [`Value::Nil`] when
/// execution falls off the end.
///
/// # Errors
/// Returns an [`Error`] wrapping the parse or runtime failure.
///
/// # Example
/// ```
/// use luna::{Value, evaluate};
///
/// let result = evaluate("return 2 + 3 * 4").unwrap();
/// assert_eq!(result, Value::Number(14.0));
///
/// assert!(evaluate("return 1 + true").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Value, Error> {
    let block = parse(source)?;
    Ok(interpreter::evaluator::core::eval_program(&block)?)
}
