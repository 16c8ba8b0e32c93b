/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of
/// source code: unexpected or invalid tokens, missing delimiters and
/// keywords, and malformed assignment targets.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a program:
/// operator type errors, arithmetic errors, unresolved gotos, vararg misuse,
/// and assertion failures.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error an end-to-end evaluation can produce.
///
/// Wraps the two phase-specific error types so callers of
/// [`evaluate`](crate::evaluate) deal with a single type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The source failed to lex or parse.
    Parse(ParseError),
    /// The program raised an error while running.
    Runtime(RuntimeError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Runtime(e) => write!(f, "runtime error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}
