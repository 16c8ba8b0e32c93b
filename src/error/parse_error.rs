#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing a token stream.
pub enum ParseError {
    /// Found a token that no grammar rule accepts at this position.
    UnexpectedToken {
        /// The lexeme of the offending token.
        token: String,
    },
    /// Reached the end of input in the middle of a construct.
    UnexpectedEndOfInput,
    /// A required token or keyword was not found.
    Missing {
        /// A description of what was expected, e.g. `'end' keyword`.
        expected: &'static str,
    },
    /// The left-hand side of an assignment was not a name, index, or member
    /// access.
    InvalidAssignmentTarget,
    /// The scanner produced an error token (unterminated string or comment,
    /// malformed number, unrecognized byte).
    InvalidToken {
        /// The lexeme covered by the error token.
        lexeme: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token } => write!(f, "unexpected token '{token}'"),
            Self::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            Self::Missing { expected } => write!(f, "missing {expected}"),
            Self::InvalidAssignmentTarget => {
                write!(f, "cannot assign to this expression")
            },
            Self::InvalidToken { lexeme } => write!(f, "invalid token '{lexeme}'"),
        }
    }
}

impl std::error::Error for ParseError {}
