use logos::{FilterResult, Logos};

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Whitespace and comments are consumed internally and never reach the
/// parser; lexical problems surface as in-band [`Token::Error`] values.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14`, `.5` or `0x1F`.
    /// Every number is a 64-bit float.
    #[regex(r"[0-9]+(\.[0-9]*)?", parse_decimal)]
    #[regex(r"\.[0-9]+", parse_decimal)]
    #[regex(r"0[xX][0-9a-fA-F]+(\.[0-9a-fA-F]*)?", parse_hex)]
    Number(f64),
    /// String literal tokens with their escapes already processed.
    /// A literal newline inside the quotes fails the match.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, unescape)]
    #[regex(r"'([^'\\\n]|\\[^\n])*'", unescape)]
    Str(String),
    /// Identifier tokens: names of variables, functions, and labels.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// A lexically malformed span, such as a number with two decimal
    /// points. Also produced by [`lex`] for unterminated strings and
    /// comments and for unrecognized bytes.
    #[regex(r"[0-9]+\.[0-9]*\.[0-9.]*", |lex| lex.slice().to_string())]
    Error(String),
    /// A comment. Consumed by the scanner, never emitted.
    #[token("--", lex_comment)]
    Comment,

    /// `and`
    #[token("and")]
    And,
    /// `break`
    #[token("break")]
    Break,
    /// `do`
    #[token("do")]
    Do,
    /// `else`
    #[token("else")]
    Else,
    /// `elseif`
    #[token("elseif")]
    ElseIf,
    /// `end`
    #[token("end")]
    End,
    /// `false`
    #[token("false")]
    False,
    /// `for`
    #[token("for")]
    For,
    /// `function`
    #[token("function")]
    Function,
    /// `goto`
    #[token("goto")]
    Goto,
    /// `if`
    #[token("if")]
    If,
    /// `in`
    #[token("in")]
    In,
    /// `local`
    #[token("local")]
    Local,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `not`
    #[token("not")]
    Not,
    /// `or`
    #[token("or")]
    Or,
    /// `repeat`
    #[token("repeat")]
    Repeat,
    /// `return`
    #[token("return")]
    Return,
    /// `then`
    #[token("then")]
    Then,
    /// `true`
    #[token("true")]
    True,
    /// `until`
    #[token("until")]
    Until,
    /// `while`
    #[token("while")]
    While,

    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `//`
    #[token("//")]
    DoubleSlash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `#`
    #[token("#")]
    Hash,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `~`
    #[token("~")]
    Tilde,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `~=`
    #[token("~=")]
    NotEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `<`
    #[token("<")]
    Less,
    /// `=`
    #[token("=")]
    Assign,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `::`
    #[token("::")]
    DoubleColon,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    SemiColon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `..`
    #[token("..")]
    DotDot,
    /// `...`
    #[token("...")]
    Ellipsis,
}

/// Tokenizes a source string.
///
/// The returned iterator yields tokens until the input is exhausted; it
/// never fails mid-stream. Spans the scanner cannot recognize (unterminated
/// strings or long comments, stray bytes) come out as [`Token::Error`]
/// values carrying the offending lexeme, and the parser rejects them with
/// context.
///
/// # Parameters
/// - `source`: The source text. UTF-8 is accepted, but only ASCII is
///   lexically significant.
///
/// # Returns
/// An iterator over the tokens of `source`.
///
/// # Example
/// ```
/// use luna::interpreter::lexer::{Token, lex};
///
/// let tokens: Vec<Token> = lex("x = 1").collect();
///
/// assert_eq!(tokens,
///            vec![Token::Identifier("x".to_string()),
///                 Token::Assign,
///                 Token::Number(1.0)]);
/// ```
pub fn lex(source: &str) -> impl Iterator<Item = Token> + '_ {
    let mut lexer = Token::lexer(source);
    std::iter::from_fn(move || {
        Some(match lexer.next()? {
            Ok(token) => token,
            Err(()) => Token::Error(lexer.slice().to_string()),
        })
    })
}

/// Parses a decimal literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value if the slice is a valid float.
/// - `None`: If the slice does not parse, which surfaces as an error token.
fn parse_decimal(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses a `0x`-prefixed hexadecimal literal, with an optional fractional
/// part, from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// The value of the literal as a 64-bit float.
fn parse_hex(lex: &logos::Lexer<Token>) -> Option<f64> {
    let digits = &lex.slice()[2..];
    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (digits, ""),
    };

    let mut value = 0.0;
    for c in whole.chars() {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }
    let mut weight = 1.0 / 16.0;
    for c in frac.chars() {
        value += f64::from(c.to_digit(16)?) * weight;
        weight /= 16.0;
    }
    Some(value)
}

/// Strips the quotes from a string literal and processes its backslash
/// escapes (`\n \t \r \0 \\ \" \'`). An unknown escape passes the escaped
/// character through unchanged.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// The processed string contents.
fn unescape(lex: &logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            other => out.push(other),
        }
    }
    Some(out)
}

/// Consumes a comment after its introducing `--`.
///
/// A `[` followed by `n` equals signs and another `[` opens a long comment
/// that runs to the matching `]={n}]`; anything else is a line comment that
/// runs to the end of the line. Complete comments are skipped silently; an
/// unterminated long comment becomes an error token covering the rest of
/// the input.
fn lex_comment(lex: &mut logos::Lexer<Token>) -> FilterResult<(), ()> {
    let remainder = lex.remainder();

    if let Some(rest) = remainder.strip_prefix('[') {
        let level = rest.chars().take_while(|&c| c == '=').count();
        if rest[level..].starts_with('[') {
            let open_len = level + 2;
            let closing = format!("]{}]", "=".repeat(level));
            return match remainder[open_len..].find(&closing) {
                Some(at) => {
                    lex.bump(open_len + at + closing.len());
                    FilterResult::Skip
                },
                None => {
                    lex.bump(remainder.len());
                    FilterResult::Error(())
                },
            };
        }
    }

    match remainder.find('\n') {
        Some(at) => lex.bump(at + 1),
        None => lex.bump(remainder.len()),
    }
    FilterResult::Skip
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{n:.0}")
                } else {
                    write!(f, "{n}")
                }
            },
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Error(lexeme) => write!(f, "{lexeme}"),
            Self::Comment => write!(f, "comment"),
            Self::And => write!(f, "and"),
            Self::Break => write!(f, "break"),
            Self::Do => write!(f, "do"),
            Self::Else => write!(f, "else"),
            Self::ElseIf => write!(f, "elseif"),
            Self::End => write!(f, "end"),
            Self::False => write!(f, "false"),
            Self::For => write!(f, "for"),
            Self::Function => write!(f, "function"),
            Self::Goto => write!(f, "goto"),
            Self::If => write!(f, "if"),
            Self::In => write!(f, "in"),
            Self::Local => write!(f, "local"),
            Self::Nil => write!(f, "nil"),
            Self::Not => write!(f, "not"),
            Self::Or => write!(f, "or"),
            Self::Repeat => write!(f, "repeat"),
            Self::Return => write!(f, "return"),
            Self::Then => write!(f, "then"),
            Self::True => write!(f, "true"),
            Self::Until => write!(f, "until"),
            Self::While => write!(f, "while"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::DoubleSlash => write!(f, "//"),
            Self::Percent => write!(f, "%"),
            Self::Caret => write!(f, "^"),
            Self::Hash => write!(f, "#"),
            Self::Ampersand => write!(f, "&"),
            Self::Pipe => write!(f, "|"),
            Self::Tilde => write!(f, "~"),
            Self::ShiftLeft => write!(f, "<<"),
            Self::ShiftRight => write!(f, ">>"),
            Self::EqualEqual => write!(f, "=="),
            Self::NotEqual => write!(f, "~="),
            Self::GreaterEqual => write!(f, ">="),
            Self::LessEqual => write!(f, "<="),
            Self::Greater => write!(f, ">"),
            Self::Less => write!(f, "<"),
            Self::Assign => write!(f, "="),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::DoubleColon => write!(f, "::"),
            Self::Colon => write!(f, ":"),
            Self::SemiColon => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::DotDot => write!(f, ".."),
            Self::Ellipsis => write!(f, "..."),
        }
    }
}
