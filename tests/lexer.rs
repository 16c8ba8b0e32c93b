use luna::{Token, lex};

fn tokens(source: &str) -> Vec<Token> {
    lex(source).collect()
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(tokens("local x = while_not_a_keyword"),
               vec![Token::Local,
                    Token::Identifier("x".to_string()),
                    Token::Assign,
                    Token::Identifier("while_not_a_keyword".to_string())]);
    assert_eq!(tokens("and or not"),
               vec![Token::And, Token::Or, Token::Not]);
    assert_eq!(tokens("_private _0"),
               vec![Token::Identifier("_private".to_string()),
                    Token::Identifier("_0".to_string())]);
}

#[test]
fn numbers() {
    assert_eq!(tokens("42"), vec![Token::Number(42.0)]);
    assert_eq!(tokens("3.25"), vec![Token::Number(3.25)]);
    assert_eq!(tokens(".5"), vec![Token::Number(0.5)]);
    assert_eq!(tokens("0x10"), vec![Token::Number(16.0)]);
    assert_eq!(tokens("0xff"), vec![Token::Number(255.0)]);
    assert_eq!(tokens("0x1.8"), vec![Token::Number(1.5)]);
}

#[test]
fn malformed_number_is_an_error_token() {
    assert_eq!(tokens("1.2.3"),
               vec![Token::Error("1.2.3".to_string())]);
}

#[test]
fn strings_and_escapes() {
    assert_eq!(tokens("\"hello\""),
               vec![Token::Str("hello".to_string())]);
    assert_eq!(tokens("'single'"),
               vec![Token::Str("single".to_string())]);
    assert_eq!(tokens(r#""a\tb\n""#),
               vec![Token::Str("a\tb\n".to_string())]);
    assert_eq!(tokens(r#""quote: \" done""#),
               vec![Token::Str("quote: \" done".to_string())]);
    assert_eq!(tokens(r"'it\'s'"),
               vec![Token::Str("it's".to_string())]);
}

#[test]
fn unterminated_string_is_an_error_token() {
    let result = tokens("\"abc");
    assert!(result.iter().any(|t| matches!(t, Token::Error(_))),
            "expected an error token, got {result:?}");

    let with_newline = tokens("\"abc\ndef\"");
    assert!(with_newline.iter().any(|t| matches!(t, Token::Error(_))),
            "expected an error token, got {with_newline:?}");
}

#[test]
fn comments_are_skipped() {
    assert_eq!(tokens("1 -- a line comment\n2"),
               vec![Token::Number(1.0), Token::Number(2.0)]);
    assert_eq!(tokens("--[[ a long\ncomment ]] 3"),
               vec![Token::Number(3.0)]);
    assert_eq!(tokens("--[==[ contains ]] and ]=] ]==] 4"),
               vec![Token::Number(4.0)]);
    assert_eq!(tokens("-- only a comment"), vec![]);
}

#[test]
fn unterminated_long_comment_is_an_error_token() {
    let result = tokens("--[[ never closed");
    assert!(matches!(result.as_slice(), [Token::Error(_)]),
            "expected a single error token, got {result:?}");
}

#[test]
fn multi_character_operators_match_greedily() {
    assert_eq!(tokens("== ~= >= <= << >> // .. ... ::"),
               vec![Token::EqualEqual,
                    Token::NotEqual,
                    Token::GreaterEqual,
                    Token::LessEqual,
                    Token::ShiftLeft,
                    Token::ShiftRight,
                    Token::DoubleSlash,
                    Token::DotDot,
                    Token::Ellipsis,
                    Token::DoubleColon]);
    assert_eq!(tokens("a.b..c"),
               vec![Token::Identifier("a".to_string()),
                    Token::Dot,
                    Token::Identifier("b".to_string()),
                    Token::DotDot,
                    Token::Identifier("c".to_string())]);
    assert_eq!(tokens("~ ~="), vec![Token::Tilde, Token::NotEqual]);
    assert_eq!(tokens("- --x\n-"), vec![Token::Minus, Token::Minus]);
}

#[test]
fn single_character_operators() {
    assert_eq!(tokens("+ - * / % ^ # & | ~"),
               vec![Token::Plus,
                    Token::Minus,
                    Token::Star,
                    Token::Slash,
                    Token::Percent,
                    Token::Caret,
                    Token::Hash,
                    Token::Ampersand,
                    Token::Pipe,
                    Token::Tilde]);
    assert_eq!(tokens("( ) { } [ ] ; , . : ="),
               vec![Token::LParen,
                    Token::RParen,
                    Token::LBrace,
                    Token::RBrace,
                    Token::LBracket,
                    Token::RBracket,
                    Token::SemiColon,
                    Token::Comma,
                    Token::Dot,
                    Token::Colon,
                    Token::Assign]);
}

#[test]
fn unrecognized_byte_is_an_error_token() {
    assert_eq!(tokens("@"), vec![Token::Error("@".to_string())]);
    let mixed = tokens("x @ y");
    assert_eq!(mixed,
               vec![Token::Identifier("x".to_string()),
                    Token::Error("@".to_string()),
                    Token::Identifier("y".to_string())]);
}

#[test]
fn rendered_tokens_relex_to_the_same_stream() {
    let original = tokens("local x = 1 + 2 while x < 10 do x = x * 2 end return x");
    let rendered = original.iter()
                           .map(ToString::to_string)
                           .collect::<Vec<_>>()
                           .join(" ");
    assert_eq!(tokens(&rendered), original);
}
