//! Logos-based lexer.
//!
//! Trivia (whitespace, comments, preprocessor lines) is skipped entirely:
//! the parser only needs token ranges, never the text between them.

use logos::{FilterResult, Logos};

use crate::base::{TextRange, TextSize};

/// A token with its kind, text, and range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub kind: Token,
    pub text: &'a str,
    pub range: TextRange,
}

/// Tokenize `input`.
///
/// Returns the offset of the first byte the lexer cannot match (an
/// unterminated string, a stray character) as the error.
pub fn tokenize(input: &str) -> Result<Vec<Lexeme<'_>>, TextSize> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        let span = lexer.span();
        let range = TextRange::new(
            TextSize::from(span.start as u32),
            TextSize::from(span.end as u32),
        );
        match token {
            Ok(kind) => tokens.push(Lexeme {
                kind,
                text: lexer.slice(),
                range,
            }),
            Err(()) => return Err(range.start()),
        }
    }
    Ok(tokens)
}

/// `/*` opens a block comment that runs to the next `*/`. Skipped as trivia;
/// an unclosed comment is an error at its opening.
fn block_comment(lex: &mut logos::Lexer<'_, Token>) -> FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => FilterResult::Error(()),
    }
}

/// `"""` opens a verbatim string that runs to the next `"""`.
fn verbatim_string(lex: &mut logos::Lexer<'_, Token>) -> bool {
    match lex.remainder().find("\"\"\"") {
        Some(end) => {
            lex.bump(end + 3);
            true
        }
        None => false,
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    // =========================================================================
    // KEYWORDS (only the ones the grammar dispatches on)
    // =========================================================================
    #[token("namespace")]
    Namespace,
    #[token("using")]
    Using,
    #[token("class")]
    Class,
    #[token("interface")]
    Interface,
    #[token("struct")]
    Struct,
    #[token("enum")]
    Enum,
    #[token("errordomain")]
    ErrorDomain,
    #[token("delegate")]
    Delegate,
    #[token("signal")]
    Signal,
    #[token("foreach")]
    Foreach,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("catch")]
    Catch,
    #[token("construct")]
    Construct,
    #[token("new")]
    New,
    #[token("throws")]
    Throws,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Comment trivia. Never produced: the callback always skips or fails.
    #[token("/*", block_comment)]
    BlockComment,

    /// `@` escapes a keyword used as an identifier.
    #[regex(r"@?[\p{XID_Start}_][\p{XID_Continue}]*")]
    Ident,

    #[regex(r"[0-9][0-9A-Za-z_]*(\.[0-9][0-9A-Za-z_]*)?")]
    Number,

    /// Plain or `@"..."` template string.
    #[regex(r#"@?"([^"\\\n]|\\.)*""#)]
    Str,

    #[token("\"\"\"", verbatim_string)]
    VerbatimStr,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    Char,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    /// Also the generic-argument opener; never merged into `<<` or `<=`.
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("~")]
    Tilde,

    /// Every other operator. Statement bodies are opaque, so the parser
    /// never needs to tell them apart.
    #[regex(r"[+\-/%&|^!$\\]")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("&&")]
    #[token("||")]
    #[token("++")]
    #[token("--")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("=>")]
    #[token("->")]
    #[token("??")]
    Op,
}
