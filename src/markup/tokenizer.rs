//! logos-based markup tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `</` as [`Token::CloseOpen`] beats `<` as [`Token::Open`])
//! 2. For equal length matches, earlier-defined variants win
//!
//! Comments, the prolog and declarations are removed before tokenizing, so
//! the token set only has to describe tags. Quoted values may not contain
//! `<`, which keeps a stray apostrophe in text content from swallowing the
//! next tag.

use logos::Logos;

/// Markup token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Tag delimiters ───────────────────────────────────────────────

    /// `</` starting a closing tag.
    #[token("</")]
    CloseOpen,

    /// `/>` ending a self-closing tag.
    #[token("/>")]
    SelfClose,

    /// `<`
    #[token("<")]
    Open,

    /// `>`
    #[token(">")]
    Close,

    /// `=`
    #[token("=")]
    Equals,

    // ── Values ───────────────────────────────────────────────────────

    /// Double-quoted attribute value.
    #[regex(r#""[^"<]*""#)]
    DoubleQuoted,

    /// Single-quoted attribute value.
    #[regex(r"'[^'<]*'")]
    SingleQuoted,

    /// Element or attribute name.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.:-]*")]
    Name,
}

/// A token, the source text it matched and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub text: String,
    pub position: usize,
}

/// Tokenize input. Unrecognized input (text content such as digits or
/// punctuation) is dropped.
pub fn tokenize(input: &str) -> Vec<Lexeme> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| {
            let token = result.ok()?;
            Some(Lexeme {
                token,
                text: input[span.clone()].to_string(),
                position: span.start,
            })
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
