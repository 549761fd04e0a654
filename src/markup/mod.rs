//! Markup reader: a small XML subset for declarative UI documents.
//!
//! - [`tokenizer`]: logos-based tokenizer for tags, attributes and text
//! - [`parser`]: recursive descent parser producing an [`Element`] tree
//!
//! Supported: an optional `<?xml ...?>` prolog, `<!-- -->` comments,
//! `<!DOCTYPE ...>`-style declarations (skipped), elements with single or
//! double quoted attributes, self-closing tags and the five predefined
//! entities plus numeric character references. Text content is ignored.

pub mod parser;
pub mod tokenizer;

pub use parser::{parse_elements, Element, ParseError};
pub use tokenizer::{tokenize, Lexeme, Token};
