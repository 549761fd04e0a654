//! Recursive descent markup parser.
//!
//! Parses markup text into a list of top-level [`Element`]s. Uses the
//! logos-based tokenizer from [`crate::markup::tokenizer`].

use std::fmt;

use crate::markup::tokenizer::{tokenize, Lexeme, Token};

/// Errors from markup parsing. Positions are byte offsets into the input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedClose { expected: String, found: String },
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// One parsed element: tag name, attributes in document order, children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an attribute (builder pattern).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add a child element (builder pattern).
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Value of the first attribute called `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// `tag#id` if the element has an id, otherwise just the tag.
    pub fn describe(&self) -> String {
        match self.attr("id") {
            Some(id) if !id.is_empty() => format!("{}#{}", self.name, id),
            _ => self.name.clone(),
        }
    }
}

/// Serializes back to markup: two-space indentation, double-quoted escaped
/// attributes, self-closing tags for elements without children.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

impl Element {
    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(f, "{indent}<{}", self.name)?;
        for (k, v) in &self.attributes {
            write!(f, " {k}=\"{}\"", escape(v))?;
        }
        if self.children.is_empty() {
            return writeln!(f, "/>");
        }
        writeln!(f, ">")?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        writeln!(f, "{indent}</{}>", self.name)
    }
}

// ---------------------------------------------------------------------------
// Pre-processing
// ---------------------------------------------------------------------------

/// Blank out comments, the prolog and `<!...>` declarations, byte for byte,
/// so token positions still match the original input.
fn strip_noise(input: &str) -> Result<String, ParseError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    loop {
        let Some(start) = rest.find("<!").into_iter().chain(rest.find("<?")).min() else {
            out.push_str(rest);
            return Ok(out);
        };
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let (terminator, what) = if tail.starts_with("<!--") {
            ("-->", "comment")
        } else if tail.starts_with("<?") {
            ("?>", "processing instruction")
        } else {
            (">", "declaration")
        };
        let Some(end) = tail[2..].find(terminator) else {
            return Err(ParseError::UnexpectedEof(format!("unterminated {what}")));
        };
        let len = 2 + end + terminator.len();
        out.extend(std::iter::repeat(' ').take(len));
        rest = &tail[len..];
    }
}

/// Decode the predefined entities and numeric character references.
/// Unknown entities are kept verbatim.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').and_then(|semi| {
            let entity = &tail[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| entity.strip_prefix('#').map(str::parse::<u32>))
                    .and_then(Result::ok)
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse markup into its top-level elements, in document order. Text outside
/// elements is ignored; an input with no elements yields an empty list.
pub fn parse_elements(input: &str) -> Result<Vec<Element>, ParseError> {
    let cleaned = strip_noise(input)?;
    let tokens = tokenize(&cleaned);
    let mut parser = Parser { tokens, cursor: 0 };

    let mut elements = Vec::new();
    while let Some(tok) = parser.peek() {
        match tok.token {
            Token::Open => elements.push(parser.parse_element()?),
            Token::CloseOpen => {
                let position = tok.position;
                return Err(ParseError::UnexpectedToken {
                    position,
                    message: "closing tag without an open element".into(),
                });
            }
            _ => parser.cursor += 1,
        }
    }
    Ok(elements)
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<Lexeme>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Lexeme> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&Lexeme> {
        let tok = self.tokens.get(self.cursor);
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<Lexeme, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == expected => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.position,
                message: format!("expected {what}, found `{}`", tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {what}"))),
        }
    }

    fn parse_element(&mut self) -> Result<Element, ParseError> {
        self.expect(Token::Open, "`<`")?;
        let name = self.expect(Token::Name, "element name")?.text;
        let mut element = Element::new(name);

        // Attributes, up to `>` or `/>`.
        loop {
            let Some(tok) = self.peek() else {
                return Err(ParseError::UnexpectedEof(format!(
                    "unterminated tag <{}>",
                    element.name
                )));
            };
            match tok.token {
                Token::SelfClose => {
                    self.cursor += 1;
                    return Ok(element);
                }
                Token::Close => {
                    self.cursor += 1;
                    break;
                }
                Token::Name => {
                    let key = tok.text.clone();
                    self.cursor += 1;
                    self.expect(Token::Equals, "`=`")?;
                    let value = self.parse_value()?;
                    element.attributes.push((key, value));
                }
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        position: tok.position,
                        message: format!("unexpected `{}` in tag <{}>", tok.text, element.name),
                    })
                }
            }
        }

        // Content, up to the matching close tag.
        loop {
            let Some(tok) = self.peek() else {
                return Err(ParseError::UnexpectedEof(format!(
                    "unclosed element <{}>",
                    element.name
                )));
            };
            match tok.token {
                Token::Open => element.children.push(self.parse_element()?),
                Token::CloseOpen => {
                    self.cursor += 1;
                    let found = self.expect(Token::Name, "closing tag name")?.text;
                    if found != element.name {
                        return Err(ParseError::MismatchedClose {
                            expected: element.name,
                            found,
                        });
                    }
                    self.expect(Token::Close, "`>`")?;
                    return Ok(element);
                }
                // Text content.
                _ => self.cursor += 1,
            }
        }
    }

    fn parse_value(&mut self) -> Result<String, ParseError> {
        match self.advance() {
            Some(tok) if matches!(tok.token, Token::DoubleQuoted | Token::SingleQuoted) => {
                let inner = &tok.text[1..tok.text.len() - 1];
                Ok(unescape(inner))
            }
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.position,
                message: format!("expected quoted attribute value, found `{}`", tok.text),
            }),
            None => Err(ParseError::UnexpectedEof("expected attribute value".into())),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
