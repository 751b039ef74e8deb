use std::fmt;

use crate::kind::SyntaxKind;
use crate::literal;
use crate::trivia::SyntaxTrivia;

/// Parsed value carried by literal tokens, kept apart from the raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Str(String),
    Int(i64),
    Double(f64),
    Char(char),
}

impl TokenValue {
    /// Text the construction API would produce for this value.
    pub fn canonical_text(&self) -> Option<String> {
        match self {
            TokenValue::None => None,
            TokenValue::Str(value) => Some(literal::render_string(value)),
            TokenValue::Int(value) => Some(literal::render_int(*value)),
            TokenValue::Double(value) => Some(literal::render_double(*value)),
            TokenValue::Char(value) => Some(literal::render_char(*value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxToken {
    kind: SyntaxKind,
    text: String,
    value: TokenValue,
    leading: Vec<SyntaxTrivia>,
    trailing: Vec<SyntaxTrivia>,
    missing: bool,
}

impl SyntaxToken {
    /// The absent token. Renders as nothing and is never quoted.
    pub fn none() -> Self {
        Self::raw(SyntaxKind::None, String::new(), TokenValue::None, false)
    }

    /// A fixed token with its canonical text.
    pub fn new(kind: SyntaxKind) -> Self {
        let text = kind.text().unwrap_or_default().to_string();
        Self::raw(kind, text, TokenValue::None, false)
    }

    /// A token the parser expected but did not find.
    pub fn missing(kind: SyntaxKind) -> Self {
        Self::raw(kind, String::new(), TokenValue::None, true)
    }

    pub fn identifier(text: impl Into<String>) -> Self {
        let text = text.into();
        let value = TokenValue::Str(text.clone());
        Self::raw(SyntaxKind::IdentifierToken, text, value, false)
    }

    pub fn literal(kind: SyntaxKind, text: impl Into<String>, value: TokenValue) -> Self {
        Self::raw(kind, text.into(), value, false)
    }

    pub fn bad(text: impl Into<String>) -> Self {
        Self::raw(SyntaxKind::BadToken, text.into(), TokenValue::None, false)
    }

    fn raw(kind: SyntaxKind, text: String, value: TokenValue, missing: bool) -> Self {
        Self {
            kind,
            text,
            value,
            leading: Vec::new(),
            trailing: Vec::new(),
            missing,
        }
    }

    pub fn with_leading(mut self, leading: Vec<SyntaxTrivia>) -> Self {
        self.leading = leading;
        self
    }

    pub fn with_trailing(mut self, trailing: Vec<SyntaxTrivia>) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    pub fn leading(&self) -> &[SyntaxTrivia] {
        &self.leading
    }

    pub fn trailing(&self) -> &[SyntaxTrivia] {
        &self.trailing
    }

    pub fn is_missing(&self) -> bool {
        self.missing
    }

    pub fn is_none(&self) -> bool {
        self.kind == SyntaxKind::None
    }

    pub fn full_width(&self) -> usize {
        self.leading.iter().map(SyntaxTrivia::full_width).sum::<usize>()
            + self.text.len()
            + self.trailing.iter().map(SyntaxTrivia::full_width).sum::<usize>()
    }

    pub fn write_full(&self, out: &mut String) {
        for trivia in &self.leading {
            trivia.write_full(out);
        }
        out.push_str(&self.text);
        for trivia in &self.trailing {
            trivia.write_full(out);
        }
    }

    pub fn to_full_string(&self) -> String {
        let mut out = String::new();
        self.write_full(&mut out);
        out
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_full_string())
    }
}
