use std::sync::Arc;

use crate::kind::SyntaxKind;
use crate::node::SyntaxNode;

/// Named trivia the construction API exposes as constants.
pub const TRIVIA_CONSTANTS: &[(&str, SyntaxKind, &str)] = &[
    ("Space", SyntaxKind::WhitespaceTrivia, " "),
    ("Tab", SyntaxKind::WhitespaceTrivia, "\t"),
    ("LineFeed", SyntaxKind::EndOfLineTrivia, "\n"),
    ("CarriageReturn", SyntaxKind::EndOfLineTrivia, "\r"),
    ("CarriageReturnLineFeed", SyntaxKind::EndOfLineTrivia, "\r\n"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTrivia {
    kind: SyntaxKind,
    text: String,
    structure: Option<Arc<SyntaxNode>>,
}

impl SyntaxTrivia {
    pub fn new(kind: SyntaxKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            structure: None,
        }
    }

    /// Trivia backed by a node; its text is the node's full text.
    pub fn structured(node: impl Into<Arc<SyntaxNode>>) -> Self {
        let node = node.into();
        Self {
            kind: node.kind(),
            text: String::new(),
            structure: Some(node),
        }
    }

    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::new(SyntaxKind::WhitespaceTrivia, text)
    }

    pub fn end_of_line(text: impl Into<String>) -> Self {
        Self::new(SyntaxKind::EndOfLineTrivia, text)
    }

    /// Picks the comment kind from the text's opening delimiter.
    pub fn comment(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = if text.starts_with("/*") {
            SyntaxKind::MultiLineCommentTrivia
        } else {
            SyntaxKind::SingleLineCommentTrivia
        };
        Self::new(kind, text)
    }

    pub fn preprocessing_message(text: impl Into<String>) -> Self {
        Self::new(SyntaxKind::PreprocessingMessageTrivia, text)
    }

    pub fn constant(name: &str) -> Option<Self> {
        TRIVIA_CONSTANTS
            .iter()
            .find(|(constant, _, _)| *constant == name)
            .map(|(_, kind, text)| Self::new(*kind, *text))
    }

    /// Name of the constant this trivia equals, if any.
    pub fn constant_name(&self) -> Option<&'static str> {
        if self.structure.is_some() {
            return None;
        }
        TRIVIA_CONSTANTS
            .iter()
            .find(|(_, kind, text)| *kind == self.kind && *text == self.text)
            .map(|(name, _, _)| *name)
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn structure(&self) -> Option<&Arc<SyntaxNode>> {
        self.structure.as_ref()
    }

    pub fn is_layout(&self) -> bool {
        matches!(
            self.kind,
            SyntaxKind::WhitespaceTrivia | SyntaxKind::EndOfLineTrivia
        )
    }

    pub fn full_width(&self) -> usize {
        match &self.structure {
            Some(node) => node.full_width(),
            None => self.text.len(),
        }
    }

    pub fn write_full(&self, out: &mut String) {
        match &self.structure {
            Some(node) => node.write_full(out),
            None => out.push_str(&self.text),
        }
    }

    pub fn to_full_string(&self) -> String {
        let mut out = String::new();
        self.write_full(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_resolve_and_match() {
        let space = SyntaxTrivia::constant("Space").expect("Space");
        assert_eq!(space.constant_name(), Some("Space"));
        assert_eq!(SyntaxTrivia::whitespace("  ").constant_name(), None);
        assert_eq!(
            SyntaxTrivia::end_of_line("\r\n").constant_name(),
            Some("CarriageReturnLineFeed")
        );
        assert!(SyntaxTrivia::constant("Nope").is_none());
    }

    #[test]
    fn test_comment_kind_from_text() {
        assert_eq!(
            SyntaxTrivia::comment("/* a */").kind(),
            SyntaxKind::MultiLineCommentTrivia
        );
        assert_eq!(
            SyntaxTrivia::comment("// a").kind(),
            SyntaxKind::SingleLineCommentTrivia
        );
    }
}
