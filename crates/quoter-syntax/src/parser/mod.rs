//! Recursive-descent parser with error recovery.
//!
//! The parser never fails outright: tokens it expected but did not find are
//! synthesised as missing tokens, and tokens it cannot place are kept as
//! skipped-tokens trivia on the next token it consumes.

mod expressions;
mod items;
mod statements;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::kind::SyntaxKind;
use crate::lexer::lex;
use crate::node::{NodeOrToken, Slot, SyntaxNode};
use crate::token::SyntaxToken;
use crate::trivia::SyntaxTrivia;
use crate::types::SyntaxType;

/// What the input text is expected to be.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ParseContext {
    #[default]
    Unit,
    Member,
    Statement,
    Expression,
}

/// Parses `text` as the given construct. `None` when the text cannot start one.
pub fn parse(text: &str, context: ParseContext) -> Option<SyntaxNode> {
    let mut parser = Parser::new(text);
    let node = match context {
        ParseContext::Unit => return Some(parser.compilation_unit()),
        ParseContext::Member => {
            if !parser.starts_member() {
                return None;
            }
            parser.member()
        }
        ParseContext::Statement => parser.statement(),
        ParseContext::Expression => parser.expression(),
    };
    Some(parser.finish_fragment(&node))
}

pub fn parse_compilation_unit(text: &str) -> SyntaxNode {
    Parser::new(text).compilation_unit()
}

pub(crate) struct Parser {
    tokens: Vec<SyntaxToken>,
    pos: usize,
    skipped: Vec<SyntaxToken>,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            tokens: lex(text),
            pos: 0,
            skipped: Vec::new(),
        }
    }

    fn peek(&self) -> SyntaxKind {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + offset)
            .map_or(SyntaxKind::EndOfFileToken, SyntaxToken::kind)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == kind
    }

    fn at_end(&self) -> bool {
        self.at(SyntaxKind::EndOfFileToken)
    }

    /// Consumes the current token. The end-of-file token is never stepped past.
    fn bump(&mut self) -> SyntaxToken {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .unwrap_or_else(|| SyntaxToken::missing(SyntaxKind::EndOfFileToken));
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        self.attach_skipped(token)
    }

    fn expect(&mut self, kind: SyntaxKind) -> SyntaxToken {
        if self.at(kind) {
            self.bump()
        } else {
            SyntaxToken::missing(kind)
        }
    }

    /// An optional token: consumed when present, absent otherwise.
    fn accept(&mut self, kind: SyntaxKind) -> SyntaxToken {
        if self.at(kind) {
            self.bump()
        } else {
            SyntaxToken::none()
        }
    }

    fn skip(&mut self) {
        if self.at_end() {
            return;
        }
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        tracing::trace!(kind = %token.kind(), "skipping token");
        self.skipped.push(token);
    }

    fn take_skipped(&mut self) -> Option<SyntaxTrivia> {
        if self.skipped.is_empty() {
            return None;
        }
        let tokens = std::mem::take(&mut self.skipped);
        let node = SyntaxNode::assemble(
            SyntaxType::SkippedTokensTrivia,
            SyntaxKind::SkippedTokensTrivia,
            vec![Slot::TokenList(tokens)],
        );
        Some(SyntaxTrivia::structured(Arc::new(node)))
    }

    fn attach_skipped(&mut self, token: SyntaxToken) -> SyntaxToken {
        match self.take_skipped() {
            Some(skipped) => {
                let mut leading = vec![skipped];
                leading.extend(token.leading().iter().cloned());
                token.with_leading(leading)
            }
            None => token,
        }
    }

    /// Hangs whatever follows a fragment onto the fragment's last token, so the
    /// fragment still renders the whole input.
    fn finish_fragment(&mut self, node: &SyntaxNode) -> SyntaxNode {
        while !self.at_end() {
            self.skip();
        }
        let mut extra: Vec<SyntaxTrivia> = self.take_skipped().into_iter().collect();
        if let Some(eof) = self.tokens.last() {
            extra.extend(eof.leading().iter().cloned());
        }
        if extra.is_empty() {
            return node.clone();
        }
        node.map_last_token(|token| {
            let mut trailing = token.trailing().to_vec();
            trailing.extend(extra);
            token.clone().with_trailing(trailing)
        })
    }
}

fn make(ty: SyntaxType, kind: SyntaxKind, slots: Vec<Slot>) -> Arc<SyntaxNode> {
    Arc::new(SyntaxNode::assemble(ty, kind, slots))
}

fn token(token: SyntaxToken) -> Slot {
    Slot::Token(token)
}

fn child(node: Arc<SyntaxNode>) -> Slot {
    Slot::Node(Some(node))
}

fn separated(items: Vec<NodeOrToken>) -> Slot {
    Slot::Separated(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCES: &[&str] = &[
        "using System;\nusing static System.Math;\nusing IO = System.IO;\n",
        "namespace N.M\n{\n    public class C : B, I\n    {\n        int x = 1, y;\n    }\n}\n",
        "class C { void M(int a, string b) { if (a < 2) return; else { M(a - 1, b); } } }",
        "class C { int F() { int x = -a + b * (c - 1); x += 2; while (!done) x = new T(x); return x.Y.Z(1, \"s\"); } }",
        "class",
        "class C { $ int x }",
        "// leading\nclass C { } // trailing\n",
    ];

    #[test]
    fn test_unit_renders_full_input() {
        for source in SOURCES {
            let unit = parse_compilation_unit(source);
            assert_eq!(&unit.to_full_string(), source);
        }
    }

    #[test]
    fn test_missing_tokens_for_incomplete_class() {
        let unit = parse_compilation_unit("class");
        let class = unit.tokens();
        let missing: Vec<_> = class
            .iter()
            .filter(|t| t.is_missing())
            .map(|t| t.kind())
            .collect();
        assert_eq!(
            missing,
            vec![
                SyntaxKind::IdentifierToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
            ]
        );
        assert!(unit.contains_diagnostics());
    }

    #[test]
    fn test_fragments_render_full_input() {
        let cases = [
            ("int x;  // c\n", ParseContext::Member),
            ("x = y + 1; junk", ParseContext::Statement),
            ("a.b(c)  ", ParseContext::Expression),
        ];
        for (source, context) in cases {
            let node = parse(source, context).expect("fragment");
            assert_eq!(node.to_full_string(), source);
        }
    }

    #[test]
    fn test_member_context_rejects_non_members() {
        assert_eq!(parse("using System;", ParseContext::Member), None);
        assert_eq!(parse("", ParseContext::Member), None);
    }

    #[test]
    fn test_precedence() {
        let node = parse("a + b * c", ParseContext::Expression).expect("expression");
        assert_eq!(node.kind(), SyntaxKind::AddExpression);
        let node = parse("a = b = c || d", ParseContext::Expression).expect("expression");
        assert_eq!(node.kind(), SyntaxKind::SimpleAssignmentExpression);
    }

    #[test]
    fn test_parse_context_from_str() {
        assert_eq!("statement".parse::<ParseContext>(), Ok(ParseContext::Statement));
        assert_eq!("Unit".parse::<ParseContext>(), Ok(ParseContext::Unit));
    }
}
