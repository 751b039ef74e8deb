//! Canonical layout: every whitespace and end-of-line trivia is discarded and
//! recomputed from the token sequence alone. Comments, directives and skipped
//! tokens survive, each placed on a line of its own unless it trails a token.

use std::sync::Arc;

use crate::kind::SyntaxKind;
use crate::node::{NodeOrToken, Slot, SyntaxNode};
use crate::token::SyntaxToken;
use crate::trivia::SyntaxTrivia;
use crate::types::SyntaxType;

const INDENT: &str = "    ";
const NEW_LINE: &str = "\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    None,
    Space,
    Line,
}

impl SyntaxNode {
    /// Re-lays the node out canonically. Missing tokens stay invisible.
    pub fn normalize_whitespace(&self) -> SyntaxNode {
        let mut tokens = Vec::new();
        collect(self, &mut tokens);
        let visible: Vec<usize> = (0..tokens.len())
            .filter(|&index| !tokens[index].0.is_missing())
            .collect();

        let mut plans = vec![(Vec::new(), Vec::new()); tokens.len()];
        let mut depth = 0usize;
        let mut line_start = true;
        for (position, &index) in visible.iter().enumerate() {
            let (token, prefix) = tokens[index];
            let next = visible.get(position + 1).map(|&next| tokens[next].0);
            if token.kind() == SyntaxKind::CloseBraceToken {
                depth = depth.saturating_sub(1);
            }

            let mut leading = Vec::new();
            for trivia in preserved(token.leading()) {
                push_on_own_line(&mut leading, trivia, depth);
            }
            if line_start && depth > 0 && token.kind() != SyntaxKind::EndOfFileToken {
                leading.push(indentation(depth));
            }
            if token.kind() == SyntaxKind::OpenBraceToken {
                depth += 1;
            }

            let mut trailing = Vec::new();
            let mut line_open = true;
            let mut has_trailing = false;
            for trivia in preserved(token.trailing()) {
                has_trailing = true;
                if trivia.kind().is_comment_trivia() {
                    trailing.push(SyntaxTrivia::whitespace(" "));
                    trailing.push(trivia.clone());
                    line_open = true;
                } else {
                    if line_open {
                        trailing.push(SyntaxTrivia::end_of_line(NEW_LINE));
                    }
                    push_on_own_line(&mut trailing, trivia, depth);
                    line_open = false;
                }
            }

            let separator = match next {
                Some(next) => separator(token, prefix, next, has_trailing),
                None => Separator::None,
            };
            match separator {
                Separator::None => {}
                Separator::Space => trailing.push(SyntaxTrivia::whitespace(" ")),
                Separator::Line if line_open => trailing.push(SyntaxTrivia::end_of_line(NEW_LINE)),
                Separator::Line => {}
            }
            line_start = separator == Separator::Line || !line_open;
            plans[index] = (leading, trailing);
        }

        let mut plans = plans.into_iter();
        self.map_tokens(&mut |token| {
            let (leading, trailing) = plans.next().unwrap_or_default();
            token.clone().with_leading(leading).with_trailing(trailing)
        })
    }
}

/// Present tokens in source order, each flagged when it is a prefix operator.
fn collect<'a>(node: &'a SyntaxNode, out: &mut Vec<(&'a SyntaxToken, bool)>) {
    let prefix = node.syntax_type() == SyntaxType::PrefixUnaryExpression;
    for (def, slot) in node.slots() {
        match slot {
            Slot::Node(Some(child)) => collect(child, out),
            Slot::Token(token) if !token.is_none() => {
                out.push((token, prefix && def.name == "OperatorToken"))
            }
            Slot::TokenList(tokens) => {
                out.extend(tokens.iter().filter(|t| !t.is_none()).map(|t| (t, false)))
            }
            Slot::List(nodes) => nodes.iter().for_each(|child| collect(child, out)),
            Slot::Separated(items) => {
                for item in items {
                    match item {
                        NodeOrToken::Node(child) => collect(child, out),
                        NodeOrToken::Token(token) => out.push((token, false)),
                    }
                }
            }
            Slot::Node(None) | Slot::Token(_) | Slot::Bool(_) => {}
        }
    }
}

fn preserved(trivia: &[SyntaxTrivia]) -> impl Iterator<Item = &SyntaxTrivia> {
    trivia.iter().filter(|trivia| !trivia.is_layout())
}

fn indentation(depth: usize) -> SyntaxTrivia {
    SyntaxTrivia::whitespace(INDENT.repeat(depth))
}

fn push_on_own_line(out: &mut Vec<SyntaxTrivia>, trivia: &SyntaxTrivia, depth: usize) {
    match trivia.structure() {
        Some(node) if node.syntax_type().is_directive() => {
            out.push(SyntaxTrivia::structured(Arc::new(normalize_directive(node))));
        }
        Some(node) => {
            if depth > 0 {
                out.push(indentation(depth));
            }
            out.push(SyntaxTrivia::structured(Arc::new(normalize_skipped(node))));
            out.push(SyntaxTrivia::end_of_line(NEW_LINE));
        }
        None => {
            if depth > 0 {
                out.push(indentation(depth));
            }
            out.push(trivia.clone());
            out.push(SyntaxTrivia::end_of_line(NEW_LINE));
        }
    }
}

/// `#region message` followed by a line break.
fn normalize_directive(node: &SyntaxNode) -> SyntaxNode {
    node.map_tokens(&mut |token| {
        if token.kind() != SyntaxKind::EndOfDirectiveToken {
            return token.clone().with_leading(Vec::new()).with_trailing(Vec::new());
        }
        let message: Vec<_> = token
            .leading()
            .iter()
            .filter(|trivia| trivia.kind() == SyntaxKind::PreprocessingMessageTrivia)
            .cloned()
            .collect();
        let leading = if message.is_empty() {
            message
        } else {
            std::iter::once(SyntaxTrivia::whitespace(" "))
                .chain(message)
                .collect()
        };
        token
            .clone()
            .with_leading(leading)
            .with_trailing(vec![SyntaxTrivia::end_of_line(NEW_LINE)])
    })
}

/// Skipped tokens lose their own trivia and are joined by single spaces.
fn normalize_skipped(node: &SyntaxNode) -> SyntaxNode {
    let count = node.tokens().len();
    let mut seen = 0;
    node.map_tokens(&mut |token| {
        seen += 1;
        let trailing = if seen < count {
            vec![SyntaxTrivia::whitespace(" ")]
        } else {
            Vec::new()
        };
        token.clone().with_leading(Vec::new()).with_trailing(trailing)
    })
}

fn separator(token: &SyntaxToken, prefix: bool, next: &SyntaxToken, has_trailing: bool) -> Separator {
    use SyntaxKind::*;
    let next_has_leading = preserved(next.leading()).next().is_some();
    if next.kind() == EndOfFileToken {
        return if next_has_leading {
            Separator::Line
        } else {
            Separator::None
        };
    }
    if has_trailing || next_has_leading {
        return Separator::Line;
    }

    let (current, next) = (token.kind(), next.kind());
    match current {
        SemicolonToken | OpenBraceToken => return Separator::Line,
        CloseBraceToken if matches!(next, SemicolonToken | CommaToken | CloseParenToken) => {
            return Separator::None
        }
        CloseBraceToken => return Separator::Line,
        _ => {}
    }
    if matches!(next, OpenBraceToken | CloseBraceToken) {
        return Separator::Line;
    }
    if prefix
        || matches!(next, SemicolonToken | CommaToken | CloseParenToken | DotToken)
        || matches!(current, OpenParenToken | DotToken | HashToken)
    {
        return Separator::None;
    }
    if next == OpenParenToken {
        let spaced = current.is_keyword() || (current.is_punctuation() && current != CloseParenToken);
        return if spaced {
            Separator::Space
        } else {
            Separator::None
        };
    }
    Separator::Space
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, parse_compilation_unit, ParseContext};
    use pretty_assertions::assert_eq;

    fn normalized(source: &str) -> String {
        parse_compilation_unit(source)
            .normalize_whitespace()
            .to_full_string()
    }

    #[test]
    fn test_class_layout() {
        assert_eq!(
            normalized("class C{int x=1;void M(int a){if(a<2)return;M(-a);}}"),
            "class C\n{\n    int x = 1;\n    void M(int a)\n    {\n        if (a < 2) return;\n        M(-a);\n    }\n}"
        );
    }

    #[test]
    fn test_using_and_namespace() {
        assert_eq!(
            normalized("using   System;using IO=System.IO;\nnamespace N{}"),
            "using System;\nusing IO = System.IO;\nnamespace N\n{\n}"
        );
    }

    #[test]
    fn test_comments_are_kept() {
        assert_eq!(
            normalized("// head\nclass C { // open\n int x; /* tail */ }"),
            "// head\nclass C\n{ // open\n    int x; /* tail */\n}"
        );
    }

    #[test]
    fn test_region_directive() {
        assert_eq!(
            normalized("class C {\n#region   Fields\nint x;\n#endregion\n}"),
            "class C\n{\n#region Fields\n    int x;\n#endregion\n}"
        );
    }

    #[test]
    fn test_missing_tokens_stay_invisible() {
        assert_eq!(normalized("class"), "class");
        let statement = parse("x = 1", ParseContext::Statement).expect("statement");
        assert_eq!(statement.normalize_whitespace().to_full_string(), "x = 1");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let sources = [
            "class C { $ int x }",
            "namespace A.B { class C : D, E { void M() { while (!x) { x = new T(1, \"s\").Y; } } } } // end",
            "#region R\nusing X;\n#endregion\n",
        ];
        for source in sources {
            let once = parse_compilation_unit(source).normalize_whitespace();
            let twice = once.normalize_whitespace();
            assert_eq!(twice.to_full_string(), once.to_full_string());
        }
    }
}
