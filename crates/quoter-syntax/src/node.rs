use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SyntaxError};
use crate::kind::SyntaxKind;
use crate::schema::{PropertyDef, PropertyShape, TokenDefault};
use crate::token::SyntaxToken;
use crate::trivia::SyntaxTrivia;
use crate::types::SyntaxType;

/// Storage for one declared property of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Node(Option<Arc<SyntaxNode>>),
    Token(SyntaxToken),
    TokenList(Vec<SyntaxToken>),
    List(Vec<Arc<SyntaxNode>>),
    Separated(Vec<NodeOrToken>),
    Bool(bool),
}

impl Slot {
    pub fn describe(&self) -> String {
        match self {
            Slot::Node(None) => "null".to_string(),
            Slot::Node(Some(node)) => node.syntax_type().type_name(),
            Slot::Token(token) => format!("token {}", token.kind()),
            Slot::TokenList(_) => "SyntaxTokenList".to_string(),
            Slot::List(_) => "SyntaxList".to_string(),
            Slot::Separated(_) => "SeparatedSyntaxList".to_string(),
            Slot::Bool(_) => "bool".to_string(),
        }
    }

    fn fits(&self, shape: &PropertyShape) -> bool {
        match (shape, self) {
            (PropertyShape::Node { class, .. }, Slot::Node(node)) => node
                .as_ref()
                .map_or(true, |node| class.is_assignable_from(node.syntax_type())),
            (PropertyShape::Token(_), Slot::Token(_)) => true,
            (PropertyShape::TokenList, Slot::TokenList(_)) => true,
            (PropertyShape::List(class), Slot::List(items)) => items
                .iter()
                .all(|node| class.is_assignable_from(node.syntax_type())),
            (PropertyShape::SeparatedList(class), Slot::Separated(items)) => {
                items.iter().all(|item| match item {
                    NodeOrToken::Node(node) => class.is_assignable_from(node.syntax_type()),
                    NodeOrToken::Token(_) => true,
                })
            }
            (PropertyShape::Bool, Slot::Bool(_)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeOrToken {
    Node(Arc<SyntaxNode>),
    Token(SyntaxToken),
}

/// A property as seen by a tree walker: structural slots first, then derived metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue<'a> {
    Slot(&'a Slot),
    Kind(SyntaxKind),
    Bool(bool),
    Str(&'static str),
    Width(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    kind: SyntaxKind,
    ty: SyntaxType,
    slots: Vec<Slot>,
}

impl SyntaxNode {
    /// A node of `kind` with every property at its default.
    pub fn new(kind: SyntaxKind) -> Result<Self> {
        let ty = kind
            .syntax_type()
            .ok_or(SyntaxError::NotANodeKind { kind })?;
        let slots = ty
            .properties()
            .iter()
            .map(|def| default_slot(kind, def))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { kind, ty, slots })
    }

    /// Builds a node from slots already in schema order.
    pub(crate) fn assemble(ty: SyntaxType, kind: SyntaxKind, slots: Vec<Slot>) -> Self {
        debug_assert_eq!(kind.syntax_type(), Some(ty));
        debug_assert_eq!(slots.len(), ty.properties().len());
        Self { kind, ty, slots }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn syntax_type(&self) -> SyntaxType {
        self.ty
    }

    pub fn schema(&self) -> &'static [PropertyDef] {
        self.ty.properties()
    }

    pub fn slots(&self) -> impl Iterator<Item = (&'static PropertyDef, &Slot)> {
        self.schema().iter().zip(self.slots.iter())
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        let (index, _) = self.ty.property(name)?;
        self.slots.get(index)
    }

    /// Returns a copy with one property replaced. Property names match case-insensitively.
    pub fn with_slot(&self, name: &str, slot: Slot) -> Result<Self> {
        let (index, def) = self
            .ty
            .property(name)
            .ok_or_else(|| SyntaxError::UnknownProperty {
                ty: self.ty,
                name: name.to_string(),
            })?;
        if !slot.fits(&def.shape) {
            return Err(SyntaxError::ShapeMismatch {
                ty: self.ty,
                name: def.name,
                found: slot.describe(),
            });
        }
        let mut node = self.clone();
        node.slots[index] = slot;
        Ok(node)
    }

    pub fn properties(&self) -> Vec<(&'static str, PropertyValue<'_>)> {
        let mut properties: Vec<_> = self
            .slots()
            .map(|(def, slot)| (def.name, PropertyValue::Slot(slot)))
            .collect();
        let tokens = self.tokens();
        properties.extend([
            ("Kind", PropertyValue::Kind(self.kind)),
            ("IsMissing", PropertyValue::Bool(self.is_missing())),
            (
                "ContainsDiagnostics",
                PropertyValue::Bool(self.contains_diagnostics()),
            ),
            (
                "ContainsDirectives",
                PropertyValue::Bool(self.contains_directives()),
            ),
            (
                "HasLeadingTrivia",
                PropertyValue::Bool(tokens.first().map_or(false, |t| !t.leading().is_empty())),
            ),
            (
                "HasTrailingTrivia",
                PropertyValue::Bool(tokens.last().map_or(false, |t| !t.trailing().is_empty())),
            ),
            ("FullWidth", PropertyValue::Width(self.full_width())),
            ("Language", PropertyValue::Str("C#")),
        ]);
        properties
    }

    /// Present tokens in source order; absent (`None`) tokens are skipped.
    pub fn tokens(&self) -> Vec<&SyntaxToken> {
        let mut tokens = Vec::new();
        self.collect_tokens(&mut tokens);
        tokens
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a SyntaxToken>) {
        for slot in &self.slots {
            match slot {
                Slot::Node(Some(node)) => node.collect_tokens(out),
                Slot::Node(None) | Slot::Bool(_) => {}
                Slot::Token(token) => {
                    if !token.is_none() {
                        out.push(token);
                    }
                }
                Slot::TokenList(tokens) => out.extend(tokens.iter().filter(|t| !t.is_none())),
                Slot::List(nodes) => nodes.iter().for_each(|node| node.collect_tokens(out)),
                Slot::Separated(items) => {
                    for item in items {
                        match item {
                            NodeOrToken::Node(node) => node.collect_tokens(out),
                            NodeOrToken::Token(token) => out.push(token),
                        }
                    }
                }
            }
        }
    }

    /// Rebuilds the tree with every present token passed through `f`, in source order.
    pub fn map_tokens(&self, f: &mut dyn FnMut(&SyntaxToken) -> SyntaxToken) -> SyntaxNode {
        let slots = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Node(node) => Slot::Node(node.as_ref().map(|n| Arc::new(n.map_tokens(f)))),
                Slot::Token(token) if token.is_none() => Slot::Token(token.clone()),
                Slot::Token(token) => Slot::Token(f(token)),
                Slot::TokenList(tokens) => Slot::TokenList(
                    tokens
                        .iter()
                        .map(|t| if t.is_none() { t.clone() } else { f(t) })
                        .collect(),
                ),
                Slot::List(nodes) => {
                    Slot::List(nodes.iter().map(|n| Arc::new(n.map_tokens(f))).collect())
                }
                Slot::Separated(items) => Slot::Separated(
                    items
                        .iter()
                        .map(|item| match item {
                            NodeOrToken::Node(n) => NodeOrToken::Node(Arc::new(n.map_tokens(f))),
                            NodeOrToken::Token(t) => NodeOrToken::Token(f(t)),
                        })
                        .collect(),
                ),
                Slot::Bool(value) => Slot::Bool(*value),
            })
            .collect();
        SyntaxNode {
            kind: self.kind,
            ty: self.ty,
            slots,
        }
    }

    /// Replaces the last present token; a node without tokens is returned unchanged.
    pub fn map_last_token(&self, f: impl FnOnce(&SyntaxToken) -> SyntaxToken) -> SyntaxNode {
        let count = self.tokens().len();
        let mut index = 0;
        let mut f = Some(f);
        self.map_tokens(&mut |token| {
            index += 1;
            match (index == count, f.take()) {
                (true, Some(f)) => f(token),
                (_, pending) => {
                    f = pending;
                    token.clone()
                }
            }
        })
    }

    pub fn is_missing(&self) -> bool {
        self.tokens().iter().all(|token| token.is_missing())
    }

    pub fn contains_diagnostics(&self) -> bool {
        self.tokens().iter().any(|token| {
            token.is_missing()
                || token.kind() == SyntaxKind::BadToken
                || trivia_of(token).any(|trivia| {
                    trivia.kind() == SyntaxKind::SkippedTokensTrivia
                        || trivia
                            .structure()
                            .map_or(false, |node| node.contains_diagnostics())
                })
        })
    }

    pub fn contains_directives(&self) -> bool {
        self.tokens().iter().any(|token| {
            trivia_of(token).any(|trivia| {
                matches!(
                    trivia.kind(),
                    SyntaxKind::RegionDirectiveTrivia | SyntaxKind::EndRegionDirectiveTrivia
                )
            })
        })
    }

    pub fn full_width(&self) -> usize {
        self.tokens().iter().map(|token| token.full_width()).sum()
    }

    pub fn write_full(&self, out: &mut String) {
        for token in self.tokens() {
            token.write_full(out);
        }
    }

    pub fn to_full_string(&self) -> String {
        let mut out = String::new();
        self.write_full(&mut out);
        out
    }

    /// Indented outline of kinds and token texts, for inspection.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        out.push_str(&format!("{}{}\n", "  ".repeat(depth), self.kind));
        for (def, slot) in self.slots() {
            let pad = "  ".repeat(depth + 1);
            match slot {
                Slot::Node(Some(node)) => node.write_outline(depth + 1, out),
                Slot::Node(None) => {}
                Slot::Token(token) if token.is_none() => {}
                Slot::Token(token) => out.push_str(&format!("{pad}{}: {}\n", def.name, describe_token(token))),
                Slot::TokenList(tokens) => {
                    for token in tokens {
                        out.push_str(&format!("{pad}{}: {}\n", def.name, describe_token(token)));
                    }
                }
                Slot::List(nodes) => nodes.iter().for_each(|n| n.write_outline(depth + 1, out)),
                Slot::Separated(items) => {
                    for item in items {
                        match item {
                            NodeOrToken::Node(n) => n.write_outline(depth + 1, out),
                            NodeOrToken::Token(t) => {
                                out.push_str(&format!("{pad}{}: {}\n", def.name, describe_token(t)))
                            }
                        }
                    }
                }
                Slot::Bool(value) => out.push_str(&format!("{pad}{}: {value}\n", def.name)),
            }
        }
    }
}

fn describe_token(token: &SyntaxToken) -> String {
    if token.is_missing() {
        format!("{} (missing)", token.kind())
    } else {
        format!("{} {:?}", token.kind(), token.text())
    }
}

fn trivia_of(token: &SyntaxToken) -> impl Iterator<Item = &SyntaxTrivia> {
    token.leading().iter().chain(token.trailing().iter())
}

fn default_slot(kind: SyntaxKind, def: &PropertyDef) -> Result<Slot> {
    let slot = match def.shape {
        PropertyShape::Node {
            default: Some(class),
            ..
        } => {
            let default_kind = class
                .default_kind()
                .ok_or(SyntaxError::NotANodeKind { kind })?;
            Slot::Node(Some(Arc::new(SyntaxNode::new(default_kind)?)))
        }
        PropertyShape::Node { .. } => Slot::Node(None),
        PropertyShape::Token(TokenDefault::Fixed(token)) => Slot::Token(SyntaxToken::new(token)),
        PropertyShape::Token(TokenDefault::FromNodeKind) => Slot::Token(
            kind.implied_token()
                .map(SyntaxToken::new)
                .unwrap_or_else(SyntaxToken::none),
        ),
        PropertyShape::Token(TokenDefault::Absent) => Slot::Token(SyntaxToken::none()),
        PropertyShape::TokenList => Slot::TokenList(Vec::new()),
        PropertyShape::List(_) => Slot::List(Vec::new()),
        PropertyShape::SeparatedList(_) => Slot::Separated(Vec::new()),
        PropertyShape::Bool => Slot::Bool(false),
    };
    Ok(slot)
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_full_string())
    }
}
