use std::sync::Arc;

use super::{Args, Value};
use crate::error::{Result, SyntaxError};
use crate::kind::SyntaxKind;
use crate::node::{Slot, SyntaxNode};
use crate::schema::PropertyShape;
use crate::token::SyntaxToken;
use crate::types::SyntaxType;

pub(super) fn node(ty: SyntaxType, args: &Args<'_>) -> Result<Value> {
    let kind = if args.has("kind") {
        args.kind("kind")?
    } else {
        ty.default_kind().ok_or_else(|| {
            SyntaxError::InvalidArgument(format!("{} needs an explicit kind", ty.type_name()))
        })?
    };
    if kind.syntax_type() != Some(ty) {
        return Err(SyntaxError::KindMismatch { kind, ty });
    }

    let mut node = SyntaxNode::new(kind)?;
    for (param, value) in args.iter() {
        // null leaves the property at its default
        if param.name == "kind" || *value == Value::Null {
            continue;
        }
        node = node.with_value(param.property(), value)?;
    }
    Ok(Value::Node(Arc::new(node)))
}

impl SyntaxNode {
    /// Replaces the named property with a factory value, converting it the
    /// way a factory argument for that property would be converted.
    pub fn with_value(&self, property: &str, value: &Value) -> Result<SyntaxNode> {
        let ty = self.syntax_type();
        let (_, def) = ty
            .property(property)
            .ok_or_else(|| SyntaxError::UnknownProperty {
                ty,
                name: property.to_string(),
            })?;
        let slot = to_slot(ty, def.name, &def.shape, value)?;
        self.with_slot(def.name, slot)
    }
}

pub(crate) fn identifier_name(text: &str) -> SyntaxNode {
    SyntaxNode::assemble(
        SyntaxType::IdentifierName,
        SyntaxKind::IdentifierName,
        vec![Slot::Token(SyntaxToken::identifier(text))],
    )
}

/// Converts a factory argument into the slot of the property it fills.
fn to_slot(ty: SyntaxType, name: &'static str, shape: &PropertyShape, value: &Value) -> Result<Slot> {
    let mismatch = || SyntaxError::ShapeMismatch {
        ty,
        name,
        found: value.type_name(),
    };
    let slot = match (shape, value) {
        (_, Value::Node(node)) => Slot::Node(Some(node.clone())),
        (_, Value::Token(token)) => Slot::Token(token.clone()),
        // a plain string names an identifier
        (PropertyShape::Token(_), Value::Str(text)) => Slot::Token(SyntaxToken::identifier(text.as_str())),
        (PropertyShape::Node { .. }, Value::Str(text)) => {
            Slot::Node(Some(Arc::new(identifier_name(text))))
        }
        (_, Value::TokenList(tokens)) => Slot::TokenList(tokens.clone()),
        (_, Value::NodeList(nodes)) => Slot::List(nodes.clone()),
        (_, Value::SeparatedList(items)) => Slot::Separated(items.clone()),
        (_, Value::Bool(flag)) => Slot::Bool(*flag),
        (PropertyShape::List(_), Value::Array(items)) => Slot::List(
            items
                .iter()
                .map(|item| item.as_node().cloned().ok_or_else(mismatch))
                .collect::<Result<_>>()?,
        ),
        (PropertyShape::TokenList, Value::Array(items)) => Slot::TokenList(
            items
                .iter()
                .map(|item| match item {
                    Value::Token(token) => Ok(token.clone()),
                    _ => Err(mismatch()),
                })
                .collect::<Result<_>>()?,
        ),
        _ => return Err(mismatch()),
    };
    Ok(slot)
}
