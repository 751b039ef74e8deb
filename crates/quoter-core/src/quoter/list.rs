use std::sync::Arc;

use quoter_syntax::{NodeOrToken, SyntaxNode, SyntaxType};

use super::Quoter;
use crate::error::Result;
use crate::expr::{Array, ArrayElement, Expr};

impl Quoter<'_> {
    pub(super) fn quote_list(&self, class: SyntaxType, nodes: &[Arc<SyntaxNode>]) -> Result<Option<Expr>> {
        let items = nodes
            .iter()
            .map(|node| self.quote_node(node).map(Expr::Call))
            .collect::<Result<Vec<_>>>()?;
        match items.len() {
            0 => Ok(None),
            1 => self.generic_factory("SingletonList", class, items).map(Some),
            _ => {
                let array = Expr::Array(Array {
                    element: ArrayElement::Node(class),
                    items,
                });
                self.generic_factory("List", class, vec![array]).map(Some)
            }
        }
    }

    pub(super) fn quote_separated(&self, class: SyntaxType, items: &[NodeOrToken]) -> Result<Option<Expr>> {
        let mut quoted = Vec::with_capacity(items.len());
        for item in items {
            match item {
                NodeOrToken::Node(node) => quoted.push(Expr::Call(self.quote_node(node)?)),
                NodeOrToken::Token(token) => quoted.extend(self.quote_token(token)?),
            }
        }
        let single_node = matches!(items, [NodeOrToken::Node(_)]);
        match quoted.len() {
            0 => Ok(None),
            1 if single_node => self
                .generic_factory("SingletonSeparatedList", class, quoted)
                .map(Some),
            _ => {
                let array = Expr::Array(Array {
                    element: ArrayElement::NodeOrToken,
                    items: quoted,
                });
                self.generic_factory("SeparatedList", class, vec![array]).map(Some)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuoterOptions;
    use crate::registry::Registry;
    use pretty_assertions::assert_eq;
    use quoter_syntax::{SyntaxKind, SyntaxToken};

    fn name(text: &str) -> Arc<SyntaxNode> {
        let node = SyntaxNode::new(SyntaxKind::IdentifierName).expect("node");
        Arc::new(
            node.with_slot("Identifier", quoter_syntax::Slot::Token(SyntaxToken::identifier(text)))
                .expect("identifier"),
        )
    }

    #[test]
    fn test_list_shapes() -> Result<()> {
        let registry = Registry::new();
        let quoter = Quoter::new(&registry, QuoterOptions::default());
        assert_eq!(quoter.quote_list(SyntaxType::Expression, &[])?, None);

        let Some(Expr::Call(single)) = quoter.quote_list(SyntaxType::Expression, &[name("a")])? else {
            panic!("call");
        };
        assert_eq!(single.head.name, "SingletonList");
        assert_eq!(single.head.type_argument, Some(SyntaxType::Expression));

        let Some(Expr::Call(many)) = quoter.quote_list(SyntaxType::Expression, &[name("a"), name("b")])? else {
            panic!("call");
        };
        assert_eq!(many.head.name, "List");
        assert!(matches!(&many.head.args[..], [Expr::Array(array)] if array.items.len() == 2));
        Ok(())
    }

    #[test]
    fn test_separated_list_keeps_separators() -> Result<()> {
        let registry = Registry::new();
        let quoter = Quoter::new(&registry, QuoterOptions::default());
        let items = [
            NodeOrToken::Node(name("a")),
            NodeOrToken::Token(SyntaxToken::new(SyntaxKind::CommaToken)),
            NodeOrToken::Node(name("b")),
        ];
        let Some(Expr::Call(list)) = quoter.quote_separated(SyntaxType::Expression, &items)? else {
            panic!("call");
        };
        assert_eq!(list.head.name, "SeparatedList");
        let [Expr::Array(array)] = &list.head.args[..] else {
            panic!("array");
        };
        assert_eq!(array.element, ArrayElement::NodeOrToken);
        assert_eq!(
            array.items[1],
            Expr::call("Token", vec![Expr::kind(SyntaxKind::CommaToken)])
        );
        Ok(())
    }
}
