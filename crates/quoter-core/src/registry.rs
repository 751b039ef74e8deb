use std::collections::{BTreeMap, HashMap};

use quoter_syntax::trivia::TRIVIA_CONSTANTS;
use quoter_syntax::{factories, FactoryDescriptor, SyntaxTrivia, SyntaxType};

/// Convenience factories that only delegate to other factories; quoting
/// through them would hide the structure they build.
const DELEGATING: &[&str] = &["InvocationStatement", "NumericLiteralExpression"];

/// Immutable index over the construction API.
///
/// Built once and shared by reference between the quoter, the interpreter and
/// the redundancy eliminator.
#[derive(Debug, Clone)]
pub struct Registry {
    by_type: BTreeMap<SyntaxType, Vec<&'static FactoryDescriptor>>,
    by_name: HashMap<&'static str, Vec<&'static FactoryDescriptor>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::from_factories(factories())
    }

    pub fn from_factories(descriptors: &'static [FactoryDescriptor]) -> Self {
        let mut by_type: BTreeMap<SyntaxType, Vec<_>> = BTreeMap::new();
        let mut by_name: HashMap<_, Vec<_>> = HashMap::new();
        for descriptor in descriptors {
            if descriptor.deprecated || DELEGATING.contains(&descriptor.name) {
                continue;
            }
            by_name.entry(descriptor.name).or_default().push(descriptor);
            if let Some(ty) = descriptor.node_type() {
                by_type.entry(ty).or_default().push(descriptor);
            }
        }
        tracing::debug!(
            "registry indexed {} node classes and {} factory names",
            by_type.len(),
            by_name.len()
        );
        Self { by_type, by_name }
    }

    /// Node factories producing `ty`, in declaration order.
    pub fn for_type(&self, ty: SyntaxType) -> &[&'static FactoryDescriptor] {
        self.by_type.get(&ty).map_or(&[], Vec::as_slice)
    }

    /// Every overload named `name`, in declaration order.
    pub fn by_name(&self, name: &str) -> &[&'static FactoryDescriptor] {
        self.by_name.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn constant(&self, name: &str) -> Option<SyntaxTrivia> {
        SyntaxTrivia::constant(name)
    }

    pub fn constant_names(&self) -> impl Iterator<Item = &'static str> {
        TRIVIA_CONSTANTS.iter().map(|(name, _, _)| *name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_excludes_deprecated_and_delegating() {
        let registry = Registry::new();
        assert!(registry.by_name("InvocationStatement").is_empty());
        assert!(registry.by_name("NumericLiteralExpression").is_empty());
        assert!(registry
            .for_type(SyntaxType::IdentifierName)
            .iter()
            .all(|descriptor| !descriptor.deprecated));
        assert!(registry
            .for_type(SyntaxType::LiteralExpression)
            .iter()
            .all(|descriptor| descriptor.name == "LiteralExpression"));
    }

    #[test]
    fn test_keeps_declaration_order() {
        let registry = Registry::new();
        let arities: Vec<_> = registry
            .for_type(SyntaxType::ClassDeclaration)
            .iter()
            .map(|descriptor| descriptor.params.len())
            .collect();
        assert_eq!(arities.first(), Some(&1));
        assert_eq!(registry.by_name("Literal").len(), 12);
    }

    #[test]
    fn test_every_concrete_class_has_a_factory() {
        let registry = Registry::new();
        let missing: Vec<_> = <SyntaxType as strum::IntoEnumIterator>::iter()
            .filter(|ty| !ty.is_abstract())
            .filter(|ty| registry.for_type(*ty).is_empty())
            .collect();
        assert_eq!(missing, vec![]);
    }

    #[test]
    fn test_constants_resolve() {
        let registry = Registry::new();
        for name in registry.constant_names() {
            let trivia = registry.constant(name).expect("constant");
            assert_eq!(trivia.constant_name(), Some(name));
        }
        assert!(registry.constant("Nothing").is_none());
    }
}
