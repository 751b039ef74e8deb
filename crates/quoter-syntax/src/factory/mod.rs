//! The construction API: a table of factory overloads, each described as data
//! so that callers can select overloads by parameter shape and invoke them by name.

mod build;
mod surface;

use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use crate::error::{Result, SyntaxError};
use crate::kind::SyntaxKind;
use crate::node::{NodeOrToken, SyntaxNode};
use crate::schema::PropertyShape;
use crate::token::SyntaxToken;
use crate::trivia::SyntaxTrivia;
use crate::types::SyntaxType;

pub use surface::factories;

/// A runtime value flowing into or out of a factory.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Node(Arc<SyntaxNode>),
    Token(SyntaxToken),
    Trivia(SyntaxTrivia),
    NodeList(Vec<Arc<SyntaxNode>>),
    SeparatedList(Vec<NodeOrToken>),
    TokenList(Vec<SyntaxToken>),
    TriviaList(Vec<SyntaxTrivia>),
    Array(Vec<Value>),
    Kind(SyntaxKind),
    Str(String),
    Int(i64),
    Double(f64),
    Char(char),
    Bool(bool),
    Null,
}

impl Value {
    /// Name of the value's type, as it would appear in a signature.
    pub fn type_name(&self) -> String {
        match self {
            Value::Node(node) => node.syntax_type().type_name(),
            Value::Token(_) => "SyntaxToken".to_string(),
            Value::Trivia(_) => "SyntaxTrivia".to_string(),
            Value::NodeList(_) => "SyntaxList".to_string(),
            Value::SeparatedList(_) => "SeparatedSyntaxList".to_string(),
            Value::TokenList(_) => "SyntaxTokenList".to_string(),
            Value::TriviaList(_) => "SyntaxTriviaList".to_string(),
            Value::Array(items) => match items.first() {
                Some(first) => format!("{}[]", first.type_name()),
                None => "[]".to_string(),
            },
            Value::Kind(_) => "SyntaxKind".to_string(),
            Value::Str(_) => "string".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Double(_) => "double".to_string(),
            Value::Char(_) => "char".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Null => "null".to_string(),
        }
    }

    pub fn as_node(&self) -> Option<&Arc<SyntaxNode>> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// Element type of a list parameter: a concrete class or the call's type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Class(SyntaxType),
    Generic,
}

impl Element {
    fn resolve(self, type_argument: Option<SyntaxType>) -> Option<SyntaxType> {
        match self {
            Element::Class(class) => Some(class),
            Element::Generic => type_argument,
        }
    }

    fn type_name(self) -> String {
        match self {
            Element::Class(class) => class.type_name(),
            Element::Generic => "TNode".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Node(SyntaxType),
    /// A node of the call's type argument.
    Generic,
    Token,
    TokenList,
    Trivia,
    TriviaList,
    List(Element),
    SeparatedList(Element),
    NodeOrToken,
    String,
    Int,
    Double,
    Char,
    Bool,
    Kind,
    Array(&'static ParamType),
}

impl ParamType {
    pub fn type_name(&self) -> String {
        match self {
            ParamType::Node(class) => class.type_name(),
            ParamType::Generic => "TNode".to_string(),
            ParamType::Token => "SyntaxToken".to_string(),
            ParamType::TokenList => "SyntaxTokenList".to_string(),
            ParamType::Trivia => "SyntaxTrivia".to_string(),
            ParamType::TriviaList => "SyntaxTriviaList".to_string(),
            ParamType::List(element) => format!("SyntaxList<{}>", element.type_name()),
            ParamType::SeparatedList(element) => {
                format!("SeparatedSyntaxList<{}>", element.type_name())
            }
            ParamType::NodeOrToken => "SyntaxNodeOrToken".to_string(),
            ParamType::String => "string".to_string(),
            ParamType::Int => "int".to_string(),
            ParamType::Double => "double".to_string(),
            ParamType::Char => "char".to_string(),
            ParamType::Bool => "bool".to_string(),
            ParamType::Kind => "SyntaxKind".to_string(),
            ParamType::Array(inner) => format!("{}[]", inner.type_name()),
        }
    }

    /// Parameter type of the single-argument modifier for a property.
    pub fn for_shape(shape: &PropertyShape) -> ParamType {
        match shape {
            PropertyShape::Node { class, .. } => ParamType::Node(*class),
            PropertyShape::Token(_) => ParamType::Token,
            PropertyShape::TokenList => ParamType::TokenList,
            PropertyShape::List(class) => ParamType::List(Element::Class(*class)),
            PropertyShape::SeparatedList(class) => ParamType::SeparatedList(Element::Class(*class)),
            PropertyShape::Bool => ParamType::Bool,
        }
    }

    /// Reference-typed parameters accept `null`; the rest only their default.
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            ParamType::Node(_) | ParamType::Generic | ParamType::String | ParamType::Array(_)
        )
    }

    /// The value `default(T)` produces for this parameter type.
    pub fn default_value(&self) -> Value {
        match self {
            ParamType::Token => Value::Token(SyntaxToken::none()),
            ParamType::TokenList => Value::TokenList(Vec::new()),
            ParamType::TriviaList => Value::TriviaList(Vec::new()),
            ParamType::List(_) => Value::NodeList(Vec::new()),
            ParamType::SeparatedList(_) => Value::SeparatedList(Vec::new()),
            ParamType::Int => Value::Int(0),
            ParamType::Double => Value::Double(0.0),
            ParamType::Char => Value::Char('\0'),
            ParamType::Bool => Value::Bool(false),
            ParamType::Kind => Value::Kind(SyntaxKind::None),
            ParamType::Trivia => Value::Trivia(SyntaxTrivia::new(SyntaxKind::None, "")),
            ParamType::Node(_)
            | ParamType::Generic
            | ParamType::NodeOrToken
            | ParamType::String
            | ParamType::Array(_) => Value::Null,
        }
    }

    /// Converts `value` to this parameter type, or `None` when it does not fit.
    pub fn coerce(&self, value: &Value, type_argument: Option<SyntaxType>) -> Option<Value> {
        let fits = match (self, value) {
            (ty, Value::Null) => ty.is_nullable(),
            (ParamType::Node(class), Value::Node(node)) => fits_class(Some(*class), node),
            (ParamType::Generic, Value::Node(node)) => fits_class(type_argument, node),
            (ParamType::NodeOrToken, Value::Node(_) | Value::Token(_))
            | (ParamType::Token, Value::Token(_))
            | (ParamType::TokenList, Value::TokenList(_))
            | (ParamType::Trivia, Value::Trivia(_))
            | (ParamType::TriviaList, Value::TriviaList(_))
            | (ParamType::String, Value::Str(_))
            | (ParamType::Int, Value::Int(_))
            | (ParamType::Double, Value::Double(_))
            | (ParamType::Char, Value::Char(_))
            | (ParamType::Bool, Value::Bool(_))
            | (ParamType::Kind, Value::Kind(_)) => true,
            (ParamType::List(element), Value::NodeList(nodes)) => {
                let class = element.resolve(type_argument);
                nodes.iter().all(|node| fits_class(class, node))
            }
            (ParamType::SeparatedList(element), Value::SeparatedList(items)) => {
                let class = element.resolve(type_argument);
                items.iter().all(|item| match item {
                    NodeOrToken::Node(node) => fits_class(class, node),
                    NodeOrToken::Token(_) => true,
                })
            }
            (ParamType::Array(inner), Value::Array(items)) => {
                return items
                    .iter()
                    .map(|item| inner.coerce(item, type_argument))
                    .collect::<Option<Vec<_>>>()
                    .map(Value::Array);
            }
            _ => false,
        };
        fits.then(|| value.clone())
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub name: &'static str,
    pub ty: ParamType,
    pub optional: bool,
    /// A `params` array: callers may pass its elements one by one.
    pub variadic: bool,
    /// Property the parameter fills when it differs from the parameter name.
    pub binds: Option<&'static str>,
}

impl ParamDescriptor {
    /// Name of the node property this parameter fills.
    pub fn property(&self) -> &'static str {
        self.binds.unwrap_or(self.name)
    }
}

/// What a factory produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returns {
    Node(SyntaxType),
    Token,
    Trivia,
    TokenList,
    TriviaList,
    List,
    SeparatedList,
}

#[derive(Clone, Copy)]
pub(crate) enum Construct {
    /// Generic node builder: start from the defaults of the class and fill in
    /// each parameter's property.
    Node(SyntaxType),
    Call(fn(&Args<'_>) -> Result<Value>),
}

#[derive(Clone, Copy)]
pub struct FactoryDescriptor {
    pub name: &'static str,
    pub returns: Returns,
    pub params: &'static [ParamDescriptor],
    /// Takes a node type argument, as in `List<T>`.
    pub generic: bool,
    pub deprecated: bool,
    construct: Construct,
}

impl FactoryDescriptor {
    pub(crate) const fn new(
        name: &'static str,
        returns: Returns,
        params: &'static [ParamDescriptor],
        construct: Construct,
    ) -> Self {
        Self {
            name,
            returns,
            params,
            generic: false,
            deprecated: false,
            construct,
        }
    }

    pub(crate) const fn generic(self) -> Self {
        Self {
            generic: true,
            ..self
        }
    }

    pub(crate) const fn deprecated(self) -> Self {
        Self {
            deprecated: true,
            ..self
        }
    }

    /// Class of the node this factory produces, for node factories.
    pub fn node_type(&self) -> Option<SyntaxType> {
        match self.returns {
            Returns::Node(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn param(&self, name: &str) -> Option<&ParamDescriptor> {
        self.params
            .iter()
            .find(|param| param.name.eq_ignore_ascii_case(name))
    }

    /// Parameters a caller has to supply.
    pub fn required_params(&self) -> impl Iterator<Item = &ParamDescriptor> {
        self.params.iter().filter(|param| !param.optional)
    }

    pub fn signature(&self) -> String {
        let generic = if self.generic { "<TNode>" } else { "" };
        let params = self
            .params
            .iter()
            .map(|param| {
                let prefix = if param.variadic { "params " } else { "" };
                format!("{prefix}{} {}", param.ty, param.name)
            })
            .join(", ");
        format!("{}{generic}({params})", self.name)
    }

    /// Runs the factory. `args` must hold one coerced value per parameter,
    /// with a variadic parameter's elements already packed into an array.
    pub fn invoke(&self, args: &[Value], type_argument: Option<SyntaxType>) -> Result<Value> {
        if args.len() != self.params.len() {
            crate::bail!(
                "{} expects {} arguments, got {}",
                self.signature(),
                self.params.len(),
                args.len()
            );
        }
        let args = Args {
            params: self.params,
            values: args,
            type_argument,
        };
        match self.construct {
            Construct::Node(ty) => build::node(ty, &args),
            Construct::Call(call) => call(&args),
        }
    }
}

impl fmt::Debug for FactoryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryDescriptor")
            .field("signature", &self.signature())
            .field("returns", &self.returns)
            .field("deprecated", &self.deprecated)
            .finish()
    }
}

/// Arguments of one factory call, addressed by parameter name.
pub(crate) struct Args<'a> {
    params: &'static [ParamDescriptor],
    values: &'a [Value],
    type_argument: Option<SyntaxType>,
}

impl<'a> Args<'a> {
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'static ParamDescriptor, &'a Value)> {
        self.params.iter().zip(self.values.iter())
    }

    /// The named argument; `Null` when the overload has no such parameter.
    pub(crate) fn get(&self, name: &str) -> &'a Value {
        self.iter()
            .find(|(param, _)| param.name == name)
            .map_or(&Value::Null, |(_, value)| value)
    }

    pub(crate) fn has(&self, name: &str) -> bool {
        self.params.iter().any(|param| param.name == name)
    }

    pub(crate) fn type_argument(&self) -> Option<SyntaxType> {
        self.type_argument
    }

    pub(crate) fn kind(&self, name: &str) -> Result<SyntaxKind> {
        match self.get(name) {
            Value::Kind(kind) => Ok(*kind),
            other => Err(unexpected(name, "SyntaxKind", other)),
        }
    }

    pub(crate) fn text(&self, name: &str) -> Result<&'a str> {
        match self.get(name) {
            Value::Str(text) => Ok(text),
            other => Err(unexpected(name, "string", other)),
        }
    }

    pub(crate) fn node(&self, name: &str) -> Result<&'a Arc<SyntaxNode>> {
        match self.get(name) {
            Value::Node(node) => Ok(node),
            other => Err(unexpected(name, "node", other)),
        }
    }

    /// A trivia list argument; absent or null reads as empty.
    pub(crate) fn trivia_list(&self, name: &str) -> Result<Vec<SyntaxTrivia>> {
        match self.get(name) {
            Value::TriviaList(trivia) => Ok(trivia.clone()),
            Value::Null => Ok(Vec::new()),
            other => Err(unexpected(name, "SyntaxTriviaList", other)),
        }
    }
}

fn fits_class(class: Option<SyntaxType>, node: &SyntaxNode) -> bool {
    class.map_or(true, |class| class.is_assignable_from(node.syntax_type()))
}

fn unexpected(name: &str, expected: &str, found: &Value) -> SyntaxError {
    SyntaxError::InvalidArgument(format!(
        "{name} must be {expected}, found {}",
        found.type_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn find(name: &str, arity: usize) -> &'static FactoryDescriptor {
        factories()
            .iter()
            .find(|f| f.name == name && f.params.len() == arity)
            .expect("factory")
    }

    #[test]
    fn test_signature() {
        assert_eq!(
            find("ClassDeclaration", 1).signature(),
            "ClassDeclaration(string identifier)"
        );
        assert_eq!(
            find("TokenList", 1).signature(),
            "TokenList(SyntaxToken token)"
        );
    }

    #[test]
    fn test_coerce_respects_node_classes() {
        let name = Arc::new(SyntaxNode::new(SyntaxKind::IdentifierName).expect("node"));
        let value = Value::Node(name);
        assert!(ParamType::Node(SyntaxType::Expression)
            .coerce(&value, None)
            .is_some());
        assert!(ParamType::Node(SyntaxType::Statement)
            .coerce(&value, None)
            .is_none());
        assert!(ParamType::Generic
            .coerce(&value, Some(SyntaxType::Statement))
            .is_none());
        assert!(ParamType::NodeOrToken.coerce(&value, None).is_some());
        assert_eq!(ParamType::Token.coerce(&Value::Null, None), None);
        assert_eq!(
            ParamType::Node(SyntaxType::Block).coerce(&Value::Null, None),
            Some(Value::Null)
        );
    }

    #[test]
    fn test_with_value_replaces_property() -> Result<()> {
        let class = find("ClassDeclaration", 1).invoke(&[Value::Str("C".into())], None)?;
        let node = class.as_node().expect("node");
        let renamed = node.with_value("identifier", &Value::Str("D".into()))?;
        assert_eq!(renamed.to_full_string(), "classD{}");
        let err = node.with_value("Body", &Value::Null).expect_err("unknown");
        assert!(matches!(err, SyntaxError::UnknownProperty { .. }));
        Ok(())
    }

    #[test]
    fn test_invoke_checks_arity() {
        let err = find("ClassDeclaration", 1)
            .invoke(&[], None)
            .expect_err("arity");
        assert_eq!(
            err,
            SyntaxError::InvalidArgument(
                "ClassDeclaration(string identifier) expects 1 arguments, got 0".to_string()
            )
        );
    }

    #[test]
    fn test_class_declaration_from_string() -> Result<()> {
        let value = find("ClassDeclaration", 1).invoke(&[Value::Str("C".into())], None)?;
        let node = value.as_node().expect("node");
        assert_eq!(node.to_full_string(), "classC{}");
        Ok(())
    }
}
