//! The generated program as a tree: factory calls, member references,
//! literals and array constructions.

use quoter_syntax::{SyntaxKind, SyntaxType};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Expr {
    Literal(Literal),
    Member(Member),
    Call(Call),
    Array(Array),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "literal", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Str(String),
    /// The platform line terminator, printed symbolically.
    LineSeparator,
    /// Numeric text as it should appear in the output.
    Number(String),
    Char(char),
    Bool(bool),
    Null,
    /// `default(T)` for the named type.
    Default(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "member", content = "name", rename_all = "snake_case")]
pub enum Member {
    Kind(SyntaxKind),
    /// A named trivia constant such as `Space`.
    Constant(String),
}

/// One invocation: a factory name, an optional type argument and the arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invocation {
    pub name: String,
    pub type_argument: Option<SyntaxType>,
    pub args: Vec<Expr>,
}

impl Invocation {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            type_argument: None,
            args,
        }
    }

    pub fn generic(name: impl Into<String>, type_argument: SyntaxType, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            type_argument: Some(type_argument),
            args,
        }
    }
}

/// A factory call followed by a chain of instance method calls on its result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    pub head: Invocation,
    pub chain: Vec<Invocation>,
}

impl Call {
    pub fn new(head: Invocation) -> Self {
        Self {
            head,
            chain: Vec::new(),
        }
    }

    /// The call with `chain` cut down to its first `len` entries.
    pub fn truncated(&self, len: usize) -> Call {
        Call {
            head: self.head.clone(),
            chain: self.chain[..len.min(self.chain.len())].to_vec(),
        }
    }

    /// The call's only argument when it is a plain `Name(arg)` without a chain.
    pub fn sole_argument(&self, name: &str) -> Option<&Expr> {
        match self.head.args.as_slice() {
            [arg] if self.head.name == name && self.chain.is_empty() => Some(arg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArrayElement {
    Node(SyntaxType),
    NodeOrToken,
    /// `new []{...}`: the element type is left to inference.
    Inferred,
}

impl ArrayElement {
    pub fn type_name(self) -> String {
        match self {
            ArrayElement::Node(ty) => ty.type_name(),
            ArrayElement::NodeOrToken => "SyntaxNodeOrToken".to_string(),
            ArrayElement::Inferred => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Array {
    pub element: ArrayElement,
    pub items: Vec<Expr>,
}

impl Expr {
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call(Call::new(Invocation::new(name, args)))
    }

    pub fn generic_call(name: impl Into<String>, type_argument: SyntaxType, args: Vec<Expr>) -> Expr {
        Expr::Call(Call::new(Invocation::generic(name, type_argument, args)))
    }

    pub fn str(text: impl Into<String>) -> Expr {
        Expr::Literal(Literal::Str(text.into()))
    }

    pub fn kind(kind: SyntaxKind) -> Expr {
        Expr::Member(Member::Kind(kind))
    }

    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Expr::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Literals and member references fit on the line of the call using them.
    pub fn is_inline(&self) -> bool {
        matches!(self, Expr::Literal(_) | Expr::Member(_))
    }

    /// Serializes the tree for tools that post-process the generated program.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of factory and method calls in the tree.
    pub fn call_count(&self) -> usize {
        match self {
            Expr::Call(call) => {
                let nested: usize = std::iter::once(&call.head)
                    .chain(&call.chain)
                    .flat_map(|invocation| &invocation.args)
                    .map(Expr::call_count)
                    .sum();
                1 + call.chain.len() + nested
            }
            Expr::Array(array) => array.items.iter().map(Expr::call_count).sum(),
            Expr::Literal(_) | Expr::Member(_) => 0,
        }
    }
}
