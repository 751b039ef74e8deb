//! Evaluates a generated program against the construction API.
//!
//! Overloads are resolved the way the target language would: the first
//! registered overload whose parameters accept the arguments wins.

mod resolve;

use std::sync::Arc;

use itertools::Itertools;
use quoter_syntax::{ParamType, SyntaxNode, Value};
use tracing::trace;

use crate::error::{QuoterError, Result};
use crate::expr::{Array, Call, Expr, Invocation, Literal, Member};
use crate::registry::Registry;

/// An evaluated argument. Literals stay unconverted until a parameter type asks for them.
#[derive(Debug, Clone)]
pub(crate) enum Arg<'e> {
    Literal(&'e Literal),
    Value(Value),
}

impl Arg<'_> {
    fn type_name(&self) -> String {
        match self {
            Arg::Literal(literal) => resolve::literal_type_name(literal),
            Arg::Value(value) => value.type_name(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'r> {
    registry: &'r Registry,
}

impl<'r> Interpreter<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(literal) => resolve::literal_value(literal),
            Expr::Member(member) => self.member(member),
            Expr::Call(call) => self.call(call),
            Expr::Array(array) => self.array(array),
        }
    }

    /// Evaluates `expr` and insists on a node result.
    pub fn evaluate_node(&self, expr: &Expr) -> Result<Arc<SyntaxNode>> {
        match self.evaluate(expr)? {
            Value::Node(node) => Ok(node),
            other => Err(QuoterError::NotANode {
                method: "evaluate_node".to_string(),
                found: other.type_name(),
            }),
        }
    }

    pub fn call(&self, call: &Call) -> Result<Value> {
        let mut value = self.invoke_factory(&call.head)?;
        for method in &call.chain {
            value = self.invoke_method(value, method)?;
        }
        Ok(value)
    }

    fn member(&self, member: &Member) -> Result<Value> {
        match member {
            Member::Kind(kind) => Ok(Value::Kind(*kind)),
            Member::Constant(name) => self
                .registry
                .constant(name)
                .map(Value::Trivia)
                .ok_or_else(|| QuoterError::UnknownMember(name.clone())),
        }
    }

    fn array(&self, array: &Array) -> Result<Value> {
        array
            .items
            .iter()
            .map(|item| self.evaluate(item))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn arguments<'e>(&self, invocation: &'e Invocation) -> Result<Vec<Arg<'e>>> {
        invocation
            .args
            .iter()
            .map(|expr| match expr {
                Expr::Literal(literal) => Ok(Arg::Literal(literal)),
                other => self.evaluate(other).map(Arg::Value),
            })
            .collect()
    }

    fn invoke_factory(&self, invocation: &Invocation) -> Result<Value> {
        let candidates = self.registry.by_name(&invocation.name);
        if candidates.is_empty() {
            return Err(QuoterError::UnknownFactory(invocation.name.clone()));
        }
        let args = self.arguments(invocation)?;
        let type_argument = invocation.type_argument;
        for descriptor in candidates {
            if descriptor.generic != type_argument.is_some() {
                continue;
            }
            if let Some(values) = resolve::bind(descriptor.params, &args, type_argument) {
                trace!("{} resolved to {}", invocation.name, descriptor.signature());
                return Ok(descriptor.invoke(&values, type_argument)?);
            }
        }
        let name = match type_argument {
            Some(ty) => format!("{}<{}>", invocation.name, ty.type_name()),
            None => invocation.name.clone(),
        };
        Err(resolution_error(name, &args))
    }

    /// Instance methods: `With<Property>(value)` and `NormalizeWhitespace()`.
    fn invoke_method(&self, target: Value, invocation: &Invocation) -> Result<Value> {
        let node = match target {
            Value::Node(node) => node,
            other => {
                return Err(QuoterError::NotANode {
                    method: invocation.name.clone(),
                    found: other.type_name(),
                })
            }
        };
        let args = self.arguments(invocation)?;
        let ty = node.syntax_type();
        let call = format!("{}.{}", ty.type_name(), invocation.name);
        if invocation.name == "NormalizeWhitespace" {
            if !args.is_empty() {
                return Err(resolution_error(call, &args));
            }
            return Ok(Value::Node(Arc::new(node.normalize_whitespace())));
        }

        let property = invocation
            .name
            .strip_prefix("With")
            .and_then(|property| ty.property(property));
        let (Some((_, def)), [arg]) = (property, args.as_slice()) else {
            return Err(resolution_error(call, &args));
        };
        let Some(value) = resolve::coerce(&ParamType::for_shape(&def.shape), arg, None) else {
            return Err(resolution_error(call, &args));
        };
        Ok(Value::Node(Arc::new(node.with_value(def.name, &value)?)))
    }
}

fn resolution_error(call: String, args: &[Arg<'_>]) -> QuoterError {
    QuoterError::Resolution {
        call,
        arguments: args.iter().map(Arg::type_name).join(", "),
    }
}
