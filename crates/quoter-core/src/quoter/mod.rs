//! Turns a syntax tree into the factory calls that rebuild it.
//!
//! Every node becomes one factory call chosen from the registry, with the
//! properties the call cannot take directly appended as `With...` modifiers.

mod list;
mod select;
mod token;

use quoter_syntax::{
    ParamDescriptor, ParamType, PropertyShape, PropertyValue, Slot, SyntaxNode, SyntaxType,
};
use tracing::debug;

use crate::config::QuoterOptions;
use crate::eliminate::Eliminator;
use crate::error::{unsupported_modifier, unsupported_node, QuoterError, Result};
use crate::expr::{Call, Expr, Invocation, Literal};
use crate::interpret::Interpreter;
use crate::printer::Printer;
use crate::registry::Registry;

/// Properties that describe a node rather than shape it.
const NON_STRUCTURAL: &[&str] = &[
    "ContainsDiagnostics",
    "ContainsDirectives",
    "ContainsSkippedText",
    "FullWidth",
    "FullSpan",
    "HasLeadingTrivia",
    "HasTrailingTrivia",
    "IsMissing",
    "IsStructuredTrivia",
    "Kind",
    "Language",
    "Parent",
    "Span",
    "Width",
];

/// Text returned by [`Quoter::quote_text`] when the input does not parse.
pub const PARSE_ERROR: &str = "Parse error";

/// A property value already turned into an expression, waiting to be bound.
#[derive(Debug, Clone)]
struct Quoted {
    property: &'static str,
    expr: Expr,
}

pub struct Quoter<'r> {
    registry: &'r Registry,
    options: QuoterOptions,
    interpreter: Interpreter<'r>,
}

impl<'r> Quoter<'r> {
    pub fn new(registry: &'r Registry, options: QuoterOptions) -> Self {
        Self {
            registry,
            options,
            interpreter: Interpreter::new(registry),
        }
    }

    /// The call expression that rebuilds `node`.
    pub fn quote(&self, node: &SyntaxNode) -> Result<Expr> {
        let mut call = self.quote_node(node)?;
        if self.options.use_default_formatting {
            call.chain.push(Invocation::new("NormalizeWhitespace", vec![]));
        }
        Ok(Expr::Call(call))
    }

    /// Parses, quotes and prints `text`.
    pub fn quote_text(&self, text: &str, context: quoter_syntax::ParseContext) -> Result<String> {
        let Some(node) = quoter_syntax::parse(text, context) else {
            return Ok(PARSE_ERROR.to_string());
        };
        let expr = self.quote(&node)?;
        Ok(Printer::new(&self.options).print(&expr))
    }

    fn quote_node(&self, node: &SyntaxNode) -> Result<Call> {
        let ty = node.syntax_type();
        let mut pool = Vec::new();
        if ty.takes_kind_argument() {
            pool.push(Quoted {
                property: "Kind",
                expr: Expr::kind(node.kind()),
            });
        }
        for (property, value) in node.properties() {
            if NON_STRUCTURAL.contains(&property) {
                continue;
            }
            let expr = match value {
                PropertyValue::Slot(slot) => self.quote_slot(ty, property, slot)?,
                PropertyValue::Bool(flag) => Some(Expr::Literal(Literal::Bool(flag))),
                PropertyValue::Str(text) => Some(self.string(text)),
                PropertyValue::Width(width) => Some(Expr::Literal(Literal::Number(width.to_string()))),
                PropertyValue::Kind(kind) => Some(Expr::kind(kind)),
            };
            if let Some(expr) = expr {
                pool.push(Quoted { property, expr });
            }
        }

        let descriptor = select::choose(self.registry.for_type(ty), node, &pool)
            .ok_or_else(|| unsupported_node(ty))?;
        debug!("{} quoted with {}", ty.type_name(), descriptor.signature());
        let mut call = bind(ty, descriptor.name, descriptor.params, pool)?;
        if self.options.remove_redundant_modifying_calls && !call.chain.is_empty() {
            Eliminator::new(&self.interpreter, self.options.use_default_formatting).trim(&mut call)?;
        }
        Ok(call)
    }

    fn quote_slot(&self, ty: SyntaxType, property: &'static str, slot: &Slot) -> Result<Option<Expr>> {
        let shape = ty
            .property(property)
            .map(|(_, def)| def.shape)
            .ok_or_else(|| unsupported_modifier(ty, property))?;
        match (slot, shape) {
            (Slot::Node(None), _) => Ok(None),
            (Slot::Node(Some(node)), _) => Ok(Some(Expr::Call(self.quote_node(node)?))),
            (Slot::Token(token), _) => self.quote_token(token),
            (Slot::TokenList(tokens), _) => self.quote_token_list(tokens),
            (Slot::List(nodes), PropertyShape::List(class)) => self.quote_list(class, nodes),
            (Slot::Separated(items), PropertyShape::SeparatedList(class)) => {
                self.quote_separated(class, items)
            }
            (Slot::Bool(flag), _) => Ok(Some(Expr::Literal(Literal::Bool(*flag)))),
            (slot, _) => Err(QuoterError::Generic(format!(
                "{}.{property} holds {}",
                ty.type_name(),
                slot.describe()
            ))),
        }
    }

    /// A string literal; the platform line terminator is kept symbolic.
    fn string(&self, text: &str) -> Expr {
        if text == quoter_syntax::literal::LINE_SEPARATOR {
            Expr::Literal(Literal::LineSeparator)
        } else {
            Expr::str(text)
        }
    }

    /// A call to a registered factory.
    fn factory(&self, name: &str, args: Vec<Expr>) -> Result<Expr> {
        if !self.registry.contains(name) {
            return Err(QuoterError::UnsupportedFactory(name.to_string()));
        }
        Ok(Expr::call(name, args))
    }

    fn generic_factory(&self, name: &str, class: SyntaxType, args: Vec<Expr>) -> Result<Expr> {
        if !self.registry.contains(name) {
            return Err(QuoterError::UnsupportedFactory(name.to_string()));
        }
        Ok(Expr::generic_call(name, class, args))
    }
}

/// Binds quoted values to the chosen overload's parameters by name; what is
/// left over becomes the modifier chain, in discovery order.
fn bind(ty: SyntaxType, name: &str, params: &[ParamDescriptor], pool: Vec<Quoted>) -> Result<Call> {
    let mut pool: Vec<Option<Quoted>> = pool.into_iter().map(Some).collect();
    let mut args = Vec::new();
    for param in params {
        let quoted = pool
            .iter_mut()
            .find(|quoted| {
                quoted
                    .as_ref()
                    .map_or(false, |quoted| quoted.property.eq_ignore_ascii_case(param.property()))
            })
            .and_then(Option::take);
        match quoted {
            Some(quoted) if param.variadic => args.extend(flatten(quoted.expr)),
            Some(quoted) => args.push(adapt(param, quoted.expr)),
            None if param.optional || param.variadic => {}
            None => args.push(placeholder(param)),
        }
    }

    let mut call = Call::new(Invocation::new(name, args));
    for quoted in pool.into_iter().flatten() {
        let (_, def) = ty
            .property(quoted.property)
            .ok_or_else(|| unsupported_modifier(ty, quoted.property))?;
        call.chain
            .push(Invocation::new(format!("With{}", def.name), vec![quoted.expr]));
    }
    Ok(call)
}

/// Unwraps a list construction so its elements can fill a variadic parameter.
fn flatten(expr: Expr) -> Vec<Expr> {
    let Expr::Call(call) = expr else {
        return vec![expr];
    };
    if !call.chain.is_empty() {
        return vec![Expr::Call(call)];
    }
    match call.head.name.as_str() {
        "List" => {
            if let [Expr::Array(array)] = call.head.args.as_slice() {
                return array.items.clone();
            }
            vec![Expr::Call(call)]
        }
        "SingletonList" | "TokenList" | "TriviaList" => call.head.args,
        _ => vec![Expr::Call(call)],
    }
}

/// A string parameter takes an identifier's text when the identifier has
/// nothing else to say; otherwise the token call is passed as is.
fn adapt(param: &ParamDescriptor, expr: Expr) -> Expr {
    if param.ty != ParamType::String {
        return expr;
    }
    let text = expr
        .as_call()
        .and_then(|call| call.sole_argument("Identifier"))
        .filter(|arg| matches!(arg, Expr::Literal(Literal::Str(_))))
        .cloned();
    text.unwrap_or(expr)
}

fn placeholder(param: &ParamDescriptor) -> Expr {
    if param.ty.is_nullable() {
        Expr::Literal(Literal::Null)
    } else {
        Expr::Literal(Literal::Default(param.ty.type_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quoter_syntax::{factories, SyntaxKind};

    fn descriptor(name: &str, arity: usize) -> &'static quoter_syntax::FactoryDescriptor {
        factories()
            .iter()
            .find(|f| f.name == name && f.params.len() == arity)
            .expect("factory")
    }

    #[test]
    fn test_bind_takes_identifier_text() -> Result<()> {
        let pool = vec![Quoted {
            property: "Identifier",
            expr: Expr::call("Identifier", vec![Expr::str("C")]),
        }];
        let class = descriptor("ClassDeclaration", 1);
        let call = bind(SyntaxType::ClassDeclaration, class.name, class.params, pool)?;
        assert_eq!(call.head.args, vec![Expr::str("C")]);
        assert!(call.chain.is_empty());
        Ok(())
    }

    #[test]
    fn test_bind_keeps_token_with_trivia() -> Result<()> {
        let token = Expr::call(
            "Identifier",
            vec![
                Expr::call("TriviaList", vec![]),
                Expr::str("C"),
                Expr::call("TriviaList", vec![]),
            ],
        );
        let pool = vec![Quoted {
            property: "Identifier",
            expr: token.clone(),
        }];
        let class = descriptor("ClassDeclaration", 1);
        let call = bind(SyntaxType::ClassDeclaration, class.name, class.params, pool)?;
        assert_eq!(call.head.args, vec![token]);
        Ok(())
    }

    #[test]
    fn test_leftovers_become_modifiers() -> Result<()> {
        let pool = vec![
            Quoted {
                property: "Kind",
                expr: Expr::kind(SyntaxKind::TrueLiteralExpression),
            },
            Quoted {
                property: "Token",
                expr: Expr::call("Token", vec![Expr::kind(SyntaxKind::TrueKeyword)]),
            },
        ];
        let literal = descriptor("LiteralExpression", 1);
        let call = bind(SyntaxType::LiteralExpression, literal.name, literal.params, pool)?;
        assert_eq!(call.chain.len(), 1);
        assert_eq!(call.chain[0].name, "WithToken");
        Ok(())
    }

    #[test]
    fn test_missing_required_parameters_get_placeholders() -> Result<()> {
        let binary = descriptor("BinaryExpression", 3);
        let pool = vec![Quoted {
            property: "Kind",
            expr: Expr::kind(SyntaxKind::AddExpression),
        }];
        let call = bind(SyntaxType::BinaryExpression, binary.name, binary.params, pool)?;
        assert_eq!(
            call.head.args[1..],
            [Expr::Literal(Literal::Null), Expr::Literal(Literal::Null)]
        );

        let with_token = descriptor("EmptyStatement", 1);
        let call = bind(SyntaxType::EmptyStatement, with_token.name, with_token.params, vec![])?;
        assert_eq!(
            call.head.args,
            vec![Expr::Literal(Literal::Default("SyntaxToken".into()))]
        );
        Ok(())
    }

    #[test]
    fn test_unknown_leftover_is_an_error() {
        let pool = vec![Quoted {
            property: "Body",
            expr: Expr::call("Block", vec![]),
        }];
        let empty = descriptor("EmptyStatement", 0);
        let err = bind(SyntaxType::EmptyStatement, empty.name, empty.params, pool).expect_err("no Body");
        assert!(matches!(err, QuoterError::UnsupportedModifier { .. }));
    }

    #[test]
    fn test_flatten_unwraps_lists() {
        let list = Expr::generic_call(
            "List",
            SyntaxType::Statement,
            vec![Expr::Array(crate::expr::Array {
                element: crate::expr::ArrayElement::Node(SyntaxType::Statement),
                items: vec![Expr::call("EmptyStatement", vec![]), Expr::call("Block", vec![])],
            })],
        );
        assert_eq!(flatten(list).len(), 2);
        let single = Expr::generic_call(
            "SingletonList",
            SyntaxType::Statement,
            vec![Expr::call("EmptyStatement", vec![])],
        );
        assert_eq!(flatten(single), vec![Expr::call("EmptyStatement", vec![])]);
    }
}
