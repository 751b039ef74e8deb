use std::sync::Arc;

use super::{
    Args, Construct, Element, FactoryDescriptor as F, ParamDescriptor as P, ParamType as Ty,
    Returns, Value,
};
use crate::error::{Result, SyntaxError};
use crate::kind::SyntaxKind;
use crate::node::{NodeOrToken, Slot, SyntaxNode};
use crate::token::{SyntaxToken, TokenValue};
use crate::trivia::SyntaxTrivia;
use crate::types::SyntaxType as T;

const fn p(name: &'static str, ty: Ty) -> P {
    P {
        name,
        ty,
        optional: false,
        variadic: false,
        binds: None,
    }
}

const fn opt(name: &'static str, ty: Ty) -> P {
    P {
        optional: true,
        ..p(name, ty)
    }
}

const fn many(name: &'static str, element: &'static Ty) -> P {
    P {
        optional: true,
        variadic: true,
        ..p(name, Ty::Array(element))
    }
}

const fn bound(name: &'static str, ty: Ty, property: &'static str) -> P {
    P {
        binds: Some(property),
        ..p(name, ty)
    }
}

const fn n(class: T) -> Ty {
    Ty::Node(class)
}

const fn list(class: T) -> Ty {
    Ty::List(Element::Class(class))
}

const fn sep(class: T) -> Ty {
    Ty::SeparatedList(Element::Class(class))
}

const fn call(name: &'static str, returns: Returns, params: &'static [P], f: fn(&Args<'_>) -> Result<Value>) -> F {
    F::new(name, returns, params, Construct::Call(f))
}

macro_rules! node {
    ($ty:ident, [$($param:expr),* $(,)?]) => {
        F::new(
            stringify!($ty),
            Returns::Node(T::$ty),
            &[$($param),*],
            Construct::Node(T::$ty),
        )
    };
}

const TOKEN: Ty = Ty::Token;
const TOKENS: Ty = Ty::TokenList;
const TRIVIA: Ty = Ty::TriviaList;
const KIND: Ty = Ty::Kind;
const STRING: Ty = Ty::String;

/// Every overload of the construction API, in declaration order.
pub fn factories() -> &'static [F] {
    FACTORIES
}

static FACTORIES: &[F] = &[
    // declarations
    node!(CompilationUnit, []),
    node!(CompilationUnit, [p("usings", list(T::UsingDirective)), p("members", list(T::MemberDeclaration))]),
    node!(CompilationUnit, [
        p("usings", list(T::UsingDirective)),
        p("members", list(T::MemberDeclaration)),
        p("endOfFileToken", TOKEN),
    ]),
    node!(UsingDirective, [p("name", n(T::Name))]),
    node!(UsingDirective, [p("alias", n(T::NameEquals)), p("name", n(T::Name))]),
    node!(UsingDirective, [p("staticKeyword", TOKEN), p("alias", n(T::NameEquals)), p("name", n(T::Name))]),
    node!(UsingDirective, [
        p("usingKeyword", TOKEN),
        p("staticKeyword", TOKEN),
        p("alias", n(T::NameEquals)),
        p("name", n(T::Name)),
        p("semicolonToken", TOKEN),
    ]),
    node!(NameEquals, [p("name", n(T::IdentifierName))]),
    node!(NameEquals, [p("name", STRING)]),
    node!(NameEquals, [p("name", n(T::IdentifierName)), p("equalsToken", TOKEN)]),
    node!(NamespaceDeclaration, [p("name", n(T::Name))]),
    node!(NamespaceDeclaration, [
        p("name", n(T::Name)),
        p("usings", list(T::UsingDirective)),
        p("members", list(T::MemberDeclaration)),
    ]),
    node!(NamespaceDeclaration, [
        p("namespaceKeyword", TOKEN),
        p("name", n(T::Name)),
        p("openBraceToken", TOKEN),
        p("usings", list(T::UsingDirective)),
        p("members", list(T::MemberDeclaration)),
        p("closeBraceToken", TOKEN),
        p("semicolonToken", TOKEN),
    ]),
    node!(ClassDeclaration, [p("identifier", STRING)]),
    node!(ClassDeclaration, [p("identifier", TOKEN)]),
    node!(ClassDeclaration, [
        p("modifiers", TOKENS),
        p("keyword", TOKEN),
        p("identifier", TOKEN),
        p("baseList", n(T::BaseList)),
        p("openBraceToken", TOKEN),
        p("members", list(T::MemberDeclaration)),
        p("closeBraceToken", TOKEN),
        p("semicolonToken", TOKEN),
    ]),
    node!(BaseList, [p("types", sep(T::BaseType))]),
    node!(BaseList, [p("colonToken", TOKEN), p("types", sep(T::BaseType))]),
    node!(SimpleBaseType, [p("type", n(T::Type))]),
    node!(FieldDeclaration, [p("declaration", n(T::VariableDeclaration))]),
    node!(FieldDeclaration, [p("modifiers", TOKENS), p("declaration", n(T::VariableDeclaration))]),
    node!(FieldDeclaration, [
        p("modifiers", TOKENS),
        p("declaration", n(T::VariableDeclaration)),
        p("semicolonToken", TOKEN),
    ]),
    node!(MethodDeclaration, [p("returnType", n(T::Type)), p("identifier", STRING)]),
    node!(MethodDeclaration, [p("returnType", n(T::Type)), p("identifier", TOKEN)]),
    node!(MethodDeclaration, [
        p("modifiers", TOKENS),
        p("returnType", n(T::Type)),
        p("identifier", TOKEN),
        p("parameterList", n(T::ParameterList)),
        p("body", n(T::Block)),
        p("semicolonToken", TOKEN),
    ]),
    node!(ParameterList, [opt("parameters", sep(T::Parameter))]),
    node!(ParameterList, [
        p("openParenToken", TOKEN),
        p("parameters", sep(T::Parameter)),
        p("closeParenToken", TOKEN),
    ]),
    node!(Parameter, [p("identifier", TOKEN)]),
    node!(Parameter, [p("type", n(T::Type)), p("identifier", TOKEN)]),
    node!(VariableDeclaration, [p("type", n(T::Type))]),
    node!(VariableDeclaration, [p("type", n(T::Type)), p("variables", sep(T::VariableDeclarator))]),
    node!(VariableDeclarator, [p("identifier", TOKEN)]),
    node!(VariableDeclarator, [p("identifier", STRING)]),
    node!(VariableDeclarator, [p("identifier", TOKEN), p("initializer", n(T::EqualsValueClause))]),
    node!(EqualsValueClause, [p("value", n(T::Expression))]),
    node!(EqualsValueClause, [p("equalsToken", TOKEN), p("value", n(T::Expression))]),
    // statements
    node!(Block, [many("statements", &Ty::Node(T::Statement))]),
    node!(Block, [p("statements", list(T::Statement))]),
    node!(Block, [
        p("openBraceToken", TOKEN),
        p("statements", list(T::Statement)),
        p("closeBraceToken", TOKEN),
    ]),
    node!(LocalDeclarationStatement, [p("declaration", n(T::VariableDeclaration))]),
    node!(LocalDeclarationStatement, [p("declaration", n(T::VariableDeclaration)), p("semicolonToken", TOKEN)]),
    node!(ExpressionStatement, [p("expression", n(T::Expression))]),
    node!(ExpressionStatement, [p("expression", n(T::Expression)), p("semicolonToken", TOKEN)]),
    node!(ReturnStatement, [opt("expression", n(T::Expression))]),
    node!(ReturnStatement, [
        p("returnKeyword", TOKEN),
        p("expression", n(T::Expression)),
        p("semicolonToken", TOKEN),
    ]),
    node!(IfStatement, [p("condition", n(T::Expression)), p("statement", n(T::Statement))]),
    node!(IfStatement, [
        p("condition", n(T::Expression)),
        p("statement", n(T::Statement)),
        p("else", n(T::ElseClause)),
    ]),
    node!(IfStatement, [
        p("ifKeyword", TOKEN),
        p("openParenToken", TOKEN),
        p("condition", n(T::Expression)),
        p("closeParenToken", TOKEN),
        p("statement", n(T::Statement)),
        p("else", n(T::ElseClause)),
    ]),
    node!(ElseClause, [p("statement", n(T::Statement))]),
    node!(ElseClause, [p("elseKeyword", TOKEN), p("statement", n(T::Statement))]),
    node!(WhileStatement, [p("condition", n(T::Expression)), p("statement", n(T::Statement))]),
    node!(WhileStatement, [
        p("whileKeyword", TOKEN),
        p("openParenToken", TOKEN),
        p("condition", n(T::Expression)),
        p("closeParenToken", TOKEN),
        p("statement", n(T::Statement)),
    ]),
    node!(EmptyStatement, []),
    node!(EmptyStatement, [p("semicolonToken", TOKEN)]),
    // expressions and names
    node!(IdentifierName, [bound("name", STRING, "Identifier")]),
    node!(IdentifierName, [p("identifier", TOKEN)]),
    call(
        "IdentifierName",
        Returns::Node(T::IdentifierName),
        &[p("leading", TRIVIA), p("name", STRING), p("trailing", TRIVIA)],
        identifier_name_with_trivia,
    )
    .deprecated(),
    node!(QualifiedName, [p("left", n(T::Name)), p("right", n(T::SimpleName))]),
    node!(QualifiedName, [p("left", n(T::Name)), p("dotToken", TOKEN), p("right", n(T::SimpleName))]),
    node!(PredefinedType, [p("keyword", TOKEN)]),
    node!(LiteralExpression, [p("kind", KIND)]),
    node!(LiteralExpression, [p("kind", KIND), p("token", TOKEN)]),
    node!(BinaryExpression, [p("kind", KIND), p("left", n(T::Expression)), p("right", n(T::Expression))]),
    node!(BinaryExpression, [
        p("kind", KIND),
        p("left", n(T::Expression)),
        p("operatorToken", TOKEN),
        p("right", n(T::Expression)),
    ]),
    node!(AssignmentExpression, [p("kind", KIND), p("left", n(T::Expression)), p("right", n(T::Expression))]),
    node!(AssignmentExpression, [
        p("kind", KIND),
        p("left", n(T::Expression)),
        p("operatorToken", TOKEN),
        p("right", n(T::Expression)),
    ]),
    node!(PrefixUnaryExpression, [p("kind", KIND), p("operand", n(T::Expression))]),
    node!(PrefixUnaryExpression, [p("kind", KIND), p("operatorToken", TOKEN), p("operand", n(T::Expression))]),
    node!(ParenthesizedExpression, [p("expression", n(T::Expression))]),
    node!(ParenthesizedExpression, [
        p("openParenToken", TOKEN),
        p("expression", n(T::Expression)),
        p("closeParenToken", TOKEN),
    ]),
    node!(InvocationExpression, [p("expression", n(T::Expression))]),
    node!(InvocationExpression, [p("expression", n(T::Expression)), p("argumentList", n(T::ArgumentList))]),
    node!(ArgumentList, [opt("arguments", sep(T::Argument))]),
    node!(ArgumentList, [
        p("openParenToken", TOKEN),
        p("arguments", sep(T::Argument)),
        p("closeParenToken", TOKEN),
    ]),
    node!(Argument, [p("expression", n(T::Expression))]),
    node!(MemberAccessExpression, [
        p("kind", KIND),
        p("expression", n(T::Expression)),
        p("name", n(T::SimpleName)),
    ]),
    node!(MemberAccessExpression, [
        p("kind", KIND),
        p("expression", n(T::Expression)),
        p("operatorToken", TOKEN),
        p("name", n(T::SimpleName)),
    ]),
    node!(ObjectCreationExpression, [p("type", n(T::Type))]),
    node!(ObjectCreationExpression, [
        p("newKeyword", TOKEN),
        p("type", n(T::Type)),
        p("argumentList", n(T::ArgumentList)),
    ]),
    // structured trivia
    node!(SkippedTokensTrivia, []),
    node!(SkippedTokensTrivia, [p("tokens", TOKENS)]),
    node!(RegionDirectiveTrivia, [p("isActive", Ty::Bool)]),
    node!(RegionDirectiveTrivia, [
        p("hashToken", TOKEN),
        p("regionKeyword", TOKEN),
        p("endOfDirectiveToken", TOKEN),
        p("isActive", Ty::Bool),
    ]),
    node!(EndRegionDirectiveTrivia, [p("isActive", Ty::Bool)]),
    node!(EndRegionDirectiveTrivia, [
        p("hashToken", TOKEN),
        p("endRegionKeyword", TOKEN),
        p("endOfDirectiveToken", TOKEN),
        p("isActive", Ty::Bool),
    ]),
    // conveniences composed from the factories above
    call(
        "InvocationStatement",
        Returns::Node(T::ExpressionStatement),
        &[p("expression", n(T::Expression))],
        invocation_statement,
    ),
    call(
        "NumericLiteralExpression",
        Returns::Node(T::LiteralExpression),
        &[p("value", Ty::Int)],
        numeric_literal_expression,
    ),
    // tokens
    call("Token", Returns::Token, &[p("kind", KIND)], token),
    call("Token", Returns::Token, &[p("leading", TRIVIA), p("kind", KIND), p("trailing", TRIVIA)], token),
    call("MissingToken", Returns::Token, &[p("kind", KIND)], missing_token),
    call(
        "MissingToken",
        Returns::Token,
        &[p("leading", TRIVIA), p("kind", KIND), p("trailing", TRIVIA)],
        missing_token,
    ),
    call("Identifier", Returns::Token, &[p("text", STRING)], identifier),
    call(
        "Identifier",
        Returns::Token,
        &[p("leading", TRIVIA), p("text", STRING), p("trailing", TRIVIA)],
        identifier,
    ),
    call("Literal", Returns::Token, &[p("value", Ty::Int)], literal),
    call("Literal", Returns::Token, &[p("value", Ty::Double)], literal),
    call("Literal", Returns::Token, &[p("value", STRING)], literal),
    call("Literal", Returns::Token, &[p("value", Ty::Char)], literal),
    call("Literal", Returns::Token, &[p("text", STRING), p("value", Ty::Int)], literal),
    call("Literal", Returns::Token, &[p("text", STRING), p("value", Ty::Double)], literal),
    call("Literal", Returns::Token, &[p("text", STRING), p("value", STRING)], literal),
    call("Literal", Returns::Token, &[p("text", STRING), p("value", Ty::Char)], literal),
    call(
        "Literal",
        Returns::Token,
        &[p("leading", TRIVIA), p("text", STRING), p("value", Ty::Int), p("trailing", TRIVIA)],
        literal,
    ),
    call(
        "Literal",
        Returns::Token,
        &[p("leading", TRIVIA), p("text", STRING), p("value", Ty::Double), p("trailing", TRIVIA)],
        literal,
    ),
    call(
        "Literal",
        Returns::Token,
        &[p("leading", TRIVIA), p("text", STRING), p("value", STRING), p("trailing", TRIVIA)],
        literal,
    ),
    call(
        "Literal",
        Returns::Token,
        &[p("leading", TRIVIA), p("text", STRING), p("value", Ty::Char), p("trailing", TRIVIA)],
        literal,
    ),
    call(
        "BadToken",
        Returns::Token,
        &[p("leading", TRIVIA), p("text", STRING), p("trailing", TRIVIA)],
        bad_token,
    ),
    // trivia
    call("Whitespace", Returns::Trivia, &[p("text", STRING)], whitespace),
    call("EndOfLine", Returns::Trivia, &[p("text", STRING)], end_of_line),
    call("Comment", Returns::Trivia, &[p("text", STRING)], comment),
    call("PreprocessingMessage", Returns::Trivia, &[p("text", STRING)], preprocessing_message),
    call("Trivia", Returns::Trivia, &[p("node", n(T::StructuredTrivia))], structured_trivia),
    // lists
    call("TokenList", Returns::TokenList, &[], token_list),
    call("TokenList", Returns::TokenList, &[p("token", TOKEN)], token_list),
    call("TokenList", Returns::TokenList, &[many("tokens", &Ty::Token)], token_list),
    call("TriviaList", Returns::TriviaList, &[], trivia_list),
    call("TriviaList", Returns::TriviaList, &[p("trivia", Ty::Trivia)], trivia_list),
    call("TriviaList", Returns::TriviaList, &[many("trivias", &Ty::Trivia)], trivia_list),
    call("List", Returns::List, &[], node_list).generic(),
    call("List", Returns::List, &[p("nodes", Ty::Array(&Ty::Generic))], node_list).generic(),
    call("SingletonList", Returns::List, &[p("node", Ty::Generic)], node_list).generic(),
    call("SeparatedList", Returns::SeparatedList, &[], separated_list).generic(),
    call(
        "SeparatedList",
        Returns::SeparatedList,
        &[p("nodes", Ty::Array(&Ty::Generic))],
        separated_list,
    )
    .generic(),
    call(
        "SeparatedList",
        Returns::SeparatedList,
        &[p("nodesAndTokens", Ty::Array(&Ty::NodeOrToken))],
        separated_list,
    )
    .generic(),
    call(
        "SingletonSeparatedList",
        Returns::SeparatedList,
        &[p("node", Ty::Generic)],
        separated_list,
    )
    .generic(),
];

fn with_trivia(token: SyntaxToken, args: &Args<'_>) -> Result<SyntaxToken> {
    Ok(token
        .with_leading(args.trivia_list("leading")?)
        .with_trailing(args.trivia_list("trailing")?))
}

/// The elements of an array argument; a lone value counts as one element.
fn elements(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        Value::Null => &[],
        single => std::slice::from_ref(single),
    }
}

fn token(args: &Args<'_>) -> Result<Value> {
    let kind = args.kind("kind")?;
    if !kind.is_fixed_token() {
        return Err(SyntaxError::NotAFixedToken {
            kind,
            hint: "Identifier, Literal or BadToken",
        });
    }
    Ok(Value::Token(with_trivia(SyntaxToken::new(kind), args)?))
}

fn missing_token(args: &Args<'_>) -> Result<Value> {
    let kind = args.kind("kind")?;
    if !kind.is_token() {
        crate::bail!("{kind} is not a token kind");
    }
    Ok(Value::Token(with_trivia(SyntaxToken::missing(kind), args)?))
}

fn identifier(args: &Args<'_>) -> Result<Value> {
    let token = SyntaxToken::identifier(args.text("text")?);
    Ok(Value::Token(with_trivia(token, args)?))
}

fn literal(args: &Args<'_>) -> Result<Value> {
    let (kind, value) = match args.get("value") {
        Value::Int(value) => (SyntaxKind::NumericLiteralToken, TokenValue::Int(*value)),
        Value::Double(value) => (SyntaxKind::NumericLiteralToken, TokenValue::Double(*value)),
        Value::Str(value) => (SyntaxKind::StringLiteralToken, TokenValue::Str(value.clone())),
        Value::Char(value) => (SyntaxKind::CharacterLiteralToken, TokenValue::Char(*value)),
        other => {
            crate::bail!(
                "no literal of type {}",
                other.type_name()
            )
        }
    };
    let text = if args.has("text") {
        args.text("text")?.to_string()
    } else {
        value.canonical_text().unwrap_or_default()
    };
    let token = SyntaxToken::literal(kind, text, value);
    Ok(Value::Token(with_trivia(token, args)?))
}

fn bad_token(args: &Args<'_>) -> Result<Value> {
    let token = SyntaxToken::bad(args.text("text")?);
    Ok(Value::Token(with_trivia(token, args)?))
}

fn whitespace(args: &Args<'_>) -> Result<Value> {
    Ok(Value::Trivia(SyntaxTrivia::whitespace(args.text("text")?)))
}

fn end_of_line(args: &Args<'_>) -> Result<Value> {
    Ok(Value::Trivia(SyntaxTrivia::end_of_line(args.text("text")?)))
}

fn comment(args: &Args<'_>) -> Result<Value> {
    Ok(Value::Trivia(SyntaxTrivia::comment(args.text("text")?)))
}

fn preprocessing_message(args: &Args<'_>) -> Result<Value> {
    Ok(Value::Trivia(SyntaxTrivia::preprocessing_message(
        args.text("text")?,
    )))
}

fn structured_trivia(args: &Args<'_>) -> Result<Value> {
    Ok(Value::Trivia(SyntaxTrivia::structured(args.node("node")?.clone())))
}

fn token_list(args: &Args<'_>) -> Result<Value> {
    let mut tokens = Vec::new();
    for (_, value) in args.iter() {
        for item in elements(value) {
            match item {
                Value::Token(token) => tokens.push(token.clone()),
                other => {
                    crate::bail!(
                        "TokenList cannot hold {}",
                        other.type_name()
                    )
                }
            }
        }
    }
    Ok(Value::TokenList(tokens))
}

fn trivia_list(args: &Args<'_>) -> Result<Value> {
    let mut trivia = Vec::new();
    for (_, value) in args.iter() {
        for item in elements(value) {
            match item {
                Value::Trivia(item) => trivia.push(item.clone()),
                other => {
                    crate::bail!(
                        "TriviaList cannot hold {}",
                        other.type_name()
                    )
                }
            }
        }
    }
    Ok(Value::TriviaList(trivia))
}

fn nodes_of(value: &Value) -> Result<Vec<Arc<SyntaxNode>>> {
    elements(value)
        .iter()
        .map(|item| {
            item.as_node().cloned().ok_or_else(|| {
                SyntaxError::InvalidArgument(format!("expected a node, found {}", item.type_name()))
            })
        })
        .collect()
}

fn node_list(args: &Args<'_>) -> Result<Value> {
    let mut nodes = Vec::new();
    for (_, value) in args.iter() {
        nodes.extend(nodes_of(value)?);
    }
    Ok(Value::NodeList(nodes))
}

fn separated_list(args: &Args<'_>) -> Result<Value> {
    if args.has("nodesAndTokens") {
        let mut items = Vec::new();
        for (index, item) in elements(args.get("nodesAndTokens")).iter().enumerate() {
            // nodes and separators alternate, starting with a node
            let item = match (index % 2, item) {
                (0, Value::Node(node)) => NodeOrToken::Node(node.clone()),
                (1, Value::Token(token)) => NodeOrToken::Token(token.clone()),
                (_, other) => {
                    crate::bail!(
                        "unexpected {} at position {index} of a separated list",
                        other.type_name()
                    )
                }
            };
            items.push(item);
        }
        return Ok(Value::SeparatedList(items));
    }

    let mut items = Vec::new();
    for (_, value) in args.iter() {
        for node in nodes_of(value)? {
            if !items.is_empty() {
                items.push(NodeOrToken::Token(SyntaxToken::new(SyntaxKind::CommaToken)));
            }
            items.push(NodeOrToken::Node(node));
        }
    }
    if let Some(class) = args.type_argument() {
        let misfit = items.iter().find_map(|item| match item {
            NodeOrToken::Node(node) if !class.is_assignable_from(node.syntax_type()) => Some(node),
            _ => None,
        });
        if let Some(node) = misfit {
            crate::bail!(
                "{} is not a {}",
                node.syntax_type().type_name(),
                class.type_name()
            );
        }
    }
    Ok(Value::SeparatedList(items))
}

fn identifier_name_with_trivia(args: &Args<'_>) -> Result<Value> {
    let token = with_trivia(SyntaxToken::identifier(args.text("name")?), args)?;
    let node = SyntaxNode::new(SyntaxKind::IdentifierName)?.with_slot("Identifier", Slot::Token(token))?;
    Ok(Value::Node(Arc::new(node)))
}

fn invocation_statement(args: &Args<'_>) -> Result<Value> {
    let expression = args.node("expression")?.clone();
    let invocation = SyntaxNode::new(SyntaxKind::InvocationExpression)?
        .with_slot("Expression", Slot::Node(Some(expression)))?;
    let statement = SyntaxNode::new(SyntaxKind::ExpressionStatement)?
        .with_slot("Expression", Slot::Node(Some(Arc::new(invocation))))?;
    Ok(Value::Node(Arc::new(statement)))
}

fn numeric_literal_expression(args: &Args<'_>) -> Result<Value> {
    let value = match args.get("value") {
        Value::Int(value) => *value,
        other => {
            crate::bail!(
                "expected int, found {}",
                other.type_name()
            )
        }
    };
    let token = SyntaxToken::literal(
        SyntaxKind::NumericLiteralToken,
        TokenValue::Int(value).canonical_text().unwrap_or_default(),
        TokenValue::Int(value),
    );
    let node = SyntaxNode::new(SyntaxKind::NumericLiteralExpression)?
        .with_slot("Token", Slot::Token(token))?;
    Ok(Value::Node(Arc::new(node)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn invoke(name: &str, args: Vec<Value>) -> Result<Value> {
        let arity = args.len();
        let factory = factories()
            .iter()
            .filter(|f| f.name == name && f.params.len() == arity)
            .find(|f| {
                f.params
                    .iter()
                    .zip(&args)
                    .all(|(param, arg)| param.ty.coerce(arg, None).is_some())
            })
            .expect("overload");
        factory.invoke(&args, None)
    }

    fn node_text(value: Result<Value>) -> String {
        value
            .expect("value")
            .as_node()
            .expect("node")
            .to_full_string()
    }

    #[test]
    fn test_node_factory_params_name_properties() {
        for factory in factories() {
            let Some(ty) = factory.node_type() else { continue };
            if matches!(factory.construct, Construct::Call(_)) {
                continue;
            }
            for param in factory.params {
                if param.name == "kind" {
                    assert!(ty.takes_kind_argument(), "{}", factory.signature());
                    continue;
                }
                assert!(
                    ty.property(param.property()).is_some(),
                    "{} has no property for {}",
                    factory.signature(),
                    param.name
                );
            }
        }
    }

    #[test]
    fn test_overloads_are_distinct() {
        let mut seen = HashSet::new();
        for factory in factories() {
            assert!(seen.insert(factory.signature()), "{}", factory.signature());
        }
    }

    #[test]
    fn test_identifier_name_from_string() {
        let text = node_text(invoke("IdentifierName", vec![Value::Str("x".into())]));
        assert_eq!(text, "x");
    }

    #[test]
    fn test_token_rejects_variable_kinds() {
        let err = invoke("Token", vec![Value::Kind(SyntaxKind::IdentifierToken)])
            .expect_err("not fixed");
        assert!(matches!(err, SyntaxError::NotAFixedToken { .. }));
    }

    #[test]
    fn test_literal_text_defaults_to_canonical() -> Result<()> {
        let Value::Token(token) = invoke("Literal", vec![Value::Str("a\"b".into())])? else {
            panic!("token expected");
        };
        assert_eq!(token.text(), "\"a\\\"b\"");
        let Value::Token(token) = invoke(
            "Literal",
            vec![Value::Str("0x10".into()), Value::Int(16)],
        )?
        else {
            panic!("token expected");
        };
        assert_eq!(token.text(), "0x10");
        Ok(())
    }

    #[test]
    fn test_separated_list_inserts_commas() -> Result<()> {
        let a = invoke("Argument", vec![invoke("IdentifierName", vec![Value::Str("a".into())])?])?;
        let b = invoke("Argument", vec![invoke("IdentifierName", vec![Value::Str("b".into())])?])?;
        let list = invoke("SeparatedList", vec![Value::Array(vec![a, b])])?;
        let Value::SeparatedList(items) = list else {
            panic!("separated list expected");
        };
        assert_eq!(items.len(), 3);
        assert!(matches!(&items[1], NodeOrToken::Token(t) if t.kind() == SyntaxKind::CommaToken));
        Ok(())
    }

    #[test]
    fn test_binary_expression_checks_kind() {
        let left = invoke("IdentifierName", vec![Value::Str("a".into())]).expect("node");
        let right = left.clone();
        let err = invoke(
            "BinaryExpression",
            vec![Value::Kind(SyntaxKind::Block), left.clone(), right.clone()],
        )
        .expect_err("kind");
        assert!(matches!(err, SyntaxError::KindMismatch { .. }));
        let text = node_text(invoke(
            "BinaryExpression",
            vec![Value::Kind(SyntaxKind::AddExpression), left, right],
        ));
        assert_eq!(text, "a+a");
    }
}
