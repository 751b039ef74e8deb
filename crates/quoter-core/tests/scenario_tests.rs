use pretty_assertions::assert_eq;
use quoter_core::{
    quote_text, ArrayElement, Call, Expr, Interpreter, Invocation, Literal, Quoter, QuoterError,
    QuoterOptions, Registry, Result, PARSE_ERROR,
};
use quoter_syntax::{parse, ParseContext, SyntaxKind, SyntaxType};

fn quote(source: &str, context: ParseContext, options: QuoterOptions) -> Result<Call> {
    let registry = Registry::new();
    let node = parse(source, context).expect("parsed");
    match Quoter::new(&registry, options).quote(&node)? {
        Expr::Call(call) => Ok(call),
        other => panic!("expected a call, got {other:?}"),
    }
}

fn render(call: &Call) -> Result<String> {
    let registry = Registry::new();
    let node = Interpreter::new(&registry).evaluate_node(&Expr::Call(call.clone()))?;
    Ok(node.to_full_string())
}

/// The argument passed to the `With<property>` modifier of `call`.
fn modifier<'c>(call: &'c Call, property: &str) -> Option<&'c Expr> {
    let name = format!("With{property}");
    call.chain
        .iter()
        .find(|invocation| invocation.name == name)
        .and_then(|invocation| invocation.args.first())
}

#[test]
fn test_leaf_declaration_takes_its_name() -> Result<()> {
    let call = quote("class C { }", ParseContext::Member, QuoterOptions::default())?;
    assert_eq!(call.head, Invocation::new("ClassDeclaration", vec![Expr::str("C")]));
    assert_eq!(call.chain, vec![Invocation::new("NormalizeWhitespace", vec![])]);
    assert_eq!(render(&call)?, "class C\n{\n}");
    Ok(())
}

#[test]
fn test_missing_delimiter_is_quoted_explicitly() -> Result<()> {
    let source = "class C {";
    let call = quote(source, ParseContext::Member, QuoterOptions::exact())?;
    assert_eq!(
        modifier(&call, "CloseBraceToken"),
        Some(&Expr::call(
            "MissingToken",
            vec![Expr::kind(SyntaxKind::CloseBraceToken)]
        ))
    );
    assert_eq!(render(&call)?, source);
    Ok(())
}

#[test]
fn test_single_element_list_collapses() -> Result<()> {
    let call = quote("class C { int x; }", ParseContext::Member, QuoterOptions::default())?;
    let Some(Expr::Call(members)) = modifier(&call, "Members") else {
        panic!("members modifier");
    };
    assert_eq!(members.head.name, "SingletonList");
    assert_eq!(members.head.type_argument, Some(SyntaxType::MemberDeclaration));
    assert_eq!(members.head.args.len(), 1);
    Ok(())
}

#[test]
fn test_three_element_list_wraps_an_array() -> Result<()> {
    let call = quote(
        "class C { int x; int y; void M() { } }",
        ParseContext::Member,
        QuoterOptions::default(),
    )?;
    let Some(Expr::Call(members)) = modifier(&call, "Members") else {
        panic!("members modifier");
    };
    assert_eq!(members.head.name, "List");
    let [Expr::Array(array)] = members.head.args.as_slice() else {
        panic!("array argument");
    };
    assert_eq!(array.element, ArrayElement::Node(SyntaxType::MemberDeclaration));
    assert_eq!(array.items.len(), 3);
    assert!(array.items.iter().all(|item| matches!(item, Expr::Call(_))));
    Ok(())
}

#[test]
fn test_implied_modifier_is_dropped_only_when_eliminating() -> Result<()> {
    let trimmed = quote(";", ParseContext::Statement, QuoterOptions::exact())?;
    assert_eq!(trimmed.head, Invocation::new("EmptyStatement", vec![]));
    assert!(trimmed.chain.is_empty());

    let kept = quote(
        ";",
        ParseContext::Statement,
        QuoterOptions {
            remove_redundant_modifying_calls: false,
            ..QuoterOptions::exact()
        },
    )?;
    assert_eq!(
        modifier(&kept, "SemicolonToken"),
        Some(&Expr::call("Token", vec![Expr::kind(SyntaxKind::SemicolonToken)]))
    );
    assert_eq!(render(&kept)?, render(&trimmed)?);
    Ok(())
}

#[test]
fn test_escaped_string_keeps_raw_text() -> Result<()> {
    let source = r#"@"C:\dir""#;
    let call = quote(source, ParseContext::Expression, QuoterOptions::exact())?;
    assert_eq!(call.head.name, "LiteralExpression");
    let literal = Expr::call("Literal", vec![Expr::str(source), Expr::str(r"C:\dir")]);
    assert_eq!(call.head.args, vec![Expr::kind(SyntaxKind::StringLiteralExpression), literal]);
    assert_eq!(render(&call)?, source);

    let value_only = Call::new(Invocation::new(
        "LiteralExpression",
        vec![
            Expr::kind(SyntaxKind::StringLiteralExpression),
            Expr::call("Literal", vec![Expr::str(r"C:\dir")]),
        ],
    ));
    assert_ne!(render(&value_only)?, source);
    Ok(())
}

#[test]
fn test_absent_tokens_never_quote_to_calls() -> Result<()> {
    let call = quote("return;", ParseContext::Statement, QuoterOptions::exact())?;
    assert_eq!(call.head, Invocation::new("ReturnStatement", vec![]));
    Ok(())
}

#[test]
fn test_printed_output() -> Result<()> {
    let registry = Registry::new();
    assert_eq!(
        quote_text(&registry, "a+b", ParseContext::Expression, QuoterOptions::default())?,
        "SyntaxFactory.BinaryExpression(
    SyntaxKind.AddExpression,
    SyntaxFactory.IdentifierName(\"a\"),
    SyntaxFactory.IdentifierName(\"b\"))
.NormalizeWhitespace()"
    );
    let shortened = QuoterOptions {
        shorten_with_static_import: true,
        ..QuoterOptions::exact()
    };
    assert_eq!(
        quote_text(&registry, ";", ParseContext::Statement, shortened)?,
        "EmptyStatement()"
    );
    // ClassDeclaration("C") alone renders without the space after the keyword
    assert_eq!(
        quote_text(&registry, "class C{}", ParseContext::Member, shortened)?,
        "ClassDeclaration(\"C\")
.WithKeyword(
    Token(
        TriviaList(),
        SyntaxKind.ClassKeyword,
        TriviaList(Space)))"
    );
    Ok(())
}

#[test]
fn test_exact_output_keeps_whitespace() -> Result<()> {
    let registry = Registry::new();
    let printed = quote_text(&registry, "x ", ParseContext::Expression, QuoterOptions::exact())?;
    assert_eq!(
        printed,
        "SyntaxFactory.IdentifierName(
    SyntaxFactory.Identifier(
        SyntaxFactory.TriviaList(),
        \"x\",
        SyntaxFactory.TriviaList(SyntaxFactory.Space)))"
    );
    Ok(())
}

#[test]
fn test_parse_failure_is_advisory() -> Result<()> {
    let registry = Registry::new();
    assert_eq!(
        quote_text(&registry, "using System;", ParseContext::Member, QuoterOptions::default())?,
        PARSE_ERROR
    );
    Ok(())
}

#[test]
fn test_unknown_factory_is_reported_by_name() {
    let registry = Registry::new();
    let err = Interpreter::new(&registry)
        .evaluate(&Expr::call("Frobnicate", vec![Expr::Literal(Literal::Null)]))
        .expect_err("unknown");
    assert!(matches!(err, QuoterError::UnknownFactory(name) if name == "Frobnicate"));
}

#[test]
fn test_overflowing_double_prints_and_rebuilds() -> Result<()> {
    let registry = Registry::new();
    let printed = quote_text(&registry, "1e400", ParseContext::Expression, QuoterOptions::exact())?;
    assert!(printed.contains("double.PositiveInfinity"), "{printed}");
    assert!(!printed.contains("inf)"), "{printed}");

    let call = quote("1e400", ParseContext::Expression, QuoterOptions::exact())?;
    assert_eq!(render(&call)?, "1e400");
    Ok(())
}
