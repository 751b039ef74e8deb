use pretty_assertions::assert_eq;
use quoter_syntax::{parse, parse_compilation_unit, ParseContext, SyntaxKind, SyntaxNode, Slot};

const PROGRAM: &str = r#"using System;
using static System.Console;

namespace Demo
{
    #region Types
    /// A counter.
    public class Counter : Base
    {
        private int count = 0;

        public void Add(int amount)
        {
            if (amount < 0) { return; } else count += amount; // grow
            while (!done) Step(count, "tick\n", 'x', 1.5);
        }
    }
    #endregion
}
"#;

#[test]
fn test_program_round_trips_exactly() {
    let unit = parse_compilation_unit(PROGRAM);
    assert_eq!(unit.to_full_string(), PROGRAM);
    assert_eq!(unit.full_width(), PROGRAM.len());
    assert!(!unit.contains_diagnostics());
    assert!(unit.contains_directives());
}

#[test]
fn test_program_structure() {
    let unit = parse_compilation_unit(PROGRAM);
    let Some(Slot::List(usings)) = unit.slot("Usings") else {
        panic!("usings");
    };
    assert_eq!(usings.len(), 2);
    let Some(Slot::List(members)) = unit.slot("Members") else {
        panic!("members");
    };
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].kind(), SyntaxKind::NamespaceDeclaration);
}

#[test]
fn test_junk_is_kept_as_skipped_tokens() {
    let source = "class C { ) void M() { } }";
    let unit = parse_compilation_unit(source);
    assert_eq!(unit.to_full_string(), source);
    assert!(unit.contains_diagnostics());
    let skipped = unit
        .tokens()
        .into_iter()
        .flat_map(|token| token.leading().iter())
        .filter(|trivia| trivia.kind() == SyntaxKind::SkippedTokensTrivia)
        .count();
    assert_eq!(skipped, 1);
}

#[test]
fn test_each_context_keeps_all_text() {
    let cases = [
        ("", ParseContext::Unit),
        ("  /* only trivia */  ", ParseContext::Unit),
        ("public int X { }", ParseContext::Member),
        ("return a.b(c, d) ;", ParseContext::Statement),
        ("{ int y = 2; }", ParseContext::Statement),
        ("new List(1) + -x * (y)", ParseContext::Expression),
        (")", ParseContext::Expression),
    ];
    for (source, context) in cases {
        let node: SyntaxNode = parse(source, context).expect("parsed");
        assert_eq!(node.to_full_string(), source, "{context}");
    }
}

#[test]
fn test_normalization_is_idempotent_on_program() {
    let once = parse_compilation_unit(PROGRAM).normalize_whitespace();
    let twice = once.normalize_whitespace();
    assert_eq!(twice, once);
}

#[test]
fn test_normalization_ignores_layout() {
    let compact = "class C{void M(){M(1,2);}}";
    let spread = "class   C\n{\n\n  void M ( )\n{ M( 1 , 2 ) ;\n}\n}\n";
    assert_eq!(
        parse_compilation_unit(compact)
            .normalize_whitespace()
            .to_full_string(),
        parse_compilation_unit(spread)
            .normalize_whitespace()
            .to_full_string()
    );
}
