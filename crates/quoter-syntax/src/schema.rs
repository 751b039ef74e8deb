//! Declared structural properties of every concrete node class, in source order.

use crate::kind::SyntaxKind;
use crate::types::SyntaxType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: &'static str,
    pub shape: PropertyShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyShape {
    Node {
        class: SyntaxType,
        optional: bool,
        /// Class of the empty node filled in when nothing is supplied.
        default: Option<SyntaxType>,
    },
    Token(TokenDefault),
    TokenList,
    List(SyntaxType),
    SeparatedList(SyntaxType),
    Bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenDefault {
    Fixed(SyntaxKind),
    FromNodeKind,
    Absent,
}

impl PropertyShape {
    pub fn is_optional(&self) -> bool {
        match self {
            PropertyShape::Node { optional, .. } => *optional,
            PropertyShape::Token(TokenDefault::Absent) => false,
            _ => true,
        }
    }
}

const fn node(name: &'static str, class: SyntaxType) -> PropertyDef {
    PropertyDef {
        name,
        shape: PropertyShape::Node {
            class,
            optional: false,
            default: None,
        },
    }
}

const fn optional_node(name: &'static str, class: SyntaxType) -> PropertyDef {
    PropertyDef {
        name,
        shape: PropertyShape::Node {
            class,
            optional: true,
            default: None,
        },
    }
}

const fn filled_node(name: &'static str, class: SyntaxType) -> PropertyDef {
    PropertyDef {
        name,
        shape: PropertyShape::Node {
            class,
            optional: false,
            default: Some(class),
        },
    }
}

const fn token(name: &'static str, kind: SyntaxKind) -> PropertyDef {
    PropertyDef {
        name,
        shape: PropertyShape::Token(TokenDefault::Fixed(kind)),
    }
}

const fn kind_token(name: &'static str) -> PropertyDef {
    PropertyDef {
        name,
        shape: PropertyShape::Token(TokenDefault::FromNodeKind),
    }
}

const fn bare_token(name: &'static str) -> PropertyDef {
    PropertyDef {
        name,
        shape: PropertyShape::Token(TokenDefault::Absent),
    }
}

const fn token_list(name: &'static str) -> PropertyDef {
    PropertyDef {
        name,
        shape: PropertyShape::TokenList,
    }
}

const fn list(name: &'static str, class: SyntaxType) -> PropertyDef {
    PropertyDef {
        name,
        shape: PropertyShape::List(class),
    }
}

const fn separated(name: &'static str, class: SyntaxType) -> PropertyDef {
    PropertyDef {
        name,
        shape: PropertyShape::SeparatedList(class),
    }
}

const fn flag(name: &'static str) -> PropertyDef {
    PropertyDef {
        name,
        shape: PropertyShape::Bool,
    }
}

use SyntaxKind as K;
use SyntaxType as T;

const COMPILATION_UNIT: &[PropertyDef] = &[
    list("Usings", T::UsingDirective),
    list("Members", T::MemberDeclaration),
    token("EndOfFileToken", K::EndOfFileToken),
];
const USING_DIRECTIVE: &[PropertyDef] = &[
    token("UsingKeyword", K::UsingKeyword),
    bare_token("StaticKeyword"),
    optional_node("Alias", T::NameEquals),
    node("Name", T::Name),
    token("SemicolonToken", K::SemicolonToken),
];
const NAME_EQUALS: &[PropertyDef] = &[
    node("Name", T::IdentifierName),
    token("EqualsToken", K::EqualsToken),
];
const NAMESPACE_DECLARATION: &[PropertyDef] = &[
    token("NamespaceKeyword", K::NamespaceKeyword),
    node("Name", T::Name),
    token("OpenBraceToken", K::OpenBraceToken),
    list("Usings", T::UsingDirective),
    list("Members", T::MemberDeclaration),
    token("CloseBraceToken", K::CloseBraceToken),
    bare_token("SemicolonToken"),
];
const CLASS_DECLARATION: &[PropertyDef] = &[
    token_list("Modifiers"),
    token("Keyword", K::ClassKeyword),
    bare_token("Identifier"),
    optional_node("BaseList", T::BaseList),
    token("OpenBraceToken", K::OpenBraceToken),
    list("Members", T::MemberDeclaration),
    token("CloseBraceToken", K::CloseBraceToken),
    bare_token("SemicolonToken"),
];
const BASE_LIST: &[PropertyDef] = &[
    token("ColonToken", K::ColonToken),
    separated("Types", T::BaseType),
];
const SIMPLE_BASE_TYPE: &[PropertyDef] = &[node("Type", T::Type)];
const FIELD_DECLARATION: &[PropertyDef] = &[
    token_list("Modifiers"),
    node("Declaration", T::VariableDeclaration),
    token("SemicolonToken", K::SemicolonToken),
];
const METHOD_DECLARATION: &[PropertyDef] = &[
    token_list("Modifiers"),
    node("ReturnType", T::Type),
    bare_token("Identifier"),
    filled_node("ParameterList", T::ParameterList),
    optional_node("Body", T::Block),
    bare_token("SemicolonToken"),
];
const PARAMETER_LIST: &[PropertyDef] = &[
    token("OpenParenToken", K::OpenParenToken),
    separated("Parameters", T::Parameter),
    token("CloseParenToken", K::CloseParenToken),
];
const PARAMETER: &[PropertyDef] = &[optional_node("Type", T::Type), bare_token("Identifier")];
const VARIABLE_DECLARATION: &[PropertyDef] = &[
    node("Type", T::Type),
    separated("Variables", T::VariableDeclarator),
];
const VARIABLE_DECLARATOR: &[PropertyDef] = &[
    bare_token("Identifier"),
    optional_node("Initializer", T::EqualsValueClause),
];
const EQUALS_VALUE_CLAUSE: &[PropertyDef] = &[
    token("EqualsToken", K::EqualsToken),
    node("Value", T::Expression),
];
const BLOCK: &[PropertyDef] = &[
    token("OpenBraceToken", K::OpenBraceToken),
    list("Statements", T::Statement),
    token("CloseBraceToken", K::CloseBraceToken),
];
const LOCAL_DECLARATION_STATEMENT: &[PropertyDef] = &[
    node("Declaration", T::VariableDeclaration),
    token("SemicolonToken", K::SemicolonToken),
];
const EXPRESSION_STATEMENT: &[PropertyDef] = &[
    node("Expression", T::Expression),
    token("SemicolonToken", K::SemicolonToken),
];
const RETURN_STATEMENT: &[PropertyDef] = &[
    token("ReturnKeyword", K::ReturnKeyword),
    optional_node("Expression", T::Expression),
    token("SemicolonToken", K::SemicolonToken),
];
const IF_STATEMENT: &[PropertyDef] = &[
    token("IfKeyword", K::IfKeyword),
    token("OpenParenToken", K::OpenParenToken),
    node("Condition", T::Expression),
    token("CloseParenToken", K::CloseParenToken),
    node("Statement", T::Statement),
    optional_node("Else", T::ElseClause),
];
const ELSE_CLAUSE: &[PropertyDef] = &[
    token("ElseKeyword", K::ElseKeyword),
    node("Statement", T::Statement),
];
const WHILE_STATEMENT: &[PropertyDef] = &[
    token("WhileKeyword", K::WhileKeyword),
    token("OpenParenToken", K::OpenParenToken),
    node("Condition", T::Expression),
    token("CloseParenToken", K::CloseParenToken),
    node("Statement", T::Statement),
];
const EMPTY_STATEMENT: &[PropertyDef] = &[token("SemicolonToken", K::SemicolonToken)];
const IDENTIFIER_NAME: &[PropertyDef] = &[bare_token("Identifier")];
const QUALIFIED_NAME: &[PropertyDef] = &[
    node("Left", T::Name),
    token("DotToken", K::DotToken),
    node("Right", T::SimpleName),
];
const PREDEFINED_TYPE: &[PropertyDef] = &[bare_token("Keyword")];
const LITERAL_EXPRESSION: &[PropertyDef] = &[kind_token("Token")];
const BINARY_EXPRESSION: &[PropertyDef] = &[
    node("Left", T::Expression),
    kind_token("OperatorToken"),
    node("Right", T::Expression),
];
const PREFIX_UNARY_EXPRESSION: &[PropertyDef] =
    &[kind_token("OperatorToken"), node("Operand", T::Expression)];
const PARENTHESIZED_EXPRESSION: &[PropertyDef] = &[
    token("OpenParenToken", K::OpenParenToken),
    node("Expression", T::Expression),
    token("CloseParenToken", K::CloseParenToken),
];
const INVOCATION_EXPRESSION: &[PropertyDef] = &[
    node("Expression", T::Expression),
    filled_node("ArgumentList", T::ArgumentList),
];
const ARGUMENT_LIST: &[PropertyDef] = &[
    token("OpenParenToken", K::OpenParenToken),
    separated("Arguments", T::Argument),
    token("CloseParenToken", K::CloseParenToken),
];
const ARGUMENT: &[PropertyDef] = &[node("Expression", T::Expression)];
const MEMBER_ACCESS_EXPRESSION: &[PropertyDef] = &[
    node("Expression", T::Expression),
    kind_token("OperatorToken"),
    node("Name", T::SimpleName),
];
const OBJECT_CREATION_EXPRESSION: &[PropertyDef] = &[
    token("NewKeyword", K::NewKeyword),
    node("Type", T::Type),
    optional_node("ArgumentList", T::ArgumentList),
];
const SKIPPED_TOKENS_TRIVIA: &[PropertyDef] = &[token_list("Tokens")];
const REGION_DIRECTIVE_TRIVIA: &[PropertyDef] = &[
    token("HashToken", K::HashToken),
    token("RegionKeyword", K::RegionKeyword),
    token("EndOfDirectiveToken", K::EndOfDirectiveToken),
    flag("IsActive"),
];
const END_REGION_DIRECTIVE_TRIVIA: &[PropertyDef] = &[
    token("HashToken", K::HashToken),
    token("EndRegionKeyword", K::EndRegionKeyword),
    token("EndOfDirectiveToken", K::EndOfDirectiveToken),
    flag("IsActive"),
];

pub(crate) fn properties(ty: SyntaxType) -> &'static [PropertyDef] {
    match ty {
        T::CompilationUnit => COMPILATION_UNIT,
        T::UsingDirective => USING_DIRECTIVE,
        T::NameEquals => NAME_EQUALS,
        T::NamespaceDeclaration => NAMESPACE_DECLARATION,
        T::ClassDeclaration => CLASS_DECLARATION,
        T::BaseList => BASE_LIST,
        T::SimpleBaseType => SIMPLE_BASE_TYPE,
        T::FieldDeclaration => FIELD_DECLARATION,
        T::MethodDeclaration => METHOD_DECLARATION,
        T::ParameterList => PARAMETER_LIST,
        T::Parameter => PARAMETER,
        T::VariableDeclaration => VARIABLE_DECLARATION,
        T::VariableDeclarator => VARIABLE_DECLARATOR,
        T::EqualsValueClause => EQUALS_VALUE_CLAUSE,
        T::Block => BLOCK,
        T::LocalDeclarationStatement => LOCAL_DECLARATION_STATEMENT,
        T::ExpressionStatement => EXPRESSION_STATEMENT,
        T::ReturnStatement => RETURN_STATEMENT,
        T::IfStatement => IF_STATEMENT,
        T::ElseClause => ELSE_CLAUSE,
        T::WhileStatement => WHILE_STATEMENT,
        T::EmptyStatement => EMPTY_STATEMENT,
        T::IdentifierName => IDENTIFIER_NAME,
        T::QualifiedName => QUALIFIED_NAME,
        T::PredefinedType => PREDEFINED_TYPE,
        T::LiteralExpression => LITERAL_EXPRESSION,
        T::BinaryExpression | T::AssignmentExpression => BINARY_EXPRESSION,
        T::PrefixUnaryExpression => PREFIX_UNARY_EXPRESSION,
        T::ParenthesizedExpression => PARENTHESIZED_EXPRESSION,
        T::InvocationExpression => INVOCATION_EXPRESSION,
        T::ArgumentList => ARGUMENT_LIST,
        T::Argument => ARGUMENT,
        T::MemberAccessExpression => MEMBER_ACCESS_EXPRESSION,
        T::ObjectCreationExpression => OBJECT_CREATION_EXPRESSION,
        T::SkippedTokensTrivia => SKIPPED_TOKENS_TRIVIA,
        T::RegionDirectiveTrivia => REGION_DIRECTIVE_TRIVIA,
        T::EndRegionDirectiveTrivia => END_REGION_DIRECTIVE_TRIVIA,
        T::Expression
        | T::Type
        | T::Name
        | T::SimpleName
        | T::Statement
        | T::MemberDeclaration
        | T::BaseTypeDeclaration
        | T::BaseType
        | T::StructuredTrivia
        | T::DirectiveTrivia => &[],
    }
}
