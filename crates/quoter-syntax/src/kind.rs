use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::types::SyntaxType;

/// Every tag a token, trivia or node can carry.
///
/// Variant names are part of the generated code (`SyntaxKind.ClassKeyword`),
/// so they round-trip through [`std::str::FromStr`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum SyntaxKind {
    None,

    // punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    SemicolonToken,
    CommaToken,
    DotToken,
    ColonToken,
    EqualsToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    AmpersandAmpersandToken,
    BarBarToken,
    ExclamationToken,
    PlusEqualsToken,
    MinusEqualsToken,
    HashToken,

    // keywords
    UsingKeyword,
    StaticKeyword,
    NamespaceKeyword,
    ClassKeyword,
    PublicKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    InternalKeyword,
    ReadOnlyKeyword,
    ReturnKeyword,
    IfKeyword,
    ElseKeyword,
    WhileKeyword,
    NewKeyword,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    VoidKeyword,
    IntKeyword,
    StringKeyword,
    BoolKeyword,
    DoubleKeyword,
    CharKeyword,
    ObjectKeyword,
    RegionKeyword,
    EndRegionKeyword,

    // variable tokens
    IdentifierToken,
    NumericLiteralToken,
    StringLiteralToken,
    CharacterLiteralToken,
    EndOfFileToken,
    EndOfDirectiveToken,
    BadToken,

    // trivia
    WhitespaceTrivia,
    EndOfLineTrivia,
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    PreprocessingMessageTrivia,
    SkippedTokensTrivia,
    RegionDirectiveTrivia,
    EndRegionDirectiveTrivia,

    // nodes
    CompilationUnit,
    UsingDirective,
    NameEquals,
    NamespaceDeclaration,
    ClassDeclaration,
    BaseList,
    SimpleBaseType,
    FieldDeclaration,
    MethodDeclaration,
    ParameterList,
    Parameter,
    VariableDeclaration,
    VariableDeclarator,
    EqualsValueClause,
    Block,
    LocalDeclarationStatement,
    ExpressionStatement,
    ReturnStatement,
    IfStatement,
    ElseClause,
    WhileStatement,
    EmptyStatement,
    IdentifierName,
    QualifiedName,
    PredefinedType,
    NumericLiteralExpression,
    StringLiteralExpression,
    CharacterLiteralExpression,
    TrueLiteralExpression,
    FalseLiteralExpression,
    NullLiteralExpression,
    AddExpression,
    SubtractExpression,
    MultiplyExpression,
    DivideExpression,
    ModuloExpression,
    LessThanExpression,
    GreaterThanExpression,
    LessThanOrEqualExpression,
    GreaterThanOrEqualExpression,
    EqualsExpression,
    NotEqualsExpression,
    LogicalAndExpression,
    LogicalOrExpression,
    SimpleAssignmentExpression,
    AddAssignmentExpression,
    SubtractAssignmentExpression,
    UnaryMinusExpression,
    LogicalNotExpression,
    ParenthesizedExpression,
    InvocationExpression,
    ArgumentList,
    Argument,
    SimpleMemberAccessExpression,
    ObjectCreationExpression,
}

const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("using", SyntaxKind::UsingKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("namespace", SyntaxKind::NamespaceKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("public", SyntaxKind::PublicKeyword),
    ("private", SyntaxKind::PrivateKeyword),
    ("protected", SyntaxKind::ProtectedKeyword),
    ("internal", SyntaxKind::InternalKeyword),
    ("readonly", SyntaxKind::ReadOnlyKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("while", SyntaxKind::WhileKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("int", SyntaxKind::IntKeyword),
    ("string", SyntaxKind::StringKeyword),
    ("bool", SyntaxKind::BoolKeyword),
    ("double", SyntaxKind::DoubleKeyword),
    ("char", SyntaxKind::CharKeyword),
    ("object", SyntaxKind::ObjectKeyword),
];

/// Longest first, so the lexer can take the first prefix that matches.
pub(crate) const PUNCTUATION: &[(&str, SyntaxKind)] = &[
    ("<=", SyntaxKind::LessThanEqualsToken),
    (">=", SyntaxKind::GreaterThanEqualsToken),
    ("==", SyntaxKind::EqualsEqualsToken),
    ("!=", SyntaxKind::ExclamationEqualsToken),
    ("&&", SyntaxKind::AmpersandAmpersandToken),
    ("||", SyntaxKind::BarBarToken),
    ("+=", SyntaxKind::PlusEqualsToken),
    ("-=", SyntaxKind::MinusEqualsToken),
    ("{", SyntaxKind::OpenBraceToken),
    ("}", SyntaxKind::CloseBraceToken),
    ("(", SyntaxKind::OpenParenToken),
    (")", SyntaxKind::CloseParenToken),
    (";", SyntaxKind::SemicolonToken),
    (",", SyntaxKind::CommaToken),
    (".", SyntaxKind::DotToken),
    (":", SyntaxKind::ColonToken),
    ("=", SyntaxKind::EqualsToken),
    ("+", SyntaxKind::PlusToken),
    ("-", SyntaxKind::MinusToken),
    ("*", SyntaxKind::AsteriskToken),
    ("/", SyntaxKind::SlashToken),
    ("%", SyntaxKind::PercentToken),
    ("<", SyntaxKind::LessThanToken),
    (">", SyntaxKind::GreaterThanToken),
    ("!", SyntaxKind::ExclamationToken),
    ("#", SyntaxKind::HashToken),
];

impl SyntaxKind {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Canonical text of a fixed token; `None` for variable tokens and non-tokens.
    pub fn text(self) -> Option<&'static str> {
        use SyntaxKind::*;
        match self {
            EndOfFileToken | EndOfDirectiveToken => Some(""),
            RegionKeyword => Some("region"),
            EndRegionKeyword => Some("endregion"),
            _ => PUNCTUATION
                .iter()
                .chain(KEYWORDS.iter())
                .find(|(_, kind)| *kind == self)
                .map(|(text, _)| *text),
        }
    }

    pub fn keyword_from_text(text: &str) -> Option<SyntaxKind> {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == text)
            .map(|(_, kind)| *kind)
    }

    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| *kind == self)
            || matches!(self, SyntaxKind::RegionKeyword | SyntaxKind::EndRegionKeyword)
    }

    pub fn is_punctuation(self) -> bool {
        PUNCTUATION.iter().any(|(_, kind)| *kind == self)
    }

    /// Tokens whose text is implied by their kind.
    pub fn is_fixed_token(self) -> bool {
        self.text().is_some()
    }

    pub fn is_token(self) -> bool {
        use SyntaxKind::*;
        self.is_fixed_token()
            || matches!(
                self,
                IdentifierToken
                    | NumericLiteralToken
                    | StringLiteralToken
                    | CharacterLiteralToken
                    | BadToken
            )
    }

    pub fn is_literal_token(self) -> bool {
        matches!(
            self,
            SyntaxKind::NumericLiteralToken
                | SyntaxKind::StringLiteralToken
                | SyntaxKind::CharacterLiteralToken
        )
    }

    pub fn is_trivia(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            WhitespaceTrivia
                | EndOfLineTrivia
                | SingleLineCommentTrivia
                | MultiLineCommentTrivia
                | PreprocessingMessageTrivia
                | SkippedTokensTrivia
                | RegionDirectiveTrivia
                | EndRegionDirectiveTrivia
        )
    }

    pub fn is_comment_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::SingleLineCommentTrivia | SyntaxKind::MultiLineCommentTrivia
        )
    }

    pub fn is_predefined_type(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            VoidKeyword
                | IntKeyword
                | StringKeyword
                | BoolKeyword
                | DoubleKeyword
                | CharKeyword
                | ObjectKeyword
        )
    }

    pub fn is_modifier(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            PublicKeyword
                | PrivateKeyword
                | ProtectedKeyword
                | InternalKeyword
                | StaticKeyword
                | ReadOnlyKeyword
        )
    }

    /// Node class produced for a node kind. Structured trivia kinds double as node kinds.
    pub fn syntax_type(self) -> Option<SyntaxType> {
        use SyntaxKind::*;
        let ty = match self {
            CompilationUnit => SyntaxType::CompilationUnit,
            UsingDirective => SyntaxType::UsingDirective,
            NameEquals => SyntaxType::NameEquals,
            NamespaceDeclaration => SyntaxType::NamespaceDeclaration,
            ClassDeclaration => SyntaxType::ClassDeclaration,
            BaseList => SyntaxType::BaseList,
            SimpleBaseType => SyntaxType::SimpleBaseType,
            FieldDeclaration => SyntaxType::FieldDeclaration,
            MethodDeclaration => SyntaxType::MethodDeclaration,
            ParameterList => SyntaxType::ParameterList,
            Parameter => SyntaxType::Parameter,
            VariableDeclaration => SyntaxType::VariableDeclaration,
            VariableDeclarator => SyntaxType::VariableDeclarator,
            EqualsValueClause => SyntaxType::EqualsValueClause,
            Block => SyntaxType::Block,
            LocalDeclarationStatement => SyntaxType::LocalDeclarationStatement,
            ExpressionStatement => SyntaxType::ExpressionStatement,
            ReturnStatement => SyntaxType::ReturnStatement,
            IfStatement => SyntaxType::IfStatement,
            ElseClause => SyntaxType::ElseClause,
            WhileStatement => SyntaxType::WhileStatement,
            EmptyStatement => SyntaxType::EmptyStatement,
            IdentifierName => SyntaxType::IdentifierName,
            QualifiedName => SyntaxType::QualifiedName,
            PredefinedType => SyntaxType::PredefinedType,
            NumericLiteralExpression
            | StringLiteralExpression
            | CharacterLiteralExpression
            | TrueLiteralExpression
            | FalseLiteralExpression
            | NullLiteralExpression => SyntaxType::LiteralExpression,
            AddExpression
            | SubtractExpression
            | MultiplyExpression
            | DivideExpression
            | ModuloExpression
            | LessThanExpression
            | GreaterThanExpression
            | LessThanOrEqualExpression
            | GreaterThanOrEqualExpression
            | EqualsExpression
            | NotEqualsExpression
            | LogicalAndExpression
            | LogicalOrExpression => SyntaxType::BinaryExpression,
            SimpleAssignmentExpression | AddAssignmentExpression | SubtractAssignmentExpression => {
                SyntaxType::AssignmentExpression
            }
            UnaryMinusExpression | LogicalNotExpression => SyntaxType::PrefixUnaryExpression,
            ParenthesizedExpression => SyntaxType::ParenthesizedExpression,
            InvocationExpression => SyntaxType::InvocationExpression,
            ArgumentList => SyntaxType::ArgumentList,
            Argument => SyntaxType::Argument,
            SimpleMemberAccessExpression => SyntaxType::MemberAccessExpression,
            ObjectCreationExpression => SyntaxType::ObjectCreationExpression,
            SkippedTokensTrivia => SyntaxType::SkippedTokensTrivia,
            RegionDirectiveTrivia => SyntaxType::RegionDirectiveTrivia,
            EndRegionDirectiveTrivia => SyntaxType::EndRegionDirectiveTrivia,
            _ => return Option::None,
        };
        Some(ty)
    }

    /// The operator or literal token a multi-kind node implies by its own kind.
    pub fn implied_token(self) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        let token = match self {
            AddExpression => PlusToken,
            SubtractExpression => MinusToken,
            MultiplyExpression => AsteriskToken,
            DivideExpression => SlashToken,
            ModuloExpression => PercentToken,
            LessThanExpression => LessThanToken,
            GreaterThanExpression => GreaterThanToken,
            LessThanOrEqualExpression => LessThanEqualsToken,
            GreaterThanOrEqualExpression => GreaterThanEqualsToken,
            EqualsExpression => EqualsEqualsToken,
            NotEqualsExpression => ExclamationEqualsToken,
            LogicalAndExpression => AmpersandAmpersandToken,
            LogicalOrExpression => BarBarToken,
            SimpleAssignmentExpression => EqualsToken,
            AddAssignmentExpression => PlusEqualsToken,
            SubtractAssignmentExpression => MinusEqualsToken,
            UnaryMinusExpression => MinusToken,
            LogicalNotExpression => ExclamationToken,
            SimpleMemberAccessExpression => DotToken,
            TrueLiteralExpression => TrueKeyword,
            FalseLiteralExpression => FalseKeyword,
            NullLiteralExpression => NullKeyword,
            _ => return Option::None,
        };
        Some(token)
    }

    pub fn literal_expression_for(token: SyntaxKind) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        match token {
            NumericLiteralToken => Some(NumericLiteralExpression),
            StringLiteralToken => Some(StringLiteralExpression),
            CharacterLiteralToken => Some(CharacterLiteralExpression),
            TrueKeyword => Some(TrueLiteralExpression),
            FalseKeyword => Some(FalseLiteralExpression),
            NullKeyword => Some(NullLiteralExpression),
            _ => Option::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in SyntaxKind::iter() {
            assert_eq!(SyntaxKind::from_str(kind.name()), Ok(kind));
        }
    }

    #[test]
    fn test_fixed_token_text() {
        assert_eq!(SyntaxKind::ClassKeyword.text(), Some("class"));
        assert_eq!(SyntaxKind::LessThanEqualsToken.text(), Some("<="));
        assert_eq!(SyntaxKind::EndOfFileToken.text(), Some(""));
        assert_eq!(SyntaxKind::IdentifierToken.text(), None);
        assert!(SyntaxKind::IdentifierToken.is_token());
        assert!(!SyntaxKind::ClassDeclaration.is_token());
    }

    #[test]
    fn test_lookups_without_a_match() {
        assert_eq!(SyntaxKind::SemicolonToken.syntax_type(), Option::None);
        assert_eq!(SyntaxKind::ClassDeclaration.implied_token(), Option::None);
        assert_eq!(SyntaxKind::literal_expression_for(SyntaxKind::IdentifierToken), Option::None);
        assert_eq!(
            SyntaxKind::literal_expression_for(SyntaxKind::TrueKeyword),
            Some(SyntaxKind::TrueLiteralExpression)
        );
    }

    #[test]
    fn test_every_implied_token_is_fixed() {
        for kind in SyntaxKind::iter() {
            if let Some(token) = kind.implied_token() {
                assert!(token.is_fixed_token(), "{kind} implies {token}");
            }
        }
    }
}
