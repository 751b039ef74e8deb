use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::kind::SyntaxKind;
use crate::schema::{self, PropertyDef};

/// Node classes, abstract and concrete. Printed as `<Name>Syntax`.
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
pub enum SyntaxType {
    // abstract
    Expression,
    Type,
    Name,
    SimpleName,
    Statement,
    MemberDeclaration,
    BaseTypeDeclaration,
    BaseType,
    StructuredTrivia,
    DirectiveTrivia,

    // concrete
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
    LiteralExpression,
    BinaryExpression,
    AssignmentExpression,
    PrefixUnaryExpression,
    ParenthesizedExpression,
    InvocationExpression,
    ArgumentList,
    Argument,
    MemberAccessExpression,
    ObjectCreationExpression,
    SkippedTokensTrivia,
    RegionDirectiveTrivia,
    EndRegionDirectiveTrivia,
}

impl SyntaxType {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn type_name(self) -> String {
        format!("{}Syntax", self.name())
    }

    /// Inverse of [`SyntaxType::type_name`].
    pub fn from_type_name(name: &str) -> Option<SyntaxType> {
        let bare = name.strip_suffix("Syntax")?;
        SyntaxType::from_str(bare).ok()
    }

    pub fn base(self) -> Option<SyntaxType> {
        use SyntaxType::*;
        let base = match self {
            Expression | Statement | MemberDeclaration | BaseType | StructuredTrivia => {
                return None
            }
            Type => Expression,
            Name => Type,
            SimpleName => Name,
            BaseTypeDeclaration => MemberDeclaration,
            DirectiveTrivia => StructuredTrivia,

            IdentifierName => SimpleName,
            QualifiedName => Name,
            PredefinedType => Type,
            LiteralExpression
            | BinaryExpression
            | AssignmentExpression
            | PrefixUnaryExpression
            | ParenthesizedExpression
            | InvocationExpression
            | MemberAccessExpression
            | ObjectCreationExpression => Expression,
            Block
            | LocalDeclarationStatement
            | ExpressionStatement
            | ReturnStatement
            | IfStatement
            | WhileStatement
            | EmptyStatement => Statement,
            NamespaceDeclaration | FieldDeclaration | MethodDeclaration => MemberDeclaration,
            ClassDeclaration => BaseTypeDeclaration,
            SimpleBaseType => BaseType,
            SkippedTokensTrivia => StructuredTrivia,
            RegionDirectiveTrivia | EndRegionDirectiveTrivia => DirectiveTrivia,
            CompilationUnit | UsingDirective | NameEquals | BaseList | ParameterList
            | Parameter | VariableDeclaration | VariableDeclarator | EqualsValueClause
            | ElseClause | ArgumentList | Argument => return None,
        };
        Some(base)
    }

    pub fn is_abstract(self) -> bool {
        use SyntaxType::*;
        matches!(
            self,
            Expression
                | Type
                | Name
                | SimpleName
                | Statement
                | MemberDeclaration
                | BaseTypeDeclaration
                | BaseType
                | StructuredTrivia
                | DirectiveTrivia
        )
    }

    pub fn is_directive(self) -> bool {
        SyntaxType::DirectiveTrivia.is_assignable_from(self)
    }

    /// Whether a node of class `other` can stand where `self` is expected.
    pub fn is_assignable_from(self, other: SyntaxType) -> bool {
        let mut current = Some(other);
        while let Some(ty) = current {
            if ty == self {
                return true;
            }
            current = ty.base();
        }
        false
    }

    /// The kind a node of this class gets when no kind is supplied.
    /// `None` for abstract classes and for classes whose factories take the kind.
    pub fn default_kind(self) -> Option<SyntaxKind> {
        if self.is_abstract() || self.takes_kind_argument() {
            return None;
        }
        SyntaxKind::from_str(self.name()).ok()
    }

    /// Classes shared by several kinds; their factories take the kind as first argument.
    pub fn takes_kind_argument(self) -> bool {
        use SyntaxType::*;
        matches!(
            self,
            LiteralExpression
                | BinaryExpression
                | AssignmentExpression
                | PrefixUnaryExpression
                | MemberAccessExpression
        )
    }

    pub fn properties(self) -> &'static [PropertyDef] {
        schema::properties(self)
    }

    pub fn property(self, name: &str) -> Option<(usize, &'static PropertyDef)> {
        self.properties()
            .iter()
            .enumerate()
            .find(|(_, def)| def.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_hierarchy() {
        assert!(SyntaxType::Expression.is_assignable_from(SyntaxType::IdentifierName));
        assert!(SyntaxType::Type.is_assignable_from(SyntaxType::PredefinedType));
        assert!(SyntaxType::MemberDeclaration.is_assignable_from(SyntaxType::ClassDeclaration));
        assert!(!SyntaxType::Statement.is_assignable_from(SyntaxType::IdentifierName));
        assert!(!SyntaxType::Name.is_assignable_from(SyntaxType::PredefinedType));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(SyntaxType::MemberDeclaration.type_name(), "MemberDeclarationSyntax");
        assert_eq!(
            SyntaxType::from_type_name("UsingDirectiveSyntax"),
            Some(SyntaxType::UsingDirective)
        );
        assert_eq!(SyntaxType::from_type_name("UsingDirective"), None);
    }

    #[test]
    fn test_concrete_types_have_kinds() {
        for ty in SyntaxType::iter().filter(|ty| !ty.is_abstract()) {
            if ty.takes_kind_argument() {
                assert_eq!(ty.default_kind(), None);
            } else {
                let kind = ty.default_kind().expect("single-kind class");
                assert_eq!(kind.syntax_type(), Some(ty));
            }
            assert_eq!(ty.properties().is_empty(), false, "{ty} has no schema");
        }
    }
}
