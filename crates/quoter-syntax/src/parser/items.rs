use std::sync::Arc;

use super::{child, make, separated, token, Parser};
use crate::kind::SyntaxKind as K;
use crate::node::{NodeOrToken, Slot, SyntaxNode};
use crate::token::SyntaxToken;
use crate::types::SyntaxType as T;

impl Parser {
    pub(super) fn compilation_unit(&mut self) -> SyntaxNode {
        let mut usings = Vec::new();
        let mut members = Vec::new();
        while !self.at_end() {
            if self.at(K::UsingKeyword) && members.is_empty() {
                usings.push(self.using_directive());
            } else if self.starts_member() {
                members.push(self.member());
            } else {
                self.skip();
            }
        }
        let eof = self.bump();
        SyntaxNode::assemble(
            T::CompilationUnit,
            K::CompilationUnit,
            vec![Slot::List(usings), Slot::List(members), token(eof)],
        )
    }

    fn using_directive(&mut self) -> Arc<SyntaxNode> {
        let keyword = self.bump();
        let static_keyword = self.accept(K::StaticKeyword);
        let alias = if self.at(K::IdentifierToken) && self.peek_at(1) == K::EqualsToken {
            let name = self.identifier_name();
            let equals = self.bump();
            Some(make(
                T::NameEquals,
                K::NameEquals,
                vec![child(name), token(equals)],
            ))
        } else {
            None
        };
        let name = self.name();
        let semicolon = self.expect(K::SemicolonToken);
        make(
            T::UsingDirective,
            K::UsingDirective,
            vec![
                token(keyword),
                token(static_keyword),
                Slot::Node(alias),
                child(name),
                token(semicolon),
            ],
        )
    }

    pub(super) fn starts_member(&self) -> bool {
        let kind = self.peek();
        kind.is_modifier()
            || kind.is_predefined_type()
            || matches!(
                kind,
                K::NamespaceKeyword | K::ClassKeyword | K::IdentifierToken
            )
    }

    pub(super) fn member(&mut self) -> Arc<SyntaxNode> {
        let mut lookahead = 0;
        while self.peek_at(lookahead).is_modifier() {
            lookahead += 1;
        }
        if self.peek_at(lookahead) == K::NamespaceKeyword {
            // namespaces take no modifiers
            for _ in 0..lookahead {
                self.skip();
            }
            return self.namespace_declaration();
        }

        let mut modifiers = Vec::new();
        while self.peek().is_modifier() {
            modifiers.push(self.bump());
        }
        if self.at(K::ClassKeyword) {
            self.class_declaration(modifiers)
        } else {
            self.field_or_method(modifiers)
        }
    }

    fn namespace_declaration(&mut self) -> Arc<SyntaxNode> {
        let keyword = self.bump();
        let name = self.name();
        let open = self.expect(K::OpenBraceToken);
        let mut usings = Vec::new();
        let mut members = Vec::new();
        while !self.at(K::CloseBraceToken) && !self.at_end() {
            if self.at(K::UsingKeyword) && members.is_empty() {
                usings.push(self.using_directive());
            } else if self.starts_member() {
                members.push(self.member());
            } else {
                self.skip();
            }
        }
        let close = self.expect(K::CloseBraceToken);
        let semicolon = self.accept(K::SemicolonToken);
        make(
            T::NamespaceDeclaration,
            K::NamespaceDeclaration,
            vec![
                token(keyword),
                child(name),
                token(open),
                Slot::List(usings),
                Slot::List(members),
                token(close),
                token(semicolon),
            ],
        )
    }

    fn class_declaration(&mut self, modifiers: Vec<SyntaxToken>) -> Arc<SyntaxNode> {
        let keyword = self.bump();
        let identifier = self.expect(K::IdentifierToken);
        let base_list = self.at(K::ColonToken).then(|| self.base_list());
        let open = self.expect(K::OpenBraceToken);
        let mut members = Vec::new();
        while !self.at(K::CloseBraceToken) && !self.at_end() {
            if self.starts_member() {
                members.push(self.member());
            } else {
                self.skip();
            }
        }
        let close = self.expect(K::CloseBraceToken);
        let semicolon = self.accept(K::SemicolonToken);
        make(
            T::ClassDeclaration,
            K::ClassDeclaration,
            vec![
                Slot::TokenList(modifiers),
                token(keyword),
                token(identifier),
                Slot::Node(base_list),
                token(open),
                Slot::List(members),
                token(close),
                token(semicolon),
            ],
        )
    }

    fn base_list(&mut self) -> Arc<SyntaxNode> {
        let colon = self.bump();
        let mut types = vec![NodeOrToken::Node(self.simple_base_type())];
        while self.at(K::CommaToken) {
            types.push(NodeOrToken::Token(self.bump()));
            types.push(NodeOrToken::Node(self.simple_base_type()));
        }
        make(T::BaseList, K::BaseList, vec![token(colon), separated(types)])
    }

    fn simple_base_type(&mut self) -> Arc<SyntaxNode> {
        let ty = self.type_syntax();
        make(T::SimpleBaseType, K::SimpleBaseType, vec![child(ty)])
    }

    fn field_or_method(&mut self, modifiers: Vec<SyntaxToken>) -> Arc<SyntaxNode> {
        let ty = self.type_syntax();
        if self.at(K::IdentifierToken) && self.peek_at(1) == K::OpenParenToken {
            let identifier = self.bump();
            let parameters = self.parameter_list();
            let (body, semicolon) = if self.at(K::OpenBraceToken) {
                (Some(self.block()), SyntaxToken::none())
            } else {
                (None, self.expect(K::SemicolonToken))
            };
            return make(
                T::MethodDeclaration,
                K::MethodDeclaration,
                vec![
                    Slot::TokenList(modifiers),
                    child(ty),
                    token(identifier),
                    child(parameters),
                    Slot::Node(body),
                    token(semicolon),
                ],
            );
        }
        let declaration = self.variable_declaration(ty);
        let semicolon = self.expect(K::SemicolonToken);
        make(
            T::FieldDeclaration,
            K::FieldDeclaration,
            vec![
                Slot::TokenList(modifiers),
                child(declaration),
                token(semicolon),
            ],
        )
    }

    fn parameter_list(&mut self) -> Arc<SyntaxNode> {
        let open = self.expect(K::OpenParenToken);
        let mut parameters = Vec::new();
        if !self.at(K::CloseParenToken) {
            loop {
                parameters.push(NodeOrToken::Node(self.parameter()));
                if !self.at(K::CommaToken) {
                    break;
                }
                parameters.push(NodeOrToken::Token(self.bump()));
            }
        }
        let close = self.expect(K::CloseParenToken);
        make(
            T::ParameterList,
            K::ParameterList,
            vec![token(open), separated(parameters), token(close)],
        )
    }

    fn parameter(&mut self) -> Arc<SyntaxNode> {
        let ty = self.type_syntax();
        let identifier = self.expect(K::IdentifierToken);
        make(
            T::Parameter,
            K::Parameter,
            vec![child(ty), token(identifier)],
        )
    }

    pub(super) fn variable_declaration(&mut self, ty: Arc<SyntaxNode>) -> Arc<SyntaxNode> {
        let mut variables = vec![NodeOrToken::Node(self.variable_declarator())];
        while self.at(K::CommaToken) {
            variables.push(NodeOrToken::Token(self.bump()));
            variables.push(NodeOrToken::Node(self.variable_declarator()));
        }
        make(
            T::VariableDeclaration,
            K::VariableDeclaration,
            vec![child(ty), separated(variables)],
        )
    }

    fn variable_declarator(&mut self) -> Arc<SyntaxNode> {
        let identifier = self.expect(K::IdentifierToken);
        let initializer = if self.at(K::EqualsToken) {
            let equals = self.bump();
            let value = self.expression();
            Some(make(
                T::EqualsValueClause,
                K::EqualsValueClause,
                vec![token(equals), child(value)],
            ))
        } else {
            None
        };
        make(
            T::VariableDeclarator,
            K::VariableDeclarator,
            vec![token(identifier), Slot::Node(initializer)],
        )
    }

    pub(super) fn type_syntax(&mut self) -> Arc<SyntaxNode> {
        if self.peek().is_predefined_type() {
            let keyword = self.bump();
            return make(T::PredefinedType, K::PredefinedType, vec![token(keyword)]);
        }
        self.name()
    }

    pub(super) fn name(&mut self) -> Arc<SyntaxNode> {
        let mut left = self.identifier_name();
        while self.at(K::DotToken) {
            let dot = self.bump();
            let right = self.identifier_name();
            left = make(
                T::QualifiedName,
                K::QualifiedName,
                vec![child(left), token(dot), child(right)],
            );
        }
        left
    }

    pub(super) fn identifier_name(&mut self) -> Arc<SyntaxNode> {
        let identifier = self.expect(K::IdentifierToken);
        make(T::IdentifierName, K::IdentifierName, vec![token(identifier)])
    }
}
