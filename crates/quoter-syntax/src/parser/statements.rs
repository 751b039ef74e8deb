use std::sync::Arc;

use super::{child, make, token, Parser};
use crate::kind::SyntaxKind as K;
use crate::node::{Slot, SyntaxNode};
use crate::types::SyntaxType as T;

impl Parser {
    pub(super) fn block(&mut self) -> Arc<SyntaxNode> {
        let open = self.expect(K::OpenBraceToken);
        let mut statements = Vec::new();
        while !self.at(K::CloseBraceToken) && !self.at_end() {
            if self.starts_statement() {
                statements.push(self.statement());
            } else {
                self.skip();
            }
        }
        let close = self.expect(K::CloseBraceToken);
        make(
            T::Block,
            K::Block,
            vec![token(open), Slot::List(statements), token(close)],
        )
    }

    fn starts_statement(&self) -> bool {
        matches!(
            self.peek(),
            K::OpenBraceToken | K::SemicolonToken | K::ReturnKeyword | K::IfKeyword | K::WhileKeyword
        ) || self.starts_expression()
    }

    /// Always yields a statement; when nothing fits, an expression statement
    /// made of missing tokens.
    pub(super) fn statement(&mut self) -> Arc<SyntaxNode> {
        match self.peek() {
            K::OpenBraceToken => self.block(),
            K::SemicolonToken => {
                let semicolon = self.bump();
                make(T::EmptyStatement, K::EmptyStatement, vec![token(semicolon)])
            }
            K::ReturnKeyword => {
                let keyword = self.bump();
                let expression =
                    (!self.at(K::SemicolonToken) && self.starts_expression()).then(|| self.expression());
                let semicolon = self.expect(K::SemicolonToken);
                make(
                    T::ReturnStatement,
                    K::ReturnStatement,
                    vec![token(keyword), Slot::Node(expression), token(semicolon)],
                )
            }
            K::IfKeyword => {
                let keyword = self.bump();
                let open = self.expect(K::OpenParenToken);
                let condition = self.expression();
                let close = self.expect(K::CloseParenToken);
                let statement = self.statement();
                let else_clause = if self.at(K::ElseKeyword) {
                    let keyword = self.bump();
                    let statement = self.statement();
                    Some(make(
                        T::ElseClause,
                        K::ElseClause,
                        vec![token(keyword), child(statement)],
                    ))
                } else {
                    None
                };
                make(
                    T::IfStatement,
                    K::IfStatement,
                    vec![
                        token(keyword),
                        token(open),
                        child(condition),
                        token(close),
                        child(statement),
                        Slot::Node(else_clause),
                    ],
                )
            }
            K::WhileKeyword => {
                let keyword = self.bump();
                let open = self.expect(K::OpenParenToken);
                let condition = self.expression();
                let close = self.expect(K::CloseParenToken);
                let statement = self.statement();
                make(
                    T::WhileStatement,
                    K::WhileStatement,
                    vec![
                        token(keyword),
                        token(open),
                        child(condition),
                        token(close),
                        child(statement),
                    ],
                )
            }
            _ if self.at_local_declaration() => {
                let ty = self.type_syntax();
                let declaration = self.variable_declaration(ty);
                let semicolon = self.expect(K::SemicolonToken);
                make(
                    T::LocalDeclarationStatement,
                    K::LocalDeclarationStatement,
                    vec![child(declaration), token(semicolon)],
                )
            }
            _ => {
                let expression = self.expression();
                let semicolon = self.expect(K::SemicolonToken);
                make(
                    T::ExpressionStatement,
                    K::ExpressionStatement,
                    vec![child(expression), token(semicolon)],
                )
            }
        }
    }

    /// `T x`, `int x` or `A.B.C x`.
    fn at_local_declaration(&self) -> bool {
        let kind = self.peek();
        if kind.is_predefined_type() {
            return self.peek_at(1) == K::IdentifierToken;
        }
        if kind != K::IdentifierToken {
            return false;
        }
        let mut offset = 1;
        while self.peek_at(offset) == K::DotToken && self.peek_at(offset + 1) == K::IdentifierToken {
            offset += 2;
        }
        self.peek_at(offset) == K::IdentifierToken
    }
}
