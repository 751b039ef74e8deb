use std::sync::Arc;

use super::{child, make, separated, token, Parser};
use crate::kind::SyntaxKind as K;
use crate::node::{NodeOrToken, Slot, SyntaxNode};
use crate::types::SyntaxType as T;

/// Node kind and binding power of a binary operator token.
fn binary_operator(kind: K) -> Option<(K, u8)> {
    let entry = match kind {
        K::BarBarToken => (K::LogicalOrExpression, 1),
        K::AmpersandAmpersandToken => (K::LogicalAndExpression, 2),
        K::EqualsEqualsToken => (K::EqualsExpression, 3),
        K::ExclamationEqualsToken => (K::NotEqualsExpression, 3),
        K::LessThanToken => (K::LessThanExpression, 4),
        K::GreaterThanToken => (K::GreaterThanExpression, 4),
        K::LessThanEqualsToken => (K::LessThanOrEqualExpression, 4),
        K::GreaterThanEqualsToken => (K::GreaterThanOrEqualExpression, 4),
        K::PlusToken => (K::AddExpression, 5),
        K::MinusToken => (K::SubtractExpression, 5),
        K::AsteriskToken => (K::MultiplyExpression, 6),
        K::SlashToken => (K::DivideExpression, 6),
        K::PercentToken => (K::ModuloExpression, 6),
        _ => return None,
    };
    Some(entry)
}

fn assignment_operator(kind: K) -> Option<K> {
    match kind {
        K::EqualsToken => Some(K::SimpleAssignmentExpression),
        K::PlusEqualsToken => Some(K::AddAssignmentExpression),
        K::MinusEqualsToken => Some(K::SubtractAssignmentExpression),
        _ => None,
    }
}

fn prefix_operator(kind: K) -> Option<K> {
    match kind {
        K::MinusToken => Some(K::UnaryMinusExpression),
        K::ExclamationToken => Some(K::LogicalNotExpression),
        _ => None,
    }
}

impl Parser {
    pub(super) fn starts_expression(&self) -> bool {
        let kind = self.peek();
        kind.is_literal_token()
            || kind.is_predefined_type()
            || prefix_operator(kind).is_some()
            || matches!(
                kind,
                K::IdentifierToken
                    | K::TrueKeyword
                    | K::FalseKeyword
                    | K::NullKeyword
                    | K::OpenParenToken
                    | K::NewKeyword
            )
    }

    pub(super) fn expression(&mut self) -> Arc<SyntaxNode> {
        let left = self.binary(0);
        match assignment_operator(self.peek()) {
            Some(kind) => {
                let operator = self.bump();
                let right = self.expression();
                make(
                    T::AssignmentExpression,
                    kind,
                    vec![child(left), token(operator), child(right)],
                )
            }
            None => left,
        }
    }

    fn binary(&mut self, min_power: u8) -> Arc<SyntaxNode> {
        let mut left = self.unary();
        while let Some((kind, power)) = binary_operator(self.peek()) {
            if power < min_power {
                break;
            }
            let operator = self.bump();
            let right = self.binary(power + 1);
            left = make(
                T::BinaryExpression,
                kind,
                vec![child(left), token(operator), child(right)],
            );
        }
        left
    }

    fn unary(&mut self) -> Arc<SyntaxNode> {
        match prefix_operator(self.peek()) {
            Some(kind) => {
                let operator = self.bump();
                let operand = self.unary();
                make(
                    T::PrefixUnaryExpression,
                    kind,
                    vec![token(operator), child(operand)],
                )
            }
            None => {
                let primary = self.primary();
                self.postfix(primary)
            }
        }
    }

    fn postfix(&mut self, mut expression: Arc<SyntaxNode>) -> Arc<SyntaxNode> {
        loop {
            expression = match self.peek() {
                K::OpenParenToken => {
                    let arguments = self.argument_list();
                    make(
                        T::InvocationExpression,
                        K::InvocationExpression,
                        vec![child(expression), child(arguments)],
                    )
                }
                K::DotToken => {
                    let dot = self.bump();
                    let name = self.identifier_name();
                    make(
                        T::MemberAccessExpression,
                        K::SimpleMemberAccessExpression,
                        vec![child(expression), token(dot), child(name)],
                    )
                }
                _ => return expression,
            };
        }
    }

    fn primary(&mut self) -> Arc<SyntaxNode> {
        let kind = self.peek();
        if let Some(literal) = K::literal_expression_for(kind) {
            let literal_token = self.bump();
            return make(T::LiteralExpression, literal, vec![token(literal_token)]);
        }
        if kind.is_predefined_type() {
            let keyword = self.bump();
            return make(T::PredefinedType, K::PredefinedType, vec![token(keyword)]);
        }
        match kind {
            K::OpenParenToken => {
                let open = self.bump();
                let inner = self.expression();
                let close = self.expect(K::CloseParenToken);
                make(
                    T::ParenthesizedExpression,
                    K::ParenthesizedExpression,
                    vec![token(open), child(inner), token(close)],
                )
            }
            K::NewKeyword => {
                let keyword = self.bump();
                let ty = self.type_syntax();
                let arguments = self.at(K::OpenParenToken).then(|| self.argument_list());
                make(
                    T::ObjectCreationExpression,
                    K::ObjectCreationExpression,
                    vec![token(keyword), child(ty), Slot::Node(arguments)],
                )
            }
            // a missing identifier stands in for anything else
            _ => self.identifier_name(),
        }
    }

    fn argument_list(&mut self) -> Arc<SyntaxNode> {
        let open = self.expect(K::OpenParenToken);
        let mut arguments = Vec::new();
        if !self.at(K::CloseParenToken) {
            loop {
                let expression = self.expression();
                arguments.push(NodeOrToken::Node(make(
                    T::Argument,
                    K::Argument,
                    vec![child(expression)],
                )));
                if !self.at(K::CommaToken) {
                    break;
                }
                arguments.push(NodeOrToken::Token(self.bump()));
            }
        }
        let close = self.expect(K::CloseParenToken);
        make(
            T::ArgumentList,
            K::ArgumentList,
            vec![token(open), separated(arguments), token(close)],
        )
    }
}
