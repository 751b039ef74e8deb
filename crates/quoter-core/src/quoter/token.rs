use quoter_syntax::literal::render_double;
use quoter_syntax::{SyntaxKind, SyntaxToken, SyntaxTrivia, TokenValue};

use super::Quoter;
use crate::error::{QuoterError, Result};
use crate::expr::{Expr, Literal, Member};

impl Quoter<'_> {
    /// `None` for an absent token.
    pub(super) fn quote_token(&self, token: &SyntaxToken) -> Result<Option<Expr>> {
        if token.is_none() {
            return Ok(None);
        }
        let leading = self.quote_trivia_list(token.leading())?;
        let trailing = self.quote_trivia_list(token.trailing())?;
        let with_trivia = leading.is_some() || trailing.is_some();
        let kind = token.kind();

        let (name, args) = if token.is_missing() {
            ("MissingToken", vec![Expr::kind(kind)])
        } else if kind == SyntaxKind::IdentifierToken {
            ("Identifier", vec![self.string(token.text())])
        } else if kind.is_literal_token() {
            ("Literal", self.literal_arguments(token, with_trivia)?)
        } else if kind == SyntaxKind::BadToken {
            let args = vec![
                self.or_empty(leading)?,
                self.string(token.text()),
                self.or_empty(trailing)?,
            ];
            return self.factory("BadToken", args).map(Some);
        } else if kind.is_fixed_token() {
            ("Token", vec![Expr::kind(kind)])
        } else {
            return Err(QuoterError::UnsupportedNode(format!("token {kind}")));
        };

        if !with_trivia {
            return self.factory(name, args).map(Some);
        }
        let mut all = Vec::with_capacity(args.len() + 2);
        all.push(self.or_empty(leading)?);
        all.extend(args);
        all.push(self.or_empty(trailing)?);
        self.factory(name, all).map(Some)
    }

    /// The value alone when the token's text is its canonical rendering,
    /// otherwise the raw text followed by the value.
    fn literal_arguments(&self, token: &SyntaxToken, with_trivia: bool) -> Result<Vec<Expr>> {
        let value = match token.value() {
            TokenValue::Int(value) => Expr::Literal(Literal::Number(value.to_string())),
            TokenValue::Double(value) => Expr::Literal(Literal::Number(render_double(*value))),
            TokenValue::Str(value) => self.string(value),
            TokenValue::Char(value) => Expr::Literal(Literal::Char(*value)),
            TokenValue::None => crate::bail!("literal token {} carries no value", token.text()),
        };
        let canonical = token.value().canonical_text();
        if with_trivia || canonical.as_deref() != Some(token.text()) {
            Ok(vec![self.string(token.text()), value])
        } else {
            Ok(vec![value])
        }
    }

    pub(super) fn quote_token_list(&self, tokens: &[SyntaxToken]) -> Result<Option<Expr>> {
        let mut items = Vec::with_capacity(tokens.len());
        for token in tokens {
            items.extend(self.quote_token(token)?);
        }
        if items.is_empty() {
            return Ok(None);
        }
        self.factory("TokenList", items).map(Some)
    }

    fn quote_trivia_list(&self, trivia: &[SyntaxTrivia]) -> Result<Option<Expr>> {
        let mut items = Vec::with_capacity(trivia.len());
        for trivia in trivia {
            items.extend(self.quote_trivia(trivia)?);
        }
        if items.is_empty() {
            return Ok(None);
        }
        self.factory("TriviaList", items).map(Some)
    }

    fn quote_trivia(&self, trivia: &SyntaxTrivia) -> Result<Option<Expr>> {
        if let Some(structure) = trivia.structure() {
            let node = Expr::Call(self.quote_node(structure)?);
            return self.factory("Trivia", vec![node]).map(Some);
        }
        // layout is regenerated by normalization
        if trivia.text().is_empty() || (self.options.use_default_formatting && trivia.is_layout()) {
            return Ok(None);
        }
        if let Some(name) = trivia.constant_name() {
            return Ok(Some(Expr::Member(Member::Constant(name.to_string()))));
        }
        let name = match trivia.kind() {
            kind if kind.is_comment_trivia() => "Comment",
            SyntaxKind::PreprocessingMessageTrivia => "PreprocessingMessage",
            SyntaxKind::WhitespaceTrivia => "Whitespace",
            SyntaxKind::EndOfLineTrivia => "EndOfLine",
            other => return Err(QuoterError::UnsupportedNode(format!("trivia {other}"))),
        };
        self.factory(name, vec![self.string(trivia.text())]).map(Some)
    }

    fn or_empty(&self, list: Option<Expr>) -> Result<Expr> {
        match list {
            Some(list) => Ok(list),
            None => self.factory("TriviaList", vec![]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuoterOptions;
    use crate::registry::Registry;
    use pretty_assertions::assert_eq;

    fn quote(options: QuoterOptions, token: &SyntaxToken) -> Option<Expr> {
        let registry = Registry::new();
        Quoter::new(&registry, options)
            .quote_token(token)
            .expect("quoted")
    }

    #[test]
    fn test_absent_and_missing_tokens() {
        assert_eq!(quote(QuoterOptions::default(), &SyntaxToken::none()), None);
        assert_eq!(
            quote(QuoterOptions::default(), &SyntaxToken::missing(SyntaxKind::CloseBraceToken)),
            Some(Expr::call("MissingToken", vec![Expr::kind(SyntaxKind::CloseBraceToken)]))
        );
    }

    #[test]
    fn test_literal_keeps_text_only_when_needed() {
        let plain = SyntaxToken::literal(SyntaxKind::NumericLiteralToken, "1", TokenValue::Int(1));
        assert_eq!(
            quote(QuoterOptions::default(), &plain),
            Some(Expr::call("Literal", vec![Expr::Literal(Literal::Number("1".into()))]))
        );
        let hex = SyntaxToken::literal(SyntaxKind::NumericLiteralToken, "0x10", TokenValue::Int(16));
        assert_eq!(
            quote(QuoterOptions::default(), &hex),
            Some(Expr::call(
                "Literal",
                vec![Expr::str("0x10"), Expr::Literal(Literal::Number("16".into()))]
            ))
        );
    }

    #[test]
    fn test_whitespace_depends_on_formatting() {
        let token = SyntaxToken::new(SyntaxKind::ClassKeyword).with_trailing(vec![SyntaxTrivia::whitespace(" ")]);
        assert_eq!(
            quote(QuoterOptions::default(), &token),
            Some(Expr::call("Token", vec![Expr::kind(SyntaxKind::ClassKeyword)]))
        );
        assert_eq!(
            quote(QuoterOptions::exact(), &token),
            Some(Expr::call(
                "Token",
                vec![
                    Expr::call("TriviaList", vec![]),
                    Expr::kind(SyntaxKind::ClassKeyword),
                    Expr::call(
                        "TriviaList",
                        vec![Expr::Member(Member::Constant("Space".into()))]
                    ),
                ]
            ))
        );
    }

    #[test]
    fn test_comments_survive_default_formatting() {
        let token = SyntaxToken::new(SyntaxKind::SemicolonToken)
            .with_trailing(vec![SyntaxTrivia::whitespace(" "), SyntaxTrivia::comment("// done")]);
        assert_eq!(
            quote(QuoterOptions::default(), &token),
            Some(Expr::call(
                "Token",
                vec![
                    Expr::call("TriviaList", vec![]),
                    Expr::kind(SyntaxKind::SemicolonToken),
                    Expr::call("TriviaList", vec![Expr::call("Comment", vec![Expr::str("// done")])]),
                ]
            ))
        );
    }
}
