//! Full-fidelity lexer: every input character ends up in exactly one token or trivia.
//!
//! Trailing trivia run up to and including the first line break after a token;
//! everything else is leading trivia of the following token.

use std::sync::Arc;

use winnow::combinator::alt;
use winnow::error::{ContextError, ErrMode};
use winnow::token::{literal, take_till, take_while};
use winnow::{ModalResult, Parser};

use crate::kind::{SyntaxKind, PUNCTUATION};
use crate::literal::{unescape, unescape_verbatim};
use crate::node::{Slot, SyntaxNode};
use crate::token::{SyntaxToken, TokenValue};
use crate::trivia::SyntaxTrivia;
use crate::types::SyntaxType;

pub fn lex(source: &str) -> Vec<SyntaxToken> {
    let mut lexer = Lexer {
        input: source,
        line_start: true,
    };
    let mut tokens = Vec::new();
    loop {
        let leading = lexer.leading_trivia();
        if lexer.input.is_empty() {
            tokens.push(SyntaxToken::new(SyntaxKind::EndOfFileToken).with_leading(leading));
            break;
        }
        let token = lexer.next_token();
        let trailing = lexer.trailing_trivia();
        tokens.push(token.with_leading(leading).with_trailing(trailing));
    }
    tracing::trace!(count = tokens.len(), "lexed tokens");
    tokens
}

struct Lexer<'s> {
    input: &'s str,
    line_start: bool,
}

impl<'s> Lexer<'s> {
    fn leading_trivia(&mut self) -> Vec<SyntaxTrivia> {
        let mut trivia = Vec::new();
        loop {
            if self.line_start {
                if let Some(directive) = directive(&mut self.input) {
                    trivia.push(directive);
                    continue;
                }
            }
            if let Some(text) = eat(&mut self.input, whitespace) {
                trivia.push(SyntaxTrivia::whitespace(text));
            } else if let Some(text) = eat(&mut self.input, end_of_line) {
                trivia.push(SyntaxTrivia::end_of_line(text));
                self.line_start = true;
            } else if let Some(text) = comment(&mut self.input) {
                trivia.push(SyntaxTrivia::comment(text));
                self.line_start = false;
            } else {
                return trivia;
            }
        }
    }

    fn trailing_trivia(&mut self) -> Vec<SyntaxTrivia> {
        let mut trivia = Vec::new();
        loop {
            if let Some(text) = eat(&mut self.input, whitespace) {
                trivia.push(SyntaxTrivia::whitespace(text));
            } else if let Some(text) = eat(&mut self.input, end_of_line) {
                trivia.push(SyntaxTrivia::end_of_line(text));
                self.line_start = true;
                return trivia;
            } else if let Some(text) = comment(&mut self.input) {
                trivia.push(SyntaxTrivia::comment(text));
            } else {
                return trivia;
            }
        }
    }

    fn next_token(&mut self) -> SyntaxToken {
        self.line_start = false;
        let input = &mut self.input;
        if let Some(text) = eat(input, identifier) {
            return match SyntaxKind::keyword_from_text(text) {
                Some(keyword) => SyntaxToken::new(keyword),
                None => SyntaxToken::identifier(text),
            };
        }
        if let Some((text, value)) = number(input) {
            return SyntaxToken::literal(SyntaxKind::NumericLiteralToken, text, value);
        }
        if let Some((text, value)) = string_literal(input) {
            return SyntaxToken::literal(SyntaxKind::StringLiteralToken, text, TokenValue::Str(value));
        }
        if let Some((text, value)) = char_literal(input) {
            return SyntaxToken::literal(
                SyntaxKind::CharacterLiteralToken,
                text,
                TokenValue::Char(value),
            );
        }
        if let Some((punct, kind)) = PUNCTUATION.iter().find(|(punct, _)| input.starts_with(punct)) {
            *input = &input[punct.len()..];
            return SyntaxToken::new(*kind);
        }
        let width = input.chars().next().map_or(0, char::len_utf8);
        let (text, rest) = input.split_at(width);
        *input = rest;
        SyntaxToken::bad(text)
    }
}

/// Runs `parser`, rewinding the input when it does not match.
fn eat<'s, O>(
    input: &mut &'s str,
    mut parser: impl Parser<&'s str, O, ErrMode<ContextError>>,
) -> Option<O> {
    let checkpoint = *input;
    match parser.parse_next(input) {
        Ok(output) => Some(output),
        Err(_) => {
            *input = checkpoint;
            None
        }
    }
}

fn whitespace<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| c == ' ' || c == '\t').parse_next(input)
}

fn end_of_line<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    alt((literal("\r\n"), literal("\n"), literal("\r"))).parse_next(input)
}

fn rest_of_line<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_till(0.., |c: char| c == '\n' || c == '\r').parse_next(input)
}

fn identifier<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    (take_while(1, is_ident_start), take_while(0.., is_ident_continue))
        .take()
        .parse_next(input)
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

fn comment<'s>(input: &mut &'s str) -> Option<&'s str> {
    let start = *input;
    if input.starts_with("//") {
        *input = &input[2..];
        eat(input, rest_of_line);
    } else if input.starts_with("/*") {
        let end = input[2..].find("*/").map_or(input.len(), |at| at + 4);
        *input = &input[end..];
    } else {
        return None;
    }
    Some(&start[..start.len() - input.len()])
}

/// `#region` / `#endregion` at the start of a line, as structured trivia.
fn directive(input: &mut &str) -> Option<SyntaxTrivia> {
    let mut probe = *input;
    eat(&mut probe, literal("#"))?;
    let gap = eat(&mut probe, whitespace);
    let (kind, ty, keyword) = match eat(&mut probe, identifier)? {
        "region" => (
            SyntaxKind::RegionDirectiveTrivia,
            SyntaxType::RegionDirectiveTrivia,
            SyntaxKind::RegionKeyword,
        ),
        "endregion" => (
            SyntaxKind::EndRegionDirectiveTrivia,
            SyntaxType::EndRegionDirectiveTrivia,
            SyntaxKind::EndRegionKeyword,
        ),
        _ => return None,
    };

    let mut message_trivia = Vec::new();
    if let Some(space) = eat(&mut probe, whitespace) {
        message_trivia.push(SyntaxTrivia::whitespace(space));
    }
    if let Some(message) = eat(&mut probe, rest_of_line).filter(|m| !m.is_empty()) {
        message_trivia.push(SyntaxTrivia::preprocessing_message(message));
    }
    let line_break: Vec<_> = eat(&mut probe, end_of_line)
        .map(SyntaxTrivia::end_of_line)
        .into_iter()
        .collect();
    *input = probe;

    let hash = SyntaxToken::new(SyntaxKind::HashToken)
        .with_trailing(gap.map(SyntaxTrivia::whitespace).into_iter().collect());
    let end = SyntaxToken::new(SyntaxKind::EndOfDirectiveToken)
        .with_leading(message_trivia)
        .with_trailing(line_break);
    let node = SyntaxNode::assemble(
        ty,
        kind,
        vec![
            Slot::Token(hash),
            Slot::Token(SyntaxToken::new(keyword)),
            Slot::Token(end),
            Slot::Bool(true),
        ],
    );
    Some(SyntaxTrivia::structured(Arc::new(node)))
}

fn number<'s>(input: &mut &'s str) -> Option<(&'s str, TokenValue)> {
    let start = *input;
    let bytes = start.as_bytes();
    if !bytes.first()?.is_ascii_digit() {
        return None;
    }
    if (start.starts_with("0x") || start.starts_with("0X"))
        && bytes.get(2).map_or(false, u8::is_ascii_hexdigit)
    {
        let len = 2 + start[2..].bytes().take_while(u8::is_ascii_hexdigit).count();
        let text = &start[..len];
        *input = &start[len..];
        return Some((text, hex_value(&text[2..])));
    }

    let digits = |from: usize| start[from..].bytes().take_while(u8::is_ascii_digit).count();
    let mut len = digits(0);
    let mut real = false;
    if bytes.get(len) == Some(&b'.') && bytes.get(len + 1).map_or(false, u8::is_ascii_digit) {
        len += 1 + digits(len + 1);
        real = true;
    }
    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(len + 1), Some(b'+' | b'-')));
        let exponent = digits(len + 1 + sign);
        if exponent > 0 {
            len += 1 + sign + exponent;
            real = true;
        }
    }
    let text = &start[..len];
    *input = &start[len..];
    let value = match (real, text.parse::<i64>()) {
        (false, Ok(value)) => TokenValue::Int(value),
        _ => TokenValue::Double(text.parse::<f64>().unwrap_or(f64::INFINITY)),
    };
    Some((text, value))
}

fn hex_value(digits: &str) -> TokenValue {
    match i64::from_str_radix(digits, 16) {
        Ok(value) => TokenValue::Int(value),
        Err(_) => TokenValue::Double(digits.chars().fold(0.0, |acc, c| {
            acc * 16.0 + f64::from(c.to_digit(16).unwrap_or(0))
        })),
    }
}

/// Regular or verbatim string. Unterminated strings end at the line break (or input end).
fn string_literal<'s>(input: &mut &'s str) -> Option<(&'s str, String)> {
    let start = *input;
    if start.starts_with("@\"") {
        let body_start = 2;
        let mut end = start.len();
        let mut closed = false;
        let mut idx = body_start;
        let bytes = start.as_bytes();
        while idx < bytes.len() {
            if bytes[idx] == b'"' {
                if bytes.get(idx + 1) == Some(&b'"') {
                    idx += 2;
                    continue;
                }
                end = idx + 1;
                closed = true;
                break;
            }
            idx += 1;
        }
        let body_end = if closed { end - 1 } else { end };
        *input = &start[end..];
        return Some((&start[..end], unescape_verbatim(&start[body_start..body_end])));
    }
    quoted(input, '"')
}

fn char_literal<'s>(input: &mut &'s str) -> Option<(&'s str, char)> {
    let (text, body) = quoted(input, '\'')?;
    Some((text, body.chars().next().unwrap_or('\0')))
}

fn quoted<'s>(input: &mut &'s str, quote: char) -> Option<(&'s str, String)> {
    let start = *input;
    if !start.starts_with(quote) {
        return None;
    }
    let bytes = start.as_bytes();
    let mut idx = 1;
    let mut escape = false;
    let mut closed = false;
    while idx < bytes.len() {
        let b = bytes[idx];
        if b == b'\n' || b == b'\r' {
            break;
        }
        idx += 1;
        if b == b'\\' && !escape {
            escape = true;
            continue;
        }
        if b == quote as u8 && !escape {
            closed = true;
            break;
        }
        escape = false;
    }
    let body_end = if closed { idx - 1 } else { idx };
    *input = &start[idx..];
    Some((&start[..idx], unescape(&start[1..body_end])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        lex(source).iter().map(SyntaxToken::kind).collect()
    }

    #[test]
    fn test_lex_is_lossless() {
        let source = "using System;\r\n// note\nclass C /* x */ {\n  int x = 0x1F + 1.5e3; \"a\\\"b\" 'c' @\"q\"\"q\" $ }\n";
        let text: String = lex(source).iter().map(SyntaxToken::to_full_string).collect();
        assert_eq!(text, source);
    }

    #[test]
    fn test_trailing_trivia_stops_after_line_break() {
        let tokens = lex("a // c\n  b");
        assert_eq!(tokens[0].trailing().len(), 3);
        assert_eq!(tokens[1].leading().len(), 1);
        assert_eq!(tokens[1].text(), "b");
    }

    #[test]
    fn test_keywords_and_punctuation() {
        assert_eq!(
            kinds("class C{a<=b;}"),
            vec![
                SyntaxKind::ClassKeyword,
                SyntaxKind::IdentifierToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::IdentifierToken,
                SyntaxKind::LessThanEqualsToken,
                SyntaxKind::IdentifierToken,
                SyntaxKind::SemicolonToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn test_literal_values() {
        let tokens = lex(r#"0x10 1.50 "a\tb" @"c""d" 'x' 1."#);
        assert_eq!(tokens[0].value(), &TokenValue::Int(16));
        assert_eq!(tokens[1].value(), &TokenValue::Double(1.5));
        assert_eq!(tokens[2].value(), &TokenValue::Str("a\tb".to_string()));
        assert_eq!(tokens[3].value(), &TokenValue::Str("c\"d".to_string()));
        assert_eq!(tokens[4].value(), &TokenValue::Char('x'));
        assert_eq!(tokens[5].value(), &TokenValue::Int(1));
        assert_eq!(tokens[6].kind(), SyntaxKind::DotToken);
    }

    #[test]
    fn test_region_directive_is_structured_trivia() {
        let tokens = lex("#region Fields\nint x;\n#endregion\n");
        let region = &tokens[0].leading()[0];
        assert_eq!(region.kind(), SyntaxKind::RegionDirectiveTrivia);
        assert_eq!(region.to_full_string(), "#region Fields\n");
        let eof = tokens.last().expect("eof");
        assert_eq!(eof.leading()[0].kind(), SyntaxKind::EndRegionDirectiveTrivia);
    }

    #[test]
    fn test_hash_outside_line_start_is_a_token() {
        assert_eq!(kinds("a #region")[1], SyntaxKind::HashToken);
    }

    #[test]
    fn test_unterminated_string_stops_at_line_end() {
        let tokens = lex("\"abc\nx");
        assert_eq!(tokens[0].text(), "\"abc");
        assert_eq!(tokens[1].text(), "x");
    }
}
