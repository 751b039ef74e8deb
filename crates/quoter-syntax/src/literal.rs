//! Canonical literal rendering and escape handling.

use std::fmt::Write as _;

/// Platform line terminator.
pub const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

pub fn escape_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            ch if ch.is_control() => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

pub fn escape_char(ch: char) -> String {
    match ch {
        '\'' => "\\'".to_string(),
        '\\' => "\\\\".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\0' => "\\0".to_string(),
        ch if ch.is_control() => format!("\\u{:04x}", ch as u32),
        _ => ch.to_string(),
    }
}

pub fn render_string(value: &str) -> String {
    format!("\"{}\"", escape_string(value))
}

pub fn render_char(value: char) -> String {
    format!("'{}'", escape_char(value))
}

pub fn render_int(value: i64) -> String {
    value.to_string()
}

pub fn render_double(value: f64) -> String {
    format!("{value:?}")
}

/// Decodes the body of a regular (non-verbatim) string or char literal.
/// Unknown escapes keep the escaped character.
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('u');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Decodes the body of a verbatim string, where `""` stands for one quote.
pub fn unescape_verbatim(body: &str) -> String {
    body.replace("\"\"", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_string_escapes() {
        assert_eq!(render_string("a\"b\\c\n"), r#""a\"b\\c\n""#);
        assert_eq!(render_char('\''), r"'\''");
    }

    #[test]
    fn test_unescape_inverts_escape() {
        let value = "tab\tquote\"back\\slash\u{1}";
        assert_eq!(unescape(&escape_string(value)), value);
    }

    #[test]
    fn test_unknown_escape_keeps_char() {
        assert_eq!(unescape(r"\q"), "q");
        assert_eq!(unescape(r"\u0041"), "A");
    }

    #[test]
    fn test_render_double() {
        assert_eq!(render_double(1.5), "1.5");
        assert_eq!(render_double(1000.0), "1000.0");
    }
}
