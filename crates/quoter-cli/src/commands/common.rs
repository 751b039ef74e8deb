//! Input handling shared by every command.

use crate::config::SourceArgs;
use crate::{cli::CliConfig, Result};
use eyre::WrapErr;
use quoter_core::PARSE_ERROR;
use quoter_syntax::{parse, ParseContext, SyntaxNode};
use std::io::Read;

/// Source text that passed the host policy, or the advisory message to show instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Accepted(String),
    Refused(String),
}

pub fn read_source(args: &SourceArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        return Ok(text);
    }
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Empty input and input over the configured length are refused before parsing.
/// Whitespace alone is a valid compilation unit.
pub fn admit(text: String, config: &CliConfig) -> Admission {
    if text.is_empty() {
        return Admission::Refused("Please specify the source text.".to_string());
    }
    let length = text.chars().count();
    if length > config.max_input_length {
        return Admission::Refused(format!(
            "Only strings shorter than {} characters are supported; your input is {} characters long.",
            config.max_input_length, length
        ));
    }
    Admission::Accepted(text)
}

/// Reads, admits and parses the source. `None` after printing an advisory message.
pub fn load_tree(args: &SourceArgs, config: &CliConfig) -> Result<Option<SyntaxNode>> {
    let text = match admit(read_source(args)?, config) {
        Admission::Accepted(text) => text,
        Admission::Refused(message) => {
            println!("{message}");
            return Ok(None);
        }
    };
    let context = ParseContext::from(args.context);
    match parse(&text, context) {
        Some(node) => Ok(Some(node)),
        None => {
            tracing::debug!("input does not parse as {context}");
            println!("{PARSE_ERROR}");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_only_empty_input_is_refused() {
        assert_eq!(
            admit(String::new(), &CliConfig::default()),
            Admission::Refused("Please specify the source text.".to_string())
        );
        assert_eq!(
            admit(" \n\t".to_string(), &CliConfig::default()),
            Admission::Accepted(" \n\t".to_string())
        );
    }

    #[test]
    fn test_length_cap_counts_characters() {
        let config = CliConfig {
            max_input_length: 3,
            ..CliConfig::default()
        };
        assert_eq!(admit("äöü".to_string(), &config), Admission::Accepted("äöü".to_string()));
        assert_eq!(
            admit("abcd".to_string(), &config),
            Admission::Refused(
                "Only strings shorter than 3 characters are supported; your input is 4 characters long."
                    .to_string()
            )
        );
    }
}
