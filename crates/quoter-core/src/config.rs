use serde::{Deserialize, Serialize};

/// Switches that shape the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoterOptions {
    /// Drop whitespace from the output and append `.NormalizeWhitespace()` to the root.
    pub use_default_formatting: bool,
    /// Drop `With...` calls that do not change the text of the node they modify.
    pub remove_redundant_modifying_calls: bool,
    /// Omit the `SyntaxFactory.` prefix.
    pub shorten_with_static_import: bool,
    pub open_parenthesis_on_new_line: bool,
    pub closing_parenthesis_on_new_line: bool,
}

impl Default for QuoterOptions {
    fn default() -> Self {
        Self {
            use_default_formatting: true,
            remove_redundant_modifying_calls: true,
            shorten_with_static_import: false,
            open_parenthesis_on_new_line: false,
            closing_parenthesis_on_new_line: false,
        }
    }
}

impl QuoterOptions {
    /// Options that reproduce the input byte for byte.
    pub fn exact() -> Self {
        Self {
            use_default_formatting: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_fields_take_defaults() -> eyre::Result<()> {
        let options: QuoterOptions = serde_json::from_str(r#"{"shorten_with_static_import": true}"#)?;
        assert_eq!(
            options,
            QuoterOptions {
                shorten_with_static_import: true,
                ..QuoterOptions::default()
            }
        );
        Ok(())
    }
}
