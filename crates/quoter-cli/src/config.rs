//! Per-invocation options shared by every command.

use clap::{Args, ValueEnum};
use quoter_core::QuoterOptions;
use quoter_syntax::ParseContext;
use std::path::PathBuf;

/// Where the source text comes from and how to parse it
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Source text; read from stdin when neither this nor --file is given
    pub text: Option<String>,

    /// Read the source text from a file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// What the source text is expected to be
    #[arg(long, value_enum, default_value = "unit")]
    pub context: ContextArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ContextArg {
    Unit,
    Member,
    Statement,
    Expression,
}

impl From<ContextArg> for ParseContext {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::Unit => ParseContext::Unit,
            ContextArg::Member => ParseContext::Member,
            ContextArg::Statement => ParseContext::Statement,
            ContextArg::Expression => ParseContext::Expression,
        }
    }
}

/// Quoting switches, applied on top of the config file
#[derive(Debug, Clone, Default, Args)]
pub struct FormatArgs {
    /// Quote whitespace and comments exactly instead of normalizing
    #[arg(long)]
    pub preserve_whitespace: bool,

    /// Keep `With...` calls that do not change the result
    #[arg(long)]
    pub keep_redundant_calls: bool,

    /// Omit the `SyntaxFactory.` prefix
    #[arg(long)]
    pub using_static: bool,

    /// Put opening parentheses on their own line
    #[arg(long)]
    pub open_paren_on_new_line: bool,

    /// Put closing parentheses on their own line
    #[arg(long)]
    pub close_paren_on_new_line: bool,
}

impl FormatArgs {
    pub fn apply(&self, mut options: QuoterOptions) -> QuoterOptions {
        if self.preserve_whitespace {
            options.use_default_formatting = false;
        }
        if self.keep_redundant_calls {
            options.remove_redundant_modifying_calls = false;
        }
        options.shorten_with_static_import |= self.using_static;
        options.open_parenthesis_on_new_line |= self.open_paren_on_new_line;
        options.closing_parenthesis_on_new_line |= self.close_paren_on_new_line;
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_override_config() {
        let flags = FormatArgs {
            preserve_whitespace: true,
            using_static: true,
            ..FormatArgs::default()
        };
        let base = QuoterOptions {
            closing_parenthesis_on_new_line: true,
            ..QuoterOptions::default()
        };
        assert_eq!(
            flags.apply(base),
            QuoterOptions {
                use_default_formatting: false,
                remove_redundant_modifying_calls: true,
                shorten_with_static_import: true,
                open_parenthesis_on_new_line: false,
                closing_parenthesis_on_new_line: true,
            }
        );
    }

    #[test]
    fn test_no_flags_leave_config_untouched() {
        let base = QuoterOptions::exact();
        assert_eq!(FormatArgs::default().apply(base), base);
    }
}
