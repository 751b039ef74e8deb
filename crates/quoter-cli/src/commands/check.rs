//! Round-trip verification command implementation

use super::common::load_tree;
use crate::config::{FormatArgs, SourceArgs};
use crate::{cli::CliConfig, CliError, Result};
use clap::Args;
use quoter_core::{Interpreter, Quoter, Registry};
use tracing::info;

/// Arguments for the check command
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub format: FormatArgs,
}

/// Quotes the input, evaluates the result and compares it with the input's
/// own rendering: normalized under default formatting, verbatim otherwise.
pub fn check_command(args: CheckArgs, config: &CliConfig) -> Result<()> {
    let Some(node) = load_tree(&args.source, config)? else {
        return Ok(());
    };
    let options = args.format.apply(config.quoter);
    let registry = Registry::new();
    let expr = Quoter::new(&registry, options).quote(&node)?;
    info!("quoted into {} calls", expr.call_count());

    let actual = Interpreter::new(&registry).evaluate_node(&expr)?.to_full_string();
    let expected = if options.use_default_formatting {
        node.normalize_whitespace().to_full_string()
    } else {
        node.to_full_string()
    };
    if actual != expected {
        return Err(CliError::Mismatch { expected, actual });
    }
    println!("round trip ok");
    Ok(())
}
