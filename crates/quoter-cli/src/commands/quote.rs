//! Prints the factory-call program that rebuilds the input

use super::common::load_tree;
use crate::config::{FormatArgs, SourceArgs};
use crate::{cli::CliConfig, Result};
use clap::Args;
use quoter_core::{Printer, Quoter, Registry};

/// Arguments for the quote command
#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub format: FormatArgs,

    /// Emit the call tree as JSON instead of source text
    #[arg(long)]
    pub json: bool,
}

/// Execute the quote command
pub fn quote_command(args: QuoteArgs, config: &CliConfig) -> Result<()> {
    let Some(node) = load_tree(&args.source, config)? else {
        return Ok(());
    };
    let options = args.format.apply(config.quoter);
    let registry = Registry::new();
    let expr = Quoter::new(&registry, options).quote(&node)?;
    if args.json {
        println!("{}", expr.to_json()?);
    } else {
        println!("{}", Printer::new(&options).print(&expr));
    }
    Ok(())
}
