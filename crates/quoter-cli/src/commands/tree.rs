//! Parse tree display

use super::common::load_tree;
use crate::config::SourceArgs;
use crate::{cli::CliConfig, Result};
use clap::Args;

/// Arguments for the tree command
#[derive(Debug, Clone, Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Execute the tree command
pub fn tree_command(args: TreeArgs, config: &CliConfig) -> Result<()> {
    if let Some(node) = load_tree(&args.source, config)? {
        print!("{}", node.outline());
    }
    Ok(())
}
