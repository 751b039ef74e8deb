//! Command implementations for the quoter CLI

pub mod check;
pub mod common;
pub mod quote;
pub mod tree;

// Re-export command functions
pub use check::check_command;
pub use quote::quote_command;
pub use tree::tree_command;
