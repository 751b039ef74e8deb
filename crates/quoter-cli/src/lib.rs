//! Quoter CLI Library
//!
//! Command-line host for the syntax quoter: reads source text, applies the
//! host's input policy, and prints the factory-call program that rebuilds it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod diagnostics;

pub use quoter_core::{QuoterOptions, Registry};

// CLI-specific error handling
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum CliError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Configuration error: {0}")]
        Config(String),

        #[error("Quoting error: {0}")]
        Quote(#[from] quoter_core::QuoterError),

        #[error("Round trip mismatch")]
        Mismatch { expected: String, actual: String },

        #[error("Invalid input: {0}")]
        InvalidInput(String),
    }

    impl From<eyre::Report> for CliError {
        fn from(err: eyre::Report) -> Self {
            CliError::InvalidInput(err.to_string())
        }
    }

    pub type Result<T> = std::result::Result<T, CliError>;
}

pub use error::{CliError, Result};
