//! Error reporting through miette

use crate::{CliError, Result};
use miette::Diagnostic;
use thiserror::Error;

pub fn setup_error_reporting() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .map_err(|e| CliError::Config(format!("Failed to setup error reporting: {}", e)))?;

    Ok(())
}

#[derive(Error, Debug, Diagnostic)]
pub enum QuoterDiagnostic {
    #[error("{message}")]
    #[diagnostic(
        code(quoter::unsupported),
        help("The construction API has no overload that rebuilds this node")
    )]
    Unsupported { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(quoter::evaluation),
        help("The generated call could not be evaluated against the construction API")
    )]
    Evaluation { message: String },

    #[error("Evaluating the generated code does not reproduce the input")]
    #[diagnostic(code(quoter::round_trip), help("expected:\n{expected}\nactual:\n{actual}"))]
    Mismatch { expected: String, actual: String },

    #[error("{message}")]
    #[diagnostic(code(quoter::config), help("Check quoter.toml for correct syntax and values"))]
    Config { message: String },
}

impl QuoterDiagnostic {
    fn from_cli_error(error: &CliError) -> Option<Self> {
        use quoter_core::QuoterError;
        let diagnostic = match error {
            CliError::Quote(
                err @ (QuoterError::UnsupportedNode(_)
                | QuoterError::UnsupportedModifier { .. }
                | QuoterError::UnsupportedFactory(_)),
            ) => Self::Unsupported {
                message: err.to_string(),
            },
            CliError::Quote(err) => Self::Evaluation {
                message: err.to_string(),
            },
            CliError::Mismatch { expected, actual } => Self::Mismatch {
                expected: expected.clone(),
                actual: actual.clone(),
            },
            CliError::Config(message) => Self::Config {
                message: message.clone(),
            },
            CliError::Io(_) | CliError::InvalidInput(_) => return None,
        };
        Some(diagnostic)
    }
}

/// Prints `error` as a miette report. `false` when it has no diagnostic form.
pub fn render_cli_error(error: &CliError) -> bool {
    match QuoterDiagnostic::from_cli_error(error) {
        Some(diagnostic) => {
            eprintln!("{:?}", miette::Report::new(diagnostic));
            true
        }
        None => false,
    }
}
