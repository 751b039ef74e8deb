//! Quoter CLI Binary
//!
//! Prints the factory-call program that rebuilds a piece of C#-flavoured
//! source text.
//!
//! # Usage
//!
//! ```bash
//! # Quote a class declaration
//! quoter quote "class C { }" --context member
//!
//! # Quote a file exactly, whitespace and comments included
//! quoter quote --file Program.cs --preserve-whitespace
//!
//! # Verify that the generated code rebuilds the input
//! echo "a + b" | quoter check --context expression
//!
//! # Show the parsed tree
//! quoter tree "return x;" --context statement
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use quoter_cli::{
    cli::CliConfig,
    commands::{self, check::CheckArgs, quote::QuoteArgs, tree::TreeArgs},
    diagnostics::setup_error_reporting,
    Result,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "quoter",
    version = env!("CARGO_PKG_VERSION"),
    about = "Quoter: turns source text into the syntax factory calls that rebuild it",
    long_about = r#"
Quoter parses C#-flavoured source text and prints the SyntaxFactory call
chain that constructs the same tree.

EXAMPLES:
    quoter quote "class C { }" --context member
    quoter quote --file Program.cs --preserve-whitespace
    quoter check "a + b" --context expression
    "#
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, global = true, value_enum)]
    log: Option<LogLevel>,

    /// Set log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the factory calls that rebuild the input
    Quote(QuoteArgs),

    /// Quote, evaluate and compare with the input
    Check(CheckArgs),

    /// Print the parsed tree
    Tree(TreeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_error_reporting()?;
    setup_logging(cli.verbose, cli.quiet, cli.log, cli.log_format)?;

    let config = CliConfig::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Quote(args) => commands::quote_command(args, &config),
        Commands::Check(args) => commands::check_command(args, &config),
        Commands::Tree(args) => commands::tree_command(args, &config),
    };

    match result {
        Ok(_) => {
            if cli.verbose > 0 {
                info!("Command completed successfully");
            }
            Ok(())
        }
        Err(e) => {
            use tracing::error;
            if !quoter_cli::diagnostics::render_cli_error(&e) {
                error!("{}", e);
            }
            if cli.verbose > 0 {
                error!(?e, "detailed error context");
            }
            std::process::exit(1);
        }
    }
}

fn setup_logging(
    verbose: u8,
    quiet: bool,
    log_level: Option<LogLevel>,
    log_format: LogFormat,
) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if let Some(level) = log_level {
        EnvFilter::new(match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // stdout carries the generated code
    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_level(true);

    match log_format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(formatter)
                .with(filter)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(formatter.json())
                .with(filter)
                .init();
        }
    }

    Ok(())
}
