//! Syntax quoting: turn a syntax tree into the factory-call program that
//! rebuilds it, and evaluate such programs back into trees.
//!
//! The [`Registry`] indexes the construction API once; the [`Quoter`] walks a
//! tree and picks one overload per node; the [`Interpreter`] runs the result
//! without a compiler, which is also how the [`Eliminator`] decides which
//! modifier calls are redundant.

pub mod config;
pub mod eliminate;
pub mod error;
pub mod expr;
pub mod interpret;
pub mod printer;
pub mod quoter;
pub mod registry;

pub use config::QuoterOptions;
pub use eliminate::Eliminator;
pub use error::{QuoterError, Result};
pub use expr::{Array, ArrayElement, Call, Expr, Invocation, Literal, Member};
pub use interpret::Interpreter;
pub use printer::Printer;
pub use quoter::{Quoter, PARSE_ERROR};
pub use registry::Registry;

use quoter_syntax::ParseContext;

/// Parses `text` in `context` and prints the program that rebuilds it, or
/// [`PARSE_ERROR`] when the text cannot be parsed in that context.
pub fn quote_text(
    registry: &Registry,
    text: &str,
    context: ParseContext,
    options: QuoterOptions,
) -> Result<String> {
    Quoter::new(registry, options).quote_text(text, context)
}
