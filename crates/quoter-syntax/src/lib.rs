//! A small C#-flavoured syntax model with full-fidelity trees.
//!
//! Parsing is lossless: every character of the input, including whitespace,
//! comments and unparseable junk, is kept in the tree as trivia. The [`factory`]
//! module exposes the construction API as data so that other crates can search
//! its overloads and call them by name.

pub mod error;
pub mod factory;
pub mod kind;
pub mod lexer;
pub mod literal;
pub mod node;
pub mod normalize;
pub mod parser;
pub mod schema;
pub mod token;
pub mod trivia;
pub mod types;

pub use error::{Result, SyntaxError};
pub use factory::{factories, FactoryDescriptor, ParamDescriptor, ParamType, Returns, Value};
pub use kind::SyntaxKind;
pub use node::{NodeOrToken, PropertyValue, Slot, SyntaxNode};
pub use parser::{parse, parse_compilation_unit, ParseContext};
pub use schema::{PropertyDef, PropertyShape};
pub use token::{SyntaxToken, TokenValue};
pub use trivia::SyntaxTrivia;
pub use types::SyntaxType;
