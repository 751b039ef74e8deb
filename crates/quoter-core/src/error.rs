use std::result;

use quoter_syntax::{SyntaxError, SyntaxType};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoterError {
    #[error("Unsupported node type: {0}")]
    UnsupportedNode(String),
    #[error("{ty} has no modifier for property {property}")]
    UnsupportedModifier { ty: String, property: String },
    #[error("Unsupported factory: {0} is not registered")]
    UnsupportedFactory(String),
    #[error("Unknown factory: {0}")]
    UnknownFactory(String),
    #[error("No overload of {call} accepts ({arguments})")]
    Resolution { call: String, arguments: String },
    #[error("Unknown member: {0}")]
    UnknownMember(String),
    #[error("{method} cannot be called on {found}")]
    NotANode { method: String, found: String },
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = result::Result<T, QuoterError>;

impl From<eyre::Report> for QuoterError {
    fn from(err: eyre::Report) -> Self {
        QuoterError::Generic(err.to_string())
    }
}

impl From<String> for QuoterError {
    fn from(s: String) -> Self {
        QuoterError::Generic(s)
    }
}

impl From<serde_json::Error> for QuoterError {
    fn from(e: serde_json::Error) -> Self {
        QuoterError::Generic(e.to_string())
    }
}

pub fn unsupported_node(ty: SyntaxType) -> QuoterError {
    QuoterError::UnsupportedNode(ty.type_name())
}

pub fn unsupported_modifier(ty: SyntaxType, property: impl Into<String>) -> QuoterError {
    QuoterError::UnsupportedModifier {
        ty: ty.type_name(),
        property: property.into(),
    }
}

/// Macro to return early with an error
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::error::QuoterError::Generic(format!($($arg)*)))
    };
}
