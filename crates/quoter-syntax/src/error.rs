use thiserror::Error;

use crate::kind::SyntaxKind;
use crate::types::SyntaxType;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("{kind} is not a node kind")]
    NotANodeKind { kind: SyntaxKind },
    #[error("{kind} is not a kind of {ty}Syntax")]
    KindMismatch { kind: SyntaxKind, ty: SyntaxType },
    #[error("{ty}Syntax has no property named {name}")]
    UnknownProperty { ty: SyntaxType, name: String },
    #[error("{ty}Syntax.{name} cannot hold {found}")]
    ShapeMismatch {
        ty: SyntaxType,
        name: &'static str,
        found: String,
    },
    #[error("{kind} is not a fixed token, use {hint} instead")]
    NotAFixedToken { kind: SyntaxKind, hint: &'static str },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Macro to return early with an invalid-argument error
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::error::SyntaxError::InvalidArgument(format!($($arg)*)))
    };
}
