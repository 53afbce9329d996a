//! Error type shared by the lexer, the parser and the expression tree.
//!
//! Every failure is terminal for the operation in progress: nothing in the crate retries
//! or downgrades an error coming from a sub-call, it is handed to the caller with `?`.

use crate::symbolic::lexer::Token;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// the lexer met a character that starts none of the known tokens
    #[error("Unexpected character: \"{character}\" at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
    /// the parser met a token that does not fit the grammar at this point
    #[error("Unexpected token {token}: {reason}")]
    SyntaxError { token: Token, reason: String },
    #[error("Unknown binary operator: \"{0}\"")]
    UnknownOperator(String),
    #[error("Unknown function: \"{0}\"")]
    UnknownFunction(String),
    /// a single complex constant must have a zero real part or a zero imaginary part
    #[error(
        "When initializing constant with complex number ({re}, {im}) its real or imaginary part must be 0"
    )]
    InvalidComplexConstant { re: f64, im: f64 },
    #[error("Can not resolve variable \"{0}\"")]
    UnboundVariable(String),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ExprError {
    pub(crate) fn syntax(token: &Token, reason: impl Into<String>) -> Self {
        ExprError::SyntaxError {
            token: token.clone(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExprError>;
