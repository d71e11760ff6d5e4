//! Error types for score reading
//!
//! Almost every irregularity in a score file is recoverable: it is logged,
//! the offending element is skipped and reading continues. Only the cases
//! below stop a read.

use crate::model::ElementType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    /// Input is not well-formed markup
    #[error("Invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Root element is something other than `museScore`
    #[error("Not a score file: root element is <{0}>")]
    NotAScore(String),

    /// Required structural element is missing
    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// The dispatcher was handed an element kind it has no decoder for
    #[error("No decoder for element type {0:?}")]
    NoDecoder(ElementType),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
