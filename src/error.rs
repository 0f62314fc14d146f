//! Errors raised while turning a protocol definition into a [`Document`](crate::Document).
//!
//! Failures come in two severities. A [`StructuralError`] means the input is not a
//! protocol document at all (malformed XML, wrong root, missing header). A
//! [`ValueError`] means the shape is right but one value cannot be used; it carries
//! the offending literal so callers can point at it.

/// Top-level parse failure. Parsing is all-or-nothing: no partial AST is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

impl ParseError {
    pub fn is_structural(&self) -> bool {
        matches!(self, ParseError::Structural(_))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, ParseError::Value(_))
    }
}

/// The document does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("malformed XML at {row}:{col}: {message}")]
    Xml { row: u32, col: u32, message: String },
    #[error("input is {len} bytes, limit is {max}")]
    InputTooLarge { len: usize, max: usize },
    #[error("root element must be <protocol>, found <{0}>")]
    UnexpectedRoot(String),
    #[error("missing <{0}> section")]
    MissingSection(&'static str),
    #[error("<{parent}> has no <{child}>")]
    MissingElement {
        parent: &'static str,
        child: &'static str,
    },
}

/// A present value is missing a required part or cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("protocol has no <protocolname>")]
    MissingProtocolName,
    #[error("unknown byte order {0:?} (expected big_endian, little_endian or as_host)")]
    UnknownByteOrder(String),
    #[error("enum id {0:?} is not a decimal or 0x-prefixed hexadecimal integer")]
    InvalidEnumId(String),
    #[error("field {field:?}: bits {literal:?} is not a positive integer")]
    InvalidBits { field: String, literal: String },
    #[error("<{element}> is missing attribute {attribute:?}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("<{element}> has no text")]
    MissingText { element: &'static str },
}
