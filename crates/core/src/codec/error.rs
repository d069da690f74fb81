use thiserror::Error;

/// Errors produced while encoding or decoding vehicle records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unknown vehicle type: {0}")]
    UnknownVariant(String),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}
