//! Telegram codecs for field weather stations.

pub mod lufft;
pub mod quality;
pub mod timestamp;
pub mod value;

use thiserror::Error;

pub use lufft::{decode, encode, LufftVariant};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Token count matches no known layout.
    #[error("invalid string")]
    InvalidString { tokens: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Text would split into extra tokens on the wire.
    #[error("{field} contains a telegram delimiter: '{value}'")]
    DelimiterInText { field: &'static str, value: String },
}
