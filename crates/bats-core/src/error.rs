//! Typed error definitions for the BATS feed handler.
//!
//! Provides [`BatsError`] for domain-specific errors that are more informative
//! than plain `anyhow::Error` strings. All variants implement `std::error::Error`
//! via `thiserror`, so they integrate seamlessly with `anyhow::Result`.

use thiserror::Error;

/// Domain-specific errors for the BATS feed handler.
#[derive(Debug, Error)]
pub enum BatsError {
    /// A record failed to decode. Carries the type code and a description of
    /// the offending field.
    #[error("parse error in '{msg_type}' record: {detail}")]
    Parse { msg_type: char, detail: String },

    /// The type code at offset 8 is not a known PITCH message type.
    #[error("unknown message type code '{0}'")]
    UnknownMsgType(char),

    /// The record is too short to carry a type code.
    #[error("truncated record ({0} bytes)")]
    Truncated(usize),

    /// A single-character field held a code outside its legal set.
    #[error("invalid {0} code '{1}'")]
    InvalidCode(&'static str, char),

    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),

    /// Feed sequencing error (malformed sequence prefix).
    #[error("sequence error: {0}")]
    Sequence(String),

    /// Underlying I/O error from a feed source.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
