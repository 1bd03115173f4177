//! # Error Types
//!
//! Decoding distinguishes rejections from faults. A message that does not
//! match the grammar, or that reports an unregistered terminal, is rejected
//! silently: [`decode`](crate::DishaDecoder::decode) returns `Ok(None)` and
//! no error propagates. [`DecodeError`] is reserved for contract violations
//! between a grammar and its report builder, which indicate a programming
//! error rather than bad input.

use thiserror::Error;

/// A violation of the grammar/builder contract.
///
/// None of these occur on well-formed or malformed wire input; they occur
/// when a builder's typed reads disagree with the grammar's declared
/// captures. No partial report is ever produced alongside one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The builder read more captures than the grammar produced.
    #[error("capture cursor exhausted")]
    CursorExhausted,

    /// The builder finished while captures were still unread.
    #[error("{0} captures left unread")]
    UnreadCaptures(usize),

    /// A captured token passed the grammar's character class but failed its
    /// typed conversion.
    #[error("cannot read {value:?} as {expected}")]
    Conversion {
        /// The offending captured token.
        value: String,
        /// What the builder tried to read it as.
        expected: &'static str,
    },
}
