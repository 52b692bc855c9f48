//! Error types for skadsig.

use thiserror::Error;

use crate::version::ProtocolVersion;

/// Errors that can occur while canonicalizing, signing, or verifying.
///
/// A cryptographically wrong signature is not an error: verification
/// reports it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("unsupported version: {0:?}")]
    UnsupportedVersion(String),

    #[error("missing required field `{field}` for version {version}")]
    MissingRequiredField {
        field: &'static str,
        version: ProtocolVersion,
    },

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("cannot build a message from zero items")]
    EmptyMessage,
}

/// Malformed input: key blocks, signature encoding, out-of-range values.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected exactly 2 PEM blocks, found {0}")]
    BlockCount(usize),

    #[error("unexpected trailing data after PEM blocks")]
    TrailingData,

    #[error("malformed PEM block: {0}")]
    Pem(String),

    #[error("unexpected PEM block type: {0}")]
    UnknownBlockType(String),

    #[error("duplicate {0} block")]
    DuplicateBlock(&'static str),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("public key does not match private key")]
    KeyMismatch,

    #[error("signature is not valid base64: {0}")]
    SignatureEncoding(String),

    #[error("conversion value {0} exceeds 6 bits")]
    ConversionValueOutOfRange(u8),
}

/// Result type for skadsig operations.
pub type Result<T> = std::result::Result<T, Error>;
