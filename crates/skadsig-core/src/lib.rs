//! # skadsig core
//!
//! Pure primitives for ad-attribution signing: canonical messages, the
//! ECDSA P-256 signature engine, and key material.
//!
//! This crate contains no I/O. It is pure computation over immutable inputs,
//! and every type is safe to share across threads.
//!
//! ## Key Types
//!
//! - [`SigningParameters`] - The fields an ad network signs per impression
//! - [`PostbackRecord`] - An install-validation postback from the authority
//! - [`KeyPair`] / [`PublicKey`] - P-256 key material
//! - [`ProtocolVersion`] - Versions with a defined canonical layout
//!
//! ## Canonicalization
//!
//! Records become an ordered list of items joined by U+2063. See the
//! [`canonical`] module for the per-version layouts and [`dispatch`] for how
//! a version tag selects one.

pub mod canonical;
pub mod crypto;
pub mod dispatch;
pub mod error;
pub mod keys;
pub mod params;
pub mod postback;
pub mod types;
pub mod version;

pub use canonical::{
    canonical_parameter_items, canonical_parameter_message, canonical_postback_items,
    canonical_postback_message, canonical_verifiable_parameter_message, join_items, SEPARATOR,
};
pub use crypto::MessageDigest;
pub use dispatch::{
    parameter_rule, postback_rule, verifiable_parameter_rule, Rule, VersionRule,
};
pub use error::{Error, FormatError, Result};
pub use keys::{
    authority_public_key, load_key_pair, KeyPair, PublicKey, AUTHORITY_PUBLIC_KEY_SPKI,
};
pub use params::{SigningParameters, SigningParametersBuilder};
pub use postback::PostbackRecord;
pub use types::{ConversionValue, FidelityType};
pub use version::ProtocolVersion;
