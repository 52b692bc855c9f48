//! # skadsig
//!
//! Signing and verification for ad-attribution postbacks.
//!
//! ## Overview
//!
//! - **Impression signing**: an ad network signs the parameters of each ad
//!   impression with its P-256 key ([`Signer`]).
//! - **Postback verification**: install-validation postbacks carry an
//!   attribution signature from the authority, checked against its published
//!   key ([`verify_postback`], [`Verifier`]).
//!
//! Both sides hash a canonical message (items joined by U+2063) with SHA-256
//! and use ECDSA P-256 with base64 DER signatures. A signature that does not
//! match is `Ok(false)`; malformed input is an [`Error`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use skadsig::{load_key_pair, verify_postback, FidelityType, PostbackRecord, Signer, SigningParameters};
//!
//! fn example(pem: &str, postback: &PostbackRecord) -> skadsig::Result<()> {
//!     let signer = Signer::new(load_key_pair(pem)?);
//!
//!     let params = SigningParameters::builder("3.0", "example123.skadnetwork", 42, 525463029)
//!         .source_app_store_id(1234567891)
//!         .fidelity_type(FidelityType::StoreKitRendered)
//!         .build();
//!     let signature = signer.sign(&params)?;
//!     assert!(signer.verify(&params, &signature)?);
//!
//!     let genuine = verify_postback(postback)?;
//!     println!("postback genuine: {genuine}");
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `skadsig::core` - Canonicalization, signature engine, key material

pub mod signer;
pub mod verifier;

// Re-export component crate
pub use skadsig_core as core;

pub use signer::{verify_parameters, Signer};
pub use verifier::{verify_postback, Verifier, VerifierConfig};

// Re-export commonly used core types
pub use skadsig_core::{
    authority_public_key, load_key_pair, ConversionValue, Error, FidelityType, FormatError,
    KeyPair, PostbackRecord, ProtocolVersion, PublicKey, Result, SigningParameters,
};
