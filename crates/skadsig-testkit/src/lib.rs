//! # skadsig testkit
//!
//! Testing utilities for skadsig.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Authority-signed postbacks and pinned parameter sets
//!   with their expected canonical items
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use skadsig_testkit::vectors::verify_all_postback_vectors;
//!
//! for (name, verified) in verify_all_postback_vectors() {
//!     assert!(verified, "{name}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use skadsig_testkit::generators::verifiable_parameters;
//!
//! proptest! {
//!     #[test]
//!     fn sign_then_verify(params in verifiable_parameters()) {
//!         let fixture = skadsig_testkit::TestFixture::new();
//!         let signature = fixture.signer.sign(&params).unwrap();
//!         prop_assert!(fixture.signer.verify(&params, &signature).unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use skadsig_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let postback = fixture.make_signed_postback("3.0", None);
//! assert!(fixture.verifier().verify_postback(&postback).unwrap());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{postback_record, signing_parameters, verifiable_parameters};
pub use vectors::{
    all_parameter_vectors, all_postback_vectors, parameters_from_vector, postback_from_vector,
    test_key_pair, verify_all_postback_vectors, ParameterVector, PostbackVector, TEST_KEY_PEM,
};
