//! Test fixtures and helpers.
//!
//! A fixture plays both sides: it signs impressions as an ad network and
//! signs postbacks as a stand-in attribution authority.

use skadsig::{
    FidelityType, KeyPair, PostbackRecord, PublicKey, Signer, SigningParameters, Verifier,
    VerifierConfig,
};
use skadsig_core::{canonical_postback_message, crypto};
use uuid::Uuid;

use crate::vectors::test_key_pair;

/// Ad network identifier used by fixture records.
pub const FIXTURE_AD_NETWORK_ID: &str = "example123.skadnetwork";

/// A test fixture holding one key pair.
pub struct TestFixture {
    pub key_pair: KeyPair,
    pub signer: Signer,
}

impl TestFixture {
    /// Create a new test fixture with a random key pair.
    pub fn new() -> Self {
        Self::with_key_pair(KeyPair::generate())
    }

    /// Create with the fixed test key.
    pub fn with_test_key() -> Self {
        Self::with_key_pair(test_key_pair())
    }

    fn with_key_pair(key_pair: KeyPair) -> Self {
        Self {
            signer: Signer::new(key_pair.clone()),
            key_pair,
        }
    }

    /// Get the key pair's public key.
    pub fn public_key(&self) -> PublicKey {
        *self.key_pair.public_key()
    }

    /// A verifier that treats this fixture as the authority.
    pub fn verifier(&self) -> Verifier {
        Verifier::new(VerifierConfig::default().with_authority_key(self.public_key()))
    }

    /// Create a complete parameter set for `version`.
    pub fn make_params(&self, version: &str) -> SigningParameters {
        SigningParameters::builder(version, FIXTURE_AD_NETWORK_ID, 42, 525463029)
            .source_app_store_id(1234567891)
            .fidelity_type(FidelityType::StoreKitRendered)
            .build()
    }

    /// Create and sign a parameter set, returning both.
    pub fn make_signed_params(&self, version: &str) -> (SigningParameters, String) {
        let params = self.make_params(version);
        let signature = self.signer.sign(&params).expect("fixture params are signable");
        (params, signature)
    }

    /// Create an unsigned postback carrying every field `version` needs.
    pub fn make_postback(&self, version: &str, source_app_id: Option<u64>) -> PostbackRecord {
        PostbackRecord {
            version: version.to_string(),
            ad_network_id: FIXTURE_AD_NETWORK_ID.to_string(),
            transaction_id: Uuid::new_v4().to_string(),
            campaign_id: 42,
            app_id: 525463029,
            attribution_signature: String::new(),
            redownload: Some(false),
            source_app_id,
            fidelity_type: Some(FidelityType::StoreKitRendered),
            conversion_value: None,
            did_win: Some(true),
        }
    }

    /// Create a postback signed by this fixture as authority.
    pub fn make_signed_postback(
        &self,
        version: &str,
        source_app_id: Option<u64>,
    ) -> PostbackRecord {
        let mut record = self.make_postback(version, source_app_id);
        self.sign_postback(&mut record);
        record
    }

    /// Replace a postback's attribution signature with one from this fixture.
    pub fn sign_postback(&self, record: &mut PostbackRecord) {
        let message = canonical_postback_message(record).expect("postback is canonicalizable");
        record.attribution_signature =
            crypto::sign(&self.key_pair, &message).expect("fixture signing succeeds");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count).map(|_| TestFixture::new()).collect()
}
