//! Postback verification against the attribution authority's key.

use skadsig_core::{
    authority_public_key, canonical_postback_message, crypto, PostbackRecord, PublicKey, Result,
};

/// Configuration for a [`Verifier`].
#[derive(Debug, Clone, Default)]
pub struct VerifierConfig {
    /// Key that signs postbacks. `None` uses the built-in authority key.
    pub authority_key: Option<PublicKey>,
}

impl VerifierConfig {
    /// Use a specific authority key instead of the built-in one.
    pub fn with_authority_key(mut self, key: PublicKey) -> Self {
        self.authority_key = Some(key);
        self
    }
}

/// Verifies install-validation postbacks.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: VerifierConfig,
}

impl Verifier {
    /// Create a verifier.
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// The key postbacks are checked against.
    pub fn authority_key(&self) -> Result<&PublicKey> {
        match &self.config.authority_key {
            Some(key) => Ok(key),
            None => authority_public_key(),
        }
    }

    /// Verify a postback's attribution signature.
    ///
    /// Returns `Ok(false)` when the signature does not match. Unsupported
    /// versions, missing required fields, and undecodable signatures are
    /// errors.
    pub fn verify_postback(&self, record: &PostbackRecord) -> Result<bool> {
        let message = canonical_postback_message(record)?;
        let key = self.authority_key()?;
        let valid = crypto::verify(key, &message, &record.attribution_signature)?;

        if valid {
            tracing::debug!(
                version = record.version.as_str(),
                ad_network_id = record.ad_network_id.as_str(),
                transaction_id = record.transaction_id.as_str(),
                "postback verified"
            );
        } else {
            tracing::warn!(
                version = record.version.as_str(),
                ad_network_id = record.ad_network_id.as_str(),
                transaction_id = record.transaction_id.as_str(),
                "postback signature rejected"
            );
        }
        Ok(valid)
    }
}

/// Verify a postback against the built-in authority key.
pub fn verify_postback(record: &PostbackRecord) -> Result<bool> {
    Verifier::default().verify_postback(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skadsig_core::{crypto, Error, FidelityType, FormatError, KeyPair};
    use std::sync::{Arc, Mutex};

    fn record() -> PostbackRecord {
        PostbackRecord {
            version: "3.0".into(),
            ad_network_id: "example123.skadnetwork".into(),
            transaction_id: "f9ac267a-a889-44ce-b5f7-0166d11461f0".into(),
            campaign_id: 42,
            app_id: 525463029,
            attribution_signature: "MEUCIQDDetUtkyc/MiQvVJ5I6HIO1E7l598572Wljot2Onzd4wIgVJLzVcyAV+TXksGNoa0DTMXEPgNPeHCmD4fw1ABXX0g=".into(),
            redownload: Some(true),
            source_app_id: None,
            fidelity_type: Some(FidelityType::StoreKitRendered),
            conversion_value: None,
            did_win: Some(false),
        }
    }

    #[test]
    fn test_builtin_authority_key() {
        assert!(verify_postback(&record()).unwrap());
    }

    #[test]
    fn test_substituted_authority_key() {
        let authority = KeyPair::generate();
        let verifier =
            Verifier::new(VerifierConfig::default().with_authority_key(*authority.public_key()));

        // The published signature no longer verifies under a different key.
        let mut r = record();
        assert!(!verifier.verify_postback(&r).unwrap());

        let message = canonical_postback_message(&r).unwrap();
        r.attribution_signature = crypto::sign(&authority, &message).unwrap();
        assert!(verifier.verify_postback(&r).unwrap());
        assert!(!verify_postback(&r).unwrap());
    }

    #[test]
    fn test_tampered_field_rejected() {
        let mut r = record();
        r.did_win = Some(true);
        assert!(!verify_postback(&r).unwrap());
    }

    #[test]
    fn test_unsupported_version() {
        let mut r = record();
        r.version = "2.0".into();
        assert!(matches!(verify_postback(&r), Err(Error::UnsupportedVersion(v)) if v == "2.0"));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logs_of(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_log_fields() {
        let accepted = logs_of(|| assert!(verify_postback(&record()).unwrap()));
        assert!(accepted.contains("postback verified"), "{accepted}");
        assert!(accepted.contains(r#"version="3.0""#), "{accepted}");
        assert!(
            accepted.contains(r#"transaction_id="f9ac267a-a889-44ce-b5f7-0166d11461f0""#),
            "{accepted}"
        );

        let mut r = record();
        r.did_win = Some(true);
        let rejected = logs_of(|| assert!(!verify_postback(&r).unwrap()));
        assert!(rejected.contains("postback signature rejected"), "{rejected}");
        assert!(rejected.contains(r#"ad_network_id="example123.skadnetwork""#), "{rejected}");
    }

    #[test]
    fn test_malformed_signature() {
        let mut r = record();
        r.attribution_signature = "%%%".into();
        assert!(matches!(
            verify_postback(&r),
            Err(Error::Format(FormatError::SignatureEncoding(_)))
        ));
    }
}
