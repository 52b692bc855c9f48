//! The Signer: impression signing for an ad network.

use skadsig_core::{
    canonical_parameter_message, canonical_verifiable_parameter_message, crypto, KeyPair,
    PublicKey, Result, SigningParameters,
};

/// Signs impression parameters with an ad network's key pair.
///
/// The key material is read-only after construction, so one `Signer` can be
/// shared across threads (e.g. behind an `Arc`) without locking.
#[derive(Debug, Clone)]
pub struct Signer {
    key_pair: KeyPair,
}

impl Signer {
    /// Create a signer from a loaded key pair.
    pub fn new(key_pair: KeyPair) -> Self {
        Self { key_pair }
    }

    /// Create a signer from PEM text (one private and one public block).
    pub fn from_pem(text: &str) -> Result<Self> {
        Ok(Self::new(KeyPair::from_pem(text)?))
    }

    /// The public key bound to this signer.
    pub fn public_key(&self) -> &PublicKey {
        self.key_pair.public_key()
    }

    /// Sign a parameter set, returning the base64 DER signature.
    pub fn sign(&self, params: &SigningParameters) -> Result<String> {
        let message = canonical_parameter_message(params)?;
        let signature = crypto::sign(&self.key_pair, &message).map_err(|e| {
            tracing::error!(version = params.version(), "signing failed: {}", e);
            e
        })?;

        tracing::debug!(
            version = params.version(),
            ad_network_id = params.ad_network_id(),
            campaign_id = params.campaign_id(),
            nonce = %params.nonce(),
            "signed impression"
        );
        Ok(signature)
    }

    /// Verify a signature over a parameter set with this signer's public key.
    ///
    /// See [`verify_parameters`] for the accepted versions.
    pub fn verify(&self, params: &SigningParameters, signature: &str) -> Result<bool> {
        verify_parameters(self.public_key(), params, signature)
    }
}

/// Verify a signature over a parameter set with any public key.
///
/// Only 2.1, 2.2 and 3.0 are verifiable. The bare and 2.0 tags are
/// signing-only and fail with `Error::UnsupportedVersion`.
pub fn verify_parameters(
    public_key: &PublicKey,
    params: &SigningParameters,
    signature: &str,
) -> Result<bool> {
    let message = canonical_verifiable_parameter_message(params)?;
    let valid = crypto::verify(public_key, &message, signature)?;

    tracing::debug!(
        version = params.version(),
        ad_network_id = params.ad_network_id(),
        valid,
        "verified impression signature"
    );
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skadsig_core::{Error, FidelityType};
    use std::sync::Arc;

    fn params(version: &str) -> SigningParameters {
        SigningParameters::builder(version, "example123.skadnetwork", 42, 525463029)
            .source_app_store_id(1234567891)
            .fidelity_type(FidelityType::StoreKitRendered)
            .build()
    }

    #[test]
    fn test_sign_verify_verifiable_versions() {
        let signer = Signer::new(KeyPair::generate());
        for version in ["2.1", "2.2", "3.0"] {
            let p = params(version);
            let signature = signer.sign(&p).unwrap();
            assert!(signer.verify(&p, &signature).unwrap(), "version {version:?}");
        }
    }

    #[test]
    fn test_signing_only_versions_not_verifiable() {
        let signer = Signer::new(KeyPair::generate());
        for version in ["", "2.0"] {
            let p = params(version);
            let signature = signer.sign(&p).unwrap();
            assert!(matches!(
                signer.verify(&p, &signature),
                Err(Error::UnsupportedVersion(ref v)) if v == version
            ));
            assert!(matches!(
                verify_parameters(signer.public_key(), &p, &signature),
                Err(Error::UnsupportedVersion(_))
            ));
        }
    }

    #[test]
    fn test_signature_bound_to_nonce() {
        let signer = Signer::new(KeyPair::generate());
        let first = params("2.2");
        let second = params("2.2");
        let signature = signer.sign(&first).unwrap();
        assert!(!signer.verify(&second, &signature).unwrap());
    }

    #[test]
    fn test_unsupported_version_is_error() {
        let signer = Signer::new(KeyPair::generate());
        assert!(matches!(
            signer.sign(&params("1.0")),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_missing_fidelity_is_error() {
        let signer = Signer::new(KeyPair::generate());
        let p = SigningParameters::builder("3.0", "example123.skadnetwork", 42, 525463029).build();
        assert!(matches!(
            signer.sign(&p),
            Err(Error::MissingRequiredField { field: "fidelity-type", .. })
        ));
    }

    #[test]
    fn test_log_fields_match_verifier_form() {
        let buf = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&buf);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || LogSink(Arc::clone(&sink)))
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let signer = Signer::new(KeyPair::generate());
            signer.sign(&params("3.0")).unwrap();
        });

        let logs = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("signed impression"), "{logs}");
        assert!(logs.contains(r#"version="3.0""#), "{logs}");
        assert!(logs.contains(r#"ad_network_id="example123.skadnetwork""#), "{logs}");
    }

    struct LogSink(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogSink {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_shared_across_threads() {
        let signer = Arc::new(Signer::new(KeyPair::generate()));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let signer = Arc::clone(&signer);
                std::thread::spawn(move || {
                    let p = params("3.0");
                    let signature = signer.sign(&p).unwrap();
                    signer.verify(&p, &signature).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
