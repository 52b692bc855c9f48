//! Digest and signature engine.
//!
//! One fixed configuration: SHA-256 digest, ECDSA over P-256, ASN.1 DER
//! signature encoding, standard base64 (padded) transport encoding.

use base64::{engine::general_purpose::STANDARD, Engine};
use p256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::ecdsa::Signature;
use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, RngCore, SeedableRng};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::{Error, FormatError, Result};
use crate::keys::{KeyPair, PublicKey};

/// A 32-byte SHA-256 digest of a canonical message.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageDigest(pub [u8; 32]);

impl MessageDigest {
    /// Hash the UTF-8 bytes of a message.
    pub fn of(message: &str) -> Self {
        Self(Sha256::digest(message.as_bytes()).into())
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for MessageDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA256({}...)", &self.to_hex()[..8])
    }
}

impl AsRef<[u8]> for MessageDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Sign a message, returning base64 DER.
///
/// Each call draws a fresh nonce from the OS random source, so two
/// signatures over the same message differ.
pub fn sign(key_pair: &KeyPair, message: &str) -> Result<String> {
    sign_with_rng(key_pair, message, &mut OsRng)
}

/// Sign a message with an explicit random source.
///
/// A random source that cannot produce bytes fails with `Error::Signing`.
pub fn sign_with_rng<R>(key_pair: &KeyPair, message: &str, rng: &mut R) -> Result<String>
where
    R: CryptoRng + RngCore,
{
    // `sign_prehash_with_rng` only calls the infallible `fill_bytes`.
    let mut seed = <StdRng as SeedableRng>::Seed::default();
    rng.try_fill_bytes(&mut seed)
        .map_err(|e| Error::Signing(format!("random source failed: {e}")))?;
    let mut seeded = StdRng::from_seed(seed);

    let digest = MessageDigest::of(message);
    let signature: Signature = key_pair
        .signing_key()
        .sign_prehash_with_rng(&mut seeded, digest.as_bytes())
        .map_err(|e| Error::Signing(e.to_string()))?;
    Ok(STANDARD.encode(signature.to_der().as_bytes()))
}

/// Verify a base64 DER signature over a message.
///
/// Returns `Ok(false)` for any signature that does not verify, including
/// DER that does not parse. Only a signature that is not valid base64 is an
/// error.
pub fn verify(public_key: &PublicKey, message: &str, signature_b64: &str) -> Result<bool> {
    let der = STANDARD
        .decode(signature_b64)
        .map_err(|e| FormatError::SignatureEncoding(e.to_string()))?;

    let Ok(signature) = Signature::from_der(&der) else {
        return Ok(false);
    };

    let digest = MessageDigest::of(message);
    Ok(public_key
        .verifying_key()
        .verify_prehash(digest.as_bytes(), &signature)
        .is_ok())
}
