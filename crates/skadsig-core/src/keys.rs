//! P-256 key material: PEM loading, key pairs, and the authority key.

use base64::{engine::general_purpose::STANDARD, Engine};
use p256::ecdsa::{SigningKey, VerifyingKey};
use p256::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey, LineEnding};
use p256::SecretKey;
use rand::rngs::OsRng;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{FormatError, Result};

/// The attribution authority's P-256 key (base64 SubjectPublicKeyInfo),
/// used to verify postbacks of version 2.1 and later.
pub const AUTHORITY_PUBLIC_KEY_SPKI: &str = "MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAEWdp8GPcGqmhgzEFj9Z2nSpQVddayaPe4FMzqM9wib1+aHaaIzoHoLN9zW4K8y4SPykE3YVK3sVqW6Af0lfx3gg==";

const LABEL_SEC1_PRIVATE: &str = "EC PRIVATE KEY";
const LABEL_PKCS8_PRIVATE: &str = "PRIVATE KEY";
const LABEL_PUBLIC: &str = "PUBLIC KEY";

const BEGIN: &str = "-----BEGIN ";
const END: &str = "-----END ";
const DASHES: &str = "-----";

/// The authority key, parsed once and shared for the life of the process.
pub fn authority_public_key() -> Result<&'static PublicKey> {
    static AUTHORITY: OnceLock<PublicKey> = OnceLock::new();

    if let Some(key) = AUTHORITY.get() {
        return Ok(key);
    }
    let key = PublicKey::from_spki_base64(AUTHORITY_PUBLIC_KEY_SPKI)?;
    Ok(AUTHORITY.get_or_init(|| key))
}

/// A P-256 public key used for verification.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Parse from DER SubjectPublicKeyInfo.
    pub fn from_spki_der(der: &[u8]) -> Result<Self> {
        let key = VerifyingKey::from_public_key_der(der)
            .map_err(|e| FormatError::InvalidPublicKey(e.to_string()))?;
        Ok(Self(key))
    }

    /// Parse from base64 DER SubjectPublicKeyInfo (the form keys are published in).
    pub fn from_spki_base64(s: &str) -> Result<Self> {
        let der = STANDARD
            .decode(s.trim())
            .map_err(|e| FormatError::InvalidPublicKey(e.to_string()))?;
        Self::from_spki_der(&der)
    }

    /// Parse a single `PUBLIC KEY` PEM block.
    pub fn from_pem(text: &str) -> Result<Self> {
        let blocks = split_pem_blocks(text)?;
        let [(label, der)] = blocks.as_slice() else {
            return Err(FormatError::BlockCount(blocks.len()).into());
        };
        if label != LABEL_PUBLIC {
            return Err(FormatError::UnknownBlockType(label.clone()).into());
        }
        Self::from_spki_der(der)
    }

    /// Encode as a `PUBLIC KEY` PEM block.
    pub fn to_pem(&self) -> Result<String> {
        let pem = self
            .0
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| FormatError::InvalidPublicKey(e.to_string()))?;
        Ok(pem)
    }

    /// Compressed SEC1 encoding (33 bytes).
    pub fn to_sec1_compressed(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    /// Convert to hex string (compressed SEC1).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_sec1_compressed())
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P256Pub({})", &self.to_hex()[..16])
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        Self(key)
    }
}

/// A P-256 signing key bound to its public key.
///
/// When loaded from PEM, the public key is the one parsed from the public
/// block (checked against the private key), not re-derived.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generate a new random key pair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        let public_key = PublicKey(*signing_key.verifying_key());
        Self {
            signing_key,
            public_key,
        }
    }

    /// Load from PEM text holding one private-key block and its matching
    /// `PUBLIC KEY` block, in either order.
    pub fn from_pem(text: &str) -> Result<Self> {
        let blocks = split_pem_blocks(text)?;
        if blocks.len() != 2 {
            return Err(FormatError::BlockCount(blocks.len()).into());
        }

        let mut secret: Option<SecretKey> = None;
        let mut public: Option<PublicKey> = None;

        for (label, der) in &blocks {
            match label.as_str() {
                LABEL_SEC1_PRIVATE | LABEL_PKCS8_PRIVATE => {
                    if secret.is_some() {
                        return Err(FormatError::DuplicateBlock("private key").into());
                    }
                    let parsed = if label == LABEL_SEC1_PRIVATE {
                        SecretKey::from_sec1_der(der)
                            .map_err(|e| FormatError::InvalidPrivateKey(e.to_string()))?
                    } else {
                        SecretKey::from_pkcs8_der(der)
                            .map_err(|e| FormatError::InvalidPrivateKey(e.to_string()))?
                    };
                    secret = Some(parsed);
                }
                LABEL_PUBLIC => {
                    if public.is_some() {
                        return Err(FormatError::DuplicateBlock("public key").into());
                    }
                    public = Some(PublicKey::from_spki_der(der)?);
                }
                other => return Err(FormatError::UnknownBlockType(other.to_owned()).into()),
            }
        }

        // Two blocks with no duplicates means exactly one of each.
        let (Some(secret), Some(public_key)) = (secret, public) else {
            return Err(FormatError::BlockCount(blocks.len()).into());
        };

        let signing_key = SigningKey::from(&secret);
        if *signing_key.verifying_key() != public_key.0 {
            return Err(FormatError::KeyMismatch.into());
        }

        Ok(Self {
            signing_key,
            public_key,
        })
    }

    /// The bound public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Encode as two PEM blocks: `EC PRIVATE KEY` then `PUBLIC KEY`.
    pub fn to_pem(&self) -> Result<String> {
        let secret = SecretKey::from(&self.signing_key);
        let private_pem = secret
            .to_sec1_pem(LineEnding::LF)
            .map_err(|e| FormatError::InvalidPrivateKey(e.to_string()))?;
        let public_pem = self.public_key.to_pem()?;

        let mut out = String::with_capacity(private_pem.len() + public_pem.len());
        out.push_str(&private_pem);
        out.push_str(&public_pem);
        Ok(out)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({:?})", self.public_key)
    }
}

/// Load a key pair from PEM text. See [`KeyPair::from_pem`].
pub fn load_key_pair(text: &str) -> Result<KeyPair> {
    KeyPair::from_pem(text)
}

/// Split PEM text into (label, DER) blocks.
///
/// Whitespace between and around blocks is ignored; any other text is an
/// error.
fn split_pem_blocks(text: &str) -> std::result::Result<Vec<(String, Vec<u8>)>, FormatError> {
    let mut blocks = Vec::new();
    let mut rest = text.trim_start();

    while !rest.is_empty() {
        if !rest.starts_with(BEGIN) {
            return Err(if blocks.is_empty() {
                FormatError::Pem("missing BEGIN boundary".into())
            } else {
                FormatError::TrailingData
            });
        }

        let end = rest
            .find(END)
            .ok_or_else(|| FormatError::Pem("missing END boundary".into()))?;
        let label_start = end + END.len();
        let close = rest[label_start..]
            .find(DASHES)
            .ok_or_else(|| FormatError::Pem("unterminated END boundary".into()))?;
        let (block, tail) = rest.split_at(label_start + close + DASHES.len());

        let (label, der) = pem_rfc7468::decode_vec(block.as_bytes())
            .map_err(|e| FormatError::Pem(e.to_string()))?;
        blocks.push((label.to_owned(), der));

        rest = tail.trim_start();
    }

    Ok(blocks)
}
