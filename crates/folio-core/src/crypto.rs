// crates/folio-core/src/crypto.rs

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::error::FolioError;
use crate::principal::Principal;
use crate::traits::SignatureVerifier;
use crate::Hash32;

/// Prefix prepended to a 32-byte message hash before signing, so a ledger
/// signature can never be replayed as a signature over raw data.
pub const FOLIO_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Folio Signed Message:\n32";

/// An ed25519 keypair.
///
/// Key generation belongs to the external signing service; the ledger only
/// verifies. This type exists for tooling and tests that need to produce
/// signatures.
pub struct Keypair {
    pub signing_key: SigningKey,
    pub verifying_key: VerifyingKey,
}

impl Keypair {
    /// Generate a new random ed25519 keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        let verifying_key = signing_key.verifying_key();
        Keypair {
            signing_key,
            verifying_key,
        }
    }

    /// The principal controlled by this keypair.
    pub fn principal(&self) -> Principal {
        Principal(self.verifying_key.to_bytes())
    }

    /// Sign a message and return the signature bytes.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let signature = self.signing_key.sign(message);
        signature.to_bytes().to_vec()
    }

    /// Sign a 32-byte message hash under the ledger prefix.
    pub fn sign_message_hash(&self, message_hash: &Hash32) -> Vec<u8> {
        self.sign(&signable_message(message_hash))
    }
}

/// Bytes actually covered by a ledger signature: prefix || message hash.
pub fn signable_message(message_hash: &Hash32) -> Vec<u8> {
    let mut out = Vec::with_capacity(FOLIO_SIGNED_MESSAGE_PREFIX.len() + 32);
    out.extend_from_slice(FOLIO_SIGNED_MESSAGE_PREFIX);
    out.extend_from_slice(message_hash);
    out
}

/// Verify an ed25519 signature.
///
/// Returns `true` if the signature is valid for the given message and public key.
pub fn verify_signature(
    public_key_bytes: &[u8; 32],
    message: &[u8],
    signature_bytes: &[u8],
) -> Result<bool, FolioError> {
    let verifying_key = VerifyingKey::from_bytes(public_key_bytes)
        .map_err(|e| FolioError::Crypto(format!("Invalid public key: {}", e)))?;

    let signature_array: [u8; 64] = signature_bytes
        .try_into()
        .map_err(|_| FolioError::Crypto("Signature must be exactly 64 bytes".to_string()))?;

    let signature = ed25519_dalek::Signature::from_bytes(&signature_array);

    match verifying_key.verify(message, &signature) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}

/// Compute SHA-256 hash of the given bytes.
pub fn hash_bytes(data: &[u8]) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// ed25519 implementation of the signature-recovery contract.
///
/// A principal *is* its verifying key, so "recover the signer and compare"
/// reduces to verifying the signature under the expected principal's key.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn signed_by(
        &self,
        expected: &Principal,
        message_hash: &Hash32,
        signature: &[u8],
    ) -> Result<bool, FolioError> {
        verify_signature(expected.as_bytes(), &signable_message(message_hash), signature)
    }
}
