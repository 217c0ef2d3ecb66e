//! In-memory ed25519 signer derived from an `edsk` secret key.
//!
//! Manager operations are signed over the blake2b digest of the watermarked
//! forged bytes, per the Tezos signing convention. Key parsing supports both
//! encodings of `edsk` keys: the 54-character seed form and the 98-character
//! keypair form.

use blake2::{
    digest::{Update, VariableOutput},
    Blake2bVar,
};
use ed25519_dalek::{Signer as _, SigningKey};

use crate::{
    constants::{
        ED25519_KEYPAIR_BYTES, ED25519_PUBLIC_KEY_HASH_PREFIX, ED25519_PUBLIC_KEY_PREFIX,
        ED25519_SECRET_KEY_PREFIX, ED25519_SEED_BYTES, ED25519_SEED_PREFIX,
        ED25519_SIGNATURE_PREFIX, OPERATION_DIGEST_BYTES, OPERATION_WATERMARK,
        PUBLIC_KEY_HASH_BYTES,
    },
    errors::ScriptError,
};

/// A signer holding an ed25519 keypair in memory
pub struct InMemorySigner {
    /// The parsed signing key
    signing_key: SigningKey,
}

impl InMemorySigner {
    /// Parse a signer from a base58check-encoded `edsk` secret key
    pub fn from_secret_key(secret_key: &str) -> Result<Self, ScriptError> {
        let raw = bs58::decode(secret_key)
            .with_check(None)
            .into_vec()
            .map_err(|e| ScriptError::SignerCreation(e.to_string()))?;

        let signing_key = if let Some(seed) = raw.strip_prefix(&ED25519_SEED_PREFIX[..]) {
            let seed: [u8; ED25519_SEED_BYTES] = seed
                .try_into()
                .map_err(|_| ScriptError::SignerCreation("invalid seed length".to_string()))?;
            SigningKey::from_bytes(&seed)
        } else if let Some(keypair) = raw.strip_prefix(&ED25519_SECRET_KEY_PREFIX[..]) {
            let keypair: [u8; ED25519_KEYPAIR_BYTES] = keypair
                .try_into()
                .map_err(|_| ScriptError::SignerCreation("invalid keypair length".to_string()))?;
            SigningKey::from_keypair_bytes(&keypair)
                .map_err(|e| ScriptError::SignerCreation(e.to_string()))?
        } else {
            return Err(ScriptError::SignerCreation(
                "secret key is not an ed25519 `edsk` key".to_string(),
            ));
        };

        Ok(Self { signing_key })
    }

    /// The signer's base58check-encoded `edpk` public key
    pub fn public_key(&self) -> String {
        b58check_encode(
            &ED25519_PUBLIC_KEY_PREFIX,
            &self.signing_key.verifying_key().to_bytes(),
        )
    }

    /// The signer's base58check-encoded `tz1` public key hash
    pub fn public_key_hash(&self) -> String {
        let digest = blake2b(
            &self.signing_key.verifying_key().to_bytes(),
            PUBLIC_KEY_HASH_BYTES,
        );
        b58check_encode(&ED25519_PUBLIC_KEY_HASH_PREFIX, &digest)
    }

    /// Sign forged operation bytes.
    ///
    /// The signature is computed over the blake2b-256 digest of the bytes
    /// prefixed with the manager operation watermark.
    pub fn sign_operation(&self, forged: &[u8]) -> OperationSignature {
        let mut watermarked = Vec::with_capacity(forged.len() + 1);
        watermarked.push(OPERATION_WATERMARK);
        watermarked.extend_from_slice(forged);

        let digest = blake2b(&watermarked, OPERATION_DIGEST_BYTES);
        let signature = self.signing_key.sign(&digest);

        OperationSignature {
            raw: signature.to_bytes(),
        }
    }
}

/// An ed25519 signature over an operation digest
#[derive(Clone, Copy, Debug)]
pub struct OperationSignature {
    /// The raw 64-byte signature
    raw: [u8; 64],
}

impl OperationSignature {
    /// The signature as hex, as appended to forged bytes for injection
    pub fn to_hex(self) -> String {
        hex::encode(self.raw)
    }

    /// The signature in base58check `edsig` form, as expected by the
    /// preapply RPC
    pub fn to_edsig(self) -> String {
        b58check_encode(&ED25519_SIGNATURE_PREFIX, &self.raw)
    }
}

/// Compute a blake2b digest of the given length
fn blake2b(data: &[u8], digest_len: usize) -> Vec<u8> {
    // Digest lengths used here are fixed constants in the valid range
    let mut hasher = Blake2bVar::new(digest_len).unwrap();
    hasher.update(data);
    hasher.finalize_boxed().into_vec()
}

/// Base58check-encode a payload under the given prefix
fn b58check_encode(prefix: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(prefix.len() + payload.len());
    data.extend_from_slice(prefix);
    data.extend_from_slice(payload);
    bs58::encode(data).with_check().into_string()
}
