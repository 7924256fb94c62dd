use crate::identity::Address;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeypairError {
    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Invalid key bytes: {0}")]
    InvalidBytes(String),
}

/// secp256k1 keypair whose public half determines an owner's address
#[derive(Clone)]
pub struct Keypair {
    secret: SecretKey,
    public: PublicKey,
}

impl Keypair {
    /// Generate a new random keypair
    pub fn generate() -> Self {
        let secp = Secp256k1::new();
        let (secret, public) = secp.generate_keypair(&mut rand::thread_rng());
        Self { secret, public }
    }

    /// Restore a keypair from its 32 secret bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeypairError> {
        if bytes.len() != 32 {
            return Err(KeypairError::InvalidLength {
                expected: 32,
                got: bytes.len(),
            });
        }

        let secret =
            SecretKey::from_slice(bytes).map_err(|e| KeypairError::InvalidBytes(e.to_string()))?;
        let public = PublicKey::from_secret_key(&Secp256k1::new(), &secret);
        Ok(Self { secret, public })
    }

    /// Restore a keypair from hex-encoded secret bytes
    pub fn from_hex(s: &str) -> Result<Self, KeypairError> {
        let bytes = hex::decode(s.trim_start_matches("0x"))
            .map_err(|e| KeypairError::InvalidBytes(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Secret key bytes
    pub fn to_bytes(&self) -> [u8; 32] {
        self.secret.secret_bytes()
    }

    /// Compressed public key bytes
    pub fn public_key_bytes(&self) -> [u8; 33] {
        self.public.serialize()
    }

    /// The address this keypair controls
    pub fn address(&self) -> Address {
        Address::from_uncompressed_key(&self.public.serialize_uncompressed())
    }
}
