use curve::{pack_le_bytes, Projective};
use poseidon_hash::hash_to_quintic_extension;
use schnorr::{MessageHash, PUBLIC_KEY_SIZE};

use crate::errors::SignerError;

/// Transaction type tag for change-pubkey, as assigned by the exchange.
pub const TX_TYPE_CHANGE_PUB_KEY: u8 = 8;

/// Length of the canonical serialization:
/// chain id (4) + type (1) + account index (8) + api key index (1)
/// + nonce (8) + expiry (8) + public key (40).
pub const SERIALIZED_SIZE: usize = 70;

/// The change-pubkey transaction. Built transiently per signing call,
/// never persisted. Fields are only reachable through the validating
/// constructor, so serialization and hashing never see an out-of-range
/// value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangePubKeyTx {
    account_index: i64,
    api_key_index: u8,
    nonce: i64,
    expired_at: i64,
    pub_key: [u8; PUBLIC_KEY_SIZE],
}

impl ChangePubKeyTx {
    /// Validate field ranges and the embedded public key. The key must
    /// be exactly 40 bytes and decode to a curve point; expiry zero is
    /// the no-expiry sentinel.
    pub fn new(
        account_index: i64,
        api_key_index: u8,
        nonce: i64,
        expired_at: i64,
        pub_key: &[u8],
    ) -> Result<Self, SignerError> {
        if account_index < 0 {
            return Err(SignerError::Serialization("account index is negative"));
        }
        if nonce < 0 {
            return Err(SignerError::Serialization("nonce is negative"));
        }
        if expired_at < 0 {
            return Err(SignerError::Serialization("expiry is negative"));
        }
        if pub_key.len() != PUBLIC_KEY_SIZE {
            return Err(SignerError::PublicKeyLength(pub_key.len()));
        }
        if Projective::from_le_bytes(pub_key).is_err() {
            return Err(SignerError::InvalidPoint);
        }

        let mut key = [0u8; PUBLIC_KEY_SIZE];
        key.copy_from_slice(pub_key);
        Ok(ChangePubKeyTx {
            account_index,
            api_key_index,
            nonce,
            expired_at,
            pub_key: key,
        })
    }

    pub fn account_index(&self) -> i64 {
        self.account_index
    }

    pub fn api_key_index(&self) -> u8 {
        self.api_key_index
    }

    pub fn nonce(&self) -> i64 {
        self.nonce
    }

    pub fn expired_at(&self) -> i64 {
        self.expired_at
    }

    pub fn pub_key(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.pub_key
    }

    /// Canonical fixed-width little-endian serialization. Every field
    /// has a declared width; the chain id is mixed in first so hashes
    /// never collide across chains.
    pub fn serialize(&self, chain_id: u32) -> [u8; SERIALIZED_SIZE] {
        let mut bytes = [0u8; SERIALIZED_SIZE];
        bytes[0..4].copy_from_slice(&chain_id.to_le_bytes());
        bytes[4] = TX_TYPE_CHANGE_PUB_KEY;
        bytes[5..13].copy_from_slice(&self.account_index.to_le_bytes());
        bytes[13] = self.api_key_index;
        bytes[14..22].copy_from_slice(&self.nonce.to_le_bytes());
        bytes[22..30].copy_from_slice(&self.expired_at.to_le_bytes());
        bytes[30..70].copy_from_slice(&self.pub_key);
        bytes
    }

    /// Hash the canonical serialization down to a signable digest. The
    /// 70 serialized bytes pack into exactly ten field elements.
    pub fn hash(&self, chain_id: u32) -> MessageHash {
        let packed = pack_le_bytes(&self.serialize(chain_id));
        MessageHash(hash_to_quintic_extension(&packed).0)
    }

    /// The human-readable body signed on the L1 side to confirm the key
    /// rotation. Byte-for-byte contract with the verifying chain; do
    /// not touch the formatting.
    pub fn l1_signature_body(&self) -> String {
        format!(
            "Register L2 Account\n\nPubKey: 0x{}\nNonce: {}\nAccountIndex: {}\nApiKeyIndex: {}",
            hex::encode(self.pub_key),
            self.nonce,
            self.account_index,
            self.api_key_index,
        )
    }
}
