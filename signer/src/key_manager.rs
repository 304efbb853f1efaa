use std::sync::Mutex;

use curve::ScalarField;
use schnorr::{MessageHash, Signature, SigningKey, PUBLIC_KEY_SIZE};
use tracing::{debug, info};

use crate::errors::SignerError;

/// Holds at most one active signing key. Starts empty; `set_key`
/// installs or replaces the key atomically, so a concurrent signing
/// call sees either the old key or the new one, never a torn state.
/// There is no way back to the empty state.
pub struct KeyManager {
    slot: Mutex<Option<SigningKey>>,
}

impl KeyManager {
    pub fn new() -> Self {
        KeyManager {
            slot: Mutex::new(None),
        }
    }

    /// Validate and install a private key, returning the encoded public
    /// key. On any error the previously held key stays in place.
    pub fn set_key(&self, private_key: &[u8]) -> Result<[u8; PUBLIC_KEY_SIZE], SignerError> {
        let key = SigningKey::from_le_bytes(private_key).map_err(SignerError::InvalidKey)?;
        let public = key.verifying_key().to_le_bytes();

        let mut slot = self.slot.lock().unwrap();
        let replaced = slot.is_some();
        *slot = Some(key);
        drop(slot);

        info!(replaced, "installed signing key");
        Ok(public)
    }

    /// Encoded public key of the held key pair.
    pub fn public_key_bytes(&self) -> Result<[u8; PUBLIC_KEY_SIZE], SignerError> {
        let slot = self.slot.lock().unwrap();
        slot.as_ref()
            .map(|key| key.verifying_key().to_le_bytes())
            .ok_or(SignerError::NoActiveKey)
    }

    /// Sign a pre-hashed message with the held key. The nonce override
    /// exists for reproducible signatures; leave it unset to draw a
    /// fresh random nonce.
    pub fn sign_hash(
        &self,
        message: &MessageHash,
        nonce_override: Option<&ScalarField>,
    ) -> Result<Signature, SignerError> {
        // clone the key out so signing does not hold the lock
        let key = {
            let slot = self.slot.lock().unwrap();
            slot.as_ref().cloned().ok_or(SignerError::NoActiveKey)?
        };

        let signature = match nonce_override {
            Some(nonce) => key.sign_with_nonce(nonce, message),
            None => key.sign(&mut rand::rng(), message),
        }
        .map_err(SignerError::Signing)?;

        debug!("signed message hash");
        Ok(signature)
    }
}

impl Default for KeyManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schnorr::VerifyingKey;

    #[test]
    fn test_starts_empty() {
        let manager = KeyManager::new();
        assert_eq!(
            manager.public_key_bytes().unwrap_err(),
            SignerError::NoActiveKey
        );
        let digest = MessageHash::from_le_bytes(&[1u8; 40]).unwrap();
        assert_eq!(
            manager.sign_hash(&digest, None).unwrap_err(),
            SignerError::NoActiveKey
        );
    }

    #[test]
    fn test_set_key_and_sign() {
        let manager = KeyManager::new();
        let key = SigningKey::from_seed(b"manager-test").unwrap();
        let public = manager.set_key(&key.to_le_bytes()).unwrap();
        assert_eq!(public, key.verifying_key().to_le_bytes());

        let digest = MessageHash::from_le_bytes(&[2u8; 40]).unwrap();
        let signature = manager.sign_hash(&digest, None).unwrap();
        let vk = VerifyingKey::from_le_bytes(&public).unwrap();
        assert!(vk.verify(&digest, &signature));
    }

    #[test]
    fn test_invalid_key_leaves_previous_key() {
        let manager = KeyManager::new();
        let key = SigningKey::from_seed(b"keep-me").unwrap();
        let public = manager.set_key(&key.to_le_bytes()).unwrap();

        assert!(manager.set_key(&[0xAB; 39]).is_err());
        assert_eq!(manager.public_key_bytes().unwrap(), public);
    }

    #[test]
    fn test_replacing_key() {
        let manager = KeyManager::new();
        let first = SigningKey::from_seed(b"first").unwrap();
        let second = SigningKey::from_seed(b"second").unwrap();

        manager.set_key(&first.to_le_bytes()).unwrap();
        manager.set_key(&second.to_le_bytes()).unwrap();
        assert_eq!(
            manager.public_key_bytes().unwrap(),
            second.verifying_key().to_le_bytes()
        );
    }

    #[test]
    fn test_nonce_override_is_reproducible() {
        let manager = KeyManager::new();
        let key = SigningKey::from_seed(b"nonce-override").unwrap();
        manager.set_key(&key.to_le_bytes()).unwrap();

        let digest = MessageHash::from_le_bytes(&[3u8; 40]).unwrap();
        let nonce = ScalarField::from_u64(77777);
        let a = manager.sign_hash(&digest, Some(&nonce)).unwrap();
        let b = manager.sign_hash(&digest, Some(&nonce)).unwrap();
        assert_eq!(a, b);
    }
}
