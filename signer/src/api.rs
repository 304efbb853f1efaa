use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use schnorr::{SigningKey, PUBLIC_KEY_SIZE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth;
use crate::errors::SignerError;
use crate::key_manager::KeyManager;
use crate::tx::ChangePubKeyTx;

/// A freshly produced key pair, hex-encoded for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyBundle {
    pub private_key: String,
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetKeyResponse {
    pub success: bool,
    pub public_key: String,
}

/// Host-side parameters of a change-pubkey signing call. Hex fields
/// accept an optional `0x` prefix.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePubKeyRequest {
    pub new_pubkey: String,
    pub new_privkey: String,
    pub nonce: i64,
    pub expired_at: i64,
    pub account_index: i64,
    pub api_key_index: u8,
    pub chain_id: u32,
}

/// The signed transaction record as the exchange API expects it, with
/// PascalCase field names and base64-encoded byte fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignedChangePubKey {
    pub sig: String,
    pub account_index: i64,
    pub api_key_index: u8,
    pub nonce: i64,
    pub pub_key: String,
    pub expired_at: i64,
    pub message_to_sign: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePubKeyResponse {
    pub transaction: SignedChangePubKey,
    pub message_to_sign: String,
}

/// Result-or-error record for the host boundary. Serializes either as
/// the success payload itself or as `{"error": <message>}`; no error
/// ever crosses the boundary as an exception.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiOutcome<T> {
    Success(T),
    Failure { error: String },
}

impl<T> From<Result<T, SignerError>> for ApiOutcome<T> {
    fn from(result: Result<T, SignerError>) -> Self {
        match result {
            Ok(value) => ApiOutcome::Success(value),
            Err(err) => ApiOutcome::Failure {
                error: err.to_string(),
            },
        }
    }
}

fn decode_hex(input: &str) -> Result<Vec<u8>, SignerError> {
    Ok(hex::decode(input.strip_prefix("0x").unwrap_or(input))?)
}

/// The signing service exposed to the host layer. Owns one key manager;
/// independent instances are fully isolated, which is also what makes
/// them testable side by side.
pub struct Signer {
    key_manager: KeyManager,
}

impl Signer {
    pub fn new() -> Self {
        Signer {
            key_manager: KeyManager::new(),
        }
    }

    pub fn key_manager(&self) -> &KeyManager {
        &self.key_manager
    }

    /// Produce a fresh random key pair. The key is returned, not
    /// installed; call [`Self::set_current_key`] to start signing with it.
    pub fn generate_api_key(&self) -> Result<KeyBundle, SignerError> {
        let key = SigningKey::random(&mut rand::rng()).map_err(SignerError::Signing)?;
        Ok(Self::bundle(&key))
    }

    /// Derive the deterministic key pair for a seed string.
    pub fn get_default_key(&self, seed: &str) -> Result<KeyBundle, SignerError> {
        let key = SigningKey::from_seed(seed.as_bytes()).map_err(SignerError::Signing)?;
        Ok(Self::bundle(&key))
    }

    /// Install a private key as the active signing key.
    pub fn set_current_key(&self, private_key_hex: &str) -> Result<SetKeyResponse, SignerError> {
        let private_key = decode_hex(private_key_hex)?;
        let public = self.key_manager.set_key(&private_key)?;
        Ok(SetKeyResponse {
            success: true,
            public_key: hex::encode(public),
        })
    }

    /// Build, hash, and sign a change-pubkey transaction. The signature
    /// is made with the key being rotated in, since the old key may not
    /// exist yet for a first-time registration.
    pub fn sign_change_pub_key(
        &self,
        request: &ChangePubKeyRequest,
    ) -> Result<ChangePubKeyResponse, SignerError> {
        let pub_key = decode_hex(&request.new_pubkey)?;
        if pub_key.len() != PUBLIC_KEY_SIZE {
            return Err(SignerError::PublicKeyLength(pub_key.len()));
        }
        let private_key = decode_hex(&request.new_privkey)?;
        let new_key = SigningKey::from_le_bytes(&private_key).map_err(SignerError::InvalidKey)?;

        let tx = ChangePubKeyTx::new(
            request.account_index,
            request.api_key_index,
            request.nonce,
            request.expired_at,
            &pub_key,
        )?;
        let digest = tx.hash(request.chain_id);
        let signature = new_key
            .sign(&mut rand::rng(), &digest)
            .map_err(SignerError::Signing)?;
        debug!(
            account_index = request.account_index,
            api_key_index = request.api_key_index,
            nonce = request.nonce,
            "signed change-pubkey transaction"
        );

        let message_to_sign = tx.l1_signature_body();
        Ok(ChangePubKeyResponse {
            transaction: SignedChangePubKey {
                sig: BASE64.encode(signature.to_le_bytes()),
                account_index: request.account_index,
                api_key_index: request.api_key_index,
                nonce: request.nonce,
                pub_key: BASE64.encode(tx.pub_key()),
                expired_at: request.expired_at,
                message_to_sign: message_to_sign.clone(),
            },
            message_to_sign,
        })
    }

    /// Sign a timed auth token with the active key.
    pub fn create_auth_token(
        &self,
        deadline: i64,
        account_index: i64,
        api_key_index: u8,
    ) -> Result<String, SignerError> {
        auth::create_auth_token(&self.key_manager, deadline, account_index, api_key_index)
    }

    fn bundle(key: &SigningKey) -> KeyBundle {
        KeyBundle {
            private_key: hex::encode(key.to_le_bytes()),
            public_key: hex::encode(key.verifying_key().to_le_bytes()),
        }
    }
}

impl Default for Signer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_api_key_is_loadable() {
        let signer = Signer::new();
        let bundle = signer.generate_api_key().unwrap();
        let response = signer.set_current_key(&bundle.private_key).unwrap();
        assert!(response.success);
        assert_eq!(response.public_key, bundle.public_key);
    }

    #[test]
    fn test_get_default_key_is_deterministic() {
        let signer = Signer::new();
        let first = signer.get_default_key("test-seed-1").unwrap();
        let second = signer.get_default_key("test-seed-1").unwrap();
        assert_eq!(first, second);

        let other = signer.get_default_key("test-seed-2").unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_set_current_key_accepts_0x_prefix() {
        let signer = Signer::new();
        let bundle = signer.get_default_key("prefix-test").unwrap();
        let response = signer
            .set_current_key(&format!("0x{}", bundle.private_key))
            .unwrap();
        assert_eq!(response.public_key, bundle.public_key);
    }

    #[test]
    fn test_set_current_key_rejects_bad_hex() {
        let signer = Signer::new();
        assert!(matches!(
            signer.set_current_key("not hex").unwrap_err(),
            SignerError::Hex(_)
        ));
    }

    #[test]
    fn test_sign_change_pub_key_rejects_short_key() {
        let signer = Signer::new();
        let bundle = signer.get_default_key("short-key").unwrap();
        let request = ChangePubKeyRequest {
            new_pubkey: "aabbcc".to_string(),
            new_privkey: bundle.private_key,
            nonce: 5,
            expired_at: 0,
            account_index: 3,
            api_key_index: 1,
            chain_id: 1,
        };
        let err = signer.sign_change_pub_key(&request).unwrap_err();
        assert_eq!(err, SignerError::PublicKeyLength(3));
        assert_eq!(err.to_string(), "Public key must be 40 bytes, got 3");
    }

    #[test]
    fn test_outcome_serialization() {
        let failure: ApiOutcome<KeyBundle> = ApiOutcome::from(Err(SignerError::NoActiveKey));
        match failure {
            ApiOutcome::Failure { error } => assert_eq!(error, "No active key set"),
            ApiOutcome::Success(_) => panic!("expected failure"),
        }
    }
}
