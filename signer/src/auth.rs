use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use curve::pack_le_bytes;
use poseidon_hash::hash_to_quintic_extension;
use schnorr::MessageHash;

use crate::errors::SignerError;
use crate::key_manager::KeyManager;

// Domain tag separating auth-token digests from transaction digests.
const AUTH_DOMAIN_TAG: u8 = 7;

/// Create a timed API auth token: sign (deadline, account index, api key
/// index) with the active key and render the fields colon-separated with
/// the base64 signature last. The server re-derives the digest from the
/// plaintext fields and verifies.
pub fn create_auth_token(
    key_manager: &KeyManager,
    deadline: i64,
    account_index: i64,
    api_key_index: u8,
) -> Result<String, SignerError> {
    if deadline < 0 {
        return Err(SignerError::Serialization("deadline is negative"));
    }
    if account_index < 0 {
        return Err(SignerError::Serialization("account index is negative"));
    }

    let mut bytes = Vec::with_capacity(18);
    bytes.push(AUTH_DOMAIN_TAG);
    bytes.extend_from_slice(&deadline.to_le_bytes());
    bytes.extend_from_slice(&account_index.to_le_bytes());
    bytes.push(api_key_index);

    let digest = MessageHash(hash_to_quintic_extension(&pack_le_bytes(&bytes)).0);
    let signature = key_manager.sign_hash(&digest, None)?;

    Ok(format!(
        "{deadline}:{account_index}:{api_key_index}:{}",
        BASE64.encode(signature.to_le_bytes())
    ))
}
