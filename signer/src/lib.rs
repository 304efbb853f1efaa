//! Key management and transaction signing for a layer-2 exchange.
//!
//! The crate exposes a [`Signer`] service with the four host-facing
//! operations: random key generation, deterministic key derivation from
//! a seed, installing an active key, and signing the change-pubkey
//! transaction. The underlying [`KeyManager`] holds at most one active
//! key pair behind a lock and signs pre-hashed messages with it. All
//! byte layouts (transaction serialization, digests, key and signature
//! encodings) are fixed-width little-endian contracts with the
//! verifying chain.

mod api;
mod auth;
mod errors;
mod key_manager;
mod tx;

pub use api::{
    ApiOutcome, ChangePubKeyRequest, ChangePubKeyResponse, KeyBundle, SetKeyResponse,
    SignedChangePubKey, Signer,
};
pub use auth::create_auth_token;
pub use errors::SignerError;
pub use key_manager::KeyManager;
pub use tx::{ChangePubKeyTx, SERIALIZED_SIZE, TX_TYPE_CHANGE_PUB_KEY};
