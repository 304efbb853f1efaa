use schnorr::SchnorrError;
use thiserror::Error;

/// Errors surfaced by the signing service. Boundary callers flatten
/// these into `{error: <message>}` records; the messages below are the
/// strings the host layer relays, so treat them as part of the
/// interface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignerError {
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The exact wording is relied on by host-side tests.
    #[error("Public key must be 40 bytes, got {0}")]
    PublicKeyLength(usize),

    #[error("Invalid key: {0}")]
    InvalidKey(SchnorrError),

    #[error("Invalid point encoding")]
    InvalidPoint,

    #[error("Transaction field out of range: {0}")]
    Serialization(&'static str),

    #[error("Failed to sign: {0}")]
    Signing(SchnorrError),

    #[error("No active key set")]
    NoActiveKey,
}
