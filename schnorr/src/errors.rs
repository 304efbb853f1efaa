use curve::CurveError;
use thiserror::Error;

/// Errors surfaced by key handling and signing.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchnorrError {
    /// The secret scalar is zero, which would make the public key the
    /// neutral element.
    #[error("secret key scalar is zero")]
    ZeroSecretKey,

    /// The signing nonce is zero, which would leak the secret key.
    #[error("signing nonce is zero")]
    ZeroNonce,

    #[error(transparent)]
    Curve(#[from] CurveError),
}
