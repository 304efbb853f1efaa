use curve::{limbs_from_le_bytes, CurveError, Goldilocks, Projective, ScalarField};
use poseidon_hash::hash_to_quintic_extension;
use serde::{Deserialize, Serialize};

use crate::constants::{HASH_SIZE, SIGNATURE_SIZE};
use crate::errors::SchnorrError;

/// A 40-byte message digest, carried as five base-field limbs so it can
/// be absorbed directly by the challenge hash. Callers hash their
/// message themselves; this crate only signs fixed-size digests.
#[derive(Copy, Clone, Debug)]
pub struct MessageHash(pub [Goldilocks; 5]);

impl MessageHash {
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        if bytes.len() != HASH_SIZE {
            return Err(CurveError::InvalidLength {
                expected: HASH_SIZE,
                got: bytes.len(),
            }
            .into());
        }
        let mut buf = [0u8; HASH_SIZE];
        buf.copy_from_slice(bytes);
        Ok(MessageHash(limbs_from_le_bytes(&buf)))
    }
}

/// Schnorr signature in (s, e) form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub(crate) s: ScalarField,
    pub(crate) e: ScalarField,
}

impl Signature {
    pub(crate) fn new(s: ScalarField, e: ScalarField) -> Self {
        Signature { s, e }
    }

    /// Canonical 80-byte encoding, s followed by e.
    pub fn to_le_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..SIGNATURE_SIZE / 2].copy_from_slice(&self.s.to_le_bytes());
        bytes[SIGNATURE_SIZE / 2..].copy_from_slice(&self.e.to_le_bytes());
        bytes
    }

    /// Decode a signature, rejecting non-canonical scalars.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        if bytes.len() != SIGNATURE_SIZE {
            return Err(CurveError::InvalidLength {
                expected: SIGNATURE_SIZE,
                got: bytes.len(),
            }
            .into());
        }
        let s = ScalarField::from_canonical_le_bytes(&bytes[..SIGNATURE_SIZE / 2])?;
        let e = ScalarField::from_canonical_le_bytes(&bytes[SIGNATURE_SIZE / 2..])?;
        Ok(Signature { s, e })
    }
}

/// The Fiat-Shamir challenge: hash the encoded commitment, the encoded
/// public key, and the message limbs, then reduce the digest to a
/// scalar. Binding the public key into the challenge stops an attacker
/// from reusing a signature under a related key.
pub(crate) fn challenge(
    commitment: &Projective,
    public_key: &Projective,
    message: &MessageHash,
) -> ScalarField {
    let mut input = Vec::with_capacity(15);
    input.extend_from_slice(&commitment.encode().0);
    input.extend_from_slice(&public_key.encode().0);
    input.extend_from_slice(&message.0);
    ScalarField::from_fp5(&hash_to_quintic_extension(&input))
}
