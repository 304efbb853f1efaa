use core::fmt;

use curve::{
    double_scalar_mul_basepoint, sample_scalar, scalar_from_seed, CurveError, Projective,
    ScalarField,
};
use rand::Rng;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{PUBLIC_KEY_SIZE, SECRET_KEY_SIZE};
use crate::errors::SchnorrError;
use crate::signatures::{challenge, MessageHash, Signature};

/// Secret half of a key pair. Never serialized; export it explicitly
/// with [`Self::to_le_bytes`] if it has to leave the process.
#[derive(Clone)]
pub struct SigningKey {
    scalar: ScalarField,
    public: Projective,
}

impl SigningKey {
    fn from_scalar(scalar: ScalarField) -> Result<Self, SchnorrError> {
        if scalar.is_zero() {
            return Err(SchnorrError::ZeroSecretKey);
        }
        let public = Projective::mul_generator(&scalar);
        Ok(SigningKey { scalar, public })
    }

    /// Generate a fresh key from a secure randomness source.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, SchnorrError> {
        Self::from_scalar(sample_scalar(rng)?)
    }

    /// Derive a key deterministically from a seed. The same seed always
    /// yields the same key.
    pub fn from_seed(seed: &[u8]) -> Result<Self, SchnorrError> {
        Self::from_scalar(scalar_from_seed(seed)?)
    }

    /// Decode a key from its canonical 40-byte scalar encoding.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        if bytes.len() != SECRET_KEY_SIZE {
            return Err(CurveError::InvalidLength {
                expected: SECRET_KEY_SIZE,
                got: bytes.len(),
            }
            .into());
        }
        Self::from_scalar(ScalarField::from_canonical_le_bytes(bytes)?)
    }

    pub fn to_le_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.scalar.to_le_bytes()
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey { point: self.public }
    }

    /// Sign a message digest with a random nonce.
    pub fn sign<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        message: &MessageHash,
    ) -> Result<Signature, SchnorrError> {
        self.sign_with_nonce(&sample_scalar(rng)?, message)
    }

    /// Sign with an explicit nonce. The nonce must be unique per
    /// message; reusing one across two messages reveals the secret key.
    pub fn sign_with_nonce(
        &self,
        nonce: &ScalarField,
        message: &MessageHash,
    ) -> Result<Signature, SchnorrError> {
        if nonce.is_zero() {
            return Err(SchnorrError::ZeroNonce);
        }
        let commitment = Projective::mul_generator(nonce);
        let e = challenge(&commitment, &self.public, message);
        let s = *nonce - e * self.scalar;
        Ok(Signature::new(s, e))
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never print the scalar
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

/// Public half of a key pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    point: Projective,
}

impl VerifyingKey {
    /// Decode a public key from its 40-byte point encoding. The neutral
    /// element is rejected since no secret key produces it.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, SchnorrError> {
        let point = Projective::from_le_bytes(bytes)?;
        if point.is_neutral() {
            return Err(CurveError::InvalidPoint.into());
        }
        Ok(VerifyingKey { point })
    }

    pub fn to_le_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.point.to_le_bytes()
    }

    /// Verify a signature by recomputing the commitment as
    /// s*G + e*P and checking that it hashes back to e.
    pub fn verify(&self, message: &MessageHash, signature: &Signature) -> bool {
        let commitment =
            double_scalar_mul_basepoint(&signature.s, &signature.e, &self.point);
        challenge(&commitment, &self.point, message) == signature.e
    }
}

impl Serialize for VerifyingKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_le_bytes())
    }
}

impl<'de> Deserialize<'de> for VerifyingKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = VerifyingKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a 40-byte encoded curve point")
            }

            fn visit_bytes<E: de::Error>(self, bytes: &[u8]) -> Result<Self::Value, E> {
                VerifyingKey::from_le_bytes(bytes).map_err(E::custom)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut bytes = Vec::with_capacity(PUBLIC_KEY_SIZE);
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                VerifyingKey::from_le_bytes(&bytes).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(KeyVisitor)
    }
}
