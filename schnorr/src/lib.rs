//! Schnorr signatures over the quintic-extension Goldilocks curve.
//!
//! Signatures are produced in (s, e) form: the challenge scalar e is the
//! Poseidon2 hash of the nonce commitment, the public key, and the
//! message digest, and s = k - e*sk. Verification recomputes the
//! commitment from (s, e) and checks that it hashes back to e. All keys,
//! digests, and signatures use fixed-size little-endian encodings.

mod constants;
mod errors;
mod keys;
mod signatures;

pub use constants::{HASH_SIZE, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE, SIGNATURE_SIZE};
pub use errors::SchnorrError;
pub use keys::{SigningKey, VerifyingKey};
pub use signatures::{MessageHash, Signature};
