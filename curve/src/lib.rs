//! Elliptic curve group over the degree-5 extension of the Goldilocks field.
//!
//! This crate provides projective and affine curve points, a scalar field
//! implementation, and helpers for sampling private scalars either from a
//! secure random source or deterministically from a seed string. The curve
//! parameters and generator are fixed to the values in the `projective`
//! module; base-field arithmetic and Poseidon2 hashing come from the
//! `poseidon-hash` crate.

mod affine;
mod basefield;
mod errors;
mod group;
mod msm;
mod projective;
mod random;
mod scalarfield;

pub use affine::{Affine, WINDOW_BITS};
pub use basefield::{
    fp5_eq, fp5_to_le_bytes, limbs_from_le_bytes, pack_le_bytes, GOLDILOCKS_MODULUS,
};
pub use errors::CurveError;
pub use group::{Group, ScalarBits};
pub use msm::double_scalar_mul_basepoint;
pub use poseidon_hash::{Fp5Element, Goldilocks};
pub use projective::{Projective, POINT_BYTES};
pub use random::{sample_scalar, scalar_from_seed, RandomField, MAX_RESAMPLES};
pub use scalarfield::{ScalarField, SCALAR_BYTES};
