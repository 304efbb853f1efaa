use poseidon_hash::{hash_to_quintic_extension, Goldilocks};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

use crate::basefield::pack_le_bytes;
use crate::errors::CurveError;
use crate::scalarfield::{ScalarField, SCALAR_BYTES};

/// Upper bound on rejection-sampling retries before giving up. With the
/// top bit masked off the acceptance rate is about one half, so hitting
/// this bound means the randomness source is broken.
pub const MAX_RESAMPLES: usize = 128;

/// Uniform sampling for field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl RandomField for ScalarField {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.sample(StandardUniform)
    }
}

impl Distribution<ScalarField> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ScalarField {
        loop {
            let mut bytes = [0u8; SCALAR_BYTES];
            rng.fill_bytes(&mut bytes);
            // mask to 319 bits so roughly half the draws are canonical
            bytes[SCALAR_BYTES - 1] &= 0x7F;
            if let Ok(scalar) = ScalarField::from_canonical_le_bytes(&bytes) {
                return scalar;
            }
        }
    }
}

/// Sample a nonzero scalar, failing instead of spinning forever when the
/// randomness source keeps producing rejected draws.
pub fn sample_scalar<R: Rng + ?Sized>(rng: &mut R) -> Result<ScalarField, CurveError> {
    for _ in 0..MAX_RESAMPLES {
        let mut bytes = [0u8; SCALAR_BYTES];
        rng.fill_bytes(&mut bytes);
        bytes[SCALAR_BYTES - 1] &= 0x7F;
        match ScalarField::from_canonical_le_bytes(&bytes) {
            Ok(scalar) if !scalar.is_zero() => return Ok(scalar),
            _ => continue,
        }
    }
    Err(CurveError::SamplingFailed)
}

/// Derive a nonzero scalar deterministically from a seed. The seed bytes
/// are packed seven per field element, a counter element is appended,
/// and the digest is reduced modulo the group order. The counter only
/// advances in the negligible case where the digest reduces to zero.
pub fn scalar_from_seed(seed: &[u8]) -> Result<ScalarField, CurveError> {
    for counter in 0..MAX_RESAMPLES {
        let mut input = pack_le_bytes(seed);
        input.push(Goldilocks::from_canonical_u64(counter as u64));
        let digest = hash_to_quintic_extension(&input);
        let scalar = ScalarField::from_fp5(&digest);
        if !scalar.is_zero() {
            return Ok(scalar);
        }
    }
    Err(CurveError::SamplingFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_scalar_is_nonzero() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..32 {
            let scalar = sample_scalar(&mut rng).unwrap();
            assert!(!scalar.is_zero());
        }
    }

    #[test]
    fn test_sampling_is_deterministic_per_seed() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        assert_eq!(
            sample_scalar(&mut rng1).unwrap(),
            sample_scalar(&mut rng2).unwrap()
        );
    }

    #[test]
    fn test_random_field_trait() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = ScalarField::random(&mut rng);
        let b = ScalarField::random(&mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_scalar_from_seed_deterministic() {
        let a = scalar_from_seed(b"some seed material").unwrap();
        let b = scalar_from_seed(b"some seed material").unwrap();
        assert_eq!(a, b);
        assert!(!a.is_zero());
    }

    #[test]
    fn test_scalar_from_seed_distinct_seeds() {
        let a = scalar_from_seed(b"seed-a").unwrap();
        let b = scalar_from_seed(b"seed-b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_seed_is_accepted() {
        assert!(scalar_from_seed(&[]).is_ok());
    }
}
