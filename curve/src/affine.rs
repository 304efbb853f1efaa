use poseidon_hash::{Fp5Element, Goldilocks};

use crate::projective::Projective;

/// Window width, in bits, used by the precomputed multiplication tables.
pub const WINDOW_BITS: u32 = 4;

const FP5_ZERO: Fp5Element = Fp5Element([
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
]);

/// Normalized point (Z = T = 1), used as the cheap operand of mixed
/// addition and as window-table entries.
#[derive(Copy, Clone, Debug)]
pub struct Affine {
    pub(crate) x: Fp5Element,
    pub(crate) u: Fp5Element,
}

impl Affine {
    /// The neutral element in normalized form.
    pub const NEUTRAL: Self = Affine {
        x: FP5_ZERO,
        u: FP5_ZERO,
    };

    #[inline]
    pub fn negate(&self) -> Affine {
        Affine {
            x: self.x,
            u: self.u.neg(),
        }
    }

    /// Lift back to fractional coordinates.
    pub fn to_projective(&self) -> Projective {
        let one = Fp5Element::one();
        Projective {
            x: self.x,
            z: one,
            u: self.u,
            t: one,
        }
    }

    /// Normalize a point, one inversion and four multiplications.
    pub fn from_projective(point: &Projective) -> Affine {
        let m = point.z.mul(&point.t).inverse();
        Affine {
            x: point.x.mul(&point.t).mul(&m),
            u: point.u.mul(&point.z).mul(&m),
        }
    }

    /// Normalize a batch of points with a single inversion
    /// (Montgomery's trick).
    pub fn batch_from_projective(points: &[Projective]) -> Vec<Affine> {
        if points.is_empty() {
            return Vec::new();
        }

        // prefix[i] holds the product of the first i denominators
        let mut prefix = Vec::with_capacity(points.len());
        let mut acc = Fp5Element::one();
        for point in points {
            prefix.push(acc);
            acc = acc.mul(&point.z.mul(&point.t));
        }

        let mut inv = acc.inverse();
        let mut result = vec![Affine::NEUTRAL; points.len()];
        for i in (0..points.len()).rev() {
            let m = inv.mul(&prefix[i]);
            result[i] = Affine {
                x: points[i].x.mul(&points[i].t).mul(&m),
                u: points[i].u.mul(&points[i].z).mul(&m),
            };
            inv = inv.mul(&points[i].z.mul(&points[i].t));
        }
        result
    }

    /// Build the normalized table [P, 2P, ..., 15P] for 4-bit windowed
    /// multiplication.
    pub fn window_of(point: &Projective) -> Vec<Affine> {
        let mut multiples = Vec::with_capacity((1 << WINDOW_BITS) - 1);
        multiples.push(*point);
        for i in 1..(1 << WINDOW_BITS) - 1 {
            let previous: &Projective = &multiples[i - 1];
            let next = if i & 1 == 1 {
                multiples[i >> 1].double()
            } else {
                previous.add(point)
            };
            multiples.push(next);
        }
        Self::batch_from_projective(&multiples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Group;
    use crate::scalarfield::ScalarField;

    #[test]
    fn test_projective_roundtrip() {
        let p = Projective::mul_generator(&ScalarField::from_u64(17));
        let affine = Affine::from_projective(&p);
        assert_eq!(affine.to_projective(), p);
    }

    #[test]
    fn test_negate() {
        let p = Projective::mul_generator(&ScalarField::from_u64(9));
        let neg = Affine::from_projective(&p).negate();
        assert_eq!(neg.to_projective(), p.negate());
    }

    #[test]
    fn test_batch_matches_single() {
        let points: Vec<Projective> = (1u64..=6)
            .map(|k| Projective::mul_generator(&ScalarField::from_u64(k)))
            .collect();
        let batch = Affine::batch_from_projective(&points);
        for (affine, point) in batch.iter().zip(points.iter()) {
            let single = Affine::from_projective(point);
            assert_eq!(affine.to_projective(), single.to_projective());
        }
    }

    #[test]
    fn test_window_contents() {
        let g = Projective::GENERATOR;
        let table = Affine::window_of(&g);
        assert_eq!(table.len(), 15);
        for (i, entry) in table.iter().enumerate() {
            let expected = g.scalar_mul(&ScalarField::from_u64(i as u64 + 1));
            assert_eq!(entry.to_projective(), expected);
        }
    }

    #[test]
    fn test_mixed_addition_matches_full() {
        let p = Projective::mul_generator(&ScalarField::from_u64(3));
        let q = Projective::mul_generator(&ScalarField::from_u64(11));
        let q_affine = Affine::from_projective(&q);
        assert_eq!(p.add_affine(&q_affine), p.add(&q));
    }
}
