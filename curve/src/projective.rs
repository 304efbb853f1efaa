// E(GF(p^5)) : y^2 = x*(x^2 + a*x + b), p = 2^64 - 2^32 + 1 (Goldilocks)
// a = 2, b = 263*u where u is the primitive element of the quintic extension.
// Prime subgroup order (hex): 0x7ffffffd800000077ffffff1000000167fffffe6cfb80639e8885c39d724a09ce80fd996948bffe1
// Points are carried in fractional (X:Z:U:T) coordinates: x = X/Z, u = U/T,
// with complete addition formulas. A point encodes to the single base-field
// element w = T/U (zero for the neutral element).

use poseidon_hash::{Fp5Element, Goldilocks};

use crate::affine::Affine;
use crate::basefield::fp5_eq;
use crate::errors::CurveError;
use crate::group::Group;
use crate::scalarfield::ScalarField;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Number of bytes in the canonical point encoding.
pub const POINT_BYTES: usize = 40;

// Curve constant a = 2.
pub(crate) const CURVE_A: Fp5Element = Fp5Element([
    Goldilocks(2),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
]);

// Curve constant b = 263*u, and the small multiples the formulas need.
pub(crate) const CURVE_B: Fp5Element = Fp5Element([
    Goldilocks(0),
    Goldilocks(263),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
]);
pub(crate) const CURVE_B_MUL2: Fp5Element = Fp5Element([
    Goldilocks(0),
    Goldilocks(526),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
]);
pub(crate) const CURVE_B_MUL4: Fp5Element = Fp5Element([
    Goldilocks(0),
    Goldilocks(1052),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
]);
pub(crate) const CURVE_B_MUL16: Fp5Element = Fp5Element([
    Goldilocks(0),
    Goldilocks(4208),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
]);

const FP5_ZERO: Fp5Element = Fp5Element([
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
]);
const FP5_ONE: Fp5Element = Fp5Element([
    Goldilocks(1),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
]);
const FP5_FOUR: Fp5Element = Fp5Element([
    Goldilocks(4),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
    Goldilocks(0),
]);

/// Projective point on the curve in fractional (X:Z:U:T) coordinates.
#[derive(Copy, Clone, Debug)]
pub struct Projective {
    pub(crate) x: Fp5Element,
    pub(crate) z: Fp5Element,
    pub(crate) u: Fp5Element,
    pub(crate) t: Fp5Element,
}

impl Projective {
    /// The neutral element (0:1:0:1).
    pub const NEUTRAL: Self = Projective {
        x: FP5_ZERO,
        z: FP5_ONE,
        u: FP5_ZERO,
        t: FP5_ONE,
    };

    /// Fixed generator of the prime-order subgroup.
    pub const GENERATOR: Self = Projective {
        x: Fp5Element([
            Goldilocks(12883135586176881569),
            Goldilocks(4356519642755055268),
            Goldilocks(5248930565894896907),
            Goldilocks(2165973894480315022),
            Goldilocks(2448410071095648785),
        ]),
        z: FP5_ONE,
        u: FP5_ONE,
        t: FP5_FOUR,
    };

    /// Check if this point is the neutral element.
    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.u.is_zero()
    }

    /// Complete point addition, cost 10M.
    pub fn add(&self, other: &Projective) -> Projective {
        let t1 = self.x.mul(&other.x);
        let t2 = self.z.mul(&other.z);
        let t3 = self.u.mul(&other.u);
        let t4 = self.t.mul(&other.t);
        let t5 = self
            .x
            .add(&self.z)
            .mul(&other.x.add(&other.z))
            .sub(&t1.add(&t2));
        let t6 = self
            .u
            .add(&self.t)
            .mul(&other.u.add(&other.t))
            .sub(&t3.add(&t4));
        let t7 = t1.add(&t2.mul(&CURVE_B));
        let t8 = t4.mul(&t7);
        let t9 = t3.mul(&t5.mul(&CURVE_B_MUL2).add(&t7.double()));
        let t10 = t4.add(&t3.double()).mul(&t5.add(&t7));

        Projective {
            x: t10.sub(&t8).mul(&CURVE_B),
            z: t8.sub(&t9),
            u: t6.mul(&t2.mul(&CURVE_B).sub(&t1)),
            t: t8.add(&t9),
        }
    }

    /// Mixed addition with a normalized point, cost 8M.
    pub fn add_affine(&self, other: &Affine) -> Projective {
        let t1 = self.x.mul(&other.x);
        let t2 = self.z;
        let t3 = self.u.mul(&other.u);
        let t4 = self.t;
        let t5 = self.x.add(&other.x.mul(&self.z));
        let t6 = self.u.add(&other.u.mul(&self.t));
        let t7 = t1.add(&t2.mul(&CURVE_B));
        let t8 = t4.mul(&t7);
        let t9 = t3.mul(&t5.mul(&CURVE_B_MUL2).add(&t7.double()));
        let t10 = t4.add(&t3.double()).mul(&t5.add(&t7));

        Projective {
            x: t10.sub(&t8).mul(&CURVE_B),
            z: t8.sub(&t9),
            u: t6.mul(&t2.mul(&CURVE_B).sub(&t1)),
            t: t8.add(&t9),
        }
    }

    /// Point doubling, cost 4M+5S.
    pub fn double(&self) -> Projective {
        let t1 = self.z.mul(&self.t);
        let t2 = t1.mul(&self.t);
        let x1 = t2.square();
        let z1 = t1.mul(&self.u);
        let t3 = self.u.square();
        let w1 = t2.sub(&t3.mul(&self.x.add(&self.z).double()));
        let t4 = z1.square();

        let z_new = w1.square();
        Projective {
            x: t4.mul(&CURVE_B_MUL4),
            z: z_new,
            u: w1.add(&z1).square().sub(&t4.add(&z_new)),
            t: x1.double().sub(&t4.mul(&FP5_FOUR).add(&z_new)),
        }
    }

    /// n successive doublings, cheaper than n calls to [`Self::double`]
    /// once n >= 2 (cost n*(2M+5S) + 2M+1S).
    pub fn mdouble(&self, n: u32) -> Projective {
        if n == 0 {
            return *self;
        }
        if n == 1 {
            return self.double();
        }

        let t1 = self.z.mul(&self.t);
        let t2 = t1.mul(&self.t);
        let x1 = t2.square();
        let z1 = t1.mul(&self.u);
        let t3 = self.u.square();
        let w1 = t2.sub(&t3.mul(&self.x.add(&self.z).double()));
        let t4 = w1.square();
        let t5 = z1.square();

        let mut x_acc = t5.square().mul(&CURVE_B_MUL16);
        let mut w_acc = x1.double().sub(&t5.mul(&FP5_FOUR).add(&t4));
        let mut z_acc = w1.add(&z1).square().sub(&t4.add(&t5));

        for _ in 2..n {
            let t1 = z_acc.square();
            let t2 = t1.square();
            let t3 = w_acc.square();
            let t4 = t3.square();
            let t5 = w_acc.add(&z_acc).square().sub(&t1.add(&t3));
            z_acc = t5.mul(&x_acc.add(&t1).double().sub(&t3));
            x_acc = t2.mul(&t4).mul(&CURVE_B_MUL16);
            w_acc = t4.add(&t2.mul(&CURVE_B_MUL4.sub(&FP5_FOUR))).neg();
        }

        let t1 = w_acc.square();
        let t2 = z_acc.square();
        let t3 = w_acc.add(&z_acc).square().sub(&t1.add(&t2));
        let w1 = t1.sub(&x_acc.add(&t2).double());
        let z_new = w1.square();

        Projective {
            x: t3.square().mul(&CURVE_B),
            z: z_new,
            u: t3.mul(&w1),
            t: t1.double().mul(&t1.sub(&t2.double())).sub(&z_new),
        }
    }

    /// Negate a point (flip the sign of the u fraction).
    #[inline]
    pub fn negate(&self) -> Projective {
        Projective {
            x: self.x,
            z: self.z,
            u: self.u.neg(),
            t: self.t,
        }
    }

    /// Encode to the canonical base-field element w = T/U; the neutral
    /// element encodes to zero.
    pub fn encode(&self) -> Fp5Element {
        if self.u.is_zero() {
            FP5_ZERO
        } else {
            self.t.mul(&self.u.inverse())
        }
    }

    /// Decode an encoded point. The curve equation y^2 = x*(x^2 + a*x + b)
    /// with w = y/x yields x^2 - (w^2 - a)*x + b = 0; exactly one root of
    /// that quadratic is a non-square, and that root is the decoded x
    /// coordinate. Fails when the discriminant has no square root, which
    /// is the case for exactly the field elements that encode no point.
    pub fn decode(w: &Fp5Element) -> Result<Projective, CurveError> {
        if w.is_zero() {
            return Ok(Self::NEUTRAL);
        }

        let e = w.square().sub(&CURVE_A);
        let delta = e.square().sub(&CURVE_B_MUL4);
        let (r, ok) = delta.canonical_sqrt();
        if !ok {
            return Err(CurveError::InvalidPoint);
        }

        let half = FP5_ONE.double().inverse();
        let x1 = e.add(&r).mul(&half);
        let x2 = e.sub(&r).mul(&half);
        let x = if x1.legendre().equals(&Goldilocks::one()) {
            x2
        } else {
            x1
        };

        Ok(Projective {
            x,
            z: FP5_ONE,
            u: FP5_ONE,
            t: *w,
        })
    }

    /// Canonical 40-byte little-endian encoding.
    pub fn to_le_bytes(&self) -> [u8; POINT_BYTES] {
        self.encode().to_bytes_le()
    }

    /// Decode a point from its 40-byte encoding, checking subgroup
    /// membership.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Projective, CurveError> {
        if bytes.len() != POINT_BYTES {
            return Err(CurveError::InvalidLength {
                expected: POINT_BYTES,
                got: bytes.len(),
            });
        }
        let w = Fp5Element::from_bytes_le(bytes).map_err(|_| CurveError::InvalidPoint)?;
        Self::decode(&w)
    }

    /// Windowed scalar multiplication with a normalized 4-bit table.
    pub fn scalar_mul_windowed(&self, scalar: &ScalarField) -> Projective {
        let table = Affine::window_of(self);
        let limbs = scalar.to_u64_limbs();

        let mut result = Self::NEUTRAL;
        for &limb in limbs.iter().rev() {
            for shift in (0..64).step_by(4).rev() {
                result = result.mdouble(4);
                let window = ((limb >> shift) & 0xF) as usize;
                if window != 0 {
                    result = result.add_affine(&table[window - 1]);
                }
            }
        }
        result
    }

    /// Multiply the fixed generator.
    pub fn mul_generator(scalar: &ScalarField) -> Projective {
        Self::GENERATOR.scalar_mul_windowed(scalar)
    }
}

// Equality through the u/t fraction: on the prime-order subgroup the
// encoding w = T/U is injective, so cross-multiplying the fractions
// decides equality without normalizing either side.
impl PartialEq for Projective {
    fn eq(&self, other: &Self) -> bool {
        fp5_eq(&self.u.mul(&other.t), &other.u.mul(&self.t))
    }
}

impl Eq for Projective {}

impl Group for Projective {
    type Scalar = ScalarField;

    #[inline]
    fn identity() -> Self {
        Self::NEUTRAL
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_neutral()
    }

    #[inline]
    fn generator() -> Self {
        Self::GENERATOR
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }
}

impl Add for Projective {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Projective::add(&self, &other)
    }
}

impl AddAssign for Projective {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Projective {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Projective {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Projective {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<ScalarField> for Projective {
    type Output = Self;

    fn mul(self, scalar: ScalarField) -> Self {
        self.scalar_mul_windowed(&scalar)
    }
}

impl Mul<&ScalarField> for Projective {
    type Output = Self;

    fn mul(self, scalar: &ScalarField) -> Self {
        self.scalar_mul_windowed(scalar)
    }
}

impl Mul<Projective> for ScalarField {
    type Output = Projective;

    fn mul(self, point: Projective) -> Projective {
        point.scalar_mul_windowed(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Group;

    #[test]
    fn test_neutral() {
        let n = Projective::NEUTRAL;
        assert!(n.is_neutral());
        assert!(fp5_eq(&n.encode(), &FP5_ZERO));
    }

    #[test]
    fn test_generator_is_not_neutral() {
        assert!(!Projective::GENERATOR.is_neutral());
    }

    #[test]
    fn test_addition_with_neutral() {
        let g = Projective::GENERATOR;
        let n = Projective::NEUTRAL;
        assert_eq!(g + n, g);
        assert_eq!(n + g, g);
        assert_eq!(n + n, n);
    }

    #[test]
    fn test_doubling_matches_addition() {
        let g = Projective::GENERATOR;
        assert_eq!(g.double(), g + g);
        assert_eq!(g.mdouble(3), g.double().double().double());
    }

    #[test]
    fn test_negation() {
        let g = Projective::GENERATOR;
        assert_eq!(g + (-g), Projective::NEUTRAL);
    }

    #[test]
    fn test_scalar_mul_small() {
        let g = Projective::GENERATOR;
        let five = g.scalar_mul(&ScalarField::from_u64(5));
        assert_eq!(five, g + g + g + g + g);
    }

    #[test]
    fn test_scalar_mul_zero_and_one() {
        let g = Projective::GENERATOR;
        assert_eq!(g.scalar_mul(&ScalarField::ZERO), Projective::NEUTRAL);
        assert_eq!(g.scalar_mul(&ScalarField::ONE), g);
    }

    #[test]
    fn test_windowed_matches_double_and_add() {
        let g = Projective::GENERATOR;
        let scalar = ScalarField::from_u64(0xDEADBEEFCAFE);
        assert_eq!(g.scalar_mul_windowed(&scalar), g.scalar_mul(&scalar));
    }

    #[test]
    fn test_distributivity() {
        let g = Projective::GENERATOR;
        let a = ScalarField::from_u64(3);
        let b = ScalarField::from_u64(5);
        assert_eq!(
            g.scalar_mul(&(a + b)),
            g.scalar_mul(&a) + g.scalar_mul(&b)
        );
    }

    #[test]
    fn test_mul_generator_matches_scalar_mul() {
        let scalar = ScalarField::from_u64(424242);
        assert_eq!(
            Projective::mul_generator(&scalar),
            Projective::GENERATOR.scalar_mul(&scalar)
        );
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        for k in [1u64, 2, 3, 7, 1000, 123456789] {
            let p = Projective::mul_generator(&ScalarField::from_u64(k));
            let decoded = Projective::decode(&p.encode()).expect("decode");
            assert_eq!(decoded, p);
        }
    }

    #[test]
    fn test_byte_roundtrip() {
        let p = Projective::mul_generator(&ScalarField::from_u64(99));
        let bytes = p.to_le_bytes();
        assert_eq!(Projective::from_le_bytes(&bytes).unwrap(), p);
    }

    #[test]
    fn test_from_le_bytes_rejects_bad_length() {
        assert_eq!(
            Projective::from_le_bytes(&[0u8; 39]),
            Err(CurveError::InvalidLength {
                expected: 40,
                got: 39
            })
        );
    }

    #[test]
    fn test_mul_u64_matches_scalar_mul() {
        let g = Projective::GENERATOR;
        assert_eq!(g.mul_u64(42), g.scalar_mul(&ScalarField::from_u64(42)));
    }
}
