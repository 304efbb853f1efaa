//! Scalar field of the curve: integers modulo the prime subgroup order
//! n = 0x7ffffffd800000077ffffff1000000167fffffe6cfb80639e8885c39d724a09ce80fd996948bffe1.
//!
//! Elements are held as five little-endian u64 limbs and are always
//! canonical (strictly below n). Addition and subtraction use plain
//! carry/borrow chains; multiplication and inversion go through
//! `num-bigint`, which keeps the reduction code obviously correct at the
//! cost of a heap allocation per product.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use poseidon_hash::Fp5Element;
use serde::{Deserialize, Serialize};

use crate::errors::CurveError;
use crate::group::ScalarBits;

/// Number of bytes in the canonical little-endian scalar encoding.
pub const SCALAR_BYTES: usize = 40;

/// Scalar field element, canonical [u64; 5] in little-endian limb order.
#[derive(Copy, Clone, Default, Eq, PartialEq, Serialize)]
pub struct ScalarField {
    limbs: [u64; 5],
}

// Group order n, little-endian limbs.
const MODULUS: [u64; 5] = [
    0xE80FD996948BFFE1,
    0xE8885C39D724A09C,
    0x7FFFFFE6CFB80639,
    0x7FFFFFF100000016,
    0x7FFFFFFD80000007,
];

impl ScalarField {
    /// Zero element.
    pub const ZERO: Self = ScalarField { limbs: [0; 5] };

    /// One element.
    pub const ONE: Self = ScalarField {
        limbs: [1, 0, 0, 0, 0],
    };

    /// Create a scalar from a small integer.
    #[inline]
    pub fn from_u64(val: u64) -> Self {
        ScalarField {
            limbs: [val, 0, 0, 0, 0],
        }
    }

    #[inline]
    pub fn to_u64_limbs(&self) -> [u64; 5] {
        self.limbs
    }

    /// Check if this scalar is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0, 0, 0, 0, 0]
    }

    /// Canonical little-endian byte encoding, limb 0 first.
    pub fn to_le_bytes(&self) -> [u8; SCALAR_BYTES] {
        let mut bytes = [0u8; SCALAR_BYTES];
        for (i, limb) in self.limbs.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
        }
        bytes
    }

    /// Strict decode: the bytes must be exactly [`SCALAR_BYTES`] long and
    /// encode an integer strictly below the group order. Key and signature
    /// material goes through this path so that a non-canonical encoding is
    /// rejected rather than silently reduced.
    pub fn from_canonical_le_bytes(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() != SCALAR_BYTES {
            return Err(CurveError::InvalidLength {
                expected: SCALAR_BYTES,
                got: bytes.len(),
            });
        }
        let mut limbs = [0u64; 5];
        for (i, chunk) in bytes.chunks(8).enumerate() {
            let mut limb = [0u8; 8];
            limb.copy_from_slice(chunk);
            limbs[i] = u64::from_le_bytes(limb);
        }
        if !is_canonical(limbs) {
            return Err(CurveError::NonCanonicalScalar);
        }
        Ok(ScalarField { limbs })
    }

    /// Reducing decode: interprets the bytes as a little-endian integer of
    /// any length and reduces it modulo the group order. Only the
    /// hash-to-scalar paths use this.
    pub fn from_noncanonical_le_bytes(bytes: &[u8]) -> Self {
        Self::from_biguint(BigUint::from_bytes_le(bytes) % modulus_biguint())
    }

    /// Reduce a quintic-extension element (read as a 320-bit little-endian
    /// integer) into the scalar field. This is the hash-to-scalar
    /// transform used for challenges and seed-derived keys.
    pub fn from_fp5(value: &Fp5Element) -> Self {
        Self::from_noncanonical_le_bytes(&value.to_bytes_le())
    }

    /// Multiplicative inverse by Fermat's little theorem: a^(n-2) mod n.
    /// Returns zero for the zero scalar.
    pub fn inverse(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        let n = modulus_biguint();
        let exp = &n - BigUint::from(2u8);
        Self::from_biguint(self.to_biguint().modpow(&exp, &n))
    }

    fn to_biguint(self) -> BigUint {
        BigUint::from_bytes_le(&self.to_le_bytes())
    }

    fn from_biguint(value: BigUint) -> Self {
        let bytes = value.to_bytes_le();
        let mut limbs = [0u64; 5];
        for (i, byte) in bytes.iter().enumerate() {
            limbs[i / 8] |= (*byte as u64) << ((i % 8) * 8);
        }
        ScalarField { limbs }
    }
}

/// Helper: is the 320-bit value strictly below the modulus?
#[inline]
const fn is_canonical(limbs: [u64; 5]) -> bool {
    let (_, borrow) = limbs[0].overflowing_sub(MODULUS[0]);
    let (_, borrow) = borrowing_sub(limbs[1], MODULUS[1], borrow);
    let (_, borrow) = borrowing_sub(limbs[2], MODULUS[2], borrow);
    let (_, borrow) = borrowing_sub(limbs[3], MODULUS[3], borrow);
    let (_, borrow) = borrowing_sub(limbs[4], MODULUS[4], borrow);
    borrow
}

/// Helper: carrying addition.
#[inline]
const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

/// Helper: borrowing subtraction.
#[inline]
const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

/// Helper: add two canonical values mod n.
#[inline]
const fn add_mod(a: [u64; 5], b: [u64; 5]) -> [u64; 5] {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);
    let (r4, carry) = carrying_add(a[4], b[4], carry);

    let (s0, borrow) = r0.overflowing_sub(MODULUS[0]);
    let (s1, borrow) = borrowing_sub(r1, MODULUS[1], borrow);
    let (s2, borrow) = borrowing_sub(r2, MODULUS[2], borrow);
    let (s3, borrow) = borrowing_sub(r3, MODULUS[3], borrow);
    let (s4, borrow) = borrowing_sub(r4, MODULUS[4], borrow);

    if carry || !borrow {
        [s0, s1, s2, s3, s4]
    } else {
        [r0, r1, r2, r3, r4]
    }
}

/// Helper: subtract two canonical values mod n.
#[inline]
const fn sub_mod(a: [u64; 5], b: [u64; 5]) -> [u64; 5] {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);
    let (r4, borrow) = borrowing_sub(a[4], b[4], borrow);

    if borrow {
        let (r0, carry) = r0.overflowing_add(MODULUS[0]);
        let (r1, carry) = carrying_add(r1, MODULUS[1], carry);
        let (r2, carry) = carrying_add(r2, MODULUS[2], carry);
        let (r3, carry) = carrying_add(r3, MODULUS[3], carry);
        let (r4, _) = carrying_add(r4, MODULUS[4], carry);
        [r0, r1, r2, r3, r4]
    } else {
        [r0, r1, r2, r3, r4]
    }
}

/// Modulus as a `BigUint`, for the multiplication and inversion paths.
fn modulus_biguint() -> BigUint {
    let mut bytes = Vec::with_capacity(SCALAR_BYTES);
    for limb in &MODULUS {
        bytes.extend_from_slice(&limb.to_le_bytes());
    }
    BigUint::from_bytes_le(&bytes)
}

impl ScalarBits for ScalarField {
    #[inline]
    fn to_u64_limbs(&self) -> [u64; 5] {
        self.limbs
    }
}

impl Add for ScalarField {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        ScalarField {
            limbs: add_mod(self.limbs, rhs.limbs),
        }
    }
}

impl AddAssign for ScalarField {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for ScalarField {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        ScalarField {
            limbs: sub_mod(self.limbs, rhs.limbs),
        }
    }
}

impl SubAssign for ScalarField {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for ScalarField {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        if self.is_zero() {
            self
        } else {
            ScalarField {
                limbs: sub_mod(MODULUS, self.limbs),
            }
        }
    }
}

impl Mul for ScalarField {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_biguint(self.to_biguint() * rhs.to_biguint() % modulus_biguint())
    }
}

impl MulAssign for ScalarField {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Sum for ScalarField {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for ScalarField {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl Display for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}{:016x}",
            self.limbs[4], self.limbs[3], self.limbs[2], self.limbs[1], self.limbs[0]
        )
    }
}

impl Debug for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ScalarField({})", self)
    }
}

impl Hash for ScalarField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}

// Deserialization re-checks canonicality so that untrusted wire data
// cannot smuggle in a non-reduced scalar.
impl<'de> Deserialize<'de> for ScalarField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename = "ScalarField")]
        struct Raw {
            limbs: [u64; 5],
        }

        let raw = Raw::deserialize(deserializer)?;
        if !is_canonical(raw.limbs) {
            return Err(serde::de::Error::custom(CurveError::NonCanonicalScalar));
        }
        Ok(ScalarField { limbs: raw.limbs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_one() {
        assert_eq!(ScalarField::ZERO + ScalarField::ZERO, ScalarField::ZERO);
        assert_eq!(ScalarField::ONE * ScalarField::ONE, ScalarField::ONE);
        assert_eq!(ScalarField::ZERO * ScalarField::ONE, ScalarField::ZERO);
        assert_eq!(ScalarField::ONE + ScalarField::ZERO, ScalarField::ONE);
    }

    #[test]
    fn test_addition() {
        let a = ScalarField::from_u64(5);
        let b = ScalarField::from_u64(7);
        assert_eq!(a + b, ScalarField::from_u64(12));
    }

    #[test]
    fn test_subtraction_wraps() {
        let a = ScalarField::from_u64(3);
        let b = ScalarField::from_u64(10);
        let c = a - b;
        assert_eq!(c + b, a);
    }

    #[test]
    fn test_multiplication() {
        let a = ScalarField::from_u64(6);
        let b = ScalarField::from_u64(7);
        assert_eq!(a * b, ScalarField::from_u64(42));
    }

    #[test]
    fn test_negation() {
        let a = ScalarField::from_u64(5);
        assert_eq!(a + (-a), ScalarField::ZERO);
        assert_eq!(-ScalarField::ZERO, ScalarField::ZERO);
    }

    #[test]
    fn test_inverse() {
        let a = ScalarField::from_u64(5);
        assert_eq!(a * a.inverse(), ScalarField::ONE);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let a = ScalarField::from_u64(0xDEADBEEF) * ScalarField::from_u64(0xC0FFEE);
        let bytes = a.to_le_bytes();
        assert_eq!(ScalarField::from_canonical_le_bytes(&bytes).unwrap(), a);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(
            ScalarField::from_canonical_le_bytes(&[0u8; 39]),
            Err(CurveError::InvalidLength {
                expected: 40,
                got: 39
            })
        );
    }

    #[test]
    fn test_rejects_non_canonical() {
        let mut bytes = [0u8; SCALAR_BYTES];
        for (i, limb) in MODULUS.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
        }
        assert_eq!(
            ScalarField::from_canonical_le_bytes(&bytes),
            Err(CurveError::NonCanonicalScalar)
        );
        assert_eq!(
            ScalarField::from_canonical_le_bytes(&[0xFF; SCALAR_BYTES]),
            Err(CurveError::NonCanonicalScalar)
        );
    }

    #[test]
    fn test_noncanonical_decode_reduces() {
        let reduced = ScalarField::from_noncanonical_le_bytes(&[0xFF; 64]);
        let bytes = reduced.to_le_bytes();
        assert_eq!(ScalarField::from_canonical_le_bytes(&bytes).unwrap(), reduced);
    }

    #[test]
    fn test_modulus_is_zero() {
        let mut bytes = Vec::new();
        for limb in &MODULUS {
            bytes.extend_from_slice(&limb.to_le_bytes());
        }
        assert_eq!(
            ScalarField::from_noncanonical_le_bytes(&bytes),
            ScalarField::ZERO
        );
    }
}
