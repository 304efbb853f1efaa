use core::ops::{Add, Neg};

/// Access to the little-endian limb representation of a scalar, as
/// consumed by the generic multiplication ladders.
pub trait ScalarBits {
    fn to_u64_limbs(&self) -> [u64; 5];
}

/// Prime-order group written additively.
pub trait Group:
    Copy + PartialEq + Add<Output = Self> + Neg<Output = Self> + Sized
{
    type Scalar: ScalarBits;

    fn identity() -> Self;

    fn is_identity(&self) -> bool;

    fn generator() -> Self;

    fn double(&self) -> Self;

    fn negate(&self) -> Self;

    /// Double-and-add ladder over the scalar bits, least significant
    /// limb first.
    fn scalar_mul(&self, scalar: &Self::Scalar) -> Self {
        let mut result = Self::identity();
        let mut temp = *self;

        for limb in scalar.to_u64_limbs() {
            for shift in 0..64 {
                if (limb >> shift) & 1 == 1 {
                    result = result + temp;
                }
                temp = temp.double();
            }
        }
        result
    }

    /// Multiply by a small scalar without building a [`ScalarBits`]
    /// value first.
    fn mul_u64(&self, mut scalar: u64) -> Self {
        let mut result = Self::identity();
        let mut temp = *self;

        while scalar != 0 {
            if scalar & 1 == 1 {
                result = result + temp;
            }
            temp = temp.double();
            scalar >>= 1;
        }
        result
    }
}
