//! Base field of the curve: GF(p^5) with p = 2^64 - 2^32 + 1 (Goldilocks).
//!
//! Arithmetic on `Goldilocks` and `Fp5Element` is supplied by the
//! `poseidon-hash` crate; this module adds the byte-packing helpers the
//! rest of the workspace needs when feeding data into the Poseidon2
//! sponge.

use poseidon_hash::{Fp5Element, Goldilocks};

/// The Goldilocks prime p = 2^64 - 2^32 + 1.
pub const GOLDILOCKS_MODULUS: u64 = 0xFFFF_FFFF_0000_0001;

/// Coefficient-wise equality of two quintic-extension elements.
#[inline]
pub fn fp5_eq(a: &Fp5Element, b: &Fp5Element) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.equals(y))
}

/// Packs an arbitrary byte string into Goldilocks elements, 7 bytes per
/// element. Seven-byte chunks stay below 2^56 and therefore always fit a
/// canonical field element, so the packing is injective for fixed-length
/// inputs.
pub fn pack_le_bytes(bytes: &[u8]) -> Vec<Goldilocks> {
    bytes
        .chunks(7)
        .map(|chunk| {
            let mut limb = [0u8; 8];
            limb[..chunk.len()].copy_from_slice(chunk);
            Goldilocks::from_canonical_u64(u64::from_le_bytes(limb))
        })
        .collect()
}

/// Reinterprets a 40-byte string as five Goldilocks limbs, reducing each
/// 8-byte chunk into the field. Used for externally supplied message
/// hashes, which are limb-wise canonical whenever they were produced by
/// this workspace.
pub fn limbs_from_le_bytes(bytes: &[u8; 40]) -> [Goldilocks; 5] {
    let mut limbs = [Goldilocks::zero(); 5];
    for (i, chunk) in bytes.chunks(8).enumerate() {
        let mut limb = [0u8; 8];
        limb.copy_from_slice(chunk);
        let value = u64::from_le_bytes(limb) % GOLDILOCKS_MODULUS;
        limbs[i] = Goldilocks::from_canonical_u64(value);
    }
    limbs
}

/// Serializes a quintic-extension element to its 40-byte little-endian
/// form, limb 0 first.
pub fn fp5_to_le_bytes(value: &Fp5Element) -> [u8; 40] {
    value.to_bytes_le()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_le_bytes_lengths() {
        assert_eq!(pack_le_bytes(&[]).len(), 0);
        assert_eq!(pack_le_bytes(&[1u8; 7]).len(), 1);
        assert_eq!(pack_le_bytes(&[1u8; 8]).len(), 2);
        assert_eq!(pack_le_bytes(&[1u8; 70]).len(), 10);
    }

    #[test]
    fn test_pack_le_bytes_is_injective_on_fixed_width() {
        let a = pack_le_bytes(&[0u8, 1, 2, 3, 4, 5, 6, 7]);
        let b = pack_le_bytes(&[0u8, 1, 2, 3, 4, 5, 6, 8]);
        assert!(a[0].equals(&b[0]));
        assert!(!a[1].equals(&b[1]));
    }

    #[test]
    fn test_limbs_from_le_bytes_roundtrip() {
        let mut bytes = [0u8; 40];
        bytes[0] = 17;
        bytes[8] = 3;
        bytes[39] = 1;
        let limbs = limbs_from_le_bytes(&bytes);
        assert!(limbs[0].equals(&Goldilocks::from_canonical_u64(17)));
        assert!(limbs[1].equals(&Goldilocks::from_canonical_u64(3)));
        assert!(limbs[4].equals(&Goldilocks::from_canonical_u64(1 << 56)));
    }
}
