use crate::affine::Affine;
use crate::projective::Projective;
use crate::scalarfield::ScalarField;

/// Compute a*G + b*P with a single shared doubling chain, interleaving
/// 4-bit windows over both operands. This is the verification workhorse
/// and runs faster than two independent multiplications followed by an
/// addition.
pub fn double_scalar_mul_basepoint(
    a: &ScalarField,
    b: &ScalarField,
    point: &Projective,
) -> Projective {
    let base_table = Affine::window_of(&Projective::GENERATOR);
    let point_table = Affine::window_of(point);

    let a_limbs = a.to_u64_limbs();
    let b_limbs = b.to_u64_limbs();

    let mut result = Projective::NEUTRAL;
    for i in (0..a_limbs.len()).rev() {
        for shift in (0..64).step_by(4).rev() {
            result = result.mdouble(4);
            let wa = ((a_limbs[i] >> shift) & 0xF) as usize;
            if wa != 0 {
                result = result.add_affine(&base_table[wa - 1]);
            }
            let wb = ((b_limbs[i] >> shift) & 0xF) as usize;
            if wb != 0 {
                result = result.add_affine(&point_table[wb - 1]);
            }
        }
    }
    result
}
