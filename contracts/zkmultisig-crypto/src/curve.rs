//! BabyJubJub as an arkworks twisted Edwards curve.
//!
//! `a·x² + y² = 1 + d·x²·y²` with `a = 168700`, `d = 168696`, in the
//! coordinates circom uses. `ark-ed-on-bn254` models the same group with
//! `a = 1`, so only its fields and cofactor data are reused here.

use ark_ec::{
    models::CurveConfig,
    twisted_edwards::{Affine, MontCurveConfig, Projective, TECurveConfig},
};
use ark_ff::MontFp;

pub use ark_ed_on_bn254::{Fq, Fr};

pub type AffinePoint = Affine<BabyJubJub>;
pub type ProjectivePoint = Projective<BabyJubJub>;

const BASE8_X: Fq =
    MontFp!("5299619240641551281634865583518297030282874472190772894086521144482721001553");
const BASE8_Y: Fq =
    MontFp!("16950150798460657717958625567821834550301663161624707787222815936182638968203");

#[derive(Clone, Default, PartialEq, Eq)]
pub struct BabyJubJub;

impl CurveConfig for BabyJubJub {
    type BaseField = Fq;
    type ScalarField = Fr;

    const COFACTOR: &'static [u64] = <ark_ed_on_bn254::EdwardsConfig as CurveConfig>::COFACTOR;
    const COFACTOR_INV: Fr = <ark_ed_on_bn254::EdwardsConfig as CurveConfig>::COFACTOR_INV;
}

impl TECurveConfig for BabyJubJub {
    const COEFF_A: Fq = MontFp!("168700");
    const COEFF_D: Fq = MontFp!("168696");

    /// Base8, the generator of the prime-order subgroup.
    const GENERATOR: AffinePoint = AffinePoint::new_unchecked(BASE8_X, BASE8_Y);

    type MontCurveConfig = BabyJubJub;
}

// By^2 = x^3 + Ax^2 + x with A = 2(a + d)/(a - d), B = 4/(a - d)
impl MontCurveConfig for BabyJubJub {
    const COEFF_A: Fq = MontFp!("168698");
    const COEFF_B: Fq = MontFp!("1");

    type TECurveConfig = BabyJubJub;
}
