use group::cofactor::CofactorGroup;
use subtle::{Choice, CtOption};

use super::{Fq, Fr, BLS_X};

new_curve_impl!(
    (pub),
    G1,
    G1Affine,
    Fq,
    Fr,
    (G1_GENERATOR_X, G1_GENERATOR_Y),
    G1_B,
    "bls12381_g1",
);

const G1_GENERATOR_X: Fq = Fq([
    0x5cb38790fd530c16,
    0x7817fc679976fff5,
    0x154f95c7143ba1c1,
    0xf0ae6acdf3d0e747,
    0xedce6ecc21dbf440,
    0x120177419e0bfb75,
]);

const G1_GENERATOR_Y: Fq = Fq([
    0xbaac93d50ce72271,
    0x8c22631a7918fd8e,
    0xdd595f13570725ce,
    0x51ac582950405194,
    0x0e1c8c3fad0059c0,
    0x0bbc3efc5008a26a,
]);

const G1_B: Fq = Fq::from_raw([4, 0, 0, 0, 0, 0]);

impl G1 {
    #[inline]
    pub(crate) fn mul_by_b(e: &Fq) -> Fq {
        e.double().double()
    }

    /// `[x]self` for the (negative) curve seed.
    fn mul_by_x(&self) -> G1 {
        -self.mul_windowed(BLS_X)
    }
}

impl CofactorGroup for G1 {
    type Subgroup = G1;

    /// Multiplies by `1 - x`, which maps every curve point into the
    /// prime order subgroup.
    fn clear_cofactor(&self) -> Self {
        self - self.mul_by_x()
    }

    fn into_subgroup(self) -> CtOption<Self::Subgroup> {
        CtOption::new(self, Choice::from(self.is_in_subgroup() as u8))
    }

    /// `φ(-[x²]P) = P` exactly on the prime order subgroup.
    fn is_torsion_free(&self) -> Choice {
        use subtle::ConstantTimeEq;
        (-self.mul_by_x().mul_by_x()).endo().ct_eq(self)
    }
}
