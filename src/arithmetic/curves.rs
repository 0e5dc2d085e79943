//! This module contains the `Curve`/`CurveAffine` abstractions that allow us to
//! write code that generalizes over a pair of groups.

use core::ops::{Add, Mul, Sub};

use ff::WithSmallOrderMulGroup;
use group::prime::{PrimeCurve, PrimeCurveAffine};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::msm::MsmConfig;
use crate::Error;

/// A point in Jacobian coordinates `(X, Y, Z)` standing for
/// `(X/Z², Y/Z³)`, the identity is any point with `Z = 0`.
pub trait CurveExt:
    PrimeCurve<Affine = <Self as CurveExt>::AffineExt>
    + group::Group<Scalar = <Self as CurveExt>::ScalarExt>
    + Default
    + ConditionallySelectable
    + ConstantTimeEq
    + From<<Self as PrimeCurve>::Affine>
{
    /// The scalar field of this elliptic curve.
    type ScalarExt: WithSmallOrderMulGroup<3>;
    /// The base field over which this elliptic curve is constructed.
    type Base: WithSmallOrderMulGroup<3>;
    /// The affine version of the curve
    type AffineExt: CurveAffine<CurveExt = Self, ScalarExt = <Self as CurveExt>::ScalarExt>
        + Mul<Self::ScalarExt, Output = Self>
        + for<'r> Mul<&'r Self::ScalarExt, Output = Self>;

    const CURVE_ID: &'static str;

    /// Applies `φ(x, y) = (ω·x, y)`, which acts as multiplication by `λ`
    /// (`ScalarExt::ZETA`) on the prime order subgroup.
    fn endo(&self) -> Self;

    /// Return the Jacobian coordinates of this point.
    fn jacobian_coordinates(&self) -> (Self::Base, Self::Base, Self::Base);

    /// Returns whether or not this element is on the curve; should
    /// always be true unless an "unchecked" API was used.
    fn is_on_curve(&self) -> Choice;

    /// Returns whether the point lies in the prime order subgroup.
    fn is_in_subgroup(&self) -> bool;

    /// Returns the curve constant b.
    fn b() -> Self::Base;

    /// Obtains a point given Jacobian coordinates $X : Y : Z$, failing
    /// if the coordinates are not on the curve.
    fn new_jacobian(x: Self::Base, y: Self::Base, z: Self::Base) -> CtOption<Self>;

    /// `[s1]a1 + [s2]a2` in a single pass.
    fn joint_mul(a1: &Self, s1: &Self::ScalarExt, a2: &Self, s2: &Self::ScalarExt) -> Self;
}

/// This trait is the affine counterpart to `Curve` and is used for
/// serialization, storage in memory, and inspection of $x$ and $y$ coordinates.
pub trait CurveAffine:
    PrimeCurveAffine<
        Scalar = <Self as CurveAffine>::ScalarExt,
        Curve = <Self as CurveAffine>::CurveExt,
    > + Default
    + Add<Output = <Self as PrimeCurveAffine>::Curve>
    + Sub<Output = <Self as PrimeCurveAffine>::Curve>
    + ConditionallySelectable
    + ConstantTimeEq
    + From<<Self as PrimeCurveAffine>::Curve>
{
    /// The scalar field of this elliptic curve.
    type ScalarExt: WithSmallOrderMulGroup<3>;
    /// The base field over which this elliptic curve is constructed.
    type Base: WithSmallOrderMulGroup<3>;
    /// The projective form of the curve
    type CurveExt: CurveExt<AffineExt = Self, ScalarExt = <Self as CurveAffine>::ScalarExt>;
    /// Bucket accumulator used by the batch and multi-scalar engines.
    type Extended: ExtendedJacobian<Affine = Self>;

    /// Gets the coordinates of this point.
    ///
    /// Returns None if this is the identity.
    fn coordinates(&self) -> CtOption<Coordinates<Self>>;

    /// Obtains a point given $(x, y)$, failing if it is not on the
    /// curve.
    fn from_xy(x: Self::Base, y: Self::Base) -> CtOption<Self>;

    /// Builds $(x, y)$ without checking that it lies on the curve, for
    /// coordinates produced by the group law.
    fn from_xy_unchecked(x: Self::Base, y: Self::Base) -> Self;

    /// Returns whether or not this element is on the curve; should
    /// always be true unless an "unchecked" API was used.
    fn is_on_curve(&self) -> Choice;

    /// Returns the curve constant $b$.
    fn b() -> Self::Base;

    /// `[s_i]base` for every scalar, returned in affine form.
    fn batch_mul(base: &Self, scalars: &[Self::ScalarExt]) -> Vec<Self>;

    /// `Σ [scalars_i] bases_i`.
    fn multi_exp(
        bases: &[Self],
        scalars: &[Self::ScalarExt],
        config: &MsmConfig,
    ) -> Result<Self::CurveExt, Error>;
}

/// Extended Jacobian coordinates `(X, Y, ZZ, ZZZ)` standing for
/// `(X/ZZ, Y/ZZZ)` with `ZZ³ = ZZZ²`. Identity is `ZZ = 0`.
pub trait ExtendedJacobian: Copy + Clone + Send + Sync + core::fmt::Debug {
    type Affine: CurveAffine;

    fn identity() -> Self;

    fn is_identity(&self) -> bool;

    fn double(&self) -> Self;

    fn add_assign(&mut self, rhs: &Self);

    fn add_mixed(&mut self, rhs: &Self::Affine);

    fn sub_mixed(&mut self, rhs: &Self::Affine);

    fn to_curve(&self) -> <Self::Affine as CurveAffine>::CurveExt;
}

/// The affine coordinates of a point on an elliptic curve.
#[derive(Clone, Copy, Debug, Default)]
pub struct Coordinates<C: CurveAffine> {
    pub(crate) x: C::Base,
    pub(crate) y: C::Base,
}

impl<C: CurveAffine> Coordinates<C> {
    /// Obtains a `Coordinates` value given $(x, y)$, failing if it is not on the curve.
    pub fn from_xy(x: C::Base, y: C::Base) -> CtOption<Self> {
        // We use CurveAffine::from_xy to validate the coordinates.
        C::from_xy(x, y).map(|_| Coordinates { x, y })
    }

    /// Returns the x-coordinate.
    pub fn x(&self) -> &C::Base {
        &self.x
    }

    /// Returns the y-coordinate.
    pub fn y(&self) -> &C::Base {
        &self.y
    }
}

impl<C: CurveAffine> ConditionallySelectable for Coordinates<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Coordinates {
            x: C::Base::conditional_select(&a.x, &b.x, choice),
            y: C::Base::conditional_select(&a.y, &b.y, choice),
        }
    }
}
