/// Implements `CurveEndo` from lattice constants, see [`EndoParameters`].
///
/// [`EndoParameters`]: crate::arithmetic::EndoParameters
#[macro_export]
macro_rules! endo {
    ($name:ident, $field:ident, $params:expr) => {
        impl $crate::arithmetic::CurveEndo for $name {
            fn decompose_scalar(k: &$field) -> (u128, bool, u128, bool) {
                use $crate::arithmetic::{mul_512, sbb, scalar_limbs};

                // values above 2^192 are the negation of a short scalar
                let is_neg = |e: &[u64; 4]| {
                    let (_, borrow) = sbb(0xffffffffffffffff, e[0], 0);
                    let (_, borrow) = sbb(0xffffffffffffffff, e[1], borrow);
                    let (_, borrow) = sbb(0xffffffffffffffff, e[2], borrow);
                    let (_, borrow) = sbb(0x00, e[3], borrow);
                    borrow & 1 != 0
                };

                let split = |e: $field| {
                    let neg = is_neg(&scalar_limbs(&e));
                    let e = scalar_limbs(&if neg { -e } else { e });
                    (u128::from(e[0]) | (u128::from(e[1]) << 64), neg)
                };

                let input = scalar_limbs(k);
                let c1 = mul_512(input, $params.gamma1);
                let c2 = mul_512(input, $params.gamma2);
                let c1 = [c1[4], c1[5], c1[6], c1[7]];
                let c2 = [c2[4], c2[5], c2[6], c2[7]];
                let q1 = mul_512(c1, $params.b1);
                let q2 = mul_512(c2, $params.b2);
                let q1 = $field::from_raw([q1[0], q1[1], q1[2], q1[3]]);
                let q2 = $field::from_raw([q2[0], q2[1], q2[2], q2[3]]);
                let k2 = q1 - q2;
                let k1 = *k - k2 * <$field as ::ff::WithSmallOrderMulGroup<3>>::ZETA;

                let (k1, k1_neg) = split(k1);
                let (k2, k2_neg) = split(k2);
                (k1, k1_neg, k2, k2_neg)
            }
        }
    };
}

// Flags of the compressed encoding, stored in the most significant byte of x.
pub(crate) const SIGN_MASK: u8 = 0b1000_0000;
pub(crate) const SIGN_SHIFT: u8 = 7;
pub(crate) const IDENTITY_MASK: u8 = 0b0100_0000;

/// Generates a short Weierstrass curve `y² = x³ + b` over `$base` with
/// Jacobian, affine and extended Jacobian point types.
///
/// The invoking module provides `$name::mul_by_b`, `CurveEndo` (see
/// [`endo!`]) and `group::cofactor::CofactorGroup` for `$name`.
#[macro_export]
macro_rules! new_curve_impl {
    (($($privacy:tt)*),
    $name:ident,
    $name_affine:ident,
    $base:ident,
    $scalar:ident,
    $generator:expr,
    $constant_b:expr,
    $curve_id:literal,
    ) => {
        ::paste::paste! {

        /// Jacobian coordinates `(X, Y, Z)` of `(X/Z², Y/Z³)`.
        #[derive(Copy, Clone)]
        $($privacy)* struct $name {
            pub x: $base,
            pub y: $base,
            pub z: $base,
        }

        #[derive(Copy, Clone, PartialEq, Eq, Hash)]
        $($privacy)* struct $name_affine {
            pub x: $base,
            pub y: $base,
        }

        #[derive(Copy, Clone, Debug)]
        $($privacy)* struct [<$name Extended>] {
            pub x: $base,
            pub y: $base,
            pub zz: $base,
            pub zzz: $base,
        }

        ::static_assertions::const_assert!(
            $base::SIZE * 8 - <$base as ::ff::PrimeField>::NUM_BITS as usize >= 2
        );

        const [<$name:upper _FLAG_BYTE>]: usize = $base::ENDIAN.msb_index($base::SIZE);

        impl $name {
            pub const fn identity() -> Self {
                Self {
                    x: $base::one(),
                    y: $base::one(),
                    z: $base::zero(),
                }
            }

            pub const fn generator() -> Self {
                Self {
                    x: $generator.0,
                    y: $generator.1,
                    z: $base::one(),
                }
            }

            #[inline]
            pub fn is_identity_vartime(&self) -> bool {
                self.z == $base::zero()
            }

            /// dbl-2009-l
            pub fn double(&self) -> Self {
                if self.is_identity_vartime() {
                    return *self;
                }
                let xx = self.x.square();
                let yy = self.y.square();
                let yyyy = yy.square();
                let zz = self.z.square();
                let s = ((self.x + yy).square() - xx - yyyy).double();
                let m = xx.double() + xx;
                let x = m.square() - s.double();
                let y = m * (s - x) - yyyy.double().double().double();
                let z = (self.y + self.z).square() - yy - zz;
                Self { x, y, z }
            }

            /// mdbl-2007-bl, doubles an affine point into Jacobian coordinates.
            pub fn double_mixed(a: &$name_affine) -> Self {
                if a.is_identity_vartime() {
                    return Self::identity();
                }
                let xx = a.x.square();
                let yy = a.y.square();
                let yyyy = yy.square();
                let s = ((a.x + yy).square() - xx - yyyy).double();
                let m = xx.double() + xx;
                let t = m.square() - s.double();
                let y = m * (s - t) - yyyy.double().double().double();
                Self {
                    x: t,
                    y,
                    z: a.y.double(),
                }
            }

            /// add-2007-bl
            fn add_jacobian(&self, rhs: &Self) -> Self {
                if self.is_identity_vartime() {
                    return *rhs;
                }
                if rhs.is_identity_vartime() {
                    return *self;
                }
                let z1z1 = self.z.square();
                let z2z2 = rhs.z.square();
                let u1 = self.x * z2z2;
                let u2 = rhs.x * z1z1;
                let s1 = self.y * rhs.z * z2z2;
                let s2 = rhs.y * self.z * z1z1;

                if u1 == u2 {
                    return if s1 == s2 {
                        self.double()
                    } else {
                        Self::identity()
                    };
                }

                let h = u2 - u1;
                let i = h.double().square();
                let j = h * i;
                let r = (s2 - s1).double();
                let v = u1 * i;
                let x = r.square() - j - v.double();
                let y = r * (v - x) - (s1 * j).double();
                let z = ((self.z + rhs.z).square() - z1z1 - z2z2) * h;
                Self { x, y, z }
            }

            /// madd-2007-bl
            pub fn add_mixed(&self, a: &$name_affine) -> Self {
                if a.is_identity_vartime() {
                    return *self;
                }
                if self.is_identity_vartime() {
                    return Self {
                        x: a.x,
                        y: a.y,
                        z: $base::one(),
                    };
                }
                let z1z1 = self.z.square();
                let u2 = a.x * z1z1;
                let s2 = a.y * self.z * z1z1;

                if u2 == self.x {
                    return if s2 == self.y {
                        Self::double_mixed(a)
                    } else {
                        Self::identity()
                    };
                }

                let h = u2 - self.x;
                let hh = h.square();
                let i = hh.double().double();
                let j = h * i;
                let r = (s2 - self.y).double();
                let v = self.x * i;
                let x = r.square() - j - v.double();
                let y = r * (v - x) - (self.y * j).double();
                let z = (self.z + h).square() - z1z1 - hh;
                Self { x, y, z }
            }

            /// GLV multiplication. Exact for points of the prime order
            /// subgroup, where `endo` acts as `[λ]`.
            pub fn mul_glv(&self, scalar: &$scalar) -> Self {
                let (k1, k1_neg, k2, k2_neg) =
                    <$name as $crate::arithmetic::CurveEndo>::decompose_scalar(scalar);
                let q1 = if k1_neg { -*self } else { *self };
                let q2 = if k2_neg { -self.endo() } else { self.endo() };
                let table = $crate::arithmetic::nibble_table(q1, q2);
                $crate::arithmetic::straus_shamir(
                    &table,
                    &[k1 as u64, (k1 >> 64) as u64, 0, 0],
                    &[k2 as u64, (k2 >> 64) as u64, 0, 0],
                )
            }

            /// `[s]self` with 2-bit windows, for small cofactor related
            /// scalars. Valid for any point of the curve.
            pub fn mul_windowed(&self, s: u64) -> Self {
                let ops = [*self, self.double(), self.double() + self];
                let windows = (64 - s.leading_zeros() as usize + 1) / 2;
                let mut acc = Self::identity();
                for i in (0..windows).rev() {
                    acc = acc.double().double();
                    let w = ((s >> (2 * i)) & 0b11) as usize;
                    if w != 0 {
                        acc += ops[w - 1];
                    }
                }
                acc
            }

            /// `[s]G` for the fixed generator `G`.
            pub fn mul_base(s: &$scalar) -> Self {
                Self::generator().mul_glv(s)
            }

            /// `[s1]G + [s2]a` for the fixed generator `G`.
            pub fn joint_mul_base(a: &Self, s1: &$scalar, s2: &$scalar) -> Self {
                <$name as $crate::arithmetic::CurveExt>::joint_mul(&Self::generator(), s1, a, s2)
            }

            /// Converts to affine with a single inversion for the whole batch.
            pub fn batch_to_affine(points: &[Self]) -> Vec<$name_affine> {
                let mut out = vec![$name_affine::identity(); points.len()];
                Self::batch_normalize_into(points, &mut out);
                out
            }

            fn batch_normalize_into(points: &[Self], out: &mut [$name_affine]) {
                assert_eq!(points.len(), out.len());
                let timer = ::ark_std::start_timer!(|| format!("batch to affine of {} points", points.len()));

                // Montgomery trick: prefix products of the non-zero Z, one inversion,
                // then the individual inverses on the way back.
                let mut inverses = vec![$base::zero(); points.len()];
                let mut acc = $base::one();
                for (p, prefix) in points.iter().zip(inverses.iter_mut()) {
                    if p.is_identity_vartime() {
                        continue;
                    }
                    *prefix = acc;
                    acc = acc * p.z;
                }
                let mut acc = ::ff::Field::invert(&acc).unwrap_or($base::zero());
                for (p, inv) in points.iter().zip(inverses.iter_mut()).rev() {
                    if p.is_identity_vartime() {
                        continue;
                    }
                    *inv = acc * *inv;
                    acc = acc * p.z;
                }

                $crate::arithmetic::parallelize(out, |chunk, offset| {
                    for (i, out) in chunk.iter_mut().enumerate() {
                        let p = &points[offset + i];
                        *out = if p.is_identity_vartime() {
                            $name_affine::identity()
                        } else {
                            let a = inverses[offset + i];
                            let a2 = a.square();
                            $name_affine {
                                x: p.x * a2,
                                y: p.y * a2 * a,
                            }
                        };
                    }
                });
                ::ark_std::end_timer!(timer);
            }
        }

        impl $name_affine {
            pub const fn identity() -> Self {
                Self {
                    x: $base::zero(),
                    y: $base::zero(),
                }
            }

            pub const fn generator() -> Self {
                Self {
                    x: $generator.0,
                    y: $generator.1,
                }
            }

            #[inline]
            pub fn is_identity_vartime(&self) -> bool {
                self.x == $base::zero() && self.y == $base::zero()
            }

            /// mmadd-2007-bl
            fn add_affine(&self, rhs: &Self) -> $name {
                if self.is_identity_vartime() {
                    return rhs.into();
                }
                if rhs.is_identity_vartime() {
                    return self.into();
                }
                if self.x == rhs.x {
                    return if self.y == rhs.y {
                        $name::double_mixed(self)
                    } else {
                        $name::identity()
                    };
                }
                let h = rhs.x - self.x;
                let hh = h.square();
                let i = hh.double().double();
                let j = h * i;
                let r = (rhs.y - self.y).double();
                let v = self.x * i;
                let x = r.square() - j - v.double();
                let y = r * (v - x) - (self.y * j).double();
                $name { x, y, z: h.double() }
            }

            pub fn double(&self) -> $name {
                $name::double_mixed(self)
            }

            pub fn is_in_subgroup(&self) -> bool {
                $crate::arithmetic::CurveExt::is_in_subgroup(&$name::from(self))
            }

            /// `[s]G` for the fixed generator `G`.
            pub fn mul_base(s: &$scalar) -> $name {
                $name::mul_base(s)
            }
        }

        impl [<$name Extended>] {
            /// add-2008-s
            fn add_extended(&mut self, rhs: &Self) {
                if rhs.zz == $base::zero() {
                    return;
                }
                if self.zz == $base::zero() {
                    *self = *rhs;
                    return;
                }
                let u1 = self.x * rhs.zz;
                let u2 = rhs.x * self.zz;
                let s1 = self.y * rhs.zzz;
                let s2 = rhs.y * self.zzz;
                let p = u2 - u1;
                let r = s2 - s1;
                if p == $base::zero() {
                    *self = if r == $base::zero() {
                        rhs.double_extended()
                    } else {
                        <Self as $crate::arithmetic::ExtendedJacobian>::identity()
                    };
                    return;
                }
                let pp = p.square();
                let ppp = p * pp;
                let q = u1 * pp;
                let x = r.square() - ppp - q.double();
                let y = r * (q - x) - s1 * ppp;
                self.x = x;
                self.y = y;
                self.zz = self.zz * rhs.zz * pp;
                self.zzz = self.zzz * rhs.zzz * ppp;
            }

            /// dbl-2008-s-1
            fn double_extended(&self) -> Self {
                if self.zz == $base::zero() {
                    return *self;
                }
                let u = self.y.double();
                let v = u.square();
                let w = u * v;
                let s = self.x * v;
                let xx = self.x.square();
                let m = xx.double() + xx;
                let x = m.square() - s.double();
                let y = m * (s - x) - w * self.y;
                Self {
                    x,
                    y,
                    zz: v * self.zz,
                    zzz: w * self.zzz,
                }
            }

            /// Doubles `a`, or `-a` when `neg` is set, into a fresh bucket.
            fn double_mixed_extended(a: &$name_affine, neg: bool) -> Self {
                let u = if neg { -a.y.double() } else { a.y.double() };
                let v = u.square();
                let w = u * v;
                let s = a.x * v;
                let xx = a.x.square();
                let m = xx.double() + xx;
                let x = m.square() - s.double();
                let y = if neg {
                    m * (s - x) + w * a.y
                } else {
                    m * (s - x) - w * a.y
                };
                Self { x, y, zz: v, zzz: w }
            }

            fn add_mixed_signed(&mut self, a: &$name_affine, neg: bool) {
                if a.is_identity_vartime() {
                    return;
                }
                let ay = if neg { -a.y } else { a.y };
                if self.zz == $base::zero() {
                    *self = Self {
                        x: a.x,
                        y: ay,
                        zz: $base::one(),
                        zzz: $base::one(),
                    };
                    return;
                }
                let p = a.x * self.zz - self.x;
                let r = ay * self.zzz - self.y;
                if p == $base::zero() {
                    *self = if r == $base::zero() {
                        Self::double_mixed_extended(a, neg)
                    } else {
                        <Self as $crate::arithmetic::ExtendedJacobian>::identity()
                    };
                    return;
                }
                let pp = p.square();
                let ppp = p * pp;
                let q = self.x * pp;
                let x = r.square() - ppp - q.double();
                let y = r * (q - x) - self.y * ppp;
                self.x = x;
                self.y = y;
                self.zz = self.zz * pp;
                self.zzz = self.zzz * ppp;
            }
        }

        impl $crate::arithmetic::ExtendedJacobian for [<$name Extended>] {
            type Affine = $name_affine;

            fn identity() -> Self {
                Self {
                    x: $base::one(),
                    y: $base::one(),
                    zz: $base::zero(),
                    zzz: $base::zero(),
                }
            }

            fn is_identity(&self) -> bool {
                self.zz == $base::zero()
            }

            fn double(&self) -> Self {
                self.double_extended()
            }

            fn add_assign(&mut self, rhs: &Self) {
                self.add_extended(rhs)
            }

            fn add_mixed(&mut self, rhs: &$name_affine) {
                self.add_mixed_signed(rhs, false)
            }

            fn sub_mixed(&mut self, rhs: &$name_affine) {
                self.add_mixed_signed(rhs, true)
            }

            fn to_curve(&self) -> $name {
                if self.zz == $base::zero() {
                    return $name::identity();
                }
                $name {
                    x: self.x * self.zz.square(),
                    y: self.y * self.zzz.square(),
                    z: self.zzz,
                }
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{:?}", $name_affine::from(self))
            }
        }

        impl ::core::fmt::Debug for $name_affine {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                if self.is_identity_vartime() {
                    write!(f, "Infinity")
                } else {
                    write!(f, "({:?}, {:?})", self.x, self.y)
                }
            }
        }

        impl Default for $name {
            fn default() -> $name {
                $name::identity()
            }
        }

        impl Default for $name_affine {
            fn default() -> $name_affine {
                $name_affine::identity()
            }
        }

        impl ::subtle::ConstantTimeEq for $name {
            fn ct_eq(&self, other: &Self) -> ::subtle::Choice {
                use ::subtle::ConstantTimeEq;
                let self_is_zero = ::ff::Field::is_zero(&self.z);
                let other_is_zero = ::ff::Field::is_zero(&other.z);
                let z1z1 = self.z.square();
                let z2z2 = other.z.square();
                let x1 = self.x * z2z2;
                let x2 = other.x * z1z1;
                let y1 = self.y * z2z2 * other.z;
                let y2 = other.y * z1z1 * self.z;

                (self_is_zero & other_is_zero)
                    | ((!self_is_zero) & (!other_is_zero) & x1.ct_eq(&x2) & y1.ct_eq(&y2))
            }
        }

        impl ::subtle::ConstantTimeEq for $name_affine {
            fn ct_eq(&self, other: &Self) -> ::subtle::Choice {
                use ::subtle::ConstantTimeEq;
                self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                ::subtle::ConstantTimeEq::ct_eq(self, other).into()
            }
        }

        impl Eq for $name {}

        impl ::subtle::ConditionallySelectable for $name {
            fn conditional_select(a: &Self, b: &Self, choice: ::subtle::Choice) -> Self {
                $name {
                    x: <$base as ::subtle::ConditionallySelectable>::conditional_select(&a.x, &b.x, choice),
                    y: <$base as ::subtle::ConditionallySelectable>::conditional_select(&a.y, &b.y, choice),
                    z: <$base as ::subtle::ConditionallySelectable>::conditional_select(&a.z, &b.z, choice),
                }
            }
        }

        impl ::subtle::ConditionallySelectable for $name_affine {
            fn conditional_select(a: &Self, b: &Self, choice: ::subtle::Choice) -> Self {
                $name_affine {
                    x: <$base as ::subtle::ConditionallySelectable>::conditional_select(&a.x, &b.x, choice),
                    y: <$base as ::subtle::ConditionallySelectable>::conditional_select(&a.y, &b.y, choice),
                }
            }
        }

        impl<'a> From<&'a $name_affine> for $name {
            fn from(p: &'a $name_affine) -> $name {
                if p.is_identity_vartime() {
                    $name::identity()
                } else {
                    $name {
                        x: p.x,
                        y: p.y,
                        z: $base::one(),
                    }
                }
            }
        }

        impl From<$name_affine> for $name {
            fn from(p: $name_affine) -> $name {
                $name::from(&p)
            }
        }

        impl<'a> From<&'a $name> for $name_affine {
            fn from(p: &'a $name) -> $name_affine {
                ::group::Curve::to_affine(p)
            }
        }

        impl From<$name> for $name_affine {
            fn from(p: $name) -> $name_affine {
                ::group::Curve::to_affine(&p)
            }
        }

        impl<T> ::core::iter::Sum<T> for $name
        where
            T: ::core::borrow::Borrow<$name>,
        {
            fn sum<I>(iter: I) -> Self
            where
                I: Iterator<Item = T>,
            {
                iter.fold(Self::identity(), |acc, item| acc + item.borrow())
            }
        }

        impl ::group::Group for $name {
            type Scalar = $scalar;

            fn random(mut rng: impl ::rand_core::RngCore) -> Self {
                loop {
                    let x = <$base as ::ff::Field>::random(&mut rng);
                    let flip = rng.next_u32() & 1 == 1;
                    let y2 = x.square() * x + $constant_b;
                    let y: Option<$base> = ::ff::Field::sqrt(&y2).into();
                    if let Some(y) = y {
                        let y = if flip { -y } else { y };
                        let p = $name::from($name_affine { x, y });
                        let p = ::group::cofactor::CofactorGroup::clear_cofactor(&p);
                        if !p.is_identity_vartime() {
                            return p;
                        }
                    }
                }
            }

            fn identity() -> Self {
                Self::identity()
            }

            fn generator() -> Self {
                Self::generator()
            }

            fn is_identity(&self) -> ::subtle::Choice {
                ::ff::Field::is_zero(&self.z)
            }

            fn double(&self) -> Self {
                self.double()
            }
        }

        impl ::group::Curve for $name {
            type AffineRepr = $name_affine;

            fn batch_normalize(p: &[Self], q: &mut [Self::AffineRepr]) {
                Self::batch_normalize_into(p, q);
            }

            fn to_affine(&self) -> Self::AffineRepr {
                if self.is_identity_vartime() {
                    return $name_affine::identity();
                }
                let zinv = ::ff::Field::invert(&self.z).unwrap_or($base::zero());
                let zinv2 = zinv.square();
                $name_affine {
                    x: self.x * zinv2,
                    y: self.y * zinv2 * zinv,
                }
            }
        }

        impl ::group::prime::PrimeGroup for $name {}

        impl ::group::prime::PrimeCurve for $name {
            type Affine = $name_affine;
        }

        impl ::group::cofactor::CofactorCurve for $name {
            type Affine = $name_affine;
        }

        impl ::group::GroupEncoding for $name {
            type Repr = $crate::encoding::Repr<{ $base::SIZE }>;

            fn from_bytes(bytes: &Self::Repr) -> ::subtle::CtOption<Self> {
                <$name_affine as ::group::GroupEncoding>::from_bytes(bytes).map(Self::from)
            }

            fn from_bytes_unchecked(bytes: &Self::Repr) -> ::subtle::CtOption<Self> {
                <$name_affine as ::group::GroupEncoding>::from_bytes_unchecked(bytes).map(Self::from)
            }

            fn to_bytes(&self) -> Self::Repr {
                ::group::GroupEncoding::to_bytes(&$name_affine::from(self))
            }
        }

        // Compressed: x in the base field byte order, y sign in bit 7 and the
        // identity flag in bit 6 of the most significant byte.
        impl ::group::GroupEncoding for $name_affine {
            type Repr = $crate::encoding::Repr<{ $base::SIZE }>;

            fn from_bytes(bytes: &Self::Repr) -> ::subtle::CtOption<Self> {
                <Self as ::group::GroupEncoding>::from_bytes_unchecked(bytes)
                    .and_then(|p| ::subtle::CtOption::new(p, (p.is_in_subgroup() as u8).into()))
            }

            fn from_bytes_unchecked(bytes: &Self::Repr) -> ::subtle::CtOption<Self> {
                use $crate::derive::curve::{IDENTITY_MASK, SIGN_MASK, SIGN_SHIFT};
                let mut tmp = *bytes.inner();
                let flags = tmp[[<$name:upper _FLAG_BYTE>]];
                tmp[[<$name:upper _FLAG_BYTE>]] &= !(SIGN_MASK | IDENTITY_MASK);
                let ysign = (flags & SIGN_MASK) >> SIGN_SHIFT;

                if flags & IDENTITY_MASK != 0 {
                    let is_canonical = ysign == 0 && tmp.iter().all(|b| *b == 0);
                    return ::subtle::CtOption::new(Self::identity(), (is_canonical as u8).into());
                }

                $base::from_bytes(&tmp).and_then(|x| {
                    let y2 = x.square() * x + $constant_b;
                    ::ff::Field::sqrt(&y2).map(|y| {
                        let y_odd = ::ff::PrimeField::is_odd(&y).unwrap_u8();
                        let y = if y_odd == ysign { y } else { -y };
                        $name_affine { x, y }
                    })
                })
            }

            fn to_bytes(&self) -> Self::Repr {
                use $crate::derive::curve::{IDENTITY_MASK, SIGN_SHIFT};
                if self.is_identity_vartime() {
                    let mut res = [0u8; $base::SIZE];
                    res[[<$name:upper _FLAG_BYTE>]] |= IDENTITY_MASK;
                    return res.into();
                }
                let mut res = self.x.to_bytes();
                res[[<$name:upper _FLAG_BYTE>]] |= ::ff::PrimeField::is_odd(&self.y).unwrap_u8() << SIGN_SHIFT;
                res.into()
            }
        }

        // Uncompressed: x || y in the base field byte order, identity is all zero.
        impl ::group::UncompressedEncoding for $name_affine {
            type Uncompressed = $crate::encoding::Repr<{ 2 * $base::SIZE }>;

            fn from_uncompressed(bytes: &Self::Uncompressed) -> ::subtle::CtOption<Self> {
                <Self as ::group::UncompressedEncoding>::from_uncompressed_unchecked(bytes)
                    .and_then(|p| ::subtle::CtOption::new(p, (p.is_in_subgroup() as u8).into()))
            }

            fn from_uncompressed_unchecked(bytes: &Self::Uncompressed) -> ::subtle::CtOption<Self> {
                let mut x = [0u8; $base::SIZE];
                let mut y = [0u8; $base::SIZE];
                x.copy_from_slice(&bytes[..$base::SIZE]);
                y.copy_from_slice(&bytes[$base::SIZE..]);
                $base::from_bytes(&x).and_then(|x| {
                    $base::from_bytes(&y).and_then(|y| {
                        let p = $name_affine { x, y };
                        ::subtle::CtOption::new(p, p.is_on_curve())
                    })
                })
            }

            fn to_uncompressed(&self) -> Self::Uncompressed {
                let mut res = [0u8; 2 * $base::SIZE];
                res[..$base::SIZE].copy_from_slice(&self.x.to_bytes());
                res[$base::SIZE..].copy_from_slice(&self.y.to_bytes());
                res.into()
            }
        }

        $crate::impl_serde!(
            $name_affine,
            $base::SIZE,
            |p| ::group::GroupEncoding::to_bytes(p).into(),
            |bytes| <$name_affine as ::group::GroupEncoding>::from_bytes(&bytes.into())
        );

        $crate::impl_serde!(
            $name,
            $base::SIZE,
            |p| ::group::GroupEncoding::to_bytes(p).into(),
            |bytes| <$name as ::group::GroupEncoding>::from_bytes(&bytes.into())
        );

        impl ::group::prime::PrimeCurveAffine for $name_affine {
            type Scalar = $scalar;
            type Curve = $name;

            fn identity() -> Self {
                Self::identity()
            }

            fn generator() -> Self {
                Self::generator()
            }

            fn is_identity(&self) -> ::subtle::Choice {
                ::ff::Field::is_zero(&self.x) & ::ff::Field::is_zero(&self.y)
            }

            fn to_curve(&self) -> Self::Curve {
                $name::from(self)
            }
        }

        impl ::group::cofactor::CofactorCurveAffine for $name_affine {
            type Scalar = $scalar;
            type Curve = $name;

            fn identity() -> Self {
                Self::identity()
            }

            fn generator() -> Self {
                Self::generator()
            }

            fn is_identity(&self) -> ::subtle::Choice {
                ::group::prime::PrimeCurveAffine::is_identity(self)
            }

            fn to_curve(&self) -> Self::Curve {
                $name::from(self)
            }
        }

        impl $crate::arithmetic::CurveExt for $name {
            type ScalarExt = $scalar;
            type Base = $base;
            type AffineExt = $name_affine;

            const CURVE_ID: &'static str = $curve_id;

            fn endo(&self) -> Self {
                Self {
                    x: self.x * <$base as ::ff::WithSmallOrderMulGroup<3>>::ZETA,
                    y: self.y,
                    z: self.z,
                }
            }

            fn jacobian_coordinates(&self) -> ($base, $base, $base) {
                (self.x, self.y, self.z)
            }

            fn is_on_curve(&self) -> ::subtle::Choice {
                use ::subtle::ConstantTimeEq;
                // Y² = X³ + b·Z⁶
                let z2 = self.z.square();
                let z6 = z2.square() * z2;
                (self.y.square() - self.x.square() * self.x).ct_eq(&$name::mul_by_b(&z6))
                    | ::ff::Field::is_zero(&self.z)
            }

            fn is_in_subgroup(&self) -> bool {
                ::group::cofactor::CofactorGroup::is_torsion_free(self).into()
            }

            fn b() -> Self::Base {
                $constant_b
            }

            fn new_jacobian(x: Self::Base, y: Self::Base, z: Self::Base) -> ::subtle::CtOption<Self> {
                let p = $name { x, y, z };
                ::subtle::CtOption::new(p, $crate::arithmetic::CurveExt::is_on_curve(&p))
            }

            fn joint_mul(a1: &Self, s1: &$scalar, a2: &Self, s2: &$scalar) -> Self {
                let (k1, k1_neg) = $crate::arithmetic::signed_scalar(s1);
                let (k2, k2_neg) = $crate::arithmetic::signed_scalar(s2);
                let q1 = if k1_neg { -*a1 } else { *a1 };
                let q2 = if k2_neg { -*a2 } else { *a2 };
                let table = $crate::arithmetic::nibble_table(q1, q2);
                $crate::arithmetic::straus_shamir(&table, &k1, &k2)
            }
        }

        impl $crate::arithmetic::CurveAffine for $name_affine {
            type ScalarExt = $scalar;
            type Base = $base;
            type CurveExt = $name;
            type Extended = [<$name Extended>];

            fn coordinates(&self) -> ::subtle::CtOption<$crate::arithmetic::Coordinates<Self>> {
                let coordinates = $crate::arithmetic::Coordinates { x: self.x, y: self.y };
                ::subtle::CtOption::new(
                    coordinates,
                    !::group::prime::PrimeCurveAffine::is_identity(self),
                )
            }

            fn from_xy(x: Self::Base, y: Self::Base) -> ::subtle::CtOption<Self> {
                let p = $name_affine { x, y };
                ::subtle::CtOption::new(p, p.is_on_curve())
            }

            fn from_xy_unchecked(x: Self::Base, y: Self::Base) -> Self {
                $name_affine { x, y }
            }

            fn is_on_curve(&self) -> ::subtle::Choice {
                use ::subtle::ConstantTimeEq;
                // y² - x³ = b, or the identity
                (self.y.square() - self.x.square() * self.x).ct_eq(&$constant_b)
                    | ::group::prime::PrimeCurveAffine::is_identity(self)
            }

            fn b() -> Self::Base {
                $constant_b
            }

            fn batch_mul(base: &Self, scalars: &[$scalar]) -> Vec<Self> {
                $crate::msm::batch_mul(base, scalars)
            }

            fn multi_exp(
                bases: &[Self],
                scalars: &[$scalar],
                config: &$crate::msm::MsmConfig,
            ) -> Result<$name, $crate::Error> {
                $crate::msm::multi_exp(bases, scalars, config)
            }
        }

        impl $name_affine {
            pub fn is_on_curve(&self) -> ::subtle::Choice {
                $crate::arithmetic::CurveAffine::is_on_curve(self)
            }

            /// `[s_i]base` for every scalar.
            pub fn batch_mul(base: &Self, scalars: &[$scalar]) -> Vec<Self> {
                $crate::msm::batch_mul(base, scalars)
            }
        }

        impl $name {
            pub fn is_on_curve(&self) -> ::subtle::Choice {
                $crate::arithmetic::CurveExt::is_on_curve(self)
            }

            pub fn is_in_subgroup(&self) -> bool {
                $crate::arithmetic::CurveExt::is_in_subgroup(self)
            }

            pub fn endo(&self) -> Self {
                $crate::arithmetic::CurveExt::endo(self)
            }

            /// `[s1]a1 + [s2]a2` in a single Straus–Shamir pass.
            pub fn joint_mul(a1: &Self, s1: &$scalar, a2: &Self, s2: &$scalar) -> Self {
                $crate::arithmetic::CurveExt::joint_mul(a1, s1, a2, s2)
            }
        }

        impl<'a> ::core::ops::Neg for &'a $name {
            type Output = $name;

            fn neg(self) -> $name {
                $name {
                    x: self.x,
                    y: -self.y,
                    z: self.z,
                }
            }
        }

        impl ::core::ops::Neg for $name {
            type Output = $name;

            fn neg(self) -> $name {
                -&self
            }
        }

        impl<'a> ::core::ops::Neg for &'a $name_affine {
            type Output = $name_affine;

            fn neg(self) -> $name_affine {
                $name_affine {
                    x: self.x,
                    y: -self.y,
                }
            }
        }

        impl ::core::ops::Neg for $name_affine {
            type Output = $name_affine;

            fn neg(self) -> $name_affine {
                -&self
            }
        }

        impl<'a, 'b> ::core::ops::Add<&'a $name> for &'b $name {
            type Output = $name;

            fn add(self, rhs: &'a $name) -> $name {
                self.add_jacobian(rhs)
            }
        }

        impl<'a, 'b> ::core::ops::Add<&'a $name_affine> for &'b $name {
            type Output = $name;

            fn add(self, rhs: &'a $name_affine) -> $name {
                self.add_mixed(rhs)
            }
        }

        impl<'a, 'b> ::core::ops::Add<&'a $name_affine> for &'b $name_affine {
            type Output = $name;

            fn add(self, rhs: &'a $name_affine) -> $name {
                self.add_affine(rhs)
            }
        }

        impl<'a, 'b> ::core::ops::Add<&'a $name> for &'b $name_affine {
            type Output = $name;

            fn add(self, rhs: &'a $name) -> $name {
                rhs.add_mixed(self)
            }
        }

        impl<'a, 'b> ::core::ops::Sub<&'a $name> for &'b $name {
            type Output = $name;

            fn sub(self, other: &'a $name) -> $name {
                self + (-other)
            }
        }

        impl<'a, 'b> ::core::ops::Sub<&'a $name_affine> for &'b $name {
            type Output = $name;

            fn sub(self, other: &'a $name_affine) -> $name {
                self.add_mixed(&-other)
            }
        }

        impl<'a, 'b> ::core::ops::Sub<&'a $name_affine> for &'b $name_affine {
            type Output = $name;

            fn sub(self, other: &'a $name_affine) -> $name {
                self.add_affine(&-other)
            }
        }

        impl<'a, 'b> ::core::ops::Sub<&'a $name> for &'b $name_affine {
            type Output = $name;

            fn sub(self, other: &'a $name) -> $name {
                (-other).add_mixed(self)
            }
        }

        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<'a, 'b> ::core::ops::Mul<&'b $scalar> for &'a $name {
            type Output = $name;

            fn mul(self, other: &'b $scalar) -> Self::Output {
                self.mul_glv(other)
            }
        }

        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<'a, 'b> ::core::ops::Mul<&'b $scalar> for &'a $name_affine {
            type Output = $name;

            fn mul(self, other: &'b $scalar) -> Self::Output {
                $name::from(self).mul_glv(other)
            }
        }

        $crate::impl_binops_additive!($name, $name);
        $crate::impl_binops_additive!($name, $name_affine);
        $crate::impl_binops_additive_specify_output!($name_affine, $name_affine, $name);
        $crate::impl_binops_additive_specify_output!($name_affine, $name, $name);
        $crate::impl_binops_multiplicative!($name, $scalar);
        $crate::impl_binops_multiplicative_mixed!($name_affine, $scalar, $name);

        }
    };
}
