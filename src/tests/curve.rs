#![allow(clippy::eq_op)]

use crate::arithmetic::{scalar_limbs, CurveAffine, CurveEndo, CurveExt, ExtendedJacobian};
use ff::{Field, WithSmallOrderMulGroup};
use group::prime::PrimeCurveAffine;
use group::{Curve, Group, GroupEncoding, UncompressedEncoding};
use rand_core::OsRng;

#[cfg(feature = "derive_serde")]
use serde::{Deserialize, Serialize};

pub fn curve_tests<G: CurveExt>()
where
    G::AffineExt: UncompressedEncoding,
{
    is_on_curve::<G>();
    equality::<G>();
    projective_to_affine_affine_to_projective::<G>();
    projective_addition::<G>();
    mixed_addition::<G>();
    affine_addition::<G>();
    extended_addition::<G>();
    multiplication::<G>();
    joint_multiplication::<G>();
    batch_normalize::<G>();
    serdes::<G>();
}

pub fn endo_tests<G: CurveEndo>() {
    let g = G::generator();
    assert_eq!(g.endo(), g * G::ScalarExt::ZETA);
    assert!(bool::from(G::identity().endo().is_identity()));

    for _ in 0..100 {
        let p = G::random(OsRng);
        assert_eq!(p.endo(), p * G::ScalarExt::ZETA);
        // φ³ = 1
        assert_eq!(p.endo().endo().endo(), p);
    }
}

fn naive_mul<G: CurveExt>(p: &G, s: &G::ScalarExt) -> G {
    let limbs = scalar_limbs(s);
    let mut acc = G::identity();
    for bit in (0..256).rev() {
        acc = acc.double();
        if (limbs[bit / 64] >> (bit % 64)) & 1 == 1 {
            acc += p;
        }
    }
    acc
}

fn serdes<G: CurveExt>()
where
    G::AffineExt: UncompressedEncoding,
{
    assert!(bool::from(
        G::from_bytes(&G::identity().to_bytes())
            .unwrap()
            .is_identity()
    ));
    assert!(bool::from(
        G::AffineExt::from_bytes(&G::AffineExt::identity().to_bytes())
            .unwrap()
            .is_identity()
    ));
    assert!(bool::from(
        G::AffineExt::from_uncompressed(&G::AffineExt::identity().to_uncompressed())
            .unwrap()
            .is_identity()
    ));
    assert!(G::AffineExt::identity()
        .to_uncompressed()
        .as_ref()
        .iter()
        .all(|b| *b == 0));

    for _ in 0..100 {
        let projective_point = G::random(OsRng);
        let affine_point: G::AffineExt = projective_point.into();
        let projective_repr = projective_point.to_bytes();
        let affine_repr = affine_point.to_bytes();
        assert_eq!(projective_repr.as_ref(), affine_repr.as_ref());

        let projective_point_rec = G::from_bytes(&projective_repr).unwrap();
        let projective_point_rec_unchecked = G::from_bytes_unchecked(&projective_repr).unwrap();
        let affine_point_rec = G::AffineExt::from_bytes(&affine_repr).unwrap();
        let affine_point_rec_unchecked = G::AffineExt::from_bytes_unchecked(&affine_repr).unwrap();

        assert_eq!(projective_point, projective_point_rec);
        assert_eq!(projective_point, projective_point_rec_unchecked);
        assert_eq!(affine_point, affine_point_rec);
        assert_eq!(affine_point, affine_point_rec_unchecked);

        // the negation only differs in the sign flag
        let neg_repr = (-affine_point).to_bytes();
        assert_ne!(neg_repr.as_ref(), affine_repr.as_ref());
        assert_eq!(G::AffineExt::from_bytes(&neg_repr).unwrap(), -affine_point);

        let uncompressed = affine_point.to_uncompressed();
        assert_eq!(
            G::AffineExt::from_uncompressed(&uncompressed).unwrap(),
            affine_point
        );
        assert_eq!(
            G::AffineExt::from_uncompressed_unchecked(&uncompressed).unwrap(),
            affine_point
        );
    }
}

#[cfg(feature = "derive_serde")]
pub fn random_serde_test<G>()
where
    G: CurveExt + Serialize + for<'de> Deserialize<'de>,
    G::AffineExt: Serialize + for<'de> Deserialize<'de>,
{
    for _ in 0..100 {
        let projective_point = G::random(OsRng);
        let affine_point: G::AffineExt = projective_point.into();
        {
            let affine_bytes = bincode::serialize(&affine_point).unwrap();
            let reader = std::io::Cursor::new(affine_bytes);
            let affine_point_rec: G::AffineExt = bincode::deserialize_from(reader).unwrap();
            assert_eq!(projective_point.to_affine(), affine_point_rec);
            assert_eq!(affine_point, affine_point_rec);
        }
        {
            let affine_json = serde_json::to_string(&affine_point).unwrap();
            let reader = std::io::Cursor::new(affine_json);
            let affine_point_rec: G::AffineExt = serde_json::from_reader(reader).unwrap();
            assert_eq!(affine_point, affine_point_rec);
        }
        {
            let projective_bytes = bincode::serialize(&projective_point).unwrap();
            let reader = std::io::Cursor::new(projective_bytes);
            let projective_point_rec: G = bincode::deserialize_from(reader).unwrap();
            assert_eq!(projective_point, projective_point_rec);
        }
        {
            let projective_json = serde_json::to_string(&projective_point).unwrap();
            let reader = std::io::Cursor::new(projective_json);
            let projective_point_rec: G = serde_json::from_reader(reader).unwrap();
            assert_eq!(projective_point, projective_point_rec);
        }
    }
}

fn is_on_curve<G: CurveExt>() {
    assert!(bool::from(G::identity().is_on_curve()));
    assert!(bool::from(G::generator().is_on_curve()));
    assert!(bool::from(G::AffineExt::identity().is_on_curve()));
    assert!(bool::from(G::AffineExt::generator().is_on_curve()));
    assert!(G::identity().is_in_subgroup());
    assert!(G::generator().is_in_subgroup());

    for _ in 0..100 {
        let point = G::random(OsRng);
        assert!(bool::from(point.is_on_curve()));
        assert!(point.is_in_subgroup());
        let affine_point: G::AffineExt = point.into();
        assert!(bool::from(affine_point.is_on_curve()));

        let (x, y, z) = point.jacobian_coordinates();
        assert_eq!(G::new_jacobian(x, y, z).unwrap(), point);
        let coordinates = affine_point.coordinates().unwrap();
        assert_eq!(
            G::AffineExt::from_xy(*coordinates.x(), *coordinates.y()).unwrap(),
            affine_point
        );
    }
    assert!(bool::from(G::AffineExt::identity().coordinates().is_none()));
}

fn equality<G: CurveExt>() {
    let a = G::generator();
    let b = G::identity();

    assert!(a == a);
    assert!(b == b);
    assert!(a != b);
    assert!(b != a);

    for _ in 0..100 {
        let a = G::random(OsRng);
        let b = G::random(OsRng);

        assert!(a == a);
        assert!(b == b);
        assert!(a != b);
        assert!(b != a);

        // same point, different Z
        let a2 = a.double() - a;
        assert_eq!(a, a2);
        assert_ne!(a.jacobian_coordinates().2, a2.jacobian_coordinates().2);

        let a: G::AffineExt = a.into();
        let b: G::AffineExt = b.into();

        assert!(a == a);
        assert!(b == b);
        assert!(a != b);
        assert!(b != a);
    }
}

fn projective_to_affine_affine_to_projective<G: CurveExt>() {
    let a = G::generator();
    let b = G::identity();

    assert!(bool::from(G::AffineExt::from(a).is_on_curve()));
    assert!(!bool::from(G::AffineExt::from(a).is_identity()));
    assert!(bool::from(G::AffineExt::from(b).is_on_curve()));
    assert!(bool::from(G::AffineExt::from(b).is_identity()));

    let a = G::AffineExt::generator();
    let b = G::AffineExt::identity();

    assert!(bool::from(G::from(a).is_on_curve()));
    assert!(!bool::from(G::from(a).is_identity()));
    assert!(bool::from(G::from(b).is_on_curve()));
    assert!(bool::from(G::from(b).is_identity()));

    for _ in 0..100 {
        let p = G::random(OsRng);
        assert_eq!(G::from(p.to_affine()), p);
    }
}

fn projective_addition<G: CurveExt>() {
    let a = G::identity();
    let b = G::identity();
    let c = a + b;
    assert!(bool::from(c.is_identity()));
    assert!(bool::from(c.is_on_curve()));
    let c = a - b;
    assert!(bool::from(c.is_identity()));
    assert!(bool::from(c.is_on_curve()));

    let a = G::identity();
    let a = -a;
    assert!(bool::from(a.is_on_curve()));
    assert!(bool::from(a.is_identity()));

    let a = G::random(OsRng);
    assert!(a == a + G::identity());
    assert!(a == G::identity() + a);
    assert!(-a == G::identity() - a);
    assert!(bool::from((a - a).is_identity()));
    assert!(bool::from((a + (-a)).is_identity()));

    let a = G::identity();
    let a = a.double();
    assert!(bool::from(a.is_on_curve()));
    assert!(bool::from(a.is_identity()));

    let a = G::generator();
    let a = a.double();
    assert!(bool::from(a.is_on_curve()));
    assert_eq!(a, G::generator() + G::generator());
    assert_eq!(a, G::generator() * G::ScalarExt::from(2));

    let a = G::random(OsRng);
    assert!(a.double() - a == a);
    // P + P through the addition formula
    let a2 = a.double() - a;
    assert_eq!(a + a2, a.double());

    let a = G::random(OsRng);
    let b = G::random(OsRng);
    let c = G::random(OsRng);
    assert!(a + b == b + a);
    assert!(a - b == -(b - a));
    assert!(c + (a + b) == a + (c + b));
    assert!((a - b) - c == (a - c) - b);

    let a = G::generator().double().double(); // 4P
    let b = G::generator().double(); // 2P
    let c = a + b;

    let mut d = G::generator();
    for _ in 0..5 {
        d += G::generator();
    }

    assert!(c == d);
    assert!(!bool::from(c.is_identity()));
    assert!(bool::from(c.is_on_curve()));
    assert!(!bool::from(d.is_identity()));
    assert!(bool::from(d.is_on_curve()));

    let points = [G::random(OsRng), G::random(OsRng), G::identity()];
    assert_eq!(points.iter().sum::<G>(), points[0] + points[1]);
}

fn mixed_addition<G: CurveExt>() {
    let a = G::identity();
    let b = G::AffineRepr::identity();
    let c = a + b;
    assert!(bool::from(c.is_identity()));
    assert!(bool::from(c.is_on_curve()));
    let c = a - b;
    assert!(bool::from(c.is_identity()));
    assert!(bool::from(c.is_on_curve()));

    let a = G::identity();
    let a = -a;
    assert!(bool::from(a.is_on_curve()));
    assert!(bool::from(a.is_identity()));
    let a = G::AffineExt::identity();
    let a = -a;
    assert!(bool::from(a.is_on_curve()));
    assert!(bool::from(a.is_identity()));

    let a: G::AffineExt = G::random(OsRng).into();
    assert!(a.to_curve() == a.to_curve() + G::AffineExt::identity());
    assert!(a.to_curve() == G::identity() + a);

    let a = G::random(OsRng);
    assert!(a.double() - a == a);

    let a = G::random(OsRng);
    let b: G::AffineExt = G::random(OsRng).into();
    let c0 = a + b;
    let c1 = a + G::from(b);
    assert_eq!(c0, c1);
    assert_eq!(a - b, a - G::from(b));

    // doubling and cancellation inside the mixed formula
    let a = G::random(OsRng);
    let b: G::AffineExt = a.into();
    assert_eq!(a + b, a.double());
    assert!(bool::from((a - b).is_identity()));
}

fn affine_addition<G: CurveExt>() {
    let o = G::AffineExt::identity();
    assert!(bool::from((o + o).is_identity()));

    for _ in 0..100 {
        let a: G::AffineExt = G::random(OsRng).into();
        let b: G::AffineExt = G::random(OsRng).into();
        assert_eq!(a + b, a.to_curve() + b.to_curve());
        assert_eq!(a - b, a.to_curve() - b.to_curve());
        assert_eq!(a + a, a.to_curve().double());
        assert!(bool::from((a - a).is_identity()));
        assert_eq!(a + o, a.to_curve());
        assert_eq!(o + a, a.to_curve());
    }
}

fn extended_addition<G: CurveExt>() {
    type Ext<G> = <<G as CurveExt>::AffineExt as CurveAffine>::Extended;

    let o = Ext::<G>::identity();
    assert!(o.is_identity());
    assert!(bool::from(o.to_curve().is_identity()));
    assert!(o.double().is_identity());

    for _ in 0..100 {
        let a: G::AffineExt = G::random(OsRng).into();
        let b: G::AffineExt = G::random(OsRng).into();

        let mut acc = Ext::<G>::identity();
        acc.add_mixed(&a);
        assert_eq!(acc.to_curve(), a.to_curve());
        acc.add_mixed(&b);
        assert_eq!(acc.to_curve(), a + b);
        acc.sub_mixed(&b);
        assert_eq!(acc.to_curve(), a.to_curve());

        // doubling and cancellation in the mixed formulas
        acc.add_mixed(&a);
        assert_eq!(acc.to_curve(), a.to_curve().double());
        let mut acc = Ext::<G>::identity();
        acc.add_mixed(&a);
        acc.sub_mixed(&a);
        assert!(acc.is_identity());
        let mut acc = Ext::<G>::identity();
        acc.sub_mixed(&a);
        acc.sub_mixed(&a);
        assert_eq!(acc.to_curve(), -a.to_curve().double());

        // full additions
        let mut x = Ext::<G>::identity();
        x.add_mixed(&a);
        let mut y = Ext::<G>::identity();
        y.add_mixed(&b);
        let mut sum = x;
        sum.add_assign(&y);
        assert_eq!(sum.to_curve(), a + b);
        let mut twice = x;
        twice.add_assign(&x);
        assert_eq!(twice.to_curve(), x.double().to_curve());
        assert_eq!(x.double().to_curve(), a.to_curve().double());
        let mut neg = Ext::<G>::identity();
        neg.sub_mixed(&a);
        neg.add_assign(&x);
        assert!(neg.is_identity());
        let mut with_identity = x;
        with_identity.add_assign(&o);
        assert_eq!(with_identity.to_curve(), a.to_curve());
    }
}

fn batch_normalize<G: CurveExt>() {
    let a = G::generator().double();
    let b = a.double();
    let c = b.double();

    for a_identity in (0..2).map(|n| n == 1) {
        for b_identity in (0..2).map(|n| n == 1) {
            for c_identity in (0..2).map(|n| n == 1) {
                let mut v = [a, b, c];
                if a_identity {
                    v[0] = G::identity()
                }
                if b_identity {
                    v[1] = G::identity()
                }
                if c_identity {
                    v[2] = G::identity()
                }

                let mut t = [
                    G::AffineExt::identity(),
                    G::AffineExt::identity(),
                    G::AffineExt::identity(),
                ];
                let expected = [
                    G::AffineExt::from(v[0]),
                    G::AffineExt::from(v[1]),
                    G::AffineExt::from(v[2]),
                ];

                G::batch_normalize(&v[..], &mut t[..]);

                assert_eq!(&t[..], &expected[..]);
            }
        }
    }

    let points: Vec<G> = (0..1000)
        .map(|i| if i % 7 == 0 { G::identity() } else { G::random(OsRng) })
        .collect();
    let mut affine = vec![G::AffineExt::identity(); points.len()];
    G::batch_normalize(&points, &mut affine);
    for (p, a) in points.iter().zip(affine.iter()) {
        assert_eq!(p.to_affine(), *a);
    }
}

fn multiplication<G: CurveExt>() {
    let a = G::random(OsRng);
    for s in [
        G::ScalarExt::ZERO,
        G::ScalarExt::ONE,
        -G::ScalarExt::ONE,
        G::ScalarExt::ZETA,
    ] {
        assert_eq!(a * s, naive_mul(&a, &s));
    }
    assert!(bool::from((a * -G::ScalarExt::ONE + a).is_identity()));

    for _ in 1..100 {
        let s1 = G::ScalarExt::random(OsRng);
        let s2 = G::ScalarExt::random(OsRng);

        let t0 = G::identity() * s1;
        assert!(bool::from(t0.is_identity()));

        let a = G::random(OsRng);
        let t0 = a * G::ScalarExt::ONE;
        assert_eq!(a, t0);

        let t0 = a * G::ScalarExt::ZERO;
        assert!(bool::from(t0.is_identity()));

        assert_eq!(a * s1, naive_mul(&a, &s1));
        let affine: G::AffineExt = a.into();
        assert_eq!(affine * s1, a * s1);

        let t0 = a * s1 + a * s2;

        let s3 = s1 + s2;
        let t1 = a * s3;

        assert_eq!(t0, t1);

        let mut t0 = a * s1;
        let mut t1 = a * s2;
        t0 += t1;
        let s3 = s1 + s2;
        t1 = a * s3;
        assert_eq!(t0, t1);

        assert_eq!((a * s1) * s2, a * (s1 * s2));
    }
}

fn joint_multiplication<G: CurveExt>() {
    let scalars = [
        G::ScalarExt::ZERO,
        G::ScalarExt::ONE,
        -G::ScalarExt::ONE,
        G::ScalarExt::random(OsRng),
        -G::ScalarExt::random(OsRng),
    ];
    for s1 in scalars.iter() {
        for s2 in scalars.iter() {
            let a = G::random(OsRng);
            let b = G::random(OsRng);
            assert_eq!(G::joint_mul(&a, s1, &b, s2), a * s1 + b * s2);
        }
    }

    let a = G::random(OsRng);
    let s = G::ScalarExt::random(OsRng);
    // shared base, opposite scalars
    assert!(bool::from(G::joint_mul(&a, &s, &a, &-s).is_identity()));
    assert_eq!(
        G::joint_mul(&G::identity(), &s, &a, &s),
        a * s
    );
}
