//! KZG polynomial commitments over a [`CurveAffine`] group.
//!
//! Only the prover side lives here: setting up a structured reference
//! string from a known `τ`, committing, and producing opening proofs.
//! Checking a proof needs a pairing and is left to the caller.

use ark_std::{end_timer, start_timer};
use ff::{Field, FromUniformBytes, PrimeField};
use group::prime::PrimeCurveAffine;
use group::{Curve, GroupEncoding};
use sha2::{Digest as _, Sha256};

use crate::arithmetic::CurveAffine;
use crate::msm::MsmConfig;
use crate::Error;

/// Structured reference string, `g1[i] = [τ^i]G`.
#[derive(Clone, Debug)]
pub struct Srs<C: CurveAffine> {
    pub g1: Vec<C>,
}

/// Proof that a committed polynomial evaluates to `claimed_value` at
/// `point`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpeningProof<C: CurveAffine> {
    /// Commitment to `(p - p(point)) / (X - point)`.
    pub h: C,
    pub point: C::ScalarExt,
    pub claimed_value: C::ScalarExt,
}

/// Opening of several committed polynomials at the same point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOpeningProof<C: CurveAffine> {
    /// Commitment to the quotient of the γ-folded polynomial.
    pub h: C,
    pub point: C::ScalarExt,
    pub claimed_values: Vec<C::ScalarExt>,
}

impl<C: CurveAffine> Srs<C> {
    /// Builds the powers of `tau` up to `size - 1` in the exponent.
    ///
    /// Anyone who knows `tau` can forge openings, this is meant for tests
    /// and for ceremonies that discard `tau` afterwards.
    pub fn new(size: usize, tau: C::ScalarExt) -> Result<Self, Error> {
        if size < 2 {
            return Err(Error::MinSrsSize(size));
        }
        let timer = start_timer!(|| format!("srs of size {}", size));

        let mut powers = Vec::with_capacity(size - 1);
        let mut acc = tau;
        for _ in 1..size {
            powers.push(acc);
            acc *= tau;
        }

        let mut g1 = Vec::with_capacity(size);
        g1.push(C::generator());
        g1.extend(C::batch_mul(&C::generator(), &powers));

        end_timer!(timer);
        Ok(Self { g1 })
    }

    pub fn len(&self) -> usize {
        self.g1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.g1.is_empty()
    }

    fn check_size(&self, poly: &[C::ScalarExt]) -> Result<(), Error> {
        if poly.is_empty() || poly.len() > self.g1.len() {
            return Err(Error::InvalidPolynomialSize {
                size: poly.len(),
                max: self.g1.len(),
            });
        }
        Ok(())
    }

    /// `Σ poly_i·[τ^i]G` for a polynomial in coefficient form, lowest
    /// degree first.
    pub fn commit(&self, poly: &[C::ScalarExt]) -> Result<C, Error> {
        self.check_size(poly)?;
        let digest = C::multi_exp(&self.g1[..poly.len()], poly, &MsmConfig::default())?;
        Ok(digest.to_affine())
    }

    fn commit_quotient(&self, quotient: &[C::ScalarExt]) -> Result<C, Error> {
        // constant polynomials have a zero quotient
        if quotient.is_empty() {
            return Ok(C::identity());
        }
        self.commit(quotient)
    }

    /// Opens `poly` at `point`.
    pub fn open(
        &self,
        poly: &[C::ScalarExt],
        point: C::ScalarExt,
    ) -> Result<OpeningProof<C>, Error> {
        self.check_size(poly)?;
        let claimed_value = eval(poly, point);
        let quotient = divide_by_linear(poly, point);
        Ok(OpeningProof {
            h: self.commit_quotient(&quotient)?,
            point,
            claimed_value,
        })
    }
}

impl<C: CurveAffine> Srs<C>
where
    C::ScalarExt: FromUniformBytes<64>,
{
    /// Opens every polynomial at `point` with a single quotient commitment.
    ///
    /// `digests[i]` must be the commitment of `polys[i]`, they bind the
    /// folding challenge.
    pub fn batch_open_single_point(
        &self,
        polys: &[Vec<C::ScalarExt>],
        digests: &[C],
        point: C::ScalarExt,
    ) -> Result<BatchOpeningProof<C>, Error> {
        if polys.len() != digests.len() || polys.is_empty() {
            return Err(Error::InvalidNbDigests {
                polynomials: polys.len(),
                digests: digests.len(),
            });
        }
        for poly in polys {
            self.check_size(poly)?;
        }

        let claimed_values: Vec<_> = polys.iter().map(|poly| eval(poly, point)).collect();
        let gamma = derive_gamma(&point, digests);
        log::trace!("batch opening of {} polynomials", polys.len());

        // Σ γ^i·p_i and Σ γ^i·p_i(z), Horner style from the last one
        let max_len = polys.iter().map(Vec::len).max().unwrap_or(0);
        let mut folded = vec![C::ScalarExt::ZERO; max_len];
        let mut folded_value = C::ScalarExt::ZERO;
        for (poly, value) in polys.iter().zip(claimed_values.iter()).rev() {
            for coeff in folded.iter_mut() {
                *coeff *= gamma;
            }
            for (acc, coeff) in folded.iter_mut().zip(poly.iter()) {
                *acc += coeff;
            }
            folded_value = folded_value * gamma + value;
        }
        debug_assert_eq!(eval(&folded, point), folded_value);

        let quotient = divide_by_linear(&folded, point);
        Ok(BatchOpeningProof {
            h: self.commit_quotient(&quotient)?,
            point,
            claimed_values,
        })
    }
}

/// Fiat-Shamir challenge bound to the opening point and the digests.
pub(crate) fn derive_gamma<C: CurveAffine>(point: &C::ScalarExt, digests: &[C]) -> C::ScalarExt
where
    C::ScalarExt: FromUniformBytes<64>,
{
    let mut hasher = Sha256::new();
    hasher.update(b"gamma");
    hasher.update(point.to_repr().as_ref());
    for digest in digests {
        hasher.update(digest.to_bytes().as_ref());
    }
    let mut wide = [0u8; 64];
    wide[..32].copy_from_slice(&hasher.finalize());
    C::ScalarExt::from_uniform_bytes(&wide)
}

/// `p(x)` by Horner's rule.
pub fn eval<F: Field>(poly: &[F], x: F) -> F {
    poly.iter().rev().fold(F::ZERO, |acc, coeff| acc * x + coeff)
}

/// Quotient of `p - p(a)` by `X - a`, one coefficient shorter than `p`.
fn divide_by_linear<F: Field>(poly: &[F], a: F) -> Vec<F> {
    if poly.len() < 2 {
        return vec![];
    }
    let mut quotient = vec![F::ZERO; poly.len() - 1];
    let mut carry = F::ZERO;
    for (q, coeff) in quotient.iter_mut().zip(poly[1..].iter()).rev() {
        carry = carry * a + coeff;
        *q = carry;
    }
    quotient
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bls12381::{Fr as BlsFr, G1Affine as BlsG1Affine};
    use crate::bn256::{Fr, G1Affine, G1};
    use group::Group;
    use rand_core::OsRng;

    fn random_poly<F: Field>(len: usize) -> Vec<F> {
        (0..len).map(|_| F::random(OsRng)).collect()
    }

    #[test]
    fn test_srs() {
        let tau = Fr::random(OsRng);
        let srs = Srs::<G1Affine>::new(16, tau).unwrap();
        assert_eq!(srs.len(), 16);
        assert_eq!(srs.g1[0], G1Affine::generator());
        let mut power = Fr::ONE;
        for p in srs.g1.iter() {
            assert_eq!(*p, (G1::generator() * power).to_affine());
            power *= tau;
        }

        assert_eq!(
            Srs::<G1Affine>::new(1, tau).unwrap_err(),
            Error::MinSrsSize(1)
        );
    }

    #[test]
    fn test_divide_by_linear() {
        let poly: Vec<Fr> = random_poly(10);
        let a = Fr::random(OsRng);
        let q = divide_by_linear(&poly, a);
        assert_eq!(q.len(), 9);
        let x = Fr::random(OsRng);
        assert_eq!(eval(&q, x) * (x - a), eval(&poly, x) - eval(&poly, a));

        assert!(divide_by_linear(&[Fr::ONE], a).is_empty());
    }

    fn run_commit_open_test<C: CurveAffine>() {
        let tau = C::ScalarExt::random(OsRng);
        let srs = Srs::<C>::new(32, tau).unwrap();
        let g = C::generator();

        for len in [1, 2, 17, 32] {
            let poly: Vec<C::ScalarExt> = random_poly(len);
            let digest = srs.commit(&poly).unwrap();
            assert_eq!(digest, (g * eval(&poly, tau)).to_affine());

            let z = C::ScalarExt::random(OsRng);
            let proof = srs.open(&poly, z).unwrap();
            assert_eq!(proof.point, z);
            assert_eq!(proof.claimed_value, eval(&poly, z));
            // [q(τ)]G·(τ - z) = [p(τ) - p(z)]G
            assert_eq!(
                proof.h * (tau - z),
                digest.to_curve() - g * proof.claimed_value
            );
        }

        assert_eq!(
            srs.commit(&[]),
            Err(Error::InvalidPolynomialSize { size: 0, max: 32 })
        );
        assert_eq!(
            srs.commit(&random_poly(33)),
            Err(Error::InvalidPolynomialSize { size: 33, max: 32 })
        );
    }

    #[test]
    fn test_commit_open() {
        run_commit_open_test::<G1Affine>();
        run_commit_open_test::<BlsG1Affine>();
    }

    #[test]
    fn test_batch_open_single_point() {
        let tau = BlsFr::random(OsRng);
        let srs = Srs::<BlsG1Affine>::new(20, tau).unwrap();
        let g = BlsG1Affine::generator();

        let polys: Vec<Vec<BlsFr>> = [20, 3, 11, 1].into_iter().map(random_poly).collect();
        let digests: Vec<_> = polys.iter().map(|p| srs.commit(p).unwrap()).collect();
        let z = BlsFr::random(OsRng);
        let proof = srs.batch_open_single_point(&polys, &digests, z).unwrap();

        for (poly, value) in polys.iter().zip(proof.claimed_values.iter()) {
            assert_eq!(eval(poly, z), *value);
        }

        // Σ γ^i·(D_i - [v_i]G) = [τ - z]H
        let gamma = derive_gamma(&z, &digests);
        let mut gamma_i = BlsFr::ONE;
        let mut lhs = crate::bls12381::G1::identity();
        for (digest, value) in digests.iter().zip(proof.claimed_values.iter()) {
            lhs += (digest.to_curve() - g * value) * gamma_i;
            gamma_i *= gamma;
        }
        assert_eq!(lhs, proof.h * (tau - z));

        // the challenge depends on every digest
        let mut tampered = digests.clone();
        tampered[3] = (tampered[3] + g).to_affine();
        assert_ne!(derive_gamma(&z, &tampered), gamma);

        assert_eq!(
            srs.batch_open_single_point(&polys, &digests[..3], z),
            Err(Error::InvalidNbDigests {
                polynomials: 4,
                digests: 3
            })
        );
    }

    #[test]
    fn test_open_constant() {
        let srs = Srs::<G1Affine>::new(4, Fr::from(3)).unwrap();
        let proof = srs.open(&[Fr::from(5)], Fr::from(7)).unwrap();
        assert_eq!(proof.claimed_value, Fr::from(5));
        assert!(bool::from(proof.h.is_identity()));
    }
}
