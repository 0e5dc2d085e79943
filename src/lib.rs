//! Short Weierstrass curves `y² = x³ + b` with a GLV endomorphism.
//!
//! Each curve module exposes Jacobian, affine and extended Jacobian points,
//! GLV scalar multiplication, batch conversion to affine, batch fixed-base
//! multiplication and a windowed multi-scalar multiplication. [`kzg`] builds
//! polynomial commitments on top of them.

#[macro_use]
mod derive;

pub mod arithmetic;
pub mod encoding;
mod error;
pub mod kzg;
pub mod msm;
pub mod multicore;

pub mod bls12381;
pub mod bn256;

#[cfg(test)]
pub mod tests;

pub use arithmetic::{CurveAffine, CurveEndo, CurveExt, ExtendedJacobian};
pub use error::Error;

pub extern crate ff;
pub extern crate group;
