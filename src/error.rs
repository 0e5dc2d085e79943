use thiserror::Error;

/// Failures of the layers built on the group core. The group law itself is
/// total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("got {bases} bases and {scalars} scalars")]
    LengthMismatch { bases: usize, scalars: usize },
    #[error("window width {0} is outside 1..=16")]
    InvalidWindow(usize),
    #[error("invalid polynomial size {size} (larger than SRS size {max} or == 0)")]
    InvalidPolynomialSize { size: usize, max: usize },
    #[error("minimum srs size is 2, got {0}")]
    MinSrsSize(usize),
    #[error("number of digests {digests} is not equal to number of polynomials {polynomials}")]
    InvalidNbDigests { polynomials: usize, digests: usize },
}
