//! BLS12-381 G1, `y² = x³ + 4`, with cofactor
//! `h = (x - 1)² / 3` for the curve seed `x = -0xd201000000010000`.

mod fq;
mod fr;
mod g1;

pub use fq::*;
pub use fr::*;
pub use g1::*;

use crate::arithmetic::EndoParameters;

/// `|x|`, the seed itself is negative.
pub(crate) const BLS_X: u64 = 0xd201_0000_0001_0000;

const ENDO_PARAMS: EndoParameters = EndoParameters {
    // round(2^256·b2/r)
    gamma1: [0x63f6e522f6cfee2e, 0x7c6becf1e01faadd, 0x01, 0x0],
    // round(2^256·b1/r)
    gamma2: [0x63f6e522f6cfee30, 0x7c6becf1e01faadd, 0x01, 0x0],
    b1: [0x0000000100000000, 0xac45a4010001a402, 0x0, 0x0],
    b2: [0x00000000ffffffff, 0xac45a4010001a402, 0x0, 0x0],
};

crate::endo!(G1, Fr, ENDO_PARAMS);
