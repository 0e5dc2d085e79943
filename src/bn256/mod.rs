//! BN254 G1, `y² = x³ + 3` over a 254-bit prime field, of prime order.

mod fq;
mod fr;
mod g1;

pub use fq::*;
pub use fr::*;
pub use g1::*;

use crate::arithmetic::EndoParameters;

const ENDO_PARAMS: EndoParameters = EndoParameters {
    // round(2^256·b2/r)
    gamma1: [0x5398fd0300ff6565, 0x4ccef014a773d2d2, 0x02, 0x0],
    // round(2^256·b1/r)
    gamma2: [0xd91d232ec7e0b3d7, 0x02, 0x0, 0x0],
    b1: [0x89d3256894d213e3, 0x0, 0x0, 0x0],
    b2: [0x0be4e1541221250b, 0x6f4d8248eeb859fd, 0x0, 0x0],
};

crate::endo!(G1, Fr, ENDO_PARAMS);
