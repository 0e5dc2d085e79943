use glv_curves_derive::impl_field;

impl_field!(
    Fq,
    modulus = "30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47",
    mul_gen = "3",
    zeta = "30644e72e131a0295e6dd9e7e0acccb0c28f069fbb966e3de4bd44e5607cfd48",
    from_uniform = [64],
    endian = "big",
);

crate::impl_binops_calls!(Fq);
crate::impl_binops_additive!(Fq, Fq);
crate::impl_binops_multiplicative!(Fq, Fq);
crate::impl_serde!(Fq, 32, |e| e.to_bytes(), |bytes| Fq::from_bytes(&bytes));
