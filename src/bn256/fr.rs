use glv_curves_derive::impl_field;

impl_field!(
    Fr,
    modulus = "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001",
    mul_gen = "7",
    zeta = "30644e72e131a029048b6e193fd84104cc37a73fec2bc5e9b8ca0b2d36636f23",
    from_uniform = [64],
    endian = "little",
);

crate::impl_binops_calls!(Fr);
crate::impl_binops_additive!(Fr, Fr);
crate::impl_binops_multiplicative!(Fr, Fr);
crate::impl_serde!(Fr, 32, |e| e.to_bytes(), |bytes| Fr::from_bytes(&bytes));
