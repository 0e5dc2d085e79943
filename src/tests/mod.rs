use ff::PrimeField;
use num_bigint::BigUint;
use num_traits::Num;
use std::borrow::Cow;

pub mod curve;

pub(crate) fn fe_from_str<F: PrimeField>(string: impl AsRef<str>) -> F {
    let string = string.as_ref();
    let oct = if let Some(hex) = string.strip_prefix("0x") {
        Cow::Owned(BigUint::from_str_radix(hex, 16).unwrap().to_string())
    } else {
        Cow::Borrowed(string)
    };
    F::from_str_vartime(&oct).unwrap()
}

/// Big endian bytes of a hex string, left padded to `N` bytes.
pub(crate) fn fe_bytes_be<const N: usize>(hex: &str) -> [u8; N] {
    let bytes = BigUint::from_str_radix(hex, 16).unwrap().to_bytes_be();
    assert!(bytes.len() <= N);
    let mut res = [0u8; N];
    res[N - bytes.len()..].copy_from_slice(&bytes);
    res
}
