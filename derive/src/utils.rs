use num_bigint::BigUint;
use proc_macro2::TokenStream;
use quote::quote;

/// Little endian 64-bit limbs of `e`, zero padded to `n` limbs.
pub(crate) fn limbs(e: &BigUint, n: usize) -> Vec<u64> {
    let mut digits = e.to_u64_digits();
    assert!(digits.len() <= n, "{e:#x} does not fit in {n} limbs");
    digits.resize(n, 0);
    digits
}

pub(crate) fn limbs_token(e: &BigUint, n: usize) -> TokenStream {
    let limbs = limbs(e, n);
    quote! { [#(#limbs),*] }
}

/// `e^-1 mod p` for a prime `p`.
pub(crate) fn inverse_mod(e: &BigUint, p: &BigUint) -> BigUint {
    e.modpow(&(p - 2u32), p)
}
