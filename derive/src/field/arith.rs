//! Limb arithmetic emitted for every field.
//!
//! Everything is a `const fn` looping over the limbs, so constants such as
//! `from_raw` outputs are folded at compile time. Multiplication is CIOS
//! Montgomery multiplication (Koç, Acar, Kaliski 1996) with one spare word
//! for the final carry, so any odd modulus below `2^(64·n)` works.

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn impl_arith(field: &syn::Ident, num_limbs: usize, inv: u64) -> TokenStream {
    let n = num_limbs;
    let wide = num_limbs + 2;
    quote! {
        impl #field {
            /// `a + b` over the limbs and the carry out of the top limb.
            #[inline(always)]
            const fn add_limbs(a: &[u64; #n], b: &[u64; #n]) -> ([u64; #n], u64) {
                let mut res = [0u64; #n];
                let mut carry = 0;
                let mut i = 0;
                while i < #n {
                    let (v, c) = crate::arithmetic::adc(a[i], b[i], carry);
                    res[i] = v;
                    carry = c;
                    i += 1;
                }
                (res, carry)
            }

            /// `a - b` over the limbs, the borrow is all ones on underflow.
            #[inline(always)]
            const fn sub_limbs(a: &[u64; #n], b: &[u64; #n]) -> ([u64; #n], u64) {
                let mut res = [0u64; #n];
                let mut borrow = 0;
                let mut i = 0;
                while i < #n {
                    let (v, bw) = crate::arithmetic::sbb(a[i], b[i], borrow);
                    res[i] = v;
                    borrow = bw;
                    i += 1;
                }
                (res, borrow)
            }

            /// Maps `hi·2^(64·n) + limbs`, known to be below `2p`, into `[0, p)`.
            #[inline(always)]
            const fn reduce_once(limbs: [u64; #n], hi: u64) -> [u64; #n] {
                let (diff, borrow) = Self::sub_limbs(&limbs, &Self::MODULUS_LIMBS);
                // all ones iff the value was already below p
                let (_, keep) = crate::arithmetic::sbb(hi, 0, borrow);
                let mut res = [0u64; #n];
                let mut i = 0;
                while i < #n {
                    res[i] = (limbs[i] & keep) | (diff[i] & !keep);
                    i += 1;
                }
                res
            }

            #[inline]
            pub const fn add(&self, rhs: &Self) -> Self {
                let (sum, carry) = Self::add_limbs(&self.0, &rhs.0);
                Self(Self::reduce_once(sum, carry))
            }

            #[inline]
            pub const fn double(&self) -> Self {
                self.add(self)
            }

            #[inline]
            pub const fn sub(&self, rhs: &Self) -> Self {
                let (diff, borrow) = Self::sub_limbs(&self.0, &rhs.0);
                let mut res = [0u64; #n];
                let mut carry = 0;
                let mut i = 0;
                while i < #n {
                    let (v, c) =
                        crate::arithmetic::adc(diff[i], Self::MODULUS_LIMBS[i] & borrow, carry);
                    res[i] = v;
                    carry = c;
                    i += 1;
                }
                Self(res)
            }

            #[inline]
            pub const fn neg(&self) -> Self {
                Self::zero().sub(self)
            }

            /// Montgomery product `self·rhs·R^-1`.
            pub const fn mul(&self, rhs: &Self) -> Self {
                use crate::arithmetic::{adc, mac};
                let mut t = [0u64; #wide];
                let mut i = 0;
                while i < #n {
                    let mut carry = 0;
                    let mut j = 0;
                    while j < #n {
                        let (v, c) = mac(t[j], self.0[j], rhs.0[i], carry);
                        t[j] = v;
                        carry = c;
                        j += 1;
                    }
                    let (v, c) = adc(t[#n], carry, 0);
                    t[#n] = v;
                    t[#n + 1] = c;

                    // t + m·p is divisible by 2^64
                    let m = t[0].wrapping_mul(#inv);
                    let (_, mut carry) = mac(t[0], m, Self::MODULUS_LIMBS[0], 0);
                    let mut j = 1;
                    while j < #n {
                        let (v, c) = mac(t[j], m, Self::MODULUS_LIMBS[j], carry);
                        t[j - 1] = v;
                        carry = c;
                        j += 1;
                    }
                    let (v, c) = adc(t[#n], carry, 0);
                    t[#n - 1] = v;
                    t[#n] = t[#n + 1] + c;
                    i += 1;
                }

                let mut res = [0u64; #n];
                let mut i = 0;
                while i < #n {
                    res[i] = t[i];
                    i += 1;
                }
                Self(Self::reduce_once(res, t[#n]))
            }

            #[inline]
            pub const fn square(&self) -> Self {
                self.mul(self)
            }

            /// Canonical little endian limbs, out of Montgomery form.
            #[inline]
            pub(crate) const fn from_mont(&self) -> [u64; #n] {
                let mut one = [0u64; #n];
                one[0] = 1;
                self.mul(&Self(one)).0
            }
        }
    }
}
