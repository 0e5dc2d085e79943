mod arith;

use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_traits::{Num, One};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::Token;

use crate::utils::{inverse_mod, limbs, limbs_token};

/// `key = value` pair of the macro input.
struct Entry {
    key: syn::Ident,
    value: syn::Expr,
}

impl Parse for Entry {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let key = input.parse()?;
        input.parse::<Token![=]>()?;
        let value = input.parse()?;
        Ok(Entry { key, value })
    }
}

/// Parsed `impl_field!` input:
/// `Name, modulus = "..", mul_gen = "..", zeta = "..", from_uniform = [..], endian = ".."`.
struct Input {
    field: syn::Ident,
    entries: BTreeMap<String, syn::Expr>,
}

impl Parse for Input {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let field = input.parse()?;
        input.parse::<Token![,]>()?;
        let mut entries = BTreeMap::new();
        for entry in Punctuated::<Entry, Token![,]>::parse_terminated(input)? {
            let key = entry.key.to_string();
            if entries.insert(key.clone(), entry.value).is_some() {
                return Err(syn::Error::new(entry.key.span(), format!("duplicate `{key}`")));
            }
        }
        Ok(Input { field, entries })
    }
}

impl Input {
    fn take(&mut self, key: &str) -> syn::Result<syn::Expr> {
        self.entries.remove(key).ok_or_else(|| {
            syn::Error::new(Span::call_site(), format!("missing `{key} = ..`"))
        })
    }

    fn string(&mut self, key: &str) -> syn::Result<(String, Span)> {
        match self.take(key)? {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(s),
                ..
            }) => Ok((s.value(), s.span())),
            other => Err(syn::Error::new_spanned(other, "expected a string literal")),
        }
    }

    fn hex(&mut self, key: &str) -> syn::Result<BigUint> {
        let (s, span) = self.string(key)?;
        BigUint::from_str_radix(s.trim_start_matches("0x"), 16)
            .map_err(|err| syn::Error::new(span, format!("`{key}`: {err}")))
    }

    fn sizes(&mut self, key: &str) -> syn::Result<Vec<usize>> {
        match self.take(key)? {
            syn::Expr::Array(array) => array
                .elems
                .iter()
                .map(|e| match e {
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Int(n),
                        ..
                    }) => n.base10_parse(),
                    other => Err(syn::Error::new_spanned(other, "expected an integer")),
                })
                .collect(),
            other => Err(syn::Error::new_spanned(other, "expected `[n, ..]`")),
        }
    }
}

/// Everything the generated code needs, derived from the modulus.
struct Params {
    field: syn::Ident,
    modulus: BigUint,
    num_bits: u32,
    num_limbs: usize,
    size: usize,
    big_endian: bool,
    /// `-p^-1 mod 2^64`
    inv: u64,
    /// `p - 1 = 2^s·t` with `t` odd
    s: u32,
    t: BigUint,
    mul_gen: BigUint,
    zeta: BigUint,
    from_uniform: Vec<usize>,
}

impl Params {
    fn new(mut input: Input) -> syn::Result<Self> {
        let modulus = input.hex("modulus")?;
        let mul_gen = input.hex("mul_gen")?;
        let zeta = input.hex("zeta")?;
        let from_uniform = input.sizes("from_uniform")?;
        let (endian, span) = input.string("endian")?;
        let big_endian = match endian.as_str() {
            "big" => true,
            "little" => false,
            _ => return Err(syn::Error::new(span, "expected \"big\" or \"little\"")),
        };
        if let Some(key) = input.entries.keys().next() {
            return Err(syn::Error::new(Span::call_site(), format!("unknown `{key}`")));
        }
        if !modulus.bit(0) || modulus < BigUint::from(3u32) {
            return Err(syn::Error::new(Span::call_site(), "modulus must be an odd prime"));
        }

        let num_bits = modulus.bits() as u32;
        let num_limbs = num_bits.div_ceil(64) as usize;
        let size = num_limbs * 8;
        for n in from_uniform.iter() {
            if *n < size || *n > 2 * size {
                return Err(syn::Error::new(
                    Span::call_site(),
                    format!("from_uniform sizes must lie in {size}..={}", 2 * size),
                ));
            }
        }

        // Newton iteration for p^-1 mod 2^64, each step doubles the
        // number of correct low bits
        let p0 = limbs(&modulus, num_limbs)[0];
        let mut inv = 1u64;
        for _ in 0..6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(p0.wrapping_mul(inv)));
        }
        let inv = inv.wrapping_neg();

        let p_minus_1 = &modulus - 1u32;
        let s = p_minus_1.trailing_zeros().unwrap_or(0) as u32;
        let t = &p_minus_1 >> s;

        Ok(Params {
            field: input.field,
            modulus,
            num_bits,
            num_limbs,
            size,
            big_endian,
            inv,
            s,
            t,
            mul_gen,
            zeta,
            from_uniform,
        })
    }

    fn raw(&self, e: &BigUint) -> TokenStream {
        limbs_token(e, self.num_limbs)
    }

    /// `Self(..)` holding `e` in Montgomery form.
    fn mont(&self, e: &BigUint) -> TokenStream {
        let r = BigUint::one() << (64 * self.num_limbs);
        let limbs = self.raw(&((e * r) % &self.modulus));
        quote! { Self(#limbs) }
    }

    fn impl_core(&self) -> TokenStream {
        let Params {
            field,
            num_limbs,
            size,
            ..
        } = self;
        let r = BigUint::one() << (64 * num_limbs);
        let modulus_limbs = self.raw(&self.modulus);
        let one = self.mont(&BigUint::one());
        let r2 = self.mont(&(&r % &self.modulus));
        let r3 = self.mont(&((&r * &r) % &self.modulus));
        let endian = if self.big_endian {
            quote! { BE }
        } else {
            quote! { LE }
        };

        quote! {
            #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct #field(pub(crate) [u64; #num_limbs]);

            impl #field {
                /// Byte length of an encoded element.
                pub const SIZE: usize = #size;
                /// Byte order of [`Self::to_bytes`] and [`Self::from_bytes`].
                pub const ENDIAN: crate::encoding::endian::Endian =
                    crate::encoding::endian::Endian::#endian;
                pub(crate) const MODULUS_LIMBS: [u64; #num_limbs] = #modulus_limbs;
                /// `R^2`, multiplying by it moves a value into Montgomery form.
                const R2: Self = #r2;
                const R3: Self = #r3;

                #[inline]
                pub const fn zero() -> Self {
                    Self([0; #num_limbs])
                }

                #[inline]
                pub const fn one() -> Self {
                    #one
                }

                /// Builds an element from little endian limbs, reducing them
                /// modulo `p`.
                pub const fn from_raw(limbs: [u64; #num_limbs]) -> Self {
                    Self(limbs).mul(&Self::R2)
                }

                #[inline]
                const fn is_canonical(limbs: &[u64; #num_limbs]) -> bool {
                    Self::sub_limbs(limbs, &Self::MODULUS_LIMBS).1 != 0
                }

                fn from_canonical_limbs(limbs: [u64; #num_limbs]) -> subtle::CtOption<Self> {
                    let ok = subtle::Choice::from(Self::is_canonical(&limbs) as u8);
                    subtle::CtOption::new(Self(limbs).mul(&Self::R2), ok)
                }

                /// `lo + hi·2^(64·n)` reduced modulo `p`.
                fn from_wide(lo: [u64; #num_limbs], hi: [u64; #num_limbs]) -> Self {
                    Self(lo).mul(&Self::R2).add(&Self(hi).mul(&Self::R3))
                }

                /// Decodes a canonical element in [`Self::ENDIAN`] byte order.
                pub fn from_bytes(bytes: &[u8; #size]) -> subtle::CtOption<Self> {
                    let mut limbs = [0u64; #num_limbs];
                    Self::ENDIAN.from_bytes(bytes, &mut limbs);
                    Self::from_canonical_limbs(limbs)
                }

                pub fn to_bytes(&self) -> [u8; #size] {
                    let mut bytes = [0u8; #size];
                    Self::ENDIAN.to_bytes(&mut bytes, &self.from_mont());
                    bytes
                }
            }

            impl core::fmt::Debug for #field {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    write!(f, "0x")?;
                    for limb in self.from_mont().iter().rev() {
                        write!(f, "{:016x}", limb)?;
                    }
                    Ok(())
                }
            }

            impl core::cmp::Ord for #field {
                fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                    let (a, b) = (self.from_mont(), other.from_mont());
                    a.iter().rev().cmp(b.iter().rev())
                }
            }

            impl core::cmp::PartialOrd for #field {
                fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                    Some(self.cmp(other))
                }
            }

            impl subtle::ConstantTimeEq for #field {
                fn ct_eq(&self, other: &Self) -> subtle::Choice {
                    use subtle::ConstantTimeEq;
                    self.0[..].ct_eq(&other.0[..])
                }
            }

            impl subtle::ConditionallySelectable for #field {
                fn conditional_select(a: &Self, b: &Self, choice: subtle::Choice) -> Self {
                    use subtle::ConditionallySelectable;
                    Self(core::array::from_fn(|i| {
                        u64::conditional_select(&a.0[i], &b.0[i], choice)
                    }))
                }
            }

            impl From<u64> for #field {
                fn from(v: u64) -> Self {
                    let mut limbs = [0u64; #num_limbs];
                    limbs[0] = v;
                    Self::from_raw(limbs)
                }
            }

            impl<T: core::borrow::Borrow<#field>> core::iter::Sum<T> for #field {
                fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
                    iter.fold(Self::zero(), |acc, e| acc.add(e.borrow()))
                }
            }

            impl<T: core::borrow::Borrow<#field>> core::iter::Product<T> for #field {
                fn product<I: Iterator<Item = T>>(iter: I) -> Self {
                    iter.fold(Self::one(), |acc, e| acc.mul(e.borrow()))
                }
            }
        }
    }

    fn impl_ff(&self) -> TokenStream {
        let Params {
            field,
            num_limbs,
            size,
            num_bits,
            ..
        } = self;
        let s = self.s;
        let p = &self.modulus;
        let p_minus_2 = self.raw(&(p - 2u32));

        let sqrt = if p % 4u32 == BigUint::from(3u32) {
            let exp = self.raw(&((p + 1u32) >> 2));
            quote! {
                fn sqrt(&self) -> subtle::CtOption<Self> {
                    use subtle::ConstantTimeEq;
                    let root = ff::Field::pow(self, #exp);
                    subtle::CtOption::new(root, root.square().ct_eq(self))
                }
            }
        } else {
            let tm1d2 = self.raw(&((&self.t - 1u32) >> 1));
            quote! {
                fn sqrt(&self) -> subtle::CtOption<Self> {
                    ff::helpers::sqrt_tonelli_shanks(self, #tm1d2)
                }
            }
        };

        let root_of_unity = self.mul_gen.modpow(&self.t, p);
        let two_inv = self.mont(&inverse_mod(&BigUint::from(2u32), p));
        let gen = self.mont(&self.mul_gen);
        let root_of_unity_inv = self.mont(&inverse_mod(&root_of_unity, p));
        let delta = self.mont(&self.mul_gen.modpow(&(BigUint::one() << s), p));
        let root_of_unity = self.mont(&root_of_unity);
        let zeta = self.mont(&self.zeta);
        let modulus_str = format!("0x{:0width$x}", p, width = size * 2);
        let wide = size * 2;

        let from_uniform = self.from_uniform.iter().map(|n| {
            quote! {
                impl ff::FromUniformBytes<#n> for #field {
                    /// Reads `bytes` as a little endian integer and reduces it.
                    fn from_uniform_bytes(bytes: &[u8; #n]) -> Self {
                        let mut wide = [0u8; #wide];
                        wide[..#n].copy_from_slice(bytes);
                        let (mut lo, mut hi) = ([0u64; #num_limbs], [0u64; #num_limbs]);
                        let le = crate::encoding::endian::Endian::LE;
                        le.from_bytes(&wide[..#size], &mut lo);
                        le.from_bytes(&wide[#size..], &mut hi);
                        Self::from_wide(lo, hi)
                    }
                }
            }
        });

        quote! {
            impl ff::Field for #field {
                const ZERO: Self = Self::zero();
                const ONE: Self = Self::one();

                fn random(mut rng: impl rand_core::RngCore) -> Self {
                    let (mut lo, mut hi) = ([0u64; #num_limbs], [0u64; #num_limbs]);
                    lo.iter_mut().chain(hi.iter_mut()).for_each(|l| *l = rng.next_u64());
                    Self::from_wide(lo, hi)
                }

                fn double(&self) -> Self {
                    self.double()
                }

                fn square(&self) -> Self {
                    self.square()
                }

                /// Fermat inversion, `self^(p-2)`.
                fn invert(&self) -> subtle::CtOption<Self> {
                    use subtle::ConstantTimeEq;
                    let inv = ff::Field::pow(self, #p_minus_2);
                    subtle::CtOption::new(inv, !self.ct_eq(&Self::zero()))
                }

                #sqrt

                fn sqrt_ratio(num: &Self, div: &Self) -> (subtle::Choice, Self) {
                    ff::helpers::sqrt_ratio_generic(num, div)
                }
            }

            impl ff::PrimeField for #field {
                type Repr = crate::encoding::Repr<#size>;

                const MODULUS: &'static str = #modulus_str;
                const NUM_BITS: u32 = #num_bits;
                const CAPACITY: u32 = #num_bits - 1;
                const TWO_INV: Self = #two_inv;
                const MULTIPLICATIVE_GENERATOR: Self = #gen;
                const S: u32 = #s;
                const ROOT_OF_UNITY: Self = #root_of_unity;
                const ROOT_OF_UNITY_INV: Self = #root_of_unity_inv;
                const DELTA: Self = #delta;

                /// Little endian, whatever [`Self::ENDIAN`] is.
                fn from_repr(repr: Self::Repr) -> subtle::CtOption<Self> {
                    let mut limbs = [0u64; #num_limbs];
                    crate::encoding::endian::Endian::LE.from_bytes(repr.as_ref(), &mut limbs);
                    Self::from_canonical_limbs(limbs)
                }

                fn to_repr(&self) -> Self::Repr {
                    let mut bytes = [0u8; #size];
                    crate::encoding::endian::Endian::LE.to_bytes(&mut bytes, &self.from_mont());
                    bytes.into()
                }

                fn is_odd(&self) -> subtle::Choice {
                    subtle::Choice::from((self.from_mont()[0] & 1) as u8)
                }
            }

            impl From<#field> for crate::encoding::Repr<#size> {
                fn from(e: #field) -> Self {
                    ff::PrimeField::to_repr(&e)
                }
            }

            impl ff::WithSmallOrderMulGroup<3> for #field {
                const ZETA: Self = #zeta;
            }

            #(#from_uniform)*
        }
    }
}

pub(crate) fn impl_field(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as Input);
    let params = match Params::new(input) {
        Ok(params) => params,
        Err(err) => return err.to_compile_error().into(),
    };

    let arith = arith::impl_arith(&params.field, params.num_limbs, params.inv);
    let core = params.impl_core();
    let ff = params.impl_ff();
    quote! {
        #arith
        #core
        #ff
    }
    .into()
}
