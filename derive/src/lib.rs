#![cfg_attr(not(feature = "std"), no_std)]

mod field;
mod utils;

/// Generates a Montgomery-form prime field type.
///
/// ```ignore
/// impl_field!(
///     Fq,
///     modulus = "30644e72...",
///     mul_gen = "3",
///     zeta = "30644e72...",
///     from_uniform = [64],
///     endian = "big",
/// );
/// ```
#[proc_macro]
pub fn impl_field(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    field::impl_field(input)
}
