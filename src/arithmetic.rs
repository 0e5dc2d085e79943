//! Limb arithmetic, GLV scalar splitting and the Straus–Shamir window loop
//! shared by every curve.

mod curves;
pub use curves::*;

use ff::PrimeField;
use group::Group;

use crate::multicore::{self, MaybeParChunksMut};
#[cfg(feature = "multicore")]
use crate::multicore::{IndexedParallelIterator, ParallelIterator};

/// Lattice constants of the GLV decomposition.
///
/// `(a1, b1)` and `(a2, b2)` are short vectors of the lattice
/// `{(u, v) : u + v·λ ≡ 0 mod r}`, `gamma1 = round(2^256·b2/r)` and
/// `gamma2 = round(2^256·b1/r)`.
pub(crate) struct EndoParameters {
    pub(crate) gamma1: [u64; 4],
    pub(crate) gamma2: [u64; 4],
    pub(crate) b1: [u64; 4],
    pub(crate) b2: [u64; 4],
}

pub trait CurveEndo: CurveExt {
    /// Splits `k` into `(|k1|, k1 < 0, |k2|, k2 < 0)` with
    /// `k ≡ k1 + k2·λ (mod r)` and both halves at most 128 bits wide.
    fn decompose_scalar(k: &Self::ScalarExt) -> (u128, bool, u128, bool);
}

/// Compute a + b + carry, returning the result and the new carry over.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a - (b + borrow), returning the result and the new borrow.
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a + (b * c) + carry, returning the result and the new carry over.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Schoolbook 256 x 256 -> 512 bit product.
#[inline(always)]
pub(crate) fn mul_512(a: [u64; 4], b: [u64; 4]) -> [u64; 8] {
    let mut res = [0u64; 8];
    for (i, ai) in a.iter().enumerate() {
        let mut carry = 0;
        for (j, bj) in b.iter().enumerate() {
            (res[i + j], carry) = mac(res[i + j], *ai, *bj, carry);
        }
        res[i + 4] = carry;
    }
    res
}

/// Little endian limbs of the canonical value of a scalar of at most 256
/// bits.
pub(crate) fn scalar_limbs<F: PrimeField>(e: &F) -> [u64; 4] {
    let repr = e.to_repr();
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(repr.as_ref().chunks(8)) {
        let mut buf = [0u8; 8];
        buf[..chunk.len()].copy_from_slice(chunk);
        *limb = u64::from_le_bytes(buf);
    }
    limbs
}

/// Picks the representative of `e` or `-e` with the smaller magnitude and
/// reports whether the negation was taken.
pub(crate) fn signed_scalar<F: PrimeField>(e: &F) -> ([u64; 4], bool) {
    let pos = scalar_limbs(e);
    let neg = scalar_limbs(&-*e);
    let (_, borrow) = neg
        .iter()
        .zip(pos.iter())
        .fold((0, 0), |(_, borrow), (n, p)| sbb(*n, *p, borrow));
    // neg < pos
    if borrow >> 63 == 1 {
        (neg, true)
    } else {
        (pos, false)
    }
}

fn bit_len(k: &[u64; 4]) -> usize {
    k.iter()
        .rposition(|limb| *limb != 0)
        .map_or(0, |i| 64 * i + 64 - k[i].leading_zeros() as usize)
}

/// Precomputes `b·q2 + a·q1` for `a, b ∈ {0..3}`, the entry for nibble
/// `(b << 2) | a` sits at index `nibble - 1`.
pub(crate) fn nibble_table<G: Group>(q1: G, q2: G) -> [G; 15] {
    let mut table = [G::identity(); 15];
    table[0] = q1;
    table[3] = q2;

    table[1] = table[0].double();
    table[2] = table[1] + table[0];
    table[4] = table[3] + table[0];
    table[5] = table[3] + table[1];
    table[6] = table[3] + table[2];
    table[7] = table[3].double();
    for i in 0..3 {
        table[8 + i] = table[7] + table[i];
    }
    table[11] = table[7] + table[3];
    for i in 0..3 {
        table[12 + i] = table[11] + table[i];
    }
    table
}

/// Joint double-and-add of `k1·q1 + k2·q2` over a table built by
/// [`nibble_table`], consuming both scalars two bits at a time from the
/// most significant bit. Zero nibbles cost two doublings only.
pub(crate) fn straus_shamir<G: Group>(table: &[G; 15], k1: &[u64; 4], k2: &[u64; 4]) -> G {
    let bits = bit_len(k1).max(bit_len(k2));
    let windows = (bits + 1) / 2;

    let mut acc = G::identity();
    for i in (0..windows).rev() {
        acc = acc.double().double();
        let (limb, shift) = ((2 * i) / 64, (2 * i) % 64);
        let b1 = (k1[limb] >> shift) & 0b11;
        let b2 = (k2[limb] >> shift) & 0b11;
        let nibble = ((b2 << 2) | b1) as usize;
        if nibble != 0 {
            acc += table[nibble - 1];
        }
    }
    acc
}

/// Runs `f` over disjoint chunks of `v`, one task per worker thread.
/// `f` receives the chunk and the offset of its first element in `v`.
pub fn parallelize<T: Send, F: Fn(&mut [T], usize) + Send + Sync>(v: &mut [T], f: F) {
    parallelize_with(v, multicore::current_num_threads(), f)
}

/// Same as [`parallelize`] with `v` cut into at most `nb_tasks` contiguous
/// chunks, which bounds the number of concurrently running tasks.
pub fn parallelize_with<T: Send, F: Fn(&mut [T], usize) + Send + Sync>(
    v: &mut [T],
    nb_tasks: usize,
    f: F,
) {
    let n = v.len();
    if n == 0 {
        return;
    }
    let chunk_size = n.div_ceil(nb_tasks.max(1));
    if chunk_size >= n {
        f(v, 0);
        return;
    }
    v.par_chunks_mut(chunk_size)
        .enumerate()
        .for_each(|(chunk_num, chunk)| f(chunk, chunk_num * chunk_size));
}
