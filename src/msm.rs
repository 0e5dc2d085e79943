//! Windowed multi-scalar multiplication.
//!
//! Both engines share one signed digit recoding: a scalar is cut into
//! `c`-bit windows and a window of value `v ≥ 2^(c-1)` is replaced by
//! `v - 2^c` with a carry into the next window, so only `2^(c-1)` multiples
//! of a base are ever needed. A digit is stored as `v << 1` when positive
//! and as `((|v| - 1) << 1) | 1` when negative.

use ark_std::{end_timer, start_timer};
use ff::{BatchInvert, Field, PrimeField};
use group::{Curve, Group};

use crate::arithmetic::{
    parallelize, parallelize_with, scalar_limbs, Coordinates, CurveAffine, ExtendedJacobian,
};
use crate::multicore::{self, MaybeParChunks, MaybeParChunksMut};
#[cfg(feature = "multicore")]
use crate::multicore::{IndexedParallelIterator, ParallelIterator};
use crate::Error;

/// Largest accepted window width.
pub const MAX_WINDOW: usize = 16;

/// Tuning knobs of [`multi_exp`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MsmConfig {
    /// Window width in bits, picked by a cost model when unset.
    pub window: Option<usize>,
    /// Upper bound on parallel tasks, the worker pool size when unset.
    pub nb_tasks: Option<usize>,
    /// Keeps buckets in affine form and adds into them in batches sharing
    /// one inversion, instead of extended Jacobian buckets.
    pub batch_affine: bool,
}

impl MsmConfig {
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_nb_tasks(mut self, nb_tasks: usize) -> Self {
        self.nb_tasks = Some(nb_tasks);
        self
    }

    pub fn with_batch_affine(mut self, batch_affine: bool) -> Self {
        self.batch_affine = batch_affine;
        self
    }

    fn nb_tasks(&self) -> usize {
        self.nb_tasks
            .unwrap_or_else(multicore::current_num_threads)
            .max(1)
    }
}

/// Number of `c`-bit windows of a scalar, one spare bit on top absorbs the
/// final carry so the top window never turns negative.
pub(crate) fn nb_chunks(num_bits: usize, c: usize) -> usize {
    (num_bits + 1).div_ceil(c)
}

/// Window width for `n` fixed-base multiplications, minimizing
/// `2^(c-1) + n·(c+1)·nb_chunks(c)`.
pub(crate) fn batch_mul_window(num_bits: usize, n: usize) -> usize {
    (2..=MAX_WINDOW)
        .min_by_key(|&c| (1usize << (c - 1)) + n * (c + 1) * nb_chunks(num_bits, c))
        .unwrap_or(2)
}

/// Window width for a Pippenger sum of `n` terms, minimizing
/// `nb_chunks(c)·(n + 2^(c-1))`.
pub(crate) fn msm_window(num_bits: usize, n: usize) -> usize {
    (2..=MAX_WINDOW)
        .min_by_key(|&c| nb_chunks(num_bits, c) * (n + (1usize << (c - 1))))
        .unwrap_or(2)
}

fn get_window(limbs: &[u64; 4], start: usize, c: usize) -> u64 {
    let (limb, shift) = (start / 64, start % 64);
    if limb >= limbs.len() {
        return 0;
    }
    let mut v = limbs[limb] >> shift;
    if shift + c > 64 && limb + 1 < limbs.len() {
        v |= limbs[limb + 1] << (64 - shift);
    }
    v & ((1 << c) - 1)
}

fn recode<F: PrimeField>(scalar: &F, c: usize, digits: &mut [u32]) {
    let limbs = scalar_limbs(scalar);
    let half = 1u64 << (c - 1);
    let last = digits.len() - 1;
    let mut carry = 0;

    for (chunk, digit) in digits.iter_mut().enumerate() {
        let v = get_window(&limbs, chunk * c, c) + carry;
        carry = 0;
        *digit = if v >= half && chunk != last {
            carry = 1;
            match (1u64 << c) - v {
                0 => 0,
                neg => (((neg - 1) << 1) | 1) as u32,
            }
        } else {
            (v << 1) as u32
        };
    }
    debug_assert_eq!(carry, 0);
}

/// Signed digits of every scalar, scalar-major: the digits of scalar `i`
/// are `digits[i * nb_chunks..(i + 1) * nb_chunks]`, least significant
/// window first.
pub(crate) fn partition_scalars<F: PrimeField>(scalars: &[F], c: usize, nb_tasks: usize) -> Vec<u32> {
    let nb_chunks = nb_chunks(F::NUM_BITS as usize, c);
    let mut digits = vec![0u32; scalars.len() * nb_chunks];
    if scalars.is_empty() {
        return digits;
    }
    let per_task = scalars.len().div_ceil(nb_tasks.max(1));

    digits
        .par_chunks_mut(per_task * nb_chunks)
        .zip(scalars.par_chunks(per_task))
        .for_each(|(task_digits, task_scalars)| {
            for (scalar_digits, scalar) in task_digits.chunks_mut(nb_chunks).zip(task_scalars) {
                recode(scalar, c, scalar_digits);
            }
        });
    digits
}

/// `[s_i]base` for every scalar, in affine form.
pub fn batch_mul<C: CurveAffine>(base: &C, scalars: &[C::ScalarExt]) -> Vec<C> {
    let num_bits = C::ScalarExt::NUM_BITS as usize;
    let c = batch_mul_window(num_bits, scalars.len());
    let nb_chunks = nb_chunks(num_bits, c);
    log::debug!("batch_mul: {} scalars, window {}", scalars.len(), c);
    let timer = start_timer!(|| format!("batch_mul of {} scalars", scalars.len()));

    // base, 2·base, ..., 2^(c-1)·base
    let mut table = vec![C::Curve::identity(); 1 << (c - 1)];
    let mut acc = C::Curve::identity();
    for entry in table.iter_mut() {
        acc += base;
        *entry = acc;
    }
    let mut table_affine = vec![C::identity(); table.len()];
    C::Curve::batch_normalize(&table, &mut table_affine);

    let nb_tasks = multicore::current_num_threads();
    let digits = partition_scalars(scalars, c, nb_tasks);

    let mut results = vec![C::Curve::identity(); scalars.len()];
    parallelize(&mut results, |chunk, offset| {
        for (i, p) in chunk.iter_mut().enumerate() {
            let digits = &digits[(offset + i) * nb_chunks..(offset + i + 1) * nb_chunks];
            let mut acc = C::Curve::identity();
            for (j, digit) in digits.iter().enumerate().rev() {
                if j != nb_chunks - 1 {
                    for _ in 0..c {
                        acc = acc.double();
                    }
                }
                match *digit {
                    0 => {}
                    d if d & 1 == 0 => acc += &table_affine[(d >> 1) as usize - 1],
                    d => acc -= &table_affine[(d >> 1) as usize],
                }
            }
            *p = acc;
        }
    });

    let mut out = vec![C::identity(); scalars.len()];
    C::Curve::batch_normalize(&results, &mut out);
    end_timer!(timer);
    out
}

fn msm_chunk<C: CurveAffine>(
    bases: &[C],
    digits: &[u32],
    nb_chunks: usize,
    chunk: usize,
    c: usize,
) -> C::Curve {
    let mut buckets = vec![C::Extended::identity(); 1 << (c - 1)];
    for (i, base) in bases.iter().enumerate() {
        match digits[i * nb_chunks + chunk] {
            0 => {}
            d if d & 1 == 0 => buckets[(d >> 1) as usize - 1].add_mixed(base),
            d => buckets[(d >> 1) as usize].sub_mixed(base),
        }
    }

    // Summation by parts
    // e.g. 3a + 2b + 1c = a +
    //                    (a) + b +
    //                    ((a) + b) + c
    let mut running_sum = C::Extended::identity();
    let mut sum = C::Extended::identity();
    for bucket in buckets.iter().rev() {
        running_sum.add_assign(bucket);
        sum.add_assign(&running_sum);
    }
    sum.to_curve()
}

/// Largest number of affine additions sharing one inversion.
const MAX_BATCH_SIZE: usize = 512;

fn affine_xy<C: CurveAffine>(p: &C) -> (C::Base, C::Base) {
    let coordinates = p.coordinates().unwrap_or(Coordinates::default());
    (coordinates.x, coordinates.y)
}

/// `acc[i] += points[i]` for every `i`, with a single field inversion for
/// the whole batch.
///
/// Both sides of every pair must be non-identity points with distinct `x`
/// coordinates, the chord slope is then always defined.
pub fn batch_add_affine<C: CurveAffine>(acc: &mut [C], points: &[C]) {
    debug_assert_eq!(acc.len(), points.len());
    let pairs: Vec<_> = acc
        .iter()
        .zip(points.iter())
        .map(|(r, p)| (affine_xy(r), affine_xy(p)))
        .collect();

    // 1 / (x2 - x1) for all pairs at once
    let mut inverses: Vec<C::Base> = pairs.iter().map(|((x1, _), (x2, _))| *x2 - x1).collect();
    inverses.iter_mut().batch_invert();

    for ((r, ((x1, y1), (x2, y2))), inv) in acc.iter_mut().zip(pairs).zip(inverses) {
        let lambda = (y2 - y1) * inv;
        let x3 = lambda.square() - x1 - x2;
        let y3 = lambda * (x1 - x3) - y1;
        *r = C::from_xy_unchecked(x3, y3);
    }
}

/// Pending affine additions into distinct buckets.
struct AffineBatch<C: CurveAffine> {
    indices: Vec<usize>,
    points: Vec<C>,
    pending: Vec<bool>,
    capacity: usize,
}

impl<C: CurveAffine> AffineBatch<C> {
    fn new(nb_buckets: usize) -> Self {
        let capacity = (nb_buckets / 8).clamp(1, MAX_BATCH_SIZE);
        Self {
            indices: Vec::with_capacity(capacity),
            points: Vec::with_capacity(capacity),
            pending: vec![false; nb_buckets],
            capacity,
        }
    }

    fn push(&mut self, buckets: &mut [C], idx: usize, point: C) {
        self.pending[idx] = true;
        self.indices.push(idx);
        self.points.push(point);
        if self.indices.len() == self.capacity {
            self.flush(buckets);
        }
    }

    fn flush(&mut self, buckets: &mut [C]) {
        if self.indices.is_empty() {
            return;
        }
        let mut acc: Vec<C> = self.indices.iter().map(|&i| buckets[i]).collect();
        batch_add_affine(&mut acc, &self.points);
        for (&i, sum) in self.indices.iter().zip(acc) {
            buckets[i] = sum;
            self.pending[i] = false;
        }
        self.indices.clear();
        self.points.clear();
    }
}

/// Same as [`msm_chunk`] with affine buckets. Additions the chord formula
/// cannot take (a bucket already pending in the batch, equal or opposite
/// `x`) go to an extended Jacobian bucket of the same index instead.
fn msm_chunk_batch_affine<C: CurveAffine>(
    bases: &[C],
    digits: &[u32],
    nb_chunks: usize,
    chunk: usize,
    c: usize,
) -> C::Curve {
    let nb_buckets = 1 << (c - 1);
    let mut buckets = vec![C::identity(); nb_buckets];
    let mut overflow = vec![C::Extended::identity(); nb_buckets];
    let mut batch = AffineBatch::new(nb_buckets);

    for (i, base) in bases.iter().enumerate() {
        let (idx, point) = match digits[i * nb_chunks + chunk] {
            0 => continue,
            d if d & 1 == 0 => ((d >> 1) as usize - 1, *base),
            d => ((d >> 1) as usize, -*base),
        };
        if bool::from(point.is_identity()) {
            continue;
        }
        if batch.pending[idx] {
            overflow[idx].add_mixed(&point);
        } else if bool::from(buckets[idx].is_identity()) {
            buckets[idx] = point;
        } else if affine_xy(&buckets[idx]).0 == affine_xy(&point).0 {
            overflow[idx].add_mixed(&point);
        } else {
            batch.push(&mut buckets, idx, point);
        }
    }
    batch.flush(&mut buckets);

    let mut running_sum = C::Extended::identity();
    let mut sum = C::Extended::identity();
    for (bucket, extra) in buckets.iter().zip(overflow.iter()).rev() {
        running_sum.add_mixed(bucket);
        running_sum.add_assign(extra);
        sum.add_assign(&running_sum);
    }
    sum.to_curve()
}

/// `Σ [scalars_i] bases_i` with the bucket method, windows are summed in
/// parallel by at most `config.nb_tasks` tasks.
pub fn multi_exp<C: CurveAffine>(
    bases: &[C],
    scalars: &[C::ScalarExt],
    config: &MsmConfig,
) -> Result<C::Curve, Error> {
    if bases.len() != scalars.len() {
        return Err(Error::LengthMismatch {
            bases: bases.len(),
            scalars: scalars.len(),
        });
    }
    let num_bits = C::ScalarExt::NUM_BITS as usize;
    let c = match config.window {
        Some(c) if (1..=MAX_WINDOW).contains(&c) => c,
        Some(c) => return Err(Error::InvalidWindow(c)),
        None => msm_window(num_bits, bases.len()),
    };
    if bases.is_empty() {
        return Ok(C::Curve::identity());
    }

    let nb_chunks = nb_chunks(num_bits, c);
    log::debug!(
        "multi_exp: {} terms, window {}, {} chunks",
        bases.len(),
        c,
        nb_chunks
    );
    let timer = start_timer!(|| format!("multi_exp of {} terms", bases.len()));

    let digits = partition_scalars(scalars, c, config.nb_tasks());

    // windows are split in at most `nb_tasks` contiguous ranges
    let mut chunk_sums = vec![C::Curve::identity(); nb_chunks];
    parallelize_with(&mut chunk_sums, config.nb_tasks(), |sums, offset| {
        for (i, sum) in sums.iter_mut().enumerate() {
            *sum = if config.batch_affine {
                msm_chunk_batch_affine(bases, &digits, nb_chunks, offset + i, c)
            } else {
                msm_chunk(bases, &digits, nb_chunks, offset + i, c)
            };
        }
    });

    let mut acc = C::Curve::identity();
    for (chunk, sum) in chunk_sums.iter().enumerate().rev() {
        if chunk != nb_chunks - 1 {
            for _ in 0..c {
                acc = acc.double();
            }
        }
        acc += sum;
    }
    end_timer!(timer);
    Ok(acc)
}

/// Plain double-and-add sum, used as a reference.
pub fn small_multiexp<C: CurveAffine>(coeffs: &[C::ScalarExt], bases: &[C]) -> C::Curve {
    let coeffs: Vec<_> = coeffs.iter().map(scalar_limbs).collect();
    let mut acc = C::Curve::identity();

    for bit in (0..256).rev() {
        acc = acc.double();
        for (coeff, base) in coeffs.iter().zip(bases.iter()) {
            if (coeff[bit / 64] >> (bit % 64)) & 1 == 1 {
                acc += base;
            }
        }
    }
    acc
}
