pub use maybe_rayon::{
    MaybeIntoParIter, MaybeParChunks, MaybeParChunksMut, MaybeParIter, MaybeParIterMut,
};

#[cfg(feature = "multicore")]
pub use rayon::{
    current_num_threads,
    iter::{IndexedParallelIterator, ParallelIterator},
};

#[cfg(not(feature = "multicore"))]
pub fn current_num_threads() -> usize {
    1
}
