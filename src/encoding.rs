use core::ops::{Deref, DerefMut};

/// Fixed width byte string used as `PrimeField::Repr` and as the compressed
/// encoding of curve points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Repr<const T: usize>([u8; T]);

impl<const T: usize> Repr<T> {
    pub fn inner(&self) -> &[u8; T] {
        &self.0
    }
}

impl<const T: usize> Default for Repr<T> {
    fn default() -> Self {
        Self([0u8; T])
    }
}

impl<const T: usize> From<[u8; T]> for Repr<T> {
    fn from(bytes: [u8; T]) -> Self {
        Self(bytes)
    }
}

impl<const T: usize> From<Repr<T>> for [u8; T] {
    fn from(repr: Repr<T>) -> Self {
        repr.0
    }
}

impl<'a, const T: usize> TryFrom<&'a [u8]> for Repr<T> {
    type Error = core::array::TryFromSliceError;

    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        Ok(Self(bytes.try_into()?))
    }
}

impl<const T: usize> AsRef<[u8]> for Repr<T> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const T: usize> AsMut<[u8]> for Repr<T> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const T: usize> Deref for Repr<T> {
    type Target = [u8; T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const T: usize> DerefMut for Repr<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

pub mod endian {
    /// Byte order of a field element's canonical encoding.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Endian {
        LE,
        BE,
    }

    impl Endian {
        /// Writes little endian `limbs` into `res`, which must hold
        /// `8 * limbs.len()` bytes.
        pub fn to_bytes(&self, res: &mut [u8], limbs: &[u64]) {
            debug_assert_eq!(res.len(), limbs.len() * 8);
            match self {
                Endian::LE => limbs
                    .iter()
                    .zip(res.chunks_mut(8))
                    .for_each(|(limb, chunk)| chunk.copy_from_slice(&limb.to_le_bytes())),
                Endian::BE => limbs
                    .iter()
                    .rev()
                    .zip(res.chunks_mut(8))
                    .for_each(|(limb, chunk)| chunk.copy_from_slice(&limb.to_be_bytes())),
            }
        }

        /// Reads `bytes` into little endian `limbs`.
        pub fn from_bytes(&self, bytes: &[u8], limbs: &mut [u64]) {
            debug_assert_eq!(bytes.len(), limbs.len() * 8);
            let read = |chunk: &[u8], be: bool| {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(chunk);
                if be {
                    u64::from_be_bytes(buf)
                } else {
                    u64::from_le_bytes(buf)
                }
            };
            match self {
                Endian::LE => limbs
                    .iter_mut()
                    .zip(bytes.chunks(8))
                    .for_each(|(limb, chunk)| *limb = read(chunk, false)),
                Endian::BE => limbs
                    .iter_mut()
                    .rev()
                    .zip(bytes.chunks(8))
                    .for_each(|(limb, chunk)| *limb = read(chunk, true)),
            }
        }

        /// Index of the most significant byte in an encoding of `size` bytes.
        pub const fn msb_index(&self, size: usize) -> usize {
            match self {
                Endian::LE => size - 1,
                Endian::BE => 0,
            }
        }
    }
}
