//! Bounds-checked byte blocks backing class and instance state.
//!
//! Class data and instance data are raw byte blocks sized by the type
//! descriptors. A descendant's block starts with its ancestor's layout, so
//! an ancestor reads its fields at the same offsets in every descendant.
//! All scalar accesses are little-endian and bounds-checked.

use std::ops::Range;

use crate::{ObjectError, ObjectResult};

/// A fixed-width value that can live inside a [`DataBlock`].
pub trait Scalar: Copy {
    /// Width in bytes.
    const SIZE: usize;

    /// Decode from exactly `SIZE` little-endian bytes.
    fn read_le(bytes: &[u8]) -> Self;

    /// Encode into exactly `SIZE` little-endian bytes.
    fn write_le(self, bytes: &mut [u8]);
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const SIZE: usize = ::std::mem::size_of::<$ty>();

                #[inline]
                fn read_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; ::std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }

                #[inline]
                fn write_le(self, bytes: &mut [u8]) {
                    bytes.copy_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_scalar!(u8, u16, u32, u64, i8, i16, i32, i64);

/// A zero-initialized, fixed-size byte block.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct DataBlock {
    bytes: Box<[u8]>,
}

impl DataBlock {
    /// Allocate a zeroed block of `size` bytes.
    pub fn zeroed(size: usize) -> Self {
        DataBlock {
            bytes: vec![0u8; size].into_boxed_slice(),
        }
    }

    /// Allocate a block of `size` bytes starting with a copy of `prefix`.
    ///
    /// `prefix` must not be longer than `size`; the resolver validates sizes
    /// before any block is built, so a longer prefix is truncated.
    pub fn with_prefix(size: usize, prefix: &DataBlock) -> Self {
        let mut block = Self::zeroed(size);
        let n = prefix.len().min(size);
        block.bytes[..n].copy_from_slice(&prefix.bytes[..n]);
        block
    }

    /// Size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the block has no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The whole block.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read a scalar at `offset`.
    pub fn read<T: Scalar>(&self, offset: usize) -> ObjectResult<T> {
        let range = self.checked(offset, T::SIZE, 0..self.len())?;
        Ok(T::read_le(&self.bytes[range]))
    }

    /// Write a scalar at `offset`.
    pub fn write<T: Scalar>(&mut self, offset: usize, value: T) -> ObjectResult<()> {
        let range = self.checked(offset, T::SIZE, 0..self.len())?;
        value.write_le(&mut self.bytes[range]);
        Ok(())
    }

    /// Borrow `len` bytes at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> ObjectResult<&[u8]> {
        let range = self.checked(offset, len, 0..self.len())?;
        Ok(&self.bytes[range])
    }

    /// Mutably borrow `len` bytes at `offset`.
    pub fn bytes_mut(&mut self, offset: usize, len: usize) -> ObjectResult<&mut [u8]> {
        let range = self.checked(offset, len, 0..self.len())?;
        Ok(&mut self.bytes[range])
    }

    /// Validate that `offset..offset + len` lies inside both `allowed` and
    /// the block itself.
    pub(crate) fn checked(
        &self,
        offset: usize,
        len: usize,
        allowed: Range<usize>,
    ) -> ObjectResult<Range<usize>> {
        let end = offset.checked_add(len);
        let limit = allowed.end.min(self.len());
        match end {
            Some(end) if offset >= allowed.start && end <= limit => Ok(offset..end),
            _ => Err(ObjectError::FieldOutOfBounds {
                offset,
                len,
                start: allowed.start,
                end: limit,
            }),
        }
    }
}

impl std::fmt::Debug for DataBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DataBlock({} bytes)", self.len())
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
