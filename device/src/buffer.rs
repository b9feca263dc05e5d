use std::sync::Arc;

use sigkern_dtype::{Element, ElementType};
use smallvec::SmallVec;
use snafu::ensure;
#[cfg(feature = "cuda")]
use snafu::ResultExt;

use crate::allocator::{Allocator, BufferOptions, RawBuffer};
use crate::error::{DTypeMismatchSnafu, Result, SizeMismatchSnafu};

#[cfg(feature = "cuda")]
use crate::error::CudaSnafu;

/// Shaped, typed device memory owned by the caller.
#[derive(Debug)]
pub struct Buffer {
    raw: RawBuffer,
    allocator: Arc<dyn Allocator>,
    dtype: ElementType,
    /// Shape of the array (stack-allocated for 0-4D).
    shape: SmallVec<[usize; 4]>,
}

impl Buffer {
    /// Allocate a buffer of `dtype` elements with the given shape.
    pub fn allocate(
        allocator: Arc<dyn Allocator>,
        dtype: ElementType,
        shape: &[usize],
        options: BufferOptions,
    ) -> Result<Self> {
        let size = dtype.bytes() * shape.iter().product::<usize>();
        let raw = allocator.alloc(size, &options)?;
        Ok(Self { raw, allocator, dtype, shape: SmallVec::from_slice(shape) })
    }

    /// Allocate a zero-filled buffer with this buffer's shape, dtype and allocator.
    pub fn zeros_like(&self) -> Result<Self> {
        Self::allocate(Arc::clone(&self.allocator), self.dtype, &self.shape, BufferOptions { zero_init: true })
    }

    /// Allocate a 1-D buffer holding a copy of `values`.
    pub fn from_slice<T: Element>(allocator: Arc<dyn Allocator>, values: &[T]) -> Result<Self> {
        let buffer = Self::allocate(allocator, T::DTYPE, &[values.len()], BufferOptions::default())?;
        buffer.copyin(bytemuck::cast_slice(values))?;
        Ok(buffer)
    }

    /// Copy the contents out as host values.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        ensure!(T::DTYPE == self.dtype, DTypeMismatchSnafu { expected: self.dtype, actual: T::DTYPE });
        let mut bytes = vec![0u8; self.size()];
        self.copyout(&mut bytes)?;
        Ok(bytemuck::pod_collect_to_vec(&bytes))
    }

    /// Copy data from host memory into this buffer.
    pub fn copyin(&self, src: &[u8]) -> Result<()> {
        let expected = self.size();
        let actual = src.len();
        ensure!(expected == actual, SizeMismatchSnafu { expected, actual });

        match &self.raw {
            RawBuffer::Host { data } => {
                data.borrow_mut().copy_from_slice(src);
                Ok(())
            }
            #[cfg(feature = "cuda")]
            RawBuffer::Cuda { data, stream } => stream.memcpy_htod(src, &mut *data.borrow_mut()).context(CudaSnafu),
        }
    }

    /// Copy data from this buffer to host memory.
    ///
    /// Device copies are ordered after pending work on the buffer's stream.
    pub fn copyout(&self, dst: &mut [u8]) -> Result<()> {
        let expected = self.size();
        let actual = dst.len();
        ensure!(expected == actual, SizeMismatchSnafu { expected, actual });

        match &self.raw {
            RawBuffer::Host { data } => {
                dst.copy_from_slice(&data.borrow());
                Ok(())
            }
            #[cfg(feature = "cuda")]
            RawBuffer::Cuda { data, stream } => {
                stream.memcpy_dtoh(&*data.borrow(), dst).context(CudaSnafu)?;
                stream.synchronize().context(CudaSnafu)
            }
        }
    }

    pub fn dtype(&self) -> ElementType {
        self.dtype
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Extent of the leading axis (0 for a scalar).
    pub fn len(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.raw.size()
    }

    pub fn raw(&self) -> &RawBuffer {
        &self.raw
    }

    pub fn allocator(&self) -> &dyn Allocator {
        &*self.allocator
    }
}
