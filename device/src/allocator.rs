use std::cell::RefCell;
#[cfg(feature = "cuda")]
use std::sync::Arc;

#[cfg(feature = "cuda")]
use cudarc::driver::CudaSlice;
#[cfg(feature = "cuda")]
use snafu::ResultExt;

use crate::error::Result;

#[cfg(feature = "cuda")]
use crate::error::CudaSnafu;

/// Opaque handle to device memory.
///
/// Uses `RefCell` for interior mutability with runtime borrow checking, so a
/// kernel can write an output buffer reached through a shared reference.
#[derive(Debug)]
pub enum RawBuffer {
    Host {
        data: RefCell<Box<[u8]>>,
    },
    #[cfg(feature = "cuda")]
    Cuda {
        data: RefCell<CudaSlice<u8>>,
        stream: Arc<cudarc::driver::CudaStream>,
    },
}

impl RawBuffer {
    /// Get the size of the buffer in bytes.
    pub fn size(&self) -> usize {
        match self {
            RawBuffer::Host { data } => data.borrow().len(),
            #[cfg(feature = "cuda")]
            RawBuffer::Cuda { data, .. } => data.borrow().len(),
        }
    }

    /// Backend name, matching [`Allocator::name`].
    pub fn backend(&self) -> &'static str {
        match self {
            RawBuffer::Host { .. } => "HOST",
            #[cfg(feature = "cuda")]
            RawBuffer::Cuda { .. } => "CUDA",
        }
    }
}

/// Options for buffer allocation.
#[derive(Debug, Clone, Default)]
pub struct BufferOptions {
    /// Whether to zero-initialize the buffer.
    pub zero_init: bool,
}

pub trait Allocator: Send + Sync + std::fmt::Debug {
    fn alloc(&self, size: usize, options: &BufferOptions) -> Result<RawBuffer>;
    fn name(&self) -> &str;
}

/// Host allocator using system memory. Host memory is always zeroed.
#[derive(Debug, Clone, Default)]
pub struct HostAllocator;

impl Allocator for HostAllocator {
    fn alloc(&self, size: usize, _options: &BufferOptions) -> Result<RawBuffer> {
        let data = vec![0u8; size].into_boxed_slice();
        Ok(RawBuffer::Host { data: RefCell::new(data) })
    }

    fn name(&self) -> &str {
        "HOST"
    }
}

/// CUDA allocator placing buffers on one stream's device.
#[cfg(feature = "cuda")]
#[derive(Debug, Clone)]
pub struct CudaAllocator {
    stream: Arc<cudarc::driver::CudaStream>,
}

#[cfg(feature = "cuda")]
impl CudaAllocator {
    pub fn new(stream: Arc<cudarc::driver::CudaStream>) -> Self {
        Self { stream }
    }
}

#[cfg(feature = "cuda")]
impl Allocator for CudaAllocator {
    fn alloc(&self, size: usize, options: &BufferOptions) -> Result<RawBuffer> {
        let data = if options.zero_init {
            self.stream.alloc_zeros::<u8>(size).context(CudaSnafu)?
        } else {
            // SAFETY: contents are never read before a copy or kernel writes them.
            unsafe { self.stream.alloc::<u8>(size) }.context(CudaSnafu)?
        };
        Ok(RawBuffer::Cuda { data: RefCell::new(data), stream: Arc::clone(&self.stream) })
    }

    fn name(&self) -> &str {
        "CUDA"
    }
}
