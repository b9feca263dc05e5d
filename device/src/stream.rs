//! Execution streams.
//!
//! A stream orders the work submitted to it. [`use_stream`] makes a stream
//! the active one for the calling thread; device work issued afterwards on
//! that thread defaults to it until another stream is made active.

use std::any::Any;
use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[cfg(feature = "cuda")]
use snafu::ResultExt;

use crate::error::Result;

#[cfg(feature = "cuda")]
use crate::error::CudaSnafu;

pub trait Stream: Send + Sync + std::fmt::Debug {
    /// Bind whatever device state this stream needs to the calling thread.
    fn make_active(&self) -> Result<()>;

    /// Block until all work submitted to this stream has completed.
    fn synchronize(&self) -> Result<()>;

    /// Backend name, matching [`crate::Allocator::name`].
    fn backend(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

thread_local! {
    static ACTIVE: RefCell<Option<Arc<dyn Stream>>> = const { RefCell::new(None) };
}

/// Make `stream` the active stream of the calling thread.
pub fn use_stream(stream: &Arc<dyn Stream>) -> Result<()> {
    stream.make_active()?;
    ACTIVE.with(|active| *active.borrow_mut() = Some(Arc::clone(stream)));
    Ok(())
}

/// The stream most recently activated on this thread.
pub fn active_stream() -> Option<Arc<dyn Stream>> {
    ACTIVE.with(|active| active.borrow().clone())
}

static NEXT_HOST_STREAM: AtomicU64 = AtomicU64::new(0);

/// Stream for the host backend.
///
/// Host launches complete before they return, so synchronizing only counts.
#[derive(Debug)]
pub struct HostStream {
    id: u64,
    synchronizations: AtomicUsize,
}

impl HostStream {
    pub fn new() -> Self {
        Self { id: NEXT_HOST_STREAM.fetch_add(1, Ordering::Relaxed), synchronizations: AtomicUsize::new(0) }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Number of completed `synchronize` calls.
    pub fn synchronizations(&self) -> usize {
        self.synchronizations.load(Ordering::Relaxed)
    }
}

impl Default for HostStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for HostStream {
    fn make_active(&self) -> Result<()> {
        tracing::trace!(stream.id = self.id, "host stream active");
        Ok(())
    }

    fn synchronize(&self) -> Result<()> {
        self.synchronizations.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn backend(&self) -> &str {
        "HOST"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A CUDA stream on one device context.
#[cfg(feature = "cuda")]
#[derive(Debug)]
pub struct CudaStream {
    stream: Arc<cudarc::driver::CudaStream>,
}

#[cfg(feature = "cuda")]
impl CudaStream {
    /// Create a new non-default stream on device `device_id`.
    pub fn new(device_id: usize) -> Result<Self> {
        let context = cudarc::driver::CudaContext::new(device_id).context(CudaSnafu)?;
        let stream = context.new_stream().context(CudaSnafu)?;
        Ok(Self { stream })
    }

    pub fn from_raw(stream: Arc<cudarc::driver::CudaStream>) -> Self {
        Self { stream }
    }

    pub fn inner(&self) -> &Arc<cudarc::driver::CudaStream> {
        &self.stream
    }

    /// Allocator placing buffers on this stream's device.
    pub fn allocator(&self) -> crate::CudaAllocator {
        crate::CudaAllocator::new(Arc::clone(&self.stream))
    }
}

#[cfg(feature = "cuda")]
impl Stream for CudaStream {
    fn make_active(&self) -> Result<()> {
        self.stream.context().bind_to_thread().context(CudaSnafu)
    }

    fn synchronize(&self) -> Result<()> {
        self.stream.synchronize().context(CudaSnafu)
    }

    fn backend(&self) -> &str {
        "CUDA"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
