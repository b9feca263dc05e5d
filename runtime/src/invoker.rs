//! Binding of a compiled kernel to a launch configuration.

use std::sync::Arc;

use sigkern_device::stream::use_stream;
use sigkern_device::{Buffer, DTypeMismatchSnafu, Extent, KernelArg, LaunchConfig, ShapeMismatchSnafu, Stream};
use snafu::{ResultExt, ensure};
use tracing::debug;

use crate::error::{DeviceSnafu, InvalidArgumentSnafu, Result};
use crate::kernel_cache::CachedKernel;

/// A cached kernel plus the grid, block and stream it launches with.
///
/// Reusable: every [`call`](Self::call) derives lengths from the buffers it
/// is given.
#[derive(Debug, Clone)]
pub struct KernelInvoker {
    launch: LaunchConfig,
    kernel: Arc<CachedKernel>,
}

impl KernelInvoker {
    /// Scalars for `grid` or `block` become one-dimensional extents.
    pub fn new(
        grid: impl Into<Extent>,
        block: impl Into<Extent>,
        stream: Arc<dyn Stream>,
        kernel: Arc<CachedKernel>,
    ) -> Self {
        Self::from_launch(LaunchConfig::new(grid, block, stream), kernel)
    }

    pub fn from_launch(launch: LaunchConfig, kernel: Arc<CachedKernel>) -> Self {
        Self { launch, kernel }
    }

    pub fn launch_config(&self) -> &LaunchConfig {
        &self.launch
    }

    pub fn kernel(&self) -> &Arc<CachedKernel> {
        &self.kernel
    }

    /// Run the recursive filter kernel: `out = lfilter(b, a, x)`.
    ///
    /// Makes the invoker's stream active, then launches with
    /// `(x_len, a_len, b_len, x, a, b, out)`. Returns once the launch is
    /// queued; synchronize the stream to wait for `out`.
    pub fn call(&self, b: &Buffer, a: &Buffer, x: &Buffer, out: &Buffer) -> Result<()> {
        self.check_buffers(b, a, x, out).context(DeviceSnafu)?;
        ensure!(!a.is_empty(), InvalidArgumentSnafu { reason: "denominator coefficients must not be empty" });

        let x_len = to_i32(x.len(), "x")?;
        let a_len = to_i32(a.len(), "a")?;
        let b_len = to_i32(b.len(), "b")?;

        use_stream(&self.launch.stream).context(DeviceSnafu)?;
        debug!(
            kernel.op = %self.kernel.op,
            kernel.dtype = %self.kernel.dtype,
            kernel.entry_point = self.kernel.entry_point,
            x.len = x_len,
            a.len = a_len,
            b.len = b_len,
            "launching kernel"
        );

        let args = [
            KernelArg::I32(x_len),
            KernelArg::I32(a_len),
            KernelArg::I32(b_len),
            KernelArg::Buffer(x),
            KernelArg::Buffer(a),
            KernelArg::Buffer(b),
            KernelArg::BufferMut(out),
        ];
        // SAFETY: argument list matches the lfilter entry point, and every
        // buffer holds at least the length passed for it.
        unsafe { self.kernel.function.launch(&self.launch, &args) }.context(DeviceSnafu)
    }

    fn check_buffers(&self, b: &Buffer, a: &Buffer, x: &Buffer, out: &Buffer) -> sigkern_device::Result<()> {
        let expected = self.kernel.dtype;
        for buffer in [b, a, x, out] {
            ensure!(buffer.dtype() == expected, DTypeMismatchSnafu { expected, actual: buffer.dtype() });
        }
        ensure!(out.len() == x.len(), ShapeMismatchSnafu { expected: x.shape().to_vec(), actual: out.shape().to_vec() });
        Ok(())
    }
}

fn to_i32(len: usize, name: &str) -> Result<i32> {
    i32::try_from(len).map_err(|_| {
        InvalidArgumentSnafu { reason: format!("{name} has {len} elements, more than a kernel index can address") }
            .build()
    })
}
