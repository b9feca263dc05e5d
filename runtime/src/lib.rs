//! JIT compilation, caching and launch of sigkern kernels.
//!
//! A [`KernelContext`] turns `(ElementType, OperationKind)` requests into
//! compiled, cached kernels. Sources come from `sigkern-codegen`; the
//! compiler, buffers and streams are `sigkern-device` traits with two
//! backends here:
//!
//! - [`devices::host`]: reference kernels executed on the CPU (default)
//! - [`devices::cuda`]: NVRTC on a CUDA device (feature `cuda`)
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use sigkern_device::{Buffer, HostAllocator, HostStream, Stream};
//! use sigkern_runtime::{KernelContext, RuntimeConfig, lfilter};
//!
//! let ctx = KernelContext::from_config(&RuntimeConfig::default())?;
//! let alloc = Arc::new(HostAllocator);
//! let b = Buffer::from_slice(alloc.clone(), &[1.0f64])?;
//! let a = Buffer::from_slice(alloc.clone(), &[1.0f64, -0.5])?;
//! let x = Buffer::from_slice(alloc, &[1.0f64, 0.0, 0.0, 0.0])?;
//! let y = lfilter(&ctx, &b, &a, &x, Arc::new(HostStream::new()), true)?;
//! assert_eq!(y.to_vec::<f64>()?, [1.0, 0.5, 0.25, 0.125]);
//! ```

pub mod config;
pub mod context;
pub mod devices;
pub mod error;
pub mod filter;
pub mod invoker;
pub mod kernel_cache;


pub use config::{Backend, FAST_MATH_FLAG, LANGUAGE_STANDARD_FLAG, RuntimeConfig};
pub use context::{KernelContext, global, init_global};
pub use error::*;
pub use filter::lfilter;
pub use invoker::KernelInvoker;
pub use kernel_cache::*;

/// Precompile kernels on the process-wide context.
///
/// See [`KernelContext::precompile_kernels`].
pub fn precompile_kernels(op_name: Option<&str>, types: Option<&[sigkern_dtype::ElementType]>) -> Result<()> {
    global()?.precompile_kernels(op_name, types)
}
