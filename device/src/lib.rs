//! Device-side collaborators of the kernel runtime.
//!
//! - [`Buffer`] / [`Allocator`]: typed, shaped device memory
//! - [`Stream`]: ordered command submission with an "active stream" slot
//! - [`LaunchConfig`]: grid/block extents plus the stream to launch on
//! - [`Compiler`] / [`Module`] / [`Function`]: the module-compiler boundary
//!
//! Backends implement these traits; the runtime only talks to the traits.

pub mod allocator;
pub mod buffer;
pub mod error;
pub mod launch;
pub mod program;
pub mod stream;


pub use allocator::{Allocator, BufferOptions, HostAllocator, RawBuffer};
pub use buffer::Buffer;
pub use error::*;
pub use launch::{Extent, LaunchConfig};
pub use program::{CompileOptions, Compiler, Function, KernelArg, Module};
pub use stream::{HostStream, Stream};

#[cfg(feature = "cuda")]
pub use allocator::CudaAllocator;
#[cfg(feature = "cuda")]
pub use stream::CudaStream;
