//! Compiler backends.

pub mod host;

#[cfg(feature = "cuda")]
pub mod cuda;

pub use host::HostCompiler;

#[cfg(feature = "cuda")]
pub use cuda::NvrtcCompiler;
