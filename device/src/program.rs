//! Module-compiler boundary.
//!
//! A [`Compiler`] turns kernel source into a [`Module`]; a module hands out
//! named [`Function`]s that can be launched with a [`LaunchConfig`].

use std::sync::Arc;

use crate::buffer::Buffer;
use crate::error::Result;
use crate::launch::LaunchConfig;

/// Flags and include paths passed to the compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub flags: Vec<String>,
    pub include_paths: Vec<String>,
}

/// Transforms kernel source into a loaded module.
///
/// Backends: NVRTC (CUDA C++ → PTX → module), host reference kernels.
pub trait Compiler: Send + Sync + std::fmt::Debug {
    fn compile(&self, src: &str, options: &CompileOptions) -> Result<Arc<dyn Module>>;

    /// Backend name, matching [`crate::Allocator::name`].
    fn backend(&self) -> &str;
}

/// A compiled module holding one or more entry points.
pub trait Module: Send + Sync + std::fmt::Debug {
    fn function(&self, name: &str) -> Result<Arc<dyn Function>>;
}

/// One kernel argument.
#[derive(Debug, Clone, Copy)]
pub enum KernelArg<'a> {
    I32(i32),
    /// A buffer the kernel only reads.
    Buffer(&'a Buffer),
    /// A buffer the kernel writes. Backends order later work on the buffer
    /// after the launch.
    BufferMut(&'a Buffer),
}

/// A loaded, invocable entry point.
pub trait Function: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Launch the function.
    ///
    /// On asynchronous backends this returns once the launch is queued on
    /// `launch.stream`.
    ///
    /// # Safety
    ///
    /// `args` must match the kernel's parameter list in order and type, and
    /// every buffer must be large enough for the indices the kernel touches.
    unsafe fn launch(&self, launch: &LaunchConfig, args: &[KernelArg<'_>]) -> Result<()>;
}
