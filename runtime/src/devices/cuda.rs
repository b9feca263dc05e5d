//! NVRTC backend.
//!
//! Compiles rendered CUDA C++ to PTX with NVRTC, loads it into a device
//! context and launches entry points on [`CudaStream`]s.

use std::cell::{Ref, RefMut};
use std::sync::Arc;

use cudarc::driver::{CudaContext, CudaFunction, CudaModule, CudaSlice, PushKernelArg};
use cudarc::nvrtc::{self, Ptx};
use sigkern_device::{
    BackendMismatchSnafu, Buffer, CompilationSnafu, CompileOptions, Compiler, CudaSnafu, CudaStream, ExecutionSnafu,
    Function, FunctionNotFoundSnafu, KernelArg, LaunchConfig, Module, RawBuffer, Result,
};
use snafu::{OptionExt, ResultExt};

/// Compiler producing modules on one CUDA device.
#[derive(Debug)]
pub struct NvrtcCompiler {
    context: Arc<CudaContext>,
}

impl NvrtcCompiler {
    pub fn new(device_id: usize) -> Result<Self> {
        let context = CudaContext::new(device_id).context(CudaSnafu)?;
        Ok(Self { context })
    }

    pub fn from_context(context: Arc<CudaContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Arc<CudaContext> {
        &self.context
    }

    fn compile_ptx(src: &str, options: &CompileOptions) -> Result<Ptx> {
        let opts = nvrtc::CompileOptions {
            options: options.flags.clone(),
            include_paths: options.include_paths.clone(),
            ..Default::default()
        };
        nvrtc::compile_ptx_with_opts(src, opts)
            .map_err(|e| CompilationSnafu { reason: format!("NVRTC compilation failed: {e:?}") }.build())
    }
}

impl Compiler for NvrtcCompiler {
    fn compile(&self, src: &str, options: &CompileOptions) -> Result<Arc<dyn Module>> {
        let ptx = Self::compile_ptx(src, options)?;
        let module = self.context.load_module(ptx).context(CudaSnafu)?;
        tracing::debug!(device.ordinal = self.context.ordinal(), "NVRTC module loaded");
        Ok(Arc::new(NvrtcModule { module }))
    }

    fn backend(&self) -> &str {
        "CUDA"
    }
}

#[derive(Debug)]
struct NvrtcModule {
    module: Arc<CudaModule>,
}

impl Module for NvrtcModule {
    fn function(&self, name: &str) -> Result<Arc<dyn Function>> {
        let function = self.module.load_function(name).map_err(|_| FunctionNotFoundSnafu { name }.build())?;
        Ok(Arc::new(CudaKernel { name: name.to_string(), function }))
    }
}

#[derive(Debug)]
struct CudaKernel {
    name: String,
    function: CudaFunction,
}

// SAFETY: CudaFunction is a handle into a module owned by a CudaContext,
// which cudarc shares across threads.
unsafe impl Send for CudaKernel {}
unsafe impl Sync for CudaKernel {}

impl Function for CudaKernel {
    fn name(&self) -> &str {
        &self.name
    }

    unsafe fn launch(&self, launch: &LaunchConfig, args: &[KernelArg<'_>]) -> Result<()> {
        let stream = launch.stream.as_any().downcast_ref::<CudaStream>().context(BackendMismatchSnafu {
            expected: "CUDA",
            actual: launch.stream.backend(),
        })?;
        let cfg = cudarc::driver::LaunchConfig {
            grid_dim: launch.grid.to_dim3()?,
            block_dim: launch.block.to_dim3()?,
            shared_mem_bytes: 0,
        };

        // Arguments must outlive the builder, so borrow everything up front.
        let scalars: Vec<i32> = args
            .iter()
            .filter_map(|arg| match arg {
                KernelArg::I32(value) => Some(*value),
                KernelArg::Buffer(_) | KernelArg::BufferMut(_) => None,
            })
            .collect();
        let mut slices = args
            .iter()
            .filter_map(|arg| match arg {
                KernelArg::Buffer(buffer) => Some(borrow_slice(buffer, false)),
                KernelArg::BufferMut(buffer) => Some(borrow_slice(buffer, true)),
                KernelArg::I32(_) => None,
            })
            .collect::<Result<Vec<_>>>()?;

        let mut scalar = scalars.iter();
        let mut slice = slices.iter_mut();
        let mut builder = stream.inner().launch_builder(&self.function);
        for arg in args {
            match arg {
                KernelArg::I32(_) => {
                    if let Some(value) = scalar.next() {
                        builder.arg(value);
                    }
                }
                KernelArg::Buffer(_) | KernelArg::BufferMut(_) => match slice.next() {
                    Some(SliceBorrow::Read(data)) => {
                        builder.arg(&**data);
                    }
                    Some(SliceBorrow::Write(data)) => {
                        builder.arg(&mut **data);
                    }
                    None => {}
                },
            }
        }

        tracing::debug!(kernel.entry_point = %self.name, grid = ?cfg.grid_dim, block = ?cfg.block_dim, "CUDA launch");
        // SAFETY: argument order and types are the caller's contract (see `Function::launch`).
        unsafe { builder.launch(cfg) }.context(CudaSnafu)?;
        Ok(())
    }
}

/// A device slice borrowed for one launch.
enum SliceBorrow<'b> {
    Read(Ref<'b, CudaSlice<u8>>),
    /// Pushed as `&mut` so cudarc orders later work on the slice after the kernel.
    Write(RefMut<'b, CudaSlice<u8>>),
}

fn borrow_slice(buffer: &Buffer, write: bool) -> Result<SliceBorrow<'_>> {
    let RawBuffer::Cuda { data, .. } = buffer.raw() else {
        return BackendMismatchSnafu { expected: "CUDA", actual: buffer.raw().backend() }.fail();
    };
    if write {
        let data = data.try_borrow_mut().map_err(|_| {
            ExecutionSnafu { reason: "output buffer is also passed as another kernel argument" }.build()
        })?;
        Ok(SliceBorrow::Write(data))
    } else {
        let data = data
            .try_borrow()
            .map_err(|_| ExecutionSnafu { reason: "input buffer is also the kernel's output" }.build())?;
        Ok(SliceBorrow::Read(data))
    }
}
