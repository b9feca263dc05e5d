//! Compilation manager.
//!
//! A [`KernelContext`] owns a compiler, the compile options derived from
//! configuration and a [`KernelCache`]. Callers pass it by reference; the
//! process-wide instance behind [`global`] is opt-in.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use sigkern_codegen::{OperationKind, render_kernel, scalar_spelling, supported_types};
use sigkern_device::{CompileOptions, Compiler, LaunchConfig};
use sigkern_dtype::ElementType;
use snafu::{OptionExt, ResultExt, ensure};
use strum::VariantArray;
use tracing::{debug, trace};

use crate::config::{Backend, RuntimeConfig};
use crate::devices::HostCompiler;
use crate::error::*;
use crate::invoker::KernelInvoker;
use crate::kernel_cache::{CachedKernel, KernelCache};

#[derive(Debug)]
pub struct KernelContext {
    compiler: Arc<dyn Compiler>,
    cache: KernelCache,
    options: CompileOptions,
    complex_header: String,
}

impl KernelContext {
    /// Create a context with an empty cache around `compiler`.
    pub fn new(compiler: Arc<dyn Compiler>, config: &RuntimeConfig) -> Self {
        Self {
            compiler,
            cache: KernelCache::new(),
            options: config.compile_options(),
            complex_header: config.complex_header.clone(),
        }
    }

    /// Create a context with the compiler `config.backend` names.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let compiler: Arc<dyn Compiler> = match config.backend {
            Backend::Host => Arc::new(HostCompiler::new()),
            #[cfg(feature = "cuda")]
            Backend::Cuda { device_id } => {
                Arc::new(crate::devices::NvrtcCompiler::new(device_id).context(DeviceSnafu)?)
            }
            #[cfg(not(feature = "cuda"))]
            Backend::Cuda { device_id } => {
                return ConfigSnafu { reason: format!("cuda:{device_id} requested but built without the `cuda` feature") }
                    .fail();
            }
        };
        debug!(backend = compiler.backend(), "kernel context created");
        Ok(Self::new(compiler, config))
    }

    pub fn cache(&self) -> &KernelCache {
        &self.cache
    }

    pub fn compiler(&self) -> &Arc<dyn Compiler> {
        &self.compiler
    }

    pub fn compile_options(&self) -> &CompileOptions {
        &self.options
    }

    /// Return the compiled kernel for `(dtype, op)`, compiling it on first use.
    ///
    /// A cache hit never reaches the compiler. On a miss the source is
    /// rendered with the type's scalar spelling, compiled, and its entry point
    /// loaded; only then is the kernel cached.
    #[tracing::instrument(skip_all, fields(kernel.op = %op, kernel.dtype = %dtype))]
    pub fn ensure_compiled(&self, dtype: ElementType, op: OperationKind) -> Result<Arc<CachedKernel>> {
        if let Some(kernel) = self.cache.get(dtype, op) {
            trace!("kernel cache hit");
            return Ok(kernel);
        }

        let rendered = render_kernel(op, dtype, &self.complex_header)?;
        self.cache.get_or_compile(dtype, op, move || {
            debug!(kernel.entry_point = rendered.entry_point, src.len = rendered.code.len(), "compiling kernel");
            let module = self.compiler.compile(&rendered.code, &self.options).context(DeviceSnafu)?;
            let function = module.function(rendered.entry_point).context(DeviceSnafu)?;
            debug!(kernel.entry_point = rendered.entry_point, "kernel compiled");

            Ok(CachedKernel {
                function,
                op,
                dtype,
                code: rendered.code,
                entry_point: rendered.entry_point,
            })
        })
    }

    /// Compile every requested `(op, type)` pair.
    ///
    /// Empty `ops` means every operation; empty `types` means each
    /// operation's own supported types. Each type is checked against the
    /// operation's support set before compiling. Stops at the first failure;
    /// kernels compiled before it stay cached.
    pub fn validate_and_precompile(&self, ops: &[OperationKind], types: &[ElementType]) -> Result<()> {
        let ops = if ops.is_empty() { OperationKind::VARIANTS } else { ops };
        debug!(ops = ?ops, types = ?types, "precompiling kernels");

        for &op in ops {
            let op_types: Vec<ElementType> = if types.is_empty() {
                supported_types(op)?.iter().map(|(dtype, _)| *dtype).collect()
            } else {
                types.to_vec()
            };

            for dtype in op_types {
                scalar_spelling(op, dtype)?;
                self.ensure_compiled(dtype, op)?;
            }
        }
        Ok(())
    }

    /// Precompile kernels by operation name.
    ///
    /// `None` selects every operation and `types = None` each operation's
    /// supported types. The name is matched case-insensitively and rejected
    /// before the cache is touched.
    pub fn precompile_kernels(&self, op_name: Option<&str>, types: Option<&[ElementType]>) -> Result<()> {
        let ops = match op_name {
            Some(name) => vec![OperationKind::parse_name(name)?],
            None => Vec::new(),
        };
        self.validate_and_precompile(&ops, types.unwrap_or_default())
    }

    /// Bind the cached `(dtype, op)` kernel to a launch configuration.
    ///
    /// The kernel must already be compiled; this never compiles.
    pub fn get_backend_kernel(
        &self,
        dtype: ElementType,
        launch: LaunchConfig,
        op: OperationKind,
    ) -> Result<KernelInvoker> {
        let kernel = self.cache.get(dtype, op).context(CacheMissSnafu { op, dtype })?;
        ensure!(op == OperationKind::Lfilter, UnimplementedOperationSnafu { op });
        Ok(KernelInvoker::from_launch(launch, kernel))
    }

    /// Drop every cached kernel.
    pub fn clear_cache(&self) {
        debug!(kernels = self.cache.len(), "clearing kernel cache");
        self.cache.clear();
    }
}

static GLOBAL: OnceCell<KernelContext> = OnceCell::new();

/// Install `context` as the process-wide context.
///
/// Fails if one was already installed or lazily created by [`global`].
pub fn init_global(context: KernelContext) -> Result<&'static KernelContext> {
    GLOBAL.try_insert(context).map_err(|_| AlreadyInitializedSnafu.build())
}

/// The process-wide context, created from [`RuntimeConfig::from_env`] on first use.
pub fn global() -> Result<&'static KernelContext> {
    GLOBAL.get_or_try_init(|| KernelContext::from_config(&RuntimeConfig::from_env()?))
}
