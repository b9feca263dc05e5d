//! Error types for kernel compilation and execution.

use sigkern_codegen::OperationKind;
use sigkern_dtype::ElementType;
use snafu::Snafu;

/// Result type for runtime operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while compiling, caching or launching kernels.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Operation lookup or source generation failed.
    #[snafu(context(false), display("{source}"))]
    Codegen { source: sigkern_codegen::Error },

    /// Compiler, buffer or stream failure.
    #[snafu(display("device error: {source}"))]
    Device { source: sigkern_device::Error },

    /// A kernel was requested for invocation without being compiled first.
    #[snafu(display("kernel '{op}' for {dtype} not found in kernel cache"))]
    CacheMiss { op: OperationKind, dtype: ElementType },

    /// The operation has no invoker wrapper.
    #[snafu(display("no kernel invoker for '{op}'"))]
    UnimplementedOperation { op: OperationKind },

    #[snafu(display("invalid argument: {reason}"))]
    InvalidArgument { reason: String },

    #[snafu(display("invalid configuration: {reason}"))]
    Config { reason: String },

    /// `init_global` was called after the global context already existed.
    #[snafu(display("global kernel context already initialized"))]
    AlreadyInitialized,
}
