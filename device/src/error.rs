use sigkern_dtype::ElementType;
use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Shape of a buffer does not match the expected shape.
    #[snafu(display("shape mismatch: expected {expected:?}, got {actual:?}"))]
    ShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },

    #[snafu(display("size mismatch: expected {expected}, got {actual}"))]
    SizeMismatch { expected: usize, actual: usize },

    #[snafu(display("dtype mismatch: expected {expected}, got {actual}"))]
    DTypeMismatch { expected: ElementType, actual: ElementType },

    /// Grid or block extent cannot be launched.
    #[snafu(display("invalid launch shape: {reason}"))]
    InvalidLaunchShape { reason: String },

    /// The module compiler rejected the source.
    #[snafu(display("compilation failed: {reason}"))]
    Compilation { reason: String },

    /// Function not found in a compiled module.
    #[snafu(display("function '{name}' not found in module"))]
    FunctionNotFound { name: String },

    #[snafu(display("execution error: {reason}"))]
    Execution { reason: String },

    /// A buffer or stream belongs to a different backend than the kernel.
    #[snafu(display("backend mismatch: kernel runs on {expected}, got {actual}"))]
    BackendMismatch { expected: String, actual: String },

    #[cfg(feature = "cuda")]
    #[snafu(display("CUDA error: {source}"))]
    Cuda { source: cudarc::driver::DriverError },
}
