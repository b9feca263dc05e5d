//! Types for code generation.

use sigkern_dtype::ElementType;

use crate::OperationKind;

/// A kernel source specialized for one element type, ready for compilation.
#[derive(Debug, Clone)]
pub struct RenderedKernel {
    pub op: OperationKind,
    pub dtype: ElementType,

    /// CUDA C++ source.
    pub code: String,

    /// Entry point function name.
    pub entry_point: &'static str,
}
