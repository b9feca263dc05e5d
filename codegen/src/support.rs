//! Type-support table.
//!
//! Convolution and correlation (1D and 2D) share the widest set. The
//! recursive filter and the periodogram are real-only. Resampling takes real
//! and complex values but not integers.

use sigkern_dtype::ElementType;
use snafu::OptionExt;

use crate::OperationKind;
use crate::error::{Result, UnsupportedDatatypeSnafu};
use crate::table::operation_spec;

/// Element type paired with its CUDA scalar spelling.
pub type TypeSupport = &'static [(ElementType, &'static str)];

pub(crate) const CONVOLVE_TYPES: TypeSupport = &[
    (ElementType::Int32, "int"),
    (ElementType::Int64, "long int"),
    (ElementType::Float32, "float"),
    (ElementType::Float64, "double"),
    (ElementType::Complex64, "complex<float>"),
    (ElementType::Complex128, "complex<double>"),
];

pub(crate) const REAL_TYPES: TypeSupport = &[(ElementType::Float32, "float"), (ElementType::Float64, "double")];

pub(crate) const UPFIRDN_TYPES: TypeSupport = &[
    (ElementType::Float32, "float"),
    (ElementType::Float64, "double"),
    (ElementType::Complex64, "complex<float>"),
    (ElementType::Complex128, "complex<double>"),
];

/// All element types `op` supports, with their device spellings.
pub fn supported_types(op: OperationKind) -> Result<TypeSupport> {
    Ok(operation_spec(op)?.support)
}

/// Device scalar spelling of `dtype` for `op`.
pub fn scalar_spelling(op: OperationKind, dtype: ElementType) -> Result<&'static str> {
    supported_types(op)?
        .iter()
        .find_map(|(ty, spelling)| (*ty == dtype).then_some(*spelling))
        .context(UnsupportedDatatypeSnafu { dtype, op })
}
