//! Template rendering.
//!
//! Rendering is plain substitution of the `{header}` and `{datatype}`
//! placeholders; there is no control flow in templates.

use sigkern_dtype::ElementType;

use crate::error::Result;
use crate::support::scalar_spelling;
use crate::table::operation_spec;
use crate::{OperationKind, RenderedKernel};

/// Include that provides `complex<T>` to device code.
pub const DEFAULT_COMPLEX_HEADER: &str = "#include <cupy/complex.cuh>";

/// Header to splice into a template for `datatype`.
///
/// Only complex spellings need the header; everything else gets an empty line.
pub fn header_for<'a>(datatype: &str, complex_header: &'a str) -> &'a str {
    if datatype.contains("complex") { complex_header } else { "" }
}

/// Substitute `datatype` and `header` into `op`'s template.
pub fn render(op: OperationKind, datatype: &str, header: &str) -> Result<String> {
    let spec = operation_spec(op)?;
    Ok(substitute(spec.template, datatype, header))
}

/// Specialize `op` for `dtype`.
///
/// Fails with `UnsupportedDatatype` if `dtype` is not in `op`'s support set.
pub fn render_kernel(op: OperationKind, dtype: ElementType, complex_header: &str) -> Result<RenderedKernel> {
    let spec = operation_spec(op)?;
    let datatype = scalar_spelling(op, dtype)?;
    let header = header_for(datatype, complex_header);

    tracing::trace!(kernel.op = %op, kernel.dtype = %dtype, kernel.datatype = datatype, "rendering kernel source");

    Ok(RenderedKernel { op, dtype, code: substitute(spec.template, datatype, header), entry_point: spec.entry_point })
}

fn substitute(template: &str, datatype: &str, header: &str) -> String {
    template.replace("{header}", header).replace("{datatype}", datatype)
}
