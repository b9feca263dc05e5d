//! Source generation for sigkern kernels.
//!
//! Every [`OperationKind`] has one row in the operation table: a CUDA source
//! template, the element types it can be specialized for, and the name of the
//! `extern "C"` entry point the template defines.
//!
//! # Architecture
//!
//! - **op**: the closed set of operations and their canonical names
//! - **support**: element type → device scalar spelling, per operation
//! - **templates**: one parameterized CUDA source per operation
//! - **table**: the lookup table tying the three together
//! - **render**: pure template substitution
//!
//! # Usage
//!
//! ```ignore
//! use sigkern_codegen::{OperationKind, render_kernel, DEFAULT_COMPLEX_HEADER};
//! use sigkern_dtype::ElementType;
//!
//! let kernel = render_kernel(OperationKind::Lfilter, ElementType::Float64, DEFAULT_COMPLEX_HEADER)?;
//! assert_eq!(kernel.entry_point, "sigkern_lfilter");
//! ```

pub mod error;
pub mod op;
pub mod render;
pub mod support;
pub mod table;
pub mod templates;
pub mod types;

#[cfg(test)]
pub mod test;

pub use error::*;
pub use op::OperationKind;
pub use render::{DEFAULT_COMPLEX_HEADER, header_for, render, render_kernel};
pub use support::{scalar_spelling, supported_types};
pub use table::{OperationSpec, operation_spec};
pub use types::RenderedKernel;
