//! CUDA C++ source templates, one per operation.
//!
//! Placeholders: `{header}` (complex support include, possibly empty) and
//! `{datatype}` (device scalar spelling). Each template defines a single
//! `extern "C"` entry point named in the operation table.

pub mod convolve;
pub mod lfilter;
pub mod spectral;
pub mod upfirdn;
