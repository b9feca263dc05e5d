//! Element types that kernels can be specialized for.
//!
//! An [`ElementType`] is the abstract numeric type of a buffer. Operations
//! support a fixed subset of these; the mapping to device scalar spellings
//! lives in `sigkern-codegen`.

pub mod element;


pub use element::Element;

/// Abstract numeric element type of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::EnumString, strum::IntoStaticStr)]
#[derive(strum::EnumCount, strum::EnumIter, strum::VariantArray)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ElementType {
    Int32,
    Int64,
    Float32,
    Float64,
    /// Two packed `f32` values (real, imaginary).
    Complex64,
    /// Two packed `f64` values (real, imaginary).
    Complex128,
}

impl ElementType {
    pub const fn bytes(&self) -> usize {
        match self {
            Self::Int32 | Self::Float32 => 4,
            Self::Int64 | Self::Float64 | Self::Complex64 => 8,
            Self::Complex128 => 16,
        }
    }

    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int32 | Self::Int64)
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    pub const fn is_complex(&self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Canonical lowercase name (`"float32"`, `"complex128"`, ...).
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
