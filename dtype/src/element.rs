//! Host scalars with a fixed [`ElementType`].

use crate::ElementType;

/// A host scalar that can be copied in and out of buffers byte-for-byte.
pub trait Element: bytemuck::Pod + std::fmt::Debug {
    const DTYPE: ElementType;
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: ElementType = ElementType::$dtype;
            }
        )*
    };
}

impl_element! {
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
}
