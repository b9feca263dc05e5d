use std::sync::Arc;

use proptest::prelude::*;
use sigkern_dtype::ElementType;

use crate::{Allocator, Buffer, BufferOptions, Error, HostAllocator};

fn host() -> Arc<dyn Allocator> {
    Arc::new(HostAllocator)
}

#[test]
fn test_allocate_shape_and_size() {
    let buffer = Buffer::allocate(host(), ElementType::Float64, &[3, 4], BufferOptions::default()).unwrap();
    assert_eq!(buffer.shape(), &[3, 4]);
    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.numel(), 12);
    assert_eq!(buffer.size(), 96);
    assert_eq!(buffer.dtype(), ElementType::Float64);
    assert_eq!(buffer.allocator().name(), "HOST");
}

#[test]
fn test_zeros_like_matches_input() {
    let x = Buffer::from_slice(host(), &[1.5f32, -2.0, 3.25]).unwrap();
    let out = x.zeros_like().unwrap();
    assert_eq!(out.shape(), x.shape());
    assert_eq!(out.dtype(), x.dtype());
    assert_eq!(out.to_vec::<f32>().unwrap(), vec![0.0; 3]);
    // The source is untouched.
    assert_eq!(x.to_vec::<f32>().unwrap(), vec![1.5, -2.0, 3.25]);
}

#[test]
fn test_to_vec_rejects_wrong_dtype() {
    let x = Buffer::from_slice(host(), &[1i32, 2, 3]).unwrap();
    let err = x.to_vec::<f32>().unwrap_err();
    assert!(matches!(
        err,
        Error::DTypeMismatch { expected: ElementType::Int32, actual: ElementType::Float32 }
    ));
}

#[test]
fn test_copyin_size_mismatch() {
    let x = Buffer::allocate(host(), ElementType::Int64, &[2], BufferOptions::default()).unwrap();
    let err = x.copyin(&[0u8; 4]).unwrap_err();
    assert!(matches!(err, Error::SizeMismatch { expected: 16, actual: 4 }));
}

#[test]
fn test_empty_buffer() {
    let x = Buffer::from_slice::<f64>(host(), &[]).unwrap();
    assert!(x.is_empty());
    assert_eq!(x.len(), 0);
    assert_eq!(x.to_vec::<f64>().unwrap(), Vec::<f64>::new());
}

proptest! {
    #[test]
    fn prop_host_copy_preserves_values(values in prop::collection::vec(any::<f64>(), 0..64)) {
        let buffer = Buffer::from_slice(host(), &values).unwrap();
        let back = buffer.to_vec::<f64>().unwrap();
        prop_assert_eq!(back.len(), values.len());
        for (a, b) in back.iter().zip(&values) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
