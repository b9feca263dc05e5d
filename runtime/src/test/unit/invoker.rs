use std::sync::Arc;

use sigkern_codegen::OperationKind;
use sigkern_device::stream::active_stream;
use sigkern_device::{Buffer, BufferOptions, HostAllocator, LaunchConfig};
use sigkern_dtype::ElementType;

use super::common::{buffer, host_context, host_stream};
use crate::{Error, KernelInvoker};

#[test]
fn test_call_writes_output_and_activates_stream() {
    let (ctx, _) = host_context();
    let (_, stream) = host_stream();
    let kernel = ctx.ensure_compiled(ElementType::Float64, OperationKind::Lfilter).unwrap();
    let invoker = KernelInvoker::new(1u32, 1u32, Arc::clone(&stream), kernel);

    let x = buffer(&[2.0f64, 4.0]);
    let out = x.zeros_like().unwrap();
    invoker.call(&buffer(&[0.5f64]), &buffer(&[1.0f64]), &x, &out).unwrap();

    assert_eq!(out.to_vec::<f64>().unwrap(), [1.0, 2.0]);
    assert!(Arc::ptr_eq(&active_stream().unwrap(), &stream));
}

#[test]
fn test_invoker_is_reusable_across_lengths() {
    let (ctx, _) = host_context();
    let (_, stream) = host_stream();
    ctx.ensure_compiled(ElementType::Float64, OperationKind::Lfilter).unwrap();
    let invoker = ctx.get_backend_kernel(ElementType::Float64, LaunchConfig::single(stream), OperationKind::Lfilter).unwrap();
    let (b, a) = (buffer(&[1.0f64]), buffer(&[1.0f64, -1.0]));

    // a = [1, -1] is a running sum.
    for x in [vec![1.0f64; 3], vec![1.0f64; 7]] {
        let x = buffer(&x);
        let out = x.zeros_like().unwrap();
        invoker.call(&b, &a, &x, &out).unwrap();
        let expected: Vec<f64> = (1..=x.len()).map(|n| n as f64).collect();
        assert_eq!(out.to_vec::<f64>().unwrap(), expected);
    }
}

#[test]
fn test_call_rejects_output_length_mismatch() {
    let (ctx, _) = host_context();
    let (_, stream) = host_stream();
    let kernel = ctx.ensure_compiled(ElementType::Float64, OperationKind::Lfilter).unwrap();
    let invoker = KernelInvoker::new(1u32, 1u32, stream, kernel);

    let x = buffer(&[1.0f64, 2.0, 3.0]);
    let out = Buffer::allocate(Arc::new(HostAllocator), ElementType::Float64, &[2], BufferOptions::default()).unwrap();
    let err = invoker.call(&buffer(&[1.0f64]), &buffer(&[1.0f64]), &x, &out).unwrap_err();

    assert!(matches!(err, Error::Device { source: sigkern_device::Error::ShapeMismatch { .. } }));
}

#[test]
fn test_call_rejects_dtype_mismatch() {
    let (ctx, _) = host_context();
    let (_, stream) = host_stream();
    let kernel = ctx.ensure_compiled(ElementType::Float32, OperationKind::Lfilter).unwrap();
    let invoker = KernelInvoker::new(1u32, 1u32, stream, kernel);

    let x = buffer(&[1.0f64]);
    let out = x.zeros_like().unwrap();
    let err = invoker.call(&buffer(&[1.0f64]), &buffer(&[1.0f64]), &x, &out).unwrap_err();

    assert!(matches!(
        err,
        Error::Device {
            source: sigkern_device::Error::DTypeMismatch { expected: ElementType::Float32, actual: ElementType::Float64 }
        }
    ));
}

#[test]
fn test_call_rejects_invalid_launch_shape() {
    let (ctx, _) = host_context();
    let (_, stream) = host_stream();
    let kernel = ctx.ensure_compiled(ElementType::Float64, OperationKind::Lfilter).unwrap();
    let invoker = KernelInvoker::new(0u32, 1u32, stream, kernel);

    let x = buffer(&[1.0f64]);
    let out = x.zeros_like().unwrap();
    let err = invoker.call(&buffer(&[1.0f64]), &buffer(&[1.0f64]), &x, &out).unwrap_err();

    assert!(matches!(err, Error::Device { source: sigkern_device::Error::InvalidLaunchShape { .. } }));
}

#[test]
fn test_scalar_extents_become_one_dimensional() {
    let (ctx, _) = host_context();
    let (_, stream) = host_stream();
    let kernel = ctx.ensure_compiled(ElementType::Float64, OperationKind::Lfilter).unwrap();

    let invoker = KernelInvoker::new(4u32, (8u32, 2u32), stream, kernel);

    assert_eq!(invoker.launch_config().grid.dims(), [4]);
    assert_eq!(invoker.launch_config().block.dims(), [8, 2]);
}
