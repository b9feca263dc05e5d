use std::sync::Arc;

use sigkern_codegen::OperationKind;
use sigkern_device::{Function, KernelArg, LaunchConfig};
use sigkern_dtype::ElementType;

use crate::{CachedKernel, KernelCache};

#[derive(Debug)]
struct NoopFunction;

impl Function for NoopFunction {
    fn name(&self) -> &str {
        "noop"
    }

    unsafe fn launch(&self, _launch: &LaunchConfig, _args: &[KernelArg<'_>]) -> sigkern_device::Result<()> {
        Ok(())
    }
}

fn kernel(dtype: ElementType, op: OperationKind) -> CachedKernel {
    CachedKernel { function: Arc::new(NoopFunction), op, dtype, code: String::new(), entry_point: "noop" }
}

#[test]
fn test_get_or_compile_caches_on_success() {
    let cache = KernelCache::new();
    let first = cache
        .get_or_compile(ElementType::Float32, OperationKind::Lfilter, || {
            Ok::<_, ()>(kernel(ElementType::Float32, OperationKind::Lfilter))
        })
        .unwrap();

    let second = cache
        .get_or_compile(ElementType::Float32, OperationKind::Lfilter, || -> Result<CachedKernel, ()> {
            panic!("cache hit must not compile")
        })
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_get_or_compile_failure_stores_nothing() {
    let cache = KernelCache::new();
    let result = cache.get_or_compile(ElementType::Float32, OperationKind::Lfilter, || Err("compiler exploded"));

    assert_eq!(result.unwrap_err(), "compiler exploded");
    assert!(cache.is_empty());
    assert!(cache.get(ElementType::Float32, OperationKind::Lfilter).is_none());
}

#[test]
fn test_keys_are_distinct_per_type_and_op() {
    let cache = KernelCache::new();
    for (dtype, op) in [
        (ElementType::Float32, OperationKind::Lfilter),
        (ElementType::Float64, OperationKind::Lfilter),
        (ElementType::Float32, OperationKind::Convolve),
    ] {
        cache.get_or_compile(dtype, op, || Ok::<_, ()>(kernel(dtype, op))).unwrap();
    }

    let mut keys = cache.keys();
    keys.sort();
    assert_eq!(keys, [
        (ElementType::Float32, OperationKind::Convolve),
        (ElementType::Float32, OperationKind::Lfilter),
        (ElementType::Float64, OperationKind::Lfilter),
    ]);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_entry_inserted_during_compile_wins() {
    let cache = KernelCache::new();
    let mut inner = None;

    let outer = cache
        .get_or_compile(ElementType::Float64, OperationKind::Lfilter, || {
            // Another caller fills the slot while this compile is in flight.
            inner = Some(
                cache
                    .get_or_compile(ElementType::Float64, OperationKind::Lfilter, || {
                        Ok::<_, ()>(kernel(ElementType::Float64, OperationKind::Lfilter))
                    })
                    .unwrap(),
            );
            Ok::<_, ()>(kernel(ElementType::Float64, OperationKind::Lfilter))
        })
        .unwrap();

    assert!(Arc::ptr_eq(&outer, inner.as_ref().unwrap()));
    assert!(Arc::ptr_eq(&outer, &cache.get(ElementType::Float64, OperationKind::Lfilter).unwrap()));
    assert_eq!(cache.len(), 1);
}
