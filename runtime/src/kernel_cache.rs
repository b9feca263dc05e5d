//! Compiled-kernel cache.
//!
//! Maps `(ElementType, OperationKind)` to a compiled kernel. Uses papaya's
//! lock-free HashMap so lookups never block and population is atomic.
//!
//! # Thread Safety
//!
//! All operations are thread-safe. Two threads compiling the same key at
//! once may both invoke the compiler; exactly one handle is stored and both
//! callers receive it.
//!
//! # Invariants
//!
//! An entry is only inserted after compilation and entry-point lookup both
//! succeed, so every present entry is invocable. Entries are never replaced.

use std::sync::Arc;

use papaya::{Compute, HashMap, Operation};
use sigkern_codegen::OperationKind;
use sigkern_device::Function;
use sigkern_dtype::ElementType;

/// A compiled kernel specialized for one element type.
#[derive(Debug)]
pub struct CachedKernel {
    /// The loaded entry point.
    pub function: Arc<dyn Function>,
    pub op: OperationKind,
    pub dtype: ElementType,
    /// Rendered source (for debugging/profiling).
    pub code: String,
    pub entry_point: &'static str,
}

/// Cache key: (element type, operation).
pub type KernelKey = (ElementType, OperationKind);

#[derive(Debug, Default)]
pub struct KernelCache {
    kernels: HashMap<KernelKey, Arc<CachedKernel>>,
}

impl KernelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dtype: ElementType, op: OperationKind) -> Option<Arc<CachedKernel>> {
        let guard = self.kernels.guard();
        self.kernels.get(&(dtype, op), &guard).map(Arc::clone)
    }

    pub fn contains(&self, dtype: ElementType, op: OperationKind) -> bool {
        let guard = self.kernels.guard();
        self.kernels.contains_key(&(dtype, op), &guard)
    }

    /// Get or compile a kernel.
    ///
    /// `compile_fn` runs only on a miss. If it fails, nothing is stored.
    /// If another thread inserted the key while `compile_fn` ran, that
    /// thread's kernel is kept and returned.
    pub fn get_or_compile<F, E>(&self, dtype: ElementType, op: OperationKind, compile_fn: F) -> Result<Arc<CachedKernel>, E>
    where
        F: FnOnce() -> Result<CachedKernel, E>,
    {
        let key = (dtype, op);
        let guard = self.kernels.guard();
        if let Some(hit) = self.kernels.get(&key, &guard) {
            return Ok(Arc::clone(hit));
        }

        let fresh = Arc::new(compile_fn()?);
        let stored = self.kernels.compute(
            key,
            |slot| match slot {
                Some((_, winner)) => Operation::Abort(Arc::clone(winner)),
                None => Operation::Insert(Arc::clone(&fresh)),
            },
            &guard,
        );
        Ok(match stored {
            Compute::Inserted(_, kernel) => Arc::clone(kernel),
            Compute::Aborted(winner) => winner,
            // Inserting never updates or removes.
            _ => fresh,
        })
    }

    /// Keys currently present, in no particular order.
    pub fn keys(&self) -> Vec<KernelKey> {
        let guard = self.kernels.guard();
        self.kernels.iter(&guard).map(|(key, _)| *key).collect()
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Drop every entry. Used at context teardown and for test isolation.
    pub fn clear(&self) {
        let guard = self.kernels.guard();
        self.kernels.clear(&guard);
    }
}
