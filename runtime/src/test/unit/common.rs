use std::sync::Arc;

use sigkern_device::{Buffer, Compiler, HostAllocator, HostStream, Stream};
use sigkern_dtype::Element;

use crate::devices::HostCompiler;
use crate::{KernelContext, RuntimeConfig};

/// A context on the host backend, plus the compiler for counting compilations.
pub fn host_context() -> (KernelContext, Arc<HostCompiler>) {
    host_context_with(&RuntimeConfig::default())
}

pub fn host_context_with(config: &RuntimeConfig) -> (KernelContext, Arc<HostCompiler>) {
    let compiler = Arc::new(HostCompiler::new());
    let ctx = KernelContext::new(Arc::clone(&compiler) as Arc<dyn Compiler>, config);
    (ctx, compiler)
}

pub fn buffer<T: Element>(values: &[T]) -> Buffer {
    Buffer::from_slice(Arc::new(HostAllocator), values).unwrap()
}

pub fn host_stream() -> (Arc<HostStream>, Arc<dyn Stream>) {
    let stream = Arc::new(HostStream::new());
    let dyn_stream: Arc<dyn Stream> = Arc::clone(&stream) as Arc<dyn Stream>;
    (stream, dyn_stream)
}
