use std::sync::Arc;

use crate::stream::{active_stream, use_stream};
use crate::{HostStream, Stream};

#[test]
fn test_use_stream_sets_thread_active() {
    let stream: Arc<dyn Stream> = Arc::new(HostStream::new());
    use_stream(&stream).unwrap();
    let active = active_stream().expect("stream should be active");
    assert!(Arc::ptr_eq(&active, &stream));

    let other: Arc<dyn Stream> = Arc::new(HostStream::new());
    use_stream(&other).unwrap();
    assert!(Arc::ptr_eq(&active_stream().unwrap(), &other));
}

#[test]
fn test_active_stream_is_per_thread() {
    let stream: Arc<dyn Stream> = Arc::new(HostStream::new());
    use_stream(&stream).unwrap();
    let seen = std::thread::spawn(|| active_stream().is_some()).join().unwrap();
    assert!(!seen);
}

#[test]
fn test_host_stream_ids_and_sync() {
    let a = HostStream::new();
    let b = HostStream::new();
    assert_ne!(a.id(), b.id());

    a.synchronize().unwrap();
    a.synchronize().unwrap();
    assert_eq!(a.synchronizations(), 2);
    assert_eq!(b.synchronizations(), 0);
}
