//! Host reference backend.
//!
//! "Compiles" rendered kernel source by checking that it is fully
//! specialized and that it defines the requested entry points, then runs
//! Rust reference implementations on host buffers. Only the recursive filter
//! has a reference implementation; other entry points load but refuse to
//! launch.

use std::ops::{Add, Div, Mul, Sub};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use sigkern_device::{
    BackendMismatchSnafu, Buffer, CompilationSnafu, CompileOptions, Compiler, ExecutionSnafu, Function,
    FunctionNotFoundSnafu, KernelArg, LaunchConfig, Module, RawBuffer, Result,
};
use sigkern_dtype::{Element, ElementType};
use snafu::ensure;

const LFILTER_ENTRY: &str = "sigkern_lfilter";

/// Compiler for the host backend.
///
/// Counts compilations and remembers the last options, so callers can
/// observe what reached the compiler boundary.
#[derive(Debug, Default)]
pub struct HostCompiler {
    compilations: AtomicUsize,
    last_options: Mutex<Option<CompileOptions>>,
}

impl HostCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `compile` calls.
    pub fn compilations(&self) -> usize {
        self.compilations.load(Ordering::Relaxed)
    }

    pub fn last_options(&self) -> Option<CompileOptions> {
        self.last_options.lock().clone()
    }
}

impl Compiler for HostCompiler {
    fn compile(&self, src: &str, options: &CompileOptions) -> Result<Arc<dyn Module>> {
        ensure!(
            !src.contains("{datatype}") && !src.contains("{header}"),
            CompilationSnafu { reason: "source contains unsubstituted template placeholders" }
        );
        ensure!(src.contains("extern \"C\""), CompilationSnafu { reason: "source has no extern \"C\" block" });

        *self.last_options.lock() = Some(options.clone());
        self.compilations.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(src.len = src.len(), options.flags = ?options.flags, "host module compiled");

        Ok(Arc::new(HostModule { src: src.to_string() }))
    }

    fn backend(&self) -> &str {
        "HOST"
    }
}

#[derive(Debug)]
struct HostModule {
    src: String,
}

impl Module for HostModule {
    fn function(&self, name: &str) -> Result<Arc<dyn Function>> {
        ensure!(self.src.contains(&format!("__global__ void {name}(")), FunctionNotFoundSnafu { name });
        Ok(Arc::new(HostFunction { name: name.to_string() }))
    }
}

#[derive(Debug)]
struct HostFunction {
    name: String,
}

impl Function for HostFunction {
    fn name(&self) -> &str {
        &self.name
    }

    unsafe fn launch(&self, launch: &LaunchConfig, args: &[KernelArg<'_>]) -> Result<()> {
        launch.grid.to_dim3()?;
        launch.block.to_dim3()?;
        let backend = launch.stream.backend();
        ensure!(backend == "HOST", BackendMismatchSnafu { expected: "HOST", actual: backend });

        match self.name.as_str() {
            LFILTER_ENTRY => launch_lfilter(args),
            other => ExecutionSnafu { reason: format!("no host implementation for '{other}'") }.fail(),
        }
    }
}

/// Scalar arithmetic the host reference kernels need.
pub trait HostScalar: Element + Default + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self> {}

impl HostScalar for f32 {}
impl HostScalar for f64 {}

/// Output sample `t` of the direct-form recurrence.
///
/// Reads `y[t - window..t]`, so those samples must already hold their final
/// values. `a` must be non-empty. Numerator taps past the end of `b` count
/// as zero.
pub fn lfilter_sample<T: HostScalar>(t: usize, b: &[T], a: &[T], x: &[T], y: &[T]) -> T {
    let window = t.min(a.len() - 1);
    let isw = (0..=window).take_while(|i| *i < b.len()).fold(T::default(), |acc, i| acc + x[t - i] * b[i]);
    let wos = (1..=window).fold(T::default(), |acc, i| acc + y[t - i] * a[i]);
    (isw - wos) / a[0]
}

/// Direct-form IIR filter over the whole signal, in index order.
pub fn lfilter_in_order<T: HostScalar>(b: &[T], a: &[T], x: &[T], y: &mut [T]) {
    for t in 0..x.len() {
        y[t] = lfilter_sample(t, b, a, x, y);
    }
}

fn launch_lfilter(args: &[KernelArg<'_>]) -> Result<()> {
    let &[
        KernelArg::I32(x_len),
        KernelArg::I32(a_len),
        KernelArg::I32(b_len),
        KernelArg::Buffer(x),
        KernelArg::Buffer(a),
        KernelArg::Buffer(b),
        KernelArg::BufferMut(out),
    ] = args
    else {
        return ExecutionSnafu { reason: format!("{LFILTER_ENTRY} expects (int, int, int, x, a, b, out), got {args:?}") }
            .fail();
    };

    let lens = [(x_len, x), (a_len, a), (b_len, b), (x_len, out)];
    for (len, buffer) in lens {
        ensure!(
            usize::try_from(len).is_ok_and(|len| len <= buffer.numel()),
            ExecutionSnafu { reason: format!("length {len} out of bounds for buffer of {}", buffer.numel()) }
        );
        ensure!(matches!(buffer.raw(), RawBuffer::Host { .. }), BackendMismatchSnafu {
            expected: "HOST",
            actual: buffer.raw().backend()
        });
    }
    ensure!(a_len > 0, ExecutionSnafu { reason: "empty denominator" });

    match x.dtype() {
        ElementType::Float32 => run_lfilter::<f32>(x_len, a_len, b_len, x, a, b, out),
        ElementType::Float64 => run_lfilter::<f64>(x_len, a_len, b_len, x, a, b, out),
        other => ExecutionSnafu { reason: format!("{LFILTER_ENTRY} has no host implementation for {other}") }.fail(),
    }
}

fn run_lfilter<T: HostScalar>(
    x_len: i32,
    a_len: i32,
    b_len: i32,
    x: &Buffer,
    a: &Buffer,
    b: &Buffer,
    out: &Buffer,
) -> Result<()> {
    let x_vals = x.to_vec::<T>()?;
    let a_vals = a.to_vec::<T>()?;
    let b_vals = b.to_vec::<T>()?;
    let mut y = out.to_vec::<T>()?;

    let (x_len, a_len, b_len) = (x_len as usize, a_len as usize, b_len as usize);
    lfilter_in_order(&b_vals[..b_len], &a_vals[..a_len], &x_vals[..x_len], &mut y[..x_len]);

    tracing::trace!(x.len = x_len, a.len = a_len, b.len = b_len, "host lfilter finished");
    out.copyin(bytemuck::cast_slice(&y))
}
