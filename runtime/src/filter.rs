//! Direct-form recursive (IIR) filtering.

use std::sync::Arc;

use sigkern_codegen::OperationKind;
use sigkern_device::{Buffer, Stream};
use snafu::{ResultExt, ensure};

use crate::context::KernelContext;
use crate::error::{DeviceSnafu, InvalidArgumentSnafu, Result};
use crate::invoker::KernelInvoker;

/// Filter `x` with numerator `b` and denominator `a`.
///
/// Computes, for each `t` in increasing order,
/// `y[t] = (Σ b[i]·x[t-i] - Σ_{i≥1} a[i]·y[t-i]) / a[0]` over
/// `i ≤ min(t, a.len() - 1)`, with numerator taps past `b.len()` taken as
/// zero. Each output depends on earlier outputs, so the kernel runs on a
/// single thread. `a[0] == 0` is not checked; the output is then non-finite.
///
/// The result is a new buffer shaped like `x`. With `autosync` the call waits
/// for the kernel on `stream` before returning. An empty `x` still compiles
/// the kernel but launches nothing and yields an empty buffer.
pub fn lfilter(
    ctx: &KernelContext,
    b: &Buffer,
    a: &Buffer,
    x: &Buffer,
    stream: Arc<dyn Stream>,
    autosync: bool,
) -> Result<Buffer> {
    ensure!(!a.is_empty(), InvalidArgumentSnafu { reason: "denominator coefficients must not be empty" });
    ensure!(
        b.dtype() == x.dtype() && a.dtype() == x.dtype(),
        InvalidArgumentSnafu {
            reason: format!("coefficient types ({}, {}) differ from signal type {}", b.dtype(), a.dtype(), x.dtype())
        }
    );

    let out = x.zeros_like().context(DeviceSnafu)?;
    let kernel = ctx.ensure_compiled(x.dtype(), OperationKind::Lfilter)?;
    if !x.is_empty() {
        let invoker = KernelInvoker::new(1u32, 1u32, Arc::clone(&stream), kernel);
        invoker.call(b, a, x, &out)?;
    }

    if autosync {
        stream.synchronize().context(DeviceSnafu)?;
    }
    Ok(out)
}
