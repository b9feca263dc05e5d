//! Operation table: one row per [`OperationKind`].
//!
//! Adding an operation means adding a variant, a template and a row here.

use snafu::OptionExt;

use crate::OperationKind;
use crate::error::{Result, UnsupportedOperationSnafu};
use crate::support::{CONVOLVE_TYPES, REAL_TYPES, TypeSupport, UPFIRDN_TYPES};
use crate::templates;

/// Everything needed to specialize and load one operation's kernel.
#[derive(Debug)]
pub struct OperationSpec {
    pub op: OperationKind,
    /// Source with `{header}` and `{datatype}` placeholders.
    pub template: &'static str,
    /// Name of the `extern "C"` function defined by `template`.
    pub entry_point: &'static str,
    pub support: TypeSupport,
}

static OPERATIONS: &[OperationSpec] = &[
    OperationSpec {
        op: OperationKind::Correlate,
        template: templates::convolve::CORRELATE,
        entry_point: "sigkern_correlate",
        support: CONVOLVE_TYPES,
    },
    OperationSpec {
        op: OperationKind::Convolve,
        template: templates::convolve::CONVOLVE,
        entry_point: "sigkern_convolve",
        support: CONVOLVE_TYPES,
    },
    OperationSpec {
        op: OperationKind::Correlate2d,
        template: templates::convolve::CORRELATE_2D,
        entry_point: "sigkern_correlate_2d",
        support: CONVOLVE_TYPES,
    },
    OperationSpec {
        op: OperationKind::Convolve2d,
        template: templates::convolve::CONVOLVE_2D,
        entry_point: "sigkern_convolve_2d",
        support: CONVOLVE_TYPES,
    },
    OperationSpec {
        op: OperationKind::Lfilter,
        template: templates::lfilter::LFILTER,
        entry_point: "sigkern_lfilter",
        support: REAL_TYPES,
    },
    OperationSpec {
        op: OperationKind::Lombscargle,
        template: templates::spectral::LOMBSCARGLE,
        entry_point: "sigkern_lombscargle",
        support: REAL_TYPES,
    },
    OperationSpec {
        op: OperationKind::Upfirdn,
        template: templates::upfirdn::UPFIRDN_1D,
        entry_point: "sigkern_upfirdn_1d",
        support: UPFIRDN_TYPES,
    },
    OperationSpec {
        op: OperationKind::Upfirdn2d,
        template: templates::upfirdn::UPFIRDN_2D,
        entry_point: "sigkern_upfirdn_2d",
        support: UPFIRDN_TYPES,
    },
];

/// Look up the table row for `op`.
pub fn operation_spec(op: OperationKind) -> Result<&'static OperationSpec> {
    OPERATIONS.iter().find(|spec| spec.op == op).context(UnsupportedOperationSnafu { op })
}
