//! The closed set of operations kernels can be compiled for.

use std::str::FromStr;

use snafu::OptionExt;

use crate::error::{InvalidOperationNameSnafu, Result};

/// A signal-processing primitive with a device kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::EnumString, strum::IntoStaticStr)]
#[derive(strum::EnumCount, strum::EnumIter, strum::VariantArray)]
#[strum(serialize_all = "lowercase")]
pub enum OperationKind {
    Correlate,
    Convolve,
    Correlate2d,
    Convolve2d,
    /// Direct-form recursive (IIR) filter.
    Lfilter,
    /// Lomb-Scargle periodogram.
    Lombscargle,
    /// Upsample, FIR filter, downsample.
    Upfirdn,
    Upfirdn2d,
}

impl OperationKind {
    /// Parse a user-supplied operation name, ignoring case.
    pub fn parse_name(name: &str) -> Result<Self> {
        Self::from_str(&name.to_lowercase()).ok().context(InvalidOperationNameSnafu { name })
    }

    /// Canonical lowercase name (`"lfilter"`, `"convolve2d"`, ...).
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
