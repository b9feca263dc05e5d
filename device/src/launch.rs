//! Launch configuration: how many execution units, and on which stream.

use std::sync::Arc;

use smallvec::SmallVec;
use snafu::ensure;

use crate::error::{InvalidLaunchShapeSnafu, Result};
use crate::stream::Stream;

/// A 1-D to 3-D extent of execution units.
///
/// A bare scalar converts to a one-element extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extent(SmallVec<[u32; 3]>);

impl Extent {
    pub fn dims(&self) -> &[u32] {
        &self.0
    }

    /// Total number of units covered.
    pub fn volume(&self) -> u64 {
        self.0.iter().map(|d| u64::from(*d)).product()
    }

    /// Pad to `(x, y, z)`, validating the extent.
    pub fn to_dim3(&self) -> Result<(u32, u32, u32)> {
        ensure!(
            (1..=3).contains(&self.0.len()),
            InvalidLaunchShapeSnafu { reason: format!("expected 1 to 3 dimensions, got {:?}", self.0) }
        );
        ensure!(
            self.0.iter().all(|d| *d > 0),
            InvalidLaunchShapeSnafu { reason: format!("zero-sized dimension in {:?}", self.0) }
        );
        let dim = |i: usize| self.0.get(i).copied().unwrap_or(1);
        Ok((dim(0), dim(1), dim(2)))
    }
}

impl From<u32> for Extent {
    fn from(value: u32) -> Self {
        Self(SmallVec::from_slice(&[value]))
    }
}

impl<const N: usize> From<[u32; N]> for Extent {
    fn from(value: [u32; N]) -> Self {
        Self(SmallVec::from_slice(&value))
    }
}

impl From<(u32, u32)> for Extent {
    fn from((x, y): (u32, u32)) -> Self {
        Self::from([x, y])
    }
}

impl From<(u32, u32, u32)> for Extent {
    fn from((x, y, z): (u32, u32, u32)) -> Self {
        Self::from([x, y, z])
    }
}

/// Grid shape, block shape and execution stream for a launch.
///
/// Pure configuration: owns no device memory.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub grid: Extent,
    pub block: Extent,
    pub stream: Arc<dyn Stream>,
}

impl LaunchConfig {
    pub fn new(grid: impl Into<Extent>, block: impl Into<Extent>, stream: Arc<dyn Stream>) -> Self {
        Self { grid: grid.into(), block: block.into(), stream }
    }

    /// One block of one unit.
    pub fn single(stream: Arc<dyn Stream>) -> Self {
        Self::new(1u32, 1u32, stream)
    }
}
