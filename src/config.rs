//! Configuration for discretization and solver tolerances

use serde::{Deserialize, Serialize};

/// Tunable constants for a weld group
///
/// Passed to [`WeldGroup::with_config`](crate::group::WeldGroup::with_config)
/// so independently configured groups can coexist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Maximum fiber length produced by discretization
    pub patch_size: f64,
    /// Minimum segment count for a circle (fewer produces a degenerate polygon)
    pub min_circle_segments: usize,
    /// Principal-axis angle (degrees) beyond which a misalignment warning is raised
    pub alignment_tolerance_deg: f64,
    /// Absolute tolerance for degenerate-case branches in property calculations
    pub property_tolerance: f64,
    /// Per-axis tolerance for the equilibrium closure check (force/moment units)
    pub equilibrium_tolerance: f64,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            patch_size: 0.1,
            min_circle_segments: 6,
            alignment_tolerance_deg: 0.1,
            property_tolerance: 1e-9,
            equilibrium_tolerance: 0.1,
        }
    }
}

impl GroupConfig {
    /// Set the maximum fiber length
    pub fn with_patch_size(mut self, patch_size: f64) -> Self {
        self.patch_size = patch_size;
        self
    }

    /// Set the minimum circle segment count
    pub fn with_min_circle_segments(mut self, segments: usize) -> Self {
        self.min_circle_segments = segments;
        self
    }

    /// Set the principal-axis misalignment warning threshold (degrees)
    pub fn with_alignment_tolerance(mut self, degrees: f64) -> Self {
        self.alignment_tolerance_deg = degrees;
        self
    }

    /// Set the equilibrium closure tolerance
    pub fn with_equilibrium_tolerance(mut self, tolerance: f64) -> Self {
        self.equilibrium_tolerance = tolerance;
        self
    }
}
