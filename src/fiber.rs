//! Weld fiber - the atomic discretized segment of a weld group

use serde::{Deserialize, Serialize};

use crate::error::{WeldError, WeldResult};
use crate::math::{midpoint, Point2, Rot2};

/// A short straight segment of weld produced by discretization
///
/// Fibers are immutable once created except for their coordinates, which are
/// rotated in place when the owning group is rotated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeldFiber {
    /// Start point of the fiber
    pub start: Point2,
    /// End point of the fiber
    pub end: Point2,
    /// Midpoint of start/end, kept in sync under rotation
    pub centroid: Point2,
    /// Throat thickness; `None` puts the owning group in force-only reporting
    pub thickness: Option<f64>,
    /// Euclidean distance between start and end, always positive
    pub length: f64,
}

impl WeldFiber {
    /// Create a new fiber between two points
    pub fn new(start: Point2, end: Point2, thickness: Option<f64>) -> WeldResult<Self> {
        let length = (end - start).norm();
        if length < 1e-10 {
            return Err(WeldError::InvalidGeometry(format!(
                "fiber has zero length at ({:.4}, {:.4})",
                start.x, start.y
            )));
        }
        if let Some(t) = thickness {
            if t <= 0.0 {
                return Err(WeldError::InvalidGeometry(format!(
                    "throat thickness must be positive, got {t}"
                )));
            }
        }
        Ok(Self {
            start,
            end,
            centroid: midpoint(&start, &end),
            thickness,
            length,
        })
    }

    /// Throat thickness with the unit placeholder applied for force-only fibers
    pub fn effective_thickness(&self) -> f64 {
        self.thickness.unwrap_or(1.0)
    }

    /// Throat area resisting force (`thickness * length`)
    pub fn area(&self) -> f64 {
        self.effective_thickness() * self.length
    }

    /// Rotate the fiber about the global origin and recompute the centroid
    pub(crate) fn rotate(&mut self, rotation: &Rot2) {
        self.start = rotation * self.start;
        self.end = rotation * self.end;
        self.centroid = midpoint(&self.start, &self.end);
    }
}
