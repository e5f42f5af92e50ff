//! Weld group - the main analysis container
//!
//! A `WeldGroup` owns an ordered list of fibers built from line, rectangle,
//! and circle primitives, keeps its composite section properties current as
//! geometry changes, and distributes applied loads over the fibers on solve.

use serde::{Deserialize, Serialize};

use crate::config::GroupConfig;
use crate::error::{WeldError, WeldResult};
use crate::fiber::WeldFiber;
use crate::loads::AppliedLoad;
use crate::math::{self, Point2};
use crate::properties::{self, GroupProperties};
use crate::results::ResultTable;
use crate::solver;

/// How demand is reported for a group
///
/// Decided at the first fiber insertion and re-validated on every subsequent
/// insertion. Once any fiber lacks a throat thickness the group is force-only
/// for good; stress reporting never comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportingMode {
    /// Every fiber has a throat thickness; stress results are available
    StressCapable,
    /// At least one fiber has no thickness; force-per-length results only
    ForceOnly,
}

/// A two-dimensional arrangement of weld fibers under combined loading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeldGroup {
    fibers: Vec<WeldFiber>,
    config: GroupConfig,
    mode: Option<ReportingMode>,
    properties: Option<GroupProperties>,
    applied: Option<AppliedLoad>,
    results: Option<ResultTable>,
}

impl Default for WeldGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl WeldGroup {
    /// Create an empty group with default configuration
    pub fn new() -> Self {
        Self::with_config(GroupConfig::default())
    }

    /// Create an empty group with explicit configuration
    pub fn with_config(config: GroupConfig) -> Self {
        Self {
            fibers: Vec::new(),
            config,
            mode: None,
            properties: None,
            applied: None,
            results: None,
        }
    }

    // ========================
    // Geometry Building Methods
    // ========================

    /// Add a straight weld strip between two points
    ///
    /// The strip is divided into equal fibers no longer than the configured
    /// patch size, with a floor of one fiber for strips shorter than the
    /// patch. Passing `None` for thickness switches the whole group to
    /// force-only reporting.
    pub fn add_line(
        &mut self,
        start: Point2,
        end: Point2,
        thickness: Option<f64>,
    ) -> WeldResult<()> {
        let batch = self.line_fibers(start, end, thickness)?;
        self.push_fibers(batch);
        Ok(())
    }

    /// Add the four boundary lines of a rectangle (the interior is not filled)
    pub fn add_rectangle(
        &mut self,
        origin: Point2,
        width: f64,
        height: f64,
        thickness: Option<f64>,
    ) -> WeldResult<()> {
        if width <= 0.0 || height <= 0.0 {
            return Err(WeldError::InvalidGeometry(format!(
                "rectangle must have positive width and height, got {width} x {height}"
            )));
        }

        let (x0, y0) = (origin.x, origin.y);
        let (x1, y1) = (x0 + width, y0 + height);
        let corners = [
            (Point2::new(x0, y0), Point2::new(x1, y0)), // bottom
            (Point2::new(x0, y1), Point2::new(x1, y1)), // top
            (Point2::new(x0, y0), Point2::new(x0, y1)), // left
            (Point2::new(x1, y0), Point2::new(x1, y1)), // right
        ];

        let mut batch = Vec::new();
        for (a, b) in corners {
            batch.extend(self.line_fibers(a, b, thickness)?);
        }
        self.push_fibers(batch);
        Ok(())
    }

    /// Add a circle as a closed polygon of straight fibers
    ///
    /// The segment count follows the patch-size target with a floor at the
    /// configured minimum; fewer segments would degenerate the polygon
    /// approximation.
    pub fn add_circle(
        &mut self,
        center: Point2,
        diameter: f64,
        thickness: Option<f64>,
    ) -> WeldResult<()> {
        if diameter <= 0.0 {
            return Err(WeldError::InvalidGeometry(format!(
                "circle must have positive diameter, got {diameter}"
            )));
        }

        let circumference = std::f64::consts::PI * diameter;
        let segments = ((circumference / self.config.patch_size).ceil() as usize)
            .max(self.config.min_circle_segments);
        let radius = diameter / 2.0;

        let vertex = |i: usize| {
            let angle = 2.0 * std::f64::consts::PI * (i % segments) as f64 / segments as f64;
            Point2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        };

        let mut batch = Vec::with_capacity(segments);
        for i in 0..segments {
            batch.push(WeldFiber::new(vertex(i), vertex(i + 1), thickness)?);
        }
        self.push_fibers(batch);
        Ok(())
    }

    /// Rotate the whole group about the global origin
    /// (counter-clockwise positive, degrees)
    ///
    /// Rotating by an angle and then its negation restores every coordinate
    /// within floating-point tolerance.
    pub fn rotate(&mut self, angle_degrees: f64) {
        let rotation = math::rotation_about_origin(angle_degrees);
        for fiber in &mut self.fibers {
            fiber.rotate(&rotation);
        }
        self.invalidate_and_refresh();
    }

    // ========================
    // Analysis
    // ========================

    /// Distribute the six applied load components over the fibers
    ///
    /// Fails fast on an empty group or an all-zero load, and fails after full
    /// computation if the integrated fiber reactions do not close against the
    /// applied load. On success the table is stored on the group and returned.
    pub fn solve(&mut self, load: AppliedLoad) -> WeldResult<ResultTable> {
        if self.fibers.is_empty() {
            return Err(WeldError::EmptyGroup);
        }
        if load.is_zero() {
            return Err(WeldError::NoLoad);
        }

        // Fresh properties per solve: effective lengths depend on the current
        // minimum thickness across all fibers
        let props = properties::compute(&self.fibers, &self.config, self.is_stress_capable())?;
        let table = solver::solve(&self.fibers, &props, &load, &self.config)?;

        self.properties = Some(props);
        self.applied = Some(load);
        self.results = Some(table.clone());
        Ok(table)
    }

    // ========================
    // Accessors
    // ========================

    /// Fibers in insertion order
    pub fn fibers(&self) -> &[WeldFiber] {
        &self.fibers
    }

    /// Number of fibers
    pub fn len(&self) -> usize {
        self.fibers.len()
    }

    /// True when no fibers have been added yet
    pub fn is_empty(&self) -> bool {
        self.fibers.is_empty()
    }

    /// The group configuration
    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    /// Reporting mode; `None` before the first fiber is added
    pub fn mode(&self) -> Option<ReportingMode> {
        self.mode
    }

    /// Composite section properties, current with the fiber list
    pub fn properties(&self) -> Option<&GroupProperties> {
        self.properties.as_ref()
    }

    /// The load from the most recent successful solve
    pub fn applied_load(&self) -> Option<AppliedLoad> {
        self.applied
    }

    /// The result table from the most recent successful solve
    pub fn results(&self) -> Option<&ResultTable> {
        self.results.as_ref()
    }

    // ========================
    // Internals
    // ========================

    /// Discretize one line into equal fibers without mutating the group
    fn line_fibers(
        &self,
        start: Point2,
        end: Point2,
        thickness: Option<f64>,
    ) -> WeldResult<Vec<WeldFiber>> {
        let length = (end - start).norm();
        if length < 1e-10 {
            return Err(WeldError::InvalidGeometry(format!(
                "line has zero length at ({:.4}, {:.4})",
                start.x, start.y
            )));
        }

        let segments = ((length / self.config.patch_size).ceil() as usize).max(1);
        let step = (end - start) / segments as f64;

        let mut fibers = Vec::with_capacity(segments);
        for i in 0..segments {
            let a = start + step * i as f64;
            // Land exactly on the given endpoint to avoid accumulated drift
            let b = if i + 1 == segments {
                end
            } else {
                start + step * (i + 1) as f64
            };
            fibers.push(WeldFiber::new(a, b, thickness)?);
        }
        Ok(fibers)
    }

    /// Append a validated batch, update the reporting mode, and recompute
    /// derived state
    fn push_fibers(&mut self, batch: Vec<WeldFiber>) {
        for fiber in &batch {
            self.note_thickness(fiber.thickness);
        }
        self.fibers.extend(batch);
        self.invalidate_and_refresh();
    }

    /// Fold one fiber's thickness into the reporting mode (one-way downgrade)
    fn note_thickness(&mut self, thickness: Option<f64>) {
        let incoming = if thickness.is_some() {
            ReportingMode::StressCapable
        } else {
            ReportingMode::ForceOnly
        };
        self.mode = Some(match self.mode {
            None => incoming,
            Some(ReportingMode::ForceOnly) => ReportingMode::ForceOnly,
            Some(ReportingMode::StressCapable) => incoming,
        });
    }

    fn is_stress_capable(&self) -> bool {
        matches!(self.mode, Some(ReportingMode::StressCapable))
    }

    /// Drop stale results and recompute section properties from scratch
    fn invalidate_and_refresh(&mut self) {
        self.applied = None;
        self.results = None;
        self.properties = if self.fibers.is_empty() {
            None
        } else {
            properties::compute(&self.fibers, &self.config, self.is_stress_capable()).ok()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_segment_count() {
        let mut group = WeldGroup::new();
        group
            .add_line(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0), Some(0.25))
            .unwrap();
        // patch size 0.1 over length 1.0
        assert_eq!(group.len(), 10);
        let total: f64 = group.fibers().iter().map(|f| f.length).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_short_line_gets_one_fiber() {
        let mut group = WeldGroup::new();
        group
            .add_line(Point2::new(0.0, 0.0), Point2::new(0.01, 0.0), Some(0.25))
            .unwrap();
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_zero_length_line_rejected() {
        let mut group = WeldGroup::new();
        let result = group.add_line(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0), None);
        assert!(matches!(result, Err(WeldError::InvalidGeometry(_))));
        assert!(group.is_empty());
    }

    #[test]
    fn test_rectangle_is_atomic_on_bad_input() {
        let mut group = WeldGroup::new();
        let result = group.add_rectangle(Point2::new(0.0, 0.0), 4.0, 0.0, Some(0.25));
        assert!(result.is_err());
        assert!(group.is_empty());
        assert!(group.properties().is_none());
    }

    #[test]
    fn test_rectangle_boundary_length() {
        let mut group = WeldGroup::new();
        group
            .add_rectangle(Point2::new(-2.0, -3.0), 4.0, 6.0, Some(0.25))
            .unwrap();
        let props = group.properties().unwrap();
        assert_relative_eq!(props.length_total, 20.0, epsilon = 1e-9);
        let centroid = props.force.centroid;
        assert_relative_eq!(centroid.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(centroid.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_circle_segment_floor() {
        // A huge patch size would give 1-2 chords; the floor keeps the polygon
        let config = GroupConfig::default().with_patch_size(100.0);
        let mut group = WeldGroup::with_config(config);
        group
            .add_circle(Point2::new(0.0, 0.0), 12.0, Some(0.3125))
            .unwrap();
        assert_eq!(group.len(), group.config().min_circle_segments);
    }

    #[test]
    fn test_circle_closes() {
        let mut group = WeldGroup::new();
        group
            .add_circle(Point2::new(3.0, -1.0), 2.0, None)
            .unwrap();
        let fibers = group.fibers();
        let first = fibers.first().unwrap();
        let last = fibers.last().unwrap();
        assert_relative_eq!(last.end.x, first.start.x, epsilon = 1e-12);
        assert_relative_eq!(last.end.y, first.start.y, epsilon = 1e-12);
    }

    #[test]
    fn test_mode_downgrade_is_one_way() {
        let mut group = WeldGroup::new();
        group
            .add_line(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0), Some(0.25))
            .unwrap();
        assert_eq!(group.mode(), Some(ReportingMode::StressCapable));

        group
            .add_line(Point2::new(1.0, 0.0), Point2::new(1.0, 1.0), None)
            .unwrap();
        assert_eq!(group.mode(), Some(ReportingMode::ForceOnly));

        // A later thickness does not restore stress reporting
        group
            .add_line(Point2::new(2.0, 0.0), Point2::new(2.0, 1.0), Some(0.25))
            .unwrap();
        assert_eq!(group.mode(), Some(ReportingMode::ForceOnly));
        assert!(group.properties().unwrap().stress.is_none());
    }

    #[test]
    fn test_rotation_refreshes_properties() {
        let mut group = WeldGroup::new();
        group
            .add_line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), Some(0.25))
            .unwrap();
        let ix_before = group.properties().unwrap().force.ix;
        assert_relative_eq!(ix_before, 0.0, epsilon = 1e-9);

        group.rotate(90.0);
        let ix_after = group.properties().unwrap().force.ix;
        assert!(ix_after > 1.0, "rotation must move inertia between axes");
    }

    #[test]
    fn test_solve_requires_fibers_and_load() {
        let mut group = WeldGroup::new();
        assert!(matches!(
            group.solve(AppliedLoad::vy(10.0)),
            Err(WeldError::EmptyGroup)
        ));

        group
            .add_line(Point2::new(0.0, 0.0), Point2::new(0.0, 10.0), Some(0.3125))
            .unwrap();
        assert!(matches!(
            group.solve(AppliedLoad::default()),
            Err(WeldError::NoLoad)
        ));
    }

    #[test]
    fn test_solve_stores_results() {
        let mut group = WeldGroup::new();
        group
            .add_line(Point2::new(0.0, 0.0), Point2::new(0.0, 10.0), Some(0.3125))
            .unwrap();
        let table = group.solve(AppliedLoad::vy(100.0)).unwrap();
        assert_eq!(table.len(), group.len());
        assert!(group.results().is_some());
        assert_eq!(group.applied_load(), Some(AppliedLoad::vy(100.0)));
    }
}
