//! Result types for weld group analysis

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WeldResult;
use crate::loads::AppliedLoad;
use crate::math::Point2;

/// Stress-convention demand in one fiber
///
/// Only produced when every fiber in the group has a known throat thickness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FiberStress {
    /// Direct shear stress in X from Vx
    pub tau_x_direct: f64,
    /// Torsional shear stress in X from Mz
    pub tau_x_torsion: f64,
    /// Direct shear stress in Y from Vy
    pub tau_y_direct: f64,
    /// Torsional shear stress in Y from Mz
    pub tau_y_torsion: f64,
    /// Direct axial stress from Vz
    pub tau_z_direct: f64,
    /// Bending stress from Mx
    pub tau_z_mx: f64,
    /// Bending stress from My
    pub tau_z_my: f64,
    /// Total stress in X
    pub tau_x_total: f64,
    /// Total stress in Y
    pub tau_y_total: f64,
    /// Total stress in Z
    pub tau_z_total: f64,
    /// Simplified combined stress `sqrt(3 * (tx^2 + ty^2 + tz^2))`
    ///
    /// A distortion-energy-style combination of the three orthogonal
    /// components, not a full 3D von Mises tensor reduction. Kept as an
    /// approximation on purpose.
    pub sigma_combined: f64,
}

impl FiberStress {
    /// Create from the direct and secondary components, deriving the totals
    /// and the combined stress
    #[allow(clippy::too_many_arguments)]
    pub fn from_components(
        tau_x_direct: f64,
        tau_x_torsion: f64,
        tau_y_direct: f64,
        tau_y_torsion: f64,
        tau_z_direct: f64,
        tau_z_mx: f64,
        tau_z_my: f64,
    ) -> Self {
        let tau_x_total = tau_x_direct + tau_x_torsion;
        let tau_y_total = tau_y_direct + tau_y_torsion;
        let tau_z_total = tau_z_direct + tau_z_mx + tau_z_my;
        let sigma_combined =
            (3.0 * (tau_x_total.powi(2) + tau_y_total.powi(2) + tau_z_total.powi(2))).sqrt();
        Self {
            tau_x_direct,
            tau_x_torsion,
            tau_y_direct,
            tau_y_torsion,
            tau_z_direct,
            tau_z_mx,
            tau_z_my,
            tau_x_total,
            tau_y_total,
            tau_z_total,
            sigma_combined,
        }
    }
}

/// Demand in one fiber after a solve, in fiber insertion order
///
/// `v*` components are forces per unit length (unit-force convention);
/// `fx..mz` are the fiber's force/moment contributions to the equilibrium
/// check, computed with the fiber's actual (not effective) length.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FiberResult {
    /// Fiber centroid at solve time
    pub centroid: Point2,
    /// Actual fiber length
    pub length: f64,
    /// Thickness-normalized effective length used for demand weighting
    pub length_effective: f64,
    /// Throat thickness, if known
    pub thickness: Option<f64>,

    /// Direct demand in X from Vx
    pub vx_direct: f64,
    /// Torsional demand in X from Mz
    pub vx_torsion: f64,
    /// Direct demand in Y from Vy
    pub vy_direct: f64,
    /// Torsional demand in Y from Mz
    pub vy_torsion: f64,
    /// Direct demand in Z from Vz
    pub vz_direct: f64,
    /// Bending demand from Mx
    pub vz_mx: f64,
    /// Bending demand from My
    pub vz_my: f64,
    /// Total demand in X
    pub vx_total: f64,
    /// Total demand in Y
    pub vy_total: f64,
    /// Total demand in Z
    pub vz_total: f64,
    /// Resultant demand magnitude
    pub v_resultant: f64,

    /// Force contribution in X to the equilibrium check
    pub fx: f64,
    /// Force contribution in Y to the equilibrium check
    pub fy: f64,
    /// Force contribution in Z to the equilibrium check
    pub fz: f64,
    /// Moment contribution about X to the equilibrium check
    pub mx: f64,
    /// Moment contribution about Y to the equilibrium check
    pub my: f64,
    /// Moment contribution about Z to the equilibrium check
    pub mz: f64,

    /// Stress-convention demand; `None` for force-only groups
    pub stress: Option<FiberStress>,
}

/// Applied load, summed fiber reaction, and residual on one axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AxisResidual {
    /// Externally applied component
    pub applied: f64,
    /// Sum of fiber contributions
    pub resisted: f64,
    /// `applied + resisted`; zero for a closed axis
    pub residual: f64,
}

impl AxisResidual {
    pub(crate) fn new(applied: f64, resisted: f64) -> Self {
        Self {
            applied,
            resisted,
            residual: applied + resisted,
        }
    }

    /// True when the residual is finite and within tolerance
    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.residual.is_finite() && self.residual.abs() <= tolerance
    }
}

/// Per-axis closure diagnostics for the equilibrium self-check
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EquilibriumReport {
    /// Force closure in X
    pub fx: AxisResidual,
    /// Force closure in Y
    pub fy: AxisResidual,
    /// Force closure in Z
    pub fz: AxisResidual,
    /// Moment closure about X
    pub mx: AxisResidual,
    /// Moment closure about Y
    pub my: AxisResidual,
    /// Moment closure about Z
    pub mz: AxisResidual,
    /// Per-axis tolerance the residuals were checked against
    pub tolerance: f64,
}

impl EquilibriumReport {
    /// The six axes with their labels, in Fx..Mz order
    pub fn axes(&self) -> [(&'static str, AxisResidual); 6] {
        [
            ("Fx", self.fx),
            ("Fy", self.fy),
            ("Fz", self.fz),
            ("Mx", self.mx),
            ("My", self.my),
            ("Mz", self.mz),
        ]
    }

    /// True when every axis closes within tolerance
    pub fn is_closed(&self) -> bool {
        self.axes().iter().all(|(_, a)| a.is_closed(self.tolerance))
    }

    /// Largest absolute residual across the six axes
    pub fn max_residual(&self) -> f64 {
        self.axes()
            .iter()
            .map(|(_, a)| a.residual.abs())
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for EquilibriumReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, axis) in self.axes() {
            writeln!(
                f,
                "  {name}: applied = {:>12.4}, resisted = {:>12.4}, residual = {:>12.4e}",
                axis.applied, axis.resisted, axis.residual
            )?;
        }
        write!(f, "  tolerance = {}", self.tolerance)
    }
}

/// One row per fiber plus the closure diagnostics for a successful solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<FiberResult>,
    applied: AppliedLoad,
    equilibrium: EquilibriumReport,
    principal_axis_warning: bool,
}

impl ResultTable {
    pub(crate) fn new(
        rows: Vec<FiberResult>,
        applied: AppliedLoad,
        equilibrium: EquilibriumReport,
        principal_axis_warning: bool,
    ) -> Self {
        Self {
            rows,
            applied,
            equilibrium,
            principal_axis_warning,
        }
    }

    /// Per-fiber rows in fiber insertion order
    pub fn rows(&self) -> &[FiberResult] {
        &self.rows
    }

    /// The load this table was solved for
    pub fn applied(&self) -> AppliedLoad {
        self.applied
    }

    /// Closure diagnostics (always closed for a returned table)
    pub fn equilibrium(&self) -> &EquilibriumReport {
        &self.equilibrium
    }

    /// True when the group was not in principal orientation at solve time
    pub fn principal_axis_warning(&self) -> bool {
        self.principal_axis_warning
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows
    pub fn iter(&self) -> std::slice::Iter<'_, FiberResult> {
        self.rows.iter()
    }

    /// Row index and value of the largest resultant demand
    pub fn max_resultant(&self) -> Option<(usize, f64)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, r)| (i, r.v_resultant))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Row index and value of the largest combined stress, if available
    pub fn max_combined_stress(&self) -> Option<(usize, f64)> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.stress.map(|s| (i, s.sigma_combined)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Export the table as a JSON string
    pub fn to_json(&self) -> WeldResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a FiberResult;
    type IntoIter = std::slice::Iter<'a, FiberResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
