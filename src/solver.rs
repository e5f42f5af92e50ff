//! Elastic superposition of applied loads onto weld fibers
//!
//! Each of the six load components is distributed over the fibers using the
//! composite section properties, then the per-fiber reactions are integrated
//! back to global sums and checked for closure against the applied load. The
//! closure check is a self-consistency diagnostic on the superposition
//! formulas, not a property of the input; a failure is fatal.

use crate::config::GroupConfig;
use crate::error::{WeldError, WeldResult};
use crate::fiber::WeldFiber;
use crate::loads::AppliedLoad;
use crate::math;
use crate::properties::{GroupProperties, SectionProperties};
use crate::results::{AxisResidual, EquilibriumReport, FiberResult, FiberStress, ResultTable};

/// Secondary-term division that stays zero when the driving moment is zero
///
/// An unloaded bending axis must not poison the row with 0/0 when the group
/// has no inertia about that axis.
fn secondary(moment: f64, arm: f64, inertia: f64) -> f64 {
    if moment == 0.0 {
        0.0
    } else {
        moment * arm / inertia
    }
}

/// Demand in one fiber for one convention's section properties
struct Components {
    x_direct: f64,
    x_torsion: f64,
    y_direct: f64,
    y_torsion: f64,
    z_direct: f64,
    z_mx: f64,
    z_my: f64,
}

impl Components {
    /// Superpose the six load components at lever arms (dx, dy) from the
    /// convention centroid; `scale` is the effective-length factor for the
    /// unit-force convention and 1 for the stress convention
    fn superpose(load: &AppliedLoad, props: &SectionProperties, dx: f64, dy: f64, scale: f64) -> Self {
        Self {
            x_direct: -load.vx / props.total * scale,
            x_torsion: secondary(load.mz, dy, props.iz) * scale,
            y_direct: -load.vy / props.total * scale,
            y_torsion: -secondary(load.mz, dx, props.iz) * scale,
            z_direct: -load.vz / props.total * scale,
            z_mx: -secondary(load.mx, dy, props.ix) * scale,
            z_my: secondary(load.my, dx, props.iy) * scale,
        }
    }
}

/// Distribute the applied load over the fibers and verify closure
pub(crate) fn solve(
    fibers: &[WeldFiber],
    props: &GroupProperties,
    load: &AppliedLoad,
    config: &GroupConfig,
) -> WeldResult<ResultTable> {
    log::debug!(
        "solving weld group: {} fibers, load {:?}",
        fibers.len(),
        load.as_array()
    );

    let force_props = &props.force;
    let mut rows = Vec::with_capacity(fibers.len());

    let mut sum_fx = 0.0;
    let mut sum_fy = 0.0;
    let mut sum_fz = 0.0;
    let mut sum_mx = 0.0;
    let mut sum_my = 0.0;
    let mut sum_mz = 0.0;

    for fiber in fibers {
        let dx = fiber.centroid.x - force_props.centroid.x;
        let dy = fiber.centroid.y - force_props.centroid.y;
        let length_effective = fiber.effective_thickness() / props.min_thickness * fiber.length;
        let factor = length_effective / fiber.length;

        let v = Components::superpose(load, force_props, dx, dy, factor);
        let vx_total = v.x_direct + v.x_torsion;
        let vy_total = v.y_direct + v.y_torsion;
        let vz_total = v.z_direct + v.z_mx + v.z_my;

        // Reaction contributions integrate demand over the actual length
        let fx = vx_total * fiber.length;
        let fy = vy_total * fiber.length;
        let fz = vz_total * fiber.length;
        let mx = fz * dy;
        let my = -fz * dx;
        let mz = -fx * dy + fy * dx;

        sum_fx += fx;
        sum_fy += fy;
        sum_fz += fz;
        sum_mx += mx;
        sum_my += my;
        sum_mz += mz;

        // Stress is intrinsically thickness-normalized: same superposition
        // against the true-area properties, without the effective-length scale
        let stress = props.stress.as_ref().map(|stress_props| {
            let sdx = fiber.centroid.x - stress_props.centroid.x;
            let sdy = fiber.centroid.y - stress_props.centroid.y;
            let t = Components::superpose(load, stress_props, sdx, sdy, 1.0);
            FiberStress::from_components(
                t.x_direct, t.x_torsion, t.y_direct, t.y_torsion, t.z_direct, t.z_mx, t.z_my,
            )
        });

        rows.push(FiberResult {
            centroid: fiber.centroid,
            length: fiber.length,
            length_effective,
            thickness: fiber.thickness,
            vx_direct: v.x_direct,
            vx_torsion: v.x_torsion,
            vy_direct: v.y_direct,
            vy_torsion: v.y_torsion,
            vz_direct: v.z_direct,
            vz_mx: v.z_mx,
            vz_my: v.z_my,
            vx_total,
            vy_total,
            vz_total,
            v_resultant: math::resultant(vx_total, vy_total, vz_total),
            fx,
            fy,
            fz,
            mx,
            my,
            mz,
            stress,
        });
    }

    let report = EquilibriumReport {
        fx: AxisResidual::new(load.vx, sum_fx),
        fy: AxisResidual::new(load.vy, sum_fy),
        fz: AxisResidual::new(load.vz, sum_fz),
        mx: AxisResidual::new(load.mx, sum_mx),
        my: AxisResidual::new(load.my, sum_my),
        mz: AxisResidual::new(load.mz, sum_mz),
        tolerance: config.equilibrium_tolerance,
    };

    if !report.is_closed() {
        return Err(WeldError::Equilibrium(report));
    }
    log::debug!("equilibrium closed, max residual {:.3e}", report.max_residual());

    Ok(ResultTable::new(
        rows,
        *load,
        report,
        props.principal_axis_warning,
    ))
}
