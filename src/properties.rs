//! Composite section properties of a weld group
//!
//! Properties are derived state: they are recomputed from scratch from the
//! current fiber list on every geometry change, never patched incrementally.

use serde::{Deserialize, Serialize};

use crate::config::GroupConfig;
use crate::error::{WeldError, WeldResult};
use crate::fiber::WeldFiber;
use crate::math::{self, Point2};

/// Geometric properties of the composite weld section in one convention
///
/// In the stress convention every quantity is weighted by fiber throat area.
/// In the unit-force convention the weight is the thickness-normalized
/// effective length, one length dimension lower in every property; this is
/// the convention used to check force-per-unit-length demand against
/// allowable-force tables before a throat size is committed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Weighted centroid of the group
    pub centroid: Point2,
    /// Total weight: throat area (stress) or effective length (unit-force)
    pub total: f64,
    /// Second moment about the centroidal X axis
    pub ix: f64,
    /// Second moment about the centroidal Y axis
    pub iy: f64,
    /// Polar moment about the centroid, equal to `ix + iy`
    pub iz: f64,
    /// Product of inertia about the centroidal axes
    pub ixy: f64,
    /// Section modulus to the extreme fiber above the X axis
    pub sx_top: f64,
    /// Section modulus to the extreme fiber below the X axis
    pub sx_bottom: f64,
    /// Section modulus to the extreme fiber right of the Y axis
    pub sy_right: f64,
    /// Section modulus to the extreme fiber left of the Y axis
    pub sy_left: f64,
    /// Principal-axis angle in degrees
    pub theta_p_deg: f64,
}

/// Properties of a weld group in both reporting conventions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupProperties {
    /// Unit-force convention properties, always available
    pub force: SectionProperties,
    /// Stress convention properties; `None` when any fiber lacks a thickness
    pub stress: Option<SectionProperties>,
    /// Sum of actual fiber lengths
    pub length_total: f64,
    /// Sum of thickness-normalized effective lengths
    pub length_effective_total: f64,
    /// Smallest effective throat thickness in the group
    pub min_thickness: f64,
    /// True when the group is not aligned with its principal axes, in which
    /// case uncoupled flexural superposition is unreliable
    pub principal_axis_warning: bool,
}

/// Compute both-convention properties from the current fiber list
pub(crate) fn compute(
    fibers: &[WeldFiber],
    config: &GroupConfig,
    stress_capable: bool,
) -> WeldResult<GroupProperties> {
    if fibers.is_empty() {
        return Err(WeldError::EmptyGroup);
    }

    let min_thickness = fibers
        .iter()
        .map(WeldFiber::effective_thickness)
        .fold(f64::INFINITY, f64::min);
    let length_total = fibers.iter().map(|f| f.length).sum();

    let force = compute_convention(fibers, config, |f| {
        f.effective_thickness() / min_thickness * f.length
    });
    let length_effective_total = force.total;

    let stress = if stress_capable {
        Some(compute_convention(fibers, config, |f| f.area()))
    } else {
        None
    };

    let theta = force.theta_p_deg;
    let principal_axis_warning = theta.abs() > config.alignment_tolerance_deg;
    if principal_axis_warning {
        log::warn!(
            "weld group is {theta:.3} deg away from its principal axes; \
             bending superposition assumes negligible product of inertia - \
             rotate the group into principal orientation before relying on results"
        );
    }

    Ok(GroupProperties {
        force,
        stress,
        length_total,
        length_effective_total,
        min_thickness,
        principal_axis_warning,
    })
}

/// Compute one convention's properties with the given per-fiber weight
fn compute_convention(
    fibers: &[WeldFiber],
    config: &GroupConfig,
    weight: impl Fn(&WeldFiber) -> f64,
) -> SectionProperties {
    // Weighted centroid
    let mut total = 0.0;
    let mut moment_x = 0.0;
    let mut moment_y = 0.0;
    for fiber in fibers {
        let w = weight(fiber);
        total += w;
        moment_x += fiber.centroid.x * w;
        moment_y += fiber.centroid.y * w;
    }
    let centroid = Point2::new(moment_x / total, moment_y / total);

    // Second moments about the centroidal axes
    let mut ix = 0.0;
    let mut iy = 0.0;
    let mut ixy = 0.0;
    for fiber in fibers {
        let w = weight(fiber);
        let dx = fiber.centroid.x - centroid.x;
        let dy = fiber.centroid.y - centroid.y;
        ix += w * dy * dy;
        iy += w * dx * dx;
        ixy += w * dx * dy;
    }
    let iz = ix + iy;

    // Extreme fiber distances use the full extent of every fiber, not just
    // its centroid
    let mut above = 0.0_f64;
    let mut below = 0.0_f64;
    let mut right = 0.0_f64;
    let mut left = 0.0_f64;
    for fiber in fibers {
        for point in [&fiber.start, &fiber.end, &fiber.centroid] {
            let dx = point.x - centroid.x;
            let dy = point.y - centroid.y;
            above = above.max(dy);
            below = below.max(-dy);
            right = right.max(dx);
            left = left.max(-dx);
        }
    }

    // A side with no extent has no flexural lever arm; report a zero modulus
    let tol = config.property_tolerance;
    let modulus = |moment: f64, extent: f64| if extent > tol { moment / extent } else { 0.0 };

    SectionProperties {
        centroid,
        total,
        ix,
        iy,
        iz,
        ixy,
        sx_top: modulus(ix, above),
        sx_bottom: modulus(ix, below),
        sy_right: modulus(iy, right),
        sy_left: modulus(iy, left),
        theta_p_deg: math::principal_angle_deg(ix, iy, ixy, config.property_tolerance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fiber(start: (f64, f64), end: (f64, f64), thickness: Option<f64>) -> WeldFiber {
        WeldFiber::new(
            Point2::new(start.0, start.1),
            Point2::new(end.0, end.1),
            thickness,
        )
        .unwrap()
    }

    #[test]
    fn test_two_horizontal_fibers() {
        // Two fibers of length 2 at y = +/-1, unit thickness
        let fibers = vec![
            fiber((-1.0, 1.0), (1.0, 1.0), Some(1.0)),
            fiber((-1.0, -1.0), (1.0, -1.0), Some(1.0)),
        ];
        let props = compute(&fibers, &GroupConfig::default(), true).unwrap();

        let force = &props.force;
        assert_relative_eq!(force.centroid.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(force.centroid.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(force.total, 4.0);
        assert_relative_eq!(force.ix, 4.0);
        assert_relative_eq!(force.iy, 0.0, epsilon = 1e-12);
        assert_relative_eq!(force.iz, force.ix + force.iy);
        assert_relative_eq!(force.sx_top, 4.0);
        assert_relative_eq!(force.theta_p_deg, 0.0);

        // Unit thickness makes the two conventions coincide
        let stress = props.stress.expect("all fibers have thickness");
        assert_relative_eq!(stress.ix, force.ix);
        assert_relative_eq!(stress.total, force.total);
    }

    #[test]
    fn test_effective_length_scales_to_thinnest() {
        // The thicker fiber is weighted up relative to the group minimum
        let fibers = vec![
            fiber((0.0, 0.0), (0.0, 2.0), Some(0.5)),
            fiber((4.0, 0.0), (4.0, 2.0), Some(0.25)),
        ];
        let props = compute(&fibers, &GroupConfig::default(), true).unwrap();

        assert_relative_eq!(props.min_thickness, 0.25);
        assert_relative_eq!(props.length_total, 4.0);
        // le = (0.5/0.25)*2 + (0.25/0.25)*2
        assert_relative_eq!(props.length_effective_total, 6.0);
        // Centroid leans toward the thicker fiber: (4*0 + 2*4)/6
        assert_relative_eq!(props.force.centroid.x, 4.0 / 3.0);

        // Stress convention weights by true area: (1.0*0 + 0.5*4)/1.5
        let stress = props.stress.unwrap();
        assert_relative_eq!(stress.centroid.x, 4.0 / 3.0);
    }

    #[test]
    fn test_force_only_group_has_no_stress_properties() {
        let fibers = vec![fiber((0.0, 0.0), (0.0, 2.0), None)];
        let props = compute(&fibers, &GroupConfig::default(), false).unwrap();
        assert!(props.stress.is_none());
        assert_relative_eq!(props.force.total, 2.0);
    }

    #[test]
    fn test_degenerate_modulus_is_zero() {
        // A single horizontal fiber has no extent about its own X axis
        let fibers = vec![fiber((0.0, 0.0), (2.0, 0.0), Some(1.0))];
        let props = compute(&fibers, &GroupConfig::default(), true).unwrap();
        assert_relative_eq!(props.force.ix, 0.0, epsilon = 1e-12);
        assert_relative_eq!(props.force.sx_top, 0.0);
        assert!(props.force.sy_right > 0.0);
    }

    #[test]
    fn test_empty_group_rejected() {
        assert!(compute(&[], &GroupConfig::default(), true).is_err());
    }
}
