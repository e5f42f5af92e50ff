//! Applied loads - the six force and moment components acting on a weld group

use serde::{Deserialize, Serialize};

/// The in-plane shears, out-of-plane shear, and moments applied at the
/// weld group centroid
///
/// Moments follow a right-hand rule about the centroid; `mz` is the in-plane
/// torsion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedLoad {
    /// In-plane shear in X direction
    pub vx: f64,
    /// In-plane shear in Y direction
    pub vy: f64,
    /// Out-of-plane (axial) force
    pub vz: f64,
    /// Bending moment about the X axis
    pub mx: f64,
    /// Bending moment about the Y axis
    pub my: f64,
    /// Torsion about the Z axis
    pub mz: f64,
}

impl AppliedLoad {
    /// Create a load with all six components
    pub fn new(vx: f64, vy: f64, vz: f64, mx: f64, my: f64, mz: f64) -> Self {
        Self {
            vx,
            vy,
            vz,
            mx,
            my,
            mz,
        }
    }

    /// Create a force-only load
    pub fn force(vx: f64, vy: f64, vz: f64) -> Self {
        Self::new(vx, vy, vz, 0.0, 0.0, 0.0)
    }

    /// Create a moment-only load
    pub fn moment(mx: f64, my: f64, mz: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, mx, my, mz)
    }

    /// Create a shear load in X direction
    pub fn vx(value: f64) -> Self {
        Self::force(value, 0.0, 0.0)
    }

    /// Create a shear load in Y direction
    pub fn vy(value: f64) -> Self {
        Self::force(0.0, value, 0.0)
    }

    /// Create an out-of-plane load
    pub fn vz(value: f64) -> Self {
        Self::force(0.0, 0.0, value)
    }

    /// Create a torsion-only load
    pub fn torsion(value: f64) -> Self {
        Self::moment(0.0, 0.0, value)
    }

    /// Get the load as an array [Vx, Vy, Vz, Mx, My, Mz]
    pub fn as_array(&self) -> [f64; 6] {
        [self.vx, self.vy, self.vz, self.mx, self.my, self.mz]
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.vx * factor,
            self.vy * factor,
            self.vz * factor,
            self.mx * factor,
            self.my * factor,
            self.mz * factor,
        )
    }

    /// True when every component is exactly zero (a usage error for `solve`)
    pub fn is_zero(&self) -> bool {
        self.as_array().iter().all(|&c| c == 0.0)
    }
}

impl Default for AppliedLoad {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }
}
