//! Weld Solver - elastic weld group analysis
//!
//! This library computes the distribution of force (or stress) across a
//! two-dimensional weld group under an arbitrary combination of in-plane
//! shear, out-of-plane shear, and bending/torsional moments, using the
//! linear-elastic superposition method common in structural-steel design:
//! - Line, rectangle, and circle weld primitives discretized into uniform
//!   fibers
//! - Composite section properties in the stress convention (true throat
//!   area) and the unit-force convention (thickness-normalized effective
//!   length)
//! - Per-fiber demand from all six load components, with equilibrium
//!   closure verified on every solve
//!
//! ## Example
//! ```rust
//! use weld_solver::prelude::*;
//!
//! let mut group = WeldGroup::new();
//!
//! // Two parallel vertical strips, 5/16 throat
//! group.add_line(Point2::new(0.0, 0.0), Point2::new(0.0, 10.0), Some(5.0 / 16.0)).unwrap();
//! group.add_line(Point2::new(10.0, 0.0), Point2::new(10.0, 10.0), Some(5.0 / 16.0)).unwrap();
//!
//! // Solve for an in-plane shear
//! let results = group.solve(AppliedLoad::vy(-100.0)).unwrap();
//!
//! assert!(results.equilibrium().is_closed());
//! let (worst_row, demand) = results.max_resultant().unwrap();
//! println!("governing fiber {worst_row}: {demand:.2} force/length");
//! ```

pub mod config;
pub mod error;
pub mod fiber;
pub mod group;
pub mod loads;
pub mod math;
pub mod properties;
pub mod results;

mod solver;

// Re-export common types
pub mod prelude {
    pub use crate::config::GroupConfig;
    pub use crate::error::{WeldError, WeldResult};
    pub use crate::fiber::WeldFiber;
    pub use crate::group::{ReportingMode, WeldGroup};
    pub use crate::loads::AppliedLoad;
    pub use crate::math::Point2;
    pub use crate::properties::{GroupProperties, SectionProperties};
    pub use crate::results::{EquilibriumReport, FiberResult, FiberStress, ResultTable};
}
