//! Statics of a simply supported beam: support reactions, shear force and
//! bending moment diagrams for point loads, polynomial distributed loads and
//! point torques.
//!
//! Internal units are metres, kilonewtons and kilonewton-metres. Use
//! [`types::UnitScale`] or the [`config`] module to work in other units.

pub mod types;
pub mod error;
pub mod math;
pub mod loads;
pub mod physics;
pub mod beam;
pub mod config;
pub mod export;

pub use types::*;
pub use error::{BeamError, BeamResult};
pub use math::{Condition, Piece, PiecewiseFunction, Polynomial};
pub use loads::{DistributedLoad, Load, PointLoad, PointTorque};
pub use beam::{Beam, BeamState};
