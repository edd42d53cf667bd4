//! Units at the crate boundary
//!
//! Everything inside the crate works in metres, kilonewtons and
//! kilonewton-metres as plain `f64`. uom quantities appear only where values
//! enter (definition files, [`Beam::with_length`](crate::beam::Beam::with_length))
//! or leave (report display).

pub mod conversion;
pub mod units;

pub use conversion::*;
pub use units::*;

// Re-export nalgebra
pub use nalgebra as na;
