use crate::loads::point_load::PointLoad;
use crate::math::piecewise::PiecewiseFunction;

/// Concentrated couple, counter-clockwise positive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointTorque {
    /// Magnitude (kN·m)
    pub magnitude: f64,
    pub x_coord: f64,
}

impl PointTorque {
    pub fn new(magnitude: f64, x_coord: f64) -> Self {
        Self { magnitude, x_coord }
    }

    /// A couple has the same moment about every point
    pub fn moment(&self) -> f64 {
        self.magnitude
    }

    /// Zero net force, located at the application point
    pub fn resultant(&self) -> PointLoad {
        PointLoad::new(0.0, 0.0, self.x_coord)
    }

    /// Jump in the sagging-positive bending moment diagram at `x_coord`
    ///
    /// A counter-clockwise couple lowers the internal moment to its right.
    pub fn moment_step(&self) -> PiecewiseFunction {
        PiecewiseFunction::step(-self.magnitude, self.x_coord)
    }
}
