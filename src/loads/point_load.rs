use nalgebra as na;

use crate::math::piecewise::PiecewiseFunction;

/// A concentrated force `(Fx, Fy)` applied at `x_coord`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLoad {
    /// Force vector (kN). Up is +Y.
    pub force: na::Vector2<f64>,
    /// Application point along the beam axis (m)
    pub x_coord: f64,
}

impl PointLoad {
    pub fn new(fx: f64, fy: f64, x_coord: f64) -> Self {
        Self {
            force: na::Vector2::new(fx, fy),
            x_coord,
        }
    }

    /// Purely transverse load; negative values point down
    pub fn vertical(fy: f64, x_coord: f64) -> Self {
        Self::new(0.0, fy, x_coord)
    }

    pub fn x(&self) -> f64 {
        self.force.x
    }

    pub fn y(&self) -> f64 {
        self.force.y
    }

    pub fn vector2d(&self) -> na::Vector2<f64> {
        self.force
    }

    pub fn norm(&self) -> f64 {
        self.force.norm()
    }

    /// Moment about the beam origin, counter-clockwise positive
    ///
    /// Only the vertical component has a lever arm in this 1D model.
    pub fn moment(&self) -> f64 {
        self.force.y * self.x_coord
    }

    /// Contribution to the shear diagram: a step of `Fy` at `x_coord`
    pub fn shear_step(&self) -> PiecewiseFunction {
        PiecewiseFunction::step(self.force.y, self.x_coord)
    }
}
