//! Distributed (line) loads

use crate::error::BeamError;
use crate::loads::point_load::PointLoad;
use crate::math::piecewise::PiecewiseFunction;
use crate::math::polynomial::Polynomial;

/// Transverse load whose intensity is a polynomial of the beam coordinate
/// over `[left, right]`
#[derive(Debug, Clone, PartialEq)]
pub struct DistributedLoad {
    /// Intensity (kN/m) in global beam coordinates
    pub y_load: Polynomial,
    pub left: f64,
    pub right: f64,
}

impl DistributedLoad {
    /// Intensity written in global beam coordinates
    pub fn new(y_load: impl Into<Polynomial>, left: f64, right: f64) -> Result<Self, BeamError> {
        if !(left.is_finite() && right.is_finite()) || left >= right {
            return Err(BeamError::InvalidInterval { left, right });
        }
        Ok(Self {
            y_load: y_load.into(),
            left,
            right,
        })
    }

    /// Intensity written in a local coordinate whose origin is `left`
    pub fn local(y_load: impl Into<Polynomial>, left: f64, right: f64) -> Result<Self, BeamError> {
        let local: Polynomial = y_load.into();
        Self::new(local.shifted(left), left, right)
    }

    pub fn uniform(w: f64, left: f64, right: f64) -> Result<Self, BeamError> {
        Self::new(Polynomial::constant(w), left, right)
    }

    /// Trapezoidal load varying linearly from `w_left` to `w_right`
    pub fn linear(w_left: f64, w_right: f64, left: f64, right: f64) -> Result<Self, BeamError> {
        if !(left.is_finite() && right.is_finite()) || left >= right {
            return Err(BeamError::InvalidInterval { left, right });
        }
        let slope = (w_right - w_left) / (right - left);
        Self::local(Polynomial::linear(slope, w_left), left, right)
    }

    /// Intensity at `x`; zero outside `[left, right]`
    pub fn value_at(&self, x: f64) -> f64 {
        if x < self.left || x > self.right {
            0.0
        } else {
            self.y_load.evaluate(x)
        }
    }

    /// `∫ w(x) dx` over the loaded interval
    pub fn total_force(&self) -> f64 {
        self.y_load.integrate(self.left, self.right)
    }

    /// Moment about the beam origin, `∫ x·w(x) dx`
    pub fn moment(&self) -> f64 {
        self.y_load.mul_x().integrate(self.left, self.right)
    }

    /// Centroid of the load
    ///
    /// A load with zero net force has no centroid; the interval midpoint is
    /// reported instead.
    pub fn centroid(&self) -> f64 {
        let total = self.total_force();
        if total == 0.0 {
            return self.left + (self.right - self.left) / 2.0;
        }
        self.moment() / total
    }

    /// Equivalent point load at the centroid
    pub fn resultant(&self) -> PointLoad {
        PointLoad::vertical(self.total_force(), self.centroid())
    }

    /// Intensity as a function of position, zero outside the load
    pub fn to_piecewise(&self) -> PiecewiseFunction {
        PiecewiseFunction::bounded(self.y_load.clone(), self.left, self.right)
    }
}
