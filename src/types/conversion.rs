use uom::si::{
    f64::{Force, Length, Torque},
    force::kilonewton,
    length::meter,
    torque::kilonewton_meter,
};

use crate::types::units::{ForceValue, LengthValue, UnitError};

/// Convert UOM Length to internal coordinate (metres)
#[inline]
pub fn to_coord(length: Length) -> f64 {
    length.get::<meter>()
}

/// Convert internal coordinate (metres) to UOM Length
#[inline]
pub fn from_coord(value: f64) -> Length {
    Length::new::<meter>(value)
}

/// Convert UOM Force to internal force value (kilonewtons)
#[inline]
pub fn to_internal_force(force: Force) -> f64 {
    force.get::<kilonewton>()
}

/// Convert internal force value (kilonewtons) to UOM Force
#[inline]
pub fn from_internal_force(value: f64) -> Force {
    Force::new::<kilonewton>(value)
}

/// Convert internal moment value (kilonewton-metres) to UOM Torque
#[inline]
pub fn from_internal_moment(value: f64) -> Torque {
    Torque::new::<kilonewton_meter>(value)
}

/// Scale factors from a user unit system into the internal metre/kilonewton system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    /// Metres per user length unit
    pub length: f64,
    /// Kilonewtons per user force unit
    pub force: f64,
}

impl Default for UnitScale {
    fn default() -> Self {
        Self { length: 1.0, force: 1.0 }
    }
}

impl UnitScale {
    /// Resolve unit names such as `"ft"` and `"kip"` into scale factors
    pub fn from_units(length_unit: &str, force_unit: &str) -> Result<Self, UnitError> {
        let length = to_coord(LengthValue::new(1.0, length_unit).to_length()?);
        let force = to_internal_force(ForceValue::new(1.0, force_unit).to_force()?);
        Ok(Self { length, force })
    }

    pub fn coord(&self, value: f64) -> f64 {
        value * self.length
    }

    pub fn force(&self, value: f64) -> f64 {
        value * self.force
    }

    /// Torques carry force times length
    pub fn moment(&self, value: f64) -> f64 {
        value * self.force * self.length
    }

    /// Intensities carry force per length
    pub fn intensity(&self, value: f64) -> f64 {
        value * self.force / self.length
    }
}
