mod display;
mod explicit_unit_values;

pub use uom::si::f64::{Force, Length, Torque};

pub use uom::si::{
    force::{kilonewton, kip, newton, pound_force},
    length::{centimeter, foot, inch, meter, millimeter, yard},
    torque::{kilonewton_meter, newton_meter, pound_force_foot},
};

pub use display::{DisplayForce, DisplayLength, DisplayTorque};
pub use explicit_unit_values::{ForceValue, LengthValue, UnitError, WithUnit};
