use std::fmt;

use crate::types::units::*;

#[derive(Debug, Clone, Copy)]
pub struct DisplayForce(pub Force);
#[derive(Debug, Clone, Copy)]
pub struct DisplayLength(pub Length);
#[derive(Debug, Clone, Copy)]
pub struct DisplayTorque(pub Torque);

impl fmt::Display for DisplayForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kn = self.0.get::<kilonewton>();
        let kips = self.0.get::<kip>();
        write!(f, "{:.2} kN ({:.2} kip)", kn, kips)
    }
}

impl fmt::Display for DisplayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meters = self.0.get::<meter>();
        let feet = self.0.get::<foot>();
        write!(f, "{:.3} m ({:.2} ft)", meters, feet)
    }
}

impl fmt::Display for DisplayTorque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let knm = self.0.get::<kilonewton_meter>();
        let lbf_ft = self.0.get::<pound_force_foot>();
        write!(f, "{:.2} kN·m ({:.0} lbf·ft)", knm, lbf_ft)
    }
}
