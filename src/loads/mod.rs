//! Loads applied to a beam
//!
//! # Sign convention
//!
//! - **X-axis**: along the beam, origin at its left end
//! - **Y-axis**: Down(-) / Up(+)
//! - Moments about the origin are counter-clockwise positive, so an upward
//!   force at positive `x` contributes a positive moment.

pub mod distributed;
pub mod point_load;
pub mod torque;

pub use distributed::DistributedLoad;
pub use point_load::PointLoad;
pub use torque::PointTorque;

/// Any load the beam accepts
#[derive(Debug, Clone, PartialEq)]
pub enum Load {
    Point(PointLoad),
    Distributed(DistributedLoad),
    Torque(PointTorque),
}

impl Load {
    /// Equivalent point load (net force at its centroid)
    pub fn resultant(&self) -> PointLoad {
        match self {
            Load::Point(load) => *load,
            Load::Distributed(load) => load.resultant(),
            Load::Torque(torque) => torque.resultant(),
        }
    }

    /// Moment about the beam origin
    pub fn moment(&self) -> f64 {
        match self {
            Load::Point(load) => load.moment(),
            Load::Distributed(load) => load.moment(),
            Load::Torque(torque) => torque.moment(),
        }
    }

    /// Interval over which the load acts (degenerate for concentrated loads)
    pub fn extent(&self) -> (f64, f64) {
        match self {
            Load::Point(load) => (load.x_coord, load.x_coord),
            Load::Distributed(load) => (load.left, load.right),
            Load::Torque(torque) => (torque.x_coord, torque.x_coord),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Load::Point(_) => "point load",
            Load::Distributed(_) => "distributed load",
            Load::Torque(_) => "point torque",
        }
    }
}

impl From<PointLoad> for Load {
    fn from(load: PointLoad) -> Self {
        Load::Point(load)
    }
}

impl From<DistributedLoad> for Load {
    fn from(load: DistributedLoad) -> Self {
        Load::Distributed(load)
    }
}

impl From<PointTorque> for Load {
    fn from(torque: PointTorque) -> Self {
        Load::Torque(torque)
    }
}
