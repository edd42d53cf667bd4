use log::trace;
use nalgebra as na;

use crate::error::BeamError;
use crate::loads::{Load, PointLoad};

/// Net effect of a load set about the beam origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadResultant {
    /// (F_Rx, F_Ry) in kN
    pub force: na::Vector2<f64>,
    /// M_R in kN·m, counter-clockwise positive
    pub moment: f64,
}

/// Support reactions of a simply supported beam
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reactions {
    /// Horizontal reaction at the fixed (pin) support, F_Ax
    pub fixed_x: f64,
    /// Vertical reaction at the fixed (pin) support, F_Ay
    pub fixed_y: f64,
    /// Vertical reaction at the rolling support, F_By
    pub rolling_y: f64,
}

impl Reactions {
    /// (F_Ax, F_Ay, F_By)
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.fixed_x, self.fixed_y, self.rolling_y)
    }

    /// Reactions expressed as point loads at their supports
    pub fn as_point_loads(&self, fixed_support: f64, rolling_support: f64) -> [PointLoad; 2] {
        [
            PointLoad::new(self.fixed_x, self.fixed_y, fixed_support),
            PointLoad::vertical(self.rolling_y, rolling_support),
        ]
    }
}

/// Sum forces and moments of every applied load
///
/// Distributed loads contribute `∫w dx` and `∫x·w dx`; torques contribute
/// their magnitude to the moment only.
pub fn resultant_of(loads: &[Load]) -> LoadResultant {
    loads.iter().fold(
        LoadResultant {
            force: na::Vector2::zeros(),
            moment: 0.0,
        },
        |acc, load| LoadResultant {
            force: acc.force + load.resultant().vector2d(),
            moment: acc.moment + load.moment(),
        },
    )
}

/// Solve force and moment balance for the three reaction components
///
/// ```text
/// F_Ax                     = -F_Rx
/// F_Ay        + F_By        = -F_Ry
/// F_Ay·xA  +  F_By·xB        = -M_R
/// ```
pub fn solve_reactions(
    resultant: &LoadResultant,
    fixed_support: f64,
    rolling_support: f64,
) -> Result<Reactions, BeamError> {
    if fixed_support == rolling_support {
        return Err(BeamError::DegenerateSupports(fixed_support));
    }

    #[rustfmt::skip]
    let a = na::Matrix3::new(
        -1.0, 0.0, 0.0,
        0.0, -1.0, -1.0,
        0.0, -fixed_support, -rolling_support,
    );
    let b = na::Vector3::new(resultant.force.x, resultant.force.y, resultant.moment);

    let inverse = a
        .try_inverse()
        .ok_or(BeamError::DegenerateSupports(fixed_support))?;
    let solution = inverse * b;

    trace!(
        "Solved reactions for F_R = ({}, {}), M_R = {}: {:?}",
        resultant.force.x,
        resultant.force.y,
        resultant.moment,
        solution
    );

    Ok(Reactions {
        fixed_x: solution[0],
        fixed_y: solution[1],
        rolling_y: solution[2],
    })
}

/// Check if loads and reactions are in static equilibrium
///
/// For equilibrium:
/// - Sum of forces = 0
/// - Sum of moments about the origin = 0
pub fn is_in_equilibrium(
    loads: &[Load],
    reactions: &Reactions,
    fixed_support: f64,
    rolling_support: f64,
    force_tolerance: f64,
    moment_tolerance: f64,
) -> bool {
    let applied = resultant_of(loads);
    let [fixed, rolling] = reactions.as_point_loads(fixed_support, rolling_support);

    let net_force = applied.force + fixed.vector2d() + rolling.vector2d();
    let net_moment = applied.moment + fixed.moment() + rolling.moment();

    net_force.norm() < force_tolerance && net_moment.abs() < moment_tolerance
}
