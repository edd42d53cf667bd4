//! Shear force and bending moment diagrams
//!
//! Shear is the running integral of the net distributed load from the left
//! end of the span, plus a step for every concentrated force (support
//! reactions included). Bending moment is the running integral of shear,
//! plus a step for every applied couple.
//!
//! With upward forces positive, `V(x)` is the net force acting left of the
//! section and `M(x)` is sagging positive. Both close to zero at the right
//! end of an equilibrated beam.

use crate::error::BeamError;
use crate::loads::Load;
use crate::math::piecewise::PiecewiseFunction;
use crate::physics::statics::Reactions;

/// Reject spans whose right end does not lie strictly right of the left end
pub fn validate_span(x0: f64, x1: f64) -> Result<(), BeamError> {
    if !(x0.is_finite() && x1.is_finite()) || x0 >= x1 {
        return Err(BeamError::InvalidSpan { x0, x1 });
    }
    Ok(())
}

/// Sum of every distributed load's intensity
pub fn net_distributed_load(loads: &[Load]) -> PiecewiseFunction {
    let parts: Vec<PiecewiseFunction> = loads
        .iter()
        .filter_map(|load| match load {
            Load::Distributed(load) => Some(load.to_piecewise()),
            _ => None,
        })
        .collect();
    PiecewiseFunction::sum(&parts)
}

/// Shear force over `[x0, x1]`
pub fn shear_force(
    span: (f64, f64),
    loads: &[Load],
    reactions: &Reactions,
    fixed_support: f64,
    rolling_support: f64,
) -> Result<PiecewiseFunction, BeamError> {
    let (x0, x1) = span;
    validate_span(x0, x1)?;

    let mut parts = vec![net_distributed_load(loads).integral_from(x0)];
    parts.extend(loads.iter().filter_map(|load| match load {
        Load::Point(load) => Some(load.shear_step()),
        _ => None,
    }));
    parts.extend(
        reactions
            .as_point_loads(fixed_support, rolling_support)
            .iter()
            .map(|reaction| reaction.shear_step()),
    );

    Ok(PiecewiseFunction::sum(&parts))
}

/// Bending moment over `[x0, x1]` from a shear diagram
pub fn bending_moment(
    span: (f64, f64),
    shear: &PiecewiseFunction,
    loads: &[Load],
) -> Result<PiecewiseFunction, BeamError> {
    let (x0, x1) = span;
    validate_span(x0, x1)?;

    let mut parts = vec![shear.integral_from(x0)];
    parts.extend(loads.iter().filter_map(|load| match load {
        Load::Torque(torque) => Some(torque.moment_step()),
        _ => None,
    }));

    Ok(PiecewiseFunction::sum(&parts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{DistributedLoad, PointLoad, PointTorque};
    use crate::physics::statics::{resultant_of, solve_reactions};
    use approx::assert_relative_eq;

    fn diagrams(
        loads: &[Load],
        span: (f64, f64),
        xa: f64,
        xb: f64,
    ) -> (PiecewiseFunction, PiecewiseFunction) {
        let reactions = solve_reactions(&resultant_of(loads), xa, xb).unwrap();
        let shear = shear_force(span, loads, &reactions, xa, xb).unwrap();
        let moment = bending_moment(span, &shear, loads).unwrap();
        (shear, moment)
    }

    #[test]
    fn test_point_load_diagrams() {
        let loads = vec![Load::from(PointLoad::vertical(-20.0, 3.0))];
        let (shear, moment) = diagrams(&loads, (0.0, 9.0), 2.0, 7.0);

        assert_relative_eq!(shear.evaluate(1.0), 0.0);
        assert_relative_eq!(shear.evaluate(2.5), 16.0, epsilon = 1e-9);
        assert_relative_eq!(shear.evaluate(5.0), -4.0, epsilon = 1e-9);
        assert_relative_eq!(shear.evaluate(8.0), 0.0, epsilon = 1e-9);

        // Peak sagging moment under the load: 16 kN * 1 m
        assert_relative_eq!(moment.evaluate(3.0), 16.0, epsilon = 1e-9);
        assert_relative_eq!(moment.evaluate(7.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(moment.evaluate(9.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_uniform_load_gives_parabolic_moment() {
        let w = -2.0;
        let span = 10.0;
        let loads = vec![Load::from(DistributedLoad::uniform(w, 0.0, span).unwrap())];
        let (shear, moment) = diagrams(&loads, (0.0, span), 0.0, span);

        assert_relative_eq!(shear.evaluate(0.0), 10.0, epsilon = 1e-9);
        assert_relative_eq!(shear.evaluate(5.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(shear.evaluate(10.0), 0.0, epsilon = 1e-9);
        // wL²/8
        assert_relative_eq!(moment.evaluate(5.0), 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_torque_introduces_moment_jump() {
        let loads = vec![Load::from(PointTorque::new(50.0, 4.0))];
        let (shear, moment) = diagrams(&loads, (0.0, 10.0), 0.0, 10.0);

        assert_relative_eq!(shear.evaluate(2.0), 5.0, epsilon = 1e-9);
        assert_relative_eq!(moment.evaluate(3.999), 19.995, epsilon = 1e-9);
        assert_relative_eq!(moment.evaluate(4.0), -30.0, epsilon = 1e-9);
        assert_relative_eq!(moment.evaluate(10.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shear_derivative_recovers_distributed_load() {
        let loads = vec![
            Load::from(DistributedLoad::new(vec![5.0, 10.0], 0.0, 2.0).unwrap()),
            Load::from(DistributedLoad::uniform(-3.0, 4.0, 8.0).unwrap()),
            Load::from(PointLoad::vertical(-7.0, 5.0)),
        ];
        let (shear, _) = diagrams(&loads, (0.0, 10.0), 1.0, 9.0);
        let net = net_distributed_load(&loads);
        let recovered = shear.derivative();

        for x in [0.5, 1.5, 3.0, 4.5, 5.5, 7.5, 9.5] {
            assert_relative_eq!(recovered.evaluate(x), net.evaluate(x), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_invalid_span() {
        let shear = PiecewiseFunction::zero();
        assert_eq!(
            bending_moment((5.0, 5.0), &shear, &[]),
            Err(BeamError::InvalidSpan { x0: 5.0, x1: 5.0 })
        );
        assert!(shear_force((3.0, 1.0), &[], &Reactions::default(), 0.0, 1.0).is_err());
    }
}
