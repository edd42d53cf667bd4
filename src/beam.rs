//! Simply supported beam
//!
//! A [`Beam`] owns its span, its two supports and the applied loads. Every
//! successful mutation bumps a generation counter and recomputes the whole
//! [`BeamState`] (reactions, load, shear and moment functions) before
//! committing, so the derived state can never be stale and a failed mutation
//! leaves the beam untouched.

use log::debug;

use crate::error::BeamError;
use crate::loads::{Load, PointLoad};
use crate::math::piecewise::PiecewiseFunction;
use crate::physics::diagrams::{bending_moment, net_distributed_load, shear_force, validate_span};
use crate::physics::statics::{is_in_equilibrium, resultant_of, solve_reactions, Reactions};
use crate::types::{to_coord, Length};

pub const DEFAULT_SPAN: f64 = 10.0;
/// Default support positions as fractions of the span
pub const DEFAULT_FIXED_SUPPORT_RATIO: f64 = 0.2;
pub const DEFAULT_ROLLING_SUPPORT_RATIO: f64 = 0.8;

/// Snapshot of everything derived from the current loads and supports
#[derive(Debug, Clone, PartialEq)]
pub struct BeamState {
    /// Generation of the beam this snapshot was computed for
    pub generation: u64,
    pub reactions: Reactions,
    pub distributed_load: PiecewiseFunction,
    pub shear_force: PiecewiseFunction,
    pub bending_moment: PiecewiseFunction,
}

impl BeamState {
    /// State of a beam carrying nothing
    fn unloaded(generation: u64) -> Self {
        Self {
            generation,
            reactions: Reactions::default(),
            distributed_load: PiecewiseFunction::zero(),
            shear_force: PiecewiseFunction::zero(),
            bending_moment: PiecewiseFunction::zero(),
        }
    }

    fn analyze(
        generation: u64,
        span: (f64, f64),
        fixed_support: f64,
        rolling_support: f64,
        loads: &[Load],
    ) -> Result<Self, BeamError> {
        let reactions = solve_reactions(&resultant_of(loads), fixed_support, rolling_support)?;
        let distributed_load = net_distributed_load(loads);
        let shear = shear_force(span, loads, &reactions, fixed_support, rolling_support)?;
        let moment = bending_moment(span, &shear, loads)?;

        debug!(
            "Beam generation {}: {} loads, reactions (F_Ax, F_Ay, F_By) = {:?}",
            generation,
            loads.len(),
            reactions.as_tuple()
        );

        Ok(Self {
            generation,
            reactions,
            distributed_load,
            shear_force: shear,
            bending_moment: moment,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Beam {
    x0: f64,
    x1: f64,
    fixed_support: f64,
    rolling_support: f64,
    loads: Vec<Load>,
    generation: u64,
    state: BeamState,
}

impl Default for Beam {
    fn default() -> Self {
        Self {
            x0: 0.0,
            x1: DEFAULT_SPAN,
            fixed_support: DEFAULT_FIXED_SUPPORT_RATIO * DEFAULT_SPAN,
            rolling_support: DEFAULT_ROLLING_SUPPORT_RATIO * DEFAULT_SPAN,
            loads: Vec::new(),
            generation: 0,
            state: BeamState::unloaded(0),
        }
    }
}

impl Beam {
    /// Beam spanning `[0, span]` with both supports inside the span, the
    /// fixed one at `0.2·span` and the rolling one at `0.8·span`
    pub fn new(span: f64) -> Result<Self, BeamError> {
        validate_span(0.0, span)?;
        Ok(Self {
            x1: span,
            fixed_support: DEFAULT_FIXED_SUPPORT_RATIO * span,
            rolling_support: DEFAULT_ROLLING_SUPPORT_RATIO * span,
            ..Self::default()
        })
    }

    /// Same as [`Beam::new`] from a UOM length
    pub fn with_length(length: Length) -> Result<Self, BeamError> {
        Self::new(to_coord(length))
    }

    pub fn span(&self) -> (f64, f64) {
        (self.x0, self.x1)
    }

    pub fn length(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn fixed_support(&self) -> f64 {
        self.fixed_support
    }

    pub fn rolling_support(&self) -> f64 {
        self.rolling_support
    }

    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    /// Incremented on every successful mutation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &BeamState {
        &self.state
    }

    /// Change the length, keeping the left end in place
    ///
    /// Supports and loads must still fit on the resized beam.
    pub fn set_length(&mut self, length: f64) -> Result<(), BeamError> {
        let x1 = self.x0 + length;
        validate_span(self.x0, x1)?;
        let loads = self.loads.clone();
        self.commit(x1, self.fixed_support, self.rolling_support, loads)
    }

    pub fn set_fixed_support(&mut self, x_coord: f64) -> Result<(), BeamError> {
        let loads = self.loads.clone();
        self.commit(self.x1, x_coord, self.rolling_support, loads)
    }

    pub fn set_rolling_support(&mut self, x_coord: f64) -> Result<(), BeamError> {
        let loads = self.loads.clone();
        self.commit(self.x1, self.fixed_support, x_coord, loads)
    }

    /// Move both supports at once
    pub fn set_supports(&mut self, fixed_support: f64, rolling_support: f64) -> Result<(), BeamError> {
        let loads = self.loads.clone();
        self.commit(self.x1, fixed_support, rolling_support, loads)
    }

    /// Apply a batch of loads; either all of them are added or none is
    pub fn add_loads<I, L>(&mut self, loads: I) -> Result<(), BeamError>
    where
        I: IntoIterator<Item = L>,
        L: Into<Load>,
    {
        let mut combined = self.loads.clone();
        combined.extend(loads.into_iter().map(Into::into));
        self.commit(self.x1, self.fixed_support, self.rolling_support, combined)
    }

    pub fn add_load(&mut self, load: impl Into<Load>) -> Result<(), BeamError> {
        self.add_loads([load.into()])
    }

    pub fn clear_loads(&mut self) -> Result<(), BeamError> {
        self.commit(self.x1, self.fixed_support, self.rolling_support, Vec::new())
    }

    /// (F_Ax, F_Ay, F_By): horizontal and vertical reaction at the fixed
    /// support, vertical reaction at the rolling support
    pub fn get_reaction_forces(&self) -> (f64, f64, f64) {
        self.state.reactions.as_tuple()
    }

    pub fn reactions(&self) -> Reactions {
        self.state.reactions
    }

    /// Net distributed load intensity
    pub fn distributed_load(&self) -> &PiecewiseFunction {
        &self.state.distributed_load
    }

    pub fn shear_force(&self) -> &PiecewiseFunction {
        &self.state.shear_force
    }

    pub fn bending_moment(&self) -> &PiecewiseFunction {
        &self.state.bending_moment
    }

    pub fn distributed_load_at(&self, x: f64) -> Result<f64, BeamError> {
        self.check_within("Evaluation point", x)?;
        Ok(self.state.distributed_load.evaluate(x))
    }

    pub fn shear_force_at(&self, x: f64) -> Result<f64, BeamError> {
        self.check_within("Evaluation point", x)?;
        Ok(self.state.shear_force.evaluate(x))
    }

    pub fn bending_moment_at(&self, x: f64) -> Result<f64, BeamError> {
        self.check_within("Evaluation point", x)?;
        Ok(self.state.bending_moment.evaluate(x))
    }

    /// Applied point loads followed by the fixed and rolling support reactions
    pub fn point_loads_with_reactions(&self) -> Vec<PointLoad> {
        let mut points: Vec<PointLoad> = self
            .loads
            .iter()
            .filter_map(|load| match load {
                Load::Point(load) => Some(*load),
                _ => None,
            })
            .collect();
        points.extend(
            self.state
                .reactions
                .as_point_loads(self.fixed_support, self.rolling_support),
        );
        points
    }

    pub fn is_in_equilibrium(&self, tolerance: f64) -> bool {
        is_in_equilibrium(
            &self.loads,
            &self.state.reactions,
            self.fixed_support,
            self.rolling_support,
            tolerance,
            tolerance,
        )
    }

    fn check_within(&self, what: &str, x: f64) -> Result<(), BeamError> {
        within(what, x, self.x0, self.x1)
    }

    /// Validate a candidate configuration, recompute its state and only then
    /// replace the current one
    fn commit(
        &mut self,
        x1: f64,
        fixed_support: f64,
        rolling_support: f64,
        loads: Vec<Load>,
    ) -> Result<(), BeamError> {
        within("Fixed support", fixed_support, self.x0, x1)?;
        within("Rolling support", rolling_support, self.x0, x1)?;
        if fixed_support == rolling_support {
            return Err(BeamError::DegenerateSupports(fixed_support));
        }
        for load in &loads {
            let (start, end) = load.extent();
            within(load.kind(), start, self.x0, x1)?;
            within(load.kind(), end, self.x0, x1)?;
        }

        let generation = self.generation + 1;
        let state = BeamState::analyze(
            generation,
            (self.x0, x1),
            fixed_support,
            rolling_support,
            &loads,
        )?;

        self.x1 = x1;
        self.fixed_support = fixed_support;
        self.rolling_support = rolling_support;
        self.loads = loads;
        self.generation = generation;
        self.state = state;
        Ok(())
    }
}

fn within(what: &str, coord: f64, x0: f64, x1: f64) -> Result<(), BeamError> {
    if x0 <= coord && coord <= x1 {
        Ok(())
    } else {
        Err(BeamError::OutOfBounds {
            what: what.to_string(),
            coord,
            x0,
            x1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{DistributedLoad, PointTorque};
    use crate::types::{foot, meter};
    use approx::assert_relative_eq;

    fn textbook_beam() -> Beam {
        let mut beam = Beam::new(9.0).unwrap();
        beam.set_fixed_support(2.0).unwrap();
        beam.set_rolling_support(7.0).unwrap();
        beam.add_loads([PointLoad::vertical(-20.0, 3.0)]).unwrap();
        beam
    }

    #[test]
    fn test_reactions_for_point_load() {
        let (f_ax, f_ay, f_by) = textbook_beam().get_reaction_forces();
        assert_relative_eq!(f_ax, 0.0);
        assert_relative_eq!(f_ay, 16.0, epsilon = 1e-9);
        assert_relative_eq!(f_by, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unloaded_beam_has_no_reactions() {
        let mut beam = Beam::new(5.0).unwrap();
        assert_eq!(beam.get_reaction_forces(), (0.0, 0.0, 0.0));
        beam.set_supports(1.0, 4.0).unwrap();
        assert_eq!(beam.get_reaction_forces(), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_reactions_are_idempotent() {
        let beam = textbook_beam();
        assert_eq!(beam.get_reaction_forces(), beam.get_reaction_forces());
    }

    #[test]
    fn test_invalid_span() {
        assert_eq!(
            Beam::new(0.0).unwrap_err(),
            BeamError::InvalidSpan { x0: 0.0, x1: 0.0 }
        );
        assert!(Beam::new(-3.0).is_err());
        assert!(Beam::new(f64::INFINITY).is_err());
        assert!(Beam::default().set_length(-1.0).is_err());
    }

    #[test]
    fn test_supports_at_span_ends_are_accepted() {
        let mut beam = Beam::new(9.0).unwrap();
        beam.set_supports(4.0, 5.0).unwrap();
        beam.set_fixed_support(0.0).unwrap();
        beam.set_rolling_support(9.0).unwrap();
        assert_eq!(beam.fixed_support(), 0.0);
        assert_eq!(beam.rolling_support(), 9.0);
    }

    #[test]
    fn test_supports_outside_span_are_rejected() {
        let mut beam = Beam::new(9.0).unwrap();
        assert!(matches!(
            beam.set_fixed_support(-0.5),
            Err(BeamError::OutOfBounds { coord, .. }) if coord == -0.5
        ));
        assert!(matches!(
            beam.set_rolling_support(9.5),
            Err(BeamError::OutOfBounds { .. })
        ));
        assert_eq!(beam.generation(), 0);
    }

    #[test]
    fn test_default_supports_are_inside_the_span() {
        let beam = Beam::default();
        assert_eq!(beam.span(), (0.0, 10.0));
        assert_eq!(beam.fixed_support(), 2.0);
        assert_eq!(beam.rolling_support(), 8.0);

        let beam = Beam::new(5.0).unwrap();
        assert_eq!(beam.fixed_support(), 1.0);
        assert_eq!(beam.rolling_support(), 4.0);
    }

    #[test]
    fn test_fresh_beam_accepts_either_support_at_either_end() {
        let mut beam = Beam::new(9.0).unwrap();
        beam.set_fixed_support(9.0).unwrap();
        assert_eq!(beam.fixed_support(), 9.0);

        let mut beam = Beam::new(9.0).unwrap();
        beam.set_rolling_support(0.0).unwrap();
        assert_eq!(beam.rolling_support(), 0.0);

        let mut beam = Beam::new(9.0).unwrap();
        beam.set_fixed_support(0.0).unwrap();
        beam.set_rolling_support(9.0).unwrap();
        assert_eq!(beam.generation(), 2);
    }

    #[test]
    fn test_coincident_supports_are_rejected() {
        let mut beam = Beam::new(9.0).unwrap();
        let fixed = beam.fixed_support();
        let rolling = beam.rolling_support();
        assert_eq!(
            beam.set_fixed_support(rolling),
            Err(BeamError::DegenerateSupports(rolling))
        );
        assert_eq!(beam.fixed_support(), fixed);
        assert_eq!(beam.generation(), 0);
    }

    #[test]
    fn test_with_length_converts_to_metres() {
        let beam = Beam::with_length(Length::new::<foot>(30.0)).unwrap();
        assert_relative_eq!(beam.length(), 9.144, epsilon = 1e-12);
        assert!(Beam::with_length(Length::new::<meter>(0.0)).is_err());
    }

    #[test]
    fn test_add_loads_is_atomic() {
        let mut beam = textbook_beam();
        let before = beam.get_reaction_forces();
        let generation = beam.generation();

        let result = beam.add_loads(vec![
            Load::from(PointLoad::vertical(-5.0, 4.0)),
            Load::from(PointLoad::vertical(-5.0, 12.0)),
        ]);

        assert!(matches!(result, Err(BeamError::OutOfBounds { coord, .. }) if coord == 12.0));
        assert_eq!(beam.loads().len(), 1);
        assert_eq!(beam.get_reaction_forces(), before);
        assert_eq!(beam.generation(), generation);
    }

    #[test]
    fn test_distributed_load_must_fit_on_span() {
        let mut beam = Beam::new(5.0).unwrap();
        let load = DistributedLoad::uniform(-1.0, 2.0, 6.0).unwrap();
        assert!(matches!(
            beam.add_load(load),
            Err(BeamError::OutOfBounds { coord, .. }) if coord == 6.0
        ));
    }

    #[test]
    fn test_every_mutation_recomputes_state() {
        let mut beam = textbook_beam();
        assert_eq!(beam.generation(), 3);
        assert_eq!(beam.state().generation, 3);

        beam.set_rolling_support(9.0).unwrap();
        let (_, f_ay, f_by) = beam.get_reaction_forces();
        assert_relative_eq!(f_ay, 120.0 / 7.0, epsilon = 1e-9);
        assert_relative_eq!(f_by, 20.0 / 7.0, epsilon = 1e-9);
        assert_eq!(beam.state().generation, 4);

        beam.clear_loads().unwrap();
        assert_eq!(beam.get_reaction_forces(), (0.0, 0.0, 0.0));
        assert!(beam.loads().is_empty());
    }

    #[test]
    fn test_shrinking_the_span_checks_supports() {
        let mut beam = textbook_beam();
        assert!(matches!(
            beam.set_length(6.0),
            Err(BeamError::OutOfBounds { .. })
        ));
        beam.set_length(7.0).unwrap();
        assert_eq!(beam.length(), 7.0);
    }

    #[test]
    fn test_diagram_queries() {
        let beam = textbook_beam();
        assert_relative_eq!(beam.shear_force_at(2.5).unwrap(), 16.0, epsilon = 1e-9);
        assert_relative_eq!(beam.bending_moment_at(3.0).unwrap(), 16.0, epsilon = 1e-9);
        assert_relative_eq!(beam.bending_moment_at(9.0).unwrap(), 0.0, epsilon = 1e-9);
        assert_eq!(beam.distributed_load_at(4.0).unwrap(), 0.0);
        assert!(matches!(
            beam.shear_force_at(9.1),
            Err(BeamError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_point_loads_with_reactions() {
        let points = textbook_beam().point_loads_with_reactions();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], PointLoad::vertical(-20.0, 3.0));
        assert_eq!(points[1].x_coord, 2.0);
        assert_relative_eq!(points[1].y(), 16.0, epsilon = 1e-9);
        assert_eq!(points[2].x_coord, 7.0);
        assert_relative_eq!(points[2].y(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mixed_loads_close_the_diagrams() {
        let mut beam = Beam::new(12.0).unwrap();
        beam.set_supports(1.0, 10.0).unwrap();
        beam.add_loads(vec![
            Load::from(PointLoad::new(3.0, -8.0, 4.0)),
            Load::from(DistributedLoad::new(vec![-1.0, -0.5], 0.0, 6.0).unwrap()),
            Load::from(DistributedLoad::uniform(-2.0, 8.0, 12.0).unwrap()),
            Load::from(PointTorque::new(15.0, 11.0)),
        ])
        .unwrap();

        assert!(beam.is_in_equilibrium(1e-9));
        assert_relative_eq!(beam.reactions().fixed_x, -3.0);
        assert_relative_eq!(beam.shear_force_at(12.0).unwrap(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(beam.bending_moment_at(12.0).unwrap(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(beam.bending_moment_at(0.0).unwrap(), 0.0, epsilon = 1e-9);
    }
}
