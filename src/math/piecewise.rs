//! Piecewise polynomial functions of the beam coordinate
//!
//! A [`PiecewiseFunction`] is an ordered list of `(condition, polynomial)`
//! pieces. Evaluation walks the list and returns the value of the first piece
//! whose condition holds; when no piece matches, the function is zero.
//!
//! Sums, running integrals and derivatives are built on a canonical
//! partition of the real line: every breakpoint appearing in a condition,
//! plus the open intervals between consecutive breakpoints. Each condition is
//! constant on each of those regions, so the active polynomial of any
//! function is known region by region.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::polynomial::Polynomial;

/// Predicate on the beam coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    LessThan(f64),
    LessOrEqual(f64),
    GreaterThan(f64),
    GreaterOrEqual(f64),
    Always,
}

impl Condition {
    pub fn holds(&self, x: f64) -> bool {
        match *self {
            Condition::LessThan(a) => x < a,
            Condition::LessOrEqual(a) => x <= a,
            Condition::GreaterThan(a) => x > a,
            Condition::GreaterOrEqual(a) => x >= a,
            Condition::Always => true,
        }
    }

    fn breakpoint(&self) -> Option<f64> {
        match *self {
            Condition::LessThan(a)
            | Condition::LessOrEqual(a)
            | Condition::GreaterThan(a)
            | Condition::GreaterOrEqual(a) => Some(a),
            Condition::Always => None,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::LessThan(a) => write!(f, "x < {}", a),
            Condition::LessOrEqual(a) => write!(f, "x <= {}", a),
            Condition::GreaterThan(a) => write!(f, "x > {}", a),
            Condition::GreaterOrEqual(a) => write!(f, "x >= {}", a),
            Condition::Always => write!(f, "True"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub condition: Condition,
    pub function: Polynomial,
}

impl Piece {
    pub fn new(condition: Condition, function: Polynomial) -> Self {
        Self { condition, function }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PiecewiseFunction {
    pieces: Vec<Piece>,
}

/// A region of the canonical partition
#[derive(Debug, Clone, Copy)]
enum Region {
    /// Open interval between two breakpoints (unbounded ends are `None`)
    Open(Option<f64>, Option<f64>),
    /// A breakpoint on its own
    Point(f64),
}

impl Region {
    /// A coordinate strictly inside the region
    fn sample(&self) -> f64 {
        match *self {
            Region::Open(Some(lo), Some(hi)) => lo + (hi - lo) / 2.0,
            Region::Open(Some(lo), None) => lo + 1.0,
            Region::Open(None, Some(hi)) => hi - 1.0,
            Region::Open(None, None) => 0.0,
            Region::Point(b) => b,
        }
    }
}

/// Regions in ascending order: open, point, open, ..., point, open
fn regions(breakpoints: &[f64]) -> Vec<Region> {
    let mut regions = Vec::with_capacity(2 * breakpoints.len() + 1);
    let mut lower = None;
    for &b in breakpoints {
        regions.push(Region::Open(lower, Some(b)));
        regions.push(Region::Point(b));
        lower = Some(b);
    }
    regions.push(Region::Open(lower, None));
    regions
}

impl PiecewiseFunction {
    pub fn new(pieces: Vec<Piece>) -> Self {
        Self { pieces }
    }

    /// Identically zero
    pub fn zero() -> Self {
        Self { pieces: Vec::new() }
    }

    /// `function` on `[left, right]`, zero elsewhere
    ///
    /// Both interval ends belong to the loaded branch.
    pub fn bounded(function: Polynomial, left: f64, right: f64) -> Self {
        Self::new(vec![
            Piece::new(Condition::LessThan(left), Polynomial::zero()),
            Piece::new(Condition::GreaterThan(right), Polynomial::zero()),
            Piece::new(Condition::Always, function),
        ])
    }

    /// Heaviside step of height `value` at `at`; the step has occurred at `x == at`
    pub fn step(value: f64, at: f64) -> Self {
        Self::new(vec![
            Piece::new(Condition::LessThan(at), Polynomial::zero()),
            Piece::new(Condition::Always, Polynomial::constant(value)),
        ])
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    fn active(&self, x: f64) -> Option<&Polynomial> {
        self.pieces
            .iter()
            .find(|piece| piece.condition.holds(x))
            .map(|piece| &piece.function)
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.active(x).map_or(0.0, |p| p.evaluate(x))
    }

    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Sorted, de-duplicated coordinates at which the definition may change
    pub fn breakpoints(&self) -> Vec<f64> {
        let mut points: Vec<f64> = self
            .pieces
            .iter()
            .filter_map(|piece| piece.condition.breakpoint())
            .collect();
        points.sort_by(f64::total_cmp);
        points.dedup();
        points
    }

    /// Pointwise sum of several functions
    pub fn sum<'a>(functions: impl IntoIterator<Item = &'a PiecewiseFunction>) -> Self {
        let functions: Vec<&PiecewiseFunction> = functions.into_iter().collect();

        let mut breakpoints: Vec<f64> = functions.iter().flat_map(|f| f.breakpoints()).collect();
        breakpoints.sort_by(f64::total_cmp);
        breakpoints.dedup();

        let polys = regions(&breakpoints)
            .iter()
            .map(|region| {
                let x = region.sample();
                functions
                    .iter()
                    .filter_map(|f| f.active(x))
                    .fold(Polynomial::zero(), |acc, p| &acc + p)
            })
            .collect();

        Self::from_regions(&breakpoints, polys)
    }

    /// Running integral `F(x) = ∫_{x0}^{x} f(t) dt`
    ///
    /// The result is continuous, so values at breakpoints need no special
    /// branch.
    pub fn integral_from(&self, x0: f64) -> Self {
        let breakpoints = self.breakpoints();

        let open_polys: Vec<Polynomial> = regions(&breakpoints)
            .iter()
            .filter(|region| matches!(region, Region::Open(..)))
            .map(|region| {
                self.active(region.sample())
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();

        // Chain antiderivatives so neighbours agree at their shared breakpoint
        let mut primitives: Vec<Polynomial> = Vec::with_capacity(open_polys.len());
        for (k, poly) in open_polys.iter().enumerate() {
            let antiderivative = poly.antiderivative();
            let primitive = match k.checked_sub(1) {
                None => antiderivative,
                Some(prev) => {
                    let b = breakpoints[prev];
                    let offset = primitives[prev].evaluate(b) - antiderivative.evaluate(b);
                    &antiderivative + &Polynomial::constant(offset)
                }
            };
            primitives.push(primitive);
        }

        let index = breakpoints.partition_point(|&b| b <= x0);
        let at_origin = Polynomial::constant(primitives[index].evaluate(x0));

        let mut pieces: Vec<Piece> = breakpoints
            .iter()
            .zip(&primitives)
            .map(|(&b, primitive)| Piece::new(Condition::LessThan(b), primitive - &at_origin))
            .collect();
        if let Some(last) = primitives.last() {
            pieces.push(Piece::new(Condition::Always, last - &at_origin));
        }

        Self::merged(pieces)
    }

    /// Derivative of each branch; breakpoints keep their conditions
    pub fn derivative(&self) -> Self {
        Self::new(
            self.pieces
                .iter()
                .map(|piece| Piece::new(piece.condition, piece.function.derivative()))
                .collect(),
        )
    }

    /// Build the canonical ascending form from one polynomial per region
    fn from_regions(breakpoints: &[f64], polys: Vec<Polynomial>) -> Self {
        let mut polys = polys.into_iter();
        let mut pieces = Vec::with_capacity(2 * breakpoints.len() + 1);
        for &b in breakpoints {
            pieces.push(Piece::new(Condition::LessThan(b), polys.next().unwrap_or_default()));
            pieces.push(Piece::new(Condition::LessOrEqual(b), polys.next().unwrap_or_default()));
        }
        pieces.push(Piece::new(Condition::Always, polys.next().unwrap_or_default()));
        Self::merged(pieces)
    }

    /// Drop a piece when the next one carries the same polynomial
    ///
    /// Only valid for ascending canonical pieces, where each condition
    /// contains the previous one.
    fn merged(pieces: Vec<Piece>) -> Self {
        let mut kept: Vec<Piece> = Vec::with_capacity(pieces.len());
        for piece in pieces.into_iter().rev() {
            match kept.last() {
                Some(next) if next.function == piece.function => {}
                _ => kept.push(piece),
            }
        }
        kept.reverse();
        if kept.len() == 1 && kept[0].function.is_zero() {
            return Self::zero();
        }
        Self { pieces: kept }
    }
}

impl fmt::Display for PiecewiseFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piecewise(")?;
        for (i, piece) in self.pieces.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", piece.function, piece.condition)?;
        }
        write!(f, ")")
    }
}
