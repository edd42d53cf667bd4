pub mod piecewise;
pub mod polynomial;

pub use piecewise::{Condition, Piece, PiecewiseFunction};
pub use polynomial::Polynomial;
