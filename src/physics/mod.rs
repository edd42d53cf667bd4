pub mod diagrams;
pub mod statics;

pub use diagrams::*;
pub use statics::*;
