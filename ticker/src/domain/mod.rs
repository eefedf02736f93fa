mod ids;
mod timer;

pub use ids::*;
pub use timer::*;
