pub mod coefficient;
pub mod spectrum;

pub use coefficient::*;
pub use spectrum::*;
