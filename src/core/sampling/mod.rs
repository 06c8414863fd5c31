pub mod distribution;
pub mod sampling;
pub mod two_tailed;

pub use distribution::*;
pub use sampling::*;
pub use two_tailed::*;
