pub mod emitter;
pub mod generalized_bsdf;
pub mod sensor;
pub mod utils;

pub use emitter::*;
pub use generalized_bsdf::*;
pub use sensor::*;
pub use utils::*;
