pub mod functions;
pub mod types;

pub use super::asset::*;
pub use super::base::*;
pub use super::bsdf::*;
pub use super::error::*;
pub use super::film::*;
pub use super::geometry::*;
pub use super::interaction::*;
pub use super::misc::*;
pub use super::options::*;
pub use super::rng::*;
pub use super::sampling::*;
pub use super::scene::*;
pub use super::shape::*;
pub use super::spectrum::*;
pub use functions::*;
pub use types::*;
