pub mod chain;
pub mod manifold;
pub mod path;
pub mod perturb;
pub mod renderer;
pub mod strategy;
pub mod subpath;

pub use chain::*;
pub use manifold::*;
pub use path::*;
pub use perturb::*;
pub use renderer::*;
pub use strategy::*;
pub use subpath::*;
