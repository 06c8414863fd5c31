pub mod create_material;
pub mod diffuse;
pub mod mirror;
pub mod refract;

pub use create_material::*;
pub use diffuse::*;
pub use mirror::*;
pub use refract::*;
