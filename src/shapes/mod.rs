pub mod create_shape;
pub mod quad;
pub mod sphere;

pub use create_shape::*;
pub use quad::*;
pub use sphere::*;
