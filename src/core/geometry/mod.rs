pub mod misc;
pub mod ray;
pub mod vector2;
pub mod vector3;

pub use misc::*;
pub use ray::*;
pub use vector2::*;
pub use vector3::*;
