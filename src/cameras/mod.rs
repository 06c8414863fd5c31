pub mod create_camera;
pub mod pinhole;

pub use create_camera::*;
pub use pinhole::*;
