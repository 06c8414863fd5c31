pub mod basic_scene;
pub mod primitive;
pub mod scene;

pub use basic_scene::*;
pub use primitive::*;
pub use scene::*;
