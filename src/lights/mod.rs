pub mod area;
pub mod create_light;
pub mod point;

pub use area::*;
pub use create_light::*;
pub use point::*;
