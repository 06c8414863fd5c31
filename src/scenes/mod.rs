pub mod demo;
pub mod loader;
pub mod registry;

pub use demo::*;
pub use loader::*;
pub use registry::*;
