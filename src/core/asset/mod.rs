pub mod asset;
pub mod property;

pub use asset::*;
pub use property::*;
