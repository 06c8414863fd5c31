pub mod mlt;

pub use mlt::*;
