pub mod mlt_options;

pub use mlt_options::*;
