pub mod film;

pub use film::*;
