pub mod asset;
pub mod base;
pub mod bsdf;
pub mod error;
pub mod film;
pub mod geometry;
pub mod interaction;
pub mod misc;
pub mod options;
pub mod pbrt;
pub mod rng;
pub mod sampling;
pub mod scene;
pub mod shape;
pub mod spectrum;
