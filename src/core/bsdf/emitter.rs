use crate::core::pbrt::*;

/// Path endpoint: a light or a sensor.
pub trait Emitter: GeneralizedBsdf {
    fn as_bsdf(&self) -> &dyn GeneralizedBsdf;

    fn sample_position(&self, u: &Point2f) -> SurfaceGeometry;

    /// Area density of `sample_position`.
    fn evaluate_position_pdf(&self, geom: &SurfaceGeometry, eval_delta: bool) -> Float;

    fn evaluate_position(&self, geom: &SurfaceGeometry, eval_delta: bool) -> Spectrum;

    fn is_delta_position(&self) -> bool;
}
