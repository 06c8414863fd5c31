use crate::core::pbrt::*;

/// Analytic surface owned by a primitive.
pub trait Shape: Send + Sync {
    /// Nearest hit inside `[ray.t_min, ray.t_max]`.
    fn intersect(&self, ray: &Ray) -> Option<(Float, SurfaceGeometry)>;

    fn area(&self) -> Float;

    /// Uniformly distributed point w.r.t. area.
    fn sample(&self, u: &Point2f) -> SurfaceGeometry;
}
