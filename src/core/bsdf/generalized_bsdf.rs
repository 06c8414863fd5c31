use crate::core::pbrt::*;

/// Sampling and evaluation contract shared by every scattering, emitting and sensing asset.
///
/// All densities are w.r.t. projected solid angle. With `eval_delta == false` a delta lobe
/// has zero density and zero value; with `eval_delta == true` both report the lobe's
/// coefficient (density `1`), so that their ratio stays finite while the implied delta
/// factors cancel.
pub trait GeneralizedBsdf: Send + Sync {
    fn get_type(&self) -> InteractionType;

    /// Draws `wo` given `wi`. `u` samples within the lobe, `u_comp` selects the lobe.
    /// Returns `None` when no direction can be produced.
    fn sample_direction(
        &self,
        u: &Point2f,
        u_comp: Float,
        query_type: InteractionType,
        geom: &SurfaceGeometry,
        wi: &Vector3f,
    ) -> Option<Vector3f>;

    fn evaluate_direction_pdf(
        &self,
        geom: &SurfaceGeometry,
        query_type: InteractionType,
        wi: &Vector3f,
        wo: &Vector3f,
        eval_delta: bool,
    ) -> Float;

    fn evaluate_direction(
        &self,
        geom: &SurfaceGeometry,
        types: InteractionType,
        wi: &Vector3f,
        wo: &Vector3f,
        trans_dir: TransportDirection,
        eval_delta: bool,
    ) -> Spectrum;

    fn is_delta_direction(&self, t: InteractionType) -> bool;

    /// The 2D sample that `sample_direction` maps to `wo`, if the mapping can be inverted.
    fn sample_direction_inverse(
        &self,
        _geom: &SurfaceGeometry,
        _wi: &Vector3f,
        _wo: &Vector3f,
    ) -> Option<Point2f> {
        return None;
    }

    /// Relative index of refraction `eta_i / eta_t` seen from `wi`.
    fn eta(&self, _geom: &SurfaceGeometry, _wi: &Vector3f) -> Float {
        return 1.0;
    }
}
