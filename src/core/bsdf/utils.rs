use crate::core::pbrt::*;

/// Correction for shading normals so that the scattering law stays consistent when
/// importance is transported (Veach's adjoint BSDF).
pub fn shading_normal_correction(
    geom: &SurfaceGeometry,
    wi: &Vector3f,
    wo: &Vector3f,
    trans_dir: TransportDirection,
) -> Float {
    let local_wi = geom.to_local(wi);
    let local_wo = geom.to_local(wo);
    let wi_dot_ng = wi.dot(&geom.gn);
    let wo_dot_ng = wo.dot(&geom.gn);
    let wi_dot_ns = local_cos(&local_wi);
    let wo_dot_ns = local_cos(&local_wo);
    if wi_dot_ng * wi_dot_ns <= 0.0 || wo_dot_ng * wo_dot_ns <= 0.0 {
        return 0.0;
    }
    if trans_dir == TransportDirection::LightToEye {
        return wi_dot_ns * wo_dot_ng / (wo_dot_ns * wi_dot_ng);
    }
    return 1.0;
}

#[inline]
pub fn local_reflect(wi: &Vector3f) -> Vector3f {
    return Vector3f::new(-wi.x, -wi.y, wi.z);
}

#[inline]
pub fn local_refract(wi: &Vector3f, eta: Float, cos_theta_t: Float) -> Vector3f {
    return Vector3f::new(-eta * wi.x, -eta * wi.y, cos_theta_t);
}
