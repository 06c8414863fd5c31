use crate::core::pbrt::*;

/// Builds two unit vectors that form an orthonormal basis with `v1`.
pub fn coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2 = if v1.x.abs() > v1.y.abs() {
        Vector3f::new(-v1.z, 0.0, v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f::new(0.0, v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };
    let v3 = Vector3f::cross(v1, &v2);
    return (v2, v3);
}

pub fn spherical_direction(sin_theta: Float, cos_theta: Float, phi: Float) -> Vector3f {
    Vector3f::new(
        Float::clamp(sin_theta, -1.0, 1.0) * Float::cos(phi),
        Float::clamp(sin_theta, -1.0, 1.0) * Float::sin(phi),
        Float::clamp(cos_theta, -1.0, 1.0),
    )
}
