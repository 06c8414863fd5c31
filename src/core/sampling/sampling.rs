use crate::core::pbrt::*;

pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = Float::sqrt(Float::max(0.0, 1.0 - z * z));
    let phi = 2.0 * PI * u[1];
    return Vector3f::new(r * Float::cos(phi), r * Float::sin(phi), z);
}

/// Inverse of `uniform_sample_sphere` for a unit direction.
pub fn uniform_sample_sphere_inverse(d: &Vector3f) -> Point2f {
    let u0 = (1.0 - d.z) * 0.5;
    let mut phi = Float::atan2(d.y, d.x);
    if phi < 0.0 {
        phi += 2.0 * PI;
    }
    return Point2f::new(Float::clamp(u0, 0.0, 1.0), Float::clamp(phi * INV_2_PI, 0.0, 1.0));
}

#[inline]
pub fn uniform_sphere_pdf() -> Float {
    return INV_4_PI;
}

pub fn uniform_sample_triangle(u: &Point2f) -> Point2f {
    let su0 = Float::sqrt(u[0]);
    return Point2f::new(1.0 - su0, u[1] * su0);
}

pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // Map uniform random numbers to $[-1,1]^2$
    let u_offset = *u * 2.0 - Vector2f::new(1.0, 1.0);

    // Handle degeneracy at the origin
    if u_offset.x == 0.0 && u_offset.y == 0.0 {
        return Point2f::zero();
    }

    if Float::abs(u_offset.x) > Float::abs(u_offset.y) {
        let r = u_offset.x;
        let theta = PI_OVER_4 * (u_offset.y / u_offset.x);
        return Point2f::new(r * Float::cos(theta), r * Float::sin(theta));
    } else {
        let r = u_offset.y;
        let theta = PI_OVER_2 - PI_OVER_4 * (u_offset.x / u_offset.y);
        return Point2f::new(r * Float::cos(theta), r * Float::sin(theta));
    }
}

/// Maps a point on the unit disk back to the sample that `concentric_sample_disk`
/// sends there.
pub fn concentric_sample_disk_inverse(p: &Point2f) -> Point2f {
    let r = Float::sqrt(p.x * p.x + p.y * p.y);
    if r == 0.0 {
        return Point2f::new(0.5, 0.5);
    }
    let phi = Float::atan2(p.y, p.x);
    let (a, b) = if Float::abs(p.x) > Float::abs(p.y) {
        if p.x > 0.0 {
            (r, r * phi / PI_OVER_4)
        } else {
            let theta = if phi > 0.0 { phi - PI } else { phi + PI };
            (-r, -r * theta / PI_OVER_4)
        }
    } else if p.y > 0.0 {
        (r * (PI_OVER_2 - phi) / PI_OVER_4, r)
    } else {
        let theta = phi + PI;
        (-r * (PI_OVER_2 - theta) / PI_OVER_4, -r)
    };
    return Point2f::new(
        Float::clamp((a + 1.0) * 0.5, 0.0, 1.0),
        Float::clamp((b + 1.0) * 0.5, 0.0, 1.0),
    );
}

pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = Float::sqrt(Float::max(0.0, 1.0 - d.x * d.x - d.y * d.y));
    return Vector3f::new(d.x, d.y, z);
}

/// Density of `cosine_sample_hemisphere` w.r.t. projected solid angle.
#[inline]
pub fn cosine_hemisphere_pdf_proj_sa(local_wo: &Vector3f) -> Float {
    if local_wo.z <= 0.0 {
        return 0.0;
    }
    return INV_PI;
}
