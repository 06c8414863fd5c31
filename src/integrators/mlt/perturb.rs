use super::path::Path;
use crate::core::pbrt::*;

/// Exponentially distributed offset of `u` with magnitude in `[s1, s2]`, wrapped onto
/// `[0, 1]`. Consumes one uniform draw.
pub fn perturb(rng: &mut dyn Random, u: Float, s1: Float, s2: Float) -> Float {
    let mut r = rng.next();
    if r < 0.5 {
        r *= 2.0;
        let mut result = u + s2 * Float::exp(-Float::ln(s2 / s1) * r);
        if result > 1.0 {
            result -= 1.0;
        }
        return result;
    }
    r = (r - 0.5) * 2.0;
    let mut result = u - s2 * Float::exp(-Float::ln(s2 / s1) * r);
    if result < 0.0 {
        result += 1.0;
    }
    return result;
}

/// Perturbed raster position of `curr`, wrapped around the image borders.
pub fn perturb_raster_pos(
    curr: &Path,
    rng: &mut dyn Random,
    s1: Float,
    s2: Float,
) -> Option<Point2f> {
    let raster = curr.raster_position()?;
    let x = perturb(rng, raster.x, s1, s2);
    let y = perturb(rng, raster.y, s1, s2);
    return Some(Point2f::new(x, y));
}

/// Perturbed version of the 2D sample that produced the direction leaving vertex `i`
/// (counted from the end `trans_dir` starts at).
pub fn perturb_direction_sample_at(
    curr: &Path,
    rng: &mut dyn Random,
    i: usize,
    trans_dir: TransportDirection,
    s1: Float,
    s2: Float,
) -> Option<Point2f> {
    let n = curr.vertices.len();
    if i + 1 >= n {
        return None;
    }
    let index = |j: usize| -> usize {
        match trans_dir {
            TransportDirection::LightToEye => j,
            TransportDirection::EyeToLight => n - 1 - j,
        }
    };
    let v = &curr.vertices[index(i)];
    let v_next = &curr.vertices[index(i + 1)];
    let v_prev = if i >= 1 {
        Some(&curr.vertices[index(i - 1)])
    } else {
        None
    };
    let wi = v.direction_to(v_prev);
    let wo = v.direction_to(Some(v_next));
    let u = v.surface()?.sample_direction_inverse(&v.geom, &wi, &wo)?;
    let u1 = perturb(rng, u.x, s1, s2);
    let u2 = perturb(rng, u.y, s1, s2);
    return Some(Point2f::new(u1, u2));
}

/// Replacement for the direction sample drawn at a non-specular `primitive`: a perturbed
/// raster position for the sensor, a perturbed inverse direction sample otherwise.
pub fn perturb_direction_sample(
    curr: &Path,
    rng: &mut dyn Random,
    primitive: &Primitive,
    i: usize,
    trans_dir: TransportDirection,
    s1: Float,
    s2: Float,
) -> Option<Point2f> {
    if (primitive.get_type() & INTERACTION_E) != 0 {
        return perturb_raster_pos(curr, rng, s1, s2);
    }
    return perturb_direction_sample_at(curr, rng, i, trans_dir, s1, s2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let mut rng = RNG::new_sequence(11);
        let (s1, s2) = (1.0 / 256.0, 1.0 / 16.0);
        for i in 0..1000 {
            let u = i as Float / 1000.0;
            let v = perturb(&mut rng, u, s1, s2);
            assert!((0.0..=1.0).contains(&v));
            let d = Float::abs(v - u);
            let d = Float::min(d, 1.0 - d);
            assert!(d >= s1 * 0.999 && d <= s2 * 1.001, "offset {} out of range", d);
        }
    }

    #[test]
    fn test_002() {
        let mut rng = RNG::new_sequence(12);
        for u in [0.0, 1e-7, 0.5, 1.0 - 1e-7, 1.0] {
            for _ in 0..1000 {
                let v = perturb(&mut rng, u, 1.0 / 1024.0, 1.0 / 64.0);
                assert!((0.0..=1.0).contains(&v), "{} -> {}", u, v);
            }
        }
    }
}
