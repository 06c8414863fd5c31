use crate::core::pbrt::*;

#[derive(Debug, Copy, Clone)]
pub struct Ray {
    pub o: Point3f,
    pub d: Vector3f,
    pub t_min: Float,
    pub t_max: Float,
}

impl Ray {
    pub fn new(o: &Point3f, d: &Vector3f) -> Self {
        Ray {
            o: *o,
            d: *d,
            t_min: RAY_EPSILON,
            t_max: Float::INFINITY,
        }
    }

    /// Segment from `p1` toward `p2`, stopping just short of both endpoints.
    pub fn new_segment(p1: &Point3f, p2: &Point3f) -> Self {
        let d = *p2 - *p1;
        let dist = d.length();
        Ray {
            o: *p1,
            d: d / dist,
            t_min: RAY_EPSILON,
            t_max: dist * (1.0 - SHADOW_EPSILON),
        }
    }

    #[inline]
    pub fn position(&self, t: Float) -> Point3f {
        return self.o + self.d * t;
    }
}
