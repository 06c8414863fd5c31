use crate::core::pbrt::*;

/// Parallelogram `p + s * e1 + t * e2`, `s, t` in `[0, 1]`, facing `e1 x e2`.
pub struct Quad {
    p: Point3f,
    e1: Vector3f,
    e2: Vector3f,
    n: Normal3f,
    area: Float,
}

impl Quad {
    pub fn new(p: &Point3f, e1: &Vector3f, e2: &Vector3f) -> Self {
        let c = Vector3f::cross(e1, e2);
        let area = c.length();
        Quad {
            p: *p,
            e1: *e1,
            e2: *e2,
            n: c / area,
            area,
        }
    }

    fn geometry_at(&self, p: &Point3f, uv: &Point2f) -> SurfaceGeometry {
        let mut geom = SurfaceGeometry {
            p: *p,
            sn: self.n,
            gn: self.n,
            uv: *uv,
            ..Default::default()
        };
        geom.compute_tangent_space();
        return geom;
    }
}

impl Shape for Quad {
    fn intersect(&self, ray: &Ray) -> Option<(Float, SurfaceGeometry)> {
        let denom = ray.d.dot(&self.n);
        if denom == 0.0 || !denom.is_finite() {
            return None;
        }
        let t = (self.p - ray.o).dot(&self.n) / denom;
        if !(t >= ray.t_min && t <= ray.t_max) {
            return None;
        }
        let q = ray.position(t);
        let w = q - self.p;
        let c = Vector3f::cross(&self.e1, &self.e2);
        let cc = c.length_squared();
        let s = Vector3f::cross(&w, &self.e2).dot(&c) / cc;
        let u = Vector3f::cross(&self.e1, &w).dot(&c) / cc;
        if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&u) {
            return None;
        }
        return Some((t, self.geometry_at(&q, &Point2f::new(s, u))));
    }

    fn area(&self) -> Float {
        return self.area;
    }

    fn sample(&self, u: &Point2f) -> SurfaceGeometry {
        let p = self.p + self.e1 * u.x + self.e2 * u.y;
        return self.geometry_at(&p, u);
    }
}
