use crate::core::pbrt::*;

pub struct Sphere {
    center: Point3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: &Point3f, radius: Float) -> Self {
        Sphere {
            center: *center,
            radius,
        }
    }

    fn geometry_at(&self, p: &Point3f) -> SurfaceGeometry {
        let n = (*p - self.center) / self.radius;
        let mut geom = SurfaceGeometry {
            p: *p,
            sn: n,
            gn: n,
            ..Default::default()
        };
        geom.compute_tangent_space();
        // n = (p - c) / r
        geom.dndu = geom.dpdu / self.radius;
        geom.dndv = geom.dpdv / self.radius;
        let mut phi = Float::atan2(n.y, n.x);
        if phi < 0.0 {
            phi += 2.0 * PI;
        }
        geom.uv = Point2f::new(phi * INV_2_PI, clamp(n.z, -1.0, 1.0).acos() * INV_PI);
        return geom;
    }
}

impl Shape for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<(Float, SurfaceGeometry)> {
        let oc = ray.o - self.center;
        let a = ray.d.length_squared();
        let b = oc.dot(&ray.d);
        let c = oc.length_squared() - self.radius * self.radius;
        let det = b * b - a * c;
        if !(det >= 0.0) {
            return None;
        }
        let e = det.sqrt();
        let t0 = (-b - e) / a;
        let t1 = (-b + e) / a;
        let t = if t0 >= ray.t_min && t0 <= ray.t_max {
            t0
        } else if t1 >= ray.t_min && t1 <= ray.t_max {
            t1
        } else {
            return None;
        };
        return Some((t, self.geometry_at(&ray.position(t))));
    }

    fn area(&self) -> Float {
        return 4.0 * PI * self.radius * self.radius;
    }

    fn sample(&self, u: &Point2f) -> SurfaceGeometry {
        let p = self.center + uniform_sample_sphere(u) * self.radius;
        return self.geometry_at(&p);
    }
}
