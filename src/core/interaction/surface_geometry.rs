use crate::core::pbrt::*;

/// Local differential geometry at a path vertex.
///
/// `dpdu`, `dpdv` and `sn` form an orthonormal frame; `dndu` and `dndv` are the
/// derivatives of the shading normal along `dpdu` and `dpdv`. A degenerated geometry is a
/// point without a surface (point light, pinhole), which has no cosine factor.
#[derive(Debug, Default, Copy, Clone)]
pub struct SurfaceGeometry {
    pub degenerated: bool,
    pub infinite: bool,
    pub p: Point3f,
    pub sn: Normal3f,
    pub gn: Normal3f,
    pub dpdu: Vector3f,
    pub dpdv: Vector3f,
    pub dndu: Vector3f,
    pub dndv: Vector3f,
    pub uv: Point2f,
}

impl SurfaceGeometry {
    pub fn new_degenerated(p: &Point3f) -> Self {
        let mut geom = SurfaceGeometry {
            degenerated: true,
            p: *p,
            sn: Normal3f::new(0.0, 0.0, 1.0),
            gn: Normal3f::new(0.0, 0.0, 1.0),
            ..Default::default()
        };
        geom.compute_tangent_space();
        return geom;
    }

    /// Rebuilds `dpdu`/`dpdv` as an orthonormal basis around `sn`.
    pub fn compute_tangent_space(&mut self) {
        let (u, v) = coordinate_system(&self.sn);
        self.dpdu = u;
        self.dpdv = v;
    }

    #[inline]
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        return Vector3f::new(v.dot(&self.dpdu), v.dot(&self.dpdv), v.dot(&self.sn));
    }

    #[inline]
    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        return self.dpdu * v.x + self.dpdv * v.y + self.sn * v.z;
    }
}

#[inline]
pub fn local_cos(v: &Vector3f) -> Float {
    return v.z;
}

/// Generalized geometry term between two surface points.
pub fn geometry_term(g1: &SurfaceGeometry, g2: &SurfaceGeometry) -> Float {
    let p1p2 = g2.p - g1.p;
    let p1p2_l2 = p1p2.length_squared();
    let p1p2_l = p1p2_l2.sqrt();
    let d = p1p2 / p1p2_l;
    let c1 = if g1.degenerated { 1.0 } else { g1.sn.abs_dot(&d) };
    let c2 = if g2.degenerated { 1.0 } else { g2.sn.abs_dot(&d) };
    return c1 * c2 / p1p2_l2;
}

/// Converts a projected-solid-angle density at `from` into an area density at `to`.
pub fn convert_to_area(pdf: Float, from: &SurfaceGeometry, to: &SurfaceGeometry) -> Float {
    return pdf * geometry_term(from, to);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let mut geom = SurfaceGeometry {
            sn: Normal3f::new(0.0, 1.0, 0.0),
            gn: Normal3f::new(0.0, 1.0, 0.0),
            ..Default::default()
        };
        geom.compute_tangent_space();
        let w = Vector3f::new(0.3, 0.4, -0.2).normalize();
        let l = geom.to_local(&w);
        let back = geom.to_world(&l);
        assert!((back - w).length() < 1e-5);
        assert!((local_cos(&l) - 0.4 / Float::sqrt(0.29)).abs() < 1e-5);
    }

    #[test]
    fn test_002() {
        let a = SurfaceGeometry::new_degenerated(&Point3f::new(0.0, 0.0, 0.0));
        let mut b = SurfaceGeometry {
            p: Point3f::new(0.0, 0.0, 2.0),
            sn: Normal3f::new(0.0, 0.0, -1.0),
            gn: Normal3f::new(0.0, 0.0, -1.0),
            ..Default::default()
        };
        b.compute_tangent_space();
        assert!((geometry_term(&a, &b) - 0.25).abs() < 1e-6);
    }
}
