use crate::core::pbrt::*;

/// Isotropic point emitter. Its position is a delta distribution.
#[derive(Debug, Clone)]
pub struct PointLight {
    position: Point3f,
    intensity: Spectrum,
}

impl PointLight {
    pub fn new(position: &Point3f, intensity: &Spectrum) -> Self {
        PointLight {
            position: *position,
            intensity: *intensity,
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        PointLight::new(&Point3f::zero(), &Spectrum::one())
    }
}

impl Asset for PointLight {
    fn load(
        &mut self,
        props: &PropertyNode,
        _assets: &AssetTable,
        _primitive: &PrimitiveDesc,
    ) -> Result<()> {
        self.position = props.get_vector("position")?;
        self.intensity = props.get_spectrum("I", &self.intensity)?;
        return Ok(());
    }
}

impl GeneralizedBsdf for PointLight {
    fn get_type(&self) -> InteractionType {
        return INTERACTION_L;
    }

    fn sample_direction(
        &self,
        u: &Point2f,
        _u_comp: Float,
        _query_type: InteractionType,
        _geom: &SurfaceGeometry,
        _wi: &Vector3f,
    ) -> Option<Vector3f> {
        return Some(uniform_sample_sphere(u));
    }

    // No cosine at a point, so the projected solid angle coincides with the solid angle.
    fn evaluate_direction_pdf(
        &self,
        _geom: &SurfaceGeometry,
        _query_type: InteractionType,
        _wi: &Vector3f,
        _wo: &Vector3f,
        _eval_delta: bool,
    ) -> Float {
        return uniform_sphere_pdf();
    }

    fn evaluate_direction(
        &self,
        _geom: &SurfaceGeometry,
        _types: InteractionType,
        _wi: &Vector3f,
        _wo: &Vector3f,
        _trans_dir: TransportDirection,
        _eval_delta: bool,
    ) -> Spectrum {
        return self.intensity;
    }

    fn is_delta_direction(&self, _t: InteractionType) -> bool {
        return false;
    }

    fn sample_direction_inverse(
        &self,
        _geom: &SurfaceGeometry,
        _wi: &Vector3f,
        wo: &Vector3f,
    ) -> Option<Point2f> {
        return Some(uniform_sample_sphere_inverse(wo));
    }
}

impl Emitter for PointLight {
    fn as_bsdf(&self) -> &dyn GeneralizedBsdf {
        self
    }

    fn sample_position(&self, _u: &Point2f) -> SurfaceGeometry {
        return SurfaceGeometry::new_degenerated(&self.position);
    }

    fn evaluate_position_pdf(&self, _geom: &SurfaceGeometry, eval_delta: bool) -> Float {
        if eval_delta {
            1.0
        } else {
            0.0
        }
    }

    fn evaluate_position(&self, _geom: &SurfaceGeometry, eval_delta: bool) -> Spectrum {
        if eval_delta {
            Spectrum::one()
        } else {
            Spectrum::zero()
        }
    }

    fn is_delta_position(&self) -> bool {
        return true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let light = PointLight::new(&Point3f::new(0.0, 1.0, 0.0), &Spectrum::new(2.0));
        let geom = light.sample_position(&Point2f::new(0.5, 0.5));
        assert!(geom.degenerated);
        assert_eq!(light.evaluate_position_pdf(&geom, false), 0.0);
        assert_eq!(light.evaluate_position_pdf(&geom, true), 1.0);
        let u = Point2f::new(0.25, 0.6);
        let wo = light
            .sample_direction(&u, 0.0, INTERACTION_L, &geom, &Vector3f::zero())
            .unwrap();
        let back = light
            .sample_direction_inverse(&geom, &Vector3f::zero(), &wo)
            .unwrap();
        assert!((back - u).length() < 1e-4);
    }
}
