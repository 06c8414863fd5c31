use crate::core::pbrt::*;

/// Perfect specular reflector.
#[derive(Debug, Clone)]
pub struct Mirror {
    r: Spectrum,
}

impl Mirror {
    pub fn new(r: &Spectrum) -> Self {
        Mirror { r: *r }
    }
}

impl Default for Mirror {
    fn default() -> Self {
        Mirror {
            r: Spectrum::one(),
        }
    }
}

impl Asset for Mirror {
    fn load(
        &mut self,
        props: &PropertyNode,
        _assets: &AssetTable,
        _primitive: &PrimitiveDesc,
    ) -> Result<()> {
        self.r = props.get_spectrum("R", &self.r)?;
        return Ok(());
    }
}

impl GeneralizedBsdf for Mirror {
    fn get_type(&self) -> InteractionType {
        return INTERACTION_S;
    }

    fn sample_direction(
        &self,
        _u: &Point2f,
        _u_comp: Float,
        _query_type: InteractionType,
        geom: &SurfaceGeometry,
        wi: &Vector3f,
    ) -> Option<Vector3f> {
        let local_wi = geom.to_local(wi);
        return Some(geom.to_world(&local_reflect(&local_wi)));
    }

    fn evaluate_direction_pdf(
        &self,
        _geom: &SurfaceGeometry,
        _query_type: InteractionType,
        _wi: &Vector3f,
        _wo: &Vector3f,
        eval_delta: bool,
    ) -> Float {
        if !eval_delta {
            return 0.0;
        }
        return 1.0;
    }

    fn evaluate_direction(
        &self,
        geom: &SurfaceGeometry,
        _types: InteractionType,
        wi: &Vector3f,
        wo: &Vector3f,
        trans_dir: TransportDirection,
        eval_delta: bool,
    ) -> Spectrum {
        if !eval_delta {
            return Spectrum::zero();
        }
        return self.r * shading_normal_correction(geom, wi, wo, trans_dir);
    }

    fn is_delta_direction(&self, _t: InteractionType) -> bool {
        return true;
    }
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
        let bsdf = Mirror::new(&Spectrum::new(0.9));
        let wi = Vector3f::new(-1.0, 1.0, 0.0).normalize();
        let wo = bsdf
            .sample_direction(&Point2f::zero(), 0.0, INTERACTION_S, &geom, &wi)
            .unwrap();
        assert!((wo - Vector3f::new(1.0, 1.0, 0.0).normalize()).length() < 1e-5);
    }
}
