use crate::core::pbrt::*;

/// Lambertian reflector on the front side of the surface.
#[derive(Debug, Clone)]
pub struct Diffuse {
    r: Spectrum,
}

impl Diffuse {
    pub fn new(r: &Spectrum) -> Self {
        Diffuse { r: *r }
    }
}

impl Default for Diffuse {
    fn default() -> Self {
        Diffuse {
            r: Spectrum::zero(),
        }
    }
}

impl Asset for Diffuse {
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

impl GeneralizedBsdf for Diffuse {
    fn get_type(&self) -> InteractionType {
        return INTERACTION_D;
    }

    fn sample_direction(
        &self,
        u: &Point2f,
        _u_comp: Float,
        _query_type: InteractionType,
        geom: &SurfaceGeometry,
        wi: &Vector3f,
    ) -> Option<Vector3f> {
        let local_wi = geom.to_local(wi);
        if !(local_cos(&local_wi) > 0.0) {
            return None;
        }
        let local_wo = cosine_sample_hemisphere(u);
        return Some(geom.to_world(&local_wo));
    }

    fn evaluate_direction_pdf(
        &self,
        geom: &SurfaceGeometry,
        _query_type: InteractionType,
        wi: &Vector3f,
        wo: &Vector3f,
        _eval_delta: bool,
    ) -> Float {
        let local_wi = geom.to_local(wi);
        let local_wo = geom.to_local(wo);
        if local_cos(&local_wi) <= 0.0 || local_cos(&local_wo) <= 0.0 {
            return 0.0;
        }
        return cosine_hemisphere_pdf_proj_sa(&local_wo);
    }

    fn evaluate_direction(
        &self,
        geom: &SurfaceGeometry,
        _types: InteractionType,
        wi: &Vector3f,
        wo: &Vector3f,
        trans_dir: TransportDirection,
        _eval_delta: bool,
    ) -> Spectrum {
        let local_wi = geom.to_local(wi);
        let local_wo = geom.to_local(wo);
        if local_cos(&local_wi) <= 0.0 || local_cos(&local_wo) <= 0.0 {
            return Spectrum::zero();
        }
        return self.r * (INV_PI * shading_normal_correction(geom, wi, wo, trans_dir));
    }

    fn is_delta_direction(&self, _t: InteractionType) -> bool {
        return false;
    }

    fn sample_direction_inverse(
        &self,
        geom: &SurfaceGeometry,
        wi: &Vector3f,
        wo: &Vector3f,
    ) -> Option<Point2f> {
        let local_wi = geom.to_local(wi);
        let local_wo = geom.to_local(wo);
        if !(local_cos(&local_wi) > 0.0) || !(local_cos(&local_wo) > 0.0) {
            return None;
        }
        return Some(concentric_sample_disk_inverse(&Point2f::new(
            local_wo.x, local_wo.y,
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn up() -> SurfaceGeometry {
        let mut geom = SurfaceGeometry {
            sn: Normal3f::new(0.0, 0.0, 1.0),
            gn: Normal3f::new(0.0, 0.0, 1.0),
            ..Default::default()
        };
        geom.compute_tangent_space();
        return geom;
    }

    #[test]
    fn test_001() {
        let bsdf = Diffuse::new(&Spectrum::new(0.5));
        let geom = up();
        let wi = Vector3f::new(0.2, 0.1, 1.0).normalize();
        let u = Point2f::new(0.3, 0.8);
        let wo = bsdf
            .sample_direction(&u, 0.0, INTERACTION_BSDF, &geom, &wi)
            .unwrap();
        let back = bsdf.sample_direction_inverse(&geom, &wi, &wo).unwrap();
        assert!((back - u).length() < 1e-3);
        let f = bsdf.evaluate_direction(
            &geom,
            INTERACTION_BSDF,
            &wi,
            &wo,
            TransportDirection::EyeToLight,
            false,
        );
        assert!((f.y() - 0.5 * INV_PI).abs() < 1e-5);
    }

    #[test]
    fn test_002() {
        let bsdf = Diffuse::new(&Spectrum::new(0.5));
        let geom = up();
        let below = Vector3f::new(0.0, 0.3, -1.0).normalize();
        let u = Point2f::new(0.5, 0.5);
        assert!(bsdf
            .sample_direction(&u, 0.0, INTERACTION_BSDF, &geom, &below)
            .is_none());
        let above = Vector3f::new(0.0, 0.0, 1.0);
        assert_eq!(
            bsdf.evaluate_direction_pdf(&geom, INTERACTION_BSDF, &above, &below, false),
            0.0
        );
    }
}
