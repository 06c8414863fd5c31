use crate::core::pbrt::*;

/// Dielectric boundary that refracts whenever Snell's law allows it and reflects otherwise.
#[derive(Debug, Clone)]
pub struct RefractAll {
    r: Spectrum,
    eta1: Float,
    eta2: Float,
}

impl RefractAll {
    pub fn new(r: &Spectrum, eta1: Float, eta2: Float) -> Self {
        RefractAll {
            r: *r,
            eta1,
            eta2,
        }
    }

    /// `(eta_i, eta_t)` as seen from the side `local_wi` lies on.
    fn etas(&self, local_wi: &Vector3f) -> (Float, Float) {
        if local_cos(local_wi) < 0.0 {
            return (self.eta2, self.eta1);
        }
        return (self.eta1, self.eta2);
    }
}

impl Default for RefractAll {
    fn default() -> Self {
        RefractAll::new(&Spectrum::one(), 1.0, 1.5)
    }
}

impl Asset for RefractAll {
    fn load(
        &mut self,
        props: &PropertyNode,
        _assets: &AssetTable,
        _primitive: &PrimitiveDesc,
    ) -> Result<()> {
        self.r = props.get_spectrum("R", &self.r)?;
        self.eta1 = props.get_float("eta1", self.eta1)?;
        self.eta2 = props.get_float("eta2", self.eta2)?;
        if !(self.eta1 > 0.0 && self.eta2 > 0.0) {
            return Err(MltError::invalid_property(
                props.name(),
                "indices of refraction must be positive",
            ));
        }
        return Ok(());
    }
}

impl GeneralizedBsdf for RefractAll {
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
        let (eta_i, eta_t) = self.etas(&local_wi);
        let wi_dot_n = local_cos(&local_wi);
        let eta = eta_i / eta_t;
        let cos_theta_t_sq = 1.0 - eta * eta * (1.0 - wi_dot_n * wi_dot_n);
        if cos_theta_t_sq <= 0.0 {
            // total internal reflection
            return Some(geom.to_world(&local_reflect(&local_wi)));
        }
        let sign = if wi_dot_n > 0.0 { -1.0 } else { 1.0 };
        let cos_theta_t = cos_theta_t_sq.sqrt() * sign;
        return Some(geom.to_world(&local_refract(&local_wi, eta, cos_theta_t)));
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
        let local_wi = geom.to_local(wi);
        let local_wo = geom.to_local(wo);
        let correction = shading_normal_correction(geom, wi, wo, trans_dir);
        if local_cos(&local_wi) * local_cos(&local_wo) >= 0.0 {
            return self.r * correction;
        }
        let (eta_i, eta_t) = self.etas(&local_wi);
        let eta = eta_i / eta_t;
        let refr = if trans_dir == TransportDirection::EyeToLight {
            eta
        } else {
            1.0
        };
        return self.r * (correction * refr * refr);
    }

    fn is_delta_direction(&self, _t: InteractionType) -> bool {
        return true;
    }

    fn eta(&self, geom: &SurfaceGeometry, wi: &Vector3f) -> Float {
        let (eta_i, eta_t) = self.etas(&geom.to_local(wi));
        return eta_i / eta_t;
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
        let bsdf = RefractAll::new(&Spectrum::one(), 1.0, 1.5);
        let geom = up();
        let wi = Vector3f::new(0.5, 0.0, 1.0).normalize();
        let wo = bsdf
            .sample_direction(&Point2f::zero(), 0.0, INTERACTION_S, &geom, &wi)
            .unwrap();
        assert!(wo.z < 0.0);
        // Snell: sin_i * eta1 = sin_t * eta2
        let sin_i = Float::sqrt(1.0 - wi.z * wi.z);
        let sin_t = Float::sqrt(1.0 - wo.z * wo.z);
        assert!((sin_i - 1.5 * sin_t).abs() < 1e-4);
        assert!((bsdf.eta(&geom, &wi) - 1.0 / 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_002() {
        // Grazing ray from inside is totally reflected.
        let bsdf = RefractAll::new(&Spectrum::one(), 1.0, 1.5);
        let geom = up();
        let wi = Vector3f::new(0.9, 0.0, -0.1).normalize();
        let wo = bsdf
            .sample_direction(&Point2f::zero(), 0.0, INTERACTION_S, &geom, &wi)
            .unwrap();
        assert!(wo.z < 0.0);
        assert!((wo.x + wi.x).abs() < 1e-5);
    }
}
