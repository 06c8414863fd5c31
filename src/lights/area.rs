use crate::core::pbrt::*;

use std::sync::Arc;

/// Cosine-weighted emitter covering the front side of its primitive's shape.
pub struct AreaLight {
    le: Spectrum,
    shape: Option<Arc<dyn Shape>>,
    inv_area: Float,
}

impl AreaLight {
    pub fn new(le: &Spectrum, shape: &Arc<dyn Shape>) -> Self {
        AreaLight {
            le: *le,
            shape: Some(shape.clone()),
            inv_area: 1.0 / shape.area(),
        }
    }
}

impl Default for AreaLight {
    fn default() -> Self {
        AreaLight {
            le: Spectrum::one(),
            shape: None,
            inv_area: 0.0,
        }
    }
}

impl Asset for AreaLight {
    fn load(
        &mut self,
        props: &PropertyNode,
        _assets: &AssetTable,
        primitive: &PrimitiveDesc,
    ) -> Result<()> {
        self.le = props.get_spectrum("Le", &self.le)?;
        let shape = primitive.shape.as_ref().ok_or_else(|| {
            MltError::invalid_property(
                props.name(),
                &format!("area light on '{}' needs a shape", primitive.name),
            )
        })?;
        let area = shape.area();
        if !(area > 0.0) {
            return Err(MltError::invalid_property(props.name(), "zero area"));
        }
        self.inv_area = 1.0 / area;
        self.shape = Some(shape.clone());
        return Ok(());
    }
}

impl GeneralizedBsdf for AreaLight {
    fn get_type(&self) -> InteractionType {
        return INTERACTION_L;
    }

    fn sample_direction(
        &self,
        u: &Point2f,
        _u_comp: Float,
        _query_type: InteractionType,
        geom: &SurfaceGeometry,
        _wi: &Vector3f,
    ) -> Option<Vector3f> {
        let local_wo = cosine_sample_hemisphere(u);
        return Some(geom.to_world(&local_wo));
    }

    fn evaluate_direction_pdf(
        &self,
        geom: &SurfaceGeometry,
        _query_type: InteractionType,
        _wi: &Vector3f,
        wo: &Vector3f,
        _eval_delta: bool,
    ) -> Float {
        let local_wo = geom.to_local(wo);
        if local_cos(&local_wo) <= 0.0 {
            return 0.0;
        }
        return cosine_hemisphere_pdf_proj_sa(&local_wo);
    }

    fn evaluate_direction(
        &self,
        geom: &SurfaceGeometry,
        _types: InteractionType,
        _wi: &Vector3f,
        wo: &Vector3f,
        _trans_dir: TransportDirection,
        _eval_delta: bool,
    ) -> Spectrum {
        let local_wo = geom.to_local(wo);
        if local_cos(&local_wo) <= 0.0 {
            return Spectrum::zero();
        }
        return self.le;
    }

    fn is_delta_direction(&self, _t: InteractionType) -> bool {
        return false;
    }

    fn sample_direction_inverse(
        &self,
        geom: &SurfaceGeometry,
        _wi: &Vector3f,
        wo: &Vector3f,
    ) -> Option<Point2f> {
        let local_wo = geom.to_local(wo);
        if !(local_cos(&local_wo) > 0.0) {
            return None;
        }
        return Some(concentric_sample_disk_inverse(&Point2f::new(
            local_wo.x, local_wo.y,
        )));
    }
}

impl Emitter for AreaLight {
    fn as_bsdf(&self) -> &dyn GeneralizedBsdf {
        self
    }

    fn sample_position(&self, u: &Point2f) -> SurfaceGeometry {
        match self.shape.as_ref() {
            Some(shape) => shape.sample(u),
            None => SurfaceGeometry::default(),
        }
    }

    fn evaluate_position_pdf(&self, _geom: &SurfaceGeometry, _eval_delta: bool) -> Float {
        return self.inv_area;
    }

    fn evaluate_position(&self, _geom: &SurfaceGeometry, _eval_delta: bool) -> Spectrum {
        return Spectrum::one();
    }

    fn is_delta_position(&self) -> bool {
        return false;
    }
}
