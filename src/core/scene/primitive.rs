use crate::core::pbrt::*;
use std::sync::Arc;

/// A shape together with the assets attached to it.
pub struct Primitive {
    pub name: String,
    pub shape: Option<Arc<dyn Shape>>,
    pub bsdf: Option<Arc<dyn GeneralizedBsdf>>,
    pub light: Option<Arc<dyn Emitter>>,
    pub sensor: Option<Arc<dyn Sensor>>,
}

impl Primitive {
    pub fn get_type(&self) -> InteractionType {
        let mut t = INTERACTION_NONE;
        if let Some(bsdf) = self.bsdf.as_ref() {
            t |= bsdf.get_type();
        }
        if self.light.is_some() {
            t |= INTERACTION_L;
        }
        if self.sensor.is_some() {
            t |= INTERACTION_E;
        }
        return t;
    }

    /// Endpoint interface for a vertex sampled with type `ty`.
    pub fn emitter(&self, ty: InteractionType) -> Option<&dyn Emitter> {
        if (ty & INTERACTION_L) != 0 {
            return self.light.as_deref();
        }
        if (ty & INTERACTION_E) != 0 {
            return self.sensor.as_deref().map(|s| s.as_emitter());
        }
        return None;
    }

    /// Interface that samples and evaluates directions at a vertex of type `ty`.
    pub fn surface(&self, ty: InteractionType) -> Option<&dyn GeneralizedBsdf> {
        if let Some(e) = self.emitter(ty) {
            return Some(e.as_bsdf());
        }
        return self.bsdf.as_deref();
    }
}
