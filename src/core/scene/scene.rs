use crate::core::pbrt::*;
use std::sync::Arc;

pub struct Intersection {
    pub geom: SurfaceGeometry,
    pub index: usize,
    pub primitive: Arc<Primitive>,
}

/// Queries the mutation engine issues against the scene.
pub trait Scene: Send + Sync {
    fn intersect(&self, ray: &Ray) -> Option<Intersection>;

    /// True if nothing blocks the open segment between `p1` and `p2`.
    fn visible(&self, p1: &Point3f, p2: &Point3f) -> bool;

    /// Picks a light (`INTERACTION_L`) or the sensor (`INTERACTION_E`).
    fn sample_emitter(&self, query_type: InteractionType, u: Float) -> Option<Arc<Primitive>>;

    fn evaluate_emitter_pdf(&self, primitive: &Primitive) -> Float;

    fn sensor(&self) -> Option<Arc<Primitive>>;

    fn primitive(&self, index: usize) -> Option<Arc<Primitive>>;

    fn num_primitives(&self) -> usize;
}
