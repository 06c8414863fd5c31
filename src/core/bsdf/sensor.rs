use crate::core::pbrt::*;
use std::sync::Arc;

pub trait Sensor: Emitter {
    fn as_emitter(&self) -> &dyn Emitter;

    fn get_film(&self) -> Arc<Film>;

    /// Raster coordinate on `[0, 1]^2` seen along `wo`, or `None` outside the field of view.
    fn raster_position(&self, wo: &Vector3f, geom: &SurfaceGeometry) -> Option<Point2f>;
}
