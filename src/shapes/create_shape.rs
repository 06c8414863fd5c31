use super::*;
use crate::core::pbrt::*;

use std::sync::Arc;

pub fn create_shape(props: &PropertyNode) -> Result<Arc<dyn Shape>> {
    let name = props.get_string("type")?.unwrap_or_default();
    if name == "quad" {
        let p = props.get_vector("p")?;
        let e1 = props.get_vector("e1")?;
        let e2 = props.get_vector("e2")?;
        if Vector3f::cross(&e1, &e2).length_squared() == 0.0 {
            return Err(MltError::invalid_property(props.name(), "degenerate quad"));
        }
        return Ok(Arc::new(Quad::new(&p, &e1, &e2)));
    } else if name == "sphere" {
        let center = props.get_vector("center")?;
        let radius = props.get_float("radius", 1.0)?;
        if !(radius > 0.0) {
            return Err(MltError::invalid_property(props.name(), "radius must be positive"));
        }
        return Ok(Arc::new(Sphere::new(&center, radius)));
    } else {
        return Err(MltError::UnknownAsset(format!("shape::{}", name)));
    }
}
