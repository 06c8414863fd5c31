use super::*;
use crate::core::pbrt::*;

use std::sync::Arc;

pub fn create_light(
    name: &str,
    props: &PropertyNode,
    assets: &AssetTable,
    primitive: &PrimitiveDesc,
) -> Result<Arc<dyn Emitter>> {
    if name == "light::area" {
        let mut light = AreaLight::default();
        light.load(props, assets, primitive)?;
        return Ok(Arc::new(light));
    } else if name == "light::point" {
        let mut light = PointLight::default();
        light.load(props, assets, primitive)?;
        return Ok(Arc::new(light));
    } else {
        return Err(MltError::UnknownAsset(name.to_string()));
    }
}
