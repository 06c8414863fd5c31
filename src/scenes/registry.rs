use crate::cameras::*;
use crate::core::pbrt::*;
use crate::lights::*;
use crate::materials::*;

/// Type names understood by `create_asset`.
pub const ASSET_TYPES: [&str; 6] = [
    "bsdf::diffuse",
    "bsdf::mirror",
    "bsdf::refract_all",
    "light::area",
    "light::point",
    "sensor::pinhole",
];

pub fn create_asset(
    name: &str,
    props: &PropertyNode,
    assets: &AssetTable,
    primitive: &PrimitiveDesc,
) -> Result<AssetInstance> {
    if name.starts_with("bsdf::") {
        return Ok(AssetInstance::Bsdf(create_bsdf(
            name, props, assets, primitive,
        )?));
    } else if name.starts_with("light::") {
        return Ok(AssetInstance::Light(create_light(
            name, props, assets, primitive,
        )?));
    } else if name.starts_with("sensor::") {
        return Ok(AssetInstance::Sensor(create_sensor(
            name, props, assets, primitive,
        )?));
    } else {
        return Err(MltError::UnknownAsset(name.to_string()));
    }
}
