use super::*;
use crate::core::pbrt::*;
use crate::shapes::*;

use log::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn create_typed_asset(
    props: &PropertyNode,
    assets: &AssetTable,
    primitive: &PrimitiveDesc,
) -> Result<AssetInstance> {
    let type_name = props.get_string("type")?.ok_or_else(|| {
        MltError::invalid_property(props.name(), "missing 'type'")
    })?;
    let asset = create_asset(&type_name, props, assets, primitive)?;
    debug!("Created {} '{}' ({})", asset.kind(), props.name(), type_name);
    return Ok(asset);
}

fn load_bsdf(
    node: &PropertyNode,
    assets: &AssetTable,
    primitive: &PrimitiveDesc,
) -> Result<Arc<dyn GeneralizedBsdf>> {
    if let Value::String(id) = node.value() {
        return assets.get_bsdf(id);
    }
    match create_typed_asset(node, assets, primitive)? {
        AssetInstance::Bsdf(b) => Ok(b),
        other => Err(MltError::Scene(format!(
            "'{}' must be a bsdf, found a {}",
            node.name(),
            other.kind()
        ))),
    }
}

/// Builds a scene from `{"assets": {...}, "primitives": [...]}`.
///
/// Every primitive may carry a `shape`, and a `bsdf` (inline or the name of an entry in
/// `assets`), a `light` and a `sensor`.
pub fn load_scene(desc: &Value) -> Result<BasicScene> {
    let mut assets = AssetTable::new();
    if let Some(Value::Object(map)) = desc.get("assets") {
        for (name, v) in map.iter() {
            let props = PropertyNode::new(name, v);
            let owner = PrimitiveDesc {
                name: name.clone(),
                shape: None,
            };
            let asset = create_typed_asset(&props, &assets, &owner)?;
            assets.insert(name, asset);
        }
    }

    let prims = match desc.get("primitives") {
        Some(Value::Array(a)) => a,
        _ => return Err(MltError::Scene("'primitives' must be an array".to_string())),
    };

    let mut primitives = Vec::with_capacity(prims.len());
    for (i, v) in prims.iter().enumerate() {
        let node = PropertyNode::new(&format!("primitives[{}]", i), v);
        let name = node
            .get_string("name")?
            .unwrap_or_else(|| format!("primitive{}", i));
        let shape = match node.child("shape") {
            Some(s) => Some(create_shape(&s)?),
            None => None,
        };
        let owner = PrimitiveDesc {
            name: name.clone(),
            shape: shape.clone(),
        };
        let bsdf = match node.child("bsdf") {
            Some(b) => Some(load_bsdf(&b, &assets, &owner)?),
            None => None,
        };
        let light = match node.child("light") {
            Some(l) => match create_typed_asset(&l, &assets, &owner)? {
                AssetInstance::Light(l) => Some(l),
                other => {
                    return Err(MltError::Scene(format!(
                        "light of '{}' is a {}",
                        name,
                        other.kind()
                    )))
                }
            },
            None => None,
        };
        let sensor = match node.child("sensor") {
            Some(s) => match create_typed_asset(&s, &assets, &owner)? {
                AssetInstance::Sensor(s) => Some(s),
                other => {
                    return Err(MltError::Scene(format!(
                        "sensor of '{}' is a {}",
                        name,
                        other.kind()
                    )))
                }
            },
            None => None,
        };
        if light.is_some() && sensor.is_some() {
            return Err(MltError::Scene(format!(
                "'{}' cannot be both a light and a sensor",
                name
            )));
        }
        debug!("Primitive '{}'", name);
        primitives.push(Arc::new(Primitive {
            name,
            shape,
            bsdf,
            light,
            sensor,
        }));
    }

    let scene = BasicScene::new(primitives)?;
    if scene.sensor().is_none() {
        return Err(MltError::Scene("scene has no sensor".to_string()));
    }
    info!(
        "Loaded {} primitives, {} lights",
        scene.num_primitives(),
        scene.num_lights()
    );
    return Ok(scene);
}

pub fn load_scene_file(path: &Path) -> Result<BasicScene> {
    let s = fs::read_to_string(path)?;
    let desc: Value = serde_json::from_str(&s)?;
    return load_scene(&desc);
}
