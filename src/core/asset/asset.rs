use crate::core::pbrt::*;
use std::collections::BTreeMap;
use std::sync::Arc;

/// What an asset learns about the primitive that owns it.
#[derive(Clone, Default)]
pub struct PrimitiveDesc {
    pub name: String,
    pub shape: Option<Arc<dyn Shape>>,
}

pub trait Asset {
    fn load(
        &mut self,
        props: &PropertyNode,
        assets: &AssetTable,
        primitive: &PrimitiveDesc,
    ) -> Result<()>;
}

#[derive(Clone)]
pub enum AssetInstance {
    Bsdf(Arc<dyn GeneralizedBsdf>),
    Light(Arc<dyn Emitter>),
    Sensor(Arc<dyn Sensor>),
}

impl AssetInstance {
    pub fn kind(&self) -> &'static str {
        match self {
            AssetInstance::Bsdf(_) => "bsdf",
            AssetInstance::Light(_) => "light",
            AssetInstance::Sensor(_) => "sensor",
        }
    }
}

/// Named assets shared between primitives.
#[derive(Clone, Default)]
pub struct AssetTable {
    entries: BTreeMap<String, AssetInstance>,
}

impl AssetTable {
    pub fn new() -> Self {
        AssetTable::default()
    }

    pub fn insert(&mut self, name: &str, asset: AssetInstance) {
        self.entries.insert(name.to_string(), asset);
    }

    pub fn get(&self, name: &str) -> Result<&AssetInstance> {
        return self
            .entries
            .get(name)
            .ok_or_else(|| MltError::MissingAsset(name.to_string()));
    }

    pub fn get_bsdf(&self, name: &str) -> Result<Arc<dyn GeneralizedBsdf>> {
        match self.get(name)? {
            AssetInstance::Bsdf(b) => Ok(b.clone()),
            other => Err(MltError::Scene(format!(
                "asset '{}' is a {}, not a bsdf",
                name,
                other.kind()
            ))),
        }
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}
