use super::*;
use crate::core::pbrt::*;

use std::sync::Arc;

pub fn create_bsdf(
    name: &str,
    props: &PropertyNode,
    assets: &AssetTable,
    primitive: &PrimitiveDesc,
) -> Result<Arc<dyn GeneralizedBsdf>> {
    if name == "bsdf::diffuse" {
        let mut bsdf = Diffuse::default();
        bsdf.load(props, assets, primitive)?;
        return Ok(Arc::new(bsdf));
    } else if name == "bsdf::mirror" {
        let mut bsdf = Mirror::default();
        bsdf.load(props, assets, primitive)?;
        return Ok(Arc::new(bsdf));
    } else if name == "bsdf::refract_all" {
        let mut bsdf = RefractAll::default();
        bsdf.load(props, assets, primitive)?;
        return Ok(Arc::new(bsdf));
    } else {
        return Err(MltError::UnknownAsset(name.to_string()));
    }
}
