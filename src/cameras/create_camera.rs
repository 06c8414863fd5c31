use super::*;
use crate::core::pbrt::*;

use std::sync::Arc;

pub fn create_sensor(
    name: &str,
    props: &PropertyNode,
    assets: &AssetTable,
    primitive: &PrimitiveDesc,
) -> Result<Arc<dyn Sensor>> {
    if name == "sensor::pinhole" {
        let mut sensor = PinholeSensor::default();
        sensor.load(props, assets, primitive)?;
        return Ok(Arc::new(sensor));
    } else {
        return Err(MltError::UnknownAsset(name.to_string()));
    }
}
