use serde::{Deserialize, Serialize};

/// Direction in which a subpath is traced: radiance from the lights toward the sensor,
/// or importance from the sensor toward the lights.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize)]
pub enum TransportDirection {
    LightToEye,
    EyeToLight,
}

impl TransportDirection {
    pub fn reverse(&self) -> TransportDirection {
        match self {
            TransportDirection::LightToEye => TransportDirection::EyeToLight,
            TransportDirection::EyeToLight => TransportDirection::LightToEye,
        }
    }
}
