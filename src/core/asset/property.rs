use crate::core::pbrt::*;
use serde_json::Value;

/// Read-only view of an asset's JSON properties.
#[derive(Debug, Clone)]
pub struct PropertyNode {
    name: String,
    value: Value,
}

impl PropertyNode {
    pub fn new(name: &str, value: &Value) -> Self {
        PropertyNode {
            name: name.to_string(),
            value: value.clone(),
        }
    }

    pub fn name(&self) -> &str {
        return &self.name;
    }

    pub fn value(&self) -> &Value {
        return &self.value;
    }

    pub fn child(&self, key: &str) -> Option<PropertyNode> {
        let v = self.value.get(key)?;
        return Some(PropertyNode::new(&format!("{}.{}", self.name, key), v));
    }

    pub fn has(&self, key: &str) -> bool {
        return self.value.get(key).is_some();
    }

    fn error(&self, key: &str, message: &str) -> MltError {
        return MltError::invalid_property(&self.name, &format!("{}: {}", key, message));
    }

    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        match self.value.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.error(key, "expected a string")),
        }
    }

    pub fn find_float(&self, key: &str) -> Result<Option<Float>> {
        match self.value.get(key) {
            None => Ok(None),
            Some(v) => match v.as_f64() {
                Some(f) => Ok(Some(f as Float)),
                None => Err(self.error(key, "expected a number")),
            },
        }
    }

    pub fn get_float(&self, key: &str, default: Float) -> Result<Float> {
        return Ok(self.find_float(key)?.unwrap_or(default));
    }

    pub fn get_int(&self, key: &str, default: i64) -> Result<i64> {
        match self.value.get(key) {
            None => Ok(default),
            Some(v) => v.as_i64().ok_or_else(|| self.error(key, "expected an integer")),
        }
    }

    fn get_floats(&self, key: &str) -> Result<Option<Vec<Float>>> {
        match self.value.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) => Ok(Some(vec![f as Float])),
                None => Err(self.error(key, "expected a number")),
            },
            Some(Value::Array(values)) => {
                let mut out = Vec::with_capacity(values.len());
                for v in values {
                    match v.as_f64() {
                        Some(f) => out.push(f as Float),
                        None => return Err(self.error(key, "expected an array of numbers")),
                    }
                }
                Ok(Some(out))
            }
            Some(_) => Err(self.error(key, "expected a number or an array")),
        }
    }

    pub fn find_vector(&self, key: &str) -> Result<Option<Vector3f>> {
        match self.get_floats(key)? {
            None => Ok(None),
            Some(v) if v.len() == 3 => Ok(Some(Vector3f::new(v[0], v[1], v[2]))),
            Some(_) => Err(self.error(key, "expected 3 components")),
        }
    }

    pub fn get_vector(&self, key: &str) -> Result<Vector3f> {
        return self
            .find_vector(key)?
            .ok_or_else(|| self.error(key, "missing"));
    }

    /// A scalar fills every channel, three values are RGB, `N` values are used as is.
    pub fn get_spectrum(&self, key: &str, default: &Spectrum) -> Result<Spectrum> {
        match self.get_floats(key)? {
            None => Ok(*default),
            Some(v) if v.len() == 1 => Ok(Spectrum::new(v[0])),
            Some(v) if v.len() == Spectrum::N_SAMPLES => Ok(Spectrum::from_slice(&v)),
            Some(v) if v.len() == 3 => Ok(Spectrum::from_rgb(&[v[0], v[1], v[2]])),
            Some(_) => Err(self.error(key, "unexpected number of spectrum components")),
        }
    }
}
