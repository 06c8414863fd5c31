use crate::core::pbrt::*;
use log::*;
use std::sync::Arc;

/// Brute-force scene over a handful of analytic primitives.
pub struct BasicScene {
    primitives: Vec<Arc<Primitive>>,
    lights: Vec<usize>,
    sensor: Option<usize>,
}

impl BasicScene {
    pub fn new(primitives: Vec<Arc<Primitive>>) -> Result<Self> {
        let mut lights = Vec::new();
        let mut sensor = None;
        for (i, p) in primitives.iter().enumerate() {
            if p.light.is_some() {
                lights.push(i);
            }
            if p.sensor.is_some() {
                if sensor.is_some() {
                    return Err(MltError::Scene(format!(
                        "more than one sensor: '{}'",
                        p.name
                    )));
                }
                sensor = Some(i);
            }
        }
        if lights.is_empty() {
            warn!("Scene has no light.");
        }
        Ok(BasicScene {
            primitives,
            lights,
            sensor,
        })
    }

    pub fn primitives(&self) -> &[Arc<Primitive>] {
        return &self.primitives;
    }

    pub fn num_lights(&self) -> usize {
        return self.lights.len();
    }
}

impl Scene for BasicScene {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let mut r = *ray;
        let mut hit: Option<(SurfaceGeometry, usize)> = None;
        for (i, p) in self.primitives.iter().enumerate() {
            if let Some(shape) = p.shape.as_ref() {
                if let Some((t, geom)) = shape.intersect(&r) {
                    r.t_max = t;
                    hit = Some((geom, i));
                }
            }
        }
        let (geom, index) = hit?;
        return Some(Intersection {
            geom,
            index,
            primitive: self.primitives[index].clone(),
        });
    }

    fn visible(&self, p1: &Point3f, p2: &Point3f) -> bool {
        let ray = Ray::new_segment(p1, p2);
        for p in self.primitives.iter() {
            if let Some(shape) = p.shape.as_ref() {
                if shape.intersect(&ray).is_some() {
                    return false;
                }
            }
        }
        return true;
    }

    fn sample_emitter(&self, query_type: InteractionType, u: Float) -> Option<Arc<Primitive>> {
        if (query_type & INTERACTION_E) != 0 {
            return self.sensor();
        }
        if (query_type & INTERACTION_L) != 0 && !self.lights.is_empty() {
            let n = self.lights.len();
            let i = usize::min((u * n as Float) as usize, n - 1);
            return Some(self.primitives[self.lights[i]].clone());
        }
        return None;
    }

    fn evaluate_emitter_pdf(&self, primitive: &Primitive) -> Float {
        if primitive.sensor.is_some() {
            return 1.0;
        }
        if primitive.light.is_some() && !self.lights.is_empty() {
            return 1.0 / self.lights.len() as Float;
        }
        return 0.0;
    }

    fn sensor(&self) -> Option<Arc<Primitive>> {
        return self.sensor.map(|i| self.primitives[i].clone());
    }

    fn primitive(&self, index: usize) -> Option<Arc<Primitive>> {
        return self.primitives.get(index).cloned();
    }

    fn num_primitives(&self) -> usize {
        return self.primitives.len();
    }
}
