use super::path::PathVertex;
use crate::core::pbrt::*;

/// What a random number requested by the subpath tracer is used for.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum SampleUsage {
    EmitterSelection,
    Position,
    Direction,
    ComponentSelection,
}

/// Subpath ordered from its own endpoint (a light or the sensor) outward.
#[derive(Clone, Default)]
pub struct Subpath {
    pub vertices: Vec<PathVertex>,
}

impl Subpath {
    pub fn new(vertices: Vec<PathVertex>) -> Self {
        Subpath { vertices }
    }

    /// Extends the subpath by up to `num_vertices` vertices with independent samples
    /// and returns how many were added.
    pub fn sample_subpath_from_endpoint(
        &mut self,
        scene: &dyn Scene,
        rng: &mut dyn Random,
        trans_dir: TransportDirection,
        num_vertices: usize,
    ) -> usize {
        if num_vertices == 0 {
            return 0;
        }
        let n0 = self.vertices.len();
        let v = self.vertices.last().cloned();
        let pv = if n0 >= 2 {
            Some(self.vertices[n0 - 2].clone())
        } else {
            None
        };
        let vertices = &mut self.vertices;
        trace_subpath_from_endpoint_with_sampler(
            scene,
            v.as_ref(),
            pv.as_ref(),
            n0,
            n0 + num_vertices,
            trans_dir,
            |_, _, _, _| rng.next(),
            |_, _, v, _| {
                vertices.push(v.clone());
                return true;
            },
        );
        return self.vertices.len() - n0;
    }
}

fn sample_2d<S>(sampler: &mut S, num_vertices: usize, primitive: Option<&Primitive>, usage: SampleUsage) -> Point2f
where
    S: FnMut(usize, Option<&Primitive>, SampleUsage, usize) -> Float,
{
    let u0 = sampler(num_vertices, primitive, usage, 0);
    let u1 = sampler(num_vertices, primitive, usage, 1);
    return Point2f::new(u0, u1);
}

/// Traces a subpath starting after `init_v` (whose predecessor is `init_pv`), which is
/// vertex number `init_num_vertices` of the subpath. With `init_num_vertices == 0` the
/// endpoint itself is sampled first.
///
/// Every random number is drawn through `sampler(num_vertices, primitive, usage, index)`,
/// where `num_vertices` is the vertex count the draw will produce. `process` receives each
/// new vertex together with its predecessor and the running throughput; returning `false`
/// stops the trace. Tracing never terminates by Russian roulette.
pub fn trace_subpath_from_endpoint_with_sampler<S, P>(
    scene: &dyn Scene,
    init_v: Option<&PathVertex>,
    init_pv: Option<&PathVertex>,
    init_num_vertices: usize,
    max_num_vertices: usize,
    trans_dir: TransportDirection,
    mut sampler: S,
    mut process: P,
) where
    S: FnMut(usize, Option<&Primitive>, SampleUsage, usize) -> Float,
    P: FnMut(usize, Option<&PathVertex>, &PathVertex, &mut Spectrum) -> bool,
{
    let mut pv: Option<PathVertex> = init_v.cloned();
    let mut ppv: Option<PathVertex> = init_pv.cloned();
    let mut init_wo = Vector3f::zero();
    let mut throughput = Spectrum::one();

    let mut step = init_num_vertices;
    while step < max_num_vertices {
        if step == 0 {
            let ty = match trans_dir {
                TransportDirection::LightToEye => INTERACTION_L,
                TransportDirection::EyeToLight => INTERACTION_E,
            };
            let u = sampler(1, None, SampleUsage::EmitterSelection, 0);
            let primitive = match scene.sample_emitter(ty, u) {
                Some(p) => p,
                None => break,
            };
            let emitter = match primitive.emitter(ty) {
                Some(e) => e,
                None => break,
            };
            let u_pos = sample_2d(&mut sampler, 1, Some(&primitive), SampleUsage::Position);
            let geom = emitter.sample_position(&u_pos);
            let u_dir = sample_2d(&mut sampler, 1, Some(&primitive), SampleUsage::Direction);
            init_wo = match emitter.sample_direction(&u_dir, 0.0, ty, &geom, &Vector3f::zero()) {
                Some(wo) => wo,
                None => break,
            };
            let pdf = emitter.evaluate_position_pdf(&geom, true) * scene.evaluate_emitter_pdf(&primitive);
            throughput = emitter.evaluate_position(&geom, true) / pdf;

            let v = PathVertex::new(ty, &geom, &primitive);
            if !process(1, None, &v, &mut throughput) {
                break;
            }
            pv = Some(v);
        } else {
            let curr = match pv.as_ref() {
                Some(v) => v,
                None => break,
            };
            let surface = match curr.surface() {
                Some(s) => s,
                None => break,
            };
            let num_vertices = step + 1;
            let (wi, wo) = if step == 1 && init_num_vertices != 1 {
                (Vector3f::zero(), init_wo)
            } else {
                let wi = curr.direction_to(ppv.as_ref());
                let u = sample_2d(&mut sampler, num_vertices, Some(&curr.primitive), SampleUsage::Direction);
                let u_comp = sampler(
                    num_vertices,
                    Some(&curr.primitive),
                    SampleUsage::ComponentSelection,
                    0,
                );
                match surface.sample_direction(&u, u_comp, curr.ty, &curr.geom, &wi) {
                    Some(wo) => (wi, wo),
                    None => break,
                }
            };

            let fs = surface.evaluate_direction(&curr.geom, curr.ty, &wi, &wo, trans_dir, true);
            if fs.is_black() {
                break;
            }
            let pdf = surface.evaluate_direction_pdf(&curr.geom, curr.ty, &wi, &wo, true);
            throughput *= fs / pdf;

            let ray = Ray::new(&curr.geom.p, &wo);
            let isect = match scene.intersect(&ray) {
                Some(isect) => isect,
                None => break,
            };
            let ty = isect.primitive.get_type() & !INTERACTION_EMITTER;
            let v = PathVertex::new(ty, &isect.geom, &isect.primitive);
            if !process(num_vertices, pv.as_ref(), &v, &mut throughput) {
                break;
            }
            if isect.geom.infinite {
                break;
            }
            ppv = pv.take();
            pv = Some(v);
        }
        step += 1;
    }
}
