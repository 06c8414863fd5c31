use approx::assert_abs_diff_eq;
use mlt_mutation::cameras::*;
use mlt_mutation::core::pbrt::*;
use mlt_mutation::integrators::*;
use mlt_mutation::lights::*;
use mlt_mutation::materials::*;
use mlt_mutation::scenes::*;
use serde_json::{json, Value};
use std::sync::Arc;

fn primitive_for(c: char) -> Arc<Primitive> {
    let mut p = Primitive {
        name: c.to_string(),
        shape: None,
        bsdf: None,
        light: None,
        sensor: None,
    };
    match c {
        'L' => p.light = Some(Arc::new(PointLight::default())),
        'E' => p.sensor = Some(Arc::new(PinholeSensor::default())),
        'D' => p.bsdf = Some(Arc::new(Diffuse::new(&Spectrum::one()))),
        'S' => p.bsdf = Some(Arc::new(Mirror::new(&Spectrum::one()))),
        _ => unreachable!(),
    }
    return Arc::new(p);
}

/// A path with the given type; positions are irrelevant for the path-class filters.
fn path_of_type(ty: &str) -> Path {
    let vertices = ty
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let t = match c {
                'L' => INTERACTION_L,
                'E' => INTERACTION_E,
                'D' => INTERACTION_D,
                _ => INTERACTION_S,
            };
            let geom = SurfaceGeometry::new_degenerated(&Point3f::new(i as Float, 0.0, 0.0));
            PathVertex::new(t, &geom, &primitive_for(c))
        })
        .collect();
    return Path::new(vertices);
}

fn three_vertex_path(scene: &dyn Scene, seed: u64) -> Path {
    let mut rng = RNG::new_sequence(seed);
    loop {
        if let Some((path, _)) = sample_bidirectional_path(scene, &mut rng, 3) {
            if path.len() == 3 {
                return path;
            }
        }
    }
}

/// Samples until a path of type `ty` turns up.
fn path_of_class(scene: &dyn Scene, max_path_vertices: i32, ty: &str, seed: u64) -> Path {
    let mut rng = RNG::new_sequence(seed);
    for _ in 0..1_000_000 {
        if let Some((path, _)) = sample_bidirectional_path(scene, &mut rng, max_path_vertices) {
            if path.path_type() == ty {
                return path;
            }
        }
    }
    panic!("no {} path found", ty);
}

/// Replays a fixed list of uniforms.
struct ScriptedRandom {
    values: Vec<Float>,
    consumed: usize,
}

impl ScriptedRandom {
    fn new(values: &[Float]) -> Self {
        ScriptedRandom {
            values: values.to_vec(),
            consumed: 0,
        }
    }
}

impl Random for ScriptedRandom {
    fn next(&mut self) -> Float {
        let u = self.values[self.consumed];
        self.consumed += 1;
        return u;
    }
}

/// A point light the pinhole sees directly, above a diffuse floor.
fn visible_point_light_scene() -> Value {
    return json!({
        "primitives": [
            {
                "name": "floor",
                "shape": {"type": "quad", "p": [-3, 0, -3], "e1": [0, 0, 6], "e2": [6, 0, 0]},
                "bsdf": {"type": "bsdf::diffuse", "R": [0.5, 0.5, 0.5]}
            },
            {
                "name": "bulb",
                "light": {"type": "light::point", "position": [0.3, 1.0, 0.0], "I": [5, 5, 5]}
            },
            {
                "name": "camera",
                "sensor": {
                    "type": "sensor::pinhole",
                    "eye": [0, 1, 5], "center": [0, 0, 0], "up": [0, 1, 0],
                    "fov": 40, "width": 32, "height": 32
                }
            }
        ]
    });
}

#[test]
fn path_class_filters() {
    let lens = |t: &str| MutationStrategy::check_mutatable(MltStrategy::Lens, &path_of_type(t));
    assert!(lens("LDE"));
    assert!(lens("LDSE"));
    assert!(lens("LSSE"));
    assert!(!lens("LSDE"));

    let caustic = |t: &str| MutationStrategy::check_mutatable(MltStrategy::Caustic, &path_of_type(t));
    assert!(caustic("LDE"));
    assert!(caustic("LSDE"));
    assert!(!caustic("LSE"));
    assert!(!caustic("LE"));

    let manifold = |t: &str| MutationStrategy::check_mutatable(MltStrategy::ManifoldLens, &path_of_type(t));
    assert!(manifold("LSDE"));
    assert!(manifold("LSSDSE"));
    assert!(!manifold("LDE"));
    assert!(!manifold("LSDDE"));
    assert!(!manifold("LSE"));

    assert!(MutationStrategy::check_mutatable(MltStrategy::Bidir, &path_of_type("LSDSE")));
}

#[test]
fn identity_keeps_the_path() {
    let scene = load_scene(&diffuse_scene_description()).unwrap();
    let x = three_vertex_path(&scene, 1);
    let options = MltOptions::default();
    let mut rng = RNG::new_sequence(2);
    let prop = MutationStrategy::mutate(MltStrategy::Identity, &scene, &mut rng, &x, &options).unwrap();
    assert_eq!(prop.kd, Prop::IDENTITY_KD);
    assert_eq!(prop.dl, Prop::IDENTITY_DL);
    assert_eq!(prop.path.len(), x.len());
    for (a, b) in prop.path.vertices.iter().zip(x.vertices.iter()) {
        assert_eq!(a.geom.p, b.geom.p);
        assert_eq!(a.ty, b.ty);
    }
    let q = MutationStrategy::q(MltStrategy::Identity, &scene, &x, &prop.path, prop.kd, prop.dl, &options);
    assert_eq!(q, 1.0);
}

#[test]
fn bidir_densities_are_positive_both_ways() {
    let scene = load_scene(&diffuse_scene_description()).unwrap();
    let mut options = MltOptions::default();
    options.max_path_vertices = 3;
    let x = three_vertex_path(&scene, 3);
    assert_eq!(x.path_type(), "LDE");

    let mut rng = RNG::new_sequence(4);
    let mut checked = 0;
    for _ in 0..2000 {
        let prop = match MutationStrategy::mutate(MltStrategy::Bidir, &scene, &mut rng, &x, &options) {
            Some(prop) => prop,
            None => continue,
        };
        let y = &prop.path;
        assert!(y.len() >= 2 && y.len() <= 3);
        assert!(!y.evaluate_measurement(&scene).is_black());
        let (kd, dl) = MutationStrategy::reverse_bookkeeping(MltStrategy::Bidir, &x, y, prop.kd, prop.dl);
        if kd < 1 {
            // nothing was added, so the reverse move would have to delete nothing
            continue;
        }
        let q_xy = MutationStrategy::q(MltStrategy::Bidir, &scene, &x, y, prop.kd, prop.dl, &options);
        let q_yx = MutationStrategy::q(MltStrategy::Bidir, &scene, y, &x, kd, dl, &options);
        assert!(q_xy > 0.0 && q_xy.is_finite(), "q(x->y) = {}", q_xy);
        assert!(q_yx > 0.0 && q_yx.is_finite(), "q(y->x) = {}", q_yx);
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn lens_keeps_the_path_class() {
    let scene = load_scene(&diffuse_scene_description()).unwrap();
    let options = MltOptions::default();
    let x = three_vertex_path(&scene, 5);
    let mut rng = RNG::new_sequence(6);
    let mut found = 0;
    for _ in 0..500 {
        let prop = match MutationStrategy::mutate(MltStrategy::Lens, &scene, &mut rng, &x, &options) {
            Some(prop) => prop,
            None => continue,
        };
        assert_eq!(prop.path.path_type(), "LDE");
        // the light vertex is kept
        assert_eq!(prop.path.vertices[0].geom.p, x.vertices[0].geom.p);
        let q_xy = MutationStrategy::q(MltStrategy::Lens, &scene, &x, &prop.path, prop.kd, prop.dl, &options);
        let q_yx = MutationStrategy::q(MltStrategy::Lens, &scene, &prop.path, &x, prop.kd, prop.dl, &options);
        assert!(q_xy > 0.0 && q_xy.is_finite());
        assert!(q_yx > 0.0 && q_yx.is_finite());
        let a = acceptance_ratio(q_xy, q_yx);
        assert!((0.0..=1.0).contains(&a));
        found += 1;
    }
    assert!(found > 0);
}

#[test]
fn caustic_perturbs_the_light_side() {
    let scene = load_scene(&diffuse_scene_description()).unwrap();
    let options = MltOptions::default();
    let x = three_vertex_path(&scene, 7);
    let mut rng = RNG::new_sequence(8);
    let mut found = 0;
    for _ in 0..500 {
        if let Some(prop) = MutationStrategy::mutate(MltStrategy::Caustic, &scene, &mut rng, &x, &options) {
            assert_eq!(prop.path.path_type(), "LDE");
            // the sensor vertex is kept
            assert_eq!(prop.path.vertices[2].geom.p, x.vertices[2].geom.p);
            let q = MutationStrategy::q(MltStrategy::Caustic, &scene, &x, &prop.path, prop.kd, prop.dl, &options);
            assert!(q > 0.0 && q.is_finite());
            found += 1;
        }
    }
    assert!(found > 0);
}

#[test]
fn impossible_reverse_moves_have_zero_density() {
    let scene = load_scene(&diffuse_scene_description()).unwrap();
    let options = MltOptions::default();
    let x = three_vertex_path(&scene, 9);
    // deleting no vertex is outside the support of the deletion count
    assert_eq!(MutationStrategy::q(MltStrategy::Bidir, &scene, &x, &x, 0, 0, &options), 0.0);
    // placement beyond the end of the path
    assert_eq!(MutationStrategy::q(MltStrategy::Bidir, &scene, &x, &x, 1, 7, &options), 0.0);
    // perturbations never change the number of vertices
    let short = Path::new(x.vertices[..2].to_vec());
    assert_eq!(MutationStrategy::q(MltStrategy::Lens, &scene, &x, &short, 0, 0, &options), 0.0);
    assert_eq!(acceptance_ratio(0.0, 0.0), 0.0);
}

#[test]
fn perturbation_densities_vanish_across_path_classes() {
    let scene = load_scene(&demo_scene_description()).unwrap();
    let options = MltOptions::default();
    let ldde = path_of_type("LDDE");
    let ldse = path_of_type("LDSE");
    let lsde = path_of_type("LSDE");
    let q = |strategy: MltStrategy, x: &Path, y: &Path| MutationStrategy::q(strategy, &scene, x, y, 0, 0, &options);

    assert_eq!(q(MltStrategy::Lens, &ldde, &ldse), 0.0);
    assert_eq!(q(MltStrategy::Lens, &ldse, &ldde), 0.0);
    assert_eq!(q(MltStrategy::Caustic, &ldde, &lsde), 0.0);
    assert_eq!(q(MltStrategy::Caustic, &lsde, &ldde), 0.0);
    assert_eq!(q(MltStrategy::Multichain, &ldde, &ldse), 0.0);
    assert_eq!(q(MltStrategy::Multichain, &ldde, &lsde), 0.0);
    // LDDE is not a manifold lens path at all
    assert_eq!(q(MltStrategy::ManifoldLens, &ldde, &lsde), 0.0);
    assert_eq!(q(MltStrategy::ManifoldLens, &lsde, &ldde), 0.0);
}

#[test]
fn bidir_inserts_a_vertex_with_a_replayable_draw() {
    let scene = load_scene(&visible_point_light_scene()).unwrap();
    let mut options = MltOptions::default();
    options.max_path_vertices = 3;

    let light = scene.sample_emitter(INTERACTION_L, 0.5).unwrap();
    let light_geom = light.emitter(INTERACTION_L).unwrap().sample_position(&Point2f::new(0.5, 0.5));
    let sensor = scene.sensor().unwrap();
    let sensor_geom = sensor.emitter(INTERACTION_E).unwrap().sample_position(&Point2f::new(0.5, 0.5));
    let mut x = Path::default();
    assert!(x.connect_subpaths(
        &scene,
        &Subpath::new(vec![PathVertex::new(INTERACTION_L, &light_geom, &light)]),
        &Subpath::new(vec![PathVertex::new(INTERACTION_E, &sensor_geom, &sensor)]),
        1,
        1,
    ));
    assert_eq!(x.path_type(), "LE");
    assert!(!x.evaluate_measurement(&scene).is_black());

    let u_dir = Point2f::new(0.5, 0.5);
    let script = [
        0.9, // three vertices
        0.1, // one deleted vertex
        0.9, // the sensor vertex is the one replaced, the light stays
        0.1, // nothing added on the light side
        0.5, // sensor selection
        0.5,
        0.5, // sensor position
        u_dir.x,
        u_dir.y, // primary ray direction
    ];
    let mut rng = ScriptedRandom::new(&script);
    let prop = MutationStrategy::mutate(MltStrategy::Bidir, &scene, &mut rng, &x, &options).unwrap();
    assert_eq!(rng.consumed, script.len());
    assert_eq!(prop.kd, 1);
    assert_eq!(prop.dl, 1);

    let y = &prop.path;
    assert_eq!(y.len(), 3);
    assert_eq!(y.path_type(), "LDE");
    assert_eq!(y.vertices[0].geom.p, x.vertices[0].geom.p);

    // the new vertex lies where the replayed draw at the sensor points
    let (v_l, v_d, v_e) = (&y.vertices[0], &y.vertices[1], &y.vertices[2]);
    let wo_e = v_e
        .emitter()
        .unwrap()
        .sample_direction(&u_dir, 0.0, INTERACTION_E, &v_e.geom, &Vector3f::zero())
        .unwrap();
    let to_d = v_e.direction_to(Some(v_d));
    assert_abs_diff_eq!(to_d.x, wo_e.x, epsilon = 1e-4);
    assert_abs_diff_eq!(to_d.y, wo_e.y, epsilon = 1e-4);
    assert_abs_diff_eq!(to_d.z, wo_e.z, epsilon = 1e-4);
    assert_abs_diff_eq!(v_d.geom.p.y, 0.0, epsilon = 1e-3);

    // and its two directions form a valid scattering event
    let wi = v_d.direction_to(Some(v_e));
    let wo = v_d.direction_to(Some(v_l));
    assert!(!v_d.evaluate_direction(&wi, &wo, TransportDirection::EyeToLight, false).is_black());
    assert!(v_d.evaluate_direction_pdf(&wi, &wo, false) > 0.0);

    let q_xy = MutationStrategy::q(MltStrategy::Bidir, &scene, &x, y, prop.kd, prop.dl, &options);
    let (kd, dl) = MutationStrategy::reverse_bookkeeping(MltStrategy::Bidir, &x, y, prop.kd, prop.dl);
    let q_yx = MutationStrategy::q(MltStrategy::Bidir, &scene, y, &x, kd, dl, &options);
    assert!(q_xy > 0.0 && q_xy.is_finite());
    assert!(q_yx > 0.0 && q_yx.is_finite());
}

#[test]
fn multichain_moves_a_caustic_path() {
    let scene = load_scene(&demo_scene_description()).unwrap();
    let options = MltOptions::default();
    let x = path_of_class(&scene, 4, "LSDE", 31);
    let mut rng = RNG::new_sequence(32);
    let mut found = 0;
    for _ in 0..2000 {
        let prop = match MutationStrategy::mutate(MltStrategy::Multichain, &scene, &mut rng, &x, &options) {
            Some(prop) => prop,
            None => continue,
        };
        let y = &prop.path;
        assert_eq!(y.path_type(), "LSDE");
        let q_xy = MutationStrategy::q(MltStrategy::Multichain, &scene, &x, y, prop.kd, prop.dl, &options);
        let (kd, dl) = MutationStrategy::reverse_bookkeeping(MltStrategy::Multichain, &x, y, prop.kd, prop.dl);
        let q_yx = MutationStrategy::q(MltStrategy::Multichain, &scene, y, &x, kd, dl, &options);
        assert!(q_xy > 0.0 && q_xy.is_finite(), "q(x->y) = {}", q_xy);
        assert!(q_yx > 0.0 && q_yx.is_finite(), "q(y->x) = {}", q_yx);
        found += 1;
    }
    assert!(found > 0);
}

#[test]
fn manifold_lens_keeps_the_light_vertex() {
    let scene = load_scene(&demo_scene_description()).unwrap();
    let options = MltOptions::default();
    let x = path_of_class(&scene, 4, "LSDE", 33);
    let mut rng = RNG::new_sequence(34);
    let mut found = 0;
    for _ in 0..2000 {
        let prop = match MutationStrategy::mutate(MltStrategy::ManifoldLens, &scene, &mut rng, &x, &options) {
            Some(prop) => prop,
            None => continue,
        };
        let y = &prop.path;
        assert_eq!(y.path_type(), "LSDE");
        assert_eq!(y.vertices[0].geom.p, x.vertices[0].geom.p);
        assert!(MutationStrategy::check_mutatable(MltStrategy::ManifoldLens, y));
        let q_xy = MutationStrategy::q(MltStrategy::ManifoldLens, &scene, &x, y, prop.kd, prop.dl, &options);
        let (kd, dl) = MutationStrategy::reverse_bookkeeping(MltStrategy::ManifoldLens, &x, y, prop.kd, prop.dl);
        let q_yx = MutationStrategy::q(MltStrategy::ManifoldLens, &scene, y, &x, kd, dl, &options);
        assert!(q_xy > 0.0 && q_xy.is_finite(), "q(x->y) = {}", q_xy);
        assert!(q_yx > 0.0 && q_yx.is_finite(), "q(y->x) = {}", q_yx);
        found += 1;
    }
    assert!(found > 0);
}
