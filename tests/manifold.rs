use approx::assert_relative_eq;
use mlt_mutation::core::pbrt::*;
use mlt_mutation::integrators::*;
use mlt_mutation::materials::*;
use mlt_mutation::scenes::*;
use serde_json::json;
use std::sync::Arc;

fn surface_primitive(bsdf: Arc<dyn GeneralizedBsdf>) -> Arc<Primitive> {
    return Arc::new(Primitive {
        name: String::new(),
        shape: None,
        bsdf: Some(bsdf),
        light: None,
        sensor: None,
    });
}

fn vertex(
    ty: InteractionType,
    primitive: &Arc<Primitive>,
    p: Point3f,
    n: Normal3f,
    dpdu: Vector3f,
    dndu: Vector3f,
) -> PathVertex {
    let geom = SurfaceGeometry {
        p,
        sn: n,
        gn: n,
        dpdu,
        dpdv: Vector3f::new(0.0, 0.0, 1.0),
        dndu,
        ..Default::default()
    };
    return PathVertex::new(ty, &geom, primitive);
}

// Worked example of a single curved reflector between two diffuse points.
#[test]
fn constraint_jacobian_of_a_curved_reflector() {
    let d = surface_primitive(Arc::new(Diffuse::new(&Spectrum::one())));
    let s = surface_primitive(Arc::new(Mirror::new(&Spectrum::one())));
    let zero = Vector3f::zero();
    let path = vec![
        vertex(
            INTERACTION_D,
            &d,
            Point3f::new(-1.0, 2.0, 0.0),
            Normal3f::new(0.0, -1.0, 0.0),
            Vector3f::new(-1.0, 0.0, 0.0),
            zero,
        ),
        vertex(
            INTERACTION_S,
            &s,
            Point3f::new(0.0, 1.0, 0.0),
            Normal3f::new(0.0, 1.0, 0.0),
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(1.0, 0.0, 0.0),
        ),
        vertex(
            INTERACTION_D,
            &d,
            Point3f::new(1.0, 2.0, 0.0),
            Normal3f::new(0.0, -1.0, 0.0),
            Vector3f::new(1.0, 0.0, 0.0),
            zero,
        ),
    ];

    let nabla_c = compute_constraint_jacobian(&path);
    assert_eq!(nabla_c.len(), 1);
    let expected = [
        (nabla_c[0].a, [-0.25, 0.0, 0.0, 0.5]),
        (nabla_c[0].b, [-1.5, 0.0, 0.0, -1.0]),
        (nabla_c[0].c, [0.25, 0.0, 0.0, 0.5]),
    ];
    for (m, e) in expected.iter() {
        assert_relative_eq!(m[(0, 0)], e[0], epsilon = 1e-5);
        assert_relative_eq!(m[(0, 1)], e[1], epsilon = 1e-5);
        assert_relative_eq!(m[(1, 0)], e[2], epsilon = 1e-5);
        assert_relative_eq!(m[(1, 1)], e[3], epsilon = 1e-5);
    }

    let g = geometry_term(&path[0].geom, &path[1].geom);
    let multi_g = compute_constraint_jacobian_determinant(&path);
    assert_relative_eq!(1.0 / (g * multi_g), 48.0, epsilon = 1e-3);
}

fn mirror_scene() -> BasicScene {
    let desc = json!({
        "primitives": [
            {
                "name": "mirror",
                "shape": {"type": "quad", "p": [-5, 0, -5], "e1": [0, 0, 10], "e2": [10, 0, 0]},
                "bsdf": {"type": "bsdf::mirror", "R": [1, 1, 1]}
            },
            {
                "name": "ceiling",
                "shape": {"type": "quad", "p": [-5, 3, -5], "e1": [10, 0, 0], "e2": [0, 0, 10]},
                "bsdf": {"type": "bsdf::diffuse", "R": [0.5, 0.5, 0.5]}
            },
            {
                "name": "light",
                "light": {"type": "light::point", "position": [-1, 2, 0], "I": [1, 1, 1]}
            },
            {
                "name": "camera",
                "sensor": {
                    "type": "sensor::pinhole",
                    "eye": [0, 1.5, 8], "center": [0, 1.5, 0], "up": [0, 1, 0],
                    "fov": 40, "width": 8, "height": 8
                }
            }
        ]
    });
    return load_scene(&desc).unwrap();
}

/// `L S D` chain through the mirror point at the origin.
fn seed_chain(scene: &dyn Scene) -> Vec<PathVertex> {
    let light = scene.sample_emitter(INTERACTION_L, 0.5).unwrap();
    let l_geom = light.light.as_ref().unwrap().sample_position(&Point2f::new(0.5, 0.5));
    let v0 = PathVertex::new(INTERACTION_L, &l_geom, &light);

    let to_mirror = (Point3f::zero() - l_geom.p).normalize();
    let hit1 = scene.intersect(&Ray::new(&l_geom.p, &to_mirror)).unwrap();
    let v1 = PathVertex::new(hit1.primitive.get_type(), &hit1.geom, &hit1.primitive);

    let reflected = Vector3f::new(to_mirror.x, -to_mirror.y, to_mirror.z);
    let hit2 = scene.intersect(&Ray::new(&hit1.geom.p, &reflected)).unwrap();
    let v2 = PathVertex::new(hit2.primitive.get_type(), &hit2.geom, &hit2.primitive);
    return vec![v0, v1, v2];
}

#[test]
fn walk_reaches_a_reflected_target() {
    let scene = mirror_scene();
    let seed = seed_chain(&scene);
    assert!(is_specular(seed[1].primitive_type()));
    assert_relative_eq!(seed[2].geom.p.y, 3.0, epsilon = 1e-4);

    let target = Point3f::new(2.0, 3.0, 0.5);
    let walked = walk_manifold(&scene, &seed, &target).unwrap();
    assert_eq!(walked.len(), 3);
    assert!((walked[2].geom.p - target).length() < 1e-2);
    // the light stays where it is, the mirror point follows the reflection
    assert_eq!(walked[0].geom.p, seed[0].geom.p);
    assert_relative_eq!(walked[1].geom.p.x, 0.2, epsilon = 1e-2);
    assert_relative_eq!(walked[1].geom.p.z, 0.2, epsilon = 1e-2);

    let det = compute_constraint_jacobian_determinant(&walked);
    assert!(det.is_finite() && det > 0.0);

    let back = walk_manifold(&scene, &walked, &seed[2].geom.p).unwrap();
    assert!((back[2].geom.p - seed[2].geom.p).length() < 1e-2);
}

#[test]
fn walk_fails_off_the_mirror() {
    let scene = mirror_scene();
    let seed = seed_chain(&scene);
    // no point on the finite mirror reflects the light this far out
    let target = Point3f::new(40.0, 3.0, 0.0);
    assert!(walk_manifold(&scene, &seed, &target).is_none());
}
