use approx::assert_relative_eq;
use mlt_mutation::core::pbrt::*;
use mlt_mutation::materials::*;

fn geometry_with_normal(n: &Normal3f) -> SurfaceGeometry {
    let mut geom = SurfaceGeometry {
        sn: *n,
        gn: *n,
        ..Default::default()
    };
    geom.compute_tangent_space();
    return geom;
}

fn random_upper_direction(rng: &mut RNG) -> Vector3f {
    let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
    return cosine_sample_hemisphere(&u);
}

#[test]
fn diffuse_reciprocity() {
    let bsdf = Diffuse::new(&Spectrum::from_rgb(&[0.2, 0.5, 0.8]));
    let geom = geometry_with_normal(&Normal3f::new(0.0, 0.0, 1.0));
    let mut rng = RNG::new_sequence(21);
    for _ in 0..100 {
        let wi = random_upper_direction(&mut rng);
        let wo = random_upper_direction(&mut rng);
        if wi.z < 1e-3 || wo.z < 1e-3 {
            continue;
        }
        for dir in [TransportDirection::LightToEye, TransportDirection::EyeToLight] {
            let f_io = bsdf.evaluate_direction(&geom, INTERACTION_BSDF, &wi, &wo, dir, false);
            let f_oi = bsdf.evaluate_direction(&geom, INTERACTION_BSDF, &wo, &wi, dir, false);
            for i in 0..3 {
                assert_relative_eq!(f_io.to_rgb()[i], f_oi.to_rgb()[i], epsilon = 1e-5);
            }
        }
    }
}

#[test]
fn diffuse_pdf_is_cosine_in_projected_solid_angle() {
    let bsdf = Diffuse::new(&Spectrum::one());
    let geom = geometry_with_normal(&Normal3f::new(0.0, 1.0, 0.0));
    let wi = Vector3f::new(0.0, 1.0, 0.0);
    let wo = Vector3f::new(0.6, 0.8, 0.0);
    let pdf = bsdf.evaluate_direction_pdf(&geom, INTERACTION_BSDF, &wi, &wo, false);
    assert_relative_eq!(pdf, INV_PI, epsilon = 1e-6);
}

#[test]
fn specular_lobes_are_hidden_without_eval_delta() {
    let geom = geometry_with_normal(&Normal3f::new(0.0, 0.0, 1.0));
    let wi = Vector3f::new(0.3, -0.2, 1.0).normalize();
    let u = Point2f::new(0.5, 0.5);
    let bsdfs: Vec<Box<dyn GeneralizedBsdf>> = vec![
        Box::new(Mirror::new(&Spectrum::new(0.9))),
        Box::new(RefractAll::new(&Spectrum::one(), 1.0, 1.5)),
    ];
    for bsdf in bsdfs.iter() {
        assert!(bsdf.is_delta_direction(INTERACTION_S));
        let wo = bsdf
            .sample_direction(&u, 0.5, INTERACTION_BSDF, &geom, &wi)
            .unwrap();
        for dir in [TransportDirection::LightToEye, TransportDirection::EyeToLight] {
            assert_eq!(bsdf.evaluate_direction_pdf(&geom, INTERACTION_BSDF, &wi, &wo, false), 0.0);
            assert!(bsdf
                .evaluate_direction(&geom, INTERACTION_BSDF, &wi, &wo, dir, false)
                .is_black());
            assert_eq!(bsdf.evaluate_direction_pdf(&geom, INTERACTION_BSDF, &wi, &wo, true), 1.0);
            assert!(bsdf.evaluate_direction(&geom, INTERACTION_BSDF, &wi, &wo, dir, true).y() > 0.0);
        }
    }
}

#[test]
fn mirror_reflects_about_the_normal() {
    let bsdf = Mirror::new(&Spectrum::one());
    let geom = geometry_with_normal(&Normal3f::new(0.0, 1.0, 0.0));
    let wi = Vector3f::new(0.6, 0.8, 0.0);
    let wo = bsdf
        .sample_direction(&Point2f::zero(), 0.0, INTERACTION_BSDF, &geom, &wi)
        .unwrap();
    assert_relative_eq!(wo.x, -0.6, epsilon = 1e-5);
    assert_relative_eq!(wo.y, 0.8, epsilon = 1e-5);
}

#[test]
fn refraction_scales_importance_by_eta_squared() {
    let bsdf = RefractAll::new(&Spectrum::one(), 1.0, 1.5);
    let geom = geometry_with_normal(&Normal3f::new(0.0, 0.0, 1.0));
    let wi = Vector3f::new(0.0, 0.0, 1.0);
    let wo = bsdf
        .sample_direction(&Point2f::zero(), 0.0, INTERACTION_BSDF, &geom, &wi)
        .unwrap();
    let f_le = bsdf.evaluate_direction(&geom, INTERACTION_BSDF, &wi, &wo, TransportDirection::LightToEye, true);
    let f_el = bsdf.evaluate_direction(&geom, INTERACTION_BSDF, &wi, &wo, TransportDirection::EyeToLight, true);
    let eta = 1.0 / 1.5;
    assert_relative_eq!(f_el.y(), f_le.y() * eta * eta, epsilon = 1e-4);
}

#[test]
fn zero_length_direction_never_panics() {
    let bsdf = Diffuse::new(&Spectrum::one());
    let geom = geometry_with_normal(&Normal3f::new(0.0, 0.0, 1.0));
    let zero = Vector3f::zero();
    let wo = Vector3f::new(0.0, 0.0, 1.0);
    let f = bsdf.evaluate_direction(&geom, INTERACTION_BSDF, &zero, &wo, TransportDirection::LightToEye, false);
    assert!(f.is_black() || !f.is_valid());
    let pdf = bsdf.evaluate_direction_pdf(&geom, INTERACTION_BSDF, &zero, &wo, false);
    assert!(pdf == 0.0 || !pdf.is_finite());
    assert!(bsdf
        .sample_direction(&Point2f::new(0.5, 0.5), 0.0, INTERACTION_BSDF, &geom, &zero)
        .is_none());
}
