use super::manifold::*;
use super::path::*;
use super::perturb::*;
use super::subpath::*;
use crate::core::pbrt::*;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Mutation kinds the chain driver can choose from.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MltStrategy {
    Bidir,
    Lens,
    Caustic,
    Multichain,
    ManifoldLens,
    Identity,
}

impl MltStrategy {
    pub const ALL: [MltStrategy; 6] = [
        MltStrategy::Bidir,
        MltStrategy::Lens,
        MltStrategy::Caustic,
        MltStrategy::Multichain,
        MltStrategy::ManifoldLens,
        MltStrategy::Identity,
    ];

    pub fn from_index(i: usize) -> Option<Self> {
        return Self::ALL.get(i).copied();
    }

    pub fn index(&self) -> usize {
        match self {
            MltStrategy::Bidir => 0,
            MltStrategy::Lens => 1,
            MltStrategy::Caustic => 2,
            MltStrategy::Multichain => 3,
            MltStrategy::ManifoldLens => 4,
            MltStrategy::Identity => 5,
        }
    }

    /// Key used in option tables and reports.
    pub fn name(&self) -> &'static str {
        match self {
            MltStrategy::Bidir => "bidir",
            MltStrategy::Lens => "lens",
            MltStrategy::Caustic => "caustic",
            MltStrategy::Multichain => "multichain",
            MltStrategy::ManifoldLens => "manifoldlens",
            MltStrategy::Identity => "identity",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        return Self::ALL.iter().find(|s| s.name() == name).copied();
    }
}

/// A proposed path with the bookkeeping its transition density needs.
///
/// For `Bidir`, `kd` is the number of deleted vertices and `dl` the index of the first one.
/// Perturbations record the number of replaced vertices in `kd` and the number of kept
/// light-side vertices in `dl`; their densities do not read them.
#[derive(Clone)]
pub struct Prop {
    pub path: Path,
    pub kd: i32,
    pub dl: i32,
}

impl Prop {
    /// Bookkeeping of the identity mutation, which deletes nothing.
    pub const IDENTITY_KD: i32 = -1;
    pub const IDENTITY_DL: i32 = -1;

    pub fn new(path: Path, kd: i32, dl: i32) -> Self {
        Prop { path, kd, dl }
    }
}

/// Proposal and transition-density functions, dispatched per strategy.
pub struct MutationStrategy;

impl MutationStrategy {
    /// Proposes a new path from `curr`. `None` means the strategy could not produce a
    /// proposal, which the chain counts as a rejection.
    pub fn mutate(
        strategy: MltStrategy,
        scene: &dyn Scene,
        rng: &mut dyn Random,
        curr: &Path,
        options: &MltOptions,
    ) -> Option<Prop> {
        let kernel = options.kernel(strategy.name());
        match strategy {
            MltStrategy::Bidir => mutate_bidir(scene, rng, curr, options.max_path_vertices),
            MltStrategy::Lens => mutate_lens(scene, rng, curr, &kernel),
            MltStrategy::Caustic => mutate_caustic(scene, rng, curr, &kernel),
            MltStrategy::Multichain => mutate_multichain(scene, rng, curr, &kernel),
            MltStrategy::ManifoldLens => mutate_manifold_lens(scene, rng, curr, &kernel),
            MltStrategy::Identity => Some(Prop::new(
                curr.clone(),
                Prop::IDENTITY_KD,
                Prop::IDENTITY_DL,
            )),
        }
    }

    /// Transition density of `x -> y` divided by the measurement contribution of `y`.
    /// `kd` and `dl` are the bookkeeping of the proposal that produced `y`.
    pub fn q(
        strategy: MltStrategy,
        scene: &dyn Scene,
        x: &Path,
        y: &Path,
        kd: i32,
        dl: i32,
        options: &MltOptions,
    ) -> Float {
        let perturbation = !matches!(strategy, MltStrategy::Bidir | MltStrategy::Identity);
        if perturbation && !shares_path_class(strategy, x, y) {
            return 0.0;
        }
        match strategy {
            MltStrategy::Bidir => q_bidir(scene, x, y, kd, dl, options.max_path_vertices),
            MltStrategy::Lens => q_lens(scene, x, y),
            MltStrategy::Caustic => q_caustic(scene, x, y),
            MltStrategy::Multichain => q_multichain(scene, x, y),
            MltStrategy::ManifoldLens => q_manifold_lens(x, y),
            MltStrategy::Identity => 1.0,
        }
    }

    /// Whether `strategy` can be applied to `path` at all.
    pub fn check_mutatable(strategy: MltStrategy, path: &Path) -> bool {
        match strategy {
            MltStrategy::Lens => check_mutatable_lens(path),
            MltStrategy::Caustic => check_mutatable_caustic(path),
            MltStrategy::ManifoldLens => check_mutatable_manifold_lens(path),
            MltStrategy::Bidir | MltStrategy::Multichain | MltStrategy::Identity => path.len() >= 2,
        }
    }

    /// Bookkeeping of the reverse move `y -> x`.
    pub fn reverse_bookkeeping(strategy: MltStrategy, x: &Path, y: &Path, kd: i32, dl: i32) -> (i32, i32) {
        match strategy {
            MltStrategy::Bidir => (y.len() as i32 - x.len() as i32 + kd, dl),
            _ => (kd, dl),
        }
    }
}

/// `min(1, q_yx / q_xy)`; zero as soon as either density vanishes or is not finite.
pub fn acceptance_ratio(q_xy: Float, q_yx: Float) -> Float {
    if !(q_xy > 0.0 && q_xy.is_finite()) || !(q_yx > 0.0 && q_yx.is_finite()) {
        return 0.0;
    }
    return Float::min(1.0, q_yx / q_xy);
}

/// Acceptance ratio when the chain targets `pi` instead of `f`. `w_x` and `w_y` are
/// `pi(x) / f(x)` and `pi(y) / f(y)`.
pub fn acceptance_ratio_for_target(q_xy: Float, q_yx: Float, w_x: Float, w_y: Float) -> Float {
    if !(w_x > 0.0) || !(w_y >= 0.0) {
        return 0.0;
    }
    return acceptance_ratio(q_xy * w_x, q_yx * w_y);
}

fn inverse_scalar_contribution(c: &Spectrum) -> Float {
    if c.is_black() {
        return 0.0;
    }
    return 1.0 / c.y();
}

fn specular(v: &PathVertex) -> bool {
    return is_specular(v.primitive_type());
}

fn same_specular_pattern(x: &Path, y: &Path) -> bool {
    return x.len() == y.len()
        && x.vertices.iter().zip(y.vertices.iter()).all(|(a, b)| specular(a) == specular(b));
}

/// Perturbations move within a path class: both ends must be mutatable by `strategy`
/// and agree on which vertices are specular.
fn shares_path_class(strategy: MltStrategy, x: &Path, y: &Path) -> bool {
    return MutationStrategy::check_mutatable(strategy, x)
        && MutationStrategy::check_mutatable(strategy, y)
        && same_specular_pattern(x, y);
}

// ---------------------------------------------------------------------------------------
// Bidirectional mutation
// ---------------------------------------------------------------------------------------

/// Weights of deleting `kd` vertices starting at index `l`. A placement whose surviving
/// neighbour would have to be reconnected through a specular vertex is excluded.
fn deletion_placement_weights(x: &Path, kd: i32) -> Vec<Float> {
    let n = x.len() as i32;
    if kd < 1 || kd > n {
        return Vec::new();
    }
    let mut weights = Vec::with_capacity((n - kd + 1) as usize);
    for l in 0..=(n - kd) {
        let m = l + kd - 1;
        let mut w = 1.0;
        if l > 0 && specular(&x.vertices[(l - 1) as usize]) {
            w = 0.0;
        }
        if m < n - 1 && specular(&x.vertices[(m + 1) as usize]) {
            w = 0.0;
        }
        weights.push(w);
    }
    return weights;
}

fn mutate_bidir(scene: &dyn Scene, rng: &mut dyn Random, curr: &Path, max_path_vertices: i32) -> Option<Prop> {
    let curr_n = curr.len() as i32;
    if curr_n < 2 {
        return None;
    }

    let prop_n = TwoTailedGeometricDist::new(2.0, curr_n, 2, max_path_vertices).sample(rng.next());
    let kd = TwoTailedGeometricDist::new(2.0, 1, i32::max(1, curr_n - prop_n), curr_n).sample(rng.next());
    let ka = prop_n - curr_n + kd;
    if ka < 0 {
        return None;
    }

    let weights = deletion_placement_weights(curr, kd);
    if weights.is_empty() {
        return None;
    }
    let dist = Distribution1D::new(&weights);
    if dist.sum() == 0.0 {
        return None;
    }
    let (dl, _, _) = dist.sample_discrete(rng.next());
    let dl = dl as i32;
    let dm = dl + kd - 1;

    let al = clamp((rng.next() * (ka + 1) as Float) as i32, 0, ka);
    let am = ka - al;

    let mut subpath_l = Subpath::new(curr.vertices[..dl as usize].to_vec());
    if subpath_l.sample_subpath_from_endpoint(scene, rng, TransportDirection::LightToEye, al as usize)
        != al as usize
    {
        return None;
    }

    let mut subpath_e = Subpath::new(
        curr.vertices[((dm + 1) as usize)..]
            .iter()
            .rev()
            .cloned()
            .collect(),
    );
    if subpath_e.sample_subpath_from_endpoint(scene, rng, TransportDirection::EyeToLight, am as usize)
        != am as usize
    {
        return None;
    }

    let s = subpath_l.vertices.len();
    let t = subpath_e.vertices.len();
    let mut path = Path::default();
    if !path.connect_subpaths(scene, &subpath_l, &subpath_e, s, t) {
        return None;
    }
    if path.evaluate_f(s).is_black() {
        return None;
    }
    return Some(Prop::new(path, kd, dl));
}

fn q_bidir(scene: &dyn Scene, x: &Path, y: &Path, kd: i32, dl: i32, max_path_vertices: i32) -> Float {
    let xn = x.len() as i32;
    let yn = y.len() as i32;

    let p_a1 = TwoTailedGeometricDist::new(2.0, xn, 2, max_path_vertices).pdf(yn);
    let p_d1 = TwoTailedGeometricDist::new(2.0, 1, i32::max(1, xn - yn), xn).pdf(kd);
    if p_a1 == 0.0 || p_d1 == 0.0 {
        return 0.0;
    }

    let weights = deletion_placement_weights(x, kd);
    if weights.is_empty() || dl < 0 {
        return 0.0;
    }
    let dist = Distribution1D::new(&weights);
    if dist.sum() == 0.0 {
        return 0.0;
    }
    let p_d2 = dist.discrete_pdf(dl as usize);

    let ka = yn - xn + kd;
    if ka < 0 {
        return 0.0;
    }
    let p_a2 = 1.0 / (ka + 1) as Float;

    let mut sum = 0.0;
    for i in 0..=ka {
        let c = y.evaluate_unweight_contribution(scene, (dl + i) as usize);
        sum += inverse_scalar_contribution(&c);
    }
    return p_d1 * p_d2 * p_a1 * p_a2 * sum;
}

// ---------------------------------------------------------------------------------------
// Perturbations
// ---------------------------------------------------------------------------------------

fn check_mutatable_lens(path: &Path) -> bool {
    let n = path.len() as isize;
    if n < 2 {
        return false;
    }
    let mut il = n - 2;
    while il >= 0 && specular(&path.vertices[il as usize]) {
        il -= 1;
    }
    if il > 0 && specular(&path.vertices[(il - 1) as usize]) {
        return false;
    }
    return true;
}

fn check_mutatable_caustic(path: &Path) -> bool {
    let n = path.len();
    if n <= 2 || specular(&path.vertices[n - 2]) {
        return false;
    }
    return true;
}

/// Matches `L S+ [DG] S* E` against the path type.
fn check_mutatable_manifold_lens(path: &Path) -> bool {
    let ty: Vec<char> = path.path_type().chars().collect();
    let n = ty.len();
    if n < 4 || ty[0] != 'L' || ty[n - 1] != 'E' {
        return false;
    }
    let mut i = 1;
    while i < n && ty[i] == 'S' {
        i += 1;
    }
    if i == 1 || i >= n || (ty[i] != 'D' && ty[i] != 'G') {
        return false;
    }
    i += 1;
    while i < n && ty[i] == 'S' {
        i += 1;
    }
    return i == n - 1;
}

/// Replays the eye subpath of `curr` with its non-specular direction samples perturbed.
///
/// The replacement keeps the specular structure of `curr`: it ends at the first
/// non-specular hit, or with `through_chains` at the first non-specular hit that is not
/// followed by a specular vertex in `curr`.
fn trace_perturbed_eye_subpath(
    scene: &dyn Scene,
    rng: &mut dyn Random,
    curr: &Path,
    kernel: &PerturbationKernel,
    through_chains: bool,
) -> Option<Subpath> {
    let n = curr.len();
    if n < 2 {
        return None;
    }
    let failed = Cell::new(false);
    let init_v = curr.vertices[n - 1].clone();
    let mut subpath_e = Subpath::new(vec![init_v.clone()]);
    {
        let vertices = &mut subpath_e.vertices;
        let mut perturbed = Point2f::zero();
        trace_subpath_from_endpoint_with_sampler(
            scene,
            Some(&init_v),
            None,
            1,
            n,
            TransportDirection::EyeToLight,
            |num_vertices, primitive, usage, index| {
                if let Some(p) = primitive {
                    if usage == SampleUsage::Direction && !is_specular(p.get_type()) {
                        if index == 0 {
                            match perturb_direction_sample(
                                curr,
                                rng,
                                p,
                                num_vertices - 2,
                                TransportDirection::EyeToLight,
                                kernel.s1,
                                kernel.s2,
                            ) {
                                Some(u) => perturbed = u,
                                None => failed.set(true),
                            }
                        }
                        return perturbed[index];
                    }
                }
                return rng.next();
            },
            |num_vertices, _, v, _| {
                vertices.push(v.clone());
                let prop_s = specular(v);
                let curr_s = specular(&curr.vertices[n - num_vertices]);
                if prop_s != curr_s {
                    failed.set(true);
                    return false;
                }
                if prop_s {
                    return true;
                }
                if through_chains {
                    if n - num_vertices == 0 {
                        return false;
                    }
                    return specular(&curr.vertices[n - num_vertices - 1]);
                }
                return false;
            },
        );
    }
    if failed.get() {
        return None;
    }
    let last = subpath_e.vertices.last()?;
    if last.geom.infinite {
        return None;
    }
    let last_ty = last.primitive_type();
    if (last_ty & INTERACTION_E) != 0 || is_specular(last_ty) {
        return None;
    }
    return Some(subpath_e);
}

/// Joins the perturbed eye subpath with the unchanged light-side prefix of `curr`.
fn join_with_light_prefix(scene: &dyn Scene, curr: &Path, subpath_e: &Subpath) -> Option<Prop> {
    let n = curr.len();
    let ne = subpath_e.vertices.len();
    if ne > n {
        return None;
    }
    let nl = n - ne;
    let subpath_l = Subpath::new(curr.vertices[..nl].to_vec());
    let mut path = Path::default();
    if !path.connect_subpaths(scene, &subpath_l, subpath_e, nl, ne) {
        return None;
    }
    if path.evaluate_f(nl).is_black() {
        return None;
    }
    return Some(Prop::new(path, ne as i32, nl as i32));
}

fn mutate_lens(scene: &dyn Scene, rng: &mut dyn Random, curr: &Path, kernel: &PerturbationKernel) -> Option<Prop> {
    if !check_mutatable_lens(curr) {
        return None;
    }
    let subpath_e = trace_perturbed_eye_subpath(scene, rng, curr, kernel, false)?;
    return join_with_light_prefix(scene, curr, &subpath_e);
}

fn mutate_multichain(
    scene: &dyn Scene,
    rng: &mut dyn Random,
    curr: &Path,
    kernel: &PerturbationKernel,
) -> Option<Prop> {
    let subpath_e = trace_perturbed_eye_subpath(scene, rng, curr, kernel, true)?;
    return join_with_light_prefix(scene, curr, &subpath_e);
}

fn mutate_caustic(scene: &dyn Scene, rng: &mut dyn Random, curr: &Path, kernel: &PerturbationKernel) -> Option<Prop> {
    if !check_mutatable_caustic(curr) {
        return None;
    }
    let n = curr.len();
    let mut il = n as isize - 3;
    while il >= 0 && specular(&curr.vertices[il as usize]) {
        il -= 1;
    }
    if il < 0 {
        return None;
    }
    let il = il as usize;

    let failed = Cell::new(false);
    let mut subpath_l = Subpath::new(curr.vertices[..=il].to_vec());
    {
        let init_v = curr.vertices[il].clone();
        let init_pv = if il > 0 {
            Some(curr.vertices[il - 1].clone())
        } else {
            None
        };
        let vertices = &mut subpath_l.vertices;
        let mut perturbed = Point2f::zero();
        trace_subpath_from_endpoint_with_sampler(
            scene,
            Some(&init_v),
            init_pv.as_ref(),
            il + 1,
            n,
            TransportDirection::LightToEye,
            |num_vertices, primitive, usage, index| {
                if let Some(p) = primitive {
                    if usage == SampleUsage::Direction && !is_specular(p.get_type()) {
                        if index == 0 {
                            match perturb_direction_sample(
                                curr,
                                rng,
                                p,
                                num_vertices - 2,
                                TransportDirection::LightToEye,
                                kernel.s1,
                                kernel.s2,
                            ) {
                                Some(u) => perturbed = u,
                                None => failed.set(true),
                            }
                        }
                        return perturbed[index];
                    }
                }
                return rng.next();
            },
            |num_vertices, _, v, _| {
                vertices.push(v.clone());
                let prop_s = specular(v);
                let curr_s = specular(&curr.vertices[num_vertices - 1]);
                if prop_s != curr_s {
                    failed.set(true);
                    return false;
                }
                return prop_s;
            },
        );
    }
    if failed.get() {
        return None;
    }
    if subpath_l.vertices.len() + 1 != n {
        return None;
    }
    let last = subpath_l.vertices.last()?;
    if last.geom.infinite || specular(last) {
        return None;
    }

    let nl = subpath_l.vertices.len();
    let subpath_e = Subpath::new(vec![curr.vertices[n - 1].clone()]);
    let mut path = Path::default();
    if !path.connect_subpaths(scene, &subpath_l, &subpath_e, nl, 1) {
        return None;
    }
    if path.evaluate_f(nl).is_black() {
        return None;
    }
    return Some(Prop::new(path, (n - il - 2) as i32, (il + 1) as i32));
}

fn mutate_manifold_lens(
    scene: &dyn Scene,
    rng: &mut dyn Random,
    curr: &Path,
    kernel: &PerturbationKernel,
) -> Option<Prop> {
    if !check_mutatable_manifold_lens(curr) {
        return None;
    }
    let subpath_e = trace_perturbed_eye_subpath(scene, rng, curr, kernel, false)?;
    let n = curr.len();
    let ne = subpath_e.vertices.len();
    if ne >= n {
        return None;
    }
    let nl = n - ne;

    // the specular chain from the light is moved so that it ends at the new diffuse vertex
    let seed = &curr.vertices[..=nl];
    let target = subpath_e.vertices.last()?.geom.p;
    let connected = walk_manifold(scene, seed, &target)?;
    // the chain must also walk back, otherwise the reverse move would not exist
    let back = seed.last()?.geom.p;
    walk_manifold(scene, &connected, &back)?;

    let mut vertices = Vec::with_capacity(n);
    vertices.extend(connected[..nl].iter().cloned());
    vertices.extend(subpath_e.vertices.iter().rev().cloned());
    let path = Path::new(vertices);
    if path.len() != n || path.evaluate_measurement(scene).is_black() {
        return None;
    }
    return Some(Prop::new(path, ne as i32, nl as i32));
}

/// Index of the last non-specular, non-sensor vertex seen from the eye end.
fn last_diffuse_from_eye(y: &Path) -> Option<usize> {
    return (0..y.len()).rev().find(|i| {
        let t = y.vertices[*i].primitive_type();
        (t & INTERACTION_E) == 0 && !is_specular(t)
    });
}

fn q_lens(scene: &dyn Scene, x: &Path, y: &Path) -> Float {
    let n = y.len();
    if x.len() != n {
        return 0.0;
    }
    let s = match last_diffuse_from_eye(y) {
        Some(s) => s,
        None => return 0.0,
    };
    let cst = y.evaluate_cst(s);
    if cst.is_black() {
        return 0.0;
    }
    let alpha = y.evaluate_alpha(scene, n - s, TransportDirection::EyeToLight);
    return inverse_scalar_contribution(&(alpha * cst));
}

fn q_caustic(scene: &dyn Scene, x: &Path, y: &Path) -> Float {
    let n = y.len();
    if x.len() != n || n < 2 {
        return 0.0;
    }
    let cst = y.evaluate_cst(n - 1);
    if cst.is_black() {
        return 0.0;
    }
    let alpha = y.evaluate_alpha(scene, n - 1, TransportDirection::LightToEye);
    return inverse_scalar_contribution(&(alpha * cst));
}

fn q_multichain(scene: &dyn Scene, x: &Path, y: &Path) -> Float {
    let n = y.len();
    if x.len() != n || n < 2 {
        return 0.0;
    }
    let mut il = n as isize - 2;
    while il - 1 >= 0 && (specular(&x.vertices[il as usize]) || specular(&x.vertices[(il - 1) as usize])) {
        il -= 1;
    }
    let s = il as usize;
    let cst = y.evaluate_cst(s);
    if cst.is_black() {
        return 0.0;
    }
    let alpha = y.evaluate_alpha(scene, n - s, TransportDirection::EyeToLight);
    return inverse_scalar_contribution(&(alpha * cst));
}

fn q_manifold_lens(x: &Path, y: &Path) -> Float {
    let n = y.len();
    if x.len() != n || n < 3 {
        return 0.0;
    }
    let t = y
        .vertices
        .iter()
        .rev()
        .take_while(|v| {
            let ty = v.primitive_type();
            (ty & INTERACTION_E) != 0 || is_specular(ty)
        })
        .count();
    if t + 1 >= n {
        return 0.0;
    }
    let s = n - t - 1;

    let prod_fs = y.evaluate_specular_reflectances(1, s, TransportDirection::LightToEye)
        * y.evaluate_specular_reflectances(1, t, TransportDirection::EyeToLight);
    if prod_fs.is_black() {
        return 0.0;
    }

    let v_e = &y.vertices[n - 1];
    let p_ed = v_e.evaluate_direction_pdf(&Vector3f::zero(), &v_e.direction_to(Some(&y.vertices[n - 2])), true);
    if p_ed == 0.0 {
        return 0.0;
    }

    let multi_g = compute_constraint_jacobian_determinant(&y.vertices[..=s])
        * geometry_term(&y.vertices[0].geom, &y.vertices[1].geom);
    return inverse_scalar_contribution(&(prod_fs * multi_g / p_ed));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        for (i, s) in MltStrategy::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
            assert_eq!(MltStrategy::from_index(i), Some(*s));
            assert_eq!(MltStrategy::from_name(s.name()), Some(*s));
        }
        assert_eq!(MltStrategy::from_index(6), None);
        let s: MltStrategy = serde_json::from_str("\"manifoldlens\"").unwrap();
        assert_eq!(s, MltStrategy::ManifoldLens);
    }

    #[test]
    fn test_002() {
        assert_eq!(acceptance_ratio(1.0, 2.0), 1.0);
        assert_eq!(acceptance_ratio(2.0, 1.0), 0.5);
        assert_eq!(acceptance_ratio(0.0, 1.0), 0.0);
        assert_eq!(acceptance_ratio(1.0, 0.0), 0.0);
        assert_eq!(acceptance_ratio(Float::NAN, 1.0), 0.0);
        assert_eq!(acceptance_ratio(1.0, Float::NAN), 0.0);
        assert_eq!(acceptance_ratio(Float::INFINITY, Float::INFINITY), 0.0);
        assert_eq!(acceptance_ratio(1.0, Float::INFINITY), 0.0);
        assert_eq!(acceptance_ratio_for_target(1.0, 1.0, 2.0, 1.0), 0.5);
    }
}
