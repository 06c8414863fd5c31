use super::path::*;
use super::strategy::*;
use super::subpath::*;
use crate::core::pbrt::*;
use log::*;

const NUM_STRATEGIES: usize = MltStrategy::ALL.len();
const MAX_INITIAL_PATH_ATTEMPTS: usize = 1 << 20;

/// Samples a path by bidirectional path tracing with a uniformly chosen vertex count in
/// `[2, max_path_vertices]` and a uniformly chosen technique.
///
/// Returns the path with its contribution divided by the sampling density, so that
/// averaging the luminance over many calls (failures counting as zero) estimates the
/// luminance integral over all path lengths.
pub fn sample_bidirectional_path(
    scene: &dyn Scene,
    rng: &mut dyn Random,
    max_path_vertices: i32,
) -> Option<(Path, Spectrum)> {
    let max_n = i32::max(2, max_path_vertices) as usize;
    let n = 2 + usize::min((rng.next() * (max_n - 1) as Float) as usize, max_n - 2);
    let s = usize::min((rng.next() * (n + 1) as Float) as usize, n);
    let t = n - s;

    let mut subpath_l = Subpath::default();
    if subpath_l.sample_subpath_from_endpoint(scene, rng, TransportDirection::LightToEye, s) != s {
        return None;
    }
    let mut subpath_e = Subpath::default();
    if subpath_e.sample_subpath_from_endpoint(scene, rng, TransportDirection::EyeToLight, t) != t {
        return None;
    }

    let mut path = Path::default();
    if !path.connect_subpaths(scene, &subpath_l, &subpath_e, s, t) {
        return None;
    }
    let c = path.evaluate_unweight_contribution(scene, s);
    if c.is_black() {
        return None;
    }
    let m = path.num_samplable_techniques(scene);
    if m == 0 {
        return None;
    }
    let w = ((max_n - 1) * (n + 1)) as Float / m as Float;
    return Some((path, c * w));
}

/// What a path contributes to the film.
#[derive(Debug, Copy, Clone)]
pub struct PathSample {
    pub raster: Option<Point2f>,
    pub f: Spectrum,
}

impl PathSample {
    pub fn new(scene: &dyn Scene, path: &Path) -> Self {
        PathSample {
            raster: path.raster_position(),
            f: path.evaluate_measurement(scene),
        }
    }

    /// Splats `f / y(f)` times `weight`.
    pub fn splat(&self, film: &Film, weight: Float) {
        if weight <= 0.0 {
            return;
        }
        if let Some(raster) = self.raster.as_ref() {
            let y = self.f.y();
            if y > 0.0 {
                film.add_splat(raster, &(self.f * (weight / y)));
            }
        }
    }
}

/// Per-strategy counters of one or more chains.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChainStats {
    pub selected: [u64; NUM_STRATEGIES],
    pub failed: [u64; NUM_STRATEGIES],
    pub accepted: [u64; NUM_STRATEGIES],
    /// Steps where no strategy could be applied to the current path.
    pub stalled: u64,
}

impl ChainStats {
    pub fn merge(&mut self, other: &ChainStats) {
        for i in 0..NUM_STRATEGIES {
            self.selected[i] += other.selected[i];
            self.failed[i] += other.failed[i];
            self.accepted[i] += other.accepted[i];
        }
        self.stalled += other.stalled;
    }

    pub fn total_steps(&self) -> u64 {
        return self.selected.iter().sum::<u64>() + self.stalled;
    }

    pub fn acceptance_rate(&self, strategy: MltStrategy) -> Float {
        let i = strategy.index();
        if self.selected[i] == 0 {
            return 0.0;
        }
        return self.accepted[i] as Float / self.selected[i] as Float;
    }

    pub fn report(&self) {
        for strategy in MltStrategy::ALL.iter() {
            let i = strategy.index();
            if self.selected[i] == 0 {
                continue;
            }
            info!(
                "{:>12}: {} selected, {} without proposal, {} accepted ({:.2}%)",
                strategy.name(),
                self.selected[i],
                self.failed[i],
                self.accepted[i],
                self.acceptance_rate(*strategy) * 100.0
            );
        }
        if self.stalled > 0 {
            warn!("{} steps found no applicable strategy", self.stalled);
        }
    }
}

/// Outcome of one Metropolis-Hastings step.
#[derive(Debug, Copy, Clone)]
pub struct StepResult {
    pub strategy: Option<MltStrategy>,
    pub acceptance: Float,
    pub accepted: bool,
    pub proposed: Option<PathSample>,
}

/// A single Markov chain over light transport paths.
pub struct MarkovChain {
    rng: RNG,
    current: Path,
    current_sample: PathSample,
    weights: [Float; NUM_STRATEGIES],
    options: MltOptions,
    stats: ChainStats,
}

impl MarkovChain {
    /// Starts a chain at the first path found by bidirectional sampling.
    pub fn new(scene: &dyn Scene, options: &MltOptions, seed: u64) -> Result<Self> {
        let mut rng = RNG::new_sequence(seed);
        for _ in 0..MAX_INITIAL_PATH_ATTEMPTS {
            if let Some((path, _)) = sample_bidirectional_path(scene, &mut rng, options.max_path_vertices) {
                let mut chain = Self::from_path(scene, path, options, seed);
                chain.rng = rng;
                return Ok(chain);
            }
        }
        return Err(MltError::Scene(
            "no light transport path could be sampled".to_string(),
        ));
    }

    pub fn from_path(scene: &dyn Scene, path: Path, options: &MltOptions, seed: u64) -> Self {
        let mut weights = [0.0; NUM_STRATEGIES];
        for strategy in MltStrategy::ALL.iter() {
            weights[strategy.index()] = options.strategy_weight(strategy.name());
        }
        let current_sample = PathSample::new(scene, &path);
        MarkovChain {
            rng: RNG::new_sequence(seed),
            current: path,
            current_sample,
            weights,
            options: options.clone(),
            stats: ChainStats::default(),
        }
    }

    pub fn current(&self) -> &Path {
        return &self.current;
    }

    pub fn current_sample(&self) -> &PathSample {
        return &self.current_sample;
    }

    pub fn stats(&self) -> &ChainStats {
        return &self.stats;
    }

    fn selection_weights(&self, path: &Path) -> [Float; NUM_STRATEGIES] {
        let mut w = [0.0; NUM_STRATEGIES];
        for strategy in MltStrategy::ALL.iter() {
            let i = strategy.index();
            if self.weights[i] > 0.0 && MutationStrategy::check_mutatable(*strategy, path) {
                w[i] = self.weights[i];
            }
        }
        return w;
    }

    pub fn step(&mut self, scene: &dyn Scene) -> StepResult {
        let weights_x = self.selection_weights(&self.current);
        let dist = Distribution1D::new(&weights_x);
        if dist.sum() == 0.0 {
            self.stats.stalled += 1;
            return StepResult {
                strategy: None,
                acceptance: 0.0,
                accepted: false,
                proposed: None,
            };
        }
        let (index, pdf_x, _) = dist.sample_discrete(self.rng.next());
        let strategy = match MltStrategy::from_index(index) {
            Some(s) => s,
            None => unreachable!("strategy index {} out of range", index),
        };
        self.stats.selected[index] += 1;

        let prop = match MutationStrategy::mutate(strategy, scene, &mut self.rng, &self.current, &self.options) {
            Some(prop) => prop,
            None => {
                self.stats.failed[index] += 1;
                return StepResult {
                    strategy: Some(strategy),
                    acceptance: 0.0,
                    accepted: false,
                    proposed: None,
                };
            }
        };

        // the reverse move must select the same strategy at y
        let weights_y = self.selection_weights(&prop.path);
        let sum_y: Float = weights_y.iter().sum();
        let pdf_y = if sum_y > 0.0 { weights_y[index] / sum_y } else { 0.0 };

        let q_xy = MutationStrategy::q(strategy, scene, &self.current, &prop.path, prop.kd, prop.dl, &self.options);
        let (kd, dl) = MutationStrategy::reverse_bookkeeping(strategy, &self.current, &prop.path, prop.kd, prop.dl);
        let q_yx = MutationStrategy::q(strategy, scene, &prop.path, &self.current, kd, dl, &self.options);
        if !q_xy.is_finite() || !q_yx.is_finite() {
            debug!("{}: non-finite density ({}, {}), proposal discarded", strategy.name(), q_xy, q_yx);
        }
        let acceptance = acceptance_ratio(pdf_x * q_xy, pdf_y * q_yx);

        let proposed = PathSample::new(scene, &prop.path);
        let accepted = self.rng.next() < acceptance;
        if accepted {
            self.current = prop.path;
            self.current_sample = proposed;
            self.stats.accepted[index] += 1;
        }
        return StepResult {
            strategy: Some(strategy),
            acceptance,
            accepted,
            proposed: Some(proposed),
        };
    }
}
