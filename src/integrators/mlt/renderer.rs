use super::chain::*;
use super::path::*;
use crate::core::pbrt::*;
use log::*;
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;
use std::sync::Arc;
use std::sync::RwLock;

const PROGRESS_FREQUENCY: usize = 1024;

/// Normalization estimated from independent bidirectional samples.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    /// Luminance estimate of sample `i`, zero where sampling failed.
    pub weights: Vec<Float>,
    /// Mean luminance of the image, `b`.
    pub b: Float,
    distribution: Distribution1D,
}

impl Bootstrap {
    fn seed(base: u64, i: usize) -> u64 {
        return base.wrapping_add(i as u64);
    }

    /// Picks a bootstrap sample proportionally to its weight and regenerates its path.
    pub fn select_initial_path(&self, scene: &dyn Scene, options: &MltOptions, u: Float) -> Option<Path> {
        if self.distribution.sum() == 0.0 {
            return None;
        }
        let (index, _, _) = self.distribution.sample_discrete(u);
        let mut rng = RNG::new_sequence(Self::seed(options.seed, index));
        let (path, _) = sample_bidirectional_path(scene, &mut rng, options.max_path_vertices)?;
        return Some(path);
    }
}

pub struct RenderResult {
    pub film: Arc<Film>,
    /// Factor turning the accumulated splats into pixel values.
    pub scale: Float,
    pub b: Float,
    pub stats: ChainStats,
}

impl RenderResult {
    pub fn write_image(&self, path: &std::path::Path) -> Result<()> {
        return self.film.write_image(path, self.scale);
    }
}

/// Runs `num_chains` Markov chains in parallel and splats them onto the sensor's film.
pub struct MltRenderer {
    options: MltOptions,
    quiet: bool,
}

impl MltRenderer {
    pub fn new(options: &MltOptions) -> Self {
        MltRenderer {
            options: options.clone(),
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        return self;
    }

    fn reporter(&self, total: usize, title: &str) -> Arc<RwLock<ProgressReporter>> {
        let reporter = if self.quiet {
            ProgressReporter::hidden(total)
        } else {
            ProgressReporter::new(total, title)
        };
        return Arc::new(RwLock::new(reporter));
    }

    pub fn bootstrap(&self, scene: &dyn Scene) -> Bootstrap {
        let n = usize::max(1, self.options.num_bootstrap);
        let max_path_vertices = self.options.max_path_vertices;
        let seed = self.options.seed;
        let reporter = self.reporter(n, "Generating bootstrap paths");
        let weights: Vec<Float> = (0..n)
            .into_par_iter()
            .map(|i| {
                let mut rng = RNG::new_sequence(Bootstrap::seed(seed, i));
                let w = match sample_bidirectional_path(scene, &mut rng, max_path_vertices) {
                    Some((_, c)) if c.is_valid() => Float::max(0.0, c.y()),
                    _ => 0.0,
                };
                if i % PROGRESS_FREQUENCY == 0 {
                    if let Ok(mut reporter) = reporter.write() {
                        reporter.update(PROGRESS_FREQUENCY.min(n - i));
                    }
                }
                return w;
            })
            .collect();
        if let Ok(mut reporter) = reporter.write() {
            reporter.done();
        }
        let distribution = Distribution1D::new(&weights);
        let b = distribution.sum() / n as Float;
        return Bootstrap {
            weights,
            b,
            distribution,
        };
    }

    pub fn render(&self, scene: &dyn Scene) -> Result<RenderResult> {
        let sensor = scene
            .sensor()
            .ok_or_else(|| MltError::MissingAsset("sensor".to_string()))?;
        let film = sensor
            .sensor
            .as_ref()
            .ok_or_else(|| MltError::MissingAsset("sensor".to_string()))?
            .get_film();
        film.clear();

        let bootstrap = self.bootstrap(scene);
        info!("Normalization b = {}", bootstrap.b);
        if bootstrap.b == 0.0 {
            warn!("No bootstrap path carries light; the image stays black");
            return Ok(RenderResult {
                film,
                scale: 0.0,
                b: 0.0,
                stats: ChainStats::default(),
            });
        }

        let num_chains = usize::max(1, self.options.num_chains);
        let num_mutations = self.options.num_mutations;
        let chain_mutations: Vec<usize> = (0..num_chains)
            .map(|i| (i + 1) * num_mutations / num_chains - i * num_mutations / num_chains)
            .collect();
        let total: usize = chain_mutations.iter().sum();

        let reporter = self.reporter(total, "Rendering");
        let options = &self.options;
        let bootstrap = &bootstrap;
        let film_ref = film.as_ref();
        let stats: Vec<ChainStats> = (0..num_chains)
            .into_par_iter()
            .map(|i| -> Result<ChainStats> {
                let chain_seed = options
                    .seed
                    .wrapping_add(options.num_bootstrap as u64)
                    .wrapping_add(i as u64);
                let mut rng = RNG::new_sequence(chain_seed);
                let path = bootstrap
                    .select_initial_path(scene, options, rng.next())
                    .ok_or_else(|| MltError::Scene("bootstrap path could not be regenerated".to_string()))?;
                let mut chain = MarkovChain::from_path(scene, path, options, chain_seed);
                debug!("Chain {} starts at {}", i, chain.current().path_type());

                for k in 0..chain_mutations[i] {
                    let current = *chain.current_sample();
                    let r = chain.step(scene);
                    // expected values of both candidates
                    current.splat(film_ref, 1.0 - r.acceptance);
                    if let Some(proposed) = r.proposed.as_ref() {
                        proposed.splat(film_ref, r.acceptance);
                    }
                    if (k + 1) % PROGRESS_FREQUENCY == 0 {
                        if let Ok(mut reporter) = reporter.write() {
                            reporter.update(PROGRESS_FREQUENCY);
                        }
                    }
                }
                return Ok(chain.stats().clone());
            })
            .collect::<Result<Vec<_>>>()?;
        if let Ok(mut reporter) = reporter.write() {
            reporter.done();
        }

        let mut merged = ChainStats::default();
        for s in stats.iter() {
            merged.merge(s);
        }
        merged.report();

        let num_pixels = (film.width * film.height) as Float;
        let scale = if total > 0 {
            bootstrap.b * num_pixels / total as Float
        } else {
            0.0
        };
        return Ok(RenderResult {
            film,
            scale,
            b: bootstrap.b,
            stats: merged,
        });
    }
}
