use crate::core::pbrt::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_KERNEL_S1: Float = 1.0 / 256.0;
pub const DEFAULT_KERNEL_S2: Float = 1.0 / 16.0;

/// Size range of the exponential perturbation kernel.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerturbationKernel {
    pub s1: Float,
    pub s2: Float,
}

impl Default for PerturbationKernel {
    fn default() -> Self {
        PerturbationKernel {
            s1: DEFAULT_KERNEL_S1,
            s2: DEFAULT_KERNEL_S2,
        }
    }
}

/// Settings of the Markov chains, keyed by strategy name where per-strategy values exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MltOptions {
    pub max_path_vertices: i32,
    pub num_mutations: usize,
    pub num_chains: usize,
    /// Independent bidirectional samples used to estimate the image normalization.
    pub num_bootstrap: usize,
    pub seed: u64,
    pub strategy_weights: BTreeMap<String, Float>,
    pub perturbation_kernel: BTreeMap<String, PerturbationKernel>,
}

fn default_weights() -> BTreeMap<String, Float> {
    let mut m = BTreeMap::new();
    for name in ["bidir", "lens", "caustic", "multichain", "manifoldlens"] {
        m.insert(name.to_string(), 1.0);
    }
    m.insert("identity".to_string(), 0.0);
    return m;
}

impl Default for MltOptions {
    fn default() -> Self {
        MltOptions {
            max_path_vertices: 10,
            num_mutations: 10000,
            num_chains: 4,
            num_bootstrap: 100000,
            seed: 0,
            strategy_weights: default_weights(),
            perturbation_kernel: BTreeMap::new(),
        }
    }
}

impl MltOptions {
    pub fn new() -> Self {
        MltOptions::default()
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let opts: MltOptions = serde_json::from_str(s)?;
        opts.validate()?;
        return Ok(opts);
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        return Self::from_json(&s);
    }

    pub fn to_json(&self) -> Result<String> {
        return Ok(serde_json::to_string_pretty(self)?);
    }

    fn validate(&self) -> Result<()> {
        if self.max_path_vertices < 2 {
            return Err(MltError::invalid_property(
                "options",
                "max_path_vertices must be at least 2",
            ));
        }
        if self.num_chains == 0 {
            return Err(MltError::invalid_property("options", "num_chains must be positive"));
        }
        for (name, kernel) in self.perturbation_kernel.iter() {
            if !(kernel.s1 > 0.0 && kernel.s2 >= kernel.s1) {
                return Err(MltError::invalid_property(
                    "options",
                    &format!("kernel of '{}' needs 0 < s1 <= s2", name),
                ));
            }
        }
        return Ok(());
    }

    /// Selection weight of a strategy; strategies missing from the table keep their default.
    pub fn strategy_weight(&self, name: &str) -> Float {
        if let Some(w) = self.strategy_weights.get(name) {
            return Float::max(0.0, *w);
        }
        return default_weights().get(name).copied().unwrap_or(0.0);
    }

    pub fn kernel(&self, name: &str) -> PerturbationKernel {
        return self
            .perturbation_kernel
            .get(name)
            .copied()
            .unwrap_or_default();
    }

    pub fn set_strategy_weight(&mut self, name: &str, w: Float) {
        self.strategy_weights.insert(name.to_string(), w);
    }
}
