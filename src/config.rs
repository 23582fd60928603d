//! Configuration for the competitive-learning quantizer.

use crate::error::{QuantizerError, Result};
use crate::sampler::Region;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for a training run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quantizer and training schedule configuration.
    pub quantizer: QuantizerConfig,

    /// Input sampler configuration.
    pub sampler: SamplerConfig,

    /// Snapshot rendering configuration.
    pub render: RenderConfig,
}

impl Config {
    /// Loads configuration from a JSON file.
    ///
    /// Fields missing from the file keep their default values.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(QuantizerError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Checks every precondition of a training run.
    pub fn validate(&self) -> Result<()> {
        self.quantizer.validate()?;
        self.sampler.validate()?;
        self.render.validate()
    }
}

/// Quantizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizerConfig {
    /// Number of neurons (M).
    /// Default: 10.
    pub neurons: usize,

    /// Dimensionality of the weight vectors (D).
    /// Default: 2.
    pub dimension: usize,

    /// Number of training iterations (N).
    /// Default: 15,000.
    pub iterations: usize,

    /// Initial learning rate.
    /// Default: 0.1.
    pub initial_learning_rate: f64,

    /// Lower bound (inclusive) for initial weight components.
    /// Default: 0.0.
    pub init_low: f64,

    /// Upper bound (exclusive) for initial weight components.
    /// Default: 600.0.
    pub init_high: f64,

    /// Random seed for reproducibility.
    /// Default: None (random).
    pub seed: Option<u64>,

    /// Number of steps between progress reports. 0 disables them.
    /// Default: 1,000.
    pub progress_interval: usize,
}

impl Default for QuantizerConfig {
    fn default() -> Self {
        Self {
            neurons: crate::DEFAULT_NEURONS,
            dimension: 2,
            iterations: crate::DEFAULT_ITERATIONS,
            initial_learning_rate: crate::DEFAULT_LEARNING_RATE,
            init_low: 0.0,
            init_high: 600.0,
            seed: None,
            progress_interval: 1_000,
        }
    }
}

impl QuantizerConfig {
    /// Checks neuron count, dimensionality, initialization range and rate.
    pub fn validate(&self) -> Result<()> {
        if self.neurons == 0 {
            return Err(QuantizerError::config("neuron count must be at least 1"));
        }
        if self.dimension == 0 {
            return Err(QuantizerError::config("dimension must be at least 1"));
        }
        check_init_range(self.init_low, self.init_high)?;
        if !self.initial_learning_rate.is_finite() || self.initial_learning_rate < 0.0 {
            return Err(QuantizerError::config(format!(
                "initial learning rate must be finite and non-negative, got {}",
                self.initial_learning_rate
            )));
        }
        Ok(())
    }
}

/// Checks that `[low, high)` is non-empty and its width is representable.
pub(crate) fn check_init_range(low: f64, high: f64) -> Result<()> {
    if !low.is_finite() || !high.is_finite() {
        return Err(QuantizerError::config("initialization range must be finite"));
    }
    if low >= high {
        return Err(QuantizerError::config(format!(
            "initialization range [{}, {}) is empty",
            low, high
        )));
    }
    if !(high - low).is_finite() {
        return Err(QuantizerError::config(format!(
            "initialization range [{}, {}) is too wide",
            low, high
        )));
    }
    Ok(())
}

/// Input sampler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Named regions samples are drawn from.
    /// Default: cells A, C, D, E, G and I of a 3x3 grid of 200x200 cells.
    pub regions: Vec<Region>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            regions: Region::default_catalog(),
        }
    }
}

impl SamplerConfig {
    /// Checks that the catalog is non-empty and every region is well formed.
    pub fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            return Err(QuantizerError::config("region catalog is empty"));
        }
        for region in &self.regions {
            region.validate()?;
        }
        Ok(())
    }
}

/// Largest accepted snapshot width and height in pixels.
pub const MAX_CANVAS_SIZE: u32 = 16_384;

/// Snapshot rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width and height of the output image in pixels.
    /// Default: 600.
    pub canvas_size: u32,

    /// Side length of the plotted area in input coordinates.
    /// Default: 600.0.
    pub extent: f64,

    /// Number of grid cells per axis drawn as background.
    /// Default: 3.
    pub grid_cells: u32,

    /// Half-size of a neuron marker in pixels.
    /// Default: 5.
    pub marker_radius: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_size: 600,
            extent: 600.0,
            grid_cells: 3,
            marker_radius: 5,
        }
    }
}

impl RenderConfig {
    /// Checks canvas size and plotted extent.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_size == 0 {
            return Err(QuantizerError::config("canvas size must be at least 1 pixel"));
        }
        if self.canvas_size > MAX_CANVAS_SIZE {
            return Err(QuantizerError::config(format!(
                "canvas size {} exceeds {} pixels",
                self.canvas_size, MAX_CANVAS_SIZE
            )));
        }
        if !self.extent.is_finite() || self.extent <= 0.0 {
            return Err(QuantizerError::config("plotted extent must be positive"));
        }
        if self.grid_cells > self.canvas_size {
            return Err(QuantizerError::config(format!(
                "{} grid cells do not fit on a {} pixel canvas",
                self.grid_cells, self.canvas_size
            )));
        }
        if self.marker_radius > self.canvas_size / 2 {
            return Err(QuantizerError::config(format!(
                "marker radius {} exceeds half the canvas size",
                self.marker_radius
            )));
        }
        Ok(())
    }
}
