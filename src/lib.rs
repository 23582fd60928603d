//! # Kohonen - Competitive-Learning Vector Quantizer
//!
//! A small set of neuron vectors learns to approximate the distribution of a
//! stream of 2-D samples. Each sample is won by its nearest neuron, only the
//! winner moves toward the sample, and the learning rate anneals linearly to
//! zero over a fixed iteration budget. There is no grid topology and no
//! neighborhood function: this is a Kohonen map reduced to plain clustering.
//!
//! ## Overview
//!
//! - [`sampler`] - Weighted catalog of named regions producing input points
//! - [`quantizer`] - Neurons, winner selection, updates, schedule and training loop
//! - [`experiment`] - End-to-end runs assembled from a [`Config`]
//! - [`render`] - PNG snapshots of the neuron set
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kohonen::{Config, Experiment};
//!
//! let mut config = Config::default();
//! config.quantizer.seed = Some(42);
//!
//! let outcome = Experiment::new(&config)?.run()?;
//! for idx in outcome.report.winners.iter() {
//!     println!("{}: {:?}", idx, outcome.trained.neurons()[idx].weights);
//! }
//! ```
//!
//! ## Custom Samplers
//!
//! ```rust,ignore
//! use kohonen::{Quantizer, Trainer};
//!
//! let mut quantizer = Quantizer::from_weights(vec![vec![0.0, 0.0], vec![1000.0, 1000.0]])?;
//! let mut sampler = || vec![0.0, 0.0];
//! let report = Trainer::new(1, 1.0).train(&mut quantizer, &mut sampler)?;
//! assert!(report.winners.contains(0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod experiment;
pub mod quantizer;
pub mod render;
pub mod sampler;

// Re-export commonly used types
pub use config::{Config, QuantizerConfig, RenderConfig, SamplerConfig};
pub use error::{QuantizerError, Result};
pub use experiment::{rng_from_seed, Experiment, ExperimentOutcome};
pub use quantizer::{LearningRateSchedule, Neuron, Quantizer, Trainer, TrainingReport, WinnerSet};
pub use sampler::{CatalogSampler, Region, Sampler};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of neurons.
pub const DEFAULT_NEURONS: usize = 10;

/// Default number of training iterations.
pub const DEFAULT_ITERATIONS: usize = 15_000;

/// Default initial learning rate.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_constants_match_defaults() {
        let config = QuantizerConfig::default();
        assert_eq!(config.neurons, DEFAULT_NEURONS);
        assert_eq!(config.iterations, DEFAULT_ITERATIONS);
        assert!((config.initial_learning_rate - DEFAULT_LEARNING_RATE).abs() < 1e-12);
    }
}
