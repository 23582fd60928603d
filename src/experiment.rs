//! End-to-end training runs assembled from a [`Config`].

use crate::config::Config;
use crate::error::{QuantizerError, Result};
use crate::quantizer::{Quantizer, Trainer, TrainingReport};
use crate::sampler::{CatalogSampler, Region};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Dimensionality of the points a [`CatalogSampler`] produces.
const CATALOG_DIMENSION: usize = 2;

/// Creates the random source for a run.
///
/// A fixed seed gives a reproducible run; otherwise the generator is seeded
/// from system entropy.
pub fn rng_from_seed(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// A configured run: initialized neurons, a catalog sampler and a trainer.
///
/// One random stream drives both initialization and sampling.
pub struct Experiment {
    quantizer: Quantizer,
    sampler: CatalogSampler<ChaCha8Rng>,
    trainer: Trainer,
}

/// Neuron sets before and after training, with the training report.
#[derive(Debug, Clone)]
pub struct ExperimentOutcome {
    /// Neurons as initialized.
    pub initial: Quantizer,
    /// Neurons after the last step.
    pub trained: Quantizer,
    /// Winners and statistics.
    pub report: TrainingReport,
}

impl Experiment {
    /// Validates `config` and initializes the neurons.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        if config.quantizer.dimension != CATALOG_DIMENSION {
            return Err(QuantizerError::DimensionMismatch {
                expected: config.quantizer.dimension,
                actual: CATALOG_DIMENSION,
            });
        }

        let mut rng = rng_from_seed(config.quantizer.seed);
        let quantizer = Quantizer::new(&config.quantizer, &mut rng)?;
        let sampler = CatalogSampler::new(config.sampler.regions.clone(), rng)?;
        let trainer = Trainer::from_config(&config.quantizer);

        info!(
            "Experiment: {} neurons, {} regions, {} iterations",
            quantizer.total_neurons(),
            sampler.regions().len(),
            trainer.iterations()
        );

        Ok(Self {
            quantizer,
            sampler,
            trainer,
        })
    }

    /// The neurons in their current state.
    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    /// The sampled regions.
    pub fn regions(&self) -> &[Region] {
        self.sampler.regions()
    }

    /// Runs the full training loop.
    pub fn run(self) -> Result<ExperimentOutcome> {
        self.run_with_progress(|_, _, _| {})
    }

    /// Runs the full training loop, reporting progress as
    /// `progress(step, total, rate)`.
    pub fn run_with_progress<F>(mut self, progress: F) -> Result<ExperimentOutcome>
    where
        F: FnMut(usize, usize, f64),
    {
        let initial = self.quantizer.clone();
        let report =
            self.trainer
                .train_with_progress(&mut self.quantizer, &mut self.sampler, progress)?;

        Ok(ExperimentOutcome {
            initial,
            trained: self.quantizer,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuantizerConfig;

    fn small_config(seed: u64) -> Config {
        Config {
            quantizer: QuantizerConfig {
                neurons: 6,
                iterations: 2_000,
                seed: Some(seed),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_seeded_runs_match() {
        let a = Experiment::new(&small_config(11)).unwrap().run().unwrap();
        let b = Experiment::new(&small_config(11)).unwrap().run().unwrap();
        assert_eq!(a.initial, b.initial);
        assert_eq!(a.trained, b.trained);
        assert_eq!(a.report.win_counts, b.report.win_counts);
    }

    #[test]
    fn test_outcome_shapes() {
        let outcome = Experiment::new(&small_config(5)).unwrap().run().unwrap();
        assert_eq!(outcome.trained.total_neurons(), 6);
        assert_eq!(outcome.report.winners.capacity(), 6);
        assert!(!outcome.report.winners.is_empty());
        assert_eq!(outcome.report.win_counts.iter().sum::<usize>(), 2_000);
    }

    #[test]
    fn test_non_planar_dimension_rejected() {
        let mut config = small_config(1);
        config.quantizer.dimension = 3;
        assert!(matches!(
            Experiment::new(&config),
            Err(QuantizerError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_config_fails_before_training() {
        let mut config = small_config(1);
        config.quantizer.neurons = 0;
        assert!(matches!(
            Experiment::new(&config),
            Err(QuantizerError::InvalidConfiguration(_))
        ));
    }
}
