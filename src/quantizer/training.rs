//! Competitive-learning training loop.

use crate::config::QuantizerConfig;
use crate::error::Result;
use crate::quantizer::{LearningRateSchedule, Quantizer};
use crate::sampler::Sampler;
use log::info;

/// The neurons that have won at least one competition.
///
/// Stored as one flag per neuron slot, so it never holds an index outside
/// the neuron set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerSet {
    slots: Vec<bool>,
}

impl WinnerSet {
    /// Creates an empty set for `neurons` slots.
    pub fn new(neurons: usize) -> Self {
        Self {
            slots: vec![false; neurons],
        }
    }

    /// Marks a neuron as a winner. Out-of-range indices are ignored.
    pub fn insert(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = true;
        }
    }

    /// Returns true if the neuron has won.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.slots.get(index).copied().unwrap_or(false)
    }

    /// Number of winners.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|&&won| won).count()
    }

    /// Check if no neuron has won.
    pub fn is_empty(&self) -> bool {
        !self.slots.iter().any(|&won| won)
    }

    /// Number of neuron slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Winner indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, &won)| won.then_some(i))
    }
}

/// Outcome of a training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Neurons that won at least once.
    pub winners: WinnerSet,
    /// Number of competitions each neuron won.
    pub win_counts: Vec<usize>,
    /// Number of steps run.
    pub iterations: usize,
    /// Learning rate after the last step.
    pub final_learning_rate: f64,
    /// Mean Euclidean distance between each sample and its winner, measured
    /// before the winner moved. Zero when no steps ran.
    pub mean_quantization_error: f64,
}

/// Sequential competitive-learning trainer.
pub struct Trainer {
    iterations: usize,
    initial_learning_rate: f64,
    progress_interval: usize,
}

impl Trainer {
    /// Creates a trainer for `iterations` steps starting at `initial_learning_rate`.
    pub fn new(iterations: usize, initial_learning_rate: f64) -> Self {
        Self {
            iterations,
            initial_learning_rate,
            progress_interval: 0,
        }
    }

    /// Creates a trainer from the quantizer configuration.
    pub fn from_config(config: &QuantizerConfig) -> Self {
        Self::new(config.iterations, config.initial_learning_rate)
            .with_progress_interval(config.progress_interval)
    }

    /// Sets the number of steps between progress callbacks and log lines.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Number of training steps.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Trains `quantizer` on `iterations` samples drawn from `sampler`.
    pub fn train<S: Sampler + ?Sized>(
        &self,
        quantizer: &mut Quantizer,
        sampler: &mut S,
    ) -> Result<TrainingReport> {
        self.train_with_progress(quantizer, sampler, |_, _, _| {})
    }

    /// Trains like [`train`](Self::train), calling `progress(step, total, rate)`
    /// every `progress_interval` steps and after the last one.
    pub fn train_with_progress<S, F>(
        &self,
        quantizer: &mut Quantizer,
        sampler: &mut S,
        mut progress: F,
    ) -> Result<TrainingReport>
    where
        S: Sampler + ?Sized,
        F: FnMut(usize, usize, f64),
    {
        let mut schedule = LearningRateSchedule::new(self.initial_learning_rate, self.iterations)?;
        let mut winners = WinnerSet::new(quantizer.total_neurons());
        let mut win_counts = vec![0usize; quantizer.total_neurons()];
        let mut total_error = 0.0;

        info!(
            "Starting training: {} iterations, {} neurons, lr={}",
            self.iterations,
            quantizer.total_neurons(),
            self.initial_learning_rate
        );

        for iteration in 0..self.iterations {
            let input = sampler.next_sample();
            let (winner, dist_sq) = quantizer.train_step(&input, schedule.current())?;
            let rate = schedule.step();

            winners.insert(winner);
            win_counts[winner] += 1;
            total_error += dist_sq.sqrt();

            let done = iteration + 1;
            if self.progress_interval > 0
                && (done % self.progress_interval == 0 || done == self.iterations)
            {
                info!(
                    "Iteration {}/{}: lr={:.6}, winners={}",
                    done,
                    self.iterations,
                    rate,
                    winners.len()
                );
                progress(done, self.iterations, rate);
            }
        }

        let mean_quantization_error = if self.iterations == 0 {
            0.0
        } else {
            total_error / self.iterations as f64
        };

        info!(
            "Training completed: {}/{} neurons won, mean quantization error {:.3}",
            winners.len(),
            quantizer.total_neurons(),
            mean_quantization_error
        );

        Ok(TrainingReport {
            winners,
            win_counts,
            iterations: self.iterations,
            final_learning_rate: schedule.current(),
            mean_quantization_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuantizerError;

    #[test]
    fn test_winner_set() {
        let mut set = WinnerSet::new(4);
        assert!(set.is_empty());
        set.insert(2);
        set.insert(2);
        set.insert(0);
        set.insert(9);
        assert_eq!(set.len(), 2);
        assert!(set.contains(0));
        assert!(!set.contains(1));
        assert!(!set.contains(9));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(set.capacity(), 4);
    }

    #[test]
    fn test_zero_iterations_leaves_neurons_untouched() {
        let mut q = Quantizer::from_weights(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let before = q.clone();
        let mut sampler = || -> Vec<f64> { panic!("sampler must not be called") };

        let report = Trainer::new(0, 0.1).train(&mut q, &mut sampler).unwrap();

        assert_eq!(q, before);
        assert!(report.winners.is_empty());
        assert_eq!(report.iterations, 0);
        assert_eq!(report.mean_quantization_error, 0.0);
    }

    #[test]
    fn test_single_step_scenario() {
        let mut q = Quantizer::from_weights(vec![
            vec![0.0, 0.0],
            vec![1000.0, 1000.0],
            vec![1000.0, 1000.0],
        ])
        .unwrap();
        let mut sampler = || vec![0.0, 0.0];

        let report = Trainer::new(1, 1.0).train(&mut q, &mut sampler).unwrap();

        assert_eq!(q.neurons()[0].weights, vec![0.0, 0.0]);
        assert_eq!(q.neurons()[1].weights, vec![1000.0, 1000.0]);
        assert_eq!(report.winners.iter().collect::<Vec<_>>(), vec![0]);
        assert_eq!(report.win_counts, vec![1, 0, 0]);
        assert!(report.final_learning_rate.abs() < 1e-12);
    }

    #[test]
    fn test_rate_decays_to_zero() {
        let mut q = Quantizer::from_weights(vec![vec![0.0, 0.0]]).unwrap();
        let mut sampler = || vec![1.0, 1.0];
        let report = Trainer::new(1000, 0.1).train(&mut q, &mut sampler).unwrap();
        assert!(report.final_learning_rate >= 0.0);
        assert!(report.final_learning_rate < 1e-12);
        assert_eq!(report.win_counts, vec![1000]);
    }

    #[test]
    fn test_dimension_mismatch_aborts() {
        let mut q = Quantizer::from_weights(vec![vec![0.0, 0.0], vec![5.0, 5.0]]).unwrap();
        let mut calls = 0;
        let mut sampler = || {
            calls += 1;
            if calls < 3 {
                vec![1.0, 1.0]
            } else {
                vec![1.0, 1.0, 1.0]
            }
        };

        let result = Trainer::new(10, 0.5).train(&mut q, &mut sampler);
        assert!(matches!(
            result,
            Err(QuantizerError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
        // Two good steps ran before the failure; neuron 1 was never touched
        assert_eq!(q.neurons()[1].weights, vec![5.0, 5.0]);
    }

    #[test]
    fn test_progress_callback() {
        let mut q = Quantizer::from_weights(vec![vec![0.0], vec![1.0]]).unwrap();
        let mut sampler = || vec![0.5];
        let mut calls = Vec::new();

        Trainer::new(25, 0.1)
            .with_progress_interval(10)
            .train_with_progress(&mut q, &mut sampler, |step, total, _| {
                calls.push((step, total))
            })
            .unwrap();

        assert_eq!(calls, vec![(10, 25), (20, 25), (25, 25)]);
    }
}
