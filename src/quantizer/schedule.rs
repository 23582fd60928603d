//! Linear learning-rate annealing.

use crate::error::{QuantizerError, Result};
use log::debug;

/// A learning rate that starts at `initial` and loses `initial / iterations`
/// after every step.
///
/// Repeated subtraction drifts, so after the last step the raw value may sit
/// a few ulps below zero. The schedule clamps at zero: [`current`](Self::current)
/// never goes negative, and steps past the budget stay at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningRateSchedule {
    initial: f64,
    delta: f64,
    current: f64,
    steps: usize,
}

impl LearningRateSchedule {
    /// Creates a schedule reaching zero after `iterations` steps.
    ///
    /// With zero iterations the rate never changes.
    pub fn new(initial: f64, iterations: usize) -> Result<Self> {
        if !initial.is_finite() || initial < 0.0 {
            return Err(QuantizerError::config(format!(
                "initial learning rate must be finite and non-negative, got {}",
                initial
            )));
        }

        let delta = if iterations == 0 {
            0.0
        } else {
            initial / iterations as f64
        };

        Ok(Self {
            initial,
            delta,
            current: initial,
            steps: 0,
        })
    }

    /// The starting rate.
    #[inline]
    pub fn initial(&self) -> f64 {
        self.initial
    }

    /// The per-step decrement.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// The rate to use for the next step.
    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Number of decrements applied so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Applies one decrement and returns the new rate.
    pub fn step(&mut self) -> f64 {
        let next = self.current - self.delta;
        if next < 0.0 {
            if self.current > 0.0 {
                debug!(
                    "Learning rate clamped to zero at step {} (raw value {:e})",
                    self.steps + 1,
                    next
                );
            }
            self.current = 0.0;
        } else {
            self.current = next;
        }
        self.steps += 1;
        self.current
    }
}
