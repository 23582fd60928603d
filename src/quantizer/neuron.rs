//! Neuron representation for the quantizer.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// A neuron of the quantizer.
///
/// A neuron is just a weight vector; its identity is its index in the
/// owning [`Quantizer`](crate::Quantizer).
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    /// Weight vector, the neuron's position in input space.
    pub weights: Vec<f64>,
}

impl Neuron {
    /// Creates a neuron whose components are drawn independently from `range`.
    pub fn new_random<R: Rng>(weight_dim: usize, range: &Uniform<f64>, rng: &mut R) -> Self {
        let weights = (0..weight_dim).map(|_| range.sample(rng)).collect();
        Self { weights }
    }

    /// Creates a new neuron with the given weights.
    pub fn new_with_weights(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// Number of components.
    #[inline]
    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    /// Computes the Euclidean distance between this neuron's weights and an input vector.
    pub fn distance(&self, input: &[f64]) -> f64 {
        self.distance_squared(input).sqrt()
    }

    /// Computes the squared Euclidean distance (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, input: &[f64]) -> f64 {
        debug_assert_eq!(
            self.weights.len(),
            input.len(),
            "Weight and input dimensions must match"
        );

        self.weights
            .iter()
            .zip(input.iter())
            .map(|(w, i)| (w - i).powi(2))
            .sum()
    }

    /// Moves the weights towards `input` by a fraction `learning_rate` of the gap.
    pub fn update_weights(&mut self, input: &[f64], learning_rate: f64) {
        for (w, i) in self.weights.iter_mut().zip(input.iter()) {
            *w += learning_rate * (i - *w);
        }
    }
}
