//! The neuron set and its competition/update rules.

use crate::config::{check_init_range, QuantizerConfig};
use crate::error::{QuantizerError, Result};
use crate::quantizer::Neuron;
use log::debug;
use rand::distributions::Uniform;
use rand::Rng;

/// A fixed-size set of neurons competing for input vectors.
///
/// Unlike a full self-organizing map there is no grid: only the winning
/// neuron of each competition is moved.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantizer {
    /// The neurons, addressed by index.
    neurons: Vec<Neuron>,
    /// Weight vector dimensionality.
    weight_dim: usize,
}

impl Quantizer {
    /// Creates a quantizer with weights drawn from the configured range.
    pub fn new<R: Rng>(config: &QuantizerConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        Self::initialize(
            config.neurons,
            config.dimension,
            config.init_low,
            config.init_high,
            rng,
        )
    }

    /// Creates `neurons` neurons of `weight_dim` components each, every
    /// component drawn uniformly from `[low, high)`.
    pub fn initialize<R: Rng>(
        neurons: usize,
        weight_dim: usize,
        low: f64,
        high: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if neurons == 0 {
            return Err(QuantizerError::config("neuron count must be at least 1"));
        }
        if weight_dim == 0 {
            return Err(QuantizerError::config("dimension must be at least 1"));
        }
        check_init_range(low, high)?;

        let range = Uniform::new(low, high);
        let neurons: Vec<Neuron> = (0..neurons)
            .map(|_| Neuron::new_random(weight_dim, &range, rng))
            .collect();

        debug!(
            "Initialized {} neurons of dimension {} in [{}, {})",
            neurons.len(),
            weight_dim,
            low,
            high
        );

        Ok(Self { neurons, weight_dim })
    }

    /// Creates a quantizer from preset weight vectors.
    ///
    /// All vectors must have the same non-zero length.
    pub fn from_weights(weights: Vec<Vec<f64>>) -> Result<Self> {
        let weight_dim = weights
            .first()
            .map(Vec::len)
            .ok_or_else(|| QuantizerError::config("neuron count must be at least 1"))?;
        if weight_dim == 0 {
            return Err(QuantizerError::config("dimension must be at least 1"));
        }
        for w in &weights {
            QuantizerError::check_dimension(weight_dim, w.len())?;
        }

        let neurons = weights.into_iter().map(Neuron::new_with_weights).collect();
        Ok(Self { neurons, weight_dim })
    }

    /// Returns the number of neurons.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.neurons.len()
    }

    /// Returns the weight vector dimensionality.
    #[inline]
    pub fn dim(&self) -> usize {
        self.weight_dim
    }

    /// All neurons in index order.
    #[inline]
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Gets a neuron by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Neuron> {
        self.neurons.get(index)
    }

    /// Copies out every weight vector in index order.
    pub fn weights(&self) -> Vec<Vec<f64>> {
        self.neurons.iter().map(|n| n.weights.clone()).collect()
    }

    /// Finds the winner for an input vector.
    ///
    /// The winner is the neuron with the smallest squared Euclidean distance
    /// to `input`; ties go to the lowest index.
    pub fn find_winner(&self, input: &[f64]) -> Result<usize> {
        self.find_winner_with_distance(input).map(|(idx, _)| idx)
    }

    /// Like [`find_winner`](Self::find_winner), also returning the squared distance.
    pub fn find_winner_with_distance(&self, input: &[f64]) -> Result<(usize, f64)> {
        if self.neurons.is_empty() {
            return Err(QuantizerError::config("no neurons to compete"));
        }
        QuantizerError::check_dimension(self.weight_dim, input.len())?;

        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;
        for (i, neuron) in self.neurons.iter().enumerate() {
            let dist = neuron.distance_squared(input);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        Ok((best_idx, best_dist))
    }

    /// Finds the `k` nearest neurons to an input vector.
    ///
    /// Returns (index, distance) pairs sorted by distance, ties by index.
    pub fn k_nearest(&self, input: &[f64], k: usize) -> Result<Vec<(usize, f64)>> {
        QuantizerError::check_dimension(self.weight_dim, input.len())?;

        let mut distances: Vec<(usize, f64)> = self
            .neurons
            .iter()
            .enumerate()
            .map(|(i, n)| (i, n.distance(input)))
            .collect();

        distances.sort_by(|a, b| a.1.total_cmp(&b.1));
        distances.truncate(k);

        Ok(distances)
    }

    /// Moves the winner towards `input` by `learning_rate`.
    ///
    /// Every other neuron is left untouched.
    pub fn update(&mut self, winner: usize, input: &[f64], learning_rate: f64) -> Result<()> {
        QuantizerError::check_dimension(self.weight_dim, input.len())?;
        let max = self.neurons.len();
        let neuron = self
            .neurons
            .get_mut(winner)
            .ok_or(QuantizerError::IndexOutOfBounds { index: winner, max })?;

        neuron.update_weights(input, learning_rate);
        Ok(())
    }

    /// Runs one competition and moves its winner.
    ///
    /// Returns the winner index and its squared distance before the update.
    pub fn train_step(&mut self, input: &[f64], learning_rate: f64) -> Result<(usize, f64)> {
        let (winner, dist) = self.find_winner_with_distance(input)?;
        self.update(winner, input, learning_rate)?;
        Ok((winner, dist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_quantizer() -> Quantizer {
        Quantizer::from_weights(vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![0.0, 10.0],
            vec![10.0, 10.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_initialize_shape_and_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for (m, d) in [(1, 1), (10, 2), (7, 5)] {
            let q = Quantizer::initialize(m, d, 0.0, 600.0, &mut rng).unwrap();
            assert_eq!(q.total_neurons(), m);
            assert_eq!(q.dim(), d);
            for neuron in q.neurons() {
                assert_eq!(neuron.dim(), d);
                assert!(neuron.weights.iter().all(|&w| (0.0..600.0).contains(&w)));
            }
        }
    }

    #[test]
    fn test_initialize_is_seeded() {
        let config = QuantizerConfig::default();
        let a = Quantizer::new(&config, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let b = Quantizer::new(&config, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_initialize_rejects_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            Quantizer::initialize(0, 2, 0.0, 600.0, &mut rng),
            Err(QuantizerError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Quantizer::initialize(3, 0, 0.0, 600.0, &mut rng),
            Err(QuantizerError::InvalidConfiguration(_))
        ));
        assert!(Quantizer::from_weights(vec![]).is_err());
    }

    #[test]
    fn test_initialize_rejects_unrepresentable_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            Quantizer::initialize(3, 2, -1e308, 1e308, &mut rng),
            Err(QuantizerError::InvalidConfiguration(_))
        ));
        assert!(Quantizer::initialize(3, 2, 5.0, 5.0, &mut rng).is_err());
        assert!(Quantizer::initialize(3, 2, 0.0, f64::INFINITY, &mut rng).is_err());
    }

    #[test]
    fn test_from_weights_rejects_ragged() {
        let result = Quantizer::from_weights(vec![vec![0.0, 0.0], vec![1.0]]);
        assert!(matches!(
            result,
            Err(QuantizerError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_find_winner() {
        let q = sample_quantizer();
        assert_eq!(q.find_winner(&[9.0, 1.0]).unwrap(), 1);
        assert_eq!(q.find_winner(&[8.0, 9.0]).unwrap(), 3);
        // Repeated calls agree
        assert_eq!(q.find_winner(&[8.0, 9.0]).unwrap(), 3);
    }

    #[test]
    fn test_find_winner_tie_goes_to_lowest_index() {
        let q = Quantizer::from_weights(vec![vec![5.0, 5.0], vec![5.0, 5.0]]).unwrap();
        assert_eq!(q.find_winner(&[0.0, 0.0]).unwrap(), 0);

        // Equidistant but distinct neurons
        let q = Quantizer::from_weights(vec![vec![9.0, 0.0], vec![-1.0, 0.0], vec![1.0, 0.0]])
            .unwrap();
        assert_eq!(q.find_winner(&[0.0, 0.0]).unwrap(), 1);
    }

    #[test]
    fn test_find_winner_dimension_mismatch() {
        let q = sample_quantizer();
        assert!(matches!(
            q.find_winner(&[1.0, 2.0, 3.0]),
            Err(QuantizerError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_update_moves_only_winner_closer() {
        let mut q = sample_quantizer();
        let before = q.clone();
        let input = [4.0, 7.0];

        let winner = q.find_winner(&input).unwrap();
        let dist_before = q.neurons()[winner].distance_squared(&input);
        q.update(winner, &input, 0.3).unwrap();
        let dist_after = q.neurons()[winner].distance_squared(&input);

        assert!(dist_after < dist_before);
        for i in (0..q.total_neurons()).filter(|&i| i != winner) {
            assert_eq!(q.neurons()[i], before.neurons()[i]);
        }
    }

    #[test]
    fn test_zero_rate_update_is_noop() {
        let mut q = sample_quantizer();
        let before = q.clone();
        q.update(2, &[123.0, -45.0], 0.0).unwrap();
        assert_eq!(q, before);
    }

    #[test]
    fn test_update_out_of_bounds() {
        let mut q = sample_quantizer();
        assert!(matches!(
            q.update(4, &[0.0, 0.0], 0.5),
            Err(QuantizerError::IndexOutOfBounds { index: 4, max: 4 })
        ));
    }

    #[test]
    fn test_train_step_returns_pre_update_distance() {
        let mut q = sample_quantizer();
        let (winner, dist) = q.train_step(&[3.0, 4.0], 1.0).unwrap();
        assert_eq!(winner, 0);
        assert!((dist - 25.0).abs() < 1e-12);
        assert_eq!(q.neurons()[0].weights, vec![3.0, 4.0]);
    }

    #[test]
    fn test_k_nearest() {
        let q = sample_quantizer();
        let nearest = q.k_nearest(&[1.0, 2.0], 3).unwrap();

        assert_eq!(nearest.len(), 3);
        assert_eq!(nearest[0].0, 0);
        assert_eq!(nearest[1].0, 2);
        assert_eq!(nearest[2].0, 1);
    }
}
