//! Weighted categorical sampler over a region catalog.

use crate::error::{QuantizerError, Result};
use crate::sampler::{Region, Sampler};
use log::debug;
use rand::distributions::{Distribution, Uniform, WeightedIndex};
use rand::Rng;

/// Draws a region by weight, then a uniform point inside its box.
///
/// With equal weights this picks categories uniformly with repetition.
pub struct CatalogSampler<R: Rng> {
    regions: Vec<Region>,
    picker: WeightedIndex<f64>,
    axes: Vec<(Uniform<f64>, Uniform<f64>)>,
    rng: R,
}

impl<R: Rng> CatalogSampler<R> {
    /// Creates a sampler over `regions` driven by `rng`.
    pub fn new(regions: Vec<Region>, rng: R) -> Result<Self> {
        if regions.is_empty() {
            return Err(QuantizerError::config("region catalog is empty"));
        }
        for region in &regions {
            region.validate()?;
        }

        let picker = WeightedIndex::new(regions.iter().map(|r| r.weight))
            .map_err(|e| QuantizerError::config(format!("invalid region weights: {}", e)))?;
        let axes = regions
            .iter()
            .map(|r| {
                (
                    Uniform::new(r.x, r.x + r.width),
                    Uniform::new(r.y, r.y + r.height),
                )
            })
            .collect();

        debug!("Catalog sampler over {} regions", regions.len());
        Ok(Self {
            regions,
            picker,
            axes,
            rng,
        })
    }

    /// The regions this sampler draws from.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Draws a sample and returns it with the index of the chosen region.
    pub fn next_labeled(&mut self) -> (usize, Vec<f64>) {
        let idx = self.picker.sample(&mut self.rng);
        let (x_axis, y_axis) = &self.axes[idx];
        let point = vec![x_axis.sample(&mut self.rng), y_axis.sample(&mut self.rng)];
        (idx, point)
    }
}

impl<R: Rng> Sampler for CatalogSampler<R> {
    fn next_sample(&mut self) -> Vec<f64> {
        self.next_labeled().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_samples_fall_in_chosen_region() {
        let rng = ChaCha8Rng::seed_from_u64(42);
        let mut sampler = CatalogSampler::new(Region::default_catalog(), rng).unwrap();

        for _ in 0..1000 {
            let (idx, point) = sampler.next_labeled();
            assert_eq!(point.len(), 2);
            assert!(sampler.regions()[idx].contains(&point));
        }
    }

    #[test]
    fn test_every_category_is_drawn() {
        let rng = ChaCha8Rng::seed_from_u64(7);
        let mut sampler = CatalogSampler::new(Region::default_catalog(), rng).unwrap();

        let mut counts = [0usize; 6];
        for _ in 0..6000 {
            counts[sampler.next_labeled().0] += 1;
        }
        // Uniform weights: each category near 1000 draws
        assert!(counts.iter().all(|&c| c > 800 && c < 1200), "{:?}", counts);
    }

    #[test]
    fn test_weights_bias_selection() {
        let regions = vec![
            Region::new("rare", 0.0, 0.0, 1.0, 1.0),
            Region::new("common", 10.0, 10.0, 1.0, 1.0).with_weight(9.0),
        ];
        let mut sampler = CatalogSampler::new(regions, ChaCha8Rng::seed_from_u64(1)).unwrap();

        let common = (0..1000).filter(|_| sampler.next_labeled().0 == 1).count();
        assert!(common > 850, "common drawn {} times", common);
    }

    #[test]
    fn test_seeded_sampler_is_reproducible() {
        let mut a = CatalogSampler::new(Region::default_catalog(), ChaCha8Rng::seed_from_u64(3)).unwrap();
        let mut b = CatalogSampler::new(Region::default_catalog(), ChaCha8Rng::seed_from_u64(3)).unwrap();
        for _ in 0..50 {
            assert_eq!(a.next_sample(), b.next_sample());
        }
    }

    #[test]
    fn test_rejects_bad_catalog() {
        let rng = ChaCha8Rng::seed_from_u64(0);
        assert!(CatalogSampler::new(vec![], rng.clone()).is_err());

        let flat = vec![Region::new("flat", 0.0, 0.0, 1.0, 0.0)];
        assert!(matches!(
            CatalogSampler::new(flat, rng.clone()),
            Err(QuantizerError::InvalidConfiguration(_))
        ));

        let far = vec![Region::new("far", 1e17, 0.0, 1.0, 1.0)];
        assert!(matches!(
            CatalogSampler::new(far, rng),
            Err(QuantizerError::InvalidConfiguration(_))
        ));
    }
}
