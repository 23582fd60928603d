//! Input sampling for training.
//!
//! The training loop only needs something that yields one input vector per
//! step. [`CatalogSampler`] draws points from a weighted catalog of named
//! rectangular [`Region`]s; any `FnMut() -> Vec<f64>` closure also works as a
//! sampler, which is handy for fixed sequences.

mod catalog;
mod region;

pub use catalog::CatalogSampler;
pub use region::{Region, DEFAULT_CELL_SIZE};

/// A source of training input vectors.
pub trait Sampler {
    /// Produces the next input vector.
    fn next_sample(&mut self) -> Vec<f64>;
}

impl<F> Sampler for F
where
    F: FnMut() -> Vec<f64>,
{
    fn next_sample(&mut self) -> Vec<f64> {
        self()
    }
}
