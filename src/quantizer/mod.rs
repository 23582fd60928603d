//! Competitive-learning quantizer.
//!
//! - **Neurons**: weight vectors addressed by index (neuron.rs)
//! - **Quantizer**: winner search and winner-only updates (map.rs)
//! - **Schedule**: linear learning-rate annealing (schedule.rs)
//! - **Training**: the sequential sample/compete/update loop (training.rs)

mod map;
mod neuron;
mod schedule;
pub mod training;

pub use map::Quantizer;
pub use neuron::Neuron;
pub use schedule::LearningRateSchedule;
pub use training::{Trainer, TrainingReport, WinnerSet};
