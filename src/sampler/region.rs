//! Named rectangular regions of the input plane.

use crate::error::{QuantizerError, Result};
use serde::{Deserialize, Serialize};

/// Side length of a cell in the default 3x3 catalog grid.
pub const DEFAULT_CELL_SIZE: f64 = 200.0;

fn default_weight() -> f64 {
    1.0
}

/// An axis-aligned box samples are drawn from.
///
/// `x` and `y` are the lower corner; the box spans
/// `[x, x + width) x [y, y + height)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Category name.
    pub name: String,
    /// Lower x bound.
    pub x: f64,
    /// Lower y bound.
    pub y: f64,
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
    /// Relative selection weight.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Region {
    /// Creates a region with unit weight.
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            weight: 1.0,
        }
    }

    /// Creates the grid cell at `(row, col)` for square cells of `cell_size`.
    ///
    /// Columns advance along x, rows along y.
    pub fn cell(name: impl Into<String>, row: usize, col: usize, cell_size: f64) -> Self {
        Self::new(
            name,
            col as f64 * cell_size,
            row as f64 * cell_size,
            cell_size,
            cell_size,
        )
    }

    /// Sets the selection weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// The six-cell catalog on a 3x3 grid of 200x200 cells.
    pub fn default_catalog() -> Vec<Region> {
        [
            ("A", 0, 0),
            ("C", 0, 2),
            ("D", 1, 0),
            ("E", 1, 1),
            ("G", 2, 0),
            ("I", 2, 2),
        ]
        .into_iter()
        .map(|(name, row, col)| Region::cell(name, row, col, DEFAULT_CELL_SIZE))
        .collect()
    }

    /// Checks extent and weight.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.x, self.y, self.width, self.height, self.weight]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(QuantizerError::config(format!(
                "region {} has non-finite bounds or weight",
                self.name
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(QuantizerError::config(format!(
                "region {} has non-positive extent",
                self.name
            )));
        }
        // Upper bounds must stay finite and above the lower bounds after rounding
        let x_end = self.x + self.width;
        let y_end = self.y + self.height;
        if !(x_end.is_finite() && x_end > self.x && y_end.is_finite() && y_end > self.y) {
            return Err(QuantizerError::config(format!(
                "region {} has an extent too small or too large for its position",
                self.name
            )));
        }
        if self.weight <= 0.0 {
            return Err(QuantizerError::config(format!(
                "region {} has non-positive weight",
                self.name
            )));
        }
        Ok(())
    }

    /// Returns true if the 2-D point lies inside the region.
    pub fn contains(&self, point: &[f64]) -> bool {
        match point {
            [px, py, ..] => {
                *px >= self.x
                    && *px < self.x + self.width
                    && *py >= self.y
                    && *py < self.y + self.height
            }
            _ => false,
        }
    }

    /// Center of the region.
    #[inline]
    pub fn center(&self) -> [f64; 2] {
        [self.x + self.width / 2.0, self.y + self.height / 2.0]
    }

    /// Euclidean distance from a 2-D point to the region (0 inside).
    pub fn distance_to(&self, point: &[f64]) -> f64 {
        let (px, py) = match point {
            [px, py, ..] => (*px, *py),
            _ => return f64::INFINITY,
        };
        let dx = (self.x - px).max(0.0).max(px - (self.x + self.width));
        let dy = (self.y - py).max(0.0).max(py - (self.y + self.height));
        (dx * dx + dy * dy).sqrt()
    }
}
