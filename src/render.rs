//! Snapshot images of the neuron set.
//!
//! Draws the background cell grid and one marker per neuron. The initial
//! snapshot uses black dots; the final snapshot marks neurons that won at
//! least once with a blue `K` and neurons that never won with a red `X`.
//! Input coordinates map onto the canvas with the y axis pointing up.

use crate::config::RenderConfig;
use crate::error::Result;
use crate::quantizer::{Quantizer, WinnerSet};
use image::{ImageBuffer, Rgb};
use log::info;
use std::path::Path;

/// An RGB snapshot image.
pub type Canvas = ImageBuffer<Rgb<u8>, Vec<u8>>;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
const RED: Rgb<u8> = Rgb([220, 0, 0]);
const GRID: Rgb<u8> = Rgb([90, 90, 255]);

/// How a neuron is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Filled black dot, used before training.
    Dot,
    /// Blue `K`, a neuron that won at least once.
    Winner,
    /// Red `X`, a neuron that never won.
    Idle,
}

impl Marker {
    fn color(self) -> Rgb<u8> {
        match self {
            Marker::Dot => BLACK,
            Marker::Winner => BLUE,
            Marker::Idle => RED,
        }
    }
}

/// Renders the neuron set before training.
pub fn render_initial(quantizer: &Quantizer, config: &RenderConfig) -> Canvas {
    render(quantizer, config, |_| Marker::Dot)
}

/// Renders the trained neuron set, distinguishing winners from idle neurons.
pub fn render_final(quantizer: &Quantizer, winners: &WinnerSet, config: &RenderConfig) -> Canvas {
    render(quantizer, config, |idx| {
        if winners.contains(idx) {
            Marker::Winner
        } else {
            Marker::Idle
        }
    })
}

/// Writes a snapshot; the format follows the file extension.
pub fn save_snapshot(canvas: &Canvas, path: &Path) -> Result<()> {
    canvas.save(path)?;
    info!("Saved snapshot to {}", path.display());
    Ok(())
}

/// Maps an input-space point to pixel coordinates, or None if it falls off
/// the canvas.
pub fn to_pixel(point: &[f64], config: &RenderConfig) -> Option<(i64, i64)> {
    let (x, y) = match point {
        [x, y, ..] => (*x, *y),
        _ => return None,
    };
    let size = config.canvas_size as f64;
    let px = (x / config.extent * size).floor();
    let py = size - 1.0 - (y / config.extent * size).floor();
    if !(0.0..size).contains(&px) || !(0.0..size).contains(&py) {
        return None;
    }
    Some((px as i64, py as i64))
}

fn render<F>(quantizer: &Quantizer, config: &RenderConfig, marker_for: F) -> Canvas
where
    F: Fn(usize) -> Marker,
{
    let size = config.canvas_size;
    let mut canvas: Canvas = ImageBuffer::from_pixel(size, size, WHITE);
    draw_grid(&mut canvas, config.grid_cells.min(size));
    let radius = config.marker_radius.min(size / 2) as i64;

    for (idx, neuron) in quantizer.neurons().iter().enumerate() {
        if let Some(center) = to_pixel(&neuron.weights, config) {
            draw_marker(&mut canvas, center, radius, marker_for(idx));
        }
    }

    canvas
}

fn draw_grid(canvas: &mut Canvas, cells: u32) {
    if cells == 0 {
        return;
    }
    let size = canvas.width();
    for i in 0..=cells {
        let offset = ((i as u64 * size as u64) / cells as u64).min(size as u64 - 1) as u32;
        for t in 0..size {
            canvas.put_pixel(offset, t, GRID);
            canvas.put_pixel(t, offset, GRID);
        }
    }
}

fn draw_marker(canvas: &mut Canvas, (cx, cy): (i64, i64), r: i64, marker: Marker) {
    let color = marker.color();
    match marker {
        Marker::Dot => {
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx * dx + dy * dy <= r * r {
                        put(canvas, cx + dx, cy + dy, color);
                    }
                }
            }
        }
        Marker::Winner => {
            draw_line(canvas, (cx - r, cy - r), (cx - r, cy + r), color);
            draw_line(canvas, (cx - r, cy), (cx + r, cy - r), color);
            draw_line(canvas, (cx - r, cy), (cx + r, cy + r), color);
        }
        Marker::Idle => {
            draw_line(canvas, (cx - r, cy - r), (cx + r, cy + r), color);
            draw_line(canvas, (cx - r, cy + r), (cx + r, cy - r), color);
        }
    }
}

// Bresenham
fn draw_line(canvas: &mut Canvas, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;

    loop {
        put(canvas, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn put(canvas: &mut Canvas, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}
