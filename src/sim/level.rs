//! Brick layout factories
//!
//! The default level is a fixed grid: `BRICK_ROWS` × `BRICK_COLUMNS` bricks
//! of fixed size, centered horizontally, one color per row.

use super::shape::Rect;
use super::state::{Brick, BrickColor};
use crate::consts::*;

/// Parameters for a rectangular brick grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub rows: usize,
    pub columns: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub gap: f32,
    pub top_offset: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            columns: BRICK_COLUMNS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            gap: BRICK_GAP,
            top_offset: BRICK_TOP_OFFSET,
        }
    }
}

impl GridLayout {
    /// Total width of one row including gaps
    pub fn row_width(&self) -> f32 {
        let n = self.columns as f32;
        n * self.brick_width + (n - 1.0).max(0.0) * self.gap
    }

    /// Build the bricks, row-major, ids starting at `first_id`
    pub fn build(&self, arena_width: f32, first_id: u32) -> Vec<Brick> {
        let left = ((arena_width - self.row_width()) / 2.0).max(0.0);
        let mut bricks = Vec::with_capacity(self.rows * self.columns);
        let mut id = first_id;

        for row in 0..self.rows {
            let y = self.top_offset + row as f32 * (self.brick_height + self.gap);
            let color = BrickColor::for_row(row);
            for col in 0..self.columns {
                let x = left + col as f32 * (self.brick_width + self.gap);
                bricks.push(Brick::new(
                    id,
                    Rect::new(x, y, self.brick_width, self.brick_height),
                    color,
                ));
                id += 1;
            }
        }

        log::debug!(
            "Built {}x{} brick grid ({} bricks)",
            self.rows,
            self.columns,
            bricks.len()
        );
        bricks
    }
}

/// The default 4×12 level for an arena of the given width
pub fn default_bricks(arena_width: f32, first_id: u32) -> Vec<Brick> {
    GridLayout::default().build(arena_width, first_id)
}
