//! Polyomino module - piece shape, pivot and transforms
//!
//! A piece stores its blocks in local coordinates relative to its own origin
//! and keeps a separate absolute `position` on the field:
//!
//! ```text
//! absolute cell = position + block.pos
//! ```
//!
//! `move_by` and `rotate` mutate unconditionally. Callers gate them with the
//! field's collision classifier (see [`crate::field::Field::classify`]).

use arrayvec::ArrayVec;

use crate::types::{Block, Color, Position, MAX_PIECE_BLOCKS};

/// Local blocks of a piece. Stack-allocated, at most six cells.
pub type PieceBlocks = ArrayVec<Block, MAX_PIECE_BLOCKS>;

/// A falling (or preview) piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polyomino {
    blocks: PieceBlocks,
    /// Absolute origin on the field.
    pub position: Position,
    pub placed: bool,
    /// Rounded centroid of the local blocks at creation time.
    rotation_point: Position,
}

impl Polyomino {
    /// Build a piece from local blocks.
    ///
    /// The rotation point is computed here once and never again, so wall kicks
    /// and repeated rotations all turn about the same cell.
    pub fn new(blocks: PieceBlocks, position: Position) -> Self {
        let rotation_point = rotation_point(&blocks);
        Self {
            blocks,
            position,
            placed: false,
            rotation_point,
        }
    }

    /// Build a piece from `(x, y)` offsets sharing one color.
    ///
    /// Offsets past the six-block limit are ignored.
    pub fn from_offsets(offsets: &[(i32, i32)], color: Color, position: Position) -> Self {
        let blocks = offsets
            .iter()
            .take(MAX_PIECE_BLOCKS)
            .map(|&(x, y)| Block::new(x, y, color))
            .collect();
        Self::new(blocks, position)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn rotation_point(&self) -> Position {
        self.rotation_point
    }

    /// Color of the piece (all blocks share it).
    pub fn color(&self) -> Option<Color> {
        self.blocks.first().map(|b| b.color)
    }

    /// Absolute field coordinates of every block.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let origin = self.position;
        self.blocks
            .iter()
            .map(move |b| origin.offset(b.pos.x, b.pos.y))
    }

    /// Blocks translated to absolute field coordinates.
    pub fn absolute_blocks(&self) -> impl Iterator<Item = Block> + '_ {
        let origin = self.position;
        self.blocks.iter().map(move |b| Block {
            pos: origin.offset(b.pos.x, b.pos.y),
            color: b.color,
        })
    }

    /// Largest local y, i.e. the bottom row of the shape.
    pub fn lowest_local_y(&self) -> i32 {
        self.blocks.iter().map(|b| b.pos.y).max().unwrap_or(0)
    }

    /// Spawn origin for a field of the given width: horizontally centered,
    /// with the lowest block one row above the top edge.
    pub fn spawn_position(&self, field_width: i32) -> Position {
        Position::new(field_width / 2, -self.lowest_local_y() - 1)
    }

    /// Translate the absolute position. No validation.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.position = self.position.offset(dx, dy);
    }

    /// Rotate the local blocks 90° about the fixed rotation point.
    ///
    /// Clockwise maps `rel (x, y)` to `(y, -x)`; counter-clockwise to `(-y, x)`.
    /// The pivot is a whole cell, so the mapping stays on the integer grid and
    /// needs no rounding. The absolute position is untouched.
    pub fn rotate(&mut self, clockwise: bool) {
        let pivot = self.rotation_point;
        for block in self.blocks.iter_mut() {
            let rel_x = block.pos.x - pivot.x;
            let rel_y = block.pos.y - pivot.y;
            block.pos = if clockwise {
                Position::new(pivot.x + rel_y, pivot.y - rel_x)
            } else {
                Position::new(pivot.x - rel_y, pivot.y + rel_x)
            };
        }
    }

    /// Local block positions, for snapshot/restore around a rotation attempt.
    pub(crate) fn local_positions(&self) -> ArrayVec<Position, MAX_PIECE_BLOCKS> {
        self.blocks.iter().map(|b| b.pos).collect()
    }

    pub(crate) fn restore_local_positions(&mut self, saved: &[Position]) {
        for (block, &pos) in self.blocks.iter_mut().zip(saved) {
            block.pos = pos;
        }
    }
}

/// Arithmetic centroid of the blocks, each axis rounded half away from zero.
pub fn rotation_point(blocks: &[Block]) -> Position {
    if blocks.is_empty() {
        return Position::default();
    }
    let n = blocks.len() as f64;
    let sum_x: f64 = blocks.iter().map(|b| b.pos.x as f64).sum();
    let sum_y: f64 = blocks.iter().map(|b| b.pos.y as f64).sum();
    Position::new((sum_x / n).round() as i32, (sum_y / n).round() as i32)
}
