//! Generator module - random connected pieces
//!
//! A piece grows from a single block at the local origin. Each step collects
//! every empty cell edge-adjacent to the current shape and appends one of them
//! uniformly at random, so the result is always 4-connected and free of
//! duplicates. The number of extra blocks is drawn from `1..=5`, then a single
//! color is drawn for the whole piece.

use arrayvec::ArrayVec;

use crate::polyomino::{PieceBlocks, Polyomino};
use crate::rng::SimpleRng;
use crate::types::{Block, Color, Position, MAX_EXTRA_BLOCKS, MAX_PIECE_BLOCKS};

/// Upper bound on frontier cells: each block contributes at most four.
const MAX_CANDIDATES: usize = MAX_PIECE_BLOCKS * 4;

/// Generate a random piece positioned at its spawn point for `field_width`.
pub fn generate(rng: &mut SimpleRng, field_width: i32) -> Polyomino {
    let mut shape: ArrayVec<Position, MAX_PIECE_BLOCKS> = ArrayVec::new();
    shape.push(Position::new(0, 0));

    let extra = rng.next_inclusive(1, MAX_EXTRA_BLOCKS);
    for _ in 0..extra {
        let candidates = neighbor_candidates(&shape);
        let Some(&next) = rng.pick(candidates.as_slice()) else {
            break;
        };
        if shape.try_push(next).is_err() {
            break;
        }
    }

    let color = rng.pick(&Color::ALL).copied().unwrap_or(Color::White);
    let blocks: PieceBlocks = shape
        .iter()
        .map(|p| Block { pos: *p, color })
        .collect();

    let mut piece = Polyomino::new(blocks, Position::default());
    piece.position = piece.spawn_position(field_width);
    piece
}

/// Empty cells edge-adjacent to `shape`, in discovery order, without repeats.
pub fn neighbor_candidates(shape: &[Position]) -> ArrayVec<Position, MAX_CANDIDATES> {
    let mut out = ArrayVec::new();
    for cell in shape {
        for n in cell.neighbors() {
            if shape.contains(&n) || out.contains(&n) {
                continue;
            }
            out.push(n);
        }
    }
    out
}

/// Whether `cells` form a single 4-connected group.
pub fn is_connected(cells: &[Position]) -> bool {
    let Some(&first) = cells.first() else {
        return true;
    };
    let mut seen = vec![first];
    let mut stack = vec![first];
    while let Some(cell) = stack.pop() {
        for n in cell.neighbors() {
            if cells.contains(&n) && !seen.contains(&n) {
                seen.push(n);
                stack.push(n);
            }
        }
    }
    seen.len() == cells.len()
}
