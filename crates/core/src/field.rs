//! Field module - placed blocks, collision, line clear and settle
//!
//! The field is a dense `width x height` grid of cells in row-major order.
//! Coordinates: (x, y) where x grows left to right and y grows downward.
//! Rows above the top edge (y < 0) are not stored: a piece may hang there
//! while spawning, but nothing is ever placed there.

use crate::polyomino::Polyomino;
use crate::types::{Block, Cell, Collision, Position};

/// Outcome of writing a piece into the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockOutcome {
    /// Blocks written (those at y >= 0).
    pub placed: u32,
    /// At least one block was still above the top edge.
    pub topped_out: bool,
}

/// Outcome of a line-clear pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClear {
    /// Full rows that were removed, bottom to top, in pre-clear coordinates.
    pub rows: Vec<i32>,
    /// Rows the unsupported-block settle moved things down afterwards.
    pub settle_passes: u32,
}

impl LineClear {
    pub fn lines(&self) -> u32 {
        self.rows.len() as u32
    }
}

/// The playfield - placed blocks on a flat grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: i32,
    height: i32,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Field {
    /// Create an empty field. Dimensions are clamped to at least one cell.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Get cell at (x, y); `None` if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set cell at (x, y); returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Place a single block at its absolute position.
    pub fn place(&mut self, block: Block) -> bool {
        self.set(block.pos.x, block.pos.y, Some(block.color))
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is outside the stored grid (including y < 0)
    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.width || y < 0 || y >= self.height
    }

    /// Whether a cell counts as a wall for a falling piece.
    ///
    /// Left, right and floor are walls; the open top is not.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.width || y >= self.height
    }

    /// Classify where `piece` currently sits.
    pub fn classify(&self, piece: &Polyomino) -> Collision {
        self.classify_offset(piece, 0, 0)
    }

    /// Classify `piece` as if it were moved by `(dx, dy)`.
    ///
    /// Blocks are checked in order and the first offending cell decides the
    /// answer: a wall test first, then a placed-block test for cells at y >= 0.
    pub fn classify_offset(&self, piece: &Polyomino, dx: i32, dy: i32) -> Collision {
        for cell in piece.cells() {
            let x = cell.x + dx;
            let y = cell.y + dy;
            if self.is_wall(x, y) {
                return Collision::Wall;
            }
            if y >= 0 && self.is_occupied(x, y) {
                return Collision::Block;
            }
        }
        Collision::None
    }

    /// Whether any on-field block of `piece` overlaps a placed block,
    /// regardless of what [`classify`](Self::classify) reports first.
    pub fn overlaps_placed(&self, piece: &Polyomino) -> bool {
        piece
            .cells()
            .any(|c| c.y >= 0 && self.is_occupied(c.x, c.y))
    }

    /// Whether `piece` can move one row down.
    pub fn can_fall(&self, piece: &Polyomino) -> bool {
        self.classify_offset(piece, 0, 1).is_none()
    }

    /// Write every on-field block of `piece` into the grid.
    pub fn lock(&mut self, piece: &Polyomino) -> LockOutcome {
        let mut outcome = LockOutcome::default();
        for block in piece.absolute_blocks() {
            if block.pos.y < 0 {
                outcome.topped_out = true;
                continue;
            }
            if self.place(block) {
                outcome.placed += 1;
            }
        }
        outcome
    }

    /// Number of placed blocks in row `y`
    pub fn row_count(&self, y: i32) -> usize {
        if y < 0 || y >= self.height {
            return 0;
        }
        self.row(y as usize).iter().filter(|c| c.is_some()).count()
    }

    fn row(&self, y: usize) -> &[Cell] {
        let w = self.width as usize;
        &self.cells[y * w..(y + 1) * w]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        self.row_count(y) >= self.width as usize
    }

    /// All full rows, bottom to top.
    pub fn full_rows(&self) -> Vec<i32> {
        (0..self.height).rev().filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove full rows and drop everything above them.
    ///
    /// Each surviving block falls by the number of full rows strictly below
    /// its original row, so the result does not depend on the order in which
    /// full rows are visited. After the shift the unsupported-block settle
    /// runs on the result.
    pub fn process_line_clear(&mut self) -> LineClear {
        let rows = self.clear_full_rows();
        if rows.is_empty() {
            return LineClear::default();
        }
        let settle_passes = self.settle_unsupported();
        LineClear {
            rows,
            settle_passes,
        }
    }

    /// Clear all full rows and return their indices (bottom to top).
    /// Two-pointer compaction, scanning from the floor upward.
    pub fn clear_full_rows(&mut self) -> Vec<i32> {
        let mut cleared = Vec::new();
        let width = self.width as usize;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y as i32) {
                cleared.push(read_y as i32);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    self.cells.copy_within(src..src + width, write_y * width);
                }
            }
        }

        // Rows vacated at the top.
        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Let floating blocks fall, one row per pass, until nothing can move.
    ///
    /// A pass stops the loop immediately when any block sits in the bottom two
    /// rows (y >= height - 2). Otherwise every block whose cell below is empty
    /// (judged on the occupancy at the start of the pass) moves down one row,
    /// all at once, so no block can slide into a cell vacated in the same pass.
    ///
    /// Returns the number of passes that moved something.
    pub fn settle_unsupported(&mut self) -> u32 {
        let width = self.width as usize;
        let guard_row = self.height - 2;
        let mut passes = 0;
        let mut movable: Vec<usize> = Vec::new();

        loop {
            if self.occupied_at_or_below(guard_row) {
                break;
            }

            movable.clear();
            for (i, cell) in self.cells.iter().enumerate() {
                if cell.is_none() {
                    continue;
                }
                let below = i + width;
                if below < self.cells.len() && self.cells[below].is_none() {
                    movable.push(i);
                }
            }

            if movable.is_empty() {
                break;
            }

            // Every target was empty at the start of the pass.
            for &i in movable.iter().rev() {
                self.cells[i + width] = self.cells[i].take();
            }
            passes += 1;
        }

        passes
    }

    /// Whether any block sits at row `y` or lower.
    fn occupied_at_or_below(&self, y: i32) -> bool {
        let start = (y.max(0) as usize) * self.width as usize;
        self.cells
            .get(start..)
            .map_or(false, |rest| rest.iter().any(|c| c.is_some()))
    }

    /// Placed blocks in row-major order.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        let w = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|color| Block {
                pos: Position::new((i % w) as i32, (i / w) as i32),
                color,
            })
        })
    }

    /// Number of placed blocks.
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty the field
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use proptest::prelude::*;

    fn piece(offsets: &[(i32, i32)], x: i32, y: i32) -> Polyomino {
        Polyomino::from_offsets(offsets, Color::Green, Position::new(x, y))
    }

    fn fill_row(field: &mut Field, y: i32) {
        for x in 0..field.width() {
            field.set(x, y, Some(Color::Red));
        }
    }

    #[test]
    fn test_index_calculation() {
        let field = Field::new(4, 6);
        assert_eq!(field.index(0, 0), Some(0));
        assert_eq!(field.index(3, 0), Some(3));
        assert_eq!(field.index(0, 1), Some(4));
        assert_eq!(field.index(3, 5), Some(23));
        assert_eq!(field.index(-1, 0), None);
        assert_eq!(field.index(4, 0), None);
        assert_eq!(field.index(0, 6), None);
        assert_eq!(field.index(0, -1), None);
    }

    #[test]
    fn test_classify_walls_and_open_top() {
        let field = Field::new(4, 6);

        assert_eq!(field.classify(&piece(&[(0, 0)], -1, 2)), Collision::Wall);
        assert_eq!(field.classify(&piece(&[(0, 0)], 4, 2)), Collision::Wall);
        assert_eq!(field.classify(&piece(&[(0, 0)], 1, 6)), Collision::Wall);
        // Above the field is free space.
        assert_eq!(field.classify(&piece(&[(0, 0)], 1, -3)), Collision::None);
        assert_eq!(field.classify(&piece(&[(0, 0)], 1, 5)), Collision::None);
    }

    #[test]
    fn test_classify_block_and_first_offender_wins() {
        let mut field = Field::new(4, 6);
        field.set(1, 3, Some(Color::Blue));

        assert_eq!(field.classify(&piece(&[(0, 0)], 1, 3)), Collision::Block);
        // First block hits the placed block, second is past the right wall.
        assert_eq!(
            field.classify(&piece(&[(0, 0), (3, 0)], 1, 3)),
            Collision::Block
        );
        // Reversed order: the wall is found first.
        let p = piece(&[(3, 0), (0, 0)], 1, 3);
        assert_eq!(field.classify(&p), Collision::Wall);
        assert!(field.overlaps_placed(&p));
        assert!(!field.overlaps_placed(&piece(&[(0, 0)], 2, 3)));
    }

    #[test]
    fn test_classify_offset_and_can_fall() {
        let mut field = Field::new(4, 6);
        let p = piece(&[(0, 0), (1, 0)], 0, 4);
        assert!(field.can_fall(&p));
        field.set(1, 5, Some(Color::Blue));
        assert!(!field.can_fall(&p));
        assert_eq!(field.classify_offset(&p, 0, 1), Collision::Block);

        let floor = piece(&[(0, 0)], 2, 5);
        assert_eq!(field.classify_offset(&floor, 0, 1), Collision::Wall);
    }

    #[test]
    fn test_lock_skips_blocks_above_top() {
        let mut field = Field::new(4, 6);
        let p = piece(&[(0, 0), (0, 1), (0, 2)], 2, -1);
        let outcome = field.lock(&p);

        assert_eq!(outcome.placed, 2);
        assert!(outcome.topped_out);
        assert!(field.is_occupied(2, 0));
        assert!(field.is_occupied(2, 1));
        assert_eq!(field.block_count(), 2);
    }

    #[test]
    fn test_single_row_clear_shifts_blocks_above() {
        let mut field = Field::new(4, 8);
        fill_row(&mut field, 5);
        field.set(0, 4, Some(Color::Cyan));
        field.set(2, 6, Some(Color::Cyan));
        field.set(3, 7, Some(Color::Cyan));

        let before = field.block_count();
        let clear = field.process_line_clear();

        assert_eq!(clear.rows, vec![5]);
        assert_eq!(field.block_count(), before - 4);
        assert!(field.is_occupied(0, 5));
        assert!(!field.is_occupied(0, 4));
        // Blocks below the cleared row stay put.
        assert!(field.is_occupied(2, 6));
        assert!(field.is_occupied(3, 7));
        // The guard trips on the bottom rows, so no settle passes run.
        assert_eq!(clear.settle_passes, 0);
    }

    #[test]
    fn test_multi_row_clear_cascades() {
        let mut field = Field::new(3, 10);
        fill_row(&mut field, 9);
        field.set(1, 8, Some(Color::Red));
        fill_row(&mut field, 7);
        fill_row(&mut field, 6);
        field.set(2, 5, Some(Color::Red));

        let clear = field.process_line_clear();
        assert_eq!(clear.rows, vec![9, 7, 6]);

        // (1,8) had one full row below it, (2,5) had three.
        assert!(field.is_occupied(1, 9));
        assert!(field.is_occupied(2, 8));
        assert_eq!(field.block_count(), 2);
    }

    #[test]
    fn test_no_full_rows_is_noop() {
        let mut field = Field::new(4, 6);
        field.set(0, 2, Some(Color::Red));
        let before = field.clone();

        let clear = field.process_line_clear();
        assert_eq!(clear, LineClear::default());
        assert_eq!(field, before);
    }

    #[test]
    fn test_settle_guard_trips_at_height_minus_two() {
        let mut field = Field::new(4, 10);
        field.set(0, 8, Some(Color::Red)); // height - 2
        field.set(2, 3, Some(Color::Red)); // floating

        assert_eq!(field.settle_unsupported(), 0);
        assert!(field.is_occupied(2, 3));
    }

    #[test]
    fn test_settle_runs_at_height_minus_three() {
        let mut field = Field::new(4, 10);
        field.set(0, 7, Some(Color::Red)); // height - 3

        // One pass moves it to height - 2, then the guard stops the loop.
        assert_eq!(field.settle_unsupported(), 1);
        assert!(field.is_occupied(0, 8));
        assert!(!field.is_occupied(0, 7));
    }

    #[test]
    fn test_settle_moves_movers_simultaneously() {
        let mut field = Field::new(4, 10);
        // A floating column of two: only the bottom one has an empty cell below
        // at the start of the first pass.
        field.set(1, 2, Some(Color::Red));
        field.set(1, 3, Some(Color::Blue));

        let passes = field.settle_unsupported();
        // The lower block reaches height - 2 after five passes.
        assert_eq!(passes, 5);
        assert_eq!(field.get(1, 8), Some(Some(Color::Blue)));
        assert_eq!(field.block_count(), 2);
        // The upper block started one pass late and trails by a gap.
        assert_eq!(field.get(1, 6), Some(Some(Color::Red)));
    }

    #[test]
    fn test_settle_empty_field() {
        let mut field = Field::new(4, 10);
        assert_eq!(field.settle_unsupported(), 0);
    }

    #[test]
    fn test_blocks_iterator_is_absolute() {
        let mut field = Field::new(4, 6);
        field.set(3, 5, Some(Color::White));
        let blocks: Vec<_> = field.blocks().collect();
        assert_eq!(blocks, vec![Block::new(3, 5, Color::White)]);
    }

    proptest! {
        #[test]
        fn settle_never_overlaps_or_loses_blocks(
            cells in proptest::collection::vec((0i32..6, 0i32..12), 0..30)
        ) {
            let mut field = Field::new(6, 12);
            for (x, y) in cells {
                field.set(x, y, Some(Color::Magenta));
            }
            let before = field.block_count();
            let passes = field.settle_unsupported();

            // The grid cannot hold two blocks in one cell, so a stable count
            // means nothing was merged or dropped.
            prop_assert_eq!(field.block_count(), before);
            prop_assert!(passes <= field.height() as u32);
        }

        #[test]
        fn clearing_one_full_row_removes_exactly_width(
            extra in proptest::collection::vec((0i32..5, 0i32..7), 0..12)
        ) {
            let mut field = Field::new(5, 12);
            for (x, y) in extra {
                field.set(x, y, Some(Color::Yellow));
            }
            fill_row(&mut field, 7);
            // A floor block keeps the settle guard engaged.
            field.set(0, 11, Some(Color::Blue));
            let above: Vec<Block> = field.blocks().filter(|b| b.pos.y < 7).collect();
            let before = field.block_count();

            let clear = field.process_line_clear();
            prop_assert_eq!(clear.rows, vec![7]);
            prop_assert_eq!(clear.settle_passes, 0);
            prop_assert_eq!(field.block_count(), before - 5);
            for b in above {
                prop_assert_eq!(field.get(b.pos.x, b.pos.y + 1), Some(Some(b.color)));
            }
            prop_assert!(field.is_occupied(0, 11));
        }
    }
}
