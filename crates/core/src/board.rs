//! Board module - manages the playing field
//!
//! The field is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that locked there. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! Collision treats everything above the top as open space: pieces spawn and
//! rotate with blocks at negative rows. Only the side walls, the floor and
//! occupied cells block.

use arrayvec::ArrayVec;

use crate::pieces::PieceShape;
use crate::types::{Cell, PieceKind, Position, FIELD_HEIGHT, FIELD_SIZE, FIELD_WIDTH};

const WIDTH: usize = FIELD_WIDTH as usize;
const HEIGHT: usize = FIELD_HEIGHT as usize;

/// Sizes of the clear runs found by one scan, in scan order (bottom to top)
pub type ClearRuns = ArrayVec<u8, HEIGHT>;

/// The playing field - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; FIELD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; FIELD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= FIELD_WIDTH as i8 || y < 0 || y >= FIELD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        FIELD_WIDTH
    }

    pub fn height(&self) -> u8 {
        FIELD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Cell value at (x, y): 0 for empty, `kind index + 1` for occupied.
    /// Out of bounds reads as 0.
    pub fn value(&self, x: i8, y: i8) -> u8 {
        match self.get(x, y) {
            Some(Some(kind)) => kind.cell_value(),
            _ => 0,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a single cell collides
    ///
    /// True past either side wall, below the floor, or on an occupied cell.
    /// Rows above the top never collide on their own.
    #[inline]
    pub fn collides(&self, pos: Position) -> bool {
        if pos.x < 0 || pos.x >= FIELD_WIDTH as i8 || pos.y >= FIELD_HEIGHT as i8 {
            return true;
        }
        if pos.y < 0 {
            return false;
        }
        self.is_occupied(pos.x, pos.y)
    }

    /// Check whether any block of `shape` pivoted at `pos` collides
    pub fn shape_collides(&self, shape: &PieceShape, pos: Position) -> bool {
        shape
            .iter()
            .any(|&(dx, dy)| self.collides(pos.offset(dx, dy)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Write a piece's blocks into the field
    ///
    /// Blocks above the top row have nowhere to go and are dropped.
    /// Returns false if any block was dropped.
    pub fn lock_piece(&mut self, shape: &PieceShape, pos: Position, kind: PieceKind) -> bool {
        let mut all_inside = true;
        for &(dx, dy) in shape {
            let cell = pos.offset(dx, dy);
            if !self.set(cell.x, cell.y, Some(kind)) {
                all_inside = false;
            }
        }
        all_inside
    }

    /// Move rows `0..=bottom` down by `count` rows and empty the `count` rows at the top
    ///
    /// Whatever sat in rows `bottom+1 ..= bottom+count` is overwritten.
    fn shift_down(&mut self, bottom: usize, count: usize) {
        debug_assert!(bottom + count < HEIGHT);
        // copy_within handles the overlapping ranges
        self.cells
            .copy_within(0..(bottom + 1) * WIDTH, count * WIDTH);
        self.clear_top(count);
    }

    fn clear_top(&mut self, rows: usize) {
        for cell in &mut self.cells[..rows * WIDTH] {
            *cell = None;
        }
    }

    /// Remove every full row, grouping contiguous full rows into runs
    ///
    /// Scans bottom to top counting consecutive full rows. When the scan meets a
    /// non-full row after a run, everything from that row up shifts down by the run
    /// length and the scan resumes at the row just examined (now `run` rows lower).
    /// A run reaching the top row is flushed when the scan runs out.
    ///
    /// Returns the run sizes in the order they were flushed. Rows 5 and 3 full
    /// with row 4 open yields `[1, 1]`; rows 5, 4 and 3 full yields `[3]`.
    pub fn clear_full_rows(&mut self) -> ClearRuns {
        let mut runs = ClearRuns::new();
        let mut run = 0usize;
        let mut y = HEIGHT as isize - 1;

        while y >= 0 {
            let row = y as usize;
            if self.is_row_full(row) {
                run += 1;
                y -= 1;
                continue;
            }
            if run > 0 {
                self.shift_down(row, run);
                runs.push(run as u8);
                // The examined row now sits `run` rows lower; the next one up follows it.
                y += run as isize;
                run = 0;
            }
            y -= 1;
        }

        if run > 0 {
            // Rows 0..run are the run itself; nothing sits above it.
            self.clear_top(run);
            runs.push(run as u8);
        }

        runs
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the field into a row-major grid of cell values (0 empty, 1..=7 occupied)
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * WIDTH;
            for (x, value) in row.iter_mut().enumerate() {
                *value = self.cells[start + x].map_or(0, PieceKind::cell_value);
            }
        }
    }

    /// Fill a whole row with one kind
    pub fn fill_row(&mut self, y: usize, kind: PieceKind) {
        if y >= HEIGHT {
            return;
        }
        for cell in &mut self.cells[y * WIDTH..(y + 1) * WIDTH] {
            *cell = Some(kind);
        }
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; FIELD_SIZE];
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), HEIGHT);
        assert!(cells_2d.iter().all(|row| row.len() == WIDTH));

        let mut flat = [None; FIELD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * WIDTH + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        (0..HEIGHT)
            .map(|y| self.cells[y * WIDTH..(y + 1) * WIDTH].to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
