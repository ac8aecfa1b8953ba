//! Board geometry and cell occupancy
//!
//! Cells are addressed in pixels (multiples of the cell size), matching what
//! the renderer draws. The occupancy grid is stored column-major so that a
//! linear scan walks down each column before moving right.

use glam::IVec2;
use rand::Rng;

/// A grid-aligned position in pixels
pub type Cell = IVec2;

/// Square playfield with an incrementally maintained occupancy grid
#[derive(Debug, Clone)]
pub struct Board {
    cols: i32,
    rows: i32,
    cell_size: i32,
    occupied: Vec<bool>,
    /// Number of `true` entries in `occupied`
    filled: usize,
}

impl Board {
    pub fn new(cells: u32, cell_size: u32) -> Self {
        let cols = cells as i32;
        let rows = cells as i32;
        Self {
            cols,
            rows,
            cell_size: cell_size as i32,
            occupied: vec![false; (cols * rows) as usize],
            filled: 0,
        }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Board width in pixels
    pub fn width(&self) -> i32 {
        self.cols * self.cell_size
    }

    /// Board height in pixels
    pub fn height(&self) -> i32 {
        self.rows * self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.occupied.len()
    }

    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn is_full(&self) -> bool {
        self.filled >= self.cell_count()
    }

    /// Cell at (column, row)
    pub fn cell(&self, col: i32, row: i32) -> Cell {
        IVec2::new(col * self.cell_size, row * self.cell_size)
    }

    /// Parking spot for food once the board is full
    pub fn off_board(&self) -> Cell {
        IVec2::splat(-self.cell_size)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width() && cell.y < self.height()
    }

    /// Linear index of a cell, `None` when off the board or not grid-aligned
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) || cell.x % self.cell_size != 0 || cell.y % self.cell_size != 0 {
            return None;
        }
        let col = cell.x / self.cell_size;
        let row = cell.y / self.cell_size;
        Some((col * self.rows + row) as usize)
    }

    pub fn cell_at(&self, index: usize) -> Cell {
        let index = index as i32;
        self.cell(index / self.rows, index % self.rows)
    }

    /// Bring a cell that stepped past an edge back in from the opposite edge
    pub fn wrap(&self, cell: Cell) -> Cell {
        IVec2::new(
            cell.x.rem_euclid(self.width()),
            cell.y.rem_euclid(self.height()),
        )
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.index_of(cell).is_some_and(|i| self.occupied[i])
    }

    pub fn occupy(&mut self, cell: Cell) {
        if let Some(i) = self.index_of(cell) {
            if !self.occupied[i] {
                self.occupied[i] = true;
                self.filled += 1;
            }
        }
    }

    pub fn vacate(&mut self, cell: Cell) {
        if let Some(i) = self.index_of(cell) {
            if self.occupied[i] {
                self.occupied[i] = false;
                self.filled -= 1;
            }
        }
    }

    pub fn clear(&mut self) {
        self.occupied.fill(false);
        self.filled = 0;
    }

    /// Pick a free cell for food
    ///
    /// Starts at a random linear index and scans forward, wrapping at the end
    /// of the grid. Returns `None` when every cell is occupied.
    pub fn place_food<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        let total = self.cell_count();
        if self.is_full() {
            return None;
        }
        let start = rng.random_range(0..total);
        (0..total)
            .map(|step| (start + step) % total)
            .find(|&i| !self.occupied[i])
            .map(|i| self.cell_at(i))
    }
}
