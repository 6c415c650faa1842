//! Board representation and placement enumeration.
//!
//! A board is a finite set of addressable cells. Each cell gets a dense
//! index in definition order; the cell list is the reverse map and the
//! forward map is a hash lookup. Placement enumeration is the only hot
//! path and the implicit source of the placement indices the encoder
//! numbers its position variables against.

use log::debug;
use rustc_hash::FxHashMap;

use crate::shape::{Coord, Shape};
use crate::{Error, Result};

/// One legal placement: the board-cell indices a shape covers, in the
/// shape's offset order.
pub type Placement = Vec<usize>;

/// The set of admissible cells, indexed 0..G-1.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Vec<Coord>,
    index: FxHashMap<Coord, usize>,
}

impl Board {
    /// Builds a board from a cell list; list position becomes the cell index.
    ///
    /// Duplicate coordinates are rejected: they would leave a gap in the
    /// dense index range.
    pub fn new(cells: Vec<Coord>) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (i, &(x, y)) in cells.iter().enumerate() {
            if index.insert((x, y), i).is_some() {
                return Err(Error::DuplicateCell(x, y));
            }
        }
        Ok(Self { cells, index })
    }

    /// A width x height rectangle with cells in row-major order.
    pub fn rectangle(width: i32, height: i32) -> Self {
        let cells: Vec<Coord> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .collect();
        let index = cells.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { cells, index }
    }

    /// Number of cells on the board.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The coordinate at a dense index. Inverse of [`Board::index`].
    pub fn coord(&self, index: usize) -> Coord {
        self.cells[index]
    }

    /// The dense index of a coordinate, if it is on the board.
    pub fn index(&self, cell: Coord) -> Option<usize> {
        self.index.get(&cell).copied()
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// True iff every coordinate lies on the board.
    pub fn contains_all(&self, cells: &[Coord]) -> bool {
        cells.iter().all(|cell| self.index.contains_key(cell))
    }

    /// Every (center, rotation) placement of `shape` that fits entirely on
    /// the board, as cell-index lists.
    ///
    /// Enumeration order is fixed: board cells in index order on the
    /// outside, rotations 0..R on the inside. The list position is the
    /// placement index used by the encoder's position variables.
    pub fn enumerate_placements(&self, shape: &Shape) -> Vec<Placement> {
        let mut placements = Vec::new();
        for &center in &self.cells {
            for rotation in 0..shape.rotations() {
                if let Some(indices) = self.to_indices(&shape.positions(center, rotation)) {
                    placements.push(indices);
                }
            }
        }
        debug!(
            "{} placements for a {}-cell shape on {} board cells",
            placements.len(),
            shape.size(),
            self.cells.len()
        );
        placements
    }

    fn to_indices(&self, cells: &[Coord]) -> Option<Placement> {
        cells.iter().map(|cell| self.index(*cell)).collect()
    }
}
