//! Shape definitions: relative cell offsets plus a rotation count.
//!
//! A shape is an ordered list of coordinate offsets around a designated
//! center cell at (0, 0). The rotation count says how many of the four
//! canonical orientations are generated when the shape is placed; it is a
//! generation count, not a symmetry deduplication step.

use crate::geometry::ROTATIONS;
use crate::{Error, Result};

/// A cell position on the square grid.
pub type Coord = (i32, i32);

/// An immutable polyomino-like shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    offsets: Vec<Coord>,
    rotations: usize,
}

impl Shape {
    /// Validates and builds a shape.
    ///
    /// The offsets must include the (0, 0) center and contain no duplicates;
    /// the rotation count must be 1, 2 or 4.
    pub fn new(offsets: Vec<Coord>, rotations: usize) -> Result<Self> {
        if !matches!(rotations, 1 | 2 | 4) {
            return Err(Error::BadRotationCount(rotations));
        }
        if !offsets.contains(&(0, 0)) {
            return Err(Error::MissingCenter);
        }
        for (i, &(x, y)) in offsets.iter().enumerate() {
            if offsets[..i].contains(&(x, y)) {
                return Err(Error::DuplicateOffset(x, y));
            }
        }
        Ok(Self { offsets, rotations })
    }

    /// Number of cells the shape occupies.
    pub fn size(&self) -> usize {
        self.offsets.len()
    }

    /// Number of orientations generated for this shape.
    pub fn rotations(&self) -> usize {
        self.rotations
    }

    pub fn offsets(&self) -> &[Coord] {
        &self.offsets
    }

    /// Absolute cell coordinates with the center placed at `center`, under
    /// the given rotation index. Offsets keep their definition order.
    pub fn positions(&self, center: Coord, rotation: usize) -> Vec<Coord> {
        debug_assert!(rotation < self.rotations, "rotation index out of range");
        let rotate = ROTATIONS[rotation];
        self.offsets
            .iter()
            .map(|&offset| {
                let (dx, dy) = rotate(offset);
                (center.0 + dx, center.1 + dy)
            })
            .collect()
    }

    /// All generated orientations at `center`, tagged with their rotation index.
    pub fn all_positions(&self, center: Coord) -> Vec<(usize, Vec<Coord>)> {
        (0..self.rotations)
            .map(|rotation| (rotation, self.positions(center, rotation)))
            .collect()
    }
}
