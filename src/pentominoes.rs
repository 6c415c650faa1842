//! The twelve standard pentominoes.
//!
//! Offsets are relative to a center cell at (0, 0). Rotation counts follow
//! each piece's rotational symmetry: X looks the same under every quarter
//! turn, I and Z repeat after a half turn, the rest need all four.

use crate::shape::{Coord, Shape};

/// Name, offset table and rotation count per piece, in conventional
/// naming order.
pub const PENTOMINOES: [(&str, &[Coord], usize); 12] = [
    ("F", &[(0, 0), (0, 1), (1, 1), (-1, 0), (0, -1)], 4),
    ("I", &[(-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0)], 2),
    ("L", &[(0, 0), (0, 1), (0, 2), (0, -1), (1, -1)], 4),
    ("N", &[(0, -1), (0, 0), (1, 0), (1, 1), (1, 2)], 4),
    ("P", &[(0, 0), (1, 0), (0, 1), (1, 1), (0, -1)], 4),
    ("T", &[(-1, 0), (0, 0), (1, 0), (0, -1), (0, -2)], 4),
    ("U", &[(-1, 0), (0, 0), (1, 0), (-1, 1), (1, 1)], 4),
    ("V", &[(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)], 4),
    ("W", &[(-1, -1), (0, -1), (0, 0), (1, 0), (1, 1)], 4),
    ("X", &[(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)], 1),
    ("Y", &[(0, -1), (0, 0), (0, 1), (0, 2), (1, 0)], 4),
    ("Z", &[(-1, 1), (0, 1), (0, 0), (0, -1), (1, -1)], 2),
];

/// Builds the full pentomino set as validated shapes, in table order.
pub fn all() -> Vec<Shape> {
    PENTOMINOES
        .iter()
        .map(|&(_, offsets, rotations)| {
            Shape::new(offsets.to_vec(), rotations).expect("pentomino constants are valid")
        })
        .collect()
}

/// Looks up a single pentomino by its conventional letter name.
pub fn by_name(name: &str) -> Option<Shape> {
    PENTOMINOES
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|&(_, offsets, rotations)| {
            Shape::new(offsets.to_vec(), rotations).expect("pentomino constants are valid")
        })
}
