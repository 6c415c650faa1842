//! Planar rotation utilities.
//!
//! A shape on the square grid has four possible orientations: the identity
//! and the three counterclockwise quarter turns. Shapes declare how many of
//! these are generated for them; the transforms themselves are fixed.

use crate::shape::Coord;

/// The four quarter-turn rotations, indexed by rotation count 0..4.
///
/// Index `r` rotates a coordinate by `r * 90` degrees counterclockwise
/// around the origin.
pub const ROTATIONS: [fn(Coord) -> Coord; 4] = [
    |(x, y)| (x, y),   // 0 degrees
    |(x, y)| (-y, x),  // 90 degrees
    |(x, y)| (-x, -y), // 180 degrees
    |(x, y)| (y, -x),  // 270 degrees
];

/// Inverse transforms: `INVERSE_ROTATIONS[r]` undoes `ROTATIONS[r]`.
pub const INVERSE_ROTATIONS: [fn(Coord) -> Coord; 4] = [
    |(x, y)| (x, y),
    |(x, y)| (y, -x),
    |(x, y)| (-x, -y),
    |(x, y)| (-y, x),
];
