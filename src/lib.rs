//! Pentomino Tiling CNF Encoder Library
//!
//! Encodes "can this set of shapes tile this board" as a DIMACS CNF formula
//! for an external SAT solver: shapes and boards enumerate every legal
//! placement, the encoder numbers four families of Boolean variables by
//! closed-form arithmetic and emits the clauses that make the formula
//! satisfiable exactly when a valid tiling exists. Satisfying assignments
//! map back to tilings through the same numbering contract.

pub mod board;
pub mod decode;
pub mod encoder;
pub mod geometry;
pub mod input;
pub mod pentominoes;
pub mod shape;
pub mod solver;

pub use board::{Board, Placement};
pub use encoder::{Encoder, VarMap};
pub use shape::{Coord, Shape};

/// Errors surfaced by shape/board construction, input parsing, and encoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("shape definition has no (0, 0) center offset")]
    MissingCenter,
    #[error("rotation count must be 1, 2 or 4, got {0}")]
    BadRotationCount(usize),
    #[error("duplicate offset ({0}, {1}) in shape definition")]
    DuplicateOffset(i32, i32),
    #[error("duplicate board cell ({0}, {1})")]
    DuplicateCell(i32, i32),
    #[error("placement references cell {cell} on a board of {board_size} cells")]
    CellOutOfRange { cell: usize, board_size: usize },
    #[error("variable or clause count overflows the encoder's arithmetic")]
    Overflow,
    #[error("cell {cell} assigned to both shape {first} and shape {second}")]
    DoubleAssignment {
        cell: usize,
        first: usize,
        second: usize,
    },
    #[error("{path}:{line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },
    #[error("no shape files found in {0}")]
    NoShapes(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
