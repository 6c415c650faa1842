//! CNF encoding of placement lists.
//!
//! For N shapes on a board of G cells with T placements in total, four
//! disjoint families of 1-based DIMACS variables are numbered by closed-form
//! arithmetic:
//!
//! - assignment `A(p, s) = G*p + s + 1`: shape p occupies cell s
//! - exclusivity `E(p, s) = G*(N + p) + s + 1`: shape p is the unique
//!   occupant of cell s
//! - position `P(p, i) = 2*G*N + O[p] + i + 1`: shape p sits at its i-th
//!   enumerated placement (`O` are prefix sums of the placement counts)
//! - selection `S(p) = 2*G*N + T + p + 1`: some placement of shape p is
//!   selected
//!
//! Position and exclusivity variables are Tseitin-style witnesses, keeping
//! clause sizes linear in the number of terms they relate. The emitted
//! formula is satisfiable exactly when every shape can be placed and every
//! cell has exactly one occupant.

use std::io::{self, Write};

use log::debug;

use crate::board::Placement;
use crate::{Error, Result};

/// Closed-form variable numbering for one encoding run.
///
/// Construction checks that the total variable count fits both `u64` and a
/// signed DIMACS literal; the accessors themselves are plain arithmetic.
#[derive(Debug, Clone)]
pub struct VarMap {
    num_shapes: u64,
    board_size: u64,
    /// offsets[p] = placements of shapes 0..p; offsets[N] is the total T.
    offsets: Vec<u64>,
    num_vars: u64,
}

impl VarMap {
    pub fn new(board_size: usize, placement_counts: &[usize]) -> Result<Self> {
        let mut offsets = Vec::with_capacity(placement_counts.len() + 1);
        let mut total: u64 = 0;
        offsets.push(0);
        for &count in placement_counts {
            total = total.checked_add(count as u64).ok_or(Error::Overflow)?;
            offsets.push(total);
        }

        let num_shapes = placement_counts.len() as u64;
        let board_size = board_size as u64;
        let per_shape = board_size
            .checked_mul(2)
            .and_then(|v| v.checked_add(1))
            .ok_or(Error::Overflow)?;
        let num_vars = num_shapes
            .checked_mul(per_shape)
            .and_then(|v| v.checked_add(total))
            .ok_or(Error::Overflow)?;
        // literals are emitted as signed integers
        if num_vars > i64::MAX as u64 {
            return Err(Error::Overflow);
        }

        Ok(Self {
            num_shapes,
            board_size,
            offsets,
            num_vars,
        })
    }

    pub fn num_shapes(&self) -> usize {
        self.num_shapes as usize
    }

    pub fn board_size(&self) -> usize {
        self.board_size as usize
    }

    /// T: placements across all shapes.
    pub fn total_placements(&self) -> u64 {
        self.offsets[self.offsets.len() - 1]
    }

    /// Total variable count, `N*(2G + 1) + T`.
    pub fn num_vars(&self) -> u64 {
        self.num_vars
    }

    /// A(p, s): shape `p` occupies board cell `s`.
    pub fn assignment(&self, shape: usize, cell: usize) -> u64 {
        debug_assert!((shape as u64) < self.num_shapes);
        debug_assert!((cell as u64) < self.board_size);
        self.board_size * shape as u64 + cell as u64 + 1
    }

    /// E(p, s): shape `p` is the unique occupant of board cell `s`.
    pub fn exclusivity(&self, shape: usize, cell: usize) -> u64 {
        debug_assert!((shape as u64) < self.num_shapes);
        debug_assert!((cell as u64) < self.board_size);
        self.board_size * (self.num_shapes + shape as u64) + cell as u64 + 1
    }

    /// P(p, i): shape `p` sits at its `i`-th enumerated placement.
    pub fn position(&self, shape: usize, placement: usize) -> u64 {
        debug_assert!(
            (placement as u64) < self.offsets[shape + 1] - self.offsets[shape],
            "placement index out of range"
        );
        2 * self.board_size * self.num_shapes + self.offsets[shape] + placement as u64 + 1
    }

    /// S(p): some placement of shape `p` is selected.
    pub fn selection(&self, shape: usize) -> u64 {
        debug_assert!((shape as u64) < self.num_shapes);
        2 * self.board_size * self.num_shapes + self.total_placements() + shape as u64 + 1
    }

    /// Inverse of [`VarMap::assignment`] over the range `1..=G*N`.
    ///
    /// Returns the (shape, cell) pair a true assignment literal stands for,
    /// or `None` for variables outside the assignment family. This is the
    /// contract result decoders rely on.
    pub fn decode_assignment(&self, id: u64) -> Option<(usize, usize)> {
        if id == 0 || id > self.num_shapes * self.board_size {
            return None;
        }
        let shape = ((id - 1) / self.board_size) as usize;
        let cell = ((id - 1) % self.board_size) as usize;
        Some((shape, cell))
    }
}

/// Owns the placement lists for one encode and streams out the formula.
pub struct Encoder {
    placements: Vec<Vec<Placement>>,
    vars: VarMap,
    num_clauses: u64,
}

impl Encoder {
    /// Validates the placement lists and precomputes both header counts.
    pub fn new(board_size: usize, placements: Vec<Vec<Placement>>) -> Result<Self> {
        let counts: Vec<usize> = placements.iter().map(Vec::len).collect();
        let vars = VarMap::new(board_size, &counts)?;

        for list in &placements {
            for placement in list {
                for &cell in placement {
                    if cell >= board_size {
                        return Err(Error::CellOutOfRange { cell, board_size });
                    }
                }
            }
        }

        let num_clauses = count_clauses(board_size as u64, &placements)?;
        debug!(
            "{} shapes, {} cells, {} placements -> {} vars, {} clauses",
            placements.len(),
            board_size,
            vars.total_placements(),
            vars.num_vars(),
            num_clauses
        );
        Ok(Self {
            placements,
            vars,
            num_clauses,
        })
    }

    /// Enumerates placements for every shape and builds the encoder.
    pub fn from_board(board: &crate::Board, shapes: &[crate::Shape]) -> Result<Self> {
        let placements = shapes
            .iter()
            .map(|shape| board.enumerate_placements(shape))
            .collect();
        Self::new(board.len(), placements)
    }

    pub fn var_map(&self) -> &VarMap {
        &self.vars
    }

    pub fn num_vars(&self) -> u64 {
        self.vars.num_vars()
    }

    /// Total clause count. Computed once from the placement lists; the
    /// emission loop is asserted against it.
    pub fn num_clauses(&self) -> u64 {
        self.num_clauses
    }

    /// Writes the complete DIMACS document: `p cnf <vars> <clauses>`, then
    /// one clause per line, literals space-separated and 0-terminated.
    ///
    /// Clauses stream straight to the sink; the header counts come from the
    /// same arithmetic as the emission loops, which keeps the output valid
    /// without buffering the body.
    pub fn write_dimacs<W: Write>(&self, out: W) -> io::Result<()> {
        let mut out = io::BufWriter::new(out);
        writeln!(out, "p cnf {} {}", self.num_vars(), self.num_clauses)?;

        let vars = &self.vars;
        let num_shapes = self.placements.len();
        let mut emitted: u64 = 0;
        let mut lits: Vec<i64> = Vec::new();

        // Placement consistency per shape: P(p,i) is Tseitin-equivalent to
        // the conjunction of its assignment variables, S(p) to the
        // disjunction of the position variables, and the unit S(p) demands
        // the shape be placed at all.
        for (p, list) in self.placements.iter().enumerate() {
            for (i, placement) in list.iter().enumerate() {
                let x = vars.position(p, i) as i64;
                for &s in placement {
                    write_clause(&mut out, &[-x, vars.assignment(p, s) as i64])?;
                    emitted += 1;
                }
                lits.clear();
                lits.push(x);
                lits.extend(placement.iter().map(|&s| -(vars.assignment(p, s) as i64)));
                write_clause(&mut out, &lits)?;
                emitted += 1;
            }

            let z = vars.selection(p) as i64;
            for i in 0..list.len() {
                write_clause(&mut out, &[z, -(vars.position(p, i) as i64)])?;
                emitted += 1;
            }
            lits.clear();
            lits.push(-z);
            lits.extend((0..list.len()).map(|i| vars.position(p, i) as i64));
            write_clause(&mut out, &lits)?;
            write_clause(&mut out, &[z])?;
            emitted += 2;
        }

        // Exclusivity per cell: E(p,s) is Tseitin-equivalent to "shape p
        // occupies s and no other shape does"; the occupancy clause over all
        // E(.,s) then forces exactly one occupant.
        for s in 0..vars.board_size() {
            for p in 0..num_shapes {
                let e = vars.exclusivity(p, s) as i64;
                for q in 0..num_shapes {
                    let a = vars.assignment(q, s) as i64;
                    write_clause(&mut out, &[-e, if q == p { a } else { -a }])?;
                    emitted += 1;
                }
                lits.clear();
                lits.push(e);
                lits.extend((0..num_shapes).map(|q| {
                    let a = vars.assignment(q, s) as i64;
                    if q == p {
                        -a
                    } else {
                        a
                    }
                }));
                write_clause(&mut out, &lits)?;
                emitted += 1;
            }

            lits.clear();
            lits.extend((0..num_shapes).map(|p| vars.exclusivity(p, s) as i64));
            write_clause(&mut out, &lits)?;
            emitted += 1;
        }

        debug_assert_eq!(
            emitted, self.num_clauses,
            "emitted clause count disagrees with the declared header"
        );
        out.flush()
    }
}

/// Clause total for the emission loops above, with overflow checked.
///
/// Per shape p with T_p placements of S_p cells each: T_p * S_p
/// position-to-assignment implications, T_p converse clauses, T_p selection
/// implications, one selection converse and one unit. Per board cell:
/// N * (N + 1) exclusivity clauses plus one occupancy clause. For uniform
/// shape size S this collapses to `T*(S+2) + 2*N + G*(N^2 + N + 1)`.
fn count_clauses(board_size: u64, placements: &[Vec<Placement>]) -> Result<u64> {
    let n = placements.len() as u64;
    let mut clauses: u64 = 0;
    for list in placements {
        for placement in list {
            clauses = clauses
                .checked_add(placement.len() as u64 + 1)
                .ok_or(Error::Overflow)?;
        }
        clauses = clauses
            .checked_add(list.len() as u64 + 2)
            .ok_or(Error::Overflow)?;
    }
    let per_cell = n
        .checked_mul(n)
        .and_then(|v| v.checked_add(n))
        .and_then(|v| v.checked_add(1))
        .ok_or(Error::Overflow)?;
    board_size
        .checked_mul(per_cell)
        .and_then(|v| v.checked_add(clauses))
        .ok_or(Error::Overflow)
}

fn write_clause<W: Write>(out: &mut W, lits: &[i64]) -> io::Result<()> {
    for lit in lits {
        write!(out, "{} ", lit)?;
    }
    writeln!(out, "0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::pentominoes;
    use crate::shape::Shape;

    fn domino() -> Shape {
        Shape::new(vec![(0, 0), (1, 0)], 2).unwrap()
    }

    /// One domino on a 2x2 board: 4 placements, the smallest non-degenerate
    /// instance.
    fn toy_encoder() -> Encoder {
        let board = Board::rectangle(2, 2);
        Encoder::from_board(&board, &[domino()]).unwrap()
    }

    fn render(encoder: &Encoder) -> String {
        let mut out = Vec::new();
        encoder.write_dimacs(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    /// Parses the header and checks it against the emitted clause lines and
    /// the maximum literal magnitude.
    fn check_header(text: &str) -> (u64, u64) {
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        let fields: Vec<&str> = header.split_whitespace().collect();
        assert_eq!(fields[0], "p");
        assert_eq!(fields[1], "cnf");
        let num_vars: u64 = fields[2].parse().unwrap();
        let num_clauses: u64 = fields[3].parse().unwrap();

        let mut emitted = 0;
        let mut max_literal = 0;
        for line in lines {
            emitted += 1;
            let mut literals: Vec<i64> = line
                .split_whitespace()
                .map(|t| t.parse().unwrap())
                .collect();
            assert_eq!(literals.pop(), Some(0), "clause line not 0-terminated");
            for lit in literals {
                assert_ne!(lit, 0);
                max_literal = max_literal.max(lit.unsigned_abs());
            }
        }
        assert_eq!(emitted, num_clauses);
        assert_eq!(max_literal, num_vars);
        (num_vars, num_clauses)
    }

    #[test]
    fn test_toy_variable_numbering() {
        let encoder = toy_encoder();
        let vars = encoder.var_map();
        assert_eq!(vars.assignment(0, 0), 1);
        assert_eq!(vars.assignment(0, 3), 4);
        assert_eq!(vars.exclusivity(0, 0), 5);
        assert_eq!(vars.exclusivity(0, 3), 8);
        assert_eq!(vars.position(0, 0), 9);
        assert_eq!(vars.position(0, 3), 12);
        assert_eq!(vars.selection(0), 13);
        assert_eq!(vars.num_vars(), 13);
        assert_eq!(encoder.num_clauses(), 30);
    }

    #[test]
    fn test_num_vars_formula() {
        // N=1, G=4, T=3 gives N*(2G+1) + T = 12
        let vars = VarMap::new(4, &[3]).unwrap();
        assert_eq!(vars.num_vars(), 12);
    }

    #[test]
    fn test_variable_families_are_disjoint_and_gapless() {
        let board = Board::rectangle(5, 2);
        let l = pentominoes::by_name("L").unwrap();
        let encoder = Encoder::from_board(&board, &[l.clone(), l]).unwrap();
        let vars = encoder.var_map();
        let (n, g) = (vars.num_shapes(), vars.board_size());

        let mut seen = std::collections::BTreeSet::new();
        for p in 0..n {
            for s in 0..g {
                assert!(seen.insert(vars.assignment(p, s)));
                assert!(seen.insert(vars.exclusivity(p, s)));
            }
            for i in 0..4 {
                assert!(seen.insert(vars.position(p, i)));
            }
            assert!(seen.insert(vars.selection(p)));
        }
        assert_eq!(seen.len() as u64, vars.num_vars());
        assert_eq!(*seen.iter().next().unwrap(), 1);
        assert_eq!(*seen.iter().last().unwrap(), vars.num_vars());
    }

    #[test]
    fn test_header_matches_emission() {
        let encoder = toy_encoder();
        let (num_vars, num_clauses) = check_header(&render(&encoder));
        assert_eq!(num_vars, 13);
        assert_eq!(num_clauses, 30);

        let board = Board::rectangle(5, 2);
        let l = pentominoes::by_name("L").unwrap();
        let encoder = Encoder::from_board(&board, &[l.clone(), l]).unwrap();
        let (num_vars, num_clauses) = check_header(&render(&encoder));
        assert_eq!(num_vars, 50);
        assert_eq!(num_clauses, 130);
    }

    #[test]
    fn test_toy_dimacs_snapshot() {
        insta::assert_snapshot!("toy_dimacs", render(&toy_encoder()));
    }

    #[test]
    fn test_degenerate_empty_board() {
        let encoder = Encoder::new(0, vec![Vec::new(), Vec::new(), Vec::new()]).unwrap();
        // only the selection family survives when G = 0
        assert_eq!(encoder.num_vars(), 3);
        // per shape: one empty converse plus one unit; no exclusivity block
        assert_eq!(encoder.num_clauses(), 6);

        let text = render(&encoder);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("p cnf 3 6"));
        assert_eq!(lines.clone().count(), 6);
    }

    #[test]
    fn test_zero_placement_shape_encodes_a_contradiction() {
        // X cannot fit on 2x2; the formula must still be structurally valid
        let board = Board::rectangle(2, 2);
        let x = pentominoes::by_name("X").unwrap();
        let encoder = Encoder::from_board(&board, &[x]).unwrap();
        assert_eq!(encoder.num_clauses(), 2 + 4 * 3);

        let text = render(&encoder);
        check_header(&text);
        // selection variable is 9: unit Z alongside unit not-Z
        assert!(text.lines().any(|l| l == "-9 0"));
        assert!(text.lines().any(|l| l == "9 0"));
    }

    #[test]
    fn test_decode_assignment_inverts_assignment() {
        let encoder = toy_encoder();
        let vars = encoder.var_map();
        for p in 0..1 {
            for s in 0..4 {
                assert_eq!(vars.decode_assignment(vars.assignment(p, s)), Some((p, s)));
            }
        }
        assert_eq!(vars.decode_assignment(0), None);
        assert_eq!(vars.decode_assignment(5), None); // first exclusivity var
        assert_eq!(vars.decode_assignment(13), None);
    }

    #[test]
    fn test_oversized_input_is_rejected() {
        assert!(matches!(
            VarMap::new(usize::MAX, &[0, 0]),
            Err(Error::Overflow)
        ));
    }

    #[test]
    fn test_full_pentomino_instance_sizes() {
        let board = Board::rectangle(10, 6);
        let encoder = Encoder::from_board(&board, &pentominoes::all()).unwrap();
        assert_eq!(encoder.var_map().total_placements(), 1340);
        assert_eq!(encoder.num_vars(), 2792);
        assert_eq!(encoder.num_clauses(), 18824);
    }
}
