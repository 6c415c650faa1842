//! Mapping satisfying assignments back to tilings.
//!
//! A SAT solver that accepts the encoder's formula reports a set of true
//! literals. Only the assignment family matters here: each true A(p, s)
//! literal pins cell `s` to shape `p` through [`VarMap::decode_assignment`].

use crate::board::Board;
use crate::encoder::VarMap;
use crate::{Error, Result};

/// Per-cell shape assignment recovered from a solver's true literals.
///
/// Literals outside the assignment range are ignored. Two shapes claiming
/// the same cell is a contract violation and surfaces as an error.
pub fn decode_tiling(vars: &VarMap, true_literals: &[u64]) -> Result<Vec<Option<usize>>> {
    let mut cells: Vec<Option<usize>> = vec![None; vars.board_size()];
    for &literal in true_literals {
        if let Some((shape, cell)) = vars.decode_assignment(literal) {
            match cells[cell] {
                Some(existing) if existing != shape => {
                    return Err(Error::DoubleAssignment {
                        cell,
                        first: existing,
                        second: shape,
                    });
                }
                _ => cells[cell] = Some(shape),
            }
        }
    }
    Ok(cells)
}

/// Extracts the positive literals from a SAT solver's output.
///
/// Accepts SAT-competition `v` lines as well as bare literal dumps. Comment
/// (`c`), status (`s`) and problem (`p`) lines are skipped; negative
/// literals and the terminating 0 are dropped.
pub fn parse_solver_output(text: &str) -> Vec<u64> {
    let mut literals = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.starts_with('c') || line.starts_with('s') || line.starts_with('p') {
            continue;
        }
        let body = line.strip_prefix('v').unwrap_or(line);
        literals.extend(
            body.split_whitespace()
                .filter_map(|token| token.parse::<i64>().ok())
                .filter(|&value| value > 0)
                .map(|value| value as u64),
        );
    }
    literals
}

/// Renders a decoded tiling as rows of shape numbers, top row first.
///
/// Shape numbers are 1-based, in hex letters past 9; on-board cells with no
/// assignment show as '.', coordinates outside the board as spaces.
pub fn format_tiling(board: &Board, assignment: &[Option<usize>]) -> String {
    let Some(first) = board.cells().first() else {
        return String::new();
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.0, first.0, first.1, first.1);
    for &(x, y) in board.cells() {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let mut output = String::new();
    for y in (min_y..=max_y).rev() {
        for x in min_x..=max_x {
            let glyph = match board.index((x, y)) {
                Some(cell) => match assignment[cell] {
                    Some(shape) => shape_glyph(shape),
                    None => '.',
                },
                None => ' ',
            };
            output.push(glyph);
        }
        output.push('\n');
    }
    output
}

fn shape_glyph(shape: usize) -> char {
    let number = shape + 1;
    if number < 10 {
        char::from(b'0' + number as u8)
    } else if number < 36 {
        char::from(b'A' + (number - 10) as u8)
    } else {
        '?'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use crate::shape::Shape;

    fn domino() -> Shape {
        Shape::new(vec![(0, 0), (1, 0)], 2).unwrap()
    }

    fn two_domino_encoder() -> (Board, Encoder) {
        let board = Board::rectangle(2, 2);
        let encoder = Encoder::from_board(&board, &[domino(), domino()]).unwrap();
        (board, encoder)
    }

    #[test]
    fn test_decode_ignores_non_assignment_literals() {
        let (_, encoder) = two_domino_encoder();
        let vars = encoder.var_map();
        let literals = vec![
            vars.assignment(0, 0),
            vars.assignment(0, 1),
            vars.exclusivity(0, 0),
            vars.position(1, 3),
            vars.selection(1),
        ];
        let tiling = decode_tiling(vars, &literals).unwrap();
        assert_eq!(tiling, vec![Some(0), Some(0), None, None]);
    }

    #[test]
    fn test_decode_rejects_a_doubly_assigned_cell() {
        let (_, encoder) = two_domino_encoder();
        let vars = encoder.var_map();
        let literals = vec![vars.assignment(0, 2), vars.assignment(1, 2)];
        let result = decode_tiling(vars, &literals);
        assert!(matches!(
            result,
            Err(Error::DoubleAssignment {
                cell: 2,
                first: 0,
                second: 1,
            })
        ));
    }

    #[test]
    fn test_decode_roundtrip_from_a_solved_tiling() {
        // solve directly, build the corresponding true literals, decode back
        let (board, encoder) = two_domino_encoder();
        let vars = encoder.var_map();
        let placements: Vec<_> = [domino(), domino()]
            .iter()
            .map(|s| board.enumerate_placements(s))
            .collect();

        let solution = &crate::solver::solve(board.len(), &placements, Some(1))[0];
        let mut literals = Vec::new();
        for (p, &i) in solution.iter().enumerate() {
            literals.push(vars.selection(p));
            literals.push(vars.position(p, i));
            for &cell in &placements[p][i] {
                literals.push(vars.assignment(p, cell));
            }
        }

        let tiling = decode_tiling(vars, &literals).unwrap();
        assert!(tiling.iter().all(Option::is_some));
        for (p, &i) in solution.iter().enumerate() {
            for &cell in &placements[p][i] {
                assert_eq!(tiling[cell], Some(p));
            }
        }
    }

    #[test]
    fn test_parse_competition_style_output() {
        let text = "c kissat exit\ns SATISFIABLE\nv 1 -2 3 0\nv 4 -13\n";
        assert_eq!(parse_solver_output(text), vec![1, 3, 4]);
    }

    #[test]
    fn test_parse_bare_literal_dump() {
        let text = "1 -2\n-3 4 0\n";
        assert_eq!(parse_solver_output(text), vec![1, 4]);
    }

    #[test]
    fn test_format_tiling_rows_top_first() {
        let board = Board::rectangle(2, 2);
        // bottom row shape 1, top row shape 2
        let assignment = vec![Some(0), Some(0), Some(1), Some(1)];
        assert_eq!(format_tiling(&board, &assignment), "22\n11\n");
    }

    #[test]
    fn test_format_tiling_marks_gaps() {
        // L-shaped board with a missing corner
        let board = Board::new(vec![(0, 0), (1, 0), (0, 1)]).unwrap();
        let assignment = vec![Some(0), None, Some(0)];
        assert_eq!(format_tiling(&board, &assignment), "1 \n1.\n");
    }

    #[test]
    fn test_format_empty_board() {
        let board = Board::new(Vec::new()).unwrap();
        assert_eq!(format_tiling(&board, &[]), "");
    }
}
