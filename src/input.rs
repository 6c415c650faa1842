//! Text-file input for shape and board definitions.
//!
//! Shape file: the first non-empty line is the rotation count, every
//! following line an `x y` offset pair, one of which must be `0 0`.
//! Board file: one `x y` cell per line; list order assigns the dense cell
//! index. Blank lines are skipped in both formats.

use std::fs;
use std::path::{Path, PathBuf};

use crate::board::Board;
use crate::shape::{Coord, Shape};
use crate::{Error, Result};

pub fn read_shape(path: &Path) -> Result<Shape> {
    let text = fs::read_to_string(path)?;
    parse_shape(&text, path)
}

pub fn read_board(path: &Path) -> Result<Board> {
    let text = fs::read_to_string(path)?;
    parse_board(&text, path)
}

/// Reads every file in `dir` as a shape definition, in sorted filename
/// order so shape indices are reproducible across runs.
pub fn read_shape_dir(dir: &Path) -> Result<Vec<Shape>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(Error::NoShapes(dir.display().to_string()));
    }
    paths.iter().map(|path| read_shape(path)).collect()
}

fn parse_shape(text: &str, path: &Path) -> Result<Shape> {
    let mut lines = numbered_lines(text);
    let (line, first) = lines
        .next()
        .ok_or_else(|| parse_error(path, 1, "empty shape file"))?;
    let rotations = first
        .trim()
        .parse()
        .map_err(|_| parse_error(path, line, "expected a rotation count"))?;

    let mut offsets = Vec::new();
    for (line, body) in lines {
        offsets
            .push(parse_pair(body).ok_or_else(|| parse_error(path, line, "expected `x y`"))?);
    }
    Shape::new(offsets, rotations)
}

fn parse_board(text: &str, path: &Path) -> Result<Board> {
    let mut cells = Vec::new();
    for (line, body) in numbered_lines(text) {
        cells.push(parse_pair(body).ok_or_else(|| parse_error(path, line, "expected `x y`"))?);
    }
    Board::new(cells)
}

/// Non-empty lines with their 1-based line numbers.
fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn parse_pair(line: &str) -> Option<Coord> {
    let mut parts = line.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}

fn parse_error(path: &Path, line: usize, message: &str) -> Error {
    Error::Parse {
        path: path.display().to_string(),
        line,
        message: message.to_string(),
    }
}
