//! Row and diagonal sums.
//!
//! A row qualifies when its own sum and the sums of the two diagonals
//! anchored at it all hit the target. The board is solved when every row
//! qualifies. Only tiles bound to a cell count towards a sum.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::geometry::{Layout, RowSpec};
use crate::tiles::Tiles;

/// Cell membership of every line on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lines {
    /// One line per row.
    pub rows: Vec<Vec<usize>>,
    /// Lines running down and to the right, ordered left to right.
    pub falling: Vec<Vec<usize>>,
    /// Lines running down and to the left, ordered left to right.
    pub rising: Vec<Vec<usize>>,
}

impl Lines {
    pub(crate) fn derive(rows: &[RowSpec], row_starts: &[usize]) -> Self {
        let mut row_lines: Vec<Vec<usize>> = Vec::with_capacity(rows.len());
        let mut falling: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        let mut rising: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for (row, (r, &start)) in rows.iter().zip(row_starts).enumerate() {
            row_lines.push((start..start + r.count).collect());
            for col in 0..r.count {
                // horizontal position in half-cell units
                let hx = (2.0 * (r.x_offset + col as f64)).round() as i64;
                let row = row as i64;
                falling.entry(hx - row).or_default().push(start + col);
                rising.entry(hx + row).or_default().push(start + col);
            }
        }
        Lines {
            rows: row_lines,
            falling: falling.into_values().collect(),
            rising: rising.into_values().collect(),
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &Vec<usize>> {
        self.rows.iter().chain(&self.falling).chain(&self.rising)
    }
}

/// Result of scoring the current board.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Verdict {
    pub row_sums: Vec<u32>,
    pub falling_sums: Vec<u32>,
    pub rising_sums: Vec<u32>,
    pub rows_qualified: Vec<bool>,
    /// Tiles lying on at least one line that already sums to the target.
    pub satisfied_tiles: Vec<bool>,
    pub won: bool,
}

impl Verdict {
    pub fn qualified_rows(&self) -> usize {
        self.rows_qualified.iter().filter(|q| **q).count()
    }
}

fn line_sum(line: &[usize], values: &[Option<u32>]) -> u32 {
    line.iter()
        .filter_map(|&cell| values.get(cell).copied().flatten())
        .sum()
}

fn family_sums(family: &[Vec<usize>], values: &[Option<u32>]) -> Vec<u32> {
    family.iter().map(|l| line_sum(l, values)).collect()
}

pub fn evaluate(layout: &Layout, tiles: &Tiles) -> Verdict {
    let lines = layout.lines();
    let target = layout.target();
    let values = tiles.board_values(layout);

    let row_sums = family_sums(&lines.rows, &values);
    let falling_sums = family_sums(&lines.falling, &values);
    let rising_sums = family_sums(&lines.rising, &values);

    // a row without an anchored diagonal only needs its own sum
    let hits = |sums: &Vec<u32>, i: usize| sums.get(i).is_none_or(|s| *s == target);
    let rows_qualified: Vec<bool> = (0..row_sums.len())
        .map(|i| row_sums[i] == target && hits(&falling_sums, i) && hits(&rising_sums, i))
        .collect();
    let won = rows_qualified.iter().all(|q| *q)
        && falling_sums.iter().chain(&rising_sums).all(|s| *s == target);

    let mut satisfied_tiles = vec![false; tiles.len()];
    let all_sums = row_sums.iter().chain(&falling_sums).chain(&rising_sums);
    for (line, &sum) in lines.all().zip(all_sums) {
        if sum != target {
            continue;
        }
        for &cell in line {
            if let Some(tile) = tiles.occupant(cell)
                && let Some(flag) = satisfied_tiles.get_mut(tile)
            {
                *flag = true;
            }
        }
    }

    Verdict {
        row_sums,
        falling_sums,
        rising_sums,
        rows_qualified,
        satisfied_tiles,
        won,
    }
}
