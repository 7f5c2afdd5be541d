//! Board layout and cell geometry.
//!
//! Cells are pointy-top hexagons of width `W` and height `W`. Rows are spaced
//! `3/4 W` apart so the slanted edges of neighbouring rows interlock. A row's
//! `x_offset` is measured in cell widths; every offset must be a multiple of
//! half a cell so the diagonals line up.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::win::Lines;

/// Width of one cell in pixels.
pub const CELL_WIDTH_PX: f64 = 92.0;
/// Gap between the canvas edge and the board.
pub const BOARD_PADDING_PX: f64 = 10.0;
/// Line sum for the standard 19-cell board.
pub const MAGIC_SUM: u32 = 38;

/// Pixel-space point; y grows downward like the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

/// Six vertices, top vertex first, clockwise on screen.
pub type Hexagon = [Point; 6];

/// One row of the board.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowSpec {
    pub x_offset: f64,
    pub count: usize,
}

/// Serializable board description, as shipped in `board.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub rows: Vec<RowSpec>,
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_target")]
    pub target: u32,
}

fn default_cell_width() -> f64 {
    CELL_WIDTH_PX
}

fn default_padding() -> f64 {
    BOARD_PADDING_PX
}

fn default_target() -> u32 {
    MAGIC_SUM
}

impl Default for LayoutSpec {
    fn default() -> Self {
        LayoutSpec {
            rows: vec![
                RowSpec { x_offset: 1.0, count: 3 },
                RowSpec { x_offset: 0.5, count: 4 },
                RowSpec { x_offset: 0.0, count: 5 },
                RowSpec { x_offset: 0.5, count: 4 },
                RowSpec { x_offset: 1.0, count: 3 },
            ],
            cell_width: CELL_WIDTH_PX,
            padding: BOARD_PADDING_PX,
            target: MAGIC_SUM,
        }
    }
}

/// Validated board layout with its derived lookup tables.
#[derive(Clone, Debug)]
pub struct Layout {
    rows: Vec<RowSpec>,
    cell_width: f64,
    padding: f64,
    target: u32,
    row_starts: Vec<usize>,
    cell_count: usize,
    lines: Lines,
}

impl Layout {
    pub fn new(rows: Vec<RowSpec>, cell_width: f64, padding: f64, target: u32) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::InvalidLayout("board has no rows".into()));
        }
        if !(cell_width.is_finite() && cell_width > 0.0) {
            return Err(Error::InvalidLayout(format!(
                "cell width must be positive, got {}",
                cell_width
            )));
        }
        if !padding.is_finite() {
            return Err(Error::InvalidLayout("padding must be finite".into()));
        }
        for (i, r) in rows.iter().enumerate() {
            if r.count == 0 {
                return Err(Error::InvalidLayout(format!("row {} is empty", i)));
            }
            let halves = r.x_offset * 2.0;
            if !halves.is_finite() || halves.fract() != 0.0 {
                return Err(Error::InvalidLayout(format!(
                    "row {} offset {} is not a multiple of half a cell",
                    i, r.x_offset
                )));
            }
        }

        let mut row_starts = Vec::with_capacity(rows.len());
        let mut acc = 0;
        for r in &rows {
            row_starts.push(acc);
            acc += r.count;
        }
        let lines = Lines::derive(&rows, &row_starts);

        Ok(Layout {
            rows,
            cell_width,
            padding,
            target,
            row_starts,
            cell_count: acc,
            lines,
        })
    }

    /// The classic 3-4-5-4-3 board with target 38.
    pub fn standard() -> Self {
        match Layout::try_from(LayoutSpec::default()) {
            Ok(l) => l,
            Err(e) => unreachable!("standard layout is valid: {}", e),
        }
    }

    pub fn rows(&self) -> &[RowSpec] {
        &self.rows
    }

    pub fn row_starts(&self) -> &[usize] {
        &self.row_starts
    }

    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn lines(&self) -> &Lines {
        &self.lines
    }

    /// Canvas size needed to show the whole board with padding on every side.
    pub fn canvas_size(&self) -> (f64, f64) {
        let widest = self
            .rows
            .iter()
            .map(|r| r.x_offset + r.count as f64)
            .fold(0.0, f64::max);
        let w = widest * self.cell_width + 2.0 * self.padding;
        let h = self.cell_width * (0.75 * (self.rows.len() - 1) as f64 + 1.0) + 2.0 * self.padding;
        (w, h)
    }

    pub fn check_cell(&self, cell: usize) -> Result<()> {
        if cell < self.cell_count {
            Ok(())
        } else {
            Err(Error::CellOutOfRange {
                cell,
                count: self.cell_count,
            })
        }
    }

    pub fn cell_to_row_col(&self, cell: usize) -> Result<(usize, usize)> {
        self.check_cell(cell)?;
        // row_starts is sorted and starts at 0, so the partition point is >= 1.
        let row = self.row_starts.partition_point(|&s| s <= cell) - 1;
        Ok((row, cell - self.row_starts[row]))
    }

    pub fn row_col_to_cell(&self, row: usize, col: usize) -> Result<usize> {
        match self.rows.get(row) {
            Some(r) if col < r.count => Ok(self.row_starts[row] + col),
            _ => Err(Error::RowColOutOfRange { row, col }),
        }
    }

    /// Top-left corner of the bounding box of the cell at `(row, col)`.
    pub fn cell_origin(&self, row: usize, col: usize) -> Result<Point> {
        let r = match self.rows.get(row) {
            Some(r) if col < r.count => r,
            _ => return Err(Error::RowColOutOfRange { row, col }),
        };
        Ok(Point {
            x: self.cell_width * (r.x_offset + col as f64) + self.padding,
            y: 0.75 * self.cell_width * row as f64 + self.padding,
        })
    }

    pub fn hexagon(&self, origin: Point) -> Hexagon {
        hexagon(origin, self.cell_width)
    }

    /// Origin that centres a cell-sized hexagon on `p`.
    pub fn centered_origin(&self, p: Point) -> Point {
        let half = self.cell_width / 2.0;
        p.offset(-half, -half)
    }

    pub fn cell_polygon(&self, cell: usize) -> Result<Hexagon> {
        let (row, col) = self.cell_to_row_col(cell)?;
        Ok(self.hexagon(self.cell_origin(row, col)?))
    }

    pub fn cell_polygons(&self) -> Vec<Hexagon> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, r)| (0..r.count).map(move |col| (row, col)))
            .filter_map(|(row, col)| self.cell_origin(row, col).ok())
            .map(|origin| self.hexagon(origin))
            .collect()
    }
}

impl TryFrom<LayoutSpec> for Layout {
    type Error = Error;

    fn try_from(spec: LayoutSpec) -> Result<Self> {
        Layout::new(spec.rows, spec.cell_width, spec.padding, spec.target)
    }
}

/// Pointy-top hexagon of width `w` whose bounding box starts at `origin`.
pub fn hexagon(origin: Point, w: f64) -> Hexagon {
    let Point { x, y } = origin;
    [
        Point::new(x + w / 2.0, y),
        Point::new(x + w, y + w / 4.0),
        Point::new(x + w, y + 3.0 * w / 4.0),
        Point::new(x + w / 2.0, y + w),
        Point::new(x, y + 3.0 * w / 4.0),
        Point::new(x, y + w / 4.0),
    ]
}

/// Mean of the vertices; used to place numerals.
pub fn centroid(poly: &[Point]) -> Point {
    let n = poly.len().max(1) as f64;
    let sum = poly
        .iter()
        .fold(Point::default(), |acc, q| acc.offset(q.x, q.y));
    Point {
        x: sum.x / n,
        y: sum.y / n,
    }
}
