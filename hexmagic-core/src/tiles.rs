//! Where every tile currently sits.
//!
//! Tile identity is the 0-based index; the number printed on a tile is
//! `index + 1`.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Hexagon, Layout, Point};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TilePosition {
    InBoard { cell: usize },
    /// Detached; `at` is the top-left of the tile's bounding box.
    Floating { at: Point },
}

impl TilePosition {
    pub fn cell(&self) -> Option<usize> {
        match *self {
            TilePosition::InBoard { cell } => Some(cell),
            TilePosition::Floating { .. } => None,
        }
    }
}

pub fn tile_value(tile: usize) -> u32 {
    tile as u32 + 1
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tiles {
    positions: Vec<TilePosition>,
}

impl Tiles {
    /// Tile `i` on cell `i`.
    pub fn ordered(layout: &Layout) -> Self {
        Tiles {
            positions: (0..layout.cell_count())
                .map(|cell| TilePosition::InBoard { cell })
                .collect(),
        }
    }

    /// Random one-to-one assignment of tiles to cells.
    pub fn shuffled<R: Rng + ?Sized>(layout: &Layout, rng: &mut R) -> Self {
        let mut cells: Vec<usize> = (0..layout.cell_count()).collect();
        cells.shuffle(rng);
        Tiles {
            positions: cells
                .into_iter()
                .map(|cell| TilePosition::InBoard { cell })
                .collect(),
        }
    }

    /// Builds a full board from the value shown on each cell, in cell order.
    pub fn from_values(layout: &Layout, values: &[u32]) -> Result<Self> {
        let n = layout.cell_count();
        if values.len() != n {
            return Err(Error::NotAPermutation(n));
        }
        let mut positions: Vec<Option<TilePosition>> = vec![None; n];
        for (cell, &v) in values.iter().enumerate() {
            let tile = (v as usize).wrapping_sub(1);
            let slot = positions
                .get_mut(tile)
                .ok_or(Error::NotAPermutation(n))?;
            if slot.is_some() {
                return Err(Error::NotAPermutation(n));
            }
            *slot = Some(TilePosition::InBoard { cell });
        }
        Ok(Tiles {
            positions: positions.into_iter().flatten().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[TilePosition] {
        &self.positions
    }

    fn check_tile(&self, tile: usize) -> Result<()> {
        if tile < self.positions.len() {
            Ok(())
        } else {
            Err(Error::TileOutOfRange {
                tile,
                count: self.positions.len(),
            })
        }
    }

    pub fn position(&self, tile: usize) -> Result<TilePosition> {
        self.check_tile(tile)?;
        Ok(self.positions[tile])
    }

    /// Tile sitting on `cell`, if any.
    pub fn occupant(&self, cell: usize) -> Option<usize> {
        self.positions
            .iter()
            .position(|p| p.cell() == Some(cell))
    }

    pub fn value_at(&self, cell: usize) -> Option<u32> {
        self.occupant(cell).map(tile_value)
    }

    /// Value on each cell, `None` where the cell is empty.
    pub fn board_values(&self, layout: &Layout) -> Vec<Option<u32>> {
        let mut out = vec![None; layout.cell_count()];
        for (tile, p) in self.positions.iter().enumerate() {
            if let TilePosition::InBoard { cell } = *p
                && let Some(slot) = out.get_mut(cell)
            {
                *slot = Some(tile_value(tile));
            }
        }
        out
    }

    /// Binds `tile` to an empty cell. Placing a tile on its own cell is a no-op.
    pub fn place(&mut self, layout: &Layout, tile: usize, cell: usize) -> Result<()> {
        self.check_tile(tile)?;
        layout.check_cell(cell)?;
        match self.occupant(cell) {
            Some(other) if other != tile => Err(Error::CellOccupied { cell, tile: other }),
            _ => {
                self.positions[tile] = TilePosition::InBoard { cell };
                Ok(())
            }
        }
    }

    pub fn detach(&mut self, tile: usize, at: Point) -> Result<()> {
        self.check_tile(tile)?;
        self.positions[tile] = TilePosition::Floating { at };
        Ok(())
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_tile(a)?;
        self.check_tile(b)?;
        self.positions.swap(a, b);
        Ok(())
    }

    /// Hit-test polygon of every tile, indexed by tile.
    pub fn polygons(&self, layout: &Layout) -> Result<Vec<Hexagon>> {
        self.positions
            .iter()
            .map(|p| match *p {
                TilePosition::InBoard { cell } => layout.cell_polygon(cell),
                TilePosition::Floating { at } => Ok(layout.hexagon(at)),
            })
            .collect()
    }
}
