//! Pointer gestures to tile moves.

use rand::Rng;

use crate::error::{Error, Result};
use crate::geometry::{Hexagon, Layout, Point};
use crate::hit::resolve_hit;
use crate::scene::{Renderer, Scene, TileSprite};
use crate::tiles::{Tiles, tile_value};
use crate::win::{Verdict, evaluate};

/// What a pointer event did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Ignored,
    Selected { tile: usize },
    /// Pointer moved with a tile selected; `at` is the pointer.
    Dragging { tile: usize, at: Point },
    Deselected { tile: usize },
    Placed { tile: usize, cell: usize },
    Detached { tile: usize, at: Point },
    Swapped { tile: usize, other: usize },
}

impl Outcome {
    pub fn is_mutation(&self) -> bool {
        match self {
            Outcome::Placed { .. } | Outcome::Detached { .. } | Outcome::Swapped { .. } => true,
            Outcome::Ignored
            | Outcome::Selected { .. }
            | Outcome::Dragging { .. }
            | Outcome::Deselected { .. } => false,
        }
    }
}

/// Owns the game state and the hit-test caches derived from it.
#[derive(Clone, Debug)]
pub struct Controller {
    layout: Layout,
    tiles: Tiles,
    selected: Option<usize>,
    cell_polygons: Vec<Hexagon>,
    tile_polygons: Vec<Hexagon>,
    verdict: Verdict,
    hints: bool,
}

impl Controller {
    pub fn new(layout: Layout, tiles: Tiles) -> Result<Self> {
        if tiles.len() != layout.cell_count() {
            return Err(Error::NotAPermutation(layout.cell_count()));
        }
        let mut c = Controller {
            cell_polygons: layout.cell_polygons(),
            tile_polygons: Vec::new(),
            verdict: Verdict::default(),
            layout,
            tiles,
            selected: None,
            hints: false,
        };
        c.refresh()?;
        Ok(c)
    }

    pub fn shuffled<R: Rng + ?Sized>(layout: Layout, rng: &mut R) -> Result<Self> {
        let tiles = Tiles::shuffled(&layout, rng);
        Controller::new(layout, tiles)
    }

    /// Deals a fresh random board and drops any selection.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.tiles = Tiles::shuffled(&self.layout, rng);
        self.selected = None;
        self.refresh()
    }

    pub fn set_hints(&mut self, on: bool) {
        self.hints = on;
    }

    pub fn hints(&self) -> bool {
        self.hints
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn tiles(&self) -> &Tiles {
        &self.tiles
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    pub fn is_won(&self) -> bool {
        self.verdict.won
    }

    pub fn cell_polygons(&self) -> &[Hexagon] {
        &self.cell_polygons
    }

    pub fn tile_polygons(&self) -> &[Hexagon] {
        &self.tile_polygons
    }

    fn refresh(&mut self) -> Result<()> {
        self.cell_polygons = self.layout.cell_polygons();
        self.tile_polygons = self.tiles.polygons(&self.layout)?;
        self.verdict = evaluate(&self.layout, &self.tiles);
        Ok(())
    }

    pub fn sprite(&self, tile: usize) -> Option<TileSprite> {
        let polygon = *self.tile_polygons.get(tile)?;
        Some(TileSprite {
            tile,
            value: tile_value(tile),
            polygon,
            selected: self.selected == Some(tile),
            hinted: self.hints && self.verdict.satisfied_tiles.get(tile).copied().unwrap_or(false),
        })
    }

    /// Current frame, optionally leaving out one tile.
    pub fn scene(&self, exclude: Option<usize>) -> Scene<'_> {
        Scene {
            cells: &self.cell_polygons,
            tiles: (0..self.tile_polygons.len())
                .filter(|t| Some(*t) != exclude)
                .filter_map(|t| self.sprite(t))
                .collect(),
            won: self.verdict.won,
        }
    }

    pub fn pointer_down(&mut self, p: Point) -> Result<Outcome> {
        self.selected = resolve_hit(p, &self.tile_polygons)?;
        Ok(match self.selected {
            Some(tile) => Outcome::Selected { tile },
            None => Outcome::Ignored,
        })
    }

    pub fn pointer_move(&self, p: Point) -> Outcome {
        match self.selected {
            Some(tile) => Outcome::Dragging { tile, at: p },
            None => Outcome::Ignored,
        }
    }

    /// Ends a gesture. Tiles are tested before cells, and a tile only lands
    /// on a cell nobody else holds; anything else leaves it floating under
    /// the pointer.
    pub fn pointer_up(&mut self, p: Point) -> Result<Outcome> {
        let Some(tile) = self.selected.take() else {
            return Ok(Outcome::Ignored);
        };
        let outcome = match resolve_hit(p, &self.tile_polygons)? {
            Some(hit) if hit == tile => Outcome::Deselected { tile },
            Some(other) => {
                self.tiles.swap(tile, other)?;
                Outcome::Swapped { tile, other }
            }
            None => match resolve_hit(p, &self.cell_polygons)? {
                Some(cell) if self.tiles.occupant(cell).is_none() => {
                    self.tiles.place(&self.layout, tile, cell)?;
                    Outcome::Placed { tile, cell }
                }
                _ => {
                    let at = self.layout.centered_origin(p);
                    self.tiles.detach(tile, at)?;
                    Outcome::Detached { tile, at }
                }
            },
        };
        if outcome.is_mutation() {
            self.refresh()?;
        }
        Ok(outcome)
    }

    /// Paints whatever `outcome` calls for.
    pub fn present<R: Renderer + ?Sized>(&self, outcome: &Outcome, renderer: &mut R) {
        match *outcome {
            Outcome::Ignored => {}
            Outcome::Selected { tile } => {
                renderer.prepare_drag(&self.scene(Some(tile)));
                renderer.draw(&self.scene(None));
            }
            Outcome::Dragging { tile, at } => {
                if let Some(sprite) = self.sprite(tile) {
                    renderer.draw_dragged(&sprite, self.layout.centered_origin(at));
                }
            }
            Outcome::Deselected { .. }
            | Outcome::Placed { .. }
            | Outcome::Detached { .. }
            | Outcome::Swapped { .. } => renderer.draw(&self.scene(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordered() -> Controller {
        let layout = Layout::standard();
        let tiles = Tiles::ordered(&layout);
        Controller::new(layout, tiles).unwrap()
    }

    fn center_of_cell(c: &Controller, cell: usize) -> Point {
        crate::geometry::centroid(&c.layout().cell_polygon(cell).unwrap())
    }

    #[test]
    fn down_on_tile_selects_it() {
        let mut c = ordered();
        let p = center_of_cell(&c, 6);
        assert_eq!(c.pointer_down(p).unwrap(), Outcome::Selected { tile: 6 });
        assert_eq!(c.selected(), Some(6));
        assert_eq!(c.pointer_move(Point::new(1.0, 2.0)), Outcome::Dragging {
            tile: 6,
            at: Point::new(1.0, 2.0)
        });
    }

    #[test]
    fn down_on_nothing_is_ignored() {
        let mut c = ordered();
        assert_eq!(c.pointer_down(Point::new(1.0, 1.0)).unwrap(), Outcome::Ignored);
        assert_eq!(c.pointer_move(Point::new(5.0, 5.0)), Outcome::Ignored);
        assert_eq!(c.pointer_up(Point::new(5.0, 5.0)).unwrap(), Outcome::Ignored);
    }

    #[test]
    fn click_without_drag_deselects() {
        let mut c = ordered();
        let p = center_of_cell(&c, 2);
        c.pointer_down(p).unwrap();
        let before = c.tiles().clone();
        assert_eq!(c.pointer_up(p).unwrap(), Outcome::Deselected { tile: 2 });
        assert_eq!(c.selected(), None);
        assert_eq!(c.tiles(), &before);
    }

    #[test]
    fn drop_on_other_tile_swaps() {
        let mut c = ordered();
        c.pointer_down(center_of_cell(&c, 0)).unwrap();
        let out = c.pointer_up(center_of_cell(&c, 18)).unwrap();
        assert_eq!(out, Outcome::Swapped { tile: 0, other: 18 });
        assert_eq!(c.tiles().occupant(18), Some(0));
        assert_eq!(c.tiles().occupant(0), Some(18));
        assert_eq!(c.selected(), None);
    }

    #[test]
    fn drop_off_board_detaches_centered() {
        let mut c = ordered();
        c.pointer_down(center_of_cell(&c, 4)).unwrap();
        let drop = Point::new(700.0, 300.0);
        let out = c.pointer_up(drop).unwrap();
        let at = Point::new(700.0 - 46.0, 300.0 - 46.0);
        assert_eq!(out, Outcome::Detached { tile: 4, at });
        assert_eq!(c.tiles().occupant(4), None);
        assert_eq!(c.tile_polygons()[4], c.layout().hexagon(at));
        assert_eq!(c.verdict().row_sums[1], 4 + 6 + 7);
    }

    #[test]
    fn drop_on_empty_cell_places() {
        let mut c = ordered();
        // free cell 9 by dragging its tile away
        c.pointer_down(center_of_cell(&c, 9)).unwrap();
        c.pointer_up(Point::new(700.0, 400.0)).unwrap();
        c.pointer_down(center_of_cell(&c, 1)).unwrap();
        let out = c.pointer_up(center_of_cell(&c, 9)).unwrap();
        assert_eq!(out, Outcome::Placed { tile: 1, cell: 9 });
        assert_eq!(c.tiles().occupant(9), Some(1));
        assert_eq!(c.tiles().occupant(1), None);
    }

    #[test]
    fn floating_tiles_are_hit_before_cells() {
        let mut c = ordered();
        c.pointer_down(center_of_cell(&c, 3)).unwrap();
        let far = Point::new(700.0, 100.0);
        c.pointer_up(far).unwrap();
        // pick the floating tile up again by its new position
        assert_eq!(c.pointer_down(far).unwrap(), Outcome::Selected { tile: 3 });
        assert_eq!(
            c.pointer_up(center_of_cell(&c, 3)).unwrap(),
            Outcome::Placed { tile: 3, cell: 3 }
        );
    }

    #[test]
    fn hints_follow_the_verdict() {
        let layout = Layout::standard();
        let values = [
            3, 17, 18, 19, 7, 1, 11, 16, 2, 5, 6, 9, 12, 4, 8, 14, 10, 13, 15,
        ];
        let tiles = Tiles::from_values(&layout, &values).unwrap();
        let mut c = Controller::new(layout, tiles).unwrap();
        assert!(c.is_won());
        assert!(c.scene(None).tiles.iter().all(|s| !s.hinted));
        c.set_hints(true);
        assert!(c.scene(None).tiles.iter().all(|s| s.hinted));
        assert!(c.scene(None).won);
    }

    #[test]
    fn scene_can_exclude_a_tile() {
        let c = ordered();
        let s = c.scene(Some(5));
        assert_eq!(s.tiles.len(), 18);
        assert!(s.sprite(5).is_none());
        assert_eq!(s.sprite(6).map(|t| t.value), Some(7));
        assert_eq!(s.cells.len(), 19);
    }

    #[test]
    fn rejects_tile_count_mismatch() {
        let small = Layout::new(
            vec![crate::geometry::RowSpec { x_offset: 0.0, count: 2 }],
            92.0,
            0.0,
            3,
        )
        .unwrap();
        let tiles = Tiles::ordered(&Layout::standard());
        assert!(Controller::new(small, tiles).is_err());
    }
}
