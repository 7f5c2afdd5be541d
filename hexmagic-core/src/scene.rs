//! Read-only description of a frame, handed to whatever paints it.

use crate::geometry::{Hexagon, Point};

/// One tile as it should appear on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct TileSprite {
    pub tile: usize,
    pub value: u32,
    pub polygon: Hexagon,
    pub selected: bool,
    /// Numeral drawn in the hint colour.
    pub hinted: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene<'a> {
    pub cells: &'a [Hexagon],
    /// In tile order, minus any excluded tile.
    pub tiles: Vec<TileSprite>,
    pub won: bool,
}

impl Scene<'_> {
    pub fn sprite(&self, tile: usize) -> Option<&TileSprite> {
        self.tiles.iter().find(|s| s.tile == tile)
    }
}

/// Paints scenes. Implemented by the canvas front end.
pub trait Renderer {
    /// Full frame.
    fn draw(&mut self, scene: &Scene<'_>);

    /// Paints the static part of a drag (everything but the dragged tile)
    /// somewhere it can be reused for each pointer move.
    fn prepare_drag(&mut self, scene: &Scene<'_>);

    /// Drag frame: the prepared background plus `sprite` with its
    /// bounding box starting at `at`.
    fn draw_dragged(&mut self, sprite: &TileSprite, at: Point);
}
