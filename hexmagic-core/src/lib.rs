//! Game logic for the hexagonal magic-sum puzzle: board geometry, hit
//! testing, tile bookkeeping, line scoring and the pointer-driven
//! controller. Nothing here touches the DOM.

pub mod controller;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod scene;
pub mod tiles;
pub mod win;

pub use controller::{Controller, Outcome};
pub use error::{Error, Result};
pub use geometry::{Hexagon, Layout, LayoutSpec, Point, RowSpec};
pub use hit::{point_in_convex_polygon, resolve_hit};
pub use scene::{Renderer, Scene, TileSprite};
pub use tiles::{TilePosition, Tiles};
pub use win::{Lines, Verdict, evaluate};
