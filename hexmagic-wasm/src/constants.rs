/// Drawing constants for the canvas front end.
/// Values are in canvas pixels unless noted otherwise.
pub const TEXT_VERTICAL_OFFSET: f64 = 55.0;
pub const FONT: &str = "33px Arial";
/// Outline width for board cells and tiles.
pub const STROKE_WIDTH: f64 = 1.6;
/// Outline width for the selected tile.
pub const SELECTED_STROKE_WIDTH: f64 = 4.0;

pub const BACKGROUND: &str = "#ffffff";
pub const CELL_STROKE: &str = "#888";
pub const TILE_FILL: &str = "#f5e6c4";
pub const TILE_FILL_WON: &str = "#c9ecc0";
pub const TILE_STROKE: &str = "#333";
pub const SELECTED_STROKE: &str = "dodgerblue";
pub const NUMERAL: &str = "#111";
pub const NUMERAL_HINT: &str = "green";
