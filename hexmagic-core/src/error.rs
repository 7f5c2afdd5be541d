/// Contract violations reported by the board, hit tester and controller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("polygon needs at least 3 vertices, got {0}")]
    DegeneratePolygon(usize),

    #[error("cell {cell} out of range (board has {count} cells)")]
    CellOutOfRange { cell: usize, count: usize },

    #[error("row {row} / column {col} is not on the board")]
    RowColOutOfRange { row: usize, col: usize },

    #[error("tile {tile} out of range (board has {count} tiles)")]
    TileOutOfRange { tile: usize, count: usize },

    #[error("cell {cell} is already occupied by tile {tile}")]
    CellOccupied { cell: usize, tile: usize },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("cell values are not a permutation of 1..={0}")]
    NotAPermutation(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
