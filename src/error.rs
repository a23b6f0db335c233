use crate::grid::CellId;
use thiserror::Error;

/// Everything that can go wrong in the maze core. All operations validate
/// before mutating, so an `Err` means nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("grid dimensions must be positive, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    /// Wall removal between cells that share no wall. This is a contract
    /// violation in the engine, not a recoverable condition.
    #[error("cells {a:?} and {b:?} are not grid-adjacent")]
    NotAdjacent { a: CellId, b: CellId },

    #[error("generator used before setup")]
    NotInitialized,
}
