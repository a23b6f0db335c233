pub mod backtracker;

use crate::error::MazeError;
use crate::grid::{CellId, Grid};

/// What one `step` changed, for callers that highlight progress: the frontier
/// candidates considered this step and whether generation finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub frontier: Vec<CellId>,
    pub done: bool,
}

pub trait Generator {
    /// Advance generation by exactly one unit of work. A no-op once done.
    fn step(&mut self) -> Result<StepReport, MazeError>;

    /// Run `step` until the maze is complete.
    fn generate(&mut self) -> Result<(), MazeError>;

    fn is_done(&self) -> bool;

    /// Read-only view of the grid for rendering or inspection.
    fn grid(&self) -> &Grid;
}
