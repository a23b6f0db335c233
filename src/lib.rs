//! Step-wise maze generation over a rectangular grid.
//!
//! The recursive backtracker carves a perfect maze (a spanning tree of the
//! grid: exactly one path between any two cells) one step at a time, so a
//! caller can animate or inspect every intermediate state. Rendering, pacing
//! and input live outside this crate; [`ascii`] is one such consumer, used by
//! the demo binary.

pub mod ascii;
pub mod error;
pub mod generators;
pub mod grid;

pub use error::MazeError;
pub use generators::backtracker::Backtracker;
pub use generators::{Generator, StepReport};
pub use grid::{Cell, CellId, Dimensions, Grid, Neighborhood, Side, Walls};
