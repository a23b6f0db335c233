use log::{debug, trace};
use rand::prelude::*;

use crate::error::MazeError;
use crate::generators::{Generator, StepReport};
use crate::grid::{CellId, Grid};

/// Randomized depth-first maze generator with an explicit backtracking stack.
///
/// Every carved wall connects a newly discovered cell to the growing tree, so
/// the carved edges always form a spanning tree of the grid: exactly one path
/// between any two cells, no cycles. The explicit stack replaces recursion so
/// large grids cannot blow the call stack and so callers can animate one step
/// at a time.
#[derive(Debug)]
pub struct Backtracker {
    grid: Grid,
    rng: StdRng,
    current: Option<CellId>,
    stack: Vec<CellId>,
    done: bool,
}

impl Backtracker {
    pub fn new(rows: usize, columns: usize) -> Result<Self, MazeError> {
        Self::with_rng(rows, columns, StdRng::from_entropy())
    }

    /// Deterministic variant: the same seed over the same dimensions replays
    /// the exact same generation run.
    pub fn with_seed(rows: usize, columns: usize, seed: u64) -> Result<Self, MazeError> {
        Self::with_rng(rows, columns, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rows: usize, columns: usize, rng: StdRng) -> Result<Self, MazeError> {
        Ok(Self {
            grid: Grid::with_dims(rows, columns)?,
            rng,
            current: None,
            stack: Vec::new(),
            done: false,
        })
    }

    /// Picks a uniformly random starting cell and makes it current. The cell
    /// is deliberately not marked visited here; that happens at the top of
    /// the first `step`, so the start shows up as current-but-unvisited for
    /// one frame, the same as every later cell.
    pub fn setup(&mut self) {
        let dims = self.grid.dims();
        let y = (self.rng.gen::<f32>() * dims.rows as f32) as usize;
        let x = (self.rng.gen::<f32>() * dims.columns as f32) as usize;

        debug!("starting generation at ({}, {})", y, x);
        self.current = Some((y, x));
    }

    /// The active cell, rendered distinctly by callers.
    pub fn current(&self) -> Result<CellId, MazeError> {
        self.current.ok_or(MazeError::NotInitialized)
    }
}

impl Generator for Backtracker {
    fn step(&mut self) -> Result<StepReport, MazeError> {
        let current = self.current.ok_or(MazeError::NotInitialized)?;

        if self.done {
            return Ok(StepReport {
                frontier: Vec::new(),
                done: true,
            });
        }

        self.grid.mark_visited(current);

        let frontier = self.grid.unvisited_neighbors_of(current);

        if !frontier.is_empty() {
            let choice = (self.rng.gen::<f32>() * frontier.len() as f32) as usize;
            let next = frontier[choice];

            self.grid.remove_walls_between(current, next)?;
            trace!("carved {:?} -> {:?}", current, next);

            self.stack.push(current);
            self.current = Some(next);
        } else if let Some(previous) = self.stack.pop() {
            trace!("backtracking from {:?} to {:?}", current, previous);
            self.grid.mark_revisited(current);
            self.current = Some(previous);
        } else {
            debug!(
                "generation complete, {} cells",
                self.grid.dims().rows * self.grid.dims().columns
            );
            self.done = true;
        }

        Ok(StepReport {
            frontier,
            done: self.done,
        })
    }

    fn generate(&mut self) -> Result<(), MazeError> {
        loop {
            if self.step()?.done {
                break;
            }
        }

        Ok(())
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }
}

#[cfg(test)]
mod test_backtracker {
    use super::*;
    use crate::grid::Cell;
    use std::collections::VecDeque;

    fn generated(rows: usize, columns: usize, seed: u64) -> Backtracker {
        let mut maze = Backtracker::with_seed(rows, columns, seed).unwrap();
        maze.setup();
        maze.generate().unwrap();
        maze
    }

    /// Cell pairs whose shared wall has been carved. Counted once per pair by
    /// only looking right and down.
    fn carved_edges(grid: &Grid) -> usize {
        grid.cells()
            .map(|cell| {
                let mut edges = 0;
                if !cell.walls.right {
                    edges += 1;
                }
                if !cell.walls.bottom {
                    edges += 1;
                }
                edges
            })
            .sum()
    }

    /// Breadth-first flood through carved walls, starting from `start`.
    fn reachable_cells(grid: &Grid, start: CellId) -> usize {
        let dims = grid.dims();
        let mut seen = vec![false; dims.rows * dims.columns];
        let mut queue = VecDeque::new();

        seen[start.0 * dims.columns + start.1] = true;
        queue.push_back(start);

        let mut count = 0;
        while let Some(id) = queue.pop_front() {
            count += 1;
            for (neighbor, side) in grid.neighbors_of(id) {
                let open = !grid.cell(id).walls.is_intact(side);
                let index = neighbor.0 * dims.columns + neighbor.1;
                if open && !seen[index] {
                    seen[index] = true;
                    queue.push_back(neighbor);
                }
            }
        }

        count
    }

    fn assert_wall_symmetry(grid: &Grid) {
        for cell in grid.cells() {
            for (neighbor, side) in grid.neighbors_of((cell.row, cell.column)) {
                assert_eq!(
                    cell.walls.is_intact(side),
                    grid.cell(neighbor).walls.is_intact(-side),
                    "asymmetric wall between {:?} and {:?}",
                    (cell.row, cell.column),
                    neighbor
                );
            }
        }
    }

    #[test]
    fn step_before_setup_is_an_error() {
        let mut maze = Backtracker::with_seed(3, 3, 1).unwrap();
        assert_eq!(maze.step().unwrap_err(), MazeError::NotInitialized);
        assert_eq!(maze.current().unwrap_err(), MazeError::NotInitialized);
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        assert_eq!(
            Backtracker::new(0, 7).unwrap_err(),
            MazeError::InvalidDimensions { rows: 0, columns: 7 }
        );
    }

    #[test]
    fn single_cell_maze_finishes_in_one_step() {
        let mut maze = Backtracker::with_seed(1, 1, 42).unwrap();
        maze.setup();
        assert_eq!(maze.current().unwrap(), (0, 0));
        assert!(!maze.grid().cell((0, 0)).visited);

        let report = maze.step().unwrap();
        assert!(report.done);
        assert!(report.frontier.is_empty());
        assert!(maze.is_done());

        let cell = maze.grid().cell((0, 0));
        assert!(cell.visited);
        assert!(cell.walls.top && cell.walls.right && cell.walls.bottom && cell.walls.left);
    }

    #[test]
    fn start_cell_is_visited_on_first_step_not_setup() {
        let mut maze = Backtracker::with_seed(4, 4, 7).unwrap();
        maze.setup();

        let start = maze.current().unwrap();
        assert!(!maze.grid().cell(start).visited);

        maze.step().unwrap();
        assert!(maze.grid().cell(start).visited);
    }

    #[test]
    fn two_by_two_carves_a_spanning_tree() {
        let maze = generated(2, 2, 3);

        assert_eq!(carved_edges(maze.grid()), 3);
        assert_eq!(reachable_cells(maze.grid(), (0, 0)), 4);
        assert_wall_symmetry(maze.grid());
    }

    #[test]
    fn large_maze_is_a_spanning_tree() {
        let maze = generated(40, 40, 1234);

        assert_eq!(carved_edges(maze.grid()), 1599);
        for start in &[(0, 0), (39, 39), (17, 5)] {
            assert_eq!(reachable_cells(maze.grid(), *start), 1600);
        }
        assert_wall_symmetry(maze.grid());
        for cell in maze.grid().cells() {
            assert!(cell.visited);
        }
    }

    #[test]
    fn generation_takes_exactly_the_worst_case_step_count() {
        // n-1 carves, every push eventually popped, one finishing step
        for &(rows, columns, seed) in &[(1, 1, 0), (2, 2, 1), (5, 8, 2), (13, 20, 3)] {
            let mut maze = Backtracker::with_seed(rows, columns, seed).unwrap();
            maze.setup();

            let mut steps = 0;
            while !maze.step().unwrap().done {
                steps += 1;
                assert!(steps <= 2 * rows * columns);
            }
            steps += 1;

            assert_eq!(steps, 2 * rows * columns - 1);
        }
    }

    #[test]
    fn walls_and_flags_only_move_one_way() {
        let mut maze = Backtracker::with_seed(6, 9, 99).unwrap();
        maze.setup();

        let mut previous: Vec<Cell> = maze.grid().cells().cloned().collect();
        loop {
            let done = maze.step().unwrap().done;

            let snapshot: Vec<Cell> = maze.grid().cells().cloned().collect();
            for (before, after) in previous.iter().zip(&snapshot) {
                assert!(!(before.visited && !after.visited));
                assert!(!(before.revisited && !after.revisited));
                assert!(!(!before.walls.top && after.walls.top));
                assert!(!(!before.walls.right && after.walls.right));
                assert!(!(!before.walls.bottom && after.walls.bottom));
                assert!(!(!before.walls.left && after.walls.left));
            }
            assert_wall_symmetry(maze.grid());
            previous = snapshot;

            if done {
                break;
            }
        }
    }

    #[test]
    fn finished_maze_ignores_further_steps() {
        let mut maze = generated(5, 5, 11);

        let snapshot: Vec<Cell> = maze.grid().cells().cloned().collect();
        let current = maze.current().unwrap();

        for _ in 0..10 {
            let report = maze.step().unwrap();
            assert!(report.done);
            assert!(report.frontier.is_empty());
        }

        let after: Vec<Cell> = maze.grid().cells().cloned().collect();
        assert_eq!(snapshot, after);
        assert_eq!(maze.current().unwrap(), current);
    }

    #[test]
    fn same_seed_replays_the_same_maze() {
        let first = generated(13, 20, 2026);
        let second = generated(13, 20, 2026);

        let walls_of = |maze: &Backtracker| -> Vec<_> {
            maze.grid().cells().map(|cell| cell.walls).collect()
        };
        assert_eq!(walls_of(&first), walls_of(&second));
    }

    #[test]
    fn regenerated_mazes_share_no_state() {
        // two live generators over grids of the same size, stepped unevenly
        let mut first = Backtracker::with_seed(4, 4, 5).unwrap();
        let mut second = Backtracker::with_seed(4, 4, 6).unwrap();
        first.setup();
        second.setup();

        first.step().unwrap();
        first.step().unwrap();
        second.generate().unwrap();

        assert!(!first.is_done());
        assert!(second.is_done());
        assert_eq!(carved_edges(second.grid()), 15);

        first.generate().unwrap();
        assert_eq!(carved_edges(first.grid()), 15);
        assert_eq!(reachable_cells(first.grid(), (0, 0)), 16);
    }

    #[test]
    fn step_reports_the_frontier_it_chose_from() {
        let mut maze = Backtracker::with_seed(3, 3, 8).unwrap();
        maze.setup();

        let start = maze.current().unwrap();
        let expected = maze.grid().unvisited_neighbors_of(start);
        let report = maze.step().unwrap();

        assert_eq!(report.frontier, expected);
        assert!(report.frontier.contains(&maze.current().unwrap()));
    }
}
