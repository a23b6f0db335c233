use crate::error::MazeError;

/// `(row, column)` index of a cell. The generator's current cell and stack
/// store these instead of references, so the grid stays the single owner of
/// all cell state.
pub type CellId = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

/// One side of a cell. Iteration and frontier order is always
/// top, right, bottom, left; a seeded run depends on it staying that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl std::ops::Neg for Side {
    type Output = Side;

    fn neg(self) -> Self::Output {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

/// Per-cell wall flags. All four start intact; carving only ever clears them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

impl Walls {
    pub fn is_intact(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    fn carve(&mut self, side: Side) {
        match side {
            Side::Top => self.top = false,
            Side::Right => self.right = false,
            Side::Bottom => self.bottom = false,
            Side::Left => self.left = false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    pub walls: Walls,
    pub visited: bool,
    pub revisited: bool,
}

impl Cell {
    fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            walls: Walls::default(),
            visited: false,
            revisited: false,
        }
    }
}

/// The in-bounds neighbors of one cell, at most one per side. Iterates the
/// present entries in top, right, bottom, left order.
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood {
    pub top: Option<CellId>,
    pub right: Option<CellId>,
    pub bottom: Option<CellId>,
    pub left: Option<CellId>,

    counter: Option<Side>,
}

impl Iterator for Neighborhood {
    type Item = (CellId, Side);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.counter {
                Some(Side::Top) => {
                    self.counter = Some(Side::Right);
                    if let Some(top) = self.top {
                        return Some((top, Side::Top));
                    }
                }
                Some(Side::Right) => {
                    self.counter = Some(Side::Bottom);
                    if let Some(right) = self.right {
                        return Some((right, Side::Right));
                    }
                }
                Some(Side::Bottom) => {
                    self.counter = Some(Side::Left);
                    if let Some(bottom) = self.bottom {
                        return Some((bottom, Side::Bottom));
                    }
                }
                Some(Side::Left) => {
                    self.counter = None;

                    return self.left.map(|left| (left, Side::Left));
                }
                None => return None,
            }
        }
    }
}

/// Fixed-size arena of cells. Dimensions never change after creation; the
/// only mutations are wall carving and the visited/revisited flags, and both
/// are one-way.
#[derive(Debug, Clone)]
pub struct Grid {
    dims: Dimensions,

    cells: Vec<Cell>,
}

impl Grid {
    pub fn with_dims(rows: usize, columns: usize) -> Result<Self, MazeError> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::InvalidDimensions { rows, columns });
        }

        let cells = (0..rows * columns)
            .map(|index| Cell::new(index / columns, index % columns))
            .collect();

        Ok(Self {
            dims: Dimensions { rows, columns },
            cells,
        })
    }

    #[inline]
    fn index_of(&self, row: usize, column: usize) -> usize {
        (self.dims.columns * row) + column
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn cell(&self, (row, column): CellId) -> &Cell {
        &self.cells[self.index_of(row, column)]
    }

    #[inline]
    fn cell_mut(&mut self, (row, column): CellId) -> &mut Cell {
        let index = self.index_of(row, column);
        &mut self.cells[index]
    }

    /// Read-only pass over every cell, row-major. Re-iterable every frame
    /// without side effects.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn neighbors_of(&self, (row, column): CellId) -> Neighborhood {
        Neighborhood {
            top: if row > 0 { Some((row - 1, column)) } else { None },
            right: if column + 1 < self.dims.columns {
                Some((row, column + 1))
            } else {
                None
            },
            bottom: if row + 1 < self.dims.rows {
                Some((row + 1, column))
            } else {
                None
            },
            left: if column > 0 { Some((row, column - 1)) } else { None },
            counter: Some(Side::Top),
        }
    }

    /// The frontier set the generator picks from: in-bounds neighbors that
    /// are not yet part of the tree, in side order.
    pub fn unvisited_neighbors_of(&self, id: CellId) -> Vec<CellId> {
        self.neighbors_of(id)
            .filter(|&(neighbor, _)| !self.cell(neighbor).visited)
            .map(|(neighbor, _)| neighbor)
            .collect()
    }

    pub fn mark_visited(&mut self, id: CellId) {
        self.cell_mut(id).visited = true;
    }

    pub fn mark_revisited(&mut self, id: CellId) {
        self.cell_mut(id).revisited = true;
    }

    /// Clears the shared wall on both cells. Adjacency is checked before
    /// either flag changes, so the pair is carved both-or-neither.
    pub fn remove_walls_between(&mut self, a: CellId, b: CellId) -> Result<(), MazeError> {
        let side = self
            .shared_side(a, b)
            .ok_or(MazeError::NotAdjacent { a, b })?;

        self.cell_mut(a).walls.carve(side);
        self.cell_mut(b).walls.carve(-side);

        Ok(())
    }

    /// The side of `a` that faces `b`, if they are grid-adjacent.
    fn shared_side(&self, a: CellId, b: CellId) -> Option<Side> {
        let row_delta = b.0 as isize - a.0 as isize;
        let column_delta = b.1 as isize - a.1 as isize;

        match (row_delta, column_delta) {
            (-1, 0) => Some(Side::Top),
            (0, 1) => Some(Side::Right),
            (1, 0) => Some(Side::Bottom),
            (0, -1) => Some(Side::Left),
            _ => None,
        }
    }
}
