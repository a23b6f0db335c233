//! Terminal rendering of a grid snapshot. Read-only consumer of the core:
//! it walks `Grid::cells` plus the current/frontier ids and never mutates.

use crate::grid::{Cell, CellId, Grid};

/// Glyphs for the four highlight roles: active cell, this-step frontier
/// candidates, cells backtracked through, and plain visited cells.
fn glyph(cell: &Cell, current: Option<CellId>, frontier: &[CellId]) -> char {
    let id = (cell.row, cell.column);

    if current == Some(id) {
        '@'
    } else if frontier.contains(&id) {
        '?'
    } else if cell.revisited {
        ':'
    } else if cell.visited {
        '.'
    } else {
        ' '
    }
}

/// Draws the whole grid as ASCII, one text row of walls and one of cells per
/// grid row. May be called every frame; the output only depends on the
/// snapshot passed in.
pub fn render(grid: &Grid, current: Option<CellId>, frontier: &[CellId]) -> String {
    let dims = grid.dims();
    let mut out = String::new();

    for row in 0..dims.rows {
        for column in 0..dims.columns {
            out.push('+');
            out.push_str(if grid.cell((row, column)).walls.top {
                "---"
            } else {
                "   "
            });
        }
        out.push_str("+\n");

        for column in 0..dims.columns {
            let cell = grid.cell((row, column));
            out.push(if cell.walls.left { '|' } else { ' ' });
            out.push(' ');
            out.push(glyph(cell, current, frontier));
            out.push(' ');
        }
        out.push(if grid.cell((row, dims.columns - 1)).walls.right {
            '|'
        } else {
            ' '
        });
        out.push('\n');
    }

    for column in 0..dims.columns {
        out.push('+');
        out.push_str(if grid.cell((dims.rows - 1, column)).walls.bottom {
            "---"
        } else {
            "   "
        });
    }
    out.push_str("+\n");

    out
}
