//! Cells of coverage accumulated by the rasterizer
//!
//! Each cell is a single pixel. `cover` is the signed height of the edges
//!   crossing the cell and `area` twice the signed area to the right of them,
//!   both in subpixel units

use crate::POLY_SUBPIXEL_SCALE;
use crate::POLY_SUBPIXEL_SHIFT;
use crate::POLY_SUBPIXEL_MASK;

use std::cmp::min;
use std::cmp::max;

/// Lines longer than this in x are split in half to avoid overflow
const DX_LIMIT: i64 = 16384 << POLY_SUBPIXEL_SHIFT;

#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Cell { // cell_aa
    pub x: i64,
    pub y: i64,
    pub cover: i64,
    pub area: i64,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

impl Cell {
    pub fn new() -> Self {
        Cell { x: i64::MAX,
               y: i64::MAX,
               cover: 0,
               area: 0
        }
    }
    pub fn at(x: i64, y: i64) -> Self {
        Cell { x, y, cover: 0, area: 0 }
    }
    pub fn equal(&self, x: i64, y: i64) -> bool {
        self.x == x && self.y == y
    }
    pub fn is_empty(&self) -> bool {
        self.cover == 0 && self.area == 0
    }
}

/// Accumulated cells of one or more outlines
#[derive(Debug,Default)]
pub struct RasterizerCell {
    cells: Vec<Cell>,
    curr_cell: Cell,
    sorted: bool,
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl RasterizerCell {
    pub fn new() -> Self {
        Self { cells: vec![],
               curr_cell: Cell::new(),
               sorted: false,
               min_x: i64::MAX,
               min_y: i64::MAX,
               max_x: i64::MIN,
               max_y: i64::MIN,
        }
    }
    /// Remove all cells
    pub fn reset(&mut self) {
        self.max_x = i64::MIN;
        self.max_y = i64::MIN;
        self.min_x = i64::MAX;
        self.min_y = i64::MAX;
        self.curr_cell = Cell::new();
        self.sorted = false;
        self.cells.clear();
    }
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }
    pub fn sorted(&self) -> bool {
        self.sorted
    }
    /// Cells, ordered by row then column after [`sort_cells`](#method.sort_cells)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    /// Flush the current cell and order the cells by (y,x)
    ///
    /// Cells sharing a location are kept; their values are summed when swept
    pub fn sort_cells(&mut self) {
        if self.sorted {
            return;
        }
        self.add_curr_cell();
        self.curr_cell = Cell::new();
        self.cells.sort_by(|a,b| (a.y, a.x).cmp(&(b.y, b.x)));
        self.sorted = true;
        log::trace!("sort_cells: {} cells, y {} .. {}", self.cells.len(), self.min_y, self.max_y);
    }
    fn add_curr_cell(&mut self) {
        if ! self.curr_cell.is_empty() {
            self.cells.push( self.curr_cell );
        }
    }
    fn set_curr_cell(&mut self, x: i64, y: i64)  {
        if ! self.curr_cell.equal(x, y) {
            self.add_curr_cell();
            self.curr_cell = Cell::at(x,y);
        }
    }
    fn incr(&mut self, cover: i64, area: i64) {
        self.curr_cell.cover += cover;
        self.curr_cell.area  += area;
    }

    /// Render the part of a line within a single row `ey`
    ///
    /// `y1` and `y2` are subpixel offsets within the row
    fn render_hline(&mut self, ey: i64, x1: i64, y1: i64, x2: i64, y2: i64) {
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let fx1 = x1  & POLY_SUBPIXEL_MASK;
        let fx2 = x2  & POLY_SUBPIXEL_MASK;

        // Horizontal Line
        if y1 == y2 {
            self.set_curr_cell(ex2, ey);
            return;
        }

        // Single Cell
        if ex1 == ex2 {
            self.incr(y2-y1, (fx1 + fx2) * (y2-y1));
            return;
        }
        // Adjacent Cells on Same Line
        let (mut p, first, incr, dx) = if x2-x1 < 0 {
            (fx1 * (y2-y1), 0,-1, x1-x2)
        } else {
            ((POLY_SUBPIXEL_SCALE - fx1) * (y2-y1), POLY_SUBPIXEL_SCALE, 1, x2-x1)
        };
        let mut delta = p / dx;
        let mut xmod =  p % dx;
        if xmod < 0 {
            delta -= 1;
            xmod += dx;
        }
        self.incr(delta, (fx1 + first) * delta);

        let mut ex1 = ex1 + incr;
        self.set_curr_cell(ex1, ey);
        let mut y1 = y1 + delta;

        if ex1 != ex2 {
            p = POLY_SUBPIXEL_SCALE * (y2 - y1 + delta);
            let mut lift = p / dx;
            let mut rem = p % dx;
            if rem < 0 {
                lift -= 1;
                rem += dx;
            }
            xmod -= dx;

            while ex1 != ex2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dx;
                    delta += 1;
                }
                self.incr(delta, POLY_SUBPIXEL_SCALE * delta);
                y1 += delta;
                ex1 += incr;
                self.set_curr_cell(ex1, ey);
            }
        }
        delta = y2-y1;
        self.incr(delta, (fx2 + POLY_SUBPIXEL_SCALE - first) * delta);
    }

    /// Add a line in subpixel coordinates
    pub fn line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        let dx = x2 - x1;
        // Split long lines in half
        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = (x1 + x2) / 2;
            let cy = (y1 + y2) / 2;
            self.line(x1, y1, cx, cy);
            self.line(cx, cy, x2, y2);
            return;
        }
        self.sorted = false;
        let dy = y2-y1;
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let ey1 = y1 >> POLY_SUBPIXEL_SHIFT;
        let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
        let fy1 = y1 &  POLY_SUBPIXEL_MASK;
        let fy2 = y2 &  POLY_SUBPIXEL_MASK;

        self.min_x = min(ex2, min(ex1, self.min_x));
        self.min_y = min(ey2, min(ey1, self.min_y));
        self.max_x = max(ex2, max(ex1, self.max_x));
        self.max_y = max(ey2, max(ey1, self.max_y));

        self.set_curr_cell(ex1, ey1);

        // Everything is on a single row
        if ey1 == ey2 {
            self.render_hline(ey1, x1, fy1, x2, fy2);
            return;
        }

        // Vertical line, a single column of cells
        if dx == 0 {
            let ex = x1 >> POLY_SUBPIXEL_SHIFT;
            let two_fx = (x1 - (ex << POLY_SUBPIXEL_SHIFT)) << 1;

            let (first, incr) = if dy < 0 {
                (0, -1)
            } else {
                (POLY_SUBPIXEL_SCALE, 1)
            };
            let delta = first - fy1;
            self.incr(delta, two_fx * delta);

            let mut ey1 = ey1 + incr;
            self.set_curr_cell(ex, ey1);
            let delta = first + first - POLY_SUBPIXEL_SCALE;
            let area = two_fx * delta;
            while ey1 != ey2 {
                self.incr(delta, area);
                ey1 += incr;
                self.set_curr_cell(ex, ey1);
            }
            let delta = fy2 - POLY_SUBPIXEL_SCALE + first;
            self.incr(delta, two_fx * delta);
            return;
        }

        // Several rows
        let (p,first,incr, dy) = if dy < 0 {
            (fy1 * dx, 0, -1, -dy)
        } else {
            ((POLY_SUBPIXEL_SCALE - fy1) * dx, POLY_SUBPIXEL_SCALE, 1, dy)
        };
        let mut delta = p / dy;
        let mut xmod  = p % dy;
        if xmod < 0 {
            delta -= 1;
            xmod += dy;
        }
        let mut x_from = x1 + delta;
        self.render_hline(ey1, x1, fy1, x_from, first);
        let mut ey1 = ey1 + incr;
        self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
        if ey1 != ey2 {
            let p = POLY_SUBPIXEL_SCALE * dx;
            let mut lift = p / dy;
            let mut rem  = p % dy;
            if rem < 0 {
                lift -= 1;
                rem += dy;
            }
            xmod -= dy;
            while ey1 != ey2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dy;
                    delta += 1;
                }
                let x_to = x_from + delta;
                self.render_hline(ey1, x_from, POLY_SUBPIXEL_SCALE - first, x_to, first);
                x_from = x_to;
                ey1 += incr;
                self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
            }
        }
        self.render_hline(ey1, x_from, POLY_SUBPIXEL_SCALE - first, x2, fy2);
    }
}
