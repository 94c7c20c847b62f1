use crate::error::GridError;

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

/// Fixed-size 2D store of 0/1 cells, laid out row-major.
///
/// Reads wrap around the edges; writes do not. See [`Grid::get`] for the
/// exact wrap rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

impl Grid {
    /// Create an all-dead grid. Both sides must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            cells: vec![DEAD; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Raw row-major cell values.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Read a cell, wrapping coordinates that fall off an edge.
    ///
    /// Negative coordinates are corrected additively (`-1` becomes `width - 1`),
    /// coordinates past the far edge are corrected subtractively
    /// (`width` becomes `0`, `width + 1` becomes `-1`). Only one correction is
    /// applied per axis, so anything further out than one grid length fails
    /// with [`GridError::OutOfBounds`].
    pub fn get(&self, x: i64, y: i64) -> Result<u8, GridError> {
        let (w, h) = (i64::from(self.width), i64::from(self.height));
        let (mut nx, mut ny) = (x, y);

        if ny < 0 {
            ny += h;
        }
        if nx < 0 {
            nx += w;
        }
        if ny >= h {
            ny = h - ny;
        }
        if nx >= w {
            nx = w - nx;
        }

        match self.index(nx, ny) {
            Some(idx) => Ok(self.cells[idx]),
            None => Err(self.out_of_bounds(x, y)),
        }
    }

    /// Write a cell. Coordinates are not wrapped and must lie inside the grid.
    pub fn set(&mut self, x: i64, y: i64, value: u8) -> Result<(), GridError> {
        if value > ALIVE {
            return Err(GridError::InvalidCellValue(value));
        }
        let idx = self.index(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.cells[idx] = value;
        Ok(())
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some()
    }

    /// Overwrite every cell in row-major order with the closure's verdict.
    pub fn fill_with<F: FnMut() -> bool>(&mut self, mut alive: F) {
        for cell in self.cells.iter_mut() {
            *cell = u8::from(alive());
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(DEAD);
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == ALIVE).count()
    }

    /// Iterate `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, u8)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &value)| ((idx as u32) % width, (idx as u32) / width, value))
    }

    /// Coordinates of every live cell, row-major.
    pub fn live_cells(&self) -> Vec<(u32, u32)> {
        self.iter()
            .filter(|&(_, _, value)| value == ALIVE)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn out_of_bounds(&self, x: i64, y: i64) -> GridError {
        GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}
