use crate::error::GridError;
use crate::grid::ALIVE;

/// Immutable rectangular stencil of 0/1 cells, stamped onto a grid to seed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Pattern {
    /// Build a pattern from its rows. Every row must have the same non-zero
    /// length and hold only 0 or 1.
    pub fn new<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::EmptyPattern);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(GridError::RaggedPattern {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            if let Some(&bad) = values.iter().find(|&&v| v > ALIVE) {
                return Err(GridError::InvalidCellValue(bad));
            }
            cells.extend_from_slice(values);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Build a pattern from relative live-cell coordinates, sized to their
    /// bounding box anchored at `(0, 0)`.
    pub fn from_live_cells(live: &[(usize, usize)]) -> Result<Self, GridError> {
        let cols = live.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
        let rows = live.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
        if cols == 0 || rows == 0 {
            return Err(GridError::EmptyPattern);
        }
        let mut cells = vec![0; rows * cols];
        for &(x, y) in live {
            cells[y * cols + x] = ALIVE;
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Iterate `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &value)| (idx % cols, idx / cols, value))
    }
}
