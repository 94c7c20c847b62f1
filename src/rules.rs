//! Rules module for Conway's Game of Life simulation
//!
//! This module contains the fixed B3/S23 transition, neighbor counting, and the
//! pattern stencils used to seed a grid.
pub mod patterns;
pub mod presets;

use crate::error::GridError;
use crate::grid::{Grid, ALIVE, DEAD};

/// Offsets of the 8 neighbors around a cell:
///
/// ```text
/// (-1,-1) ( 0,-1) ( 1,-1)
/// (-1, 0)    .    ( 1, 0)
/// (-1, 1) ( 0, 1) ( 1, 1)
/// ```
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Game of Life standard rules:
/// 1. Any live cell with fewer than two live neighbors dies (underpopulation)
/// 2. Any live cell with two or three live neighbors lives (survival)
/// 3. Any live cell with more than three live neighbors dies (overpopulation)
/// 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)
pub fn next_state(cell: u8, neighbors: u8) -> u8 {
    match (cell == ALIVE, neighbors) {
        (true, 2..=3) => ALIVE,
        (true, _) => DEAD,
        (false, 3) => ALIVE,
        (false, _) => DEAD,
    }
}

/// Count live neighbors of `(x, y)`. Every lookup goes through [`Grid::get`],
/// so edge cells see the opposite edge.
pub fn count_alive_neighbors(grid: &Grid, x: i64, y: i64) -> Result<u8, GridError> {
    let mut count = 0;
    for (dx, dy) in NEIGHBOR_OFFSETS {
        if grid.get(x + dx, y + dy)? == ALIVE {
            count += 1;
        }
    }
    Ok(count)
}

/// Apply the rules to every cell of `input`, writing the result into `output`.
///
/// `input` is only read; both grids must share dimensions.
pub fn apply_rules(input: &Grid, output: &mut Grid) -> Result<(), GridError> {
    debug_assert_eq!(input.width(), output.width());
    debug_assert_eq!(input.height(), output.height());

    for y in 0..i64::from(input.height()) {
        for x in 0..i64::from(input.width()) {
            let neighbors = count_alive_neighbors(input, x, y)?;
            let cell = input.get(x, y)?;
            output.set(x, y, next_state(cell, neighbors))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_table_for_every_neighbor_count() {
        for n in 0..=8u8 {
            let survives = if n == 2 || n == 3 { ALIVE } else { DEAD };
            let born = if n == 3 { ALIVE } else { DEAD };
            assert_eq!(next_state(ALIVE, n), survives, "alive cell with {n} neighbors");
            assert_eq!(next_state(DEAD, n), born, "dead cell with {n} neighbors");
        }
    }

    #[test]
    fn truth_table_holds_on_a_real_grid() {
        for center in [DEAD, ALIVE] {
            for n in 0..=8usize {
                let mut input = Grid::new(5, 5).unwrap();
                input.set(2, 2, center).unwrap();
                for &(dx, dy) in NEIGHBOR_OFFSETS.iter().take(n) {
                    input.set(2 + dx, 2 + dy, ALIVE).unwrap();
                }
                let mut output = Grid::new(5, 5).unwrap();
                apply_rules(&input, &mut output).unwrap();

                let expected = next_state(center, n as u8);
                assert_eq!(output.get(2, 2).unwrap(), expected, "center {center}, n {n}");
            }
        }
    }

    #[test]
    fn corner_neighbors_wrap_around() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(3, 3, ALIVE).unwrap();
        grid.set(3, 0, ALIVE).unwrap();
        grid.set(0, 3, ALIVE).unwrap();
        assert_eq!(count_alive_neighbors(&grid, 0, 0).unwrap(), 3);
    }

    #[test]
    fn cell_does_not_count_itself() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, ALIVE).unwrap();
        assert_eq!(count_alive_neighbors(&grid, 1, 1).unwrap(), 0);
    }

    #[test]
    fn apply_rules_leaves_input_untouched() {
        let mut input = Grid::new(6, 6).unwrap();
        for x in 1..4 {
            input.set(x, 2, ALIVE).unwrap();
        }
        let snapshot = input.clone();
        let mut output = Grid::new(6, 6).unwrap();
        apply_rules(&input, &mut output).unwrap();
        assert_eq!(input, snapshot);
        assert_ne!(output, snapshot);
    }
}
