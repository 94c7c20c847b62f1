//! Seeding a grid: random fill and stencil stamping.

use rand::Rng;

use crate::error::GridError;
use crate::grid::Grid;
use crate::rules::patterns::Pattern;

/// Probability of a cell starting alive under [`randomize`].
pub const LIVE_PROBABILITY: f64 = 0.5;

/// Overwrite every cell with an independent coin flip.
pub fn randomize<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    grid.fill_with(|| rng.gen_bool(LIVE_PROBABILITY));
}

/// Stamp `pattern` with its top-left corner at `(offset_x, offset_y)`.
///
/// Stamped cells are not wrapped. If any part of the pattern would land
/// outside the grid the call fails and the grid is left as it was.
pub fn apply_pattern(
    grid: &mut Grid,
    pattern: &Pattern,
    offset_x: i64,
    offset_y: i64,
) -> Result<(), GridError> {
    let out_of_bounds = |x: i64, y: i64| GridError::OutOfBounds {
        x,
        y,
        width: grid.width(),
        height: grid.height(),
    };
    // An offset so large the far corner overflows is off the grid too
    let far_x = offset_x
        .checked_add(pattern.cols() as i64 - 1)
        .ok_or_else(|| out_of_bounds(offset_x, offset_y))?;
    let far_y = offset_y
        .checked_add(pattern.rows() as i64 - 1)
        .ok_or_else(|| out_of_bounds(offset_x, offset_y))?;
    for (x, y) in [(offset_x, offset_y), (far_x, far_y)] {
        if !grid.contains(x, y) {
            return Err(out_of_bounds(x, y));
        }
    }

    for (px, py, value) in pattern.iter() {
        grid.set(offset_x + px as i64, offset_y + py as i64, value)?;
    }
    Ok(())
}

/// Offset that centers `pattern` on `grid`, rounding toward the far edge.
pub fn centered_offset(grid: &Grid, pattern: &Pattern) -> (i64, i64) {
    let x = f64::from(grid.width()) / 2.0 - pattern.cols() as f64 / 2.0;
    let y = f64::from(grid.height()) / 2.0 - pattern.rows() as f64 / 2.0;
    (x.ceil() as i64, y.ceil() as i64)
}

/// Stamp `pattern` in the middle of the grid. A pattern larger than the grid
/// fails with [`GridError::OutOfBounds`] rather than being truncated.
pub fn apply_pattern_centered(grid: &mut Grid, pattern: &Pattern) -> Result<(), GridError> {
    let (offset_x, offset_y) = centered_offset(grid, pattern);
    apply_pattern(grid, pattern, offset_x, offset_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ALIVE;
    use crate::rules::presets::PatternPreset;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn randomize_is_roughly_half_alive() {
        let mut grid = Grid::new(100, 100).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        randomize(&mut grid, &mut rng);

        let fraction = grid.live_count() as f64 / grid.len() as f64;
        assert!(
            (0.45..=0.55).contains(&fraction),
            "live fraction {fraction} outside [0.45, 0.55]"
        );
    }

    #[test]
    fn randomize_overwrites_everything() {
        let mut grid = Grid::new(50, 50).unwrap();
        grid.fill_with(|| true);
        let mut rng = StdRng::seed_from_u64(7);
        randomize(&mut grid, &mut rng);
        assert!(grid.live_count() < grid.len());
    }

    #[test]
    fn pattern_is_stamped_at_offset() {
        let pattern = Pattern::new(&[[1u8, 0], [0, 1]]).unwrap();
        let mut grid = Grid::new(5, 5).unwrap();
        grid.fill_with(|| true);
        apply_pattern(&mut grid, &pattern, 2, 3).unwrap();

        assert_eq!(grid.get(2, 3).unwrap(), 1);
        assert_eq!(grid.get(3, 3).unwrap(), 0);
        assert_eq!(grid.get(2, 4).unwrap(), 0);
        assert_eq!(grid.get(3, 4).unwrap(), 1);
        // dead pattern cells overwrite, cells outside the footprint are kept
        assert_eq!(grid.live_count(), 25 - 2);
    }

    #[test]
    fn out_of_range_stamp_leaves_grid_untouched() {
        let pattern = Pattern::new(&[[1u8, 1, 1]]).unwrap();
        let mut grid = Grid::new(4, 4).unwrap();

        let err = apply_pattern(&mut grid, &pattern, 2, 0).unwrap_err();
        assert_eq!(err, GridError::OutOfBounds { x: 4, y: 0, width: 4, height: 4 });
        assert!(apply_pattern(&mut grid, &pattern, -1, 0).is_err());
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn extreme_offsets_fail_without_overflow() {
        let block = PatternPreset::Block.pattern().unwrap();
        let mut grid = Grid::new(4, 4).unwrap();
        for (x, y) in [(i64::MAX, 0), (0, i64::MAX), (i64::MIN, 0), (i64::MAX, i64::MIN)] {
            assert!(
                matches!(apply_pattern(&mut grid, &block, x, y), Err(GridError::OutOfBounds { .. })),
                "offset ({x}, {y})"
            );
        }
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn centered_on_equal_size_grid_is_at_origin() {
        let pattern = PatternPreset::Banner.pattern().unwrap();
        let mut grid = Grid::new(32, 14).unwrap();
        assert_eq!(centered_offset(&grid, &pattern), (0, 0));

        apply_pattern_centered(&mut grid, &pattern).unwrap();
        for (x, y, value) in pattern.iter() {
            assert_eq!(grid.get(x as i64, y as i64).unwrap(), value);
        }
    }

    #[test]
    fn centered_offset_rounds_up() {
        let blinker = PatternPreset::Blinker.pattern().unwrap();
        let grid = Grid::new(10, 10).unwrap();
        // 5 - 1.5 = 3.5 and 5 - 0.5 = 4.5
        assert_eq!(centered_offset(&grid, &blinker), (4, 5));
    }

    #[test]
    fn centered_pattern_larger_than_grid_fails() {
        let banner = PatternPreset::Banner.pattern().unwrap();
        let mut grid = Grid::new(20, 20).unwrap();
        assert!(matches!(
            apply_pattern_centered(&mut grid, &banner),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn glider_lands_in_the_middle() {
        let glider = PatternPreset::Glider.pattern().unwrap();
        let mut grid = Grid::new(9, 9).unwrap();
        apply_pattern_centered(&mut grid, &glider).unwrap();
        // offset ceil(4.5 - 1.5) = 3
        assert_eq!(grid.get(4, 3).unwrap(), ALIVE);
        assert_eq!(grid.live_count(), 5);
    }
}
