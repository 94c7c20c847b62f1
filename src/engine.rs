use crate::error::GridError;
use crate::grid::Grid;
use crate::rules::apply_rules;

/// Double-buffered Game of Life stepper.
///
/// Both grids are allocated once. Each step reads `grids[current]`, writes
/// `grids[1 - current]`, then flips `current`.
#[derive(Debug, Clone)]
pub struct Engine {
    grids: [Grid; 2],
    current: usize,
    generation: u64,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        Ok(Self {
            grids: [Grid::new(width, height)?, Grid::new(width, height)?],
            current: 0,
            generation: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.grids[0].width()
    }

    pub fn height(&self) -> u32 {
        self.grids[0].height()
    }

    /// Number of completed steps.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current(&self) -> &Grid {
        &self.grids[self.current]
    }

    /// Mutable access for seeding and painting between steps.
    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.grids[self.current]
    }

    /// The back buffer: what `current` was before the last step.
    pub fn previous(&self) -> &Grid {
        &self.grids[1 - self.current]
    }

    /// Advance one generation.
    ///
    /// On error nothing is swapped and `current` is unchanged.
    pub fn step(&mut self) -> Result<(), GridError> {
        let (front, back) = self.grids.split_at_mut(1);
        let (input, output) = if self.current == 0 {
            (&front[0], &mut back[0])
        } else {
            (&back[0], &mut front[0])
        };
        apply_rules(input, output)?;

        self.current = 1 - self.current;
        self.generation += 1;
        log::debug!(
            "generation {} ({} live cells)",
            self.generation,
            self.current().live_count()
        );
        Ok(())
    }

    pub fn reset_generation(&mut self) {
        self.generation = 0;
    }
}
