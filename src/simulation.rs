//! Owned simulation context: the engine, its seeding policy and the tick schedule.
//!
//! The host calls [`Simulation::advance`] whenever it wakes up and redraws when
//! a generation was produced. Nothing here blocks or sleeps; the host decides how
//! to wait until [`Simulation::next_deadline`].

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::GridError;
use crate::grid::ALIVE;
use crate::render::{draw_commands, DrawCommand};
use crate::rules::presets::PatternPreset;
use crate::seed::{apply_pattern_centered, randomize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
    /// A step failed; only a reseed or clear brings the simulation back.
    Halted,
}

pub struct Simulation {
    engine: Engine,
    config: Config,
    rng: StdRng,
    cell_px: u32,
    run_state: RunState,
    next_tick: Option<Instant>,
}

/// Cells needed to cover `surface_px` pixels, rounding up.
pub fn cells_for(surface_px: u32, cell_px: u32) -> u32 {
    surface_px.div_ceil(cell_px.max(1))
}

impl Simulation {
    /// Build and seed a stopped simulation covering a surface of the given
    /// physical size, shown at `scale_factor`.
    pub fn new(
        config: Config,
        surface_width: u32,
        surface_height: u32,
        scale_factor: f64,
    ) -> Result<Self, GridError> {
        let cell_px = config.cell_px_for(surface_width, scale_factor);
        let engine = Engine::new(
            cells_for(surface_width, cell_px),
            cells_for(surface_height, cell_px),
        )?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut sim = Self {
            engine,
            config,
            rng,
            cell_px,
            run_state: RunState::Stopped,
            next_tick: None,
        };
        sim.reseed()?;
        log::info!(
            "Simulation created: {}x{} cells at {}px",
            sim.engine.width(),
            sim.engine.height(),
            sim.cell_px
        );
        Ok(sim)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cell_px(&self) -> u32 {
        self.cell_px
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// When the host should wake up next, if a tick is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Begin ticking after the configured start delay.
    pub fn start(&mut self, now: Instant) {
        self.schedule(now + self.config.start_delay);
    }

    /// Continue ticking after a stop, without the start delay.
    pub fn resume(&mut self, now: Instant) {
        self.schedule(now + self.config.tick_interval);
    }

    fn schedule(&mut self, at: Instant) {
        if self.run_state == RunState::Halted {
            log::warn!("Simulation halted after an error; reseed or clear before starting");
            return;
        }
        self.run_state = RunState::Running;
        self.next_tick = Some(at);
        log::info!("Simulation running");
    }

    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            self.run_state = RunState::Stopped;
            log::info!("Simulation stopped at generation {}", self.engine.generation());
        }
        self.next_tick = None;
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_running() {
            self.stop();
        } else {
            self.resume(now);
        }
    }

    /// Step once if a tick is due. Returns whether a generation was produced.
    pub fn advance(&mut self, now: Instant) -> Result<bool, GridError> {
        let due = match (self.run_state, self.next_tick) {
            (RunState::Running, Some(at)) => at,
            _ => return Ok(false),
        };
        if now < due {
            return Ok(false);
        }

        let result = self.engine.step();
        self.finish_step(result)?;

        // Skip missed ticks instead of bursting to catch up.
        let next = due + self.config.tick_interval;
        self.next_tick = Some(if next <= now { now + self.config.tick_interval } else { next });
        Ok(true)
    }

    /// Single manual step, allowed while stopped.
    pub fn step_once(&mut self) -> Result<(), GridError> {
        if self.run_state == RunState::Halted {
            return Ok(());
        }
        let result = self.engine.step();
        self.finish_step(result)
    }

    fn finish_step(&mut self, result: Result<(), GridError>) -> Result<(), GridError> {
        if let Err(e) = result {
            log::error!("Step failed at generation {}: {}", self.engine.generation(), e);
            self.run_state = RunState::Halted;
            self.next_tick = None;
            return Err(e);
        }
        Ok(())
    }

    /// Clear and reseed the current grid according to the config.
    ///
    /// A pattern that does not fit the grid is skipped with a warning.
    pub fn reseed(&mut self) -> Result<(), GridError> {
        let grid = self.engine.current_mut();
        grid.clear();
        if self.config.randomize {
            randomize(grid, &mut self.rng);
        }
        if let Some(preset) = self.config.pattern {
            let pattern = preset.pattern()?;
            match apply_pattern_centered(grid, &pattern) {
                Ok(()) => {}
                Err(GridError::OutOfBounds { .. }) => log::warn!(
                    "Pattern {} ({}x{}) does not fit a {}x{} grid, skipped",
                    preset.name(),
                    pattern.cols(),
                    pattern.rows(),
                    grid.width(),
                    grid.height()
                ),
                Err(e) => return Err(e),
            }
        }
        self.recover();
        log::info!("Reseeded with {} live cells", self.engine.current().live_count());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.engine.current_mut().clear();
        self.recover();
    }

    fn recover(&mut self) {
        self.engine.reset_generation();
        if self.run_state == RunState::Halted {
            self.run_state = RunState::Stopped;
        }
    }

    pub fn set_pattern(&mut self, pattern: Option<PatternPreset>) {
        self.config.pattern = pattern;
    }

    pub fn set_randomize(&mut self, randomize: bool) {
        self.config.randomize = randomize;
    }

    /// Rebuild the grids for a new surface size.
    ///
    /// Ticking stops, fresh grids are built and reseeded, and ticking resumes
    /// if it was running. Returns `false` when the grid size did not change.
    pub fn resize(
        &mut self,
        surface_width: u32,
        surface_height: u32,
        scale_factor: f64,
        now: Instant,
    ) -> Result<bool, GridError> {
        let cell_px = self.config.cell_px_for(surface_width, scale_factor);
        let width = cells_for(surface_width, cell_px);
        let height = cells_for(surface_height, cell_px);
        if cell_px == self.cell_px && width == self.engine.width() && height == self.engine.height() {
            return Ok(false);
        }

        let was_running = self.is_running();
        self.stop();
        self.engine = Engine::new(width, height)?;
        self.cell_px = cell_px;
        self.reseed()?;
        log::info!("Grid rebuilt at {}x{} cells ({}px)", width, height, cell_px);

        if was_running {
            self.resume(now);
        }
        Ok(true)
    }

    /// Bring the cell under a surface pixel to life.
    pub fn paint(&mut self, x_px: f64, y_px: f64) -> Result<(), GridError> {
        let cell = f64::from(self.cell_px);
        let x = (x_px / cell).floor() as i64;
        let y = (y_px / cell).floor() as i64;
        self.engine.current_mut().set(x, y, ALIVE)
    }

    /// Draw instructions for the current generation.
    pub fn draw_commands(&self) -> impl Iterator<Item = DrawCommand> + '_ {
        draw_commands(self.engine.current(), self.cell_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn quiet_config() -> Config {
        Config {
            cell_px: Some(10),
            seed: Some(1),
            randomize: false,
            pattern: None,
            ..Config::default()
        }
    }

    #[test]
    fn grid_covers_the_surface() {
        let sim = Simulation::new(quiet_config(), 105, 50, 1.0).unwrap();
        assert_eq!((sim.engine().width(), sim.engine().height()), (11, 5));
        assert_eq!(sim.run_state(), RunState::Stopped);
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        assert!(matches!(
            Simulation::new(quiet_config(), 0, 50, 1.0),
            Err(GridError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn nothing_happens_before_start_delay() {
        let mut sim = Simulation::new(quiet_config(), 100, 100, 1.0).unwrap();
        let t0 = Instant::now();
        assert!(!sim.advance(t0 + Duration::from_secs(10)).unwrap());

        sim.start(t0);
        assert!(!sim.advance(t0 + Duration::from_millis(2_999)).unwrap());
        assert!(sim.advance(t0 + Duration::from_millis(3_000)).unwrap());
        assert_eq!(sim.engine().generation(), 1);
    }

    #[test]
    fn one_step_per_interval() {
        let mut sim = Simulation::new(quiet_config(), 100, 100, 1.0).unwrap();
        let t0 = Instant::now();
        sim.start(t0);
        let first = t0 + Duration::from_secs(3);

        assert!(sim.advance(first).unwrap());
        assert!(!sim.advance(first + Duration::from_millis(50)).unwrap());
        assert!(sim.advance(first + Duration::from_millis(100)).unwrap());
        assert_eq!(sim.next_deadline(), Some(first + Duration::from_millis(200)));
        assert_eq!(sim.engine().generation(), 2);
    }

    #[test]
    fn late_wakeup_does_not_burst() {
        let mut sim = Simulation::new(quiet_config(), 100, 100, 1.0).unwrap();
        let t0 = Instant::now();
        sim.start(t0);
        let late = t0 + Duration::from_secs(60);

        assert!(sim.advance(late).unwrap());
        assert!(!sim.advance(late).unwrap());
        assert_eq!(sim.next_deadline(), Some(late + Duration::from_millis(100)));
    }

    #[test]
    fn stop_cancels_ticks() {
        let mut sim = Simulation::new(quiet_config(), 100, 100, 1.0).unwrap();
        let t0 = Instant::now();
        sim.start(t0);
        sim.stop();
        assert_eq!(sim.next_deadline(), None);
        assert!(!sim.advance(t0 + Duration::from_secs(10)).unwrap());

        sim.toggle(t0);
        assert!(sim.is_running());
        assert_eq!(sim.next_deadline(), Some(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn step_error_halts_until_reseed() {
        let mut sim = Simulation::new(quiet_config(), 100, 100, 1.0).unwrap();
        let t0 = Instant::now();
        sim.start(t0);

        let err = GridError::OutOfBounds { x: 99, y: 0, width: 10, height: 10 };
        assert_eq!(sim.finish_step(Err(err.clone())), Err(err));
        assert_eq!(sim.run_state(), RunState::Halted);
        assert_eq!(sim.next_deadline(), None);

        sim.resume(t0);
        assert_eq!(sim.run_state(), RunState::Halted);

        sim.reseed().unwrap();
        assert_eq!(sim.run_state(), RunState::Stopped);
    }

    #[test]
    fn resize_rebuilds_and_keeps_running() {
        let mut sim = Simulation::new(quiet_config(), 100, 100, 1.0).unwrap();
        let t0 = Instant::now();
        sim.start(t0);
        sim.advance(t0 + Duration::from_secs(3)).unwrap();

        assert!(!sim.resize(100, 100, 1.0, t0).unwrap());
        assert!(sim.resize(200, 50, 1.0, t0).unwrap());
        assert_eq!((sim.engine().width(), sim.engine().height()), (20, 5));
        assert_eq!(sim.engine().generation(), 0);
        assert!(sim.is_running());
        assert_eq!(sim.next_deadline(), Some(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn cells_keep_their_logical_size_on_hidpi() {
        let config = Config { cell_px: None, ..quiet_config() };
        let mut sim = Simulation::new(config, 800, 600, 2.0).unwrap();
        // 400 logical px wide is narrow: 9 logical px cells, 18 physical
        assert_eq!(sim.cell_px(), 18);
        assert_eq!((sim.engine().width(), sim.engine().height()), (45, 34));

        let t0 = Instant::now();
        assert!(sim.resize(800, 600, 1.0, t0).unwrap());
        assert_eq!(sim.cell_px(), 15);
        assert_eq!(sim.engine().width(), 54);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = Config { seed: Some(99), cell_px: Some(5), ..Config::default() };
        let a = Simulation::new(config.clone(), 400, 300, 1.0).unwrap();
        let b = Simulation::new(config, 400, 300, 1.0).unwrap();
        assert_eq!(a.engine().current(), b.engine().current());
    }

    #[test]
    fn banner_is_skipped_when_it_does_not_fit() {
        let config = Config {
            randomize: false,
            pattern: Some(PatternPreset::Banner),
            ..quiet_config()
        };
        let sim = Simulation::new(config, 100, 100, 1.0).unwrap();
        assert_eq!(sim.engine().current().live_count(), 0);
    }

    #[test]
    fn banner_is_centered_when_it_fits() {
        let config = Config {
            pattern: Some(PatternPreset::Banner),
            ..quiet_config()
        };
        let sim = Simulation::new(config, 320, 140, 1.0).unwrap();
        let banner = PatternPreset::Banner.pattern().unwrap();
        let live = banner.iter().filter(|c| c.2 == ALIVE).count();
        assert_eq!(sim.engine().current().live_count(), live);
    }

    #[test]
    fn paint_targets_the_cell_under_the_cursor() {
        let mut sim = Simulation::new(quiet_config(), 100, 100, 1.0).unwrap();
        sim.paint(25.0, 99.9).unwrap();
        assert_eq!(sim.engine().current().get(2, 9).unwrap(), ALIVE);
        assert!(sim.paint(100.0, 5.0).is_err());
    }

    #[test]
    fn draw_commands_use_cell_size() {
        let sim = Simulation::new(quiet_config(), 30, 20, 1.0).unwrap();
        let cmds: Vec<_> = sim.draw_commands().collect();
        assert_eq!(cmds.len(), 6);
        assert_eq!((cmds[4].x_px, cmds[4].y_px, cmds[4].size), (10, 10, 10));
    }
}
