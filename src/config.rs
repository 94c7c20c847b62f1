use std::time::Duration;

use crate::error::AppError;
use crate::rules::presets::PatternPreset;

pub const DEFAULT_TICK_MS: u64 = 100;
pub const DEFAULT_START_DELAY_MS: u64 = 3_000;
// Sizes below are logical pixels; they are multiplied by the window scale
// factor before use.
/// Surfaces narrower than this get the small cell size.
pub const NARROW_SURFACE_PX: u32 = 500;
pub const NARROW_CELL_PX: u32 = 9;
pub const WIDE_CELL_PX: u32 = 15;

/// Runtime settings for the simulation and its window.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Time between generations once running
    pub tick_interval: Duration,
    /// Pause before the first generation, so the seed is visible
    pub start_delay: Duration,
    /// Fixed cell size in logical pixels; picked from the surface width when `None`
    pub cell_px: Option<u32>,
    /// RNG seed for reproducible runs
    pub seed: Option<u64>,
    /// Fill the grid with noise before stamping the pattern
    pub randomize: bool,
    /// Stencil stamped in the middle of the grid
    pub pattern: Option<PatternPreset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            start_delay: Duration::from_millis(DEFAULT_START_DELAY_MS),
            cell_px: None,
            seed: None,
            randomize: true,
            pattern: Some(PatternPreset::Banner),
        }
    }
}

impl Config {
    /// Read overrides from the process environment:
    /// - `LIFE_TICK_MS`        (default: `100`)
    /// - `LIFE_START_DELAY_MS` (default: `3000`)
    /// - `LIFE_CELL_PX`        (default: 9 below 500px wide, else 15)
    /// - `LIFE_SEED`           (default: from entropy)
    /// - `LIFE_RANDOMIZE`      (default: `true`)
    /// - `LIFE_PATTERN`        (default: `banner`, `none` disables)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] against an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = parse_with(&lookup, "LIFE_TICK_MS", |v| v.parse::<u64>().ok().filter(|&ms| ms > 0))? {
            config.tick_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_with(&lookup, "LIFE_START_DELAY_MS", |v| v.parse::<u64>().ok())? {
            config.start_delay = Duration::from_millis(ms);
        }
        if let Some(px) = parse_with(&lookup, "LIFE_CELL_PX", |v| v.parse::<u32>().ok().filter(|&px| px > 0))? {
            config.cell_px = Some(px);
        }
        if let Some(seed) = parse_with(&lookup, "LIFE_SEED", |v| v.parse::<u64>().ok())? {
            config.seed = Some(seed);
        }
        if let Some(randomize) = parse_with(&lookup, "LIFE_RANDOMIZE", parse_bool)? {
            config.randomize = randomize;
        }
        if let Some(pattern) = parse_with(&lookup, "LIFE_PATTERN", parse_pattern)? {
            config.pattern = pattern;
        }

        Ok(config)
    }

    /// Cell size in physical pixels for a surface `surface_width` physical
    /// pixels wide, shown at `scale_factor` physical pixels per logical pixel.
    pub fn cell_px_for(&self, surface_width: u32, scale_factor: f64) -> u32 {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        let logical = match self.cell_px {
            Some(px) => px,
            None if f64::from(surface_width) / scale < f64::from(NARROW_SURFACE_PX) => NARROW_CELL_PX,
            None => WIDE_CELL_PX,
        };
        (f64::from(logical) * scale).round().max(1.0) as u32
    }
}

fn parse_with<F, T>(
    lookup: &F,
    key: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, AppError>
where
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => {
            let parsed = parse(raw.trim());
            match parsed {
                Some(value) => Ok(Some(value)),
                None => Err(AppError::InvalidConfig { key, value: raw }),
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_pattern(value: &str) -> Option<Option<PatternPreset>> {
    if value.eq_ignore_ascii_case("none") {
        return Some(None);
    }
    PatternPreset::from_name(value).map(Some)
}
