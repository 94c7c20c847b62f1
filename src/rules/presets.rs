use super::patterns::Pattern;
use crate::error::GridError;

/// Built-in stencils available for seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternPreset {
    /// Name banner stamped over the random field on start-up
    Banner,
    /// A diagonal spaceship
    Glider,
    /// A small stationary pattern
    Block,
    /// A small oscillator
    Blinker,
    /// A small oscillator
    Toad,
    /// A horizontal spaceship
    LightweightSpaceship,
    /// A pattern that grows indefinitely
    GosperGliderGun,
}

impl PatternPreset {
    pub const ALL: [PatternPreset; 7] = [
        PatternPreset::Banner,
        PatternPreset::Glider,
        PatternPreset::Block,
        PatternPreset::Blinker,
        PatternPreset::Toad,
        PatternPreset::LightweightSpaceship,
        PatternPreset::GosperGliderGun,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatternPreset::Banner => "banner",
            PatternPreset::Glider => "glider",
            PatternPreset::Block => "block",
            PatternPreset::Blinker => "blinker",
            PatternPreset::Toad => "toad",
            PatternPreset::LightweightSpaceship => "lwss",
            PatternPreset::GosperGliderGun => "gosper",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn pattern(self) -> Result<Pattern, GridError> {
        match self {
            PatternPreset::Banner => Pattern::new(&BANNER),
            PatternPreset::Glider => Pattern::from_live_cells(&GLIDER),
            PatternPreset::Block => Pattern::from_live_cells(&[(0, 0), (1, 0), (0, 1), (1, 1)]),
            PatternPreset::Blinker => Pattern::from_live_cells(&[(0, 0), (1, 0), (2, 0)]),
            PatternPreset::Toad => {
                Pattern::from_live_cells(&[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)])
            }
            PatternPreset::LightweightSpaceship => Pattern::from_live_cells(&[
                (0, 1), (0, 3),
                (1, 0),
                (2, 0),
                (3, 0), (3, 3),
                (4, 0), (4, 1), (4, 2),
            ]),
            PatternPreset::GosperGliderGun => Pattern::from_live_cells(&GOSPER_GLIDER_GUN),
        }
    }
}

pub const GLIDER: [(usize, usize); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

const GOSPER_GLIDER_GUN: [(usize, usize); 36] = [
    // Left block
    (0, 4), (0, 5), (1, 4), (1, 5),
    // Left ship
    (10, 4), (10, 5), (10, 6),
    (11, 3), (11, 7),
    (12, 2), (12, 8),
    (13, 2), (13, 8),
    (14, 5),
    (15, 3), (15, 7),
    (16, 4), (16, 5), (16, 6),
    (17, 5),
    // Right ship
    (20, 2), (20, 3), (20, 4),
    (21, 2), (21, 3), (21, 4),
    (22, 1), (22, 5),
    (24, 0), (24, 1), (24, 5), (24, 6),
    // Right block
    (34, 2), (34, 3), (35, 2), (35, 3),
];

#[rustfmt::skip]
const BANNER: [[u8; 32]; 14] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0],
    [0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];
