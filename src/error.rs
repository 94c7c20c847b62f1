use thiserror::Error;

/// Errors raised by the grid, the engine and the pattern seeder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds { x: i64, y: i64, width: u32, height: u32 },

    #[error("cell value must be 0 or 1, got {0}")]
    InvalidCellValue(u8),

    #[error("pattern must have at least one row and one column")]
    EmptyPattern,

    #[error("pattern row {row} has {found} columns, expected {expected}")]
    RaggedPattern { row: usize, expected: usize, found: usize },
}

/// Errors raised while bringing up or driving the windowed host.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter found")]
    NoAdapter,

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}
