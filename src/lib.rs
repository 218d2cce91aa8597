//! Brick Breaker - A canvas Breakout clone
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddle, bricks, score)
//! - `renderer`: Drawing onto a 2D surface (canvas or recording)
//! - `engine`: Frame driver wiring input, simulation, host effects and rendering
//! - `platform`: Input mapping, timers and the headless host
//! - `upload`: Game-over screenshot upload client
//! - `settings`: Persisted preferences

pub mod engine;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod upload;

pub use engine::{Engine, Host};
pub use settings::{Settings, Theme};

/// Game configuration constants
pub mod consts {
    /// Default surface dimensions
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 10.0;
    pub const BALL_SPEED: f32 = 4.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Gap between paddle top and the bottom edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 20.0;

    /// Brick grid. Row index drives x, column index drives y.
    pub const BRICK_ROW_COUNT: usize = 9;
    pub const BRICK_COLUMN_COUNT: usize = 5;
    pub const BRICK_COUNT: usize = BRICK_ROW_COUNT * BRICK_COLUMN_COUNT;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_X: f32 = 45.0;
    pub const BRICK_OFFSET_Y: f32 = 60.0;

    /// Score text anchor, measured from the top-right corner
    pub const SCORE_INSET_X: f32 = 100.0;
    pub const SCORE_Y: f32 = 30.0;

    /// Real-time pause between clearing the grid and the next round
    pub const WIN_RESET_DELAY_MS: u32 = 3000;
}
