//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per frame, no wall-clock reads
//! - Stable brick iteration order
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, WallHit, brick_contact, paddle_contact, reflect, wall_hit};
pub use state::{Ball, Brick, GameEvent, GamePhase, GameState, Paddle, ResetToken, brick_grid};
pub use tick::{PaddleIntent, TickInput, tick};
