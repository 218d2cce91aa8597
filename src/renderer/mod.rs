//! 2D rendering module
//!
//! The game draws through the [`Surface`] trait so the simulation can be
//! rendered onto a browser canvas or recorded for tests and headless runs.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;
use thiserror::Error;

use crate::consts::{SCORE_INSET_X, SCORE_Y};
use crate::settings::Theme;
use crate::sim::GameState;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface export failed: {0}")]
    Export(String),
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A 2D drawing target
pub trait Surface {
    fn clear_rect(&mut self, pos: Vec2, size: Vec2);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str);
    /// Current contents as a `data:` URL
    fn export_image(&self) -> Result<String, RenderError>;
}

/// Draw one frame. Hidden entities are skipped.
pub fn draw(state: &GameState, theme: &Theme, surface: &mut impl Surface) {
    surface.clear_rect(Vec2::ZERO, Vec2::new(state.width, state.height));

    if state.ball.visible {
        surface.fill_circle(state.ball.pos, state.ball.size, &theme.ball);
    }

    let paddle = &state.paddle;
    if paddle.visible {
        surface.fill_rect(paddle.pos, Vec2::new(paddle.w, paddle.h), &theme.paddle);
    }

    surface.fill_text(
        &format!("Score: {}", state.score),
        Vec2::new(state.width - SCORE_INSET_X, SCORE_Y),
        &theme.font,
        &theme.score,
    );

    for brick in state.bricks.iter().filter(|b| b.visible) {
        surface.fill_rect(brick.rect.pos, brick.rect.size, &theme.brick);
    }
}
