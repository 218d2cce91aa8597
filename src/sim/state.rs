//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start control
    #[default]
    NotStarted,
    /// Frame loop is live. There is no way back out of this phase.
    Running,
}

/// Identifies one scheduled win reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResetToken(pub u64);

/// Something the host must react to after a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball snapped upward off the paddle
    PaddleHit,
    /// A brick was destroyed; `score` is the score after the increment
    BrickDestroyed { index: usize, score: u32 },
    /// Ball passed the bottom edge; `score` is the score before it was reset
    RoundLost { score: u32 },
    /// Every brick cleared; the host should fire `token` after the reset delay
    RoundWon { token: ResetToken },
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Radius
    pub size: f32,
    pub speed: f32,
    pub vel: Vec2,
    pub visible: bool,
}

impl Ball {
    /// Ball at the surface center heading up and to the right
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pos: Self::start_pos(width, height),
            size: BALL_SIZE,
            speed: BALL_SPEED,
            vel: Vec2::new(BALL_SPEED, -BALL_SPEED),
            visible: true,
        }
    }

    pub fn start_pos(width: f32, height: f32) -> Vec2 {
        Vec2::new(width / 2.0, height / 2.0)
    }

    /// Axis-aligned bounding box
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos - Vec2::splat(self.size),
            Vec2::splat(self.size * 2.0),
        )
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    /// Horizontal velocity for the current tick
    pub dx: f32,
    pub visible: bool,
}

impl Paddle {
    /// Paddle centered horizontally near the bottom edge
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pos: Self::start_pos(width, height),
            w: PADDLE_WIDTH,
            h: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            dx: 0.0,
            visible: true,
        }
    }

    pub fn start_pos(width: f32, height: f32) -> Vec2 {
        Vec2::new(width / 2.0 - PADDLE_WIDTH / 2.0, height - PADDLE_BOTTOM_OFFSET)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.w, self.h))
    }

    /// Apply `dx` and keep the paddle inside `[0, surface_width - w]`
    pub fn advance(&mut self, surface_width: f32) {
        self.pos.x += self.dx;
        if self.pos.x + self.w > surface_width {
            self.pos.x = surface_width - self.w;
        }
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }
    }
}

/// A destructible brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// `false` once destroyed
    pub visible: bool,
}

impl Brick {
    /// Brick for grid cell (row, column)
    pub fn at_cell(row: usize, column: usize) -> Self {
        let x = row as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_X;
        let y = column as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_Y;
        Self {
            rect: Rect::new(Vec2::new(x, y), Vec2::new(BRICK_WIDTH, BRICK_HEIGHT)),
            visible: true,
        }
    }
}

/// Full brick grid in row-major order
pub fn brick_grid() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_COUNT);
    for row in 0..BRICK_ROW_COUNT {
        for column in 0..BRICK_COLUMN_COUNT {
            bricks.push(Brick::at_cell(row, column));
        }
    }
    bricks
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: Vec<Brick>,
    pub score: u32,
    /// Win reset waiting on the host's timer. Only this token may apply.
    pub pending_reset: Option<ResetToken>,
    next_reset_token: u64,
}

impl GameState {
    /// Lay out a fresh game on a `width` x `height` surface
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            phase: GamePhase::NotStarted,
            ball: Ball::new(width, height),
            paddle: Paddle::new(width, height),
            bricks: brick_grid(),
            score: 0,
            pending_reset: None,
            next_reset_token: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn show_all_bricks(&mut self) {
        for brick in &mut self.bricks {
            brick.visible = true;
        }
    }

    pub fn visible_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }

    /// Hide ball and paddle and arm a new reset, superseding any pending one
    pub fn begin_win_pause(&mut self) -> ResetToken {
        self.ball.visible = false;
        self.paddle.visible = false;

        let token = ResetToken(self.next_reset_token);
        self.next_reset_token += 1;
        if let Some(stale) = self.pending_reset.replace(token) {
            log::debug!("Win reset {:?} superseded by {:?}", stale, token);
        }
        token
    }

    /// Apply the win reset scheduled as `token`.
    ///
    /// Returns `false` without touching anything when `token` is not the
    /// pending reset (a later win replaced it, or it already fired).
    /// Velocities are intentionally left as they were.
    pub fn complete_win_reset(&mut self, token: ResetToken) -> bool {
        if self.pending_reset != Some(token) {
            log::debug!("Ignoring stale win reset {:?}", token);
            return false;
        }
        self.pending_reset = None;

        self.show_all_bricks();
        self.score = 0;
        self.paddle.pos = Paddle::start_pos(self.width, self.height);
        self.ball.pos = Ball::start_pos(self.width, self.height);
        self.ball.visible = true;
        self.paddle.visible = true;

        log::info!("Win reset {:?} applied", token);
        true
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(SURFACE_WIDTH, SURFACE_HEIGHT)
    }
}
