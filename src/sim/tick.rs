//! Per-frame simulation tick
//!
//! One call advances the game by exactly one display refresh. Velocities are
//! expressed in pixels per tick.

use serde::{Deserialize, Serialize};

use super::collision::{below_floor, brick_contact, paddle_contact, reflect, wall_hit};
use super::state::{GameEvent, GameState};
use crate::consts::BRICK_COUNT;

/// Horizontal direction the player is asking the paddle to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleIntent {
    #[default]
    Stop,
    Left,
    Right,
}

impl PaddleIntent {
    /// Sign applied to the paddle speed
    pub fn sign(self) -> f32 {
        match self {
            PaddleIntent::Stop => 0.0,
            PaddleIntent::Left => -1.0,
            PaddleIntent::Right => 1.0,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub paddle: PaddleIntent,
}

/// Advance the game by one frame and report what the host must act on
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    // Paddle
    state.paddle.dx = input.paddle.sign() * state.paddle.speed;
    state.paddle.advance(state.width);

    // Ball
    state.ball.pos += state.ball.vel;

    let hit = wall_hit(&state.ball.bounds(), state.width, state.height);
    state.ball.vel = reflect(state.ball.vel, hit);

    // Snap upward rather than reflect
    if paddle_contact(&state.ball.bounds(), &state.paddle.bounds()) {
        state.ball.vel.y = -state.ball.speed;
        events.push(GameEvent::PaddleHit);
    }

    // Every overlapping brick counts, even several in one frame
    let ball_box = state.ball.bounds();
    for index in 0..state.bricks.len() {
        let brick = &mut state.bricks[index];
        if !brick.visible || !brick_contact(&ball_box, &brick.rect) {
            continue;
        }
        state.ball.vel.y = -state.ball.vel.y;
        brick.visible = false;
        increase_score(state, index, &mut events);
    }

    // Only score and bricks reset here; ball and paddle carry on
    if below_floor(&state.ball.bounds(), state.height) {
        let score = state.score;
        state.show_all_bricks();
        state.score = 0;
        log::info!("Round lost with score {}", score);
        events.push(GameEvent::RoundLost { score });
    }

    events
}

fn increase_score(state: &mut GameState, index: usize, events: &mut Vec<GameEvent>) {
    state.score += 1;
    log::debug!("Brick {} destroyed, score {}", index, state.score);
    events.push(GameEvent::BrickDestroyed {
        index,
        score: state.score,
    });

    if state.score % BRICK_COUNT as u32 == 0 {
        let token = state.begin_win_pause();
        log::info!("All bricks cleared, reset {:?} armed", token);
        events.push(GameEvent::RoundWon { token });
    }
}
