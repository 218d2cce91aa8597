//! Headless host: virtual clock, recorded effects and an autopilot paddle
//!
//! Used by the native binary to run the game without a display.

use super::timer::TimerQueue;
use crate::engine::{Engine, Host};
use crate::renderer::RecordingSurface;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, PaddleIntent, ResetToken};

/// Virtual frame duration (60 Hz display)
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Dead zone around the paddle center for the autopilot
const AUTOPILOT_SLACK: f32 = 5.0;

/// Host that records everything instead of talking to a browser
#[derive(Debug, Default)]
pub struct HeadlessHost {
    now_ms: f64,
    timers: TimerQueue<ResetToken>,
    pub uploads: Vec<String>,
    pub notifications: Vec<String>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Move the clock forward and return the resets that came due
    pub fn advance(&mut self, ms: f64) -> Vec<ResetToken> {
        self.now_ms += ms;
        self.timers.pop_due(self.now_ms)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

impl Host for HeadlessHost {
    fn upload(&mut self, image: String) {
        log::debug!("Recorded upload ({} bytes)", image.len());
        self.uploads.push(image);
    }

    fn notify_game_over(&mut self, message: &str) {
        log::info!("{}", message);
        self.notifications.push(message.to_string());
    }

    fn schedule_reset(&mut self, token: ResetToken, delay_ms: u32) {
        self.timers.schedule(self.now_ms + delay_ms as f64, token);
    }
}

/// Steer the paddle center toward the ball
pub fn autopilot(state: &GameState) -> PaddleIntent {
    let center = state.paddle.pos.x + state.paddle.w / 2.0;
    let target = state.ball.pos.x;
    if target < center - AUTOPILOT_SLACK {
        PaddleIntent::Left
    } else if target > center + AUTOPILOT_SLACK {
        PaddleIntent::Right
    } else {
        PaddleIntent::Stop
    }
}

/// Totals from a headless run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub bricks_destroyed: u64,
    pub rounds_lost: u64,
    pub rounds_won: u64,
    pub resets_applied: u64,
    pub best_score: u32,
}

pub struct HeadlessRunner {
    pub engine: Engine,
    pub surface: RecordingSurface,
    pub host: HeadlessHost,
    /// Let the autopilot drive the paddle
    pub autopilot: bool,
}

impl HeadlessRunner {
    pub fn new(width: f32, height: f32, settings: Settings) -> Self {
        Self {
            engine: Engine::new(width, height, settings),
            surface: RecordingSurface::new(),
            host: HeadlessHost::new(),
            autopilot: true,
        }
    }

    /// Start the game and run `frames` frames
    pub fn run(&mut self, frames: u64) -> RunSummary {
        self.engine.start();
        let mut summary = RunSummary::default();

        for _ in 0..frames {
            // Timers fire between frames, as they would in a browser
            for token in self.host.advance(FRAME_MS) {
                if self.engine.complete_win_reset(token) {
                    summary.resets_applied += 1;
                }
            }

            if self.autopilot {
                let intent = autopilot(self.engine.state());
                self.engine.input_mut().set_intent(intent);
            }

            for event in self.engine.frame(&mut self.surface, &mut self.host) {
                match event {
                    GameEvent::BrickDestroyed { score, .. } => {
                        summary.bricks_destroyed += 1;
                        summary.best_score = summary.best_score.max(score);
                    }
                    GameEvent::RoundLost { .. } => summary.rounds_lost += 1,
                    GameEvent::RoundWon { .. } => summary.rounds_won += 1,
                    GameEvent::PaddleHit => {}
                }
            }
            summary.frames += 1;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_autopilot_direction() {
        let mut state = GameState::default();
        // paddle center 400
        state.ball.pos.x = 300.0;
        assert_eq!(autopilot(&state), PaddleIntent::Left);
        state.ball.pos.x = 500.0;
        assert_eq!(autopilot(&state), PaddleIntent::Right);
        state.ball.pos.x = 402.0;
        assert_eq!(autopilot(&state), PaddleIntent::Stop);
    }

    #[test]
    fn test_reset_fires_after_delay() {
        let mut runner = HeadlessRunner::new(800.0, 600.0, Settings::default());
        runner.autopilot = false;
        runner.engine.start();

        let state = runner.engine.state_mut();
        for brick in state.bricks.iter_mut().skip(1) {
            brick.visible = false;
        }
        state.score = 44;
        state.ball.pos = Vec2::new(80.0, 74.0);

        let summary = runner.run(1);
        assert_eq!(summary.rounds_won, 1);
        assert_eq!(runner.host.pending_timers(), 1);
        assert!(!runner.engine.state().ball.visible);

        // 179 more frames is ~2.98 s: not yet
        let summary = runner.run(179);
        assert_eq!(summary.resets_applied, 0);
        assert!(!runner.engine.state().ball.visible);

        let summary = runner.run(2);
        assert_eq!(summary.resets_applied, 1);
        assert!(runner.engine.state().ball.visible);
        assert_eq!(runner.engine.state().score, 0);
        assert_eq!(runner.engine.state().visible_bricks(), 45);
    }

    #[test]
    fn test_unattended_ball_loses_rounds() {
        let mut runner = HeadlessRunner::new(800.0, 600.0, Settings::default());
        runner.autopilot = false;
        let summary = runner.run(2000);
        assert_eq!(summary.frames, 2000);
        assert!(summary.rounds_lost > 0);
        assert_eq!(runner.host.notifications.len() as u64, summary.rounds_lost);
        assert_eq!(runner.host.uploads.len() as u64, summary.rounds_lost);
    }

    #[test]
    fn test_autopilot_keeps_playing() {
        let mut runner = HeadlessRunner::new(800.0, 600.0, Settings::default());
        let summary = runner.run(3000);
        assert_eq!(summary.frames, 3000);
        assert!(summary.bricks_destroyed > 0);
        assert!(runner.engine.state().paddle.pos.x >= 0.0);
        assert!(runner.engine.state().paddle.pos.x <= 720.0);
    }
}
