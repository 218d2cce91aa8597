//! Frame driver
//!
//! [`Engine::frame`] is the whole per-frame cycle: apply input, tick the
//! simulation, hand events to the host, render. The host owns scheduling and
//! calls it once per display refresh.

use crate::platform::input::InputState;
use crate::renderer::{self, Surface};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, ResetToken, tick};

/// Platform services the engine needs outside the simulation
pub trait Host {
    /// Send a game-over screenshot. Must not block.
    fn upload(&mut self, image: String);
    /// Tell the player the round is over
    fn notify_game_over(&mut self, message: &str);
    /// Call [`Engine::complete_win_reset`] with `token` after `delay_ms`,
    /// whether or not frames keep running
    fn schedule_reset(&mut self, token: ResetToken, delay_ms: u32);
}

pub struct Engine {
    state: GameState,
    input: InputState,
    settings: Settings,
}

impl Engine {
    pub fn new(width: f32, height: f32, settings: Settings) -> Self {
        Self {
            state: GameState::new(width, height),
            input: InputState::default(),
            settings,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Begin play. Returns `false` if already running; there is no restart.
    pub fn start(&mut self) -> bool {
        if self.state.is_running() {
            return false;
        }
        self.state.phase = GamePhase::Running;
        log::info!("Game started");
        true
    }

    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Run one frame and return the events it produced
    pub fn frame(&mut self, surface: &mut impl Surface, host: &mut impl Host) -> Vec<GameEvent> {
        let events = tick(&mut self.state, &self.input.tick_input());

        for event in &events {
            match *event {
                GameEvent::RoundLost { score } => {
                    // Surface still holds the previous frame here
                    if self.settings.upload_enabled {
                        match surface.export_image() {
                            Ok(image) => host.upload(image),
                            Err(e) => log::warn!("Skipping upload for score {}: {}", score, e),
                        }
                    }
                    host.notify_game_over(&self.settings.game_over_message);
                }
                GameEvent::RoundWon { token } => {
                    host.schedule_reset(token, self.settings.win_reset_delay_ms);
                }
                GameEvent::PaddleHit | GameEvent::BrickDestroyed { .. } => {}
            }
        }

        renderer::draw(&self.state, &self.settings.theme, surface);
        events
    }

    pub fn complete_win_reset(&mut self, token: ResetToken) -> bool {
        self.state.complete_win_reset(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use glam::Vec2;

    #[derive(Default)]
    struct MockHost {
        uploads: Vec<String>,
        notices: Vec<String>,
        resets: Vec<(ResetToken, u32)>,
    }

    impl Host for MockHost {
        fn upload(&mut self, image: String) {
            self.uploads.push(image);
        }

        fn notify_game_over(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }

        fn schedule_reset(&mut self, token: ResetToken, delay_ms: u32) {
            self.resets.push((token, delay_ms));
        }
    }

    fn started() -> Engine {
        let mut engine = Engine::new(800.0, 600.0, Settings::default());
        assert!(engine.start());
        engine
    }

    #[test]
    fn test_start_once() {
        let mut engine = Engine::new(800.0, 600.0, Settings::default());
        assert!(!engine.is_running());
        assert!(engine.start());
        assert!(!engine.start());
        assert!(engine.is_running());
    }

    #[test]
    fn test_frame_ticks_and_draws() {
        let mut engine = started();
        let mut surface = RecordingSurface::new();
        let mut host = MockHost::default();

        engine.key_down("ArrowLeft");
        engine.frame(&mut surface, &mut host);
        assert_eq!(engine.state().paddle.pos.x, 352.0);
        assert_eq!(engine.state().ball.pos, Vec2::new(404.0, 296.0));
        assert_eq!(surface.frames(), 1);
        assert!(matches!(
            surface.commands()[1],
            DrawCommand::Circle { center, .. } if center == Vec2::new(404.0, 296.0)
        ));

        engine.key_up("ArrowLeft");
        engine.frame(&mut surface, &mut host);
        assert_eq!(engine.state().paddle.pos.x, 352.0);
    }

    #[test]
    fn test_round_loss_uploads_previous_frame_then_notifies() {
        let mut engine = started();
        let mut surface = RecordingSurface::new();
        let mut host = MockHost::default();

        engine.frame(&mut surface, &mut host);
        let previous = surface.export_image().unwrap();

        let state = engine.state_mut();
        state.ball.pos = Vec2::new(100.0, 595.0);
        state.ball.vel = Vec2::new(4.0, 4.0);
        state.score = 3;

        engine.frame(&mut surface, &mut host);
        assert_eq!(host.uploads, vec![previous]);
        assert_eq!(host.notices, vec![Settings::default().game_over_message]);
        assert_eq!(engine.state().score, 0);
    }

    #[test]
    fn test_upload_can_be_disabled() {
        let settings = Settings {
            upload_enabled: false,
            ..Settings::default()
        };
        let mut engine = Engine::new(800.0, 600.0, settings);
        engine.start();
        let mut surface = RecordingSurface::new();
        let mut host = MockHost::default();

        let state = engine.state_mut();
        state.ball.pos = Vec2::new(100.0, 595.0);
        state.ball.vel = Vec2::new(4.0, 4.0);
        engine.frame(&mut surface, &mut host);

        assert!(host.uploads.is_empty());
        assert_eq!(host.notices.len(), 1);
    }

    #[test]
    fn test_win_schedules_reset() {
        let mut engine = started();
        let mut surface = RecordingSurface::new();
        let mut host = MockHost::default();

        let state = engine.state_mut();
        for brick in state.bricks.iter_mut().skip(1) {
            brick.visible = false;
        }
        state.score = 44;
        state.ball.pos = Vec2::new(80.0, 74.0);

        engine.frame(&mut surface, &mut host);
        assert_eq!(host.resets.len(), 1);
        let (token, delay) = host.resets[0];
        assert_eq!(delay, 3000);

        // Hidden ball and paddle are not drawn during the pause
        assert!(
            !surface
                .commands()
                .iter()
                .any(|c| matches!(c, DrawCommand::Circle { .. }))
        );

        assert!(engine.complete_win_reset(token));
        assert_eq!(engine.state().score, 0);
        assert_eq!(engine.state().visible_bricks(), 45);
    }
}
