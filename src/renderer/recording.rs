//! Surface that records draw calls instead of rasterizing them

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{RenderError, Surface};

/// MIME type of exported recordings
pub const RECORDING_MIME: &str = "application/json";

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        pos: Vec2,
        size: Vec2,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: String,
    },
    Rect {
        pos: Vec2,
        size: Vec2,
        color: String,
    },
    Text {
        text: String,
        pos: Vec2,
        font: String,
        color: String,
    },
}

/// Keeps the draw calls since the last clear, i.e. the current frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of clears seen so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, pos: Vec2, size: Vec2) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear { pos, size });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str) {
        self.commands.push(DrawCommand::Rect {
            pos,
            size,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            color: color.to_string(),
        });
    }

    fn export_image(&self) -> Result<String, RenderError> {
        let json = serde_json::to_vec(&self.commands)?;
        Ok(format!(
            "data:{};base64,{}",
            RECORDING_MIME,
            STANDARD.encode(json)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_starts_new_frame() {
        let mut surface = RecordingSurface::new();
        surface.clear_rect(Vec2::ZERO, Vec2::new(800.0, 600.0));
        surface.fill_rect(Vec2::ZERO, Vec2::ONE, "red");
        surface.clear_rect(Vec2::ZERO, Vec2::new(800.0, 600.0));
        assert_eq!(surface.commands().len(), 1);
        assert_eq!(surface.frames(), 2);
    }

    #[test]
    fn test_export_decodes_back_to_commands() {
        let mut surface = RecordingSurface::new();
        surface.clear_rect(Vec2::ZERO, Vec2::new(800.0, 600.0));
        surface.fill_circle(Vec2::new(400.0, 300.0), 10.0, "#0095dd");

        let url = surface.export_image().unwrap();
        let payload = url
            .strip_prefix("data:application/json;base64,")
            .expect("data url prefix");
        let bytes = STANDARD.decode(payload).unwrap();
        let commands: Vec<DrawCommand> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(commands, surface.commands());
    }
}
