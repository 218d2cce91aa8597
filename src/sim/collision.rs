//! Collision tests between the ball, the surface edges, the paddle and bricks
//!
//! All checks work on axis-aligned bounding boxes. The ball is treated as the
//! square that encloses it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Which velocity components a wall check flipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallHit {
    pub horizontal: bool,
    pub vertical: bool,
}

/// Check the ball box against the surface edges.
///
/// `horizontal` means a side wall was crossed (negate dx), `vertical` means
/// the top or bottom edge was crossed (negate dy).
pub fn wall_hit(ball: &Rect, width: f32, height: f32) -> WallHit {
    WallHit {
        horizontal: ball.right() > width || ball.left() < 0.0,
        vertical: ball.bottom() > height || ball.top() < 0.0,
    }
}

/// Apply a wall hit to a velocity
pub fn reflect(vel: Vec2, hit: WallHit) -> Vec2 {
    Vec2::new(
        if hit.horizontal { -vel.x } else { vel.x },
        if hit.vertical { -vel.y } else { vel.y },
    )
}

/// Ball sits strictly inside the paddle's horizontal extent and has reached
/// its top edge. There is no lower bound, so a ball already below the paddle
/// top still counts.
pub fn paddle_contact(ball: &Rect, paddle: &Rect) -> bool {
    ball.left() > paddle.left() && ball.right() < paddle.right() && ball.bottom() > paddle.top()
}

/// Ball box strictly inside the brick horizontally and overlapping it
/// vertically
pub fn brick_contact(ball: &Rect, brick: &Rect) -> bool {
    ball.left() > brick.left()
        && ball.right() < brick.right()
        && ball.bottom() > brick.top()
        && ball.top() < brick.bottom()
}

/// Ball bottom edge is past the surface bottom
pub fn below_floor(ball: &Rect, height: f32) -> bool {
    ball.bottom() > height
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball_box(x: f32, y: f32) -> Rect {
        Rect::new(Vec2::new(x - 10.0, y - 10.0), Vec2::splat(20.0))
    }

    #[test]
    fn test_wall_hit_right() {
        let hit = wall_hit(&ball_box(795.0, 300.0), 800.0, 600.0);
        assert!(hit.horizontal);
        assert!(!hit.vertical);
    }

    #[test]
    fn test_wall_hit_corner() {
        let hit = wall_hit(&ball_box(5.0, 5.0), 800.0, 600.0);
        assert!(hit.horizontal);
        assert!(hit.vertical);
        assert_eq!(reflect(Vec2::new(-4.0, -4.0), hit), Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_touching_edge_is_not_a_hit() {
        // right edge exactly at 800
        let hit = wall_hit(&ball_box(790.0, 300.0), 800.0, 600.0);
        assert_eq!(hit, WallHit::default());
    }

    #[test]
    fn test_paddle_contact_requires_strict_overlap() {
        let paddle = Rect::new(Vec2::new(360.0, 580.0), Vec2::new(80.0, 10.0));
        assert!(paddle_contact(&ball_box(400.0, 575.0), &paddle));
        // Hanging over the paddle's left edge
        assert!(!paddle_contact(&ball_box(365.0, 575.0), &paddle));
        // Not low enough yet
        assert!(!paddle_contact(&ball_box(400.0, 570.0), &paddle));
    }

    #[test]
    fn test_brick_contact() {
        let brick = Rect::new(Vec2::new(45.0, 60.0), Vec2::new(70.0, 20.0));
        assert!(brick_contact(&ball_box(84.0, 70.0), &brick));
        assert!(!brick_contact(&ball_box(84.0, 100.0), &brick));
        assert!(!brick_contact(&ball_box(120.0, 70.0), &brick));
    }

    proptest! {
        #[test]
        fn reflection_flips_only_crossed_axis(
            x in -20.0f32..820.0,
            y in -20.0f32..620.0,
            dx in prop_oneof![Just(-4.0f32), Just(4.0f32)],
            dy in prop_oneof![Just(-4.0f32), Just(4.0f32)],
        ) {
            let hit = wall_hit(&ball_box(x, y), 800.0, 600.0);
            let out = reflect(Vec2::new(dx, dy), hit);
            prop_assert_eq!(out.x == -dx, hit.horizontal);
            prop_assert_eq!(out.y == -dy, hit.vertical);
            prop_assert_eq!(out.length(), Vec2::new(dx, dy).length());
        }
    }
}
