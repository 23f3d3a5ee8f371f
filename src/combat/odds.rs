//! Flee and capture probabilities.

use crate::core::ElementType;
use crate::items::CaptureStone;

/// Flee success chance.
///
/// `clamp(0.5 + 0.3 * (player - enemy) / max(1, enemy), 0.1, 0.9)`
#[must_use]
pub fn flee_chance(player_speed: i32, enemy_speed: i32) -> f64 {
    let diff = f64::from(player_speed) - f64::from(enemy_speed);
    let scale = f64::from(enemy_speed.max(1));
    (0.5 + 0.3 * diff / scale).clamp(0.1, 0.9)
}

/// Capture chance without a stone.
///
/// `clamp(0.5 * (1 - health_fraction) * (1 - min(0.7, level*0.05)), 0.1, 0.9)`
#[must_use]
pub fn capture_chance(health_fraction: f64, level: u32) -> f64 {
    let missing = 1.0 - health_fraction.clamp(0.0, 1.0);
    let level_penalty = (f64::from(level) * 0.05).min(0.7);
    (0.5 * missing * (1.0 - level_penalty)).clamp(0.1, 0.9)
}

/// Capture chance with a stone, clamped to `[0.1, 0.95]`.
#[must_use]
pub fn capture_chance_with_stone(
    health_fraction: f64,
    level: u32,
    stone: &CaptureStone,
    element: ElementType,
) -> f64 {
    (capture_chance(health_fraction, level) * stone.multiplier_against(element)).clamp(0.1, 0.95)
}
