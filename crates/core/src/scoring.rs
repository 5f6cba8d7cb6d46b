//! Scoring module - line clear points, level progression and gravity speed
//!
//! - Every lock event scores `100 x level x lines` (linear, no multi-line bonus).
//! - Level is `1 + score / step`; it never decreases within a game.
//! - Gravity interval is `base / level`, clamped below at a floor.

use crate::types::LINE_CLEAR_POINTS;

/// Points for clearing `lines` rows in one lock at `level`
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    LINE_CLEAR_POINTS
        .saturating_mul(level)
        .saturating_mul(lines)
}

/// Level reached with a cumulative `score`
pub fn calculate_level(score: u32, level_score_step: u32) -> u32 {
    1 + score / level_score_step.max(1)
}

/// Gravity interval for a level (in milliseconds)
pub fn get_gravity_interval_ms(level: u32, base_ms: u32, min_ms: u32) -> u32 {
    (base_ms / level.max(1)).max(min_ms)
}
