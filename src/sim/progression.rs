//! Distance progression
//!
//! Distance accrues from wall-clock deltas scaled by the current speed
//! multiplier; the multiplier itself is owned by the collectible count (see
//! `session`). Tier state is always recomputed from absolute distance, never
//! by counting frames, so frame-rate variance cannot skew progression.

use crate::tuning::Tuning;

/// Sanitize a frame delta
///
/// Negative or NaN deltas (bad clocks) become zero; spikes (backgrounded tab
/// catching up) are clamped so one tick can never advance distance or spawn
/// accumulators by an unbounded amount.
#[inline]
pub fn clamp_dt(dt: f32, max_tick_dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        return 0.0;
    }
    dt.min(max_tick_dt)
}

/// Distance gained over `dt` seconds at the given multiplier
#[inline]
pub fn distance_gain(tuning: &Tuning, multiplier: f32, dt: f32) -> f32 {
    tuning.base_speed() * multiplier * dt
}
