const BASE_AWARD: u32 = 100;
const POINTS_PER_HEART: u32 = 10;
const POINTS_PER_SECOND: u32 = 5;

/// Points for solving a challenge with `hearts_remaining` and `time_left` seconds to spare.
/// Negative time counts as zero.
pub fn award(hearts_remaining: u32, time_left: i64) -> u32 {
    let secs = time_left.clamp(0, u32::MAX as i64) as u32;
    BASE_AWARD
        .saturating_add(hearts_remaining.saturating_mul(POINTS_PER_HEART))
        .saturating_add(secs.saturating_mul(POINTS_PER_SECOND))
}
