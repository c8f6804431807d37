//! Scoring module - line-clear points, drop points, and level progression

use crate::types::LINES_PER_LEVEL;

/// Points for clearing `lines` rows in one lock: `200 * lines - 100`.
///
/// Zero lines score nothing.
pub fn line_clear_points(lines: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    200u32.saturating_mul(lines).saturating_sub(100)
}

/// One point per cell moved down by the player (soft or hard drop).
pub fn drop_points(cells: u32) -> u32 {
    cells
}

/// `lines / 10 + 1`
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Halve the gravity interval, never going below `min_ms`.
pub fn halve_gravity(current_ms: u32, min_ms: u32) -> u32 {
    (current_ms / 2).max(min_ms)
}

/// Gravity interval after `levels_gained` level-ups from `current_ms`.
pub fn gravity_after_levels(current_ms: u32, min_ms: u32, levels_gained: u32) -> u32 {
    (0..levels_gained).fold(current_ms, |ms, _| halve_gravity(ms, min_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 100);
        assert_eq!(line_clear_points(2), 300);
        assert_eq!(line_clear_points(3), 500);
        assert_eq!(line_clear_points(4), 700);
    }

    #[test]
    fn test_drop_points() {
        assert_eq!(drop_points(0), 0);
        assert_eq!(drop_points(18), 18);
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(19), 2);
        assert_eq!(level_for_lines(20), 3);
    }

    #[test]
    fn test_gravity_ratchet_floor() {
        assert_eq!(halve_gravity(1000, 100), 500);
        assert_eq!(halve_gravity(250, 100), 125);
        assert_eq!(halve_gravity(125, 100), 100);
        assert_eq!(halve_gravity(100, 100), 100);
        assert_eq!(gravity_after_levels(1000, 100, 0), 1000);
        assert_eq!(gravity_after_levels(1000, 100, 2), 250);
        assert_eq!(gravity_after_levels(1000, 100, 10), 100);
    }
}
