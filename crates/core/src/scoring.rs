//! Scoring module - line clear and drop points
//!
//! Two rule sets are supported:
//! - `classic` (default): `[0, 40, 100, 300, 1200] x level`, hard drop 2 points per row,
//!   manual soft drop 1 point per row.
//! - `flat`: `[0, 100, 300, 500, 800]` regardless of level, hard drop 1 point per row,
//!   no soft drop points.
//!
//! Points for a clear use the level in force before the cleared lines are counted.

use crate::types::{CLASSIC_LINE_SCORES, FLAT_LINE_SCORES};

/// Scoring constants for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    /// Points indexed by lines cleared at once (0-4).
    pub line_scores: [u32; 5],
    /// Multiply line points by the current level.
    pub level_multiplier: bool,
    pub hard_drop_points_per_row: u32,
    /// Awarded only for player-initiated soft drops, never for gravity.
    pub soft_drop_points: u32,
}

impl ScoringRules {
    pub const fn classic() -> Self {
        Self {
            line_scores: CLASSIC_LINE_SCORES,
            level_multiplier: true,
            hard_drop_points_per_row: 2,
            soft_drop_points: 1,
        }
    }

    pub const fn flat() -> Self {
        Self {
            line_scores: FLAT_LINE_SCORES,
            level_multiplier: false,
            hard_drop_points_per_row: 1,
            soft_drop_points: 0,
        }
    }

    /// Look up a named preset (`classic` or `flat`, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "classic" => Some(Self::classic()),
            "flat" => Some(Self::flat()),
            _ => None,
        }
    }

    /// Points for clearing `lines` rows at once at `level`.
    ///
    /// More than four rows cannot come from a single piece; they score as four.
    pub fn line_clear_points(&self, lines: usize, level: u32) -> u32 {
        if lines == 0 {
            return 0;
        }
        let base = self.line_scores[lines.min(4)];
        if self.level_multiplier {
            base.saturating_mul(level.max(1))
        } else {
            base
        }
    }

    pub fn hard_drop_points(&self, rows: u32) -> u32 {
        rows.saturating_mul(self.hard_drop_points_per_row)
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_single_and_tetris_at_level_one() {
        let rules = ScoringRules::classic();
        assert_eq!(rules.line_clear_points(1, 1), 40);
        assert_eq!(rules.line_clear_points(2, 1), 100);
        assert_eq!(rules.line_clear_points(3, 1), 300);
        assert_eq!(rules.line_clear_points(4, 1), 1200);
    }

    #[test]
    fn classic_scales_with_level() {
        let rules = ScoringRules::classic();
        assert_eq!(rules.line_clear_points(4, 3), 3600);
        assert_eq!(rules.line_clear_points(1, 5), 200);
    }

    #[test]
    fn flat_ignores_level() {
        let rules = ScoringRules::flat();
        assert_eq!(rules.line_clear_points(1, 1), 100);
        assert_eq!(rules.line_clear_points(4, 9), 800);
        assert_eq!(rules.hard_drop_points(7), 7);
    }

    #[test]
    fn zero_lines_score_nothing() {
        assert_eq!(ScoringRules::classic().line_clear_points(0, 10), 0);
        assert_eq!(ScoringRules::flat().line_clear_points(0, 10), 0);
    }

    #[test]
    fn hard_drop_is_two_per_row_by_default() {
        assert_eq!(ScoringRules::default().hard_drop_points(0), 0);
        assert_eq!(ScoringRules::default().hard_drop_points(18), 36);
    }

    #[test]
    fn presets_by_name() {
        assert_eq!(ScoringRules::from_name("Classic"), Some(ScoringRules::classic()));
        assert_eq!(ScoringRules::from_name(" flat "), Some(ScoringRules::flat()));
        assert_eq!(ScoringRules::from_name("nes"), None);
    }
}
