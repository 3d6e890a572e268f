//! Scoring module - classic line-clear scoring and gravity cadence
//!
//! Each clear run scores on its own: `LINE_SCORES[lines - 1] * (level + 1)`.
//! Level only ever changes from outside the core.

use crate::types::{DROP_INTERVALS, LINE_SCORES};

/// Points for one clear run of `lines` rows at `level` (0-based), from a points table
///
/// Runs longer than four rows cannot come out of play; if one is staged by hand it
/// earns the four-row value. Zero lines earn nothing.
pub fn line_score(points: &[u32; 4], lines: u32, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base = points[(lines.min(4) - 1) as usize];
    base.saturating_mul(level.saturating_add(1))
}

/// Points for one clear run using the classic table
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    line_score(&LINE_SCORES, lines, level)
}

/// Automatic-drop interval in ticks for a level
///
/// Levels past the table keep the fastest interval.
pub fn drop_interval(level: u32) -> u64 {
    let last = DROP_INTERVALS.len() - 1;
    DROP_INTERVALS[(level as usize).min(last)]
}
