//! Ledger line computation for notes above or below the five-line staff.
//!
//! Ledger lines sit only at whole-line positions: the first integer past
//! the staff edge (-1 above, 5 below), stepping outward by 1.0 up to and
//! including the integer at or just past the note. A note in the space
//! one ledger-step beyond the staff still gets the nearest line drawn
//! through the gap beside it.

/// True when a staff-line coordinate lies outside the staff body.
pub fn needs_ledger_line(staff_line: f64) -> bool {
    staff_line < 0.0 || staff_line > 4.0
}

/// Integer line positions at which ledger lines must be drawn, ordered
/// outward from the staff. Empty for `0 <= staff_line <= 4`.
pub fn ledger_lines(staff_line: f64) -> Vec<f64> {
    let mut lines = Vec::new();
    if staff_line < 0.0 {
        let mut y = -1.0;
        while y >= staff_line {
            lines.push(y);
            y -= 1.0;
        }
    } else if staff_line > 4.0 {
        let mut y = 5.0;
        while y <= staff_line {
            lines.push(y);
            y += 1.0;
        }
    }
    lines
}
