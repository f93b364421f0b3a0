//! Engraving geometry — translates staff-line coordinates into drawing
//! offsets for a given spacing unit.
//!
//! This is the mechanical consumer contract between the engine and a
//! rendering surface: one staff-line unit equals one line spacing, and
//! everything else scales from that.

use crate::ledger::ledger_lines;

/// Default distance between adjacent staff lines, in user units.
pub const STAFF_LINE_SPACING: f64 = 10.0;

/// Spacing context for one staff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaffGeometry {
    /// Distance between adjacent staff lines in the caller's units.
    pub line_spacing: f64,
}

impl Default for StaffGeometry {
    fn default() -> Self {
        Self {
            line_spacing: STAFF_LINE_SPACING,
        }
    }
}

impl StaffGeometry {
    pub fn new(line_spacing: f64) -> Self {
        Self { line_spacing }
    }

    /// Vertical offset from the top staff line for a staff-line
    /// coordinate (positive = downward, matching screen coordinates).
    pub fn y_of(&self, staff_line: f64) -> f64 {
        staff_line * self.line_spacing
    }

    /// Total height of the five-line staff (4 spaces).
    pub fn staff_height(&self) -> f64 {
        4.0 * self.line_spacing
    }

    /// Offsets of the five staff lines from the staff top.
    pub fn line_ys(&self) -> [f64; 5] {
        [
            0.0,
            self.line_spacing,
            2.0 * self.line_spacing,
            3.0 * self.line_spacing,
            4.0 * self.line_spacing,
        ]
    }

    /// Offsets at which to draw the ledger lines for a resolved note.
    pub fn ledger_ys(&self, staff_line: f64) -> Vec<f64> {
        ledger_lines(staff_line)
            .into_iter()
            .map(|line| self.y_of(line))
            .collect()
    }
}
