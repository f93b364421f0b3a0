//! Staff position resolution — MIDI pitch + clef → vertical staff
//! coordinate.
//!
//! Coordinates: 0 = top line, 4 = bottom line, 1.0 apart per line,
//! half-integers = spaces, values outside [0,4] = ledger territory.
//! The mapping is diatonic (7 letters per octave), not chromatic, so a
//! naive `pitch/12` scaling is wrong; each clef instead carries a
//! reference table of white-key anchors, and enharmonic spellings of the
//! same pitch resolve to different coordinates.

use crate::error::EngraveError;
use crate::model::{Accidental, Clef, Pitch};
use crate::theory::{is_natural_pitch_class, letter_of, octave_of};

/// Reference data for one clef: white-key anchor pitches mapped to
/// staff-line coordinates. Adding a clef means adding a table here, not
/// branching logic.
pub(crate) struct ClefTable {
    clef: Clef,
    /// `(midi pitch, staff line)`, ascending by pitch; every entry is a
    /// natural spanning roughly two octaves around the clef's home range.
    anchors: &'static [(i32, f64)],
}

/// Treble (G) clef: G4 on the second line from the bottom; middle C on
/// the first ledger line below (5.0).
const TREBLE_ANCHORS: &[(i32, f64)] = &[
    (60, 5.0),
    (62, 4.5),
    (64, 4.0),
    (65, 3.5),
    (67, 3.0),
    (69, 2.5),
    (71, 2.0),
    (72, 1.5),
    (74, 1.0),
    (76, 0.5),
    (77, 0.0),
    (79, -0.5),
    (81, -1.0),
    (83, -1.5),
    (84, -2.0),
];

/// Bass (F) clef: F3 on the second line from the top; middle C on the
/// first ledger line above (-1.0).
const BASS_ANCHORS: &[(i32, f64)] = &[
    (36, 6.0),
    (38, 5.5),
    (40, 5.0),
    (41, 4.5),
    (43, 4.0),
    (45, 3.5),
    (47, 3.0),
    (48, 2.5),
    (50, 2.0),
    (52, 1.5),
    (53, 1.0),
    (55, 0.5),
    (57, 0.0),
    (59, -0.5),
    (60, -1.0),
];

/// Alto (C) clef: middle C on the middle line.
const ALTO_ANCHORS: &[(i32, f64)] = &[
    (48, 5.5),
    (50, 5.0),
    (52, 4.5),
    (53, 4.0),
    (55, 3.5),
    (57, 3.0),
    (59, 2.5),
    (60, 2.0),
    (62, 1.5),
    (64, 1.0),
    (65, 0.5),
    (67, 0.0),
    (69, -0.5),
    (71, -1.0),
    (72, -1.5),
];

/// Tenor (C) clef: middle C on the second line from the top.
const TENOR_ANCHORS: &[(i32, f64)] = &[
    (48, 4.5),
    (50, 4.0),
    (52, 3.5),
    (53, 3.0),
    (55, 2.5),
    (57, 2.0),
    (59, 1.5),
    (60, 1.0),
    (62, 0.5),
    (64, 0.0),
    (65, -0.5),
    (67, -1.0),
    (69, -1.5),
    (71, -2.0),
    (72, -2.5),
];

static CLEF_TABLES: [ClefTable; 4] = [
    ClefTable {
        clef: Clef::Treble,
        anchors: TREBLE_ANCHORS,
    },
    ClefTable {
        clef: Clef::Bass,
        anchors: BASS_ANCHORS,
    },
    ClefTable {
        clef: Clef::Alto,
        anchors: ALTO_ANCHORS,
    },
    ClefTable {
        clef: Clef::Tenor,
        anchors: TENOR_ANCHORS,
    },
];

pub(crate) fn clef_table(clef: Clef) -> Result<&'static ClefTable, EngraveError> {
    CLEF_TABLES
        .iter()
        .find(|t| t.clef == clef)
        .ok_or(EngraveError::UnresolvedClef(clef))
}

/// Diatonic position of a natural pitch: letter steps from C-1.
fn diatonic_index(pitch: i32) -> i32 {
    let letter = letter_of(pitch, false).letter;
    (octave_of(pitch) + 1) * 7 + letter.diatonic_index()
}

impl ClefTable {
    fn lookup(&self, pitch: i32) -> Option<f64> {
        self.anchors
            .iter()
            .find(|&&(p, _)| p == pitch)
            .map(|&(_, line)| line)
    }

    /// Line of a natural pitch: exact anchor when in range, otherwise
    /// extended along the diatonic grid (0.5 per letter step past the
    /// table edge). No per-clef correction shifts are needed this way.
    fn natural_line(&self, pitch: i32) -> f64 {
        if let Some(line) = self.lookup(pitch) {
            return line;
        }
        let &(first_pitch, first_line) = &self.anchors[0];
        let &(last_pitch, last_line) = self.anchors.last().unwrap_or(&self.anchors[0]);
        let (edge_pitch, edge_line) = if pitch < first_pitch {
            (first_pitch, first_line)
        } else {
            (last_pitch, last_line)
        };
        let steps = diatonic_index(pitch) - diatonic_index(edge_pitch);
        edge_line - steps as f64 * 0.5
    }

    /// Enharmonic override: the spelled letter's natural reference pitch
    /// decides the line (MIDI 63 + sharp is D# on D's line, 63 + flat is
    /// Eb on E's). A pitch with no explicit accidental defaults to the
    /// sharp spelling.
    fn spelled_line(&self, pitch: i32, accidental: Accidental) -> Option<f64> {
        let offset = match accidental {
            Accidental::None if !is_natural_pitch_class(pitch) => 1,
            other => other.semitone_offset(),
        };
        let reference = pitch - offset;
        if is_natural_pitch_class(reference) {
            Some(self.natural_line(reference))
        } else {
            None
        }
    }

    /// Fallback for inconsistent spellings (e.g. an explicit natural on
    /// a black-key pitch): interpolate between the nearest anchors, or
    /// extrapolate half a line per semitone when only one neighbor
    /// exists.
    fn interpolate(&self, pitch: i32) -> f64 {
        let lower = self.anchors.iter().rev().find(|&&(p, _)| p < pitch);
        let upper = self.anchors.iter().find(|&&(p, _)| p > pitch);
        match (lower, upper) {
            (Some(&(pl, vl)), Some(&(pu, vu))) => {
                let t = (pitch - pl) as f64 / (pu - pl) as f64;
                vl + t * (vu - vl)
            }
            (Some(&(pl, vl)), None) => vl - (pitch - pl) as f64 * 0.5,
            (None, Some(&(pu, vu))) => vu + (pu - pitch) as f64 * 0.5,
            (None, None) => 2.0,
        }
    }
}

/// Resolve the staff-line coordinate for a pitch on a clef.
///
/// The accidental disambiguates enharmonic spellings. Rests never reach
/// this resolver: they have a fixed display line and are handled by
/// [`crate::resolve_sequence`], so -1 is rejected here.
pub fn resolve_staff_line(
    clef: Clef,
    pitch: Pitch,
    accidental: Accidental,
) -> Result<f64, EngraveError> {
    if !(0..=127).contains(&pitch) {
        return Err(EngraveError::InvalidPitch(pitch));
    }
    let table = clef_table(clef)?;

    if accidental.is_none() {
        if let Some(line) = table.lookup(pitch) {
            return Ok(line);
        }
    }
    if let Some(line) = table.spelled_line(pitch, accidental) {
        return Ok(line);
    }
    Ok(table.interpolate(pitch))
}
