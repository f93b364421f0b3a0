//! Virtual piano keyboard helpers — key ↔ pitch mapping for note input.
//!
//! The rendering of the keyboard itself is the UI's job; this module
//! carries the model side: the 88-key range, black/white classification,
//! and display labels.

use crate::error::EngraveError;
use crate::model::Pitch;
use crate::theory::{letter_of, octave_of, pitch_class};

/// Lowest key of a standard 88-key piano (A0).
pub const PIANO_LOW: Pitch = 21;

/// Highest key of a standard 88-key piano (C8).
pub const PIANO_HIGH: Pitch = 108;

/// Number of keys on a standard piano.
pub const PIANO_KEYS: usize = 88;

/// Whether a pitch falls on a black key.
pub fn is_black_key(pitch: Pitch) -> bool {
    matches!(pitch_class(pitch), 1 | 3 | 6 | 8 | 10)
}

/// MIDI pitch of the nth key (0-based from A0) on an 88-key keyboard.
pub fn key_to_pitch(index: usize) -> Result<Pitch, EngraveError> {
    if index < PIANO_KEYS {
        Ok(PIANO_LOW + index as Pitch)
    } else {
        Err(EngraveError::InvalidKeyIndex(index))
    }
}

/// 0-based key index of a pitch on an 88-key keyboard.
pub fn pitch_to_key(pitch: Pitch) -> Result<usize, EngraveError> {
    if (PIANO_LOW..=PIANO_HIGH).contains(&pitch) {
        Ok((pitch - PIANO_LOW) as usize)
    } else {
        Err(EngraveError::InvalidPitch(pitch))
    }
}

/// Display label for a key, e.g. "C4", "F#4" or "Gb4".
pub fn key_label(pitch: Pitch, prefer_flats: bool) -> Result<String, EngraveError> {
    if !(0..=127).contains(&pitch) {
        return Err(EngraveError::InvalidPitch(pitch));
    }
    let name = letter_of(pitch, prefer_flats);
    Ok(format!("{}{}", name, octave_of(pitch)))
}
