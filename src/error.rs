//! Error types for the notation engine.

use thiserror::Error;

use crate::model::Clef;

/// Errors reported by the engine.
///
/// None of these are recoverable internally; the engine never retries or
/// degrades. It reports and lets the caller decide (e.g. skip the
/// malformed note). There is no partial-failure mode: a note either
/// resolves fully or the call fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngraveError {
    /// Pitch outside the MIDI range (and not the rest sentinel where a
    /// rest is allowed).
    #[error("invalid MIDI pitch {0}: expected -1 (rest) or 0-127")]
    InvalidPitch(i32),

    /// A clef variant with no registered reference table.
    #[error("no reference table registered for clef {0:?}")]
    UnresolvedClef(Clef),

    /// An accidental-count/polarity combination outside the 0-7 sharps
    /// or flats space, or an unrecognized tonic name.
    #[error("invalid key signature: {0}")]
    InvalidKeySignature(String),

    /// Keyboard key index outside the 88-key range.
    #[error("invalid key index {0}: expected 0-87")]
    InvalidKeyIndex(usize),
}
