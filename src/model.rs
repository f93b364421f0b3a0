//! Data model for the staff notation engine.
//!
//! These structures capture the engine-facing projection of a note
//! sequence: MIDI pitch, explicit accidental, and tie marks. The engine
//! never mutates a `Note`; it only computes derived values
//! (staff line, ledger lines, accidental to draw) alongside it.

use serde::{Deserialize, Serialize};

use crate::error::EngraveError;
use crate::theory::{Letter, FLAT_ORDER, SHARP_ORDER};

/// MIDI note number. 0-127 are sounding pitches; [`REST`] (-1) is a rest.
pub type Pitch = i32;

/// Reserved pitch value meaning "no pitch" (a rest).
pub const REST: Pitch = -1;

/// Validate that a pitch is a rest or within the MIDI range.
pub fn validate_pitch(pitch: Pitch) -> Result<(), EngraveError> {
    if pitch == REST || (0..=127).contains(&pitch) {
        Ok(())
    } else {
        Err(EngraveError::InvalidPitch(pitch))
    }
}

/// Accidental kinds.
///
/// Attached to a [`Note`] as the *explicit* accidental the caller
/// requested, which is distinct from what must visually be drawn — the
/// tracker may override the drawn glyph to natural or suppress it.
/// Serialized with the MusicXML accidental names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accidental {
    /// No explicit accidental.
    #[default]
    None,
    Sharp,
    Flat,
    Natural,
    DoubleSharp,
    #[serde(rename = "flat-flat")]
    DoubleFlat,
}

impl Accidental {
    /// Semitone offset this accidental applies to a letter's natural
    /// pitch. `None` and `Natural` both leave the letter unaltered.
    pub fn semitone_offset(self) -> i32 {
        match self {
            Accidental::None | Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
            Accidental::DoubleSharp => 2,
            Accidental::DoubleFlat => -2,
        }
    }

    pub fn is_none(self) -> bool {
        self == Accidental::None
    }

    /// ASCII suffix used in note labels ("C#4", "Bb3").
    pub fn suffix(self) -> &'static str {
        match self {
            Accidental::None | Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
            Accidental::DoubleSharp => "##",
            Accidental::DoubleFlat => "bb",
        }
    }
}

/// Clef variants with a registered reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    Treble,
    Bass,
    Alto,
    Tenor,
}

/// A key signature: a position on the circle of fifths.
///
/// Sharps are positive, flats negative, in -7..=7 (the 15 standard major
/// signatures). Serialized as the bare fifths count, which also validates
/// on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct KeySignature {
    fifths: i8,
}

impl KeySignature {
    pub const C_MAJOR: KeySignature = KeySignature { fifths: 0 };

    /// Build from a circle-of-fifths count (sharps positive, flats
    /// negative).
    pub fn from_fifths(fifths: i32) -> Result<Self, EngraveError> {
        if (-7..=7).contains(&fifths) {
            Ok(Self { fifths: fifths as i8 })
        } else {
            Err(EngraveError::InvalidKeySignature(format!(
                "fifths {fifths} outside -7..=7"
            )))
        }
    }

    /// Major key by tonic name, e.g. "C", "F#", "Bb".
    pub fn major(tonic: &str) -> Result<Self, EngraveError> {
        Ok(Self {
            fifths: crate::theory::major_fifths(tonic)?,
        })
    }

    /// Minor key by tonic name. A minor key's signature equals its
    /// relative major's (A minor shares C major's empty signature).
    pub fn minor(tonic: &str) -> Result<Self, EngraveError> {
        Self::major(crate::theory::relative_major(tonic)?)
    }

    pub fn fifths(self) -> i32 {
        self.fifths as i32
    }

    /// Number of accidentals in the signature (0-7).
    pub fn accidental_count(self) -> u8 {
        self.fifths.unsigned_abs()
    }

    pub fn is_sharp(self) -> bool {
        self.fifths > 0
    }

    pub fn is_flat(self) -> bool {
        self.fifths < 0
    }

    /// The accidental this signature applies to its letters: sharp or
    /// flat, or `None` for C major / A minor.
    pub fn polarity(self) -> Accidental {
        if self.fifths > 0 {
            Accidental::Sharp
        } else if self.fifths < 0 {
            Accidental::Flat
        } else {
            Accidental::None
        }
    }

    /// The letters affected by this signature, in signature order
    /// (the first N of the canonical sharp or flat order).
    pub fn letters(self) -> &'static [Letter] {
        let n = self.accidental_count() as usize;
        if self.is_sharp() {
            &SHARP_ORDER[..n]
        } else {
            &FLAT_ORDER[..n]
        }
    }
}

impl TryFrom<i8> for KeySignature {
    type Error = EngraveError;

    fn try_from(fifths: i8) -> Result<Self, Self::Error> {
        KeySignature::from_fifths(fifths as i32)
    }
}

impl From<KeySignature> for i8 {
    fn from(key: KeySignature) -> i8 {
        key.fifths
    }
}

/// Tie mark on a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tie {
    Start,
    Stop,
}

/// A single note event as the engine sees it. Immutable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI pitch, or [`REST`] for a rest.
    pub pitch: Pitch,
    /// Explicit accidental requested by the caller.
    #[serde(default)]
    pub accidental: Accidental,
    /// Tie mark, if the note starts or continues a tie.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie: Option<Tie>,
}

impl Note {
    pub fn new(pitch: Pitch, accidental: Accidental) -> Self {
        Self {
            pitch,
            accidental,
            tie: None,
        }
    }

    pub fn rest() -> Self {
        Self {
            pitch: REST,
            accidental: Accidental::None,
            tie: None,
        }
    }

    pub fn with_tie(mut self, tie: Tie) -> Self {
        self.tie = Some(tie);
        self
    }

    pub fn is_rest(&self) -> bool {
        self.pitch == REST
    }
}

/// Everything a renderer needs to place one note on the staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedNote {
    /// Vertical staff-line coordinate (0 = top line, 4 = bottom line,
    /// half-integers = spaces; outside [0,4] = ledger territory).
    pub staff_line: f64,
    /// Integer line positions at which ledger lines must be drawn,
    /// ordered outward from the staff.
    pub ledger_lines: Vec<f64>,
    /// Accidental glyph to draw in front of the note; `None` = nothing.
    pub accidental: Accidental,
    /// Whether this event is a rest (displayed on the middle line).
    pub rest: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_signature_letters_follow_signature_order() {
        let d = KeySignature::major("D").unwrap();
        assert_eq!(d.fifths(), 2);
        assert_eq!(d.letters(), &[Letter::F, Letter::C]);

        let bb = KeySignature::major("Bb").unwrap();
        assert_eq!(bb.fifths(), -2);
        assert_eq!(bb.letters(), &[Letter::B, Letter::E]);

        assert!(KeySignature::C_MAJOR.letters().is_empty());
    }

    #[test]
    fn key_signature_rejects_out_of_range_fifths() {
        assert!(KeySignature::from_fifths(8).is_err());
        assert!(KeySignature::from_fifths(-8).is_err());
        assert!(KeySignature::from_fifths(7).is_ok());
        assert!(KeySignature::from_fifths(-7).is_ok());
    }

    #[test]
    fn minor_keys_share_relative_major_signature() {
        let a_minor = KeySignature::minor("A").unwrap();
        assert_eq!(a_minor, KeySignature::C_MAJOR);

        let e_minor = KeySignature::minor("E").unwrap();
        assert_eq!(e_minor, KeySignature::major("G").unwrap());

        // Enharmonic wrap near the end of the circle
        let ds_minor = KeySignature::minor("D#").unwrap();
        assert_eq!(ds_minor, KeySignature::major("F#").unwrap());
    }

    #[test]
    fn accidental_serializes_with_musicxml_names() {
        let json = serde_json::to_string(&Accidental::DoubleSharp).unwrap();
        assert_eq!(json, "\"double-sharp\"");
        let json = serde_json::to_string(&Accidental::DoubleFlat).unwrap();
        assert_eq!(json, "\"flat-flat\"");

        let acc: Accidental = serde_json::from_str("\"natural\"").unwrap();
        assert_eq!(acc, Accidental::Natural);
    }

    #[test]
    fn pitch_validation_bounds() {
        assert!(validate_pitch(REST).is_ok());
        assert!(validate_pitch(0).is_ok());
        assert!(validate_pitch(127).is_ok());
        assert_eq!(validate_pitch(128), Err(EngraveError::InvalidPitch(128)));
        assert_eq!(validate_pitch(-2), Err(EngraveError::InvalidPitch(-2)));
    }
}
