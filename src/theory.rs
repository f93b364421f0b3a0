//! Pitch and key-signature theory: note-name tables, the circle of
//! fifths, and enharmonic spelling.
//!
//! Everything here is a pure lookup — no state. Notation position is
//! diatonic (7 letters per octave), so the rest of the engine leans on
//! these tables instead of chromatic arithmetic.

use crate::error::EngraveError;
use crate::model::{Accidental, Pitch};

/// The seven letter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Pitch class of the letter's natural (C = 0 ... B = 11).
    pub fn natural_pitch_class(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Position of the letter within an octave's seven diatonic steps.
    pub fn diatonic_index(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        }
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order in which sharps appear in a key signature.
pub const SHARP_ORDER: [Letter; 7] = [
    Letter::F,
    Letter::C,
    Letter::G,
    Letter::D,
    Letter::A,
    Letter::E,
    Letter::B,
];

/// Order in which flats appear in a key signature.
pub const FLAT_ORDER: [Letter; 7] = [
    Letter::B,
    Letter::E,
    Letter::A,
    Letter::D,
    Letter::G,
    Letter::C,
    Letter::F,
];

/// A spelled note name: letter plus accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteName {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl std::fmt::Display for NoteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.letter, self.accidental.suffix())
    }
}

const fn nn(letter: Letter, accidental: Accidental) -> NoteName {
    NoteName { letter, accidental }
}

/// Spelling of each pitch class with sharps. Natural pitch classes carry
/// no accidental.
const SHARP_SPELLINGS: [NoteName; 12] = [
    nn(Letter::C, Accidental::None),
    nn(Letter::C, Accidental::Sharp),
    nn(Letter::D, Accidental::None),
    nn(Letter::D, Accidental::Sharp),
    nn(Letter::E, Accidental::None),
    nn(Letter::F, Accidental::None),
    nn(Letter::F, Accidental::Sharp),
    nn(Letter::G, Accidental::None),
    nn(Letter::G, Accidental::Sharp),
    nn(Letter::A, Accidental::None),
    nn(Letter::A, Accidental::Sharp),
    nn(Letter::B, Accidental::None),
];

/// Spelling of each pitch class with flats.
const FLAT_SPELLINGS: [NoteName; 12] = [
    nn(Letter::C, Accidental::None),
    nn(Letter::D, Accidental::Flat),
    nn(Letter::D, Accidental::None),
    nn(Letter::E, Accidental::Flat),
    nn(Letter::E, Accidental::None),
    nn(Letter::F, Accidental::None),
    nn(Letter::G, Accidental::Flat),
    nn(Letter::G, Accidental::None),
    nn(Letter::A, Accidental::Flat),
    nn(Letter::A, Accidental::None),
    nn(Letter::B, Accidental::Flat),
    nn(Letter::B, Accidental::None),
];

/// Pitch class (0-11) of a pitch.
pub fn pitch_class(pitch: Pitch) -> i32 {
    pitch.rem_euclid(12)
}

/// Octave in MIDI convention (middle C = 60 = C4).
pub fn octave_of(pitch: Pitch) -> i32 {
    pitch.div_euclid(12) - 1
}

/// Whether a pitch's class is one of the seven naturals.
pub fn is_natural_pitch_class(pitch: Pitch) -> bool {
    matches!(pitch_class(pitch), 0 | 2 | 4 | 5 | 7 | 9 | 11)
}

/// Spell a pitch as a letter name using the fixed 12-entry tables.
/// Natural pitch classes map to the bare letter regardless of the flag.
pub fn letter_of(pitch: Pitch, prefer_flats: bool) -> NoteName {
    let pc = pitch_class(pitch) as usize;
    if prefer_flats {
        FLAT_SPELLINGS[pc]
    } else {
        SHARP_SPELLINGS[pc]
    }
}

/// Spelled name of a pitch under an explicit accidental.
///
/// The accidental's semitone offset points at the natural letter the
/// note is written on: C#4 sits on C's line, Db4 on D's, and the rule
/// also covers E#/Fb/B#/Cb and double accidentals. A black key with no
/// explicit accidental falls back to the plain tables, using the flat
/// table when `prefer_flats` (typically: the key signature is flat).
pub fn spelled(pitch: Pitch, accidental: Accidental, prefer_flats: bool) -> NoteName {
    if accidental.is_none() && !is_natural_pitch_class(pitch) {
        return letter_of(pitch, prefer_flats);
    }
    let reference = pitch - accidental.semitone_offset();
    if is_natural_pitch_class(reference) {
        NoteName {
            letter: letter_of(reference, false).letter,
            accidental,
        }
    } else {
        // Inconsistent spelling (e.g. an explicit natural on a black
        // key): keep the requested accidental on the table letter
        let table_flats = matches!(accidental, Accidental::Flat | Accidental::DoubleFlat);
        let mut name = letter_of(pitch, table_flats);
        name.accidental = accidental;
        name
    }
}

/// Circle-of-fifths position of a major tonic: sharps positive, flats
/// negative (C = 0, G = 1, ..., C# = 7; F = -1, ..., Cb = -7).
const MAJOR_FIFTHS: [(&str, i8); 15] = [
    ("C", 0),
    ("G", 1),
    ("D", 2),
    ("A", 3),
    ("E", 4),
    ("B", 5),
    ("F#", 6),
    ("C#", 7),
    ("F", -1),
    ("Bb", -2),
    ("Eb", -3),
    ("Ab", -4),
    ("Db", -5),
    ("Gb", -6),
    ("Cb", -7),
];

/// Relative major for each of the 15 standard minor tonics, including
/// the enharmonic wraps near the end of the circle.
const RELATIVE_MAJOR: [(&str, &str); 15] = [
    ("A", "C"),
    ("E", "G"),
    ("B", "D"),
    ("F#", "A"),
    ("C#", "E"),
    ("G#", "B"),
    ("D#", "F#"),
    ("A#", "C#"),
    ("D", "F"),
    ("G", "Bb"),
    ("C", "Eb"),
    ("F", "Ab"),
    ("Bb", "Db"),
    ("Eb", "Gb"),
    ("Ab", "Cb"),
];

/// Fifths count for a major tonic name.
pub fn major_fifths(tonic: &str) -> Result<i8, EngraveError> {
    MAJOR_FIFTHS
        .iter()
        .find(|(name, _)| *name == tonic)
        .map(|&(_, fifths)| fifths)
        .ok_or_else(|| EngraveError::InvalidKeySignature(format!("unknown major tonic '{tonic}'")))
}

/// Number of accidentals (0-7) in a major key.
pub fn accidental_count(tonic: &str) -> Result<u8, EngraveError> {
    Ok(major_fifths(tonic)?.unsigned_abs())
}

/// Whether a major key takes sharps (G, D, A, E, B, F#, C#).
pub fn is_sharp_key(tonic: &str) -> Result<bool, EngraveError> {
    Ok(major_fifths(tonic)? > 0)
}

/// Relative major of a minor tonic (A minor → C major, etc.).
pub fn relative_major(tonic: &str) -> Result<&'static str, EngraveError> {
    RELATIVE_MAJOR
        .iter()
        .find(|(minor, _)| *minor == tonic)
        .map(|&(_, major)| major)
        .ok_or_else(|| EngraveError::InvalidKeySignature(format!("unknown minor tonic '{tonic}'")))
}
