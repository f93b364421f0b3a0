//! Key-signature accidental tracking across a measure.
//!
//! A tracker decides, note by note in chronological order, whether an
//! accidental glyph must be drawn, and remembers what is currently in
//! effect for each letter. One tracker instance belongs to one staff for
//! one rendering pass; staves rendered concurrently must each own their
//! own instance, and the tracker is reset at measure boundaries and key
//! changes.
//!
//! The memory is keyed by the spelled letter's natural pitch class: a
//! C#4 earlier in the measure is what forces the natural on a later C4,
//! even though the two pitches have different chromatic classes.

use std::collections::HashSet;

use crate::model::{Accidental, KeySignature, Note, Pitch, Tie};
use crate::theory::{spelled, NoteName};

#[derive(Debug, Clone)]
pub struct AccidentalTracker {
    key: KeySignature,
    /// Accidental currently in effect per pitch class. Only the seven
    /// natural classes (the letter slots) are ever occupied.
    state: [Accidental; 12],
    /// Pitches with an open tie; a tie continuation never restates its
    /// accidental.
    tied: HashSet<Pitch>,
}

impl AccidentalTracker {
    pub fn new(key: KeySignature) -> Self {
        let mut tracker = Self {
            key,
            state: [Accidental::None; 12],
            tied: HashSet::new(),
        };
        tracker.reset(key);
        tracker
    }

    /// Clear the memory and reseed it from a key signature: each letter
    /// in the key's accidental list starts at the key's polarity, every
    /// other letter at `None`, and open tie marks are dropped. Call at
    /// the start of each measure and whenever the key signature changes.
    pub fn reset(&mut self, key: KeySignature) {
        self.key = key;
        self.state = [Accidental::None; 12];
        self.tied.clear();
        for letter in key.letters() {
            self.state[letter.natural_pitch_class() as usize] = key.polarity();
        }
    }

    pub fn key(&self) -> KeySignature {
        self.key
    }

    /// Accidental currently in effect for a letter slot.
    pub fn current(&self, letter: crate::theory::Letter) -> Accidental {
        self.state[letter.natural_pitch_class() as usize]
    }

    /// Spell a note in the context of this key: a bare black key takes
    /// the flat spelling in flat keys (MIDI 70 in Bb major is Bb, not
    /// A#), the sharp spelling everywhere else.
    fn spell(&self, note: &Note) -> NoteName {
        spelled(note.pitch, note.accidental, self.key.is_flat())
    }

    /// Drop all open tie marks. Call at the end of a measure.
    pub fn clear_tied_notes(&mut self) {
        self.tied.clear();
    }

    /// Whether an accidental glyph must be drawn for this note.
    /// Read-only: calling it twice without an intervening [`update`]
    /// returns the same answer.
    ///
    /// [`update`]: AccidentalTracker::update
    pub fn needs_accidental(&self, note: &Note) -> bool {
        if note.is_rest() {
            return false;
        }
        // A tied continuation keeps the accidental of the note it is
        // tied from.
        if note.tie == Some(Tie::Stop) && self.tied.contains(&note.pitch) {
            return false;
        }

        let name = self.spell(note);
        let current = self.current(name.letter);
        let effective = effective_accidental(note, name);

        if self.key.letters().contains(&name.letter) {
            let polarity = self.key.polarity();
            if effective == polarity {
                // Matches the signature: silent, unless a prior note
                // altered this letter and the accidental must be
                // restated.
                current != polarity
            } else {
                true
            }
        } else if !note.accidental.is_none() {
            true
        } else if effective.is_none() {
            // A plain natural: draw a cancelling natural only if a prior
            // note altered this letter.
            !current.is_none()
        } else {
            // Implicitly altered (black key, no explicit accidental):
            // draw only when it differs from what is in effect.
            effective != current
        }
    }

    /// The glyph to draw for this note: `None` when nothing is needed,
    /// natural when an accidental is required but the note sounds
    /// natural, otherwise the note's explicit (or implied) accidental.
    pub fn accidental_to_draw(&self, note: &Note) -> Accidental {
        if !self.needs_accidental(note) {
            return Accidental::None;
        }
        if !note.accidental.is_none() {
            return note.accidental;
        }
        let name = self.spell(note);
        if name.accidental.is_none() {
            Accidental::Natural
        } else {
            name.accidental
        }
    }

    /// Record the note in the measure memory. Always call once per note,
    /// in chronological order, after the draw decision.
    pub fn update(&mut self, note: &Note) {
        if note.is_rest() {
            return;
        }
        match note.tie {
            Some(Tie::Start) => {
                self.tied.insert(note.pitch);
            }
            Some(Tie::Stop) => {
                self.tied.remove(&note.pitch);
            }
            None => {}
        }

        let name = self.spell(note);
        let slot = name.letter.natural_pitch_class() as usize;
        self.state[slot] = if !note.accidental.is_none() {
            note.accidental
        } else if self.key.letters().contains(&name.letter) {
            // A bare key-signature letter either sounds the signature
            // accidental (spelled from the pitch) or has been
            // naturalized.
            if name.accidental.is_none() {
                Accidental::Natural
            } else {
                name.accidental
            }
        } else {
            // Outside the signature the spelling is what sounds: the
            // implied accidental for a bare black key, none for a bare
            // natural.
            name.accidental
        };
    }
}

/// The accidental actually in force for the note: the explicit one if
/// present, otherwise whatever its spelling implies (the table
/// accidental for a bare black key, nothing for a bare natural).
fn effective_accidental(note: &Note, name: NoteName) -> Accidental {
    if !note.accidental.is_none() {
        note.accidental
    } else {
        name.accidental
    }
}
