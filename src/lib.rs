//! stafflib — staff notation engine: pitch-to-staff mapping, ledger
//! lines, and key-signature accidental tracking.
//!
//! The engine converts abstract note events (MIDI pitch + explicit
//! accidental) into everything a renderer needs to place them on a
//! staff: the vertical staff-line coordinate, the ledger lines to draw,
//! and the accidental glyph required under the current key signature.
//! It owns no rendering surface; widget trees and canvases sit on top
//! and call in through [`resolve_sequence`] or the piecewise API.
//!
//! # Example
//! ```
//! use stafflib::{resolve_sequence, Accidental, Clef, KeySignature, Note};
//!
//! let key = KeySignature::major("D").unwrap();
//! let notes = [
//!     Note::new(66, Accidental::Sharp), // F#4: matches the signature
//!     Note::new(65, Accidental::None),  // F4: needs a cancelling natural
//! ];
//! let resolved = resolve_sequence(Clef::Treble, key, &notes).unwrap();
//! assert_eq!(resolved[0].accidental, Accidental::None);
//! assert_eq!(resolved[1].accidental, Accidental::Natural);
//! ```

pub mod error;
pub mod geometry;
pub mod keyboard;
pub mod ledger;
pub mod model;
pub mod resolver;
pub mod theory;
pub mod tracker;

use serde::Deserialize;

pub use error::EngraveError;
pub use geometry::StaffGeometry;
pub use ledger::{ledger_lines, needs_ledger_line};
pub use model::{Accidental, Clef, KeySignature, Note, Pitch, ResolvedNote, Tie, REST};
pub use resolver::resolve_staff_line;
pub use theory::{Letter, NoteName};
pub use tracker::AccidentalTracker;

/// Staff-line coordinate used to display rests (the middle line).
pub const REST_LINE: f64 = 2.0;

/// Resolve an ordered sequence of notes against one clef and key
/// signature.
///
/// One [`AccidentalTracker`] owns the pass, so accidental decisions see
/// the notes in chronological left-to-right order. A bare black key is
/// spelled with the key's polarity, so in a flat key MIDI 70 sits on B's
/// line as Bb rather than on A's as A#. A rest keeps the middle line and
/// never consults the pitch tables. Fails on the first malformed note;
/// there is no partial result.
pub fn resolve_sequence(
    clef: Clef,
    key: KeySignature,
    notes: &[Note],
) -> Result<Vec<ResolvedNote>, EngraveError> {
    let mut tracker = AccidentalTracker::new(key);
    let mut resolved = Vec::with_capacity(notes.len());

    for note in notes {
        if note.is_rest() {
            resolved.push(ResolvedNote {
                staff_line: REST_LINE,
                ledger_lines: Vec::new(),
                accidental: Accidental::None,
                rest: true,
            });
            continue;
        }

        // Position follows the spelled letter, so the spelling implied
        // by the key decides the line when no accidental is explicit.
        let position_accidental = if note.accidental.is_none() {
            theory::spelled(note.pitch, note.accidental, key.is_flat()).accidental
        } else {
            note.accidental
        };
        let staff_line = resolve_staff_line(clef, note.pitch, position_accidental)?;
        let accidental = tracker.accidental_to_draw(note);
        tracker.update(note);

        resolved.push(ResolvedNote {
            staff_line,
            ledger_lines: ledger_lines(staff_line),
            accidental,
            rest: false,
        });
    }

    Ok(resolved)
}

/// Convert resolved notes to a JSON string.
/// Useful for passing data across FFI boundaries.
pub fn resolved_to_json(resolved: &[ResolvedNote]) -> Result<String, String> {
    serde_json::to_string_pretty(resolved).map_err(|e| format!("JSON serialization error: {e}"))
}

/// A full resolve request as it crosses the FFI boundary.
#[derive(Debug, Deserialize)]
struct SequenceRequest {
    clef: Clef,
    key: KeySignature,
    notes: Vec<Note>,
}

/// Resolve a JSON-encoded request (`{clef, key, notes}`) into a JSON
/// array of resolved notes. This is the string form the C FFI uses.
pub fn resolve_sequence_json(request: &str) -> Result<String, String> {
    let request: SequenceRequest =
        serde_json::from_str(request).map_err(|e| format!("JSON parse error: {e}"))?;
    let resolved = resolve_sequence(request.clef, request.key, &request.notes)
        .map_err(|e| e.to_string())?;
    resolved_to_json(&resolved)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for embedding under native UI shells
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Resolve a JSON-encoded note sequence and return the resolved notes as
/// a JSON C string. Returns null on any error.
/// The caller must free the returned string with `stafflib_free_string`.
///
/// # Safety
/// `request` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn stafflib_resolve_sequence(request: *const c_char) -> *mut c_char {
    if request.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(request) };
    let request_str = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    match resolve_sequence_json(request_str) {
        Ok(json) => CString::new(json).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Free a string previously returned by stafflib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a stafflib function,
/// or null.
#[no_mangle]
pub unsafe extern "C" fn stafflib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
