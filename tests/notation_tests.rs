//! Integration tests for the full resolve pipeline:
//! staff position, ledger lines, and accidental decisions together.

use pretty_assertions::assert_eq;
use stafflib::{
    resolve_sequence, resolve_sequence_json, Accidental, Clef, EngraveError, KeySignature, Note,
    StaffGeometry, Tie, REST_LINE,
};

#[test]
fn c_major_scale_sits_on_the_diatonic_grid() {
    let notes: Vec<Note> = [60, 62, 64, 65, 67, 69, 71, 72]
        .iter()
        .map(|&p| Note::new(p, Accidental::None))
        .collect();

    let resolved = resolve_sequence(Clef::Treble, KeySignature::C_MAJOR, &notes).unwrap();

    let lines: Vec<f64> = resolved.iter().map(|r| r.staff_line).collect();
    assert_eq!(lines, vec![5.0, 4.5, 4.0, 3.5, 3.0, 2.5, 2.0, 1.5]);

    // Only middle C needs a ledger line; no accidentals anywhere
    assert_eq!(resolved[0].ledger_lines, vec![5.0]);
    for r in &resolved[1..] {
        assert!(r.ledger_lines.is_empty());
        assert_eq!(r.accidental, Accidental::None);
    }
}

#[test]
fn sharp_then_cancelling_natural_in_sequence() {
    // C4, C#4, C4, D4 in C major: the returning C needs a natural
    let notes = [
        Note::new(60, Accidental::None),
        Note::new(61, Accidental::Sharp),
        Note::new(60, Accidental::None),
        Note::new(62, Accidental::None),
    ];
    let resolved = resolve_sequence(Clef::Treble, KeySignature::C_MAJOR, &notes).unwrap();

    let drawn: Vec<Accidental> = resolved.iter().map(|r| r.accidental).collect();
    assert_eq!(
        drawn,
        vec![
            Accidental::None,
            Accidental::Sharp,
            Accidental::Natural,
            Accidental::None,
        ]
    );

    // C4 and C#4 share the same ledger line below the staff
    assert_eq!(resolved[0].staff_line, resolved[1].staff_line);
    assert_eq!(resolved[1].ledger_lines, vec![5.0]);
}

#[test]
fn implicit_sharp_carries_through_the_measure() {
    // Bare black-key input: the first C# draws its sharp, the repeat
    // stays silent, and the returning C is cancelled with a natural
    let notes = [
        Note::new(61, Accidental::None),
        Note::new(61, Accidental::None),
        Note::new(60, Accidental::None),
    ];
    let resolved = resolve_sequence(Clef::Treble, KeySignature::C_MAJOR, &notes).unwrap();

    let drawn: Vec<Accidental> = resolved.iter().map(|r| r.accidental).collect();
    assert_eq!(
        drawn,
        vec![Accidental::Sharp, Accidental::None, Accidental::Natural]
    );
}

#[test]
fn d_major_signature_stays_silent_until_cancelled() {
    let key = KeySignature::major("D").unwrap();
    let notes = [
        Note::new(66, Accidental::Sharp),
        Note::new(66, Accidental::Sharp),
        Note::new(65, Accidental::None),
    ];
    let resolved = resolve_sequence(Clef::Treble, key, &notes).unwrap();

    let drawn: Vec<Accidental> = resolved.iter().map(|r| r.accidental).collect();
    assert_eq!(
        drawn,
        vec![Accidental::None, Accidental::None, Accidental::Natural]
    );

    // F#4 and F4 occupy the same staff position
    assert_eq!(resolved[0].staff_line, 3.5);
    assert_eq!(resolved[2].staff_line, 3.5);
}

#[test]
fn enharmonic_spellings_split_on_the_staff() {
    let sharp = resolve_sequence(
        Clef::Treble,
        KeySignature::C_MAJOR,
        &[Note::new(63, Accidental::Sharp)],
    )
    .unwrap();
    let flat = resolve_sequence(
        Clef::Treble,
        KeySignature::C_MAJOR,
        &[Note::new(63, Accidental::Flat)],
    )
    .unwrap();

    assert_eq!(sharp[0].staff_line, 4.5);
    assert_eq!(flat[0].staff_line, 4.0);
}

#[test]
fn flat_key_places_bare_black_keys_on_flat_letters() {
    // A bare MIDI 70 in Bb major sits on B's line as the signature's
    // own Bb, with no glyph
    let key = KeySignature::major("Bb").unwrap();
    let resolved =
        resolve_sequence(Clef::Treble, key, &[Note::new(70, Accidental::None)]).unwrap();
    assert_eq!(resolved[0].staff_line, 2.0);
    assert_eq!(resolved[0].accidental, Accidental::None);
}

#[test]
fn middle_c_moves_with_the_clef() {
    let note = [Note::new(60, Accidental::None)];

    let treble = resolve_sequence(Clef::Treble, KeySignature::C_MAJOR, &note).unwrap();
    assert_eq!(treble[0].staff_line, 5.0);
    assert_eq!(treble[0].ledger_lines, vec![5.0]);

    let bass = resolve_sequence(Clef::Bass, KeySignature::C_MAJOR, &note).unwrap();
    assert_eq!(bass[0].staff_line, -1.0);
    assert_eq!(bass[0].ledger_lines, vec![-1.0]);

    let alto = resolve_sequence(Clef::Alto, KeySignature::C_MAJOR, &note).unwrap();
    assert_eq!(alto[0].staff_line, 2.0);
    assert!(alto[0].ledger_lines.is_empty());
}

#[test]
fn rests_keep_the_middle_line() {
    let notes = [
        Note::new(67, Accidental::None),
        Note::rest(),
        Note::new(67, Accidental::None),
    ];
    let resolved = resolve_sequence(Clef::Treble, KeySignature::C_MAJOR, &notes).unwrap();

    assert!(resolved[1].rest);
    assert_eq!(resolved[1].staff_line, REST_LINE);
    assert!(resolved[1].ledger_lines.is_empty());
    assert_eq!(resolved[1].accidental, Accidental::None);
}

#[test]
fn tied_accidental_is_not_restated() {
    let notes = [
        Note::new(61, Accidental::Sharp).with_tie(Tie::Start),
        Note::new(61, Accidental::Sharp).with_tie(Tie::Stop),
    ];
    let resolved = resolve_sequence(Clef::Treble, KeySignature::C_MAJOR, &notes).unwrap();

    assert_eq!(resolved[0].accidental, Accidental::Sharp);
    assert_eq!(resolved[1].accidental, Accidental::None);
}

#[test]
fn staves_resolve_independently() {
    // Rendering two staves at once must not share tracker state: the
    // bass staff's C# leaves the treble staff's C untouched.
    let treble_notes = [Note::new(60, Accidental::None)];
    let bass_notes = [
        Note::new(49, Accidental::Sharp),
        Note::new(48, Accidental::None),
    ];

    let bass = resolve_sequence(Clef::Bass, KeySignature::C_MAJOR, &bass_notes).unwrap();
    let treble = resolve_sequence(Clef::Treble, KeySignature::C_MAJOR, &treble_notes).unwrap();

    assert_eq!(bass[1].accidental, Accidental::Natural);
    assert_eq!(treble[0].accidental, Accidental::None);
}

#[test]
fn malformed_pitch_fails_the_whole_pass() {
    let notes = [
        Note::new(60, Accidental::None),
        Note::new(200, Accidental::None),
    ];
    let err = resolve_sequence(Clef::Treble, KeySignature::C_MAJOR, &notes).unwrap_err();
    assert_eq!(err, EngraveError::InvalidPitch(200));
}

#[test]
fn json_request_round_trip() {
    let request = r#"{
        "clef": "treble",
        "key": 2,
        "notes": [
            {"pitch": 66, "accidental": "sharp"},
            {"pitch": 65}
        ]
    }"#;

    let json = resolve_sequence_json(request).unwrap();
    let resolved: Vec<stafflib::ResolvedNote> = serde_json::from_str(&json).unwrap();

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].staff_line, 3.5);
    assert_eq!(resolved[0].accidental, Accidental::None);
    assert_eq!(resolved[1].accidental, Accidental::Natural);
}

#[test]
fn json_request_rejects_bad_key_signature() {
    let request = r#"{"clef": "treble", "key": 9, "notes": []}"#;
    let err = resolve_sequence_json(request).unwrap_err();
    assert!(err.contains("JSON parse error"), "got: {err}");
}

#[test]
fn geometry_places_resolved_notes_in_user_units() {
    let resolved = resolve_sequence(
        Clef::Treble,
        KeySignature::C_MAJOR,
        &[Note::new(60, Accidental::None)],
    )
    .unwrap();

    let geom = StaffGeometry::default();
    assert_eq!(geom.y_of(resolved[0].staff_line), 50.0);
    assert_eq!(geom.ledger_ys(resolved[0].staff_line), vec![50.0]);
}
