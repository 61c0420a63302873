// Integration tests for the feedback parser
//
// These tests verify that the parser salvages whatever of the requested
// template actually came back from the model, and that it degrades to
// usable defaults instead of failing.

use interview_coach::parse_feedback;

#[test]
fn test_full_template_parses_in_order() {
    let raw = "SCORE: 7/10\n\
               \n\
               STRENGTHS:\n\
               - Used the STAR method\n\
               - Good eye for detail\n\
               - Confident delivery\n\
               \n\
               WEAKNESSES:\n\
               - Rambling introduction\n\
               - No closing summary\n\
               - Filler words\n\
               \n\
               IMPROVEMENTS:\n\
               - Open with the conclusion\n\
               - Quantify the impact\n\
               - Pause instead of saying um\n\
               \n\
               OVERALL FEEDBACK:\n\
               A solid answer that would land better with a tighter opening.";

    let record = parse_feedback(raw);

    assert_eq!(record.score, 7.0);
    assert_eq!(
        record.strengths,
        vec![
            "Used the STAR method",
            "Good eye for detail",
            "Confident delivery"
        ]
    );
    assert_eq!(
        record.weaknesses,
        vec!["Rambling introduction", "No closing summary", "Filler words"]
    );
    assert_eq!(
        record.improvements,
        vec![
            "Open with the conclusion",
            "Quantify the impact",
            "Pause instead of saying um"
        ]
    );
    assert_eq!(
        record.overall,
        "A solid answer that would land better with a tighter opening."
    );
}

#[test]
fn test_concrete_scenario() {
    let raw = "SCORE: 8/10\n\
               STRENGTHS:\n\
               - Clear structure\n\
               WEAKNESSES:\n\
               - Too brief\n\
               IMPROVEMENTS:\n\
               - Add a concrete example\n\
               OVERALL FEEDBACK:\n\
               Solid answer overall.";

    let record = parse_feedback(raw);

    assert_eq!(record.score, 8.0);
    assert_eq!(record.strengths, vec!["Clear structure"]);
    assert_eq!(record.weaknesses, vec!["Too brief"]);
    assert_eq!(record.improvements, vec!["Add a concrete example"]);
    assert_eq!(record.overall, "Solid answer overall.");
}

#[test]
fn test_empty_input_does_not_fail() {
    let record = parse_feedback("");

    assert!(!record.strengths.is_empty());
    assert!(!record.weaknesses.is_empty());
    assert!(!record.improvements.is_empty());
    assert!(!record.overall.is_empty());
}

#[test]
fn test_prose_without_markers_gets_defaults() {
    let raw = "I thought the candidate was quite good overall, though the\n\
               answer meandered. They should work on structure.";

    let record = parse_feedback(raw);

    assert_eq!(record.score, 0.0);
    assert!(!record.strengths.is_empty());
    assert!(!record.weaknesses.is_empty());
    assert!(!record.improvements.is_empty());
    assert!(!record.overall.is_empty());
}

#[test]
fn test_unreadable_score_is_zero_not_fallback() {
    let record = parse_feedback("SCORE: abc/10\nSTRENGTHS:\n- something");

    // Distinct from the whole-record fallback score of 5.
    assert_eq!(record.score, 0.0);
    assert_eq!(record.strengths, vec!["something"]);
}

#[test]
fn test_partial_template_fills_missing_sections() {
    let raw = "SCORE: 6/10\nSTRENGTHS:\n- Knows the domain";

    let record = parse_feedback(raw);

    assert_eq!(record.score, 6.0);
    assert_eq!(record.strengths, vec!["Knows the domain"]);
    // Missing sections get their category defaults.
    assert_eq!(record.weaknesses.len(), 1);
    assert_eq!(record.improvements.len(), 1);
    assert!(!record.overall.is_empty());
}

#[test]
fn test_preamble_before_first_marker_discarded() {
    let raw = "Sure! Here is my assessment of the response.\n\
               SCORE: 9/10\n\
               OVERALL FEEDBACK:\n\
               Excellent.";

    let record = parse_feedback(raw);

    assert_eq!(record.score, 9.0);
    assert_eq!(record.overall, "Excellent.");
}

#[test]
fn test_indented_markers_still_match() {
    // Lines are trimmed before marker matching.
    let raw = "   SCORE: 4/10\n   STRENGTHS:\n   - patience";

    let record = parse_feedback(raw);

    assert_eq!(record.score, 4.0);
    assert_eq!(record.strengths, vec!["patience"]);
}

#[test]
fn test_score_without_denominator() {
    let record = parse_feedback("SCORE: 8");
    assert_eq!(record.score, 8.0);
}
