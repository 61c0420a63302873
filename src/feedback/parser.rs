use serde::{Deserialize, Serialize};

/// Structured coaching feedback parsed from a model's free-form reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Score out of 10. Not range-checked: a reply the parser cannot read a
    /// number from yields 0, and out-of-range values pass through as-is.
    pub score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub improvements: Vec<String>,
    pub overall: String,
}

impl FeedbackRecord {
    /// Fixed record returned when parsing fails entirely.
    pub fn fallback() -> Self {
        Self {
            score: 5.0,
            strengths: vec!["You attempted to answer the question".to_string()],
            weaknesses: vec!["Response could be more detailed".to_string()],
            improvements: vec!["Practice providing specific examples".to_string()],
            overall: "Keep practicing to improve your interview responses.".to_string(),
        }
    }
}

/// Section cursor for the line scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Strengths,
    Weaknesses,
    Improvements,
    Overall,
}

/// Parse a model reply into a `FeedbackRecord`. Never fails outward: a reply
/// that matches none of the expected markers still produces a record with
/// per-category defaults, and an internal failure degrades to the fixed
/// fallback record.
pub fn parse_feedback(raw_text: &str) -> FeedbackRecord {
    std::panic::catch_unwind(|| scan(raw_text)).unwrap_or_else(|_| FeedbackRecord::fallback())
}

/// Single forward pass over trimmed lines. Markers are case-sensitive and
/// must anchor the line; anything unrecognized is discarded.
fn scan(raw_text: &str) -> FeedbackRecord {
    let mut score = 0.0;
    let mut strengths: Vec<String> = Vec::new();
    let mut weaknesses: Vec<String> = Vec::new();
    let mut improvements: Vec<String> = Vec::new();
    let mut overall = String::new();

    let mut current_section = Section::None;

    for line in raw_text.trim().lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("SCORE:") {
            // "8/10" -> 8; anything unreadable is an explicit zero, distinct
            // from the whole-record fallback.
            let first = rest.trim().split('/').next().unwrap_or("");
            score = first.trim().parse::<f64>().unwrap_or(0.0);
        } else if line.starts_with("STRENGTHS:") {
            current_section = Section::Strengths;
        } else if line.starts_with("WEAKNESSES:") {
            current_section = Section::Weaknesses;
        } else if line.starts_with("IMPROVEMENTS:") {
            current_section = Section::Improvements;
        } else if line.starts_with("OVERALL FEEDBACK:") {
            current_section = Section::Overall;
        } else if line.starts_with('-')
            && matches!(
                current_section,
                Section::Strengths | Section::Weaknesses | Section::Improvements
            )
        {
            // Empty points are retained, not filtered.
            let point = line.trim_start_matches(['-', ' ']).trim().to_string();
            match current_section {
                Section::Strengths => strengths.push(point),
                Section::Weaknesses => weaknesses.push(point),
                Section::Improvements => improvements.push(point),
                Section::Overall | Section::None => unreachable!(),
            }
        } else if current_section == Section::Overall && !line.is_empty() {
            overall.push_str(line);
            overall.push(' ');
        }
    }

    if strengths.is_empty() {
        strengths.push("Good attempt at answering the question".to_string());
    }
    if weaknesses.is_empty() {
        weaknesses.push("Could provide more specific examples".to_string());
    }
    if improvements.is_empty() {
        improvements.push("Practice articulating thoughts more clearly".to_string());
    }

    let overall = overall.trim().to_string();
    let overall = if overall.is_empty() {
        "Keep practicing to improve your interview skills.".to_string()
    } else {
        overall
    };

    FeedbackRecord {
        score,
        strengths,
        weaknesses,
        improvements,
        overall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_reply() {
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
    fn test_parse_empty_input_uses_defaults() {
        let record = parse_feedback("");

        assert_eq!(record.score, 0.0);
        assert!(!record.strengths.is_empty());
        assert!(!record.weaknesses.is_empty());
        assert!(!record.improvements.is_empty());
        assert!(!record.overall.is_empty());
    }

    #[test]
    fn test_parse_unstructured_prose_uses_defaults() {
        let record = parse_feedback("The candidate did fine, I suppose. Nothing to add.");

        assert_eq!(record.score, 0.0);
        assert_eq!(record.strengths, vec!["Good attempt at answering the question"]);
        assert_eq!(record.weaknesses, vec!["Could provide more specific examples"]);
        assert_eq!(
            record.improvements,
            vec!["Practice articulating thoughts more clearly"]
        );
        assert_eq!(record.overall, "Keep practicing to improve your interview skills.");
    }

    #[test]
    fn test_unreadable_score_is_explicit_zero() {
        let record = parse_feedback("SCORE: abc/10");
        assert_eq!(record.score, 0.0);
    }

    #[test]
    fn test_fractional_score() {
        let record = parse_feedback("SCORE: 7.5/10");
        assert_eq!(record.score, 7.5);
    }

    #[test]
    fn test_multi_line_overall_joined_with_spaces() {
        let raw = "OVERALL FEEDBACK:\nFirst sentence.\n\nSecond sentence.";
        let record = parse_feedback(raw);
        assert_eq!(record.overall, "First sentence. Second sentence.");
    }

    #[test]
    fn test_marker_mid_line_not_recognized() {
        // The marker must anchor the trimmed line.
        let record = parse_feedback("Here is the SCORE: 9/10");
        assert_eq!(record.score, 0.0);
    }

    #[test]
    fn test_marker_case_sensitive() {
        let record = parse_feedback("score: 9/10\nStrengths:\n- hidden");
        assert_eq!(record.score, 0.0);
        assert_eq!(record.strengths, vec!["Good attempt at answering the question"]);
    }

    #[test]
    fn test_bullets_before_any_section_discarded() {
        let raw = "- stray bullet\nSTRENGTHS:\n- kept";
        let record = parse_feedback(raw);
        assert_eq!(record.strengths, vec!["kept"]);
    }

    #[test]
    fn test_empty_bullet_retained() {
        let raw = "STRENGTHS:\n- \n- real point";
        let record = parse_feedback(raw);
        assert_eq!(record.strengths, vec!["", "real point"]);
    }

    #[test]
    fn test_dashed_line_under_overall_kept_as_text() {
        let raw = "OVERALL FEEDBACK:\n- still part of the summary";
        let record = parse_feedback(raw);
        assert_eq!(record.overall, "- still part of the summary");
    }

    #[test]
    fn test_double_dash_bullet_stripped() {
        let raw = "WEAKNESSES:\n-- rambling";
        let record = parse_feedback(raw);
        assert_eq!(record.weaknesses, vec!["rambling"]);
    }

    #[test]
    fn test_non_bullet_line_in_bullet_section_discarded() {
        let raw = "STRENGTHS:\nnot a bullet\n- actual strength";
        let record = parse_feedback(raw);
        assert_eq!(record.strengths, vec!["actual strength"]);
    }

    #[test]
    fn test_fallback_record_shape() {
        let record = FeedbackRecord::fallback();
        assert_eq!(record.score, 5.0);
        assert_eq!(record.strengths.len(), 1);
        assert_eq!(record.weaknesses.len(), 1);
        assert_eq!(record.improvements.len(), 1);
        assert!(!record.overall.is_empty());
    }
}
