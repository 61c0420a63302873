/// Render the coaching prompt for one answered question.
///
/// The SCORE/STRENGTHS/WEAKNESSES/IMPROVEMENTS/OVERALL FEEDBACK markers
/// requested here are what the parser anchors on; keep them in sync with
/// `parser::scan`.
pub fn render_prompt(question: &str, transcript: &str) -> String {
    format!(
        r#"You are an expert interview coach. Analyze the following interview response and provide detailed feedback.

Interview Question: "{question}"

Candidate's Response: "{transcript}"

Please analyze this response and provide:
1. A score out of 10
2. What the candidate did well (strengths)
3. What the candidate did poorly (weaknesses)
4. Specific suggestions for improvement

Format your response EXACTLY as follows:

SCORE: [number]/10

STRENGTHS:
- [strength 1]
- [strength 2]
- [strength 3]

WEAKNESSES:
- [weakness 1]
- [weakness 2]
- [weakness 3]

IMPROVEMENTS:
- [improvement 1]
- [improvement 2]
- [improvement 3]

OVERALL FEEDBACK:
[2-3 sentence summary]"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_question_and_transcript() {
        let prompt = render_prompt("Tell me about yourself", "I am a software engineer.");

        assert!(prompt.contains("Interview Question: \"Tell me about yourself\""));
        assert!(prompt.contains("Candidate's Response: \"I am a software engineer.\""));
    }

    #[test]
    fn test_prompt_requests_all_markers() {
        let prompt = render_prompt("q", "a");

        for marker in ["SCORE:", "STRENGTHS:", "WEAKNESSES:", "IMPROVEMENTS:", "OVERALL FEEDBACK:"] {
            assert!(prompt.contains(marker), "missing marker {}", marker);
        }
    }
}
