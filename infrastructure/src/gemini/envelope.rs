//! Provider response envelopes and HTTP error mapping.
//!
//! A generation reply is decoded in two independent stages: the outer
//! transport envelope, then the model's answer text found inside it, which
//! is itself the quiz JSON. Where the answer text lives is provider-specific
//! and sits behind [`ResponseEnvelope`].

use docquiz_application::GenerationError;
use docquiz_domain::QuizResult;
use serde_json::Value;

/// Locates the model's answer text inside a decoded response envelope.
pub trait ResponseEnvelope: Send + Sync {
    fn answer_text<'a>(&self, envelope: &'a Value) -> Option<&'a str>;
}

/// `candidates[0].content.parts[0].text`
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiEnvelope;

impl ResponseEnvelope for GeminiEnvelope {
    fn answer_text<'a>(&self, envelope: &'a Value) -> Option<&'a str> {
        envelope
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
    }
}

/// Decode a successful response body into a [`QuizResult`].
pub fn decode_success(body: &str, envelope: &dyn ResponseEnvelope) -> Result<QuizResult, GenerationError> {
    let outer: Value = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(format!("response envelope is not JSON: {}", e)))?;

    let answer = envelope.answer_text(&outer).ok_or_else(|| {
        GenerationError::MalformedResponse("response envelope has no answer text".to_string())
    })?;

    serde_json::from_str(answer)
        .map_err(|e| GenerationError::MalformedResponse(format!("answer text is not quiz JSON: {}", e)))
}

/// Provider error detail from an error body.
///
/// Prefers `error.message`, then the serialized `error` value.
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    match error.get("message").and_then(Value::as_str) {
        Some(message) => Some(message.to_string()),
        None => Some(error.to_string()),
    }
}

/// Map a non-200 status and its body to a [`GenerationError`].
pub fn map_status(status: u16, body: &str, model: &str) -> GenerationError {
    let detail = error_detail(body);
    let or_hint = |hint: String| detail.clone().unwrap_or(hint);
    match status {
        429 => GenerationError::QuotaExceeded(or_hint("Please wait and try again later.".to_string())),
        401 | 403 => GenerationError::Auth(or_hint("Please check your API key.".to_string())),
        400 => GenerationError::BadRequest(or_hint(format!("HTTP code: {}", status))),
        404 => GenerationError::NotFound(or_hint(format!("Check model name: {}", model))),
        _ => GenerationError::Transport(format!(
            "HTTP {}: {}",
            status,
            detail.as_deref().unwrap_or("Unknown error")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope_with(text: &str) -> String {
        json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}).to_string()
    }

    #[test]
    fn test_decode_success_two_stage() {
        let inner = json!({
            "questions": [{
                "id": 1, "question": "Q?",
                "options": {"A": "a", "B": "b", "C": "c", "D": "d"},
                "correct_answer": "B", "difficulty": "easy"
            }],
            "metadata": {"total_questions": 1}
        })
        .to_string();
        let quiz = decode_success(&envelope_with(&inner), &GeminiEnvelope).unwrap();
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.metadata.total_questions, Some(1));
    }

    #[test]
    fn test_drifted_question_keeps_the_rest() {
        let inner = json!({
            "questions": [
                {
                    "id": 1, "question": "Q?",
                    "options": {"A": "a", "B": "b", "C": "c", "D": "d"},
                    "correct_answer": "B", "difficulty": "easy"
                },
                {
                    "id": 2.0, "question": "Listed options?",
                    "options": ["a", "b", "c"],
                    "correct_answer": "A", "difficulty": 2
                }
            ]
        })
        .to_string();
        let quiz = decode_success(&envelope_with(&inner), &GeminiEnvelope).unwrap();
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz.questions[1].id, Some(docquiz_domain::QuestionId::Number(2)));

        let issues = docquiz_domain::quiz::validate(&quiz);
        assert!(issues.iter().all(|issue| issue.question_index == Some(2)));
        assert!(
            issues
                .iter()
                .any(|issue| issue.message == "Must have exactly 4 options (found 3)")
        );
    }

    #[test]
    fn test_decode_inner_not_object() {
        let err = decode_success(&envelope_with("[1, 2, 3]"), &GeminiEnvelope).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_decode_outer_not_json() {
        let err = decode_success("<html>oops</html>", &GeminiEnvelope).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_decode_missing_answer_path() {
        let err = decode_success(r#"{"candidates": []}"#, &GeminiEnvelope).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_decode_inner_not_json() {
        let err = decode_success(&envelope_with("Sure! Here are your questions"), &GeminiEnvelope).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_map_status() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted"}}"#;
        assert_eq!(
            map_status(429, body, "m"),
            GenerationError::QuotaExceeded("Resource has been exhausted".to_string())
        );
        assert!(matches!(map_status(401, "", "m"), GenerationError::Auth(_)));
        assert!(matches!(map_status(403, "", "m"), GenerationError::Auth(_)));
        assert!(matches!(map_status(400, "", "m"), GenerationError::BadRequest(_)));
        assert_eq!(
            map_status(404, "", "gemini-x"),
            GenerationError::NotFound("Check model name: gemini-x".to_string())
        );
        assert_eq!(
            map_status(503, "", "m"),
            GenerationError::Transport("HTTP 503: Unknown error".to_string())
        );
    }

    #[test]
    fn test_error_detail_falls_back_to_serialized_error() {
        assert_eq!(error_detail(r#"{"error": "denied"}"#), Some("\"denied\"".to_string()));
        assert_eq!(error_detail(r#"{"other": 1}"#), None);
        assert_eq!(error_detail("not json"), None);
    }
}
