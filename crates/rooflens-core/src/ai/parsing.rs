//! JSON extraction for AI completion responses
//!
//! Models often wrap the JSON payload in extra text even when asked for a
//! JSON object, so extraction scans for the outermost braces before
//! parsing.

use serde_json::Value;

use crate::insight::types::GenerationOutcome;

/// Classify a completion into a generation outcome
///
/// Anything without a parsable JSON object (empty completion, prose, broken
/// JSON) is `MalformedResponse`; transport failures never reach this
/// function.
pub fn parse_outcome(response: &str) -> GenerationOutcome {
    let response = response.trim();

    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => {
            match serde_json::from_str::<Value>(&response[s..=e]) {
                Ok(Value::Object(fields)) => GenerationOutcome::Parsed(fields),
                _ => GenerationOutcome::MalformedResponse,
            }
        }
        _ => GenerationOutcome::MalformedResponse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_object() {
        let outcome = parse_outcome(r#"{"roofCondition": "Good", "confidence": 0.9}"#);
        match outcome {
            GenerationOutcome::Parsed(fields) => {
                assert_eq!(fields["roofCondition"], "Good");
            }
            _ => panic!("expected Parsed"),
        }
    }

    #[test]
    fn test_parse_object_with_surrounding_text() {
        let response = r#"Here is the analysis:
{"roofCondition": "Good"}
Hope that helps!"#;
        assert!(matches!(
            parse_outcome(response),
            GenerationOutcome::Parsed(_)
        ));
    }

    #[test]
    fn test_parse_nested_object() {
        let outcome = parse_outcome(r#"{"a": {"b": 1}, "confidence": 0.5}"#);
        match outcome {
            GenerationOutcome::Parsed(fields) => assert!(fields.contains_key("a")),
            _ => panic!("expected Parsed"),
        }
    }

    #[test]
    fn test_parse_not_json() {
        assert!(matches!(
            parse_outcome("not json"),
            GenerationOutcome::MalformedResponse
        ));
    }

    #[test]
    fn test_parse_empty_completion() {
        assert!(matches!(
            parse_outcome(""),
            GenerationOutcome::MalformedResponse
        ));
    }

    #[test]
    fn test_parse_broken_json() {
        assert!(matches!(
            parse_outcome(r#"{"roofCondition": "#),
            GenerationOutcome::MalformedResponse
        ));
    }

    #[test]
    fn test_parse_array_payload_is_malformed() {
        assert!(matches!(
            parse_outcome(r#"["roofCondition"]"#),
            GenerationOutcome::MalformedResponse
        ));
    }
}
