//! Assertion helpers for scenario steps.

use hookstate_widgets::FieldStateMap;

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

fn failed(code: &str, message: String) -> AssertionResult {
    AssertionResult::Failed {
        code: code.to_string(),
        message,
    }
}

pub fn evaluate_text(id: &str, expected: &str, actual: Option<&str>) -> AssertionResult {
    let Some(text) = actual else {
        return failed("missing_element", format!("{id}: element not mounted"));
    };
    if text == expected {
        AssertionResult::Passed
    } else {
        failed("text_mismatch", format!("{id}: expected '{expected}', got '{text}'"))
    }
}

pub fn evaluate_missing(id: &str, actual: Option<&str>) -> AssertionResult {
    match actual {
        None => AssertionResult::Passed,
        Some(_) => failed("unexpected_element", format!("{id}: element is mounted")),
    }
}

pub fn evaluate_field(name: &str, expected: &str, form: &FieldStateMap) -> AssertionResult {
    match form.get(name) {
        Some(value) if value == expected => AssertionResult::Passed,
        Some(value) => failed(
            "field_mismatch",
            format!("{name}: expected '{expected}', got '{value}'"),
        ),
        None => failed("missing_field", format!("{name}: no such field")),
    }
}

pub fn evaluate_counter(expected: i64, actual: i64) -> AssertionResult {
    if expected == actual {
        AssertionResult::Passed
    } else {
        failed(
            "counter_mismatch",
            format!("counter: expected {expected}, got {actual}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_assertions() {
        assert_eq!(evaluate_text("c", "1", Some("1")), AssertionResult::Passed);
        assert!(matches!(
            evaluate_text("c", "1", Some("2")),
            AssertionResult::Failed { ref code, .. } if code == "text_mismatch"
        ));
        assert!(matches!(
            evaluate_text("c", "1", None),
            AssertionResult::Failed { ref code, .. } if code == "missing_element"
        ));
    }

    #[test]
    fn test_field_assertions() {
        let form = FieldStateMap::with_empty_fields(["id"]).update("id", "u");
        assert_eq!(evaluate_field("id", "u", &form), AssertionResult::Passed);
        assert!(matches!(
            evaluate_field("password", "", &form),
            AssertionResult::Failed { ref code, .. } if code == "missing_field"
        ));
    }

    #[test]
    fn test_missing_and_counter() {
        assert_eq!(evaluate_missing("c", None), AssertionResult::Passed);
        assert_ne!(evaluate_missing("c", Some("")), AssertionResult::Passed);
        assert_eq!(evaluate_counter(-1, -1), AssertionResult::Passed);
        assert_ne!(evaluate_counter(0, 1), AssertionResult::Passed);
    }
}
