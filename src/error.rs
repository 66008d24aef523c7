use thiserror::Error;

/// Rejected user input. Never changes game state; the user may resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid JSON: {0}")]
    Json(String),
    #[error("expected a JSON object with \"theme\" and \"words\"")]
    NotAnObject,
    #[error("missing \"theme\"")]
    MissingTheme,
    #[error("\"theme\" must be a non-empty string")]
    BlankTheme,
    #[error("missing \"words\"")]
    MissingWords,
    #[error("\"words\" must be a list")]
    WordsNotAList,
    #[error("\"words\" must not be empty")]
    NoWords,
    #[error("word #{0} is not a string")]
    WordNotAString(usize),
    #[error("time limit {0}s is not one of 0, 10, 15, 20, 30, 45, 60")]
    TimeLimit(u32),
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_readable() {
        assert_eq!(ValidationError::MissingTheme.to_string(), "missing \"theme\"");
        assert_eq!(
            ValidationError::WordNotAString(3).to_string(),
            "word #3 is not a string"
        );
        assert!(ValidationError::TimeLimit(7).to_string().contains("7s"));
    }

    #[test]
    fn json_errors_convert() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: ValidationError = err.into();
        assert!(matches!(converted, ValidationError::Json(_)));
    }
}
