use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A user's free-text description, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    text: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(DomainError::invalid_input("query must not be empty"));
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_trimmed() {
        let query = SearchQuery::new("  sunset over mountains \n").unwrap();
        assert_eq!(query.text(), "sunset over mountains");
    }

    #[test]
    fn test_blank_query_is_rejected() {
        for raw in ["", "   ", "\t\n "] {
            let err = SearchQuery::new(raw).unwrap_err();
            assert!(err.is_invalid_input(), "{raw:?} should be rejected");
        }
    }
}
