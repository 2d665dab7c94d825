//! Engine error types.
//!
//! Turn processing never fails: unknown powers, boosters and stories are
//! silently ignored. The only runtime failure is drawing from an empty
//! catalogue. Everything else is a configuration defect and is reported
//! before an engine is built.

use crate::cards::CardId;

/// Errors produced by configuration loading and drawing.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("card catalogue is empty, nothing to draw")]
    EmptyCatalogue,

    #[error("failed to parse game configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("entry card not found in catalogue: {0}")]
    MissingEntryCard(CardId),

    #[error("duplicate card id in catalogue: {0}")]
    DuplicateCard(CardId),

    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EngineError::EmptyCatalogue.to_string(),
            "card catalogue is empty, nothing to draw"
        );
        assert_eq!(
            EngineError::MissingEntryCard(CardId::new("start")).to_string(),
            "entry card not found in catalogue: start"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let err: EngineError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, EngineError::Parse(_)));
    }
}
