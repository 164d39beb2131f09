//! Error types for the elementary automaton engine.

use thiserror::Error;

/// Input validation failures. All of them are raised before any row is
/// derived; derivation itself cannot fail once its inputs are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Rule number outside `0..=255`.
    #[error("invalid rule number {0}: expected 0..=255")]
    InvalidRuleNumber(u32),

    /// Rule table that is not exactly 8 binary entries.
    #[error("malformed rule table: {reason}")]
    MalformedRule {
        /// What was wrong with the table.
        reason: String,
    },

    /// Row too short to carry both fixed edges.
    #[error("row of length {0} is too short: need at least 2 cells")]
    RowTooShort(usize),

    /// Geometry that leaves no interior column, or non-positive inputs.
    #[error("invalid geometry: {reason}")]
    InvalidGeometry {
        /// Which constraint the geometry broke.
        reason: String,
    },
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRule { reason: reason.into() }
    }

    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry { reason: reason.into() }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_input() {
        assert_eq!(
            Error::InvalidRuleNumber(256).to_string(),
            "invalid rule number 256: expected 0..=255"
        );
        assert_eq!(
            Error::RowTooShort(1).to_string(),
            "row of length 1 is too short: need at least 2 cells"
        );
        assert!(Error::geometry("3 columns").to_string().contains("3 columns"));
    }
}
