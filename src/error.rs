//! Errors surfaced while loading a physics description.

use thiserror::Error;

/// A physics description could not be loaded.
///
/// Everything here is a construction-time failure; evaluation itself never
/// errors.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The description text is not valid JSON for the expected shape.
    #[error("invalid physics description: {0}")]
    Json(#[from] serde_json::Error),

    /// `Meta.PhysicsSettingCount` disagrees with the settings array.
    #[error("setting count mismatch: meta declares {declared}, found {found}")]
    SettingCount {
        /// Count declared in `Meta`.
        declared: usize,
        /// Count actually present.
        found: usize,
    },

    /// `Meta.TotalInputCount` disagrees with the flattened inputs.
    #[error("input count mismatch: meta declares {declared}, found {found}")]
    InputCount {
        /// Count declared in `Meta`.
        declared: usize,
        /// Count actually present.
        found: usize,
    },

    /// `Meta.TotalOutputCount` disagrees with the flattened outputs.
    #[error("output count mismatch: meta declares {declared}, found {found}")]
    OutputCount {
        /// Count declared in `Meta`.
        declared: usize,
        /// Count actually present.
        found: usize,
    },

    /// `Meta.VertexCount` disagrees with the flattened particles.
    #[error("vertex count mismatch: meta declares {declared}, found {found}")]
    VertexCount {
        /// Count declared in `Meta`.
        declared: usize,
        /// Count actually present.
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_mismatch() {
        let error = ParseError::VertexCount {
            declared: 7,
            found: 2,
        };
        assert_eq!(
            error.to_string(),
            "vertex count mismatch: meta declares 7, found 2"
        );
    }

    #[test]
    fn test_json_errors_convert() {
        let result: Result<crate::setting::PhysicsDescription, serde_json::Error> =
            serde_json::from_str("not json");
        let error: ParseError = result.unwrap_err().into();
        assert!(error.to_string().starts_with("invalid physics description"));
    }
}
