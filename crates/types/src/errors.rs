use thiserror::Error;

// ============================================================================
// Main Error Enum
// ============================================================================

/// Error enum shared by the launch store, wallet session and launch flow
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasPadError {
    // ========================================================================
    // Validation Errors
    // ========================================================================

    /// Invalid parameter
    #[error("Invalid parameter '{parameter}': got '{value}', expected '{expected}'")]
    InvalidParameter { parameter: String, value: String, expected: String },

    /// A draft field failed submission checks
    #[error("Invalid field '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// Submission attempted without an image attachment
    #[error("Please upload a token image")]
    MissingImage,

    // ========================================================================
    // Processing Errors
    // ========================================================================

    /// Image could not be converted to a storable representation
    #[error("Image processing failed: {reason}")]
    ImageProcessing { reason: String },

    /// Launch flow was cancelled while a delay was pending
    #[error("Launch flow cancelled during {step}")]
    FlowCancelled { step: String },

    /// A flow operation was requested in the wrong step
    #[error("Invalid flow transition from {from}: {reason}")]
    InvalidTransition { from: String, reason: String },

    // ========================================================================
    // Persistence Errors
    // ========================================================================

    /// Key/value storage failure
    #[error("Storage error on '{key}': {reason}")]
    Storage { key: String, reason: String },

    /// Encoding or decoding failure
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    // ========================================================================
    // Network Errors
    // ========================================================================

    /// Outbound request failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// Response did not carry the expected data
    #[error("Malformed response from '{source_name}': {reason}")]
    MalformedResponse { source_name: String, reason: String },

    // ========================================================================
    // General Errors
    // ========================================================================

    /// Generic error with optional context
    #[error("Error: {message}")]
    Generic { message: String, context: Option<String> },
}

impl GasPadError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, value: &str, expected: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Create a field validation error
    pub fn validation(field: &str, reason: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an image processing error
    pub fn image_processing(reason: &str) -> Self {
        Self::ImageProcessing {
            reason: reason.to_string(),
        }
    }

    /// Create a storage error for a key
    pub fn storage(key: &str, reason: &str) -> Self {
        Self::Storage {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a serialization error
    pub fn serialization(reason: &str) -> Self {
        Self::Serialization {
            reason: reason.to_string(),
        }
    }

    /// Create a network error
    pub fn network(message: &str) -> Self {
        Self::Network {
            message: message.to_string(),
        }
    }

    /// Create a malformed response error
    pub fn malformed_response(source_name: &str, reason: &str) -> Self {
        Self::MalformedResponse {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a generic error with context
    pub fn generic_with_context(message: &str, context: &str) -> Self {
        Self::Generic {
            message: message.to_string(),
            context: Some(context.to_string()),
        }
    }

    /// Whether the error blocks a submission without touching any state
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::MissingImage | Self::InvalidParameter { .. }
        )
    }
}

impl From<serde_json::Error> for GasPadError {
    fn from(err: serde_json::Error) -> Self {
        GasPadError::serialization(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GasPadError::validation("ticker", "must be at most 5 characters");
        assert_eq!(err.to_string(), "Invalid field 'ticker': must be at most 5 characters");

        assert_eq!(GasPadError::MissingImage.to_string(), "Please upload a token image");
    }

    #[test]
    fn test_validation_classification() {
        assert!(GasPadError::MissingImage.is_validation());
        assert!(GasPadError::validation("name", "required").is_validation());
        assert!(!GasPadError::image_processing("bad bytes").is_validation());
        assert!(!GasPadError::FlowCancelled { step: "minting".to_string() }.is_validation());
    }
}
