//! Error types for the mdan CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for mdan operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum MdanError {
    /// User provided invalid arguments or the project is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// A flow pipeline could not be started or completed.
    #[error("Flow failed: {0}")]
    FlowError(String),

    /// A tool operation (search, SQL, filesystem, clipboard) failed.
    #[error("Tool operation failed: {0}")]
    ToolError(String),

    /// The LLM backend rejected or failed a request.
    #[error("LLM request failed: {0}")]
    ApiError(String),
}

impl MdanError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            MdanError::UserError(_) => exit_codes::USER_ERROR,
            MdanError::FlowError(_) => exit_codes::FLOW_FAILURE,
            MdanError::ToolError(_) => exit_codes::TOOL_FAILURE,
            MdanError::ApiError(_) => exit_codes::API_FAILURE,
        }
    }
}

/// Result type alias for mdan operations.
pub type Result<T> = std::result::Result<T, MdanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = MdanError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn flow_error_has_correct_exit_code() {
        let err = MdanError::FlowError("discovery flow aborted".to_string());
        assert_eq!(err.exit_code(), exit_codes::FLOW_FAILURE);
    }

    #[test]
    fn tool_error_has_correct_exit_code() {
        let err = MdanError::ToolError("connection refused".to_string());
        assert_eq!(err.exit_code(), exit_codes::TOOL_FAILURE);
    }

    #[test]
    fn api_error_has_correct_exit_code() {
        let err = MdanError::ApiError("rate limit exceeded".to_string());
        assert_eq!(err.exit_code(), exit_codes::API_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = MdanError::UserError("unknown agent 'intern'".to_string());
        assert_eq!(err.to_string(), "unknown agent 'intern'");

        let err = MdanError::ToolError("query timed out".to_string());
        assert_eq!(err.to_string(), "Tool operation failed: query timed out");
    }
}
