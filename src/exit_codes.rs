//! Exit code constants for the mdan CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid state)
//! - 2: Flow failure
//! - 3: Tool failure (search/SQL/filesystem/clipboard)
//! - 4: LLM API failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing config, or invalid project state.
pub const USER_ERROR: i32 = 1;

/// Flow failure: a flow pipeline could not be started or completed.
pub const FLOW_FAILURE: i32 = 2;

/// Tool failure: search, SQL, filesystem, or clipboard operation errors.
pub const TOOL_FAILURE: i32 = 3;

/// LLM API failure: the chat-completion backend rejected or failed a request.
pub const API_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, FLOW_FAILURE, TOOL_FAILURE, API_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(FLOW_FAILURE, 2);
        assert_eq!(TOOL_FAILURE, 3);
        assert_eq!(API_FAILURE, 4);
    }
}
