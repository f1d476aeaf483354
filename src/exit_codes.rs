//! Exit codes for CLI commands.
//!
//! Standardized exit codes let CI pipelines tell a failing scenario apart
//! from a broken environment.

/// Success - every scenario passed or hit a documented known defect.
pub const SUCCESS: i32 = 0;

/// Failures - at least one scenario failed.
pub const FAILURES: i32 = 1;

/// Usage error - invalid arguments, unknown scenario, missing credentials.
pub const USAGE: i32 = 2;

/// Network error - the service could not be reached.
pub const NETWORK: i32 = 4;

/// Authentication error - the service rejected the credentials.
pub const AUTH: i32 = 5;

/// Internal error - unexpected error occurred.
pub const INTERNAL: i32 = 7;

/// Convert an anyhow::Error to an appropriate exit code.
pub fn from_error(err: &anyhow::Error) -> i32 {
    let msg = err.to_string().to_lowercase();

    if msg.contains("unknown scenario")
        || msg.contains("no credentials")
        || msg.contains("usage")
        || msg.contains("required")
    {
        USAGE
    } else if msg.contains("forbidden") || msg.contains("unauthorized") || msg.contains("403") {
        AUTH
    } else if msg.contains("network") || msg.contains("timeout") || msg.contains("connection") {
        NETWORK
    } else {
        INTERNAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use anyhow::anyhow;

    #[test]
    fn test_from_error_unknown_scenario() {
        let err: anyhow::Error = CliError::UnknownScenario("nope".to_string()).into();
        assert_eq!(from_error(&err), USAGE);
    }

    #[test]
    fn test_from_error_missing_credentials() {
        let err: anyhow::Error = CliError::MissingCredentials.into();
        assert_eq!(from_error(&err), USAGE);
    }

    #[test]
    fn test_from_error_auth() {
        let err = anyhow!("Authentication failed with status 403 Forbidden");
        assert_eq!(from_error(&err), AUTH);
    }

    #[test]
    fn test_from_error_network() {
        let err = anyhow!("Connection refused");
        assert_eq!(from_error(&err), NETWORK);
    }

    #[test]
    fn test_from_error_internal() {
        let err = anyhow!("Something went wrong");
        assert_eq!(from_error(&err), INTERNAL);
    }
}
