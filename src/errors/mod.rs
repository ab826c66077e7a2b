/// Structured error handling for lockwatch
///
/// Errors are split by the layer that produces them:
/// - `DecodeError`: a single escrow record could not be decoded (skip record)
/// - `VestingError`: a decoded schedule cannot be evaluated (skip record)
/// - `ScanError`: the scan as a whole failed (terminal for the request)
///
/// Per-record failures never abort a batch. They are turned into
/// `RecordIssue` values and attached to the scan report.
use crate::rpc::RpcError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// RECORD-LEVEL ERRORS
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Short buffer: expected at least {expected} bytes, got {actual}")]
    ShortBuffer { expected: usize, actual: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VestingError {
    #[error("Vesting schedule overflows u64 while computing {field}")]
    Overflow { field: &'static str },
}

// =============================================================================
// SCAN-LEVEL ERRORS
// =============================================================================

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Transport error: {0}")]
    Transport(#[from] RpcError),

    #[error("Scan timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ScanError {
    /// Stable machine-readable code used in HTTP error payloads
    pub fn error_code(&self) -> &'static str {
        match self {
            ScanError::Transport(_) => "TRANSPORT_ERROR",
            ScanError::Timeout { .. } => "TIMEOUT",
            ScanError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Whether retrying the same request later can succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            ScanError::Transport(_) => true,
            ScanError::Timeout { .. } => true,
            ScanError::Configuration(_) => false,
        }
    }

    /// Short message suitable for API consumers
    pub fn user_message(&self) -> String {
        match self {
            ScanError::Transport(_) => "Ledger RPC endpoint unavailable".to_string(),
            ScanError::Timeout { seconds } => {
                format!("Account scan did not finish within {}s", seconds)
            }
            ScanError::Configuration(_) => "Service is misconfigured".to_string(),
        }
    }
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Kind of per-record problem that excluded an account from aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    ShortBuffer,
    Overflow,
    /// One account id returned more than once with different data
    DuplicateAccount,
}

/// A record that was skipped, attached to the report instead of being swallowed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordIssue {
    pub account: String,
    pub kind: IssueKind,
    pub message: String,
}

impl RecordIssue {
    pub fn from_decode(account: &str, err: &DecodeError) -> Self {
        let kind = match err {
            DecodeError::ShortBuffer { .. } => IssueKind::ShortBuffer,
        };
        Self {
            account: account.to_string(),
            kind,
            message: err.to_string(),
        }
    }

    pub fn conflicting_duplicate(account: &str, copies: usize) -> Self {
        Self {
            account: account.to_string(),
            kind: IssueKind::DuplicateAccount,
            message: format!(
                "Account returned {} times with differing data, ignored",
                copies
            ),
        }
    }

    pub fn from_vesting(account: &str, err: &VestingError) -> Self {
        let kind = match err {
            VestingError::Overflow { .. } => IssueKind::Overflow,
        };
        Self {
            account: account.to_string(),
            kind,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let transport = ScanError::Transport(RpcError::ConnectionFailed("refused".to_string()));
        assert_eq!(transport.error_code(), "TRANSPORT_ERROR");
        assert!(transport.is_recoverable());

        let timeout = ScanError::Timeout { seconds: 5 };
        assert_eq!(timeout.error_code(), "TIMEOUT");
        assert!(timeout.user_message().contains("5s"));

        let config = ScanError::Configuration("bad mint".to_string());
        assert_eq!(config.error_code(), "CONFIGURATION_ERROR");
        assert!(!config.is_recoverable());
    }

    #[test]
    fn test_record_issue_kinds() {
        let short = DecodeError::ShortBuffer {
            expected: 288,
            actual: 12,
        };
        let issue = RecordIssue::from_decode("acc1", &short);
        assert_eq!(issue.kind, IssueKind::ShortBuffer);
        assert!(issue.message.contains("288"));

        let overflow = VestingError::Overflow {
            field: "amount_per_period * number_of_period",
        };
        let issue = RecordIssue::from_vesting("acc2", &overflow);
        assert_eq!(issue.kind, IssueKind::Overflow);
        assert_eq!(issue.account, "acc2");
    }

    #[test]
    fn test_issue_serialization() {
        let issue = RecordIssue {
            account: "acc".to_string(),
            kind: IssueKind::ShortBuffer,
            message: "short".to_string(),
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "short_buffer");
        assert_eq!(json["account"], "acc");

        let duplicate = RecordIssue::conflicting_duplicate("acc", 2);
        let json = serde_json::to_value(&duplicate).unwrap();
        assert_eq!(json["kind"], "duplicate_account");
        assert!(duplicate.message.contains("2 times"));
    }
}
