//! CLI exit-code mapping.
//!
//! Configuration problems are rejected before any clustering work starts
//! and get their own exit code so scripts can tell a bad invocation apart
//! from a failing input file.

use std::process::ExitCode;

use concept_cluster_core::ClusterError;

/// Exit codes for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    /// Success - report written.
    Success = 0,
    /// Recoverable failure - unreadable input or lexicon backend failure.
    Failure = 1,
    /// Invalid configuration, rejected before any work.
    Config = 2,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

impl From<&ClusterError> for CliExitCode {
    fn from(err: &ClusterError) -> Self {
        match err {
            ClusterError::Config(_) => CliExitCode::Config,
            ClusterError::Lexicon(_) | ClusterError::Internal(_) => CliExitCode::Failure,
        }
    }
}
