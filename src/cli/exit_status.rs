use std::process::ExitCode;

use super::commands::CommandResult;

/// Process exit status of a `lingot` run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Nothing to report, or only warnings.
    Success = 0,
    /// The command ran and found errors.
    Failure = 1,
    /// The command could not run, e.g. invalid config or no catalogs.
    Error = 2,
}

impl ExitStatus {
    /// Commands that only preview or rewrite catalogs (`clean`) never fail
    /// on the issues they print.
    pub fn from_result(result: &CommandResult) -> Self {
        if result.exit_on_errors && result.error_count > 0 {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}
