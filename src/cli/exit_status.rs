use std::process::ExitCode;

/// Process exit status of a msgbind command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// 0: the command ran and found nothing to report (or only warnings).
    Success,
    /// 1: `check` found errors, or warnings under `--strict`.
    Failure,
    /// 2: the command could not run (bad config, unreadable bundle directory).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
