//! Shell hook run when the batch apply fails.
//!
//! The command comes from `on_apply_fail` in the config file and runs through
//! `sh -c` on the restored terminal, inheriting stdio. The plan and the failure
//! are passed in the environment:
//!
//! - `CHANGES_PLAN_ID`
//! - `CHANGES_BRANCH`
//! - `CHANGES_APPLY_ERROR`

use std::io;
use std::process::ExitStatus;

use changes_core::PlanRef;
use tokio::process::Command;
use tracing::{info, warn};

/// Runs `command` and waits for it to exit.
///
/// # Errors
///
/// Returns the spawn error if `sh` cannot be started. A non-zero exit is not an
/// error; it is logged and returned in the status.
pub async fn run_apply_fail_hook(
    command: &str,
    plan: &PlanRef,
    apply_error: &str,
) -> io::Result<ExitStatus> {
    info!(%command, "running on_apply_fail hook");
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .env("CHANGES_PLAN_ID", &plan.plan_id)
        .env("CHANGES_BRANCH", &plan.branch)
        .env("CHANGES_APPLY_ERROR", apply_error)
        .status()
        .await?;

    if !status.success() {
        warn!(code = ?status.code(), "on_apply_fail hook exited unsuccessfully");
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hook_sees_plan_and_error_in_env() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("hook.out");
        let command = format!(
            "printf '%s' \"$CHANGES_PLAN_ID|$CHANGES_BRANCH|$CHANGES_APPLY_ERROR\" > '{}'",
            out.display()
        );

        let status = run_apply_fail_hook(&command, &PlanRef::new("p-7", "main"), "disk full")
            .await
            .unwrap();

        assert!(status.success());
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "p-7|main|disk full");
    }

    #[tokio::test]
    async fn failing_hook_reports_its_exit_code() {
        let status = run_apply_fail_hook("exit 3", &PlanRef::new("p", "main"), "boom")
            .await
            .unwrap();
        assert_eq!(status.code(), Some(3));
    }
}
