//! Interpretation of a finished review.
//!
//! A terminal [`ReviewSession`](crate::ReviewSession) is summarised as a
//! [`ReviewOutcome`]. [`conclude`] turns that summary into what the command
//! does next: run the batch apply, report a message, or fail.

use tracing::{info, warn};

use crate::backend::{ApplyCoordinator, ApplyFlags, PlanRef};
use crate::change_set::PlanChangeSet;
use crate::error::{RejectError, ReviewError};

/// Tagged summary of how a review ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Nothing was pending, so no review took place.
    NothingPending,
    /// The user confirmed applying everything in `change_set`.
    ApplyAll { change_set: PlanChangeSet },
    /// Rejections removed every pending file.
    AllRejected,
    /// The user quit; `change_set` is still pending.
    Quit { change_set: PlanChangeSet },
    /// A reject failed on the server and aborted the review.
    RejectFailed(RejectError),
}

/// Non-fatal result of [`conclude`], printed by the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReport {
    NothingPending,
    AllRejected,
    Applied,
    /// Quit with changes still pending. Nothing is printed.
    Silent,
}

impl ExitReport {
    /// Line to print after the terminal is restored, if any.
    pub fn message(self) -> Option<&'static str> {
        match self {
            ExitReport::NothingPending => Some("🤷‍♂️ No changes pending"),
            ExitReport::AllRejected => Some("🚫 All changes rejected"),
            ExitReport::Applied | ExitReport::Silent => None,
        }
    }
}

/// Acts on a review outcome.
///
/// Calls `applier` exactly once, and only for [`ReviewOutcome::ApplyAll`],
/// with `auto_confirm` set since the user already confirmed in the review.
///
/// # Errors
///
/// [`ReviewError::Server`] when the review was aborted by a reject failure,
/// [`ReviewError::Apply`] when the batch apply fails.
pub async fn conclude<A>(
    outcome: ReviewOutcome,
    applier: &A,
    plan: &PlanRef,
) -> Result<ExitReport, ReviewError>
where
    A: ApplyCoordinator,
{
    match outcome {
        ReviewOutcome::NothingPending => Ok(ExitReport::NothingPending),
        ReviewOutcome::AllRejected => Ok(ExitReport::AllRejected),
        ReviewOutcome::Quit { change_set } => {
            info!(pending = change_set.len(), "review closed with changes pending");
            Ok(ExitReport::Silent)
        }
        ReviewOutcome::RejectFailed(err) => {
            warn!(msg = %err.msg, code = ?err.code, "review aborted by reject failure");
            Err(ReviewError::Server(err))
        }
        ReviewOutcome::ApplyAll { change_set } => {
            info!(
                plan_id = %plan.plan_id,
                branch = %plan.branch,
                files = change_set.len(),
                "applying all pending changes"
            );
            let flags = ApplyFlags { auto_confirm: true };
            match applier.apply_all(plan, flags).await {
                Ok(()) => Ok(ExitReport::Applied),
                Err(err) => {
                    warn!(msg = %err.msg, "apply failed");
                    Err(ReviewError::Apply(err))
                }
            }
        }
    }
}
