//! Collaborator interfaces consumed by the review flow.
//!
//! The review never touches project files or the network itself. It reads the
//! pending paths from a [`PlanProvider`], asks a [`FileRejector`] to discard a
//! single file's change, and hands the batch apply to an [`ApplyCoordinator`]
//! once the interactive loop is over. One client type usually implements all
//! three; tests use in-memory stubs.

use std::future::Future;

use crate::change_set::PlanChangeSet;
use crate::error::{ApplyError, BackendError, RejectError};

/// Identifies the plan and branch under review. Both values are opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRef {
    pub plan_id: String,
    pub branch: String,
}

impl PlanRef {
    pub fn new(plan_id: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            plan_id: plan_id.into(),
            branch: branch.into(),
        }
    }
}

/// Options forwarded to the apply-all operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyFlags {
    /// Apply without asking for per-file confirmation again.
    pub auto_confirm: bool,
}

/// Supplies the pending paths for the current plan.
pub trait PlanProvider {
    fn current_change_set(
        &self,
        plan: &PlanRef,
    ) -> impl Future<Output = Result<PlanChangeSet, BackendError>> + Send;
}

/// Discards the pending change for a single file.
pub trait FileRejector {
    fn reject_file(
        &self,
        plan: &PlanRef,
        path: &str,
    ) -> impl Future<Output = Result<(), RejectError>> + Send;
}

/// Applies every change still pending on the plan.
pub trait ApplyCoordinator {
    fn apply_all(
        &self,
        plan: &PlanRef,
        flags: ApplyFlags,
    ) -> impl Future<Output = Result<(), ApplyError>> + Send;
}
