//! End-to-end review flows against in-memory collaborators.
//!
//! Exercises: PlanProvider snapshot, ReviewSession driven through reject and
//! apply-all paths, ReviewSession::into_outcome, and conclude().

use std::sync::Mutex;

use changes_core::{
    conclude, ApplyCoordinator, ApplyError, ApplyFlags, BackendError, ExitReport, FileRejector,
    PlanChangeSet, PlanProvider, PlanRef, RejectError, ReviewError, ReviewEvent, ReviewOutcome,
    ReviewSession, Step, TerminalCause,
};

/// In-memory plan server that records every call it receives.
#[derive(Default)]
struct StubServer {
    paths: Vec<&'static str>,
    reject_failure: Option<RejectError>,
    apply_failure: Option<ApplyError>,
    rejected: Mutex<Vec<String>>,
    applied: Mutex<Vec<ApplyFlags>>,
}

impl PlanProvider for StubServer {
    async fn current_change_set(&self, _plan: &PlanRef) -> Result<PlanChangeSet, BackendError> {
        Ok(PlanChangeSet::new(self.paths.iter().copied()))
    }
}

impl FileRejector for StubServer {
    async fn reject_file(&self, _plan: &PlanRef, path: &str) -> Result<(), RejectError> {
        if let Some(err) = &self.reject_failure {
            return Err(err.clone());
        }
        self.rejected.lock().unwrap().push(path.to_owned());
        Ok(())
    }
}

impl ApplyCoordinator for StubServer {
    async fn apply_all(&self, _plan: &PlanRef, flags: ApplyFlags) -> Result<(), ApplyError> {
        self.applied.lock().unwrap().push(flags);
        match &self.apply_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn plan() -> PlanRef {
    PlanRef::new("plan-1", "main")
}

/// Feeds `events` into the session, performing reject round trips the way the
/// terminal runner does. Stops at the first terminal step.
async fn drive(session: &mut ReviewSession, server: &StubServer, events: Vec<ReviewEvent>) {
    for event in events {
        let mut step = session.handle(event);
        if let Step::Reject(path) = &step {
            let result = server.reject_file(&plan(), path).await;
            step = session.handle(match result {
                Ok(()) => ReviewEvent::RejectSucceeded,
                Err(err) => ReviewEvent::RejectFailed(err),
            });
        }
        if matches!(step, Step::Finished(_)) {
            return;
        }
    }
}

#[tokio::test]
async fn reject_one_then_apply_all() {
    let server = StubServer {
        paths: vec!["a.go", "b.go", "c.go"],
        ..Default::default()
    };
    let set = server.current_change_set(&plan()).await.unwrap();
    let mut session = ReviewSession::new(set);

    drive(&mut session, &server, vec![ReviewEvent::RequestReject]).await;
    assert_eq!(session.change_set().paths(), ["b.go", "c.go"]);
    assert!(session.just_rejected_file());
    assert!(session.cursor() < session.change_set().len());
    assert!(!session.is_terminal());

    drive(
        &mut session,
        &server,
        vec![ReviewEvent::RequestApplyAll, ReviewEvent::Confirm],
    )
    .await;
    assert_eq!(session.terminal_cause(), Some(TerminalCause::ApplyAllConfirmed));
    assert!(session.apply_all_requested());
    assert_eq!(session.change_set().paths(), ["b.go", "c.go"]);

    let outcome = session.into_outcome().unwrap();
    let report = conclude(outcome, &server, &plan()).await.unwrap();
    assert_eq!(report, ExitReport::Applied);
    assert_eq!(*server.rejected.lock().unwrap(), ["a.go"]);
    assert_eq!(*server.applied.lock().unwrap(), [ApplyFlags { auto_confirm: true }]);
}

#[tokio::test]
async fn rejecting_the_only_file_ends_with_all_rejected() {
    let server = StubServer {
        paths: vec!["a.go"],
        ..Default::default()
    };
    let mut session = ReviewSession::new(server.current_change_set(&plan()).await.unwrap());

    drive(&mut session, &server, vec![ReviewEvent::RequestReject]).await;
    assert_eq!(session.terminal_cause(), Some(TerminalCause::AllFilesRejected));
    assert!(session.just_rejected_file());

    let report = conclude(session.into_outcome().unwrap(), &server, &plan()).await.unwrap();
    assert_eq!(report, ExitReport::AllRejected);
    assert_eq!(report.message(), Some("🚫 All changes rejected"));
    assert!(server.applied.lock().unwrap().is_empty());
}

#[tokio::test]
async fn reject_failure_aborts_with_server_error() {
    let server = StubServer {
        paths: vec!["a.go", "b.go"],
        reject_failure: Some(RejectError::new("server error")),
        ..Default::default()
    };
    let mut session = ReviewSession::new(server.current_change_set(&plan()).await.unwrap());

    drive(
        &mut session,
        &server,
        vec![ReviewEvent::RequestReject, ReviewEvent::RequestApplyAll, ReviewEvent::Confirm],
    )
    .await;
    assert_eq!(session.terminal_cause(), Some(TerminalCause::RejectFailed));
    assert_eq!(session.last_reject_error().unwrap().msg, "server error");
    assert!(!session.apply_all_requested());

    let outcome = session.into_outcome().unwrap();
    assert_eq!(outcome, ReviewOutcome::RejectFailed(RejectError::new("server error")));

    let err = conclude(outcome, &server, &plan()).await.unwrap_err();
    assert!(matches!(err, ReviewError::Server(_)));
    assert_eq!(err.to_string(), "Server error: server error");
    assert!(server.applied.lock().unwrap().is_empty(), "apply never runs after a reject failure");
}

#[tokio::test]
async fn empty_plan_reports_nothing_pending_without_a_session() {
    let server = StubServer::default();
    let set = server.current_change_set(&plan()).await.unwrap();
    assert!(set.is_empty());

    let report = conclude(ReviewOutcome::NothingPending, &server, &plan()).await.unwrap();
    assert_eq!(report.message(), Some("🤷‍♂️ No changes pending"));
    assert!(server.applied.lock().unwrap().is_empty());
}

#[tokio::test]
async fn quitting_with_changes_pending_is_silent() {
    let server = StubServer {
        paths: vec!["a.go", "b.go"],
        ..Default::default()
    };
    let mut session = ReviewSession::new(server.current_change_set(&plan()).await.unwrap());

    drive(
        &mut session,
        &server,
        vec![ReviewEvent::Move(1), ReviewEvent::RequestApplyAll, ReviewEvent::Quit],
    )
    .await;
    assert_eq!(session.terminal_cause(), Some(TerminalCause::UserQuit));
    assert!(!session.apply_all_requested());

    let report = conclude(session.into_outcome().unwrap(), &server, &plan()).await.unwrap();
    assert_eq!(report, ExitReport::Silent);
    assert_eq!(report.message(), None);
    assert!(server.applied.lock().unwrap().is_empty());
}

#[tokio::test]
async fn apply_failure_is_reported_as_fatal() {
    let server = StubServer {
        paths: vec!["a.go"],
        apply_failure: Some(ApplyError::new("conflict in a.go")),
        ..Default::default()
    };
    let mut session = ReviewSession::new(server.current_change_set(&plan()).await.unwrap());
    drive(
        &mut session,
        &server,
        vec![ReviewEvent::RequestApplyAll, ReviewEvent::Confirm],
    )
    .await;

    let err = conclude(session.into_outcome().unwrap(), &server, &plan())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Apply failed: conflict in a.go");
    assert_eq!(server.applied.lock().unwrap().len(), 1, "apply is not retried");
}
