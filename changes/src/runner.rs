//! Event loop driving a review session to a terminal state.
//!
//! The runner owns nothing: the caller passes in the terminal, the event
//! receiver, the app state, and the reject collaborator, and gets the state
//! back once [`run_session`] returns. That keeps the loop testable with
//! ratatui's `TestBackend` and a scripted channel.
//!
//! The loop blocks only on input. A reject round trip is awaited alongside the
//! input channel and the SIGTERM heartbeat: while it is in flight the session is
//! in `Rejecting`, and the only way out besides the server's answer is a quit,
//! which drops the pending request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use changes_core::{FileRejector, RejectError, ReviewEvent, Step};
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::app::AppState;
use crate::event::AppEvent;
use crate::theme::Theme;
use crate::ui;
use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};

/// How often the SIGTERM flag is checked when no events arrive.
const HEARTBEAT: Duration = Duration::from_millis(50);

/// Runs the review until the session reaches a terminal state.
///
/// SIGTERM (`term_flag`), an `AppEvent::Quit`, or the event channel closing
/// are all fed into the session as `ReviewEvent::Quit`, so the loop always
/// ends with a terminal session.
///
/// # Errors
///
/// Returns the backend's error if drawing a frame fails. The session is left
/// as it was when the draw failed.
pub async fn run_session<B, R>(
    terminal: &mut Terminal<B>,
    rx: &mut UnboundedReceiver<AppEvent>,
    state: &mut AppState,
    rejector: &R,
    theme: &Theme,
    term_flag: &AtomicBool,
) -> Result<(), B::Error>
where
    B: Backend,
    R: FileRejector,
{
    draw(terminal, state, theme)?;

    loop {
        let review_event = tokio::select! {
            _ = tokio::time::sleep(HEARTBEAT) => None,
            maybe_event = rx.recv() => match maybe_event {
                Some(AppEvent::Render) => {
                    draw(terminal, state, theme)?;
                    None
                }
                Some(AppEvent::Key(key)) => into_review_event(handle_key(key, state)),
                Some(AppEvent::Mouse(mouse)) => into_review_event(handle_mouse(mouse, state)),
                Some(AppEvent::Resize(width, height)) => {
                    debug!(width, height, "terminal resized");
                    draw(terminal, state, theme)?;
                    None
                }
                Some(AppEvent::Quit) | None => Some(ReviewEvent::Quit),
            },
        };

        let review_event = if term_flag.load(Ordering::Relaxed) {
            Some(ReviewEvent::Quit)
        } else {
            review_event
        };

        let Some(event) = review_event else {
            continue;
        };

        if advance(terminal, rx, state, rejector, theme, term_flag, event).await? {
            break;
        }
    }

    Ok(())
}

/// Feeds one event into the session, performing the reject round trip when
/// the session asks for one. Returns `true` once the session is terminal.
async fn advance<B, R>(
    terminal: &mut Terminal<B>,
    rx: &mut UnboundedReceiver<AppEvent>,
    state: &mut AppState,
    rejector: &R,
    theme: &Theme,
    term_flag: &AtomicBool,
    event: ReviewEvent,
) -> Result<bool, B::Error>
where
    B: Backend,
    R: FileRejector,
{
    debug!(?event, "review event");
    state.notice = None;

    let step = match state.session.handle(event) {
        Step::Reject(path) => {
            // Show the in-flight state before waiting on the server.
            draw(terminal, state, theme)?;
            match await_reject(terminal, rx, state, rejector, theme, term_flag, &path).await? {
                Some(Ok(())) => {
                    state.notice = Some(format!("Rejected {path}"));
                    state.session.handle(ReviewEvent::RejectSucceeded)
                }
                Some(Err(err)) => state.session.handle(ReviewEvent::RejectFailed(err)),
                None => {
                    debug!(%path, "quit while reject was in flight");
                    state.session.handle(ReviewEvent::Quit)
                }
            }
        }
        other => other,
    };

    Ok(matches!(step, Step::Finished(_)))
}

/// Waits for the server's answer to a reject while still serving input.
///
/// Returns `None` when the user quits (Ctrl-c, input closed, SIGTERM) before
/// the answer arrives; the request future is dropped in that case.
async fn await_reject<B, R>(
    terminal: &mut Terminal<B>,
    rx: &mut UnboundedReceiver<AppEvent>,
    state: &mut AppState,
    rejector: &R,
    theme: &Theme,
    term_flag: &AtomicBool,
    path: &str,
) -> Result<Option<Result<(), RejectError>>, B::Error>
where
    B: Backend,
    R: FileRejector,
{
    let plan = state.plan.clone();
    let reject = rejector.reject_file(&plan, path);
    tokio::pin!(reject);

    loop {
        tokio::select! {
            // An answer that is already available wins over queued input.
            biased;
            result = &mut reject => return Ok(Some(result)),
            _ = tokio::time::sleep(HEARTBEAT) => {}
            maybe_event = rx.recv() => match maybe_event {
                Some(AppEvent::Render) | Some(AppEvent::Resize(_, _)) => {
                    draw(terminal, state, theme)?;
                }
                Some(AppEvent::Key(key)) => {
                    if matches!(handle_key(key, state), KeyAction::Review(ReviewEvent::Quit)) {
                        return Ok(None);
                    }
                }
                Some(AppEvent::Mouse(_)) => {}
                Some(AppEvent::Quit) | None => return Ok(None),
            },
        }

        if term_flag.load(Ordering::Relaxed) {
            return Ok(None);
        }
    }
}

fn into_review_event(action: KeyAction) -> Option<ReviewEvent> {
    match action {
        KeyAction::Continue => None,
        KeyAction::Review(event) => Some(event),
    }
}

fn draw<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    theme: &Theme,
) -> Result<(), B::Error> {
    terminal.draw(|frame| ui::render(frame, state, theme))?;
    Ok(())
}
