//! Core review model for pending plan changes.
//!
//! Holds everything that does not need a terminal: the ordered change set,
//! the review state machine, the collaborator traits used to reject and apply
//! changes, and the interpretation of a finished session into exit behaviour.

pub mod backend;
pub mod change_set;
pub mod error;
pub mod outcome;
pub mod session;

pub use backend::{ApplyCoordinator, ApplyFlags, FileRejector, PlanProvider, PlanRef};
pub use change_set::PlanChangeSet;
pub use error::{ApplyError, BackendError, RejectError, ReviewError};
pub use outcome::{conclude, ExitReport, ReviewOutcome};
pub use session::{ReviewEvent, ReviewSession, ReviewState, Step, TerminalCause};
