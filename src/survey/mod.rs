//! Post-registration usecase survey.
//!
//! A freshly registered user is asked what kind of work they do. The answer
//! (or a skip) is reported to the analytics endpoint and the user is sent on
//! to the app root without waiting for the report to land. The survey only
//! shows when reached from registration; any other entry is redirected.

pub mod controller;
pub mod guard;
pub mod model;
pub mod ports;
pub mod session;
pub mod state;
pub mod task;
pub mod transport;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::{ReportOutcome, ReportTask, SubmissionController, SubmitKind, SurveyDeps};
pub use guard::{Guard, GuardDecision};
pub use model::{Identity, LocationState, NavigationContext, Persona, SubmissionReport};
pub use ports::{Message, Navigator, Notification, NotificationKind, Notifier, ReportTransport};
pub use session::SurveySession;
pub use state::{PersonaSelection, SubmissionPhase, SurveyForm};
pub use task::{CancelToken, CancellableTask};
pub use transport::HttpReportTransport;
pub use view::SurveyView;
