//! Submission controller — builds the report, fires it off, and moves the
//! user on without waiting for the network.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, warn};
use uuid::Uuid;

use super::model::{NavigationContext, SubmissionReport};
use super::ports::{Navigator, Notification, Notifier, ReportTransport, SUBMITTED};
use super::state::{SubmissionPhase, SurveyForm};
use super::task::{CancelToken, CancellableTask};
use crate::error::ReportError;

/// Collaborators injected into a survey session.
#[derive(Clone)]
pub struct SurveyDeps {
    pub transport: Arc<dyn ReportTransport>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

/// Which control the user pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    /// Send the selected persona along with the identity.
    Finish,
    /// Send the identity only.
    Skip,
}

impl std::fmt::Display for SubmitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finish => write!(f, "finish"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// How a report ended, when it was not cancelled.
#[derive(Debug)]
pub enum ReportOutcome {
    Delivered,
    Failed(ReportError),
}

/// The in-flight analytics call. Joins to `None` when cancelled.
pub type ReportTask = CancellableTask<ReportOutcome>;

/// Build the report for a submission.
///
/// Fails only when the context is not a valid entry into the survey.
pub fn build_report(
    ctx: &NavigationContext,
    form: &SurveyForm,
    kind: SubmitKind,
) -> Result<SubmissionReport, ReportError> {
    let identity = ctx.identity().ok_or(ReportError::InvalidEntry)?;
    let report = SubmissionReport::from_identity(identity);
    Ok(match kind {
        SubmitKind::Finish => report.with_persona(form.persona(), form.persona_other()),
        SubmitKind::Skip => report,
    })
}

pub struct SubmissionController {
    deps: SurveyDeps,
    root_path: String,
    phase: SubmissionPhase,
    session_id: Uuid,
}

impl SubmissionController {
    pub fn new(deps: SurveyDeps, root_path: impl Into<String>, session_id: Uuid) -> Self {
        Self {
            deps,
            root_path: root_path.into(),
            phase: SubmissionPhase::Idle,
            session_id,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Submit the survey.
    ///
    /// Spawns the report on the current tokio runtime, then notifies and
    /// navigates to root before the report resolves. Nothing on this path
    /// surfaces an error; failures are only logged. Returns the spawned
    /// report, if one was started.
    pub fn submit(
        &mut self,
        kind: SubmitKind,
        ctx: &NavigationContext,
        form: &SurveyForm,
        token: &CancelToken,
    ) -> Option<ReportTask> {
        if self.phase != SubmissionPhase::Idle {
            debug!(
                session_id = %self.session_id,
                phase = %self.phase,
                "Ignoring repeated survey submission"
            );
            return None;
        }

        let report = match build_report(ctx, form, kind) {
            Ok(report) => report,
            Err(e) => {
                debug!(session_id = %self.session_id, "Survey report not built: {}", e);
                return None;
            }
        };

        self.transition(SubmissionPhase::Submitting);
        let task = self.spawn_report(report, token);

        self.deps.notifier.notify(Notification::success(SUBMITTED));
        self.deps.navigator.push(&self.root_path);
        self.transition(SubmissionPhase::Terminated);

        debug!(
            session_id = %self.session_id,
            kind = %kind,
            in_flight = task.is_some(),
            "Survey submitted"
        );
        task
    }

    fn spawn_report(&self, report: SubmissionReport, token: &CancelToken) -> Option<ReportTask> {
        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                let err = ReportError::NoRuntime(e.to_string());
                warn!(session_id = %self.session_id, "Survey report dropped: {}", err);
                return None;
            }
        };

        let transport = Arc::clone(&self.deps.transport);
        let session_id = self.session_id;
        Some(CancellableTask::spawn(
            &runtime,
            token.clone(),
            async move { transport.send(&report).await },
            move |result| match result {
                Ok(()) => {
                    debug!(session_id = %session_id, "Survey report delivered");
                    ReportOutcome::Delivered
                }
                Err(e) => {
                    warn!(session_id = %session_id, "Survey report failed: {}", e);
                    ReportOutcome::Failed(e)
                }
            },
        ))
    }

    fn transition(&mut self, target: SubmissionPhase) {
        if let Err(e) = self.phase.advance(target) {
            warn!(session_id = %self.session_id, "Survey phase: {}", e);
        }
    }
}
