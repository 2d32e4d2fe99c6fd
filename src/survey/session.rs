//! Survey session — one mounted instance of the survey view.
//!
//! Mounting runs the guard and creates the session's cancel token. Teardown
//! cancels the token exactly once, either explicitly or when the session is
//! dropped, so an in-flight report never outlives the view.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::controller::{ReportTask, SubmissionController, SubmitKind, SurveyDeps};
use super::guard::{Guard, GuardDecision};
use super::model::{NavigationContext, Persona};
use super::ports::Navigator;
use super::state::{SubmissionPhase, SurveyForm};
use super::task::CancelToken;
use super::view::SurveyView;
use crate::config::SurveyConfig;

pub struct SurveySession {
    id: Uuid,
    context: NavigationContext,
    guard: Guard,
    navigator: Arc<dyn Navigator>,
    form: SurveyForm,
    controller: SubmissionController,
    token: CancelToken,
    report: Option<ReportTask>,
    torn_down: bool,
}

impl SurveySession {
    /// Mount the survey for `context`. Redirects to root straight away if
    /// the context is not a registration entry.
    pub fn mount(context: NavigationContext, config: &SurveyConfig, deps: SurveyDeps) -> Self {
        let id = Uuid::new_v4();
        let navigator = Arc::clone(&deps.navigator);
        let mut session = Self {
            id,
            context,
            guard: Guard::new(config.root_path.clone()),
            navigator,
            form: SurveyForm::new(),
            controller: SubmissionController::new(deps, config.root_path.clone(), id),
            token: CancelToken::new(),
            report: None,
            torn_down: false,
        };
        session.run_guard();
        debug!(session_id = %id, visible = session.is_visible(), "Survey mounted");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Replace the navigation context, re-running the guard if it changed.
    pub fn set_context(&mut self, context: NavigationContext) {
        if self.torn_down || context == self.context {
            return;
        }
        self.context = context;
        self.run_guard();
    }

    fn run_guard(&mut self) {
        self.guard.evaluate(&self.context, self.navigator.as_ref());
    }

    /// Whether the form should be rendered at all.
    pub fn is_visible(&self) -> bool {
        !self.torn_down && self.guard.decision() == Some(GuardDecision::Allow)
    }

    /// The form to render, or `None` when the session renders nothing.
    pub fn view(&self) -> Option<SurveyView> {
        self.is_visible().then(|| SurveyView::from_form(&self.form))
    }

    pub fn form(&self) -> &SurveyForm {
        &self.form
    }

    pub fn set_persona(&mut self, persona: Option<Persona>) {
        if self.is_visible() {
            self.form.set_persona(persona);
        }
    }

    pub fn set_persona_other(&mut self, text: impl Into<String>) {
        if self.is_visible() {
            self.form.set_persona_other(text);
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.controller.phase()
    }

    /// Submit or skip. Returns whether a submission happened.
    pub fn submit(&mut self, kind: SubmitKind) -> bool {
        if !self.is_visible() {
            debug!(session_id = %self.id, kind = %kind, "Submit on hidden survey ignored");
            return false;
        }
        let before = self.controller.phase();
        self.report = self
            .controller
            .submit(kind, &self.context, &self.form, &self.token)
            .or(self.report.take());
        self.controller.phase() != before
    }

    pub fn finish(&mut self) -> bool {
        self.submit(SubmitKind::Finish)
    }

    pub fn skip(&mut self) -> bool {
        self.submit(SubmitKind::Skip)
    }

    /// Take the in-flight report to await it. It stays bound to this
    /// session's token.
    pub fn take_report(&mut self) -> Option<ReportTask> {
        self.report.take()
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.token
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Unmount: cancel any outstanding report. Later calls are no-ops.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        let in_flight = self.report.as_ref().is_some_and(|r| !r.is_finished());
        self.token.cancel();
        debug!(session_id = %self.id, in_flight, "Survey torn down");
    }
}

impl Drop for SurveySession {
    fn drop(&mut self) {
        self.teardown();
    }
}
