//! Entry guard — the survey only shows for users coming from registration.

use tracing::debug;

use super::model::NavigationContext;
use super::ports::Navigator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the survey.
    Allow,
    /// Render nothing; the user was sent to root.
    Redirect,
}

/// Evaluates the navigation context and redirects away on invalid entry.
///
/// A context is evaluated once. Re-evaluating the same context returns the
/// cached decision without navigating again.
#[derive(Debug)]
pub struct Guard {
    root_path: String,
    last: Option<(NavigationContext, GuardDecision)>,
}

impl Guard {
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            last: None,
        }
    }

    pub fn evaluate(&mut self, ctx: &NavigationContext, navigator: &dyn Navigator) -> GuardDecision {
        if let Some((seen, decision)) = &self.last {
            if seen == ctx {
                return *decision;
            }
        }

        let decision = if ctx.is_from_register() {
            GuardDecision::Allow
        } else {
            debug!(root = %self.root_path, "Survey entered without registration, redirecting");
            navigator.push(&self.root_path);
            GuardDecision::Redirect
        };
        self.last = Some((ctx.clone(), decision));
        decision
    }

    /// Decision for the most recently evaluated context.
    pub fn decision(&self) -> Option<GuardDecision> {
        self.last.as_ref().map(|(_, d)| *d)
    }
}
