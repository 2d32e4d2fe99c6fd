//! Form state and the per-session submission state machine.

use super::model::Persona;

/// What the selector currently holds.
///
/// `Unset` (never chosen) and `Cleared` (chosen, then cleared) are kept apart
/// for the host, but both mean "no persona" when reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersonaSelection {
    #[default]
    Unset,
    Cleared,
    Selected(Persona),
}

impl PersonaSelection {
    pub fn persona(&self) -> Option<Persona> {
        match self {
            Self::Selected(p) => Some(*p),
            Self::Unset | Self::Cleared => None,
        }
    }
}

/// Persona selection plus the free-text "other" value.
#[derive(Debug, Clone, Default)]
pub struct SurveyForm {
    selection: PersonaSelection,
    persona_other: String,
}

impl SurveyForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a persona, or clear the selection with `None`.
    pub fn set_persona(&mut self, persona: Option<Persona>) {
        self.selection = match persona {
            Some(p) => PersonaSelection::Selected(p),
            None => PersonaSelection::Cleared,
        };
    }

    /// Replace the "other" text. Visibility of the field is unaffected.
    pub fn set_persona_other(&mut self, text: impl Into<String>) {
        self.persona_other = text.into();
    }

    pub fn selection(&self) -> PersonaSelection {
        self.selection
    }

    pub fn persona(&self) -> Option<Persona> {
        self.selection.persona()
    }

    pub fn persona_other(&self) -> &str {
        &self.persona_other
    }

    /// The "other" field is shown iff the selection is [`Persona::Other`].
    pub fn other_field_visible(&self) -> bool {
        self.persona() == Some(Persona::Other)
    }
}

/// Lifecycle of one submission on one session.
///
/// Progresses linearly: Idle → Submitting → Terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Terminated,
}

impl SubmissionPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: SubmissionPhase) -> bool {
        use SubmissionPhase::*;
        matches!((self, target), (Idle, Submitting) | (Submitting, Terminated))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// Move to `target`, or report why not.
    pub fn advance(&mut self, target: SubmissionPhase) -> Result<(), String> {
        if !self.can_transition_to(target) {
            return Err(format!("Cannot transition from {self} to {target}"));
        }
        *self = target;
        Ok(())
    }
}

impl std::fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Terminated => "terminated",
        };
        write!(f, "{s}")
    }
}
