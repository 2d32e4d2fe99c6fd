//! Host-agnostic description of the survey form.
//!
//! The host turns this into widgets; message ids are resolved by the host's
//! translations, falling back to the default text.

use serde::Serialize;

use super::model::Persona;
use super::ports::Message;
use super::state::SurveyForm;

pub mod messages {
    use super::Message;

    pub const TITLE: Message = Message::new("Usecase.title", "Tell us a bit more about yourself?");
    pub const WORK_TYPE: Message =
        Message::new("Usecase.input.work-type", "What type of work do you do?");
    pub const CLEAR: Message = Message::new("clearLabel", "Clear");
    pub const OTHER: Message = Message::new("Usecase.input.other", "Other");
    pub const FINISH: Message = Message::new("form.button.finish", "Finish");
    pub const SKIP: Message = Message::new("Usecase.button.skip", "Skip this question");
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: Persona,
    pub label: &'static str,
}

/// Single-choice selector over the persona set, with a clear action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaSelect {
    pub id: &'static str,
    pub label: Message,
    pub clear_label: Message,
    pub options: Vec<SelectOption>,
    pub value: Option<Persona>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextField {
    pub name: &'static str,
    pub label: Message,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyView {
    pub title: Message,
    pub persona: PersonaSelect,
    /// Present only while "other" is selected.
    pub other: Option<TextField>,
    pub finish: Message,
    pub skip: Message,
}

impl SurveyView {
    pub fn from_form(form: &SurveyForm) -> Self {
        let options = Persona::ALL
            .into_iter()
            .map(|value| SelectOption {
                value,
                label: value.label(),
            })
            .collect();

        let other = form.other_field_visible().then(|| TextField {
            name: "other",
            label: messages::OTHER,
            value: form.persona_other().to_string(),
        });

        Self {
            title: messages::TITLE,
            persona: PersonaSelect {
                id: "usecase",
                label: messages::WORK_TYPE,
                clear_label: messages::CLEAR,
                options,
                value: form.persona(),
            },
            other,
            finish: messages::FINISH,
            skip: messages::SKIP,
        }
    }
}
