//! Survey data models: personas, navigation context, and the outgoing report.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The user's self-reported role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    FrontEndDeveloper,
    BackEndDeveloper,
    FullStackDeveloper,
    ContentManager,
    ContentCreator,
    Other,
}

impl Persona {
    /// Every persona, in the order the selector lists them.
    pub const ALL: [Persona; 6] = [
        Persona::FrontEndDeveloper,
        Persona::BackEndDeveloper,
        Persona::FullStackDeveloper,
        Persona::ContentManager,
        Persona::ContentCreator,
        Persona::Other,
    ];

    /// Wire value, as sent in the report.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrontEndDeveloper => "front_end_developer",
            Self::BackEndDeveloper => "back_end_developer",
            Self::FullStackDeveloper => "full_stack_developer",
            Self::ContentManager => "content_manager",
            Self::ContentCreator => "content_creator",
            Self::Other => "other",
        }
    }

    /// Label shown in the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FrontEndDeveloper => "Front-end developer",
            Self::BackEndDeveloper => "Back-end developer",
            Self::FullStackDeveloper => "Full-stack developer",
            Self::ContentManager => "Content Manager",
            Self::ContentCreator => "Content Creator",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Persona::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown persona: {s}"))
    }
}

/// Navigation state handed over by the registration screen.
///
/// Keys match what the router carries (`fromRegister`, `firstAdmin`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationState {
    #[serde(default)]
    pub from_register: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_admin: Option<bool>,
}

/// The context this view was entered with. `state` is absent when the user
/// navigated here directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationContext {
    pub state: Option<LocationState>,
}

impl NavigationContext {
    pub fn new(state: LocationState) -> Self {
        Self { state: Some(state) }
    }

    /// A context with no navigation state at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the view was reached through the registration flow.
    pub fn is_from_register(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.from_register)
    }

    /// Identity fields, available only on a valid entry.
    pub fn identity(&self) -> Option<Identity> {
        let state = self.state.as_ref().filter(|s| s.from_register)?;
        Some(Identity {
            email: state.email.clone(),
            firstname: state.firstname.clone(),
            first_admin: state.first_admin,
        })
    }
}

/// Who registered. Fields the registration screen did not provide stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub first_admin: Option<bool>,
}

/// Body of the analytics `POST`. Absent fields are omitted, never `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_other: Option<String>,
}

impl SubmissionReport {
    /// Identity-only report, as sent on skip.
    pub fn from_identity(identity: Identity) -> Self {
        Self {
            email: identity.email,
            username: identity.firstname,
            first_admin: identity.first_admin,
            persona: None,
            persona_other: None,
        }
    }

    /// Attach persona fields. `persona_other` is kept only for [`Persona::Other`].
    pub fn with_persona(mut self, persona: Option<Persona>, persona_other: &str) -> Self {
        self.persona = persona;
        self.persona_other = match persona {
            Some(Persona::Other) => Some(persona_other.to_string()),
            _ => None,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> LocationState {
        LocationState {
            from_register: true,
            email: Some("a@b.com".into()),
            firstname: Some("Ada".into()),
            first_admin: Some(true),
        }
    }

    #[test]
    fn display_matches_serde() {
        for persona in Persona::ALL {
            let json = serde_json::to_string(&persona).unwrap();
            assert_eq!(format!("\"{persona}\""), json);
        }
    }

    #[test]
    fn parse_accepts_only_known_values() {
        assert_eq!(
            "content_manager".parse::<Persona>().unwrap(),
            Persona::ContentManager
        );
        assert_eq!("other".parse::<Persona>().unwrap(), Persona::Other);
        assert!("designer".parse::<Persona>().is_err());
        assert!("".parse::<Persona>().is_err());
    }

    #[test]
    fn labels_are_distinct() {
        let labels: std::collections::HashSet<_> = Persona::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels.len(), Persona::ALL.len());
        assert_eq!(Persona::FullStackDeveloper.label(), "Full-stack developer");
    }

    #[test]
    fn location_state_reads_router_keys() {
        let state: LocationState = serde_json::from_str(
            r#"{"fromRegister":true,"email":"a@b.com","firstname":"Ada","firstAdmin":true}"#,
        )
        .unwrap();
        assert_eq!(state, ada());

        let bare: LocationState = serde_json::from_str("{}").unwrap();
        assert!(!bare.from_register);
    }

    #[test]
    fn identity_requires_register_flag() {
        assert!(NavigationContext::empty().identity().is_none());

        let not_registered = NavigationContext::new(LocationState {
            from_register: false,
            ..ada()
        });
        assert!(!not_registered.is_from_register());
        assert!(not_registered.identity().is_none());

        let ctx = NavigationContext::new(ada());
        let identity = ctx.identity().unwrap();
        assert_eq!(identity.email.as_deref(), Some("a@b.com"));
        assert_eq!(identity.firstname.as_deref(), Some("Ada"));
        assert_eq!(identity.first_admin, Some(true));
    }

    #[test]
    fn finish_report_matches_wire_shape() {
        let identity = NavigationContext::new(ada()).identity().unwrap();
        let report = SubmissionReport::from_identity(identity)
            .with_persona(Some(Persona::ContentManager), "ignored");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "a@b.com",
                "username": "Ada",
                "firstAdmin": true,
                "persona": "content_manager",
            })
        );
    }

    #[test]
    fn other_text_is_kept_only_for_other() {
        let identity = NavigationContext::new(ada()).identity().unwrap();
        let report =
            SubmissionReport::from_identity(identity).with_persona(Some(Persona::Other), "Designer");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["persona"], "other");
        assert_eq!(json["personaOther"], "Designer");
    }

    #[test]
    fn skip_report_has_no_persona_keys() {
        let identity = NavigationContext::new(ada()).identity().unwrap();
        let json = serde_json::to_value(SubmissionReport::from_identity(identity)).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(!obj.contains_key("persona"));
        assert!(!obj.contains_key("personaOther"));
    }

    #[test]
    fn missing_identity_fields_are_omitted() {
        let ctx = NavigationContext::new(LocationState {
            from_register: true,
            ..Default::default()
        });
        let json = serde_json::to_value(SubmissionReport::from_identity(ctx.identity().unwrap()))
            .unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
