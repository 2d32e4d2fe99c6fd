//! Terminal host for the survey — stdin/stdout, for local runs.

use std::sync::Mutex;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::survey::{Navigator, Notification, Notifier, Persona, SurveySession, SurveyView};

/// Records where the survey sent the user, and says so on stderr.
#[derive(Default)]
pub struct ConsoleNavigator {
    location: Mutex<Option<String>>,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> Option<String> {
        self.location.lock().ok().and_then(|l| l.clone())
    }
}

impl Navigator for ConsoleNavigator {
    fn push(&self, path: &str) {
        eprintln!("→ {path}");
        if let Ok(mut location) = self.location.lock() {
            *location = Some(path.to_string());
        }
    }
}

/// Prints notifications using their default text.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        println!("✔ {}", notification.message.default_message);
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(Persona),
    Clear,
    OtherText(String),
    Finish,
    Skip,
    Quit,
}

/// Parse a line. Free text is only accepted while the "other" field shows.
pub fn parse_command(line: &str, other_visible: bool) -> Option<Command> {
    let line = line.trim();
    match line {
        "" => None,
        "clear" => Some(Command::Clear),
        "finish" => Some(Command::Finish),
        "skip" => Some(Command::Skip),
        "/quit" | "quit" => Some(Command::Quit),
        _ => {
            if let Ok(n) = line.parse::<usize>() {
                return n
                    .checked_sub(1)
                    .and_then(|i| Persona::ALL.get(i))
                    .map(|p| Command::Select(*p));
            }
            other_visible.then(|| Command::OtherText(line.to_string()))
        }
    }
}

/// Render the form as plain text.
pub fn render(view: &SurveyView) -> String {
    let mut parts = vec![
        view.title.default_message.to_string(),
        String::new(),
        view.persona.label.default_message.to_string(),
    ];

    for (i, option) in view.persona.options.iter().enumerate() {
        let marker = if view.persona.value == Some(option.value) {
            "●"
        } else {
            "○"
        };
        parts.push(format!("  {} {marker} {}", i + 1, option.label));
    }

    if let Some(ref other) = view.other {
        parts.push(format!(
            "{}: {} (type to change)",
            other.label.default_message, other.value
        ));
    }

    parts.push(format!(
        "[1-{}] select · clear: {} · finish: {} · skip: {}",
        view.persona.options.len(),
        view.persona.clear_label.default_message,
        view.finish.default_message,
        view.skip.default_message
    ));
    parts.join("\n")
}

/// Drive `session` from `input` until it submits, the user quits, or input
/// ends. Returns whether the survey was submitted.
pub async fn run<R>(session: &mut SurveySession, input: R) -> std::io::Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    while let Some(view) = session.view() {
        println!("\n{}", render(&view));
        eprint!("> ");

        let Some(line) = lines.next_line().await? else {
            return Ok(false);
        };
        let Some(command) = parse_command(&line, view.other.is_some()) else {
            continue;
        };

        match command {
            Command::Select(persona) => session.set_persona(Some(persona)),
            Command::Clear => session.set_persona(None),
            Command::OtherText(text) => session.set_persona_other(text),
            Command::Finish => return Ok(session.finish()),
            Command::Skip => return Ok(session.skip()),
            Command::Quit => return Ok(false),
        }
    }

    Ok(false)
}
