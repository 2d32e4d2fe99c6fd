//! Recording doubles for the survey's collaborators.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use super::controller::SurveyDeps;
use super::model::SubmissionReport;
use super::ports::{Navigator, Notification, Notifier, ReportTransport};
use crate::error::ReportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Notified(Notification),
    Navigated(String),
}

#[derive(Clone, Copy)]
enum Mode {
    Immediate,
    Failing,
    Blocking,
}

struct Inner {
    mode: Mode,
    events: Mutex<Vec<Event>>,
    reports: Mutex<Vec<SubmissionReport>>,
    started: watch::Sender<bool>,
    released: watch::Sender<bool>,
    aborted: AtomicBool,
}

/// Navigator, notifier and transport in one, recording everything.
#[derive(Clone)]
pub(crate) struct Recorder {
    inner: Arc<Inner>,
}

impl Recorder {
    fn with_mode(mode: Mode) -> Self {
        Self {
            inner: Arc::new(Inner {
                mode,
                events: Mutex::new(Vec::new()),
                reports: Mutex::new(Vec::new()),
                started: watch::channel(false).0,
                released: watch::channel(false).0,
                aborted: AtomicBool::new(false),
            }),
        }
    }

    /// Transport succeeds straight away.
    pub fn immediate() -> Self {
        Self::with_mode(Mode::Immediate)
    }

    /// Transport fails straight away.
    pub fn failing() -> Self {
        Self::with_mode(Mode::Failing)
    }

    /// Transport hangs until [`release`](Self::release).
    pub fn blocking() -> Self {
        Self::with_mode(Mode::Blocking)
    }

    pub fn deps(&self) -> SurveyDeps {
        SurveyDeps {
            transport: Arc::new(self.clone()),
            navigator: Arc::new(self.clone()),
            notifier: Arc::new(self.clone()),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.inner.events.lock().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<SubmissionReport> {
        self.inner.reports.lock().unwrap().clone()
    }

    pub async fn wait_for_send(&self) {
        let mut rx = self.inner.started.subscribe();
        rx.wait_for(|started| *started).await.unwrap();
    }

    pub fn release(&self) {
        self.inner.released.send_replace(true);
    }

    /// Whether a blocking send was dropped before it was released.
    pub fn aborted(&self) -> bool {
        self.inner.aborted.load(Ordering::SeqCst)
    }
}

impl Navigator for Recorder {
    fn push(&self, path: &str) {
        self.inner
            .events
            .lock()
            .unwrap()
            .push(Event::Navigated(path.to_string()));
    }
}

impl Notifier for Recorder {
    fn notify(&self, notification: Notification) {
        self.inner
            .events
            .lock()
            .unwrap()
            .push(Event::Notified(notification));
    }
}

struct AbortGuard<'a> {
    flag: &'a AtomicBool,
    done: bool,
}

impl Drop for AbortGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.flag.store(true, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl ReportTransport for Recorder {
    async fn send(&self, report: &SubmissionReport) -> Result<(), ReportError> {
        self.inner.reports.lock().unwrap().push(report.clone());
        match self.inner.mode {
            Mode::Immediate => Ok(()),
            Mode::Failing => Err(ReportError::RequestFailed("connection refused".into())),
            Mode::Blocking => {
                let mut guard = AbortGuard {
                    flag: &self.inner.aborted,
                    done: false,
                };
                let mut rx = self.inner.released.subscribe();
                self.inner.started.send_replace(true);
                let _ = rx.wait_for(|released| *released).await;
                guard.done = true;
                Ok(())
            }
        }
    }
}
