//! Form sessions and the two-tab app state.
//!
//! A session owns everything one mounted form needs: its in-progress input,
//! the last report it produced and the "copied" indicator. Switching tabs
//! drops the current session and mounts a fresh one.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::info;

use crate::clipboard::{Clipboard, CopiedIndicator};
use crate::error::Result;
use crate::options::OptionKey;
use crate::report::{SalesEntry, format_report, format_sales_report, now, title_line};
use crate::selection::SelectionState;

/// What happens with the raw selection on submit.
#[derive(Default)]
pub enum SubmitHandler {
    /// No handler installed: the payload goes to the log.
    #[default]
    Log,
    Callback(Box<dyn FnMut(&SelectionState)>),
}

impl SubmitHandler {
    pub fn callback<F>(f: F) -> Self
    where
        F: FnMut(&SelectionState) + 'static,
    {
        SubmitHandler::Callback(Box::new(f))
    }

    fn handle(&mut self, state: &SelectionState) {
        match self {
            SubmitHandler::Log => {
                let payload = serde_json::to_string(state).unwrap_or_default();
                info!(%payload, "폼 제출");
            }
            SubmitHandler::Callback(f) => f(state),
        }
    }
}

impl fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitHandler::Log => f.write_str("Log"),
            SubmitHandler::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Copy `report` and mark `indicator` on success.
///
/// Declines to run when nothing has been submitted yet.
fn copy_report(
    report: Option<&str>,
    indicator: &mut CopiedIndicator,
    clipboard: &mut Clipboard,
    now: Instant,
) -> Result<bool> {
    let Some(text) = report else {
        return Ok(false);
    };
    let copied = clipboard.copy(text)?;
    if copied {
        indicator.mark(now);
    }
    Ok(copied)
}

/// The tasting-feedback form.
#[derive(Debug)]
pub struct FeedbackSession {
    store: String,
    state: SelectionState,
    last_report: Option<String>,
    copied: CopiedIndicator,
    handler: SubmitHandler,
}

impl FeedbackSession {
    pub fn new(store: impl Into<String>, handler: SubmitHandler) -> Self {
        Self {
            store: store.into(),
            state: SelectionState::new(),
            last_report: None,
            copied: CopiedIndicator::default(),
            handler,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn toggle(&mut self, key: OptionKey) {
        self.state.toggle(key);
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Produce the report for `at`, remember it and hand the raw selection to
    /// the submit handler.
    pub fn submit_at(&mut self, at: &NaiveDateTime) -> &str {
        let report = format_report(&title_line(at, &self.store), &self.state);
        self.handler.handle(&self.state);
        self.last_report.insert(report).as_str()
    }

    pub fn submit(&mut self) -> &str {
        self.submit_at(&now())
    }

    pub fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }

    pub fn copy_last(&mut self, clipboard: &mut Clipboard, now: Instant) -> Result<bool> {
        copy_report(
            self.last_report.as_deref(),
            &mut self.copied,
            clipboard,
            now,
        )
    }

    pub fn copied(&self, now: Instant) -> bool {
        self.copied.is_shown(now)
    }
}

/// The daily sales form.
#[derive(Debug, Default)]
pub struct SalesSession {
    store: String,
    entry: SalesEntry,
    last_report: Option<String>,
    copied: CopiedIndicator,
}

impl SalesSession {
    pub fn new(store: impl Into<String>) -> Self {
        Self {
            store: store.into(),
            ..Self::default()
        }
    }

    pub fn entry(&self) -> &SalesEntry {
        &self.entry
    }

    pub fn set_amount(&mut self, raw: &str) -> Result<()> {
        self.entry.amount = Some(SalesEntry::parse_amount(raw)?);
        Ok(())
    }

    pub fn set_note(&mut self, note: &str) {
        let note = note.trim();
        self.entry.note = (!note.is_empty()).then(|| note.to_string());
    }

    /// Fails with `MissingAmount` until an amount has been entered; the
    /// previous report is kept in that case.
    pub fn submit_at(&mut self, at: &NaiveDateTime) -> Result<&str> {
        let report = format_sales_report(&title_line(at, &self.store), &self.entry)?;
        info!(amount = self.entry.amount, "매출 제출");
        Ok(self.last_report.insert(report).as_str())
    }

    pub fn submit(&mut self) -> Result<&str> {
        self.submit_at(&now())
    }

    pub fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }

    pub fn copy_last(&mut self, clipboard: &mut Clipboard, now: Instant) -> Result<bool> {
        copy_report(
            self.last_report.as_deref(),
            &mut self.copied,
            clipboard,
            now,
        )
    }

    pub fn copied(&self, now: Instant) -> bool {
        self.copied.is_shown(now)
    }
}

/// The two views of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Feedback,
    Sales,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::Feedback => "메뉴 피드백",
            Tab::Sales => "매출 기록",
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "feedback" | "메뉴 피드백" | "피드백" => Ok(Tab::Feedback),
            "sales" | "매출" => Ok(Tab::Sales),
            other => Err(format!("unknown tab: {} (feedback|sales)", other)),
        }
    }
}

/// The form currently mounted.
#[derive(Debug)]
pub enum ActiveForm {
    Feedback(FeedbackSession),
    Sales(SalesSession),
}

/// Active tab plus its mounted form.
///
/// The feedback form's submit handler is rebuilt by `make_handler` every time
/// the feedback tab is mounted.
pub struct App {
    store: String,
    make_handler: Box<dyn Fn() -> SubmitHandler>,
    form: ActiveForm,
}

impl App {
    pub fn new<F>(store: impl Into<String>, make_handler: F) -> Self
    where
        F: Fn() -> SubmitHandler + 'static,
    {
        let store = store.into();
        let form = ActiveForm::Feedback(FeedbackSession::new(store.clone(), make_handler()));
        Self {
            store,
            make_handler: Box::new(make_handler),
            form,
        }
    }

    pub fn active_tab(&self) -> Tab {
        match self.form {
            ActiveForm::Feedback(_) => Tab::Feedback,
            ActiveForm::Sales(_) => Tab::Sales,
        }
    }

    pub fn form(&self) -> &ActiveForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ActiveForm {
        &mut self.form
    }

    /// Mount `tab` with a fresh form. Re-selecting the active tab keeps it.
    pub fn switch_to(&mut self, tab: Tab) {
        if tab == self.active_tab() {
            return;
        }
        self.form = match tab {
            Tab::Feedback => {
                ActiveForm::Feedback(FeedbackSession::new(self.store.clone(), (self.make_handler)()))
            }
            Tab::Sales => ActiveForm::Sales(SalesSession::new(self.store.clone())),
        };
    }
}
