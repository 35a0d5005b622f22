//! Toast notifications.
//!
//! Views push [`Toast`]s into whatever [`ToastSink`] the host provides. Toasts
//! are grouped per view so each view's toast region only shows its own.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Default display time for the common toasts.
pub const TWO_SECONDS: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub life: Duration,
    pub group: String,
}

/// Destination for toasts.
pub trait ToastSink: Send + Sync {
    fn add(&self, toast: Toast);
}

#[must_use]
pub fn error_toast(detail: impl std::fmt::Display, group: &str) -> Toast {
    common(Severity::Error, "Error", detail.to_string(), group)
}

#[must_use]
pub fn success_toast(detail: impl Into<String>, group: &str) -> Toast {
    common(Severity::Success, "Success", detail.into(), group)
}

#[must_use]
pub fn warn_toast(detail: impl Into<String>, group: &str) -> Toast {
    common(Severity::Warn, "Warning", detail.into(), group)
}

fn common(severity: Severity, summary: &str, detail: String, group: &str) -> Toast {
    Toast { severity, summary: summary.to_owned(), detail, life: TWO_SECONDS, group: group.to_owned() }
}

/// In-memory sink. Also logs each toast.
#[derive(Debug, Default)]
pub struct ToastLog {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Toasts for one group, oldest first.
    #[must_use]
    pub fn group(&self, group: &str) -> Vec<Toast> {
        self.toasts().into_iter().filter(|t| t.group == group).collect()
    }
}

impl ToastSink for ToastLog {
    fn add(&self, toast: Toast) {
        match toast.severity {
            Severity::Error => tracing::warn!(group = %toast.group, detail = %toast.detail, "error toast"),
            _ => tracing::debug!(group = %toast.group, severity = ?toast.severity, detail = %toast.detail, "toast"),
        }
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).push(toast);
    }
}
