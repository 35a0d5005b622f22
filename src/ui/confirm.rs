//! Delete confirmation flow.
//!
//! DESIGN
//! ======
//! `request` stages a delete and returns the prompt to show. Nothing runs
//! until the prompt is accepted; rejecting just drops the staged action.
//! Outcomes are reported through toasts in the view's group.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::toast::{ToastSink, error_toast, success_toast};
use crate::net::ApiError;

type DeleteAction = Pin<Box<dyn Future<Output = Result<(), ApiError>> + Send>>;
type OnSuccess = Arc<dyn Fn() + Send + Sync>;

/// What the confirmation dialog shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub group: String,
    pub header: String,
    pub message: String,
    pub accept_label: String,
    pub reject_label: String,
}

/// Per-view delete confirmation helper.
pub struct ConfirmDelete {
    group: String,
    entity: String,
    toasts: Arc<dyn ToastSink>,
    on_success: Option<OnSuccess>,
}

impl ConfirmDelete {
    #[must_use]
    pub fn new(group: impl Into<String>, entity: impl Into<String>, toasts: Arc<dyn ToastSink>) -> Self {
        Self { group: group.into(), entity: entity.into(), toasts, on_success: None }
    }

    /// Callback run after a successful delete, e.g. reloading the table.
    #[must_use]
    pub fn on_success(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(callback));
        self
    }

    /// Stage `action` behind a confirmation prompt.
    pub fn request<F>(&self, action: F, custom_message: Option<&str>) -> PendingDelete
    where
        F: Future<Output = Result<(), ApiError>> + Send + 'static,
    {
        let message = custom_message.map_or_else(
            || format!("Are you sure you want to delete the {}?", self.entity),
            str::to_owned,
        );
        PendingDelete {
            prompt: ConfirmPrompt {
                group: self.group.clone(),
                header: "Delete".into(),
                message,
                accept_label: "Yes".into(),
                reject_label: "No".into(),
            },
            action: Box::pin(action),
            entity: self.entity.clone(),
            toasts: Arc::clone(&self.toasts),
            on_success: self.on_success.clone(),
        }
    }
}

/// A delete waiting on the user's answer.
pub struct PendingDelete {
    prompt: ConfirmPrompt,
    action: DeleteAction,
    entity: String,
    toasts: Arc<dyn ToastSink>,
    on_success: Option<OnSuccess>,
}

impl PendingDelete {
    #[must_use]
    pub fn prompt(&self) -> &ConfirmPrompt {
        &self.prompt
    }

    /// Run the delete and report the outcome.
    ///
    /// # Errors
    ///
    /// Returns the delete's error after showing it as an error toast.
    pub async fn accept(self) -> Result<(), ApiError> {
        let group = self.prompt.group;
        match self.action.await {
            Ok(()) => {
                self.toasts
                    .add(success_toast(format!("{} is deleted.", capitalize(&self.entity)), &group));
                if let Some(callback) = self.on_success {
                    callback();
                }
                Ok(())
            }
            Err(err) => {
                self.toasts.add(error_toast(&err, &group));
                Err(err)
            }
        }
    }

    /// Dismiss without deleting.
    pub fn reject(self) {
        tracing::debug!(group = %self.prompt.group, "delete cancelled");
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "confirm_test.rs"]
mod tests;
