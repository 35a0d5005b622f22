//! Dialog visibility with an on-close hook.

use std::sync::Arc;

type OnClose = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub struct Dialog {
    visible: bool,
    on_close: Option<OnClose>,
}

impl Dialog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` every time the dialog closes.
    #[must_use]
    pub fn with_on_close(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self { visible: false, on_close: Some(Arc::new(callback)) }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        if let Some(callback) = &self.on_close {
            callback();
        }
    }

    /// Open if hidden, close (running the hook) if shown.
    pub fn toggle(&mut self) {
        if self.visible { self.close() } else { self.open() }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn close_runs_hook_and_toggle_alternates() {
        let closes = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&closes);
        let mut dialog = Dialog::with_on_close(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!dialog.is_visible());
        dialog.toggle();
        assert!(dialog.is_visible());
        assert_eq!(closes.load(Ordering::SeqCst), 0);
        dialog.toggle();
        assert!(!dialog.is_visible());
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn plain_dialog_opens_and_closes() {
        let mut dialog = Dialog::new();
        dialog.open();
        dialog.close();
        assert!(!dialog.is_visible());
    }
}
