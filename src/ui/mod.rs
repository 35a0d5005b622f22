//! Headless UX plumbing: toasts, delete confirmation, dialogs, sidebar, menu.

pub mod confirm;
pub mod dialog;
pub mod menu;
pub mod sidebar;
pub mod toast;

pub use confirm::{ConfirmDelete, ConfirmPrompt, PendingDelete};
pub use dialog::Dialog;
pub use menu::{MenuItem, main_menu, visible_menu};
pub use sidebar::Sidebar;
pub use toast::{Severity, Toast, ToastLog, ToastSink, error_toast, success_toast, warn_toast};
