//! UI components for the Prompter TUI
//!
//! Reusable rendering components: status bar, script view, toasts.

pub mod script_view;
pub mod status_bar;
pub mod toast;

pub use script_view::render_script;
pub use status_bar::{render_editor_bar, render_status_bar};
pub use toast::{render_toasts, Toast, ToastQueue};
