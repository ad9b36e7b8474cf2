//! Text input widgets

mod script_editor;

pub use script_editor::{EditorAction, ScriptEditor};
