//! Terminal User Interface for Prompter

pub mod app;
pub mod components;
pub mod handlers;
pub mod input;
pub mod state;
pub mod themes;
pub mod utils;

// Re-exports
pub use app::App;
