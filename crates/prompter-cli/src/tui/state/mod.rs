//! App State Components
//!
//! Layout caches shared by rendering and hit testing.

mod layout;
mod word_layout;

pub use layout::LayoutState;
pub use word_layout::{line_gap, WordLayout};
