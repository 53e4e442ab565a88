// State management module.
// Page-level selection state and per-entry example viewers.

pub mod page;
pub mod viewer;

pub use page::PageState;
pub use viewer::{CopyOutcome, ExampleViewer, Pane};
