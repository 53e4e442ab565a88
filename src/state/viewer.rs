// Example viewer state.
// Source/Preview pane toggle and the timed "copied" feedback for one expanded entry.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::clipboard::Clipboard;

/// How long the "Copied!" feedback stays visible after the last copy.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

/// Columns moved per horizontal scroll step.
const SCROLL_X_STEP: u16 = 4;

/// Page height used before the viewer has been drawn.
const DEFAULT_PAGE_HEIGHT: u16 = 10;

/// Pane shown inside an example viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Source,
    Preview,
}

impl Pane {
    pub fn title(&self) -> &'static str {
        match self {
            Pane::Source => "Code",
            Pane::Preview => "Preview",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Pane::Source => Pane::Preview,
            Pane::Preview => Pane::Source,
        }
    }
}

/// Result of a copy request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed(String),
}

/// State of one mounted example viewer.
///
/// A viewer is created fresh each time its entry is expanded and dropped on
/// collapse, which also discards any pending feedback deadline.
#[derive(Debug, Clone, Default)]
pub struct ExampleViewer {
    active_pane: Pane,
    /// When the copy feedback clears. `Some` means feedback is showing.
    feedback_deadline: Option<Instant>,
    /// Message from the last failed copy, shown until the next copy or pane change.
    copy_error: Option<String>,
    /// Pane scroll offset as (rows, columns).
    scroll: (u16, u16),
    /// Body height from the last draw, for paging.
    page_height: Option<u16>,
}

impl ExampleViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_pane(&self) -> Pane {
        self.active_pane
    }

    /// Show a pane. Switching to the other pane starts it scrolled to the top.
    pub fn select_pane(&mut self, pane: Pane) {
        if pane != self.active_pane {
            self.scroll = (0, 0);
        }
        self.active_pane = pane;
        self.copy_error = None;
    }

    pub fn toggle_pane(&mut self) {
        self.select_pane(self.active_pane.toggled());
    }

    pub fn copy_feedback_active(&self) -> bool {
        self.feedback_deadline.is_some()
    }

    pub fn copy_error(&self) -> Option<&str> {
        self.copy_error.as_deref()
    }

    /// Deadline of the pending feedback reset, if any.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.feedback_deadline
    }

    /// Copy `text` to the clipboard.
    ///
    /// On success the feedback deadline restarts from `now`, replacing any
    /// pending one. On failure feedback is left unset.
    pub fn copy(&mut self, text: &str, clipboard: &mut dyn Clipboard, now: Instant) -> CopyOutcome {
        match clipboard.set_text(text) {
            Ok(()) => {
                self.feedback_deadline = Some(now + COPY_FEEDBACK_DURATION);
                self.copy_error = None;
                debug!(bytes = text.len(), "copied example to clipboard");
                CopyOutcome::Copied
            }
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                self.feedback_deadline = None;
                let message = e.to_string();
                self.copy_error = Some(message.clone());
                CopyOutcome::Failed(message)
            }
        }
    }

    /// Clear the copy feedback once its deadline has passed.
    /// Returns true if this call performed the reset.
    pub fn expire_feedback(&mut self, now: Instant) -> bool {
        match self.feedback_deadline {
            Some(deadline) if now >= deadline => {
                self.feedback_deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn scroll(&self) -> (u16, u16) {
        self.scroll
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.scroll.0 = self.scroll.0.saturating_add(rows);
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.scroll.0 = self.scroll.0.saturating_sub(rows);
    }

    pub fn scroll_right(&mut self) {
        self.scroll.1 = self.scroll.1.saturating_add(SCROLL_X_STEP);
    }

    pub fn scroll_left(&mut self) {
        self.scroll.1 = self.scroll.1.saturating_sub(SCROLL_X_STEP);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_height.unwrap_or(DEFAULT_PAGE_HEIGHT).max(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page_height.unwrap_or(DEFAULT_PAGE_HEIGHT).max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll.0 = 0;
    }

    /// Scroll so the last row is visible. Takes effect at the next draw.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll.0 = u16::MAX;
    }

    /// Clamp the offset to the pane content and remember the body size.
    /// Called on every draw, so scroll keys never need to know the content.
    pub fn fit_scroll(&mut self, content: (u16, u16), viewport: (u16, u16)) {
        let max_y = content.0.saturating_sub(viewport.0);
        let max_x = content.1.saturating_sub(viewport.1);
        self.scroll = (self.scroll.0.min(max_y), self.scroll.1.min(max_x));
        self.page_height = Some(viewport.0);
    }

    /// Label for the copy control.
    pub fn copy_label(&self) -> &'static str {
        if self.copy_feedback_active() {
            "Copied!"
        } else if self.copy_error.is_some() {
            "Copy failed"
        } else {
            "Copy"
        }
    }
}
