// App state and main event loop.
// Routes keyboard and mouse input to the page, and wakes up to clear copy feedback.

use std::time::Instant;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures_util::StreamExt;
use ratatui::layout::Position;
use ratatui::prelude::*;
use tracing::{debug, info};

use crate::clipboard::Clipboard;
use crate::error::Result;
use crate::state::{CopyOutcome, ExampleViewer, PageState, Pane};
use crate::ui::{self, tabs::TabSlot};

/// Rows moved per mouse wheel notch in the example panel.
const MOUSE_SCROLL_ROWS: u16 = 3;

/// Main application state.
pub struct App {
    pub page: PageState,
    /// Whether the help overlay is shown.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    /// Tab positions from the last draw, for mouse hits.
    pub tab_slots: Vec<TabSlot>,
    /// Entries dropped while loading content.
    pub skipped_entries: usize,
    clipboard: Box<dyn Clipboard>,
}

impl App {
    pub fn new(page: PageState, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            page,
            show_help: false,
            should_quit: false,
            tab_slots: Vec::new(),
            skipped_entries: 0,
            clipboard,
        }
    }

    /// Main event loop.
    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        let mut events = EventStream::new();

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let deadline = self.page.next_feedback_deadline();
            tokio::select! {
                event = events.next() => match event {
                    Some(event) => self.handle_event(event?),
                    None => {
                        debug!("input stream closed");
                        self.should_quit = true;
                    }
                },
                _ = feedback_timer(deadline) => {
                    let cleared = self.page.expire_feedback(Instant::now());
                    debug!(cleared, "copy feedback expired");
                }
            }
        }

        info!("exiting");
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.page.next_section(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.page.prev_section(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                self.page.select_tab(index);
            }
            KeyCode::Down | KeyCode::Char('j') => self.page.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.page.select_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.page.toggle_selected();
            }
            KeyCode::Char('s') => {
                self.page.select_pane(Pane::Source);
            }
            KeyCode::Char('p') => {
                self.page.select_pane(Pane::Preview);
            }
            KeyCode::Char('v') => {
                self.page.toggle_pane();
            }
            KeyCode::Char('c') | KeyCode::Char('y') => self.copy_selected(),
            KeyCode::Char('J') => self.scroll_example(|v| v.scroll_down(1)),
            KeyCode::Char('K') => self.scroll_example(|v| v.scroll_up(1)),
            KeyCode::Char('L') => self.scroll_example(ExampleViewer::scroll_right),
            KeyCode::Char('H') => self.scroll_example(ExampleViewer::scroll_left),
            KeyCode::PageDown => self.scroll_example(ExampleViewer::page_down),
            KeyCode::PageUp => self.scroll_example(ExampleViewer::page_up),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_example(ExampleViewer::scroll_to_top),
            KeyCode::End | KeyCode::Char('G') => {
                self.scroll_example(ExampleViewer::scroll_to_bottom)
            }
            _ => {}
        }
    }

    /// Apply a scroll action to the example under the cursor, if it is expanded.
    fn scroll_example(&mut self, action: impl FnOnce(&mut ExampleViewer)) {
        if let Some(viewer) = self.page.selected_viewer_mut() {
            action(viewer);
        }
    }

    fn copy_selected(&mut self) {
        match self
            .page
            .copy_selected(self.clipboard.as_mut(), Instant::now())
        {
            Some(CopyOutcome::Copied) => debug!("copy feedback started"),
            Some(CopyOutcome::Failed(_)) => {}
            None => debug!("copy ignored, no expanded entry under cursor"),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_example(|v| v.scroll_down(MOUSE_SCROLL_ROWS)),
            MouseEventKind::ScrollUp => self.scroll_example(|v| v.scroll_up(MOUSE_SCROLL_ROWS)),
            MouseEventKind::Down(MouseButton::Left) => {
                self.click_tab(Position::new(mouse.column, mouse.row))
            }
            _ => {}
        }
    }

    fn click_tab(&mut self, position: Position) {
        if let Some(slot) = self
            .tab_slots
            .iter()
            .find(|slot| slot.area.contains(position))
        {
            let index = slot.index;
            self.page.select_tab(index);
        }
    }
}

/// Resolves at `deadline`, or never when there is nothing to clear.
async fn feedback_timer(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::content::loader::builtin_table;
    use crate::content::{EntryKey, Page, SectionKey};

    fn html_app() -> App {
        let table = builtin_table(Page::Html).unwrap().table;
        App::new(
            PageState::new(Page::Html, table),
            Box::new(MemoryClipboard::default()),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn first_entry() -> EntryKey {
        EntryKey::new(SectionKey::from("basic"), 0)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = html_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = html_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_section_keys() {
        let mut app = html_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.page.selected_section().as_str(), "text");
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.page.selected_section().as_str(), "accessibility");
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.page.selected_section().as_str(), "links");
    }

    #[test]
    fn test_expand_pane_and_copy() {
        let mut app = html_app();
        press(&mut app, KeyCode::Enter);
        assert!(app.page.is_expanded(&first_entry()));

        press(&mut app, KeyCode::Char('p'));
        let viewer = app.page.viewer(&first_entry()).unwrap();
        assert_eq!(viewer.active_pane(), Pane::Preview);

        press(&mut app, KeyCode::Char('c'));
        assert!(app.page.viewer(&first_entry()).unwrap().copy_feedback_active());
        assert!(app.page.next_feedback_deadline().is_some());

        press(&mut app, KeyCode::Char(' '));
        assert!(!app.page.is_expanded(&first_entry()));
        assert_eq!(app.page.next_feedback_deadline(), None);
    }

    #[test]
    fn test_failed_copy_shows_error() {
        let table = builtin_table(Page::Html).unwrap().table;
        let mut app = App::new(
            PageState::new(Page::Html, table),
            Box::new(MemoryClipboard::failing("no display")),
        );
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('y'));
        let viewer = app.page.viewer(&first_entry()).unwrap();
        assert!(!viewer.copy_feedback_active());
        assert!(viewer.copy_error().unwrap().contains("no display"));
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = html_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.page.selected_section().as_str(), "basic");
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_click_selects_tab() {
        let mut app = html_app();
        app.tab_slots = vec![
            TabSlot {
                index: 0,
                area: Rect::new(0, 4, 10, 1),
            },
            TabSlot {
                index: 2,
                area: Rect::new(11, 4, 7, 1),
            },
        ];
        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        app.handle_mouse(click(12, 4));
        assert_eq!(app.page.selected_section().as_str(), "links");

        // Misses leave the selection alone.
        app.handle_mouse(click(30, 4));
        assert_eq!(app.page.selected_section().as_str(), "links");
    }

    #[test]
    fn test_scroll_keys_move_expanded_example() {
        let mut app = html_app();
        // Nothing to scroll while collapsed.
        press(&mut app, KeyCode::Char('J'));
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('J'));
        press(&mut app, KeyCode::Char('J'));
        press(&mut app, KeyCode::Char('L'));
        let viewer = app.page.viewer(&first_entry()).unwrap();
        assert_eq!(viewer.scroll(), (2, 4));

        press(&mut app, KeyCode::Char('K'));
        press(&mut app, KeyCode::Char('H'));
        press(&mut app, KeyCode::Home);
        assert_eq!(app.page.viewer(&first_entry()).unwrap().scroll(), (0, 0));

        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(wheel);
        assert_eq!(
            app.page.viewer(&first_entry()).unwrap().scroll(),
            (MOUSE_SCROLL_ROWS, 0)
        );
    }

    #[tokio::test]
    async fn test_feedback_timer() {
        // A passed deadline resolves immediately.
        feedback_timer(Some(Instant::now())).await;

        // No deadline never resolves.
        let idle = tokio::time::timeout(Duration::from_millis(20), feedback_timer(None)).await;
        assert!(idle.is_err());
    }
}
