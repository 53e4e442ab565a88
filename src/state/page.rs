// Page state management.
// Selected section, expanded entries with their viewers, and the entry cursor.

use std::collections::BTreeMap;
use std::time::Instant;

use ratatui::widgets::ListState;
use tracing::debug;

use super::viewer::{CopyOutcome, ExampleViewer, Pane};
use crate::clipboard::Clipboard;
use crate::content::{ContentTable, Entry, EntryKey, Page, Section, SectionKey};

/// Complete state for one cheatsheet page.
#[derive(Debug)]
pub struct PageState {
    page: Page,
    table: ContentTable,
    /// Always a key of `table`.
    selected: SectionKey,
    /// Expanded entries. Presence means the viewer is mounted.
    expanded: BTreeMap<EntryKey, ExampleViewer>,
    /// Highlighted entry in the active section.
    pub list_state: ListState,
}

impl PageState {
    /// Create the page showing its default section with nothing expanded.
    pub fn new(page: Page, table: ContentTable) -> Self {
        let default_key = page.default_section();
        let selected = if table.contains(&default_key) {
            default_key
        } else {
            table.first_key().clone()
        };

        let mut state = Self {
            page,
            table,
            selected,
            expanded: BTreeMap::new(),
            list_state: ListState::default(),
        };
        state.reset_cursor();
        state
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn table(&self) -> &ContentTable {
        &self.table
    }

    pub fn selected_section(&self) -> &SectionKey {
        &self.selected
    }

    /// Tab index of the selected section.
    pub fn selected_tab(&self) -> usize {
        self.table.position(&self.selected).unwrap_or(0)
    }

    pub fn active_section(&self) -> Option<&Section> {
        self.table.get(&self.selected)
    }

    /// Entries of the selected section, in content order.
    pub fn visible_entries(&self) -> &[Entry] {
        self.active_section()
            .map(|section| section.items.as_slice())
            .unwrap_or(&[])
    }

    /// Switch to another section. Unknown keys are refused.
    pub fn select_section(&mut self, key: &SectionKey) -> bool {
        if !self.table.contains(key) {
            debug!(section = %key, "ignoring unknown section");
            return false;
        }
        if *key != self.selected {
            self.selected = key.clone();
            self.reset_cursor();
        }
        true
    }

    /// Select the section at a tab index.
    pub fn select_tab(&mut self, index: usize) -> bool {
        match self.table.key_at(index).cloned() {
            Some(key) => self.select_section(&key),
            None => false,
        }
    }

    pub fn next_section(&mut self) {
        let next = (self.selected_tab() + 1) % self.table.len();
        self.select_tab(next);
    }

    pub fn prev_section(&mut self) {
        let len = self.table.len();
        let prev = (self.selected_tab() + len - 1) % len;
        self.select_tab(prev);
    }

    pub fn is_expanded(&self, key: &EntryKey) -> bool {
        self.expanded.contains_key(key)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    pub fn viewer(&self, key: &EntryKey) -> Option<&ExampleViewer> {
        self.expanded.get(key)
    }

    /// Flip whether an entry's example is shown.
    ///
    /// Expanding mounts a fresh viewer; collapsing drops it along with any
    /// pending feedback. Returns the new expanded state, or `None` if the
    /// key does not name an existing entry.
    pub fn toggle_example(&mut self, key: EntryKey) -> Option<bool> {
        self.table.entry(&key)?;
        if self.expanded.remove(&key).is_some() {
            debug!(section = %key.section, index = key.index, "collapsed example");
            Some(false)
        } else {
            debug!(section = %key.section, index = key.index, "expanded example");
            self.expanded.insert(key, ExampleViewer::new());
            Some(true)
        }
    }

    /// Key of the entry under the cursor.
    pub fn selected_key(&self) -> Option<EntryKey> {
        let index = self.list_state.selected()?;
        (index < self.visible_entries().len()).then(|| EntryKey::new(self.selected.clone(), index))
    }

    pub fn toggle_selected(&mut self) -> Option<bool> {
        let key = self.selected_key()?;
        self.toggle_example(key)
    }

    /// Move the cursor down, stopping at the last entry.
    pub fn select_next(&mut self) {
        let len = self.visible_entries().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Move the cursor up, stopping at the first entry.
    pub fn select_prev(&mut self) {
        if self.visible_entries().is_empty() {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    fn reset_cursor(&mut self) {
        let first = (!self.visible_entries().is_empty()).then_some(0);
        self.list_state = ListState::default();
        self.list_state.select(first);
    }

    /// Viewer of the entry under the cursor, if it is expanded.
    pub fn selected_viewer_mut(&mut self) -> Option<&mut ExampleViewer> {
        let key = self.selected_key()?;
        self.expanded.get_mut(&key)
    }

    /// Entry under the cursor together with its viewer, if it is expanded.
    pub fn selected_example_mut(&mut self) -> Option<(&Entry, &mut ExampleViewer)> {
        let key = self.selected_key()?;
        let entry = self.table.entry(&key)?;
        let viewer = self.expanded.get_mut(&key)?;
        Some((entry, viewer))
    }

    pub fn select_pane(&mut self, pane: Pane) -> bool {
        match self.selected_viewer_mut() {
            Some(viewer) => {
                viewer.select_pane(pane);
                true
            }
            None => false,
        }
    }

    pub fn toggle_pane(&mut self) -> bool {
        match self.selected_viewer_mut() {
            Some(viewer) => {
                viewer.toggle_pane();
                true
            }
            None => false,
        }
    }

    /// Copy the example source of the entry under the cursor.
    /// Does nothing unless that entry is expanded.
    pub fn copy_selected(
        &mut self,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> Option<CopyOutcome> {
        let key = self.selected_key()?;
        let entry = self.table.entry(&key)?;
        let viewer = self.expanded.get_mut(&key)?;
        Some(viewer.copy(&entry.example.source_text, clipboard, now))
    }

    /// Earliest pending copy-feedback deadline across mounted viewers.
    pub fn next_feedback_deadline(&self) -> Option<Instant> {
        self.expanded
            .values()
            .filter_map(ExampleViewer::pending_deadline)
            .min()
    }

    /// Clear every copy feedback whose deadline has passed.
    /// Returns how many viewers were reset.
    pub fn expire_feedback(&mut self, now: Instant) -> usize {
        self.expanded
            .values_mut()
            .map(|viewer| viewer.expire_feedback(now))
            .filter(|&reset| reset)
            .count()
    }
}
