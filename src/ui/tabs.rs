// Section tab bar.
// Flows section titles across as many rows as needed and records where each tab landed.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;

/// Space between adjacent tabs.
const TAB_GAP: u16 = 1;

/// Where a section tab was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSlot {
    /// Tab position in the content table.
    pub index: usize,
    pub area: Rect,
}

fn tab_width(title: &str) -> u16 {
    // One column of padding on each side.
    u16::try_from(Span::raw(title).width())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
}

/// Lay tabs out left to right, wrapping to a new row when a tab would overflow.
pub fn layout_tabs(titles: &[&str], area: Rect) -> Vec<TabSlot> {
    let mut slots = Vec::with_capacity(titles.len());
    if area.width == 0 || area.height == 0 {
        return slots;
    }

    let mut x = area.x;
    let mut y = area.y;
    for (index, title) in titles.iter().enumerate() {
        let width = tab_width(title).min(area.width);
        if x > area.x && x.saturating_add(width) > area.right() {
            x = area.x;
            y += 1;
        }
        if y >= area.bottom() {
            break;
        }
        slots.push(TabSlot {
            index,
            area: Rect::new(x, y, width, 1),
        });
        x = x.saturating_add(width + TAB_GAP);
    }
    slots
}

/// Number of rows the tabs need at the given width.
pub fn tab_rows(titles: &[&str], width: u16) -> u16 {
    // At most one row per tab.
    let max_rows = u16::try_from(titles.len()).unwrap_or(u16::MAX).max(1);
    let area = Rect::new(0, 0, width, max_rows);
    layout_tabs(titles, area)
        .last()
        .map_or(1, |slot| slot.area.y + 1)
}

/// Draw the section tabs and remember their positions for mouse hits.
pub fn draw_tabs(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let table = app.page.table();
    let titles: Vec<&str> = table.iter().map(|(_, s)| s.title.as_str()).collect();
    let selected = app.page.selected_tab();
    let slots = layout_tabs(&titles, inner);

    for slot in &slots {
        let style = if slot.index == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let label = Paragraph::new(format!(" {} ", titles[slot.index])).style(style);
        frame.render_widget(label, slot.area);
    }

    app.tab_slots = slots;
}
