// Entry card list.
// One card per entry of the active section, with the example viewer inlined when expanded.

use ratatui::{prelude::*, widgets::*};

use super::viewer::{render_viewer, selector_line};
use crate::content::{Entry, EntryKey};
use crate::state::{ExampleViewer, PageState};

/// Render an empty state message.
fn render_empty(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(text, area);
}

/// Lines of one entry card. The example body is drawn in the viewer panel.
pub fn card_lines(entry: &Entry, viewer: Option<&ExampleViewer>) -> Vec<Line<'static>> {
    let toggle = if viewer.is_some() {
        "▾ Hide Example"
    } else {
        "▸ Show Example"
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", entry.identifier),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(toggle, Style::default().fg(Color::Yellow)),
        ]),
        Line::styled(
            format!("  {}", entry.description),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];

    if !entry.values.is_empty() {
        let mut chips = vec![Span::raw("  ")];
        for value in &entry.values {
            chips.push(Span::styled(
                format!("[{}]", value),
                Style::default().fg(Color::Magenta),
            ));
            chips.push(Span::raw(" "));
        }
        lines.push(Line::from(chips));
    }

    lines.push(Line::from(vec![
        Span::styled("  ▶ ", Style::default().fg(Color::DarkGray)),
        Span::styled(entry.syntax.clone(), Style::default().fg(Color::Green)),
    ]));

    if let Some(viewer) = viewer {
        lines.push(selector_line(viewer));
    }

    // Separator between cards.
    lines.push(Line::default());
    lines
}

/// Render the cards of the active section. When the entry under the cursor
/// is expanded, its example gets a scrollable panel below the cards.
pub fn render_entries(frame: &mut Frame, page: &mut PageState, area: Rect) {
    let focused = page
        .selected_key()
        .is_some_and(|key| page.is_expanded(&key));
    let (list_area, viewer_area) = if focused {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Percentage(60)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    render_cards(frame, page, list_area);

    let kind = page.page().preview_kind();
    if let (Some(viewer_area), Some((entry, viewer))) = (viewer_area, page.selected_example_mut()) {
        render_viewer(frame, viewer_area, entry, viewer, kind);
    }
}

fn render_cards(frame: &mut Frame, page: &mut PageState, area: Rect) {
    let Some(section) = page.active_section() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", section.title));

    if section.items.is_empty() {
        render_empty(frame, area, block, "No entries in this section");
        return;
    }

    let section_key = page.selected_section().clone();
    let items: Vec<ListItem<'static>> = section
        .items
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let key = EntryKey::new(section_key.clone(), index);
            ListItem::new(card_lines(entry, page.viewer(&key)))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut page.list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Example;

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn entry(values: &[&str]) -> Entry {
        Entry {
            identifier: "display".to_string(),
            description: "Sets how an element is displayed".to_string(),
            syntax: "display: value;".to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
            example: Example {
                source_text: ".box { display: flex; }".to_string(),
                preview_markup: "Flex container".to_string(),
            },
        }
    }

    #[test]
    fn test_collapsed_card() {
        let lines = card_lines(&entry(&[]), None);
        let text = text_of(&lines);
        assert_eq!(text[0], " display   ▸ Show Example");
        assert_eq!(text[1], "  Sets how an element is displayed");
        assert_eq!(text[2], "  ▶ display: value;");
        assert_eq!(text.len(), 4);
    }

    #[test]
    fn test_value_chips() {
        let lines = card_lines(&entry(&["block", "flex"]), None);
        assert_eq!(text_of(&lines)[2], "  [block] [flex] ");
    }

    #[test]
    fn test_expanded_card_includes_viewer() {
        let viewer = ExampleViewer::new();
        let lines = card_lines(&entry(&[]), Some(&viewer));
        let text = text_of(&lines);
        assert!(text[0].ends_with("▾ Hide Example"));
        assert!(text[3].contains(" Code "));
        assert!(text[3].contains(" Preview "));
        assert_eq!(text.len(), 5);
    }
}
