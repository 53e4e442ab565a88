// Example viewer rendering.
// Code/Preview selector and copy control on the card, scrollable pane body in its own panel.

use ratatui::{prelude::*, widgets::*};

use super::markup::render_markup;
use crate::content::{Entry, Example, PreviewKind};
use crate::state::{ExampleViewer, Pane};

fn pane_tab(pane: Pane, active: Pane) -> Span<'static> {
    let label = format!(" {} ", pane.title());
    if pane == active {
        Span::styled(
            label,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(label, Style::default().fg(Color::Cyan))
    }
}

fn copy_control(viewer: &ExampleViewer) -> Span<'static> {
    let (icon, color) = if viewer.copy_feedback_active() {
        ("✓", Color::Green)
    } else if viewer.copy_error().is_some() {
        ("✗", Color::Red)
    } else {
        ("⧉", Color::White)
    };
    Span::styled(
        format!("{} {}", icon, viewer.copy_label()),
        Style::default().fg(color),
    )
}

/// Pane selector and copy control, shown on the expanded card.
pub fn selector_line(viewer: &ExampleViewer) -> Line<'static> {
    let active = viewer.active_pane();
    Line::from(vec![
        Span::styled("  ╰ ", Style::default().fg(Color::DarkGray)),
        pane_tab(Pane::Source, active),
        Span::raw(" "),
        pane_tab(Pane::Preview, active),
        Span::raw("   "),
        copy_control(viewer),
    ])
}

/// Body of the active pane.
pub fn pane_lines(example: &Example, pane: Pane, kind: PreviewKind) -> Vec<Line<'static>> {
    let body: Vec<Line<'static>> = match (pane, kind) {
        (Pane::Source, _) => example
            .source_text
            .lines()
            .map(|line| Line::styled(line.to_string(), Style::default().fg(Color::Gray)))
            .collect(),
        (Pane::Preview, PreviewKind::Markup) => render_markup(&example.preview_markup),
        (Pane::Preview, PreviewKind::Text) => example
            .preview_markup
            .lines()
            .map(|line| Line::raw(line.to_string()))
            .collect(),
    };

    if body.is_empty() {
        return vec![Line::styled(
            "(nothing visible)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )];
    }
    body
}

/// Draw the active pane of an expanded entry, scrolled to the viewer's offset.
pub fn render_viewer(
    frame: &mut Frame,
    area: Rect,
    entry: &Entry,
    viewer: &mut ExampleViewer,
    kind: PreviewKind,
) {
    let lines = pane_lines(&entry.example, viewer.active_pane(), kind);
    let content_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let content_width = lines
        .iter()
        .map(|line| u16::try_from(line.width()).unwrap_or(u16::MAX))
        .max()
        .unwrap_or(0);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(
            " {} · {} ",
            entry.identifier,
            viewer.active_pane().title()
        ))
        .title_top(Line::from(vec![copy_control(viewer), Span::raw(" ")]).right_aligned());

    let inner = block.inner(area);
    viewer.fit_scroll((content_height, content_width), (inner.height, inner.width));
    let (scroll_y, scroll_x) = viewer.scroll();

    if content_height > inner.height || content_width > inner.width {
        let last = scroll_y.saturating_add(inner.height).min(content_height);
        block = block.title_bottom(
            Line::styled(
                format!(" [{}-{}/{}] ", scroll_y + 1, last, content_height),
                Style::default().fg(Color::DarkGray),
            )
            .right_aligned(),
        );
    }
    if let Some(error) = viewer.copy_error() {
        block = block.title_bottom(Line::styled(
            format!(" {} ", error),
            Style::default().fg(Color::Red),
        ));
    }

    let body = Paragraph::new(lines)
        .block(block)
        .scroll((scroll_y, scroll_x));
    frame.render_widget(body, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use std::time::Instant;

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn example() -> Example {
        Example {
            source_text: "<b>bold</b>\n<i>it</i>".to_string(),
            preview_markup: "<b>bold</b> <i>it</i>".to_string(),
        }
    }

    #[test]
    fn test_source_pane_is_verbatim() {
        let lines = pane_lines(&example(), Pane::Source, PreviewKind::Markup);
        assert_eq!(text_of(&lines), vec!["<b>bold</b>", "<i>it</i>"]);
    }

    #[test]
    fn test_markup_preview_is_rendered() {
        let lines = pane_lines(&example(), Pane::Preview, PreviewKind::Markup);
        assert_eq!(text_of(&lines), vec!["bold it"]);
    }

    #[test]
    fn test_text_preview_is_literal() {
        let lines = pane_lines(&example(), Pane::Preview, PreviewKind::Text);
        assert_eq!(text_of(&lines), vec!["<b>bold</b> <i>it</i>"]);
    }

    #[test]
    fn test_empty_preview_placeholder() {
        let example = Example {
            source_text: "<meta charset=\"UTF-8\">".to_string(),
            preview_markup: "<meta charset=\"UTF-8\">".to_string(),
        };
        let lines = pane_lines(&example, Pane::Preview, PreviewKind::Markup);
        assert_eq!(text_of(&lines), vec!["(nothing visible)"]);
    }

    #[test]
    fn test_selector_labels() {
        let mut viewer = ExampleViewer::new();
        let text = text_of(&[selector_line(&viewer)]).remove(0);
        assert!(text.contains(" Code "));
        assert!(text.contains("⧉ Copy"));

        viewer.copy("x", &mut MemoryClipboard::default(), Instant::now());
        let text = text_of(&[selector_line(&viewer)]).remove(0);
        assert!(text.contains("✓ Copied!"));

        viewer.copy("x", &mut MemoryClipboard::failing("no display"), Instant::now());
        let text = text_of(&[selector_line(&viewer)]).remove(0);
        assert!(text.contains("✗ Copy failed"));
    }
}
