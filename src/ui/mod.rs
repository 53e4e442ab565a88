// UI module for rendering the TUI.
// Header, section tabs, entry cards, footer and the help overlay.

mod cards;
mod markup;
pub mod tabs;
mod viewer;

use ratatui::{prelude::*, widgets::*};

use crate::app::App;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let titles: Vec<String> = app
        .page
        .table()
        .iter()
        .map(|(_, section)| section.title.clone())
        .collect();
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    // Tab rows plus the bottom border.
    let tabs_height = tabs::tab_rows(&titles, area.width) + 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Header
            Constraint::Length(tabs_height), // Section tabs
            Constraint::Min(1),              // Entry cards
            Constraint::Length(1),           // Footer
            Constraint::Length(1),           // Status bar
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);
    tabs::draw_tabs(frame, app, chunks[1]);
    cards::render_entries(frame, &mut app.page, chunks[2]);
    draw_footer(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let page = app.page.page();
    let header = Paragraph::new(vec![
        Line::styled(
            page.heading(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(page.subtitle(), Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer = Paragraph::new(app.page.page().footer())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

/// Draw the status bar with keybinding hints and load warnings.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = vec![
        Span::raw(" ↑↓ "),
        Span::styled("Entry", Style::default().fg(Color::DarkGray)),
        Span::raw("  ←→ "),
        Span::styled("Section", Style::default().fg(Color::DarkGray)),
        Span::raw("  ↵ "),
        Span::styled("Example", Style::default().fg(Color::DarkGray)),
        Span::raw("  v "),
        Span::styled("Code/Preview", Style::default().fg(Color::DarkGray)),
        Span::raw("  c "),
        Span::styled("Copy", Style::default().fg(Color::DarkGray)),
        Span::raw("  ? "),
        Span::styled("Help", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ];

    let open = app.page.expanded_count();
    if open > 0 {
        hints.push(Span::styled(
            format!("  {} open", open),
            Style::default().fg(Color::Cyan),
        ));
    }

    if app.skipped_entries > 0 {
        let noun = if app.skipped_entries == 1 {
            "entry"
        } else {
            "entries"
        };
        hints.push(Span::styled(
            format!("  ⚠ {} {} skipped", app.skipped_entries, noun),
            Style::default().fg(Color::Yellow),
        ));
    }

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

fn help_line(keys: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", keys), Style::default().fg(Color::Cyan)),
        Span::raw(action.to_string()),
    ])
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 50.min(area.width);
    let popup_height = 21.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        help_line("↑/↓ or j/k", "Move between entries"),
        help_line("←/→ or h/l", "Previous/next section"),
        help_line("Tab/S-Tab", "Next/previous section"),
        help_line("1-9", "Jump to section"),
        help_line("Enter/Space", "Show/hide example"),
        help_line("s / p", "Code / Preview pane"),
        help_line("v", "Toggle Code/Preview"),
        help_line("c or y", "Copy example code"),
        help_line("J/K H/L", "Scroll example"),
        help_line("PgUp/PgDn", "Page through example"),
        help_line("Home/End g/G", "Example start/end"),
        help_line("Click", "Select section tab"),
        help_line("?", "Show/hide this help"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
