// Preview markup rendering.
// Turns trusted HTML fragments into styled terminal lines.
//
// The markup comes from developer-authored content only. It is rendered as
// live markup and is never sanitized, so user input must never reach it.

use std::borrow::Cow;

use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::reader::Reader;
use ratatui::prelude::*;
use tracing::debug;

fn is_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Resolve character and HTML entity references. Unknown references are
/// kept as written.
fn decode_text(raw: &str) -> String {
    unescape_with(raw, resolve_html5_entity).map_or_else(|_| raw.to_string(), Cow::into_owned)
}

fn tag_name(name: QName) -> String {
    String::from_utf8_lossy(name.as_ref()).to_ascii_lowercase()
}

/// Attributes in HTML form: bare names are allowed and values may be unquoted.
fn element_attrs(start: &BytesStart) -> Vec<(String, String)> {
    start
        .html_attributes()
        .flatten()
        .map(|attr| {
            let name = tag_name(attr.key);
            let value = decode_text(&String::from_utf8_lossy(&attr.value));
            (name, value)
        })
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

fn markup_reader(markup: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.allow_dangling_amp = true;
    reader
}

fn is_void(name: &str) -> bool {
    matches!(
        name,
        "br" | "hr" | "img" | "input" | "meta" | "link" | "source" | "wbr" | "col" | "area"
    )
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "ul"
            | "ol"
            | "li"
            | "dl"
            | "dt"
            | "dd"
            | "header"
            | "nav"
            | "article"
            | "section"
            | "footer"
            | "main"
            | "aside"
            | "address"
            | "pre"
            | "form"
            | "blockquote"
            | "figure"
            | "figcaption"
            | "table"
            | "tr"
            | "dialog"
            | "details"
            | "summary"
            | "fieldset"
    )
}

/// Elements whose content is not displayed.
fn hides_content(name: &str) -> bool {
    matches!(
        name,
        "script" | "style" | "template" | "head" | "title" | "textarea" | "video" | "audio"
    )
}

fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
}

/// Text color from an inline `style="color: ..."` declaration.
fn inline_color(attrs: &[(String, String)]) -> Option<Color> {
    attr(attrs, "style")?
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .find(|(prop, _)| prop.trim().eq_ignore_ascii_case("color"))
        .and_then(|(_, value)| value.trim().parse::<Color>().ok())
}

fn element_style(name: &str, attrs: &[(String, String)]) -> Style {
    let style = match name {
        "h1" => Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        "h2" | "h3" | "h4" | "h5" | "h6" | "strong" | "b" | "dt" | "th" | "button" => {
            Style::default().add_modifier(Modifier::BOLD)
        }
        "em" | "i" | "cite" | "address" | "var" => Style::default().add_modifier(Modifier::ITALIC),
        "a" => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED),
        "u" | "ins" => Style::default().add_modifier(Modifier::UNDERLINED),
        "s" | "del" | "strike" => Style::default().add_modifier(Modifier::CROSSED_OUT),
        "small" => Style::default().add_modifier(Modifier::DIM),
        "code" | "kbd" | "samp" => Style::default().fg(Color::Yellow),
        "mark" => Style::default().bg(Color::Yellow).fg(Color::Black),
        _ => Style::default(),
    };
    match inline_color(attrs) {
        Some(color) => style.fg(color),
        None => style,
    }
}

#[derive(Debug, Clone, Copy)]
enum ListKind {
    Unordered,
    Ordered(usize),
}

#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    line_has_text: bool,
    pending_space: bool,
    /// Open elements with the style each one contributes.
    open: Vec<(String, Style)>,
    lists: Vec<ListKind>,
    pre_depth: usize,
    /// Element whose content is being skipped.
    hidden: Option<String>,
    /// Options seen in the current `<select>`.
    select_options: Option<usize>,
}

impl Renderer {
    fn style(&self) -> Style {
        self.open
            .iter()
            .fold(Style::default(), |acc, (_, style)| acc.patch(*style))
    }

    fn indent(&self) -> usize {
        let dd = self.open.iter().filter(|(name, _)| name == "dd").count();
        self.lists.len().saturating_sub(1) * 2 + dd * 4
    }

    fn ends_with_space(&self) -> bool {
        self.current
            .last()
            .is_some_and(|span| span.content.ends_with(char::is_whitespace))
    }

    fn start_line(&mut self) {
        if self.current.is_empty() {
            let indent = self.indent();
            if indent > 0 {
                self.current.push(Span::raw(" ".repeat(indent)));
            }
        }
    }

    fn emit(&mut self, text: String, style: Style) {
        self.start_line();
        if self.pending_space
            && self.line_has_text
            && !self.ends_with_space()
            && !text.starts_with(' ')
        {
            self.current.push(Span::styled(" ", style));
        }
        self.current.push(Span::styled(text, style));
        self.line_has_text = true;
        self.pending_space = false;
    }

    fn atom(&mut self, text: impl Into<String>) {
        let style = self.style();
        self.emit(text.into(), style);
    }

    fn flush(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
        self.line_has_text = false;
        self.pending_space = false;
    }

    fn block_break(&mut self) {
        if self.line_has_text {
            self.flush();
        } else {
            self.current.clear();
        }
        self.pending_space = false;
    }

    fn text(&mut self, decoded: &str) {
        if self.hidden.is_some() {
            return;
        }
        let style = self.style();

        if self.pre_depth > 0 {
            for (i, part) in decoded.split('\n').enumerate() {
                if i > 0 {
                    self.flush();
                }
                if !part.is_empty() {
                    self.start_line();
                    self.current.push(Span::styled(part.to_string(), style));
                    self.line_has_text = true;
                }
            }
            return;
        }

        if decoded.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        let words: Vec<&str> = decoded.split_whitespace().collect();
        if words.is_empty() {
            return;
        }
        self.emit(words.join(" "), style);
        self.pending_space = decoded.ends_with(char::is_whitespace);
    }

    fn open_tag(&mut self, name: &str, attrs: &[(String, String)], self_closing: bool) {
        if self.hidden.is_some() {
            return;
        }

        match name {
            "br" => self.flush(),
            "hr" => {
                self.block_break();
                self.atom("────────");
                self.flush();
            }
            "img" => {
                let alt = attr(attrs, "alt").unwrap_or("image");
                self.atom(format!("[image: {}]", alt));
            }
            "input" => match attr(attrs, "type").unwrap_or("text") {
                "hidden" => {}
                "checkbox" => self.atom("☐"),
                "radio" => self.atom("○"),
                "submit" | "button" | "reset" => {
                    let label = attr(attrs, "value").unwrap_or("Submit");
                    self.atom(format!("[ {} ]", label));
                }
                _ => {
                    let hint = attr(attrs, "placeholder")
                        .or_else(|| attr(attrs, "value"))
                        .unwrap_or("");
                    self.atom(format!("[ {:<16} ]", hint));
                }
            },
            "textarea" => {
                let hint = attr(attrs, "placeholder").unwrap_or("");
                self.block_break();
                self.atom(format!("[ {:<24} ]", hint));
                self.block_break();
            }
            "video" | "audio" => self.atom(format!("[▶ {}]", name)),
            _ => {}
        }

        if is_void(name) {
            return;
        }
        if hides_content(name) {
            if !self_closing {
                self.hidden = Some(name.to_string());
            }
            return;
        }
        if self_closing {
            return;
        }

        if is_block(name) {
            self.block_break();
        }
        match name {
            "ul" => self.lists.push(ListKind::Unordered),
            "ol" => self.lists.push(ListKind::Ordered(0)),
            "pre" => self.pre_depth += 1,
            "select" => {
                self.atom("[ ");
                self.select_options = Some(0);
            }
            "option" => {
                if let Some(seen) = self.select_options {
                    if seen > 0 {
                        self.atom(" | ");
                    }
                    self.select_options = Some(seen + 1);
                }
            }
            "button" => self.atom("[ "),
            _ => {}
        }

        self.open.push((name.to_string(), element_style(name, attrs)));

        if name == "li" {
            let marker = match self.lists.last_mut() {
                Some(ListKind::Ordered(n)) => {
                    *n += 1;
                    format!("{}. ", n)
                }
                _ => "• ".to_string(),
            };
            self.start_line();
            self.current.push(Span::raw(marker));
            self.line_has_text = true;
        }
    }

    fn close_tag(&mut self, name: &str) {
        if let Some(hidden) = &self.hidden {
            if hidden == name {
                self.hidden = None;
            }
            return;
        }

        // Stray closing tags are ignored; unclosed children are closed implicitly.
        let Some(pos) = self.open.iter().rposition(|(open, _)| open == name) else {
            return;
        };
        let closed: Vec<String> = self.open.drain(pos..).map(|(open, _)| open).collect();
        for open in closed.iter().rev() {
            self.after_close(open);
        }
    }

    fn after_close(&mut self, name: &str) {
        match name {
            "ul" | "ol" => {
                self.lists.pop();
            }
            "pre" => self.pre_depth = self.pre_depth.saturating_sub(1),
            "select" => {
                self.atom(" ▾ ]");
                self.select_options = None;
            }
            "button" => self.atom(" ]"),
            _ => {}
        }
        if is_block(name) {
            self.block_break();
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        if self.line_has_text {
            self.flush();
        }
        while self.lines.last().is_some_and(|line| line.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Render trusted preview markup as styled lines.
///
/// Never fails: unknown tags contribute only their content, tags with
/// invalid names are shown as text, and anything after a syntax error is
/// shown as text. Markup with no visible content yields no lines.
pub fn render_markup(markup: &str) -> Vec<Line<'static>> {
    let mut renderer = Renderer::default();
    let mut reader = markup_reader(markup);

    loop {
        let position = usize::try_from(reader.buffer_position()).unwrap_or(markup.len());
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = tag_name(start.name());
                if is_tag_name(&name) {
                    renderer.open_tag(&name, &element_attrs(&start), false);
                } else {
                    renderer.text(&format!("<{}>", String::from_utf8_lossy(&start)));
                }
            }
            Ok(Event::Empty(start)) => {
                let name = tag_name(start.name());
                if is_tag_name(&name) {
                    renderer.open_tag(&name, &element_attrs(&start), true);
                } else {
                    renderer.text(&format!("<{}/>", String::from_utf8_lossy(&start)));
                }
            }
            Ok(Event::End(end)) => renderer.close_tag(&tag_name(end.name())),
            Ok(Event::Text(text)) => renderer.text(&decode_text(&String::from_utf8_lossy(&text))),
            Ok(Event::CData(data)) => renderer.text(&String::from_utf8_lossy(&data)),
            Ok(Event::GeneralRef(reference)) => {
                let written = format!("&{};", String::from_utf8_lossy(&reference));
                renderer.text(&decode_text(&written));
            }
            Ok(Event::Eof) => break,
            // Doctype, comments and processing instructions render nothing.
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, position, "markup syntax error, rest shown as text");
                renderer.text(markup.get(position..).unwrap_or(""));
                break;
            }
        }
    }

    renderer.finish()
}
