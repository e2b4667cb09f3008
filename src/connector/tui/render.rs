use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::application::session::{ResultsView, SessionView, SourceLink};

use super::markdown::render_markdown;
use super::theme::Theme;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
/// Upper bound on the sources panel so the answer keeps most of the screen.
const MAX_SOURCES_HEIGHT: u16 = 12;

/// Per-frame presentation state that lives outside the session.
pub struct FrameContext<'a> {
    pub model: &'a str,
    pub scroll: u16,
    pub tick: usize,
}

/// Draws one frame and returns the furthest the answer can be scrolled, in
/// wrapped rows (0 when no answer is shown).
pub fn draw(frame: &mut Frame, view: &SessionView, ctx: &FrameContext<'_>) -> u16 {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Length(3), // Query input
        Constraint::Min(3),    // Results
        Constraint::Length(1), // Key hints
    ])
    .split(frame.area());

    render_title(frame, ctx, chunks[0]);
    render_input(frame, view, chunks[1]);

    let max_scroll = match &view.results {
        ResultsView::Prompt => {
            render_prompt(frame, chunks[2]);
            0
        }
        ResultsView::Loading => {
            render_loading(frame, ctx.tick, chunks[2]);
            0
        }
        ResultsView::Answer { text, sources } => {
            render_answer(frame, text, sources, ctx.scroll, chunks[2])
        }
        ResultsView::Error(message) => {
            render_error(frame, message, chunks[2]);
            0
        }
    };

    render_hints(frame, view, chunks[3]);
    max_scroll
}

fn render_title(frame: &mut Frame, ctx: &FrameContext<'_>, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(" VisualSearch", Theme::heading()),
        Span::styled(format!("  grounded by {}", ctx.model), Theme::dim()),
    ]));
    frame.render_widget(title, area);
}

fn render_input(frame: &mut Frame, view: &SessionView, area: Rect) {
    let border_style = if view.input_enabled {
        Style::default().fg(Theme::accent())
    } else {
        Theme::dim()
    };
    let block = Block::default()
        .title(" Describe the images you are looking for ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner_width = area.width.saturating_sub(3) as usize;
    let visible = tail_columns(&view.input, inner_width);
    let text_style = if view.input_enabled {
        Theme::normal()
    } else {
        Theme::dim()
    };

    frame.render_widget(
        Paragraph::new(Span::styled(visible.to_string(), text_style)).block(block),
        area,
    );

    if view.input_enabled {
        let x = area.x + 1 + visible.width() as u16;
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_prompt(frame: &mut Frame, area: Rect) {
    let prompt = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Type a description, e.g. \"sunset over mountains\", and press Enter.",
            Theme::dim(),
        )),
        Line::from(Span::styled(
            "  Results are grounded in live web search and list their sources.",
            Theme::dim(),
        )),
    ])
    .wrap(Wrap { trim: false });
    frame.render_widget(prompt, area);
}

fn render_loading(frame: &mut Frame, tick: usize, area: Rect) {
    let spinner = SPINNER[tick % SPINNER.len()];
    let loading = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {spinner} Searching the web..."),
            Theme::warning(),
        )),
    ]);
    frame.render_widget(loading, area);
}

fn render_error(frame: &mut Frame, message: &str, area: Rect) {
    let error = Paragraph::new(Span::styled(format!(" Error: {message}"), Theme::error()))
        .wrap(Wrap { trim: true });
    frame.render_widget(error, area);
}

fn render_answer(
    frame: &mut Frame,
    text: &str,
    sources: &[SourceLink],
    scroll: u16,
    area: Rect,
) -> u16 {
    let sources_height = if sources.is_empty() {
        3
    } else {
        (sources.len() as u16 * 2 + 2).min(MAX_SOURCES_HEIGHT)
    };
    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(sources_height)])
        .split(area);

    let narrative = Text::from(render_markdown(text));
    let max_scroll = answer_overflow(&narrative, chunks[0]);
    let answer = Paragraph::new(narrative)
        .block(
            Block::default()
                .title(" Answer ")
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(max_scroll), 0));
    frame.render_widget(answer, chunks[0]);

    let block = Block::default()
        .title(format!(" Sources ({}) ", sources.len()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    if sources.is_empty() {
        let notice = Paragraph::new(Span::styled(
            "No sources were returned for this answer.",
            Theme::dim(),
        ))
        .block(block);
        frame.render_widget(notice, chunks[1]);
        return max_scroll;
    }

    let items: Vec<ListItem> = sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Theme::dim()),
                    Span::styled(
                        source.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("  {}", source.host), Theme::dim()),
                ]),
                Line::from(Span::styled(format!("   {}", source.uri), Theme::link())),
            ])
        })
        .collect();
    frame.render_widget(List::new(items).block(block), chunks[1]);
    max_scroll
}

/// Rows the narrative overflows its bordered box by once word-wrapped.
fn answer_overflow(narrative: &Text<'static>, area: Rect) -> u16 {
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2) as usize;
    let rows = Paragraph::new(narrative.clone())
        .wrap(Wrap { trim: false })
        .line_count(inner_width);
    rows.saturating_sub(inner_height).min(u16::MAX as usize) as u16
}

fn render_hints(frame: &mut Frame, view: &SessionView, area: Rect) {
    let mut spans = Vec::new();
    if view.input_enabled {
        spans.extend([
            Span::styled("  enter", Theme::key_hint()),
            Span::styled(" search  ", Theme::dim()),
            Span::styled("ctrl+u", Theme::key_hint()),
            Span::styled(" clear  ", Theme::dim()),
        ]);
    }
    if matches!(view.results, ResultsView::Answer { .. }) {
        spans.extend([
            Span::styled("  ↑↓", Theme::key_hint()),
            Span::styled(" scroll  ", Theme::dim()),
        ]);
    }
    spans.extend([
        Span::styled("  esc", Theme::key_hint()),
        Span::styled(" quit", Theme::dim()),
    ]);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The longest suffix of `text` that fits in `max` terminal columns, so the
/// cursor end stays visible.
fn tail_columns(text: &str, max: usize) -> &str {
    let mut width = 0;
    for (idx, c) in text.char_indices().rev() {
        width += c.width().unwrap_or(0);
        if width > max {
            return &text[idx + c.len_utf8()..];
        }
    }
    text
}
