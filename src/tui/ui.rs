//! Rendering for the Easel console.
//!
//! Lays out the transcript pane, a status line, and the input bar, plus the
//! quit-confirmation dialog drawn over everything while it is open.

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Focus, TranscriptLine};

/// Renders the whole frame.
pub fn render(frame: &mut Frame, app: &App) {
    let [transcript_area, status_area, input_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    render_transcript(frame, app, transcript_area);
    render_status(frame, app, status_area);
    render_input(frame, app, input_area);

    if app.quit_dialog_open() {
        render_quit_dialog(frame);
    }
}

fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let total = app.transcript.len();
    let scroll = app.scroll.min(total.saturating_sub(visible));
    let end = total - scroll;
    let start = end.saturating_sub(visible);

    let lines: Vec<Line> = app.transcript[start..end]
        .iter()
        .map(|entry| match entry {
            TranscriptLine::Command(text) => Line::from(Span::styled(
                text.clone(),
                Style::default().fg(Color::Cyan),
            )),
            TranscriptLine::Info(text) => Line::from(Span::raw(text.clone())),
            TranscriptLine::Error(text) => Line::from(Span::styled(
                text.clone(),
                Style::default().fg(Color::Red),
            )),
        })
        .collect();

    let border_style = if app.focus == Focus::Transcript {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let block = Block::default()
        .title("Console")
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let tool = app.document.current_tool.unwrap_or("none");
    let mut spans = vec![Span::raw(format!(
        " tool: {tool}  shapes: {}",
        app.document.shape_count
    ))];
    if app.document.dirty {
        spans.push(Span::styled(
            "  [modified]",
            Style::default().fg(Color::Yellow),
        ));
    }
    if app.document.properties_open {
        spans.push(Span::raw("  [properties]"));
    }
    if app.executing() {
        spans.push(Span::styled(
            "  [suspended]",
            Style::default().fg(Color::Magenta),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.focus == Focus::Input {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::raw("> "), Span::raw(app.input.as_str())];
    let pending = app.pending_input().trim();
    if !pending.is_empty() {
        // Unprocessed console input held between ticks.
        spans.push(Span::styled(
            format!("  [pending: {pending}]"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let block = Block::default().title("Command").borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(block.border_style(border_style)),
        area,
    );

    if app.focus == Focus::Input && !app.quit_dialog_open() {
        frame.set_cursor_position((
            area.x + 3 + app.input.chars().count() as u16,
            area.y + 1,
        ));
    }
}

fn render_quit_dialog(frame: &mut Frame) {
    let area = center_rect(44, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "Unsaved changes",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Quit without saving?"),
        Line::from(vec![
            Span::styled("[y/Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Yes  "),
            Span::styled("[n/Esc]", Style::default().fg(Color::Red)),
            Span::raw(" No"),
        ]),
    ];

    let block = Block::default()
        .title("Confirm Quit")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Left),
        area,
    );
}

/// Centers a rectangle of the given size within the parent area.
fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
