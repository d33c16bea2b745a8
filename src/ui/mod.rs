mod editor;
mod quiz;
mod quiz_list;
mod result;
mod upload;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::app::{App, View};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let banner_height = if app.banner().is_some() { 3 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(banner_height),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, chunks[0], app);
    if let Some(message) = app.banner() {
        render_banner(frame, chunks[1], message);
    }

    match &app.view {
        View::Upload => upload::render(frame, chunks[2], app),
        View::QuizList => quiz_list::render(frame, chunks[2], app),
        View::QuizView(session) if session.show_results() => {
            result::render(frame, chunks[2], session, app.result_scroll())
        }
        View::QuizView(session) => quiz::render(frame, chunks[2], session, app),
        View::QuizEdit(editor) => editor::render(frame, chunks[2], editor, app),
    }

    render_status(frame, chunks[3], app);

    if let Some(input) = app.input() {
        render_popup(
            frame,
            area,
            &input.target.label(),
            vec![
                Line::from(vec![
                    Span::styled(input.buffer.as_str(), Style::default().fg(Color::White)),
                    Span::styled("_", Style::default().fg(Color::Cyan)),
                ]),
                Line::from(""),
                Line::from("enter save  ·  esc cancel".fg(Color::DarkGray)),
            ],
        );
    } else if let Some(confirm) = app.confirm() {
        render_popup(
            frame,
            area,
            "Confirm",
            vec![
                Line::from(Span::styled(
                    confirm.prompt(),
                    Style::default().fg(Color::Yellow).bold(),
                )),
                Line::from(""),
                Line::from("y yes  ·  n no".fg(Color::DarkGray)),
            ],
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(format!(" {} ", label), Style::default().fg(Color::Black).bg(Color::Cyan).bold())
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(Color::DarkGray))
        }
    };
    let on_upload = matches!(app.view, View::Upload);

    let line = Line::from(vec![
        Span::styled(" QUIZ STUDIO ", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
        tab("1 Upload", on_upload),
        tab("2 Quizzes", !on_upload),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_banner(frame: &mut Frame, area: Rect, message: &str) {
    let widget = Paragraph::new(Line::from(vec![
        Span::styled(message, Style::default().fg(Color::Red).bold()),
        Span::styled("   esc dismiss", Style::default().fg(Color::DarkGray)),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::Red)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let widget = match app.busy_message() {
        Some(message) => Paragraph::new(message).fg(Color::Yellow),
        None => Paragraph::new(""),
    };
    frame.render_widget(widget.alignment(Alignment::Right), area);
}

fn render_popup(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let popup = centered(area, 60, 7);
    frame.render_widget(Clear, popup);

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Color::Cyan)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, popup);
}

fn centered(area: Rect, width_percent: u16, height: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(middle);
    center
}

/// Shortens `text` to `max` characters with a trailing ellipsis.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let truncated: String = text.chars().take(max).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

/// One row of control hints at the bottom of a view.
pub(crate) fn render_controls(frame: &mut Frame, area: Rect, hints: &str) {
    let widget = Paragraph::new(hints.to_string())
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
