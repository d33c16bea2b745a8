use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Quiz;

use super::{render_controls, truncate};

const TITLE_LENGTH: usize = 40;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0], app);
    render_quizzes(frame, chunks[1], app);
    render_controls(
        frame,
        chunks[2],
        "j/k select  ·  enter take  ·  e edit  ·  y duplicate  ·  d delete  ·  r refresh  ·  tab upload  ·  q quit",
    );
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let count = app.collection.quizzes().len();
    let mut spans = vec![
        Span::styled("YOUR QUIZZES", Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("  {} total", count), Style::default().fg(Color::DarkGray)),
    ];
    if let Some(notice) = app.notice() {
        spans.push(Span::styled(format!("  {}", notice), Style::default().fg(Color::Yellow)));
    }
    let line = Line::from(spans);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_quizzes(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Color::DarkGray)
        .padding(Padding::horizontal(1));
    let quizzes = app.collection.quizzes();

    if quizzes.is_empty() {
        let lines = if app.collection.is_loading() {
            vec![Line::from("Loading quizzes...".fg(Color::Yellow))]
        } else if let Some(error) = app.collection.load_error() {
            vec![
                Line::from(Span::styled(error, Style::default().fg(Color::Red))),
                Line::from(""),
                Line::from("r to retry".fg(Color::DarkGray)),
            ]
        } else {
            vec![
                Line::from("No quizzes yet.".fg(Color::Gray)),
                Line::from(""),
                Line::from("Upload a document and generate one from the upload tab.".fg(Color::DarkGray)),
            ]
        };
        let widget = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(widget, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(quizzes.len() * 2 + 2);
    if let Some(error) = app.collection.load_error() {
        lines.push(Line::from(Span::styled(error, Style::default().fg(Color::Red))));
        lines.push(Line::from(""));
    }
    for (index, quiz) in quizzes.iter().enumerate() {
        lines.extend(quiz_lines(quiz, index == app.list_cursor()));
    }

    let visible = area.height.saturating_sub(2) as usize;
    let cursor_row = app.list_cursor() * 2;
    let scroll = cursor_row.saturating_sub(visible.saturating_sub(2));

    let widget = Paragraph::new(lines).block(block).scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn quiz_lines(quiz: &Quiz, selected: bool) -> [Line<'static>; 2] {
    let style = if selected {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::White)
    };
    let marker = if selected { ">" } else { " " };

    let mut details = format!(
        "{} questions  ·  created {}",
        quiz.question_count(),
        quiz.created_at.format("%Y-%m-%d")
    );
    if let Some(description) = quiz.description.as_deref().filter(|d| !d.is_empty()) {
        details.push_str("  ·  ");
        details.push_str(&truncate(description, TITLE_LENGTH));
    }

    [
        Line::from(vec![
            Span::styled(format!("{} ", marker), style),
            Span::styled(truncate(&quiz.title, TITLE_LENGTH), style),
        ]),
        Line::from(Span::styled(
            format!("  {}", details),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}
