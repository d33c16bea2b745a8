use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, option_label};
use crate::editor::QuizEditor;
use crate::models::QuizQuestion;

use super::{render_controls, truncate};

const QUESTION_PREVIEW_LENGTH: usize = 60;

pub fn render(frame: &mut Frame, area: Rect, editor: &QuizEditor, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_details(frame, chunks[0], editor);

    if let Some(notice) = app.notice() {
        let widget = Paragraph::new(Span::styled(notice, Style::default().fg(Color::Yellow)));
        frame.render_widget(widget, chunks[1]);
    }

    render_questions(frame, chunks[2], editor);
    render_controls(
        frame,
        chunks[3],
        "j/k select  ·  enter expand  ·  J/K move  ·  a add  ·  d delete  ·  T title  ·  D description  ·  s save  ·  esc cancel\n\
         w text  ·  t type  ·  v difficulty  ·  o/O option  ·  c correct  ·  x explanation",
    );
}

fn render_details(frame: &mut Frame, area: Rect, editor: &QuizEditor) {
    let mut title = vec![Span::styled(
        editor.title(),
        Style::default().fg(Color::Cyan).bold(),
    )];
    if editor.is_dirty() {
        title.push(Span::styled("  (unsaved)", Style::default().fg(Color::Yellow)));
    }

    let description = if editor.description().is_empty() {
        Line::from("no description".fg(Color::DarkGray))
    } else {
        Line::from(editor.description().fg(Color::Gray))
    };

    let widget = Paragraph::new(vec![Line::from(title), description])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, area);
}

fn render_questions(frame: &mut Frame, area: Rect, editor: &QuizEditor) {
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_row = 0;

    for (index, question) in editor.questions().iter().enumerate() {
        let selected = index == editor.selected_index();
        if selected {
            selected_row = lines.len();
        }
        let style = if selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!("{} {:2}. ", marker, index + 1), style),
            Span::styled(truncate(&question.question, QUESTION_PREVIEW_LENGTH), style),
            Span::styled(
                format!("  [{}]", question.question_type.label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        if editor.editing_question() == Some(question.id.as_str()) {
            lines.extend(expanded_lines(question, editor.option_cursor()));
        }
    }

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = selected_row.saturating_sub(visible / 2);

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" Questions ({}) ", editor.questions().len()))
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn expanded_lines(question: &QuizQuestion, option_cursor: usize) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![Line::from(vec![
        Span::styled("      ", label),
        Span::styled(question.question.clone(), Style::default().fg(Color::White)),
    ])];

    if question.question_type.has_options() {
        for (index, option) in question.options().iter().enumerate() {
            let correct = question.is_correct(option);
            let style = if correct {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };
            let cursor = if index == option_cursor { ">" } else { " " };
            let mark = if correct { "*" } else { " " };
            lines.push(Line::from(vec![
                Span::styled(format!("     {}{}", cursor, mark), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{}. {}", option_label(index), option), style),
            ]));
        }
    } else {
        lines.push(Line::from(vec![
            Span::styled("      Suggested answer: ", label),
            Span::styled(question.correct_answer.clone(), Style::default().fg(Color::Green)),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("      Difficulty: ", label),
        Span::styled(
            question.difficulty.clone().unwrap_or_else(|| "unset".to_string()),
            Style::default().fg(Color::Gray),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("      Explanation: ", label),
        Span::styled(
            question.explanation.clone().unwrap_or_default(),
            Style::default().fg(Color::Gray),
        ),
    ]));
    lines.push(Line::from(""));
    lines
}
