use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::{App, option_label};
use crate::models::{QuestionType, QuizQuestion};
use crate::session::{QuizMode, QuizSession};

use super::render_controls;

pub fn render(frame: &mut Frame, area: Rect, session: &QuizSession, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0], session);
    render_progress(frame, chunks[1], session);

    let Some(question) = session.current_question() else {
        let widget = Paragraph::new("This quiz has no questions.".fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(widget, chunks[3]);
        render_controls(frame, chunks[5], "e edit  ·  b back  ·  q quit");
        return;
    };

    render_question_text(frame, chunks[2], question);
    if question.question_type == QuestionType::ShortAnswer {
        render_short_answer(frame, chunks[3], session, question, app.is_answering());
    } else {
        render_options(frame, chunks[3], session, question);
    }
    render_feedback(frame, chunks[4], session, question, app.notice());
    render_controls(frame, chunks[5], controls(session, app.is_answering()));
}

fn controls(session: &QuizSession, answering: bool) -> &'static str {
    if answering {
        "type your answer  ·  enter done"
    } else if session.mode() == QuizMode::Test {
        "h/l prev/next  ·  j/k choose  ·  enter answer  ·  f finish  ·  m mode  ·  e edit  ·  d delete  ·  b back"
    } else {
        "h/l prev/next  ·  j/k choose  ·  enter answer  ·  m mode  ·  e edit  ·  d delete  ·  b back"
    }
}

fn render_title(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let mode_color = match session.mode() {
        QuizMode::Study => Color::Green,
        QuizMode::Test => Color::Magenta,
    };
    let line = Line::from(vec![
        Span::styled(session.quiz().title.as_str(), Style::default().fg(Color::Cyan).bold()),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", session.mode().label()),
            Style::default().fg(mode_color),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let label = format!(
        "{}/{}",
        session.current_question_number(),
        session.total_questions()
    );
    let ratio = (session.progress_percent() / 100.0).clamp(0.0, 1.0);
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(ratio)
        .label(label);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &QuizQuestion) {
    let mut lines = vec![Line::from(Span::styled(
        question.question.as_str(),
        Style::default().fg(Color::White).bold(),
    ))];
    let mut tags = question.question_type.label().to_string();
    if let Some(difficulty) = &question.difficulty {
        tags.push_str("  ·  ");
        tags.push_str(difficulty);
    }
    lines.push(Line::from(tags.fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_options(frame: &mut Frame, area: Rect, session: &QuizSession, question: &QuizQuestion) {
    let answer = session.answer_for(&question.id);
    let feedback = session.feedback_visible() && answer.is_some();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options().len() * 2);

    for (index, option) in question.options().iter().enumerate() {
        let is_cursor = index == session.selected_option();
        let is_chosen = answer == Some(option.as_str());
        let is_correct = question.is_correct(option);

        let style = if feedback && is_correct {
            Style::default().fg(Color::Green).bold()
        } else if feedback && is_chosen {
            Style::default().fg(Color::Red).bold()
        } else if is_chosen {
            Style::default().fg(Color::Yellow).bold()
        } else if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_cursor { ">" } else { " " };
        let chosen = if is_chosen { "*" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {}{} ", marker, chosen), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_short_answer(
    frame: &mut Frame,
    area: Rect,
    session: &QuizSession,
    question: &QuizQuestion,
    answering: bool,
) {
    let answer = session.answer_for(&question.id).unwrap_or_default();
    let border = if answering { Color::Cyan } else { Color::DarkGray };

    let mut spans = vec![Span::styled(answer, Style::default().fg(Color::White))];
    if answering {
        spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
    } else if answer.is_empty() {
        spans.push(Span::styled(
            "press enter to type an answer",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Your answer ")
            .borders(Borders::ALL)
            .border_style(border)
            .padding(Padding::horizontal(1)),
    );
    let [answer_area, _] =
        Layout::vertical([Constraint::Length(4), Constraint::Fill(1)]).areas(area);
    frame.render_widget(widget, answer_area);
}

fn render_feedback(
    frame: &mut Frame,
    area: Rect,
    session: &QuizSession,
    question: &QuizQuestion,
    notice: Option<&str>,
) {
    let mut lines = Vec::new();
    if let Some(notice) = notice {
        lines.push(Line::from(Span::styled(notice, Style::default().fg(Color::Yellow))));
    }

    let answered = session.answer_for(&question.id).is_some();
    if session.feedback_visible() && answered {
        if question.question_type == QuestionType::ShortAnswer {
            lines.push(Line::from(vec![
                Span::styled("Suggested answer: ", Style::default().fg(Color::DarkGray)),
                Span::styled(question.correct_answer.as_str(), Style::default().fg(Color::Green)),
            ]));
        } else if session.is_answered_correctly(question) {
            lines.push(Line::from(Span::styled("Correct!", Style::default().fg(Color::Green).bold())));
        } else {
            lines.push(Line::from(vec![
                Span::styled("Incorrect. ", Style::default().fg(Color::Red).bold()),
                Span::styled(
                    format!("The answer is {}", question.correct_answer),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }
        if let Some(explanation) = question.explanation.as_deref().filter(|e| !e.is_empty()) {
            lines.push(Line::from(Span::styled(explanation, Style::default().fg(Color::Gray))));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
