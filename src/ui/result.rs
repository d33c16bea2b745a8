use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::session::QuizSession;

use super::{render_controls, truncate};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, session: &QuizSession, scroll: usize) {
    let score = session.score();
    let percentage = score.rounded_percentage();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], session, percentage);
    render_question_breakdown(frame, chunks[2], session, scroll);
    render_controls(frame, chunks[3], "j/k scroll  ·  v review  ·  r retake  ·  b back  ·  q quit");
}

fn grade_color(percentage: u32) -> Color {
    match percentage {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, session: &QuizSession, percentage: u32) {
    let score = session.score();
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(session.quiz().title.as_str().fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({}%)", score.correct, score.total, percentage),
            Style::default().fg(grade_color(percentage)).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, session: &QuizSession, scroll: usize) {
    let lines: Vec<Line> = session
        .quiz()
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let (symbol, color) = match session.answer_for(&question.id) {
                None => ("?", Color::DarkGray),
                Some(_) if session.is_answered_correctly(question) => ("+", Color::Green),
                Some(_) => ("-", Color::Red),
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate(&question.question, QUESTION_PREVIEW_LENGTH),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_color_bands() {
        assert_eq!(grade_color(100), Color::Green);
        assert_eq!(grade_color(75), Color::Cyan);
        assert_eq!(grade_color(50), Color::Yellow);
        assert_eq!(grade_color(10), Color::Red);
    }
}
