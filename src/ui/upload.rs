use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::FileInfo;
use crate::upload::{OptionField, OptionsForm, UploadPanel, format_file_size};

use super::{render_controls, truncate};

const FILENAME_LENGTH: usize = 32;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let panel = &app.upload;
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_notice(frame, chunks[0], panel);

    let columns = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    render_files(frame, columns[0], panel);

    match &panel.form {
        Some(form) => render_form(frame, columns[1], form),
        None => render_preview(frame, columns[1], panel),
    }

    let hints = if panel.form.is_some() {
        "j/k move  ·  enter change  ·  G generate  ·  esc close"
    } else {
        "u upload  ·  j/k select  ·  g generate  ·  p preview  ·  x delete  ·  r refresh  ·  tab quizzes  ·  q quit"
    };
    render_controls(frame, chunks[2], hints);
}

fn render_notice(frame: &mut Frame, area: Rect, panel: &UploadPanel) {
    let line = match &panel.notice {
        Some(notice) => Line::from(Span::styled(notice.as_str(), Style::default().fg(Color::Yellow))),
        None => Line::from(
            "Upload a PDF, DOCX or TXT file (max 10MB), then generate a quiz from it.".fg(Color::DarkGray),
        ),
    };
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

fn render_files(frame: &mut Frame, area: Rect, panel: &UploadPanel) {
    let block = Block::default()
        .title(" Files ")
        .borders(Borders::ALL)
        .border_style(Color::DarkGray)
        .padding(Padding::horizontal(1));

    if panel.files().is_empty() {
        let widget = Paragraph::new("No files uploaded yet.".fg(Color::DarkGray)).block(block);
        frame.render_widget(widget, area);
        return;
    }

    let lines: Vec<Line> = panel
        .files()
        .iter()
        .enumerate()
        .map(|(index, file)| file_line(file, index == panel.selected_index()))
        .collect();

    // Keep the selection on screen.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = panel.selected_index().saturating_sub(visible.saturating_sub(1));

    let widget = Paragraph::new(lines).block(block).scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn file_line(file: &FileInfo, selected: bool) -> Line<'static> {
    let style = if selected {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if selected { ">" } else { " " };
    let (status, status_color) = if file.can_generate_quiz() {
        ("ready", Color::Green)
    } else {
        ("processing", Color::Yellow)
    };

    Line::from(vec![
        Span::styled(format!("{} ", marker), style),
        Span::styled(format!("{:<34}", truncate(&file.filename, FILENAME_LENGTH)), style),
        Span::styled(
            format!("{:<5} {:>10}  ", file.file_type.label(), format_file_size(file.file_size)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(status, Style::default().fg(status_color)),
    ])
}

fn render_form(frame: &mut Frame, area: Rect, form: &OptionsForm) {
    let options = &form.options;
    let mut lines = Vec::with_capacity(OptionField::ORDER.len() + 2);

    for (index, field) in OptionField::ORDER.iter().enumerate() {
        let selected = index == form.cursor;
        let style = if selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if selected { ">" } else { " " };

        let text = match field {
            OptionField::QuestionCount => format!("Questions: {}", options.num_questions),
            OptionField::Type(question_type) => {
                let mark = if options.question_types.contains(question_type) {
                    "x"
                } else {
                    " "
                };
                format!("[{}] {}", mark, question_type.label())
            }
            OptionField::Difficulty => format!("Difficulty: {}", options.difficulty.as_str()),
            OptionField::FocusTopics => {
                if options.focus_topics.is_empty() {
                    "Focus topics: (none)".to_string()
                } else {
                    format!("Focus topics: {}", options.focus_topics)
                }
            }
            OptionField::Generate => {
                if options.can_generate() {
                    "[ Generate Quiz ]".to_string()
                } else {
                    "[ Generate Quiz ] select a question type".to_string()
                }
            }
        };

        let style = if *field == OptionField::Generate && !options.can_generate() {
            style.fg(Color::DarkGray)
        } else {
            style
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", marker), style),
            Span::styled(text, style),
        ]));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(" Generation options ")
            .borders(Borders::ALL)
            .border_style(Color::Cyan)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_preview(frame: &mut Frame, area: Rect, panel: &UploadPanel) {
    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(Color::DarkGray)
        .padding(Padding::horizontal(1));

    let selected = panel.selected_file();
    let preview = panel
        .preview
        .as_ref()
        .filter(|p| selected.is_some_and(|f| f.file_id == p.file_id));

    let lines = match (selected, preview) {
        (Some(file), Some(preview)) => vec![
            Line::from(Span::styled(file.filename.clone(), Style::default().fg(Color::White).bold())),
            Line::from(format!("{} words", preview.word_count).fg(Color::DarkGray)),
            Line::from(""),
            Line::from(preview.excerpt.clone()),
        ],
        (Some(file), None) => {
            let words = file
                .word_count
                .map(|count| format!("{} words", count))
                .unwrap_or_else(|| "word count pending".to_string());
            vec![
                Line::from(Span::styled(file.filename.clone(), Style::default().fg(Color::White).bold())),
                Line::from(
                    format!(
                        "{}  ·  uploaded {}",
                        words,
                        file.upload_time.format("%Y-%m-%d %H:%M")
                    )
                    .fg(Color::DarkGray),
                ),
                Line::from(""),
                Line::from("p to preview the extracted text".fg(Color::DarkGray)),
            ]
        }
        (None, _) => vec![Line::from("Press u to upload a file.".fg(Color::DarkGray))],
    };

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(widget, area);
}
