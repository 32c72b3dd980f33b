//! Quiz screen: countdown, question, options and answer palette

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::QuizScreen;
use crate::quiz::QuizSession;
use crate::theme::Theme;

/// State of one palette cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Current,
    Answered,
    Unanswered,
}

/// Palette cells for every question
pub fn palette(session: &QuizSession) -> Vec<Cell> {
    session
        .answers()
        .iter()
        .enumerate()
        .map(|(i, answer)| {
            if i == session.current_index() {
                Cell::Current
            } else if answer.is_some() {
                Cell::Answered
            } else {
                Cell::Unanswered
            }
        })
        .collect()
}

pub fn draw(frame: &mut Frame, area: Rect, quiz: &QuizScreen, theme: &Theme) {
    let [info_area, body_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);
    let [question_area, palette_area] =
        Layout::horizontal([Constraint::Min(40), Constraint::Length(26)]).areas(body_area);

    draw_info(frame, info_area, quiz, theme);
    draw_question(frame, question_area, quiz, theme);
    draw_palette(frame, palette_area, &quiz.session, theme);
}

fn draw_info(frame: &mut Frame, area: Rect, quiz: &QuizScreen, theme: &Theme) {
    let session = &quiz.session;
    let countdown = quiz.countdown.countdown();
    let clock_color = if countdown.is_expired() {
        theme.error
    } else if countdown.remaining() < 300 {
        theme.warning
    } else {
        theme.fg_primary
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} \u{00B7} {} ", session.subject().label(), session.test_type().label()),
            Style::default().fg(theme.subject_color(session.subject())),
        ),
        Span::styled(
            format!(" {}/{} answered ", session.answered_count(), session.len()),
            Style::default().fg(theme.fg_muted),
        ),
        Span::styled(
            format!(" \u{23F1} {} ", countdown.label()),
            Style::default().fg(clock_color).add_modifier(Modifier::BOLD),
        ),
    ];
    if !quiz.jump_input.is_empty() {
        spans.push(Span::styled(
            format!(" go to {}_ ", quiz.jump_input),
            Style::default().fg(theme.accent_primary),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_question(frame: &mut Frame, area: Rect, quiz: &QuizScreen, theme: &Theme) {
    let session = &quiz.session;
    let question = session.current_question();

    let mut title = format!(" Question {} of {} ", session.current_index() + 1, session.len());
    if let Some(year) = question.year {
        title.push_str(&format!("\u{00B7} NEET {} ", year));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![];

    // Question text
    for text_line in question.text.lines() {
        lines.push(Line::from(Span::styled(
            text_line,
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));

    // Options
    let answer = session.current_answer();
    for (i, option) in question.options.iter().enumerate() {
        let chosen = answer == Some(i);
        let prefix = if chosen { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○
        let letter = (b'A' + i as u8) as char;

        let mut style = if chosen {
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };
        if i == quiz.option_cursor {
            style = style.bg(theme.selection);
        }

        lines.push(Line::from(Span::styled(format!("  {} {}) {}", prefix, letter, option), style)));
        lines.push(Line::from(""));
    }

    if !question.chapter.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Chapter: {}", question.chapter),
            Style::default().fg(theme.fg_muted),
        )));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

fn draw_palette(frame: &mut Frame, area: Rect, session: &QuizSession, theme: &Theme) {
    let block = Block::default()
        .title(" Palette ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let per_row = (inner.width as usize / 4).max(1);
    let cells = palette(session);
    let lines: Vec<Line> = cells
        .chunks(per_row)
        .enumerate()
        .map(|(row, chunk)| {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let style = match cell {
                        Cell::Current => Style::default()
                            .fg(theme.bg_primary)
                            .bg(theme.accent_primary)
                            .add_modifier(Modifier::BOLD),
                        Cell::Answered => Style::default().fg(theme.success),
                        Cell::Unanswered => Style::default().fg(theme.fg_muted),
                    };
                    Span::styled(format!("{:>3} ", row * per_row + col + 1), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let current_row = session.current_index() / per_row;
    let start = super::layout::scroll_offset(current_row, inner.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((start as u16, 0)), inner);
}
