//! Score card and per-question review

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout::percent_bar;
use crate::app::state::ReviewState;
use crate::quiz::scoring::{Verdict, verdicts};
use crate::quiz::{Question, ScoreCard};
use crate::theme::Theme;

pub fn draw(frame: &mut Frame, area: Rect, review: &ReviewState, theme: &Theme) {
    let [card_area, review_area] =
        Layout::vertical([Constraint::Length(7), Constraint::Min(1)]).areas(area);

    draw_card(frame, card_area, review, theme);
    draw_review(frame, review_area, review, theme);
}

fn draw_card(frame: &mut Frame, area: Rect, review: &ReviewState, theme: &Theme) {
    let result = &review.result;
    let card = &review.card;

    let block = Block::default()
        .title(format!(
            " {} \u{00B7} {} \u{00B7} {} ",
            result.subject.label(),
            result.test_type.label(),
            result.date_label()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.subject_color(result.subject)))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score_color = if card.score < 0 { theme.error } else { theme.success };
    let lines = vec![
        Line::from(vec![
            Span::styled(" Score ", Style::default().fg(theme.fg_muted)),
            Span::styled(
                format!("{} / {}", card.score, card.max_score),
                Style::default().fg(score_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Time ", Style::default().fg(theme.fg_muted)),
            Span::styled(result.elapsed_label.clone(), Style::default().fg(theme.fg_primary)),
        ]),
        Line::from(vec![
            Span::styled(" Accuracy ", Style::default().fg(theme.fg_muted)),
            Span::styled(format!("{:>3}% ", card.accuracy_percent), Style::default().fg(theme.fg_primary)),
            Span::styled(percent_bar(card.accuracy_percent, 20), Style::default().fg(theme.accent_primary)),
        ]),
        Line::from(""),
        summary_line(card, theme),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn summary_line(card: &ScoreCard, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" \u{2713} {} correct  ", card.correct), Style::default().fg(theme.success)),
        Span::styled(format!("\u{2717} {} wrong  ", card.incorrect), Style::default().fg(theme.error)),
        Span::styled(
            format!("\u{2012} {} skipped", card.unattempted),
            Style::default().fg(theme.fg_muted),
        ),
    ])
}

fn draw_review(frame: &mut Frame, area: Rect, review: &ReviewState, theme: &Theme) {
    let session = &review.result.snapshot;
    let block = Block::default()
        .title(format!(" Review {}/{} ", review.scroll + 1, session.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let verdicts = verdicts(session);
    let mut lines = Vec::new();
    for (i, (question, answer)) in
        session.questions().iter().zip(session.answers()).enumerate().skip(review.scroll)
    {
        question_lines(&mut lines, i, question, *answer, verdicts[i], theme);
        if lines.len() >= inner.height as usize {
            break;
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn question_lines(
    lines: &mut Vec<Line<'static>>,
    index: usize,
    question: &Question,
    answer: Option<usize>,
    verdict: Verdict,
    theme: &Theme,
) {
    let (mark, color) = match verdict {
        Verdict::Correct => ("\u{2713}", theme.success),
        Verdict::Incorrect => ("\u{2717}", theme.error),
        Verdict::Unattempted => ("\u{2012}", theme.fg_muted),
    };

    lines.push(Line::from(vec![
        Span::styled(format!("{} Q{}. ", mark, index + 1), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(question.text.clone(), Style::default().fg(theme.fg_primary)),
    ]));

    let correct = Question::option_letter(question.correct_index);
    let yours = answer.map_or_else(|| "not answered".to_string(), |a| Question::option_letter(a).to_string());
    lines.push(Line::from(Span::styled(
        format!(
            "   Your answer: {}   Correct: {}) {}",
            yours,
            correct,
            question.correct_option().unwrap_or("?")
        ),
        Style::default().fg(theme.fg_secondary),
    )));
    lines.push(Line::from(Span::styled(
        format!("   {}", question.explanation),
        Style::default().fg(theme.fg_muted),
    )));
    lines.push(Line::from(Span::styled(
        format!("   NCERT: {}", question.reference),
        Style::default().fg(theme.info).add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::from(""));
}
