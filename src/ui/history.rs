//! Past attempts, newest first

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::{draw_placeholder, scroll_offset};
use crate::app::state::AppState;
use crate::history::ResultStore;
use crate::quiz::Subject;
use crate::theme::Theme;

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, store: &ResultStore, theme: &Theme) {
    let [stats_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(area);

    draw_subject_stats(frame, stats_area, store, theme);
    draw_list(frame, list_area, state, store, theme);
}

/// One box per subject with average accuracy and attempt count
fn draw_subject_stats(frame: &mut Frame, area: Rect, store: &ResultStore, theme: &Theme) {
    let areas = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);
    for (subject, cell) in Subject::all().iter().copied().zip(areas.iter()) {
        let stats = store.aggregate_by_subject(subject);
        let color = theme.subject_color(subject);
        let block = Block::default()
            .title(format!(" {} ", subject.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let line = Line::from(vec![
            Span::styled(
                format!(" {}% ", stats.average_accuracy),
                Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("avg \u{00B7} {} tests", stats.count), Style::default().fg(theme.fg_muted)),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), *cell);
    }
}

fn draw_list(frame: &mut Frame, area: Rect, state: &AppState, store: &ResultStore, theme: &Theme) {
    let block = Block::default()
        .title(format!(" History \u{00B7} {} attempts ", store.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if store.is_empty() {
        draw_placeholder(frame, inner, "No tests taken yet", theme);
        return;
    }

    let lines: Vec<Line> = store
        .recent()
        .enumerate()
        .map(|(i, result)| {
            let selected = i == state.history_cursor;
            let base = if selected {
                Style::default().bg(theme.selection).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", result.subject.badge()),
                    base.fg(theme.subject_color(result.subject)),
                ),
                Span::styled(format!("{:<16}", result.test_type.label()), base.fg(theme.fg_primary)),
                Span::styled(format!("{:<13}", result.date_label()), base.fg(theme.fg_muted)),
                Span::styled(format!("{:>5} pts ", result.score), base.fg(theme.fg_primary)),
                Span::styled(format!("{:>3}% ", result.accuracy_percent), base.fg(theme.accent_primary)),
                Span::styled(format!("{:>3}Q ", result.total_questions), base.fg(theme.fg_muted)),
                Span::styled(result.elapsed_label.clone(), base.fg(theme.fg_secondary)),
            ])
        })
        .collect();

    let start = scroll_offset(state.history_cursor, inner.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((start as u16, 0)), inner);
}
