//! Dashboard: test menu and subject performance

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout::percent_bar;
use crate::app::state::{AppState, MenuItem};
use crate::history::ResultStore;
use crate::quiz::Subject;
use crate::quiz::scoring::MARKS_CORRECT;
use crate::theme::Theme;

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, store: &ResultStore, theme: &Theme) {
    let [menu_area, stats_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    draw_menu(frame, menu_area, state, theme);
    draw_stats(frame, stats_area, store, theme);
}

fn draw_menu(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let accent = theme.subject_color(state.subject);
    let block = Block::default()
        .title(format!(" {} {} ", state.subject.badge(), state.subject.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for (i, item) in MenuItem::ALL.iter().enumerate() {
        let selected = i == state.menu_cursor;
        let (marker, style) = if selected {
            ("\u{25B6} ", Style::default().fg(theme.bg_primary).bg(accent).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default().fg(theme.fg_primary))
        };
        lines.push(Line::from(Span::styled(format!("{}{}", marker, item.label()), style)));
        lines.push(Line::from(Span::styled(
            format!("    {}", item.description()),
            Style::default().fg(theme.fg_muted),
        )));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_stats(frame: &mut Frame, area: Rect, store: &ResultStore, theme: &Theme) {
    let block = Block::default()
        .title(" Performance ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];
    for subject in Subject::all().iter().copied() {
        let stats = store.aggregate_by_subject(subject);
        let color = theme.subject_color(subject);
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<10}", subject.label()), Style::default().fg(color)),
            Span::styled(
                format!("{:>3}%", stats.average_accuracy),
                Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} test{}", stats.count, if stats.count == 1 { "" } else { "s" }),
                Style::default().fg(theme.fg_muted),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(" {}", percent_bar(stats.average_accuracy, 20)),
            Style::default().fg(color),
        )));
        lines.push(Line::from(""));
    }

    if let Some(last) = store.recent().next() {
        lines.push(Line::from(Span::styled(" Last attempt", Style::default().fg(theme.fg_secondary))));
        lines.push(Line::from(Span::styled(
            format!(
                " {} {} \u{00B7} {} \u{00B7} {}/{}",
                last.subject.badge(),
                last.test_type.label(),
                last.date_label(),
                last.score,
                last.total_questions as i64 * MARKS_CORRECT
            ),
            Style::default().fg(theme.fg_muted),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
