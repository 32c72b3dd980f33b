//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::{AppState, StatusLine};
use crate::quiz::Subject;
use crate::theme::Theme;

/// Split the screen into header, body and footer rows
pub fn frame_areas(area: Rect) -> [Rect; 3] {
    Layout::vertical([Constraint::Length(3), Constraint::Min(1), Constraint::Length(2)]).areas(area)
}

/// App title bar with the subject tabs
pub fn draw_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme, title: &str) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![
        Span::styled(
            " NEETHub ",
            Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}  ", title), Style::default().fg(theme.fg_primary)),
    ];
    for (i, subject) in Subject::all().iter().enumerate() {
        spans.push(subject_tab(*subject, i + 1, *subject == state.subject, theme));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn subject_tab(subject: Subject, key: usize, active: bool, theme: &Theme) -> Span<'static> {
    let color = theme.subject_color(subject);
    let style = if active {
        Style::default().fg(theme.bg_primary).bg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };
    Span::styled(format!(" {} {} ", key, subject.label()), style)
}

/// Status message above the key hints, then the hints themselves
pub fn draw_footer(frame: &mut Frame, area: Rect, status: &StatusLine, hints: &[(&str, &str)], theme: &Theme) {
    let [status_area, hint_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    if let Some(msg) = &status.message {
        let color = if status.is_error { theme.error } else { theme.success };
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {}", msg), Style::default().fg(color))),
            status_area,
        );
    }

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(format!(" [{}]", key), Style::default().fg(theme.fg_muted)));
        spans.push(Span::styled(format!(" {} ", label), Style::default().fg(theme.fg_secondary)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), hint_area);
}

/// Draw a centered message (used for empty lists)
pub fn draw_placeholder(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let style = Style::default().fg(theme.fg_muted).bg(theme.bg_primary);

    let placeholder = Paragraph::new(message).style(style).alignment(Alignment::Center);

    frame.render_widget(placeholder, centered_rect(80, 20, area));
}

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Text bar like `████░░░░░░` for a percentage
pub fn percent_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("{}{}", "\u{2588}".repeat(filled), "\u{2591}".repeat(width - filled))
}

/// First visible row so that `selected` stays on screen
pub fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 { selected } else { selected.saturating_sub(visible - 1) }
}
