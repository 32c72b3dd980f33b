//! Chapter picker for chapter-wise tests

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::scroll_offset;
use crate::app::state::AppState;
use crate::theme::Theme;

/// Status indicators for chapters
const MARK_SELECTED: &str = "[x]";
const MARK_UNSELECTED: &str = "[ ]";

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let accent = theme.subject_color(state.subject);
    let picker = &state.chapters;

    let block = Block::default()
        .title(format!(" {} Chapters \u{00B7} {} selected ", state.subject.label(), picker.selection.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    let mut last_unit = "";
    let mut cursor_line = 0;

    for (i, chapter) in state.visible_chapters().into_iter().enumerate() {
        if chapter.unit != last_unit {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                format!("Class {} \u{00B7} {}", chapter.class_level, chapter.unit),
                Style::default().fg(theme.fg_muted).add_modifier(Modifier::ITALIC),
            )));
            last_unit = chapter.unit;
        }

        let checked = picker.selection.contains(chapter.name);
        let mark = if checked { MARK_SELECTED } else { MARK_UNSELECTED };
        let style = if i == picker.cursor {
            cursor_line = lines.len();
            Style::default().fg(theme.bg_primary).bg(accent).add_modifier(Modifier::BOLD)
        } else if checked {
            Style::default().fg(accent)
        } else {
            Style::default().fg(theme.fg_primary)
        };
        lines.push(Line::from(Span::styled(format!(" {} {}", mark, chapter.name), style)));
    }

    let start = scroll_offset(cursor_line, inner.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((start as u16, 0)), inner);
}
