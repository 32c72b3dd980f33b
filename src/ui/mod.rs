//! UI rendering components

pub mod chapter_select;
pub mod dashboard;
pub mod history;
pub mod layout;
pub mod quiz;
pub mod results;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::state::{AppState, LoadingState, Screen};
use crate::history::ResultStore;
use crate::theme::Theme;

const SPINNER: [char; 8] = ['\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}'];

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, store: &ResultStore, theme: &Theme) {
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), frame.area());
    let [header, body, footer] = layout::frame_areas(frame.area());

    let (title, hints): (&str, &[(&str, &str)]) = match state.screen {
        Screen::Dashboard => {
            dashboard::draw(frame, body, state, store, theme);
            ("Dashboard", &[("j/k", "move"), ("Enter", "start"), ("1-3/Tab", "subject"), ("q", "quit")])
        }
        Screen::ChapterSelect => {
            chapter_select::draw(frame, body, state, theme);
            ("Chapter Selection", &[("j/k", "move"), ("Enter", "toggle"), ("s", "generate"), ("Esc", "back")])
        }
        Screen::Loading => {
            if let Some(loading) = &state.loading {
                draw_loading(frame, body, loading, theme);
            }
            ("Generating", &[("q", "quit")])
        }
        Screen::Quiz => {
            if let Some(quiz) = &state.quiz {
                quiz::draw(frame, body, quiz, theme);
            }
            (
                "Test",
                &[
                    ("a-d", "answer"),
                    ("x", "clear"),
                    ("h/l", "prev/next"),
                    ("0-9 Enter", "go to"),
                    ("s", "submit"),
                    ("Esc", "leave"),
                ],
            )
        }
        Screen::Results => {
            if let Some(review) = &state.review {
                results::draw(frame, body, review, theme);
            }
            ("Results", &[("j/k", "scroll"), ("Esc", "back")])
        }
        Screen::History => {
            history::draw(frame, body, state, store, theme);
            ("History & Analysis", &[("j/k", "move"), ("Enter", "review"), ("Esc", "back")])
        }
    };

    layout::draw_header(frame, header, state, theme, title);
    layout::draw_footer(frame, footer, &state.status, hints, theme);
}

/// Draw loading state
fn draw_loading(frame: &mut Frame, area: Rect, loading: &LoadingState, theme: &Theme) {
    let elapsed = loading.started.elapsed();
    let spinner = SPINNER[(elapsed.as_millis() / 100) as usize % SPINNER.len()];
    let request = &loading.request;

    let mut text = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Generating {} {} questions...", spinner, request.count, request.test_type.label()),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} \u{00B7} {}", request.subject.label(), request.chapter_summary()),
            Style::default().fg(theme.subject_color(request.subject)),
        )),
        Line::from(""),
    ];
    if loading.generated_chars > 0 {
        text.push(Line::from(Span::styled(
            format!("{} characters received \u{00B7} {}s", loading.generated_chars, elapsed.as_secs()),
            Style::default().fg(theme.fg_muted),
        )));
    } else {
        text.push(Line::from(Span::styled(
            format!("Waiting for the model \u{00B7} {}s", elapsed.as_secs()),
            Style::default().fg(theme.fg_muted),
        )));
    }

    let para = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(para, layout::centered_rect(80, 60, area));
}
