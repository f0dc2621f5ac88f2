use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::model::category_name;
use crate::state::{Screen, SessionState};

pub fn draw_statusbar(f: &mut Frame, area: Rect, state: &SessionState) {
    let mut spans = vec![Span::raw(" ")];

    match state.screen {
        Screen::Options => {
            if state.is_fetching() {
                spans.push(Span::styled(
                    "Fetching questions...",
                    Style::default().fg(Color::Yellow),
                ));
            } else if let Some(err) = &state.last_error {
                spans.push(Span::styled(
                    format!("✗ Quiz did not start: {}", err),
                    Style::default().fg(Color::Red),
                ));
            } else {
                spans.push(Span::styled("Ready", Style::default().fg(Color::DarkGray)));
            }
        }
        Screen::Quiz => {
            spans.push(Span::styled(
                format!("● {} answered", state.answered_count()),
                Style::default().fg(Color::Green),
            ));
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                format!("○ {} open", state.unanswered_count()),
                Style::default().fg(Color::White),
            ));
            if let Some(opts) = &state.active {
                spans.push(Span::raw("   "));
                spans.push(Span::styled(
                    format!("{} · {}", category_name(opts.category), opts.difficulty),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
        Screen::Results { score } => {
            spans.push(Span::styled(
                format!("{} of {} correct", score, state.questions.len()),
                Style::default().fg(Color::Green),
            ));
        }
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(30, 30, 30)));
    f.render_widget(widget, area);
}
