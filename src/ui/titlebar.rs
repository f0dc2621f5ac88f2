use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{Screen, SessionState};
use crate::timer::format_countdown;

const WARN_SECONDS: i64 = 5;

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &SessionState) {
    let title = match state.screen {
        Screen::Options => "Trivia — New Quiz".to_string(),
        Screen::Quiz => format!(
            "Trivia — Question {} of {}",
            state.current_question + 1,
            state.questions.len()
        ),
        Screen::Results { .. } => "Trivia — Results".to_string(),
    };

    let timer_text = match (state.screen, state.remaining_seconds) {
        (Screen::Quiz, Some(secs)) => {
            let formatted = format!(" {} left ", format_countdown(secs));
            if secs <= WARN_SECONDS {
                Span::styled(
                    formatted,
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(formatted, Style::default().fg(Color::Rgb(200, 200, 120)))
            }
        }
        _ => Span::raw(""),
    };

    let title_text = format!("[ {} ]", title);
    let title_len = title_text.chars().count();
    let timer_len = timer_text.content.chars().count();
    let available = area.width as usize;

    let center_pad = available.saturating_sub(title_len) / 2;
    // Right padding fills the gap between centered title and right-aligned timer
    let right_pad = available.saturating_sub(center_pad + title_len + timer_len);

    let line = Line::from(vec![
        Span::raw(" ".repeat(center_pad)),
        Span::styled(
            title_text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(right_pad)),
        timer_text,
    ]);

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(widget, area);
}
