use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{Screen, SessionState};

pub fn draw_keybar(f: &mut Frame, area: Rect, state: &SessionState) {
    let bindings: Vec<(&str, &str)> = match state.screen {
        Screen::Options if state.is_fetching() => vec![("Esc", "cancel"), ("Ctrl+Q", "quit")],
        Screen::Options => vec![
            ("↑/↓", "field"),
            ("←/→", "change"),
            ("Enter", "start"),
            ("?", "help"),
            ("q", "quit"),
        ],
        Screen::Quiz => vec![
            ("a-d", "answer"),
            ("↑/↓", "choice"),
            ("←/→", "prev/next"),
            ("Enter", "pick"),
            ("Ctrl+S", "submit"),
            ("Ctrl+Q", "quit"),
        ],
        Screen::Results { .. } => vec![
            ("↑/↓", "scroll"),
            ("Enter", "play again"),
            ("q", "quit"),
        ],
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
