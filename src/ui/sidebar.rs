use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use crate::state::SessionState;

pub fn draw_sidebar(f: &mut Frame, area: Rect, state: &SessionState) {
    let inner_height = area.height.saturating_sub(1) as usize; // title row
    let total = state.questions.len();
    let current = state.current_question;

    // Keep the current question in view
    let scroll_offset = if current >= inner_height {
        current + 1 - inner_height
    } else {
        0
    };

    let mut lines: Vec<Line> = Vec::new();
    for idx in (0..total).skip(scroll_offset).take(inner_height) {
        let answered = state.selected_answer(idx).is_some();
        let (icon, color) = if answered {
            ("●", Color::Green)
        } else {
            ("○", Color::White)
        };

        let is_current = idx == current;
        let style = if is_current {
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(if is_current { " ▸ " } else { "   " }, style),
            Span::styled(format!("{} ", icon), style.fg(color)),
            Span::styled(format!("{:>2}", idx + 1), style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::RIGHT)
        .title(format!(" {}/{} ", state.answered_count(), total))
        .title_style(Style::default().add_modifier(Modifier::BOLD));

    f.render_widget(Paragraph::new(lines).block(block), area);

    if total > inner_height {
        let scrollbar_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: inner_height as u16,
        };
        let mut scrollbar_state = ScrollbarState::new(total.saturating_sub(1)).position(current);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}
