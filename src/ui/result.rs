use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::state::SessionState;
use crate::ui::question::wrap_text;

pub fn draw_results(f: &mut Frame, area: Rect, state: &SessionState, score: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(area);

    let card = state.scorecard();
    let headline_color = if card.total > 0 && score * 2 >= card.total {
        Color::Green
    } else {
        Color::Yellow
    };

    let header = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("You scored {} / {}", score, card.total),
            Style::default()
                .fg(headline_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Play again",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let widget = Paragraph::new(header)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(widget, chunks[0]);

    let review_area = chunks[1];
    let width = (review_area.width as usize).saturating_sub(8);
    let mut lines: Vec<Line> = Vec::new();

    if card.missed.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  ✓ No missed questions",
            Style::default().fg(Color::Green),
        )));
    }

    for (n, miss) in card.missed.iter().enumerate().skip(state.review_scroll) {
        for (i, wline) in wrap_text(&miss.question, width).into_iter().enumerate() {
            let prefix = if i == 0 {
                format!(" {:>2}. ", n + 1)
            } else {
                "     ".to_string()
            };
            lines.push(Line::from(Span::styled(
                format!("{}{}", prefix, wline),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        let answer_style = if miss.user_answer.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::raw("     Your answer:    "),
            Span::styled(miss.user_answer_display().to_string(), answer_style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("     Correct answer: "),
            Span::styled(miss.correct_answer.clone(), Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Missed ({}) ", card.missed.len()))
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, review_area);
}
