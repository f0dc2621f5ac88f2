use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::state::{Dialog, SessionState};

pub fn draw_dialog(f: &mut Frame, area: Rect, state: &SessionState) {
    let Some(dialog) = state.top_dialog() else {
        return;
    };

    match dialog {
        Dialog::ConfirmSubmit => draw_confirm_submit(f, area, state),
        Dialog::ConfirmQuit => draw_confirm_quit(f, area, state),
        Dialog::Help => draw_help(f, area),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn confirm_row() -> Line<'static> {
    Line::from(vec![
        Span::styled("   [Enter] Confirm", Style::default().fg(Color::Green)),
        Span::raw("    "),
        Span::styled("[Esc] Cancel", Style::default().fg(Color::DarkGray)),
    ])
}

fn draw_confirm_submit(f: &mut Frame, area: Rect, state: &SessionState) {
    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Submit your answers?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let open = state.unanswered_count();
    if open > 0 {
        lines.push(Line::from(format!(
            "   {} unanswered, counted as wrong.",
            open
        )));
        lines.push(Line::from(""));
    }

    lines.push(confirm_row());
    lines.push(Line::from(""));

    let rect = centered_rect(42, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Paragraph::new(lines).block(block), rect);
}

fn draw_confirm_quit(f: &mut Frame, area: Rect, state: &SessionState) {
    let note = if state.is_fetching() {
        "   The pending fetch is dropped."
    } else {
        "   Nothing is saved."
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Quit?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(note),
        Line::from(""),
        confirm_row(),
        Line::from(""),
    ];

    let rect = centered_rect(40, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Paragraph::new(lines).block(block), rect);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Key Bindings",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   Options"),
        Line::from("   ↑/↓ Tab    Move between fields"),
        Line::from("   ←/→ +/-    Change value"),
        Line::from("   PgUp/PgDn  Change by 10"),
        Line::from("   Enter      Fetch questions and start"),
        Line::from(""),
        Line::from("   Quiz"),
        Line::from("   a-d 1-4    Pick an answer"),
        Line::from("   ↑/↓ Enter  Move cursor / pick"),
        Line::from("   ←/→        Previous/Next question"),
        Line::from("   Home/End   First/Last question"),
        Line::from("   Ctrl+S     Submit"),
        Line::from(""),
        Line::from("   Ctrl+Q     Quit"),
        Line::from("   ?          This help"),
        Line::from(""),
        Line::from(Span::styled(
            "        [Esc] Close",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let rect = centered_rect(46, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(lines).block(block), rect);
}
