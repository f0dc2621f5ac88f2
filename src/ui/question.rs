use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::state::SessionState;

/// Wrap text to fit within `width` columns, breaking at word boundaries.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut result = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            result.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    if result.is_empty() {
        result.push(String::new());
    }
    result
}

pub fn draw_question(f: &mut Frame, area: Rect, state: &SessionState) {
    let Some(question) = state.current_question() else {
        let p = Paragraph::new("No questions").block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!("  {} · {}", question.category(), question.difficulty()),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    let wrap_width = (area.width as usize).saturating_sub(4);
    for (i, wline) in wrap_text(question.question(), wrap_width).into_iter().enumerate() {
        let prefix = if i == 0 {
            format!("{:>2}. ", state.current_question + 1)
        } else {
            "    ".to_string()
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", prefix, wline),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));

    let selected = state.selected_answer(state.current_question);
    for (i, answer) in question.answers().iter().enumerate() {
        let is_selected = selected == Some(answer.as_str());
        let is_cursor = i == state.choice_cursor;
        let letter = (b'A' + i as u8) as char;

        let radio = if is_selected { "(●)" } else { "( )" };
        let cursor = if is_cursor { "▸" } else { " " };

        let mut style = if is_selected {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        if is_cursor {
            style = style.add_modifier(Modifier::BOLD);
        }

        // Prefix: " ▸ (●) A. "
        let prefix = format!(" {} {} {}. ", cursor, radio, letter);
        let prefix_len = prefix.chars().count();
        let text_width = (area.width as usize).saturating_sub(prefix_len + 1);
        for (li, wline) in wrap_text(answer, text_width).into_iter().enumerate() {
            if li == 0 {
                lines.push(Line::from(vec![
                    Span::styled(prefix.clone(), style),
                    Span::styled(wline, style),
                ]));
            } else {
                lines.push(Line::from(vec![
                    Span::raw(" ".repeat(prefix_len)),
                    Span::styled(wline, style),
                ]));
            }
        }
    }

    let block = Block::default().borders(Borders::NONE);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn empty_text_yields_one_blank_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
