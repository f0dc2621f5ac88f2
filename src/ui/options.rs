use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::model::category_name;
use crate::state::{OptionField, SessionState};

fn field_label(field: OptionField) -> &'static str {
    match field {
        OptionField::Count => "Questions",
        OptionField::Category => "Category",
        OptionField::Difficulty => "Difficulty",
        OptionField::Type => "Type",
        OptionField::Timer => "Timer",
        OptionField::Start => "",
    }
}

fn field_value(field: OptionField, state: &SessionState) -> String {
    let d = &state.draft;
    match field {
        OptionField::Count => d.question_count.to_string(),
        OptionField::Category => category_name(d.category),
        OptionField::Difficulty => d.difficulty.to_string(),
        OptionField::Type => d.question_type.to_string(),
        OptionField::Timer => format!("{}s per question", d.timer_seconds),
        OptionField::Start => String::new(),
    }
}

pub fn draw_options(f: &mut Frame, area: Rect, state: &SessionState) {
    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Set up your quiz",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let editable = !state.is_fetching();

    for field in OptionField::ALL {
        let focused = editable && state.option_field == field;

        if field == OptionField::Start {
            lines.push(Line::from(""));
            let (label, style) = if state.is_fetching() {
                ("  Loading…  ", Style::default().fg(Color::DarkGray))
            } else if focused {
                (
                    "[ Start Quiz ]",
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("[ Start Quiz ]", Style::default().fg(Color::Green))
            };
            lines.push(Line::from(Span::styled(label, style)));
            continue;
        }

        let value_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if editable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let (left, right) = if focused { ("◂ ", " ▸") } else { ("  ", "  ") };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>12}  ", field_label(field)),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(left, value_style),
            Span::styled(format!("{:<36}", field_value(field, state)), value_style),
            Span::styled(right, value_style),
        ]));
    }

    if let Some(err) = &state.last_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(Span::styled(
            "Press Enter to try again.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}
