use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub titlebar: Rect,
    pub body: Rect,
    pub statusbar: Rect,
    pub keybar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // titlebar
            Constraint::Min(5),    // screen body
            Constraint::Length(1), // statusbar
            Constraint::Length(1), // keybar
        ])
        .split(area);

    AppLayout {
        titlebar: vertical[0],
        body: vertical[1],
        statusbar: vertical[2],
        keybar: vertical[3],
    }
}

/// Question list on the left, current question on the right.
pub fn split_quiz(body: Rect) -> (Rect, Rect) {
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // sidebar (cursor + icon + number)
            Constraint::Min(20),    // main content
        ])
        .split(body);
    (middle[0], middle[1])
}
