pub mod dialog;
pub mod keybar;
pub mod layout;
pub mod options;
pub mod question;
pub mod result;
pub mod sidebar;
pub mod statusbar;
pub mod titlebar;

use ratatui::Frame;

use crate::state::{Screen, SessionState};

pub fn draw(f: &mut Frame, state: &SessionState) {
    let area = f.area();
    let layout = layout::compute_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, state);

    match state.screen {
        Screen::Options => {
            options::draw_options(f, layout.body, state);
        }
        Screen::Quiz => {
            let (sidebar, main) = layout::split_quiz(layout.body);
            sidebar::draw_sidebar(f, sidebar, state);
            question::draw_question(f, main, state);
        }
        Screen::Results { score } => {
            result::draw_results(f, layout.body, state, score);
        }
    }

    statusbar::draw_statusbar(f, layout.statusbar, state);
    keybar::draw_keybar(f, layout.keybar, state);

    // Draw dialog overlay if any
    if state.has_dialog() {
        dialog::draw_dialog(f, area, state);
    }
}
