use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::fetch::{self, FetchEvent};
use crate::provider::TriviaProvider;
use crate::state::*;
use crate::timer::TimerEvent;

type SharedProvider = Arc<dyn TriviaProvider + Send + Sync>;

pub fn run_tui(
    mut state: SessionState,
    provider: SharedProvider,
    timer_rx: mpsc::Receiver<TimerEvent>,
) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let (fetch_tx, fetch_rx) = mpsc::channel::<FetchEvent>();

    let result = main_loop(
        &mut terminal,
        &mut state,
        &provider,
        &timer_rx,
        &fetch_rx,
        &fetch_tx,
    );

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut SessionState,
    provider: &SharedProvider,
    timer_rx: &mpsc::Receiver<TimerEvent>,
    fetch_rx: &mpsc::Receiver<FetchEvent>,
    fetch_tx: &mpsc::Sender<FetchEvent>,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|f| crate::ui::draw(f, state))
            .map_err(|e| format!("Draw error: {}", e))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100)).map_err(|e| format!("Poll error: {}", e))? {
            if let Event::Key(key) = event::read().map_err(|e| format!("Read error: {}", e))? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, state, provider, fetch_tx);
                }
            }
        }

        while let Ok(TimerEvent::Tick) = timer_rx.try_recv() {
            state.tick(Utc::now());
        }

        // Fetch replies are applied here, on the same thread as every other mutation.
        while let Ok(ev) = fetch_rx.try_recv() {
            state.apply_fetch(ev, Utc::now());
        }
    }

    Ok(())
}

fn handle_key(
    key: KeyEvent,
    state: &mut SessionState,
    provider: &SharedProvider,
    fetch_tx: &mpsc::Sender<FetchEvent>,
) {
    if state.has_dialog() {
        handle_dialog_key(key, state);
        return;
    }

    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.push_dialog(Dialog::ConfirmQuit);
        return;
    }

    match state.screen {
        Screen::Options => handle_options_key(key, state, provider, fetch_tx),
        Screen::Quiz => handle_quiz_key(key, state),
        Screen::Results { .. } => handle_results_key(key, state),
    }
}

fn handle_options_key(
    key: KeyEvent,
    state: &mut SessionState,
    provider: &SharedProvider,
    fetch_tx: &mpsc::Sender<FetchEvent>,
) {
    if state.is_fetching() {
        if key.code == KeyCode::Esc {
            state.cancel_fetch();
        }
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::BackTab => {
            state.option_field = state.option_field.prev();
        }
        KeyCode::Down | KeyCode::Tab => {
            state.option_field = state.option_field.next();
        }
        KeyCode::Left | KeyCode::Char('-') => state.adjust_option(-1),
        KeyCode::Right | KeyCode::Char('+') => state.adjust_option(1),
        KeyCode::PageDown => state.adjust_option(-10),
        KeyCode::PageUp => state.adjust_option(10),
        KeyCode::Enter => start_fetch(state, provider, fetch_tx),
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        KeyCode::Char('q') | KeyCode::Esc => state.push_dialog(Dialog::ConfirmQuit),
        _ => {}
    }
}

fn start_fetch(
    state: &mut SessionState,
    provider: &SharedProvider,
    fetch_tx: &mpsc::Sender<FetchEvent>,
) {
    if let Some(ticket) = state.begin_fetch() {
        fetch::spawn_fetch(provider.clone(), ticket, fetch_tx.clone());
    }
}

fn handle_quiz_key(key: KeyEvent, state: &mut SessionState) {
    let now = Utc::now();
    let choices = state.current_question().map_or(0, |q| q.answers().len());

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('s') {
            state.push_dialog(Dialog::ConfirmSubmit);
        }
        return;
    }

    match key.code {
        KeyCode::Left => state.prev_question(now),
        KeyCode::Right => state.next_question(now),
        KeyCode::Up => {
            state.choice_cursor = state.choice_cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            if state.choice_cursor + 1 < choices {
                state.choice_cursor += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            state.select_choice(state.choice_cursor);
        }
        KeyCode::Home => state.navigate_to(0, now),
        KeyCode::End => {
            let total = state.questions.len();
            if total > 0 {
                state.navigate_to(total - 1, now);
            }
        }
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        KeyCode::Char(c) if c.is_ascii_lowercase() => {
            let idx = (c as u8 - b'a') as usize;
            if idx < choices {
                state.select_choice(idx);
            }
        }
        KeyCode::Char(c) if ('1'..='9').contains(&c) => {
            let idx = (c as u8 - b'1') as usize;
            if idx < choices {
                state.select_choice(idx);
            }
        }
        _ => {}
    }
}

fn handle_results_key(key: KeyEvent, state: &mut SessionState) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('r') => state.play_again(),
        KeyCode::Up => state.scroll_review(-1),
        KeyCode::Down => state.scroll_review(1),
        KeyCode::Char('q') | KeyCode::Esc => state.push_dialog(Dialog::ConfirmQuit),
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        _ => {}
    }
}

fn handle_dialog_key(key: KeyEvent, state: &mut SessionState) {
    let dialog = state.top_dialog().cloned();
    match dialog {
        Some(Dialog::ConfirmSubmit) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                state.submit();
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::ConfirmQuit) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                state.cancel_fetch();
                state.should_quit = true;
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::Help) => match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => {
                state.pop_dialog();
            }
            _ => {}
        },
        None => {}
    }
}
