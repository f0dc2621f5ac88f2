use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum TimerEvent {
    Tick,
}

/// Sends a `Tick` every second until the receiver is dropped.
pub fn spawn_ticker() -> mpsc::Receiver<TimerEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
        thread::sleep(Duration::from_secs(1));
        if tx.send(TimerEvent::Tick).is_err() {
            break;
        }
    });

    rx
}

pub fn format_countdown(total_secs: i64) -> String {
    if total_secs <= 0 {
        return "0s".to_string();
    }
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
