use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::model::{QuizOptions, TriviaQuestion};
use crate::provider::{FetchError, TriviaProvider};

/// Options frozen for one request, tagged so a late reply can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub request_id: u64,
    pub options: QuizOptions,
}

/// The reply to one `FetchTicket`, carrying the options it was issued with.
#[derive(Debug)]
pub struct FetchEvent {
    pub request_id: u64,
    pub options: QuizOptions,
    pub result: Result<Vec<TriviaQuestion>, FetchError>,
}

/// Fetch and decode a full batch. Either every question is built or none is.
pub fn load_questions(
    provider: &dyn TriviaProvider,
    options: &QuizOptions,
) -> Result<Vec<TriviaQuestion>, FetchError> {
    let raw = provider.fetch(options)?;
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(i, r)| TriviaQuestion::from_raw(r, i))
        .collect())
}

/// Run one fetch off the UI thread and report exactly one `FetchEvent`.
pub fn spawn_fetch(
    provider: Arc<dyn TriviaProvider + Send + Sync>,
    ticket: FetchTicket,
    tx: mpsc::Sender<FetchEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        tracing::info!(
            request_id = ticket.request_id,
            count = ticket.options.question_count,
            category = ticket.options.category,
            difficulty = ticket.options.difficulty.as_query(),
            kind = ticket.options.question_type.as_query(),
            "fetching questions"
        );

        let result = load_questions(provider.as_ref(), &ticket.options);
        match &result {
            Ok(questions) => {
                tracing::info!(request_id = ticket.request_id, received = questions.len(), "fetch complete")
            }
            Err(e) => tracing::warn!(request_id = ticket.request_id, error = %e, "fetch failed"),
        }

        // The receiver is gone if the user quit while we were waiting.
        let _ = tx.send(FetchEvent {
            request_id: ticket.request_id,
            options: ticket.options,
            result,
        });
    })
}
