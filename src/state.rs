use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::fetch::{FetchEvent, FetchTicket};
use crate::model::*;
use crate::scorer::{self, Scorecard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Options,
    Quiz,
    Results { score: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmSubmit,
    ConfirmQuit,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionField {
    Count,
    Category,
    Difficulty,
    Type,
    Timer,
    Start,
}

impl OptionField {
    pub const ALL: [OptionField; 6] = [
        OptionField::Count,
        OptionField::Category,
        OptionField::Difficulty,
        OptionField::Type,
        OptionField::Timer,
        OptionField::Start,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub screen: Screen,
    /// Options being edited on the Options screen.
    pub draft: QuizOptions,
    /// Options the current questions were fetched with.
    pub active: Option<QuizOptions>,
    pub questions: Vec<TriviaQuestion>,
    pub answers: HashMap<QuestionId, String>,
    pub pending_fetch: Option<u64>,
    pub last_error: Option<String>,
    pub current_question: usize,
    pub deadline: Option<DateTime<Utc>>,
    pub remaining_seconds: Option<i64>,
    pub option_field: OptionField,
    pub choice_cursor: usize,
    /// Index of the first missed question shown on the Results screen.
    pub review_scroll: usize,
    pub dialog_stack: Vec<Dialog>,
    pub should_quit: bool,
    next_request_id: u64,
}

impl SessionState {
    pub fn new(draft: QuizOptions) -> Self {
        Self {
            screen: Screen::Options,
            draft: draft.clamped(),
            active: None,
            questions: Vec::new(),
            answers: HashMap::new(),
            pending_fetch: None,
            last_error: None,
            current_question: 0,
            deadline: None,
            remaining_seconds: None,
            option_field: OptionField::Count,
            choice_cursor: 0,
            review_scroll: 0,
            dialog_stack: Vec::new(),
            should_quit: false,
            next_request_id: 1,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.pending_fetch.is_some()
    }

    /// Freeze the draft for a new request. `None` when not on the Options
    /// screen or when a request is already in flight.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.screen != Screen::Options || self.is_fetching() {
            return None;
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.pending_fetch = Some(request_id);
        self.last_error = None;

        Some(FetchTicket {
            request_id,
            options: self.draft.clamped(),
        })
    }

    /// Forget the in-flight request so its reply is dropped.
    pub fn cancel_fetch(&mut self) {
        if let Some(id) = self.pending_fetch.take() {
            tracing::info!(request_id = id, "fetch abandoned");
        }
    }

    /// Apply a fetch reply. Returns false when the reply is stale and was ignored.
    pub fn apply_fetch(&mut self, event: FetchEvent, now: DateTime<Utc>) -> bool {
        if self.screen != Screen::Options || self.pending_fetch != Some(event.request_id) {
            tracing::debug!(request_id = event.request_id, "ignoring stale fetch result");
            return false;
        }
        self.pending_fetch = None;

        match event.result {
            Ok(questions) => {
                self.questions = questions;
                self.answers.clear();
                self.active = Some(event.options);
                self.screen = Screen::Quiz;
                self.last_error = None;
                self.review_scroll = 0;
                self.enter_question(0, now);
            }
            Err(e) => {
                tracing::warn!(error = %e, "quiz did not start");
                self.last_error = Some(e.to_string());
            }
        }
        true
    }

    pub fn current_question(&self) -> Option<&TriviaQuestion> {
        self.questions.get(self.current_question)
    }

    /// Record `answer` for the question at `index`, replacing any earlier pick.
    /// Answers that are not among the question's choices are ignored.
    pub fn select_answer(&mut self, index: usize, answer: &str) -> bool {
        if self.screen != Screen::Quiz {
            return false;
        }
        let Some(q) = self.questions.get(index) else {
            return false;
        };
        if !q.answers().iter().any(|a| a == answer) {
            return false;
        }
        self.answers.insert(q.id().clone(), answer.to_string());
        true
    }

    /// Select the choice at `choice` of the question being viewed.
    pub fn select_choice(&mut self, choice: usize) -> bool {
        let answer = self
            .current_question()
            .and_then(|q| q.answers().get(choice))
            .cloned();
        match answer {
            Some(a) => {
                self.choice_cursor = choice;
                self.select_answer(self.current_question, &a)
            }
            None => false,
        }
    }

    pub fn selected_answer(&self, index: usize) -> Option<&str> {
        let q = self.questions.get(index)?;
        self.answers.get(q.id()).map(|s| s.as_str())
    }

    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.contains_key(q.id()))
            .count()
    }

    pub fn unanswered_count(&self) -> usize {
        self.questions.len() - self.answered_count()
    }

    pub fn navigate_to(&mut self, idx: usize, now: DateTime<Utc>) {
        if self.screen == Screen::Quiz && idx < self.questions.len() && idx != self.current_question {
            self.enter_question(idx, now);
        }
    }

    pub fn next_question(&mut self, now: DateTime<Utc>) {
        self.navigate_to(self.current_question + 1, now);
    }

    pub fn prev_question(&mut self, now: DateTime<Utc>) {
        if self.current_question > 0 {
            self.navigate_to(self.current_question - 1, now);
        }
    }

    fn enter_question(&mut self, idx: usize, now: DateTime<Utc>) {
        self.current_question = idx;
        self.choice_cursor = self
            .selected_answer(idx)
            .and_then(|sel| {
                self.questions[idx]
                    .answers()
                    .iter()
                    .position(|a| a == sel)
            })
            .unwrap_or(0);

        let secs = self.active.map(|o| o.timer_seconds).unwrap_or(0);
        if self.questions.is_empty() || secs == 0 {
            self.deadline = None;
            self.remaining_seconds = None;
        } else {
            self.deadline = Some(now + Duration::seconds(secs as i64));
            self.remaining_seconds = Some(secs as i64);
        }
    }

    /// Advance the question timer. When it runs out the quiz moves on to the
    /// next question, and the last question's expiry submits the quiz.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<i64> {
        if self.screen != Screen::Quiz {
            return None;
        }
        let deadline = self.deadline?;
        // Round up so the display never shows 0s while time is left
        let millis = deadline.signed_duration_since(now).num_milliseconds().max(0);
        let remaining = (millis + 999) / 1000;
        self.remaining_seconds = Some(remaining);

        if remaining == 0 {
            tracing::debug!(question = self.current_question, "question timer expired");
            if self.current_question + 1 < self.questions.len() {
                self.enter_question(self.current_question + 1, now);
            } else {
                // Nothing opened during the quiz applies to the results
                self.dialog_stack.clear();
                self.submit();
            }
        }
        self.remaining_seconds
    }

    /// Finish the round. Unanswered questions count as wrong.
    pub fn submit(&mut self) -> Option<usize> {
        if self.screen != Screen::Quiz {
            return None;
        }
        let card = self.scorecard();
        tracing::info!(score = card.score, total = card.total, "quiz submitted");
        self.screen = Screen::Results { score: card.score };
        self.deadline = None;
        self.remaining_seconds = None;
        self.review_scroll = 0;
        Some(card.score)
    }

    pub fn scorecard(&self) -> Scorecard {
        scorer::score(&self.questions, &self.answers)
    }

    /// Move the missed-question review by `delta` entries, keeping at least
    /// the last entry on screen.
    pub fn scroll_review(&mut self, delta: i32) {
        if !matches!(self.screen, Screen::Results { .. }) {
            return;
        }
        let last = self.scorecard().missed.len().saturating_sub(1);
        self.review_scroll = (self.review_scroll as i64 + delta as i64).clamp(0, last as i64) as usize;
    }

    /// Back to Options with an empty round. The draft keeps its last values.
    pub fn play_again(&mut self) {
        if !matches!(self.screen, Screen::Results { .. }) {
            return;
        }
        self.questions.clear();
        self.answers.clear();
        self.active = None;
        self.current_question = 0;
        self.choice_cursor = 0;
        self.deadline = None;
        self.remaining_seconds = None;
        self.review_scroll = 0;
        self.option_field = OptionField::Start;
        self.screen = Screen::Options;
    }

    pub fn adjust_option(&mut self, delta: i32) {
        if self.screen != Screen::Options || self.is_fetching() {
            return;
        }
        let d = &mut self.draft;
        match self.option_field {
            OptionField::Count => {
                d.question_count = step_clamped(
                    d.question_count,
                    delta,
                    MIN_QUESTION_COUNT,
                    MAX_QUESTION_COUNT,
                );
            }
            OptionField::Category => {
                let pos = CATEGORIES
                    .iter()
                    .position(|(id, _)| *id == d.category)
                    .unwrap_or(0);
                d.category = CATEGORIES[cycle(pos, delta, CATEGORIES.len())].0;
            }
            OptionField::Difficulty => {
                let pos = Difficulty::ALL
                    .iter()
                    .position(|x| *x == d.difficulty)
                    .unwrap_or(0);
                d.difficulty = Difficulty::ALL[cycle(pos, delta, Difficulty::ALL.len())];
            }
            OptionField::Type => {
                let pos = QuestionType::ALL
                    .iter()
                    .position(|x| *x == d.question_type)
                    .unwrap_or(0);
                d.question_type = QuestionType::ALL[cycle(pos, delta, QuestionType::ALL.len())];
            }
            OptionField::Timer => {
                d.timer_seconds = step_clamped(
                    d.timer_seconds,
                    delta * TIMER_STEP_SECONDS as i32,
                    MIN_TIMER_SECONDS,
                    MAX_TIMER_SECONDS,
                );
            }
            OptionField::Start => {}
        }
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }
}

fn step_clamped(value: u32, delta: i32, min: u32, max: u32) -> u32 {
    (value as i64 + delta as i64).clamp(min as i64, max as i64) as u32
}

fn cycle(pos: usize, delta: i32, len: usize) -> usize {
    (pos as i64 + delta as i64).rem_euclid(len as i64) as usize
}
