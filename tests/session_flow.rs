use std::fs;
use std::sync::{mpsc, Arc};

use chrono::{DateTime, Duration, TimeZone, Utc};

use triviaterm::fetch::{load_questions, spawn_fetch, FetchEvent};
use triviaterm::model::{
    QuizOptions, RawQuestion, TriviaQuestion, CATEGORIES, MAX_QUESTION_COUNT, MAX_TIMER_SECONDS,
    MIN_TIMER_SECONDS,
};
use triviaterm::provider::{parse_response, FetchError, TriviaProvider};
use triviaterm::state::{Dialog, OptionField, Screen, SessionState};

struct FixtureProvider(&'static str);

impl TriviaProvider for FixtureProvider {
    fn fetch(&self, _options: &QuizOptions) -> Result<Vec<RawQuestion>, FetchError> {
        let body = fs::read_to_string(format!("fixtures/{}", self.0)).expect("Cannot read fixture");
        parse_response(&body)
    }
}

struct UnreachableProvider;

impl TriviaProvider for UnreachableProvider {
    fn fetch(&self, _options: &QuizOptions) -> Result<Vec<RawQuestion>, FetchError> {
        Err(FetchError::Network("connection refused".to_string()))
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

fn fixture_questions(name: &'static str) -> Vec<TriviaQuestion> {
    load_questions(&FixtureProvider(name), &QuizOptions::default()).unwrap()
}

fn options_with_timer(secs: u32) -> QuizOptions {
    QuizOptions {
        timer_seconds: secs,
        ..QuizOptions::default()
    }
}

/// Drive a fresh session into the Quiz screen with the given fixture.
fn started_session(name: &'static str, timer: u32) -> SessionState {
    let mut state = SessionState::new(options_with_timer(timer));
    let ticket = state.begin_fetch().unwrap();
    let applied = state.apply_fetch(
        FetchEvent {
            request_id: ticket.request_id,
            options: ticket.options,
            result: Ok(fixture_questions(name)),
        },
        t0(),
    );
    assert!(applied);
    state
}

#[test]
fn test_initial_state() {
    let state = SessionState::new(QuizOptions::default());
    assert_eq!(state.screen, Screen::Options);
    assert!(state.questions.is_empty());
    assert!(state.answers.is_empty());
    assert!(!state.is_fetching());
}

#[test]
fn test_only_one_fetch_in_flight() {
    let mut state = SessionState::new(QuizOptions::default());
    let first = state.begin_fetch();
    assert!(first.is_some());
    assert!(state.is_fetching());
    assert!(state.begin_fetch().is_none());
}

#[test]
fn test_successful_fetch_enters_quiz() {
    let state = started_session("multiple.json", 30);
    assert_eq!(state.screen, Screen::Quiz);
    assert_eq!(state.questions.len(), 3);
    assert!(state.answers.is_empty());
    assert_eq!(state.current_question, 0);
    assert_eq!(state.active, Some(options_with_timer(30)));
    assert!(!state.is_fetching());
}

#[test]
fn test_active_options_come_from_ticket() {
    let mut state = SessionState::new(options_with_timer(30));
    let ticket = state.begin_fetch().unwrap();

    // Edits made while the request is in flight must not leak into the round
    state.draft.timer_seconds = 60;
    state.draft.question_count = 50;

    state.apply_fetch(
        FetchEvent {
            request_id: ticket.request_id,
            options: ticket.options,
            result: Ok(fixture_questions("multiple.json")),
        },
        t0(),
    );
    assert_eq!(state.screen, Screen::Quiz);
    assert_eq!(state.active, Some(ticket.options));
    assert_eq!(state.active, Some(options_with_timer(30)));
    assert_eq!(state.remaining_seconds, Some(30));
}

#[test]
fn test_background_fetch_reports_once() {
    let mut state = SessionState::new(options_with_timer(20));
    let ticket = state.begin_fetch().unwrap();
    let (tx, rx) = mpsc::channel();

    spawn_fetch(Arc::new(FixtureProvider("multiple.json")), ticket, tx)
        .join()
        .unwrap();

    let event = rx.try_recv().unwrap();
    assert_eq!(event.request_id, ticket.request_id);
    assert_eq!(event.options, ticket.options);
    assert!(rx.try_recv().is_err());

    assert!(state.apply_fetch(event, t0()));
    assert_eq!(state.screen, Screen::Quiz);
    assert_eq!(state.questions.len(), 3);
    assert_eq!(state.remaining_seconds, Some(20));
}

#[test]
fn test_background_fetch_failure_reports_once() {
    let mut state = SessionState::new(QuizOptions::default());
    let ticket = state.begin_fetch().unwrap();
    let (tx, rx) = mpsc::channel();

    spawn_fetch(Arc::new(UnreachableProvider), ticket, tx)
        .join()
        .unwrap();

    let event = rx.try_recv().unwrap();
    assert_eq!(event.request_id, ticket.request_id);
    assert!(event.result.is_err());
    assert!(rx.try_recv().is_err());

    assert!(state.apply_fetch(event, t0()));
    assert_eq!(state.screen, Screen::Options);
    assert!(state.questions.is_empty());
    assert!(!state.is_fetching());
    assert_eq!(
        state.last_error.as_deref(),
        Some("Network error: connection refused")
    );
}

#[test]
fn test_failed_fetch_stays_on_options() {
    let mut state = SessionState::new(QuizOptions::default());
    let ticket = state.begin_fetch().unwrap();

    state.apply_fetch(
        FetchEvent {
            request_id: ticket.request_id,
            options: ticket.options,
            result: Err(FetchError::Network("timed out".to_string())),
        },
        t0(),
    );

    assert_eq!(state.screen, Screen::Options);
    assert!(state.questions.is_empty());
    assert!(state.answers.is_empty());
    assert!(!state.is_fetching());
    assert_eq!(state.last_error.as_deref(), Some("Network error: timed out"));

    // The user can simply try again
    assert!(state.begin_fetch().is_some());
    assert!(state.last_error.is_none());
}

#[test]
fn test_malformed_response_leaves_questions_unchanged() {
    let mut state = SessionState::new(QuizOptions::default());
    let ticket = state.begin_fetch().unwrap();
    let result = load_questions(&FixtureProvider("malformed.json"), &ticket.options);
    assert!(result.is_err());

    state.apply_fetch(
        FetchEvent {
            request_id: ticket.request_id,
            options: ticket.options,
            result,
        },
        t0(),
    );
    assert_eq!(state.screen, Screen::Options);
    assert!(state.questions.is_empty());
}

#[test]
fn test_stale_fetch_result_is_ignored() {
    let mut state = SessionState::new(QuizOptions::default());
    let ticket = state.begin_fetch().unwrap();

    let applied = state.apply_fetch(
        FetchEvent {
            request_id: ticket.request_id + 100,
            options: ticket.options,
            result: Ok(fixture_questions("multiple.json")),
        },
        t0(),
    );
    assert!(!applied);
    assert_eq!(state.screen, Screen::Options);
    assert!(state.is_fetching());
}

#[test]
fn test_cancelled_fetch_result_is_ignored() {
    let mut state = SessionState::new(QuizOptions::default());
    let ticket = state.begin_fetch().unwrap();
    state.cancel_fetch();
    assert!(!state.is_fetching());

    let applied = state.apply_fetch(
        FetchEvent {
            request_id: ticket.request_id,
            options: ticket.options,
            result: Ok(fixture_questions("multiple.json")),
        },
        t0(),
    );
    assert!(!applied);
    assert_eq!(state.screen, Screen::Options);
    assert!(state.questions.is_empty());
}

#[test]
fn test_selecting_overwrites_previous_choice() {
    let mut state = started_session("multiple.json", 30);

    assert!(state.select_answer(0, "Computer"));
    assert_eq!(state.selected_answer(0), Some("Computer"));
    assert!(state.select_answer(0, "Central"));
    assert_eq!(state.selected_answer(0), Some("Central"));
    assert_eq!(state.answers.len(), 1);
    assert_eq!(state.screen, Screen::Quiz);
}

#[test]
fn test_invalid_selections_are_ignored() {
    let mut state = started_session("multiple.json", 30);

    assert!(!state.select_answer(7, "Central"));
    assert!(!state.select_answer(0, "Not a choice"));
    assert!(state.answers.is_empty());

    let mut idle = SessionState::new(QuizOptions::default());
    assert!(!idle.select_answer(0, "Central"));
}

#[test]
fn test_select_choice_uses_current_question() {
    let mut state = started_session("boolean.json", 30);
    state.next_question(t0());
    let second = state.questions[1].answers()[1].clone();
    assert!(state.select_choice(1));
    assert_eq!(state.selected_answer(1), Some(second.as_str()));
    assert_eq!(state.selected_answer(0), None);
    assert!(!state.select_choice(5));
}

#[test]
fn test_partial_submit_scores_unanswered_as_wrong() {
    let mut state = started_session("multiple.json", 30);
    state.select_answer(0, "Central");
    state.select_answer(2, "Lyon");

    let score = state.submit();
    assert_eq!(score, Some(1));
    assert_eq!(state.screen, Screen::Results { score: 1 });

    let card = state.scorecard();
    assert_eq!(card.missed.len(), 2);
    assert_eq!(card.missed[0].user_answer, None);
    assert_eq!(card.missed[1].user_answer.as_deref(), Some("Lyon"));
    assert_eq!(card.missed[1].correct_answer, "Paris");
}

#[test]
fn test_submit_only_from_quiz() {
    let mut state = SessionState::new(QuizOptions::default());
    assert_eq!(state.submit(), None);
    assert_eq!(state.screen, Screen::Options);
}

#[test]
fn test_play_again_resets_round() {
    let mut state = started_session("multiple.json", 30);
    state.select_answer(0, "Central");
    state.select_answer(1, "Titanic");
    state.submit();

    state.play_again();
    assert_eq!(state.screen, Screen::Options);
    assert!(state.questions.is_empty());
    assert!(state.answers.is_empty());
    assert!(state.active.is_none());
    // Last-used options stay in the draft
    assert_eq!(state.draft, options_with_timer(30));

    // Next round starts clean
    let ticket = state.begin_fetch().unwrap();
    state.apply_fetch(
        FetchEvent {
            request_id: ticket.request_id,
            options: ticket.options,
            result: Ok(fixture_questions("boolean.json")),
        },
        t0(),
    );
    assert_eq!(state.screen, Screen::Quiz);
    assert_eq!(state.questions.len(), 2);
    assert!(state.answers.is_empty());
    assert_eq!(state.selected_answer(0), None);
    assert_eq!(state.selected_answer(1), None);
}

#[test]
fn test_play_again_only_from_results() {
    let mut state = started_session("multiple.json", 30);
    state.play_again();
    assert_eq!(state.screen, Screen::Quiz);
    assert_eq!(state.questions.len(), 3);
}

#[test]
fn test_zero_question_quiz_can_be_submitted() {
    let mut state = SessionState::new(QuizOptions::default());
    let ticket = state.begin_fetch().unwrap();
    state.apply_fetch(
        FetchEvent {
            request_id: ticket.request_id,
            options: ticket.options,
            result: Ok(Vec::new()),
        },
        t0(),
    );
    assert_eq!(state.screen, Screen::Quiz);
    assert_eq!(state.tick(t0() + Duration::seconds(120)), None);
    assert_eq!(state.submit(), Some(0));
    assert_eq!(state.screen, Screen::Results { score: 0 });
}

#[test]
fn test_timer_counts_down_and_advances() {
    let mut state = started_session("multiple.json", 10);
    assert_eq!(state.remaining_seconds, Some(10));

    assert_eq!(state.tick(t0() + Duration::seconds(4)), Some(6));
    assert_eq!(state.current_question, 0);

    // Expiry moves on and restarts the clock
    let expired_at = t0() + Duration::seconds(10);
    assert_eq!(state.tick(expired_at), Some(10));
    assert_eq!(state.current_question, 1);
    assert_eq!(state.screen, Screen::Quiz);
}

#[test]
fn test_timer_expiry_on_last_question_submits() {
    let mut state = started_session("boolean.json", 10);
    state.select_answer(0, "True");
    state.navigate_to(1, t0());

    state.tick(t0() + Duration::seconds(11));
    assert_eq!(state.screen, Screen::Results { score: 1 });
    assert_eq!(state.remaining_seconds, None);
    assert_eq!(state.tick(t0() + Duration::seconds(30)), None);
}

#[test]
fn test_timer_expiry_closes_open_dialogs() {
    let mut state = started_session("boolean.json", 10);
    state.navigate_to(1, t0());
    state.push_dialog(Dialog::ConfirmSubmit);
    state.push_dialog(Dialog::Help);

    state.tick(t0() + Duration::seconds(10));
    assert_eq!(state.screen, Screen::Results { score: 0 });
    assert!(!state.has_dialog());
}

#[test]
fn test_review_scroll_stays_within_missed() {
    let mut state = started_session("multiple.json", 30);
    state.select_answer(0, "Central");
    state.submit();
    assert_eq!(state.scorecard().missed.len(), 2);

    for _ in 0..10 {
        state.scroll_review(1);
    }
    assert_eq!(state.review_scroll, 1);

    // One press back is enough to move again
    state.scroll_review(-1);
    assert_eq!(state.review_scroll, 0);
    state.scroll_review(-1);
    assert_eq!(state.review_scroll, 0);
}

#[test]
fn test_review_scroll_with_nothing_missed() {
    let mut state = started_session("multiple.json", 30);
    state.select_answer(0, "Central");
    state.select_answer(1, "Titanic");
    state.select_answer(2, "Paris");
    state.submit();
    assert_eq!(state.screen, Screen::Results { score: 3 });

    state.scroll_review(5);
    assert_eq!(state.review_scroll, 0);
}

#[test]
fn test_navigation_restores_choice_cursor() {
    let mut state = started_session("boolean.json", 30);
    let second = state.questions[0].answers()[1].clone();
    state.select_answer(0, &second);
    state.next_question(t0());
    assert_eq!(state.choice_cursor, 0);
    state.prev_question(t0());
    assert_eq!(state.current_question, 0);
    assert_eq!(state.choice_cursor, 1);

    // Out of range is a no-op
    state.navigate_to(9, t0());
    assert_eq!(state.current_question, 0);
}

#[test]
fn test_option_adjustments_stay_in_range() {
    let mut state = SessionState::new(QuizOptions {
        question_count: MAX_QUESTION_COUNT,
        timer_seconds: MAX_TIMER_SECONDS,
        ..QuizOptions::default()
    });

    state.option_field = OptionField::Count;
    state.adjust_option(1);
    assert_eq!(state.draft.question_count, MAX_QUESTION_COUNT);
    state.adjust_option(-100);
    assert_eq!(state.draft.question_count, 1);

    state.option_field = OptionField::Timer;
    state.adjust_option(1);
    assert_eq!(state.draft.timer_seconds, MAX_TIMER_SECONDS);
    state.adjust_option(-1);
    assert_eq!(state.draft.timer_seconds, MAX_TIMER_SECONDS - 5);
    state.adjust_option(-100);
    assert_eq!(state.draft.timer_seconds, MIN_TIMER_SECONDS);

    state.option_field = OptionField::Category;
    state.adjust_option(-1);
    assert_eq!(state.draft.category, CATEGORIES[CATEGORIES.len() - 1].0);
    state.adjust_option(1);
    assert_eq!(state.draft.category, 0);
}

#[test]
fn test_options_locked_while_fetching() {
    let mut state = SessionState::new(QuizOptions::default());
    state.begin_fetch();
    state.option_field = OptionField::Count;
    state.adjust_option(5);
    assert_eq!(state.draft.question_count, QuizOptions::default().question_count);
}

#[test]
fn test_option_field_cycle() {
    assert_eq!(OptionField::Count.prev(), OptionField::Start);
    assert_eq!(OptionField::Start.next(), OptionField::Count);
    assert_eq!(OptionField::Difficulty.next(), OptionField::Type);
}
