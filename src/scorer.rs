use std::collections::HashMap;

use crate::model::{QuestionId, TriviaQuestion};

pub const NO_ANSWER: &str = "No answer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissedQuestion {
    pub question: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
}

impl MissedQuestion {
    pub fn user_answer_display(&self) -> &str {
        self.user_answer.as_deref().unwrap_or(NO_ANSWER)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
    pub score: usize,
    pub total: usize,
    /// Wrong or unanswered questions, in question order.
    pub missed: Vec<MissedQuestion>,
}

/// Count correct answers and collect the misses. Unanswered counts as wrong.
pub fn score(questions: &[TriviaQuestion], answers: &HashMap<QuestionId, String>) -> Scorecard {
    let mut card = Scorecard {
        total: questions.len(),
        ..Scorecard::default()
    };

    for q in questions {
        let given = answers.get(q.id());
        match given {
            Some(answer) if q.is_correct(answer) => card.score += 1,
            _ => card.missed.push(MissedQuestion {
                question: q.question().to_string(),
                user_answer: given.cloned(),
                correct_answer: q.correct_answer().to_string(),
            }),
        }
    }

    card
}
