use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::html::decode_entities;

pub const MIN_QUESTION_COUNT: u32 = 1;
pub const MAX_QUESTION_COUNT: u32 = 50;
pub const MIN_TIMER_SECONDS: u32 = 10;
pub const MAX_TIMER_SECONDS: u32 = 60;
pub const TIMER_STEP_SECONDS: u32 = 5;

/// Category ids understood by the Open Trivia DB. Id 0 means "any".
pub const CATEGORIES: &[(u32, &str)] = &[
    (0, "Any Category"),
    (9, "General Knowledge"),
    (10, "Entertainment: Books"),
    (11, "Entertainment: Film"),
    (12, "Entertainment: Music"),
    (13, "Entertainment: Musicals & Theatres"),
    (14, "Entertainment: Television"),
    (15, "Entertainment: Video Games"),
    (16, "Entertainment: Board Games"),
    (17, "Science & Nature"),
    (18, "Science: Computers"),
    (19, "Science: Mathematics"),
    (20, "Mythology"),
    (21, "Sports"),
    (22, "Geography"),
    (23, "History"),
    (24, "Politics"),
    (25, "Art"),
    (26, "Celebrities"),
    (27, "Animals"),
    (28, "Vehicles"),
    (29, "Entertainment: Comics"),
    (30, "Science: Gadgets"),
    (31, "Entertainment: Japanese Anime & Manga"),
    (32, "Entertainment: Cartoon & Animations"),
];

pub fn category_name(id: u32) -> String {
    CATEGORIES
        .iter()
        .find(|(cid, _)| *cid == id)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("Category #{}", id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Value of the `difficulty` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum QuestionType {
    #[serde(rename = "multiple")]
    #[value(name = "multiple")]
    MultipleChoice,
    #[serde(rename = "boolean")]
    #[value(name = "boolean")]
    TrueFalse,
}

impl QuestionType {
    pub const ALL: [QuestionType; 2] = [QuestionType::MultipleChoice, QuestionType::TrueFalse];

    /// Value of the `type` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple",
            QuestionType::TrueFalse => "boolean",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::TrueFalse => "True / False",
        };
        f.write_str(label)
    }
}

/// Settings for one quiz round. The session freezes a copy when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOptions {
    pub question_count: u32,
    pub category: u32,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub timer_seconds: u32,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            question_count: 10,
            category: 0,
            difficulty: Difficulty::Medium,
            question_type: QuestionType::MultipleChoice,
            timer_seconds: 30,
        }
    }
}

impl QuizOptions {
    /// Pulls count and timer back into their valid ranges.
    pub fn clamped(mut self) -> Self {
        self.question_count = self
            .question_count
            .clamp(MIN_QUESTION_COUNT, MAX_QUESTION_COUNT);
        self.timer_seconds = self
            .timer_seconds
            .clamp(MIN_TIMER_SECONDS, MAX_TIMER_SECONDS);
        self
    }
}

/// One question as the provider sends it, with HTML entities still encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQuestion {
    pub category: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriviaResponse {
    pub response_code: u8,
    #[serde(default)]
    pub results: Vec<RawQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId(String);

impl QuestionId {
    fn derive(question: &str, correct_answer: &str, position: usize) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(question.as_bytes());
        hasher.update([0u8]);
        hasher.update(correct_answer.as_bytes());
        let digest = hasher.finalize();
        let short: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
        QuestionId(format!("{}-{}", short, position))
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A decoded question whose answer order is fixed when it is built.
///
/// Fields are private: nothing may reorder `answers` after construction,
/// otherwise the choices would jump around between redraws.
#[derive(Debug, Clone, PartialEq)]
pub struct TriviaQuestion {
    id: QuestionId,
    category: String,
    difficulty: String,
    question: String,
    correct_answer: String,
    answers: Vec<String>,
}

impl TriviaQuestion {
    pub fn from_raw(raw: RawQuestion, position: usize) -> Self {
        Self::from_raw_with_rng(raw, position, &mut rand::thread_rng())
    }

    pub fn from_raw_with_rng<R: Rng + ?Sized>(
        raw: RawQuestion,
        position: usize,
        rng: &mut R,
    ) -> Self {
        let question = decode_entities(&raw.question);
        let correct_answer = decode_entities(&raw.correct_answer);

        let mut answers: Vec<String> = raw
            .incorrect_answers
            .iter()
            .map(|a| decode_entities(a))
            .collect();
        answers.push(correct_answer.clone());
        answers.shuffle(rng);

        Self {
            id: QuestionId::derive(&question, &correct_answer, position),
            category: decode_entities(&raw.category),
            difficulty: decode_entities(&raw.difficulty),
            question,
            correct_answer,
            answers,
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}
