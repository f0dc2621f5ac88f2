use clap::Parser;

use crate::model::{Difficulty, QuestionType};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "triviaterm", version, about = "Terminal trivia quiz")]
pub struct Cli {
    /// Number of questions (1-50)
    #[arg(long, short = 'n', value_name = "N")]
    pub count: Option<u32>,

    /// Category id, 0 for any (see --list-categories)
    #[arg(long, short = 'c', value_name = "ID")]
    pub category: Option<u32>,

    /// Question difficulty
    #[arg(long, short = 'd', value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Question type
    #[arg(long = "type", short = 't', value_enum)]
    pub question_type: Option<QuestionType>,

    /// Seconds allowed per question (10-60)
    #[arg(long, value_name = "SECS")]
    pub timer: Option<u32>,

    /// Trivia API endpoint [default: https://opentdb.com/api.php]
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Config file [default: <config dir>/triviaterm/config.yaml]
    #[arg(long, value_name = "path")]
    pub config: Option<String>,

    /// Print the category table and exit
    #[arg(long)]
    pub list_categories: bool,
}
