//! The `trivia play` command.
//!
//! Acts as the quiz-session owner: draws one question per round and feeds each
//! served id back into the next request, stopping early once the pool runs dry.

use anyhow::Result;
use serde::Serialize;

use trivia_core::{FormattedQuestion, QuestionId, QuizRequest};

use super::{question_table, OutputFormat, Session};

#[derive(Debug, Serialize)]
struct PlayResponse {
    success: bool,
    questions: Vec<FormattedQuestion>,
    previous_questions: Vec<QuestionId>,
    exhausted: bool,
}

pub async fn execute(
    session: &Session,
    category: Option<i64>,
    previous: Vec<i64>,
    rounds: Option<usize>,
) -> Result<()> {
    let rounds = rounds.unwrap_or(session.questions_per_play);
    anyhow::ensure!(rounds >= 1, "--rounds must be at least 1");

    let mut request = QuizRequest::new(category, previous);
    let mut served = Vec::with_capacity(rounds);
    let mut exhausted = false;

    for round in 1..=rounds {
        match session.service.next_quiz_question(&request).await?.question {
            Some(question) => {
                tracing::debug!(round, id = question.id, "question served");
                request.mark_served(question.id);
                served.push(question);
            }
            None => {
                exhausted = true;
                break;
            }
        }
    }

    let response = PlayResponse {
        success: true,
        questions: served,
        previous_questions: request.previous_questions.iter().copied().collect(),
        exhausted,
    };

    if session.format == OutputFormat::Table {
        println!("{}", question_table(&response.questions));
        if response.exhausted {
            println!("No more questions available.");
        }
        return Ok(());
    }
    session.emit(&response, || question_table(&response.questions))
}
