//! The `trivia category-questions` command.

use anyhow::Result;

use super::{question_table, Session};

pub async fn execute(session: &Session, category: i64) -> Result<()> {
    let response = session.service.questions_by_category(category).await?;
    session.emit(&response, || question_table(&response.questions))
}
