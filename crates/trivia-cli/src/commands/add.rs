//! The `trivia add` command.

use anyhow::Result;

use trivia_core::service::NewQuestionRequest;

use super::Session;

pub async fn execute(
    session: &Session,
    question: Option<String>,
    answer: Option<String>,
    category: Option<i64>,
    difficulty: Option<i64>,
) -> Result<()> {
    let request = NewQuestionRequest {
        question,
        answer,
        category,
        difficulty,
    };
    let response = session.service.create_question(request).await?;
    session.warn_if_volatile("question created");
    session.emit(&response, || {
        let mut table = comfy_table::Table::new();
        table.set_header(vec!["Created"]);
        table.add_row(vec![response.created]);
        table
    })
}
