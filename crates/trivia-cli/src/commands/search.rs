//! The `trivia search` command.

use anyhow::Result;

use trivia_core::service::SearchRequest;

use super::{question_table, Session};

pub async fn execute(session: &Session, term: Option<String>) -> Result<()> {
    let request = SearchRequest { search_term: term };
    let response = session.service.search_questions(&request).await?;
    session.emit(&response, || question_table(&response.questions))
}
