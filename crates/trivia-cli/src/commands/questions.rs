//! The `trivia questions` command.

use anyhow::Result;

use trivia_core::PageNumber;

use super::{category_table, question_table, OutputFormat, Session};

pub async fn execute(session: &Session, page: Option<String>) -> Result<()> {
    let page = PageNumber::parse(page.as_deref());
    let response = session.service.list_questions(page).await?;
    if session.format == OutputFormat::Table {
        println!("{}", question_table(&response.questions));
        println!(
            "Page {page} of {} ({} questions)",
            trivia_core::pagination::page_count(response.total_questions),
            response.total_questions
        );
        println!("{}", category_table(&response.categories));
        return Ok(());
    }
    session.emit(&response, || question_table(&response.questions))
}
