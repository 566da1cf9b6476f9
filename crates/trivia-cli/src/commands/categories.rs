//! The `trivia categories` command.

use anyhow::Result;

use super::{category_table, Session};

pub async fn execute(session: &Session) -> Result<()> {
    let response = session.service.list_categories().await?;
    session.emit(&response, || category_table(&response.categories))
}
