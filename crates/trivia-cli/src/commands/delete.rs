//! The `trivia delete` command.

use anyhow::Result;

use super::Session;

pub async fn execute(session: &Session, id: i64) -> Result<()> {
    let response = session.service.delete_question(id).await?;
    session.warn_if_volatile("question deleted");
    session.emit(&response, || {
        let mut table = comfy_table::Table::new();
        table.set_header(vec!["Deleted"]);
        table.add_row(vec![response.deleted]);
        table
    })
}
