//! The `trivia validate` command.

use std::path::Path;

use anyhow::Result;

use trivia_core::catalog::{load_catalog, validate_catalog};
use trivia_store::config::{load_config_from, StoreConfig};

pub fn execute(config_path: Option<&Path>, catalog_path: Option<&Path>) -> Result<()> {
    let path = match catalog_path {
        Some(p) => p.to_path_buf(),
        None => match load_config_from(config_path)?.store {
            StoreConfig::File { path } => path,
            StoreConfig::Memory { seed: Some(seed) } => seed,
            StoreConfig::Memory { seed: None } => {
                anyhow::bail!("no catalog to validate: pass --catalog or configure a store path")
            }
        },
    };

    let catalog = load_catalog(&path)?;
    println!(
        "Catalog: {} ({} categories, {} questions)",
        path.display(),
        catalog.categories.len(),
        catalog.questions.len()
    );

    let warnings = validate_catalog(&catalog);
    for w in &warnings {
        let prefix = w
            .question_id
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
