//! The `trivia init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("trivia.toml").exists() {
        println!("trivia.toml already exists, skipping.");
    } else {
        std::fs::write("trivia.toml", SAMPLE_CONFIG)?;
        println!("Created trivia.toml");
    }

    std::fs::create_dir_all("catalog")?;
    let catalog_path = Path::new("catalog/trivia.toml");
    if catalog_path.exists() {
        println!("catalog/trivia.toml already exists, skipping.");
    } else {
        std::fs::write(catalog_path, SAMPLE_CATALOG)?;
        println!("Created catalog/trivia.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: trivia validate");
    println!("  2. Run: trivia questions --page 1 --format table");
    println!("  3. Run: trivia play --category 1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# trivia configuration

questions_per_play = 5
default_format = "json"

[store]
type = "file"
path = "catalog/trivia.toml"
"#;

const SAMPLE_CATALOG: &str = r#"[[categories]]
id = 1
type = "Science"

[[categories]]
id = 2
type = "Art"

[[categories]]
id = 3
type = "Geography"

[[categories]]
id = 4
type = "History"

[[categories]]
id = 5
type = "Entertainment"

[[categories]]
id = 6
type = "Sports"

[[questions]]
id = 2
question = "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?"
answer = "Apollo 13"
category = 5
difficulty = 4

[[questions]]
id = 4
question = "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?"
answer = "Tom Cruise"
category = 5
difficulty = 4

[[questions]]
id = 5
question = "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?"
answer = "Maya Angelou"
category = 4
difficulty = 2

[[questions]]
id = 9
question = "What boxer's original name is Cassius Clay?"
answer = "Muhammad Ali"
category = 4
difficulty = 1

[[questions]]
id = 10
question = "Which is the only team to play in every soccer World Cup tournament?"
answer = "Brazil"
category = 6
difficulty = 3

[[questions]]
id = 13
question = "What is the largest lake in Africa?"
answer = "Lake Victoria"
category = 3
difficulty = 2

[[questions]]
id = 16
question = "Which Dutch graphic artist, initials M C, was a creator of optical illusions?"
answer = "Escher"
category = 2
difficulty = 1

[[questions]]
id = 20
question = "What is the heaviest organ in the human body?"
answer = "The Liver"
category = 1
difficulty = 4

[[questions]]
id = 21
question = "Who discovered penicillin?"
answer = "Alexander Fleming"
category = 1
difficulty = 3

[[questions]]
id = 22
question = "Hematology is a branch of medicine involving the study of what?"
answer = "Blood"
category = 1
difficulty = 4
"#;
