use std::io::Write;

use anyhow::Result;
use grocer_assistant::Reply;
use grocer_shared::MealPlan;
use tokio::io::{AsyncBufReadExt, BufReader};
use ulid::Ulid;

const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn print_reply(reply: &Reply) {
    println!("{}", reply.message);

    match &reply.meal_plan {
        Some(MealPlan::Planned(recipes)) => {
            for recipe in recipes {
                println!("  * {} ({})", recipe.name, recipe.cooking_time);
                for ingredient in recipe.missing() {
                    match &ingredient.substitution {
                        Some(sub) => println!("      missing {} (or use {sub})", ingredient.name),
                        None => println!("      missing {}", ingredient.name),
                    }
                }
            }
        }
        Some(MealPlan::Fetched(recipes)) => {
            for recipe in recipes {
                println!("  * {}", recipe.name);
            }
        }
        None => {}
    }

    if let Some(list) = reply.shopping_list.as_ref().filter(|list| !list.is_empty()) {
        println!("Shopping list:");
        for item in list {
            println!("  - {} x{}", item.name, item.needed);
        }
    }
}

/// Interactive conversation over stdin, one message per line
pub async fn chat(config: crate::config::Config, session: Option<String>) -> Result<()> {
    let pool =
        crate::db::create_pool(&config.database.url, config.database.max_connections).await?;
    crate::db::run_migrations(&pool).await?;

    let assistant = crate::build_assistant(&config, pool.clone())?;
    let session_id = session.unwrap_or_else(|| Ulid::new().to_string());

    println!("Grocer Genie (session {session_id}). Type \"exit\" to leave.");
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();

        if EXIT_WORDS.contains(&message.to_lowercase().as_str()) {
            break;
        }

        if !message.is_empty() {
            match assistant.handle_message(&session_id, message).await {
                Ok(reply) => print_reply(&reply),
                Err(e) => {
                    tracing::error!(err = %e, "failed to handle message");
                    println!("Sorry, something went wrong. Please try again.");
                }
            }
        }

        prompt()?;
    }

    pool.close().await;

    Ok(())
}
