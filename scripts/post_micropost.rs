//! Micropost Posting Script
//!
//! This script posts a micropost directly against DATABASE_URL from the
//! terminal. It prompts for the author's username (creating the user on
//! first use) and the content, then reports the derived reply edges.

use std::io::{self, Write};

use chrono::Utc;

use microfeed::db::{ensure_schema, get_db_pool};
use microfeed::micropost::{create_micropost, mentioned_user_ids, MAX_CONTENT_CHARS};
use microfeed::users::{create_user, resolve_username};

fn prompt(label: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    println!("🪶 Micropost Posting Tool");
    println!("=========================");

    let pool = get_db_pool().await?;
    ensure_schema(&pool).await?;

    // Get the author from the user
    let username = prompt("👤 Enter your username: ")?;
    if username.is_empty() {
        println!("❌ Username cannot be empty!");
        return Err("Username is required".into());
    }

    let author_id = match resolve_username(&pool, &username).await? {
        Some(id) => id,
        None => {
            println!("🆕 Unknown username, creating @{}", username);
            create_user(&pool, &username, &username).await?.id
        }
    };

    // Get the content from the user
    let content = prompt("📝 Enter your micropost: ")?;
    if content.is_empty() {
        println!("❌ Micropost cannot be empty!");
        return Err("Content is required".into());
    }

    if content.chars().count() > MAX_CONTENT_CHARS {
        println!(
            "❌ Micropost is too long! {} characters (max {})",
            content.chars().count(),
            MAX_CONTENT_CHARS
        );
        return Err("Micropost exceeds the character limit".into());
    }

    println!("📏 Micropost length: {} characters", content.chars().count());

    // Post the micropost
    println!("\n🚀 Posting your micropost...");
    match create_micropost(&pool, Some(author_id), &content, Utc::now()).await {
        Ok(micropost) => {
            println!("\n🎉 Success! Micropost {} has been posted.", micropost.id);
            let targets = mentioned_user_ids(&pool, micropost.id).await?;
            if targets.is_empty() {
                println!("📭 No resolved mentions in this post.");
            } else {
                println!("📬 Addressed user ids: {:?}", targets);
            }
        }
        Err(e) => {
            println!("\n💥 Failed to post micropost: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
