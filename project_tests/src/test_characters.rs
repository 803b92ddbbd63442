//! # Characters Live Data Test
//!
//! Runs a short tour of the live API through lib_marvel: look a character up
//! by name, fetch it again by ID, then list a page of the comics it appears
//! in. Keys are read from the environment (or `.env`) like any other client.

use anyhow::{bail, Context, Result};
use lib_marvel::{
    init_logging, CharacterParams, Client, ComicParams, LoggingOptions, MarvelConfig, MarvelError,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logging(&LoggingOptions {
        level: "lib_marvel=debug,info".to_string(),
        ..LoggingOptions::default()
    })?;

    let config = MarvelConfig::from_env().context("MARVEL_PUBLIC_KEY must be set")?;
    let client = Client::from_config(&config)?;

    println!("[*] Searching for Spider-Man...");
    let found = client
        .characters
        .all_wrapped(&CharacterParams {
            name: Some("Spider-Man".to_string()),
            ..CharacterParams::default()
        })
        .await?;
    println!("[INFO] {}", found.envelope.attribution_text);

    let Some(spidey) = found.results().first() else {
        bail!("no character named Spider-Man");
    };
    println!("[SUCCESS] {} (id {})", spidey.name, spidey.id);

    let again = client.characters.get(spidey.id).await?;
    assert_eq!(again.id, spidey.id);
    println!("[SUCCESS] Modified: {}", again.modified);

    let comics = client
        .characters
        .comics(
            spidey.id,
            &ComicParams {
                limit: Some(5),
                ..ComicParams::default()
            },
        )
        .await?;
    println!("[SUCCESS] First {} comics:", comics.len());
    for comic in &comics {
        println!("  - {} ({})", comic.title, comic.id);
    }

    // An invalid ordering is rejected inside a well-formed body.
    let rejected = client
        .characters
        .all(&CharacterParams {
            order_by: Some("superpower".to_string()),
            ..CharacterParams::default()
        })
        .await;
    match rejected {
        Err(MarvelError::Api(err)) => println!("[SUCCESS] Usage error surfaced: {}", err),
        Err(e) => bail!("unexpected error kind: {}", e),
        Ok(_) => bail!("invalid orderBy was accepted"),
    }

    Ok(())
}
