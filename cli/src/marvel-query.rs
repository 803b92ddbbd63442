use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lib_marvel::{
    init_logging, CharacterParams, Client, ComicParams, ConfigOverrides, CreatorParams, EventParams, LoggingOptions,
    MarvelConfig, SeriesParams, StoryParams,
};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "marvel-query",
    version,
    about = "Query the Marvel Comics API and print the results as JSON"
)]
struct Args {
    /// Public API key
    #[arg(long, env = "MARVEL_PUBLIC_KEY", hide_env_values = true)]
    public_key: Option<String>,

    /// Private API key; omit to use client-side authentication
    #[arg(long, env = "MARVEL_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Base endpoint
    #[arg(long, env = "MARVEL_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "MARVEL_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// Write JSON logs to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Print the whole response envelope instead of the results only
    #[arg(long, global = true)]
    wrapped: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List entities of one kind
    List {
        kind: Kind,
        /// Name (or title) prefix filter
        #[arg(long)]
        starts_with: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Fetch one entity by ID
    Get { kind: Kind, id: u64 },
    /// List entities of kind `related` linked to entity `id` of kind `kind`
    Related {
        kind: Kind,
        id: u64,
        related: Kind,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Print the authenticated URL for a path without sending it
    Url { path: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Characters,
    Comics,
    Creators,
    Events,
    Series,
    Stories,
}

impl Kind {
    fn path(self) -> &'static str {
        match self {
            Kind::Characters => "characters",
            Kind::Comics => "comics",
            Kind::Creators => "creators",
            Kind::Events => "events",
            Kind::Series => "series",
            Kind::Stories => "stories",
        }
    }
}

/// Pagination shared by every entity endpoint.
#[derive(Serialize)]
struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _guard = init_logging(&LoggingOptions {
        level: "warn".to_string(),
        log_dir: args.log_dir.clone(),
        file_prefix: "marvel-query".to_string(),
        ..LoggingOptions::default()
    })
    .context("Failed to initialize logging")?;

    let config = MarvelConfig::load(ConfigOverrides {
        public_key: args.public_key.clone(),
        private_key: args.private_key.clone(),
        api_url: args.api_url.clone(),
        timeout_secs: args.timeout,
    })
    .context("Failed to load configuration")?;
    debug!(?config, "configuration loaded");

    let client = Client::from_config(&config).context("Failed to create client")?;

    let output = run(&client, args.command, args.wrapped).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

async fn run(client: &Client, command: Command, wrapped: bool) -> Result<Value> {
    match command {
        Command::List {
            kind,
            starts_with,
            limit,
            offset,
        } => list(client, kind, starts_with, limit, offset, wrapped).await,
        Command::Get { kind, id } => get(client, kind, id).await,
        Command::Related {
            kind,
            id,
            related,
            limit,
            offset,
        } => {
            let path = format!("{}/{}/{}", kind.path(), id, related.path());
            fetch(client, &path, &Page { limit, offset }, wrapped).await
        }
        Command::Url { path } => {
            let request = client.request(&path, &())?;
            Ok(Value::String(request.url().to_string()))
        }
    }
}

async fn list(
    client: &Client,
    kind: Kind,
    starts_with: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
    wrapped: bool,
) -> Result<Value> {
    let path = kind.path();
    match kind {
        Kind::Characters => {
            let params = CharacterParams {
                name_starts_with: starts_with,
                limit,
                offset,
                ..CharacterParams::default()
            };
            fetch(client, path, &params, wrapped).await
        }
        Kind::Comics => {
            let params = ComicParams {
                title_starts_with: starts_with,
                limit,
                offset,
                ..ComicParams::default()
            };
            fetch(client, path, &params, wrapped).await
        }
        Kind::Creators => {
            let params = CreatorParams {
                name_starts_with: starts_with,
                limit,
                offset,
                ..CreatorParams::default()
            };
            fetch(client, path, &params, wrapped).await
        }
        Kind::Events => {
            let params = EventParams {
                name_starts_with: starts_with,
                limit,
                offset,
                ..EventParams::default()
            };
            fetch(client, path, &params, wrapped).await
        }
        Kind::Series => {
            let params = SeriesParams {
                title_starts_with: starts_with,
                limit,
                offset,
                ..SeriesParams::default()
            };
            fetch(client, path, &params, wrapped).await
        }
        Kind::Stories => {
            if starts_with.is_some() {
                anyhow::bail!("stories cannot be filtered by name");
            }
            let params = StoryParams {
                limit,
                offset,
                ..StoryParams::default()
            };
            fetch(client, path, &params, wrapped).await
        }
    }
}

async fn get(client: &Client, kind: Kind, id: u64) -> Result<Value> {
    let value = match kind {
        Kind::Characters => serde_json::to_value(client.characters.get(id).await?)?,
        Kind::Comics => serde_json::to_value(client.comics.get(id).await?)?,
        Kind::Creators => serde_json::to_value(client.creators.get(id).await?)?,
        Kind::Events => serde_json::to_value(client.events.get(id).await?)?,
        Kind::Series => serde_json::to_value(client.series.get(id).await?)?,
        Kind::Stories => serde_json::to_value(client.stories.get(id).await?)?,
    };
    Ok(value)
}

/// Sends a request and keeps the results untyped, so any endpoint prints as-is.
async fn fetch<P: Serialize>(client: &Client, path: &str, params: &P, wrapped: bool) -> Result<Value> {
    let response = client.execute::<Value, P>(path, params).await?;
    if wrapped {
        Ok(serde_json::to_value(&response.envelope)?)
    } else {
        Ok(Value::Array(response.into_results()))
    }
}
