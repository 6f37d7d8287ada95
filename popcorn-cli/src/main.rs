mod composition;

use application::Application;
use popcorn::domain::{MediaKind, MovieId, PersonId, SeriesId, TrendingWindow};
use popcorn::events::RepositoryEvent;
use popcorn::flags::{FeatureFlagProviding, FlagKey, InMemoryFlagProvider};
use serde::Serialize;
use shared::config::Config;
use std::collections::HashMap;
use std::error::Error;
use tokio::sync::broadcast;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match dotenvy::dotenv() {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    let config = Config::from_env();

    let flags = InMemoryFlagProvider::new();
    flags
        .start(HashMap::from([(
            FlagKey::RequestCoalescing.as_str().to_string(),
            config.coalesce_requests,
        )]))
        .await?;
    let coalesce = flags.flag(FlagKey::RequestCoalescing)?;

    // Repository lifecycle events are only logged here; dropping the
    // receiver would change nothing but the logs.
    let (events_tx, mut events_rx) = broadcast::channel::<RepositoryEvent>(256);
    tokio::spawn(async move {
        while let Ok(event) = events_rx.recv().await {
            debug!(
                context = event.context(),
                key = event.key(),
                "repository event: {event:?}"
            );
        }
    });

    let application = composition::build(&config, coalesce, events_tx)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    run(&application, &args).await
}

async fn run(application: &Application, args: &[String]) -> Result<(), Box<dyn Error>> {
    match args {
        [command, id] if command == "movie" => {
            let details = application.movie_details.exec(MovieId(parse_id(id)?)).await?;
            print_json(&details)
        }
        [command, id] if command == "series" => {
            let details = application
                .series_details
                .exec(SeriesId(parse_id(id)?))
                .await?;
            print_json(&details)
        }
        [command, id] if command == "person" => {
            let details = application
                .person_details
                .exec(PersonId(parse_id(id)?))
                .await?;
            print_json(&details)
        }
        [command, kind, rest @ ..] if command == "trending" => {
            let window = match rest {
                [] => TrendingWindow::Day,
                [window] if window == "day" => TrendingWindow::Day,
                [window] if window == "week" => TrendingWindow::Week,
                _ => return Err(usage()),
            };
            match kind.as_str() {
                "movies" => print_json(&application.trending_movies.exec(window, 1).await?),
                "series" => print_json(&application.trending_series.exec(window, 1).await?),
                _ => Err(usage()),
            }
        }
        [command, kind] if command == "genres" => match kind.as_str() {
            "movie" => print_json(&application.genres.exec(MediaKind::Movie).await?),
            "tv" => print_json(&application.genres.exec(MediaKind::Tv).await?),
            _ => Err(usage()),
        },
        [command, query @ ..] if command == "search" && !query.is_empty() => {
            print_json(&application.search.exec(&query.join(" "), 1).await?)
        }
        _ => Err(usage()),
    }
}

fn parse_id(raw: &str) -> Result<u64, Box<dyn Error>> {
    raw.parse::<u64>().map_err(|_| usage())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn usage() -> Box<dyn Error> {
    "usage: popcorn-cli movie <id> | series <id> | person <id> \
     | trending <movies|series> [day|week] | genres <movie|tv> | search <query>"
        .into()
}
