//! Prints one page of the artists or events listing as JSON.
//!
//! Usage: `artist-events <artists|events> [url]`, e.g.
//! `artist-events events "/events?page=2&search=jazz"`.

use std::env;
use std::process;

use dotenvy::dotenv;

use artist_events::models::config::AppConfig;
use artist_events::query::PageUrl;
use artist_events::repository::http::HttpRepository;
use artist_events::services::artists::load_artists_page;
use artist_events::services::events::load_events_page;
use artist_events::settings;

const DEFAULT_CONFIG_PATH: &str = "config/settings.yaml";

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = env::args().skip(1);
    let resource = args.next().unwrap_or_else(|| "artists".to_string());

    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let app_config = match AppConfig::load(&config_path) {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading config from {config_path}: {err}");
            process::exit(1);
        }
    };
    settings::replace(app_config);
    let config = settings::current();

    let repo = match HttpRepository::new(&config) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Error building repository: {err}");
            process::exit(1);
        }
    };

    let url = PageUrl::parse(&args.next().unwrap_or_else(|| format!("/{resource}")));

    let rendered = match resource.as_str() {
        "artists" => serde_json::to_string_pretty(&load_artists_page(&repo, config, &url).await),
        "events" => serde_json::to_string_pretty(&load_events_page(&repo, config, &url).await),
        other => {
            log::error!("Unknown resource {other:?}, expected `artists` or `events`");
            process::exit(2);
        }
    };

    match rendered {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Error rendering page: {err}");
            process::exit(1);
        }
    }
}
