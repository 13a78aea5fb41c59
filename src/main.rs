use chrono::Utc;
use clap::{Arg, ArgMatches, Command};
use color_eyre::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod adapters;
mod application;
mod domain;
mod ports;

use adapters::{
    api::{CmsClient, HttpRecordStore},
    config::FileConfigStore,
    memory::MemoryRecordStore,
    tui::{run_tui, App},
    viewport::{PixelScale, TerminalViewport},
};
use application::{AppError, SiteService};
use domain::{ContactForm, ContactSubmission, Route};
use ports::{AppConfig, ConfigStore, RecordStore};

fn cli() -> Command {
    Command::new("portfolio-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A data analyst's portfolio in the terminal")
        .long_about("Browse the portfolio projects and send a message from the terminal.\n\nContent comes from the collection store at --store-url, or from a JSON seed file with --seed.")
        .arg(
            Arg::new("store-url")
                .long("store-url")
                .value_name("URL")
                .help("Content store base URL (can also be set via PORTFOLIO_STORE_URL env var)")
                .global(true),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .help("Content store API key (can also be set via PORTFOLIO_API_KEY env var)")
                .global(true),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("FILE")
                .help("Serve content from a JSON seed file instead of the store")
                .global(true),
        )
        .arg(
            Arg::new("route")
                .long("route")
                .value_name("PATH")
                .help("Page to open, e.g. /projects or /projects/<id>")
                .default_value("/"),
        )
        .subcommand(
            Command::new("projects")
                .about("Project operations")
                .subcommand(Command::new("list").about("List projects as JSON"))
                .subcommand(
                    Command::new("get")
                        .about("Get a specific project by ID")
                        .arg(
                            Arg::new("project_id")
                                .help("Project ID to fetch")
                                .required(true)
                                .index(1),
                        ),
                ),
        )
        .subcommand(
            Command::new("contact")
                .about("Contact operations")
                .subcommand(
                    Command::new("send")
                        .about("Send a contact message")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("subject").long("subject").required(true))
                        .arg(Arg::new("message").long("message").required(true)),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // The TUI owns stdout, so logs go to a file
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("portfolio-cli.log")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let matches = cli().get_matches();

    let config_store = FileConfigStore::new()?;
    let config = resolve_config(&config_store, &matches).await?;

    let store = match open_store(&config, matches.get_one::<String>("seed")).await {
        Ok(store) => store,
        Err(AppError::StoreNotConfigured) => {
            eprintln!("❌ No content store configured!");
            eprintln!();
            eprintln!("Either:");
            eprintln!("1. Run: export PORTFOLIO_STORE_URL=https://your-site/_api/cms");
            eprintln!("2. Or run: portfolio-cli --store-url <URL>");
            eprintln!("3. Or browse local content: portfolio-cli --seed content.json");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    let service = Arc::new(SiteService::new(store));

    match matches.subcommand() {
        Some(("projects", projects_matches)) => match projects_matches.subcommand() {
            Some(("list", _)) => match service.list_projects().await {
                Ok(projects) => println!("{}", serde_json::to_string_pretty(&projects)?),
                Err(e) => {
                    eprintln!("❌ Failed to list projects: {e}");
                    std::process::exit(1);
                }
            },
            Some(("get", get_matches)) => {
                if let Some(project_id) = get_matches.get_one::<String>("project_id") {
                    match service.get_project(&project_id.as_str().into()).await {
                        Ok(Some(project)) => {
                            println!("{}", serde_json::to_string_pretty(&project)?)
                        }
                        Ok(None) => {
                            eprintln!("❌ Project not found: {project_id}");
                            std::process::exit(1);
                        }
                        Err(e) => {
                            eprintln!("❌ Failed to get project: {e}");
                            std::process::exit(1);
                        }
                    }
                }
            }
            _ => {
                eprintln!("❌ Unknown projects subcommand");
                std::process::exit(1);
            }
        },
        Some(("contact", contact_matches)) => match contact_matches.subcommand() {
            Some(("send", send_matches)) => {
                let value = |name: &str| {
                    send_matches
                        .get_one::<String>(name)
                        .cloned()
                        .unwrap_or_default()
                };
                let form = ContactForm {
                    name: value("name"),
                    email: value("email"),
                    subject: value("subject"),
                    message: value("message"),
                };
                if let Err(e) = form.validate() {
                    eprintln!("❌ {e}");
                    std::process::exit(1);
                }

                let submission = ContactSubmission::from_form(&form, Utc::now());
                match service.submit_contact(&submission).await {
                    Ok(created) => println!("{}", serde_json::to_string_pretty(&created)?),
                    Err(e) => {
                        eprintln!("❌ Failed to send message: {e}");
                        std::process::exit(1);
                    }
                }
            }
            _ => {
                eprintln!("❌ Unknown contact subcommand");
                std::process::exit(1);
            }
        },
        None => {
            let path = matches
                .get_one::<String>("route")
                .map(String::as_str)
                .unwrap_or("/");
            let route = match Route::parse(path) {
                Ok(route) => route,
                Err(e) => {
                    eprintln!("❌ {e}");
                    std::process::exit(1);
                }
            };

            let viewport = Arc::new(TerminalViewport::new(PixelScale::new(
                config.px_per_row,
                config.px_per_col,
            )));
            let app = App::new(service, config.profile.clone(), viewport, route);

            if let Err(e) = run_tui(app).await {
                eprintln!("❌ Application error: {e}");
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("❌ Unknown command");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Stored config overlaid with environment and then command line values.
async fn resolve_config(store: &FileConfigStore, matches: &ArgMatches) -> Result<AppConfig> {
    let mut config = store.load_config().await?;

    if let Some(url) = matches.get_one::<String>("store-url") {
        config.store_url = Some(url.clone());
        store.save_config(&config).await?;
    } else if let Ok(url) = std::env::var("PORTFOLIO_STORE_URL") {
        config.store_url = Some(url);
    }

    if let Some(key) = matches.get_one::<String>("api-key") {
        store.set_api_key(key).await?;
        config.api_key = Some(key.clone());
    } else if let Ok(key) = std::env::var("PORTFOLIO_API_KEY") {
        config.api_key = Some(key);
    }

    Ok(config)
}

async fn open_store(
    config: &AppConfig,
    seed: Option<&String>,
) -> Result<Arc<dyn RecordStore>, AppError> {
    if let Some(seed) = seed {
        tracing::info!("Serving content from seed file {}", seed);
        let store = MemoryRecordStore::from_seed_file(Path::new(seed)).await?;
        return Ok(Arc::new(store));
    }

    let url = config
        .store_url
        .as_deref()
        .ok_or(AppError::StoreNotConfigured)?;
    tracing::info!("Using content store at {}", url);
    let client = CmsClient::new(
        url,
        config.api_key.clone(),
        Duration::from_secs(config.request_timeout_seconds.max(1)),
    )?;
    Ok(Arc::new(HttpRecordStore::new(client)))
}
