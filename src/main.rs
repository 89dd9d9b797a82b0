use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::env;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use placement_client::api::ApiClient;
use placement_client::cache::QueryCache;
use placement_client::config::Config;
use placement_client::hooks::{Hooks, QueryState};
use placement_client::metrics;
use placement_client::models::InternshipFilter;
use placement_client::realtime::{apply_event, NotificationSocket};
use placement_client::services::Services;
use placement_client::session::SessionProvider;
use placement_client::stores::SelectionStore;

fn print_help() {
    eprintln!("usage: placement-client <command> [arg]");
    eprintln!("commands:");
    eprintln!("  internships              list open internships");
    eprintln!("  internship <id>          show one internship");
    eprintln!("  applicants <id>          list applicants of an internship");
    eprintln!("  notifications            list notifications of the session user");
    eprintln!("  courses                  list courses");
    eprintln!("  settings                 show account settings of the session user");
    eprintln!("  watch                    follow notification events until interrupted");
    eprintln!("  metrics                  print client metrics after a courses fetch");
}

fn parse_id(arg: Option<String>, name: &str) -> Result<Option<Uuid>> {
    arg.map(|value| Uuid::parse_str(&value).with_context(|| format!("{} must be a valid UUID", name)))
        .transpose()
}

/// Print the payload, or fail with the normalized message
fn render<T: Serialize>(state: QueryState<T>) -> Result<()> {
    if let Some(message) = state.error {
        bail!(message);
    }
    match state.data {
        Some(data) => println!("{}", serde_json::to_string_pretty(&data)?),
        None => bail!("query was skipped: a required argument or session is missing"),
    }
    Ok(())
}

/// Follow pushed events, refreshing the notification query after each one
async fn watch(hooks: &Hooks, socket_url: String) -> Result<()> {
    let mut socket = NotificationSocket::new(socket_url);
    socket.connect(hooks.session().current().as_ref()).await?;
    info!(url = socket.url(), "Watching notification events");

    loop {
        let event = tokio::select! {
            event = socket.next_event() => event?,
            _ = tokio::signal::ctrl_c() => break,
        };
        let Some(event) = event else {
            info!("Notification socket closed by server");
            break;
        };

        let marked = apply_event(hooks.cache(), &event).await;
        let mut notifications = hooks.watch_notifications();
        let state = notifications.wait_for(|state| !state.is_loading()).await?.clone();
        match (state.data, state.error) {
            (Some(list), _) => println!(
                "{:?} (invalidated {}, unread {})",
                event,
                marked,
                placement_client::models::notification::unread_count(&list)
            ),
            (None, Some(message)) => println!("{:?} (invalidated {}, refresh failed: {})", event, marked, message),
            (None, None) => println!("{:?} (invalidated {})", event, marked),
        }
    }

    socket.disconnect().await?;
    Ok(())
}

async fn run(command: &str, arg: Option<String>) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded for {}", config.api.base_url);

    let socket_url = config.socket_url();
    let session = SessionProvider::new(config.session.clone());
    let api = ApiClient::new(&config.api, session.clone()).context("Failed to build API client")?;
    let hooks = Hooks::new(
        Services::new(api),
        QueryCache::new(&config.cache),
        session,
        SelectionStore::new(),
    );

    match command {
        "internships" => render(hooks.internships(&InternshipFilter::open()).await),
        "internship" => render(hooks.internship(parse_id(arg, "internship id")?).await),
        "applicants" => render(hooks.applicants(parse_id(arg, "internship id")?).await),
        "notifications" => render(hooks.notifications().await),
        "courses" => render(hooks.courses().await),
        "settings" => render(hooks.settings().await),
        "watch" => watch(&hooks, socket_url).await,
        "metrics" => {
            let state = hooks.courses().await;
            if let Some(message) = state.error {
                warn!("Courses fetch failed before rendering metrics: {}", message);
            }
            print!("{}", metrics::render()?);
            Ok(())
        }
        other => bail!("unknown command: {} (try `placement-client help`)", other),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,placement_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    metrics::registry::init_metrics();

    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "help".to_string());
    if matches!(command.as_str(), "help" | "--help" | "-h") {
        print_help();
        return ExitCode::SUCCESS;
    }

    match run(&command, args.next()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
