use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};

use event_hub::app::{parse_event_id, Clock, DetailOutcome, EventDetail, EventQuery, EventSource, EventsQuery, QueryState, SystemClock};
use event_hub::config::Config;
use event_hub::constants::{EVENT_NOT_FOUND, LOAD_EVENTS_FAILED, LOAD_EVENT_DETAILS_FAILED};
use event_hub::domain::{FilterContext, FilterCriteria, StatusTab};
use event_hub::infra::ReqwestEventSource;
use event_hub::web::{self, AppState};
use event_hub::{logging, observability, terminal};

#[derive(Parser)]
#[command(name = "event_hub")]
#[command(about = "Browse events served by a remote events API")]
#[command(version)]
struct Cli {
    /// Override the events API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web front end
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Do not install the Prometheus recorder
        #[arg(long)]
        no_metrics: bool,
    },
    /// Print the event listing
    List {
        /// all, upcoming, ongoing or expired
        #[arg(long, default_value = "all")]
        tab: StatusTab,
        /// Case-insensitive match on title or location
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Only events running on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show a single event
    Show {
        id: String,
        /// Keep printing the countdown until interrupted
        #[arg(long)]
        follow: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging("logs");

    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let offset = config.display.offset()?;
    let source: Arc<dyn EventSource> = Arc::new(ReqwestEventSource::from_config(&config.api)?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    match cli.command {
        Commands::Serve { host, port, no_metrics } => {
            if !no_metrics {
                if let Err(e) = observability::init() {
                    warn!(error = %e, "Metrics disabled");
                }
            }

            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            info!(api = %config.api.base_url, "Starting web front end");

            let state = AppState::new(source)
                .with_clock(clock)
                .with_offset(offset)
                .with_refresh_interval(config.display.refresh_interval_secs);
            web::serve(state, &host, port).await?;
        }
        Commands::List {
            tab,
            search,
            category,
            date,
        } => {
            let query = EventsQuery::new(source, Arc::clone(&clock));
            let state = query.run(EventQuery::All).await.unwrap_or(QueryState::Failed);
            if let Some(message) = state.error_message() {
                bail!("{}. Please try again later.", message);
            }
            let Some(catalog) = state.catalog() else {
                bail!("{}. Please try again later.", LOAD_EVENTS_FAILED);
            };

            let criteria = FilterCriteria {
                search: search.unwrap_or_default(),
                category: category.unwrap_or_default(),
                date,
            };
            // Classify at the instant the tab counts were tallied
            let ctx = FilterContext::new(catalog.loaded_at(), offset);
            print!("{}", terminal::render_listing(catalog, tab, &criteria, &ctx));
        }
        Commands::Show { id, follow } => {
            let Some(id) = parse_event_id(&id) else {
                bail!("{}", EVENT_NOT_FOUND);
            };

            let detail = EventDetail::new(source, Arc::clone(&clock));
            let event = match detail.load(id).await {
                Some(DetailOutcome::Found(event)) => event,
                Some(DetailOutcome::NotFound) => bail!("{}", EVENT_NOT_FOUND),
                _ => bail!("{}", LOAD_EVENT_DETAILS_FAILED),
            };
            print!("{}", terminal::render_detail(&event, clock.now(), &offset));

            if follow {
                let ticker = detail.start_countdown(config.display.refresh_interval());
                let mut display = ticker.subscribe();
                loop {
                    tokio::select! {
                        changed = display.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            println!("{}", *display.borrow_and_update());
                        }
                        _ = tokio::signal::ctrl_c() => break,
                    }
                }
            }
        }
    }

    Ok(())
}
