// src/main.rs
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use log::{LevelFilter, error, info};
use reeltime::app::{self, App};
use reeltime::cli::{Cli, Command, ListArgs};
use reeltime::color::to_hex;
use reeltime::dataset::{DatasetSource, LiveDatasetFetcher, load_dataset};
use reeltime::event::AppEvent;
use reeltime::filter_state::FilterState;
use reeltime::timeline::Timeline;
use reeltime::timeline_event::Axis;
use tokio::sync::mpsc::{self, UnboundedSender};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let axis: Axis = cli.axis.into();

    match &cli.command {
        Some(Command::List(args)) => {
            let level = cli.log_level.map_or("warn", |l| l.as_str());
            reeltime::logging::init_stderr_logging(level);
            run_list(&cli.dataset, axis, args).await
        }
        None => {
            let level: LevelFilter = cli.log_level.map_or(LevelFilter::Info, Into::into);
            reeltime::logging::init_file_logging(&cli.log_file, level)
                .with_context(|| format!("Failed to open log file {}", cli.log_file.display()))?;
            run_interactive(&cli.dataset, axis)
        }
    }
}

fn run_interactive(dataset: &str, axis: Axis) -> Result<()> {
    let (events_tx, events_rx) = mpsc::unbounded_channel::<AppEvent>();
    spawn_dataset_load(dataset.to_string(), events_tx);

    let mut filters = FilterState::new();
    filters.set_axis(axis);
    app::start_ui(App::with_filters(filters), events_rx)
}

/// Loads the dataset in the background and reports the outcome to the UI loop.
fn spawn_dataset_load(dataset: String, events_tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let outcome = match DatasetSource::parse(&dataset) {
            Ok(source) => load_dataset(&source, &LiveDatasetFetcher::new()).await,
            Err(e) => Err(e),
        };
        let app_event = match outcome {
            Ok(events) => {
                info!("Loaded {} events from {}", events.len(), dataset);
                AppEvent::DatasetLoaded { events, timestamp: Utc::now() }
            }
            Err(e) => {
                error!("Failed to load dataset from {}: {}", dataset, e);
                AppEvent::DatasetFailed { error: e.to_string(), timestamp: Utc::now() }
            }
        };
        // The UI may already be gone.
        let _ = events_tx.send(app_event);
    });
}

async fn run_list(dataset: &str, axis: Axis, args: &ListArgs) -> Result<()> {
    let source = DatasetSource::parse(dataset)?;
    let events = load_dataset(&source, &LiveDatasetFetcher::new())
        .await
        .with_context(|| format!("Failed to load dataset from {}", source))?;

    let timeline = Timeline::new(events);
    let view = timeline.view(&args.filter_state(axis));

    for positioned in &view.visible_events {
        let event = &positioned.event;
        println!(
            "{:>6.2}%  {}  {:<24}  {}  {}",
            positioned.position,
            event.timestamp(axis).format("%Y-%m-%d"),
            event.director(),
            event.title(),
            to_hex(timeline.color_for(event.director())),
        );
    }
    println!("{} of {} events ({})", view.len(), timeline.events().len(), axis.label());
    Ok(())
}
