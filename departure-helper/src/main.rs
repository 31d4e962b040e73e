use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use departure_helper::colors::LineColors;
use departure_helper::config::HelperConfig;
use departure_helper::fetcher::{FetcherFactory, MockFetcherFactory};
use departure_helper::helper::DepartureHelper;
use departure_helper::messages::{HelperEvent, HelperRequest};
use departure_helper::vbb::{VbbClient, VbbFetcherFactory};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries events only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "departure_helper=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = HelperConfig::from_env()?;
    let colors = config.line_colors()?;
    info!(lines = colors.len(), "Loaded line colors");

    match &config.mock_data_dir {
        Some(dir) => {
            let factory = MockFetcherFactory::new(dir)?;
            info!(
                stations = factory.available_stations().len(),
                "Serving mock boards from {}",
                dir.display()
            );
            serve(factory, colors, config.event_buffer).await
        }
        None => {
            info!(base_url = %config.vbb.base_url, "Using VBB departures API");
            let client = VbbClient::new(config.vbb.clone())?;
            serve(VbbFetcherFactory::new(client), colors, config.event_buffer).await
        }
    }
}

/// Read requests from stdin and write events to stdout, one JSON document
/// per line, until stdin closes.
async fn serve<F: FetcherFactory>(
    factory: F,
    colors: LineColors,
    buffer: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let (events_tx, events_rx) = mpsc::channel::<HelperEvent>(buffer);
    let (requests_tx, requests_rx) = mpsc::channel::<HelperRequest>(buffer);

    let helper = Arc::new(DepartureHelper::new(factory, colors, events_tx));
    let helper_task = tokio::spawn(helper.run(requests_rx));

    let writer_task = tokio::spawn(write_events(events_rx, tokio::io::stdout()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<HelperRequest>(&line) {
            Ok(request) => {
                if requests_tx.send(request).await.is_err() {
                    break;
                }
            }
            Err(e) => warn!(error = %e, "Ignoring malformed request"),
        }
    }

    // Closing the request channel lets the helper drain in-flight requests;
    // dropping the helper then closes the event channel.
    drop(requests_tx);
    helper_task.await?;
    writer_task.await?;

    info!("Input closed, exiting");
    Ok(())
}

/// Write each event as one JSON line, flushing after every event. Stops at
/// the first write or flush failure.
async fn write_events<W: AsyncWrite + Unpin>(
    mut events: mpsc::Receiver<HelperEvent>,
    mut out: W,
) {
    while let Some(event) = events.recv().await {
        let mut line = match serde_json::to_vec(&event) {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "Failed to serialize event");
                continue;
            }
        };
        line.push(b'\n');
        if let Err(e) = out.write_all(&line).await {
            error!(error = %e, "Failed to write event, stopping");
            break;
        }
        if let Err(e) = out.flush().await {
            error!(error = %e, "Failed to flush events, stopping");
            break;
        }
    }
}
