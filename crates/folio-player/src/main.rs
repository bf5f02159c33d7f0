//! Folio player entry point.

use std::sync::Arc;

use folio_content::application::builtin;
use folio_content::application::ingest::ingest_catalog_file;
use folio_core::clock::{Clock, SystemClock};
use folio_core::navigation::ChapterSwitcher;
use folio_player::config::{LogFormat, PlayerConfig};
use folio_player::error::AppError;
use folio_player::runner;
use folio_player::state::{ChannelSwitcher, PlayerState};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let config = PlayerConfig::from_env()?;

    // Logs go to stderr so frames on stdout stay parseable.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
    }

    let ingested = match &config.content_path {
        Some(path) => ingest_catalog_file(path)?,
        None => builtin::portfolio()?,
    };
    tracing::info!(
        chapters = ingested.catalog.chapters().len(),
        version_hash = %ingested.version_hash,
        "Starting Folio player"
    );

    let (sender, receiver) = mpsc::unbounded_channel();
    let switcher: Arc<dyn ChapterSwitcher> = Arc::new(ChannelSwitcher::new(sender));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut state = PlayerState::new(&ingested.catalog, ingested.version_hash, clock, &switcher);
    state.start(config.start_chapter.as_deref());

    runner::run(
        &mut state,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        config.output,
        receiver,
    )
    .await
}
