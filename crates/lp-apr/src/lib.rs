pub mod apr;
pub mod arguments;
pub mod config;
pub mod error;
pub mod historical_block;
pub mod pipeline;
pub mod sink;

use {
    crate::{
        arguments::Arguments,
        config::{Configuration, load_farms},
        pipeline::LpAprUpdater,
        sink::{AprSink, JsonSink},
    },
    anyhow::Result,
    clap::Parser,
    shared::{http_client::HttpClientFactory, indexer::IndexerRegistry},
    std::{process::ExitCode, sync::Arc},
};

pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = Arguments::parse_from(args);
    let logging = &args.logging;
    // APRs printed to stdout must not be interleaved with logs.
    match &args.output {
        Some(_) => observe::tracing::initialize(
            logging.log_filter.as_str(),
            logging.log_stderr_threshold,
            logging.use_json_logs,
        ),
        None => observe::tracing::initialize_stderr(
            logging.log_filter.as_str(),
            logging.use_json_logs,
        ),
    }
    tracing::info!("running lp-apr with validated arguments:\n{}", args);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(?err, "failed to update farm APRs");
            ExitCode::FAILURE
        }
    }
}

/// Assumes tracing has already been set up.
pub async fn run(args: Arguments) -> Result<()> {
    let config = match &args.config {
        Some(path) => Configuration::from_path(path).await?,
        None => Configuration::default(),
    };
    let farms = load_farms(&args.farms).await?;

    let http_factory = HttpClientFactory::new(&args.http_client);
    let registry = IndexerRegistry::from_config(&config.indexers, http_factory.create()?);
    let updater = LpAprUpdater::new(Arc::new(registry), None);
    let aprs = updater.update(args.network, &farms).await?;
    JsonSink::new(args.output).store(&aprs).await
}
