mod cli;
mod error;
mod output;
mod paths;

use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing::info;

use pairforge_core::{
    codegen, Aggregator, DiskCache, DispatchOptions, Dispatcher, ExchangeSet, ReqwestHttpClient,
    ValidatorMap, CURRENCIES,
};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{} {error}", "***".red());
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Fail before any network traffic; no partial output is ever written.
    if let Some(path) = &cli.out {
        if path.exists() && !cli.force {
            return Err(CliError::OutputExists(path.clone()));
        }
    }

    let mut exchanges = ExchangeSet::builtin()?;
    if let Some(filter) = &cli.exchange {
        info!(%filter, "filtering exchanges");
    }
    exchanges.retain_matching(cli.exchange.as_deref());
    info!(exchanges = exchanges.len(), "processing");

    let cache_root = cli.cache_dir.clone().unwrap_or_else(paths::default_cache_dir);
    let cache = if cli.no_cache {
        DiskCache::disabled(&cache_root)
    } else {
        DiskCache::new(&cache_root)
    };

    let dispatcher = Dispatcher::new(
        Arc::new(ReqwestHttpClient::new()),
        ValidatorMap::builtin(),
        cache.clone(),
        DispatchOptions {
            workers: cli.workers,
            threshold_ms: cli.threshold_ms,
        },
    );

    let (mut rx, total) = dispatcher.submit(&exchanges);
    let mut progress = output::GaugeProgress::new(cli.gauge_enabled());
    let summary = Aggregator::new(cli.dry_run)
        .drain(&mut rx, total, &mut exchanges, &cache, &mut progress)
        .await;

    output::print_summary(&summary);

    if cli.show || cli.out.is_some() {
        let artifact = codegen::render(CURRENCIES, &exchanges);

        if cli.show {
            println!("{artifact}");
        }

        if let Some(path) = &cli.out {
            if !cli.dry_run {
                fs::write(path, &artifact).map_err(|source| CliError::WriteFailed {
                    path: path.clone(),
                    source,
                })?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    let directives = format!("pairforge_core={level},pairforge={level}");
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directives));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
