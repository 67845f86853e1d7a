//! `refcheck` entrypoint.

mod cli;

use std::sync::Arc;

use clap::{CommandFactory, Parser};
use mimalloc::MiMalloc;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Mode};
use refcheck::config::Config;
use refcheck::constants::DEFAULT_LOG_DIRECTIVE;
use refcheck::overrides::OverrideStore;
use refcheck::session::{FactChecker, run_interactive};
use refcheck::watcher::NotificationSource;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE)),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(mode) = cli.mode() else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let mut config = Config::from_env()?;
    if let Some(path) = cli.overrides {
        config.overrides_path = path;
    }
    config.validate()?;

    tracing::info!(
        overrides = %config.overrides_path.display(),
        wikidata = %config.wikidata_api,
        wikipedia = %config.wikipedia_api_for(&config.native_lang),
        fallback_lang = %config.fallback_lang,
        "refcheck starting"
    );

    let store = Arc::new(OverrideStore::new(config.overrides_path.clone()));
    store.load_if_updated();

    let checker = FactChecker::from_config(&config, Arc::clone(&store))?;

    let notifications = if cli.watch {
        NotificationSource::start(store)
    } else {
        NotificationSource::Disabled
    };

    let outcome = match mode {
        Mode::Single { question, answer } => {
            let report = checker.check(&question, &answer).await;
            println!("{report}");
            Ok(())
        }
        Mode::Interactive => {
            println!("Type 'exit' or 'quit' to leave.");
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            run_interactive(&checker, stdin, &mut stdout)
                .await
                .map(|checked| tracing::info!(checked, "Session ended"))
        }
    };

    notifications.shutdown().await;
    outcome?;
    Ok(())
}
