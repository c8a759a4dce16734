use anyhow::Result;
use clap::Parser;
use tracing::info;

use tum::cli::{error_exit_code, print_error, TumCli, TumCliImpl};
use tum::runtime::UnixManager;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = TumCli::parse();

    let config = match cli.load_config().await {
        Ok(config) => config,
        Err(e) => {
            print_error(None, &e, cli.json);
            std::process::exit(error_exit_code(&e));
        }
    };

    // Logs go to stderr so stdout stays the tool's own output
    let level = match cli.verbose {
        0 => config.log_level.parse().unwrap_or(tracing::Level::WARN),
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting tum v{}", env!("CARGO_PKG_VERSION"));

    let runner = TumCliImpl::new(UnixManager::with_config(config))
        .with_dry_run(cli.dry_run)
        .with_json(cli.json);
    let code = runner.execute(&cli.command).await;

    std::process::exit(code);
}
