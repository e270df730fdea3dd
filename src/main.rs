use std::sync::Arc;
use std::time::Duration;

use args::Args;
use authorized::AuthorizationTable;
use clap::Parser;
use connector::{ConnectorConfig, SftpConnector};
use gateway::Gateway;
use log::info;
use tokio::sync::mpsc;
use traversal::TraversalController;

mod args;
mod authorized;
mod connector;
mod encoding;
mod error;
mod file_info;
mod gateway;
mod notification;
mod sftp;
mod ssh_session;
mod transport;
mod traversal;

#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parsing degli argomenti da linea di comando
    let args = Args::parse();

    // stdout trasporta il protocollo: i log vanno su stderr
    env_logger::builder()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    if args.read_chunk_size == 0 {
        anyhow::bail!("--read-chunk-size must be greater than zero");
    }

    let timeout = Duration::from_secs(args.timeout_secs);
    info!("Default SSH port: {}", args.default_port);
    info!("Remote operation timeout: {:?}", timeout);
    info!("Max read buffer size: {} bytes", args.read_chunk_size);

    let connector = SftpConnector {
        config: Arc::new(ConnectorConfig {
            default_port: args.default_port,
            timeout,
        }),
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let controller = TraversalController::new(
        connector,
        AuthorizationTable::default(),
        tx,
        args.read_chunk_size,
        timeout,
    );

    info!("Waiting for notifications on stdin");
    Gateway::new(controller, rx, tokio::io::stdin(), tokio::io::stdout())
        .run()
        .await?;

    Ok(())
}
