use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;

use tally_server::{ServerConfig, SharedStore, TimesheetServer};
use tally_store::InMemoryTimesheetStore;

use crate::cli::{Cli, Command, ServeArgs};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let bind_addr = args
        .bind
        .parse()
        .with_context(|| format!("invalid bind address: {}", args.bind))?;
    let config = ServerConfig {
        bind_addr,
        allowed_origin: args.cors_origin,
    };

    // The store is built once here and lives for the run; entries vanish on
    // shutdown.
    let store: SharedStore = Arc::new(InMemoryTimesheetStore::new());

    println!(
        "{} tally listening on {}",
        "✓".green().bold(),
        args.bind.bold()
    );
    TimesheetServer::new(config, store).serve().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serve_rejects_malformed_bind_address() {
        let result = cmd_serve(ServeArgs {
            bind: "not-an-address".into(),
            cors_origin: None,
        })
        .await;
        assert!(result.is_err());
    }
}
