use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cable_progress::handler;
use cable_progress::reconcile::Reconciler;
use cable_progress::store::sqlite::SqliteStore;

#[derive(Parser)]
#[command(version, about = "Cable installation progress tracker")]
struct Cli {
    /// Path to the SQLite sheet store.
    #[arg(long, value_name = "FILE")]
    db: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the derived progress summary.
    Show,
    /// Dump the full model as JSON.
    Read,
    /// Apply a JSON write request (writeAll / writePartial body) from a file.
    Apply {
        #[arg(value_name = "FILE")]
        file: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let mut store = SqliteStore::open(&cli.db)?;

    match cli.cmd {
        Cmd::Show => {
            let summary = Reconciler::new(&mut store).summary()?;
            println!("{summary}");
        }
        Cmd::Read => {
            let response = handler::handle_get(&mut store, "read");
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Cmd::Apply { file } => {
            let body = std::fs::read_to_string(&file)
                .with_context(|| format!("read request file {file}"))?;
            let response = handler::handle_post(&mut store, &body);
            println!("{}", serde_json::to_string_pretty(&response)?);
            if response.get("error").is_some() {
                anyhow::bail!("request rejected");
            }
        }
    }

    Ok(())
}
