//! Task API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use taskapi::api::{self, ApiError, Config};
use taskapi::db::{Database, DbError, SqliteDatabase};
use taskapi::paths::get_db_path;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(taskapi::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(taskapi::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(taskapi::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "taskapi")]
#[command(author, version, about = "Task and student items API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Database file path (defaults to XDG data directory: ~/.local/share/taskapi/taskapi.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Fixed seed for payment references (overrides TASKAPI_SEED)
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    let db_path = cli.db.unwrap_or_else(get_db_path);

    println!("Opening database at {:?}", db_path);

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&db_path).await?;

    // Run migrations before starting the server
    db.migrate()?;
    println!("Database migrations complete");

    let mut config = Config::new().with_host(cli.host).with_port(cli.port);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    api::run(config, db).await?;

    Ok(())
}
