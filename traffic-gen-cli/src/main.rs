use std::error::Error;

use clap::Parser;
use log::info;

use traffic_gen::config::DbConfig;
use traffic_gen::store::PgStore;
use traffic_gen::workload::{CancelToken, Workload};

/// Generates continuous insert/update traffic against the customer table
/// so downstream masking rules see live writes.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Connection descriptor; overrides the DB_DSN environment variable
    #[clap(long)]
    dsn: Option<String>,

    /// Stop after this many actions instead of running forever
    #[clap(long)]
    iterations: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli.dsn.map_or_else(DbConfig::from_env, DbConfig::new);
    let client = config.connect()?;
    info!("database session open");

    let mut store = PgStore::new(client);
    let mut workload = Workload::new(rand::thread_rng());
    let cancel = CancelToken::new();

    let performed = workload.run(&mut store, &cancel, cli.iterations)?;
    info!("performed {performed} action(s)");

    Ok(())
}
