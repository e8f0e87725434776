//! Shared setup for the demo programs.

use std::io::{self, BufRead, Write};

use bird_vna::{DriverConfig, Vna};
use tracing_subscriber::EnvFilter;

pub type DemoResult = Result<(), Box<dyn std::error::Error>>;

/// Installs a log subscriber (`RUST_LOG=bird_vna=debug` shows the SCPI
/// traffic) and opens the analyzer.
///
/// The resource comes from the first command-line argument, else from
/// `bird_vna.toml` / `BIRD_VNA_RESOURCE`.
pub fn connect() -> Result<Vna, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = DriverConfig::load()?;
    if let Some(resource) = std::env::args().nth(1) {
        config.resource = Some(resource);
    }
    let mut vna = Vna::initialize_with(&config)?;
    for error in vna.get_error_list()? {
        println!("stale instrument error: {}", error);
    }
    Ok(vna)
}

/// Waits for the operator to press Enter.
#[allow(dead_code)]
pub fn prompt(message: &str) -> io::Result<()> {
    print!("{} Press Enter to continue.", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
