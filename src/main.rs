// Entry point: renders one APA series and exits.
use std::error::Error;

use apa_series::cli::Args;
use apa_series::compose_series;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apa_series=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    compose_series(&args.input_stem, &args.output_path)?;
    Ok(())
}
