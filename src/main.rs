mod cli;

use anyhow::Result;
use cli::Cli;
use clap::Parser;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("garment_mm_dataset=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
