use clap::Parser;
use weather_etl::cli::{run, Cli};
use weather_etl::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
