use clap::Parser;
use metar_plotter::cli::{run, Cli};
use metar_plotter::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
