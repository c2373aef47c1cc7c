use anyhow::Result;
use clap::Parser;
use kernel4d_sim::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    if let Err(e) = cli::run(args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
