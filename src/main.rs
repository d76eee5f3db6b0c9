mod cache;
mod cli;
mod download;
mod output;
mod reading;

use anyhow::Result;
use clap::Parser;
use cli::{command, Cli, Commands};
use download::Downloader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose);

    let downloader = Downloader::new(cli.retries);

    tokio::select! {
        result = run(&cli, &downloader) => {
            if let Err(e) = result {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("interrupted");
            // Exit directly; a pending stdin read would otherwise hold up runtime shutdown.
            std::process::exit(0);
        }
    }
}

async fn run(cli: &Cli, downloader: &Downloader) -> Result<()> {
    match &cli.command {
        Commands::History {
            airport,
            pairs,
            output_dir,
            url,
        } => {
            let path = command::history(downloader, airport, pairs, output_dir, url).await?;
            println!("{}", path.display());
        }
        Commands::Cf6 { wfo, sid, url } => command::cf6(downloader, wfo, sid, url).await?,
    }

    Ok(())
}
