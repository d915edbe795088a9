use anyhow::{Context, Result};
use clap::Parser;
use stadium::{Arena, ArenaConfig, Args, JsonLinesSink, NullSink, RecordSink};
use stadium_tbp::ProcessBot;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(level)
        .init();

    let config = ArenaConfig::from(&args);

    let sink: Box<dyn RecordSink> = match &args.output {
        Some(path) => Box::new(
            JsonLinesSink::create(path)
                .with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(NullSink),
    };

    let one = ProcessBot::spawn(&args.bot1)
        .await
        .with_context(|| format!("starting {}", args.bot1.display()))?;
    let two = ProcessBot::spawn(&args.bot2)
        .await
        .with_context(|| format!("starting {}", args.bot2.display()))?;
    info!("{} vs {}", one.name(), two.name());

    let scoreboard = Arena::new([one, two], config, sink).run().await?;
    info!("final score {scoreboard}");
    Ok(())
}
