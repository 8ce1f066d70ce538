//! Manhunt playout runner.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod map;
mod runner;

use runner::{play_game, SimConfig};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SimConfig::from_env()?;
    info!(?config, "Starting Manhunt playouts...");

    let mut mrx_wins = 0;
    for i in 0..config.games {
        let seed = config.seed.wrapping_add(i as u64);
        let summary = play_game(seed, config.detectives)?;
        if summary.mrx_won {
            mrx_wins += 1;
        }
        println!("{}", serde_json::to_string(&summary)?);
    }

    info!(
        games = config.games,
        mrx_wins,
        detective_wins = config.games - mrx_wins,
        "Playouts finished"
    );
    Ok(())
}
