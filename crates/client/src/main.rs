//! Arena client binary.
//!
//! Runs a scenario through the runtime, prunes effects like a renderer would
//! and prints the final log, board and ledger.
//!
//! # Examples
//!
//! ```bash
//! # Built-in demo at real pace
//! cargo run -p arena-client
//!
//! # A scenario file, ten times faster, with overdrafts rejected
//! cargo run -p arena-client -- --scenario scenarios/duel.ron --speed 0.1 --strict
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::ResourcePolicy;
use runtime::{Runtime, RuntimeConfig, Scenario, ScenarioDriver};

use arena_client::render::{render_board, render_table};
use arena_client::{ClientConfig, EffectConsumer, logging};

#[derive(Debug, Parser)]
#[command(name = "arena", version, about = "Runs an arena scenario and prints the outcome")]
struct Cli {
    /// Scenario file (.ron or .json). Defaults to the built-in demo.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,

    /// Animation speed multiplier; 0 disables every pause.
    #[arg(long, value_name = "FACTOR")]
    speed: Option<f32>,

    /// Reject actions that spend more points than the player owns.
    #[arg(long)]
    strict: bool,

    /// Do not print the action log.
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let _log_guard = logging::setup_logging(ClientConfig::log_dir_from_env().as_deref())?;

    let mut client_config = ClientConfig::from_env();
    if cli.scenario.is_some() {
        client_config.scenario = cli.scenario;
    }
    client_config.quiet |= cli.quiet;

    let mut runtime_config = RuntimeConfig::from_env();
    if let Some(speed) = cli.speed {
        runtime_config.game_config.timing.speed = speed;
    }
    if cli.strict {
        runtime_config.game_config.resource_policy = ResourcePolicy::Strict;
    }
    let game_config = runtime_config.game_config.clone();

    let scenario = match &client_config.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => Scenario::demo(),
    };

    tracing::info!(
        scenario = %scenario.name,
        steps = scenario.len(),
        speed = game_config.timing.speed,
        policy = ?game_config.resource_policy,
        "Starting arena client"
    );

    let runtime = Runtime::builder()
        .config(runtime_config)
        .build()
        .await?;
    let handle = runtime.handle();

    let mut consumer = EffectConsumer::new(
        handle.clone(),
        client_config.scaled_lifetime(game_config.timing.speed),
    );
    consumer.start();

    let outcome = ScenarioDriver::new(&scenario, game_config.clone())
        .run_on(&handle)
        .await;
    if let Err(error) = &outcome {
        tracing::error!(%error, "scenario stopped early");
    }

    let leaked = consumer.wait_drained(client_config.drain_timeout).await?;
    consumer.stop();
    let snapshot = handle.query_snapshot().await?;
    let state = handle.query_state().await?;

    if !client_config.quiet {
        println!("== log ==");
        for line in &snapshot.log {
            println!("{line}");
        }
        println!();
    }
    println!("== board ==");
    print!("{}", render_board(&state, game_config.board));
    println!();
    println!("== players ==");
    print!("{}", render_table(&state));
    println!();
    println!("effects pruned: {}, leaked: {leaked}", consumer.pruned());
    if leaked > 0 {
        tracing::warn!(leaked, "effects were never pruned");
    }

    drop(consumer);
    drop(handle);
    runtime.shutdown().await?;

    outcome
        .map(|_| ())
        .with_context(|| format!("scenario {} failed", scenario.name))
}
