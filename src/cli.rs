use crate::console;
use crate::engine::pacing::Pacing;
use crate::engine::Simulator;
use crate::entropy::ThreadEntropy;
use crate::model::{SimConfig, SimEvent};
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

/// Per-character delay for typed announcement lines.
const TYPE_DELAY_MS: u64 = 4;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "kernel4d-sim",
    version,
    about = "Theatrical 4D kernel setup & boot simulator (local-only, harmless)"
)]
pub struct Cli {
    /// Run the full script without animation delays
    #[arg(long)]
    pub instant: bool,
}

/// Build the fixed simulation config. The script itself is not
/// configurable; only pacing is selectable from the command line.
pub fn build_config(_args: &Cli) -> SimConfig {
    SimConfig::default()
}

pub async fn run(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    let pacing = if args.instant {
        Pacing::Instant
    } else {
        Pacing::Real
    };
    let type_delay_ms = if args.instant { 0 } else { TYPE_DELAY_MS };

    let (frame_tx, writer_handle) = console::spawn_console_writer(type_delay_ms);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<SimEvent>();
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    // Forward stdin lines to the engine's two decision points.
    let stdin_handle = tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if input_tx.send(line).is_err() {
                break;
            }
        }
    });

    let simulator = Simulator::new(cfg, pacing, Arc::new(ThreadEntropy));
    let sim_handle = tokio::spawn(async move { simulator.run(event_tx, input_rx).await });

    while let Some(event) = event_rx.recv().await {
        for frame in console::render(&event) {
            let _ = frame_tx.send(frame);
        }
    }

    let _outcome = sim_handle
        .await
        .context("simulator task failed")?
        .context("simulation failed")?;

    // The reader task stays blocked on stdin after the script ends;
    // dropping its JoinHandle would not cancel it.
    stdin_handle.abort();

    drop(frame_tx);
    let _ = writer_handle.await;
    Ok(())
}
