//! Simulation engine.
//!
//! Owns the scripted sequence: the setup phases, the boot opt-in branch,
//! and the boot log walk. The engine performs no terminal I/O; it emits
//! [`SimEvent`]s to the presentation layer and reads user input lines from
//! a channel at its two decision points.

mod boot;
pub mod pacing;
mod setup;

use crate::entropy::EntropySource;
use crate::model::{RunOutcome, Severity, SimConfig, SimEvent, Tone};
use crate::script;
use anyhow::Result;
use self::pacing::Pacing;
use std::sync::Arc;
use std::time::{Duration, Instant};
use time::macros::format_description;
use time::OffsetDateTime;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

const PROGRESS_STEPS: usize = 36;

pub struct Simulator {
    cfg: SimConfig,
    pacing: Pacing,
    entropy: Arc<dyn EntropySource>,
}

impl Simulator {
    pub fn new(cfg: SimConfig, pacing: Pacing, entropy: Arc<dyn EntropySource>) -> Self {
        Self {
            cfg,
            pacing,
            entropy,
        }
    }

    /// Run the full scripted sequence: setup phases, the boot opt-in
    /// branch, and (on opt-in) the boot sequence. Strictly ordered; no
    /// phase is revisited.
    pub async fn run(
        self,
        event_tx: UnboundedSender<SimEvent>,
        mut input_rx: UnboundedReceiver<String>,
    ) -> Result<RunOutcome> {
        let started = Instant::now();

        let _ = event_tx.send(SimEvent::BannerShown);
        say(&event_tx, Tone::Accent, "shadow 4D kernel installer - v4.0-sim");
        say(
            &event_tx,
            Tone::Notice,
            "Preparing local sandbox environment...",
        );
        self.pacing.delay(script::INTRO_PAUSE).await;

        let setup = setup::SetupSequencer {
            cfg: &self.cfg,
            pacing: self.pacing,
            entropy: self.entropy.as_ref(),
            events: &event_tx,
        };
        let outcome = setup.run(&mut input_rx).await?;
        if outcome == RunOutcome::AbortedDirectoryError {
            return Ok(outcome);
        }

        if outcome == RunOutcome::CompletedBootRequested {
            say(&event_tx, Tone::Headline, "Starting simulated boot...");
            boot::run(
                &self.cfg,
                self.pacing,
                self.entropy.as_ref(),
                &event_tx,
                &mut input_rx,
            )
            .await?;
        } else {
            say(
                &event_tx,
                Tone::Notice,
                format!(
                    "Skipping boot simulation. Inspect files in ./{}",
                    self.cfg.env_dir.display()
                ),
            );
        }

        say(
            &event_tx,
            Tone::Accent,
            "Simulation complete. Note: this was a local-only theatrical simulation.",
        );
        let elapsed = Duration::from_secs(started.elapsed().as_secs());
        note(
            &event_tx,
            Tone::Plain,
            format!("Completed in {}", humantime::format_duration(elapsed)),
        );

        Ok(outcome)
    }
}

pub(crate) fn say(tx: &UnboundedSender<SimEvent>, tone: Tone, text: impl Into<String>) {
    let _ = tx.send(SimEvent::Announce {
        tone,
        text: text.into(),
    });
}

pub(crate) fn note(tx: &UnboundedSender<SimEvent>, tone: Tone, text: impl Into<String>) {
    let _ = tx.send(SimEvent::Note {
        tone,
        text: text.into(),
    });
}

/// Emit one boot log line, stamped with the wall clock at emission time.
pub(crate) fn log_line(tx: &UnboundedSender<SimEvent>, severity: Severity, text: impl Into<String>) {
    let _ = tx.send(SimEvent::LogLine {
        stamp: wall_clock_hms(),
        severity,
        text: text.into(),
    });
}

/// Animate one inline progress bar, paced over `total`.
pub(crate) async fn progress(
    tx: &UnboundedSender<SimEvent>,
    pacing: Pacing,
    label: &str,
    total: Duration,
) {
    let slice = total / PROGRESS_STEPS as u32;
    for i in 0..=PROGRESS_STEPS {
        let _ = tx.send(SimEvent::ProgressTick {
            label: label.to_string(),
            filled: i,
            total: PROGRESS_STEPS,
            pct: (i * 100 / PROGRESS_STEPS) as u8,
        });
        pacing.delay(slice).await;
    }
    let _ = tx.send(SimEvent::ProgressDone);
}

/// Read one input line; a closed channel (stdin EOF) counts as empty input.
pub(crate) async fn read_line(rx: &mut UnboundedReceiver<String>) -> String {
    rx.recv().await.unwrap_or_default()
}

/// `HH:MM:SS` wall-clock stamp. Falls back to UTC when the local offset is
/// indeterminate (the common case in multi-threaded processes).
pub(crate) fn wall_clock_hms() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| "??:??:??".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn progress_emits_every_step_then_terminates() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        progress(&tx, Pacing::Instant, "check", Duration::from_secs(1)).await;
        drop(tx);

        let mut ticks = 0usize;
        let mut done = 0usize;
        let mut last_pct = 0u8;
        while let Some(ev) = rx.recv().await {
            match ev {
                SimEvent::ProgressTick { pct, total, .. } => {
                    ticks += 1;
                    last_pct = pct;
                    assert_eq!(total, PROGRESS_STEPS);
                }
                SimEvent::ProgressDone => done += 1,
                other => panic!("unexpected event: {other:?}"),
            }
        }
        assert_eq!(ticks, PROGRESS_STEPS + 1);
        assert_eq!(done, 1);
        assert_eq!(last_pct, 100);
    }

    #[test]
    fn wall_clock_stamp_is_hh_mm_ss() {
        let stamp = wall_clock_hms();
        assert_eq!(stamp.len(), 8);
        let parts: Vec<&str> = stamp.split(':').collect();
        assert_eq!(parts.len(), 3);
    }
}
