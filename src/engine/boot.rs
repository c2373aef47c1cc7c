//! Boot sequencer: the timestamped log walk with the scripted fault and
//! recovery episode, followed by the one-shot command prompt.
//!
//! Stages run strictly in order: EARLY, MID, FAULT, RECOVER, LATE, PROMPT.
//! Nothing branches back; the fault always recovers.

use crate::dispatch::{self, BootCommand};
use crate::engine::pacing::Pacing;
use crate::engine::{log_line, note, progress, read_line};
use crate::entropy::EntropySource;
use crate::model::{SimConfig, SimEvent};
use crate::script;
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub(crate) async fn run(
    cfg: &SimConfig,
    pacing: Pacing,
    entropy: &dyn EntropySource,
    events: &UnboundedSender<SimEvent>,
    input_rx: &mut UnboundedReceiver<String>,
) -> Result<()> {
    for (severity, line) in script::EARLY_LINES {
        log_line(events, *severity, *line);
        pacing.delay(cfg.early_line_delay).await;
    }

    for (severity, line) in script::MID_LINES {
        log_line(events, *severity, *line);
        pacing.delay(cfg.mid_line_delay).await;
    }

    let (severity, line) = script::FAULT_LINE;
    log_line(events, severity, line);
    pacing.delay(script::FAULT_HOLD).await;

    let (severity, line) = script::RECOVER_ATTEMPT_LINE;
    log_line(events, severity, line);
    progress(
        events,
        pacing,
        script::RECOVERY_PROGRESS.label,
        script::RECOVERY_PROGRESS.duration,
    )
    .await;
    let (severity, line) = script::RECOVER_DONE_LINE;
    log_line(events, severity, line);
    pacing.delay(script::RECOVER_HOLD).await;

    for (severity, line) in script::late_lines(&cfg.env_dir) {
        log_line(events, severity, line);
        pacing.delay(cfg.late_line_delay).await;
    }

    let _ = events.send(SimEvent::PromptShown {
        text: script::BOOT_PROMPT.to_string(),
    });
    let input = read_line(input_rx).await;
    let command = BootCommand::parse(&input);
    for (tone, text) in dispatch::respond(&command, entropy, cfg.preview_hex_len) {
        note(events, tone, text);
    }

    Ok(())
}
