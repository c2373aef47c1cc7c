//! Setup sequencer: ordered preparation phases, module verification, the
//! integrity check, and the boot opt-in prompt.

use crate::engine::pacing::Pacing;
use crate::engine::{note, progress, read_line, say};
use crate::entropy::EntropySource;
use crate::model::{Manifest, ManifestEntry, RunOutcome, SimConfig, SimEvent, Tone};
use crate::sandbox::Sandbox;
use crate::script::{self, ArtifactAction, SetupPhase};
use anyhow::Result;
use std::path::PathBuf;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub(crate) struct SetupSequencer<'a> {
    pub cfg: &'a SimConfig,
    pub pacing: Pacing,
    pub entropy: &'a dyn EntropySource,
    pub events: &'a UnboundedSender<SimEvent>,
}

impl SetupSequencer<'_> {
    /// Execute the setup phases in declaration order, then prompt for the
    /// boot opt-in.
    ///
    /// A sandbox directory that cannot be created aborts the run before any
    /// phase executes; no artifact is written in that case.
    pub(crate) async fn run(
        &self,
        input_rx: &mut UnboundedReceiver<String>,
    ) -> Result<RunOutcome> {
        let sandbox = match Sandbox::create(&self.cfg.env_dir) {
            Ok(sandbox) => sandbox,
            Err(e) => {
                say(
                    self.events,
                    Tone::Error,
                    format!(
                        "Failed to create environment directory {}: {e:#}",
                        self.cfg.env_dir.display()
                    ),
                );
                return Ok(RunOutcome::AbortedDirectoryError);
            }
        };
        say(
            self.events,
            Tone::Success,
            format!("Environment directory: ./{}", sandbox.root().display()),
        );
        self.pacing.delay(script::INTRO_PAUSE).await;

        let mut recorded = Vec::new();
        for phase in script::SETUP_PHASES {
            say(self.events, Tone::Notice, phase.announce);
            if let Some(bar) = phase.progress {
                progress(self.events, self.pacing, bar.label, bar.duration).await;
            }
            let (path, verb) = self.write_artifact(&sandbox, phase)?;
            recorded.push(ManifestEntry {
                name: phase.file_name.to_string(),
                bytes: sandbox.artifact_size(phase.file_name)?,
            });
            note(
                self.events,
                Tone::Success,
                format!("-> {} {}", verb, path.display()),
            );
            self.pacing.delay(phase.settle).await;
        }

        say(self.events, Tone::Accent, "Verifying image and modules...");
        for (i, module) in script::MODULES.iter().enumerate() {
            let label = format!("{:>2}. {}", i + 1, module);
            progress(
                self.events,
                self.pacing,
                &label,
                script::MODULE_CHECK_DURATION,
            )
            .await;
            note(self.events, Tone::Success, "  OK");
        }
        self.pacing.delay(script::MODULE_SETTLE).await;

        say(
            self.events,
            Tone::Notice,
            "Performing integrity check (simulated SHA256)...",
        );
        progress(
            self.events,
            self.pacing,
            script::INTEGRITY_CHECK.label,
            script::INTEGRITY_CHECK.duration,
        )
        .await;
        let checksum = self.entropy.hex(self.cfg.checksum_hex_len);
        note(self.events, Tone::Success, format!("sha256: {checksum}"));
        self.pacing.delay(script::CHECKSUM_SETTLE).await;

        let manifest = Manifest {
            timestamp_utc: rfc3339_now(),
            config: self.cfg.clone(),
            artifacts: recorded,
        };
        let manifest_path = sandbox.write_manifest(script::MANIFEST, &manifest)?;
        note(
            self.events,
            Tone::Plain,
            format!("-> recorded {}", manifest_path.display()),
        );

        say(
            self.events,
            Tone::Success,
            "4D Kernel image prepared successfully (SIMULATION MODE)",
        );
        self.pacing.delay(script::SUCCESS_PAUSE).await;

        say(
            self.events,
            Tone::Accent,
            "Would you like to simulate boot now? (y/N)",
        );
        let _ = self.events.send(SimEvent::PromptShown {
            text: script::SETUP_PROMPT.to_string(),
        });
        let response = read_line(input_rx).await;
        if wants_boot(&response) {
            Ok(RunOutcome::CompletedBootRequested)
        } else {
            Ok(RunOutcome::CompletedNoBootRequested)
        }
    }

    fn write_artifact(
        &self,
        sandbox: &Sandbox,
        phase: &SetupPhase,
    ) -> Result<(PathBuf, &'static str)> {
        let path = match phase.action {
            ArtifactAction::KernelImage => {
                sandbox.write_image(phase.file_name, self.cfg.image_kb, self.entropy)?
            }
            ArtifactAction::Initramfs => {
                sandbox.write_text(phase.file_name, script::INITRAMFS_CONTENT)?
            }
            ArtifactAction::RuntimeConfig => {
                sandbox.write_text(phase.file_name, script::RUNTIME_CONF_CONTENT)?
            }
            ArtifactAction::IntegrityHex => {
                sandbox.write_hex(phase.file_name, self.cfg.artifact_hex_len, self.entropy)?
            }
            ArtifactAction::ServiceSample => {
                sandbox.write_text(phase.file_name, script::SERVICE_SAMPLE_CONTENT)?
            }
        };
        let verb = match phase.action {
            ArtifactAction::RuntimeConfig | ArtifactAction::ServiceSample => "wrote",
            ArtifactAction::IntegrityHex => "saved",
            _ => "created",
        };
        Ok((path, verb))
    }
}

/// The opt-in matches any input whose first character is `y`, case
/// insensitive.
fn wants_boot(input: &str) -> bool {
    matches!(input.chars().next(), Some('y') | Some('Y'))
}

fn rfc3339_now() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "now".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opt_in_matches_leading_y_only() {
        assert!(wants_boot("y"));
        assert!(wants_boot("Y"));
        assert!(wants_boot("yes please"));
        assert!(!wants_boot(""));
        assert!(!wants_boot("n"));
        assert!(!wants_boot("maybe"));
        assert!(!wants_boot(" y"));
    }
}
