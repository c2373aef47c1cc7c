use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Sandbox directory all file operations are confined to.
    pub env_dir: PathBuf,
    pub image_kb: u64,
    pub artifact_hex_len: usize,
    pub checksum_hex_len: usize,
    pub preview_hex_len: usize,
    #[serde(with = "humantime_serde")]
    pub early_line_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub mid_line_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub late_line_delay: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            env_dir: PathBuf::from("4d_kernel_env"),
            image_kb: 48,
            artifact_hex_len: 128,
            checksum_hex_len: 64,
            preview_hex_len: 48,
            early_line_delay: Duration::from_millis(450),
            mid_line_delay: Duration::from_millis(400),
            late_line_delay: Duration::from_millis(350),
        }
    }
}

/// Severity class of a boot log line. Maps to a timestamp color in the
/// console layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Ok,
}

/// Decorative color class for non-log output (announcements, notes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Accent,
    Notice,
    Success,
    Error,
    Headline,
}

/// Final state of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    CompletedNoBootRequested,
    CompletedBootRequested,
    AbortedDirectoryError,
}

/// Events emitted by the engine and consumed by presentation layers.
///
/// The engine never touches the terminal; everything it wants shown travels
/// through this enum, which also makes the full output sequence capturable
/// in tests.
#[derive(Debug, Clone)]
pub enum SimEvent {
    BannerShown,
    /// A theatrical line, typed character by character.
    Announce { tone: Tone, text: String },
    /// A plain line printed at once.
    Note { tone: Tone, text: String },
    /// One frame of an inline progress bar; redrawn over the same line.
    ProgressTick {
        label: String,
        filled: usize,
        total: usize,
        pct: u8,
    },
    /// Terminates the progress line.
    ProgressDone,
    /// A timestamped boot log line.
    LogLine {
        stamp: String,
        severity: Severity,
        text: String,
    },
    /// An input prompt, printed without a trailing newline.
    PromptShown { text: String },
}

/// Record of one artifact written during setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub bytes: u64,
}

/// Run manifest recorded alongside the artifacts after setup completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub timestamp_utc: String,
    pub config: SimConfig,
    pub artifacts: Vec<ManifestEntry>,
}
