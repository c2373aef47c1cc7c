//! The fixed script: setup phases, module list, boot log lines, artifact
//! texts. Everything the simulator shows or writes is declared here as
//! ordered data, so tests can assert ordering and content directly.

use crate::model::Severity;
use std::path::Path;
use std::time::Duration;

pub const KERNEL_IMAGE: &str = "4d-kernel.img";
pub const INITRAMFS: &str = "4d-initramfs.cpio.gz";
pub const RUNTIME_CONF: &str = "4d.conf";
pub const ARTIFACT_HEX: &str = "artifact.hex";
pub const SERVICE_SAMPLE: &str = "4d-kernel.service.sample";
pub const MANIFEST: &str = "manifest.json";

/// What a setup phase writes into the sandbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactAction {
    KernelImage,
    Initramfs,
    RuntimeConfig,
    IntegrityHex,
    ServiceSample,
}

/// An inline progress animation: label shown next to the bar and the total
/// animation duration it is paced over.
#[derive(Debug, Clone, Copy)]
pub struct ProgressSpec {
    pub label: &'static str,
    pub duration: Duration,
}

/// One ordered setup phase: announcement, optional progress animation, the
/// artifact it produces, and a settle pause before the next phase.
#[derive(Debug, Clone, Copy)]
pub struct SetupPhase {
    pub announce: &'static str,
    pub progress: Option<ProgressSpec>,
    pub file_name: &'static str,
    pub action: ArtifactAction,
    pub settle: Duration,
}

/// The five artifact-producing phases, in fixed execution order.
pub const SETUP_PHASES: &[SetupPhase] = &[
    SetupPhase {
        announce: "Generating 4D kernel image...",
        progress: Some(ProgressSpec {
            label: "module-compile",
            duration: Duration::from_millis(1300),
        }),
        file_name: KERNEL_IMAGE,
        action: ArtifactAction::KernelImage,
        settle: Duration::from_millis(250),
    },
    SetupPhase {
        announce: "Creating compressed initramfs (simulated)...",
        progress: Some(ProgressSpec {
            label: "initramfs-pack",
            duration: Duration::from_millis(900),
        }),
        file_name: INITRAMFS,
        action: ArtifactAction::Initramfs,
        settle: Duration::from_millis(250),
    },
    SetupPhase {
        announce: "Writing runtime configuration...",
        progress: None,
        file_name: RUNTIME_CONF,
        action: ArtifactAction::RuntimeConfig,
        settle: Duration::from_millis(200),
    },
    SetupPhase {
        announce: "Generating integrity artifact (sha-sim)...",
        progress: Some(ProgressSpec {
            label: "artifact",
            duration: Duration::from_millis(700),
        }),
        file_name: ARTIFACT_HEX,
        action: ArtifactAction::IntegrityHex,
        settle: Duration::from_millis(200),
    },
    SetupPhase {
        announce: "Preparing service descriptor (sample)...",
        progress: None,
        file_name: SERVICE_SAMPLE,
        action: ArtifactAction::ServiceSample,
        settle: Duration::from_millis(200),
    },
];

/// Modules "verified" one by one during setup, each with its own short
/// progress animation and OK status.
pub const MODULES: &[&str] = &[
    "chrono_scheduler.kmod",
    "entropy_bridge.kmod",
    "slice_manager.kmod",
    "quantum_sandbox.kmod",
    "retro_compat.kmod",
];

pub const MODULE_CHECK_DURATION: Duration = Duration::from_millis(350);
pub const MODULE_SETTLE: Duration = Duration::from_millis(120);

pub const INTEGRITY_CHECK: ProgressSpec = ProgressSpec {
    label: "sha256-sim",
    duration: Duration::from_millis(1000),
};
pub const CHECKSUM_SETTLE: Duration = Duration::from_millis(180);

pub const INTRO_PAUSE: Duration = Duration::from_millis(200);
pub const SUCCESS_PAUSE: Duration = Duration::from_millis(250);

pub const FAULT_HOLD: Duration = Duration::from_millis(800);
pub const RECOVER_HOLD: Duration = Duration::from_millis(350);

pub const RECOVERY_PROGRESS: ProgressSpec = ProgressSpec {
    label: "drift-correct",
    duration: Duration::from_millis(1200),
};

pub const SETUP_PROMPT: &str = "> ";
pub const BOOT_PROMPT: &str = "4d# ";

pub const EARLY_LINES: &[(Severity, &str)] = &[
    (Severity::Info, "Booting 4D Kernel Simulator v4.0-sim"),
    (Severity::Ok, "Setting up CPU micro-slices [OK]"),
    (Severity::Ok, "Initializing chrono-scheduler [OK]"),
    (
        Severity::Ok,
        "Probing pseudo-hardware: temporal bus, entropy bridge [OK]",
    ),
    (Severity::Info, "Mounting pseudo rootfs: /simroot [RO]"),
    (
        Severity::Info,
        "Loading main modules: chrono_scheduler, slice_manager, quantum_sandbox",
    ),
];

pub const MID_LINES: &[(Severity, &str)] = &[
    (Severity::Ok, "Activating inter-slice comms [OK]"),
    (Severity::Ok, "Registering 4th-dimension manager [OK]"),
    (Severity::Info, "Spawning temporal worker threads x16"),
    (Severity::Info, "Entropy bridge calibration: 0.9 -> 0.98"),
    (Severity::Ok, "Virtual devices: /dev/slice0, /dev/slice1 [OK]"),
];

pub const FAULT_LINE: (Severity, &str) =
    (Severity::Warn, "WARNING: Temporal skew detected on slice1");

pub const RECOVER_ATTEMPT_LINE: (Severity, &str) = (
    Severity::Warn,
    "Attempting corrective drift compensation...",
);

pub const RECOVER_DONE_LINE: (Severity, &str) =
    (Severity::Ok, "Compensation complete. No data loss.");

/// Late-stage lines; one references the integrity artifact written during
/// setup, so the list is built against the sandbox path.
pub fn late_lines(env_dir: &Path) -> Vec<(Severity, String)> {
    vec![
        (Severity::Ok, "Starting user-land shim (simulated)".into()),
        (Severity::Ok, "Applying policy: temporal-safe-mode".into()),
        (Severity::Ok, "Network stack: disabled (simulation)".into()),
        (
            Severity::Ok,
            format!("Loading artifact: {}", env_dir.join(ARTIFACT_HEX).display()),
        ),
        (Severity::Ok, "Kernel prompt: 4d#".into()),
    ]
}

/// Fixed response to the `status` boot command.
pub const STATUS_LINES: &[&str] = &[
    "4D Kernel Status: All temporal slices nominal.",
    "Uptime: 0 days, 0:00:12 (simulated)",
    "Active workers: 16",
];

pub const INITRAMFS_CONTENT: &str = "SIMULATED_INITRAMFS_ARCHIVE_CONTENT\n";

pub const RUNTIME_CONF_CONTENT: &str = r#"# 4D Kernel simulated config
[core]
name = "4d-kernel-sim"
version = "4.0-sim"
mode = "temporal-safe"
max_dimensions = 4

[modules]
module0 = "chrono_scheduler"
module1 = "entropy-bridge"
module2 = "slice-manager"
module3 = "quantum-sandbox"
"#;

pub const SERVICE_SAMPLE_CONTENT: &str = r#"# 4d-kernel.service.sample (DO NOT ENABLE - sample only)
[Unit]
Description=4D Kernel Simulation (sample)
After=network.target

[Service]
Type=oneshot
ExecStart=/bin/echo "This is a sample service file. DO NOT enable on production."
RemainAfterExit=yes

[Install]
WantedBy=multi-user.target
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_phases_declared_in_fixed_order() {
        let names: Vec<&str> = SETUP_PHASES.iter().map(|p| p.file_name).collect();
        assert_eq!(
            names,
            vec![
                KERNEL_IMAGE,
                INITRAMFS,
                RUNTIME_CONF,
                ARTIFACT_HEX,
                SERVICE_SAMPLE
            ]
        );
    }

    #[test]
    fn each_phase_action_matches_its_file() {
        for phase in SETUP_PHASES {
            let expected = match phase.action {
                ArtifactAction::KernelImage => KERNEL_IMAGE,
                ArtifactAction::Initramfs => INITRAMFS,
                ArtifactAction::RuntimeConfig => RUNTIME_CONF,
                ArtifactAction::IntegrityHex => ARTIFACT_HEX,
                ArtifactAction::ServiceSample => SERVICE_SAMPLE,
            };
            assert_eq!(phase.file_name, expected);
        }
    }

    #[test]
    fn module_list_has_five_entries() {
        assert_eq!(MODULES.len(), 5);
        for m in MODULES {
            assert!(m.ends_with(".kmod"));
        }
    }

    #[test]
    fn late_lines_reference_the_integrity_artifact() {
        let lines = late_lines(Path::new("4d_kernel_env"));
        assert_eq!(lines.len(), 5);
        assert!(lines
            .iter()
            .any(|(_, l)| l.contains("4d_kernel_env") && l.contains(ARTIFACT_HEX)));
    }

    #[test]
    fn status_block_reports_nominal_slices() {
        assert!(STATUS_LINES[0].contains("All temporal slices nominal."));
    }
}
