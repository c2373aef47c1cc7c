//! Boot prompt command dispatch.
//!
//! The prompt recognizes a fixed vocabulary; parsing and response building
//! are pure so the dispatch table is unit-testable without a terminal.

use crate::entropy::EntropySource;
use crate::model::Tone;
use crate::script;

/// A parsed boot prompt command. Every input maps to exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootCommand {
    Status,
    DumpArtifact,
    Empty,
    Unknown(String),
}

impl BootCommand {
    pub fn parse(input: &str) -> Self {
        let input = input.trim_end_matches(['\r', '\n']);
        match input {
            "status" => BootCommand::Status,
            "dump artifact" => BootCommand::DumpArtifact,
            "" => BootCommand::Empty,
            other => BootCommand::Unknown(other.to_string()),
        }
    }
}

/// Build the response lines for a dispatched command.
///
/// `dump artifact` shows a freshly generated preview, not the stored
/// artifact.
pub fn respond(cmd: &BootCommand, entropy: &dyn EntropySource, preview_len: usize) -> Vec<(Tone, String)> {
    match cmd {
        BootCommand::Status => script::STATUS_LINES
            .iter()
            .map(|l| (Tone::Accent, (*l).to_string()))
            .collect(),
        BootCommand::DumpArtifact => vec![(
            Tone::Notice,
            format!("Artifact preview: {}", entropy.hex(preview_len)),
        )],
        BootCommand::Empty => vec![(Tone::Notice, "(no-op) returning to host".to_string())],
        BootCommand::Unknown(cmd) => vec![(
            Tone::Error,
            format!("{}: command not found (simulation)", cmd),
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEntropy;

    impl EntropySource for FixedEntropy {
        fn hex(&self, n: usize) -> String {
            "abcdef0123456789".chars().cycle().take(n).collect()
        }

        fn bytes(&self, n: usize) -> Vec<u8> {
            vec![0xab; n]
        }
    }

    #[test]
    fn parse_recognizes_the_fixed_vocabulary() {
        assert_eq!(BootCommand::parse("status"), BootCommand::Status);
        assert_eq!(BootCommand::parse("dump artifact"), BootCommand::DumpArtifact);
        assert_eq!(BootCommand::parse(""), BootCommand::Empty);
        assert_eq!(
            BootCommand::parse("banana"),
            BootCommand::Unknown("banana".into())
        );
    }

    #[test]
    fn parse_is_exact_match_not_prefix_match() {
        assert_eq!(
            BootCommand::parse("status please"),
            BootCommand::Unknown("status please".into())
        );
        assert_eq!(
            BootCommand::parse("dump"),
            BootCommand::Unknown("dump".into())
        );
    }

    #[test]
    fn parse_strips_line_terminators_only() {
        assert_eq!(BootCommand::parse("status\n"), BootCommand::Status);
        assert_eq!(BootCommand::parse("\r\n"), BootCommand::Empty);
        assert_eq!(
            BootCommand::parse(" status"),
            BootCommand::Unknown(" status".into())
        );
    }

    #[test]
    fn status_response_reports_nominal_slices() {
        let lines = respond(&BootCommand::Status, &FixedEntropy, 48);
        assert!(lines
            .iter()
            .any(|(_, l)| l.contains("All temporal slices nominal.")));
    }

    #[test]
    fn dump_artifact_generates_a_fresh_preview() {
        let lines = respond(&BootCommand::DumpArtifact, &FixedEntropy, 48);
        assert_eq!(lines.len(), 1);
        let preview = lines[0].1.strip_prefix("Artifact preview: ").unwrap();
        assert_eq!(preview.len(), 48);
        assert!(preview.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn unknown_command_echoes_the_input() {
        let lines = respond(
            &BootCommand::Unknown("banana".into()),
            &FixedEntropy,
            48,
        );
        assert!(lines[0].1.contains("banana"));
        assert!(lines[0].1.contains("command not found"));
    }

    #[test]
    fn empty_input_is_a_noop_acknowledgment() {
        let lines = respond(&BootCommand::Empty, &FixedEntropy, 48);
        assert!(lines[0].1.contains("no-op"));
    }
}
