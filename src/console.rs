//! Console presentation: renders engine events into ANSI-styled frames and
//! owns the blocking stdout writer task.
//!
//! Rendering is pure (`SimEvent` in, frames out); only the writer touches
//! the terminal, so the visual layer stays testable without one.

use crate::model::{Severity, SimEvent, Tone};
use crossterm::style::Stylize;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

/// One unit of terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A full line, newline-terminated.
    Line(String),
    /// Written as-is and flushed; used for prompts and progress redraws.
    Partial(String),
    /// A line typed character by character.
    Typed(String),
}

const BANNER: &str = r#"  _  _   ____    _  _  _____  ____   _  _  _____  _
 | || | |  _ \  | |/ /| ____||  _ \ | \| || ____|| |
 | || |_| | | | | ' / |  _|  |  _ < |  \| ||  _|  | |
 |__   _| |_| | | . \ | |___ | | \ \| |\  || |___ | |___
    |_| |____/  |_|\_\|_____||_|  \_\_| \_||_____||_____|"#;

fn toned(tone: Tone, text: &str) -> String {
    match tone {
        Tone::Plain => text.to_string(),
        Tone::Accent => text.cyan().to_string(),
        Tone::Notice => text.yellow().to_string(),
        Tone::Success => text.green().to_string(),
        Tone::Error => text.red().to_string(),
        Tone::Headline => text.magenta().to_string(),
    }
}

fn stamped(stamp: &str, severity: Severity, text: &str) -> String {
    let bracket = format!("[{stamp}]");
    let colored = match severity {
        Severity::Info => bracket.blue(),
        Severity::Warn => bracket.red(),
        Severity::Ok => bracket.green(),
    };
    format!("{} {}", colored, text)
}

/// Render one engine event into zero or more output frames.
pub fn render(event: &SimEvent) -> Vec<Frame> {
    match event {
        SimEvent::BannerShown => vec![
            Frame::Line(BANNER.magenta().bold().to_string()),
            Frame::Line(String::new()),
        ],
        SimEvent::Announce { tone, text } => vec![Frame::Typed(toned(*tone, text))],
        SimEvent::Note { tone, text } => vec![Frame::Line(toned(*tone, text))],
        SimEvent::ProgressTick {
            label,
            filled,
            total,
            pct,
        } => {
            let bar = format!(
                "{} [{}{}] {:>3}%",
                label,
                "#".repeat(*filled),
                "-".repeat(total - filled),
                pct
            );
            vec![Frame::Partial(format!("\r{}", bar.cyan()))]
        }
        SimEvent::ProgressDone => vec![Frame::Line(String::new())],
        SimEvent::LogLine {
            stamp,
            severity,
            text,
        } => vec![Frame::Line(stamped(stamp, *severity, text))],
        SimEvent::PromptShown { text } => {
            vec![Frame::Partial(text.as_str().magenta().to_string())]
        }
    }
}

/// Spawn a blocking writer task that owns stdout.
///
/// `type_delay_ms` is the per-character delay for [`Frame::Typed`]; zero
/// prints typed lines whole.
pub fn spawn_console_writer(
    type_delay_ms: u64,
) -> (mpsc::UnboundedSender<Frame>, tokio::task::JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Frame>();
    let handle = tokio::task::spawn_blocking(move || {
        let mut out = std::io::stdout();
        while let Some(frame) = rx.blocking_recv() {
            match frame {
                Frame::Line(text) => {
                    let _ = writeln!(out, "{}", text);
                }
                Frame::Partial(text) => {
                    let _ = write!(out, "{}", text);
                    let _ = out.flush();
                }
                Frame::Typed(text) => {
                    if type_delay_ms == 0 {
                        let _ = writeln!(out, "{}", text);
                    } else {
                        for c in text.chars() {
                            let _ = write!(out, "{}", c);
                            let _ = out.flush();
                            std::thread::sleep(Duration::from_millis(type_delay_ms));
                        }
                        let _ = writeln!(out);
                    }
                }
            }
        }
        let _ = out.flush();
    });
    (tx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announce_renders_as_a_typed_line_containing_the_text() {
        let frames = render(&SimEvent::Announce {
            tone: Tone::Accent,
            text: "Preparing local sandbox environment...".into(),
        });
        assert_eq!(frames.len(), 1);
        match &frames[0] {
            Frame::Typed(s) => assert!(s.contains("Preparing local sandbox environment...")),
            other => panic!("expected typed frame, got {other:?}"),
        }
    }

    #[test]
    fn progress_tick_redraws_over_the_same_line() {
        let frames = render(&SimEvent::ProgressTick {
            label: "module-compile".into(),
            filled: 9,
            total: 36,
            pct: 25,
        });
        match &frames[0] {
            Frame::Partial(s) => {
                assert!(s.starts_with('\r'));
                assert!(s.contains("module-compile"));
                assert!(s.contains("#########"));
                assert!(s.contains("25%"));
            }
            other => panic!("expected partial frame, got {other:?}"),
        }
    }

    #[test]
    fn log_line_carries_the_bracketed_stamp() {
        let frames = render(&SimEvent::LogLine {
            stamp: "12:34:56".into(),
            severity: Severity::Warn,
            text: "WARNING: Temporal skew detected on slice1".into(),
        });
        match &frames[0] {
            Frame::Line(s) => {
                assert!(s.contains("[12:34:56]"));
                assert!(s.contains("Temporal skew"));
            }
            other => panic!("expected line frame, got {other:?}"),
        }
    }

    #[test]
    fn prompt_is_partial_so_input_stays_on_the_same_line() {
        let frames = render(&SimEvent::PromptShown {
            text: "4d# ".into(),
        });
        assert!(matches!(&frames[0], Frame::Partial(s) if s.contains("4d# ")));
    }
}
