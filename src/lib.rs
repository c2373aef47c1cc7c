//! Theatrical "4D kernel" setup & boot simulator.
//!
//! Renders a scripted, timed sequence of status lines, progress bars, and
//! placeholder artifact files to simulate installing and booting a
//! fictional system. Purely a terminal presentation tool: all file
//! operations are confined to a local sandbox directory, and nothing
//! privileged or real ever happens.
//!
//! The engine ([`engine::Simulator`]) drives the ordered script and emits
//! [`model::SimEvent`]s; the console layer renders them. Pacing and
//! randomness are injectable, so the whole sequence is testable without
//! wall-clock timing or a terminal.

pub mod cli;
pub mod console;
pub mod dispatch;
pub mod engine;
pub mod entropy;
pub mod model;
pub mod sandbox;
pub mod script;
