//! Core of the quality gate: the check contract, the runner, scoring, the
//! ratchet, fix mode, and reporting, plus the shared plumbing they use.

pub mod check;
pub mod config;
pub mod error;
pub mod fix;
pub mod gate;
pub mod history;
pub mod logging;
pub mod output;
pub mod ratchet;
pub mod registry;
pub mod report;
pub mod runner;
pub mod score;
pub mod time;
pub mod workspace;
