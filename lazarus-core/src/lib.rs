//! Core of the lazarus client: backend access, run orchestration, view state,
//! and presentation rules. Nothing here touches the terminal.

pub mod backend;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod pacing;
pub mod presentation;
pub mod types;
pub mod view;
