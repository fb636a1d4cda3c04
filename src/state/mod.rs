//! State management for archive runs
//!
//! This module defines the run state machine the orchestrator follows.

mod run_state;

pub use run_state::RunState;
