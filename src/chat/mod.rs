// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Request handling
//!
//! Builds the context sent to the backend and runs the turn loop that
//! dispatches the selected tool.

mod context;
mod engine;
mod handlers;

pub use context::{RequestContext, GREETING, SYSTEM_PROMPT};
pub use engine::{Orchestrator, TurnOutcome};
