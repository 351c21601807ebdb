// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! The `do` command

use std::path::Path;
use std::sync::Arc;

use crate::chat::{Orchestrator, RequestContext};
use crate::cli::args::DoArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::gate::DialoguerPrompter;
use crate::llm::factory::ProviderFactory;
use crate::tools::shell::ShellRunner;

/// Execute a natural-language request.
///
/// Configuration and the `--file` path are checked before the backend is
/// contacted, so those failures leave nothing behind.
pub async fn execute(args: &DoArgs, settings: &Settings, working_directory: &Path) -> Result<()> {
    let handle = ProviderFactory::create(settings)?;
    let context = RequestContext::load(args.prompt(), args.file.as_deref())?;

    let orchestrator = Orchestrator::new(
        handle,
        Arc::new(ShellRunner::new()),
        Arc::new(DialoguerPrompter::new()),
        working_directory,
    );
    let turns = orchestrator.run(context).await?;
    tracing::debug!(turns, "request finished");

    Ok(())
}
