#![warn(missing_docs)]
//! Library support for the n8nctl CLI.

/// Requests, transport, and response handling for the n8n API.
mod api;
/// Command-line interface wiring and dispatch.
mod cli;
/// Command implementations.
mod commands;
/// Credential storage.
mod config;
/// Common diagnostics and warning aggregation.
mod diagnostics;
/// Error handling for the crate.
mod error;
/// YAML converter and diff tool processes.
mod external;
/// Color palette and styling for CLI output.
mod palette;
/// Config location and workflow file layout.
mod paths;
/// Interactive prompts.
mod prompt;
/// Entities and the actions they support.
mod registry;
/// Workflow source rendering.
mod template;
/// Fakes and fixtures shared by unit tests.
#[cfg(test)]
mod testutil;

pub use crate::error::{Error, Result};

/// Run the CLI, returning a structured error on failure.
pub async fn run() -> Result<()> {
    cli::run().await
}
