//! CLI command implementations.

use std::io::{self, IsTerminal};

use crate::{
    external::{Converter, Differ},
    paths::Workspace,
    prompt::Prompt,
};

/// Output color handling selection.
#[derive(Debug, Clone, Copy)]
pub enum ColorChoice {
    /// Colorize only when output is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

impl ColorChoice {
    /// Determine whether color output should be enabled.
    pub(crate) fn enabled(self) -> bool {
        match self {
            Self::Auto => io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Local collaborators shared by the entity and workflow commands.
///
/// The CLI wires in the real terminal and external tools; tests substitute
/// fakes.
pub struct Session<'a> {
    /// Where `workflow.yaml`, `.env`, and `.out/` live.
    pub workspace: &'a Workspace,
    /// YAML-to-JSON converter.
    pub converter: &'a dyn Converter,
    /// Line diff tool.
    pub differ: &'a dyn Differ,
    /// Interactive prompts.
    pub prompt: &'a dyn Prompt,
    /// Whether to colorize output.
    pub use_color: bool,
}

// Command modules are ordered alphabetically - maintain this order.
/// Entity/action dispatch.
pub mod entity;
/// Top-level, entity, and schema help text.
pub mod help;
/// Login command implementation.
pub mod login;
/// Workflow preview, diff, deploy, and starter template.
pub mod workflow;
