//! Error types for the n8nctl CLI.

use std::{io, path::PathBuf, process::ExitCode, result::Result as StdResult};

use thiserror::Error;

/// Result type for n8nctl operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// The CLI was invoked without a command.
    #[error("No command given. Run `n8nctl --help` for usage.")]
    MissingCommand,
    /// The requested entity is not in the registry.
    #[error("Unknown entity: {entity}")]
    UnknownEntity {
        /// Entity name as typed.
        entity: String,
    },
    /// An entity was given without an action.
    #[error("{entity} requires an action. Use --help for available actions.")]
    MissingAction {
        /// Entity name.
        entity: String,
    },
    /// The requested action is not registered for the entity.
    #[error("Unknown action for {entity}: {action}")]
    UnknownAction {
        /// Entity name.
        entity: String,
        /// Action name as typed.
        action: String,
    },
    /// The action needs an ID and none was supplied.
    #[error("Action '{action}' requires an ID parameter")]
    MissingId {
        /// Action name.
        action: String,
    },
    /// Arguments after the entity name could not be parsed.
    #[error("Invalid arguments: {message}")]
    InvalidArguments {
        /// Parser message.
        message: String,
    },
    /// A workflow-only action was requested for another entity.
    #[error("{action} not supported for {entity}")]
    Unsupported {
        /// Entity name.
        entity: String,
        /// Action name.
        action: String,
    },
    /// No config file exists yet.
    #[error("No config found at {path}.\nPlease run `n8nctl login` first.")]
    ConfigMissing {
        /// Path to the config file.
        path: PathBuf,
    },
    /// The configuration file could not be read.
    #[error("Failed to read config at {path}: {source}\nPlease run `n8nctl login` first.")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The configuration file could not be parsed.
    #[error("Failed to parse config at {path}: {source}\nPlease run `n8nctl login` first.")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// The configuration file is missing the token or base URL.
    #[error("Config at {path} is missing the API token or base URL.\nPlease run `n8nctl login` first.")]
    ConfigIncomplete {
        /// Path to the config file.
        path: PathBuf,
    },
    /// The configuration could not be serialized.
    #[error("Failed to serialize config: {source}")]
    ConfigSerialize {
        /// Underlying serialization error.
        source: serde_json::Error,
    },
    /// The configuration file could not be written.
    #[error("Failed to write config at {path}: {source}")]
    ConfigWrite {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Home directory resolution failed.
    #[error("Failed to resolve the home directory.")]
    HomeDirMissing,
    /// Login was attempted without both a token and a base URL.
    #[error("Both token and base-url are required")]
    LoginFieldsMissing,
    /// A base URL was not an absolute http(s) URL.
    #[error("Invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL.
        url: String,
    },
    /// An interactive prompt was interrupted or canceled.
    #[error("Prompt canceled.")]
    PromptCanceled,
    /// An interactive prompt failed.
    #[error("Prompt failed: {message}")]
    PromptFailed {
        /// Error message describing the prompt failure.
        message: String,
    },
    /// Standard input could not be read.
    #[error("Error reading stdin: {source}")]
    StdinRead {
        /// Underlying IO error.
        source: io::Error,
    },
    /// A file that would be created already exists.
    #[error("{path} already exists")]
    PathExists {
        /// Path that already exists.
        path: PathBuf,
    },
    /// The workflow source file does not exist.
    #[error("{path} not found")]
    WorkflowMissing {
        /// Expected workflow source path.
        path: PathBuf,
    },
    /// The cached workflow JSON does not exist.
    #[error("{path} does not exist, please run preview and save the JSON first")]
    CacheMissing {
        /// Expected cache path.
        path: PathBuf,
    },
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    FileRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A file could not be written.
    #[error("Failed to write {path}: {source}")]
    FileWrite {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// An external tool is not installed.
    #[error("`{tool}` not found. Install it with: {hint}")]
    ToolMissing {
        /// Program name.
        tool: String,
        /// Install hint.
        hint: &'static str,
    },
    /// An external tool could not be started or talked to.
    #[error("Failed to run `{tool}`: {source}")]
    ToolSpawn {
        /// Program name.
        tool: String,
        /// Underlying IO error.
        source: io::Error,
    },
    /// An external tool exited unsuccessfully.
    #[error("{tool} failed: {message}")]
    ToolFailed {
        /// Program name.
        tool: String,
        /// The tool's error output or exit status.
        message: String,
    },
    /// A temporary file for diff input could not be prepared.
    #[error("Failed to prepare temp file: {source}")]
    TempFile {
        /// Underlying IO error.
        source: io::Error,
    },
    /// The HTTP request could not be sent or its body read.
    #[error("Request to {url} failed: {source}")]
    Request {
        /// Request URL.
        url: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// The API answered with a non-2xx status.
    #[error("API error: {status}\n{body}")]
    Api {
        /// Status line, e.g. `404 Not Found`.
        status: String,
        /// Raw response body.
        body: String,
    },
}

impl Error {
    /// Map errors to exit codes for CLI termination.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(1)
    }
}
