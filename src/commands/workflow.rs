//! Workflow authoring: starter template, preview, diff, and deploy.
//!
//! Preview and deploy share one flow: render `workflow.yaml`, convert it to
//! JSON, diff against `.out/workflow.json` when it exists, then ask before
//! overwriting the cache. Deploy only talks to the API after a yes.

use std::{fs, io::ErrorKind, path::Path};

use reqwest::Method;
use tracing::debug;

use crate::{
    api::{ApiRequest, Transport, collection_path, format_response},
    commands::Session,
    diagnostics::Diagnostics,
    error::{Error, Result},
    external::DiffOutcome,
    palette::{fmt_success, fmt_warning},
    paths::Workspace,
    template::{STARTER_WORKFLOW, render_source},
};

/// Entity the workflow flows post to.
const WORKFLOWS: &str = "workflows";

/// Write the starter `workflow.yaml`, refusing to overwrite.
pub fn create_starter(workspace: &Workspace) -> Result<()> {
    let path = workspace.workflow_path();
    if path.exists() {
        return Err(Error::PathExists { path });
    }

    fs::write(&path, STARTER_WORKFLOW).map_err(|error| Error::FileWrite {
        path: path.clone(),
        source: error,
    })?;

    println!("Created {}", path.display());
    println!("\nEdit it, then run `n8nctl workflows preview` to check the JSON.");
    Ok(())
}

/// Show the JSON translation and diff, then offer to cache it.
///
/// Returns whether the user confirmed and the cache was written.
pub fn preview(session: &Session<'_>) -> Result<bool> {
    let json = translate(session)?;
    let cache_path = session.workspace.cache_path();

    println!("Workflow JSON preview:");
    println!("{}", String::from_utf8_lossy(&json));

    match read_cache(&cache_path)? {
        Some(old) => {
            println!("\nShowing diff between existing and new workflow JSON:");
            show_diff(session, &old, &json)?;
        }
        None => println!(
            "\nNo existing {} found, skipping diff.",
            cache_path.display()
        ),
    }

    println!();
    let question = format!("Write this JSON to {}?", cache_path.display());
    if !session.prompt.confirm(&question)? {
        println!(
            "{}",
            fmt_warning("Aborted, no changes written.", session.use_color)
        );
        return Ok(false);
    }

    write_cache(session.workspace, &json)?;
    println!(
        "\n{}",
        fmt_success(
            &format!("Saved to {}", cache_path.display()),
            session.use_color
        )
    );
    Ok(true)
}

/// Diff the current translation against the cache without prompting.
pub fn diff(session: &Session<'_>) -> Result<()> {
    let workflow_path = session.workspace.workflow_path();
    if !workflow_path.exists() {
        return Err(Error::WorkflowMissing {
            path: workflow_path,
        });
    }

    let cache_path = session.workspace.cache_path();
    let Some(old) = read_cache(&cache_path)? else {
        return Err(Error::CacheMissing { path: cache_path });
    };

    let json = translate(session)?;
    show_diff(session, &old, &json)
}

/// Run the preview flow and, once confirmed, post the cached JSON.
pub async fn deploy<T: Transport>(session: &Session<'_>, transport: &T) -> Result<()> {
    if !preview(session)? {
        println!("Deploy aborted by user.");
        return Ok(());
    }

    let cache_path = session.workspace.cache_path();
    let body = fs::read_to_string(&cache_path).map_err(|error| Error::FileRead {
        path: cache_path.clone(),
        source: error,
    })?;

    let request = ApiRequest::new(Method::POST, collection_path(WORKFLOWS)).with_body(body);
    let response = transport.send(&request).await?;
    println!("{}", format_response(&response));
    Ok(())
}

/// Render `workflow.yaml` and convert it to JSON.
fn translate(session: &Session<'_>) -> Result<Vec<u8>> {
    let mut diagnostics = Diagnostics::new();
    let yaml = render_source(session.workspace, &mut diagnostics)?;
    let json = session.converter.convert(&yaml)?;
    diagnostics.print_warning_summary();
    Ok(json)
}

/// Print the diff between cached and fresh JSON.
fn show_diff(session: &Session<'_>, old: &[u8], new: &[u8]) -> Result<()> {
    match session.differ.diff(old, new)? {
        DiffOutcome::Identical => println!("No differences detected."),
        DiffOutcome::Changed(text) => print!("{text}"),
    }
    Ok(())
}

/// Read the cached JSON, or `None` when it has not been written yet.
fn read_cache(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => Err(Error::FileRead {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}

/// Overwrite the cached JSON, creating `.out/` when needed.
fn write_cache(workspace: &Workspace, json: &[u8]) -> Result<()> {
    let dir = workspace.cache_dir();
    fs::create_dir_all(&dir).map_err(|error| Error::FileWrite {
        path: dir.clone(),
        source: error,
    })?;

    let path = workspace.cache_path();
    fs::write(&path, json).map_err(|error| Error::FileWrite {
        path: path.clone(),
        source: error,
    })?;
    debug!(path = %path.display(), bytes = json.len(), "wrote workflow cache");
    Ok(())
}
