//! Workflow source rendering: starter template, script inlining, and
//! `${{NAME}}` substitution from the env file.
//!
//! Rendering happens before the YAML reaches the external converter, so
//! everything here is plain text manipulation.

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::Path,
    sync::LazyLock,
};

use regex::{Captures, Regex};
use tracing::debug;

use crate::{
    diagnostics::Diagnostics,
    error::{Error, Result},
    paths::Workspace,
};

/// Written by `workflows create`.
pub const STARTER_WORKFLOW: &str = r#"name: Sample Workflow
nodes:
  - id: "1"
    name: Start
    type: n8n-nodes-base.manualTrigger
    typeVersion: 1
    position: [250, 300]
  - id: "2"
    name: HTTP Request
    type: n8n-nodes-base.httpRequest
    typeVersion: 1
    position: [450, 300]
    credentials:
      httpBasicAuth:
        id: "credential-id"
        name: "My HTTP Basic Auth"
    parameters:
      url: "https://jsonplaceholder.typicode.com/posts/1"
connections:
  Start:
    main:
      - - node: HTTP Request
          type: main
          index: 0
settings: {}
"#;

/// Marker that starts a script inclusion directive.
const SCRIPT_PREFIX: &str = "jsCode: file(";

/// Extra indentation for inlined script lines.
const SCRIPT_INDENT: &str = "  ";

/// `${{ NAME }}` with optional inner whitespace.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
});

/// Read `workflow.yaml` and apply script inlining and env substitution.
pub fn render_source(workspace: &Workspace, diagnostics: &mut Diagnostics) -> Result<String> {
    let path = workspace.workflow_path();
    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return Err(Error::WorkflowMissing { path });
        }
        Err(error) => return Err(Error::FileRead { path, source: error }),
    };

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut rendered = inline_scripts(&source, base_dir)?;

    if let Some(env) = load_env_file(&workspace.env_path())? {
        rendered = substitute_env(&rendered, &env);
    }

    for name in unresolved_placeholders(&rendered) {
        diagnostics.warn(format!("no value for ${{{{{name}}}}}; left unchanged"));
    }

    Ok(rendered)
}

/// Load `KEY=value` pairs from an env file, or `None` if it does not exist.
///
/// Entries are collected into a map; the process environment is untouched.
pub fn load_env_file(path: &Path) -> Result<Option<HashMap<String, String>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(error) => {
            return Err(Error::FileRead {
                path: path.to_path_buf(),
                source: error,
            });
        }
    };

    let env = parse_env(&contents);
    debug!(path = %path.display(), entries = env.len(), "loaded env file");
    Ok(Some(env))
}

/// Parse env file text.
///
/// Blank lines, `#` comments, and lines without `=` are skipped. Keys and
/// values are trimmed and surrounding `"` stripped from values. `$` is kept
/// literally.
pub fn parse_env(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            (
                key.trim().to_string(),
                value.trim().trim_matches('"').to_string(),
            )
        })
        .collect()
}

/// Replace `${{NAME}}` with values from `env`. Unknown names are kept verbatim.
pub fn substitute_env(yaml: &str, env: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(yaml, |captures: &Captures<'_>| match env.get(&captures[1]) {
            Some(value) => value.clone(),
            None => captures[0].to_string(),
        })
        .into_owned()
}

/// Names of placeholders still present in `yaml`, in order of first use.
pub fn unresolved_placeholders(yaml: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for captures in PLACEHOLDER.captures_iter(yaml) {
        let name = &captures[1];
        if !names.iter().any(|seen| seen == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Replace `jsCode: file(name)` lines with a block scalar holding the file.
///
/// Script paths are resolved against `base_dir`. Each script line is indented
/// one level deeper than the directive.
pub fn inline_scripts(yaml: &str, base_dir: &Path) -> Result<String> {
    if !yaml.contains(SCRIPT_PREFIX) {
        return Ok(yaml.to_string());
    }

    let mut output = Vec::new();
    for line in yaml.split('\n') {
        let Some(file_name) = script_directive(line) else {
            output.push(line.to_string());
            continue;
        };

        let script_path = base_dir.join(file_name);
        let script = read_script(&script_path)?;
        let indentation = &line[..line.len() - line.trim_start_matches(' ').len()];

        output.push(format!("{indentation}jsCode: |"));
        for script_line in script.split('\n') {
            output.push(format!("{indentation}{SCRIPT_INDENT}{script_line}"));
        }
        debug!(script = %script_path.display(), "inlined script");
    }

    Ok(output.join("\n"))
}

/// File name from a `jsCode: file(name)` line, if the line is one.
fn script_directive(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix(SCRIPT_PREFIX)?
        .strip_suffix(')')
}

/// Read an inlined script file.
fn read_script(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|error| Error::FileRead {
        path: path.to_path_buf(),
        source: error,
    })
}
