//! Implementation of the `n8nctl login` command.

use std::path::Path;

use url::Url;

use crate::{
    commands::ColorChoice,
    config::Config,
    error::{Error, Result},
    palette::fmt_success,
    paths::{default_config_path, display_path},
    prompt::{Prompt, Terminal},
};

/// Execute the login command.
pub async fn run(color: ColorChoice, base_url: Option<String>, token: Option<String>) -> Result<()> {
    let path = default_config_path()?;
    login(&Terminal, base_url, token, &path)?;
    println!(
        "{}",
        fmt_success(
            &format!("Login successful, credentials saved to {}.", display_path(&path)),
            color.enabled()
        )
    );
    Ok(())
}

/// Collect credentials from flags or prompts and persist them to `path`.
///
/// Nothing is written unless both values are present and the URL is valid.
pub fn login(
    prompt: &dyn Prompt,
    base_url: Option<String>,
    token: Option<String>,
    path: &Path,
) -> Result<Config> {
    let base_url = match non_empty(base_url) {
        Some(value) => value,
        None => prompt.text("Enter API base URL:")?.trim().to_string(),
    };
    let token = match non_empty(token) {
        Some(value) => value,
        None => prompt.text(&format!(
            "Enter API token (visit {}/settings/api to generate one):",
            base_url.trim_end_matches('/')
        ))?
        .trim()
        .to_string(),
    };

    if token.is_empty() || base_url.is_empty() {
        return Err(Error::LoginFieldsMissing);
    }

    let config = Config::new(token, normalize_base_url(&base_url)?);
    config.save_to(path)?;
    Ok(config)
}

/// Strip trailing slashes and require an absolute http(s) URL.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = || Error::InvalidUrl {
        url: raw.to_string(),
    };

    let url = Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}

/// Trimmed flag value, treating blank input as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
