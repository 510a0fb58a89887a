//! Color palette and styling for CLI output.
//!
//! Every helper takes a `use_color` flag so callers stay agnostic of the
//! `--color` setting.

use owo_colors::{OwoColorize, Style};

/// Style for entity names.
pub fn entity_name() -> Style {
    Style::new().cyan().bold()
}

/// Style for section headings like "Available actions for tags:".
pub fn heading() -> Style {
    Style::new().white().bold()
}

/// Style for action names in help listings.
pub fn action_name() -> Style {
    Style::new().blue()
}

/// Style for description text - readable but subdued.
pub fn description() -> Style {
    Style::new().dimmed()
}

/// Style for completed operations.
pub fn success() -> Style {
    Style::new().green()
}

/// Style for aborted operations.
pub fn warning() -> Style {
    Style::new().yellow()
}

/// Apply `style` when color is enabled.
fn paint(text: &str, style: Style, use_color: bool) -> String {
    if use_color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Format an entity name with styling.
pub fn fmt_entity_name(name: &str, use_color: bool) -> String {
    paint(name, entity_name(), use_color)
}

/// Format a section heading with styling.
pub fn fmt_heading(text: &str, use_color: bool) -> String {
    paint(text, heading(), use_color)
}

/// Format an action name with styling.
pub fn fmt_action_name(text: &str, use_color: bool) -> String {
    paint(text, action_name(), use_color)
}

/// Format description text with styling.
pub fn fmt_description(text: &str, use_color: bool) -> String {
    paint(text, description(), use_color)
}

/// Format a success message with styling.
pub fn fmt_success(text: &str, use_color: bool) -> String {
    paint(text, success(), use_color)
}

/// Format warning text with styling.
pub fn fmt_warning(text: &str, use_color: bool) -> String {
    paint(text, warning(), use_color)
}
