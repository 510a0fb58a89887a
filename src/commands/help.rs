//! Help text for the top level, single entities, and action schemas.

use crate::{
    palette::{fmt_action_name, fmt_description, fmt_entity_name, fmt_heading},
    registry::{Action, ENTITIES, Entity},
};

/// Width of the action column in entity help.
const ACTION_COLUMN: usize = 10;

/// Text appended to the top-level `--help` output.
pub fn overview() -> String {
    let mut text = String::from("Entities:\n");
    for entity in ENTITIES {
        text.push_str(&format!("  {}\n", entity.name));
    }
    text.push_str(
        "
Config:
  Config is stored in ~/.n8nctl/config.json

Environment:
  A .env file can be used for ${{NAME}} injection into workflow.yaml.
  Use `n8nctl workflows preview` to verify values.

Flags:
  --schema  Show the example payload for an entity's actions (with --help or an action)

Dependencies:
  - yq: sudo apt install yq or brew install yq
  - colordiff: sudo apt install colordiff or brew install colordiff

Use \"n8nctl <entity> --help\" for available actions and usage details.
Use \"n8nctl <entity> <action> --schema\" to see the example payload for that action.",
    );
    text
}

/// Action listing for one entity, optionally with example payloads.
pub fn entity_help(entity: &Entity, show_schema: bool, use_color: bool) -> String {
    let mut text = fmt_heading(&format!("Available actions for {}:", entity.name), use_color);
    text.push('\n');

    for action in entity.actions {
        let name = format!("{:<ACTION_COLUMN$}", action.name());
        text.push_str(&format!(
            "  {} {}\n",
            fmt_action_name(&name, use_color),
            fmt_description(action.description, use_color)
        ));
        if show_schema && let Some(schema) = action.schema {
            text.push_str("    Example schema:\n");
            for line in schema.lines() {
                text.push_str(&format!("      {line}\n"));
            }
        }
    }

    text.push_str(&format!(
        "\nUsage:\n  n8nctl {} <action> [id] [flags]\n\nFlags:\n  \
         --data <json>  Request body for create/update (otherwise read from stdin)\n  \
         --schema       Show the example payload for the action (use with --help or an action)\n",
        fmt_entity_name(entity.name, use_color)
    ));
    text
}

/// Example payload for one action, or a note that none exists.
pub fn schema_text(entity: &Entity, action: &Action) -> String {
    match action.schema {
        Some(schema) => format!("Schema for {} {}:\n{schema}", entity.name, action.name()),
        None => format!(
            "No schema available for action {} on entity {}",
            action.name(),
            entity.name
        ),
    }
}
