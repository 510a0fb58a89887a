//! Entity/action dispatch: `n8nctl <entity> <action> [id] [flags]`.
//!
//! Resolution is split in two. [`plan`] turns a registry entry and its
//! arguments into a [`Plan`] without touching config, disk, or network.
//! [`execute`] then carries the plan out, loading credentials only when the
//! plan actually needs the API.

use clap::Parser;
use reqwest::Method;
use tracing::debug;

use crate::{
    api::{
        ApiRequest, HttpClient, Transport, collection_path, format_response, member_action_path,
        member_path,
    },
    commands::{ColorChoice, Session, help, workflow},
    config::Config,
    error::{Error, Result},
    external::{UnifiedDiff, Yq},
    paths::Workspace,
    prompt::Terminal,
    registry::{self, Action, ActionKind, Entity},
};

/// Arguments following the entity name.
#[derive(Debug, Parser)]
#[command(name = "n8nctl", no_binary_name = true, disable_help_flag = true)]
struct Invocation {
    /// Entity to operate on.
    entity: String,
    /// Action to run.
    action: Option<String>,
    /// Item ID for member actions.
    id: Option<String>,
    /// Request body for create/update.
    #[arg(long)]
    data: Option<String>,
    /// Show example payloads.
    #[arg(long)]
    schema: bool,
    /// Show the entity's actions.
    #[arg(short, long)]
    help: bool,
}

/// Where a request body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    /// No body.
    None,
    /// Given with `--data`.
    Inline(String),
    /// Read from stdin after showing this message.
    Stdin(&'static str),
}

/// What a resolved command will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// One API call.
    Request {
        /// Entity name, used in the delete message.
        entity: &'static str,
        /// Action being run.
        kind: ActionKind,
        /// Method and path; the body is filled in from `body`.
        request: ApiRequest,
        /// Body to attach before sending.
        body: BodySource,
    },
    /// Write the starter `workflow.yaml`.
    StarterWorkflow,
    /// Translate and offer to cache the workflow.
    Preview,
    /// Diff the workflow against the cache.
    Diff,
    /// Preview, then post the cached workflow.
    Deploy,
}

/// Parse and run an entity invocation. `args[0]` is the entity name.
pub async fn run(color: ColorChoice, args: Vec<String>) -> Result<()> {
    let invocation = Invocation::try_parse_from(args).map_err(|error| Error::InvalidArguments {
        message: error.to_string(),
    })?;
    let entity = registry::entity(&invocation.entity).ok_or_else(|| Error::UnknownEntity {
        entity: invocation.entity.clone(),
    })?;
    let use_color = color.enabled();

    if invocation.help {
        print!("{}", help::entity_help(entity, invocation.schema, use_color));
        return Ok(());
    }

    let action = resolve_action(entity, invocation.action.as_deref())?;
    if invocation.schema {
        println!("{}", help::schema_text(entity, action));
        return Ok(());
    }

    let plan = plan(entity, action, invocation.id.as_deref(), invocation.data)?;
    debug!(entity = entity.name, action = action.name(), "resolved command");

    let workspace = Workspace::current();
    let converter = Yq::default();
    let differ = UnifiedDiff::detect();
    let session = Session {
        workspace: &workspace,
        converter: &converter,
        differ: &differ,
        prompt: &Terminal,
        use_color,
    };
    execute(plan, &session, || {
        Config::load().map(|config| HttpClient::new(&config))
    })
    .await
}

/// Look up the action named on the command line.
fn resolve_action(entity: &Entity, name: Option<&str>) -> Result<&'static Action> {
    let Some(name) = name else {
        return Err(Error::MissingAction {
            entity: entity.name.to_string(),
        });
    };
    entity.action(name).ok_or_else(|| Error::UnknownAction {
        entity: entity.name.to_string(),
        action: name.to_string(),
    })
}

/// Decide what an action will do, validating the ID requirement.
pub fn plan(
    entity: &'static Entity,
    action: &Action,
    id: Option<&str>,
    data: Option<String>,
) -> Result<Plan> {
    let id = id.filter(|id| !id.is_empty());
    let id = match (action.needs_id, id) {
        (true, None) => {
            return Err(Error::MissingId {
                action: action.name().to_string(),
            });
        }
        (true, Some(id)) => id,
        (false, _) => "",
    };
    let is_workflows = entity.name == "workflows";
    let body_from = |prompt: &'static str| data.map_or(BodySource::Stdin(prompt), BodySource::Inline);

    let (request, body) = match action.kind {
        ActionKind::List => (
            ApiRequest::new(Method::GET, collection_path(entity.name)),
            BodySource::None,
        ),
        ActionKind::Get => (
            ApiRequest::new(Method::GET, member_path(entity.name, id)),
            BodySource::None,
        ),
        ActionKind::Create if is_workflows => return Ok(Plan::StarterWorkflow),
        ActionKind::Create => (
            ApiRequest::new(Method::POST, collection_path(entity.name)),
            body_from("Enter JSON data for creation:"),
        ),
        ActionKind::Update => (
            ApiRequest::new(Method::PATCH, member_path(entity.name, id)),
            body_from("Enter JSON data for update:"),
        ),
        ActionKind::Delete => (
            ApiRequest::new(Method::DELETE, member_path(entity.name, id)),
            BodySource::None,
        ),
        ActionKind::Activate | ActionKind::Deactivate => (
            ApiRequest::new(
                Method::POST,
                member_action_path(entity.name, id, action.name()),
            ),
            BodySource::None,
        ),
        ActionKind::Preview | ActionKind::Diff | ActionKind::Deploy if !is_workflows => {
            return Err(Error::Unsupported {
                entity: entity.name.to_string(),
                action: action.name().to_string(),
            });
        }
        ActionKind::Preview => return Ok(Plan::Preview),
        ActionKind::Diff => return Ok(Plan::Diff),
        ActionKind::Deploy => return Ok(Plan::Deploy),
    };

    Ok(Plan::Request {
        entity: entity.name,
        kind: action.kind,
        request,
        body,
    })
}

/// Carry out a plan. `connect` is called only when the API is needed.
pub async fn execute<T, F>(plan: Plan, session: &Session<'_>, connect: F) -> Result<()>
where
    T: Transport,
    F: FnOnce() -> Result<T>,
{
    match plan {
        Plan::StarterWorkflow => workflow::create_starter(session.workspace),
        Plan::Preview => {
            if !workflow::preview(session)? {
                println!("Preview aborted by user.");
            }
            Ok(())
        }
        Plan::Diff => workflow::diff(session),
        Plan::Deploy => {
            let transport = connect()?;
            workflow::deploy(session, &transport).await
        }
        Plan::Request {
            entity,
            kind,
            request,
            body,
        } => {
            let transport = connect()?;
            let request = match body {
                BodySource::None => request,
                BodySource::Inline(data) => request.with_body(data),
                BodySource::Stdin(message) => request.with_body(session.prompt.read_body(message)?),
            };

            let response = transport.send(&request).await?;
            if kind == ActionKind::Delete {
                println!("{entity} delete successful");
            } else {
                println!("{}", format_response(&response));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use reqwest::Method;

    use super::{BodySource, Invocation, Plan, execute, plan, resolve_action};
    use crate::{
        error::Error,
        external::DiffOutcome,
        registry::{ActionKind, ENTITIES, entity},
        testutil::{
            FakeConverter, FakeDiffer, RecordingTransport, ScriptedPrompt, WorkflowFixture,
        },
    };

    /// Plan `entity action` with an ID and no data.
    fn plan_for(entity_name: &str, action: &str) -> crate::Result<Plan> {
        let entity = entity(entity_name).expect("entity");
        let action = entity.action(action).expect("action");
        plan(entity, action, Some("42"), None)
    }

    /// Expected method and path for a request action.
    fn expected(entity: &str, kind: ActionKind) -> Option<(Method, String)> {
        let base = format!("/api/v1/{entity}");
        match kind {
            ActionKind::List => Some((Method::GET, base)),
            ActionKind::Get => Some((Method::GET, format!("{base}/42"))),
            ActionKind::Create => Some((Method::POST, base)),
            ActionKind::Update => Some((Method::PATCH, format!("{base}/42"))),
            ActionKind::Delete => Some((Method::DELETE, format!("{base}/42"))),
            ActionKind::Activate => Some((Method::POST, format!("{base}/42/activate"))),
            ActionKind::Deactivate => Some((Method::POST, format!("{base}/42/deactivate"))),
            ActionKind::Preview | ActionKind::Diff | ActionKind::Deploy => None,
        }
    }

    #[test]
    fn every_registry_pair_plans_documented_request() {
        for entity in ENTITIES {
            for action in entity.actions {
                let planned = plan(entity, action, Some("42"), None).expect("plan");
                let label = format!("{} {}", entity.name, action.name());
                match planned {
                    Plan::Request { request, .. } => {
                        let (method, path) =
                            expected(entity.name, action.kind).expect("request action");
                        assert_eq!(request.method, method, "{label}");
                        assert_eq!(request.path, path, "{label}");
                        assert_eq!(request.body, None, "{label}");
                    }
                    Plan::StarterWorkflow => {
                        assert_eq!(label, "workflows create");
                    }
                    Plan::Preview | Plan::Diff | Plan::Deploy => {
                        assert_eq!(entity.name, "workflows", "{label}");
                    }
                }
            }
        }
    }

    #[test]
    fn missing_id_fails_before_planning() {
        let tags = entity("tags").expect("tags");
        for name in ["get", "update", "delete"] {
            let action = tags.action(name).expect("action");
            let error = plan(tags, action, None, None).expect_err("plan should fail");
            assert!(matches!(error, Error::MissingId { .. }));
            assert_eq!(
                error.to_string(),
                format!("Action '{name}' requires an ID parameter")
            );
        }

        let workflows = entity("workflows").expect("workflows");
        let activate = workflows.action("activate").expect("activate");
        assert!(plan(workflows, activate, Some(""), None).is_err());
    }

    #[test]
    fn workflow_only_actions_are_rejected_elsewhere() {
        let tags = entity("tags").expect("tags");
        let workflows = entity("workflows").expect("workflows");
        let deploy = workflows.action("deploy").expect("deploy");

        let error = plan(tags, deploy, None, None).expect_err("plan should fail");
        assert_eq!(error.to_string(), "deploy not supported for tags");
    }

    #[test]
    fn unknown_and_missing_actions_are_reported() {
        let tags = entity("tags").expect("tags");

        let error = resolve_action(tags, Some("activate")).expect_err("unknown");
        assert_eq!(error.to_string(), "Unknown action for tags: activate");

        let error = resolve_action(tags, None).expect_err("missing");
        assert!(matches!(error, Error::MissingAction { .. }));
    }

    #[test]
    fn body_comes_from_data_flag_or_stdin() {
        let tags = entity("tags").expect("tags");
        let create = tags.action("create").expect("create");
        let update = tags.action("update").expect("update");

        let inline = plan(tags, create, None, Some(r#"{"name":"ops"}"#.to_string()))
            .expect("plan");
        assert!(matches!(
            inline,
            Plan::Request { body: BodySource::Inline(ref data), .. } if data == r#"{"name":"ops"}"#
        ));

        let stdin = plan(tags, update, Some("7"), None).expect("plan");
        assert!(matches!(
            stdin,
            Plan::Request { body: BodySource::Stdin("Enter JSON data for update:"), .. }
        ));
    }

    #[test]
    fn invocation_parses_positionals_and_flags() {
        let invocation = Invocation::try_parse_from([
            "tags", "update", "7", "--data", r#"{"name":"ops"}"#,
        ])
        .expect("parse");
        assert_eq!(invocation.entity, "tags");
        assert_eq!(invocation.action.as_deref(), Some("update"));
        assert_eq!(invocation.id.as_deref(), Some("7"));
        assert_eq!(invocation.data.as_deref(), Some(r#"{"name":"ops"}"#));

        let help = Invocation::try_parse_from(["tags", "--help", "--schema"]).expect("parse");
        assert!(help.help && help.schema);
        assert!(help.action.is_none());
    }

    #[tokio::test]
    async fn sends_stdin_body_and_reports_response() {
        let fixture = WorkflowFixture::new();
        let converter = FakeConverter::new("{}");
        let differ = FakeDiffer::new(DiffOutcome::Identical);
        let prompt = ScriptedPrompt::new().with_body("  {\"name\":\"ops\"}\n");
        let session = fixture.session(&converter, &differ, &prompt);
        let transport = RecordingTransport::new(r#"{"id":"1","name":"ops"}"#);

        let planned = plan_for("tags", "create").expect("plan");
        execute(planned, &session, || Ok(&transport))
            .await
            .expect("execute");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/api/v1/tags");
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"name":"ops"}"#));
        assert_eq!(prompt.asked(), vec!["Enter JSON data for creation:"]);
    }

    #[tokio::test]
    async fn api_errors_propagate_for_mutations() {
        for action in ["create", "update", "delete"] {
            let fixture = WorkflowFixture::new();
            let converter = FakeConverter::new("{}");
            let differ = FakeDiffer::new(DiffOutcome::Identical);
            let prompt = ScriptedPrompt::new();
            let session = fixture.session(&converter, &differ, &prompt);
            let transport = RecordingTransport::failing("404 Not Found", "{\"message\":\"nope\"}");

            let variables = entity("variables").expect("variables");
            let action = variables.action(action).expect("action");
            let planned =
                plan(variables, action, Some("9"), Some("{}".to_string())).expect("plan");
            let error = execute(planned, &session, || Ok(&transport))
                .await
                .expect_err("execute should fail");

            assert_eq!(error.to_string(), "API error: 404 Not Found\n{\"message\":\"nope\"}");
            assert_eq!(transport.requests().len(), 1);
        }
    }

    #[tokio::test]
    async fn starter_workflow_needs_no_connection() {
        let fixture = WorkflowFixture::new();
        let converter = FakeConverter::new("{}");
        let differ = FakeDiffer::new(DiffOutcome::Identical);
        let prompt = ScriptedPrompt::new();
        let session = fixture.session(&converter, &differ, &prompt);

        let planned = plan_for("workflows", "create").expect("plan");
        execute(planned, &session, || -> crate::Result<RecordingTransport> {
            Err(Error::ConfigMissing {
                path: "config.json".into(),
            })
        })
        .await
        .expect("execute");

        assert!(fixture.workspace().workflow_path().is_file());
    }

    #[tokio::test]
    async fn deploy_requires_credentials_before_prompting() {
        let fixture = WorkflowFixture::new().with_workflow("name: New\n");
        let converter = FakeConverter::new("{}");
        let differ = FakeDiffer::new(DiffOutcome::Identical);
        let prompt = ScriptedPrompt::new();
        let session = fixture.session(&converter, &differ, &prompt);

        let planned = plan_for("workflows", "deploy").expect("plan");
        let error = execute(planned, &session, || -> crate::Result<RecordingTransport> {
            Err(Error::ConfigMissing {
                path: "config.json".into(),
            })
        })
        .await
        .expect_err("execute should fail");

        assert!(matches!(error, Error::ConfigMissing { .. }));
        assert!(prompt.asked().is_empty());
        assert!(converter.received().is_none());
    }
}
