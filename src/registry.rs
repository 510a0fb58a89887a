//! Static table of API entities and the actions each one supports.

use self::ActionKind::{
    Activate, Create, Deactivate, Delete, Deploy, Diff, Get, List, Preview, Update,
};

/// Example payload for `workflows create`.
const WORKFLOW_SCHEMA: &str = r#"{
  "name": "My Workflow",
  "nodes": [
    {
      "id": "1",
      "name": "Start",
      "type": "n8n-nodes-base.manualTrigger",
      "typeVersion": 1,
      "position": [250, 300]
    }
  ],
  "connections": {},
  "active": false
}"#;

/// Example payload for `credentials create`.
const CREDENTIAL_SCHEMA: &str = r#"{
  "name": "Joe's GitHub Credentials",
  "type": "httpHeaderAuth",
  "data": {
    "name": "Authorization",
    "value": "Bearer ghp_xxxxyyyyyyyyyy"
  },
  "nodesAccess": [
    {
      "nodeType": "n8n-nodes-base.httpRequest"
    }
  ]
}"#;

/// Verbs the dispatcher knows how to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// List a collection.
    List,
    /// Fetch one item.
    Get,
    /// Create an item.
    Create,
    /// Patch an item.
    Update,
    /// Delete an item.
    Delete,
    /// Activate a workflow.
    Activate,
    /// Deactivate a workflow.
    Deactivate,
    /// Translate `workflow.yaml` and offer to cache it.
    Preview,
    /// Diff `workflow.yaml` against the cache.
    Diff,
    /// Preview, then post the cached JSON.
    Deploy,
}

impl ActionKind {
    /// Name used on the command line and in API paths.
    pub fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Preview => "preview",
            Self::Diff => "diff",
            Self::Deploy => "deploy",
        }
    }
}

/// One action an entity supports.
#[derive(Debug, Clone, Copy)]
pub struct Action {
    /// What the action does.
    pub kind: ActionKind,
    /// One-line help text.
    pub description: &'static str,
    /// Whether an ID argument is required.
    pub needs_id: bool,
    /// Example payload shown by `--schema`.
    pub schema: Option<&'static str>,
}

impl Action {
    /// Action name on the command line.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Attach an example payload.
    const fn with_schema(self, schema: &'static str) -> Self {
        Self {
            schema: Some(schema),
            ..self
        }
    }
}

/// An API resource category and its actions.
#[derive(Debug)]
pub struct Entity {
    /// Name used on the command line and in API paths.
    pub name: &'static str,
    /// Supported actions, in help order.
    pub actions: &'static [Action],
}

impl Entity {
    /// Look up an action by exact name.
    pub fn action(&self, name: &str) -> Option<&'static Action> {
        self.actions.iter().find(|action| action.name() == name)
    }
}

/// Shorthand for an action that works on a collection.
const fn collection(kind: ActionKind, description: &'static str) -> Action {
    Action {
        kind,
        description,
        needs_id: false,
        schema: None,
    }
}

/// Shorthand for an action that needs an ID.
const fn member(kind: ActionKind, description: &'static str) -> Action {
    Action {
        kind,
        description,
        needs_id: true,
        schema: None,
    }
}

/// All entities, in help order.
pub static ENTITIES: &[Entity] = &[
    Entity {
        name: "workflows",
        actions: &[
            collection(List, "List workflow instances"),
            member(Get, "Get a workflow instance by ID"),
            collection(Create, "Create a starter workflow.yaml in the current directory")
                .with_schema(WORKFLOW_SCHEMA),
            member(Update, "Update a workflow instance by ID"),
            member(Delete, "Delete a workflow instance by ID"),
            member(Activate, "Activate a workflow instance by ID"),
            member(Deactivate, "Deactivate a workflow instance by ID"),
            collection(
                Preview,
                "Preview a workflow template (with confirmation to save and show diff)",
            ),
            collection(Diff, "Show diff between existing and new workflow templates"),
            collection(Deploy, "Deploy a workflow instance")
                .with_schema("(No schema, uses .out/workflow.json from preview)"),
        ],
    },
    Entity {
        name: "credentials",
        actions: &[
            collection(List, "List credentials"),
            collection(Create, "Create a credential").with_schema(CREDENTIAL_SCHEMA),
            member(Get, "Get a credential by ID"),
            member(Update, "Update a credential by ID"),
            member(Delete, "Delete a credential by ID"),
        ],
    },
    Entity {
        name: "executions",
        actions: &[
            collection(List, "List executions"),
            member(Get, "Get an execution by ID"),
            member(Delete, "Delete an execution by ID"),
        ],
    },
    Entity {
        name: "users",
        actions: &[
            collection(List, "List all users"),
            collection(Create, "Create a new user"),
            member(Get, "Get a user by ID"),
            member(Update, "Update a user by ID"),
            member(Delete, "Delete a user by ID"),
        ],
    },
    Entity {
        name: "audit",
        actions: &[collection(Create, "Create an audit log")],
    },
    Entity {
        name: "tags",
        actions: &[
            collection(List, "List tags"),
            collection(Create, "Create a tag"),
            member(Get, "Get a tag by ID"),
            member(Update, "Update a tag by ID"),
            member(Delete, "Delete a tag by ID"),
        ],
    },
    Entity {
        name: "source-control",
        actions: &[
            collection(List, "List source control configs"),
            member(Get, "Get a source control config by ID"),
            member(Update, "Update a source control config by ID"),
        ],
    },
    Entity {
        name: "variables",
        actions: &[
            collection(List, "List variables"),
            collection(Create, "Create a variable"),
            member(Get, "Get a variable by ID"),
            member(Update, "Update a variable by ID"),
            member(Delete, "Delete a variable by ID"),
        ],
    },
    Entity {
        name: "projects",
        actions: &[
            collection(List, "List projects"),
            collection(Create, "Create a project"),
            member(Get, "Get a project by ID"),
            member(Update, "Update a project by ID"),
            member(Delete, "Delete a project by ID"),
        ],
    },
];

/// Look up an entity by exact name.
pub fn entity(name: &str) -> Option<&'static Entity> {
    ENTITIES.iter().find(|entity| entity.name == name)
}
