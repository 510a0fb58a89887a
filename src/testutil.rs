//! Test doubles for the network, prompts, and external tools.
//!
//! `WorkflowFixture` builds an isolated workspace in a temp directory and
//! hands out a `Session` wired to whichever fakes a test needs.

#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    fs,
    sync::Mutex,
};

use tempfile::TempDir;

use crate::{
    api::{ApiRequest, Transport},
    commands::Session,
    error::{Error, Result},
    external::{Converter, DiffOutcome, Differ},
    paths::Workspace,
    prompt::Prompt,
};

/// Transport that records every request and answers with a canned result.
pub struct RecordingTransport {
    /// Requests in send order.
    requests: Mutex<Vec<ApiRequest>>,
    /// Body returned on success.
    response: Vec<u8>,
    /// When set, every send fails with this API status.
    failure: Option<(String, String)>,
}

impl RecordingTransport {
    /// Answer every request with `response`.
    pub fn new(response: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: response.as_bytes().to_vec(),
            failure: None,
        }
    }

    /// Fail every request with an API error.
    pub fn failing(status: &str, body: &str) -> Self {
        Self {
            failure: Some((status.to_string(), body.to_string())),
            ..Self::new("")
        }
    }

    /// Requests sent so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: &ApiRequest) -> Result<Vec<u8>> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        match &self.failure {
            Some((status, body)) => Err(Error::Api {
                status: status.clone(),
                body: body.clone(),
            }),
            None => Ok(self.response.clone()),
        }
    }
}

/// Prompt that replays scripted answers and records each question.
#[derive(Default)]
pub struct ScriptedPrompt {
    /// Answers for `confirm`.
    confirms: RefCell<VecDeque<bool>>,
    /// Answers for `text`.
    texts: RefCell<VecDeque<String>>,
    /// Answers for `read_body`.
    bodies: RefCell<VecDeque<String>>,
    /// Every message shown, in order.
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    /// A prompt with no scripted answers; any question fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next yes/no question.
    pub fn with_confirm(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    /// Queue an answer for the next text question.
    pub fn with_text(self, answer: &str) -> Self {
        self.texts.borrow_mut().push_back(answer.to_string());
        self
    }

    /// Queue a body for the next stdin read.
    pub fn with_body(self, body: &str) -> Self {
        self.bodies.borrow_mut().push_back(body.to_string());
        self
    }

    /// Messages shown so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    /// Record `message` and pop the next scripted answer.
    fn answer<T>(&self, queue: &RefCell<VecDeque<T>>, message: &str) -> Result<T> {
        self.asked.borrow_mut().push(message.to_string());
        queue
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::PromptFailed {
                message: format!("unexpected prompt: {message}"),
            })
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> Result<bool> {
        self.answer(&self.confirms, message)
    }

    fn text(&self, message: &str) -> Result<String> {
        self.answer(&self.texts, message)
            .map(|value| value.trim().to_string())
    }

    fn read_body(&self, message: &str) -> Result<String> {
        self.answer(&self.bodies, message)
            .map(|value| value.trim().to_string())
    }
}

/// Converter that returns fixed JSON and remembers its input.
pub struct FakeConverter {
    /// Output on success.
    json: String,
    /// Tool failure to report instead.
    failure: Option<(String, String)>,
    /// Last YAML received.
    received: RefCell<Option<String>>,
}

impl FakeConverter {
    /// Always convert to `json`.
    pub fn new(json: &str) -> Self {
        Self {
            json: json.to_string(),
            failure: None,
            received: RefCell::new(None),
        }
    }

    /// Always fail as if `tool` exited with `message`.
    pub fn failing(tool: &str, message: &str) -> Self {
        Self {
            failure: Some((tool.to_string(), message.to_string())),
            ..Self::new("")
        }
    }

    /// YAML passed to the last conversion.
    pub fn received(&self) -> Option<String> {
        self.received.borrow().clone()
    }
}

impl Converter for FakeConverter {
    fn convert(&self, yaml: &str) -> Result<Vec<u8>> {
        self.received.replace(Some(yaml.to_string()));
        match &self.failure {
            Some((tool, message)) => Err(Error::ToolFailed {
                tool: tool.clone(),
                message: message.clone(),
            }),
            None => Ok(self.json.as_bytes().to_vec()),
        }
    }
}

/// Differ with a fixed outcome that counts its calls.
pub struct FakeDiffer {
    /// Outcome for every call.
    outcome: DiffOutcome,
    /// Number of diffs run.
    calls: Cell<usize>,
    /// Inputs of the last call.
    last: RefCell<Option<(String, String)>>,
}

impl FakeDiffer {
    /// Always report `outcome`.
    pub fn new(outcome: DiffOutcome) -> Self {
        Self {
            outcome,
            calls: Cell::new(0),
            last: RefCell::new(None),
        }
    }

    /// Number of diffs run.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Old and new inputs of the last call.
    pub fn last_inputs(&self) -> Option<(String, String)> {
        self.last.borrow().clone()
    }
}

impl Differ for FakeDiffer {
    fn diff(&self, old: &[u8], new: &[u8]) -> Result<DiffOutcome> {
        self.calls.set(self.calls.get() + 1);
        self.last.replace(Some((
            String::from_utf8_lossy(old).into_owned(),
            String::from_utf8_lossy(new).into_owned(),
        )));
        Ok(self.outcome.clone())
    }
}

/// Temp-directory workspace with a fluent builder for its files.
pub struct WorkflowFixture {
    /// Keeps the directory alive.
    _root: TempDir,
    /// Workspace rooted in the temp directory.
    workspace: Workspace,
}

impl WorkflowFixture {
    /// Create an empty workspace.
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        let workspace = Workspace::new(root.path());
        Self {
            _root: root,
            workspace,
        }
    }

    /// Write `workflow.yaml`.
    pub fn with_workflow(self, contents: &str) -> Self {
        fs::write(self.workspace.workflow_path(), contents).expect("write workflow");
        self
    }

    /// Write `.env`.
    pub fn with_env(self, contents: &str) -> Self {
        fs::write(self.workspace.env_path(), contents).expect("write env");
        self
    }

    /// Write a file next to `workflow.yaml`.
    pub fn with_file(self, name: &str, contents: &str) -> Self {
        fs::write(self.workspace.workflow_path().with_file_name(name), contents).expect("write file");
        self
    }

    /// Write `.out/workflow.json`.
    pub fn with_cache(self, contents: &str) -> Self {
        fs::create_dir_all(self.workspace.cache_dir()).expect("create cache dir");
        fs::write(self.workspace.cache_path(), contents).expect("write cache");
        self
    }

    /// The fixture's workspace.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Current cache contents, if written.
    pub fn read_cache(&self) -> Option<String> {
        fs::read_to_string(self.workspace.cache_path()).ok()
    }

    /// A session over this workspace with colors off.
    pub fn session<'a>(
        &'a self,
        converter: &'a dyn Converter,
        differ: &'a dyn Differ,
        prompt: &'a dyn Prompt,
    ) -> Session<'a> {
        Session {
            workspace: &self.workspace,
            converter,
            differ,
            prompt,
            use_color: false,
        }
    }
}
