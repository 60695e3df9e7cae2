//! The workspace configuration document and the task merger.
//!
//! The document is modeled as an explicit schema (document → project →
//! task) with typed accessors, not an untyped map, so missing-key errors
//! surface at compile time where possible. Keys the schema does not know
//! about are captured by `#[serde(flatten)]` maps and survive a
//! load/merge/persist round trip untouched; `IndexMap` plus serde_json's
//! `preserve_order` feature keeps key order stable.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};
use tracing::debug;

use crate::domain::common::RelativePath;
use crate::domain::error::DomainError;

// ── TaskDefinition ───────────────────────────────────────────────────────────

/// A named, opaque unit of build/deploy configuration.
///
/// The merger never interprets `options` or `configurations`; it only
/// guarantees structural merge correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Builder identifier, e.g. `groundwork:compile`.
    pub kind: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Value>,

    /// Keys this schema does not model; preserved verbatim.
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl TaskDefinition {
    pub fn new(kind: impl Into<String>, options: Value) -> Self {
        Self {
            kind: kind.into(),
            options,
            configurations: None,
            extra: JsonMap::new(),
        }
    }

    pub fn with_configurations(mut self, configurations: Value) -> Self {
        self.configurations = Some(configurations);
        self
    }
}

// ── ProjectRecord ────────────────────────────────────────────────────────────

/// One project's record inside the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project directory relative to the workspace root.
    pub root: String,

    #[serde(default)]
    pub tasks: IndexMap<String, TaskDefinition>,

    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl ProjectRecord {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            tasks: IndexMap::new(),
            extra: JsonMap::new(),
        }
    }

    /// The root as a checked relative path.
    pub fn root_path(&self) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(self.root.as_str())
    }
}

// ── ConfigDocument ───────────────────────────────────────────────────────────

/// The persisted record of projects and their named tasks.
///
/// Loaded fresh from storage at the start of a run, mutated in memory,
/// persisted once at the end. There is no locking: concurrent runs over
/// the same document need external serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    #[serde(default)]
    pub projects: IndexMap<String, ProjectRecord>,

    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self {
            version: Some(1),
            projects: IndexMap::new(),
            extra: JsonMap::new(),
        }
    }

    pub fn with_project(mut self, name: impl Into<String>, record: ProjectRecord) -> Self {
        self.projects.insert(name.into(), record);
        self
    }

    /// Look up a project record.
    pub fn project(&self, name: &str) -> Result<&ProjectRecord, DomainError> {
        self.projects
            .get(name)
            .ok_or_else(|| DomainError::ProjectNotFound {
                project: name.to_string(),
            })
    }

    fn project_mut(&mut self, name: &str) -> Result<&mut ProjectRecord, DomainError> {
        self.projects
            .get_mut(name)
            .ok_or_else(|| DomainError::ProjectNotFound {
                project: name.to_string(),
            })
    }

    /// Merge task entries into one project's task map, in order.
    ///
    /// An entry whose name already exists replaces the prior definition in
    /// place (its position in the map is retained), so re-running with
    /// identical inputs yields an identical document. Every other key of
    /// the record, and every other project, is left untouched.
    pub fn merge_tasks(
        &mut self,
        project_name: &str,
        entries: impl IntoIterator<Item = (String, TaskDefinition)>,
    ) -> Result<(), DomainError> {
        let project = self.project_mut(project_name)?;
        for (name, definition) in entries {
            debug!(project = project_name, task = %name, "merging task definition");
            project.tasks.insert(name, definition);
        }
        Ok(())
    }

    /// Shallow-patch an existing task's `options` object.
    ///
    /// Only the given keys are written; unrelated options on the task
    /// survive. Fails with [`DomainError::TaskNotFound`] rather than
    /// conjuring a task out of thin air, and rejects a task whose options
    /// are not an object (or null).
    pub fn patch_task_options(
        &mut self,
        project_name: &str,
        task_name: &str,
        patch: JsonMap<String, Value>,
    ) -> Result<(), DomainError> {
        let project = self.project_mut(project_name)?;
        let task = project
            .tasks
            .get_mut(task_name)
            .ok_or_else(|| DomainError::TaskNotFound {
                project: project_name.to_string(),
                task: task_name.to_string(),
            })?;

        if task.options.is_null() {
            task.options = Value::Object(JsonMap::new());
        }
        let options = task
            .options
            .as_object_mut()
            .ok_or_else(|| DomainError::InvalidDocument {
                reason: format!(
                    "task '{task_name}' on project '{project_name}' has non-object options"
                ),
            })?;

        for (key, value) in patch {
            options.insert(key, value);
        }
        Ok(())
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::new()
    }
}
