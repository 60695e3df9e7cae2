//! Application layer errors.
//!
//! These errors represent failures in orchestration and port access, not
//! business logic. Business logic errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A filesystem port operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// Committing the staged tree stopped partway. Commit is best-effort
    /// with no rollback, so the error carries everything left unapplied.
    #[error("Commit failed at {failed}: {reason} ({} writes not applied)", remaining.len())]
    CommitIncomplete {
        failed: PathBuf,
        reason: String,
        remaining: Vec<PathBuf>,
    },

    /// The workspace document could not be loaded.
    #[error("Failed to load the workspace document: {reason}")]
    StoreLoad { reason: String },

    /// The workspace document could not be persisted.
    #[error("Failed to persist the workspace document: {reason}")]
    StorePersist { reason: String },

    /// The workspace initializer failed.
    #[error("Workspace initialization failed: {reason}")]
    InitFailed { reason: String },

    /// A template source could not be loaded.
    #[error("Failed to load template at {path}: {reason}")]
    TemplateLoad { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::CommitIncomplete {
                failed, remaining, ..
            } => {
                let mut lines = vec![
                    format!("Writing '{}' failed; earlier writes were kept", failed.display()),
                    "Fix the cause and re-run; identical files are skipped".into(),
                ];
                lines.extend(
                    remaining
                        .iter()
                        .map(|p| format!("Not written: {}", p.display())),
                );
                lines
            }
            Self::StoreLoad { .. } => vec![
                "Check that the workspace document exists and is valid JSON".into(),
                "Run from the workspace root, or pass --workspace-file".into(),
            ],
            Self::StorePersist { .. } => vec![
                "The document on disk may be stale; check write permissions".into(),
            ],
            Self::TemplateLoad { path, .. } => vec![
                format!("Template directory or file missing: {}", path.display()),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Filesystem { .. } | Self::CommitIncomplete { .. } | Self::InitFailed { .. } => {
                ErrorCategory::Internal
            }
            Self::StoreLoad { .. } | Self::TemplateLoad { .. } => ErrorCategory::Configuration,
            Self::StorePersist { .. } => ErrorCategory::Internal,
        }
    }
}
