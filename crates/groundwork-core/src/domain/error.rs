use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (callers may report and retry after fixing input)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("project '{project}' not found in the workspace document")]
    ProjectNotFound { project: String },

    #[error("task '{task}' not found on project '{project}'")]
    TaskNotFound { project: String, task: String },

    // ========================================================================
    // Staging Conflicts
    // ========================================================================
    #[error("path '{path}' already has different content (use overwrite to replace)")]
    Conflict { path: PathBuf },

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("unresolved placeholder '${{{placeholder}}}' in template '{template}'")]
    UnresolvedPlaceholder {
        placeholder: String,
        template: String,
    },

    #[error("empty placeholder in template '{template}'")]
    EmptyPlaceholder { template: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("malformed document: {reason}")]
    InvalidDocument { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectNotFound { project } => vec![
                format!("'{}' is not registered in the workspace document", project),
                "Check the project name for typos".into(),
                "Register the project before generating serverless tasks".into(),
            ],
            Self::TaskNotFound { project, task } => vec![
                format!("Project '{}' has no '{}' task to patch", project, task),
                "The task map may have been edited by hand; restore it or re-run the generator".into(),
            ],
            Self::Conflict { path } => vec![
                format!("'{}' already exists with different content", path.display()),
                "Re-run with --force to overwrite (destructive)".into(),
                "Or move the existing file out of the way".into(),
            ],
            Self::UnresolvedPlaceholder { placeholder, template } => vec![
                format!("Template '{}' references '${{{}}}'", template, placeholder),
                "Add the missing binding to the context, or fix the template".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectNotFound { .. } | Self::TaskNotFound { .. } => ErrorCategory::NotFound,
            Self::Conflict { .. } => ErrorCategory::Conflict,
            Self::UnresolvedPlaceholder { .. } | Self::EmptyPlaceholder { .. } => {
                ErrorCategory::Validation
            }
            Self::AbsolutePathNotAllowed { .. } | Self::InvalidDocument { .. } => {
                ErrorCategory::Validation
            }
        }
    }
}

/// Categories a domain error can fall into. Internal failures cannot
/// originate here; the root error type owns that category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_a_category() {
        let cases = [
            (
                DomainError::ProjectNotFound {
                    project: "shop".into(),
                },
                ErrorCategory::NotFound,
            ),
            (
                DomainError::TaskNotFound {
                    project: "shop".into(),
                    task: "compile".into(),
                },
                ErrorCategory::NotFound,
            ),
            (
                DomainError::Conflict {
                    path: PathBuf::from("apps/shop/serverless.yml"),
                },
                ErrorCategory::Conflict,
            ),
            (
                DomainError::UnresolvedPlaceholder {
                    placeholder: "mystery".into(),
                    template: "x.txt".into(),
                },
                ErrorCategory::Validation,
            ),
            (
                DomainError::EmptyPlaceholder {
                    template: "x.txt".into(),
                },
                ErrorCategory::Validation,
            ),
            (
                DomainError::AbsolutePathNotAllowed {
                    path: "/etc/passwd".into(),
                },
                ErrorCategory::Validation,
            ),
            (
                DomainError::InvalidDocument {
                    reason: "bad".into(),
                },
                ErrorCategory::Validation,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.category(), expected, "{error}");
        }
    }
}
