//! Implementation of the `groundwork tasks` command.
//!
//! Prints the task definitions a `generate` run would inject for a
//! project, as pretty JSON. Useful for reviewing before committing to a
//! scaffold, and for diffing against an already-patched document.

use serde_json::Value;
use tracing::instrument;

use groundwork_adapters::JsonConfigStore;
use groundwork_core::{
    application::{ports::ConfigStore, tasks},
    domain::{NormalizedOptions, RawOptions},
};

use crate::{
    cli::TasksArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `groundwork tasks` command.
#[instrument(skip_all, fields(project = %args.project))]
pub fn execute(args: TasksArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let workspace_file = args
        .workspace_file
        .unwrap_or_else(|| config.workspace.file.clone());

    let document = JsonConfigStore::new(&workspace_file)
        .load()
        .map_err(CliError::Core)?;
    let record = document.project(&args.project).map_err(|e| {
        CliError::Core(e.into())
    })?;
    let root = record.root_path().map_err(|e| CliError::Core(e.into()))?;

    let options = NormalizedOptions::new(RawOptions::new(&args.project), root);
    let rendered = render_task_set(&options)?;

    output.header(&format!("Tasks for '{}':", args.project))?;
    println!("{rendered}");
    Ok(())
}

/// The five definitions with the compile patch already applied, exactly
/// as they would land in the document.
fn render_task_set(options: &NormalizedOptions) -> CliResult<String> {
    let mut set = tasks::task_set(options);
    if let Some((_, compile)) = set.iter_mut().find(|(name, _)| name == "compile") {
        if compile.options.is_null() {
            compile.options = Value::Object(serde_json::Map::new());
        }
        if let Some(object) = compile.options.as_object_mut() {
            for (key, value) in tasks::compile_patch(options) {
                object.insert(key, value);
            }
        }
    }

    let mut rendered = serde_json::Map::new();
    for (name, definition) in set {
        let value = serde_json::to_value(&definition).map_err(|e| CliError::InvalidInput {
            message: format!("failed to render task '{name}': {e}"),
        })?;
        rendered.insert(name, value);
    }
    serde_json::to_string_pretty(&Value::Object(rendered)).map_err(|e| CliError::InvalidInput {
        message: format!("failed to render task set: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundwork_core::domain::RelativePath;

    #[test]
    fn rendered_set_includes_patched_compile() {
        let options =
            NormalizedOptions::new(RawOptions::new("shop"), RelativePath::new("apps/shop"));
        let rendered = render_task_set(&options).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["compile"]["options"]["skipClean"], Value::Bool(true));
        assert_eq!(
            value["compile"]["options"]["outputPath"],
            Value::String("dist/apps/shop".into())
        );
        assert_eq!(
            value["destroy"]["kind"],
            Value::String("groundwork:destroy".into())
        );
    }

    #[test]
    fn rendered_set_keeps_merge_order() {
        let options =
            NormalizedOptions::new(RawOptions::new("shop"), RelativePath::new("apps/shop"));
        let rendered = render_task_set(&options).unwrap();

        let positions: Vec<_> = ["compile", "prerender", "offline", "deploy", "destroy"]
            .iter()
            .map(|name| rendered.find(&format!("\"{name}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
