//! Implementation of the `groundwork generate` command.
//!
//! Responsibility: translate CLI arguments into `RawOptions`, wire the
//! adapters, call the core scaffold service, and display results. No
//! scaffolding logic lives here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use groundwork_adapters::{
    FilesystemTemplateLoader, JsonConfigStore, LocalFilesystem, NoopInitializer,
    builtin_templates,
};
use groundwork_core::{
    application::ScaffoldService,
    domain::{RawOptions, TemplateSource},
};

use crate::{
    cli::{GenerateArgs, GlobalArgs, global::OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `groundwork generate` command.
///
/// Dispatch sequence:
/// 1. Resolve the workspace document path and root directory
/// 2. Resolve template sources (pack directory or built-in set)
/// 3. Build `RawOptions` from flags and config defaults
/// 4. Stage via `ScaffoldService::scaffold`
/// 5. Early-exit if `--dry-run`, otherwise commit via `run`
#[instrument(skip_all, fields(project = %args.project))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Workspace document and root
    let workspace_file = args
        .workspace_file
        .clone()
        .unwrap_or_else(|| config.workspace.file.clone());
    let workspace_root = workspace_root_of(&workspace_file);

    debug!(
        workspace_file = %workspace_file.display(),
        workspace_root = %workspace_root.display(),
        "workspace resolved"
    );

    // 2. Templates
    let pack_dir = args.templates.clone().or(config.workspace.templates.clone());
    let (app_templates, prerender_templates) = resolve_templates(pack_dir.as_deref())?;

    // 3. Options
    let mut raw = RawOptions::new(&args.project)
        .provider(args.provider.unwrap_or(config.defaults.provider))
        .region(args.region.unwrap_or(config.defaults.region))
        .skip_format(args.skip_format)
        .prerender(!args.no_prerender)
        .force(args.force);
    if let Some(endpoint_type) = args.endpoint_type {
        raw = raw.endpoint_type(endpoint_type.into());
    }

    if args.force {
        output.warning("--force replaces conflicting files")?;
    }

    // 4. Stage
    let service = ScaffoldService::new(
        Arc::new(LocalFilesystem::new(&workspace_root)),
        Box::new(JsonConfigStore::new(&workspace_file)),
        Arc::new(NoopInitializer::new()),
        app_templates,
        prerender_templates,
    );
    let plan = service.scaffold(raw).map_err(CliError::Core)?;

    // 5. Dry run: describe but write nothing.
    if args.dry_run {
        if output.format() == OutputFormat::Json {
            println!("{}", plan_json(&plan)?);
            return Ok(());
        }
        output.info(&format!(
            "Dry run: would write {} file(s) for '{}'",
            plan.writes().len(),
            args.project
        ))?;
        for (path, _) in plan.writes() {
            output.print(&format!("  {}", path.display()))?;
        }
        output.info("Workspace document would gain the compile/prerender/offline/deploy/destroy tasks")?;
        return Ok(());
    }

    output.header(&format!("Scaffolding '{}'...", args.project))?;
    info!(project = %args.project, "scaffold started");

    let report = service.run(plan).map_err(CliError::Core)?;

    info!(project = %report.project, files = report.files_written.len(), "scaffold completed");

    // 6. Success + next steps
    output.success(&format!(
        "Project '{}' scaffolded ({} file(s) written)",
        report.project,
        report.files_written.len()
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  groundwork tasks {}", report.project))?;
        output.print("  # then run the offline task to serve locally")?;
    }

    Ok(())
}

/// The directory the workspace document lives in; staged paths are
/// committed relative to it.
fn workspace_root_of(workspace_file: &Path) -> PathBuf {
    match workspace_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Resolve the template sets, preferring an on-disk pack over built-ins.
///
/// A pack directory must contain an `app/` subdirectory; `prerender/` is
/// optional and falls back to the built-in prerender config.
fn resolve_templates(
    pack_dir: Option<&Path>,
) -> CliResult<(Vec<TemplateSource>, Vec<TemplateSource>)> {
    let Some(dir) = pack_dir else {
        return Ok((
            builtin_templates::app_templates(),
            builtin_templates::prerender_templates(),
        ));
    };

    let app_dir = dir.join("app");
    if !app_dir.is_dir() {
        return Err(CliError::TemplatePack {
            path: dir.to_path_buf(),
            reason: "missing app/ subdirectory".into(),
        });
    }
    let app = FilesystemTemplateLoader::new(app_dir)
        .load()
        .map_err(CliError::Core)?;

    let prerender_dir = dir.join("prerender");
    let prerender = if prerender_dir.is_dir() {
        FilesystemTemplateLoader::new(prerender_dir)
            .load()
            .map_err(CliError::Core)?
    } else {
        builtin_templates::prerender_templates()
    };

    Ok((app, prerender))
}

fn plan_json(plan: &groundwork_core::application::ScaffoldPlan) -> CliResult<String> {
    let files: Vec<String> = plan
        .writes()
        .iter()
        .map(|(p, _)| p.display().to_string())
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({
        "project": plan.options().project(),
        "files": files,
        "rules": plan.rules_applied(),
    }))
    .map_err(|e| CliError::InvalidInput {
        message: format!("failed to render plan as JSON: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_root_is_the_parent_directory() {
        assert_eq!(
            workspace_root_of(Path::new("config/workspace.json")),
            PathBuf::from("config")
        );
        assert_eq!(
            workspace_root_of(Path::new("workspace.json")),
            PathBuf::from(".")
        );
    }

    #[test]
    fn missing_pack_dir_is_rejected() {
        let err = resolve_templates(Some(Path::new("/nonexistent/pack"))).unwrap_err();
        assert!(matches!(err, CliError::TemplatePack { .. }));
    }

    #[test]
    fn no_pack_uses_builtins() {
        let (app, prerender) = resolve_templates(None).unwrap();
        assert!(!app.is_empty());
        assert!(!prerender.is_empty());
    }

    #[test]
    fn pack_without_prerender_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("app")).unwrap();
        std::fs::write(dir.path().join("app/handler.js${tmpl}"), "exports.x = 1;\n").unwrap();

        let (app, prerender) = resolve_templates(Some(dir.path())).unwrap();
        assert_eq!(app.len(), 1);
        assert!(!prerender.is_empty());
    }
}
