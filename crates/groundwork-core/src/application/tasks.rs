//! Builders for the injected task set.
//!
//! Every scaffold run merges the same five tasks into the target project's
//! record: `compile`, `prerender`, `offline`, `deploy`, `destroy`. The
//! shapes are fixed; only project name and paths vary. The engine never
//! interprets these options, it only writes them.

use serde_json::{Map as JsonMap, Value, json};

use crate::domain::{NormalizedOptions, TaskDefinition};

/// Task names in merge order.
pub const TASK_NAMES: [&str; 5] = ["compile", "prerender", "offline", "deploy", "destroy"];

fn project_path(options: &NormalizedOptions, file: &str) -> String {
    options.in_project(file).to_string()
}

/// The base `compile` task, before the post-merge patch.
pub fn base_compile_task(options: &NormalizedOptions) -> TaskDefinition {
    let root = options.project_root().to_string();
    TaskDefinition::new(
        "groundwork:compile",
        json!({
            "outputPath": "dist",
            "package": root,
            "main": project_path(options, "handler.js"),
            "tsConfig": project_path(options, "tsconfig.json"),
        }),
    )
    .with_configurations(json!({
        "dev": { "optimization": false },
        "production": { "optimization": true },
    }))
}

/// The shallow patch applied to `compile` after the merge.
///
/// Split from [`base_compile_task`] deliberately: the patch path proves
/// the targeted-update operation against a freshly merged task.
pub fn compile_patch(options: &NormalizedOptions) -> JsonMap<String, Value> {
    let mut patch = JsonMap::new();
    patch.insert("skipClean".into(), json!(true));
    patch.insert(
        "outputPath".into(),
        json!(options.dist_root().to_string()),
    );
    patch.insert(
        "tsConfig".into(),
        json!(project_path(options, "tsconfig.serverless.json")),
    );
    patch
}

/// `prerender`: scan routes against the built app and snapshot them.
pub fn prerender_task(options: &NormalizedOptions) -> TaskDefinition {
    TaskDefinition::new(
        "groundwork:prerender",
        json!({
            "buildTarget": format!("{}:build:production", options.project()),
            "configFiles": [project_path(options, "prerender.config.js")],
            "scanRoutes": true,
            "removeStaticDist": true,
            "skipBuild": false,
        }),
    )
}

/// `offline`: local serve, waiting on the prerender step.
pub fn offline_task(options: &NormalizedOptions) -> TaskDefinition {
    let project = options.project();
    TaskDefinition::new(
        "groundwork:offline",
        json!({
            "waitUntilTargets": [format!("{project}:prerender")],
            "buildTarget": format!("{project}:compile"),
            "config": project_path(options, "serverless.yml"),
            "location": options.dist_root().to_string(),
        }),
    )
    .with_configurations(json!({
        "dev": { "buildTarget": format!("{project}:compile:dev") },
        "production": { "buildTarget": format!("{project}:compile:production") },
    }))
}

/// `deploy`: production compile, then push through the descriptor.
pub fn deploy_task(options: &NormalizedOptions) -> TaskDefinition {
    let dist = options.dist_root().to_string();
    TaskDefinition::new(
        "groundwork:deploy",
        json!({
            "waitUntilTargets": [format!("{}:prerender", options.project())],
            "buildTarget": format!("{}:compile:production", options.project()),
            "config": project_path(options, "serverless.yml"),
            "location": dist.clone(),
            "package": dist,
        }),
    )
}

/// `destroy`: tear down what `deploy` stood up. Same shape minus the
/// wait-on targets.
pub fn destroy_task(options: &NormalizedOptions) -> TaskDefinition {
    let dist = options.dist_root().to_string();
    TaskDefinition::new(
        "groundwork:destroy",
        json!({
            "buildTarget": format!("{}:compile:production", options.project()),
            "config": project_path(options, "serverless.yml"),
            "location": dist.clone(),
            "package": dist,
        }),
    )
}

/// The full task set in merge order.
pub fn task_set(options: &NormalizedOptions) -> Vec<(String, TaskDefinition)> {
    vec![
        ("compile".to_string(), base_compile_task(options)),
        ("prerender".to_string(), prerender_task(options)),
        ("offline".to_string(), offline_task(options)),
        ("deploy".to_string(), deploy_task(options)),
        ("destroy".to_string(), destroy_task(options)),
    ]
}
