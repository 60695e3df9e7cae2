//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Resolve the project record and normalize options
//! 2. Compose the rule chain (init, app files, descriptor, task merge)
//! 3. Stage everything against a virtual tree
//! 4. Commit the tree and persist the document
//!
//! Staging (`scaffold`) and execution (`run`) are separate calls so a dry
//! run can inspect the full plan without touching storage.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{ConfigStore, Filesystem, Initializer},
        rule::{Outcome, Rule},
        tasks,
    },
    domain::{
        ConfigDocument, Context, FileTree, NormalizedOptions, RawOptions, RelativePath,
        TemplateSource, TreeBacking, expand,
    },
    error::GroundworkResult,
};

/// The deployment descriptor written into every scaffolded project.
///
/// Only project, provider, region and endpoint type vary; everything else
/// is a literal constant.
const SERVERLESS_YML: &str = r#"service: ${project}
frameworkVersion: ">=1.1.0 <2.0.0"
plugins:
  - serverless-offline
  - serverless-apigw-binary
package:
  individually: true
  excludeDevDependencies: false
  custom:
    enable_optimize:
      local: false
provider:
  name: ${provider}
  region: ${region}
  endpointType: ${endpointType}
  runtime: nodejs10.x
  memorySize: 192
  timeout: 10
custom:
  apigwBinary:
    types:
      - '*/*'
functions:
  web-app:
    handler: handler.webApp
    events:
      - http: ANY {proxy+}
      - http: ANY /
"#;

/// Everything a run would do, staged but not yet applied.
#[derive(Debug)]
pub struct ScaffoldPlan {
    options: NormalizedOptions,
    document: ConfigDocument,
    writes: Vec<(PathBuf, String)>,
    rules_applied: Vec<String>,
}

impl ScaffoldPlan {
    pub fn options(&self) -> &NormalizedOptions {
        &self.options
    }

    /// The workspace document as it will be persisted.
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Pending writes in commit (sorted-path) order.
    pub fn writes(&self) -> &[(PathBuf, String)] {
        &self.writes
    }

    pub fn rules_applied(&self) -> &[String] {
        &self.rules_applied
    }
}

/// What a committed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub project: String,
    pub files_written: Vec<PathBuf>,
    pub tasks_merged: Vec<String>,
}

/// Wraps the filesystem port as the read-only backing of a staged tree,
/// so conflict checks see the same storage commit writes to.
struct FilesystemBacking(Arc<dyn Filesystem>);

impl TreeBacking for FilesystemBacking {
    fn exists(&self, path: &Path) -> bool {
        self.0.exists(path)
    }

    fn read(&self, path: &Path) -> Option<String> {
        self.0.read_to_string(path).ok()
    }
}

/// Main scaffolding service.
///
/// Orchestrates option normalization, rule composition, staging, commit
/// and document persistence.
pub struct ScaffoldService {
    filesystem: Arc<dyn Filesystem>,
    store: Box<dyn ConfigStore>,
    initializer: Arc<dyn Initializer>,
    app_templates: Vec<TemplateSource>,
    prerender_templates: Vec<TemplateSource>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        store: Box<dyn ConfigStore>,
        initializer: Arc<dyn Initializer>,
        app_templates: Vec<TemplateSource>,
        prerender_templates: Vec<TemplateSource>,
    ) -> Self {
        Self {
            filesystem,
            store,
            initializer,
            app_templates,
            prerender_templates,
        }
    }

    /// Stage a scaffold run without touching storage.
    ///
    /// Loads the document, resolves the project (failing before any file
    /// work if it is absent), composes the rule chain and runs it against
    /// a virtual tree. The returned plan holds the staged writes and the
    /// updated document; nothing has been applied yet.
    #[instrument(skip_all, fields(project = %raw.project))]
    pub fn scaffold(&self, raw: RawOptions) -> GroundworkResult<ScaffoldPlan> {
        let document = self.store.load()?;
        let record = document.project(&raw.project)?;
        let project_root = record.root_path()?;
        let options = NormalizedOptions::new(raw, project_root);
        let ctx = Context::from_options(&options);

        info!(root = %options.project_root(), "staging scaffold");

        let document = Rc::new(RefCell::new(document));
        let rules = vec![
            self.init_rule(options.clone()),
            Self::app_files_rule("app-files", self.app_templates.clone(), options.clone()),
            self.prerender_rule(options.clone()),
            Self::descriptor_rule(options.clone()),
            Self::merge_rule(Rc::clone(&document), options.clone()),
        ];

        let mut tree = FileTree::new(Box::new(FilesystemBacking(Arc::clone(&self.filesystem))));
        let rules_applied = Rule::chain(rules, &mut tree, &ctx)?;

        // The chain consumed every rule closure, so this Rc is unique.
        let document = match Rc::try_unwrap(document) {
            Ok(cell) => cell.into_inner(),
            Err(shared) => shared.borrow().clone(),
        };

        let plan = ScaffoldPlan {
            options,
            document,
            writes: tree.into_pending(),
            rules_applied,
        };
        info!(files = plan.writes.len(), "scaffold staged");
        Ok(plan)
    }

    /// Commit a staged plan: write files, then persist the document.
    ///
    /// Commit is best-effort with no rollback. The first failing write
    /// aborts with an error naming the failed path and every write that
    /// was not applied.
    #[instrument(skip_all, fields(project = %plan.options.project()))]
    pub fn run(&self, plan: ScaffoldPlan) -> GroundworkResult<ScaffoldReport> {
        let mut written = Vec::with_capacity(plan.writes.len());
        let mut pending = plan.writes.into_iter();

        while let Some((path, content)) = pending.next() {
            if let Err(e) = self.filesystem.write_file(&path, &content) {
                let remaining = pending.map(|(p, _)| p).collect();
                return Err(ApplicationError::CommitIncomplete {
                    failed: path,
                    reason: e.to_string(),
                    remaining,
                }
                .into());
            }
            written.push(path);
        }

        self.store.persist(&plan.document)?;

        info!(files = written.len(), "scaffold committed");
        Ok(ScaffoldReport {
            project: plan.options.project().to_string(),
            files_written: written,
            tasks_merged: tasks::TASK_NAMES.iter().map(|s| s.to_string()).collect(),
        })
    }

    // -------------------------------------------------------------------------
    // Rule constructors
    // -------------------------------------------------------------------------

    fn init_rule(&self, options: NormalizedOptions) -> Rule {
        let initializer = Arc::clone(&self.initializer);
        Rule::new("init", move |_tree, _ctx| {
            initializer.initialize(&options)?;
            Ok(Outcome::Applied)
        })
    }

    /// Expand template sources into the tree, relocated under the project
    /// root. Honors `force` by switching create to overwrite.
    fn app_files_rule(
        name: &str,
        templates: Vec<TemplateSource>,
        options: NormalizedOptions,
    ) -> Rule {
        Rule::new(name, move |tree, ctx| {
            let dest_root = options.project_root().clone();
            for source in &templates {
                let file = expand(source, ctx, &dest_root)?;
                if options.force() {
                    tree.overwrite(file.path, file.content);
                } else {
                    tree.create(file.path, file.content)?;
                }
            }
            Ok(Outcome::Applied)
        })
    }

    /// Defers to the prerender template expansion, or to a no-op when the
    /// prerender step was disabled.
    fn prerender_rule(&self, options: NormalizedOptions) -> Rule {
        let templates = self.prerender_templates.clone();
        Rule::new("prerender-config", move |_tree, _ctx| {
            let next = if options.prerender() {
                Self::app_files_rule("prerender-files", templates.clone(), options.clone())
            } else {
                Rule::noop("prerender-skipped")
            };
            Ok(Outcome::Deferred(next))
        })
    }

    /// Stage the deployment descriptor at `<root>/serverless.yml`.
    fn descriptor_rule(options: NormalizedOptions) -> Rule {
        Rule::new("descriptor", move |tree, ctx| {
            let source = TemplateSource::new(RelativePath::new("serverless.yml"), SERVERLESS_YML);
            let file = expand(&source, ctx, options.project_root())?;
            if options.force() {
                tree.overwrite(file.path, file.content);
            } else {
                tree.create(file.path, file.content)?;
            }
            Ok(Outcome::Applied)
        })
    }

    /// Merge the five task definitions into the project record, then
    /// patch the freshly merged `compile` task.
    fn merge_rule(document: Rc<RefCell<ConfigDocument>>, options: NormalizedOptions) -> Rule {
        Rule::new("merge-tasks", move |_tree, _ctx| {
            let mut document = document.borrow_mut();
            document.merge_tasks(options.project(), tasks::task_set(&options))?;
            document.patch_task_options(
                options.project(),
                "compile",
                tasks::compile_patch(&options),
            )?;
            Ok(Outcome::Applied)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, ProjectRecord};
    use crate::error::GroundworkError;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    // Minimal in-crate fakes; the adapter crate ships fuller versions.

    #[derive(Default)]
    struct FakeFilesystem {
        files: Mutex<BTreeMap<PathBuf, String>>,
        fail_on: Option<PathBuf>,
    }

    impl Filesystem for FakeFilesystem {
        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        fn read_to_string(&self, path: &Path) -> GroundworkResult<String> {
            self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
                ApplicationError::Filesystem {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
        }

        fn write_file(&self, path: &Path, content: &str) -> GroundworkResult<()> {
            if self.fail_on.as_deref() == Some(path) {
                return Err(ApplicationError::Filesystem {
                    path: path.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into());
            }
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }
    }

    struct FakeStore(Mutex<ConfigDocument>);

    impl ConfigStore for FakeStore {
        fn load(&self) -> GroundworkResult<ConfigDocument> {
            Ok(self.0.lock().unwrap().clone())
        }

        fn persist(&self, document: &ConfigDocument) -> GroundworkResult<()> {
            *self.0.lock().unwrap() = document.clone();
            Ok(())
        }
    }

    struct FakeInit;

    impl Initializer for FakeInit {
        fn initialize(&self, _options: &NormalizedOptions) -> GroundworkResult<()> {
            Ok(())
        }
    }

    fn document() -> ConfigDocument {
        ConfigDocument::new().with_project("shop", ProjectRecord::new("apps/shop"))
    }

    fn service_with(filesystem: Arc<FakeFilesystem>, document: ConfigDocument) -> ScaffoldService {
        ScaffoldService::new(
            filesystem,
            Box::new(FakeStore(Mutex::new(document))),
            Arc::new(FakeInit),
            vec![TemplateSource::new(
                "handler.js${tmpl}",
                "exports.webApp = require('${offset}dist/${root}/server');\n",
            )],
            vec![TemplateSource::new(
                "prerender.config.js${tmpl}",
                "module.exports = { projectName: '${project}' };\n",
            )],
        )
    }

    #[test]
    fn scaffold_stages_files_and_tasks() {
        let fs = Arc::new(FakeFilesystem::default());
        let service = service_with(Arc::clone(&fs), document());

        let plan = service.scaffold(RawOptions::new("shop")).unwrap();

        let paths: Vec<_> = plan.writes().iter().map(|(p, _)| p.clone()).collect();
        assert!(paths.contains(&PathBuf::from("apps/shop/handler.js")));
        assert!(paths.contains(&PathBuf::from("apps/shop/prerender.config.js")));
        assert!(paths.contains(&PathBuf::from("apps/shop/serverless.yml")));

        let shop = plan.document().project("shop").unwrap();
        let names: Vec<_> = shop.tasks.keys().map(String::as_str).collect();
        assert_eq!(names, tasks::TASK_NAMES);
        assert_eq!(
            shop.tasks["compile"].options["skipClean"],
            serde_json::json!(true)
        );

        // Nothing committed yet.
        assert!(fs.files.lock().unwrap().is_empty());
    }

    #[test]
    fn scaffold_fails_fast_for_unknown_project() {
        let service = service_with(Arc::new(FakeFilesystem::default()), document());
        let err = service.scaffold(RawOptions::new("missing")).unwrap_err();
        assert!(matches!(
            err,
            GroundworkError::Domain(DomainError::ProjectNotFound { .. })
        ));
    }

    #[test]
    fn prerender_disabled_skips_the_config_template() {
        let service = service_with(Arc::new(FakeFilesystem::default()), document());
        let plan = service
            .scaffold(RawOptions::new("shop").prerender(false))
            .unwrap();
        assert!(
            !plan
                .writes()
                .iter()
                .any(|(p, _)| p.ends_with("prerender.config.js"))
        );
    }

    #[test]
    fn run_commits_files_and_persists_document() {
        let fs = Arc::new(FakeFilesystem::default());
        let store = Box::new(FakeStore(Mutex::new(document())));
        let service = ScaffoldService::new(
            Arc::clone(&fs) as Arc<dyn Filesystem>,
            store,
            Arc::new(FakeInit),
            vec![],
            vec![],
        );

        let plan = service.scaffold(RawOptions::new("shop")).unwrap();
        let report = service.run(plan).unwrap();

        assert_eq!(report.project, "shop");
        assert_eq!(report.tasks_merged, tasks::TASK_NAMES);
        assert!(
            fs.files
                .lock()
                .unwrap()
                .contains_key(Path::new("apps/shop/serverless.yml"))
        );
    }

    #[test]
    fn rerun_over_scaffolded_project_is_a_noop() {
        let fs = Arc::new(FakeFilesystem::default());
        let service = service_with(Arc::clone(&fs), document());

        let first = service.scaffold(RawOptions::new("shop")).unwrap();
        service.run(first).unwrap();

        // Identical content already on disk stages nothing.
        let second = service.scaffold(RawOptions::new("shop")).unwrap();
        assert!(second.writes().is_empty());
    }

    #[test]
    fn conflicting_descriptor_aborts_without_commit() {
        let fs = Arc::new(FakeFilesystem::default());
        fs.write_file(Path::new("apps/shop/serverless.yml"), "unrelated: true\n")
            .unwrap();
        let service = service_with(Arc::clone(&fs), document());

        let err = service.scaffold(RawOptions::new("shop")).unwrap_err();
        assert!(matches!(
            err,
            GroundworkError::Domain(DomainError::Conflict { .. })
        ));
        // The pre-existing file is untouched.
        assert_eq!(
            fs.read_to_string(Path::new("apps/shop/serverless.yml"))
                .unwrap(),
            "unrelated: true\n"
        );
    }

    #[test]
    fn force_overwrites_conflicting_descriptor() {
        let fs = Arc::new(FakeFilesystem::default());
        fs.write_file(Path::new("apps/shop/serverless.yml"), "unrelated: true\n")
            .unwrap();
        let service = service_with(Arc::clone(&fs), document());

        let plan = service
            .scaffold(RawOptions::new("shop").force(true))
            .unwrap();
        assert!(
            plan.writes()
                .iter()
                .any(|(p, c)| p == Path::new("apps/shop/serverless.yml")
                    && c.starts_with("service: shop"))
        );
    }

    #[test]
    fn failed_commit_reports_remaining_writes() {
        let fs = Arc::new(FakeFilesystem {
            files: Mutex::new(BTreeMap::new()),
            fail_on: Some(PathBuf::from("apps/shop/handler.js")),
        });
        let service = service_with(Arc::clone(&fs), document());

        let plan = service.scaffold(RawOptions::new("shop")).unwrap();
        let err = service.run(plan).unwrap_err();

        match err {
            GroundworkError::Application(ApplicationError::CommitIncomplete {
                failed,
                remaining,
                ..
            }) => {
                assert_eq!(failed, PathBuf::from("apps/shop/handler.js"));
                // Sorted order: handler.js fails first, the rest were never tried.
                assert_eq!(
                    remaining,
                    vec![
                        PathBuf::from("apps/shop/prerender.config.js"),
                        PathBuf::from("apps/shop/serverless.yml"),
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn descriptor_substitutes_options() {
        let service = service_with(Arc::new(FakeFilesystem::default()), document());
        let plan = service
            .scaffold(
                RawOptions::new("shop")
                    .provider("aws")
                    .region("eu-west-1")
                    .endpoint_type(crate::domain::EndpointType::Edge),
            )
            .unwrap();

        let (_, content) = plan
            .writes()
            .iter()
            .find(|(p, _)| p == Path::new("apps/shop/serverless.yml"))
            .unwrap();
        assert!(content.contains("service: shop"));
        assert!(content.contains("region: eu-west-1"));
        assert!(content.contains("endpointType: EDGE"));
        assert!(content.contains("handler: handler.webApp"));
    }
}
