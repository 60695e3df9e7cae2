//! Templates compiled into the binary.
//!
//! These are the app files every scaffolded project receives. They are
//! authored against a neutral root; the expander relocates them under the
//! project directory and resolves the placeholders. The `${tmpl}` suffix
//! keeps editors from parsing the sources as real JavaScript/JSON.
//!
//! A template pack on disk (see [`crate::template_loader`]) overrides this
//! set when the caller provides one.

use groundwork_core::domain::TemplateSource;

const HANDLER_JS: &str = r#"const awsServerlessExpress = require('aws-serverless-express');
const { app } = require('./server/main');

const binaryMimeTypes = ['*/*'];
const server = awsServerlessExpress.createServer(app, null, binaryMimeTypes);

exports.webApp = (event, context) => {
  awsServerlessExpress.proxy(server, event, context);
};
"#;

const TSCONFIG_SERVERLESS_JSON: &str = r#"{
  "extends": "${offset}tsconfig.json",
  "compilerOptions": {
    "outDir": "${offset}dist/out-tsc",
    "module": "commonjs",
    "target": "es2015",
    "types": ["node"]
  },
  "include": ["handler.js"]
}
"#;

const PRERENDER_CONFIG_JS: &str = r#"exports.config = {
  projectRoot: './src',
  projectName: '${project}',
  outDir: '${offset}dist/static/${project}',
  routes: {}
};
"#;

/// App files staged on every run.
pub fn app_templates() -> Vec<TemplateSource> {
    vec![
        TemplateSource::new("handler.js${tmpl}", HANDLER_JS),
        TemplateSource::new("tsconfig.serverless.json${tmpl}", TSCONFIG_SERVERLESS_JSON),
    ]
}

/// Prerender config, staged only when the prerender step is enabled.
pub fn prerender_templates() -> Vec<TemplateSource> {
    vec![TemplateSource::new(
        "prerender.config.js${tmpl}",
        PRERENDER_CONFIG_JS,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundwork_core::domain::{
        Context, NormalizedOptions, RawOptions, RelativePath, expand,
    };

    #[test]
    fn every_builtin_expands_cleanly() {
        let options =
            NormalizedOptions::new(RawOptions::new("shop"), RelativePath::new("apps/shop"));
        let ctx = Context::from_options(&options);

        for source in app_templates().iter().chain(prerender_templates().iter()) {
            let file = expand(source, &ctx, options.project_root()).unwrap();
            assert!(file.path.starts_with("apps/shop"));
            assert!(!file.content.contains("${"));
            // The ${tmpl} suffix is gone from the landed file name.
            assert!(!file.path.to_string_lossy().contains("tmpl"));
        }
    }

    #[test]
    fn tsconfig_climbs_back_to_workspace_root() {
        let options =
            NormalizedOptions::new(RawOptions::new("shop"), RelativePath::new("apps/shop"));
        let ctx = Context::from_options(&options);
        let source = &app_templates()[1];
        let file = expand(source, &ctx, options.project_root()).unwrap();
        assert!(file.content.contains("\"extends\": \"../../tsconfig.json\""));
    }
}
