//! Template sources and `${name}` expansion.
//!
//! A template is a relative path pattern plus content; both may contain
//! `${name}` placeholders resolved against a [`Context`]. Path segments
//! are expanded independently of content, so a placeholder may appear in
//! a directory name. Expansion is pure: the same source and context
//! always produce identical output.

use std::borrow::Cow;
use std::path::PathBuf;

use crate::domain::common::RelativePath;
use crate::domain::context::Context;
use crate::domain::error::DomainError;

/// A template file before expansion.
///
/// Content is `Cow` so compiled-in templates borrow static strings while
/// loader-provided templates own theirs.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSource {
    /// Path pattern relative to a neutral template root.
    pub path: RelativePath,
    pub content: Cow<'static, str>,
}

impl TemplateSource {
    pub fn new(path: impl Into<RelativePath>, content: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A template after expansion: concrete path, concrete content.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Expand a template against a context, relocating the result under
/// `dest_root` (the project's directory).
///
/// Templates are authored against a neutral root; the prefix move is what
/// materializes them relative to the real project location.
pub fn expand(
    source: &TemplateSource,
    ctx: &Context,
    dest_root: &RelativePath,
) -> Result<ExpandedFile, DomainError> {
    let template_name = source.path.to_string();

    // Each path segment expands on its own; empty results (a segment that
    // was nothing but `${tmpl}`) are dropped rather than producing `//`.
    let mut path = dest_root.as_path().to_path_buf();
    for segment in source.path.as_path().iter() {
        let segment = segment.to_string_lossy();
        let expanded = substitute(&segment, ctx, &template_name)?;
        if !expanded.is_empty() {
            path.push(expanded);
        }
    }

    let content = substitute(&source.content, ctx, &template_name)?;
    Ok(ExpandedFile { path, content })
}

/// Replace every `${name}` in `input` with its context binding.
///
/// Unknown placeholders fail with the placeholder and template named, so
/// the author can fix either side.
fn substitute(input: &str, ctx: &Context, template: &str) -> Result<String, DomainError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .ok_or_else(|| DomainError::EmptyPlaceholder {
                template: template.to_string(),
            })?;
        let name = &after[..end];
        if name.is_empty() {
            return Err(DomainError::EmptyPlaceholder {
                template: template.to_string(),
            });
        }
        let value = ctx
            .get(name)
            .ok_or_else(|| DomainError::UnresolvedPlaceholder {
                placeholder: name.to_string(),
                template: template.to_string(),
            })?;
        out.push_str(value);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::{NormalizedOptions, RawOptions};

    fn ctx() -> Context {
        Context::from_options(&NormalizedOptions::new(
            RawOptions::new("shop"),
            RelativePath::new("apps/shop"),
        ))
    }

    #[test]
    fn content_placeholders_substituted() {
        let source = TemplateSource::new("readme.md", "# ${project} (${region})\n");
        let file = expand(&source, &ctx(), &RelativePath::new("apps/shop")).unwrap();
        assert_eq!(file.content, "# shop (us-east-1)\n");
    }

    #[test]
    fn path_segments_expand_independently() {
        let source = TemplateSource::new("${project}/handler.js", "exports.run = 1;\n");
        let file = expand(&source, &ctx(), &RelativePath::new("apps/shop")).unwrap();
        assert_eq!(file.path, PathBuf::from("apps/shop/shop/handler.js"));
    }

    #[test]
    fn tmpl_suffix_is_stripped() {
        let source = TemplateSource::new("handler.js${tmpl}", "");
        let file = expand(&source, &ctx(), &RelativePath::new("apps/shop")).unwrap();
        assert_eq!(file.path, PathBuf::from("apps/shop/handler.js"));
    }

    #[test]
    fn output_is_relocated_under_dest_root() {
        let source = TemplateSource::new("prerender.config.js", "module.exports = {};\n");
        let file = expand(&source, &ctx(), &RelativePath::new("apps/shop")).unwrap();
        assert_eq!(file.path, PathBuf::from("apps/shop/prerender.config.js"));
    }

    #[test]
    fn unknown_placeholder_names_itself_and_the_template() {
        let source = TemplateSource::new("x.txt", "${mystery}");
        let err = expand(&source, &ctx(), &RelativePath::new("apps/shop")).unwrap_err();
        match err {
            DomainError::UnresolvedPlaceholder {
                placeholder,
                template,
            } => {
                assert_eq!(placeholder, "mystery");
                assert_eq!(template, "x.txt");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unterminated_placeholder_is_rejected() {
        let source = TemplateSource::new("x.txt", "before ${oops");
        assert!(expand(&source, &ctx(), &RelativePath::new("apps")).is_err());
    }

    #[test]
    fn expansion_is_deterministic() {
        let source = TemplateSource::new("${project}.yml", "region: ${region}\n");
        let root = RelativePath::new("apps/shop");
        let first = expand(&source, &ctx(), &root).unwrap();
        let second = expand(&source, &ctx(), &root).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn adjacent_placeholders_both_resolve() {
        let source = TemplateSource::new("x.txt", "${project}${region}");
        let file = expand(&source, &ctx(), &RelativePath::new("a")).unwrap();
        assert_eq!(file.content, "shopus-east-1");
    }
}
