//! Template rendering collaborators.
//!
//! The build pipeline only decides *which* file renders; the actual rendering
//! goes through the [`Renderer`] trait so the two template kinds can be backed
//! by whatever engines the host application uses. [`TeraRenderer`] is the
//! bundled implementation, rendering both kinds with Tera: programmatic
//! templates get the full shared context, structured partials additionally see
//! which template file is being rendered.

use crate::core::{ComponentryError, Result};
use serde::Serialize;
use std::path::Path;
use tera::{Context as TeraContext, Tera};
use tracing::trace;

/// Renders located template files.
///
/// Implementations may side-effect (stream to a response) or return the
/// rendered output; the orchestrator only consumes the returned string.
pub trait Renderer {
    /// Renders a template of the programmatic kind.
    fn render_programmatic(&self, path: &Path) -> Result<String>;

    /// Renders a template of the structured markup kind.
    fn render_structured(&self, path: &Path) -> Result<String>;
}

/// Tera-backed [`Renderer`].
///
/// Templates are rendered one-off from their file contents against a shared
/// context assembled at construction time.
#[derive(Debug, Clone)]
pub struct TeraRenderer {
    context: TeraContext,
}

impl Default for TeraRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TeraRenderer {
    /// Renderer with an empty context.
    pub fn new() -> Self {
        Self { context: TeraContext::new() }
    }

    /// Renderer with a context built from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentryError::Render`] when the value does not serialize
    /// to a map-like structure.
    pub fn with_context<T: Serialize>(value: &T) -> Result<Self> {
        let context = TeraContext::from_serialize(value).map_err(|source| {
            ComponentryError::Render { path: Path::new("<context>").to_path_buf(), source }
        })?;
        Ok(Self { context })
    }

    /// Adds a single value to the shared context.
    pub fn insert<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.context.insert(key, value);
    }

    fn render_with(&self, path: &Path, context: &TeraContext) -> Result<String> {
        trace!(path = %path.display(), "rendering template");
        let source = std::fs::read_to_string(path)?;
        Tera::one_off(&source, context, false).map_err(|source| ComponentryError::Render {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Renderer for TeraRenderer {
    fn render_programmatic(&self, path: &Path) -> Result<String> {
        self.render_with(path, &self.context)
    }

    fn render_structured(&self, path: &Path) -> Result<String> {
        let mut context = self.context.clone();
        context.insert("template", &path.display().to_string());
        self.render_with(path, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn programmatic_render_uses_shared_context() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hello.tera");
        std::fs::write(&path, "Hello {{ name }}!").unwrap();

        let mut renderer = TeraRenderer::new();
        renderer.insert("name", "world");
        assert_eq!(renderer.render_programmatic(&path).unwrap(), "Hello world!");
    }

    #[test]
    fn context_can_be_built_from_any_serializable_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("greeting.tera");
        std::fs::write(&path, "{{ site.name }} says hi").unwrap();

        let renderer = TeraRenderer::with_context(&serde_json::json!({
            "site": { "name": "componentry" }
        }))
        .unwrap();
        assert_eq!(renderer.render_programmatic(&path).unwrap(), "componentry says hi");
    }

    #[test]
    fn structured_render_sees_its_template_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.html");
        std::fs::write(&path, "<!-- {{ template }} -->").unwrap();

        let renderer = TeraRenderer::new();
        let out = renderer.render_structured(&path).unwrap();
        assert!(out.contains("partial.html"));
    }

    #[test]
    fn render_failure_carries_template_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.tera");
        std::fs::write(&path, "{{ unclosed").unwrap();

        let renderer = TeraRenderer::new();
        let err = renderer.render_programmatic(&path).unwrap_err();
        match err {
            ComponentryError::Render { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_template_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let renderer = TeraRenderer::new();
        let err = renderer.render_programmatic(&dir.path().join("gone.tera")).unwrap_err();
        assert!(matches!(err, ComponentryError::Io(_)));
    }
}
