//! Test utilities for componentry.
//!
//! In-memory implementations of every collaborator trait, so resolution can
//! be exercised without a filesystem, a content store, or a template engine:
//!
//! - [`MemoryConfigStore`] - builder-style [`ConfigStore`]
//! - [`MemoryContentRepository`] - [`ContentRepository`] with a discovery
//!   call counter for cache assertions
//! - [`MemoryTemplateLocator`] - [`TemplateLocator`] over a declared set of
//!   existing paths
//! - [`RecordingRenderer`] - [`Renderer`] that echoes kind and path instead
//!   of touching a template engine
//!
//! Also provides [`init_test_logging`] for one-shot tracing setup in tests.

use crate::config::{
    AdvancedSettings, ComponentId, ComponentTemplate, ConfigStore, LocationPolicy,
};
use crate::content::ContentRepository;
use crate::context::SubjectId;
use crate::core::Result;
use crate::render::Renderer;
use crate::selector::TemplateLocator;
use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Once;

/// Ensures test logging is only initialized once per process.
static INIT_LOGGING: Once = Once::new();

/// Initializes a tracing subscriber for tests, honoring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("componentry=debug"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

/// In-memory [`ConfigStore`] built up with chained `with_*` calls.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    templates: BTreeMap<ComponentId, ComponentTemplate>,
    settings: AdvancedSettings,
    policy: LocationPolicy,
    visible_on_listing: BTreeSet<ComponentId>,
}

impl MemoryConfigStore {
    /// Empty store with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a component id to a template base name.
    #[must_use]
    pub fn with_template(mut self, id: &str, template: &str) -> Self {
        self.templates
            .insert(ComponentId::from(id), ComponentTemplate { template: template.to_string() });
        self
    }

    /// Pins ids to the top location, in the given order.
    #[must_use]
    pub fn with_top<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.policy.top = ids.into_iter().map(ComponentId::from).collect();
        self
    }

    /// Pins ids to the bottom location, in the given order.
    #[must_use]
    pub fn with_bottom<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.policy.bottom = ids.into_iter().map(ComponentId::from).collect();
        self
    }

    /// Marks ids as visible on listing views.
    #[must_use]
    pub fn with_visible_on_listing<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.visible_on_listing = ids.into_iter().map(ComponentId::from).collect();
        self
    }

    /// Replaces the advanced settings.
    #[must_use]
    pub fn with_settings(mut self, settings: AdvancedSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl ConfigStore for MemoryConfigStore {
    fn component_templates(&self) -> &BTreeMap<ComponentId, ComponentTemplate> {
        &self.templates
    }

    fn advanced_settings(&self) -> &AdvancedSettings {
        &self.settings
    }

    fn location_policy(&self) -> &LocationPolicy {
        &self.policy
    }

    fn visible_on_listing(&self) -> &BTreeSet<ComponentId> {
        &self.visible_on_listing
    }
}

/// In-memory [`ContentRepository`] with a discovery call counter.
#[derive(Debug, Default)]
pub struct MemoryContentRepository {
    overrides: BTreeMap<SubjectId, Vec<ComponentId>>,
    discovered: BTreeMap<SubjectId, Vec<ComponentId>>,
    discovery_calls: Cell<usize>,
}

impl MemoryContentRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an explicit component ordering on a subject.
    #[must_use]
    pub fn with_override<'a>(
        mut self,
        subject: SubjectId,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.overrides.insert(subject, ids.into_iter().map(ComponentId::from).collect());
        self
    }

    /// Sets the discoverable component set for a subject.
    #[must_use]
    pub fn with_discovered<'a>(
        mut self,
        subject: SubjectId,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.discovered.insert(subject, ids.into_iter().map(ComponentId::from).collect());
        self
    }

    /// How many times discovery has been hit; lets tests assert that
    /// resolution caches instead of recomputing.
    pub fn discovery_calls(&self) -> usize {
        self.discovery_calls.get()
    }
}

impl ContentRepository for MemoryContentRepository {
    fn component_order_override(&self, subject: SubjectId) -> Option<Vec<ComponentId>> {
        self.overrides.get(&subject).filter(|ids| !ids.is_empty()).cloned()
    }

    fn discover_components(&self, subject: SubjectId) -> Vec<ComponentId> {
        self.discovery_calls.set(self.discovery_calls.get() + 1);
        self.discovered.get(&subject).cloned().unwrap_or_default()
    }
}

/// [`TemplateLocator`] over a declared set of existing paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateLocator {
    existing: BTreeSet<PathBuf>,
}

impl MemoryTemplateLocator {
    /// Locator where no template exists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a path as existing.
    #[must_use]
    pub fn with_file(mut self, path: &str) -> Self {
        self.existing.insert(PathBuf::from(path));
        self
    }
}

impl TemplateLocator for MemoryTemplateLocator {
    fn locate(&self, candidates: &[PathBuf]) -> Option<PathBuf> {
        candidates.iter().find(|candidate| self.existing.contains(*candidate)).cloned()
    }
}

/// [`Renderer`] that echoes `kind:path` lines instead of rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordingRenderer;

impl Renderer for RecordingRenderer {
    fn render_programmatic(&self, path: &Path) -> Result<String> {
        Ok(format!("programmatic:{}\n", path.display()))
    }

    fn render_structured(&self, path: &Path) -> Result<String> {
        Ok(format!("structured:{}\n", path.display()))
    }
}
