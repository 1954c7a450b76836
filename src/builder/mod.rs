//! The build orchestrator.
//!
//! [`ComponentBuilder`] composes the three resolution stages for one render
//! request: resolve the component order, resolve the suffix list, then for
//! each component pick and render the best template. The primary
//! (programmatic) root is exhausted before the secondary (structured markup)
//! root is consulted; a component with no template under either root is
//! skipped silently, never an error.
//!
//! One builder is constructed per request and owns its caches. Component
//! order and suffix list are computed lazily on first access and reused until
//! an explicit reset; overrides replace the cached value directly. The
//! subject defaults to the ambient current subject from the request context
//! but can be pinned for manual invocation or testing.

use crate::config::ConfigStore;
use crate::content::ContentRepository;
use crate::context::{RequestContext, SubjectId};
use crate::core::Result;
use crate::order::ComponentOrderResolver;
use crate::render::Renderer;
use crate::selector::{ComponentSelector, TemplateKind, TemplateLocator, TemplateRoot};
use crate::suffix::{Suffix, SuffixResolver};
use std::io::Write;
use tracing::debug;

/// Per-request orchestrator producing the final ordered render.
pub struct ComponentBuilder<'a> {
    config: &'a dyn ConfigStore,
    content: &'a dyn ContentRepository,
    locator: &'a dyn TemplateLocator,
    renderer: &'a dyn Renderer,
    context: RequestContext,
    subject: Option<SubjectId>,
    order_resolver: ComponentOrderResolver,
    suffix_resolver: SuffixResolver,
}

impl<'a> ComponentBuilder<'a> {
    /// Creates a builder for one render request.
    pub fn new(
        config: &'a dyn ConfigStore,
        content: &'a dyn ContentRepository,
        locator: &'a dyn TemplateLocator,
        renderer: &'a dyn Renderer,
        context: RequestContext,
    ) -> Self {
        Self {
            config,
            content,
            locator,
            renderer,
            context,
            subject: None,
            order_resolver: ComponentOrderResolver::new(),
            suffix_resolver: SuffixResolver::new(),
        }
    }

    /// The request context this builder resolves against.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// The subject being built: the pinned subject if set, otherwise the
    /// ambient current subject from the request context.
    pub fn subject_id(&self) -> Option<SubjectId> {
        self.subject.or(self.context.subject)
    }

    /// Pins the subject, overriding the ambient current subject.
    pub fn set_subject_id(&mut self, subject: SubjectId) {
        self.subject = Some(subject);
    }

    /// Unpins the subject; resolution falls back to the ambient subject.
    /// Cached component orders are not cleared automatically; call
    /// [`reset_components`](Self::reset_components) when the subject change
    /// should be visible.
    pub fn reset_subject_id(&mut self) {
        self.subject = None;
    }

    /// The ordered component template names for this request (cached after
    /// the first call).
    pub fn components(&mut self) -> &[String] {
        let subject = self.subject_id();
        self.order_resolver.resolve(subject, &self.context, self.config, self.content)
    }

    /// Manually sets the component list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComponentryError::InvalidOverride`] if a component
    /// appears twice.
    pub fn set_components(&mut self, components: Vec<String>) -> Result<()> {
        self.order_resolver.set(components)
    }

    /// Clears any component override or cache; the next access recomputes.
    pub fn reset_components(&mut self) {
        self.order_resolver.reset();
    }

    /// The suffix list for this request, most specific first (cached after
    /// the first call).
    pub fn suffixes(&mut self) -> &[Suffix] {
        self.suffix_resolver.resolve(&self.context, self.config.advanced_settings())
    }

    /// Manually sets the suffix list, disregarding the computed hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComponentryError::InvalidOverride`] for an empty list.
    pub fn set_suffixes(&mut self, suffixes: Vec<Suffix>) -> Result<()> {
        self.suffix_resolver.set(suffixes)
    }

    /// Inserts suffixes ahead of the current list. Accepts a single suffix
    /// (`[suffix]`) or any ordered sequence.
    pub fn add_suffixes(&mut self, prefix: impl IntoIterator<Item = Suffix>) {
        self.suffix_resolver.prepend(&self.context, self.config.advanced_settings(), prefix);
    }

    /// Clears any suffix override or cache; the next access recomputes.
    pub fn reset_suffixes(&mut self) {
        self.suffix_resolver.reset();
    }

    /// Renders every resolved component into `out`, in order.
    ///
    /// Components with no template under either root are skipped. Renderer
    /// failures on a template that *was* found do propagate.
    pub fn build(&mut self, out: &mut dyn Write) -> Result<()> {
        let settings = self.config.advanced_settings();
        let primary = TemplateRoot::primary(settings);
        let secondary = TemplateRoot::secondary(settings);

        let components: Vec<String> = self.components().to_vec();
        let suffixes: Vec<Suffix> = self.suffixes().to_vec();
        let selector = ComponentSelector::new(self.locator);

        for component in &components {
            let found = selector
                .select_file(&primary, component, &suffixes)
                .map(|path| (path, primary.kind))
                .or_else(|| {
                    selector
                        .select_file(&secondary, component, &suffixes)
                        .map(|path| (path, secondary.kind))
                });
            let Some((path, kind)) = found else {
                debug!(component = %component, "no template under either root, skipping");
                continue;
            };
            let rendered = match kind {
                TemplateKind::Programmatic => self.renderer.render_programmatic(&path)?,
                TemplateKind::Structured => self.renderer.render_structured(&path)?,
            };
            out.write_all(rendered.as_bytes())?;
        }
        Ok(())
    }

    /// Captures the output [`build`](Self::build) would produce.
    pub fn render_to_string(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        self.build(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ItemKind, SingularView, ViewKind};
    use crate::test_utils::{
        MemoryConfigStore, MemoryContentRepository, MemoryTemplateLocator, RecordingRenderer,
    };

    const SUBJECT: SubjectId = SubjectId(42);

    fn singular_event_ctx() -> RequestContext {
        RequestContext::public(ViewKind::Singular(SingularView::item(ItemKind::Typed(
            "event".into(),
        ))))
        .with_subject(SUBJECT)
    }

    fn basic_config() -> MemoryConfigStore {
        MemoryConfigStore::new().with_template("hero", "hero").with_template("card", "card")
    }

    #[test]
    fn renders_components_in_resolved_order() {
        let config = basic_config();
        let content = MemoryContentRepository::new().with_discovered(SUBJECT, ["hero", "card"]);
        let locator = MemoryTemplateLocator::new()
            .with_file("components/hero-single-event.tera")
            .with_file("components/card.tera");
        let renderer = RecordingRenderer;

        let mut builder =
            ComponentBuilder::new(&config, &content, &locator, &renderer, singular_event_ctx());
        let page = builder.render_to_string().unwrap();
        assert_eq!(
            page,
            "programmatic:components/hero-single-event.tera\n\
             programmatic:components/card.tera\n"
        );
    }

    #[test]
    fn primary_root_wins_over_secondary() {
        let config = basic_config();
        let content = MemoryContentRepository::new().with_discovered(SUBJECT, ["card"]);
        // the secondary root has a more specific match, but the primary root
        // is exhausted first as a whole chain
        let locator = MemoryTemplateLocator::new()
            .with_file("components/card.tera")
            .with_file("partials/card-single-event.html");
        let renderer = RecordingRenderer;

        let mut builder =
            ComponentBuilder::new(&config, &content, &locator, &renderer, singular_event_ctx());
        let page = builder.render_to_string().unwrap();
        assert_eq!(page, "programmatic:components/card.tera\n");
    }

    #[test]
    fn falls_back_to_secondary_root() {
        let config = basic_config();
        let content = MemoryContentRepository::new().with_discovered(SUBJECT, ["card"]);
        let locator = MemoryTemplateLocator::new().with_file("partials/card-event.html");
        let renderer = RecordingRenderer;

        let mut builder =
            ComponentBuilder::new(&config, &content, &locator, &renderer, singular_event_ctx());
        let page = builder.render_to_string().unwrap();
        assert_eq!(page, "structured:partials/card-event.html\n");
    }

    #[test]
    fn component_without_any_template_is_skipped() {
        let config = basic_config();
        let content = MemoryContentRepository::new().with_discovered(SUBJECT, ["hero", "card"]);
        let locator = MemoryTemplateLocator::new().with_file("components/card.tera");
        let renderer = RecordingRenderer;

        let mut builder =
            ComponentBuilder::new(&config, &content, &locator, &renderer, singular_event_ctx());
        let page = builder.render_to_string().unwrap();
        assert_eq!(page, "programmatic:components/card.tera\n");
    }

    #[test]
    fn component_override_and_reset() {
        let config = basic_config();
        let content = MemoryContentRepository::new().with_discovered(SUBJECT, ["hero"]);
        let locator = MemoryTemplateLocator::new();
        let renderer = RecordingRenderer;

        let mut builder =
            ComponentBuilder::new(&config, &content, &locator, &renderer, singular_event_ctx());
        builder.set_components(vec!["promo".to_string()]).unwrap();
        assert_eq!(builder.components(), ["promo"]);

        builder.reset_components();
        assert_eq!(builder.components(), ["hero"]);
    }

    #[test]
    fn pinned_subject_overrides_ambient_subject() {
        let other = SubjectId(7);
        let config = basic_config();
        let content = MemoryContentRepository::new()
            .with_discovered(SUBJECT, ["hero"])
            .with_discovered(other, ["card"]);
        let locator = MemoryTemplateLocator::new();
        let renderer = RecordingRenderer;

        let mut builder =
            ComponentBuilder::new(&config, &content, &locator, &renderer, singular_event_ctx());
        assert_eq!(builder.subject_id(), Some(SUBJECT));
        assert_eq!(builder.components(), ["hero"]);

        builder.set_subject_id(other);
        builder.reset_components();
        assert_eq!(builder.subject_id(), Some(other));
        assert_eq!(builder.components(), ["card"]);

        builder.reset_subject_id();
        builder.reset_components();
        assert_eq!(builder.components(), ["hero"]);
    }

    #[test]
    fn suffix_override_flows_into_selection() {
        let config = basic_config();
        let content = MemoryContentRepository::new().with_discovered(SUBJECT, ["card"]);
        let locator = MemoryTemplateLocator::new()
            .with_file("components/card-special.tera")
            .with_file("components/card.tera");
        let renderer = RecordingRenderer;

        let mut builder =
            ComponentBuilder::new(&config, &content, &locator, &renderer, singular_event_ctx());
        builder.set_suffixes(vec![Suffix::from("special")]).unwrap();
        let page = builder.render_to_string().unwrap();
        assert_eq!(page, "programmatic:components/card-special.tera\n");
    }

    #[test]
    fn build_writes_the_same_output_render_to_string_returns() {
        let config = basic_config();
        let content = MemoryContentRepository::new().with_discovered(SUBJECT, ["card"]);
        let locator = MemoryTemplateLocator::new().with_file("components/card.tera");
        let renderer = RecordingRenderer;

        let mut builder =
            ComponentBuilder::new(&config, &content, &locator, &renderer, singular_event_ctx());
        let mut sink = Vec::new();
        builder.build(&mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "programmatic:components/card.tera\n");
    }
}
