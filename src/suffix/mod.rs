//! Suffix hierarchy resolution.
//!
//! A suffix is a specificity token appended to a component's base name to
//! select a more context-specific template variant: for a component `card`
//! and suffix `single-event`, the selector first looks for
//! `card-single-event.tera`. The [`SuffixResolver`] turns the request context
//! into an ordered suffix list, most specific first, always terminating in the
//! universal `index` fallback so every component has at least one candidate.
//!
//! The chains, by view classification:
//!
//! - Singular page: `custom-template?`, `page`, `singular`, `index`
//! - Singular attachment: `attachment`, `single`, `singular`, `index`
//! - Singular typed item: `single-{type}`, `{type}`, `single`, `singular`,
//!   `index`
//! - Home: `front-page?`, `home`, `index`
//! - Search: `search`, `index`; not found: `404`, `index`
//! - Listing: one classification group (`archive-{type}`+`{type}`,
//!   `taxonomy-{slug}`+`taxonomy`, `author`, `category`, `tag`, or `date`),
//!   then `paged?`, `archive`, `index`
//!
//! Editor contexts mirror the singular chain through their own path: there is
//! no listing branch, `singular` is always present, and the item's site role
//! can swap the chain for `home` or `front-page`.
//!
//! The resolved list is cached on the resolver. `override` pins a
//! caller-supplied list, `prepend` pushes extra suffixes ahead of the current
//! list, and `reset` clears everything so the next resolve recomputes from
//! context.

use crate::config::AdvancedSettings;
use crate::context::{
    ItemKind, ListingKind, RequestContext, SingularRole, SingularView, ViewKind,
};
use crate::core::{ComponentryError, Result};
use std::fmt;
use tracing::debug;

/// The universal least-specific suffix every computed list ends with.
pub const INDEX_SUFFIX: &str = "index";

/// A single template-name suffix token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Suffix(String);

impl Suffix {
    /// Creates a suffix from any string-like value.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }

    /// Creates a suffix from a raw slug, stripping a known template extension
    /// first. Custom-template slugs are commonly stored with their file
    /// extension (`contact.tera`); as a suffix token only `contact` is wanted.
    pub fn normalized(raw: &str, settings: &AdvancedSettings) -> Self {
        for ext in [&settings.component_extension, &settings.partial_extension] {
            if let Some(stripped) = raw.strip_suffix(&format!(".{ext}")) {
                return Self(stripped.to_string());
            }
        }
        Self(raw.to_string())
    }

    /// The raw suffix token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Suffix {
    fn from(suffix: &str) -> Self {
        Self(suffix.to_string())
    }
}

/// Computes and caches the suffix list for one request.
#[derive(Debug, Default)]
pub struct SuffixResolver {
    cached: Option<Vec<Suffix>>,
}

impl SuffixResolver {
    /// Creates a resolver with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The suffix list for this request, most specific first.
    ///
    /// Computed from context on first call, then served from the cache until
    /// [`reset`](Self::reset).
    pub fn resolve(&mut self, ctx: &RequestContext, settings: &AdvancedSettings) -> &[Suffix] {
        if self.cached.is_none() {
            let list = Self::compute(ctx, settings);
            debug!(suffixes = ?list.iter().map(Suffix::as_str).collect::<Vec<_>>(), "resolved suffix list");
            self.cached = Some(list);
        }
        self.cached.as_deref().unwrap_or_default()
    }

    /// Replaces the suffix list, suppressing recomputation until
    /// [`reset`](Self::reset).
    ///
    /// # Errors
    ///
    /// Returns [`ComponentryError::InvalidOverride`] for an empty list; the
    /// suffix list must always contain at least one entry.
    pub fn set(&mut self, suffixes: Vec<Suffix>) -> Result<()> {
        if suffixes.is_empty() {
            return Err(ComponentryError::InvalidOverride {
                reason: "suffix override may not be empty".to_string(),
            });
        }
        self.cached = Some(suffixes);
        Ok(())
    }

    /// Inserts suffixes ahead of the current list without removing existing
    /// entries. Accepts a single suffix (`[suffix]`) or any ordered sequence.
    pub fn prepend(
        &mut self,
        ctx: &RequestContext,
        settings: &AdvancedSettings,
        prefix: impl IntoIterator<Item = Suffix>,
    ) {
        let mut list: Vec<Suffix> = prefix.into_iter().collect();
        list.extend_from_slice(self.resolve(ctx, settings));
        self.cached = Some(list);
    }

    /// Clears the cache (and any override); the next resolve recomputes from
    /// context.
    pub fn reset(&mut self) {
        self.cached = None;
    }

    fn compute(ctx: &RequestContext, settings: &AdvancedSettings) -> Vec<Suffix> {
        let mut chain = if ctx.editor {
            Self::editor_chain(&ctx.view, settings)
        } else {
            Self::public_chain(&ctx.view, settings)
        };
        chain.push(Suffix::new(INDEX_SUFFIX));
        chain
    }

    fn public_chain(view: &ViewKind, settings: &AdvancedSettings) -> Vec<Suffix> {
        match view {
            ViewKind::Singular(item) => {
                let mut chain = Self::singular_chain(item, settings);
                chain.push(Suffix::new("singular"));
                chain
            }
            ViewKind::Home { front_page: true } => {
                vec![Suffix::new("front-page"), Suffix::new("home")]
            }
            ViewKind::Home { front_page: false } => vec![Suffix::new("home")],
            ViewKind::Search => vec![Suffix::new("search")],
            ViewKind::NotFound => vec![Suffix::new("404")],
            ViewKind::Listing(listing) => {
                let mut chain = match &listing.kind {
                    ListingKind::Author => vec![Suffix::new("author")],
                    ListingKind::Category => vec![Suffix::new("category")],
                    ListingKind::Tag => vec![Suffix::new("tag")],
                    ListingKind::Taxonomy(slug) => {
                        vec![Suffix::new(format!("taxonomy-{slug}")), Suffix::new("taxonomy")]
                    }
                    ListingKind::Date => vec![Suffix::new("date")],
                    ListingKind::Typed(slug) => {
                        let slug = Suffix::normalized(slug, settings);
                        vec![Suffix::new(format!("archive-{slug}")), slug]
                    }
                };
                if listing.paged {
                    chain.push(Suffix::new("paged"));
                }
                chain.push(Suffix::new("archive"));
                chain
            }
        }
    }

    // Editor previews have no listing branch and always carry "singular"; the
    // item's site role stands in for the public Home classification.
    fn editor_chain(view: &ViewKind, settings: &AdvancedSettings) -> Vec<Suffix> {
        let mut chain = match view {
            ViewKind::Singular(item) => match item.role {
                SingularRole::PostsPage => vec![Suffix::new("home")],
                SingularRole::FrontPage => vec![Suffix::new("front-page")],
                SingularRole::Standard => Self::singular_chain(item, settings),
            },
            _ => Vec::new(),
        };
        chain.push(Suffix::new("singular"));
        chain
    }

    fn singular_chain(item: &SingularView, settings: &AdvancedSettings) -> Vec<Suffix> {
        match &item.item {
            ItemKind::Page => {
                let mut chain = Vec::new();
                if let Some(slug) = &item.custom_template {
                    chain.push(Suffix::normalized(slug, settings));
                }
                chain.push(Suffix::new("page"));
                chain
            }
            ItemKind::Attachment => vec![Suffix::new("attachment"), Suffix::new("single")],
            ItemKind::Typed(slug) => {
                let slug = Suffix::normalized(slug, settings);
                vec![Suffix::new(format!("single-{slug}")), slug, Suffix::new("single")]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ListingKind, ListingView};

    fn settings() -> AdvancedSettings {
        AdvancedSettings::default()
    }

    fn resolve(ctx: &RequestContext) -> Vec<String> {
        let mut resolver = SuffixResolver::new();
        resolver
            .resolve(ctx, &settings())
            .iter()
            .map(|s| s.as_str().to_string())
            .collect()
    }

    #[test]
    fn single_typed_item() {
        let ctx = RequestContext::public(ViewKind::Singular(SingularView::item(
            ItemKind::Typed("event".into()),
        )));
        assert_eq!(
            resolve(&ctx),
            ["single-event", "event", "single", "singular", "index"]
        );
    }

    #[test]
    fn paged_taxonomy_listing() {
        let ctx = RequestContext::public(ViewKind::Listing(
            ListingView::of(ListingKind::Taxonomy("genre".into())).paged(),
        ));
        assert_eq!(
            resolve(&ctx),
            ["taxonomy-genre", "taxonomy", "paged", "archive", "index"]
        );
    }

    #[test]
    fn typed_archive_listing() {
        let ctx = RequestContext::public(ViewKind::Listing(ListingView::of(
            ListingKind::Typed("event".into()),
        )));
        assert_eq!(resolve(&ctx), ["archive-event", "event", "archive", "index"]);
    }

    #[test]
    fn category_listing_first_page() {
        let ctx =
            RequestContext::public(ViewKind::Listing(ListingView::of(ListingKind::Category)));
        assert_eq!(resolve(&ctx), ["category", "archive", "index"]);
    }

    #[test]
    fn page_with_custom_template_strips_extension() {
        let ctx = RequestContext::public(ViewKind::Singular(
            SingularView::item(ItemKind::Page).with_custom_template("contact.tera"),
        ));
        assert_eq!(resolve(&ctx), ["contact", "page", "singular", "index"]);
    }

    #[test]
    fn custom_template_ignored_on_non_pages() {
        let ctx = RequestContext::public(ViewKind::Singular(
            SingularView::item(ItemKind::Typed("post".into())).with_custom_template("contact"),
        ));
        assert_eq!(
            resolve(&ctx),
            ["single-post", "post", "single", "singular", "index"]
        );
    }

    #[test]
    fn attachment_page() {
        let ctx = RequestContext::public(ViewKind::Singular(SingularView::item(
            ItemKind::Attachment,
        )));
        assert_eq!(resolve(&ctx), ["attachment", "single", "singular", "index"]);
    }

    #[test]
    fn home_and_front_page() {
        assert_eq!(
            resolve(&RequestContext::public(ViewKind::Home { front_page: false })),
            ["home", "index"]
        );
        assert_eq!(
            resolve(&RequestContext::public(ViewKind::Home { front_page: true })),
            ["front-page", "home", "index"]
        );
    }

    #[test]
    fn search_and_not_found() {
        assert_eq!(resolve(&RequestContext::public(ViewKind::Search)), ["search", "index"]);
        assert_eq!(resolve(&RequestContext::public(ViewKind::NotFound)), ["404", "index"]);
    }

    #[test]
    fn editor_mirrors_singular_chain() {
        let ctx = RequestContext::editor(ViewKind::Singular(SingularView::item(
            ItemKind::Typed("event".into()),
        )));
        assert_eq!(
            resolve(&ctx),
            ["single-event", "event", "single", "singular", "index"]
        );
    }

    #[test]
    fn editor_site_roles_replace_item_chain() {
        let posts_page = RequestContext::editor(ViewKind::Singular(
            SingularView::item(ItemKind::Page).with_role(SingularRole::PostsPage),
        ));
        assert_eq!(resolve(&posts_page), ["home", "singular", "index"]);

        let front_page = RequestContext::editor(ViewKind::Singular(
            SingularView::item(ItemKind::Page).with_role(SingularRole::FrontPage),
        ));
        assert_eq!(resolve(&front_page), ["front-page", "singular", "index"]);
    }

    #[test]
    fn every_classification_ends_in_index() {
        let contexts = [
            RequestContext::public(ViewKind::Singular(SingularView::item(ItemKind::Page))),
            RequestContext::public(ViewKind::Listing(ListingView::of(ListingKind::Date))),
            RequestContext::public(ViewKind::Search),
            RequestContext::public(ViewKind::NotFound),
            RequestContext::public(ViewKind::Home { front_page: true }),
            RequestContext::editor(ViewKind::Singular(SingularView::item(ItemKind::Page))),
        ];
        for ctx in &contexts {
            let list = resolve(ctx);
            assert!(!list.is_empty());
            assert_eq!(list.last().map(String::as_str), Some(INDEX_SUFFIX));
        }
    }

    #[test]
    fn resolve_is_cached_until_reset() {
        let mut resolver = SuffixResolver::new();
        let singular = RequestContext::public(ViewKind::Singular(SingularView::item(
            ItemKind::Typed("event".into()),
        )));
        let search = RequestContext::public(ViewKind::Search);

        let first: Vec<Suffix> = resolver.resolve(&singular, &settings()).to_vec();
        // a different context on the second call is ignored: the cache wins
        let second: Vec<Suffix> = resolver.resolve(&search, &settings()).to_vec();
        assert_eq!(first, second);

        resolver.reset();
        let third: Vec<Suffix> = resolver.resolve(&search, &settings()).to_vec();
        assert_eq!(third, vec![Suffix::from("search"), Suffix::from("index")]);
    }

    #[test]
    fn override_pins_and_reset_recomputes() {
        let mut resolver = SuffixResolver::new();
        let ctx = RequestContext::public(ViewKind::Search);

        resolver.set(vec![Suffix::from("special")]).unwrap();
        assert_eq!(resolver.resolve(&ctx, &settings()), [Suffix::from("special")]);

        resolver.reset();
        assert_eq!(
            resolver.resolve(&ctx, &settings()),
            [Suffix::from("search"), Suffix::from("index")]
        );
    }

    #[test]
    fn empty_override_is_rejected() {
        let mut resolver = SuffixResolver::new();
        assert!(matches!(
            resolver.set(Vec::new()),
            Err(ComponentryError::InvalidOverride { .. })
        ));
    }

    #[test]
    fn prepend_single_and_sequence() {
        let mut resolver = SuffixResolver::new();
        let ctx = RequestContext::public(ViewKind::Search);

        resolver.prepend(&ctx, &settings(), [Suffix::from("promo")]);
        assert_eq!(
            resolver.resolve(&ctx, &settings()),
            [Suffix::from("promo"), Suffix::from("search"), Suffix::from("index")]
        );

        resolver.prepend(&ctx, &settings(), vec![Suffix::from("a"), Suffix::from("b")]);
        assert_eq!(
            resolver.resolve(&ctx, &settings()),
            [
                Suffix::from("a"),
                Suffix::from("b"),
                Suffix::from("promo"),
                Suffix::from("search"),
                Suffix::from("index")
            ]
        );
    }

    #[test]
    fn normalization_strips_known_extensions_only() {
        let settings = settings();
        assert_eq!(Suffix::normalized("contact.tera", &settings).as_str(), "contact");
        assert_eq!(Suffix::normalized("contact.html", &settings).as_str(), "contact");
        assert_eq!(Suffix::normalized("contact.txt", &settings).as_str(), "contact.txt");
        assert_eq!(Suffix::normalized("contact", &settings).as_str(), "contact");
    }
}
