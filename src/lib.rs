//! Componentry - component template resolution
//!
//! A library for assembling content pages out of reusable "component" templates.
//! Given the current request context and a component configuration, componentry
//! answers two questions:
//!
//! 1. **Which components render, and in what order?** Components are pinned to
//!    a location (`top`, `bottom`) or left freely sortable, then filtered by
//!    visibility rules before producing a single deterministic render order.
//! 2. **Which template file renders each component?** Every component name is
//!    combined with an ordered list of context-derived suffixes (`single-event`,
//!    `taxonomy-genre`, `archive`, ...) and the most specific existing file
//!    wins, falling back all the way to the bare component name.
//!
//! The suffix hierarchy mirrors the classic CMS template hierarchy: a single
//! `event` item resolves `["single-event", "event", "single", "singular",
//! "index"]`, a paged `genre` taxonomy listing resolves `["taxonomy-genre",
//! "taxonomy", "paged", "archive", "index"]`, and every list terminates in the
//! universal `index` fallback.
//!
//! # Architecture Overview
//!
//! Resolution is composed from small pieces, each usable on its own:
//!
//! - [`suffix`] - [`suffix::SuffixResolver`] classifies the request context
//!   into a [`context::ViewKind`] and builds the suffix chain, most specific
//!   first.
//! - [`order`] - [`order::ComponentOrderResolver`] partitions the subject's raw
//!   component set into top/middle/bottom groups per the location policy and
//!   applies the listing-visibility filter.
//! - [`selector`] - [`selector::ComponentSelector`] expands component name +
//!   suffixes into candidate paths and picks the first one that exists.
//! - [`builder`] - [`builder::ComponentBuilder`] ties the three together and
//!   renders the winning template for each component in order.
//!
//! Everything the library does not own is reached through a narrow trait:
//! [`config::ConfigStore`] for stored configuration,
//! [`content::ContentRepository`] for per-subject component data,
//! [`selector::TemplateLocator`] for file existence, and [`render::Renderer`]
//! for the actual template engines. Default implementations are provided for
//! each ([`config::TomlConfigStore`], [`selector::FsTemplateLocator`],
//! [`render::TeraRenderer`]), but a host application can substitute its own.
//!
//! # Request Scope
//!
//! A [`builder::ComponentBuilder`] is constructed per render request and owns
//! its caches: the component order and suffix list are computed lazily on
//! first access, reused for the lifetime of the instance, and recomputed only
//! after an explicit reset. Overrides (`set_components`, `set_suffixes`,
//! `set_subject_id`) replace the cached value directly. Nothing is shared
//! across threads; each request gets its own instance.
//!
//! # Example
//!
//! ```rust,no_run
//! use componentry::builder::ComponentBuilder;
//! use componentry::config::TomlConfigStore;
//! use componentry::context::{ItemKind, RequestContext, SingularView, ViewKind};
//! use componentry::render::TeraRenderer;
//! use componentry::selector::FsTemplateLocator;
//! # use componentry::content::ContentRepository;
//! # fn run(content: &dyn ContentRepository) -> componentry::Result<()> {
//! let config = TomlConfigStore::load("componentry.toml".as_ref())?;
//! let locator = FsTemplateLocator::new("themes/default");
//! let renderer = TeraRenderer::new();
//! let context = RequestContext::public(ViewKind::Singular(SingularView::item(
//!     ItemKind::Typed("event".into()),
//! )));
//!
//! let mut builder = ComponentBuilder::new(&config, content, &locator, &renderer, context);
//! let page = builder.render_to_string()?;
//! # let _ = page;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod content;
pub mod context;
pub mod core;
pub mod order;
pub mod render;
pub mod selector;
pub mod suffix;

// test_utils is available to both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use builder::ComponentBuilder;
pub use core::{ComponentryError, Result};
