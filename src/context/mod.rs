//! Explicit request context.
//!
//! Earlier versions of this logic leaned on ambient "what is the current
//! request" lookups. Here everything the resolvers need to know about the
//! request is carried by a [`RequestContext`] value built at the edge, which
//! keeps resolution deterministic and directly testable.
//!
//! The heart of the context is [`ViewKind`], a tagged classification of the
//! request. Exactly one variant applies; the suffix resolver branches on it
//! instead of probing a pile of predicates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the content item being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub u64);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Everything resolution needs to know about the current request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Classification of the requested view.
    pub view: ViewKind,
    /// True inside an editor/preview context rather than a public-facing
    /// request. Editor contexts build their suffix chain through a separate
    /// path with no listing branch.
    pub editor: bool,
    /// The ambient current subject, if the request has one. A builder-level
    /// subject pin takes precedence over this.
    pub subject: Option<SubjectId>,
}

impl RequestContext {
    /// Context for a public-facing request.
    pub fn public(view: ViewKind) -> Self {
        Self { view, editor: false, subject: None }
    }

    /// Context for an editor/preview request.
    pub fn editor(view: ViewKind) -> Self {
        Self { view, editor: true, subject: None }
    }

    /// Sets the ambient current subject.
    #[must_use]
    pub fn with_subject(mut self, subject: SubjectId) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Whether this request shows a single content item (as opposed to a
    /// listing, search, or error view). Listing-visibility filtering keys off
    /// this.
    pub fn is_single_item(&self) -> bool {
        matches!(self.view, ViewKind::Singular(_))
    }
}

/// Exclusive classification of the requested view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    /// A single content item.
    Singular(SingularView),
    /// An archive-style listing of items.
    Listing(ListingView),
    /// Search results.
    Search,
    /// Nothing matched the request.
    NotFound,
    /// The home listing; `front_page` marks the site front page.
    Home {
        /// True when the home listing is also the configured front page.
        front_page: bool,
    },
}

/// Details of a single-item view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingularView {
    /// What kind of item is shown.
    pub item: ItemKind,
    /// Custom template slug declared on the item, if any. Only honored for
    /// pages; the slug is normalized before use as a suffix.
    pub custom_template: Option<String>,
    /// Special site role of this item, if any. Only consulted in editor
    /// contexts, where the public Home classification is unavailable.
    pub role: SingularRole,
}

impl SingularView {
    /// A standard single item of the given kind.
    pub fn item(kind: ItemKind) -> Self {
        Self { item: kind, custom_template: None, role: SingularRole::Standard }
    }

    /// Declares a custom template slug on the item.
    #[must_use]
    pub fn with_custom_template(mut self, slug: impl Into<String>) -> Self {
        self.custom_template = Some(slug.into());
        self
    }

    /// Marks the item's site role.
    #[must_use]
    pub fn with_role(mut self, role: SingularRole) -> Self {
        self.role = role;
        self
    }
}

/// Kind of a single content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// A static page.
    Page,
    /// A media attachment page.
    Attachment,
    /// Any other item type, identified by its type slug (e.g. `post`,
    /// `event`).
    Typed(String),
}

/// Site role of a singular item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingularRole {
    /// No special role.
    #[default]
    Standard,
    /// The page configured to host the posts listing.
    PostsPage,
    /// The page configured as the static front page.
    FrontPage,
}

/// Details of a listing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingView {
    /// Exclusive listing classification.
    pub kind: ListingKind,
    /// True when showing a page of results past the first.
    pub paged: bool,
}

impl ListingView {
    /// First page of a listing of the given kind.
    pub fn of(kind: ListingKind) -> Self {
        Self { kind, paged: false }
    }

    /// Marks the listing as a page past the first.
    #[must_use]
    pub fn paged(mut self) -> Self {
        self.paged = true;
        self
    }
}

/// Exclusive classification of a listing view.
///
/// When a request could satisfy more than one of these, classification at the
/// edge picks the first that applies, in declaration order (author before
/// category before tag before taxonomy before date before typed archives).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingKind {
    /// Items by a single author.
    Author,
    /// Items in a category.
    Category,
    /// Items with a tag.
    Tag,
    /// Items in a custom taxonomy term; carries the taxonomy slug.
    Taxonomy(String),
    /// Items from a date span.
    Date,
    /// Archive of a custom item type; carries the type slug.
    Typed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_singular_views_are_single_item() {
        let singular =
            RequestContext::public(ViewKind::Singular(SingularView::item(ItemKind::Page)));
        assert!(singular.is_single_item());

        let listing =
            RequestContext::public(ViewKind::Listing(ListingView::of(ListingKind::Category)));
        assert!(!listing.is_single_item());
        assert!(!RequestContext::public(ViewKind::Search).is_single_item());
        assert!(!RequestContext::public(ViewKind::Home { front_page: false }).is_single_item());
    }

    #[test]
    fn editor_context_keeps_view_classification() {
        let ctx = RequestContext::editor(ViewKind::Singular(
            SingularView::item(ItemKind::Page).with_role(SingularRole::FrontPage),
        ))
        .with_subject(SubjectId(7));
        assert!(ctx.editor);
        assert!(ctx.is_single_item());
        assert_eq!(ctx.subject, Some(SubjectId(7)));
    }
}
