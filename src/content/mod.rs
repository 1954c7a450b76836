//! The [`ContentRepository`] collaborator trait.
//!
//! Component resolution needs two per-subject queries against the content
//! store: an explicit ordering the subject may carry, and a discovery fallback
//! for subjects without one. How either is stored is the host application's
//! business.

use crate::config::ComponentId;
use crate::context::SubjectId;

/// Per-subject component queries.
pub trait ContentRepository {
    /// The explicit component ordering stored on the subject, if any.
    ///
    /// Implementations should return `None` both when no ordering was ever
    /// stored and when the stored ordering is empty; either way resolution
    /// falls through to [`discover_components`](Self::discover_components).
    fn component_order_override(&self, subject: SubjectId) -> Option<Vec<ComponentId>>;

    /// Discovers the raw component set for a subject with no explicit
    /// ordering. The returned order is the "natural" order and is preserved
    /// for components not pinned by the location policy.
    fn discover_components(&self, subject: SubjectId) -> Vec<ComponentId>;
}
