//! Component order resolution.
//!
//! Turns a subject's raw, unordered component set into the single
//! deterministic render order:
//!
//! 1. Fetch the raw id sequence: the subject's explicit ordering if it has
//!    one, otherwise the discovery fallback.
//! 2. Partition by the location policy: ids pinned `top` come first in the
//!    policy's declared order, ids pinned `bottom` come last likewise, and
//!    everything else keeps its raw relative order in between.
//! 3. Map each id through the component template configuration; ids with no
//!    mapping are dropped.
//! 4. Apply the visibility filter: on anything that is not a single-item
//!    view, only ids marked visible-on-listing survive.
//!
//! Nothing is ever sorted by name or id value; the output depends only on the
//! raw order, the policy, and the configuration. Duplicate ids in the raw set
//! render once, at their first position.

use crate::config::{ComponentId, ConfigStore, Location};
use crate::content::ContentRepository;
use crate::context::{RequestContext, SubjectId};
use crate::core::{ComponentryError, Result};
use std::collections::BTreeSet;
use tracing::debug;

/// Computes and caches the ordered component template list for one request.
#[derive(Debug, Default)]
pub struct ComponentOrderResolver {
    cached: Option<Vec<String>>,
}

impl ComponentOrderResolver {
    /// Creates a resolver with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ordered component template names for `subject`.
    ///
    /// Computed on first call, then served from the cache until
    /// [`reset`](Self::reset). With no subject there is nothing to resolve
    /// and the list is empty.
    pub fn resolve(
        &mut self,
        subject: Option<SubjectId>,
        ctx: &RequestContext,
        config: &dyn ConfigStore,
        content: &dyn ContentRepository,
    ) -> &[String] {
        if self.cached.is_none() {
            self.cached = Some(Self::compute(subject, ctx, config, content));
        }
        self.cached.as_deref().unwrap_or_default()
    }

    /// Replaces the component list, suppressing recomputation until
    /// [`reset`](Self::reset). An empty override is allowed and renders
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentryError::InvalidOverride`] if the override names the
    /// same component twice.
    pub fn set(&mut self, components: Vec<String>) -> Result<()> {
        let mut seen = BTreeSet::new();
        for component in &components {
            if !seen.insert(component.as_str()) {
                return Err(ComponentryError::InvalidOverride {
                    reason: format!("component '{component}' appears twice in override"),
                });
            }
        }
        self.cached = Some(components);
        Ok(())
    }

    /// Clears the cache (and any override); the next resolve recomputes.
    pub fn reset(&mut self) {
        self.cached = None;
    }

    fn compute(
        subject: Option<SubjectId>,
        ctx: &RequestContext,
        config: &dyn ConfigStore,
        content: &dyn ContentRepository,
    ) -> Vec<String> {
        let raw = match subject {
            Some(id) => content
                .component_order_override(id)
                .unwrap_or_else(|| content.discover_components(id)),
            None => Vec::new(),
        };

        let policy = config.location_policy();
        let top = Self::pinned(policy.for_location(Location::Top), &raw);
        let bottom = Self::pinned(policy.for_location(Location::Bottom), &raw);
        let pinned: BTreeSet<&ComponentId> = top.iter().chain(bottom.iter()).copied().collect();
        let middle: Vec<&ComponentId> = raw.iter().filter(|id| !pinned.contains(id)).collect();

        let templates = config.component_templates();
        let visible_on_listing = config.visible_on_listing();
        let single_item = ctx.is_single_item();

        let mut seen = BTreeSet::new();
        let mut order = Vec::new();
        for id in top.into_iter().chain(middle).chain(bottom) {
            if !seen.insert(id) {
                continue;
            }
            let Some(entry) = templates.get(id) else {
                debug!(component = %id, "dropping component with no template mapping");
                continue;
            };
            if single_item || visible_on_listing.contains(id) {
                order.push(entry.template.clone());
            } else {
                debug!(component = %id, "hiding component on listing view");
            }
        }
        debug!(subject = ?subject, components = order.len(), "resolved component order");
        order
    }

    // Ids pinned to one location, in the policy's declared order, restricted
    // to ids actually present in the raw set.
    fn pinned<'a>(policy_order: &'a [ComponentId], raw: &[ComponentId]) -> Vec<&'a ComponentId> {
        policy_order.iter().filter(|id| raw.contains(id)).collect()
    }
}
