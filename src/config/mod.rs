//! Configuration model and the [`ConfigStore`] collaborator trait.
//!
//! Componentry is driven by four pieces of stored configuration:
//!
//! 1. **Component templates** - the map from [`ComponentId`] to the base
//!    template name that renders it. Ids absent from this map never render.
//! 2. **Advanced settings** ([`AdvancedSettings`]) - the template roots and
//!    file extensions for the two supported template kinds.
//! 3. **Location policy** ([`LocationPolicy`]) - components pinned to the top
//!    or bottom of the render order, in a declared relative order.
//! 4. **Listing visibility** - the set of component ids that stay visible on
//!    listing (archive-style) views; everything else only renders on
//!    single-item views.
//!
//! The [`ConfigStore`] trait is the seam between the resolvers and wherever
//! this configuration actually lives. [`TomlConfigStore`] is the bundled
//! file-backed implementation:
//!
//! ```toml
//! visible_on_listing = ["hero"]
//!
//! [settings]
//! component_root = "components"
//! component_extension = "tera"
//! partial_root = "partials"
//! partial_extension = "html"
//!
//! [components.hero]
//! template = "hero"
//!
//! [components.footer-cta]
//! template = "footer-cta"
//!
//! [locations]
//! top = ["hero"]
//! bottom = ["footer-cta"]
//! ```

mod store;

pub use store::TomlConfigStore;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Opaque identifier naming a configured component group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Creates a component id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Per-component configuration entry.
///
/// Host applications usually store richer metadata per component; only the
/// template base name matters for resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTemplate {
    /// Base template name, without suffix or extension.
    pub template: String,
}

/// A render-order location a component can be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Pinned ahead of all freely sortable components.
    Top,
    /// Pinned after all freely sortable components.
    Bottom,
}

/// Components pinned to a location, in their declared relative order.
///
/// A location that is not configured defaults to the empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationPolicy {
    /// Ids rendered first, in this order.
    pub top: Vec<ComponentId>,
    /// Ids rendered last, in this order.
    pub bottom: Vec<ComponentId>,
}

impl LocationPolicy {
    /// The pinned order for one location.
    pub fn for_location(&self, location: Location) -> &[ComponentId] {
        match location {
            Location::Top => &self.top,
            Location::Bottom => &self.bottom,
        }
    }
}

/// Template roots and extensions for the two template kinds.
///
/// The primary (programmatic) root is searched before the secondary
/// (structured markup) root, each as a whole fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettings {
    /// Directory searched for programmatic component templates.
    pub component_root: PathBuf,
    /// File extension of programmatic templates.
    pub component_extension: String,
    /// Directory searched for structured markup partials.
    pub partial_root: PathBuf,
    /// File extension of structured markup partials.
    pub partial_extension: String,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            component_root: PathBuf::from("components"),
            component_extension: "tera".to_string(),
            partial_root: PathBuf::from("partials"),
            partial_extension: "html".to_string(),
        }
    }
}

/// Read access to stored componentry configuration.
///
/// Implementations are read-only snapshots for the duration of a request.
pub trait ConfigStore {
    /// Map from component id to its template entry.
    fn component_templates(&self) -> &BTreeMap<ComponentId, ComponentTemplate>;

    /// Template roots and extensions.
    fn advanced_settings(&self) -> &AdvancedSettings;

    /// Pinned top/bottom ordering.
    fn location_policy(&self) -> &LocationPolicy;

    /// Ids that remain visible on listing views.
    fn visible_on_listing(&self) -> &BTreeSet<ComponentId>;
}
