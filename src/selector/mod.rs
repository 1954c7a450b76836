//! Template file selection.
//!
//! Maps a component name plus the resolved suffix list onto the most specific
//! template file that actually exists. For a root `components/` with
//! extension `tera`, component `card`, and suffixes `["single-event",
//! "single", "index"]`, the candidates are tried in order:
//!
//! ```text
//! components/card-single-event.tera
//! components/card-single.tera
//! components/card-index.tera
//! components/card.tera
//! ```
//!
//! First existing candidate wins. Existence is delegated to a
//! [`TemplateLocator`], so selection logic stays independent of where
//! templates live; [`FsTemplateLocator`] is the filesystem implementation,
//! searching an ordered list of base directories (e.g. child theme before
//! parent theme) for each candidate.
//!
//! Roots are never interleaved: the orchestrator exhausts the primary
//! (programmatic) root's whole candidate chain before consulting the
//! secondary (structured markup) root.

use crate::config::AdvancedSettings;
use crate::suffix::Suffix;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Which rendering technology a template root holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Full template-engine templates.
    Programmatic,
    /// Structured markup rendered against a prepared context.
    Structured,
}

/// A directory/extension pair searched for templates of one kind.
#[derive(Debug, Clone)]
pub struct TemplateRoot {
    /// Root directory, relative to the locator's search directories.
    pub path: PathBuf,
    /// File extension (without the dot).
    pub extension: String,
    /// Rendering technology for files under this root.
    pub kind: TemplateKind,
}

impl TemplateRoot {
    /// The primary (programmatic) root from settings.
    pub fn primary(settings: &AdvancedSettings) -> Self {
        Self {
            path: settings.component_root.clone(),
            extension: settings.component_extension.clone(),
            kind: TemplateKind::Programmatic,
        }
    }

    /// The secondary (structured markup) root from settings.
    pub fn secondary(settings: &AdvancedSettings) -> Self {
        Self {
            path: settings.partial_root.clone(),
            extension: settings.partial_extension.clone(),
            kind: TemplateKind::Structured,
        }
    }
}

/// Existence oracle over candidate template paths.
pub trait TemplateLocator {
    /// The first candidate that exists, searched in slice order.
    fn locate(&self, candidates: &[PathBuf]) -> Option<PathBuf>;
}

/// Filesystem-backed [`TemplateLocator`].
///
/// Resolves candidates against an ordered list of search directories. The
/// search is candidate-major: the most specific candidate is tried in every
/// directory before the next candidate is considered.
#[derive(Debug, Clone)]
pub struct FsTemplateLocator {
    search_dirs: Vec<PathBuf>,
}

impl FsTemplateLocator {
    /// Locator over a single base directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { search_dirs: vec![dir.into()] }
    }

    /// Locator over several base directories, highest priority first.
    pub fn with_search_dirs(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self { search_dirs: dirs.into_iter().collect() }
    }
}

impl TemplateLocator for FsTemplateLocator {
    fn locate(&self, candidates: &[PathBuf]) -> Option<PathBuf> {
        for candidate in candidates {
            for dir in &self.search_dirs {
                let full = dir.join(candidate);
                trace!(path = %full.display(), "checking template candidate");
                if full.is_file() {
                    return Some(full);
                }
            }
        }
        None
    }
}

/// Picks the best-matching template file for a component under one root.
pub struct ComponentSelector<'a> {
    locator: &'a dyn TemplateLocator,
}

impl<'a> ComponentSelector<'a> {
    /// Creates a selector over the given locator.
    pub fn new(locator: &'a dyn TemplateLocator) -> Self {
        Self { locator }
    }

    /// Candidate paths for `component` under `root`, most specific first,
    /// ending with the bare component name.
    pub fn candidates(root: &TemplateRoot, component: &str, suffixes: &[Suffix]) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = suffixes
            .iter()
            .map(|suffix| root.path.join(format!("{component}-{suffix}.{}", root.extension)))
            .collect();
        candidates.push(root.path.join(format!("{component}.{}", root.extension)));
        candidates
    }

    /// The first existing candidate for `component` under `root`, or `None`
    /// when the root holds no template for it at all.
    pub fn select_file(
        &self,
        root: &TemplateRoot,
        component: &str,
        suffixes: &[Suffix],
    ) -> Option<PathBuf> {
        let candidates = Self::candidates(root, component, suffixes);
        let found = self.locator.locate(&candidates);
        match &found {
            Some(path) => debug!(component, path = %path.display(), "selected template"),
            None => debug!(component, root = %root.path.display(), "no template under root"),
        }
        found
    }
}
