use serde::Serialize;

use super::region::Region;

/// A region plus its fully resolved ancestor chain, parent first and
/// province last. Collaborating modules that store a region id consume this
/// shape to render display names: walk `region`, then `ancestors` in order.
#[derive(Debug, Clone, Serialize)]
pub struct RegionWithAncestors {
    pub region: Region,
    pub ancestors: Vec<Region>,
}

/// A region together with the names of its ancestors, ordered from the
/// region itself up to its province. This is the unit the autocomplete
/// search filters and renders.
#[derive(Debug, Clone)]
pub struct RegionHierarchy {
    pub region: Region,
    pub ancestor_names: Vec<String>,
}

impl RegionHierarchy {
    /// Own name first, then ancestor names walking up the tree
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.region.name.as_str())
            .chain(self.ancestor_names.iter().map(String::as_str))
    }

    /// Comma-joined display name, e.g. "Wonosari, Gondangwetan, Pasuruan, Jawa Timur"
    pub fn full_name(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }

    /// Lower-cased own + ancestor names, space-joined, used for keyword matching
    pub fn searchable_text(&self) -> String {
        self.names().collect::<Vec<_>>().join(" ").to_lowercase()
    }

    /// AND semantics: every keyword must appear as a substring of the
    /// searchable text. Keywords are expected to be lower-cased already.
    pub fn matches_keywords(&self, keywords: &[String]) -> bool {
        let text = self.searchable_text();
        keywords.iter().all(|keyword| text.contains(keyword.as_str()))
    }
}

impl From<RegionWithAncestors> for RegionHierarchy {
    fn from(resolved: RegionWithAncestors) -> Self {
        Self {
            region: resolved.region,
            ancestor_names: resolved
                .ancestors
                .into_iter()
                .map(|ancestor| ancestor.name)
                .collect(),
        }
    }
}
