//! Bulk-load input for the store.
//!
//! A bundle is the in-process proxy for an externally parsed resource
//! collection (JSON bundle files, HealthKit adapters). Wire parsing happens
//! upstream; entries here already carry versioned payloads.

use argonaut_core::VersionedResource;

/// An entry of a [`Bundle`]: a versioned payload plus an optional label.
#[derive(Debug, Clone)]
pub struct BundleEntry {
    pub resource: VersionedResource,
    /// Human-readable label; falls back to the resource kind name when
    /// absent.
    pub display_name: Option<String>,
}

impl BundleEntry {
    /// Creates an entry without an explicit label.
    pub fn new(resource: impl Into<VersionedResource>) -> Self {
        Self {
            resource: resource.into(),
            display_name: None,
        }
    }

    /// Sets the label.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// The effective label for this entry.
    pub fn effective_display_name(&self) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None => self.resource.kind_name().to_string(),
        }
    }
}

/// An ordered collection of resource proxies for bulk-populating a store.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: BundleEntry) {
        self.entry.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entry.len()
    }

    /// Whether the bundle has no entries.
    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }
}

impl FromIterator<BundleEntry> for Bundle {
    fn from_iter<I: IntoIterator<Item = BundleEntry>>(iter: I) -> Self {
        Self {
            entry: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Bundle {
    type Item = BundleEntry;
    type IntoIter = std::vec::IntoIter<BundleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entry.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argonaut_core::r4;

    #[test]
    fn test_display_name_fallback() {
        let entry = BundleEntry::new(r4::Resource::from(r4::Patient {
            id: Some("pat-1".into()),
            ..Default::default()
        }));
        assert_eq!(entry.effective_display_name(), "Patient");

        let named = entry.with_display_name("Jane Doe");
        assert_eq!(named.effective_display_name(), "Jane Doe");
    }

    #[test]
    fn test_bundle_collect() {
        let bundle: Bundle = (0..3)
            .map(|i| {
                BundleEntry::new(r4::Resource::from(r4::Condition {
                    id: Some(format!("cond-{i}")),
                    ..Default::default()
                }))
            })
            .collect();
        assert_eq!(bundle.len(), 3);
        assert!(!bundle.is_empty());
    }
}
