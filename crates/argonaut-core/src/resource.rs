//! The versioned resource wrapper and the public `FhirResource` entity.
//!
//! Concrete resources are shared-mutable: the payload sits behind an
//! `Arc<RwLock<_>>`, so cloning a wrapper aliases the same underlying
//! object and in-place mutation through any holder is visible to all. That
//! aliasing is what the store crate's per-key locking and serialize-based
//! deep copy exist to escape.

use crate::category::ResourceCategory;
use crate::error::{CoreError, Result};
use crate::{date, dstu2, r4};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

/// FHIR schema version discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FhirVersion {
    R4,
    Dstu2,
}

impl FhirVersion {
    /// Returns the string representation of the version.
    pub fn as_str(&self) -> &'static str {
        match self {
            FhirVersion::R4 => "r4",
            FhirVersion::Dstu2 => "dstu2",
        }
    }
}

impl fmt::Display for FhirVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FhirVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "r4" | "R4" => Ok(FhirVersion::R4),
            "dstu2" | "DSTU2" => Ok(FhirVersion::Dstu2),
            _ => Err(CoreError::unknown_version(s)),
        }
    }
}

/// A concrete clinical resource tagged with the schema version its field
/// shapes follow.
///
/// `Clone` is a shallow alias: both handles point at the same underlying
/// resource. Deep, independent copies go through the store crate's copier.
#[derive(Debug, Clone)]
pub enum VersionedResource {
    R4(Arc<RwLock<r4::Resource>>),
    Dstu2(Arc<RwLock<dstu2::Resource>>),
}

impl VersionedResource {
    /// Wraps an R4 resource.
    pub fn r4(resource: r4::Resource) -> Self {
        VersionedResource::R4(Arc::new(RwLock::new(resource)))
    }

    /// Wraps a DSTU2 resource.
    pub fn dstu2(resource: dstu2::Resource) -> Self {
        VersionedResource::Dstu2(Arc::new(RwLock::new(resource)))
    }

    /// The schema version of the wrapped resource.
    pub fn version(&self) -> FhirVersion {
        match self {
            VersionedResource::R4(_) => FhirVersion::R4,
            VersionedResource::Dstu2(_) => FhirVersion::Dstu2,
        }
    }

    /// The logical identifier of the wrapped resource, if present.
    pub fn id(&self) -> Option<String> {
        match self {
            VersionedResource::R4(cell) => cell.read().id().map(str::to_owned),
            VersionedResource::Dstu2(cell) => cell.read().id().map(str::to_owned),
        }
    }

    /// Overwrites the identifier of the wrapped resource.
    pub fn set_id(&self, id: String) {
        match self {
            VersionedResource::R4(cell) => cell.write().set_id(id),
            VersionedResource::Dstu2(cell) => cell.write().set_id(id),
        }
    }

    /// The FHIR `resourceType` name of the wrapped resource.
    pub fn kind_name(&self) -> &'static str {
        match self {
            VersionedResource::R4(cell) => cell.read().kind_name(),
            VersionedResource::Dstu2(cell) => cell.read().kind_name(),
        }
    }

    /// Classifies the wrapped resource into its clinical category.
    ///
    /// Re-evaluated on every call; the kind never changes post-construction
    /// but the result is only correct to a snapshot of the shared payload.
    pub fn category(&self) -> ResourceCategory {
        match self {
            VersionedResource::R4(cell) => ResourceCategory::of_r4(cell.read().kind()),
            VersionedResource::Dstu2(cell) => ResourceCategory::of_dstu2(cell.read().kind()),
        }
    }

    /// The clinically relevant timestamp of the wrapped resource, if its
    /// kind defines one and the underlying primitive parses.
    pub fn date(&self) -> Option<OffsetDateTime> {
        match self {
            VersionedResource::R4(cell) => date::of_r4(&cell.read()),
            VersionedResource::Dstu2(cell) => date::of_dstu2(&cell.read()),
        }
    }

    /// Serializes the wrapped resource to a JSON value.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        let value = match self {
            VersionedResource::R4(cell) => serde_json::to_value(&*cell.read())?,
            VersionedResource::Dstu2(cell) => serde_json::to_value(&*cell.read())?,
        };
        Ok(value)
    }
}

impl PartialEq for VersionedResource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (VersionedResource::R4(a), VersionedResource::R4(b)) => {
                Arc::ptr_eq(a, b) || *a.read() == *b.read()
            }
            (VersionedResource::Dstu2(a), VersionedResource::Dstu2(b)) => {
                Arc::ptr_eq(a, b) || *a.read() == *b.read()
            }
            _ => false,
        }
    }
}

impl Eq for VersionedResource {}

impl From<r4::Resource> for VersionedResource {
    fn from(resource: r4::Resource) -> Self {
        VersionedResource::r4(resource)
    }
}

impl From<dstu2::Resource> for VersionedResource {
    fn from(resource: dstu2::Resource) -> Self {
        VersionedResource::dstu2(resource)
    }
}

/// A tracked clinical resource: a versioned payload plus a caller-supplied
/// human-readable label.
///
/// Identity, category and date are computed from the payload on read, never
/// stored. Equality and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FhirResource {
    versioned: VersionedResource,
    display_name: String,
}

impl FhirResource {
    /// Creates a tracked resource, enforcing the identity guarantee.
    ///
    /// A resource without a stable identifier is a programming error in the
    /// data source: development builds panic at construction; release
    /// builds synthesize a random identifier, write it back into the
    /// wrapped resource and continue.
    pub fn new(versioned: impl Into<VersionedResource>, display_name: impl Into<String>) -> Self {
        let versioned = versioned.into();
        if versioned.id().is_none_or(|id| id.is_empty()) {
            if cfg!(debug_assertions) {
                panic!(
                    "FHIR resource constructed without a stable identifier: {}",
                    versioned.kind_name()
                );
            }
            let generated = synthesize_id(&versioned);
            tracing::warn!(
                kind = versioned.kind_name(),
                id = %generated,
                "resource missing identifier, generated one"
            );
        }
        Self {
            versioned,
            display_name: display_name.into(),
        }
    }

    /// The stable identifier of the resource.
    ///
    /// # Panics
    ///
    /// Panics if the wrapped resource lost its identifier after
    /// construction; the constructor guarantees one exists, so this
    /// indicates an invariant violation elsewhere.
    pub fn id(&self) -> String {
        self.versioned
            .id()
            .expect("constructed FhirResource must carry an identifier")
    }

    /// The human-readable label supplied at construction.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The wrapped versioned payload.
    pub fn versioned(&self) -> &VersionedResource {
        &self.versioned
    }

    /// The clinical category of the resource.
    pub fn category(&self) -> ResourceCategory {
        self.versioned.category()
    }

    /// The clinically relevant timestamp, if any.
    pub fn date(&self) -> Option<OffsetDateTime> {
        self.versioned.date()
    }

    /// Mutual-exclusion key scoping "the same logical resource": the schema
    /// version discriminator joined with the identity, so resources of
    /// different versions never contend even if their raw ids collide.
    pub fn lock_key(&self) -> String {
        let id = self
            .versioned
            .id()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        format!("{}_{}", self.versioned.version().as_str(), id)
    }

    /// Pretty-printed JSON rendering of the payload for interpolation into
    /// user-facing text.
    pub fn json_description(&self) -> String {
        self.versioned
            .to_json_value()
            .and_then(|value| serde_json::to_string_pretty(&value).map_err(CoreError::from))
            .unwrap_or_default()
    }
}

impl Hash for FhirResource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hashes a subset of the Eq fields: equal resources always share
        // version, identifier and label.
        self.versioned.version().as_str().hash(state);
        self.versioned.id().hash(state);
        self.display_name.hash(state);
    }
}

/// Production-mode safety valve for resources missing an identifier.
fn synthesize_id(versioned: &VersionedResource) -> String {
    let id = Uuid::new_v4().to_string();
    versioned.set_id(id.clone());
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FhirDateTime;
    use std::collections::HashSet;
    use time::macros::datetime;

    fn observation(id: &str) -> r4::Resource {
        r4::Resource::from(r4::Observation {
            id: Some(id.into()),
            issued: Some(FhirDateTime::new("2025-01-01T00:00:00Z")),
            ..Default::default()
        })
    }

    #[test]
    fn test_version_round_trip() {
        assert_eq!(FhirVersion::from_str("r4").unwrap(), FhirVersion::R4);
        assert_eq!(FhirVersion::from_str("DSTU2").unwrap(), FhirVersion::Dstu2);
        assert!(FhirVersion::from_str("stu3").is_err());
        assert_eq!(FhirVersion::R4.to_string(), "r4");
    }

    #[test]
    fn test_derived_properties() {
        let resource = FhirResource::new(observation("obs-1"), "Heart rate");
        assert_eq!(resource.id(), "obs-1");
        assert_eq!(resource.display_name(), "Heart rate");
        assert_eq!(resource.category(), ResourceCategory::Observation);
        assert_eq!(resource.date(), Some(datetime!(2025-01-01 00:00:00 UTC)));
        assert_eq!(resource.lock_key(), "r4_obs-1");
    }

    #[test]
    fn test_clone_aliases_shared_payload() {
        let resource = FhirResource::new(observation("obs-1"), "Heart rate");
        let alias = resource.clone();

        if let VersionedResource::R4(cell) = alias.versioned() {
            cell.write().set_id("obs-2".into());
        }
        // The mutation through the clone is visible through the original.
        assert_eq!(resource.id(), "obs-2");
    }

    #[test]
    fn test_structural_equality() {
        let a = FhirResource::new(observation("obs-1"), "Heart rate");
        let b = FhirResource::new(observation("obs-1"), "Heart rate");
        assert_eq!(a, b);

        let renamed = FhirResource::new(observation("obs-1"), "Pulse");
        assert_ne!(a, renamed);

        let dstu2_twin = FhirResource::new(
            dstu2::Resource::from(dstu2::Observation {
                id: Some("obs-1".into()),
                issued: Some(FhirDateTime::new("2025-01-01T00:00:00Z")),
                ..Default::default()
            }),
            "Heart rate",
        );
        // Same raw id, different schema version: never equal.
        assert_ne!(a, dstu2_twin);
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        let a = FhirResource::new(observation("obs-1"), "Heart rate");
        let b = FhirResource::new(observation("obs-1"), "Heart rate");
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_lock_key_separates_versions() {
        let r4_resource = FhirResource::new(observation("shared-id"), "A");
        let dstu2_resource = FhirResource::new(
            dstu2::Resource::from(dstu2::Patient {
                id: Some("shared-id".into()),
                ..Default::default()
            }),
            "B",
        );
        assert_ne!(r4_resource.lock_key(), dstu2_resource.lock_key());
    }

    #[test]
    fn test_json_description_is_pretty_printed() {
        let resource = FhirResource::new(observation("obs-1"), "Heart rate");
        let json = resource.json_description();
        assert!(json.contains("\"resourceType\": \"Observation\""));
        assert!(json.contains("\"id\": \"obs-1\""));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "without a stable identifier")]
    fn test_missing_identifier_panics_in_development() {
        let _ = FhirResource::new(r4::Resource::from(r4::Patient::default()), "Anonymous");
    }

    #[test]
    fn test_synthesized_identifier_is_written_back() {
        // Exercises the release-build healing path directly.
        let versioned = VersionedResource::r4(r4::Resource::from(r4::Patient::default()));
        assert_eq!(versioned.id(), None);

        let generated = synthesize_id(&versioned);
        assert!(!generated.is_empty());
        assert_eq!(versioned.id(), Some(generated));
    }

    #[test]
    fn test_to_json_value() {
        let versioned = VersionedResource::r4(observation("obs-1"));
        let value = versioned.to_json_value().unwrap();
        assert_eq!(value["resourceType"], "Observation");
        assert_eq!(value["issued"], "2025-01-01T00:00:00Z");
    }
}
