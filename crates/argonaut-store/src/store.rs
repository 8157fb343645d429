//! Observable, category-partitioned resource collection.
//!
//! The backing collection is ordered and internally synchronized: mutators
//! are async and serialize on a write gate (one mutation in flight at a
//! time), reads are synchronous and ergonomic for UI binding. Category
//! accessors are live filters recomputed on read — O(n) per read, which is
//! fine for a single patient's record set (hundreds, not millions).
//!
//! Duplicate identifiers are not suppressed; deduplication is a caller
//! concern. Removal by id removes the first match only.

use crate::bundle::Bundle;
use crate::events::{StoreBroadcaster, StoreEvent};
use argonaut_core::{FhirResource, ResourceCategory};
use parking_lot::RwLock;
use tokio::sync::broadcast;

/// Observable collection of FHIR resources with category-scoped change
/// events.
#[derive(Debug)]
pub struct ResourceStore {
    resources: RwLock<Vec<FhirResource>>,
    write_gate: tokio::sync::Mutex<()>,
    events: StoreBroadcaster,
}

impl ResourceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            resources: RwLock::new(Vec::new()),
            write_gate: tokio::sync::Mutex::new(()),
            events: StoreBroadcaster::new(),
        }
    }

    /// Creates an empty store with a custom event buffer size.
    pub fn with_event_capacity(capacity: usize) -> Self {
        Self {
            resources: RwLock::new(Vec::new()),
            write_gate: tokio::sync::Mutex::new(()),
            events: StoreBroadcaster::with_capacity(capacity),
        }
    }

    /// Appends a resource and notifies observers of its category.
    pub async fn insert(&self, resource: FhirResource) {
        let _gate = self.write_gate.lock().await;
        let category = resource.category();
        let id = resource.id();
        tracing::debug!(%category, %id, "inserting resource");
        self.resources.write().push(resource);
        self.events.send(StoreEvent::inserted(category, id));
    }

    /// Removes the first resource with the given id, if any, and notifies
    /// observers of the removed resource's category.
    pub async fn remove(&self, id: &str) -> Option<FhirResource> {
        let _gate = self.write_gate.lock().await;
        let removed = {
            let mut resources = self.resources.write();
            let position = resources
                .iter()
                .position(|resource| resource.versioned().id().as_deref() == Some(id))?;
            resources.remove(position)
        };
        let category = removed.category();
        tracing::debug!(%category, id, "removed resource");
        self.events.send(StoreEvent::removed(category, id));
        Some(removed)
    }

    /// Clears the collection and notifies observers of every category.
    pub async fn remove_all(&self) {
        let _gate = self.write_gate.lock().await;
        let cleared = {
            let mut resources = self.resources.write();
            let count = resources.len();
            resources.clear();
            count
        };
        tracing::debug!(cleared, "cleared store");
        for category in ResourceCategory::ALL {
            self.events.send(StoreEvent::cleared(category));
        }
    }

    /// Inserts every entry of a bundle as a new tracked resource.
    ///
    /// Cooperative: yields between entries, so cancelling the enclosing
    /// task stops further insertions. Entries already inserted are not
    /// rolled back.
    pub async fn load(&self, bundle: Bundle) {
        for entry in bundle {
            let display_name = entry.effective_display_name();
            self.insert(FhirResource::new(entry.resource, display_name))
                .await;
            tokio::task::yield_now().await;
        }
    }

    /// Resources of the given category, in insertion order.
    pub fn resources_in(&self, category: ResourceCategory) -> Vec<FhirResource> {
        self.resources
            .read()
            .iter()
            .filter(|resource| resource.category() == category)
            .cloned()
            .collect()
    }

    /// All resources, in insertion order.
    pub fn all_resources(&self) -> Vec<FhirResource> {
        self.resources.read().clone()
    }

    /// Resources whose display name contains `query`, case-insensitively.
    pub fn search_display_names(&self, query: &str) -> Vec<FhirResource> {
        let needle = query.to_lowercase();
        self.resources
            .read()
            .iter()
            .filter(|resource| resource.display_name().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Total resource count.
    pub fn len(&self) -> usize {
        self.resources.read().len()
    }

    /// Whether the store holds no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.read().is_empty()
    }

    /// Subscribes to change events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn observations(&self) -> Vec<FhirResource> {
        self.resources_in(ResourceCategory::Observation)
    }

    pub fn encounters(&self) -> Vec<FhirResource> {
        self.resources_in(ResourceCategory::Encounter)
    }

    pub fn conditions(&self) -> Vec<FhirResource> {
        self.resources_in(ResourceCategory::Condition)
    }

    pub fn diagnostics(&self) -> Vec<FhirResource> {
        self.resources_in(ResourceCategory::Diagnostic)
    }

    pub fn procedures(&self) -> Vec<FhirResource> {
        self.resources_in(ResourceCategory::Procedure)
    }

    pub fn immunizations(&self) -> Vec<FhirResource> {
        self.resources_in(ResourceCategory::Immunization)
    }

    pub fn allergy_intolerances(&self) -> Vec<FhirResource> {
        self.resources_in(ResourceCategory::AllergyIntolerance)
    }

    pub fn medications(&self) -> Vec<FhirResource> {
        self.resources_in(ResourceCategory::Medication)
    }

    pub fn other_resources(&self) -> Vec<FhirResource> {
        self.resources_in(ResourceCategory::Other)
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::BundleEntry;
    use crate::events::StoreEventType;
    use argonaut_core::{FhirDateTime, dstu2, r4};
    use time::macros::datetime;

    fn observation(id: &str, name: &str) -> FhirResource {
        FhirResource::new(
            r4::Resource::from(r4::Observation {
                id: Some(id.into()),
                issued: Some(FhirDateTime::new("2025-01-01T00:00:00Z")),
                ..Default::default()
            }),
            name,
        )
    }

    fn one_of_each_category() -> Vec<FhirResource> {
        vec![
            observation("obs-1", "Heart rate"),
            FhirResource::new(
                r4::Resource::from(r4::Encounter {
                    id: Some("enc-1".into()),
                    ..Default::default()
                }),
                "Checkup",
            ),
            FhirResource::new(
                r4::Resource::from(r4::Condition {
                    id: Some("cond-1".into()),
                    ..Default::default()
                }),
                "Hypertension",
            ),
            FhirResource::new(
                r4::Resource::from(r4::DiagnosticReport {
                    id: Some("dr-1".into()),
                    ..Default::default()
                }),
                "Lipid panel",
            ),
            FhirResource::new(
                dstu2::Resource::from(dstu2::ProcedureRequest {
                    id: Some("pr-1".into()),
                    ..Default::default()
                }),
                "Biopsy request",
            ),
            FhirResource::new(
                r4::Resource::from(r4::Immunization {
                    id: Some("imm-1".into()),
                    ..Default::default()
                }),
                "Flu shot",
            ),
            FhirResource::new(
                dstu2::Resource::from(dstu2::AllergyIntolerance {
                    id: Some("al-1".into()),
                    ..Default::default()
                }),
                "Peanut allergy",
            ),
            FhirResource::new(
                r4::Resource::from(r4::MedicationRequest {
                    id: Some("rx-1".into()),
                    ..Default::default()
                }),
                "Lisinopril",
            ),
            FhirResource::new(
                r4::Resource::from(r4::Patient {
                    id: Some("pat-1".into()),
                    ..Default::default()
                }),
                "Jane Doe",
            ),
        ]
    }

    #[tokio::test]
    async fn test_insert_observation_scenario() {
        let store = ResourceStore::new();
        store.insert(observation("obs-1", "Heart rate")).await;

        let observations = store.observations();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].category(), ResourceCategory::Observation);
        assert_eq!(
            observations[0].date(),
            Some(datetime!(2025-01-01 00:00:00 UTC))
        );
    }

    #[tokio::test]
    async fn test_condition_with_range_onset_is_dateless() {
        let store = ResourceStore::new();
        store
            .insert(FhirResource::new(
                r4::Resource::from(r4::Condition {
                    id: Some("cond-1".into()),
                    onset_range: Some(serde_json::json!({"low": {"value": 40}})),
                    ..Default::default()
                }),
                "Arthritis",
            ))
            .await;

        let conditions = store.conditions();
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].category(), ResourceCategory::Condition);
        assert_eq!(conditions[0].date(), None);
    }

    #[tokio::test]
    async fn test_category_partition() {
        let store = ResourceStore::new();
        for resource in one_of_each_category() {
            store.insert(resource).await;
        }

        assert_eq!(store.observations().len(), 1);
        assert_eq!(store.encounters().len(), 1);
        assert_eq!(store.conditions().len(), 1);
        assert_eq!(store.diagnostics().len(), 1);
        assert_eq!(store.procedures().len(), 1);
        assert_eq!(store.immunizations().len(), 1);
        assert_eq!(store.allergy_intolerances().len(), 1);
        assert_eq!(store.medications().len(), 1);
        assert_eq!(store.other_resources().len(), 1);

        let union: usize = ResourceCategory::ALL
            .iter()
            .map(|category| store.resources_in(*category).len())
            .sum();
        assert_eq!(union, store.len());
        assert_eq!(store.len(), 9);
    }

    #[tokio::test]
    async fn test_remove_all_clears_every_category() {
        let store = ResourceStore::new();
        for resource in one_of_each_category() {
            store.insert(resource).await;
        }

        store.remove_all().await;

        assert!(store.is_empty());
        for category in ResourceCategory::ALL {
            assert!(store.resources_in(category).is_empty(), "{category}");
        }
    }

    #[tokio::test]
    async fn test_remove_by_id_removes_first_match_only() {
        let store = ResourceStore::new();
        store.insert(observation("obs-1", "First")).await;
        store.insert(observation("obs-1", "Second")).await;

        let removed = store.remove("obs-1").await.unwrap();
        assert_eq!(removed.display_name(), "First");

        let remaining = store.observations();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].display_name(), "Second");
    }

    #[tokio::test]
    async fn test_remove_missing_id_is_noop() {
        let store = ResourceStore::new();
        store.insert(observation("obs-1", "Heart rate")).await;
        assert!(store.remove("nope").await.is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_events_are_category_scoped() {
        let store = ResourceStore::new();
        let mut receiver = store.subscribe();

        store.insert(observation("obs-1", "Heart rate")).await;
        store
            .insert(FhirResource::new(
                r4::Resource::from(r4::Procedure {
                    id: Some("proc-1".into()),
                    ..Default::default()
                }),
                "Appendectomy",
            ))
            .await;

        let first = receiver.recv().await.unwrap();
        assert_eq!(first.event_type, StoreEventType::Inserted);
        assert_eq!(first.category, ResourceCategory::Observation);
        assert_eq!(first.resource_id.as_deref(), Some("obs-1"));

        let second = receiver.recv().await.unwrap();
        assert_eq!(second.category, ResourceCategory::Procedure);

        store.remove("obs-1").await;
        let third = receiver.recv().await.unwrap();
        assert_eq!(third.event_type, StoreEventType::Removed);
        assert_eq!(third.category, ResourceCategory::Observation);
    }

    #[tokio::test]
    async fn test_remove_all_notifies_every_category() {
        let store = ResourceStore::new();
        store.insert(observation("obs-1", "Heart rate")).await;
        let mut receiver = store.subscribe();

        store.remove_all().await;

        let mut seen = Vec::new();
        for _ in 0..ResourceCategory::ALL.len() {
            let event = receiver.recv().await.unwrap();
            assert_eq!(event.event_type, StoreEventType::Cleared);
            seen.push(event.category);
        }
        for category in ResourceCategory::ALL {
            assert!(seen.contains(&category), "{category}");
        }
    }

    #[tokio::test]
    async fn test_load_bundle_with_display_name_fallback() {
        let store = ResourceStore::new();
        let mut bundle = Bundle::new();
        bundle.push(
            BundleEntry::new(r4::Resource::from(r4::Patient {
                id: Some("pat-1".into()),
                ..Default::default()
            }))
            .with_display_name("Jane Doe"),
        );
        bundle.push(BundleEntry::new(dstu2::Resource::from(
            dstu2::MedicationOrder {
                id: Some("rx-1".into()),
                ..Default::default()
            },
        )));

        store.load(bundle).await;

        assert_eq!(store.len(), 2);
        assert_eq!(store.other_resources()[0].display_name(), "Jane Doe");
        assert_eq!(store.medications()[0].display_name(), "MedicationOrder");
    }

    #[tokio::test]
    async fn test_cancelled_load_leaves_consistent_partial_state() {
        let store = std::sync::Arc::new(ResourceStore::new());
        let size = fastrand::usize(200..400);
        let bundle: Bundle = (0..size)
            .map(|i| {
                BundleEntry::new(r4::Resource::from(r4::Observation {
                    id: Some(format!("obs-{i}")),
                    ..Default::default()
                }))
            })
            .collect();

        let loader = {
            let store = std::sync::Arc::clone(&store);
            tokio::spawn(async move { store.load(bundle).await })
        };
        tokio::task::yield_now().await;
        loader.abort();
        let _ = loader.await;

        // Partial application is fine; corruption is not.
        assert!(store.len() <= size);
        for resource in store.all_resources() {
            assert!(!resource.id().is_empty());
            assert_eq!(resource.category(), ResourceCategory::Observation);
        }
        let union: usize = ResourceCategory::ALL
            .iter()
            .map(|category| store.resources_in(*category).len())
            .sum();
        assert_eq!(union, store.len());
    }

    #[tokio::test]
    async fn test_search_display_names() {
        let store = ResourceStore::new();
        store.insert(observation("obs-1", "Heart rate")).await;
        store.insert(observation("obs-2", "Respiratory rate")).await;
        store.insert(observation("obs-3", "Body weight")).await;

        let hits = store.search_display_names("RATE");
        assert_eq!(hits.len(), 2);
        assert!(store.search_display_names("glucose").is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_not_suppressed() {
        let store = ResourceStore::new();
        store.insert(observation("obs-1", "First")).await;
        store.insert(observation("obs-1", "Second")).await;
        assert_eq!(store.len(), 2);
    }
}
