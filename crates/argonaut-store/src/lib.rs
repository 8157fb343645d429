//! Observable FHIR resource store with per-category change events and
//! lock-scoped deep copies.
//!
//! This crate builds the aggregate the UI and data-adapter layers consume
//! on top of `argonaut-core`'s versioned resource model:
//!
//! - [`ResourceStore`] — an internally synchronized, category-partitioned
//!   collection with async mutators and synchronous reads
//! - [`StoreBroadcaster`] / [`StoreEvent`] — category-scoped change
//!   notification over a broadcast channel
//! - [`KeyedLockRegistry`] — per-identity recursive mutexes
//! - [`ResourceCopier`] — deep copies via a serialize/deserialize
//!   round-trip executed under the identity's lock
//!
//! # Example
//!
//! ```ignore
//! use argonaut_core::{FhirResource, r4};
//! use argonaut_store::ResourceStore;
//!
//! let store = ResourceStore::new();
//! let observation = FhirResource::new(
//!     r4::Resource::from(r4::Observation {
//!         id: Some("obs-1".into()),
//!         ..Default::default()
//!     }),
//!     "Heart rate",
//! );
//! store.insert(observation).await;
//! assert_eq!(store.observations().len(), 1);
//! ```

pub mod bundle;
pub mod copy;
pub mod events;
pub mod lock;
pub mod store;

pub use bundle::{Bundle, BundleEntry};
pub use copy::{CopyError, ResourceCopier};
pub use events::{StoreBroadcaster, StoreEvent, StoreEventType};
pub use lock::KeyedLockRegistry;
pub use store::ResourceStore;

// Re-export the core model for convenience.
pub use argonaut_core::{FhirResource, FhirVersion, ResourceCategory, VersionedResource};
