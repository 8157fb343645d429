//! Lock-scoped deep copying of resources.
//!
//! The wrapped concrete resources are shared-mutable, so encoding one while
//! another thread mutates it is unsafe. The copier serializes each copy
//! against other copies of the *same logical resource* via the per-key lock
//! registry, and produces the duplicate through a serialize/deserialize
//! round-trip: guaranteed to capture every field, at the cost of being
//! expensive. Callers should copy only when they truly need an independent
//! instance.

use crate::lock::KeyedLockRegistry;
use argonaut_core::{FhirResource, VersionedResource};
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised while deep-copying a resource.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("copy serialization round-trip failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Produces deep, independent copies of resources under per-identity locks.
#[derive(Debug, Default)]
pub struct ResourceCopier {
    locks: KeyedLockRegistry,
}

impl ResourceCopier {
    /// Creates a copier with its own lock registry.
    pub fn new() -> Self {
        Self {
            locks: KeyedLockRegistry::new(),
        }
    }

    /// The process-wide copier instance.
    ///
    /// Copies made through different registries do not serialize against
    /// each other; callers that share resources across subsystems should
    /// share this instance.
    pub fn shared() -> &'static ResourceCopier {
        static SHARED: OnceLock<ResourceCopier> = OnceLock::new();
        SHARED.get_or_init(ResourceCopier::new)
    }

    /// Returns a resource with identical content and display name but a
    /// fully independent allocation: mutating the copy never affects the
    /// original, and vice versa.
    ///
    /// Copies of the same logical resource are serialized against each
    /// other; copies of distinct resources run concurrently.
    pub fn copy(&self, resource: &FhirResource) -> Result<FhirResource, CopyError> {
        // Snapshot of the immutable wrapper itself; only the payload
        // round-trip below runs under the lock.
        let display_name = resource.display_name().to_owned();
        let key = resource.lock_key();

        self.locks.with_lock(&key, || {
            let fresh = match resource.versioned() {
                VersionedResource::R4(cell) => {
                    let encoded = serde_json::to_vec(&*cell.read())?;
                    VersionedResource::r4(serde_json::from_slice(&encoded)?)
                }
                VersionedResource::Dstu2(cell) => {
                    let encoded = serde_json::to_vec(&*cell.read())?;
                    VersionedResource::dstu2(serde_json::from_slice(&encoded)?)
                }
            };
            Ok(FhirResource::new(fresh, display_name))
        })
    }
}
