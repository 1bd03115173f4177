//! # Identity Resolution
//!
//! Maps the raw terminal identifier a message reports to an internal device
//! handle. Resolution is a collaborator of the decoder: an identifier the
//! registry does not know rejects the message with no report, the same as a
//! grammar mismatch.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// An opaque internal device handle.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u64);

/// Resolves reported terminal identifiers to device handles.
///
/// Implementations must be side-effect-free from the decoder's point of view
/// and concurrency-safe if the decoder is shared across threads.
pub trait IdentityResolver {
    /// Returns the handle for a raw identifier, or `None` for an
    /// unrecognized sender.
    fn resolve(&self, raw: &str) -> Option<DeviceId>;
}

impl<T: IdentityResolver + ?Sized> IdentityResolver for &T {
    fn resolve(&self, raw: &str) -> Option<DeviceId> {
        (**self).resolve(raw)
    }
}

/// An in-memory identifier registry.
#[derive(Debug, Default, Clone)]
pub struct MemoryRegistry {
    devices: HashMap<String, DeviceId>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        MemoryRegistry::default()
    }

    /// Registers one identifier.
    pub fn insert(&mut self, identifier: impl Into<String>, device: DeviceId) {
        self.devices.insert(identifier.into(), device);
    }
}

impl IdentityResolver for MemoryRegistry {
    fn resolve(&self, raw: &str) -> Option<DeviceId> {
        self.devices.get(raw).copied()
    }
}
