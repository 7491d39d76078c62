//! Coalescing of property changes into one surface modification
//!
//! Property replies arrive one by one; each writes into the pending
//! specification, and whoever consumes it applies all of them at once.
//! `PendingSpec` lives inside the bridge's locked state, so holding `&mut`
//! to it already proves the lock is held.

use crate::shell::{same_parent, SceneSurface, SurfaceSpecification};

/// At most one not-yet-applied surface specification
#[derive(Debug, Default)]
pub struct PendingSpec {
    spec: Option<SurfaceSpecification>,
}

impl PendingSpec {
    /// The current aggregation, created on first use after the last consume
    pub fn get_or_create(&mut self) -> &mut SurfaceSpecification {
        self.spec.get_or_insert_with(SurfaceSpecification::default)
    }

    /// Take the aggregation, leaving nothing pending
    pub fn consume(&mut self) -> Option<SurfaceSpecification> {
        self.spec.take()
    }

    pub fn is_pending(&self) -> bool {
        self.spec.is_some()
    }
}

/// Drop fields the live surface already has
///
/// Returns `None` when nothing is left to apply.
pub fn drop_redundant(
    mut spec: SurfaceSpecification,
    surface: &dyn SceneSurface,
) -> Option<SurfaceSpecification> {
    if spec.application_id.as_deref() == Some(surface.application_id().as_str()) {
        spec.application_id = None;
    }

    if spec.name.as_deref() == Some(surface.name().as_str()) {
        spec.name = None;
    }

    if let Some(parent) = &spec.parent {
        if same_parent(parent, &surface.parent()) {
            spec.parent = None;
        }
    }

    if spec.is_empty() {
        None
    } else {
        Some(spec)
    }
}
