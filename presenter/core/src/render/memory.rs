//! Headless in-memory renderer
//!
//! Keeps materialized content in a map and records surface tags and role.
//! Useful for headless hosting and for asserting what a host did.

use std::collections::HashMap;

use super::{Renderer, SlotId, SurfaceRole};

/// Handle to content held by a [`MemoryRenderer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryHandle {
    /// Slot the content lives in
    pub slot: SlotId,
    /// Materialization order, starting at 1
    pub sequence: u64,
}

/// Renderer that stores content instead of drawing it
#[derive(Debug)]
pub struct MemoryRenderer<C> {
    slots: HashMap<SlotId, C>,
    tags: Vec<String>,
    role: Option<SurfaceRole>,
    materialized: u64,
}

impl<C> MemoryRenderer<C> {
    /// Create an empty renderer
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            tags: Vec::new(),
            role: None,
            materialized: 0,
        }
    }

    /// Content currently in `slot`
    #[must_use]
    pub fn content(&self, slot: SlotId) -> Option<&C> {
        self.slots.get(&slot)
    }

    /// Remove and return the content in `slot`
    pub fn clear_slot(&mut self, slot: SlotId) -> Option<C> {
        self.slots.remove(&slot)
    }

    /// Tags on the root surface, in the order they were added
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Whether the root surface carries `tag`
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Role of the root surface
    #[must_use]
    pub fn role(&self) -> Option<SurfaceRole> {
        self.role
    }

    /// How many times content was materialized
    #[must_use]
    pub fn materialized_count(&self) -> u64 {
        self.materialized
    }
}

impl<C> Default for MemoryRenderer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Renderer for MemoryRenderer<C> {
    type Content = C;
    type Handle = MemoryHandle;

    fn has_content(&self, slot: SlotId) -> bool {
        self.slots.contains_key(&slot)
    }

    fn materialize(&mut self, content: C, slot: SlotId) -> MemoryHandle {
        self.materialized += 1;
        self.slots.insert(slot, content);
        MemoryHandle {
            slot,
            sequence: self.materialized,
        }
    }

    fn add_surface_tag(&mut self, tag: &str) {
        if !self.has_tag(tag) {
            self.tags.push(tag.to_string());
        }
    }

    fn set_surface_role(&mut self, role: Option<SurfaceRole>) {
        self.role = role;
    }
}
