//! Rendering Boundary
//!
//! The presenter does not draw. A [`Renderer`] owns the host's root surface
//! and the content slot inside it; the presenter only asks it whether the
//! slot is occupied, to tag the surface, and to materialize content.
//!
//! Content and the handle to materialized content are associated types, so
//! a terminal surface, a GUI toolkit, or a headless test double can each
//! use their own representation.

mod memory;

pub use memory::{MemoryHandle, MemoryRenderer};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Identifier of a content slot
///
/// Each host owns exactly one slot for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(u64);

impl SlotId {
    /// Allocate a new unique slot ID
    #[must_use]
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    /// Get the raw numeric value
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for SlotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot-{}", self.0)
    }
}

/// Accessibility role announced for the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceRole {
    /// Interrupts assistive technology immediately
    Alert,
    /// Announced when the user is idle
    Status,
}

impl SurfaceRole {
    /// Role attribute value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Status => "status",
        }
    }
}

/// Something that can be placed in a host's slot
///
/// Only component content is supported; template content is rejected by
/// the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Portal<C, T> {
    /// Content the renderer instantiates
    Component(C),
    /// A template stamped out in place
    Template(T),
}

/// Draws hosted content
pub trait Renderer {
    /// Content the renderer knows how to materialize
    type Content;
    /// Handle to materialized content
    type Handle;

    /// Whether `slot` currently holds content
    fn has_content(&self, slot: SlotId) -> bool;

    /// Instantiate `content` inside `slot`
    fn materialize(&mut self, content: Self::Content, slot: SlotId) -> Self::Handle;

    /// Add a presentation tag to the root surface
    ///
    /// Tags are additive; adding one twice has no further effect.
    fn add_surface_tag(&mut self, tag: &str);

    /// Set the accessibility role of the root surface
    ///
    /// Surfaces without accessibility support can ignore this.
    fn set_surface_role(&mut self, role: Option<SurfaceRole>) {
        let _ = role;
    }
}
