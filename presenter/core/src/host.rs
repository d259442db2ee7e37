//! Content Host - Single-Slot Container
//!
//! Owns one content slot for its whole lifetime. The first successful
//! attach fills the slot; every later attach fails with
//! [`PresenterError::ContentAlreadyAttached`] and leaves the first content in
//! place. Surface tags and the accessibility role are applied right before
//! the content is materialized, and are never removed.

use crate::config::PanelConfig;
use crate::error::{PresenterError, Result};
use crate::render::{Portal, Renderer, SlotId, SurfaceRole};

/// Single-slot content container
pub struct ContentHost<R: Renderer> {
    slot: SlotId,
    renderer: R,
    tags: Vec<String>,
    role: Option<SurfaceRole>,
    applied_tags: Vec<String>,
    attached: bool,
}

impl<R: Renderer> ContentHost<R> {
    /// Create a host with the surface options derived from `config`
    pub fn new(renderer: R, config: &PanelConfig) -> Self {
        Self::with_surface_options(renderer, config.surface_tags(), config.surface_role())
    }

    /// Create a host with explicit surface tags and role
    pub fn with_surface_options(
        renderer: R,
        tags: Vec<String>,
        role: Option<SurfaceRole>,
    ) -> Self {
        Self {
            slot: SlotId::new(),
            renderer,
            tags,
            role,
            applied_tags: Vec::new(),
            attached: false,
        }
    }

    /// Slot this host renders into
    #[must_use]
    pub fn slot(&self) -> SlotId {
        self.slot
    }

    /// Whether content was attached, or is in the slot
    ///
    /// Stays true after the renderer clears the slot: a host accepts one
    /// attachment in its lifetime.
    #[must_use]
    pub fn has_attached(&self) -> bool {
        self.attached || self.renderer.has_content(self.slot)
    }

    /// Tags this host has applied to the surface so far
    #[must_use]
    pub fn applied_tags(&self) -> &[String] {
        &self.applied_tags
    }

    /// The renderer
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the renderer
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Materialize `content` in the slot
    ///
    /// # Errors
    ///
    /// Returns [`PresenterError::ContentAlreadyAttached`] if this host already
    /// attached content or the slot is occupied. Nothing is applied to the
    /// surface in that case.
    pub fn attach(&mut self, content: R::Content) -> Result<R::Handle> {
        self.assert_not_attached()?;
        self.apply_surface_options();

        let handle = self.renderer.materialize(content, self.slot);
        self.attached = true;
        tracing::debug!(
            slot = %self.slot,
            tags = self.applied_tags.len(),
            "Panel content attached"
        );
        Ok(handle)
    }

    /// Template content is not supported
    ///
    /// # Errors
    ///
    /// Always returns [`PresenterError::NotImplemented`].
    pub fn attach_template<T>(&mut self, _template: T) -> Result<R::Handle> {
        tracing::warn!(slot = %self.slot, "Template content attachment requested");
        Err(PresenterError::NotImplemented("template content attachment"))
    }

    /// Attach either kind of portal
    ///
    /// # Errors
    ///
    /// See [`ContentHost::attach`] and [`ContentHost::attach_template`].
    pub fn attach_portal<T>(&mut self, portal: Portal<R::Content, T>) -> Result<R::Handle> {
        match portal {
            Portal::Component(content) => self.attach(content),
            Portal::Template(template) => self.attach_template(template),
        }
    }

    fn assert_not_attached(&self) -> Result<()> {
        if self.has_attached() {
            tracing::warn!(slot = %self.slot, "Rejected second content attachment");
            return Err(PresenterError::ContentAlreadyAttached);
        }
        Ok(())
    }

    fn apply_surface_options(&mut self) {
        for tag in &self.tags {
            self.renderer.add_surface_tag(tag);
            if !self.applied_tags.contains(tag) {
                self.applied_tags.push(tag.clone());
            }
        }
        self.renderer.set_surface_role(self.role);
    }
}

impl<R: Renderer + std::fmt::Debug> std::fmt::Debug for ContentHost<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentHost")
            .field("slot", &self.slot)
            .field("tags", &self.tags)
            .field("role", &self.role)
            .field("attached", &self.attached)
            .field("renderer", &self.renderer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HorizontalPosition, Politeness, VerticalPosition, CENTER_TAG, TOP_TAG};
    use crate::render::MemoryRenderer;

    fn host(config: &PanelConfig) -> ContentHost<MemoryRenderer<&'static str>> {
        ContentHost::new(MemoryRenderer::new(), config)
    }

    #[test]
    fn test_attach_materializes_content() {
        let mut host = host(&PanelConfig::default());
        assert!(!host.has_attached());

        let handle = host.attach("Message archived").unwrap();

        assert!(host.has_attached());
        assert_eq!(handle.slot, host.slot());
        assert_eq!(
            host.renderer().content(host.slot()),
            Some(&"Message archived")
        );
    }

    #[test]
    fn test_second_attach_rejected_and_first_kept() {
        let mut host = host(&PanelConfig::default());
        host.attach("X").unwrap();

        let err = host.attach("Y").unwrap_err();

        assert_eq!(err, PresenterError::ContentAlreadyAttached);
        assert_eq!(host.renderer().content(host.slot()), Some(&"X"));
        assert_eq!(host.renderer().materialized_count(), 1);
    }

    #[test]
    fn test_every_later_attach_rejected() {
        let mut host = host(&PanelConfig::default());
        host.attach("first").unwrap();
        for content in ["second", "third", "fourth"] {
            assert_eq!(
                host.attach(content),
                Err(PresenterError::ContentAlreadyAttached)
            );
        }
        assert_eq!(host.renderer().content(host.slot()), Some(&"first"));
    }

    #[test]
    fn test_tags_applied_before_content() {
        let config = PanelConfig::new()
            .with_tag("panel-warning")
            .with_position(HorizontalPosition::Center, VerticalPosition::Top);
        let mut host = host(&config);

        assert!(host.renderer().tags().is_empty());
        host.attach("content").unwrap();

        assert_eq!(
            host.renderer().tags(),
            ["panel-warning", CENTER_TAG, TOP_TAG]
        );
        assert_eq!(host.applied_tags(), host.renderer().tags());
    }

    #[test]
    fn test_rejected_attach_applies_nothing_new() {
        let mut host = ContentHost::with_surface_options(
            MemoryRenderer::new(),
            vec!["only".to_string()],
            None,
        );
        // Occupy the slot behind the host's back
        let slot = host.slot();
        host.renderer_mut().materialize("foreign", slot);

        assert!(host.attach("mine").is_err());
        assert!(host.renderer().tags().is_empty());
        assert!(host.applied_tags().is_empty());
    }

    #[test]
    fn test_cleared_slot_does_not_allow_reattach() {
        let mut host = host(&PanelConfig::default());
        host.attach("X").unwrap();

        let slot = host.slot();
        assert_eq!(host.renderer_mut().clear_slot(slot), Some("X"));
        assert!(host.has_attached());

        assert_eq!(host.attach("Y"), Err(PresenterError::ContentAlreadyAttached));
        assert_eq!(host.renderer().content(slot), None);
        assert_eq!(host.renderer().materialized_count(), 1);
    }

    #[test]
    fn test_role_applied_on_attach() {
        let config = PanelConfig::new().with_politeness(Politeness::Polite);
        let mut host = host(&config);
        assert_eq!(host.renderer().role(), None);

        host.attach("content").unwrap();
        assert_eq!(host.renderer().role(), Some(SurfaceRole::Status));
    }

    #[test]
    fn test_template_not_implemented() {
        let mut host = host(&PanelConfig::default());

        let err = host.attach_template("row template").unwrap_err();
        assert!(matches!(err, PresenterError::NotImplemented(_)));
        assert!(!host.has_attached());

        // Still unsupported once content is attached
        host.attach("content").unwrap();
        let err = host.attach_portal(Portal::Template(())).unwrap_err();
        assert!(matches!(err, PresenterError::NotImplemented(_)));
    }

    #[test]
    fn test_attach_portal_component() {
        let mut host = host(&PanelConfig::default());
        let handle = host.attach_portal::<()>(Portal::Component("content")).unwrap();
        assert_eq!(handle.sequence, 1);
    }
}
