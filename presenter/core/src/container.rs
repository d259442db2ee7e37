//! Panel Container
//!
//! One presentation instance: a [`ContentHost`] and a
//! [`PresentationStateMachine`] created together and torn down together.
//! This is the surface an orchestrating caller drives:
//!
//! ```text
//! attach(content) ─▶ enter() ─▶ on_entered() fires
//!                        │
//!                     exit() ─▶ on_exited() fires
//!                        │
//!                    destroy() ─▶ on_exited() fires if it has not yet
//! ```
//!
//! The caller must call [`PanelContainer::destroy`] once the panel is
//! permanently removed. Dropping an undestroyed container destroys it as a
//! backstop and logs a warning.
//!
//! # Example
//!
//! ```
//! use presenter_core::{
//!     ImmediateAnimationEngine, MemoryRenderer, PanelConfig, PanelContainer, PresenterError,
//! };
//!
//! let mut panel = PanelContainer::new(
//!     MemoryRenderer::new(),
//!     ImmediateAnimationEngine,
//!     &PanelConfig::default(),
//! );
//!
//! panel.attach("Message archived").unwrap();
//! assert_eq!(panel.attach("Undo"), Err(PresenterError::ContentAlreadyAttached));
//!
//! panel.enter();
//! panel.drain();
//! assert!(panel.on_entered().is_fired());
//!
//! let exited = panel.exit();
//! panel.destroy();
//! assert!(exited.is_fired());
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::animation::{AnimationEngine, AnimationReporter};
use crate::config::PanelConfig;
use crate::error::Result;
use crate::host::ContentHost;
use crate::machine::PresentationStateMachine;
use crate::render::{Portal, Renderer};
use crate::signal::Completion;
use crate::state::{PresentationState, TransitionEvent};

/// Unique identifier for a panel container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(u64);

impl PanelId {
    /// Allocate a new unique panel ID
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

impl Default for PanelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// A single transient panel
pub struct PanelContainer<R: Renderer, E: AnimationEngine> {
    id: PanelId,
    host: ContentHost<R>,
    machine: PresentationStateMachine<E>,
}

impl<R: Renderer, E: AnimationEngine> PanelContainer<R, E> {
    /// Create a container with surface options and timings from `config`
    pub fn new(renderer: R, engine: E, config: &PanelConfig) -> Self {
        let id = PanelId::new();
        tracing::debug!(
            panel = %id,
            tags = ?config.surface_tags(),
            enter_ms = config.enter.duration_ms,
            exit_ms = config.exit.duration_ms,
            "Panel container created"
        );
        Self {
            id,
            host: ContentHost::new(renderer, config),
            machine: PresentationStateMachine::new(
                engine,
                config.enter.clone(),
                config.exit.clone(),
            ),
        }
    }

    /// Container identifier
    #[must_use]
    pub fn id(&self) -> PanelId {
        self.id
    }

    /// Current presentation state
    #[must_use]
    pub fn state(&self) -> PresentationState {
        self.machine.state()
    }

    /// The content host
    #[must_use]
    pub fn host(&self) -> &ContentHost<R> {
        &self.host
    }

    /// The state machine
    #[must_use]
    pub fn machine(&self) -> &PresentationStateMachine<E> {
        &self.machine
    }

    /// The renderer
    #[must_use]
    pub fn renderer(&self) -> &R {
        self.host.renderer()
    }

    /// Reporter for engines that report from outside the container
    #[must_use]
    pub fn reporter(&self) -> AnimationReporter {
        self.machine.reporter()
    }

    /// Whether content is attached
    #[must_use]
    pub fn has_attached(&self) -> bool {
        self.host.has_attached()
    }

    /// Attach the panel's content
    ///
    /// # Errors
    ///
    /// Returns [`PresenterError::ContentAlreadyAttached`] on every call
    /// after the first successful one.
    ///
    /// [`PresenterError::ContentAlreadyAttached`]: crate::PresenterError::ContentAlreadyAttached
    pub fn attach(&mut self, content: R::Content) -> Result<R::Handle> {
        self.host.attach(content)
    }

    /// Template content is not supported
    ///
    /// # Errors
    ///
    /// Always returns [`PresenterError::NotImplemented`].
    ///
    /// [`PresenterError::NotImplemented`]: crate::PresenterError::NotImplemented
    pub fn attach_template<T>(&mut self, template: T) -> Result<R::Handle> {
        self.host.attach_template(template)
    }

    /// Attach either kind of portal
    ///
    /// # Errors
    ///
    /// See [`attach`](Self::attach) and [`attach_template`](Self::attach_template).
    pub fn attach_portal<T>(&mut self, portal: Portal<R::Content, T>) -> Result<R::Handle> {
        self.host.attach_portal(portal)
    }

    /// Animate the panel into view
    pub fn enter(&mut self) {
        self.machine.enter();
    }

    /// Subscription to the `entered` signal
    #[must_use]
    pub fn on_entered(&self) -> Completion {
        self.machine.on_entered()
    }

    /// Animate the panel out of view, returning the `exited` subscription
    pub fn exit(&mut self) -> Completion {
        self.machine.exit()
    }

    /// Subscription to the `exited` signal
    #[must_use]
    pub fn on_exited(&self) -> Completion {
        self.machine.on_exited()
    }

    /// Animation-completion callback for engines that call back directly
    ///
    /// An entrance report before [`enter`](Self::enter) is ignored.
    pub fn handle_animation_done(&mut self, event: TransitionEvent) {
        self.machine.handle_animation_done(event);
    }

    /// Dispatch every queued animation report
    pub fn drain(&mut self) -> usize {
        self.machine.drain()
    }

    /// Dispatch animation reports until `completion` fires
    pub async fn run_until(&mut self, completion: &Completion) {
        self.machine.run_until(completion).await;
    }

    /// Dispatch animation reports until the panel has exited
    pub async fn settle(&mut self) {
        let exited = self.machine.on_exited();
        self.machine.run_until(&exited).await;
    }

    /// Whether [`destroy`](Self::destroy) has run
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.machine.is_destroyed()
    }

    /// Tear the panel down, finalizing `exited`
    ///
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        if !self.machine.is_destroyed() {
            tracing::debug!(panel = %self.id, state = %self.machine.state(), "Destroying panel");
        }
        self.machine.destroy();
    }
}

impl<R: Renderer, E: AnimationEngine> Drop for PanelContainer<R, E> {
    fn drop(&mut self) {
        if !self.machine.is_destroyed() {
            tracing::warn!(panel = %self.id, "Panel container dropped without destroy");
            self.machine.destroy();
        }
    }
}

impl<R: Renderer, E: AnimationEngine> fmt::Debug for PanelContainer<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelContainer")
            .field("id", &self.id)
            .field("slot", &self.host.slot())
            .field("machine", &self.machine)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ManualAnimationEngine;
    use crate::config::{HorizontalPosition, VerticalPosition};
    use crate::render::{MemoryRenderer, SurfaceRole};

    type TestPanel = PanelContainer<MemoryRenderer<&'static str>, ManualAnimationEngine>;

    fn panel(config: &PanelConfig) -> (TestPanel, ManualAnimationEngine) {
        let engine = ManualAnimationEngine::new();
        let control = engine.clone();
        (PanelContainer::new(MemoryRenderer::new(), engine, config), control)
    }

    #[test]
    fn test_ids_are_unique() {
        let (a, _) = panel(&PanelConfig::default());
        let (b, _) = panel(&PanelConfig::default());
        assert_ne!(a.id(), b.id());
        assert!(a.id().to_string().starts_with("panel-"));
    }

    #[test]
    fn test_config_flows_to_host_and_machine() {
        let config = PanelConfig::new()
            .with_tag("panel-error")
            .with_position(HorizontalPosition::Left, VerticalPosition::Top);
        let (mut panel, control) = panel(&config);

        panel.attach("Disk full").unwrap();
        assert_eq!(panel.renderer().tags(), ["panel-error", "panel-top"]);
        assert_eq!(panel.renderer().role(), Some(SurfaceRole::Alert));

        panel.enter();
        assert_eq!(control.requests()[0].timing, config.enter);
    }

    #[test]
    fn test_full_lifecycle() {
        let (mut panel, control) = panel(&PanelConfig::default());
        panel.attach("Saved").unwrap();

        panel.enter();
        control.finish_next();
        panel.drain();
        assert!(panel.on_entered().is_fired());
        assert_eq!(panel.state(), PresentationState::Visible);

        let exited = panel.exit();
        assert_eq!(panel.state(), PresentationState::Complete);
        control.finish_next();
        panel.drain();
        assert!(exited.is_fired());

        panel.destroy();
        assert_eq!(panel.state(), PresentationState::Void);
    }

    #[test]
    fn test_direct_callback() {
        let (mut panel, _control) = panel(&PanelConfig::default());
        panel.enter();
        panel.handle_animation_done(TransitionEvent::finished(
            PresentationState::Initial,
            PresentationState::Visible,
        ));
        assert!(panel.on_entered().is_fired());
    }

    #[test]
    fn test_drop_without_destroy_fires_exited() {
        let (panel, _control) = panel(&PanelConfig::default());
        let exited = panel.on_exited();
        drop(panel);
        assert!(exited.is_fired());
    }

    #[test]
    fn test_external_reporter_feeds_queue() {
        let (mut panel, _control) = panel(&PanelConfig::default());
        panel.enter();

        panel.reporter().report(TransitionEvent::finished(
            PresentationState::Initial,
            PresentationState::Visible,
        ));
        assert!(!panel.on_entered().is_fired());
        assert_eq!(panel.drain(), 1);
        assert!(panel.on_entered().is_fired());
    }
}
