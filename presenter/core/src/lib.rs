//! Presenter Core - Lifecycle for Transient Panels
//!
//! This crate hosts exactly one piece of externally supplied content (a
//! "panel") for a bounded lifetime, animates it into and out of view, and
//! tells observers when each animation phase has completed. It does not
//! draw and it does not interpolate: rendering and animation are supplied
//! through the [`Renderer`] and [`AnimationEngine`] traits.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        Orchestrating caller                      │
//! │        attach · enter · on_entered · exit · on_exited · destroy  │
//! └───────────────────────────────┬──────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────┼──────────────────────────────────┐
//! │                         PanelContainer                           │
//! │  ┌───────────────────────┐    │    ┌───────────────────────────┐ │
//! │  │      ContentHost      │    │    │ PresentationStateMachine  │ │
//! │  │  one slot, tags, role │◀───┴───▶│ Initial→Visible→Complete  │ │
//! │  └───────────┬───────────┘         │ entered / exited signals  │ │
//! │              │                     └─────────────┬─────────────┘ │
//! └──────────────┼───────────────────────────────────┼───────────────┘
//!                │                                   │
//!         ┌──────▼──────┐                    ┌───────▼────────┐
//!         │  Renderer   │                    │ AnimationEngine │
//!         └─────────────┘                    └────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`PanelContainer`]: One presentation instance, the caller-facing surface
//! - [`ContentHost`]: Single-slot host enforcing one attachment
//! - [`PresentationStateMachine`]: Lifecycle and completion signals
//! - [`CompletionSignal`] / [`Completion`]: Fire-once broadcast
//! - [`PanelConfig`]: Surface tags, accessibility role, transition timings
//!
//! # Module Overview
//!
//! - [`animation`]: Animation engine boundary and bundled engines
//! - [`config`]: TOML configuration loading
//! - [`container`]: The panel container
//! - [`error`]: Error types
//! - [`host`]: The content host
//! - [`machine`]: The presentation state machine
//! - [`render`]: Renderer boundary and the in-memory renderer
//! - [`signal`]: Fire-once completion signals
//! - [`state`]: Presentation states and transition events

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod config;
pub mod container;
pub mod error;
pub mod host;
pub mod machine;
pub mod render;
pub mod signal;
pub mod state;

// Re-exports for convenience
pub use animation::{
    AnimationEngine, AnimationReporter, ImmediateAnimationEngine, ManualAnimationEngine,
    TimedAnimationEngine, TransitionRequest, TransitionTiming,
};
pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with, ConfigError,
    ConfigOverrides, ConfigSource, HorizontalPosition, PanelConfig, PanelToml, Politeness,
    VerticalPosition,
};
pub use container::{PanelContainer, PanelId};
pub use error::{PresenterError, Result};
pub use host::ContentHost;
pub use machine::PresentationStateMachine;
pub use render::{MemoryHandle, MemoryRenderer, Portal, Renderer, SlotId, SurfaceRole};
pub use signal::{Completion, CompletionSignal};
pub use state::{PresentationState, TransitionEvent};
