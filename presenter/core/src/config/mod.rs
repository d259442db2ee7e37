//! TOML Configuration File Support
//!
//! Panel presentation options, loaded from a TOML file at
//! `~/.config/presenter/panel.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. Programmatic overrides ([`ConfigOverrides`])
//! 2. Environment variables (`PRESENTER_*`)
//! 3. TOML configuration file
//! 4. Default values
//!
//! # XDG Base Directory Compliance
//!
//! The configuration file follows XDG Base Directory specification:
//! - `$XDG_CONFIG_HOME/presenter/panel.toml` (typically `~/.config/presenter/panel.toml`)
//!
//! # Example Configuration
//!
//! ```toml
//! [surface]
//! extra_tags = ["panel-warning"]
//! politeness = "assertive"
//! horizontal_position = "center"
//! vertical_position = "bottom"
//!
//! [animation]
//! enter_duration_ms = 225
//! enter_easing = "cubic-bezier(0.4, 0.0, 1, 1)"
//! exit_duration_ms = 195
//! exit_easing = "cubic-bezier(0.0, 0.0, 0.2, 1)"
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::TransitionTiming;
use crate::render::SurfaceRole;

/// Tag added when the panel is horizontally centered
pub const CENTER_TAG: &str = "panel-center";

/// Tag added when the panel sits at the top of the viewport
pub const TOP_TAG: &str = "panel-top";

/// Longest transition accepted from configuration
pub const MAX_TRANSITION_MS: u64 = 10_000;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value set programmatically by the embedding application
    Override,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// Option Enums
// =============================================================================

/// How urgently assistive technology should announce the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Politeness {
    /// Not announced
    Off,
    /// Announced when the user is idle
    Polite,
    /// Announced immediately
    #[default]
    Assertive,
}

impl FromStr for Politeness {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "polite" => Ok(Self::Polite),
            "assertive" => Ok(Self::Assertive),
            other => Err(ConfigError::ValidationError(format!(
                "unknown politeness '{other}' (expected off, polite or assertive)"
            ))),
        }
    }
}

/// Horizontal placement of the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalPosition {
    /// Leading edge for the reading direction
    Start,
    /// Centered
    #[default]
    Center,
    /// Trailing edge for the reading direction
    End,
    /// Always left
    Left,
    /// Always right
    Right,
}

impl FromStr for HorizontalPosition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ConfigError::ValidationError(format!(
                "unknown horizontal position '{other}'"
            ))),
        }
    }
}

/// Vertical placement of the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalPosition {
    /// Top of the viewport
    Top,
    /// Bottom of the viewport
    #[default]
    Bottom,
}

impl FromStr for VerticalPosition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(ConfigError::ValidationError(format!(
                "unknown vertical position '{other}'"
            ))),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Surface section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceToml {
    /// Extra tags applied to the host surface
    pub extra_tags: Option<Vec<String>>,

    /// Announcement urgency
    pub politeness: Option<Politeness>,

    /// Message announced in place of the panel content
    pub announcement_message: Option<String>,

    /// Horizontal placement
    pub horizontal_position: Option<HorizontalPosition>,

    /// Vertical placement
    pub vertical_position: Option<VerticalPosition>,
}

/// Animation section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationToml {
    /// Entrance duration in milliseconds
    pub enter_duration_ms: Option<u64>,

    /// Entrance easing curve
    pub enter_easing: Option<String>,

    /// Exit duration in milliseconds
    pub exit_duration_ms: Option<u64>,

    /// Exit easing curve
    pub exit_easing: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelToml {
    /// Surface configuration section
    pub surface: SurfaceToml,

    /// Animation configuration section
    pub animation: AnimationToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Presentation options for one panel container
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelConfig {
    /// Extra tags applied to the host surface at attach time
    pub extra_tags: Vec<String>,

    /// Announcement urgency
    pub politeness: Politeness,

    /// Message announced in place of the panel content
    pub announcement_message: Option<String>,

    /// Horizontal placement
    pub horizontal_position: HorizontalPosition,

    /// Vertical placement
    pub vertical_position: VerticalPosition,

    /// Entrance transition timing
    pub enter: TransitionTiming,

    /// Exit transition timing
    pub exit: TransitionTiming,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            extra_tags: Vec::new(),
            politeness: Politeness::default(),
            announcement_message: None,
            horizontal_position: HorizontalPosition::default(),
            vertical_position: VerticalPosition::default(),
            enter: TransitionTiming::default_enter(),
            exit: TransitionTiming::default_exit(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl PanelConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extra surface tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.extra_tags.push(tag.into());
        self
    }

    /// Set announcement urgency
    #[must_use]
    pub fn with_politeness(mut self, politeness: Politeness) -> Self {
        self.politeness = politeness;
        self
    }

    /// Set placement
    #[must_use]
    pub fn with_position(
        mut self,
        horizontal: HorizontalPosition,
        vertical: VerticalPosition,
    ) -> Self {
        self.horizontal_position = horizontal;
        self.vertical_position = vertical;
        self
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Every tag the host applies to its surface, in application order
    ///
    /// Configured extra tags first, then the placement tags.
    #[must_use]
    pub fn surface_tags(&self) -> Vec<String> {
        let mut tags = self.extra_tags.clone();
        if self.horizontal_position == HorizontalPosition::Center {
            tags.push(CENTER_TAG.to_string());
        }
        if self.vertical_position == VerticalPosition::Top {
            tags.push(TOP_TAG.to_string());
        }
        tags
    }

    /// Accessibility role for the host surface
    ///
    /// An assertive panel without a separate announcement is an alert. A
    /// panel with politeness off gets no role.
    #[must_use]
    pub fn surface_role(&self) -> Option<SurfaceRole> {
        match self.politeness {
            Politeness::Off => None,
            Politeness::Assertive if self.announcement_message.is_none() => {
                Some(SurfaceRole::Alert)
            }
            _ => Some(SurfaceRole::Status),
        }
    }

    /// Check values that the type system cannot
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for empty or whitespace
    /// containing tags and for transition durations above
    /// [`MAX_TRANSITION_MS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tag in &self.extra_tags {
            if tag.is_empty() || tag.chars().any(char::is_whitespace) {
                return Err(ConfigError::ValidationError(format!(
                    "surface tag '{tag}' must be non-empty and contain no whitespace"
                )));
            }
        }
        for (direction, timing) in [("enter", &self.enter), ("exit", &self.exit)] {
            if timing.duration_ms > MAX_TRANSITION_MS {
                return Err(ConfigError::ValidationError(format!(
                    "{direction} duration {}ms exceeds {MAX_TRANSITION_MS}ms",
                    timing.duration_ms
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/presenter/panel.toml` or
/// `~/.config/presenter/panel.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("presenter").join("panel.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if a
/// loaded value fails validation. A missing config file is not an error.
pub fn load_config() -> Result<PanelConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path plus the process environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if a loaded value fails validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<PanelConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Load configuration with a custom environment lookup
///
/// `env` maps a variable name to its value. Embedders that keep settings
/// elsewhere can route them through here.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if a loaded value fails validation.
pub fn load_config_with<F>(path: Option<PathBuf>, env: F) -> Result<PanelConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = PanelConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: PanelToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded panel configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env)?;
    config.validate()?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut PanelConfig, toml: &PanelToml) {
    if let Some(ref tags) = toml.surface.extra_tags {
        config.extra_tags.clone_from(tags);
    }
    if let Some(politeness) = toml.surface.politeness {
        config.politeness = politeness;
    }
    if toml.surface.announcement_message.is_some() {
        config
            .announcement_message
            .clone_from(&toml.surface.announcement_message);
    }
    if let Some(position) = toml.surface.horizontal_position {
        config.horizontal_position = position;
    }
    if let Some(position) = toml.surface.vertical_position {
        config.vertical_position = position;
    }

    if let Some(ms) = toml.animation.enter_duration_ms {
        config.enter.duration_ms = ms;
    }
    if let Some(ref easing) = toml.animation.enter_easing {
        config.enter.easing.clone_from(easing);
    }
    if let Some(ms) = toml.animation.exit_duration_ms {
        config.exit.duration_ms = ms;
    }
    if let Some(ref easing) = toml.animation.exit_easing {
        config.exit.easing.clone_from(easing);
    }
}

/// Apply environment variable overrides to the config
///
/// Malformed numbers are ignored; unknown enum values are rejected.
fn apply_env_config<F>(config: &mut PanelConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(tags) = env("PRESENTER_EXTRA_TAGS") {
        config.extra_tags = tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        config.source = ConfigSource::Env;
    }
    if let Some(value) = env("PRESENTER_POLITENESS") {
        config.politeness = value.parse()?;
        config.source = ConfigSource::Env;
    }
    if let Some(message) = env("PRESENTER_ANNOUNCEMENT") {
        config.announcement_message = Some(message);
        config.source = ConfigSource::Env;
    }
    if let Some(value) = env("PRESENTER_HORIZONTAL_POSITION") {
        config.horizontal_position = value.parse()?;
        config.source = ConfigSource::Env;
    }
    if let Some(value) = env("PRESENTER_VERTICAL_POSITION") {
        config.vertical_position = value.parse()?;
        config.source = ConfigSource::Env;
    }
    if let Some(value) = env("PRESENTER_ENTER_DURATION_MS") {
        if let Ok(ms) = value.parse::<u64>() {
            config.enter.duration_ms = ms;
            config.source = ConfigSource::Env;
        }
    }
    if let Some(value) = env("PRESENTER_EXIT_DURATION_MS") {
        if let Ok(ms) = value.parse::<u64>() {
            config.exit.duration_ms = ms;
            config.source = ConfigSource::Env;
        }
    }
    if let Some(easing) = env("PRESENTER_ENTER_EASING") {
        config.enter.easing = easing;
        config.source = ConfigSource::Env;
    }
    if let Some(easing) = env("PRESENTER_EXIT_EASING") {
        config.exit.easing = easing;
        config.source = ConfigSource::Env;
    }
    Ok(())
}

// =============================================================================
// Override Support
// =============================================================================

/// Overrides applied by the embedding application
///
/// Use this after [`load_config`] to apply values that must win over the
/// file and the environment.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Extra tags override (replaces the loaded list)
    pub extra_tags: Option<Vec<String>>,

    /// Politeness override
    pub politeness: Option<Politeness>,

    /// Announcement message override
    pub announcement_message: Option<String>,

    /// Horizontal position override
    pub horizontal_position: Option<HorizontalPosition>,

    /// Vertical position override
    pub vertical_position: Option<VerticalPosition>,

    /// Entrance duration override (milliseconds)
    pub enter_duration_ms: Option<u64>,

    /// Exit duration override (milliseconds)
    pub exit_duration_ms: Option<u64>,

    /// Entrance easing override
    pub enter_easing: Option<String>,

    /// Exit easing override
    pub exit_easing: Option<String>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extra tags override
    #[must_use]
    pub fn with_extra_tags(mut self, tags: Vec<String>) -> Self {
        self.extra_tags = Some(tags);
        self
    }

    /// Set politeness override
    #[must_use]
    pub fn with_politeness(mut self, politeness: Politeness) -> Self {
        self.politeness = Some(politeness);
        self
    }

    /// Set announcement message override
    #[must_use]
    pub fn with_announcement_message(mut self, message: impl Into<String>) -> Self {
        self.announcement_message = Some(message.into());
        self
    }

    /// Set horizontal position override
    #[must_use]
    pub fn with_horizontal_position(mut self, position: HorizontalPosition) -> Self {
        self.horizontal_position = Some(position);
        self
    }

    /// Set vertical position override
    #[must_use]
    pub fn with_vertical_position(mut self, position: VerticalPosition) -> Self {
        self.vertical_position = Some(position);
        self
    }

    /// Set entrance duration override
    #[must_use]
    pub fn with_enter_duration_ms(mut self, ms: u64) -> Self {
        self.enter_duration_ms = Some(ms);
        self
    }

    /// Set exit duration override
    #[must_use]
    pub fn with_exit_duration_ms(mut self, ms: u64) -> Self {
        self.exit_duration_ms = Some(ms);
        self
    }

    /// Set entrance easing override
    #[must_use]
    pub fn with_enter_easing(mut self, easing: impl Into<String>) -> Self {
        self.enter_easing = Some(easing.into());
        self
    }

    /// Set exit easing override
    #[must_use]
    pub fn with_exit_easing(mut self, easing: impl Into<String>) -> Self {
        self.exit_easing = Some(easing.into());
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extra_tags.is_none()
            && self.politeness.is_none()
            && self.announcement_message.is_none()
            && self.horizontal_position.is_none()
            && self.vertical_position.is_none()
            && self.enter_duration_ms.is_none()
            && self.exit_duration_ms.is_none()
            && self.enter_easing.is_none()
            && self.exit_easing.is_none()
    }

    /// Apply overrides to a configuration
    ///
    /// The result is validated like every other layer. On error `config` is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the overridden
    /// configuration fails [`PanelConfig::validate`].
    pub fn apply(&self, config: &mut PanelConfig) -> Result<(), ConfigError> {
        if self.is_empty() {
            return Ok(());
        }

        let mut candidate = config.clone();
        candidate.source = ConfigSource::Override;

        if let Some(ref tags) = self.extra_tags {
            candidate.extra_tags.clone_from(tags);
        }
        if let Some(politeness) = self.politeness {
            candidate.politeness = politeness;
        }
        if self.announcement_message.is_some() {
            candidate
                .announcement_message
                .clone_from(&self.announcement_message);
        }
        if let Some(position) = self.horizontal_position {
            candidate.horizontal_position = position;
        }
        if let Some(position) = self.vertical_position {
            candidate.vertical_position = position;
        }
        if let Some(ms) = self.enter_duration_ms {
            candidate.enter.duration_ms = ms;
        }
        if let Some(ms) = self.exit_duration_ms {
            candidate.exit.duration_ms = ms;
        }
        if let Some(ref easing) = self.enter_easing {
            candidate.enter.easing.clone_from(easing);
        }
        if let Some(ref easing) = self.exit_easing {
            candidate.exit.easing.clone_from(easing);
        }

        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
