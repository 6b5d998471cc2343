use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Reveal-on-scroll settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Classes marking elements that animate in when scrolled near
    #[serde(default = "default_marker_classes")]
    pub marker_classes: Vec<String>,
    /// Class added once an element is revealed
    #[serde(default = "default_visible_class")]
    pub visible_class: String,
    /// How far (px) an element must be above the viewport bottom before it reveals
    #[serde(default = "default_lookahead_px")]
    pub lookahead_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            marker_classes: default_marker_classes(),
            visible_class: default_visible_class(),
            lookahead_px: default_lookahead_px(),
        }
    }
}

/// Smooth-scroll navigation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Selector for the anchors whose clicks are intercepted
    #[serde(default = "default_link_selector")]
    pub link_selector: String,
    /// Space (px) left above the target for a fixed header
    #[serde(default = "default_header_offset_px")]
    pub header_offset_px: f64,
    /// Let links into other documents navigate normally
    #[serde(default = "default_true")]
    pub same_page_only: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            link_selector: default_link_selector(),
            header_offset_px: default_header_offset_px(),
            same_page_only: default_true(),
        }
    }
}

/// Easing curve for scroll animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Jump at the end
    None,
    Linear,
    /// Half cosine, slow at both ends
    #[default]
    Swing,
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate navigation scrolls instead of jumping
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation length in milliseconds
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate hosts should tick the animation at
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration_ms(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Terminal preview settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Page pixels represented by one terminal row
    #[serde(default = "default_px_per_row")]
    pub px_per_row: f64,
    /// Input poll interval when idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            px_per_row: default_px_per_row(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_marker_classes() -> Vec<String> {
    vec!["animate-up".to_string(), "animate-fade".to_string()]
}

fn default_visible_class() -> String {
    "visible".to_string()
}

fn default_lookahead_px() -> f64 {
    100.0
}

fn default_link_selector() -> String {
    ".navbar-nav a".to_string()
}

fn default_header_offset_px() -> f64 {
    70.0 // fixed navbar height
}

fn default_animation_duration_ms() -> u64 {
    600
}

/// One frame per millisecond at most
pub const MAX_ANIMATION_FPS: u32 = 1000;

fn default_animation_fps() -> u32 {
    60
}

fn default_px_per_row() -> f64 {
    20.0
}

fn default_tick_rate() -> u64 {
    100
}

impl AppConfig {
    /// Parse a TOML document, filling missing fields with defaults
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the handlers cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.reveal.visible_class.trim().is_empty() {
            return Err(crate::Error::Config("reveal.visible_class is empty".into()));
        }
        if self.reveal.marker_classes.iter().all(|c| c.trim().is_empty()) {
            return Err(crate::Error::Config(
                "reveal.marker_classes must name at least one class".into(),
            ));
        }
        if !(self.reveal.lookahead_px >= 0.0) {
            return Err(crate::Error::Config(format!(
                "reveal.lookahead_px must be >= 0, got {}",
                self.reveal.lookahead_px
            )));
        }
        if !(self.nav.header_offset_px >= 0.0) {
            return Err(crate::Error::Config(format!(
                "nav.header_offset_px must be >= 0, got {}",
                self.nav.header_offset_px
            )));
        }
        if !(self.preview.px_per_row > 0.0) {
            return Err(crate::Error::Config(format!(
                "preview.px_per_row must be > 0, got {}",
                self.preview.px_per_row
            )));
        }
        if !(1..=MAX_ANIMATION_FPS).contains(&self.scroll.animation_fps) {
            return Err(crate::Error::Config(format!(
                "scroll.animation_fps must be between 1 and {}, got {}",
                MAX_ANIMATION_FPS, self.scroll.animation_fps
            )));
        }
        if self.preview.tick_rate_ms == 0 {
            return Err(crate::Error::Config("preview.tick_rate_ms must be > 0".into()));
        }
        Ok(())
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AppConfig {
    /// Load configuration from a specific path, defaults if it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a specific path, creating parent directories
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/yeki/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("yeki")
            .join("config.toml")
    }

    /// Directory for preview logs
    pub fn data_dir(&self) -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("yeki")
    }
}
