use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub animations: AnimationsConfig,
    #[serde(default)]
    pub interactions: InteractionConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            scroll: ScrollConfig::default(),
            navigation: NavigationConfig::default(),
            animations: AnimationsConfig::default(),
            interactions: InteractionConfig::default(),
            performance: PerformanceConfig::default(),
            accessibility: AccessibilityConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Body class applied when the host prefers a dark color scheme
    #[serde(default = "default_dark_theme_class")]
    pub dark_theme_class: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dark_theme_class: default_dark_theme_class(),
        }
    }
}

/// Easing curve for smooth scroll animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Jump at the end of the animation
    None,
    Linear,
    /// Cubic ease-out
    Cubic,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
    /// Symmetric quadratic acceleration then deceleration
    #[default]
    EaseInOutQuad,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate internal-link scrolling; when false the page jumps
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Smooth scroll duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve for smooth scrolling
    #[serde(default)]
    pub easing: EasingType,
    /// Sticky header height subtracted from scroll targets and added to the
    /// offset when resolving the active section
    #[serde(default = "default_scroll_offset")]
    pub offset_px: f64,
    /// Class marking the active navigation link
    #[serde(default = "default_nav_active_class")]
    pub nav_active_class: String,
    /// Throttle window for active-section updates
    #[serde(default = "default_nav_throttle")]
    pub nav_throttle_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            offset_px: default_scroll_offset(),
            nav_active_class: default_nav_active_class(),
            nav_throttle_ms: default_nav_throttle(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Viewport widths at or below this get the mobile class
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint_px: f64,
    /// Class applied to the nav on narrow viewports
    #[serde(default = "default_mobile_class")]
    pub mobile_class: String,
    /// Quiet period before re-evaluating the layout after a resize
    #[serde(default = "default_resize_debounce")]
    pub resize_debounce_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: default_mobile_breakpoint(),
            mobile_class: default_mobile_class(),
            resize_debounce_ms: default_resize_debounce(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationsConfig {
    #[serde(default = "RevealConfig::fade_in", deserialize_with = "fade_in_overrides")]
    pub fade_in: RevealConfig,
    #[serde(default = "RevealConfig::cards", deserialize_with = "cards_overrides")]
    pub cards: RevealConfig,
}

impl Default for AnimationsConfig {
    fn default() -> Self {
        Self {
            fade_in: RevealConfig::fade_in(),
            cards: RevealConfig::cards(),
        }
    }
}

/// Timing and styling of one reveal-on-scroll animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Class added when the element is marked animated
    pub marker_class: String,
    /// Vertical offset of the hidden state in pixels
    pub offset_px: f64,
    /// Delay between the hidden and the visible state
    pub delay_ms: u64,
    /// CSS transition duration of the visible state
    pub transition_ms: u64,
    /// Throttle window for viewport checks
    pub throttle_ms: u64,
}

impl RevealConfig {
    pub fn fade_in() -> Self {
        Self {
            marker_class: "animated".to_string(),
            offset_px: 20.0,
            delay_ms: 100,
            transition_ms: 600,
            throttle_ms: 100,
        }
    }

    pub fn cards() -> Self {
        Self {
            marker_class: "scroll-animated".to_string(),
            offset_px: 30.0,
            delay_ms: 200,
            transition_ms: 800,
            throttle_ms: 150,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::fade_in()
    }
}

/// A partial `[animations.*]` table. The two reveal profiles have different
/// defaults, so missing fields are filled from the profile being overridden.
#[derive(Debug, Deserialize)]
struct RevealOverrides {
    marker_class: Option<String>,
    offset_px: Option<f64>,
    delay_ms: Option<u64>,
    transition_ms: Option<u64>,
    throttle_ms: Option<u64>,
}

impl RevealOverrides {
    fn apply(self, base: RevealConfig) -> RevealConfig {
        RevealConfig {
            marker_class: self.marker_class.unwrap_or(base.marker_class),
            offset_px: self.offset_px.unwrap_or(base.offset_px),
            delay_ms: self.delay_ms.unwrap_or(base.delay_ms),
            transition_ms: self.transition_ms.unwrap_or(base.transition_ms),
            throttle_ms: self.throttle_ms.unwrap_or(base.throttle_ms),
        }
    }
}

fn fade_in_overrides<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RevealConfig, D::Error> {
    RevealOverrides::deserialize(deserializer).map(|o| o.apply(RevealConfig::fade_in()))
}

fn cards_overrides<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RevealConfig, D::Error> {
    RevealOverrides::deserialize(deserializer).map(|o| o.apply(RevealConfig::cards()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// How far hovered buttons and cards rise, in pixels
    #[serde(default = "default_lift")]
    pub lift_px: f64,
    /// Shadow while hovered
    #[serde(default = "default_hover_shadow")]
    pub hover_shadow: String,
    /// Resting shadow restored on cards after hover
    #[serde(default = "default_card_rest_shadow")]
    pub card_rest_shadow: String,
    /// Time a pressed button stays down
    #[serde(default = "default_press_release")]
    pub press_release_ms: u64,
    /// Border color of blank required fields
    #[serde(default = "default_error_border_color")]
    pub error_border_color: String,
    /// How long the error border stays
    #[serde(default = "default_error_clear")]
    pub error_clear_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            lift_px: default_lift(),
            hover_shadow: default_hover_shadow(),
            card_rest_shadow: default_card_rest_shadow(),
            press_release_ms: default_press_release(),
            error_border_color: default_error_border_color(),
            error_clear_ms: default_error_clear(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Resources announced with preload hints at startup
    #[serde(default = "default_preload_resources")]
    pub preload_resources: Vec<String>,
    /// Placeholder class removed once a lazy image is loaded
    #[serde(default = "default_lazy_class")]
    pub lazy_class: String,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            preload_resources: default_preload_resources(),
            lazy_class: default_lazy_class(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibilityConfig {
    /// Outline color of focused elements
    #[serde(default = "default_focus_outline_color")]
    pub focus_outline_color: String,
    /// aria-label given to buttons without text
    #[serde(default = "default_aria_fallback_label")]
    pub aria_fallback_label: String,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            focus_outline_color: default_focus_outline_color(),
            aria_fallback_label: default_aria_fallback_label(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_dark_theme_class() -> String {
    "dark-theme".to_string()
}

fn default_true() -> bool {
    true
}

fn default_animation_duration() -> u64 {
    300
}

fn default_scroll_offset() -> f64 {
    80.0 // sticky header height
}

fn default_nav_active_class() -> String {
    "active".to_string()
}

fn default_nav_throttle() -> u64 {
    100
}

fn default_mobile_breakpoint() -> f64 {
    768.0
}

fn default_mobile_class() -> String {
    "mobile".to_string()
}

fn default_resize_debounce() -> u64 {
    250
}

fn default_lift() -> f64 {
    2.0
}

fn default_hover_shadow() -> String {
    "0 4px 8px rgba(0,0,0,0.15)".to_string()
}

fn default_card_rest_shadow() -> String {
    "0 2px 4px rgba(0,0,0,0.1)".to_string()
}

fn default_press_release() -> u64 {
    100
}

fn default_error_border_color() -> String {
    "#f44336".to_string()
}

fn default_error_clear() -> u64 {
    3000
}

fn default_preload_resources() -> Vec<String> {
    vec!["css/style.css".to_string(), "js/main.js".to_string()]
}

fn default_lazy_class() -> String {
    "lazy".to_string()
}

fn default_focus_outline_color() -> String {
    "#1976D2".to_string()
}

fn default_aria_fallback_label() -> String {
    "Botón de acción".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl EnhanceConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(expand_tilde(path))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> crate::Result<PathBuf> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml_string()?)?;

        Ok(config_path)
    }

    pub fn to_toml_string(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the configuration file path
    /// Always uses ~/.config/pageflow/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pageflow")
            .join("config.toml")
    }

    /// Reject values the coordinator cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if !self.scroll.offset_px.is_finite() || self.scroll.offset_px < 0.0 {
            return Err(crate::Error::Config(format!(
                "scroll.offset_px must be a non-negative number, got {}",
                self.scroll.offset_px
            )));
        }
        if self.scroll.nav_active_class.trim().is_empty() {
            return Err(crate::Error::Config(
                "scroll.nav_active_class must not be empty".to_string(),
            ));
        }
        if self.navigation.mobile_breakpoint_px < 0.0 {
            return Err(crate::Error::Config(
                "navigation.mobile_breakpoint_px must not be negative".to_string(),
            ));
        }
        for (name, reveal) in [
            ("fade_in", &self.animations.fade_in),
            ("cards", &self.animations.cards),
        ] {
            if reveal.marker_class.trim().is_empty() {
                return Err(crate::Error::Config(format!(
                    "animations.{name}.marker_class must not be empty"
                )));
            }
        }
        if let Some(blank) = self
            .performance
            .preload_resources
            .iter()
            .find(|r| r.trim().is_empty())
        {
            return Err(crate::Error::Config(format!(
                "performance.preload_resources contains a blank entry: {blank:?}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_script() {
        let config = EnhanceConfig::default();
        assert_eq!(config.scroll.animation_duration_ms, 300);
        assert_eq!(config.scroll.offset_px, 80.0);
        assert_eq!(config.scroll.easing, EasingType::EaseInOutQuad);
        assert_eq!(config.animations.fade_in.delay_ms, 100);
        assert_eq!(config.animations.fade_in.transition_ms, 600);
        assert_eq!(config.animations.cards.delay_ms, 200);
        assert_eq!(config.animations.cards.transition_ms, 800);
        assert_eq!(config.navigation.resize_debounce_ms, 250);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EnhanceConfig::from_toml_str(
            r#"
            [scroll]
            offset_px = 64.0
            easing = "cubic"

            [animations.cards]
            marker_class = "seen"
            offset_px = 10.0
            delay_ms = 50
            transition_ms = 400
            throttle_ms = 75
            "#,
        )
        .unwrap();

        assert_eq!(config.scroll.offset_px, 64.0);
        assert_eq!(config.scroll.easing, EasingType::Cubic);
        assert_eq!(config.scroll.animation_duration_ms, 300);
        assert_eq!(config.animations.cards.marker_class, "seen");
        assert_eq!(config.animations.fade_in, RevealConfig::fade_in());
    }

    #[test]
    fn test_one_field_reveal_table_keeps_profile_defaults() {
        let config = EnhanceConfig::from_toml_str("[animations.cards]\ndelay_ms = 50\n").unwrap();
        assert_eq!(
            config.animations.cards,
            RevealConfig {
                delay_ms: 50,
                ..RevealConfig::cards()
            }
        );
        assert_eq!(config.animations.fade_in, RevealConfig::fade_in());

        let config = EnhanceConfig::from_toml_str("[animations.fade_in]\nmarker_class = \"shown\"\n").unwrap();
        assert_eq!(config.animations.fade_in.marker_class, "shown");
        assert_eq!(config.animations.fade_in.delay_ms, 100);
    }

    #[test]
    fn test_validate_rejects_negative_offset() {
        let err = EnhanceConfig::from_toml_str("[scroll]\noffset_px = -5.0\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_validate_rejects_blank_resource() {
        let mut config = EnhanceConfig::default();
        config.performance.preload_resources.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip_is_loadable() {
        let text = EnhanceConfig::default().to_toml_string().unwrap();
        let parsed = EnhanceConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.accessibility.aria_fallback_label, "Botón de acción");
    }
}
