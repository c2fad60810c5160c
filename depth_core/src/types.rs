// Data model shared by the engine, the loading policy and the controller.
// All derived records are plain values recomputed per update; nothing here is cached.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::geometry;

/// Depth-camera configuration. Immutable once a controller is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    /// Spacing between consecutive items on the depth axis.
    #[serde(default = "default_depth_gap")]
    pub depth_gap: f64,
    /// Half-width of the fully sharp band around the camera.
    #[serde(default = "default_focus_zone")]
    pub focus_zone: f64,
    /// Depth offset at which the falloff reaches its floor.
    #[serde(default = "default_max_visible")]
    pub max_visible: f64,
    /// Items further than this behind the camera are culled.
    #[serde(default = "default_cull_behind")]
    pub cull_behind: f64,
    /// Items further than this ahead of the camera are culled.
    #[serde(default = "default_cull_ahead")]
    pub cull_ahead: f64,
    /// Falloff multiplier for items the camera has already passed (1.0 = symmetric).
    #[serde(default = "default_behind_fade_factor")]
    pub behind_fade_factor: f64,
}

fn default_depth_gap() -> f64 {
    800.0
}

fn default_focus_zone() -> f64 {
    300.0
}

fn default_max_visible() -> f64 {
    1500.0
}

fn default_cull_behind() -> f64 {
    600.0
}

fn default_cull_ahead() -> f64 {
    2000.0
}

fn default_behind_fade_factor() -> f64 {
    2.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            depth_gap: default_depth_gap(),
            focus_zone: default_focus_zone(),
            max_visible: default_max_visible(),
            cull_behind: default_cull_behind(),
            cull_ahead: default_cull_ahead(),
            behind_fade_factor: default_behind_fade_factor(),
        }
    }
}

impl CameraConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: CameraConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine is not meant to run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        let fields = [
            ("depthGap", self.depth_gap),
            ("focusZone", self.focus_zone),
            ("maxVisible", self.max_visible),
            ("cullBehind", self.cull_behind),
            ("cullAhead", self.cull_ahead),
            ("behindFadeFactor", self.behind_fade_factor),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EngineError::InvalidConfig(format!("{name} must be finite")));
        }

        let positive = [
            ("depthGap", self.depth_gap),
            ("focusZone", self.focus_zone),
            ("cullBehind", self.cull_behind),
            ("cullAhead", self.cull_ahead),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "{name} must be > 0, got {value}"
            )));
        }

        if self.max_visible <= self.focus_zone {
            return Err(EngineError::InvalidConfig(format!(
                "maxVisible ({}) must exceed focusZone ({})",
                self.max_visible, self.focus_zone
            )));
        }

        if self.behind_fade_factor < 1.0 {
            return Err(EngineError::InvalidConfig(format!(
                "behindFadeFactor must be >= 1, got {}",
                self.behind_fade_factor
            )));
        }

        Ok(())
    }
}

/// One scroll-position reading from the host viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSample {
    pub scroll_offset: f64,
    pub scrollable_extent: f64,
    pub viewport_extent: f64,
}

impl ScrollSample {
    /// Build a sample, clamping negative or non-finite readings to zero.
    pub fn new(scroll_offset: f64, scrollable_extent: f64, viewport_extent: f64) -> Self {
        ScrollSample {
            scroll_offset: non_negative(scroll_offset),
            scrollable_extent: non_negative(scrollable_extent),
            viewport_extent: non_negative(viewport_extent),
        }
    }

    /// Re-apply the clamping of [`ScrollSample::new`] to a sample built from
    /// a struct literal or deserialized from the host.
    pub fn normalized(&self) -> Self {
        ScrollSample::new(self.scroll_offset, self.scrollable_extent, self.viewport_extent)
    }

    /// Scroll distance available beyond the viewport (may be <= 0).
    pub fn max_scroll(&self) -> f64 {
        self.scrollable_extent - self.viewport_extent
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Published camera position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    pub camera_z: f64,
    /// Scroll progress, 0-100.
    pub scroll_progress: f64,
}

impl CameraState {
    /// Starting state before the first sample: deep ahead of every item,
    /// matching where scroll offset 0 places the camera.
    ///
    /// The camera sits at least `cull_behind + focus_zone` past the last item,
    /// so nothing is visible until the first sample is published.
    pub fn sentinel(item_count: usize, config: &CameraConfig) -> Self {
        let last_depth = geometry::item_depth(item_count.saturating_sub(1), config);
        let clear_of_items = last_depth + config.cull_behind + config.focus_zone;
        CameraState {
            camera_z: (config.depth_gap * 10.0).max(clear_of_items),
            scroll_progress: 0.0,
        }
    }

    /// Recompute the camera from a single scroll sample.
    pub fn from_sample(sample: &ScrollSample, item_count: usize, config: &CameraConfig) -> Self {
        let sample = sample.normalized();
        CameraState {
            camera_z: geometry::scroll_to_camera_depth(
                sample.scroll_offset,
                sample.scrollable_extent,
                sample.viewport_extent,
                item_count,
                config,
            ),
            scroll_progress: geometry::scroll_progress(
                sample.scroll_offset,
                sample.scrollable_extent,
                sample.viewport_extent,
            ),
        }
    }
}

/// Per-item visual state derived from the camera position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualState {
    /// Signed offset from the camera (positive = ahead, negative = passed).
    pub relative_depth: f64,
    /// 0.4 to 1.0 when visible.
    pub scale: f64,
    /// 0.1 to 1.0 when visible.
    pub opacity: f64,
    /// Draw order, larger = nearer.
    pub stack_order: i32,
    pub is_visible: bool,
    pub is_focused: bool,
}

impl VisualState {
    /// Culled item: nothing to draw.
    pub fn hidden(relative_depth: f64) -> Self {
        VisualState {
            relative_depth,
            scale: 0.0,
            opacity: 0.0,
            stack_order: 0,
            is_visible: false,
            is_focused: false,
        }
    }
}

/// Image-fetch urgency hint for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingPriority {
    /// Fetch immediately.
    Eager,
    /// Fetch ahead of visibility with high priority.
    Preload,
    /// Fetch when needed.
    Lazy,
}

/// Everything the presentation layer needs for one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFrame {
    pub index: usize,
    pub depth: f64,
    pub visual: VisualState,
    pub loading: LoadingPriority,
}

/// Camera state plus the fan-out over every item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryFrame {
    pub camera: CameraState,
    pub items: Vec<ItemFrame>,
}

impl GalleryFrame {
    /// Items that should be rendered at all.
    pub fn visible(&self) -> impl Iterator<Item = &ItemFrame> {
        self.items.iter().filter(|item| item.visual.is_visible)
    }

    /// The focused item drawn on top, if any.
    pub fn focused_index(&self) -> Option<usize> {
        self.visible()
            .filter(|item| item.visual.is_focused)
            .max_by_key(|item| item.visual.stack_order)
            .map(|item| item.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(CameraConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = CameraConfig::from_json(r#"{"depthGap": 1000}"#).unwrap();
        assert_eq!(config.depth_gap, 1000.0);
        assert_eq!(config.focus_zone, 300.0);
        assert_eq!(config.behind_fade_factor, 2.0);
    }

    #[test]
    fn rejects_max_visible_inside_focus_zone() {
        let config = CameraConfig {
            max_visible: 200.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("maxVisible"));
    }

    #[test]
    fn rejects_non_positive_cull() {
        let config = CameraConfig {
            cull_ahead: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_fade_factor_below_one() {
        let config = CameraConfig {
            behind_fade_factor: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_nan() {
        let config = CameraConfig {
            depth_gap: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn scroll_sample_clamps_negative_readings() {
        let sample = ScrollSample::new(-10.0, -5.0, f64::INFINITY);
        assert_eq!(sample, ScrollSample::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn sentinel_is_far_ahead() {
        let state = CameraState::sentinel(5, &CameraConfig::default());
        assert_eq!(state.camera_z, 8000.0);
        assert_eq!(state.scroll_progress, 0.0);
    }

    #[test]
    fn sentinel_clears_long_galleries() {
        let config = CameraConfig::default();
        // Last item at 15200: 15200 + 600 + 300.
        let state = CameraState::sentinel(20, &config);
        assert_eq!(state.camera_z, 16_100.0);

        for index in 0..20 {
            let depth = geometry::item_depth(index, &config);
            let visual = geometry::visual_state_for(depth, state.camera_z, &config);
            assert!(!visual.is_visible, "item {index} visible before first sample");
        }
    }

    #[test]
    fn from_sample_clamps_struct_literal_readings() {
        let config = CameraConfig::default();
        let raw = ScrollSample {
            scroll_offset: f64::NAN,
            scrollable_extent: 5000.0,
            viewport_extent: -1000.0,
        };
        assert_eq!(raw.normalized(), ScrollSample::new(0.0, 5000.0, 0.0));

        let state = CameraState::from_sample(&raw, 5, &config);
        assert_eq!(state.camera_z, 3500.0);
        assert_eq!(state.scroll_progress, 0.0);
    }

    #[test]
    fn hidden_state_is_all_zero() {
        let state = VisualState::hidden(-1600.0);
        assert_eq!(state.scale, 0.0);
        assert_eq!(state.opacity, 0.0);
        assert_eq!(state.stack_order, 0);
        assert!(!state.is_visible);
        assert!(!state.is_focused);
    }

    #[test]
    fn loading_priority_serializes_lowercase() {
        let json = serde_json::to_string(&LoadingPriority::Preload).unwrap();
        assert_eq!(json, r#""preload""#);
    }
}
