// Depth geometry and falloff: scroll -> camera depth, index -> item depth,
// (item depth, camera depth) -> visual state. Pure functions, no state, no logging.
//
// Sign convention: scroll offset 0 parks the camera PAST the last item and
// scrolling forward walks it back toward the first one. Scrolling down therefore
// reads as approaching the items. Keep it that way.

use crate::types::{CameraConfig, VisualState};

/// Scale lost at full falloff (1.0 -> 0.4).
const SCALE_FALLOFF: f64 = 0.6;
/// Opacity lost at full falloff (1.0 -> 0.1).
const OPACITY_FALLOFF: f64 = 0.9;
const MIN_OPACITY: f64 = 0.1;
/// Base for stack order so nearer items stay positive and on top.
const STACK_BASE: f64 = 10_000.0;

/// Depth of the item at `index`. Index 0 sits at depth 0.
pub fn item_depth(index: usize, config: &CameraConfig) -> f64 {
    index as f64 * config.depth_gap
}

/// Map a scroll position to the camera's depth.
///
/// Progress 0 (top of scroll) puts the camera at `total_depth + focus_zone`,
/// just past the last item; progress 1 puts it at `-2 * focus_zone`, before the
/// first item. When the content does not scroll at all the camera is parked at
/// `-focus_zone`.
pub fn scroll_to_camera_depth(
    scroll_offset: f64,
    scrollable_extent: f64,
    viewport_extent: f64,
    item_count: usize,
    config: &CameraConfig,
) -> f64 {
    let max_scroll = scrollable_extent - viewport_extent;
    if max_scroll <= 0.0 {
        return -config.focus_zone;
    }

    let progress = (scroll_offset / max_scroll).clamp(0.0, 1.0);
    let total_depth = config.depth_gap * item_count.saturating_sub(1) as f64;

    let start_z = -config.focus_zone * 2.0;
    let end_z = total_depth + config.focus_zone;

    end_z - progress * (end_z - start_z)
}

/// Scroll progress as a percentage in `[0, 100]`. Zero when nothing scrolls.
pub fn scroll_progress(scroll_offset: f64, scrollable_extent: f64, viewport_extent: f64) -> f64 {
    let max_scroll = scrollable_extent - viewport_extent;
    if max_scroll <= 0.0 {
        return 0.0;
    }
    (scroll_offset / max_scroll * 100.0).clamp(0.0, 100.0)
}

/// Total scrollable length of the runway: one viewport of scroll per item
/// beyond the first.
pub fn runway_extent(item_count: usize, viewport_extent: f64) -> f64 {
    if item_count <= 1 {
        return viewport_extent;
    }
    viewport_extent + viewport_extent * (item_count - 1) as f64
}

/// Visual state of an item at `item_depth` seen from `camera_depth`.
pub fn visual_state_for(item_depth: f64, camera_depth: f64, config: &CameraConfig) -> VisualState {
    let relative_depth = item_depth - camera_depth;
    let abs_depth = relative_depth.abs();
    let is_behind = relative_depth < 0.0;

    let is_visible = relative_depth > -config.cull_behind && relative_depth < config.cull_ahead;
    if !is_visible {
        return VisualState::hidden(relative_depth);
    }

    let is_focused = abs_depth < config.focus_zone;
    let falloff = falloff_ratio(abs_depth, is_behind, config);

    let scale = if is_focused {
        1.0
    } else {
        1.0 - falloff * SCALE_FALLOFF
    };
    let opacity = if is_focused {
        1.0
    } else {
        (1.0 - falloff * OPACITY_FALLOFF).max(MIN_OPACITY)
    };

    VisualState {
        relative_depth,
        scale,
        opacity,
        stack_order: stack_order(abs_depth),
        is_visible: true,
        is_focused,
    }
}

/// Normalized falloff in `[0, 1]`: 0 inside the focus zone, 1 at `max_visible`.
fn falloff_ratio(abs_depth: f64, is_behind: bool, config: &CameraConfig) -> f64 {
    let effective_depth = (abs_depth - config.focus_zone).max(0.0);
    let falloff_range = config.max_visible - config.focus_zone;

    // Misconfigured range: anything outside the focus zone is fully faded.
    let base = if falloff_range > 0.0 {
        (effective_depth / falloff_range).min(1.0)
    } else {
        1.0
    };

    if is_behind {
        (base * config.behind_fade_factor).min(1.0)
    } else {
        base
    }
}

/// Half-up rounding, so ties resolve the same way on every host.
fn stack_order(abs_depth: f64) -> i32 {
    (STACK_BASE - abs_depth + 0.5).floor() as i32
}
