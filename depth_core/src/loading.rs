// Image loading priority per item.
// Independent of culling: loading anticipates visibility instead of following it.

use crate::types::{CameraConfig, LoadingPriority};

/// How many gaps behind the camera still count as "about to be reached".
const PRELOAD_GAPS: f64 = 3.0;

/// Classify how urgently the image for item `index` should be fetched.
///
/// - The last two items are always eager: the camera starts next to them.
/// - Items the camera has passed, within three gaps, are preloaded. The camera
///   travels toward lower depths, so these are the ones coming up next.
/// - Everything else is lazy.
pub fn loading_priority(
    index: usize,
    item_depth: f64,
    camera_depth: f64,
    total_count: usize,
    config: &CameraConfig,
) -> LoadingPriority {
    if index >= total_count.saturating_sub(2) {
        return LoadingPriority::Eager;
    }

    let relative_depth = item_depth - camera_depth;
    let preload_threshold = config.depth_gap * PRELOAD_GAPS;

    if relative_depth < 0.0 && relative_depth.abs() < preload_threshold {
        return LoadingPriority::Preload;
    }

    LoadingPriority::Lazy
}
