// depth_core: scroll-driven depth camera engine for the gallery.
// The browser host only forwards scroll events and animation frames; every
// depth, falloff and loading decision is made here.

mod controller;
mod error;
mod gallery;
mod geometry;
mod loading;
mod types;

use wasm_bindgen::prelude::*;

pub use controller::{
    CameraController, ControllerPhase, FrameHandle, FrameScheduler, HostFrameScheduler,
};
pub use error::EngineError;
pub use gallery::{gallery_frame, item_frame, DepthGallery, WasmDepthGallery};
pub use geometry::{
    item_depth, runway_extent, scroll_progress, scroll_to_camera_depth, visual_state_for,
};
pub use loading::loading_priority;
pub use types::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Default configuration as JSON, so the host can show or tweak it.
#[wasm_bindgen]
pub fn default_config_json() -> Result<String, JsValue> {
    serde_json::to_string(&CameraConfig::default())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_json_round_trips() {
        let json = default_config_json().expect("defaults serialize");
        let config = CameraConfig::from_json(&json).expect("defaults parse");
        assert_eq!(config, CameraConfig::default());
    }

    #[test]
    fn public_surface_composes() {
        let config = CameraConfig::default();
        let camera = scroll_to_camera_depth(0.0, 5000.0, 1000.0, 5, &config);
        let depth = item_depth(4, &config);
        assert!(visual_state_for(depth, camera, &config).is_visible);
        assert_eq!(
            loading_priority(4, depth, camera, 5, &config),
            LoadingPriority::Eager
        );
    }
}
