// Per-item fan-out and the gallery facade (native + WASM).
// Fan-out is stateless: every ItemFrame is a pure function of camera, index, count and config.

use wasm_bindgen::prelude::*;

use crate::controller::{CameraController, ControllerPhase, HostFrameScheduler};
use crate::error::EngineError;
use crate::geometry;
use crate::loading;
use crate::types::*;

/// Visual state and loading hint for one item.
pub fn item_frame(
    index: usize,
    camera_depth: f64,
    item_count: usize,
    config: &CameraConfig,
) -> ItemFrame {
    let depth = geometry::item_depth(index, config);
    ItemFrame {
        index,
        depth,
        visual: geometry::visual_state_for(depth, camera_depth, config),
        loading: loading::loading_priority(index, depth, camera_depth, item_count, config),
    }
}

/// Fan out a camera state over every item.
pub fn gallery_frame(state: CameraState, item_count: usize, config: &CameraConfig) -> GalleryFrame {
    GalleryFrame {
        camera: state,
        items: (0..item_count)
            .map(|index| item_frame(index, state.camera_z, item_count, config))
            .collect(),
    }
}

/// Native gallery: a controller driven by a host frame loop.
///
/// The host forwards scroll samples with [`DepthGallery::on_scroll`] and calls
/// [`DepthGallery::on_animation_frame`] once per frame.
#[derive(Debug)]
pub struct DepthGallery {
    controller: CameraController<HostFrameScheduler>,
}

impl DepthGallery {
    pub fn new(item_count: usize, config: CameraConfig) -> Result<Self, EngineError> {
        let mut controller = CameraController::new(HostFrameScheduler::new());
        controller.initialize(item_count, config)?;
        Ok(DepthGallery { controller })
    }

    /// Record a sample. Returns `true` when the host must request a frame.
    pub fn on_scroll(&mut self, sample: ScrollSample) -> bool {
        let was_pending = self.controller.is_pending();
        self.controller.on_scroll_sample(sample);
        !was_pending && self.controller.is_pending()
    }

    /// Fire the outstanding frame, if any. Returns `true` if the camera moved.
    pub fn on_animation_frame(&mut self) -> bool {
        match self.controller.scheduler_mut().take_requested() {
            Some(handle) => self.controller.on_frame(handle),
            None => false,
        }
    }

    pub fn sync(&mut self, sample: ScrollSample) -> bool {
        self.controller.sync(sample)
    }

    pub fn detach(&mut self) {
        self.controller.detach();
    }

    pub fn phase(&self) -> ControllerPhase {
        self.controller.phase()
    }

    pub fn camera(&self) -> CameraState {
        self.controller.current_state()
    }

    pub fn item_count(&self) -> usize {
        self.controller.item_count()
    }

    /// Current per-item frame for the presentation layer.
    pub fn frame(&self) -> GalleryFrame {
        gallery_frame(
            self.controller.current_state(),
            self.controller.item_count(),
            self.controller.config(),
        )
    }

    pub fn runway_extent(&self, viewport_extent: f64) -> f64 {
        geometry::runway_extent(self.controller.item_count(), viewport_extent)
    }
}

// =============================================================================
// WASM Bindings
// =============================================================================

/// WASM-exposed gallery for the browser host.
///
/// The host owns the scroll container and `requestAnimationFrame`:
/// `on_scroll` returns `true` when a frame has to be requested, and the frame
/// callback calls `on_animation_frame`.
///
/// # Example JSON Config
/// ```json
/// { "depthGap": 800, "focusZone": 300, "maxVisible": 1500,
///   "cullBehind": 600, "cullAhead": 2000, "behindFadeFactor": 2.0 }
/// ```
#[wasm_bindgen]
pub struct WasmDepthGallery {
    inner: DepthGallery,
}

#[wasm_bindgen]
impl WasmDepthGallery {
    /// Create a gallery from JSON config (missing fields use defaults).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, item_count: usize) -> Result<WasmDepthGallery, JsValue> {
        let config = CameraConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let inner = DepthGallery::new(item_count, config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmDepthGallery { inner })
    }

    #[wasm_bindgen]
    pub fn on_scroll(&mut self, scroll_top: f64, scroll_height: f64, client_height: f64) -> bool {
        self.inner
            .on_scroll(ScrollSample::new(scroll_top, scroll_height, client_height))
    }

    #[wasm_bindgen]
    pub fn on_animation_frame(&mut self) -> bool {
        self.inner.on_animation_frame()
    }

    /// Immediate update, used right after attaching the scroll listener.
    #[wasm_bindgen]
    pub fn sync(&mut self, scroll_top: f64, scroll_height: f64, client_height: f64) -> bool {
        self.inner
            .sync(ScrollSample::new(scroll_top, scroll_height, client_height))
    }

    /// Teardown. Any frame already requested becomes a no-op.
    #[wasm_bindgen]
    pub fn detach(&mut self) {
        self.inner.detach();
    }

    #[wasm_bindgen]
    pub fn camera_z(&self) -> f64 {
        self.inner.camera().camera_z
    }

    #[wasm_bindgen]
    pub fn scroll_progress(&self) -> f64 {
        self.inner.camera().scroll_progress
    }

    #[wasm_bindgen]
    pub fn runway_extent(&self, viewport_extent: f64) -> f64 {
        self.inner.runway_extent(viewport_extent)
    }

    /// Camera state plus every item's visual state and loading hint, as JSON.
    /// One call per frame keeps JS<->WASM crossings down.
    #[wasm_bindgen]
    pub fn frame_json(&self) -> Result<String, JsValue> {
        frame_to_json(&self.inner.frame()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn frame_to_json(frame: &GalleryFrame) -> Result<String, EngineError> {
    Ok(serde_json::to_string(frame)?)
}
