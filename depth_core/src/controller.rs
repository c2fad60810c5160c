// Camera controller: coalesces scroll samples into at most one recompute per
// rendering frame and republishes the latest CameraState.
// Single-threaded and cooperative. Only one frame request is ever outstanding.

use tracing::{debug, trace};

use crate::error::EngineError;
use crate::types::{CameraConfig, CameraState, ScrollSample};

/// Identifies one outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u32);

impl FrameHandle {
    pub fn new(id: u32) -> Self {
        FrameHandle(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// One-shot frame-boundary scheduling primitive.
///
/// Implementations arrange for [`CameraController::on_frame`] to be called with
/// the returned handle at the next frame boundary (`requestAnimationFrame`, a
/// timer, a game loop tick).
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler for hosts that drive frames themselves: it only records the
/// outstanding request, and the host polls it once per frame.
#[derive(Debug, Default)]
pub struct HostFrameScheduler {
    next_id: u32,
    requested: Option<FrameHandle>,
}

impl HostFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The request the host still has to fire, if any.
    pub fn requested(&self) -> Option<FrameHandle> {
        self.requested
    }

    /// Take the outstanding request so the host can fire it.
    pub fn take_requested(&mut self) -> Option<FrameHandle> {
        self.requested.take()
    }
}

impl FrameScheduler for HostFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = FrameHandle(self.next_id);
        self.requested = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.requested == Some(handle) {
            self.requested = None;
        }
    }
}

/// Controller lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    Uninitialized,
    Ready,
    /// Terminal. Nothing is recomputed after this.
    Detached,
}

/// Bridges scroll samples to a throttled, republished [`CameraState`].
#[derive(Debug)]
pub struct CameraController<S: FrameScheduler> {
    scheduler: S,
    phase: ControllerPhase,
    config: CameraConfig,
    item_count: usize,
    state: CameraState,
    latest: Option<ScrollSample>,
    pending: Option<FrameHandle>,
}

impl<S: FrameScheduler> CameraController<S> {
    pub fn new(scheduler: S) -> Self {
        let config = CameraConfig::default();
        CameraController {
            scheduler,
            phase: ControllerPhase::Uninitialized,
            state: CameraState::sentinel(0, &config),
            config,
            item_count: 0,
            latest: None,
            pending: None,
        }
    }

    /// Validate the config and move to `Ready` with the sentinel state.
    ///
    /// Re-initializing a ready controller replaces its config and item count
    /// and drops any pending frame. A detached controller stays detached.
    pub fn initialize(&mut self, item_count: usize, config: CameraConfig) -> Result<(), EngineError> {
        if self.phase == ControllerPhase::Detached {
            return Err(EngineError::Detached);
        }
        config.validate()?;

        self.cancel_pending();
        self.config = config;
        self.item_count = item_count;
        self.state = CameraState::sentinel(item_count, &config);
        self.latest = None;
        self.phase = ControllerPhase::Ready;

        debug!(item_count, camera_z = self.state.camera_z, "camera controller initialized");
        Ok(())
    }

    /// Record a scroll sample. Schedules a recompute unless one is already
    /// outstanding, in which case the sample replaces the previous one.
    pub fn on_scroll_sample(&mut self, sample: ScrollSample) {
        if self.phase != ControllerPhase::Ready {
            trace!(phase = ?self.phase, "scroll sample ignored");
            return;
        }

        self.latest = Some(sample.normalized());
        match self.pending {
            Some(handle) => trace!(frame = handle.as_u32(), "scroll sample coalesced"),
            None => {
                let handle = self.scheduler.request_frame();
                trace!(frame = handle.as_u32(), "frame requested");
                self.pending = Some(handle);
            }
        }
    }

    /// Frame boundary reached for `handle`. Recomputes from the latest sample.
    ///
    /// Returns `true` if a new state was published. Cancelled or stale handles
    /// and calls after detach are no-ops.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if self.phase != ControllerPhase::Ready || self.pending != Some(handle) {
            trace!(frame = handle.as_u32(), "stale frame dropped");
            return false;
        }
        self.pending = None;

        match self.latest {
            Some(sample) => {
                self.publish(&sample);
                true
            }
            None => false,
        }
    }

    /// Recompute immediately from `sample`, bypassing the throttle.
    /// Used when a host first attaches to its scroll source.
    pub fn sync(&mut self, sample: ScrollSample) -> bool {
        if self.phase != ControllerPhase::Ready {
            return false;
        }
        let sample = sample.normalized();
        self.cancel_pending();
        self.latest = Some(sample);
        self.publish(&sample);
        true
    }

    /// Release the pending frame and stop reacting to anything.
    pub fn detach(&mut self) {
        if self.phase == ControllerPhase::Detached {
            return;
        }
        self.cancel_pending();
        self.latest = None;
        self.phase = ControllerPhase::Detached;
        debug!("camera controller detached");
    }

    pub fn current_state(&self) -> CameraState {
        self.state
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Whether a recompute is scheduled but has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn publish(&mut self, sample: &ScrollSample) {
        self.state = CameraState::from_sample(sample, self.item_count, &self.config);
        trace!(
            camera_z = self.state.camera_z,
            scroll_progress = self.state.scroll_progress,
            "camera state published"
        );
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}
