//! Per-run frame state
//!
//! Everything that changes from frame to frame but is not part of the
//! scene lives in one [`FrameContext`] that the render loop owns and passes
//! around explicitly.

use crate::config::DemoConfig;
use crate::foundation::math::Vec3;
use crate::foundation::time::{FpsCounter, FrameClock};

/// What the lighting pass shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugView {
    /// The lit scene
    #[default]
    Scene,
    /// The shadow depth map on a full-screen quad
    DepthMap,
}

impl DebugView {
    /// The view after this one, wrapping around
    pub fn next(self) -> Self {
        match self {
            DebugView::Scene => DebugView::DepthMap,
            DebugView::DepthMap => DebugView::Scene,
        }
    }
}

/// Light position over time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightAnimation {
    moving: bool,
    rest_position: Vec3,
}

impl Default for LightAnimation {
    fn default() -> Self {
        Self::new(true, Vec3::new(-2.0, 4.0, -1.0))
    }
}

impl LightAnimation {
    /// Create an animation; `rest_position` is used when `moving` is off
    pub fn new(moving: bool, rest_position: Vec3) -> Self {
        Self { moving, rest_position }
    }

    /// Whether the light moves
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Light position at `time` seconds
    ///
    /// A moving light circles the scene on an ellipse while bobbing between
    /// heights 4 and 6, so it never passes through the origin.
    pub fn position_at(&self, time: f64) -> Vec3 {
        if !self.moving {
            return self.rest_position;
        }
        Vec3::new(
            (time.sin() * 3.0) as f32,
            (5.0 + time.cos()) as f32,
            (time.cos() * 2.0) as f32,
        )
    }
}

/// Timing of one frame as seen by the render loop
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInfo {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Seconds since the previous frame
    pub delta: f64,
    /// Timestamp of this frame
    pub time: f64,
    /// Light position for this frame
    pub light_position: Vec3,
    /// New window title when an FPS window completed this frame
    pub title: Option<String>,
}

/// Clock, FPS counter, debug toggle and light animation for one run
#[derive(Debug, Clone)]
pub struct FrameContext {
    title: String,
    clock: FrameClock,
    fps: FpsCounter,
    debug_view: DebugView,
    toggle_held: bool,
    light: LightAnimation,
}

impl FrameContext {
    /// Create a context reporting FPS under `title`
    pub fn new(title: impl Into<String>, light: LightAnimation) -> Self {
        Self {
            title: title.into(),
            clock: FrameClock::new(),
            fps: FpsCounter::default(),
            debug_view: DebugView::default(),
            toggle_held: false,
            light,
        }
    }

    /// Create a context from the demo settings
    pub fn from_config(config: &DemoConfig) -> Self {
        let [x, y, z] = config.light_position;
        Self::new(config.title.clone(), LightAnimation::new(config.moving_light, Vec3::new(x, y, z)))
    }

    /// Advance to `now` (seconds)
    pub fn begin_frame(&mut self, now: f64) -> FrameInfo {
        let delta = self.clock.tick(now);
        let title = self.fps.record(now).map(|fps| {
            let title = FpsCounter::format_title(&self.title, fps);
            log::debug!("{}", title);
            title
        });

        FrameInfo {
            frame: self.clock.frame_count(),
            delta,
            time: now,
            light_position: self.light.position_at(now),
            title,
        }
    }

    /// Feed the current state of the debug key
    ///
    /// The view only changes on the frame the key goes down; holding it
    /// does nothing more.
    pub fn update_debug_toggle(&mut self, pressed: bool) -> DebugView {
        if pressed && !self.toggle_held {
            self.debug_view = self.debug_view.next();
            log::info!("Debug view: {:?}", self.debug_view);
        }
        self.toggle_held = pressed;
        self.debug_view
    }

    /// Current debug view
    pub fn debug_view(&self) -> DebugView {
        self.debug_view
    }

    /// Frame clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Light animation
    pub fn light(&self) -> &LightAnimation {
        &self.light
    }
}
