//! Time management utilities
//!
//! Both types are fed explicit timestamps in seconds instead of sampling
//! `Instant::now()` themselves, so a headless run can drive them from a
//! fixed timestep and tests stay deterministic.

/// Per-frame timer tracking delta and total time
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
    delta_time: f64,
    total_time: f64,
    frame_count: u64,
}

impl FrameClock {
    /// Create a new clock that has not seen a frame yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now` (seconds) and return the delta since the previous tick
    ///
    /// The first tick reports a zero delta. Timestamps that go backwards are
    /// treated as a zero-length frame.
    pub fn tick(&mut self, now: f64) -> f64 {
        self.delta_time = match self.last_time {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.total_time += self.delta_time;
        self.last_time = Some(now);
        self.frame_count += 1;
        self.delta_time
    }

    /// Time since the last frame in seconds
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Total elapsed time since the first tick
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Frames-per-second counter that reports once per measurement window
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_start: f64,
    frames: u32,
    window_secs: f64,
    last_fps: Option<f64>,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl FpsCounter {
    /// Create a counter averaging over `window_secs`
    pub fn new(window_secs: f64) -> Self {
        Self {
            window_start: 0.0,
            frames: 0,
            window_secs,
            last_fps: None,
        }
    }

    /// Record a frame at `now`; returns the FPS when a window completes
    pub fn record(&mut self, now: f64) -> Option<f64> {
        self.frames += 1;
        let elapsed = now - self.window_start;
        if elapsed < self.window_secs {
            return None;
        }

        let fps = f64::from(self.frames) / elapsed;
        self.frames = 0;
        self.window_start = now;
        self.last_fps = Some(fps);
        Some(fps)
    }

    /// FPS of the last completed window
    pub fn last_fps(&self) -> Option<f64> {
        self.last_fps
    }

    /// Window title carrying the FPS and the average frame time in ms
    pub fn format_title(title: &str, fps: f64) -> String {
        format!(
            "{} - [FPS: {:3.2}, avg. frame render time: {:0.8}]",
            title,
            fps,
            1000.0 / fps
        )
    }
}
