use instant::Instant;

/// Elapsed and delta time for one frame, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub elapsed: f32,
    pub delta: f32,
}

impl FrameTime {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }.sanitized()
    }

    /// Negative or non-finite deltas become zero; non-finite elapsed time
    /// becomes zero as well.
    pub fn sanitized(self) -> Self {
        let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            elapsed: clean(self.elapsed),
            delta: clean(self.delta),
        }
    }
}

/// Monotonic clock measured from scene start.
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        FrameTime::new((now - self.start).as_secs_f32(), dt.as_secs_f32())
    }
}
