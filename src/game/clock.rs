/// Time information handed to every per-tick update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Seconds since the world started (after this tick's advance)
    pub now: f32,
    /// Seconds covered by this tick
    pub dt: f32,
}

/// Session clock owned by the world driver.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    elapsed: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) -> Tick {
        self.elapsed += dt;
        Tick {
            now: self.elapsed,
            dt,
        }
    }

    pub fn now(&self) -> f32 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
