//! Frame-rate gate for the refresh-driven loop.

/// Whether a tick should do the expensive render work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Accumulating elapsed time.
    Waiting,
    /// Enough time has accumulated; render this tick.
    Rendering,
}

/// Accumulates the time between ticks and opens the gate once a frame
/// interval has built up.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval_ms: f64,
    last_timestamp_ms: u64,
    accumulated_ms: f64,
}

impl FrameClock {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_timestamp_ms: 0,
            accumulated_ms: 0.0,
        }
    }

    /// Time gathered since the last rendered frame.
    pub fn accumulated_ms(&self) -> f64 {
        self.accumulated_ms
    }

    /// Register a tick at `timestamp_ms`. Timestamps that go backwards add
    /// no time.
    pub fn tick(&mut self, timestamp_ms: u64) -> FrameState {
        let delta = timestamp_ms.saturating_sub(self.last_timestamp_ms);
        self.last_timestamp_ms = timestamp_ms;
        self.accumulated_ms += delta as f64;

        if self.accumulated_ms >= self.interval_ms {
            self.accumulated_ms = 0.0;
            FrameState::Rendering
        } else {
            FrameState::Waiting
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelrain_core::RainConfig;

    #[test]
    fn test_renders_once_threshold_reached() {
        let mut clock = FrameClock::new(RainConfig::default().frame_interval_ms());

        assert_eq!(clock.tick(10), FrameState::Waiting);
        assert_eq!(clock.accumulated_ms(), 10.0);
        assert_eq!(clock.tick(20), FrameState::Waiting);
        assert_eq!(clock.tick(30), FrameState::Rendering);
        assert_eq!(clock.accumulated_ms(), 0.0);
    }

    #[test]
    fn test_exact_interval_renders() {
        let mut clock = FrameClock::new(25.0);
        assert_eq!(clock.tick(25), FrameState::Rendering);
        assert_eq!(clock.tick(49), FrameState::Waiting);
        assert_eq!(clock.tick(50), FrameState::Rendering);
    }

    #[test]
    fn test_long_tick_renders_once_and_drops_excess() {
        let mut clock = FrameClock::new(25.0);
        assert_eq!(clock.tick(500), FrameState::Rendering);
        assert_eq!(clock.accumulated_ms(), 0.0);
        assert_eq!(clock.tick(510), FrameState::Waiting);
    }

    #[test]
    fn test_backwards_timestamp_adds_nothing() {
        let mut clock = FrameClock::new(25.0);
        clock.tick(20);
        assert_eq!(clock.tick(5), FrameState::Waiting);
        assert_eq!(clock.accumulated_ms(), 20.0);
    }
}
