//! Blocking delay abstraction
//!
//! Drivers that need settle times take a `DelayUs` argument instead of
//! spinning, so tests can count requested delays instead of waiting.

/// Blocking microsecond delay
pub trait DelayUs {
    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1_000);
        }
    }
}

/// Delay that returns immediately
///
/// Useful for host-side simulation where no settle time is required.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl DelayUs for NoDelay {
    fn delay_us(&mut self, _us: u32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingDelay {
        total_us: u64,
        calls: u32,
    }

    impl DelayUs for CountingDelay {
        fn delay_us(&mut self, us: u32) {
            self.total_us += us as u64;
            self.calls += 1;
        }
    }

    #[test]
    fn test_delay_ms_accumulates_microseconds() {
        let mut delay = CountingDelay::default();
        delay.delay_ms(3);
        assert_eq!(delay.total_us, 3_000);
        assert_eq!(delay.calls, 3);
    }
}
