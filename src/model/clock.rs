/// The simulation's time source. Only ever moves forward, except when it's
/// explicitly restarted.
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    elapsed: f64,
}

impl SimulationClock {
    pub fn new() -> Self {
        SimulationClock { elapsed: 0.0 }
    }

    /// Seconds since the clock was started (or last restarted).
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Moves the clock forward by `dt` seconds. Negative and non-finite steps
    /// are ignored.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.elapsed
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_advance() {
        let mut clock = SimulationClock::new();
        assert_eq!(clock.elapsed(), 0.0);

        clock.advance(0.5);
        clock.advance(0.25);
        assert_relative_eq!(clock.elapsed(), 0.75);

        // Never goes backwards
        for dt in [-1.0, 0.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_relative_eq!(clock.advance(dt), 0.75);
        }

        let mut previous = clock.elapsed();
        for i in 0..100 {
            let now = clock.advance(i as f64 / 60.0);
            assert!(now >= previous);
            previous = now;
        }
    }

    #[test]
    fn test_restart() {
        let mut clock = SimulationClock::new();
        clock.advance(42.0);
        clock.restart();
        assert_eq!(clock.elapsed(), 0.0);
        clock.advance(1.0);
        assert_eq!(clock.elapsed(), 1.0);
    }
}
