use std::f64::consts::TAU;

/// The unit of angular speed for the whole system, taken from the reference
/// body. Orbital periods are measured in reference-body years and rotation
/// periods in reference-body days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    /// Orbital angular speed of the reference body, in radians per second.
    pub angular_speed: f64,
    /// Number of reference-body days in one reference-body year.
    pub rotation_ratio: f64,
}

impl ReferenceFrame {
    /// `year_seconds` is how many display seconds one reference-body orbit takes.
    pub fn new(year_seconds: f64, days_per_year: f64) -> Self {
        assert!(
            year_seconds > 0.0 && year_seconds.is_finite(),
            "Year length must be positive, was {}",
            year_seconds
        );
        assert!(
            days_per_year > 0.0 && days_per_year.is_finite(),
            "Days per year must be positive, was {}",
            days_per_year
        );
        Self::from_angular_speed(TAU / year_seconds, days_per_year)
    }

    pub fn from_angular_speed(angular_speed: f64, rotation_ratio: f64) -> Self {
        ReferenceFrame {
            angular_speed,
            rotation_ratio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularSpeeds {
    /// Radians per second around the orbit.
    pub orbit: f64,
    /// Radians per second of axial spin. Negative is retrograde.
    pub rotation: f64,
}

impl AngularSpeeds {
    /// Seconds for one full revolution around the orbit.
    pub fn orbit_period_seconds(&self) -> f64 {
        TAU / self.orbit
    }
}

/// Converts a body's periods into angular speeds. Larger periods are slower;
/// the sign of `rotation_period` carries through to the spin direction.
///
/// A `rotation_period` of zero has no meaningful speed; bodies are checked for
/// that when they're loaded.
pub fn derive_speeds(
    rotation_period: f64,
    orbital_period: f64,
    frame: &ReferenceFrame,
) -> AngularSpeeds {
    let orbit = frame.angular_speed / orbital_period;
    let rotation = rotation_period.signum() * frame.angular_speed * frame.rotation_ratio
        / rotation_period.abs();
    AngularSpeeds { orbit, rotation }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_reference_frame() {
        let frame = ReferenceFrame::new(60.0, 365.25);
        assert_relative_eq!(frame.angular_speed, TAU / 60.0);
        assert_relative_eq!(frame.rotation_ratio, 365.25);
    }

    #[test]
    fn test_reference_body_speed_is_exact() {
        let frame = ReferenceFrame::new(60.0, 365.25);
        let speeds = derive_speeds(1.0, 1.0, &frame);
        assert_eq!(speeds.orbit, frame.angular_speed);
        assert_relative_eq!(speeds.rotation, frame.angular_speed * 365.25);
        assert_relative_eq!(speeds.orbit_period_seconds(), 60.0);
    }

    #[test]
    fn test_period_scaling() {
        let frame = ReferenceFrame::from_angular_speed(2.0, 10.0);

        // Twice the period is half the speed
        let inner = derive_speeds(1.0, 1.0, &frame);
        let outer = derive_speeds(1.0, 2.0, &frame);
        assert_relative_eq!(outer.orbit, inner.orbit / 2.0);

        // Rotation: 2.0 * 10.0 / 4.0
        let slow_spin = derive_speeds(4.0, 1.0, &frame);
        assert_relative_eq!(slow_spin.rotation, 5.0);
    }

    #[test]
    fn test_retrograde_rotation() {
        let frame = ReferenceFrame::from_angular_speed(1.0, 365.25);

        let prograde = derive_speeds(243.0, 0.615, &frame);
        let retrograde = derive_speeds(-243.0, 0.615, &frame);
        assert!(prograde.rotation > 0.0);
        assert!(retrograde.rotation < 0.0);
        assert_relative_eq!(prograde.rotation, -retrograde.rotation);
        // Spin direction doesn't touch the orbit
        assert_eq!(prograde.orbit, retrograde.orbit);
    }
}
