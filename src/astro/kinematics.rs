use nalgebra::Point3;

use super::speeds::AngularSpeeds;

/// Where a body is, and how far it has spun, at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvedState {
    pub position: Point3<f64>,
    /// Accumulated radians of axial spin. Not wrapped.
    pub rotation_angle: f64,
}

/// Shape of an orbit around the origin, plus how fast it's traversed.
///
/// Orbits lie in the x-z plane. Inclination is applied by shearing x into y,
/// so an inclined orbit stays the same shape when viewed from above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    semimajor_axis: f64,
    eccentricity: f64,
    inclination_degrees: f64,
    speeds: AngularSpeeds,
}

impl Orbit {
    /// Panics unless the eccentricity is in [0, 1). Anything else would
    /// put NaNs into every position solved from this orbit.
    pub fn new(
        semimajor_axis: f64,
        eccentricity: f64,
        inclination_degrees: f64,
        speeds: AngularSpeeds,
    ) -> Self {
        assert!(
            (0.0..1.0).contains(&eccentricity),
            "Eccentricity out of range: {}",
            eccentricity
        );
        Orbit {
            semimajor_axis,
            eccentricity,
            inclination_degrees,
            speeds,
        }
    }

    pub fn semimajor_axis(&self) -> f64 {
        self.semimajor_axis
    }

    pub fn semiminor_axis(&self) -> f64 {
        let e = self.eccentricity;
        self.semimajor_axis * (1.0 - e * e).sqrt()
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination_degrees(&self) -> f64 {
        self.inclination_degrees
    }

    pub fn speeds(&self) -> &AngularSpeeds {
        &self.speeds
    }

    /// Point on the orbit at the given orbit angle (not time!).
    pub fn point_at_angle(&self, angle: f64) -> Point3<f64> {
        let x = self.semimajor_axis * angle.cos();
        let z = self.semiminor_axis() * angle.sin();
        let y = x * self.inclination_degrees.to_radians().tan();
        Point3::new(x, y, z)
    }

    pub fn state_at_time(&self, time: f64) -> SolvedState {
        solve_position(time, self)
    }
}

pub fn solve_position(time: f64, orbit: &Orbit) -> SolvedState {
    let orbit_angle = time * orbit.speeds.orbit;
    SolvedState {
        position: orbit.point_at_angle(orbit_angle),
        rotation_angle: time * orbit.speeds.rotation,
    }
}

/// Position of a body on a circular orbit around `primary_position`. The
/// offset is flat in x-z; the primary's own height is inherited as-is.
///
/// `primary_position` must be the primary's position at this same `time`.
pub fn solve_dependent_position(
    time: f64,
    primary_position: &Point3<f64>,
    orbit_radius: f64,
    angular_speed: f64,
) -> Point3<f64> {
    let angle = time * angular_speed;
    Point3::new(
        primary_position.x + orbit_radius * angle.cos(),
        primary_position.y,
        primary_position.z + orbit_radius * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::distance;

    use super::*;

    fn speeds(orbit: f64, rotation: f64) -> AngularSpeeds {
        AngularSpeeds { orbit, rotation }
    }

    #[test]
    fn test_concrete_circle() {
        let orbit = Orbit::new(100.0, 0.0, 0.0, speeds(1.0, 0.0));

        let start = solve_position(0.0, &orbit);
        assert_eq!(start.position, Point3::new(100.0, 0.0, 0.0));
        assert_eq!(start.rotation_angle, 0.0);

        let quarter = solve_position(FRAC_PI_2, &orbit);
        assert_abs_diff_eq!(quarter.position.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(quarter.position.y, 0.0);
        assert_relative_eq!(quarter.position.z, 100.0);
    }

    #[test]
    fn test_circular_orbits_stay_on_circle() {
        for (radius, speed) in [(100.0, 1.0), (300.0, 0.1), (900.0, 0.0064), (40.0, 13.4)] {
            let orbit = Orbit::new(radius, 0.0, 0.0, speeds(speed, 1.0));
            for i in 0..50 {
                let t = i as f64 * 0.37;
                let p = orbit.state_at_time(t).position;
                assert_eq!(p.y, 0.0);
                assert_relative_eq!(p.coords.norm(), radius, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_ellipse_shape() {
        let orbit = Orbit::new(100.0, 0.5, 0.0, speeds(1.0, 0.0));
        assert_relative_eq!(orbit.semiminor_axis(), 86.602540378, max_relative = 1e-9);

        let p = orbit.point_at_angle(FRAC_PI_2);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 86.602540378, max_relative = 1e-9);

        // Ends of the major axis
        assert_relative_eq!(orbit.point_at_angle(0.0).x, 100.0);
        assert_relative_eq!(orbit.point_at_angle(PI).x, -100.0);
    }

    #[test]
    fn test_inclination_shear() {
        let orbit = Orbit::new(100.0, 0.0, 45.0, speeds(1.0, 0.0));

        // tan(45 deg) = 1, so y tracks x exactly
        let p = orbit.point_at_angle(0.0);
        assert_relative_eq!(p.y, 100.0, max_relative = 1e-12);
        let p = orbit.point_at_angle(PI);
        assert_relative_eq!(p.y, -100.0, max_relative = 1e-12);

        // The top-down shape is untouched by the shear
        let p = orbit.point_at_angle(1.0);
        assert_relative_eq!(p.x.hypot(p.z), 100.0, max_relative = 1e-12);

        let orbit = Orbit::new(100.0, 0.2, 7.0, speeds(1.0, 0.0));
        for i in 0..20 {
            let p = orbit.point_at_angle(i as f64 * 0.3);
            assert_relative_eq!(p.y, p.x * 7.0_f64.to_radians().tan());
        }

        // Past 90 degrees the shear flips: y = -x at 135
        let orbit = Orbit::new(100.0, 0.0, 135.0, speeds(1.0, 0.0));
        for i in 0..20 {
            let p = orbit.point_at_angle(i as f64 * 0.3);
            assert_relative_eq!(p.y, p.x * 135.0_f64.to_radians().tan());
            assert_relative_eq!(p.y, -p.x, epsilon = 1e-9);
        }
    }

    #[test]
    #[should_panic(expected = "Eccentricity out of range")]
    fn test_open_orbit_rejected() {
        Orbit::new(100.0, 1.5, 0.0, speeds(1.0, 0.0));
    }

    #[test]
    fn test_periodicity() {
        let orbit = Orbit::new(250.0, 0.3, 3.4, speeds(0.7, 2.0));
        let period = orbit.speeds().orbit_period_seconds();
        assert_relative_eq!(period, TAU / 0.7);

        for i in 0..10 {
            let t = i as f64 * 1.3;
            let p1 = orbit.state_at_time(t).position;
            let p2 = orbit.state_at_time(t + period).position;
            assert_abs_diff_eq!(p1, p2, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rotation_angle() {
        // Unbounded, not wrapped
        let orbit = Orbit::new(100.0, 0.0, 0.0, speeds(1.0, 3.0));
        assert_relative_eq!(orbit.state_at_time(10.0).rotation_angle, 30.0);

        // Retrograde spin goes strictly down
        let orbit = Orbit::new(200.0, 0.0068, 3.39, speeds(0.16, -0.02));
        let mut previous = orbit.state_at_time(0.0).rotation_angle;
        for i in 1..100 {
            let angle = orbit.state_at_time(i as f64 * 0.5).rotation_angle;
            assert!(angle < previous);
            previous = angle;
        }
    }

    #[test]
    fn test_deterministic() {
        let orbit = Orbit::new(700.0, 0.0565, 2.49, speeds(0.0035, 23.0));
        for t in [0.0, 1.5, 1234.5678, 1e6] {
            assert_eq!(orbit.state_at_time(t), orbit.state_at_time(t));
        }
    }

    #[test]
    fn test_dependent_position() {
        let primaries = [
            Point3::origin(),
            Point3::new(300.0, 0.0, 0.0),
            Point3::new(-120.5, 14.0, 280.25),
        ];
        for primary in primaries.iter() {
            for i in 0..25 {
                let t = i as f64 * 0.41;
                let p = solve_dependent_position(t, primary, 40.0, 13.4);
                assert_relative_eq!(distance(&p, primary), 40.0, max_relative = 1e-12);
                // Flat relative to the primary
                assert_eq!(p.y, primary.y);
            }
        }

        let p = solve_dependent_position(0.0, &Point3::new(300.0, 5.0, 0.0), 40.0, 1.0);
        assert_eq!(p, Point3::new(340.0, 5.0, 0.0));
    }
}
