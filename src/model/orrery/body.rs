use nalgebra::Point3;

use crate::astro::{AngularSpeeds, Orbit};
use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

// All the immutable display info about a body
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub name: String,
    /// Opaque identifier for the visual asset, handed to the scene as-is.
    pub asset: String,
    pub radius: f32,
    pub color: Point3<f32>,
}

/// The orbital constants for one body, as they appear in the body table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalParams {
    pub semimajor_axis: f64,
    /// In reference-body years.
    pub orbital_period: f64,
    /// In reference-body days. Negative is retrograde.
    pub rotation_period: f64,
    pub inclination_degrees: f64,
    pub eccentricity: f64,
}

const INCLINATION_COS_TOLERANCE: f64 = 1e-9;

impl OrbitalParams {
    pub fn validate(&self, name: &str) -> ConfigResult<()> {
        if !(self.semimajor_axis > 0.0 && self.semimajor_axis.is_finite()) {
            return Err(ConfigError::NonPositiveSemimajorAxis {
                name: name.to_owned(),
                value: self.semimajor_axis,
            });
        }
        if !(self.orbital_period > 0.0 && self.orbital_period.is_finite()) {
            return Err(ConfigError::NonPositivePeriod {
                name: name.to_owned(),
                value: self.orbital_period,
            });
        }
        validate_rotation_period(name, self.rotation_period)?;
        // NaN fails the range check too
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(ConfigError::InvalidEccentricity {
                name: name.to_owned(),
                value: self.eccentricity,
            });
        }
        // The shear is x * tan(i), which blows up where cos(i) vanishes
        let incl = self.inclination_degrees;
        if !incl.is_finite() || incl.to_radians().cos().abs() < INCLINATION_COS_TOLERANCE {
            return Err(ConfigError::InvalidInclination {
                name: name.to_owned(),
                value: self.inclination_degrees,
            });
        }
        Ok(())
    }
}

pub(super) fn validate_rotation_period(name: &str, rotation_period: f64) -> ConfigResult<()> {
    if rotation_period == 0.0 || !rotation_period.is_finite() {
        return Err(ConfigError::InvalidRotationPeriod {
            name: name.to_owned(),
            value: rotation_period,
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub enum BodyState {
    FixedAtOrigin {
        rotation_speed: f64,
    },
    Orbiting {
        parent_id: BodyID,
        orbit: Orbit,
    },
    /// Circles its primary's current position rather than the origin.
    Satellite {
        primary_id: BodyID,
        radius: f64,
        speeds: AngularSpeeds,
    },
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
    pub state: BodyState,
}

impl Body {
    pub fn parent_id(&self) -> Option<BodyID> {
        match self.state {
            BodyState::FixedAtOrigin { .. } => None,
            BodyState::Orbiting { parent_id, .. } => Some(parent_id),
            BodyState::Satellite { primary_id, .. } => Some(primary_id),
        }
    }

    pub fn orbit(&self) -> Option<&Orbit> {
        match &self.state {
            BodyState::Orbiting { orbit, .. } => Some(orbit),
            _ => None,
        }
    }

    pub fn is_satellite(&self) -> bool {
        matches!(self.state, BodyState::Satellite { .. })
    }

    pub fn speeds(&self) -> Option<&AngularSpeeds> {
        match &self.state {
            BodyState::FixedAtOrigin { .. } => None,
            BodyState::Orbiting { orbit, .. } => Some(orbit.speeds()),
            BodyState::Satellite { speeds, .. } => Some(speeds),
        }
    }
}
