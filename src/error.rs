use std::path::PathBuf;

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything that can be wrong with a body table. All of these are caught
/// while loading, so the orrery never produces NaNs mid-simulation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: missing column `{column}`")]
    MissingColumn { line: usize, column: &'static str },

    #[error("line {line}: column `{column}` is not a number: {value:?}")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: invalid color {value:?}, expected six hex digits")]
    InvalidColor { line: usize, value: String },

    #[error("line {line}: unknown flag {value:?}")]
    UnknownFlag { line: usize, value: String },

    #[error("line {line}: unknown parent body {name:?}")]
    UnknownParent { line: usize, name: String },

    #[error("line {line}: {name} is fixed at the origin, but has a {column} of {value}")]
    FixedBodyOrbit {
        line: usize,
        name: String,
        column: &'static str,
        value: f64,
    },

    #[error("no body with id {0}")]
    UnknownBodyID(usize),

    #[error("duplicate body {0:?}")]
    DuplicateBody(String),

    #[error("{name}: semi-major axis must be positive, was {value}")]
    NonPositiveSemimajorAxis { name: String, value: f64 },

    #[error("{name}: orbital period must be positive, was {value}")]
    NonPositivePeriod { name: String, value: f64 },

    #[error("{name}: rotation period must be finite and nonzero, was {value}")]
    InvalidRotationPeriod { name: String, value: f64 },

    #[error("{name}: eccentricity must be in [0, 1), was {value}")]
    InvalidEccentricity { name: String, value: f64 },

    #[error("{name}: inclination must be finite and not a right angle, was {value}")]
    InvalidInclination { name: String, value: f64 },

    #[error("{name}: satellites orbit flat circles, but {column} was {value}")]
    SatelliteShape {
        name: String,
        column: &'static str,
        value: f64,
    },

    #[error("{name} orbits {primary}, which is itself a satellite")]
    NestedSatellite { name: String, primary: String },

    #[error("{0} is fixed at the origin and cannot be the reference body")]
    FixedReferenceBody(String),

    #[error("no reference body")]
    NoReferenceBody,

    #[error("both {0} and {1} are marked as the reference body")]
    MultipleReferenceBodies(String, String),

    #[error("reference body {name} must have an orbital period of exactly 1, was {value}")]
    ReferencePeriodNotUnit { name: String, value: f64 },
}
