/// Default body table, relative to the working directory.
pub const DEFAULT_BODY_FILE: &str = "solar-system.txt";

/// How long one Earth year lasts on screen, in seconds.
pub const DEFAULT_YEAR_SECONDS: f64 = 60.0;

/// Earth days per Earth year; rotation periods in the body table are in days.
pub const DAYS_PER_YEAR: f64 = 365.25;
