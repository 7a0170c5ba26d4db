pub mod astro;
pub mod consts;
pub mod error;
pub mod file;
pub mod gui;
pub mod logging;
pub mod model;
