//! Renders job-application cover letters from YAML context files and a
//! LaTeX template, then typesets them with an external TeX engine.

pub mod config;
pub mod error;
pub mod letter;
pub mod telemetry;
