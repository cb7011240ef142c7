//! Suitability scoring for candidate Emergency Interim Housing sites.
//!
//! The [`scoring`] module holds the site scorer itself; [`reference`] loads the census tract,
//! shelter, and point-in-time tables it reads from.

pub mod config;
pub mod error;
pub mod reference;
pub mod scoring;
pub mod telemetry;
