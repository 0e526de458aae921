//! Current weather and air quality for a named place.
//!
//! Wraps the OpenWeatherMap `weather` and `air_pollution` endpoints and folds
//! their answers into one [`EnvironmentSnapshot`].

pub mod client;
pub mod error;
pub mod types;

pub use client::OpenWeatherClient;
pub use error::EnvironmentError;
pub use types::{Coordinates, EnvironmentSnapshot, Place};
