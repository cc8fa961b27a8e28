//! OpenWeatherMap weather integration
//!
//! Client for the OpenWeatherMap "current weather" endpoint
//! (<https://openweathermap.org/current>). One request per lookup, metric
//! units, no caching.

pub mod client;
mod models;

pub use client::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{
    CurrentConditions, CurrentWeatherResponse, MainReadings, ProviderCode, WeatherObservation,
};
