//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Query-key resolution for the built-in city list
//! - A single-shot OpenWeatherMap current-weather client
//! - The normalized snapshot model and typed lookup failures
//! - Configuration & credentials handling
//!
//! The HTTP layer sits behind the [`Transport`] trait so callers and tests can
//! swap it out.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod transport;

pub use client::{DEFAULT_ENDPOINT, WeatherLookupClient, parse_snapshot};
pub use config::Config;
pub use error::{LookupFailure, ParseError, TransportError};
pub use model::WeatherSnapshot;
pub use query::{KNOWN_CITIES, LocationQuery, known_city_names, resolve_query_key};
pub use transport::{ReqwestTransport, Transport};
