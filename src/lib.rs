//! Catalog session over a streaming-music service.
//!
//! Logs a web and a mobile client in, pulls the user's library once and serves
//! it grouped by artist, album and genre, alongside playlist, station, search
//! and streaming lookups. Lost sessions are recovered by logging in again once.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod snapshot;

pub use client::{MobileClient, WebClient};
pub use error::{CatalogError, ClientError, Result};
pub use model::{ArtistInfoOptions, CatalogSession};
