//! Shared value types and configuration for terradio.
//!
//! Everything here is plain data: station records as they come off the wire,
//! the query shape sent to the station directory, the mood filter produced by
//! the inference service, and the on-disk TOML config. No I/O except the
//! config loader.

pub mod config;
pub mod mood;
pub mod station;
