//! Shared configuration types for the melee position indicator.
//!
//! These types are consumed by both the engine (`meleeguard-core`) and the
//! command-line front end, so they carry no engine logic.

pub mod config;
pub mod formatting;

pub use config::{
    clamp_poll_interval, clamp_size, IndicatorConfig, IndicatorPosition, POLL_INTERVAL_DEFAULT,
    POLL_INTERVAL_MAX, POLL_INTERVAL_MIN, SIZE_DEFAULT, SIZE_MAX, SIZE_MIN,
};
